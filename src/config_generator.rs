//! Icinga2 `CheckCommand` generation from the plugin's clap command line.

use std::fmt;

/// Environment variable that switches the binary from checking to printing its command definition.
pub const GENERATE_ENV: &str = "GENERATE_ICINGA_COMMAND";

/// An Icinga2 `object CheckCommand` for a plugin executable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckCommand {
    name: String,
    executable: String,
    arguments: Vec<CommandArgument>,
}

/// One `--long` option of the plugin, mapped to the Icinga custom variable `$<var>$`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandArgument {
    long: String,
    var: String,
    description: Option<String>,
    is_flag: bool,
    default_value: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum ToIcingaCommandError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid executable path")]
    InvalidExecutablePath,
    #[error("error converting to command description: {0}")]
    CommandDescriptionFrom(#[from] CommandDescriptionFromError),
}

#[derive(Debug, thiserror::Error)]
pub enum CommandDescriptionFromError {
    #[error("argument `{0}` has no long name")]
    MissingLongArgument(String),
}

impl CheckCommand {
    /// Describes `cmd` as the Icinga command `name`, invoked through `executable`.
    ///
    /// clap's built-in `--help` and `--version` are left out.
    pub fn from_clap(
        name: &str,
        executable: &str,
        cmd: &clap::Command,
    ) -> Result<Self, CommandDescriptionFromError> {
        let arguments = cmd
            .get_arguments()
            .filter(|arg| !matches!(arg.get_id().as_str(), "help" | "version"))
            .map(CommandArgument::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CheckCommand {
            name: name.to_owned(),
            executable: executable.to_owned(),
            arguments,
        })
    }

    /// Like [CheckCommand::from_clap], with the currently running binary as the executable.
    pub fn for_current_exe(name: &str, cmd: &clap::Command) -> Result<Self, ToIcingaCommandError> {
        let exe = std::env::current_exe()?;
        let exe = exe.to_str().ok_or(ToIcingaCommandError::InvalidExecutablePath)?;

        Ok(Self::from_clap(name, exe, cmd)?)
    }

    pub fn arguments(&self) -> &[CommandArgument] {
        &self.arguments
    }
}

impl fmt::Display for CheckCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "object CheckCommand \"{}\" {{", escape(&self.name))?;
        writeln!(f, "  command = [ \"{}\" ]", escape(&self.executable))?;
        writeln!(f, "  arguments = {{")?;
        for arg in &self.arguments {
            writeln!(f, "    \"--{}\" = {{", arg.long)?;
            let key = if arg.is_flag { "set_if" } else { "value" };
            writeln!(f, "      {} = \"${}$\"", key, arg.var)?;
            if let Some(description) = &arg.description {
                writeln!(f, "      description = \"{}\"", escape(description))?;
            }
            writeln!(f, "    }}")?;
        }
        writeln!(f, "  }}")?;

        let mut defaults = self
            .arguments
            .iter()
            .filter_map(|arg| arg.default_value.as_ref().map(|d| (&arg.var, d)))
            .peekable();
        if defaults.peek().is_some() {
            writeln!(f)?;
            for (var, default) in defaults {
                writeln!(f, "  vars.{} = \"{}\"", var, escape(default))?;
            }
        }

        write!(f, "}}")
    }
}

impl TryFrom<&clap::Arg> for CommandArgument {
    type Error = CommandDescriptionFromError;

    fn try_from(arg: &clap::Arg) -> Result<Self, Self::Error> {
        let long = arg
            .get_long()
            .ok_or_else(|| {
                CommandDescriptionFromError::MissingLongArgument(arg.get_id().to_string())
            })?
            .to_owned();

        let is_flag = !arg.get_action().takes_values();

        let default_value = arg
            .get_default_values()
            .first()
            .and_then(|v| v.to_str())
            .map(str::to_owned);

        Ok(CommandArgument {
            var: long.replace('-', "_"),
            description: arg.get_help().map(|s| s.to_string()),
            long,
            is_flag,
            default_value,
        })
    }
}

fn escape(s: &str) -> String {
    s.chars().fold(String::with_capacity(s.len()), |mut acc, c| {
        if matches!(c, '"' | '$' | '\\') {
            acc.push('\\');
        }
        acc.push(c);
        acc
    })
}

/// Prints the Icinga command definition if [GENERATE_ENV] is set and exits the process.
/// Returns without doing anything otherwise.
pub fn print_icinga_command_config_if_env_and_exit(
    name: &str,
    cmd: &clap::Command,
) -> Result<(), ToIcingaCommandError> {
    if std::env::var_os(GENERATE_ENV).is_none() {
        return Ok(());
    }

    let command = CheckCommand::for_current_exe(name, cmd)?;
    println!("{command}");
    std::process::exit(0);
}
