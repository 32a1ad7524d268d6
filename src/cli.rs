//! Command line of the `check_webcheck` plugin.

use clap::Parser;

use crate::{Probe, Protocol};

pub const DEFAULT_HOST: &str = "somedomain.com";

/// Checks that a web server answers `200` to a plain GET request.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// A valid internet site without http:// or https://
    #[arg(long, default_value = DEFAULT_HOST)]
    pub host: String,

    /// Protocol used to reach the host
    #[arg(long, value_enum, default_value_t = Protocol::Https)]
    pub protocol: Protocol,
}

impl Cli {
    pub fn probe(&self) -> Probe {
        Probe::new(&self.host, self.protocol)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["check_webcheck"]).unwrap();
        assert_eq!(cli.host, "somedomain.com");
        assert_eq!(cli.protocol, Protocol::Https);
        assert_eq!(cli.probe().url(), "https://somedomain.com");
    }

    #[test]
    fn test_explicit_arguments() {
        let cli = Cli::try_parse_from([
            "check_webcheck",
            "--host",
            "example.com",
            "--protocol",
            "http",
        ])
        .unwrap();
        assert_eq!(cli.probe(), Probe::new("example.com", Protocol::Http));
    }

    #[test]
    fn test_rejects_unknown_protocol() {
        let err = Cli::try_parse_from(["check_webcheck", "--protocol", "ftp"]).unwrap_err();
        assert_eq!(err.kind(), clap::error::ErrorKind::InvalidValue);
    }

    #[test]
    fn test_rejects_positional_arguments() {
        assert!(Cli::try_parse_from(["check_webcheck", "example.com"]).is_err());
    }
}
