use std::fmt;
use std::process;

/// Output prefixes indexed by [Severity::exit_code].
static PREFIXES: [&str; 4] = ["OK:", "WARNING:", "CRITICAL:", "UNKNOWN:"];

/// Represents a service state from nagios, ordered from least to most severe.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Ok,
    Warning,
    Critical,
    Unknown,
}

impl Severity {
    /// Returns the corresponding nagios exit code to signal the service state of self.
    pub fn exit_code(&self) -> i32 {
        match self {
            Severity::Ok => 0,
            Severity::Warning => 1,
            Severity::Critical => 2,
            Severity::Unknown => 3,
        }
    }

    /// The prefix printed in front of the status message, e.g. `"CRITICAL:"`.
    pub fn prefix(&self) -> &'static str {
        PREFIXES[self.exit_code() as usize]
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Severity::Ok => "OK",
            Severity::Warning => "WARNING",
            Severity::Critical => "CRITICAL",
            Severity::Unknown => "UNKNOWN",
        };

        f.write_str(s)
    }
}

/// The outcome of a single check: a [Severity] and a message.
///
/// Several statuses can be folded into one with [Status::aggregate], which keeps the most severe
/// state and a trace of every message.
///
/// ```rust
/// # use webcheck::{Severity, Status};
/// let mut status = Status::ok("disk fine");
/// status.aggregate(&[Status::warning("load high"), Status::critical("ping lost")]);
///
/// assert_eq!(status.severity(), Severity::Critical);
/// assert_eq!(status.message(), "disk fine - load high - ping lost");
/// assert_eq!(status.to_nagios_string(), "CRITICAL: disk fine - load high - ping lost");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Status {
    severity: Severity,
    message: String,
}

impl Status {
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Status {
            severity,
            message: message.into(),
        }
    }

    pub fn ok(message: impl Into<String>) -> Self {
        Self::new(Severity::Ok, message)
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    pub fn critical(message: impl Into<String>) -> Self {
        Self::new(Severity::Critical, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(Severity::Unknown, message)
    }

    pub fn severity(&self) -> Severity {
        self.severity
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    /// Folds `others` into self, in order.
    ///
    /// The severity only ever escalates to the most severe one seen. Every message is appended
    /// with a `" - "` separator, including those of statuses that didn't change the severity.
    pub fn aggregate<'a, I>(&mut self, others: I)
    where
        I: IntoIterator<Item = &'a Status>,
    {
        for other in others {
            if self.severity < other.severity {
                self.severity = other.severity;
            }

            self.message.push_str(" - ");
            self.message.push_str(&other.message);
        }
    }

    /// Returns the line nagios expects on stdout, without the trailing newline.
    pub fn to_nagios_string(&self) -> String {
        format!("{} {}", self.severity.prefix(), self.message)
    }

    /// Will return the exit code of the severity via [Severity::exit_code].
    pub fn exit_code(&self) -> i32 {
        self.severity.exit_code()
    }

    /// Will print [Status::to_nagios_string] and exit with the exit code from [Status::exit_code].
    pub fn print_and_exit(&self) -> ! {
        println!("{}", self.to_nagios_string());
        process::exit(self.exit_code());
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.severity.prefix(), self.message)
    }
}
