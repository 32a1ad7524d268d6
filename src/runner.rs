use std::fmt::Display;

use crate::{Severity, Status};

/// Turns a fallible check into a [Status], so every path ends in exactly one status line.
pub struct Runner<E> {
    on_error: Option<Box<dyn FnOnce(&E) -> Severity>>,
}

impl<E: Display> Runner<E> {
    pub fn new() -> Self {
        Self { on_error: None }
    }

    /// Picks the severity reported for an error. Without a handler errors are critical.
    pub fn on_error(mut self, f: impl FnOnce(&E) -> Severity + 'static) -> Self {
        self.on_error = Some(Box::new(f));
        self
    }

    /// Runs the check. An error becomes a status whose message is the error's display text and
    /// whose severity comes from [Runner::on_error].
    pub fn safe_run(self, f: impl FnOnce() -> Result<Status, E>) -> Status {
        match f() {
            Ok(status) => status,
            Err(err) => {
                let severity = self
                    .on_error
                    .map(|f| f(&err))
                    .unwrap_or(Severity::Critical);

                Status::new(severity, err.to_string())
            }
        }
    }
}

impl<E: Display> Default for Runner<E> {
    fn default() -> Self {
        Self::new()
    }
}
