//! The webcheck crate implements a nagios/icinga check that probes a single web server.
//!
//! A check produces a [Status]: a [Severity] and a message. Statuses of independent sub-checks
//! can be folded into one with [Status::aggregate], which keeps the worst severity and every
//! message. The binary prints the resulting status line and exits with its exit code.

mod status;
pub use crate::status::{Severity, Status};

mod probe;
pub use crate::probe::{classify, Probe, ProbeError, Protocol, ResponseSummary};

mod runner;
pub use crate::runner::Runner;

pub mod cli;
pub mod config_generator;
