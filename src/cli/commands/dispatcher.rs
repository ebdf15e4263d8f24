//! Command dispatching.
//!
//! This module provides the core command infrastructure:
//! - [`Command`] trait for implementing commands
//! - [`CommandResult`] for uniform result reporting
//! - [`CommandDispatcher`] for turning parsed arguments into a command

use std::io::Write;

use crate::cli::args::Cli;
use crate::error::Result;

use super::detect::DetectCommand;

/// Trait for command implementations.
pub trait Command {
    /// Execute the command, writing its output to `out`.
    ///
    /// # Returns
    ///
    /// A [`CommandResult`] carrying the exit code.
    fn execute(&self, out: &mut dyn Write) -> Result<CommandResult>;
}

/// Result of command execution.
#[derive(Debug)]
pub struct CommandResult {
    /// Exit code to use (0 for success).
    pub exit_code: i32,
}

impl CommandResult {
    /// Create a successful result.
    pub fn success() -> Self {
        Self { exit_code: 0 }
    }
}

/// Dispatches parsed arguments to their command.
pub struct CommandDispatcher;

impl CommandDispatcher {
    /// Dispatch and execute the command described by `cli`.
    pub fn dispatch(cli: &Cli, out: &mut dyn Write) -> Result<CommandResult> {
        let cmd = DetectCommand::new(cli.detector_config(), cli.upgrade_cmd);
        cmd.execute(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn command_result_success() {
        let result = CommandResult::success();
        assert_eq!(result.exit_code, 0);
    }

    #[test]
    fn dispatch_prints_report() {
        let cli = Cli::parse_from(["detect-installer-test"]);
        let mut out = Vec::new();

        let result = CommandDispatcher::dispatch(&cli, &mut out).unwrap();

        assert_eq!(result.exit_code, 0);
        let line = String::from_utf8(out).unwrap();
        assert!(line.starts_with("{\"installer\": \""));
        assert!(line.ends_with("\"}\n"));
    }
}
