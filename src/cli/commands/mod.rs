//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results. The binary has a
//! single command, [`detect::DetectCommand`], run by [`CommandDispatcher`].

pub mod detect;
pub mod dispatcher;

pub use detect::DetectCommand;
pub use dispatcher::{Command, CommandDispatcher, CommandResult};
