//! Command line front end for drivesync.
//!
//! The binary is a thin shell over [`commands`]; everything it prints goes
//! through a caller-supplied writer so the commands can be tested in-process.

pub mod cli;
pub mod commands;
pub mod config;
pub mod report;

pub use cli::{Cli, Command, LogLevel};
pub use config::CliConfig;
