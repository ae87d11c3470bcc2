//! vmviews CLI library
//!
//! Inspect the VM page objects: list the registered views, print their
//! outlines (widget kinds and locators) for an appliance version, and show
//! the effective session configuration.

#![warn(missing_docs)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{CatalogArgs, Cli, ColorArg, Commands, OutlineArgs, OutputFormat, ShowArgs};
pub use config::{CliConfig, ColorChoice, Verbosity};
pub use error::{CliError, CliResult};
pub use output::Printer;
