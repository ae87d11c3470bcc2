//! CLI command definitions using clap

use crate::config::ColorChoice;
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fmt;
use std::path::PathBuf;
use vmviews::Version;

/// vmviews: inspect the VM page objects and their locators
#[derive(Parser, Debug)]
#[command(name = "vmviews")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (only errors are logged)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Color output (auto, always, never)
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorArg,

    /// View configuration file (YAML)
    #[arg(short, long, global = true, env = "VMVIEWS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered view names
    List,

    /// Show the outline of one view
    Show(ShowArgs),

    /// Show the outlines of every view
    Catalog(CatalogArgs),

    /// Print the effective view configuration
    Config,
}

/// Output format for outlines
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Pretty-printed JSON
    Json,
    /// YAML
    #[default]
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Json => f.write_str("json"),
            Self::Yaml => f.write_str("yaml"),
        }
    }
}

/// Arguments shared by the outline commands
#[derive(Args, Debug, Clone, Default)]
pub struct OutlineArgs {
    /// Output format
    #[arg(short, long, default_value = "yaml")]
    pub format: OutputFormat,

    /// Appliance version (overrides the configuration), e.g. 5.6 or latest
    #[arg(short = 'a', long)]
    pub appliance_version: Option<Version>,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// View name, see `vmviews list`
    pub view: String,

    /// Output options
    #[command(flatten)]
    pub outline: OutlineArgs,
}

/// Arguments for the catalog command
#[derive(Parser, Debug)]
pub struct CatalogArgs {
    /// Output options
    #[command(flatten)]
    pub outline: OutlineArgs,
}

/// Color argument for CLI
#[derive(ValueEnum, Clone, Copy, Debug, Default)]
pub enum ColorArg {
    /// Always use colors
    Always,
    /// Auto-detect
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl From<ColorArg> for ColorChoice {
    fn from(arg: ColorArg) -> Self {
        match arg {
            ColorArg::Always => Self::Always,
            ColorArg::Auto => Self::Auto,
            ColorArg::Never => Self::Never,
        }
    }
}
