//! Command handlers. Each returns the text to print so it can be tested
//! without capturing stdout.

use crate::commands::{OutlineArgs, OutputFormat};
use crate::config::CliConfig;
use crate::error::{CliError, CliResult};
use crate::output::Printer;
use serde::Serialize;
use vmviews::{Version, ViewCatalog, ViewConfig};

/// Effective view configuration: the `--config` file or the defaults
pub fn load_view_config(config: &CliConfig) -> CliResult<ViewConfig> {
    let view_config = match config.config_path {
        Some(ref path) => {
            if !path.exists() {
                return Err(CliError::config(format!(
                    "config file not found: {}",
                    path.display()
                )));
            }
            ViewConfig::load(path)?
        }
        None => ViewConfig::default(),
    };
    view_config.validate()?;
    Ok(view_config)
}

fn version_for(args: &OutlineArgs, view_config: &ViewConfig) -> Version {
    args.appliance_version
        .clone()
        .unwrap_or_else(|| view_config.appliance_version.clone())
}

/// Serialize in the requested format
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> CliResult<String> {
    match format {
        OutputFormat::Json => {
            serde_json::to_string_pretty(value).map_err(|e| CliError::render(format, e))
        }
        OutputFormat::Yaml => {
            serde_yaml_ng::to_string(value).map_err(|e| CliError::render(format, e))
        }
    }
}

/// `vmviews list`
pub fn execute_list(config: &CliConfig, printer: &Printer) -> CliResult<String> {
    let view_config = load_view_config(config)?;
    let catalog = ViewCatalog::vm();
    if !config.verbosity.is_verbose() {
        return Ok(catalog.list().join("\n"));
    }
    let outlines = catalog.descriptors(&view_config.appliance_version)?;
    let lines: Vec<String> = outlines
        .iter()
        .map(|o| printer.entry(&o.name, &format!("{} widgets", o.widget_count())))
        .collect();
    Ok(lines.join("\n"))
}

/// `vmviews show <view>`
pub fn execute_show(config: &CliConfig, view: &str, args: &OutlineArgs) -> CliResult<String> {
    let view_config = load_view_config(config)?;
    let version = version_for(args, &view_config);
    tracing::info!(%view, %version, "describing view");
    let outline = ViewCatalog::vm().describe(view, &version)?;
    render(&outline, args.format)
}

/// `vmviews catalog`
pub fn execute_catalog(config: &CliConfig, args: &OutlineArgs) -> CliResult<String> {
    let view_config = load_view_config(config)?;
    let version = version_for(args, &view_config);
    tracing::info!(%version, "describing catalog");
    let outlines = ViewCatalog::vm().descriptors(&version)?;
    render(&outlines, args.format)
}

/// `vmviews config`
pub fn execute_config(config: &CliConfig) -> CliResult<String> {
    Ok(load_view_config(config)?.to_yaml()?)
}
