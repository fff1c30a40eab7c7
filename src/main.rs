use anyhow::{Context, Result};
use clap::Parser;
use fieldleak::cli::{CheckArgs, Cli, Commands, OutputFormat};
use fieldleak::commands::{self, CheckConfig};
use fieldleak::config::{self, FieldleakConfig};
use std::path::Path;
use std::process::ExitCode;

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check(args) => handle_check_command(args),
        Commands::Init { force } => {
            fieldleak::logging::init(0);
            let dir = std::env::current_dir().context("Failed to get current directory")?;
            commands::init_config(&dir, force)?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

fn handle_check_command(args: CheckArgs) -> Result<ExitCode> {
    fieldleak::logging::init(args.verbosity);

    let settings = apply_cli_overrides(load_settings(args.config.as_deref())?, &args);
    let format = args
        .format
        .or_else(|| {
            settings
                .output
                .default_format
                .as_deref()
                .and_then(OutputFormat::from_config_name)
        })
        .unwrap_or(OutputFormat::Terminal);

    let has_warnings = commands::handle_check(CheckConfig {
        paths: args.paths,
        format: format.into(),
        output: args.output,
        plain: args.plain,
        settings,
    })?;

    if has_warnings && !args.exit_zero {
        Ok(ExitCode::FAILURE)
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn load_settings(explicit: Option<&Path>) -> Result<FieldleakConfig> {
    match explicit {
        Some(path) => config::load_config_from(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(config::load_config()),
    }
}

/// Flags can only switch options on; otherwise the config file decides.
fn apply_cli_overrides(mut settings: FieldleakConfig, args: &CheckArgs) -> FieldleakConfig {
    settings.analysis.include_methods |= args.include_methods;
    settings.analysis.include_tests |= args.include_tests;
    settings.analysis.include_vendor |= args.include_vendor;
    settings
}
