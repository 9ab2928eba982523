use anyhow::{Context, Result};

use waterjet_nc::config::{Config, OutputFormat};
use waterjet_nc::{parse_program, Report};

fn main() -> Result<()> {
    // Parse configuration from command line and config files
    let config = Config::from_args_and_env()?;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(&config.log_level))
        .init();

    if let Some(path) = &config.config_path {
        log::info!("Using config file {}", path.display());
    }

    let content = std::fs::read_to_string(&config.input)
        .with_context(|| format!("Failed to read NC program {}", config.input.display()))?;

    let program = parse_program(&content);
    if !program.diagnostics.is_empty() {
        log::warn!(
            "{} line(s) of {} could not be interpreted",
            program.diagnostics.len(),
            config.input.display()
        );
    }

    let report = Report::build(&program, &config.estimate, config.reference_time)
        .with_context(|| format!("Cannot estimate cut time for {}", config.input.display()))?;

    match config.format {
        OutputFormat::Text => print!("{}", report.to_text()),
        OutputFormat::Json => println!("{}", report.to_json().context("Failed to serialize report")?),
    }

    Ok(())
}
