//! Configuration management for the NC interpreter.
//!
//! Handles:
//! - Command-line argument parsing
//! - Estimate defaults from a TOML config file (explicit path, project
//!   `.waterjet-nc.toml`, or the user config directory)

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, ValueEnum};
use serde::Deserialize;

use crate::estimate::EstimateSettings;

/// Project-level config file, looked up in the current directory
pub const PROJECT_CONFIG_FILE: &str = ".waterjet-nc.toml";

/// How results are written to stdout
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Command-line arguments for the NC interpreter
#[derive(Debug, Parser)]
#[command(name = "waterjet-nc")]
#[command(about = "Interpret waterjet NC programs and estimate cut time")]
#[command(version)]
pub struct Args {
    /// NC program to interpret
    pub input: PathBuf,

    #[arg(long, help = "Pierce time per pierce point, in minutes")]
    pub pierce_time: Option<f64>,

    #[arg(long, help = "Cutting speed in mm/min (defaults to the program's average feed)")]
    pub cutting_speed: Option<f64>,

    #[arg(long, help = "Reference total time in minutes to compare against")]
    pub reference_time: Option<f64>,

    #[arg(long, value_enum, default_value = "text", help = "Output format")]
    pub format: OutputFormat,

    #[arg(long, help = "Config file (defaults to .waterjet-nc.toml, then the user config)")]
    pub config: Option<PathBuf>,

    #[arg(
        long,
        default_value = "info",
        help = "Log level (trace, debug, info, warn, error)"
    )]
    pub log_level: String,
}

/// Contents of a TOML config file
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct FileConfig {
    #[serde(default)]
    pub estimate: EstimateSection,
}

/// `[estimate]` table
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct EstimateSection {
    pub pierce_time: Option<f64>,
    pub cutting_speed: Option<f64>,
    pub reference_time: Option<f64>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        Self::parse(&content, Some(path))
    }

    fn parse(content: &str, source_path: Option<&Path>) -> Result<Self> {
        toml::from_str(content).with_context(|| match source_path {
            Some(path) => format!("Failed to parse config file {}", path.display()),
            None => "Failed to parse config".to_string(),
        })
    }
}

/// Combined configuration from all sources
#[derive(Debug, Clone)]
pub struct Config {
    /// NC program to interpret
    pub input: PathBuf,
    /// Estimate overrides (CLI over config file)
    pub estimate: EstimateSettings,
    /// Reference total time in minutes
    pub reference_time: Option<f64>,
    pub format: OutputFormat,
    pub log_level: String,
    /// Config file that was loaded, if any
    pub config_path: Option<PathBuf>,
}

impl Config {
    /// Create configuration from command-line arguments
    pub fn from_args_and_env() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Create configuration from explicit arguments, looking for config files
    /// relative to the current directory
    pub fn from_args(args: Args) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to determine current directory")?;
        Self::from_args_in(args, &cwd)
    }

    /// Create configuration with `project_dir` as the project root (useful
    /// for testing)
    pub fn from_args_in(args: Args, project_dir: &Path) -> Result<Self> {
        let config_path = locate_config_file(args.config.as_deref(), project_dir)?;
        let file = match &config_path {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        Ok(Self::merge(args, file, config_path))
    }

    /// Merge CLI arguments over file settings
    pub fn merge(args: Args, file: FileConfig, config_path: Option<PathBuf>) -> Self {
        let estimate = EstimateSettings {
            pierce_time: args.pierce_time.or(file.estimate.pierce_time),
            cutting_speed: args.cutting_speed.or(file.estimate.cutting_speed),
        };

        Config {
            input: args.input,
            estimate,
            reference_time: args.reference_time.or(file.estimate.reference_time),
            format: args.format,
            log_level: args.log_level,
            config_path,
        }
    }

    pub fn has_config_file(&self) -> bool {
        self.config_path.is_some()
    }
}

/// Find the config file to load: explicit path, project file, user file
fn locate_config_file(explicit: Option<&Path>, project_dir: &Path) -> Result<Option<PathBuf>> {
    if let Some(path) = explicit {
        if !path.is_file() {
            bail!("Config file {} does not exist", path.display());
        }
        return Ok(Some(path.to_path_buf()));
    }

    let project = project_dir.join(PROJECT_CONFIG_FILE);
    if project.is_file() {
        return Ok(Some(project));
    }

    Ok(dirs::config_dir()
        .map(|dir| dir.join("waterjet-nc").join("config.toml"))
        .filter(|path| path.is_file()))
}
