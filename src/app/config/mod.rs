mod cli;
pub mod serde_helpers;
mod validation;

use std::path::{Path, PathBuf};

use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::assessment::Rules;
use crate::domain::category::default_entries;
use crate::domain::marks::default_grade_bands;
use crate::domain::{
    CategoryEntry, CategoryError, CategoryTable, GradeBand, MarkComponent, MarkPolicy, ScoreScale,
};

use self::serde_helpers::load_env_var;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("File error: {0}")]
    FileError(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("Environment error: {0}")]
    EnvError(String),
    #[error("Category table error: {0}")]
    Categories(#[from] CategoryError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    #[default]
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }
}

/// Output style of the log lines written to stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Settings file contents. Every field falls back to the 40-mark deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model_path: PathBuf,
    pub log_level: LogLevel,
    pub log_format: LogFormat,
    pub scale: ScoreScale,
    pub policy: MarkPolicy,
    pub grade_bands: Vec<GradeBand>,
    /// Mark components fed to the model, in the order it was trained on.
    pub features: Vec<MarkComponent>,
    pub categories: Vec<CategoryEntry>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from("models/kmeans_marks.json"),
            log_level: LogLevel::Warn,
            log_format: LogFormat::Compact,
            scale: ScoreScale::default(),
            policy: MarkPolicy::default(),
            grade_bands: default_grade_bands(),
            features: vec![
                MarkComponent::Assignment1,
                MarkComponent::Test1,
                MarkComponent::Test2,
            ],
            categories: default_entries(),
        }
    }
}

impl Settings {
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reads the optional settings file, then applies environment overrides.
    /// The result is not validated yet so callers can layer CLI flags on top.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let mut settings = match config_file {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        settings.apply_env()?;
        Ok(settings)
    }

    pub fn apply_env(&mut self) -> Result<(), ConfigError> {
        load_env_var("ELIGIBILITY_PASS_MARK", &mut self.policy.pass_mark)?;
        load_env_var("ELIGIBILITY_STRENGTH_RATIO", &mut self.policy.strength_ratio)?;
        load_env_var("ELIGIBILITY_WEAKNESS_RATIO", &mut self.policy.weakness_ratio)?;
        Ok(())
    }

    pub fn category_table(&self) -> Result<CategoryTable, ConfigError> {
        Ok(CategoryTable::new(&self.categories)?)
    }

    #[must_use]
    pub fn rules(&self) -> Rules {
        Rules {
            scale: self.scale,
            policy: self.policy,
            grade_bands: self.grade_bands.clone(),
            features: self.features.clone(),
        }
    }
}

pub use cli::{AssessArgs, Cli, Command, ModelInfoArgs, OutputFormat};
