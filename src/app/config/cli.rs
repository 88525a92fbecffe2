use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use super::{ConfigError, LogFormat, LogLevel, Settings};
use crate::assessment::AssessmentRequest;
use crate::domain::{Marks, Programme, StudentInfo};

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Settings file (TOML)
    #[arg(long, env = "ELIGIBILITY_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Cluster model artifact (JSON)
    #[arg(long, env = "ELIGIBILITY_MODEL_PATH", global = true)]
    pub model: Option<PathBuf>,

    /// Log level
    #[arg(long, env = "LOG_LEVEL", global = true, ignore_case = true)]
    pub log_level: Option<LogLevel>,

    /// Log line format
    #[arg(long, env = "LOG_FORMAT", global = true, ignore_case = true)]
    pub log_format: Option<LogFormat>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Summarise marks and check final exam eligibility
    Assess(AssessArgs),
    /// Describe the loaded model and grading rules
    ModelInfo(ModelInfoArgs),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct AssessArgs {
    /// Full name
    #[arg(long)]
    pub name: String,

    /// Registration number, e.g. SC2023-001
    #[arg(long = "reg-no")]
    pub registration_number: String,

    /// Programme of study
    #[arg(long, value_enum, default_value_t = Programme::Other)]
    pub programme: Programme,

    #[arg(long, default_value_t = 2.5)]
    pub assignment1: f64,

    #[arg(long, default_value_t = 2.5)]
    pub assignment2: f64,

    #[arg(long, default_value_t = 7.5)]
    pub test1: f64,

    #[arg(long, default_value_t = 7.5)]
    pub test2: f64,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl AssessArgs {
    #[must_use]
    pub fn to_request(&self) -> AssessmentRequest {
        AssessmentRequest {
            student: StudentInfo {
                name: self.name.clone(),
                registration_number: self.registration_number.clone(),
                programme: self.programme,
            },
            marks: Marks {
                assignment1: self.assignment1,
                assignment2: self.assignment2,
                test1: self.test1,
                test2: self.test2,
            },
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ModelInfoArgs {
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub output: OutputFormat,
}

impl Cli {
    /// Settings file, then environment, then command-line flags; validated
    /// once all layers are applied.
    pub fn load_settings(&self) -> Result<Settings, ConfigError> {
        let mut settings = Settings::load(self.config.as_deref())?;

        if let Some(model) = &self.model {
            settings.model_path.clone_from(model);
        }
        if let Some(level) = self.log_level {
            settings.log_level = level;
        }
        if let Some(format) = self.log_format {
            settings.log_format = format;
        }

        settings.validate()?;
        Ok(settings)
    }
}
