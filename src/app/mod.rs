pub mod config;
pub mod logging_system;
pub mod report;

use std::io::Write;

use anyhow::Context;
use tracing::info;

use crate::assessment::Assessor;
use crate::classifier::ClusterModel;

pub use config::{Cli, Command, ConfigError, LogFormat, LogLevel, Settings};

/// Loads the model named by `settings` and builds the shared assessor.
pub fn build_assessor(settings: &Settings) -> anyhow::Result<Assessor> {
    let model = ClusterModel::from_path(&settings.model_path).with_context(|| {
        format!(
            "failed to load cluster model from {}",
            settings.model_path.display()
        )
    })?;
    let categories = settings
        .category_table()
        .context("invalid category table")?;
    let assessor =
        Assessor::new(model, categories, settings.rules()).context("model/settings mismatch")?;
    Ok(assessor)
}

/// Runs one command and returns what it prints on stdout.
pub fn execute(cli: &Cli) -> anyhow::Result<String> {
    let settings = cli
        .load_settings()
        .context("failed to load configuration")?;
    logging_system::init(settings.log_level, settings.log_format)
        .context("failed to initialise logging")?;
    info!(model_path = %settings.model_path.display(), "configuration loaded");

    let assessor = build_assessor(&settings)?;

    let output = match &cli.command {
        Command::Assess(args) => {
            let assessment = assessor
                .assess(&args.to_request())
                .context("assessment rejected")?;
            report::render(&assessment, args.output, report::assessment_text)?
        }
        Command::ModelInfo(args) => {
            report::render(&assessor.model_info(), args.output, report::model_info_text)?
        }
    };
    Ok(output)
}

pub fn main(cli: &Cli) -> anyhow::Result<()> {
    let output = execute(cli)?;
    let mut stdout = std::io::stdout().lock();
    stdout
        .write_all(output.as_bytes())
        .context("failed to write output")?;
    if !output.ends_with('\n') {
        writeln!(stdout).context("failed to write output")?;
    }
    Ok(())
}
