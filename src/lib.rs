#![allow(
    clippy::missing_errors_doc,      // Config and CLI helpers
    clippy::module_name_repetitions, // e.g. ConfigError in config module
    clippy::float_cmp                // Marks are compared against exact configured values
)]

pub mod app;
pub mod assessment;
pub mod classifier;
pub mod domain;

pub use app::{Cli, Settings};
pub use assessment::{Assessment, AssessmentRequest, Assessor, Verdict};
pub use classifier::{ClassificationResult, ClusterModel, classify};
