use serde::{Deserialize, Serialize};

/// Programme of study offered on the intake form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum Programme {
    ComputerScience,
    BusinessAdministration,
    Engineering,
    Education,
    InformationTechnology,
    #[default]
    Other,
}

impl Programme {
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            Programme::ComputerScience => "Bachelor of Science in Computer Science",
            Programme::BusinessAdministration => "Bachelor of Business Administration",
            Programme::Engineering => "Bachelor of Engineering",
            Programme::Education => "Bachelor of Education",
            Programme::InformationTechnology => "Diploma in Information Technology",
            Programme::Other => "Other",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StudentInfo {
    pub name: String,
    pub registration_number: String,
    #[serde(default)]
    pub programme: Programme,
}

impl StudentInfo {
    /// Name and registration number are both required before an assessment.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.registration_number.trim().is_empty()
    }
}
