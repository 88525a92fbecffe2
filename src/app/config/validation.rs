use std::collections::HashSet;

use super::{ConfigError, Settings};
use crate::domain::MarkComponent;

impl Settings {
    pub fn validate(&self) -> Result<(), ConfigError> {
        // Validate scale
        for component in MarkComponent::ALL {
            let max = self.scale.max(component);
            if !(max.is_finite() && max > 0.0) {
                return Err(ConfigError::InvalidConfig(format!(
                    "Maximum mark for {component} must be a positive number, got {max}"
                )));
            }
        }

        // Validate pass mark
        let total = self.scale.total_max();
        let pass_mark = self.policy.pass_mark;
        if !(pass_mark > 0.0 && pass_mark <= total) {
            return Err(ConfigError::InvalidConfig(format!(
                "Pass mark ({pass_mark}) must be within (0, {total}]"
            )));
        }

        // Validate ratios
        for (name, ratio) in [
            ("strength_ratio", self.policy.strength_ratio),
            ("weakness_ratio", self.policy.weakness_ratio),
        ] {
            if !(ratio > 0.0 && ratio <= 1.0) {
                return Err(ConfigError::InvalidConfig(format!(
                    "{name} ({ratio}) must be within (0, 1]"
                )));
            }
        }
        if self.policy.weakness_ratio > self.policy.strength_ratio {
            return Err(ConfigError::InvalidConfig(format!(
                "weakness_ratio ({}) must not exceed strength_ratio ({})",
                self.policy.weakness_ratio, self.policy.strength_ratio
            )));
        }

        // Validate grade bands
        if self.grade_bands.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "At least one grade band is required".to_string(),
            ));
        }
        if let Some(band) = self
            .grade_bands
            .iter()
            .find(|band| !(band.min_total.is_finite() && band.min_total >= 0.0))
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Grade band '{}' minimum must be a non-negative number, got {}",
                band.name, band.min_total
            )));
        }
        if let Some(pair) = self
            .grade_bands
            .windows(2)
            .find(|pair| pair[0].min_total <= pair[1].min_total)
        {
            return Err(ConfigError::InvalidConfig(format!(
                "Grade bands must be ordered by descending minimum: '{}' ({}) before '{}' ({})",
                pair[0].name, pair[0].min_total, pair[1].name, pair[1].min_total
            )));
        }

        // Validate feature selection
        if self.features.is_empty() {
            return Err(ConfigError::InvalidConfig(
                "At least one model feature is required".to_string(),
            ));
        }
        let mut seen = HashSet::new();
        if let Some(duplicate) = self.features.iter().find(|c| !seen.insert(**c)) {
            return Err(ConfigError::InvalidConfig(format!(
                "Model feature {duplicate} is listed more than once"
            )));
        }

        // Validate category table totality
        self.category_table()?;

        Ok(())
    }
}
