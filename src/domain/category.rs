use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::{CLUSTER_COUNT, ClusterLabel};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CategoryError {
    #[error("category table has no entry for cluster {0}")]
    MissingLabel(usize),
    #[error("category table has more than one entry for cluster {0}")]
    DuplicateLabel(usize),
    #[error("category table refers to unknown cluster {0}")]
    UnknownLabel(usize),
}

/// One row of the configured label table, as written in the settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryEntry {
    pub label: usize,
    pub name: String,
    pub eligible: bool,
}

/// Human-readable meaning of a cluster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Category {
    pub name: String,
    pub eligible: bool,
}

/// Total mapping from every cluster label to its category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryTable {
    // One entry per label, indexed by `ClusterLabel::index`.
    categories: Vec<Category>,
}

impl CategoryTable {
    /// Builds the table, requiring exactly one entry per cluster label.
    ///
    /// # Errors
    /// Returns [`CategoryError`] for a missing, repeated, or out-of-range label.
    pub fn new(entries: &[CategoryEntry]) -> Result<Self, CategoryError> {
        let mut slots: [Option<Category>; CLUSTER_COUNT] = Default::default();

        for entry in entries {
            let slot = slots
                .get_mut(entry.label)
                .ok_or(CategoryError::UnknownLabel(entry.label))?;
            if slot.is_some() {
                return Err(CategoryError::DuplicateLabel(entry.label));
            }
            *slot = Some(Category {
                name: entry.name.clone(),
                eligible: entry.eligible,
            });
        }

        let categories = slots
            .into_iter()
            .enumerate()
            .map(|(label, slot)| slot.ok_or(CategoryError::MissingLabel(label)))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { categories })
    }

    #[must_use]
    pub fn get(&self, label: ClusterLabel) -> &Category {
        &self.categories[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterLabel, &Category)> {
        ClusterLabel::ALL.into_iter().zip(self.categories.iter())
    }
}

/// Label meanings of the deployed 40-mark model.
#[must_use]
pub fn default_entries() -> Vec<CategoryEntry> {
    [
        (0, "AVERAGE", false),
        (1, "EXCELLENT", true),
        (2, "BELOW AVERAGE", false),
        (3, "VERY GOOD", true),
    ]
    .into_iter()
    .map(|(label, name, eligible)| CategoryEntry {
        label,
        name: name.to_string(),
        eligible,
    })
    .collect()
}
