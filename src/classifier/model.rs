//! Loading of the exported k-means artifact.

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use super::centroid::{CLUSTER_COUNT, CentersError, ClusterCenter, ClusterCenters};

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model artifact: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse model artifact: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("model declares {declared} clusters, expected 4")]
    ClusterCount { declared: usize },
    #[error("model declares {declared} clusters but ships {actual} centers")]
    CenterCount { declared: usize, actual: usize },
    #[error("cluster center {index} has {actual} features, model declares {declared}")]
    FeatureCount {
        index: usize,
        declared: usize,
        actual: usize,
    },
    #[error(transparent)]
    Centers(#[from] CentersError),
}

/// On-disk shape of the artifact, mirroring the attributes of a fitted
/// k-means estimator.
#[derive(Debug, Clone, Deserialize)]
struct RawModel {
    #[serde(default = "default_model_type")]
    model_type: String,
    n_clusters: usize,
    n_features_in: usize,
    cluster_centers: Vec<Vec<f64>>,
}

fn default_model_type() -> String {
    "KMeans".to_string()
}

/// A validated clustering model: four centers with the declared feature count.
#[derive(Debug, Clone, PartialEq)]
pub struct ClusterModel {
    model_type: String,
    n_features: usize,
    centers: ClusterCenters,
}

impl ClusterModel {
    /// Reads and validates the JSON artifact at `path`.
    ///
    /// # Errors
    /// Returns [`ModelError`] when the file cannot be read, parsed, or fails
    /// the shape checks.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let model = Self::from_json(&content)?;
        tracing::info!(
            path = %path.display(),
            model_type = %model.model_type,
            n_features = model.n_features,
            "cluster model loaded"
        );
        Ok(model)
    }

    /// Parses and validates an artifact held in memory.
    ///
    /// # Errors
    /// See [`ClusterModel::from_path`].
    pub fn from_json(content: &str) -> Result<Self, ModelError> {
        let raw: RawModel = serde_json::from_str(content)?;
        Self::try_from(raw)
    }

    #[must_use]
    pub fn model_type(&self) -> &str {
        &self.model_type
    }

    #[must_use]
    pub fn n_clusters(&self) -> usize {
        CLUSTER_COUNT
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        self.n_features
    }

    #[must_use]
    pub fn centers(&self) -> &ClusterCenters {
        &self.centers
    }
}

impl TryFrom<RawModel> for ClusterModel {
    type Error = ModelError;

    fn try_from(raw: RawModel) -> Result<Self, Self::Error> {
        if raw.n_clusters != CLUSTER_COUNT {
            return Err(ModelError::ClusterCount {
                declared: raw.n_clusters,
            });
        }
        if raw.cluster_centers.len() != raw.n_clusters {
            return Err(ModelError::CenterCount {
                declared: raw.n_clusters,
                actual: raw.cluster_centers.len(),
            });
        }
        for (index, center) in raw.cluster_centers.iter().enumerate() {
            if center.len() != raw.n_features_in {
                return Err(ModelError::FeatureCount {
                    index,
                    declared: raw.n_features_in,
                    actual: center.len(),
                });
            }
        }

        let centers = ClusterCenters::new(
            raw.cluster_centers
                .into_iter()
                .map(ClusterCenter::new)
                .collect(),
        )?;

        Ok(Self {
            model_type: raw.model_type,
            n_features: raw.n_features_in,
            centers,
        })
    }
}
