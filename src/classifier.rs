//! Cluster model and nearest-centroid classification.

pub mod centroid;
pub mod model;

pub use centroid::{
    CLUSTER_COUNT, CentersError, ClassificationResult, ClassifyError, ClusterCenter,
    ClusterCenters, ClusterLabel, FeatureVector, classify,
};
pub use model::{ClusterModel, ModelError};
