//! Nearest-centroid classification against the four cluster centers of a
//! pre-trained k-means model.

use serde::Serialize;
use thiserror::Error;

/// Number of clusters the eligibility model is trained with.
pub const CLUSTER_COUNT: usize = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ClassifyError {
    #[error("feature vector has {actual} components but cluster centers have {expected}")]
    ShapeMismatch { expected: usize, actual: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum CentersError {
    #[error("expected 4 cluster centers, got {0}")]
    Count(usize),
    #[error("cluster center {index} has {actual} components, expected {expected}")]
    Ragged {
        index: usize,
        expected: usize,
        actual: usize,
    },
    #[error("cluster centers must have at least one component")]
    Empty,
}

/// Ordered feature values fed to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct FeatureVector(Vec<f64>);

impl FeatureVector {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<[f64; 3]> for FeatureVector {
    fn from(values: [f64; 3]) -> Self {
        Self(values.to_vec())
    }
}

/// A single fixed reference point in feature space.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClusterCenter(Vec<f64>);

impl ClusterCenter {
    #[must_use]
    pub fn new(values: Vec<f64>) -> Self {
        Self(values)
    }

    #[must_use]
    pub fn as_slice(&self) -> &[f64] {
        &self.0
    }
}

impl From<[f64; 3]> for ClusterCenter {
    fn from(values: [f64; 3]) -> Self {
        Self(values.to_vec())
    }
}

/// Exactly four centers sharing one dimensionality.
///
/// Immutable once built, so a single instance can be shared by any number of
/// callers without locking.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClusterCenters {
    centers: [ClusterCenter; CLUSTER_COUNT],
    dim: usize,
}

impl ClusterCenters {
    /// Builds the center set, checking count and that every center has the
    /// same non-zero dimensionality.
    ///
    /// # Errors
    /// Returns [`CentersError`] when the count is not four or dimensions differ.
    pub fn new(centers: Vec<ClusterCenter>) -> Result<Self, CentersError> {
        let centers: [ClusterCenter; CLUSTER_COUNT] = centers
            .try_into()
            .map_err(|rejected: Vec<ClusterCenter>| CentersError::Count(rejected.len()))?;

        let dim = centers[0].as_slice().len();
        if dim == 0 {
            return Err(CentersError::Empty);
        }
        for (index, center) in centers.iter().enumerate() {
            let actual = center.as_slice().len();
            if actual != dim {
                return Err(CentersError::Ragged {
                    index,
                    expected: dim,
                    actual,
                });
            }
        }

        Ok(Self { centers, dim })
    }

    #[must_use]
    pub fn dim(&self) -> usize {
        self.dim
    }

    #[must_use]
    pub fn get(&self, label: ClusterLabel) -> &ClusterCenter {
        &self.centers[label.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (ClusterLabel, &ClusterCenter)> {
        ClusterLabel::ALL.into_iter().zip(self.centers.iter())
    }
}

/// Cluster index in `0..CLUSTER_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ClusterLabel(u8);

impl ClusterLabel {
    pub const ALL: [ClusterLabel; CLUSTER_COUNT] = [
        ClusterLabel(0),
        ClusterLabel(1),
        ClusterLabel(2),
        ClusterLabel(3),
    ];

    /// Returns the label for `index`, or `None` outside `0..CLUSTER_COUNT`.
    #[must_use]
    pub fn new(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    #[must_use]
    pub fn index(self) -> usize {
        usize::from(self.0)
    }
}

impl std::fmt::Display for ClusterLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Chosen label plus the distance to every center, in cluster index order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassificationResult {
    pub label: ClusterLabel,
    pub distances: [f64; CLUSTER_COUNT],
}

impl ClassificationResult {
    /// Distance to the chosen center.
    #[must_use]
    pub fn distance(&self) -> f64 {
        self.distances[self.label.index()]
    }
}

/// Assigns `point` to the nearest center by Euclidean distance.
///
/// Equidistant centers resolve to the lowest index.
///
/// # Errors
/// Returns [`ClassifyError::ShapeMismatch`] when `point` does not have the
/// centers' dimensionality.
pub fn classify(
    point: &FeatureVector,
    centers: &ClusterCenters,
) -> Result<ClassificationResult, ClassifyError> {
    if point.len() != centers.dim() {
        return Err(ClassifyError::ShapeMismatch {
            expected: centers.dim(),
            actual: point.len(),
        });
    }

    let mut distances = [0.0; CLUSTER_COUNT];
    let mut best = 0;
    let mut min_dist = f64::INFINITY;

    for (i, center) in centers.centers.iter().enumerate() {
        let dist = euclidean(point.as_slice(), center.as_slice());
        distances[i] = dist;
        if dist < min_dist {
            min_dist = dist;
            best = i;
        }
    }

    Ok(ClassificationResult {
        label: ClusterLabel::ALL[best],
        distances,
    })
}

fn euclidean(a: &[f64], b: &[f64]) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
