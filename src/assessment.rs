//! Combines the mark summary with the cluster model into an eligibility
//! decision for a single request.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, instrument};

use crate::classifier::{ClassificationResult, ClassifyError, ClusterModel, FeatureVector, classify};
use crate::domain::{
    Category, CategoryTable, GradeBand, MarkComponent, MarkPolicy, Marks, MarksError, ScoreScale,
    ScoreSummary, StudentInfo,
};

#[derive(Debug, Error)]
pub enum AssessError {
    #[error("student name and registration number are required")]
    IncompleteStudent,
    #[error("invalid marks: {0}")]
    Marks(#[from] MarksError),
    #[error("classification failed: {0}")]
    Classify(#[from] ClassifyError),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssessorError {
    #[error("{configured} features configured but the model expects {model}")]
    FeatureMismatch { configured: usize, model: usize },
}

/// Scale, thresholds and feature selection the assessor applies.
#[derive(Debug, Clone, PartialEq)]
pub struct Rules {
    pub scale: ScoreScale,
    pub policy: MarkPolicy,
    pub grade_bands: Vec<GradeBand>,
    pub features: Vec<MarkComponent>,
}

/// Everything needed to assess one student. Built once and never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssessmentRequest {
    pub student: StudentInfo,
    pub marks: Marks,
}

/// Outcome of comparing the pass-mark rule with the model's category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Verdict {
    Eligible,
    NotEligible,
    Disagreement {
        mark_eligible: bool,
        model_eligible: bool,
    },
}

impl Verdict {
    #[must_use]
    pub fn combine(mark_eligible: bool, model_eligible: bool) -> Self {
        match (mark_eligible, model_eligible) {
            (true, true) => Verdict::Eligible,
            (false, false) => Verdict::NotEligible,
            _ => Verdict::Disagreement {
                mark_eligible,
                model_eligible,
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assessment {
    pub student: StudentInfo,
    pub marks: Marks,
    pub summary: ScoreSummary,
    pub features: FeatureVector,
    pub classification: ClassificationResult,
    pub category: Category,
    pub verdict: Verdict,
    pub assessed_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CenterInfo {
    pub label: usize,
    pub category: String,
    pub eligible: bool,
    pub values: Vec<f64>,
}

/// Read-only description of the loaded model and the rules around it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ModelInfo {
    pub model_type: String,
    pub n_clusters: usize,
    pub n_features: usize,
    pub features: Vec<MarkComponent>,
    pub total_marks: f64,
    pub pass_mark: f64,
    pub centers: Vec<CenterInfo>,
}

/// Shared, immutable assessment service.
#[derive(Debug, Clone)]
pub struct Assessor {
    model: ClusterModel,
    categories: CategoryTable,
    rules: Rules,
}

impl Assessor {
    /// # Errors
    /// Returns [`AssessorError::FeatureMismatch`] when the configured feature
    /// list does not match the model's input width.
    pub fn new(
        model: ClusterModel,
        categories: CategoryTable,
        rules: Rules,
    ) -> Result<Self, AssessorError> {
        if rules.features.len() != model.n_features() {
            return Err(AssessorError::FeatureMismatch {
                configured: rules.features.len(),
                model: model.n_features(),
            });
        }
        Ok(Self {
            model,
            categories,
            rules,
        })
    }

    /// # Errors
    /// Returns [`AssessError`] for incomplete student details or marks outside
    /// the configured scale.
    #[instrument(skip_all, fields(registration_number = %request.student.registration_number))]
    pub fn assess(&self, request: &AssessmentRequest) -> Result<Assessment, AssessError> {
        if !request.student.is_complete() {
            return Err(AssessError::IncompleteStudent);
        }
        request.marks.validate(&self.rules.scale)?;

        let summary = ScoreSummary::compute(
            &request.marks,
            &self.rules.scale,
            &self.rules.grade_bands,
            &self.rules.policy,
        );
        let features = request.marks.features(&self.rules.features);
        let classification = classify(&features, self.model.centers())?;
        let category = self.categories.get(classification.label).clone();
        let verdict = Verdict::combine(summary.mark_eligible, category.eligible);

        debug!(distances = ?classification.distances, "cluster distances");
        info!(
            total = summary.overall.score,
            label = %classification.label,
            category = %category.name,
            verdict = ?verdict,
            "assessment completed"
        );

        Ok(Assessment {
            student: request.student.clone(),
            marks: request.marks,
            summary,
            features,
            classification,
            category,
            verdict,
            assessed_at: Utc::now(),
        })
    }

    #[must_use]
    pub fn model_info(&self) -> ModelInfo {
        let centers = self
            .model
            .centers()
            .iter()
            .map(|(label, center)| {
                let category = self.categories.get(label);
                CenterInfo {
                    label: label.index(),
                    category: category.name.clone(),
                    eligible: category.eligible,
                    values: center.as_slice().to_vec(),
                }
            })
            .collect();

        ModelInfo {
            model_type: self.model.model_type().to_string(),
            n_clusters: self.model.n_clusters(),
            n_features: self.model.n_features(),
            features: self.rules.features.clone(),
            total_marks: self.rules.scale.total_max(),
            pass_mark: self.rules.policy.pass_mark,
            centers,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Programme, category::default_entries, marks::default_grade_bands};
    use rstest::rstest;

    const MODEL: &str = r#"{
        "model_type": "KMeans",
        "n_clusters": 4,
        "n_features_in": 3,
        "cluster_centers": [
            [3.0, 9.0, 8.5],
            [4.5, 13.5, 13.0],
            [1.5, 5.0, 4.5],
            [3.8, 11.5, 11.0]
        ]
    }"#;

    fn rules() -> Rules {
        Rules {
            scale: ScoreScale::default(),
            policy: MarkPolicy::default(),
            grade_bands: default_grade_bands(),
            features: vec![
                MarkComponent::Assignment1,
                MarkComponent::Test1,
                MarkComponent::Test2,
            ],
        }
    }

    fn assessor() -> Assessor {
        Assessor::new(
            ClusterModel::from_json(MODEL).unwrap(),
            CategoryTable::new(&default_entries()).unwrap(),
            rules(),
        )
        .unwrap()
    }

    fn request(assignment1: f64, assignment2: f64, test1: f64, test2: f64) -> AssessmentRequest {
        AssessmentRequest {
            student: StudentInfo {
                name: "Baraka Otieno".into(),
                registration_number: "SC2023-042".into(),
                programme: Programme::Engineering,
            },
            marks: Marks {
                assignment1,
                assignment2,
                test1,
                test2,
            },
        }
    }

    #[rstest]
    #[case(true, true, Verdict::Eligible)]
    #[case(false, false, Verdict::NotEligible)]
    #[case(true, false, Verdict::Disagreement { mark_eligible: true, model_eligible: false })]
    #[case(false, true, Verdict::Disagreement { mark_eligible: false, model_eligible: true })]
    fn verdict_combination(#[case] mark: bool, #[case] model: bool, #[case] expected: Verdict) {
        assert_eq!(Verdict::combine(mark, model), expected);
    }

    #[test]
    fn strong_student_is_eligible() {
        let assessment = assessor().assess(&request(4.5, 4.5, 13.5, 13.0)).unwrap();
        assert_eq!(assessment.classification.label.index(), 1);
        assert_eq!(assessment.category.name, "EXCELLENT");
        assert_eq!(assessment.summary.grade, "EXCELLENT");
        assert_eq!(assessment.verdict, Verdict::Eligible);
        assert_eq!(assessment.features.as_slice(), &[4.5, 13.5, 13.0]);
    }

    #[test]
    fn weak_student_is_not_eligible() {
        let assessment = assessor().assess(&request(1.0, 1.0, 5.0, 4.0)).unwrap();
        assert_eq!(assessment.category.name, "BELOW AVERAGE");
        assert_eq!(assessment.verdict, Verdict::NotEligible);
        assert_eq!(assessment.summary.shortfall, 17.0);
    }

    #[test]
    fn model_can_disagree_with_pass_mark() {
        // Assignment 2 is not a model feature, so a full mark there lifts the
        // total over the pass mark without moving the point.
        let assessment = assessor().assess(&request(3.0, 5.0, 10.0, 10.0)).unwrap();
        assert!(assessment.summary.mark_eligible);
        assert_eq!(assessment.category.name, "AVERAGE");
        assert_eq!(
            assessment.verdict,
            Verdict::Disagreement {
                mark_eligible: true,
                model_eligible: false
            }
        );
    }

    #[test]
    fn incomplete_student_is_rejected() {
        let mut req = request(3.0, 3.0, 9.0, 9.0);
        req.student.name = " ".into();
        assert!(matches!(
            assessor().assess(&req),
            Err(AssessError::IncompleteStudent)
        ));
    }

    #[test]
    fn out_of_range_marks_are_rejected() {
        let err = assessor().assess(&request(6.0, 3.0, 9.0, 9.0)).unwrap_err();
        assert!(matches!(err, AssessError::Marks(MarksError::OutOfRange { .. })));
    }

    #[test]
    fn feature_count_must_match_model() {
        let mut rules = rules();
        rules.features.push(MarkComponent::Assignment2);
        let err = Assessor::new(
            ClusterModel::from_json(MODEL).unwrap(),
            CategoryTable::new(&default_entries()).unwrap(),
            rules,
        )
        .unwrap_err();
        assert_eq!(
            err,
            AssessorError::FeatureMismatch {
                configured: 4,
                model: 3
            }
        );
    }

    #[test]
    fn model_info_lists_centers_with_categories() {
        let info = assessor().model_info();
        assert_eq!(info.model_type, "KMeans");
        assert_eq!(info.n_clusters, 4);
        assert_eq!(info.n_features, 3);
        assert_eq!(info.total_marks, 40.0);
        assert_eq!(info.pass_mark, 28.0);
        assert_eq!(info.centers.len(), 4);
        assert_eq!(info.centers[1].category, "EXCELLENT");
        assert!(info.centers[3].eligible);
        assert_eq!(info.centers[2].values, vec![1.5, 5.0, 4.5]);
    }
}
