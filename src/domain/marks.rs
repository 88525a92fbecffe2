use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::classifier::FeatureVector;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MarksError {
    #[error("{component} mark {value} is outside 0..={max}")]
    OutOfRange {
        component: MarkComponent,
        value: f64,
        max: f64,
    },
    #[error("{component} mark is not a finite number")]
    NonFinite { component: MarkComponent },
}

/// One of the four continuous-assessment items.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkComponent {
    Assignment1,
    Assignment2,
    Test1,
    Test2,
}

impl MarkComponent {
    pub const ALL: [MarkComponent; 4] = [
        MarkComponent::Assignment1,
        MarkComponent::Assignment2,
        MarkComponent::Test1,
        MarkComponent::Test2,
    ];

    #[must_use]
    pub fn display_name(self) -> &'static str {
        match self {
            MarkComponent::Assignment1 => "Assignment 1",
            MarkComponent::Assignment2 => "Assignment 2",
            MarkComponent::Test1 => "Test 1",
            MarkComponent::Test2 => "Test 2",
        }
    }
}

impl std::fmt::Display for MarkComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Marks as entered by the student.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Marks {
    pub assignment1: f64,
    pub assignment2: f64,
    pub test1: f64,
    pub test2: f64,
}

impl Marks {
    #[must_use]
    pub fn get(&self, component: MarkComponent) -> f64 {
        match component {
            MarkComponent::Assignment1 => self.assignment1,
            MarkComponent::Assignment2 => self.assignment2,
            MarkComponent::Test1 => self.test1,
            MarkComponent::Test2 => self.test2,
        }
    }

    /// Range-checks every mark against `scale`.
    ///
    /// # Errors
    /// Returns the first [`MarksError`] found, in component order.
    pub fn validate(&self, scale: &ScoreScale) -> Result<(), MarksError> {
        for component in MarkComponent::ALL {
            let value = self.get(component);
            if !value.is_finite() {
                return Err(MarksError::NonFinite { component });
            }
            let max = scale.max(component);
            if !(0.0..=max).contains(&value) {
                return Err(MarksError::OutOfRange {
                    component,
                    value,
                    max,
                });
            }
        }
        Ok(())
    }

    #[must_use]
    pub fn assignments_total(&self) -> f64 {
        self.assignment1 + self.assignment2
    }

    #[must_use]
    pub fn tests_total(&self) -> f64 {
        self.test1 + self.test2
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.assignments_total() + self.tests_total()
    }

    /// Picks the model's input features in the configured order.
    #[must_use]
    pub fn features(&self, components: &[MarkComponent]) -> FeatureVector {
        FeatureVector::new(components.iter().map(|c| self.get(*c)).collect())
    }
}

/// Maximum attainable mark per component.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreScale {
    pub assignment1: f64,
    pub assignment2: f64,
    pub test1: f64,
    pub test2: f64,
}

impl Default for ScoreScale {
    fn default() -> Self {
        Self {
            assignment1: 5.0,
            assignment2: 5.0,
            test1: 15.0,
            test2: 15.0,
        }
    }
}

impl ScoreScale {
    #[must_use]
    pub fn max(&self, component: MarkComponent) -> f64 {
        match component {
            MarkComponent::Assignment1 => self.assignment1,
            MarkComponent::Assignment2 => self.assignment2,
            MarkComponent::Test1 => self.test1,
            MarkComponent::Test2 => self.test2,
        }
    }

    #[must_use]
    pub fn assignments_max(&self) -> f64 {
        self.assignment1 + self.assignment2
    }

    #[must_use]
    pub fn tests_max(&self) -> f64 {
        self.test1 + self.test2
    }

    #[must_use]
    pub fn total_max(&self) -> f64 {
        self.assignments_max() + self.tests_max()
    }
}

/// Named grade awarded from `min_total` upwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeBand {
    pub name: String,
    pub min_total: f64,
}

#[must_use]
pub fn default_grade_bands() -> Vec<GradeBand> {
    [
        ("EXCELLENT", 32.0),
        ("VERY GOOD", 28.0),
        ("AVERAGE", 20.0),
        ("BELOW AVERAGE", 0.0),
    ]
    .into_iter()
    .map(|(name, min_total)| GradeBand {
        name: name.to_string(),
        min_total,
    })
    .collect()
}

/// Thresholds applied to the marks, independent of the clustering model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkPolicy {
    pub pass_mark: f64,
    /// Fraction of a component's maximum counted as a strength.
    pub strength_ratio: f64,
    /// Fraction of a component's maximum below which it needs improvement.
    pub weakness_ratio: f64,
}

impl Default for MarkPolicy {
    fn default() -> Self {
        Self {
            pass_mark: 28.0,
            strength_ratio: 0.8,
            weakness_ratio: 0.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Subtotal {
    pub score: f64,
    pub max: f64,
    pub percentage: f64,
}

impl Subtotal {
    fn new(score: f64, max: f64) -> Self {
        Self {
            score,
            max,
            percentage: score / max * 100.0,
        }
    }
}

/// Arithmetic summary of a set of marks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    pub assignments: Subtotal,
    pub tests: Subtotal,
    pub overall: Subtotal,
    pub grade: String,
    pub mark_eligible: bool,
    /// Marks still needed to reach the pass mark.
    pub shortfall: f64,
    pub strengths: Vec<MarkComponent>,
    pub weaknesses: Vec<MarkComponent>,
}

impl ScoreSummary {
    /// `bands` must be ordered from highest `min_total` down; the last band
    /// catches every remaining total.
    #[must_use]
    pub fn compute(
        marks: &Marks,
        scale: &ScoreScale,
        bands: &[GradeBand],
        policy: &MarkPolicy,
    ) -> Self {
        let total = marks.total();
        let grade = bands
            .iter()
            .find(|band| total >= band.min_total)
            .or_else(|| bands.last())
            .map(|band| band.name.clone())
            .unwrap_or_default();

        let strengths = MarkComponent::ALL
            .into_iter()
            .filter(|c| marks.get(*c) >= policy.strength_ratio * scale.max(*c))
            .collect();
        let weaknesses = MarkComponent::ALL
            .into_iter()
            .filter(|c| marks.get(*c) < policy.weakness_ratio * scale.max(*c))
            .collect();

        Self {
            assignments: Subtotal::new(marks.assignments_total(), scale.assignments_max()),
            tests: Subtotal::new(marks.tests_total(), scale.tests_max()),
            overall: Subtotal::new(total, scale.total_max()),
            grade,
            mark_eligible: total >= policy.pass_mark,
            shortfall: (policy.pass_mark - total).max(0.0),
            strengths,
            weaknesses,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn marks(assignment1: f64, assignment2: f64, test1: f64, test2: f64) -> Marks {
        Marks {
            assignment1,
            assignment2,
            test1,
            test2,
        }
    }

    fn summary(m: &Marks) -> ScoreSummary {
        ScoreSummary::compute(
            m,
            &ScoreScale::default(),
            &default_grade_bands(),
            &MarkPolicy::default(),
        )
    }

    #[test]
    fn totals_and_percentages() {
        let s = summary(&marks(4.0, 3.0, 12.0, 9.0));
        assert_eq!(s.assignments.score, 7.0);
        assert_eq!(s.assignments.max, 10.0);
        assert!((s.assignments.percentage - 70.0).abs() < 1e-9);
        assert_eq!(s.tests.score, 21.0);
        assert!((s.tests.percentage - 70.0).abs() < 1e-9);
        assert_eq!(s.overall.score, 28.0);
        assert_eq!(s.overall.max, 40.0);
        assert!((s.overall.percentage - 70.0).abs() < 1e-9);
    }

    #[rstest]
    #[case(marks(5.0, 5.0, 15.0, 15.0), "EXCELLENT", true)]
    #[case(marks(4.0, 4.0, 12.0, 12.0), "EXCELLENT", true)]
    #[case(marks(4.0, 4.0, 12.0, 11.5), "VERY GOOD", true)]
    #[case(marks(3.0, 3.0, 11.0, 11.0), "VERY GOOD", true)]
    #[case(marks(3.0, 3.0, 11.0, 10.5), "AVERAGE", false)]
    #[case(marks(2.5, 2.5, 7.5, 7.5), "AVERAGE", false)]
    #[case(marks(2.5, 2.5, 7.5, 7.0), "BELOW AVERAGE", false)]
    #[case(marks(0.0, 0.0, 0.0, 0.0), "BELOW AVERAGE", false)]
    fn grade_band_and_pass_mark(
        #[case] m: Marks,
        #[case] grade: &str,
        #[case] mark_eligible: bool,
    ) {
        let s = summary(&m);
        assert_eq!(s.grade, grade);
        assert_eq!(s.mark_eligible, mark_eligible);
    }

    #[test]
    fn shortfall_is_clamped_at_zero() {
        assert_eq!(summary(&marks(2.5, 2.5, 7.5, 7.5)).shortfall, 8.0);
        assert_eq!(summary(&marks(5.0, 5.0, 15.0, 15.0)).shortfall, 0.0);
    }

    #[test]
    fn strengths_and_weaknesses() {
        let s = summary(&marks(4.0, 2.0, 12.0, 7.5));
        assert_eq!(
            s.strengths,
            vec![MarkComponent::Assignment1, MarkComponent::Test1]
        );
        assert_eq!(s.weaknesses, vec![MarkComponent::Assignment2]);

        let s = summary(&marks(2.5, 2.5, 7.5, 7.5));
        assert!(s.strengths.is_empty());
        assert!(s.weaknesses.is_empty());
    }

    #[test]
    fn validate_accepts_bounds() {
        let scale = ScoreScale::default();
        assert!(marks(0.0, 0.0, 0.0, 0.0).validate(&scale).is_ok());
        assert!(marks(5.0, 5.0, 15.0, 15.0).validate(&scale).is_ok());
    }

    #[rstest]
    #[case(marks(5.5, 0.0, 0.0, 0.0), MarkComponent::Assignment1)]
    #[case(marks(0.0, -0.5, 0.0, 0.0), MarkComponent::Assignment2)]
    #[case(marks(0.0, 0.0, 15.5, 0.0), MarkComponent::Test1)]
    #[case(marks(0.0, 0.0, 0.0, 40.0), MarkComponent::Test2)]
    fn validate_rejects_out_of_range(#[case] m: Marks, #[case] expected: MarkComponent) {
        match m.validate(&ScoreScale::default()) {
            Err(MarksError::OutOfRange { component, .. }) => assert_eq!(component, expected),
            other => panic!("expected out of range for {expected}, got {other:?}"),
        }
    }

    #[test]
    fn validate_rejects_nan() {
        let err = marks(0.0, 0.0, f64::NAN, 0.0)
            .validate(&ScoreScale::default())
            .unwrap_err();
        assert_eq!(
            err,
            MarksError::NonFinite {
                component: MarkComponent::Test1
            }
        );
    }

    #[test]
    fn features_follow_configured_order() {
        let m = marks(1.0, 2.0, 3.0, 4.0);
        let fv = m.features(&[
            MarkComponent::Assignment1,
            MarkComponent::Test1,
            MarkComponent::Test2,
        ]);
        assert_eq!(fv.as_slice(), &[1.0, 3.0, 4.0]);
    }

    #[test]
    fn hundred_point_scale() {
        let scale = ScoreScale {
            assignment1: 10.0,
            assignment2: 10.0,
            test1: 40.0,
            test2: 40.0,
        };
        let policy = MarkPolicy {
            pass_mark: 50.0,
            ..MarkPolicy::default()
        };
        let s = ScoreSummary::compute(
            &marks(5.0, 5.0, 20.0, 20.0),
            &scale,
            &default_grade_bands(),
            &policy,
        );
        assert_eq!(s.overall.max, 100.0);
        assert!((s.overall.percentage - 50.0).abs() < 1e-9);
        assert!(s.mark_eligible);
    }
}
