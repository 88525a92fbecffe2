//! Plain-text and JSON rendering of command results.

use serde::Serialize;

use super::config::OutputFormat;
use crate::assessment::{Assessment, ModelInfo, Verdict};
use crate::domain::MarkComponent;

pub fn render<T: Serialize>(
    value: &T,
    format: OutputFormat,
    text: impl FnOnce(&T) -> String,
) -> serde_json::Result<String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(value),
        OutputFormat::Text => Ok(text(value)),
    }
}

fn join(components: &[MarkComponent]) -> String {
    if components.is_empty() {
        return "None".to_string();
    }
    components
        .iter()
        .map(|c| c.display_name())
        .collect::<Vec<_>>()
        .join(", ")
}

fn lines(lines: Vec<String>) -> String {
    let mut out = lines.join("\n");
    out.push('\n');
    out
}

#[must_use]
pub fn assessment_text(assessment: &Assessment) -> String {
    let s = &assessment.summary;
    let distances = assessment
        .classification
        .distances
        .iter()
        .enumerate()
        .map(|(i, d)| format!("{i}={d:.2}"))
        .collect::<Vec<_>>()
        .join(" ");
    let status = match assessment.verdict {
        Verdict::Eligible => "ELIGIBLE FOR FINAL EXAM".to_string(),
        Verdict::NotEligible => format!(
            "NOT ELIGIBLE FOR FINAL EXAM (need {:.1} more marks)",
            s.shortfall
        ),
        Verdict::Disagreement {
            mark_eligible: true,
            ..
        } => "UNDECIDED: pass mark met but the model suggests more improvement".to_string(),
        Verdict::Disagreement { .. } => {
            "UNDECIDED: below pass mark but the model sees potential".to_string()
        }
    };

    lines(vec![
        format!(
            "Student:      {} ({}) - {}",
            assessment.student.name,
            assessment.student.registration_number,
            assessment.student.programme.title()
        ),
        format!(
            "Assignments:  {:.1}/{:.0} ({:.0}%)",
            s.assignments.score, s.assignments.max, s.assignments.percentage
        ),
        format!(
            "Tests:        {:.1}/{:.0} ({:.0}%)",
            s.tests.score, s.tests.max, s.tests.percentage
        ),
        format!(
            "Overall:      {:.1}/{:.0} ({:.1}%)",
            s.overall.score, s.overall.max, s.overall.percentage
        ),
        format!("Grade:        {}", s.grade),
        format!(
            "Cluster:      {} ({})",
            assessment.classification.label, assessment.category.name
        ),
        format!("Distances:    {distances}"),
        format!("Strengths:    {}", join(&s.strengths)),
        format!("Improve:      {}", join(&s.weaknesses)),
        format!("Status:       {status}"),
    ])
}

#[must_use]
pub fn model_info_text(info: &ModelInfo) -> String {
    let header = [
        format!("Model type:   {}", info.model_type),
        format!("Clusters:     {}", info.n_clusters),
        format!(
            "Features:     {} ({})",
            info.n_features,
            join(&info.features)
        ),
        format!("Total marks:  {:.0}", info.total_marks),
        format!("Pass mark:    {:.1}", info.pass_mark),
    ];
    let centers = info.centers.iter().map(|center| {
        let values = center
            .values
            .iter()
            .map(|v| format!("{v:.2}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "Cluster {}:    [{values}] {}{}",
            center.label,
            center.category,
            if center.eligible { " (eligible)" } else { "" }
        )
    });
    lines(header.into_iter().chain(centers).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assessment::CenterInfo;

    fn info() -> ModelInfo {
        ModelInfo {
            model_type: "KMeans".into(),
            n_clusters: 4,
            n_features: 3,
            features: vec![
                MarkComponent::Assignment1,
                MarkComponent::Test1,
                MarkComponent::Test2,
            ],
            total_marks: 40.0,
            pass_mark: 28.0,
            centers: vec![CenterInfo {
                label: 1,
                category: "EXCELLENT".into(),
                eligible: true,
                values: vec![4.5, 13.5, 13.0],
            }],
        }
    }

    #[test]
    fn model_info_text_lists_features_and_centers() {
        let text = model_info_text(&info());
        assert!(text.contains("Features:     3 (Assignment 1, Test 1, Test 2)"));
        assert!(text.contains("Cluster 1:    [4.50, 13.50, 13.00] EXCELLENT (eligible)"));
    }

    #[test]
    fn text_output_is_one_line_per_field() {
        let text = model_info_text(&info());
        assert_eq!(text.lines().count(), 6);
        assert!(text.ends_with("(eligible)\n"));
    }

    #[test]
    fn json_output_is_structured() {
        let json = render(&info(), OutputFormat::Json, model_info_text).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["n_clusters"], 4);
        assert_eq!(value["features"][0], "assignment1");
        assert_eq!(value["centers"][0]["category"], "EXCELLENT");
    }
}
