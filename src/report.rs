//! Plain-text analysis report

use crate::types::{ClassificationLabel, TrajectoryAnalysis};

const RULE_WIDTH: usize = 60;

/// Render a human-readable report for a trace analysis
pub fn render(analysis: &TrajectoryAnalysis) -> String {
    let heavy = "=".repeat(RULE_WIDTH);
    let light = "-".repeat(RULE_WIDTH);
    let mut lines = vec![
        heavy.clone(),
        "POINTER MOVEMENT ANALYSIS REPORT".to_string(),
        heavy.clone(),
        String::new(),
    ];

    if let Some(stats) = &analysis.result.statistics {
        lines.extend([
            "STATISTICS:".to_string(),
            light.clone(),
            format!("  Avg Velocity: {:.2}", stats.avg_velocity),
            format!("  Velocity Std Dev: {:.2}", stats.velocity_std_dev),
            format!("  Avg Acceleration: {:.2}", stats.avg_acceleration),
            format!("  Direction Changes: {}", stats.direction_changes),
            String::new(),
        ]);
    }

    if let Some(profile) = &analysis.profile {
        lines.extend([
            "MOVEMENT PROFILE:".to_string(),
            light.clone(),
            format!("  Total Distance: {:.2}", profile.total_distance),
            format!("  Max Velocity: {:.2}", profile.max_velocity),
            format!("  Max Acceleration: {:.2}", profile.max_acceleration),
            format!("  Acceleration Std Dev: {:.2}", profile.acceleration_std_dev),
            format!("  Reversals: {}", profile.reversals),
            format!("  Duration: {:.2}", profile.duration),
            format!("  Velocity Samples: {}", profile.velocity_samples),
            String::new(),
        ]);
    }

    if !analysis.indicators.is_empty() {
        lines.push("INDICATORS:".to_string());
        lines.push(light.clone());
        lines.extend(
            analysis
                .indicators
                .iter()
                .map(|r| format!("  {}: {} ({:.2})", r.name, r.band, r.value)),
        );
        lines.push(String::new());
    }

    lines.extend([
        "DIAGNOSIS:".to_string(),
        light.clone(),
        format!("  Type: {}", analysis.result.label),
        format!("  Confidence: {:.1}%", analysis.result.confidence),
        String::new(),
        "INTERPRETATION:".to_string(),
        light,
    ]);
    lines.extend(
        interpretation(analysis.result.label)
            .iter()
            .map(|line| format!("  {line}")),
    );

    lines.extend([
        String::new(),
        heavy.clone(),
        "DISCLAIMER:".to_string(),
        "This analysis is for research/screening purposes only.".to_string(),
        "Professional clinical evaluation is required for diagnosis.".to_string(),
        heavy,
    ]);

    let mut report = lines.join("\n");
    report.push('\n');
    report
}

fn interpretation(label: ClassificationLabel) -> [&'static str; 2] {
    match label {
        ClassificationLabel::Hyperactive => [
            "Highly variable speed with sharp accelerations detected.",
            "Patterns consistent with hyperactive-type ADHD.",
        ],
        ClassificationLabel::Inattentive => [
            "Frequent changes of direction detected.",
            "Patterns consistent with inattentive-type ADHD.",
        ],
        ClassificationLabel::Combined => [
            "Both variable speed and frequent direction changes present.",
            "Patterns consistent with combined-type ADHD.",
        ],
        ClassificationLabel::NoIndicators => [
            "Pointer movement patterns are within normal ranges.",
            "No significant ADHD indicators detected.",
        ],
        ClassificationLabel::InsufficientData => [
            "Too few pointer samples were captured to analyze movement.",
            "Repeat the activity to collect a longer trace.",
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        ClassificationResult, IndicatorBand, IndicatorReading, TrajectoryStatistics,
    };

    #[test]
    fn test_render_classified() {
        let analysis = TrajectoryAnalysis {
            result: ClassificationResult {
                label: ClassificationLabel::Inattentive,
                confidence: 80.0,
                statistics: Some(TrajectoryStatistics {
                    avg_velocity: 0.01,
                    velocity_std_dev: 0.0,
                    avg_acceleration: 0.0,
                    direction_changes: 18,
                }),
            },
            profile: None,
            indicators: vec![IndicatorReading {
                name: "Reversals".to_string(),
                value: 0.0,
                band: IndicatorBand::Normal,
            }],
        };

        let report = render(&analysis);
        assert!(report.contains("Type: Inattentive ADHD"));
        assert!(report.contains("Confidence: 80.0%"));
        assert!(report.contains("Direction Changes: 18"));
        assert!(report.contains("Reversals: Normal (0.00)"));
        assert!(report.contains("inattentive-type"));
        assert!(report.contains("DISCLAIMER"));
        assert!(!report.contains("MOVEMENT PROFILE"));
    }

    #[test]
    fn test_render_insufficient_data() {
        let analysis = TrajectoryAnalysis {
            result: ClassificationResult::insufficient_data(),
            profile: None,
            indicators: Vec::new(),
        };

        let report = render(&analysis);
        assert!(report.contains("Type: Insufficient Data"));
        assert!(report.contains("Confidence: 0.0%"));
        assert!(!report.contains("STATISTICS"));
        assert!(!report.contains("INDICATORS"));
    }

    #[test]
    fn test_render_layout() {
        let analysis = TrajectoryAnalysis {
            result: ClassificationResult::insufficient_data(),
            profile: None,
            indicators: Vec::new(),
        };
        let heavy = "=".repeat(RULE_WIDTH);
        let light = "-".repeat(RULE_WIDTH);
        let expected = format!(
            "{heavy}\n\
             POINTER MOVEMENT ANALYSIS REPORT\n\
             {heavy}\n\
             \n\
             DIAGNOSIS:\n\
             {light}\n  \
             Type: Insufficient Data\n  \
             Confidence: 0.0%\n\
             \n\
             INTERPRETATION:\n\
             {light}\n  \
             Too few pointer samples were captured to analyze movement.\n  \
             Repeat the activity to collect a longer trace.\n\
             \n\
             {heavy}\n\
             DISCLAIMER:\n\
             This analysis is for research/screening purposes only.\n\
             Professional clinical evaluation is required for diagnosis.\n\
             {heavy}\n"
        );

        pretty_assertions::assert_eq!(render(&analysis), expected);
    }
}
