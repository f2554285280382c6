use attention_trace::features::TrajectoryFeatureDeriver;
use attention_trace::{classify, ClassificationLabel, PointerSample, MIN_SAMPLES};
use proptest::prelude::*;
use std::f64::consts::FRAC_PI_4;

/// Traces with strictly increasing timestamps and bounded coordinates
fn trace(len: std::ops::Range<usize>) -> impl Strategy<Value = Vec<PointerSample>> {
    prop::collection::vec((1.0f64..500.0, -2000.0f64..2000.0, -2000.0f64..2000.0), len).prop_map(
        |steps| {
            let mut time = 0.0;
            steps
                .into_iter()
                .map(|(dt, x, y)| {
                    time += dt;
                    PointerSample::new(time, x, y)
                })
                .collect()
        },
    )
}

proptest! {
    #[test]
    fn short_traces_are_insufficient(samples in trace(0..MIN_SAMPLES)) {
        let result = classify(&samples);
        prop_assert_eq!(result.label, ClassificationLabel::InsufficientData);
        prop_assert_eq!(result.confidence, 0.0);
        prop_assert!(result.statistics.is_none());
    }

    #[test]
    fn classification_is_deterministic(samples in trace(0..60)) {
        let first = classify(&samples);
        let second = classify(&samples);

        prop_assert_eq!(first.label, second.label);
        prop_assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
        prop_assert_eq!(first.statistics, second.statistics);
    }

    #[test]
    fn confidence_stays_within_label_bounds(samples in trace(MIN_SAMPLES..60)) {
        let result = classify(&samples);
        let confidence = result.confidence;

        match result.label {
            ClassificationLabel::Hyperactive => prop_assert!((0.0..=85.0).contains(&confidence)),
            ClassificationLabel::Inattentive => prop_assert!((0.0..=80.0).contains(&confidence)),
            ClassificationLabel::Combined => prop_assert!((0.0..=82.0).contains(&confidence)),
            ClassificationLabel::NoIndicators => prop_assert!((70.0..=90.0).contains(&confidence)),
            ClassificationLabel::InsufficientData => prop_assert_eq!(confidence, 0.0),
        }
    }

    #[test]
    fn duplicate_timestamp_adds_no_velocity_sample(
        samples in trace(2..40),
        at in any::<prop::sample::Index>(),
        x in -2000.0f64..2000.0,
        y in -2000.0f64..2000.0,
    ) {
        let before = TrajectoryFeatureDeriver::derive(&samples, FRAC_PI_4);

        let i = at.index(samples.len());
        let mut with_duplicate = samples.clone();
        with_duplicate.insert(i + 1, PointerSample::new(samples[i].time, x, y));
        let after = TrajectoryFeatureDeriver::derive(&with_duplicate, FRAC_PI_4);

        prop_assert_eq!(before.velocities.len(), after.velocities.len());
        prop_assert_eq!(after.velocities.len(), samples.len() - 1);
    }
}
