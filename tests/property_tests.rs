//! Property-based tests for the analysis pipeline
//!
//! - Reshape keeps every joint series aligned with the frame count
//! - Deviations are distances (non-negative, zero on the midline)
//! - Summary rows keep batch order and split cleanly by result
//! - Run with ProptestConfig::with_cases(100)

use freethrow_kinematics::analysis::{DeviationAnalyzer, Metric, SeriesStats, TrialSummarizer};
use freethrow_kinematics::geometry::Point3;
use freethrow_kinematics::series::TrialSeries;
use freethrow_kinematics::trial::{Frame, JointName, ShotResult, Trial};
use proptest::prelude::*;
use quickcheck::{quickcheck, TestResult};

// ============================================================================
// Property Test Generators (Strategies)
// ============================================================================

/// Position inside a 10 m cube around the origin
fn arb_point() -> impl Strategy<Value = Point3> {
    (-5.0f64..5.0, -5.0f64..5.0, 0.0f64..5.0).prop_map(|(x, y, z)| Point3::new(x, y, z))
}

/// One frame carrying the six joints the analyzer reads
fn arb_arm_frame(index: u32) -> impl Strategy<Value = Frame> {
    proptest::collection::vec(arb_point(), 7).prop_map(move |p| {
        Frame::new(index, f64::from(index) / 60.0, p[6])
            .with_joint(JointName::RShoulder, p[0])
            .with_joint(JointName::LShoulder, p[1])
            .with_joint(JointName::RElbow, p[2])
            .with_joint(JointName::RWrist, p[3])
            .with_joint(JointName::R1stFinger, p[4])
            .with_joint(JointName::R5thFinger, p[5])
    })
}

fn arb_result() -> impl Strategy<Value = ShotResult> {
    prop_oneof![Just(ShotResult::Made), Just(ShotResult::Missed)]
}

/// Trial with 1..=max_frames frames
fn arb_trial(max_frames: u32) -> impl Strategy<Value = Trial> {
    (1..=max_frames, arb_result()).prop_flat_map(|(frames, result)| {
        (0..frames)
            .map(arb_arm_frame)
            .collect::<Vec<_>>()
            .prop_map(move |frames| Trial::new("T", "P", result, frames))
    })
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Property: every reshaped series has one entry per frame
    #[test]
    fn prop_reshape_preserves_length(trial in arb_trial(20)) {
        let series = TrialSeries::from_trial(&trial).unwrap();

        prop_assert_eq!(series.frame_count(), trial.frame_count());
        prop_assert_eq!(series.times().len(), trial.frame_count());
        for joint in series.joints().joints() {
            prop_assert_eq!(series.joint(joint).unwrap().len(), trial.frame_count());
        }
    }

    /// Property: deviations and shoulder distances are non-negative and finite
    #[test]
    fn prop_metrics_non_negative(trial in arb_trial(20)) {
        let analysis = DeviationAnalyzer::new().analyze_trial(&trial).unwrap();

        prop_assert_eq!(analysis.frames.len(), trial.frame_count());
        for frame in &analysis.frames {
            for metric in Metric::ALL {
                let value = metric.of(frame);
                prop_assert!(value.is_finite());
                prop_assert!(value >= 0.0);
            }
        }
    }

    /// Property: an elbow on both shoulders has zero elbow deviation
    #[test]
    fn prop_elbow_on_midline_has_zero_deviation(shoulder in arb_point(), hand in arb_point()) {
        let frame = Frame::new(0, 0.0, Point3::ORIGIN)
            .with_joint(JointName::RShoulder, shoulder)
            .with_joint(JointName::LShoulder, shoulder)
            .with_joint(JointName::RElbow, shoulder)
            .with_joint(JointName::RWrist, hand)
            .with_joint(JointName::R1stFinger, hand)
            .with_joint(JointName::R5thFinger, hand);
        let trial = Trial::new("T", "P", ShotResult::Made, vec![frame]);
        let analysis = DeviationAnalyzer::new().analyze_trial(&trial).unwrap();

        prop_assert!(analysis.frames[0].elbow_deviation.abs() < 1e-12);
        prop_assert!((analysis.frames[0].wrist_deviation - analysis.frames[0].hand_deviation).abs() < 1e-12);
    }

    /// Property: per-trial statistics do not depend on frame order
    #[test]
    fn prop_statistics_order_independent(trial in arb_trial(20), rotate in 0usize..20) {
        let mut frames = trial.frames().to_vec();
        frames.reverse();
        let shift = rotate % frames.len();
        frames.rotate_left(shift);
        let reordered = Trial::new("T", "P", trial.result(), frames);

        let analyzer = DeviationAnalyzer::new();
        let analyses = vec![
            analyzer.analyze_trial(&trial).unwrap(),
            analyzer.analyze_trial(&reordered).unwrap(),
        ];
        let table = TrialSummarizer::new().summarize(&analyses).unwrap();
        let (original, permuted) = (&table.rows()[0], &table.rows()[1]);

        prop_assert_eq!(original.frame_count, permuted.frame_count);
        for metric in Metric::ALL {
            let a = original.stats(metric);
            let b = permuted.stats(metric);
            prop_assert_eq!(a.max, b.max);
            prop_assert!((a.mean - b.mean).abs() < 1e-12);
            match (a.std, b.std) {
                (Some(x), Some(y)) => prop_assert!((x - y).abs() < 1e-12),
                (None, None) => {}
                other => prop_assert!(false, "std presence differs: {:?}", other),
            }
        }
    }

    /// Property: trial_number is the 1-based batch position and the split is a partition
    #[test]
    fn prop_summary_numbering_and_split(trials in proptest::collection::vec(arb_trial(5), 1..12)) {
        let analyzer = DeviationAnalyzer::new();
        let analyses: Vec<_> = trials
            .iter()
            .map(|t| analyzer.analyze_trial(t).unwrap())
            .collect();
        let table = TrialSummarizer::new().summarize(&analyses).unwrap();

        prop_assert_eq!(table.len(), trials.len());
        for (position, row) in table.rows().iter().enumerate() {
            prop_assert_eq!(row.trial_number as usize, position + 1);
            prop_assert_eq!(row.result, trials[position].result());
        }

        let split = table.split_by_result();
        prop_assert_eq!(split.made.len() + split.missed.len(), table.len());
        prop_assert!(split.made.iter().all(|r| r.result == ShotResult::Made));
        prop_assert!(split.missed.iter().all(|r| r.result == ShotResult::Missed));
    }
}

#[test]
fn quickcheck_stats_bounds() {
    fn prop(values: Vec<f64>) -> TestResult {
        if values.is_empty() || values.iter().any(|v| !v.is_finite() || v.abs() > 1e6) {
            return TestResult::discard();
        }
        let Some(stats) = SeriesStats::from_values(&values) else {
            return TestResult::failed();
        };
        let slack = 1e-9 * stats.max.abs().max(1.0);
        TestResult::from_bool(
            stats.mean <= stats.max + slack
                && stats.std.map_or(values.len() == 1, |s| s >= 0.0 && values.len() > 1),
        )
    }
    quickcheck(prop as fn(Vec<f64>) -> TestResult);
}
