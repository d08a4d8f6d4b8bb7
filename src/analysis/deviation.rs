//! Deviation analysis - per-frame shooting-arm alignment metrics
//!
//! For every frame the shoulder midpoint (mean of both shoulders) serves as
//! the body midline reference. Deviations are Euclidean distances from the
//! midline to the right elbow, right wrist and right hand (mean of the first
//! and fifth finger). Only the right arm chain is analysed; the motion under
//! study is a right-handed shot.
//!
//! Frames are independent: no smoothing and no outlier rejection, so the
//! output has exactly one [`FrameMetrics`] per input frame.

use crate::geometry::Point3;
use crate::series::TrialSeries;
use crate::trial::{JointName, ShotResult, Trial};
use crate::Result;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Derived distances for one frame (meters).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameMetrics {
    /// Source frame number
    pub frame: u32,
    /// Capture time in seconds
    pub time: f64,
    /// Right elbow to shoulder midpoint
    pub elbow_deviation: f64,
    /// Right wrist to shoulder midpoint
    pub wrist_deviation: f64,
    /// Right hand to shoulder midpoint
    pub hand_deviation: f64,
    /// Right elbow to right shoulder
    pub elbow_shoulder_dist: f64,
    /// Right wrist to right shoulder
    pub wrist_shoulder_dist: f64,
    /// Right hand to right shoulder
    pub hand_shoulder_dist: f64,
}

/// Per-frame metrics for one trial, tagged with the trial's identity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialAnalysis {
    /// Trial identifier
    pub trial_id: String,
    /// Participant identifier
    pub participant_id: String,
    /// Shot outcome
    pub result: ShotResult,
    /// One entry per frame, in frame order
    pub frames: Vec<FrameMetrics>,
}

/// Computes [`FrameMetrics`] from joint series.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeviationAnalyzer;

impl DeviationAnalyzer {
    /// Create an analyzer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Metrics for every frame of `series`, in frame order.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::MissingJoint`] if a shoulder, the right elbow,
    /// the right wrist, or either right finger landmark was never tracked.
    pub fn analyze(&self, series: &TrialSeries) -> Result<Vec<FrameMetrics>> {
        if series.frame_count() == 0 {
            return Ok(Vec::new());
        }

        let r_shoulder = series.joint(JointName::RShoulder)?;
        let l_shoulder = series.joint(JointName::LShoulder)?;
        let r_elbow = series.joint(JointName::RElbow)?;
        let r_wrist = series.joint(JointName::RWrist)?;
        let r_1st_finger = series.joint(JointName::R1stFinger)?;
        let r_5th_finger = series.joint(JointName::R5thFinger)?;

        let metrics = (0..series.frame_count())
            .map(|f| {
                let shoulder_midpoint = r_shoulder[f].midpoint(l_shoulder[f]);
                let hand = r_1st_finger[f].midpoint(r_5th_finger[f]);
                frame_metrics(
                    series.frame_numbers()[f],
                    series.times()[f],
                    shoulder_midpoint,
                    r_shoulder[f],
                    r_elbow[f],
                    r_wrist[f],
                    hand,
                )
            })
            .collect();

        Ok(metrics)
    }

    /// Reshape and analyze a whole trial.
    ///
    /// # Errors
    ///
    /// Propagates reshape errors ([`crate::Error::JointLengthMismatch`]) and
    /// missing-joint errors from [`DeviationAnalyzer::analyze`].
    pub fn analyze_trial(&self, trial: &Trial) -> Result<TrialAnalysis> {
        let series = TrialSeries::from_trial(trial)?;
        let frames = self.analyze(&series)?;
        debug!(
            trial_id = trial.trial_id(),
            frames = frames.len(),
            "analyzed trial"
        );
        Ok(TrialAnalysis {
            trial_id: trial.trial_id().to_string(),
            participant_id: trial.participant_id().to_string(),
            result: trial.result(),
            frames,
        })
    }
}

fn frame_metrics(
    frame: u32,
    time: f64,
    shoulder_midpoint: Point3,
    r_shoulder: Point3,
    elbow: Point3,
    wrist: Point3,
    hand: Point3,
) -> FrameMetrics {
    FrameMetrics {
        frame,
        time,
        elbow_deviation: elbow.distance(shoulder_midpoint),
        wrist_deviation: wrist.distance(shoulder_midpoint),
        hand_deviation: hand.distance(shoulder_midpoint),
        elbow_shoulder_dist: elbow.distance(r_shoulder),
        wrist_shoulder_dist: wrist.distance(r_shoulder),
        hand_shoulder_dist: hand.distance(r_shoulder),
    }
}
