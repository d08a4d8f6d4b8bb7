//! Joint series - frame-ordered joint dictionaries reshaped per joint
//!
//! A [`Trial`] stores one joint map per frame. Both the deviation analysis
//! and the animation index by `(joint, frame)`, so the builder transposes the
//! frames into one time series per joint plus a parallel ball series.
//!
//! Uniform length is checked, not assumed: a joint that is missing from some
//! frames yields [`Error::JointLengthMismatch`] instead of a ragged series.

use crate::geometry::Point3;
use crate::trial::{JointName, Trial};
use crate::{Error, Result};
use rustc_hash::FxHashMap;

/// Per-joint time series, every entry indexed by frame position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JointSeries {
    series: FxHashMap<JointName, Vec<Point3>>,
}

impl JointSeries {
    /// Samples for one joint, if the joint was tracked.
    #[must_use]
    pub fn get(&self, joint: JointName) -> Option<&[Point3]> {
        self.series.get(&joint).map(Vec::as_slice)
    }

    /// Whether the joint was tracked.
    #[must_use]
    pub fn contains(&self, joint: JointName) -> bool {
        self.series.contains_key(&joint)
    }

    /// Tracked joints (unordered).
    pub fn joints(&self) -> impl Iterator<Item = JointName> + '_ {
        self.series.keys().copied()
    }

    /// Number of tracked joints.
    #[must_use]
    pub fn len(&self) -> usize {
        self.series.len()
    }

    /// True when no joint was tracked.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

/// A trial reshaped for per-frame analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct TrialSeries {
    trial_id: String,
    frame_numbers: Vec<u32>,
    times: Vec<f64>,
    joints: JointSeries,
    ball: Vec<Point3>,
}

impl TrialSeries {
    /// Reshape a trial into joint-indexed series.
    ///
    /// Frames are consumed in order; each frame appends one sample to every
    /// joint it carries and one sample to the ball series.
    ///
    /// # Errors
    ///
    /// Returns [`Error::JointLengthMismatch`] if any joint series ends up with
    /// a length different from the trial's frame count.
    pub fn from_trial(trial: &Trial) -> Result<Self> {
        let frame_count = trial.frame_count();
        let mut series: FxHashMap<JointName, Vec<Point3>> = FxHashMap::default();
        let mut ball = Vec::with_capacity(frame_count);
        let mut frame_numbers = Vec::with_capacity(frame_count);
        let mut times = Vec::with_capacity(frame_count);

        for frame in trial.frames() {
            for (&joint, &position) in frame.player_joints() {
                series
                    .entry(joint)
                    .or_insert_with(|| Vec::with_capacity(frame_count))
                    .push(position);
            }
            ball.push(frame.ball_position());
            frame_numbers.push(frame.frame_index());
            times.push(frame.time());
        }

        // Report the first offending joint in label order for stable messages
        let mut joints: Vec<_> = series.iter().collect();
        joints.sort_by_key(|(joint, _)| **joint);
        if let Some((joint, samples)) = joints
            .into_iter()
            .find(|(_, samples)| samples.len() != frame_count)
        {
            return Err(Error::JointLengthMismatch {
                trial_id: trial.trial_id().to_string(),
                joint: joint.to_string(),
                expected: frame_count,
                actual: samples.len(),
            });
        }

        Ok(Self {
            trial_id: trial.trial_id().to_string(),
            frame_numbers,
            times,
            joints: JointSeries { series },
            ball,
        })
    }

    /// Trial identifier the series came from.
    #[must_use]
    pub fn trial_id(&self) -> &str {
        &self.trial_id
    }

    /// Number of frames (length of every series).
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.ball.len()
    }

    /// Source frame numbers, by frame position.
    #[must_use]
    pub fn frame_numbers(&self) -> &[u32] {
        &self.frame_numbers
    }

    /// Capture times in seconds, by frame position.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Joint series.
    #[must_use]
    pub const fn joints(&self) -> &JointSeries {
        &self.joints
    }

    /// Ball positions, by frame position.
    #[must_use]
    pub fn ball(&self) -> &[Point3] {
        &self.ball
    }

    /// Samples for `joint`, or [`Error::MissingJoint`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingJoint`] if the joint was never tracked.
    pub fn joint(&self, joint: JointName) -> Result<&[Point3]> {
        self.joints.get(joint).ok_or_else(|| Error::MissingJoint {
            trial_id: self.trial_id.clone(),
            joint: joint.to_string(),
        })
    }

    /// Position of `joint` at frame position `frame`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingJoint`] for an untracked joint and
    /// [`Error::FrameOutOfRange`] for an index past the last frame.
    pub fn position(&self, joint: JointName, frame: usize) -> Result<Point3> {
        self.joint(joint)?
            .get(frame)
            .copied()
            .ok_or(Error::FrameOutOfRange {
                frame,
                frame_count: self.frame_count(),
            })
    }
}
