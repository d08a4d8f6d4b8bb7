//! Trial model - one recorded free-throw attempt
//!
//! ## Schema Overview
//!
//! ```text
//! Trial (1) ──< Frame (N, time order)
//!                 ├── player: JointName -> Point3
//!                 └── ball:   Point3
//! ```
//!
//! Trials are parsed from the external JSON document into private raw
//! structs first and then converted, so every schema problem surfaces as a
//! [`Error::Schema`] or [`Error::UnknownJoint`] naming the source document.

mod joint;
pub mod loader;

pub use joint::{JointName, UnknownJointLabel};
pub use loader::TrialLoader;

use crate::geometry::Point3;
use crate::{Error, Result};
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Outcome of a free-throw attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShotResult {
    /// Ball went in.
    Made,
    /// Ball did not go in.
    Missed,
}

impl ShotResult {
    /// Schema string (`"made"` / `"missed"`).
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Made => "made",
            Self::Missed => "missed",
        }
    }
}

impl fmt::Display for ShotResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ShotResult {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "made" => Ok(Self::Made),
            "missed" => Ok(Self::Missed),
            other => Err(format!("result must be \"made\" or \"missed\", got \"{other}\"")),
        }
    }
}

/// One time sample of a trial.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    frame_index: u32,
    time: f64,
    player_joints: FxHashMap<JointName, Point3>,
    ball_position: Point3,
}

impl Frame {
    /// Create a frame with no joints; add them with [`Frame::with_joint`].
    #[must_use]
    pub fn new(frame_index: u32, time: f64, ball_position: Point3) -> Self {
        Self {
            frame_index,
            time,
            player_joints: FxHashMap::default(),
            ball_position,
        }
    }

    /// Add (or replace) a joint position.
    #[must_use]
    pub fn with_joint(mut self, joint: JointName, position: Point3) -> Self {
        self.player_joints.insert(joint, position);
        self
    }

    /// Frame number as recorded in the source.
    #[must_use]
    pub const fn frame_index(&self) -> u32 {
        self.frame_index
    }

    /// Capture time in seconds.
    #[must_use]
    pub const fn time(&self) -> f64 {
        self.time
    }

    /// Joint positions for this frame.
    #[must_use]
    pub const fn player_joints(&self) -> &FxHashMap<JointName, Point3> {
        &self.player_joints
    }

    /// Position of one joint, if present in this frame.
    #[must_use]
    pub fn joint(&self, joint: JointName) -> Option<Point3> {
        self.player_joints.get(&joint).copied()
    }

    /// Ball position.
    #[must_use]
    pub const fn ball_position(&self) -> Point3 {
        self.ball_position
    }
}

/// One free-throw attempt. Immutable once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct Trial {
    trial_id: String,
    participant_id: String,
    result: ShotResult,
    frames: Vec<Frame>,
}

impl Trial {
    /// Create a trial from already-typed frames (time order).
    #[must_use]
    pub fn new(
        trial_id: impl Into<String>,
        participant_id: impl Into<String>,
        result: ShotResult,
        frames: Vec<Frame>,
    ) -> Self {
        Self {
            trial_id: trial_id.into(),
            participant_id: participant_id.into(),
            result,
            frames,
        }
    }

    /// Parse a trial document.
    ///
    /// `source_id` names the document in error messages (usually its path).
    ///
    /// # Errors
    ///
    /// Returns [`Error::Schema`] when a required key is missing or malformed,
    /// or [`Error::UnknownJoint`] when a player label is not a known joint.
    pub fn from_json_str(source_id: &str, text: &str) -> Result<Self> {
        let raw: RawTrial = serde_json::from_str(text).map_err(|e| Error::Schema {
            source_id: source_id.to_string(),
            message: e.to_string(),
        })?;
        raw.into_trial(source_id)
    }

    /// Trial identifier.
    #[must_use]
    pub fn trial_id(&self) -> &str {
        &self.trial_id
    }

    /// Participant identifier.
    #[must_use]
    pub fn participant_id(&self) -> &str {
        &self.participant_id
    }

    /// Shot outcome.
    #[must_use]
    pub const fn result(&self) -> ShotResult {
        self.result
    }

    /// Frames in time order.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Number of frames.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }
}

// --- JSON deserialization types ---

#[derive(Deserialize)]
struct RawTrial {
    participant_id: String,
    trial_id: String,
    result: String,
    tracking: Vec<RawFrame>,
}

#[derive(Deserialize)]
struct RawFrame {
    frame: u32,
    time: f64,
    data: RawFrameData,
}

#[derive(Deserialize)]
struct RawFrameData {
    player: BTreeMap<String, [f64; 3]>,
    ball: [f64; 3],
}

impl RawTrial {
    fn into_trial(self, source_id: &str) -> Result<Trial> {
        let result = self.result.parse::<ShotResult>().map_err(|message| Error::Schema {
            source_id: source_id.to_string(),
            message,
        })?;

        let frames = self
            .tracking
            .into_iter()
            .map(|raw| {
                let mut frame = Frame::new(raw.frame, raw.time, raw.data.ball.into());
                for (label, position) in raw.data.player {
                    let joint = label.parse::<JointName>().map_err(|UnknownJointLabel(label)| {
                        Error::UnknownJoint {
                            source_id: source_id.to_string(),
                            label,
                        }
                    })?;
                    frame.player_joints.insert(joint, position.into());
                }
                Ok(frame)
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Trial {
            trial_id: self.trial_id,
            participant_id: self.participant_id,
            result,
            frames,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MINIMAL: &str = r#"{
        "participant_id": "P0001",
        "trial_id": "0001",
        "result": "made",
        "tracking": [
            {"frame": 0, "time": 0.0, "data": {"player": {"R_HIP": [1.0, 2.0, 1.0]}, "ball": [0.0, 0.0, 2.0]}},
            {"frame": 1, "time": 0.033, "data": {"player": {"R_HIP": [1.1, 2.0, 1.0]}, "ball": [0.1, 0.0, 2.1]}}
        ]
    }"#;

    #[test]
    fn test_from_json_str_minimal() {
        let trial = Trial::from_json_str("minimal", MINIMAL).unwrap();
        assert_eq!(trial.trial_id(), "0001");
        assert_eq!(trial.participant_id(), "P0001");
        assert_eq!(trial.result(), ShotResult::Made);
        assert_eq!(trial.frame_count(), 2);
        assert_eq!(trial.frames()[1].frame_index(), 1);
        assert_eq!(trial.frames()[1].joint(JointName::RHip), Some(Point3::new(1.1, 2.0, 1.0)));
        assert_eq!(trial.frames()[1].ball_position(), Point3::new(0.1, 0.0, 2.1));
    }

    #[test]
    fn test_missing_tracking_is_schema_error() {
        let text = r#"{"participant_id": "P0001", "trial_id": "0001", "result": "made"}"#;
        let err = Trial::from_json_str("no-tracking.json", text).unwrap_err();
        match err {
            Error::Schema { source_id, message } => {
                assert_eq!(source_id, "no-tracking.json");
                assert!(message.contains("tracking"));
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_result_is_schema_error() {
        let text = MINIMAL.replace("\"made\"", "\"blocked\"");
        let err = Trial::from_json_str("bad-result", &text).unwrap_err();
        assert!(matches!(err, Error::Schema { .. }));
        assert!(err.to_string().contains("blocked"));
    }

    #[test]
    fn test_unknown_joint_label() {
        let text = MINIMAL.replace("R_HIP", "R_TAIL");
        let err = Trial::from_json_str("tail", &text).unwrap_err();
        assert!(matches!(err, Error::UnknownJoint { ref label, .. } if label == "R_TAIL"));
    }

    #[test]
    fn test_shot_result_parse() {
        assert_eq!("missed".parse::<ShotResult>(), Ok(ShotResult::Missed));
        assert!("MADE".parse::<ShotResult>().is_err());
        assert_eq!(ShotResult::Made.to_string(), "made");
    }
}
