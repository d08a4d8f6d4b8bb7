//! Error types for freethrow-kinematics
//!
//! Every fatal variant names the trial or participant it came from so a batch
//! run can report exactly which recording needs attention.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// freethrow-kinematics error types
#[derive(Error, Debug)]
pub enum Error {
    /// No trial files exist for the requested participant
    #[error("No trials found for participant '{participant_id}' under {path}\nExpected files named BB_FT_*.json")]
    DataNotFound {
        /// Participant that was requested
        participant_id: String,
        /// Directory that was searched
        path: String,
    },

    /// Trial file could not be read
    #[error("Cannot read trial file {path}: {source}")]
    TrialRead {
        /// File that failed
        path: String,
        /// Underlying IO failure
        source: std::io::Error,
    },

    /// Trial document does not match the expected shape
    #[error("Schema error in {source_id}: {message}")]
    Schema {
        /// File path or identifier of the offending document
        source_id: String,
        /// What was missing or malformed
        message: String,
    },

    /// Joint label outside the known landmark set
    #[error("Unknown joint label '{label}' in {source_id}")]
    UnknownJoint {
        /// File path or identifier of the offending document
        source_id: String,
        /// The unrecognized label
        label: String,
    },

    /// A joint required by an analysis or by the skeleton topology is absent
    #[error("Trial '{trial_id}' has no series for joint {joint}")]
    MissingJoint {
        /// Trial being processed
        trial_id: String,
        /// Joint label that was looked up
        joint: String,
    },

    /// A reshaped joint series disagrees with the trial's frame count
    #[error("Trial '{trial_id}': joint {joint} has {actual} samples but the trial has {expected} frames\nEvery frame must carry the same joint set")]
    JointLengthMismatch {
        /// Trial being processed
        trial_id: String,
        /// Joint whose series is ragged
        joint: String,
        /// Number of frames in the trial
        expected: usize,
        /// Number of samples collected for the joint
        actual: usize,
    },

    /// Statistics requested for a trial without frames
    #[error("Trial '{trial_id}' has no frames; statistics are undefined")]
    EmptyTrial {
        /// Trial being processed
        trial_id: String,
    },

    /// Animation frame index past the end of the trial
    #[error("Frame {frame} out of range (trial has {frame_count} frames)")]
    FrameOutOfRange {
        /// Requested frame index
        frame: usize,
        /// Number of frames available
        frame_count: usize,
    },

    /// Animation frame driven out of sequence
    #[error("Frame {frame} driven out of order; the next frame is {expected}\nFrames are driven strictly in order from 0")]
    FrameOutOfOrder {
        /// Requested frame index
        frame: usize,
        /// Frame the driver expects next
        expected: usize,
    },

    /// Animation already rendered its last frame
    #[error("Animation finished after {frame_count} frames; no further frames can be driven")]
    AnimationFinished {
        /// Number of frames that were driven
        frame_count: usize,
    },

    /// Optional decorative capability missing (logged, never fatal)
    #[error("Optional capability unavailable: {0}\nContinuing with the feature disabled")]
    OptionalCapabilityUnavailable(String),

    /// Renderer backend failure
    #[error("Render error: {0}")]
    Render(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Arrow error
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    /// Generic error
    #[error("{0}")]
    Other(String),
}
