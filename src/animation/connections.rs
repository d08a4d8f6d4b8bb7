//! Skeleton topology: joint pairs drawn as line segments

use crate::trial::JointName;
use crate::trial::JointName::{
    L1stFinger, L1stToe, L5thFinger, L5thToe, LAnkle, LCalc, LEar, LElbow, LEye, LHip, LKnee,
    LShoulder, LWrist, Nose, R1stFinger, R1stToe, R5thFinger, R5thToe, RAnkle, RCalc, REar,
    RElbow, REye, RHip, RKnee, RShoulder, RWrist,
};

/// Unordered pair of joints joined by one skeleton line.
pub type Connection = (JointName, JointName);

/// Default full-body skeleton.
///
/// The two finger-span edges appear twice; each entry is drawn as its own line.
pub const DEFAULT_CONNECTIONS: [Connection; 37] = [
    // Face
    (REye, LEye),
    (REye, Nose),
    (LEye, Nose),
    (REye, REar),
    (LEye, LEar),
    // Upper body
    (RShoulder, LShoulder),
    (RShoulder, RElbow),
    (LShoulder, LElbow),
    (RElbow, RWrist),
    (LElbow, LWrist),
    // Torso
    (RShoulder, RHip),
    (LShoulder, LHip),
    (RHip, LHip),
    // Legs
    (RHip, RKnee),
    (LHip, LKnee),
    (RKnee, RAnkle),
    (LKnee, LAnkle),
    // Hands
    (RWrist, R1stFinger),
    (RWrist, R5thFinger),
    (LWrist, L1stFinger),
    (LWrist, L5thFinger),
    // Feet
    (RAnkle, R1stToe),
    (RAnkle, R5thToe),
    (LAnkle, L1stToe),
    (LAnkle, L5thToe),
    (RAnkle, RCalc),
    (LAnkle, LCalc),
    (R1stToe, R5thToe),
    (L1stToe, L5thToe),
    (R1stToe, RCalc),
    (L1stToe, LCalc),
    (R5thToe, RCalc),
    (L5thToe, LCalc),
    // Finger span
    (R1stFinger, R5thFinger),
    (L1stFinger, L5thFinger),
    (R1stFinger, R5thFinger),
    (L1stFinger, L5thFinger),
];

/// Default skeleton as an owned list, for callers that extend it.
#[must_use]
pub fn default_connections() -> Vec<Connection> {
    DEFAULT_CONNECTIONS.to_vec()
}
