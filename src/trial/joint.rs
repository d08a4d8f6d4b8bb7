//! Anatomical landmark labels used by the capture schema

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Closed set of joint labels tracked per frame.
///
/// The string form (`as_str`, `Display`, serde) is the exact label used in
/// trial files, e.g. `R_1STFINGER`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[allow(missing_docs)]
pub enum JointName {
    #[serde(rename = "R_EYE")]
    REye,
    #[serde(rename = "L_EYE")]
    LEye,
    #[serde(rename = "NOSE")]
    Nose,
    #[serde(rename = "R_EAR")]
    REar,
    #[serde(rename = "L_EAR")]
    LEar,
    #[serde(rename = "R_SHOULDER")]
    RShoulder,
    #[serde(rename = "L_SHOULDER")]
    LShoulder,
    #[serde(rename = "R_ELBOW")]
    RElbow,
    #[serde(rename = "L_ELBOW")]
    LElbow,
    #[serde(rename = "R_WRIST")]
    RWrist,
    #[serde(rename = "L_WRIST")]
    LWrist,
    #[serde(rename = "R_HIP")]
    RHip,
    #[serde(rename = "L_HIP")]
    LHip,
    #[serde(rename = "R_KNEE")]
    RKnee,
    #[serde(rename = "L_KNEE")]
    LKnee,
    #[serde(rename = "R_ANKLE")]
    RAnkle,
    #[serde(rename = "L_ANKLE")]
    LAnkle,
    #[serde(rename = "R_1STFINGER")]
    R1stFinger,
    #[serde(rename = "R_5THFINGER")]
    R5thFinger,
    #[serde(rename = "L_1STFINGER")]
    L1stFinger,
    #[serde(rename = "L_5THFINGER")]
    L5thFinger,
    #[serde(rename = "R_1STTOE")]
    R1stToe,
    #[serde(rename = "R_5THTOE")]
    R5thToe,
    #[serde(rename = "L_1STTOE")]
    L1stToe,
    #[serde(rename = "L_5THTOE")]
    L5thToe,
    #[serde(rename = "R_CALC")]
    RCalc,
    #[serde(rename = "L_CALC")]
    LCalc,
}

impl JointName {
    /// Every label, in schema order.
    pub const ALL: [Self; 27] = [
        Self::REye,
        Self::LEye,
        Self::Nose,
        Self::REar,
        Self::LEar,
        Self::RShoulder,
        Self::LShoulder,
        Self::RElbow,
        Self::LElbow,
        Self::RWrist,
        Self::LWrist,
        Self::RHip,
        Self::LHip,
        Self::RKnee,
        Self::LKnee,
        Self::RAnkle,
        Self::LAnkle,
        Self::R1stFinger,
        Self::R5thFinger,
        Self::L1stFinger,
        Self::L5thFinger,
        Self::R1stToe,
        Self::R5thToe,
        Self::L1stToe,
        Self::L5thToe,
        Self::RCalc,
        Self::LCalc,
    ];

    /// Schema label for this joint.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::REye => "R_EYE",
            Self::LEye => "L_EYE",
            Self::Nose => "NOSE",
            Self::REar => "R_EAR",
            Self::LEar => "L_EAR",
            Self::RShoulder => "R_SHOULDER",
            Self::LShoulder => "L_SHOULDER",
            Self::RElbow => "R_ELBOW",
            Self::LElbow => "L_ELBOW",
            Self::RWrist => "R_WRIST",
            Self::LWrist => "L_WRIST",
            Self::RHip => "R_HIP",
            Self::LHip => "L_HIP",
            Self::RKnee => "R_KNEE",
            Self::LKnee => "L_KNEE",
            Self::RAnkle => "R_ANKLE",
            Self::LAnkle => "L_ANKLE",
            Self::R1stFinger => "R_1STFINGER",
            Self::R5thFinger => "R_5THFINGER",
            Self::L1stFinger => "L_1STFINGER",
            Self::L5thFinger => "L_5THFINGER",
            Self::R1stToe => "R_1STTOE",
            Self::R5thToe => "R_5THTOE",
            Self::L1stToe => "L_1STTOE",
            Self::L5thToe => "L_5THTOE",
            Self::RCalc => "R_CALC",
            Self::LCalc => "L_CALC",
        }
    }
}

impl fmt::Display for JointName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Label that is not part of the known landmark set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownJointLabel(pub String);

impl FromStr for JointName {
    type Err = UnknownJointLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .copied()
            .find(|joint| joint.as_str() == s)
            .ok_or_else(|| UnknownJointLabel(s.to_string()))
    }
}
