//! Animation configuration
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```json
//! { "xbuffer": 3.0, "show_court": false }
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Viewport, styling and playback settings for [`super::AnimationDriver`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationConfig {
    /// Half-width of the viewport x-extent around the hip center
    pub xbuffer: f64,
    /// Half-width of the viewport y-extent around the hip center
    pub ybuffer: f64,
    /// Fixed upper z-limit (floor is 0)
    pub zlim: f64,
    /// Camera elevation in degrees
    pub elev: f64,
    /// Camera azimuth in degrees
    pub azim: f64,
    /// Skeleton line color
    pub player_color: String,
    /// Skeleton line width
    pub player_line_width: f64,
    /// Ball marker color
    pub ball_color: String,
    /// Ball marker size
    pub ball_size: f64,
    /// Draw the court outline if a decorator is available
    pub show_court: bool,
    /// Logical playback rate
    pub playback_fps: u32,
    /// Encoded output rate
    pub output_fps: u32,
    /// Grid points per side of each analysis-plane mesh
    pub plane_resolution: usize,
    /// Target media file for the encoder
    pub output_path: PathBuf,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            xbuffer: 4.0,
            ybuffer: 4.0,
            zlim: 8.0,
            elev: 15.0,
            azim: 40.0,
            player_color: "purple".to_string(),
            player_line_width: 2.0,
            ball_color: "#ee6730".to_string(),
            ball_size: 20.0,
            show_court: true,
            playback_fps: 30,
            output_fps: 60,
            plane_resolution: 10,
            output_path: PathBuf::from("SaggitalAndCoronalPlanes.mp4"),
        }
    }
}

impl AnimationConfig {
    /// Create a builder starting from the defaults.
    #[must_use]
    pub fn builder() -> AnimationConfigBuilder {
        AnimationConfigBuilder::default()
    }

    /// Load overrides from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] / [`Error::Json`] if the file cannot be read or
    /// parsed, or [`Error::Other`] if the values fail validation.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check that extents, rates and mesh resolution are usable.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Other`] describing the first invalid field.
    pub fn validate(&self) -> Result<()> {
        for (name, value) in [("xbuffer", self.xbuffer), ("ybuffer", self.ybuffer), ("zlim", self.zlim)] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::Other(format!(
                    "{name} must be a positive finite number, got {value}"
                )));
            }
        }
        if self.playback_fps == 0 || self.output_fps == 0 {
            return Err(Error::Other("frame rates must be non-zero".to_string()));
        }
        if self.plane_resolution < 2 {
            return Err(Error::Other(format!(
                "plane_resolution must be at least 2, got {}",
                self.plane_resolution
            )));
        }
        Ok(())
    }

    /// Milliseconds each logical frame is shown for.
    #[must_use]
    pub fn frame_interval_ms(&self) -> f64 {
        1000.0 / f64::from(self.playback_fps)
    }
}

/// Builder for `AnimationConfig`.
#[derive(Debug, Default)]
pub struct AnimationConfigBuilder {
    config: AnimationConfig,
}

impl AnimationConfigBuilder {
    /// Set the x and y viewport buffers.
    #[must_use]
    pub const fn buffers(mut self, xbuffer: f64, ybuffer: f64) -> Self {
        self.config.xbuffer = xbuffer;
        self.config.ybuffer = ybuffer;
        self
    }

    /// Set the fixed z-limit.
    #[must_use]
    pub const fn zlim(mut self, zlim: f64) -> Self {
        self.config.zlim = zlim;
        self
    }

    /// Set the camera angles.
    #[must_use]
    pub const fn view(mut self, elev: f64, azim: f64) -> Self {
        self.config.elev = elev;
        self.config.azim = azim;
        self
    }

    /// Set the skeleton line style.
    #[must_use]
    pub fn player_style(mut self, color: impl Into<String>, line_width: f64) -> Self {
        self.config.player_color = color.into();
        self.config.player_line_width = line_width;
        self
    }

    /// Set the ball marker style.
    #[must_use]
    pub fn ball_style(mut self, color: impl Into<String>, size: f64) -> Self {
        self.config.ball_color = color.into();
        self.config.ball_size = size;
        self
    }

    /// Enable or disable the court outline.
    #[must_use]
    pub const fn show_court(mut self, show_court: bool) -> Self {
        self.config.show_court = show_court;
        self
    }

    /// Set playback and encoded frame rates.
    #[must_use]
    pub const fn frame_rates(mut self, playback_fps: u32, output_fps: u32) -> Self {
        self.config.playback_fps = playback_fps;
        self.config.output_fps = output_fps;
        self
    }

    /// Set the analysis-plane grid resolution.
    #[must_use]
    pub const fn plane_resolution(mut self, plane_resolution: usize) -> Self {
        self.config.plane_resolution = plane_resolution;
        self
    }

    /// Set the output media path.
    #[must_use]
    pub fn output_path(mut self, output_path: impl Into<PathBuf>) -> Self {
        self.config.output_path = output_path.into();
        self
    }

    /// Build and validate the `AnimationConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Other`] if a value fails [`AnimationConfig::validate`].
    pub fn build(self) -> Result<AnimationConfig> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AnimationConfig::default();
        assert!((config.xbuffer - 4.0).abs() < f64::EPSILON);
        assert!((config.zlim - 8.0).abs() < f64::EPSILON);
        assert_eq!(config.playback_fps, 30);
        assert_eq!(config.output_fps, 60);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config: AnimationConfig =
            serde_json::from_str(r#"{"xbuffer": 2.5, "show_court": false}"#).unwrap();
        assert!((config.xbuffer - 2.5).abs() < f64::EPSILON);
        assert!((config.ybuffer - 4.0).abs() < f64::EPSILON);
        assert!(!config.show_court);
        assert_eq!(config.ball_color, "#ee6730");
    }

    #[test]
    fn test_builder_validates() {
        assert!(AnimationConfig::builder().buffers(0.0, 4.0).build().is_err());
        assert!(AnimationConfig::builder().plane_resolution(1).build().is_err());
        assert!(AnimationConfig::builder().frame_rates(0, 60).build().is_err());

        let config = AnimationConfig::builder()
            .buffers(3.0, 5.0)
            .zlim(6.0)
            .show_court(false)
            .build()
            .unwrap();
        assert!((config.ybuffer - 5.0).abs() < f64::EPSILON);
        assert!(!config.show_court);
    }

    #[test]
    fn test_frame_interval() {
        let config = AnimationConfig::default();
        assert!((config.frame_interval_ms() - 1000.0 / 30.0).abs() < 1e-12);
    }
}
