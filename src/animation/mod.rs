//! Visualization path: skeleton, ball, deviation lines and analysis planes
//!
//! [`AnimationDriver`] turns a [`crate::series::TrialSeries`] into a stream of
//! per-frame [`RenderCommands`]. Drawing and video encoding belong to a
//! [`Renderer`]; the court outline is an optional [`CourtDecorator`].
//!
//! ## Usage
//!
//! ```rust
//! use freethrow_kinematics::animation::{
//!     AnimationConfig, AnimationDriver, SceneRecorder, DEFAULT_CONNECTIONS,
//! };
//! use freethrow_kinematics::geometry::Point3;
//! use freethrow_kinematics::series::TrialSeries;
//! use freethrow_kinematics::trial::{Frame, JointName, ShotResult, Trial};
//!
//! # fn main() -> freethrow_kinematics::Result<()> {
//! let frame = JointName::ALL
//!     .iter()
//!     .fold(Frame::new(0, 0.0, Point3::new(0.0, 0.0, 2.0)), |f, &joint| {
//!         f.with_joint(joint, Point3::new(0.0, 0.0, 1.0))
//!     });
//! let trial = Trial::new("0001", "P0001", ShotResult::Made, vec![frame]);
//! let series = TrialSeries::from_trial(&trial)?;
//!
//! let config = AnimationConfig::builder().show_court(false).build()?;
//! let mut driver = AnimationDriver::new(&series, DEFAULT_CONNECTIONS.to_vec(), config)?;
//! let mut recorder = SceneRecorder::new();
//! driver.run(&mut recorder, None)?;
//!
//! assert_eq!(recorder.frames_rendered(), 1);
//! # Ok(())
//! # }
//! ```

mod config;
mod connections;
mod driver;
mod renderer;
pub mod scene;

pub use config::{AnimationConfig, AnimationConfigBuilder};
pub use connections::{default_connections, Connection, DEFAULT_CONNECTIONS};
pub use driver::{AnimationDriver, DriverState};
pub use renderer::{CourtDecorator, JsonLinesRenderer, Renderer, SceneRecorder};
pub use scene::{
    DeviationLine, PlaneKind, RenderCommand, RenderCommands, SceneSetup, Segment, SurfaceId,
    SurfaceMesh, Viewport,
};
