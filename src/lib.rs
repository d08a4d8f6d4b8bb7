//! # freethrow-kinematics: Free-Throw Motion-Capture Analysis
//!
//! Ingests per-trial 3D motion-capture recordings of a free-throw shooter
//! (joint positions plus ball position per frame) and derives:
//!
//! - **Deviation metrics**: per-frame distances of the right elbow, wrist and
//!   hand from the shoulder midline, aggregated per trial for made vs. missed
//!   comparison
//! - **Animation**: a frame-by-frame render command stream for the skeleton,
//!   the ball, the deviation lines and the sagittal/coronal planes, with the
//!   camera following the hips
//!
//! ## Data Flow
//!
//! ```text
//! TrialLoader ──> TrialSeries ─┬─> DeviationAnalyzer ──> TrialSummarizer   (statistics)
//!                              └─> AnimationDriver ──> Renderer             (visualization)
//! ```
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use freethrow_kinematics::analysis::{DeviationAnalyzer, TrialSummarizer};
//! use freethrow_kinematics::trial::TrialLoader;
//!
//! let trials = TrialLoader::new("data").load_participant("P0001")?;
//! let analyzer = DeviationAnalyzer::new();
//! let analyses = trials
//!     .iter()
//!     .map(|t| analyzer.analyze_trial(t))
//!     .collect::<freethrow_kinematics::Result<Vec<_>>>()?;
//! let table = TrialSummarizer::new().summarize(&analyses)?;
//! println!("{} trials summarized", table.len());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]

pub mod analysis;
pub mod animation;
pub mod error;
pub mod geometry;
pub mod series;
pub mod trial;

pub use error::{Error, Result};
