//! Statistics path: per-frame deviation metrics and per-trial aggregates
//!
//! ```text
//! Trial ──> TrialSeries ──> DeviationAnalyzer ──> TrialAnalysis (N per batch)
//!                                                      │
//!                                  TrialSummarizer <───┘
//!                                        │
//!                                        └──> SummaryTable ──> RecordBatch / spread panels
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use freethrow_kinematics::analysis::{DeviationAnalyzer, TrialSummarizer};
//! use freethrow_kinematics::trial::TrialLoader;
//!
//! # fn main() -> freethrow_kinematics::Result<()> {
//! let trials = TrialLoader::new("data").load_participant("P0001")?;
//! let analyzer = DeviationAnalyzer::new();
//! let analyses = trials
//!     .iter()
//!     .map(|trial| analyzer.analyze_trial(trial))
//!     .collect::<freethrow_kinematics::Result<Vec<_>>>()?;
//!
//! let table = TrialSummarizer::new().summarize(&analyses)?;
//! let (made, missed) = table.result_counts();
//! println!("made={made} missed={missed}");
//! # Ok(())
//! # }
//! ```

mod deviation;
pub mod report;
mod summary;

pub use deviation::{DeviationAnalyzer, FrameMetrics, TrialAnalysis};
pub use report::{spread_panels, PanelContent, SpreadPanel, SpreadSeries};
pub use summary::{Metric, ResultSplit, SeriesStats, SummaryTable, TrialStatistics, TrialSummarizer};
