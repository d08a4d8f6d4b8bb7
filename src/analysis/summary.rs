//! Trial summarization - per-trial aggregates over frame metrics
//!
//! Each trial in a batch becomes one [`TrialStatistics`] row with max, mean
//! and sample standard deviation of every distance series. Rows keep the
//! input batch order and `trial_number` is the 1-based batch position.
//!
//! Standard deviation uses the N-1 denominator. It is undefined for a
//! single-frame trial and reported as `None` (a null in the Arrow export).

use super::deviation::{FrameMetrics, TrialAnalysis};
use crate::trial::ShotResult;
use crate::{Error, Result};
use arrow::array::{ArrayRef, Float64Array, StringArray, UInt32Array};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

/// Distance series tracked per frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Metric {
    /// Right elbow to shoulder midpoint
    ElbowDeviation,
    /// Right wrist to shoulder midpoint
    WristDeviation,
    /// Right hand to shoulder midpoint
    HandDeviation,
    /// Right elbow to right shoulder
    ElbowShoulderDist,
    /// Right wrist to right shoulder
    WristShoulderDist,
    /// Right hand to right shoulder
    HandShoulderDist,
}

impl Metric {
    /// All metrics, in column order.
    pub const ALL: [Self; 6] = [
        Self::ElbowDeviation,
        Self::WristDeviation,
        Self::HandDeviation,
        Self::ElbowShoulderDist,
        Self::WristShoulderDist,
        Self::HandShoulderDist,
    ];

    /// The three midline deviation series.
    pub const DEVIATIONS: [Self; 3] = [Self::ElbowDeviation, Self::WristDeviation, Self::HandDeviation];

    /// Column-name stem (`elbow_deviation`, ...).
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::ElbowDeviation => "elbow_deviation",
            Self::WristDeviation => "wrist_deviation",
            Self::HandDeviation => "hand_deviation",
            Self::ElbowShoulderDist => "elbow_shoulder_dist",
            Self::WristShoulderDist => "wrist_shoulder_dist",
            Self::HandShoulderDist => "hand_shoulder_dist",
        }
    }

    /// Value of this metric in one frame.
    #[must_use]
    pub const fn of(self, frame: &FrameMetrics) -> f64 {
        match self {
            Self::ElbowDeviation => frame.elbow_deviation,
            Self::WristDeviation => frame.wrist_deviation,
            Self::HandDeviation => frame.hand_deviation,
            Self::ElbowShoulderDist => frame.elbow_shoulder_dist,
            Self::WristShoulderDist => frame.wrist_shoulder_dist,
            Self::HandShoulderDist => frame.hand_shoulder_dist,
        }
    }
}

/// Max / mean / sample std of one series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesStats {
    /// Largest value
    pub max: f64,
    /// Arithmetic mean
    pub mean: f64,
    /// Sample standard deviation (N-1); `None` with fewer than two samples
    pub std: Option<f64>,
}

impl SeriesStats {
    /// Aggregate a non-empty series. Returns `None` for an empty one.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn from_values(values: &[f64]) -> Option<Self> {
        if values.is_empty() {
            return None;
        }

        let n = values.len() as f64;
        let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let mean = values.iter().sum::<f64>() / n;
        let std = (values.len() > 1).then(|| {
            let sum_sq: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
            (sum_sq / (n - 1.0)).sqrt()
        });

        Some(Self { max, mean, std })
    }
}

/// One summary row per trial.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrialStatistics {
    /// 1-based position in the input batch
    pub trial_number: u32,
    /// Trial identifier
    pub trial_id: String,
    /// Shot outcome
    pub result: ShotResult,
    /// Frames aggregated
    pub frame_count: usize,
    stats: [SeriesStats; 6],
}

impl TrialStatistics {
    /// Aggregates for `metric`.
    #[must_use]
    pub fn stats(&self, metric: Metric) -> SeriesStats {
        self.stats[metric as usize]
    }
}

/// Made / missed partition of a summary table.
#[derive(Debug, Clone, Default)]
pub struct ResultSplit<'a> {
    /// Rows for made shots, in table order
    pub made: Vec<&'a TrialStatistics>,
    /// Rows for missed shots, in table order
    pub missed: Vec<&'a TrialStatistics>,
}

/// Ordered per-trial statistics for one batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryTable {
    participant_id: Option<String>,
    generated_at: DateTime<Utc>,
    rows: Vec<TrialStatistics>,
}

impl SummaryTable {
    /// Participant of the first trial in the batch, if any.
    #[must_use]
    pub fn participant_id(&self) -> Option<&str> {
        self.participant_id.as_deref()
    }

    /// When the table was computed.
    #[must_use]
    pub const fn generated_at(&self) -> DateTime<Utc> {
        self.generated_at
    }

    /// Rows in batch order.
    #[must_use]
    pub fn rows(&self) -> &[TrialStatistics] {
        &self.rows
    }

    /// Number of rows.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// True for an empty batch.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Partition rows by shot result. Every row lands in exactly one side.
    #[must_use]
    pub fn split_by_result(&self) -> ResultSplit<'_> {
        let (made, missed): (Vec<_>, Vec<_>) = self
            .rows
            .iter()
            .partition(|row| row.result == ShotResult::Made);
        ResultSplit { made, missed }
    }

    /// `(made, missed)` counts.
    #[must_use]
    pub fn result_counts(&self) -> (usize, usize) {
        let made = self
            .rows
            .iter()
            .filter(|row| row.result == ShotResult::Made)
            .count();
        (made, self.rows.len() - made)
    }

    /// Arrow schema of [`SummaryTable::to_record_batch`].
    #[must_use]
    pub fn schema() -> Schema {
        let mut fields = vec![
            Field::new("trial_number", DataType::UInt32, false),
            Field::new("trial_id", DataType::Utf8, false),
            Field::new("result", DataType::Utf8, false),
        ];
        for metric in Metric::ALL {
            fields.push(Field::new(format!("max_{}", metric.name()), DataType::Float64, false));
            fields.push(Field::new(format!("avg_{}", metric.name()), DataType::Float64, false));
            fields.push(Field::new(format!("std_{}", metric.name()), DataType::Float64, true));
        }
        Schema::new(fields)
    }

    /// Columnar form of the table.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Arrow`] if the batch cannot be assembled.
    pub fn to_record_batch(&self) -> Result<RecordBatch> {
        let mut columns: Vec<ArrayRef> = vec![
            Arc::new(UInt32Array::from_iter_values(
                self.rows.iter().map(|row| row.trial_number),
            )),
            Arc::new(StringArray::from_iter_values(
                self.rows.iter().map(|row| row.trial_id.as_str()),
            )),
            Arc::new(StringArray::from_iter_values(
                self.rows.iter().map(|row| row.result.as_str()),
            )),
        ];
        for metric in Metric::ALL {
            let stats: Vec<SeriesStats> = self.rows.iter().map(|row| row.stats(metric)).collect();
            columns.push(Arc::new(Float64Array::from_iter_values(stats.iter().map(|s| s.max))));
            columns.push(Arc::new(Float64Array::from_iter_values(stats.iter().map(|s| s.mean))));
            columns.push(Arc::new(stats.iter().map(|s| s.std).collect::<Float64Array>()));
        }

        Ok(RecordBatch::try_new(Arc::new(Self::schema()), columns)?)
    }
}

/// Aggregates per-frame metrics into a [`SummaryTable`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TrialSummarizer;

impl TrialSummarizer {
    /// Create a summarizer.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Summarize a batch of analysed trials, preserving batch order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyTrial`] if any trial has no frames.
    pub fn summarize(&self, analyses: &[TrialAnalysis]) -> Result<SummaryTable> {
        let rows = analyses
            .iter()
            .zip(1u32..)
            .map(|(analysis, trial_number)| Self::summarize_trial(trial_number, analysis))
            .collect::<Result<Vec<_>>>()?;

        let table = SummaryTable {
            participant_id: analyses.first().map(|a| a.participant_id.clone()),
            generated_at: Utc::now(),
            rows,
        };
        let (made, missed) = table.result_counts();
        info!(trials = table.len(), made, missed, "summarized trial batch");
        Ok(table)
    }

    fn summarize_trial(trial_number: u32, analysis: &TrialAnalysis) -> Result<TrialStatistics> {
        let empty = || Error::EmptyTrial {
            trial_id: analysis.trial_id.clone(),
        };

        let mut stats = [SeriesStats {
            max: 0.0,
            mean: 0.0,
            std: None,
        }; 6];
        for (slot, metric) in stats.iter_mut().zip(Metric::ALL) {
            let values: Vec<f64> = analysis.frames.iter().map(|f| metric.of(f)).collect();
            *slot = SeriesStats::from_values(&values).ok_or_else(empty)?;
        }

        Ok(TrialStatistics {
            trial_number,
            trial_id: analysis.trial_id.clone(),
            result: analysis.result,
            frame_count: analysis.frames.len(),
            stats,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use arrow::array::Array;

    fn metrics(elbow: &[f64]) -> Vec<FrameMetrics> {
        elbow
            .iter()
            .zip(0u32..)
            .map(|(&e, frame)| FrameMetrics {
                frame,
                time: f64::from(frame) / 30.0,
                elbow_deviation: e,
                wrist_deviation: e * 2.0,
                hand_deviation: e * 3.0,
                elbow_shoulder_dist: e,
                wrist_shoulder_dist: e,
                hand_shoulder_dist: e,
            })
            .collect()
    }

    fn analysis(id: &str, result: ShotResult, elbow: &[f64]) -> TrialAnalysis {
        TrialAnalysis {
            trial_id: id.to_string(),
            participant_id: "P0001".to_string(),
            result,
            frames: metrics(elbow),
        }
    }

    #[test]
    fn test_series_stats_sample_std() {
        let stats = SeriesStats::from_values(&[2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0]).unwrap();
        assert!((stats.max - 9.0).abs() < f64::EPSILON);
        assert!((stats.mean - 5.0).abs() < f64::EPSILON);
        // Sum of squared deviations = 32, N-1 = 7
        assert!((stats.std.unwrap() - (32.0f64 / 7.0).sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_series_stats_single_and_empty() {
        let single = SeriesStats::from_values(&[1.5]).unwrap();
        assert!((single.max - 1.5).abs() < f64::EPSILON);
        assert!(single.std.is_none());
        assert!(SeriesStats::from_values(&[]).is_none());
    }

    #[test]
    fn test_summarize_preserves_order_and_numbers() {
        let batch = vec![
            analysis("b", ShotResult::Missed, &[1.0, 3.0]),
            analysis("a", ShotResult::Made, &[2.0, 2.0]),
        ];
        let table = TrialSummarizer::new().summarize(&batch).unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.participant_id(), Some("P0001"));
        assert_eq!(table.rows()[0].trial_id, "b");
        assert_eq!(table.rows()[0].trial_number, 1);
        assert_eq!(table.rows()[1].trial_number, 2);

        let wrist = table.rows()[0].stats(Metric::WristDeviation);
        assert!((wrist.max - 6.0).abs() < f64::EPSILON);
        assert!((wrist.mean - 4.0).abs() < f64::EPSILON);
        assert!((wrist.std.unwrap() - 8f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_empty_trial_rejected() {
        let batch = vec![
            analysis("ok", ShotResult::Made, &[1.0]),
            analysis("empty", ShotResult::Made, &[]),
        ];
        let err = TrialSummarizer::new().summarize(&batch).unwrap_err();
        assert!(matches!(err, Error::EmptyTrial { ref trial_id } if trial_id == "empty"));
    }

    #[test]
    fn test_split_and_counts() {
        let batch = vec![
            analysis("1", ShotResult::Made, &[1.0]),
            analysis("2", ShotResult::Missed, &[1.0]),
            analysis("3", ShotResult::Made, &[1.0]),
        ];
        let table = TrialSummarizer::new().summarize(&batch).unwrap();
        let split = table.split_by_result();

        assert_eq!(split.made.iter().map(|r| r.trial_number).collect::<Vec<_>>(), vec![1, 3]);
        assert_eq!(split.missed.iter().map(|r| r.trial_number).collect::<Vec<_>>(), vec![2]);
        assert_eq!(table.result_counts(), (2, 1));
    }

    #[test]
    fn test_record_batch_shape() {
        let batch = vec![
            analysis("1", ShotResult::Made, &[1.0, 2.0]),
            analysis("2", ShotResult::Missed, &[1.0]),
        ];
        let table = TrialSummarizer::new().summarize(&batch).unwrap();
        let record_batch = table.to_record_batch().unwrap();

        assert_eq!(record_batch.num_rows(), 2);
        assert_eq!(record_batch.num_columns(), 3 + 6 * 3);
        let std_col = record_batch
            .column_by_name("std_elbow_deviation")
            .unwrap()
            .as_any()
            .downcast_ref::<Float64Array>()
            .unwrap();
        assert!(std_col.is_valid(0));
        assert!(std_col.is_null(1));
    }
}
