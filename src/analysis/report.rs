//! Plot-ready views of a summary table
//!
//! The spread report compares how much the deviations vary within made
//! shots against missed shots: one panel per outcome, each plotting the
//! per-trial standard deviation of the three midline deviations against
//! `trial_number`. A panel with no trials carries a placeholder message so
//! a plotting backend can still draw it.

use super::summary::{Metric, SummaryTable, TrialStatistics};
use crate::trial::ShotResult;
use std::fmt;

/// Y-axis label shared by both panels
pub const SPREAD_Y_LABEL: &str = "Standard Deviation of Deviation (meters)";

/// X-axis label shared by both panels
pub const SPREAD_X_LABEL: &str = "Trial Number";

/// One plotted line: `(trial_number, std)` points for a metric.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadSeries {
    /// Metric plotted
    pub metric: Metric,
    /// Legend label
    pub label: &'static str,
    /// Points; trials with an undefined std are skipped
    pub points: Vec<(u32, f64)>,
}

/// Panel body.
#[derive(Debug, Clone, PartialEq)]
pub enum PanelContent {
    /// Lines to draw
    Series(Vec<SpreadSeries>),
    /// No trials for this outcome
    Placeholder(String),
}

/// One subplot of the spread report.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadPanel {
    /// Outcome shown in this panel
    pub result: ShotResult,
    /// Panel title
    pub title: String,
    /// Lines or placeholder
    pub content: PanelContent,
}

/// Made and missed panels, in that order.
#[must_use]
pub fn spread_panels(table: &SummaryTable) -> [SpreadPanel; 2] {
    let split = table.split_by_result();
    [
        panel(ShotResult::Made, &split.made),
        panel(ShotResult::Missed, &split.missed),
    ]
}

fn panel(result: ShotResult, rows: &[&TrialStatistics]) -> SpreadPanel {
    let (title, placeholder) = match result {
        ShotResult::Made => (
            "Spread of Deviations - Made Shots",
            "No made shots in the dataset.",
        ),
        ShotResult::Missed => (
            "Spread of Deviations - Missed Shots",
            "No missed shots in the dataset.",
        ),
    };

    let content = if rows.is_empty() {
        PanelContent::Placeholder(placeholder.to_string())
    } else {
        PanelContent::Series(
            Metric::DEVIATIONS
                .iter()
                .map(|&metric| SpreadSeries {
                    metric,
                    label: legend_label(metric),
                    points: rows
                        .iter()
                        .filter_map(|row| row.stats(metric).std.map(|std| (row.trial_number, std)))
                        .collect(),
                })
                .collect(),
        )
    };

    SpreadPanel {
        result,
        title: title.to_string(),
        content,
    }
}

const fn legend_label(metric: Metric) -> &'static str {
    match metric {
        Metric::ElbowDeviation => "Elbow Deviation",
        Metric::WristDeviation => "Wrist Deviation",
        Metric::HandDeviation => "Hand Deviation",
        Metric::ElbowShoulderDist => "Elbow-Shoulder Distance",
        Metric::WristShoulderDist => "Wrist-Shoulder Distance",
        Metric::HandShoulderDist => "Hand-Shoulder Distance",
    }
}

impl fmt::Display for SpreadPanel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        match &self.content {
            PanelContent::Placeholder(message) => writeln!(f, "  {message}"),
            PanelContent::Series(series) => {
                for line in series {
                    write!(f, "  {:<16}", line.label)?;
                    for (trial_number, std) in &line.points {
                        write!(f, " #{trial_number}={std:.4}")?;
                    }
                    writeln!(f)?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{FrameMetrics, TrialAnalysis, TrialSummarizer};

    fn analysis(id: &str, result: ShotResult, elbow: &[f64]) -> TrialAnalysis {
        TrialAnalysis {
            trial_id: id.to_string(),
            participant_id: "P0001".to_string(),
            result,
            frames: elbow
                .iter()
                .map(|&e| FrameMetrics {
                    frame: 0,
                    time: 0.0,
                    elbow_deviation: e,
                    wrist_deviation: e,
                    hand_deviation: e,
                    elbow_shoulder_dist: e,
                    wrist_shoulder_dist: e,
                    hand_shoulder_dist: e,
                })
                .collect(),
        }
    }

    #[test]
    fn test_missed_panel_placeholder() {
        let table = TrialSummarizer::new()
            .summarize(&[analysis("1", ShotResult::Made, &[1.0, 2.0])])
            .unwrap();
        let [made, missed] = spread_panels(&table);

        match made.content {
            PanelContent::Series(series) => {
                assert_eq!(series.len(), 3);
                assert_eq!(series[0].points.len(), 1);
                assert_eq!(series[0].points[0].0, 1);
            }
            PanelContent::Placeholder(_) => panic!("made panel should have data"),
        }
        assert_eq!(
            missed.content,
            PanelContent::Placeholder("No missed shots in the dataset.".to_string())
        );
        assert!(missed.to_string().contains("No missed shots"));
    }

    #[test]
    fn test_undefined_std_skipped() {
        let table = TrialSummarizer::new()
            .summarize(&[
                analysis("1", ShotResult::Missed, &[1.0]),
                analysis("2", ShotResult::Missed, &[1.0, 3.0]),
            ])
            .unwrap();
        let [_, missed] = spread_panels(&table);
        let PanelContent::Series(series) = missed.content else {
            panic!("missed panel should have data");
        };
        assert_eq!(series[2].points, vec![(2, 2f64.sqrt())]);
    }
}
