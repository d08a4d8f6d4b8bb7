//! freethrow - free-throw motion-capture analysis CLI

mod cli;

use anyhow::Context;
use arrow::util::pretty::pretty_format_batches;
use clap::Parser;
use cli::{Cli, Commands};
use freethrow_kinematics::analysis::{spread_panels, DeviationAnalyzer, TrialSummarizer};
use freethrow_kinematics::animation::{
    AnimationConfig, AnimationDriver, JsonLinesRenderer, SceneRecorder, DEFAULT_CONNECTIONS,
};
use freethrow_kinematics::series::TrialSeries;
use freethrow_kinematics::trial::TrialLoader;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // --verbose raises the default level; RUST_LOG still wins
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match cli.command {
        Commands::Summarize { base, participant } => run_summarize(&base, &participant),
        Commands::Animate {
            trial,
            config,
            output,
            dry_run,
        } => run_animate(&trial, config.as_deref(), &output, dry_run),
    }
}

fn run_summarize(base: &Path, participant: &str) -> anyhow::Result<()> {
    let trials = TrialLoader::new(base)
        .load_participant(participant)
        .with_context(|| format!("loading trials for participant {participant}"))?;

    let analyzer = DeviationAnalyzer::new();
    let analyses = trials
        .iter()
        .map(|trial| {
            analyzer
                .analyze_trial(trial)
                .with_context(|| format!("analyzing trial {} of {participant}", trial.trial_id()))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let table = TrialSummarizer::new()
        .summarize(&analyses)
        .with_context(|| format!("summarizing participant {participant}"))?;

    let (made, missed) = table.result_counts();
    println!("Distribution of Results (Make vs. Miss):");
    println!("  made    {made}");
    println!("  missed  {missed}");
    println!();

    let batch = table.to_record_batch()?;
    println!("{}", pretty_format_batches(&[batch])?);
    println!();

    for panel in spread_panels(&table) {
        print!("{panel}");
    }
    Ok(())
}

fn run_animate(
    trial_path: &Path,
    config_path: Option<&Path>,
    output: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let config = match config_path {
        Some(path) => AnimationConfig::load(path)
            .with_context(|| format!("loading animation config {}", path.display()))?,
        None => AnimationConfig::default(),
    };

    let trial = TrialLoader::load_trial(trial_path)
        .with_context(|| format!("loading trial {}", trial_path.display()))?;
    let series = TrialSeries::from_trial(&trial)
        .with_context(|| format!("reshaping trial {}", trial.trial_id()))?;
    let mut driver = AnimationDriver::new(&series, DEFAULT_CONNECTIONS.to_vec(), config)
        .with_context(|| format!("preparing animation for trial {}", trial.trial_id()))?;

    // No court-outline backend ships with the CLI
    if dry_run {
        let mut recorder = SceneRecorder::new();
        driver.run(&mut recorder, None)?;
        info!(frames = recorder.frames_rendered(), "dry run complete");
    } else {
        let file = File::create(output)
            .with_context(|| format!("creating frame stream {}", output.display()))?;
        let mut renderer = JsonLinesRenderer::new(BufWriter::new(file));
        driver.run(&mut renderer, None)?;
        info!(
            frames = driver.frame_count(),
            output = %output.display(),
            "frame stream written"
        );
    }
    Ok(())
}
