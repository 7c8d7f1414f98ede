//! Train command - Train MENACE against an opponent and report progress

use std::{
    io::Write,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, PoisonError},
};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;

use crate::{
    cli::{
        config::{AgentArgs, DEFAULT_REPORT_EVERY, DEFAULT_TRAINING_GAMES},
        output::{format_number, print_kv, print_section, print_totals},
    },
    menace::{AgentStats, MenaceConfig},
    pipeline::{
        MetricsObserver, MetricsSummary, Observer, ProgressObserver, ReportObserver,
        TrainingConfig, TrainingPipeline, TrainingResult,
    },
};

#[derive(Debug, Serialize)]
struct TrainingSummaryFile<'a> {
    training: &'a TrainingResult,
    agent: AgentStats,
    metrics: MetricsSummary,
    metadata: SummaryMetadata,
}

#[derive(Debug, Serialize)]
struct SummaryMetadata {
    opponent: String,
    config: MenaceConfig,
    report_every: usize,
    seed: u64,
}

/// Resolve where the summary goes.
///
/// A trailing separator means a directory (`training_summary.json` inside it);
/// anything without a `.json` extension gets one.
pub fn sanitize_summary_path(raw: &Path) -> PathBuf {
    let mut normalized = raw.to_path_buf();
    let raw_str = raw.as_os_str().to_string_lossy();

    if raw_str.ends_with(std::path::MAIN_SEPARATOR) || normalized.file_name().is_none() {
        normalized.push("training_summary.json");
        return normalized;
    }

    match normalized.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("json") => normalized,
        _ => {
            normalized.set_extension("json");
            normalized
        }
    }
}

/// Observer that prints snapshot lines to `writer`, with or without a bar.
fn snapshot_observer<W: Write + Send + 'static>(
    no_progress: bool,
    writer: W,
) -> Box<dyn Observer> {
    if no_progress {
        Box::new(ReportObserver::new(writer))
    } else {
        Box::new(ProgressObserver::with_writer(writer))
    }
}

#[derive(Parser, Debug)]
#[command(about = "Train MENACE", allow_negative_numbers = true)]
pub struct TrainArgs {
    /// Number of training games
    #[arg(long, short = 'g', default_value_t = DEFAULT_TRAINING_GAMES)]
    pub games: usize,

    /// Games between snapshot lines
    #[arg(long, default_value_t = DEFAULT_REPORT_EVERY)]
    pub report_every: usize,

    /// Optional path for writing a summary JSON file
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// Print snapshot lines instead of a progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    #[command(flatten)]
    pub agent: AgentArgs,
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let seed = args.agent.resolve_seed();
    let (mut agent, mut opponent) = args.agent.build(seed)?;

    let summary_target = args.summary.as_ref().map(|raw| {
        let sanitized = sanitize_summary_path(raw);
        let normalized = sanitized != *raw;
        (sanitized, normalized)
    });

    print_section("MENACE Training");
    print_kv("Games", &format_number(args.games));
    print_kv("Opponent", opponent.name());
    print_kv("Initial beads", &agent.config().initial_beads.to_string());
    let reinforcement = agent.config().reinforcement;
    print_kv(
        "Reinforcement",
        &format!(
            "win {:+}, draw {:+}, loss {:+}",
            reinforcement.win, reinforcement.draw, reinforcement.loss
        ),
    );
    print_kv("Seed", &seed.to_string());
    println!();

    let metrics = Arc::new(Mutex::new(MetricsObserver::new()));
    let mut pipeline = TrainingPipeline::new(TrainingConfig {
        num_games: args.games,
        report_every: args.report_every,
    })
    .with_observer(snapshot_observer(args.no_progress, std::io::stdout()))
    .with_observer(Box::new(Arc::clone(&metrics)));

    let result = pipeline
        .run(&mut agent, opponent.as_mut())
        .context("training failed")?;
    let metrics = metrics
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .summary();

    print_section("Training Complete");
    print_totals(&result.totals);
    print_kv("Avg game length", &format!("{:.2} moves", metrics.avg_game_length));
    let stats = agent.stats();
    print_kv("Matchboxes", &format_number(stats.total_matchboxes));
    print_kv("Total beads", &stats.total_beads.to_string());
    print_kv("Avg entropy", &format!("{:.3} nats", stats.avg_entropy));

    if let Some((summary_path, normalized)) = summary_target {
        if normalized {
            println!(
                "\nNormalizing summary path to {}",
                summary_path.display()
            );
        }

        if let Some(parent) = summary_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }

        let summary = TrainingSummaryFile {
            training: &result,
            agent: stats,
            metrics,
            metadata: SummaryMetadata {
                opponent: opponent.name().to_string(),
                config: *agent.config(),
                report_every: args.report_every,
                seed,
            },
        };

        let file = std::fs::File::create(&summary_path)
            .with_context(|| format!("failed to create {}", summary_path.display()))?;
        serde_json::to_writer_pretty(file, &summary)?;
        println!("\nSummary written to {}", summary_path.display());
    }

    Ok(())
}
