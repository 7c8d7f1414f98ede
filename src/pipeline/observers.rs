//! Observer implementations for training
//!
//! Provides concrete observer implementations for monitoring training progress.

use std::io::Write;

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};

use super::training::{GameRecord, Snapshot};
use crate::{Result, menace::Outcome, ports::Observer};

/// Progress bar observer - Shows training progress
///
/// Snapshot lines go to `writer` whether or not the bar is drawn, so they
/// survive output redirection.
pub struct ProgressObserver<W: Write + Send> {
    progress_bar: Option<ProgressBar>,
    writer: W,
    wins: usize,
    draws: usize,
    losses: usize,
}

impl<W: Write + Send> ProgressObserver<W> {
    /// Create a progress observer reporting snapshots to `writer`
    pub fn with_writer(writer: W) -> Self {
        Self {
            progress_bar: None,
            writer,
            wins: 0,
            draws: 0,
            losses: 0,
        }
    }

    fn message(&self) -> String {
        format!("{} D:{} L:{}", self.wins, self.draws, self.losses)
    }
}

impl<W: Write + Send> Observer for ProgressObserver<W> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (W:{msg})")
                .map_err(|e| crate::Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        match record.outcome {
            Outcome::AgentWin => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::OpponentWin => self.losses += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.message());
        }
        Ok(())
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        let line = format_snapshot(snapshot);
        let writer = &mut self.writer;
        match &self.progress_bar {
            Some(pb) => pb.suspend(|| writeln!(writer, "{line}"))?,
            None => writeln!(writer, "{line}")?,
        }
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.message());
        }
        self.writer.flush()?;
        Ok(())
    }
}

/// Prints one line per snapshot, e.g.
/// `500 games: win 0.612, draw 0.080, loss 0.308`
pub struct ReportObserver<W: Write + Send> {
    writer: W,
}

impl<W: Write + Send> ReportObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Observer for ReportObserver<W> {
    fn on_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        writeln!(self.writer, "{}", format_snapshot(snapshot))?;
        Ok(())
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Render a snapshot as a single report line.
pub fn format_snapshot(snapshot: &Snapshot) -> String {
    format!(
        "{} games: win {:.3}, draw {:.3}, loss {:.3}",
        snapshot.games, snapshot.win_rate, snapshot.draw_rate, snapshot.loss_rate
    )
}

/// Metrics observer - Tracks training metrics
pub struct MetricsObserver {
    wins: usize,
    draws: usize,
    losses: usize,
    total_games: usize,
    move_counts: Vec<usize>,
}

impl MetricsObserver {
    /// Create a new metrics observer
    pub fn new() -> Self {
        Self {
            wins: 0,
            draws: 0,
            losses: 0,
            total_games: 0,
            move_counts: Vec::new(),
        }
    }

    fn rate(&self, count: usize) -> f64 {
        if self.total_games == 0 {
            0.0
        } else {
            count as f64 / self.total_games as f64
        }
    }

    /// Get current win rate
    pub fn win_rate(&self) -> f64 {
        self.rate(self.wins)
    }

    /// Get current draw rate
    pub fn draw_rate(&self) -> f64 {
        self.rate(self.draws)
    }

    /// Get current loss rate
    pub fn loss_rate(&self) -> f64 {
        self.rate(self.losses)
    }

    /// Get average game length in plies
    pub fn avg_game_length(&self) -> f64 {
        if self.move_counts.is_empty() {
            0.0
        } else {
            self.move_counts.iter().sum::<usize>() as f64 / self.move_counts.len() as f64
        }
    }

    /// Get metrics summary
    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games,
            wins: self.wins,
            draws: self.draws,
            losses: self.losses,
            win_rate: self.win_rate(),
            draw_rate: self.draw_rate(),
            loss_rate: self.loss_rate(),
            avg_game_length: self.avg_game_length(),
        }
    }
}

/// Summary of training metrics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    pub avg_game_length: f64,
}

impl Default for MetricsObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, record: &GameRecord) -> Result<()> {
        self.total_games += 1;
        self.move_counts.push(record.moves.len());
        match record.outcome {
            Outcome::AgentWin => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::OpponentWin => self.losses += 1,
        }
        Ok(())
    }
}
