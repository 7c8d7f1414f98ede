//! Training pipeline abstractions
//!
//! This module provides:
//! - The game loop and training driver
//! - Opponent policies to train against
//! - Observers that report on training progress

pub mod observers;
pub mod opponents;
pub mod training;

pub use observers::{
    MetricsObserver, MetricsSummary, ProgressObserver, ReportObserver, format_snapshot,
};
pub use opponents::{DefensiveOpponent, FirstAvailableOpponent, RandomOpponent};
pub use training::{
    AGENT_PLAYER, GameRecord, Snapshot, TrainingConfig, TrainingPipeline, TrainingResult,
    play_game,
};

pub use crate::ports::{Observer, Opponent};
