//! Observer port - abstraction for training observation and reporting
//!
//! The training pipeline only produces game records and snapshots; how they
//! are shown (progress bars, printed lines, collected metrics) is decided by
//! the observers attached to it.

use std::sync::{Arc, Mutex, PoisonError};

use crate::{
    Result,
    pipeline::{GameRecord, Snapshot},
};

/// Observer trait for monitoring training
///
/// # Event Sequence
///
/// 1. `on_training_start(total_games)` - once
/// 2. For each game:
///    - `on_game_end(game_num, record)`
///    - `on_snapshot(snapshot)` - when a reporting interval closes
/// 3. `on_training_end()` - once
///
/// # Examples
///
/// ```no_run
/// use menace::{
///     pipeline::GameRecord,
///     ports::Observer,
/// };
///
/// struct CountingObserver {
///     games: usize,
/// }
///
/// impl Observer for CountingObserver {
///     fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> menace::Result<()> {
///         self.games += 1;
///         Ok(())
///     }
/// }
/// ```
pub trait Observer: Send {
    /// Called once before the first game.
    fn on_training_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game, once the agent has been updated.
    ///
    /// `game_num` is 0-based.
    fn on_game_end(&mut self, _game_num: usize, _record: &GameRecord) -> Result<()> {
        Ok(())
    }

    /// Called whenever a snapshot is appended to the results.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) -> Result<()> {
        Ok(())
    }

    /// Called once after the last game.
    fn on_training_end(&mut self) -> Result<()> {
        Ok(())
    }
}

/// A shared observer, so the caller can read its state after the pipeline
/// has taken ownership of the box.
impl<T: Observer> Observer for Arc<Mutex<T>> {
    fn on_training_start(&mut self, total_games: usize) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_training_start(total_games)
    }

    fn on_game_end(&mut self, game_num: usize, record: &GameRecord) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_game_end(game_num, record)
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_snapshot(snapshot)
    }

    fn on_training_end(&mut self) -> Result<()> {
        self.lock()
            .unwrap_or_else(PoisonError::into_inner)
            .on_training_end()
    }
}
