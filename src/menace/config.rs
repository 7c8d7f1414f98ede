//! Learning parameters for a MENACE agent

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::agent::Outcome;

/// Beads added to every move of a game, by outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReinforcementValues {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl ReinforcementValues {
    /// Signed bead delta for an outcome
    pub fn delta(&self, outcome: Outcome) -> i32 {
        match outcome {
            Outcome::AgentWin => self.win,
            Outcome::Draw => self.draw,
            Outcome::OpponentWin => self.loss,
        }
    }
}

impl Default for ReinforcementValues {
    fn default() -> Self {
        // MENACE's original values
        ReinforcementValues {
            win: 3,
            draw: 1,
            loss: -1,
        }
    }
}

/// Configuration for a MENACE agent.
///
/// # Examples
///
/// ```
/// use menace::menace::{MenaceConfig, ReinforcementValues};
///
/// let config = MenaceConfig::default()
///     .with_initial_beads(2)
///     .with_reinforcement(ReinforcementValues { win: 4, draw: 2, loss: -2 });
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenaceConfig {
    /// Beads placed on every legal move of a new matchbox
    pub initial_beads: i32,
    /// Bead deltas applied after each game
    pub reinforcement: ReinforcementValues,
}

impl Default for MenaceConfig {
    fn default() -> Self {
        Self {
            initial_beads: 4,
            reinforcement: ReinforcementValues::default(),
        }
    }
}

impl MenaceConfig {
    /// Set the initial bead count.
    pub fn with_initial_beads(mut self, beads: i32) -> Self {
        self.initial_beads = beads;
        self
    }

    /// Set the reinforcement values.
    pub fn with_reinforcement(mut self, reinforcement: ReinforcementValues) -> Self {
        self.reinforcement = reinforcement;
        self
    }

    /// Check that new moves start alive.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::InvalidConfiguration`] if `initial_beads < 1`.
    pub fn validate(&self) -> crate::Result<()> {
        if self.initial_beads < super::matchbox::MIN_BEADS {
            return Err(crate::Error::InvalidConfiguration {
                message: format!(
                    "initial_beads must be at least {}, got {}",
                    super::matchbox::MIN_BEADS,
                    self.initial_beads
                ),
            });
        }
        Ok(())
    }

    /// Load and validate a configuration from a JSON file.
    ///
    /// Missing fields fall back to their defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| crate::Error::Io {
            operation: format!("open config {}", path.display()),
            source,
        })?;
        let config: Self = serde_json::from_reader(std::io::BufReader::new(file))?;
        config.validate()?;
        Ok(config)
    }
}
