//! MENACE learning system
//!
//! Matchboxes keyed by canonical position, bead-weighted move selection and
//! the post-game reinforcement rule.

pub mod agent;
pub mod config;
pub mod matchbox;

pub use agent::{AgentStats, HistoryEntry, MenaceAgent, Outcome};
pub use config::{MenaceConfig, ReinforcementValues};
pub use matchbox::{MIN_BEADS, Matchbox};
