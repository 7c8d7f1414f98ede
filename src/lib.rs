//! MENACE (Matchbox Educable Noughts And Crosses Engine) implementation
//!
//! This crate provides:
//! - Tic-Tac-Toe rules and symmetry canonicalization
//! - The MENACE learning agent with matchbox-based reinforcement
//! - A training driver with pluggable opponents and observers
//! - A command-line front end

pub mod cli;
pub mod error;
pub mod menace;
pub mod pipeline;
pub mod ports;
pub mod tictactoe;
pub mod types;
pub mod utils;

pub use error::{Error, Result};
pub use menace::{MenaceAgent, MenaceConfig, Outcome};
pub use types::CanonicalKey;
