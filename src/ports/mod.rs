//! Ports (trait boundaries) for external collaborators.
//!
//! The training loop talks to opponents and reporting sinks only through
//! these traits, so new policies and observers plug in without touching the
//! learning core.

pub mod observer;
pub mod opponent;

pub use observer::Observer;
pub use opponent::Opponent;
