//! Subcommands of the `menace` binary

pub mod inspect;
pub mod play;
pub mod train;
