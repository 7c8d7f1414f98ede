//! CLI infrastructure for MENACE
//!
//! This module provides the command-line interface for training the agent,
//! playing against it and inspecting its matchboxes.

pub mod commands;
pub mod config;
pub mod output;
