//! Orchestrator module - single, batch and listing runs

pub mod runner;

pub use runner::*;
