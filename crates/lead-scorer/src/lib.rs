//! Lead intent scoring: rule heuristics merged with AI intent classification.

pub mod config;
pub mod error;
pub mod scoring;
pub mod telemetry;
