//! # brandguard-runtime
//!
//! Async orchestration for the brandguard compliance engine.
//!
//! This crate runs the five category checkers concurrently and manages
//! the optional external analyzer seam:
//! - Parallel fan-out of the checkers via `tokio::join!`
//! - Deterministic fan-in through the aggregator
//! - An injected [`Analyzer`] trait for a generative analyzer, with
//!   silent fallback to the rule-based engine on failure or timeout
//!
//! All evaluation semantics live in `brandguard-core`; this crate only
//! decides which analyzer answers and under what deadline.
//!
//! ## Example
//!
//! ```rust,ignore
//! use brandguard_runtime::{Orchestrator, RuntimeConfig};
//!
//! let orchestrator = Orchestrator::new(RuntimeConfig::default());
//! let report = orchestrator.analyze(&ruleset, &snapshot).await?;
//! ```

pub mod analyzer;
pub mod config;
pub mod orchestrator;

pub use analyzer::{analyze_blocking, Analyzer, AnalyzerError, RuleBasedAnalyzer};
pub use config::{AnalyzerConfig, DeterminismConfig, RuntimeConfig};
pub use orchestrator::{Orchestrator, RuntimeError};
