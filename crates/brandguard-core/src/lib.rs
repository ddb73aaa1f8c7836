//! # brandguard-core
//!
//! Deterministic brand-compliance evaluation engine.
//!
//! Given a [`RuleSet`] (the brand guidelines) and a [`DesignSnapshot`]
//! (a structured extraction of a design), the engine answers: does this
//! design follow the guidelines, and how far off is it?
//!
//! ## Key Guarantees
//!
//! 1. **Deterministic**: same inputs always produce the same report
//! 2. **Rule-based**: no model calls, no network, no I/O in the checkers
//! 3. **Partial-failure tolerant**: one malformed color or font never
//!    aborts scoring of the rest
//! 4. **Parallel-safe**: checkers evaluate independently with no shared
//!    state
//!
//! ## Example
//!
//! ```rust,ignore
//! use brandguard_core::{analyze, DesignSnapshot, RuleSet};
//!
//! let ruleset = RuleSet::from_yaml_file("brand.yaml")?;
//! let snapshot = DesignSnapshot::from_json_file("design.json")?;
//! let report = analyze(&ruleset, &snapshot)?;
//!
//! println!("{} ({})", report.compliance_score, report.score_label.as_str());
//! for violation in &report.violations {
//!     println!("- [{:?}] {}", violation.severity, violation.description);
//! }
//! ```

pub mod aggregator;
pub mod autofix;
pub mod checkers;
pub mod color;
pub mod ruleset;
pub mod snapshot;
pub mod types;

// Re-export main types at crate root
pub use aggregator::{Aggregator, Weights};
pub use autofix::{AutoFixEngine, FixPlan};
pub use checkers::{
    AccessibilityChecker, Checker, ColorChecker, ColorMatch, FontChecker, FontMatch,
    LogoChecker, ToneChecker,
};
pub use ruleset::{
    AccessibilityRules, ColorRule, ColorUsage, FontRule, FontUsage, LogoRules, RuleSet,
    RuleSetError, ToneRules, ToneStyle,
};
pub use snapshot::{
    DesignSnapshot, ImageElement, ImageType, Position, SnapshotError, TextElement,
};
pub use types::{
    AnalysisRequest, AppliedFix, Category, CategoryFinding, CategoryFindings, CategoryScore,
    ComplianceReport, FixResult, ScoreLabel, Severity, SkippedFix, SuggestedFix, Violation,
    ViolationDetail,
};

use chrono::{DateTime, Utc};
use thiserror::Error;

/// Errors that can occur during analysis.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("Rule set error: {0}")]
    Ruleset(#[from] RuleSetError),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Analyze a design snapshot against a rule set.
///
/// Uses the current system time for `analyzed_at`; for fully
/// deterministic reports use [`analyze_at`].
pub fn analyze(
    ruleset: &RuleSet,
    snapshot: &DesignSnapshot,
) -> Result<ComplianceReport, AnalysisError> {
    analyze_with_weights_at(ruleset, snapshot, Weights::default(), Utc::now())
}

/// Analyze with an explicit timestamp for deterministic reports.
pub fn analyze_at(
    ruleset: &RuleSet,
    snapshot: &DesignSnapshot,
    analyzed_at: DateTime<Utc>,
) -> Result<ComplianceReport, AnalysisError> {
    analyze_with_weights_at(ruleset, snapshot, Weights::default(), analyzed_at)
}

/// Analyze with caller-supplied category weights.
pub fn analyze_with_weights(
    ruleset: &RuleSet,
    snapshot: &DesignSnapshot,
    weights: Weights,
) -> Result<ComplianceReport, AnalysisError> {
    analyze_with_weights_at(ruleset, snapshot, weights, Utc::now())
}

/// Analyze with explicit weights and timestamp.
///
/// This function is fully deterministic: same inputs always produce the
/// same report. The five checkers run independently of each other; the
/// aggregator joins their findings and orders violations by category.
pub fn analyze_with_weights_at(
    ruleset: &RuleSet,
    snapshot: &DesignSnapshot,
    weights: Weights,
    analyzed_at: DateTime<Utc>,
) -> Result<ComplianceReport, AnalysisError> {
    ruleset.validate()?;

    let request = AnalysisRequest {
        ruleset: ruleset.clone(),
        snapshot: snapshot.clone(),
    };

    // Fan-out: each checker sees only the request, never another
    // checker's finding. brandguard-runtime runs these concurrently.
    let color = ColorChecker::new().check(&request);
    let font = FontChecker::new().check(&request);
    let logo = LogoChecker::new().check(&request);
    let accessibility = AccessibilityChecker::new().check(&request);
    let tone = ToneChecker::new().check(&request);

    let findings = CategoryFindings {
        color,
        font,
        logo,
        accessibility,
        tone,
    };

    Ok(Aggregator::with_weights(weights).aggregate_at(findings, analyzed_at))
}
