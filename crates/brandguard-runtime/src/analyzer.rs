//! The analyzer seam.
//!
//! An [`Analyzer`] turns a rule set and a design snapshot into a
//! compliance report. The deterministic rule-based engine is the default
//! implementation; an external generative analyzer can be injected
//! behind the same trait and the orchestrator will fall back to the
//! rule-based path when it fails.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

use brandguard_core::{
    analyze_with_weights_at, AnalysisRequest, CategoryFindings, Checker, ComplianceReport,
    DesignSnapshot, RuleSet, Weights,
};

/// Errors an analyzer implementation may surface.
#[derive(Error, Debug)]
pub enum AnalyzerError {
    #[error("Analyzer unavailable: {0}")]
    Unavailable(String),

    #[error("Analysis failed: {0}")]
    Failed(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

/// Anything that can produce a compliance report from the two inputs.
#[async_trait]
pub trait Analyzer: Send + Sync {
    /// Analyze a snapshot against a rule set.
    async fn analyze(
        &self,
        ruleset: &RuleSet,
        snapshot: &DesignSnapshot,
    ) -> Result<ComplianceReport, AnalyzerError>;

    /// Name for logs and diagnostics.
    fn name(&self) -> &str;
}

/// The deterministic rule-based analyzer.
///
/// Fans the five checkers out concurrently and joins on all of them
/// before aggregation. Checkers are pure and independent, so the join
/// order never affects the report; the aggregator imposes the fixed
/// category order on the violation list.
pub struct RuleBasedAnalyzer {
    weights: Weights,
    analyzed_at: Option<DateTime<Utc>>,
}

impl RuleBasedAnalyzer {
    pub fn new() -> Self {
        Self {
            weights: Weights::default(),
            analyzed_at: None,
        }
    }

    pub fn with_weights(mut self, weights: Weights) -> Self {
        self.weights = weights;
        self
    }

    /// Pin the report timestamp for reproducible output.
    pub fn with_analyzed_at(mut self, analyzed_at: DateTime<Utc>) -> Self {
        self.analyzed_at = Some(analyzed_at);
        self
    }
}

impl Default for RuleBasedAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Analyzer for RuleBasedAnalyzer {
    async fn analyze(
        &self,
        ruleset: &RuleSet,
        snapshot: &DesignSnapshot,
    ) -> Result<ComplianceReport, AnalyzerError> {
        ruleset
            .validate()
            .map_err(|e| AnalyzerError::InvalidInput(e.to_string()))?;

        let request = AnalysisRequest {
            ruleset: ruleset.clone(),
            snapshot: snapshot.clone(),
        };

        // Fan-out: all five checkers run concurrently with no ordering
        // constraint; fan-in blocks on every finding before aggregation.
        let (color, font, logo, accessibility, tone) = tokio::join!(
            check(brandguard_core::ColorChecker::new(), &request),
            check(brandguard_core::FontChecker::new(), &request),
            check(brandguard_core::LogoChecker::new(), &request),
            check(brandguard_core::AccessibilityChecker::new(), &request),
            check(brandguard_core::ToneChecker::new(), &request),
        );

        let findings = CategoryFindings {
            color,
            font,
            logo,
            accessibility,
            tone,
        };

        let aggregator = brandguard_core::Aggregator::with_weights(self.weights);
        let report = match self.analyzed_at {
            Some(at) => aggregator.aggregate_at(findings, at),
            None => aggregator.aggregate(findings),
        };

        Ok(report)
    }

    fn name(&self) -> &str {
        "rule-based"
    }
}

async fn check<C: Checker>(
    checker: C,
    request: &AnalysisRequest,
) -> brandguard_core::CategoryFinding {
    checker.check(request)
}

/// Test double: an analyzer that always fails after an optional delay.
///
/// Exercises the orchestrator's fallback path without a real external
/// service.
#[doc(hidden)]
pub struct FailingAnalyzer {
    pub delay: Option<Duration>,
}

#[async_trait]
impl Analyzer for FailingAnalyzer {
    async fn analyze(
        &self,
        _ruleset: &RuleSet,
        _snapshot: &DesignSnapshot,
    ) -> Result<ComplianceReport, AnalyzerError> {
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        Err(AnalyzerError::Unavailable("always fails".to_string()))
    }

    fn name(&self) -> &str {
        "failing"
    }
}

/// Synchronous convenience: run the rule-based engine without a tokio
/// runtime. Equivalent to [`brandguard_core::analyze_with_weights_at`].
pub fn analyze_blocking(
    ruleset: &RuleSet,
    snapshot: &DesignSnapshot,
    weights: Weights,
    analyzed_at: DateTime<Utc>,
) -> Result<ComplianceReport, AnalyzerError> {
    analyze_with_weights_at(ruleset, snapshot, weights, analyzed_at)
        .map_err(|e| AnalyzerError::InvalidInput(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use brandguard_core::Category;

    fn ruleset() -> RuleSet {
        RuleSet::from_yaml(
            r##"
name: "Acme"
colors:
  - name: "Blue"
    hex: "#1a73e8"
fonts:
  - name: "Inter"
"##,
        )
        .unwrap()
    }

    #[tokio::test]
    async fn rule_based_analyzer_matches_core_engine() {
        use chrono::TimeZone;

        let snapshot = DesignSnapshot {
            colors_used: vec!["#1a73e8".to_string(), "#ff5733".to_string()],
            fonts_used: vec!["Inter".to_string()],
            ..Default::default()
        };
        let at = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();

        let parallel = RuleBasedAnalyzer::new()
            .with_analyzed_at(at)
            .analyze(&ruleset(), &snapshot)
            .await
            .unwrap();
        let sequential =
            brandguard_core::analyze_at(&ruleset(), &snapshot, at).unwrap();

        assert_eq!(parallel.compliance_score, sequential.compliance_score);
        assert_eq!(parallel.violations, sequential.violations);
    }

    #[tokio::test]
    async fn rule_based_rejects_invalid_ruleset() {
        let bad = RuleSet {
            name: "".to_string(),
            ..Default::default()
        };
        let result = RuleBasedAnalyzer::new()
            .analyze(&bad, &DesignSnapshot::default())
            .await;
        assert!(matches!(result, Err(AnalyzerError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn category_order_survives_concurrent_checkers() {
        let snapshot = DesignSnapshot {
            colors_used: vec!["#00ff00".to_string()],
            fonts_used: vec!["Papyrus".to_string()],
            ..Default::default()
        };

        let report = RuleBasedAnalyzer::new()
            .analyze(&ruleset(), &snapshot)
            .await
            .unwrap();

        let categories: Vec<Category> =
            report.violations.iter().map(|v| v.category).collect();
        assert_eq!(categories, vec![Category::Color, Category::Font]);
    }
}
