//! Runtime orchestrator.
//!
//! Routes an analysis request to the configured analyzer chain:
//! 1. The external analyzer, if one is registered and enabled, under a
//!    timeout.
//! 2. The deterministic rule-based engine, either as the only path or as
//!    the silent fallback when the external analyzer fails or times out.
//!
//! An external analyzer failure is logged and never propagated to the
//! caller while fallback is enabled; callers always receive a report.

use std::sync::Arc;
use thiserror::Error;

use brandguard_core::{ComplianceReport, DesignSnapshot, RuleSet};

use crate::analyzer::{Analyzer, AnalyzerError, RuleBasedAnalyzer};
use crate::config::RuntimeConfig;

/// Errors from the runtime orchestrator.
///
/// With fallback enabled (the default) only `Analysis` for an invalid
/// rule set can surface; external analyzer failures are absorbed.
#[derive(Error, Debug)]
pub enum RuntimeError {
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalyzerError),

    #[error("External analyzer timed out")]
    Timeout,
}

/// The runtime orchestrator.
pub struct Orchestrator {
    external: Option<Arc<dyn Analyzer>>,
    config: RuntimeConfig,
}

impl Orchestrator {
    /// Create an orchestrator using only the rule-based engine.
    pub fn new(config: RuntimeConfig) -> Self {
        Self {
            external: None,
            config,
        }
    }

    /// Register an external analyzer to consult before the rule-based
    /// engine.
    pub fn with_analyzer(mut self, analyzer: Arc<dyn Analyzer>) -> Self {
        self.external = Some(analyzer);
        self
    }

    pub fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    /// Analyze a snapshot against a rule set.
    pub async fn analyze(
        &self,
        ruleset: &RuleSet,
        snapshot: &DesignSnapshot,
    ) -> Result<ComplianceReport, RuntimeError> {
        if let Some(external) = self.external.as_ref().filter(|_| self.config.analyzer.enabled) {
            match tokio::time::timeout(
                self.config.analyzer.timeout,
                external.analyze(ruleset, snapshot),
            )
            .await
            {
                Ok(Ok(report)) => {
                    tracing::debug!(analyzer = external.name(), "External analyzer succeeded");
                    return Ok(report);
                }
                Ok(Err(error)) => {
                    if !self.config.analyzer.fallback_to_rule_based {
                        return Err(RuntimeError::Analysis(error));
                    }
                    tracing::warn!(
                        analyzer = external.name(),
                        error = %error,
                        "External analyzer failed, falling back to rule-based engine"
                    );
                }
                Err(_) => {
                    if !self.config.analyzer.fallback_to_rule_based {
                        return Err(RuntimeError::Timeout);
                    }
                    tracing::warn!(
                        analyzer = external.name(),
                        timeout = ?self.config.analyzer.timeout,
                        "External analyzer timed out, falling back to rule-based engine"
                    );
                }
            }
        }

        self.rule_based().analyze(ruleset, snapshot).await.map_err(RuntimeError::from)
    }

    /// The deterministic engine configured per this runtime.
    fn rule_based(&self) -> RuleBasedAnalyzer {
        let mut analyzer = RuleBasedAnalyzer::new().with_weights(self.config.weights);
        if let Some(at) = self.config.determinism.analyzed_at {
            analyzer = analyzer.with_analyzed_at(at);
        }
        analyzer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analyzer::FailingAnalyzer;
    use async_trait::async_trait;
    use brandguard_core::ScoreLabel;
    use std::time::Duration;

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

    fn snapshot() -> DesignSnapshot {
        DesignSnapshot {
            colors_used: vec!["#1a73e8".to_string()],
            fonts_used: vec!["Inter".to_string()],
            ..Default::default()
        }
    }

    /// Analyzer that returns a fixed, obviously synthetic report.
    struct CannedAnalyzer;

    #[async_trait]
    impl Analyzer for CannedAnalyzer {
        async fn analyze(
            &self,
            _ruleset: &RuleSet,
            _snapshot: &DesignSnapshot,
        ) -> Result<ComplianceReport, AnalyzerError> {
            Ok(ComplianceReport {
                compliance_score: 42,
                score_label: ScoreLabel::Poor,
                summary: "canned".to_string(),
                category_scores: vec![],
                violations: vec![],
                analyzed_at: chrono::Utc::now(),
            })
        }

        fn name(&self) -> &str {
            "canned"
        }
    }

    #[tokio::test]
    async fn rule_based_only_path_produces_report() {
        let orchestrator = Orchestrator::new(RuntimeConfig::default());
        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        assert_eq!(report.compliance_score, 100);
    }

    #[tokio::test]
    async fn external_analyzer_result_is_used_when_it_succeeds() {
        let orchestrator =
            Orchestrator::new(RuntimeConfig::default()).with_analyzer(Arc::new(CannedAnalyzer));
        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        assert_eq!(report.compliance_score, 42);
        assert_eq!(report.summary, "canned");
    }

    #[tokio::test]
    async fn failing_analyzer_falls_back_silently() {
        let orchestrator = Orchestrator::new(RuntimeConfig::default())
            .with_analyzer(Arc::new(FailingAnalyzer { delay: None }));

        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        // The rule-based engine answered.
        assert_eq!(report.compliance_score, 100);
    }

    #[tokio::test]
    async fn slow_analyzer_times_out_and_falls_back() {
        let mut config = RuntimeConfig::default();
        config.analyzer.timeout = Duration::from_millis(20);

        let orchestrator = Orchestrator::new(config).with_analyzer(Arc::new(FailingAnalyzer {
            delay: Some(Duration::from_secs(5)),
        }));

        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        assert_eq!(report.compliance_score, 100);
    }

    #[tokio::test]
    async fn fallback_disabled_surfaces_the_failure() {
        let mut config = RuntimeConfig::default();
        config.analyzer.fallback_to_rule_based = false;

        let orchestrator = Orchestrator::new(config)
            .with_analyzer(Arc::new(FailingAnalyzer { delay: None }));

        let result = orchestrator.analyze(&ruleset(), &snapshot()).await;
        assert!(matches!(result, Err(RuntimeError::Analysis(_))));
    }

    #[tokio::test]
    async fn disabled_analyzer_is_never_consulted() {
        let mut config = RuntimeConfig::default();
        config.analyzer.enabled = false;

        let orchestrator = Orchestrator::new(config)
            .with_analyzer(Arc::new(FailingAnalyzer { delay: None }));

        // The failing analyzer would error; disabled means rule-based only.
        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        assert_eq!(report.compliance_score, 100);
    }

    #[tokio::test]
    async fn pinned_timestamp_flows_into_reports() {
        use chrono::TimeZone;

        let mut config = RuntimeConfig::default();
        let at = chrono::Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        config.determinism.analyzed_at = Some(at);

        let orchestrator = Orchestrator::new(config);
        let report = orchestrator.analyze(&ruleset(), &snapshot()).await.unwrap();
        assert_eq!(report.analyzed_at, at);
    }
}
