//! Configuration for brandguard-runtime.

use brandguard_core::Weights;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Runtime configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuntimeConfig {
    /// Category weight overrides for the rule-based engine.
    #[serde(default)]
    pub weights: Weights,

    /// External analyzer configuration.
    #[serde(default)]
    pub analyzer: AnalyzerConfig,

    /// Determinism configuration.
    #[serde(default)]
    pub determinism: DeterminismConfig,
}

/// External analyzer settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    /// Whether a registered external analyzer is consulted at all.
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Maximum time the external analyzer may take before the runtime
    /// gives up on it.
    #[serde(with = "humantime_serde", default = "default_analyzer_timeout")]
    pub timeout: Duration,

    /// Fall back to the deterministic engine when the external analyzer
    /// fails or times out. When false, those failures surface as errors.
    #[serde(default = "default_true")]
    pub fallback_to_rule_based: bool,
}

fn default_true() -> bool {
    true
}

fn default_analyzer_timeout() -> Duration {
    Duration::from_secs(30)
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            timeout: default_analyzer_timeout(),
            fallback_to_rule_based: true,
        }
    }
}

/// Determinism configuration for reproducible reports.
///
/// When `analyzed_at` is set, every report produced by the runtime
/// carries that timestamp instead of the current system time. Use for
/// golden tests, audits, and replay.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct DeterminismConfig {
    /// Fixed timestamp, ISO 8601 (e.g. "2026-03-01T09:00:00Z").
    #[serde(default)]
    pub analyzed_at: Option<DateTime<Utc>>,
}

// Duration fields serialize in humantime format ("30s", "2m").
mod humantime_serde {
    use serde::{self, Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S>(duration: &Duration, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&humantime::format_duration(*duration).to_string())
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Duration, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        humantime::parse_duration(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = RuntimeConfig::default();
        assert!(config.analyzer.enabled);
        assert!(config.analyzer.fallback_to_rule_based);
        assert_eq!(config.analyzer.timeout, Duration::from_secs(30));
        assert!(config.determinism.analyzed_at.is_none());
        assert_eq!(config.weights, Weights::default());
    }

    #[test]
    fn timeout_roundtrips_through_humantime() {
        let mut config = RuntimeConfig::default();
        config.analyzer.timeout = Duration::from_secs(90);

        let json = serde_json::to_string(&config).unwrap();
        assert!(json.contains("1m 30s"));

        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.analyzer.timeout, Duration::from_secs(90));
    }

    #[test]
    fn fixed_timestamp_roundtrips() {
        use chrono::TimeZone;

        let mut config = RuntimeConfig::default();
        let fixed = Utc.with_ymd_and_hms(2026, 3, 1, 9, 0, 0).unwrap();
        config.determinism.analyzed_at = Some(fixed);

        let json = serde_json::to_string(&config).unwrap();
        let parsed: RuntimeConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.determinism.analyzed_at, Some(fixed));
    }
}
