//! Aggregator: folds the five category findings into a compliance report.
//!
//! The aggregator is policy, not intelligence: it applies category
//! weights, rounds the overall score, assigns the label tier, and
//! concatenates violations in the fixed category order
//! color, font, logo, accessibility, tone. It never re-inspects the
//! design; everything it needs is in the findings.

use chrono::{DateTime, Utc};

use crate::types::{
    Category, CategoryFindings, CategoryScore, ComplianceReport, ScoreLabel,
};

/// Relative importance of each category in the overall score.
///
/// Weights live in `[0, 5]`. The overall score divides by the weight sum,
/// so any override still yields a `[0, 100]` score; the defaults sum to 1
/// and reproduce the canonical weighting exactly.
#[derive(Debug, Clone, Copy, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Weights {
    pub color: f64,
    pub font: f64,
    pub logo: f64,
    pub accessibility: f64,
    pub tone: f64,
}

impl Weights {
    /// Upper bound for a single category weight.
    pub const MAX_WEIGHT: f64 = 5.0;

    /// Weight for a given category.
    pub fn for_category(&self, category: Category) -> f64 {
        match category {
            Category::Color => self.color,
            Category::Font => self.font,
            Category::Logo => self.logo,
            Category::Accessibility => self.accessibility,
            Category::Tone => self.tone,
        }
    }

    /// Clamp every weight into `[0, MAX_WEIGHT]`.
    pub fn clamped(self) -> Self {
        let clamp = |w: f64| w.clamp(0.0, Self::MAX_WEIGHT);
        Self {
            color: clamp(self.color),
            font: clamp(self.font),
            logo: clamp(self.logo),
            accessibility: clamp(self.accessibility),
            tone: clamp(self.tone),
        }
    }

    fn sum(&self) -> f64 {
        self.color + self.font + self.logo + self.accessibility + self.tone
    }
}

impl Default for Weights {
    fn default() -> Self {
        Self {
            color: 0.30,
            font: 0.25,
            logo: 0.20,
            accessibility: 0.15,
            tone: 0.10,
        }
    }
}

/// The aggregator folds category findings into a [`ComplianceReport`].
pub struct Aggregator {
    weights: Weights,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::with_weights(Weights::default())
    }

    pub fn with_weights(weights: Weights) -> Self {
        Self {
            weights: weights.clamped(),
        }
    }

    pub fn weights(&self) -> &Weights {
        &self.weights
    }

    /// Aggregate findings using the current time.
    ///
    /// For reproducible reports use [`Aggregator::aggregate_at`].
    pub fn aggregate(&self, findings: CategoryFindings) -> ComplianceReport {
        self.aggregate_at(findings, Utc::now())
    }

    /// Aggregate findings with an explicit timestamp.
    ///
    /// Fully deterministic: same findings and timestamp always produce
    /// the same report.
    pub fn aggregate_at(
        &self,
        findings: CategoryFindings,
        analyzed_at: DateTime<Utc>,
    ) -> ComplianceReport {
        let ordered = findings.in_order();

        let weight_sum = self.weights.sum();
        let weighted: f64 = ordered
            .iter()
            .map(|finding| finding.score * self.weights.for_category(finding.category))
            .sum();

        let compliance_score = if weight_sum > 0.0 {
            (weighted / weight_sum).round() as u32
        } else {
            // Degenerate all-zero weights: fall back to the plain mean.
            (ordered.iter().map(|f| f.score).sum::<f64>() / ordered.len() as f64).round() as u32
        }
        .min(100);

        let score_label = ScoreLabel::from_score(compliance_score);

        let category_scores: Vec<CategoryScore> = ordered
            .iter()
            .map(|finding| CategoryScore {
                category: finding.category,
                score: finding.score.round().min(100.0).max(0.0) as u32,
                weight: self.weights.for_category(finding.category),
                violation_count: finding.violations.len(),
            })
            .collect();

        // Fixed category order keeps the violation list deterministic
        // regardless of checker completion order.
        let violations: Vec<_> = ordered
            .iter()
            .flat_map(|finding| finding.violations.iter().cloned())
            .collect();

        let summary = if violations.is_empty() {
            score_label.summary().to_string()
        } else {
            format!(
                "{} {} violation{} found.",
                score_label.summary(),
                violations.len(),
                if violations.len() == 1 { "" } else { "s" }
            )
        };

        ComplianceReport {
            compliance_score,
            score_label,
            summary,
            category_scores,
            violations,
            analyzed_at,
        }
    }
}

impl Default for Aggregator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{
        CategoryFinding, Severity, Violation, ViolationDetail,
    };

    fn findings_with_scores(scores: [f64; 5]) -> CategoryFindings {
        let [color, font, logo, accessibility, tone] = scores;
        CategoryFindings {
            color: CategoryFinding {
                category: Category::Color,
                score: color,
                violations: vec![],
            },
            font: CategoryFinding {
                category: Category::Font,
                score: font,
                violations: vec![],
            },
            logo: CategoryFinding {
                category: Category::Logo,
                score: logo,
                violations: vec![],
            },
            accessibility: CategoryFinding {
                category: Category::Accessibility,
                score: accessibility,
                violations: vec![],
            },
            tone: CategoryFinding {
                category: Category::Tone,
                score: tone,
                violations: vec![],
            },
        }
    }

    fn violation(category: Category, description: &str) -> Violation {
        Violation {
            category,
            severity: Severity::Medium,
            description: description.to_string(),
            detail: ViolationDetail::NoBrandColors,
            suggested_fix: None,
            auto_fixable: false,
            resolved: false,
        }
    }

    #[test]
    fn perfect_scores_aggregate_to_100() {
        let report = Aggregator::new().aggregate(findings_with_scores([100.0; 5]));
        assert_eq!(report.compliance_score, 100);
        assert_eq!(report.score_label, ScoreLabel::Excellent);
    }

    #[test]
    fn zero_scores_aggregate_to_0() {
        let report = Aggregator::new().aggregate(findings_with_scores([0.0; 5]));
        assert_eq!(report.compliance_score, 0);
        assert_eq!(report.score_label, ScoreLabel::Poor);
    }

    #[test]
    fn default_weights_apply() {
        // 100*0.30 + 0*0.25 + 100*0.20 + 0*0.15 + 100*0.10 = 60.
        let report =
            Aggregator::new().aggregate(findings_with_scores([100.0, 0.0, 100.0, 0.0, 100.0]));
        assert_eq!(report.compliance_score, 60);
        assert_eq!(report.score_label, ScoreLabel::NeedsWork);
    }

    #[test]
    fn override_weights_normalize() {
        // Only color counts: overall score equals the color score.
        let weights = Weights {
            color: 2.0,
            font: 0.0,
            logo: 0.0,
            accessibility: 0.0,
            tone: 0.0,
        };
        let report = Aggregator::with_weights(weights)
            .aggregate(findings_with_scores([80.0, 0.0, 0.0, 0.0, 0.0]));
        assert_eq!(report.compliance_score, 80);
    }

    #[test]
    fn zero_weights_fall_back_to_mean() {
        let weights = Weights {
            color: 0.0,
            font: 0.0,
            logo: 0.0,
            accessibility: 0.0,
            tone: 0.0,
        };
        let report = Aggregator::with_weights(weights)
            .aggregate(findings_with_scores([100.0, 50.0, 0.0, 100.0, 0.0]));
        assert_eq!(report.compliance_score, 50);
    }

    #[test]
    fn weights_clamp_to_range() {
        let weights = Weights {
            color: 99.0,
            font: -3.0,
            ..Default::default()
        }
        .clamped();
        assert_eq!(weights.color, Weights::MAX_WEIGHT);
        assert_eq!(weights.font, 0.0);
    }

    #[test]
    fn violations_keep_fixed_category_order() {
        let mut findings = findings_with_scores([50.0; 5]);
        findings.tone.violations.push(violation(Category::Tone, "tone issue"));
        findings.color.violations.push(violation(Category::Color, "color issue"));
        findings
            .accessibility
            .violations
            .push(violation(Category::Accessibility, "a11y issue"));

        let report = Aggregator::new().aggregate(findings);
        let order: Vec<Category> = report.violations.iter().map(|v| v.category).collect();
        assert_eq!(
            order,
            vec![Category::Color, Category::Accessibility, Category::Tone]
        );
    }

    #[test]
    fn category_scores_cover_all_categories_in_order() {
        let report = Aggregator::new().aggregate(findings_with_scores([90.0, 80.0, 70.0, 60.0, 50.0]));
        let categories: Vec<Category> =
            report.category_scores.iter().map(|s| s.category).collect();
        assert_eq!(categories, Category::ALL.to_vec());
        assert_eq!(report.category_scores[0].score, 90);
        assert_eq!(report.category_scores[4].score, 50);
    }

    #[test]
    fn summary_mentions_violation_count() {
        let mut findings = findings_with_scores([50.0; 5]);
        findings.color.violations.push(violation(Category::Color, "one"));
        findings.font.violations.push(violation(Category::Font, "two"));

        let report = Aggregator::new().aggregate(findings);
        assert!(report.summary.contains("2 violations"));
    }

    #[test]
    fn label_thresholds_at_boundaries() {
        let cases = [
            ([90.0; 5], ScoreLabel::Excellent),
            ([89.0; 5], ScoreLabel::Good),
            ([70.0; 5], ScoreLabel::Good),
            ([69.0; 5], ScoreLabel::NeedsWork),
            ([50.0; 5], ScoreLabel::NeedsWork),
            ([49.0; 5], ScoreLabel::Poor),
        ];

        for (scores, expected) in cases {
            let report = Aggregator::new().aggregate(findings_with_scores(scores));
            assert_eq!(report.score_label, expected, "scores {:?}", scores);
        }
    }

    #[test]
    fn aggregate_at_is_deterministic() {
        let at = DateTime::parse_from_rfc3339("2026-01-15T12:00:00Z")
            .unwrap()
            .with_timezone(&Utc);

        let a = Aggregator::new().aggregate_at(findings_with_scores([75.0; 5]), at);
        let b = Aggregator::new().aggregate_at(findings_with_scores([75.0; 5]), at);

        assert_eq!(a.compliance_score, b.compliance_score);
        assert_eq!(a.analyzed_at, b.analyzed_at);
        assert_eq!(a.summary, b.summary);
    }
}
