//! Color compliance checker.
//!
//! Compares each design color against the brand palette using Delta-E
//! (CIE76). An exact string match short-circuits; otherwise the color is
//! compliant if its distance to some rule color is within that rule's
//! tolerance. Off-brand colors carry the closest rule color as the
//! suggested replacement.

use crate::color::{delta_e, normalize_hex};
use crate::ruleset::ColorRule;
use crate::types::{
    AnalysisRequest, Category, CategoryFinding, ClosestColor, Severity, SuggestedFix, Violation,
    ViolationDetail,
};

use super::Checker;

/// Outcome of matching a single design color against the palette.
#[derive(Debug, Clone, PartialEq)]
pub enum ColorMatch {
    /// Within tolerance of a rule color.
    Compliant {
        /// Name of the matched rule color.
        rule: String,
        /// Delta-E to the matched rule color; 0 for exact matches.
        distance: f64,
    },
    /// Outside every rule color's tolerance.
    OffBrand { closest: Option<ClosestColor> },
    /// Not parseable as a hex color.
    Invalid,
}

impl ColorMatch {
    pub fn is_compliant(&self) -> bool {
        matches!(self, ColorMatch::Compliant { .. })
    }
}

/// The color compliance checker.
pub struct ColorChecker;

impl ColorChecker {
    pub fn new() -> Self {
        Self
    }

    /// Match one design color against the brand palette.
    ///
    /// Tolerance is per rule color, defaulting to
    /// [`ColorRule::DEFAULT_TOLERANCE`]; a distance exactly equal to the
    /// tolerance is compliant.
    pub fn check_color(&self, hex: &str, rules: &[ColorRule]) -> ColorMatch {
        let Some(normalized) = normalize_hex(hex) else {
            return ColorMatch::Invalid;
        };

        // Exact string match short-circuits as compliant with distance 0.
        for rule in rules {
            if normalize_hex(&rule.hex).as_deref() == Some(normalized.as_str()) {
                return ColorMatch::Compliant {
                    rule: rule.name.clone(),
                    distance: 0.0,
                };
            }
        }

        let mut closest: Option<ClosestColor> = None;
        let mut matched: Option<(String, f64)> = None;

        for rule in rules {
            let Some(distance) = delta_e(&normalized, &rule.hex) else {
                // A malformed rule color cannot match anything.
                continue;
            };

            if distance <= rule.tolerance()
                && matched.as_ref().is_none_or(|(_, best)| distance < *best)
            {
                matched = Some((rule.name.clone(), distance));
            }

            if closest.as_ref().is_none_or(|c| distance < c.distance) {
                closest = Some(ClosestColor {
                    name: rule.name.clone(),
                    hex: normalize_hex(&rule.hex).unwrap_or_else(|| rule.hex.clone()),
                    distance,
                });
            }
        }

        match matched {
            Some((rule, distance)) => ColorMatch::Compliant { rule, distance },
            None => ColorMatch::OffBrand { closest },
        }
    }
}

impl Default for ColorChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for ColorChecker {
    fn category(&self) -> Category {
        Category::Color
    }

    fn check(&self, request: &AnalysisRequest) -> CategoryFinding {
        let rules = &request.ruleset.colors;
        let snapshot = &request.snapshot;

        // Deduplicate on normalized form, preserving first-seen order, so
        // repeated use of one off-brand color is a single violation.
        let mut seen = std::collections::HashSet::new();
        let mut distinct: Vec<&String> = Vec::new();
        for color in &snapshot.colors_used {
            let key = normalize_hex(color).unwrap_or_else(|| color.trim().to_lowercase());
            if seen.insert(key) {
                distinct.push(color);
            }
        }

        if distinct.is_empty() {
            return CategoryFinding::clean(Category::Color);
        }

        if rules.is_empty() {
            // A palette-less rule set cannot vouch for any color: score 0
            // with one explanatory violation instead of failing.
            return CategoryFinding {
                category: Category::Color,
                score: 0.0,
                violations: vec![Violation {
                    category: Category::Color,
                    severity: Severity::High,
                    description: "Rule set defines no brand colors; design colors cannot be verified"
                        .to_string(),
                    detail: ViolationDetail::NoBrandColors,
                    suggested_fix: Some(SuggestedFix::Advice {
                        note: "Add the brand palette to the rule set".to_string(),
                    }),
                    auto_fixable: false,
                    resolved: false,
                }],
            };
        }

        let mut violations = Vec::new();
        let mut compliant = 0usize;

        for color in &distinct {
            match self.check_color(color, rules) {
                ColorMatch::Compliant { .. } => compliant += 1,
                ColorMatch::OffBrand { closest } => {
                    let suggested_fix = closest.as_ref().map(|c| SuggestedFix::ReplaceColor {
                        from: normalize_hex(color).unwrap_or_else(|| color.to_string()),
                        to: c.hex.clone(),
                    });
                    let description = match &closest {
                        Some(c) => format!(
                            "Color {} is off-brand; closest brand color is {} ({}, dE {:.1})",
                            color, c.name, c.hex, c.distance
                        ),
                        None => format!("Color {} is off-brand", color),
                    };

                    violations.push(Violation {
                        category: Category::Color,
                        severity: Severity::Medium,
                        description,
                        detail: ViolationDetail::OffBrandColor {
                            hex: normalize_hex(color).unwrap_or_else(|| color.to_string()),
                            closest,
                        },
                        auto_fixable: suggested_fix.is_some(),
                        suggested_fix,
                        resolved: false,
                    });
                }
                ColorMatch::Invalid => {
                    violations.push(Violation {
                        category: Category::Color,
                        severity: Severity::Low,
                        description: format!("Value {:?} is not a valid hex color", color),
                        detail: ViolationDetail::InvalidColor {
                            value: color.to_string(),
                        },
                        suggested_fix: None,
                        auto_fixable: false,
                        resolved: false,
                    });
                }
            }
        }

        let score = (100.0 * compliant as f64 / distinct.len() as f64).round();

        CategoryFinding {
            category: Category::Color,
            score,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::{ColorUsage, RuleSet};
    use crate::snapshot::DesignSnapshot;

    fn rule(name: &str, hex: &str, tolerance: Option<f64>) -> ColorRule {
        ColorRule {
            name: name.to_string(),
            hex: hex.to_string(),
            tolerance,
            usage: ColorUsage::Any,
        }
    }

    fn request(colors_used: &[&str], rules: Vec<ColorRule>) -> AnalysisRequest {
        AnalysisRequest {
            ruleset: RuleSet {
                name: "Test".to_string(),
                colors: rules,
                ..Default::default()
            },
            snapshot: DesignSnapshot {
                colors_used: colors_used.iter().map(|c| c.to_string()).collect(),
                ..Default::default()
            },
        }
    }

    #[test]
    fn exact_match_is_compliant_with_zero_distance() {
        let checker = ColorChecker::new();
        let rules = vec![rule("Blue", "#1A73E8", Some(10.0))];

        match checker.check_color("#1a73e8", &rules) {
            ColorMatch::Compliant { distance, .. } => assert_eq!(distance, 0.0),
            other => panic!("expected compliant, got {:?}", other),
        }
    }

    #[test]
    fn shorthand_matches_expanded_rule() {
        let checker = ColorChecker::new();
        let rules = vec![rule("White", "#ffffff", Some(5.0))];

        assert!(checker.check_color("#FFF", &rules).is_compliant());
    }

    #[test]
    fn within_tolerance_is_compliant() {
        let checker = ColorChecker::new();
        let rules = vec![rule("Blue", "#1a73e8", Some(10.0))];

        // One channel step away: well inside dE 10.
        assert!(checker.check_color("#1b74e9", &rules).is_compliant());
    }

    #[test]
    fn boundary_distance_equal_to_tolerance_is_compliant() {
        let checker = ColorChecker::new();
        let hex_a = "#1a73e8";
        let hex_b = "#2a63d8";
        let distance = crate::color::delta_e(hex_a, hex_b).unwrap();
        let rules = vec![rule("Blue", hex_a, Some(distance))];

        assert!(checker.check_color(hex_b, &rules).is_compliant());
    }

    #[test]
    fn off_brand_reports_closest_rule_color() {
        let checker = ColorChecker::new();
        let rules = vec![
            rule("Blue", "#1a73e8", Some(5.0)),
            rule("Red", "#d93025", Some(5.0)),
        ];

        match checker.check_color("#ff5733", &rules) {
            ColorMatch::OffBrand { closest: Some(c) } => {
                assert_eq!(c.name, "Red");
                assert_eq!(c.hex, "#d93025");
            }
            other => panic!("expected off-brand with closest, got {:?}", other),
        }
    }

    #[test]
    fn malformed_color_is_invalid_not_error() {
        let checker = ColorChecker::new();
        let rules = vec![rule("Blue", "#1a73e8", None)];
        assert_eq!(checker.check_color("notahex", &rules), ColorMatch::Invalid);
    }

    #[test]
    fn empty_design_colors_scores_100() {
        let checker = ColorChecker::new();
        let finding = checker.check(&request(&[], vec![rule("Blue", "#1a73e8", None)]));
        assert_eq!(finding.score, 100.0);
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn empty_rules_scores_0_with_one_violation() {
        let checker = ColorChecker::new();
        let finding = checker.check(&request(&["#1a73e8"], vec![]));
        assert_eq!(finding.score, 0.0);
        assert_eq!(finding.violations.len(), 1);
        assert_eq!(finding.violations[0].detail, ViolationDetail::NoBrandColors);
    }

    #[test]
    fn mixed_colors_score_half() {
        // One compliant, one off-brand: half the palette checks out.
        let checker = ColorChecker::new();
        let finding = checker.check(&request(
            &["#1A73E8", "#FF5733"],
            vec![rule("Blue", "#1A73E8", Some(10.0))],
        ));

        assert_eq!(finding.score, 50.0);
        assert_eq!(finding.violations.len(), 1);

        let violation = &finding.violations[0];
        assert!(violation.auto_fixable);
        assert_eq!(
            violation.suggested_fix,
            Some(SuggestedFix::ReplaceColor {
                from: "#ff5733".to_string(),
                to: "#1a73e8".to_string(),
            })
        );
    }

    #[test]
    fn repeated_off_brand_color_is_one_violation() {
        let checker = ColorChecker::new();
        let finding = checker.check(&request(
            &["#FF5733", "#ff5733", "#f53"],
            vec![rule("Blue", "#1a73e8", Some(10.0))],
        ));

        // "#FF5733" and "#ff5733" normalize identically; "#f53" is distinct.
        assert_eq!(finding.violations.len(), 2);
    }

    #[test]
    fn invalid_color_does_not_block_remaining_scoring() {
        let checker = ColorChecker::new();
        let finding = checker.check(&request(
            &["garbage", "#1a73e8"],
            vec![rule("Blue", "#1a73e8", Some(10.0))],
        ));

        assert_eq!(finding.score, 50.0);
        assert_eq!(finding.violations.len(), 1);
        assert!(matches!(
            finding.violations[0].detail,
            ViolationDetail::InvalidColor { .. }
        ));
    }
}
