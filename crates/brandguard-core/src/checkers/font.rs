//! Typography compliance checker.
//!
//! Matches design font names against brand fonts and their fallbacks on
//! normalized names. An approved name used in the wrong role still
//! violates. Unmatched fonts get a word-overlap similarity suggestion.

use crate::ruleset::{FontRule, FontUsage};
use crate::types::{
    AnalysisRequest, Category, CategoryFinding, ClosestFont, Severity, SuggestedFix, Violation,
    ViolationDetail,
};

use super::Checker;

/// Normalize a font family name: trim, lowercase, collapse internal
/// whitespace.
pub fn normalize_font(name: &str) -> String {
    name.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Outcome of matching a single design font against the rules.
#[derive(Debug, Clone, PartialEq)]
pub enum FontMatch {
    /// Name matches a rule font (or fallback) in an acceptable role.
    Compliant { rule: String },
    /// Name matches a rule font, but the roles disagree.
    WrongUsage {
        rule: String,
        expected: FontUsage,
        actual: FontUsage,
    },
    /// No rule font matches; carries the most similar one, if any.
    OffBrand { closest: Option<ClosestFont> },
}

impl FontMatch {
    pub fn is_compliant(&self) -> bool {
        matches!(self, FontMatch::Compliant { .. })
    }
}

/// The typography compliance checker.
pub struct FontChecker;

impl FontChecker {
    pub fn new() -> Self {
        Self
    }

    /// Match one font name against the brand fonts.
    ///
    /// When `usage` is supplied and both it and the rule font's usage are
    /// not [`FontUsage::Any`], they must agree; a name match with a role
    /// mismatch reports [`FontMatch::WrongUsage`].
    pub fn check_font(
        &self,
        name: &str,
        usage: Option<FontUsage>,
        rules: &[FontRule],
    ) -> FontMatch {
        let normalized = normalize_font(name);

        for rule in rules {
            let name_matches = normalize_font(&rule.name) == normalized
                || rule
                    .fallbacks
                    .iter()
                    .any(|fallback| normalize_font(fallback) == normalized);

            if !name_matches {
                continue;
            }

            if let Some(requested) = usage {
                if requested != FontUsage::Any
                    && rule.usage != FontUsage::Any
                    && requested != rule.usage
                {
                    return FontMatch::WrongUsage {
                        rule: rule.name.clone(),
                        expected: rule.usage,
                        actual: requested,
                    };
                }
            }

            return FontMatch::Compliant {
                rule: rule.name.clone(),
            };
        }

        FontMatch::OffBrand {
            closest: self.most_similar(&normalized, rules),
        }
    }

    /// Word-overlap similarity: shared tokens over the larger token count.
    fn similarity(a: &str, b: &str) -> f64 {
        let tokens_a: Vec<&str> = a.split_whitespace().collect();
        let tokens_b: Vec<&str> = b.split_whitespace().collect();

        if tokens_a.is_empty() || tokens_b.is_empty() {
            return 0.0;
        }

        let matched = tokens_a.iter().filter(|t| tokens_b.contains(t)).count();
        matched as f64 / tokens_a.len().max(tokens_b.len()) as f64
    }

    /// The rule font with the highest similarity to `normalized`, if any
    /// scores above zero.
    fn most_similar(&self, normalized: &str, rules: &[FontRule]) -> Option<ClosestFont> {
        let mut best: Option<ClosestFont> = None;

        for rule in rules {
            let similarity = Self::similarity(normalized, &normalize_font(&rule.name));
            if best.as_ref().is_none_or(|b| similarity > b.similarity) {
                best = Some(ClosestFont {
                    name: rule.name.clone(),
                    similarity,
                });
            }
        }

        best.filter(|b| b.similarity > 0.0)
    }
}

impl Default for FontChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for FontChecker {
    fn category(&self) -> Category {
        Category::Font
    }

    fn check(&self, request: &AnalysisRequest) -> CategoryFinding {
        let rules = &request.ruleset.fonts;
        let snapshot = &request.snapshot;

        // Case-insensitive dedupe: one off-brand family is one violation,
        // however many times it appears.
        let mut seen = std::collections::HashSet::new();
        let mut distinct: Vec<&String> = Vec::new();
        for font in &snapshot.fonts_used {
            if seen.insert(normalize_font(font)) {
                distinct.push(font);
            }
        }

        if distinct.is_empty() {
            return CategoryFinding::clean(Category::Font);
        }

        if rules.is_empty() {
            return CategoryFinding {
                category: Category::Font,
                score: 0.0,
                violations: vec![Violation {
                    category: Category::Font,
                    severity: Severity::High,
                    description: "Rule set defines no brand fonts; design fonts cannot be verified"
                        .to_string(),
                    detail: ViolationDetail::NoBrandFonts,
                    suggested_fix: Some(SuggestedFix::Advice {
                        note: "Add the brand typography to the rule set".to_string(),
                    }),
                    auto_fixable: false,
                    resolved: false,
                }],
            };
        }

        let mut violations = Vec::new();
        let mut compliant = 0usize;

        for font in &distinct {
            match self.check_font(font, None, rules) {
                FontMatch::Compliant { .. } => compliant += 1,
                FontMatch::WrongUsage {
                    rule,
                    expected,
                    actual,
                } => {
                    violations.push(Violation {
                        category: Category::Font,
                        severity: Severity::Medium,
                        description: format!(
                            "Font {:?} is approved but used for {} where {} expects {}",
                            font,
                            actual.as_str(),
                            rule,
                            expected.as_str()
                        ),
                        detail: ViolationDetail::WrongFontUsage {
                            name: font.to_string(),
                            expected,
                            actual,
                        },
                        suggested_fix: None,
                        auto_fixable: false,
                        resolved: false,
                    });
                }
                FontMatch::OffBrand { closest } => {
                    let suggested_fix = closest.as_ref().map(|c| SuggestedFix::ReplaceFont {
                        from: font.to_string(),
                        to: c.name.clone(),
                    });
                    let description = match &closest {
                        Some(c) => format!(
                            "Font {:?} is not a brand font; closest is {:?} (similarity {:.2})",
                            font, c.name, c.similarity
                        ),
                        None => format!("Font {:?} is not a brand font", font),
                    };

                    violations.push(Violation {
                        category: Category::Font,
                        severity: Severity::Medium,
                        description,
                        detail: ViolationDetail::OffBrandFont {
                            name: font.to_string(),
                            closest,
                        },
                        auto_fixable: suggested_fix.is_some(),
                        suggested_fix,
                        resolved: false,
                    });
                }
            }
        }

        let score = (100.0 * compliant as f64 / distinct.len() as f64).round();

        CategoryFinding {
            category: Category::Font,
            score,
            violations,
        }
    }
}
