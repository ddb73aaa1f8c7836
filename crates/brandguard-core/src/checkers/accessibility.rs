//! Accessibility checker: WCAG contrast and alt-text compliance.
//!
//! Contrast math reuses the luminance primitives from [`crate::color`].
//! A text element is checked against the large-text threshold when its
//! size qualifies (24px, or 18.66px when bold). Contrast is evaluated
//! only when both the element color and the snapshot background resolve
//! to valid hex; unparsable or missing colors skip the check for that
//! element rather than failing the run.

use crate::color::contrast_ratio_hex;
use crate::ruleset::AccessibilityRules;
use crate::snapshot::{ImageType, TextElement};
use crate::types::{
    AnalysisRequest, Category, CategoryFinding, Severity, SuggestedFix, Violation,
    ViolationDetail,
};

use super::Checker;

/// Font size at which any text counts as large (px).
const LARGE_TEXT_SIZE: f64 = 24.0;

/// Font size at which bold text counts as large (px).
const LARGE_BOLD_TEXT_SIZE: f64 = 18.66;

/// Smallest legible font size (px). Below this is auto-fixable.
pub const MIN_FONT_SIZE: f64 = 12.0;

/// Fraction of the required ratio below which a contrast violation is
/// high severity rather than medium.
const HIGH_SEVERITY_FRACTION: f64 = 0.7;

/// Weight of text compliance in the category score.
const TEXT_WEIGHT: f64 = 0.7;

/// Weight of image compliance in the category score.
const IMAGE_WEIGHT: f64 = 0.3;

/// The accessibility checker.
pub struct AccessibilityChecker;

impl AccessibilityChecker {
    pub fn new() -> Self {
        Self
    }

    /// Whether an element qualifies as WCAG large text.
    fn is_large_text(element: &TextElement) -> bool {
        element.font_size >= LARGE_TEXT_SIZE
            || (element.is_bold && element.font_size >= LARGE_BOLD_TEXT_SIZE)
    }

    /// Required contrast ratio for an element under these rules.
    fn required_ratio(element: &TextElement, rules: &AccessibilityRules) -> f64 {
        if Self::is_large_text(element) {
            rules.large_text_min_contrast
        } else {
            rules.min_contrast_ratio
        }
    }

    /// Contrast violation for one element, when it can be evaluated.
    fn check_contrast(
        index: usize,
        element: &TextElement,
        background: Option<&str>,
        rules: &AccessibilityRules,
    ) -> Option<Violation> {
        let color = element.color.as_deref()?;
        let ratio = contrast_ratio_hex(color, background?)?;
        let required = Self::required_ratio(element, rules);

        if ratio >= required {
            return None;
        }

        let severity = if ratio < required * HIGH_SEVERITY_FRACTION {
            Severity::High
        } else {
            Severity::Medium
        };

        Some(Violation {
            category: Category::Accessibility,
            severity,
            description: format!(
                "Text {:?} has contrast {:.2}:1, below the required {:.1}:1",
                truncate(&element.text),
                ratio,
                required
            ),
            detail: ViolationDetail::LowContrast {
                element: index,
                ratio,
                required,
            },
            suggested_fix: Some(SuggestedFix::Advice {
                note: "Darken the text or lighten the background to raise contrast".to_string(),
            }),
            auto_fixable: false,
            resolved: false,
        })
    }

    /// Font-size violation for one element.
    fn check_font_size(index: usize, element: &TextElement) -> Option<Violation> {
        if element.font_size >= MIN_FONT_SIZE {
            return None;
        }

        Some(Violation {
            category: Category::Accessibility,
            severity: Severity::Medium,
            description: format!(
                "Text {:?} uses font size {:.0}px, below the {:.0}px minimum",
                truncate(&element.text),
                element.font_size,
                MIN_FONT_SIZE
            ),
            detail: ViolationDetail::SmallFontSize {
                element: index,
                size: element.font_size,
            },
            suggested_fix: Some(SuggestedFix::RaiseFontSize {
                minimum: MIN_FONT_SIZE,
            }),
            auto_fixable: true,
            resolved: false,
        })
    }
}

impl Default for AccessibilityChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for AccessibilityChecker {
    fn category(&self) -> Category {
        Category::Accessibility
    }

    fn check(&self, request: &AnalysisRequest) -> CategoryFinding {
        let rules = &request.ruleset.accessibility;
        let snapshot = &request.snapshot;

        if snapshot.text_content.is_empty() && snapshot.images.is_empty() {
            return CategoryFinding::clean(Category::Accessibility);
        }

        let mut violations = Vec::new();

        let mut compliant_text = 0usize;
        for (index, element) in snapshot.text_content.iter().enumerate() {
            let mut element_violations = Vec::new();
            element_violations.extend(Self::check_contrast(
                index,
                element,
                snapshot.background_color.as_deref(),
                rules,
            ));
            element_violations.extend(Self::check_font_size(index, element));

            if element_violations.is_empty() {
                compliant_text += 1;
            }
            violations.extend(element_violations);
        }

        let mut compliant_images = 0usize;
        for (index, image) in snapshot.images.iter().enumerate() {
            // Backgrounds are decorative and never need alt text.
            let needs_alt = rules.require_alt_text && image.image_type != ImageType::Background;
            let has_alt = image
                .alt_text
                .as_deref()
                .is_some_and(|alt| !alt.trim().is_empty());

            if needs_alt && !has_alt {
                violations.push(Violation {
                    category: Category::Accessibility,
                    severity: Severity::Medium,
                    description: format!("Image {} is missing alt text", index),
                    detail: ViolationDetail::MissingAltText { image: index },
                    suggested_fix: Some(SuggestedFix::Advice {
                        note: "Describe the image content in its alt text".to_string(),
                    }),
                    auto_fixable: false,
                    resolved: false,
                });
            } else {
                compliant_images += 1;
            }
        }

        let text_rate = if snapshot.text_content.is_empty() {
            100.0
        } else {
            100.0 * compliant_text as f64 / snapshot.text_content.len() as f64
        };
        let image_rate = if snapshot.images.is_empty() {
            100.0
        } else {
            100.0 * compliant_images as f64 / snapshot.images.len() as f64
        };

        CategoryFinding {
            category: Category::Accessibility,
            score: TEXT_WEIGHT * text_rate + IMAGE_WEIGHT * image_rate,
            violations,
        }
    }
}

fn truncate(text: &str) -> String {
    const MAX: usize = 32;
    if text.chars().count() <= MAX {
        text.to_string()
    } else {
        let head: String = text.chars().take(MAX).collect();
        format!("{head}…")
    }
}
