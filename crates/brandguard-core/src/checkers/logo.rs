//! Logo placement checker.
//!
//! Validates each logo image against the geometric rules: minimum size,
//! aspect-ratio distortion, clear space, and allowed backgrounds.
//!
//! Clear space is evaluated only when the snapshot carries a position and
//! both canvas bounds for the logo; otherwise the check is skipped. This
//! mirrors the behavior of the extraction pipeline, which cannot always
//! resolve placement, and callers should not read a skipped check as a
//! pass on clear space.

use crate::color::normalize_hex;
use crate::ruleset::LogoRules;
use crate::snapshot::ImageElement;
use crate::types::{
    AnalysisRequest, Category, CategoryFinding, Dimension, Severity, Side, SuggestedFix,
    Violation, ViolationDetail,
};

use super::Checker;

/// Score deducted per violation on a single logo.
const PENALTY_PER_VIOLATION: f64 = 25.0;

/// The logo placement checker.
pub struct LogoChecker;

impl LogoChecker {
    pub fn new() -> Self {
        Self
    }

    /// Minimum-size violations for one logo. Width and height are
    /// reported independently.
    fn check_size(index: usize, logo: &ImageElement, rules: &LogoRules) -> Vec<Violation> {
        let mut violations = Vec::new();

        if logo.width < rules.min_width {
            violations.push(Violation {
                category: Category::Logo,
                severity: Severity::High,
                description: format!(
                    "Logo width {:.0}px is below the minimum {:.0}px",
                    logo.width, rules.min_width
                ),
                detail: ViolationDetail::LogoTooSmall {
                    image: index,
                    dimension: Dimension::Width,
                    actual: logo.width,
                    minimum: rules.min_width,
                },
                suggested_fix: Some(SuggestedFix::Advice {
                    note: format!("Scale the logo to at least {:.0}px wide", rules.min_width),
                }),
                auto_fixable: false,
                resolved: false,
            });
        }

        if logo.height < rules.min_height {
            violations.push(Violation {
                category: Category::Logo,
                severity: Severity::High,
                description: format!(
                    "Logo height {:.0}px is below the minimum {:.0}px",
                    logo.height, rules.min_height
                ),
                detail: ViolationDetail::LogoTooSmall {
                    image: index,
                    dimension: Dimension::Height,
                    actual: logo.height,
                    minimum: rules.min_height,
                },
                suggested_fix: Some(SuggestedFix::Advice {
                    note: format!("Scale the logo to at least {:.0}px tall", rules.min_height),
                }),
                auto_fixable: false,
                resolved: false,
            });
        }

        violations
    }

    /// Aspect-ratio distortion, when the original dimensions are known.
    fn check_distortion(
        index: usize,
        logo: &ImageElement,
        rules: &LogoRules,
    ) -> Option<Violation> {
        let original_width = logo.original_width?;
        let original_height = logo.original_height?;

        if original_width <= 0.0 || original_height <= 0.0 || logo.height <= 0.0 {
            return None;
        }

        let original_ratio = original_width / original_height;
        let current_ratio = logo.width / logo.height;
        let deviation = (original_ratio - current_ratio).abs() / original_ratio;

        if deviation <= rules.aspect_ratio_tolerance {
            return None;
        }

        Some(Violation {
            category: Category::Logo,
            severity: Severity::Medium,
            description: format!(
                "Logo is distorted: aspect ratio {:.3} deviates {:.1}% from the original {:.3}",
                current_ratio,
                deviation * 100.0,
                original_ratio
            ),
            detail: ViolationDetail::LogoDistorted {
                image: index,
                original_ratio,
                current_ratio,
                deviation,
            },
            suggested_fix: Some(SuggestedFix::Advice {
                note: "Restore the logo's original aspect ratio".to_string(),
            }),
            auto_fixable: false,
            resolved: false,
        })
    }

    /// Clear-space check, skipped when position or canvas bounds are
    /// absent. All failing sides are collected into one violation.
    fn check_clear_space(
        index: usize,
        logo: &ImageElement,
        rules: &LogoRules,
    ) -> Option<Violation> {
        let position = logo.position?;
        let canvas_width = logo.canvas_width?;
        let canvas_height = logo.canvas_height?;

        let required = logo.width.min(logo.height) * rules.clear_space_ratio;

        let margins = [
            (Side::Top, position.y),
            (Side::Left, position.x),
            (Side::Right, canvas_width - (position.x + logo.width)),
            (Side::Bottom, canvas_height - (position.y + logo.height)),
        ];

        let failing: Vec<Side> = margins
            .iter()
            .filter(|(_, margin)| *margin < required)
            .map(|(side, _)| *side)
            .collect();

        if failing.is_empty() {
            return None;
        }

        let side_names: Vec<&str> = failing.iter().map(|s| s.as_str()).collect();

        Some(Violation {
            category: Category::Logo,
            severity: Severity::Medium,
            description: format!(
                "Logo clear space below {:.0}px on: {}",
                required,
                side_names.join(", ")
            ),
            detail: ViolationDetail::LogoClearSpace {
                image: index,
                sides: failing,
                required,
            },
            suggested_fix: Some(SuggestedFix::Advice {
                note: format!("Keep at least {:.0}px of clear space around the logo", required),
            }),
            auto_fixable: false,
            resolved: false,
        })
    }

    /// Background allowlist check, when both the rule list and the
    /// snapshot background are present.
    fn check_background(
        index: usize,
        background: Option<&str>,
        rules: &LogoRules,
    ) -> Option<Violation> {
        if rules.allowed_backgrounds.is_empty() {
            return None;
        }
        let background = normalize_hex(background?)?;

        let allowed = rules
            .allowed_backgrounds
            .iter()
            .filter_map(|hex| normalize_hex(hex))
            .any(|hex| hex == background);

        if allowed {
            return None;
        }

        Some(Violation {
            category: Category::Logo,
            severity: Severity::Low,
            description: format!("Logo sits on background {} which is not allowed", background),
            detail: ViolationDetail::LogoBackground {
                image: index,
                background,
            },
            suggested_fix: Some(SuggestedFix::Advice {
                note: "Place the logo on an approved background color".to_string(),
            }),
            auto_fixable: false,
            resolved: false,
        })
    }
}

impl Default for LogoChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for LogoChecker {
    fn category(&self) -> Category {
        Category::Logo
    }

    fn check(&self, request: &AnalysisRequest) -> CategoryFinding {
        let rules = &request.ruleset.logo;
        let snapshot = &request.snapshot;

        let logos: Vec<_> = snapshot.logos().collect();
        if logos.is_empty() {
            // Absence of a logo is not a violation.
            return CategoryFinding::clean(Category::Logo);
        }

        let mut violations = Vec::new();
        let mut score_sum = 0.0;

        for (index, logo) in &logos {
            let mut logo_violations = Self::check_size(*index, logo, rules);
            logo_violations.extend(Self::check_distortion(*index, logo, rules));
            logo_violations.extend(Self::check_clear_space(*index, logo, rules));
            logo_violations.extend(Self::check_background(
                *index,
                snapshot.background_color.as_deref(),
                rules,
            ));

            let logo_score =
                (100.0 - PENALTY_PER_VIOLATION * logo_violations.len() as f64).max(0.0);
            score_sum += logo_score;
            violations.extend(logo_violations);
        }

        CategoryFinding {
            category: Category::Logo,
            score: score_sum / logos.len() as f64,
            violations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ruleset::RuleSet;
    use crate::snapshot::{DesignSnapshot, ImageType, Position};

    fn logo(width: f64, height: f64) -> ImageElement {
        ImageElement {
            image_type: ImageType::Logo,
            width,
            height,
            alt_text: None,
            position: None,
            canvas_width: None,
            canvas_height: None,
            original_width: None,
            original_height: None,
        }
    }

    fn request(images: Vec<ImageElement>, rules: LogoRules) -> AnalysisRequest {
        AnalysisRequest {
            ruleset: RuleSet {
                name: "Test".to_string(),
                logo: rules,
                ..Default::default()
            },
            snapshot: DesignSnapshot {
                images,
                ..Default::default()
            },
        }
    }

    fn strict_rules() -> LogoRules {
        LogoRules {
            min_width: 100.0,
            min_height: 50.0,
            clear_space_ratio: 0.5,
            aspect_ratio_tolerance: 0.05,
            allowed_backgrounds: Vec::new(),
        }
    }

    #[test]
    fn no_logos_scores_100() {
        let checker = LogoChecker::new();
        let finding = checker.check(&request(vec![], strict_rules()));
        assert_eq!(finding.score, 100.0);
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn undersized_logo_reports_both_dimensions() {
        // 80x40 against 100x50 minimums: width and height each violate,
        // score 50.
        let checker = LogoChecker::new();
        let finding = checker.check(&request(vec![logo(80.0, 40.0)], strict_rules()));

        assert_eq!(finding.violations.len(), 2);
        assert_eq!(finding.score, 50.0);
        assert!(finding.violations.iter().all(|v| !v.auto_fixable));

        let dimensions: Vec<_> = finding
            .violations
            .iter()
            .filter_map(|v| match &v.detail {
                ViolationDetail::LogoTooSmall { dimension, .. } => Some(*dimension),
                _ => None,
            })
            .collect();
        assert!(dimensions.contains(&Dimension::Width));
        assert!(dimensions.contains(&Dimension::Height));
    }

    #[test]
    fn compliant_logo_scores_100() {
        let checker = LogoChecker::new();
        let finding = checker.check(&request(vec![logo(200.0, 100.0)], strict_rules()));
        assert_eq!(finding.score, 100.0);
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn distortion_beyond_tolerance_violates() {
        let checker = LogoChecker::new();
        let mut distorted = logo(200.0, 100.0);
        distorted.original_width = Some(100.0);
        distorted.original_height = Some(100.0);

        let finding = checker.check(&request(vec![distorted], strict_rules()));
        assert_eq!(finding.violations.len(), 1);
        assert!(matches!(
            finding.violations[0].detail,
            ViolationDetail::LogoDistorted { .. }
        ));
    }

    #[test]
    fn distortion_within_tolerance_passes() {
        let checker = LogoChecker::new();
        let mut scaled = logo(200.0, 100.0);
        scaled.original_width = Some(400.0);
        scaled.original_height = Some(200.0);

        let finding = checker.check(&request(vec![scaled], strict_rules()));
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn clear_space_lists_every_failing_side_once() {
        let checker = LogoChecker::new();
        let mut cramped = logo(200.0, 100.0);
        // min(200, 100) * 0.5 = 50px required per side. Top and left at
        // 10px fail; right (590) and bottom (490) pass.
        cramped.position = Some(Position { x: 10.0, y: 10.0 });
        cramped.canvas_width = Some(800.0);
        cramped.canvas_height = Some(600.0);

        let finding = checker.check(&request(vec![cramped], strict_rules()));
        assert_eq!(finding.violations.len(), 1);

        match &finding.violations[0].detail {
            ViolationDetail::LogoClearSpace { sides, required, .. } => {
                assert_eq!(*required, 50.0);
                assert_eq!(sides.as_slice(), &[Side::Top, Side::Left]);
            }
            other => panic!("expected clear space violation, got {:?}", other),
        }
    }

    #[test]
    fn clear_space_skipped_without_position() {
        let checker = LogoChecker::new();
        let mut floating = logo(200.0, 100.0);
        floating.canvas_width = Some(210.0);
        floating.canvas_height = Some(110.0);
        // No position: the cramped canvas must not be flagged.

        let finding = checker.check(&request(vec![floating], strict_rules()));
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn disallowed_background_violates() {
        let checker = LogoChecker::new();
        let mut rules = strict_rules();
        rules.allowed_backgrounds = vec!["#ffffff".to_string(), "#000".to_string()];

        let mut req = request(vec![logo(200.0, 100.0)], rules);
        req.snapshot.background_color = Some("#ff00ff".to_string());

        let finding = checker.check(&req);
        assert_eq!(finding.violations.len(), 1);
        assert!(matches!(
            finding.violations[0].detail,
            ViolationDetail::LogoBackground { .. }
        ));
    }

    #[test]
    fn allowed_background_passes_shorthand() {
        let checker = LogoChecker::new();
        let mut rules = strict_rules();
        rules.allowed_backgrounds = vec!["#000".to_string()];

        let mut req = request(vec![logo(200.0, 100.0)], rules);
        req.snapshot.background_color = Some("#000000".to_string());

        let finding = checker.check(&req);
        assert!(finding.violations.is_empty());
    }

    #[test]
    fn score_is_mean_across_logos() {
        let checker = LogoChecker::new();
        // One clean logo (100) and one with two size violations (50).
        let finding = checker.check(&request(
            vec![logo(200.0, 100.0), logo(80.0, 40.0)],
            strict_rules(),
        ));
        assert_eq!(finding.score, 75.0);
    }

    #[test]
    fn non_logo_images_are_ignored() {
        let checker = LogoChecker::new();
        let mut photo = logo(10.0, 10.0);
        photo.image_type = ImageType::Photo;

        let finding = checker.check(&request(vec![photo], strict_rules()));
        assert_eq!(finding.score, 100.0);
        assert!(finding.violations.is_empty());
    }
}
