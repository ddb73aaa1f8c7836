//! Auto-fix engine.
//!
//! Turns the auto-fixable subset of a violation list into concrete
//! field-level edits against a design snapshot. Fix generation is pure:
//! `plan` never touches the snapshot, and `apply` builds a fresh snapshot
//! rather than mutating the caller's value. `plan` and `apply` share the
//! same generation path, so a preview's fix lists are identical to what
//! an apply would report.

use crate::checkers::normalize_font;
use crate::color::normalize_hex;
use crate::snapshot::DesignSnapshot;
use crate::types::{
    AppliedFix, Category, FixResult, SkippedFix, SuggestedFix, Violation, ViolationDetail,
};

/// Fix lists produced without applying anything.
#[derive(Debug, Clone, PartialEq)]
pub struct FixPlan {
    pub applied_fixes: Vec<AppliedFix>,
    pub skipped_fixes: Vec<SkippedFix>,
}

/// One concrete, deterministic edit.
#[derive(Debug, Clone, PartialEq)]
enum FixAction {
    /// Replace a normalized hex everywhere it appears.
    ReplaceColor { from: String, to: String },
    /// Replace a font family everywhere it appears (normalized match).
    ReplaceFont { from: String, to: String },
    /// Raise every font size below the minimum up to it.
    RaiseFontSize { minimum: f64 },
}

/// The auto-fix engine.
pub struct AutoFixEngine;

impl AutoFixEngine {
    pub fn new() -> Self {
        Self
    }

    /// Generate the fix lists for a violation set without applying them.
    pub fn plan(&self, violations: &[Violation], snapshot: &DesignSnapshot) -> FixPlan {
        let mut applied_fixes = Vec::new();
        let mut skipped_fixes = Vec::new();
        let mut actions: Vec<FixAction> = Vec::new();

        for violation in violations {
            if violation.resolved {
                continue;
            }

            if !violation.auto_fixable {
                skipped_fixes.push(SkippedFix {
                    category: violation.category,
                    description: violation.description.clone(),
                    reason: skip_reason(&violation.detail).to_string(),
                });
                continue;
            }

            let Some(action) = derive_action(violation) else {
                skipped_fixes.push(SkippedFix {
                    category: violation.category,
                    description: violation.description.clone(),
                    reason: "violation carries no applicable suggested fix".to_string(),
                });
                continue;
            };

            // Two violations can imply the same edit; apply it once.
            if actions.contains(&action) {
                continue;
            }

            let sites = count_sites(&action, snapshot);
            if sites == 0 {
                skipped_fixes.push(SkippedFix {
                    category: violation.category,
                    description: violation.description.clone(),
                    reason: "target no longer present in the snapshot".to_string(),
                });
                continue;
            }

            applied_fixes.push(describe(&action, violation.category, sites));
            actions.push(action);
        }

        FixPlan {
            applied_fixes,
            skipped_fixes,
        }
    }

    /// Apply every planned fix, returning a fresh snapshot.
    ///
    /// The input snapshot is never mutated; callers can rely on
    /// before/after deep equality of their own value.
    pub fn apply(&self, violations: &[Violation], snapshot: &DesignSnapshot) -> FixResult {
        let plan = self.plan(violations, snapshot);

        let mut fixed = snapshot.clone();
        for violation in violations {
            if violation.resolved || !violation.auto_fixable {
                continue;
            }
            if let Some(action) = derive_action(violation) {
                apply_action(&action, &mut fixed);
            }
        }

        FixResult {
            fixed_snapshot: fixed,
            applied_fixes: plan.applied_fixes,
            skipped_fixes: plan.skipped_fixes,
        }
    }
}

impl Default for AutoFixEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a violation's suggested fix to a concrete action.
fn derive_action(violation: &Violation) -> Option<FixAction> {
    match violation.suggested_fix.as_ref()? {
        SuggestedFix::ReplaceColor { from, to } => Some(FixAction::ReplaceColor {
            from: normalize_hex(from)?,
            to: to.clone(),
        }),
        SuggestedFix::ReplaceFont { from, to } => Some(FixAction::ReplaceFont {
            from: from.clone(),
            to: to.clone(),
        }),
        SuggestedFix::RaiseFontSize { minimum } => Some(FixAction::RaiseFontSize {
            minimum: *minimum,
        }),
        SuggestedFix::Advice { .. } => None,
    }
}

/// How many snapshot fields an action would touch.
fn count_sites(action: &FixAction, snapshot: &DesignSnapshot) -> usize {
    match action {
        FixAction::ReplaceColor { from, .. } => {
            let in_palette = snapshot
                .colors_used
                .iter()
                .filter(|c| normalize_hex(c).as_deref() == Some(from.as_str()))
                .count();
            let in_text = snapshot
                .text_content
                .iter()
                .filter_map(|t| t.color.as_deref())
                .filter(|c| normalize_hex(c).as_deref() == Some(from.as_str()))
                .count();
            in_palette + in_text
        }
        FixAction::ReplaceFont { from, .. } => {
            let target = normalize_font(from);
            let in_list = snapshot
                .fonts_used
                .iter()
                .filter(|f| normalize_font(f) == target)
                .count();
            let in_text = snapshot
                .text_content
                .iter()
                .filter(|t| normalize_font(&t.font) == target)
                .count();
            in_list + in_text
        }
        FixAction::RaiseFontSize { minimum } => snapshot
            .text_content
            .iter()
            .filter(|t| t.font_size < *minimum)
            .count(),
    }
}

/// Mutate a (cloned) snapshot per one action.
fn apply_action(action: &FixAction, snapshot: &mut DesignSnapshot) {
    match action {
        FixAction::ReplaceColor { from, to } => {
            for color in &mut snapshot.colors_used {
                if normalize_hex(color).as_deref() == Some(from.as_str()) {
                    *color = to.clone();
                }
            }
            for element in &mut snapshot.text_content {
                if let Some(color) = &element.color {
                    if normalize_hex(color).as_deref() == Some(from.as_str()) {
                        element.color = Some(to.clone());
                    }
                }
            }
        }
        FixAction::ReplaceFont { from, to } => {
            let target = normalize_font(from);
            for font in &mut snapshot.fonts_used {
                if normalize_font(font) == target {
                    *font = to.clone();
                }
            }
            for element in &mut snapshot.text_content {
                if normalize_font(&element.font) == target {
                    element.font = to.clone();
                }
            }
        }
        FixAction::RaiseFontSize { minimum } => {
            for element in &mut snapshot.text_content {
                if element.font_size < *minimum {
                    element.font_size = *minimum;
                }
            }
        }
    }
}

/// Build the applied-fix record for an action.
fn describe(action: &FixAction, category: Category, sites: usize) -> AppliedFix {
    let places = if sites == 1 { "place" } else { "places" };
    match action {
        FixAction::ReplaceColor { from, to } => AppliedFix {
            category,
            before: from.clone(),
            after: to.clone(),
            description: format!("Replaced color {} with {} in {} {}", from, to, sites, places),
        },
        FixAction::ReplaceFont { from, to } => AppliedFix {
            category,
            before: from.clone(),
            after: to.clone(),
            description: format!(
                "Replaced font {:?} with {:?} in {} {}",
                from, to, sites, places
            ),
        },
        FixAction::RaiseFontSize { minimum } => AppliedFix {
            category,
            before: format!("< {minimum}px"),
            after: format!("{minimum}px"),
            description: format!(
                "Raised font size to {}px for {} text element{}",
                minimum,
                sites,
                if sites == 1 { "" } else { "s" }
            ),
        },
    }
}

/// Why a violation class cannot be fixed automatically.
fn skip_reason(detail: &ViolationDetail) -> &'static str {
    match detail {
        ViolationDetail::LogoTooSmall { .. }
        | ViolationDetail::LogoDistorted { .. }
        | ViolationDetail::LogoClearSpace { .. }
        | ViolationDetail::LogoBackground { .. } => {
            "logo geometry must be adjusted in the editor"
        }
        ViolationDetail::LowContrast { .. } => {
            "contrast fixes require a design decision between text and background"
        }
        ViolationDetail::MissingAltText { .. } => "alt text must be written by a person",
        ViolationDetail::BannedWord { .. }
        | ViolationDetail::MissingPhrase { .. }
        | ViolationDetail::LongSentence { .. }
        | ViolationDetail::ToneMismatch { .. } => "copy changes require a rewrite",
        ViolationDetail::InvalidColor { .. } => "no brand color was suggested as a replacement",
        ViolationDetail::WrongFontUsage { .. } => {
            "role reassignment must be decided in the design"
        }
        ViolationDetail::NoBrandColors | ViolationDetail::NoBrandFonts => {
            "the rule set itself is incomplete"
        }
        _ => "no deterministic edit exists for this violation",
    }
}
