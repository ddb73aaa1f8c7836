//! Core types for brand-compliance evaluation.
//!
//! These are the data structures shared by the checkers, the aggregator,
//! and the auto-fix engine: violations, per-category findings, and the
//! final compliance report.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ruleset::{FontUsage, RuleSet, ToneStyle};
use crate::snapshot::DesignSnapshot;

/// The five compliance categories.
///
/// The array order of [`Category::ALL`] is the canonical report order:
/// violations are always concatenated color, font, logo, accessibility,
/// tone.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Color,
    Font,
    Logo,
    Accessibility,
    Tone,
}

impl Category {
    /// Canonical category order for deterministic report assembly.
    pub const ALL: [Category; 5] = [
        Category::Color,
        Category::Font,
        Category::Logo,
        Category::Accessibility,
        Category::Tone,
    ];

    /// String form used in serialized reports and CLI output.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Color => "color",
            Category::Font => "font",
            Category::Logo => "logo",
            Category::Accessibility => "accessibility",
            Category::Tone => "tone",
        }
    }

    /// The compliance question this category answers.
    pub fn concern(&self) -> &'static str {
        match self {
            Category::Color => "Are the design's colors within brand palette tolerances?",
            Category::Font => "Are all fonts approved brand fonts used in the right roles?",
            Category::Logo => "Are logo placements sized and spaced per the guidelines?",
            Category::Accessibility => "Is text legible and imagery described for all users?",
            Category::Tone => "Does the copy match the brand voice?",
        }
    }
}

/// How serious a single violation is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    High,
    Medium,
    Low,
}

/// Which logo dimension fell below its minimum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Width,
    Height,
}

/// A side of a logo's bounding box.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Top,
    Left,
    Right,
    Bottom,
}

impl Side {
    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Top => "top",
            Side::Left => "left",
            Side::Right => "right",
            Side::Bottom => "bottom",
        }
    }
}

/// The rule color closest to an off-brand design color.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosestColor {
    pub name: String,
    pub hex: String,
    /// Delta-E (CIE76) between the design color and this rule color.
    pub distance: f64,
}

/// The rule font most similar to an off-brand design font.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClosestFont {
    pub name: String,
    /// Word-overlap similarity in `[0, 1]`.
    pub similarity: f64,
}

/// Structured payload identifying what a violation is about.
///
/// The original report format carried untyped "mixed" payloads keyed by
/// violation type; this union keeps one typed variant per defect class.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ViolationDetail {
    /// A design color outside every rule color's tolerance.
    OffBrandColor {
        hex: String,
        closest: Option<ClosestColor>,
    },
    /// A design color that is not parseable hex at all.
    InvalidColor { value: String },
    /// The ruleset defines no colors to check against.
    NoBrandColors,
    /// A design font matching no rule font or fallback.
    OffBrandFont {
        name: String,
        closest: Option<ClosestFont>,
    },
    /// An approved font used in the wrong role.
    WrongFontUsage {
        name: String,
        expected: FontUsage,
        actual: FontUsage,
    },
    /// The ruleset defines no fonts to check against.
    NoBrandFonts,
    /// A logo rendered below the minimum width or height.
    LogoTooSmall {
        image: usize,
        dimension: Dimension,
        actual: f64,
        minimum: f64,
    },
    /// A logo stretched beyond the aspect-ratio tolerance.
    LogoDistorted {
        image: usize,
        original_ratio: f64,
        current_ratio: f64,
        deviation: f64,
    },
    /// A logo with insufficient clear space on one or more sides.
    LogoClearSpace {
        image: usize,
        sides: Vec<Side>,
        required: f64,
    },
    /// A logo placed on a background outside the allowed list.
    LogoBackground { image: usize, background: String },
    /// A text element below its required contrast ratio.
    LowContrast {
        element: usize,
        ratio: f64,
        required: f64,
    },
    /// A text element below the minimum legible font size.
    SmallFontSize { element: usize, size: f64 },
    /// An image (other than a decorative background) without alt text.
    MissingAltText { image: usize },
    /// A banned word present in the copy.
    BannedWord { word: String, occurrences: usize },
    /// A required phrase absent from the copy.
    MissingPhrase { phrase: String },
    /// A sentence over the configured word limit.
    LongSentence {
        sentence: usize,
        words: usize,
        limit: usize,
    },
    /// Detected tone differs from the required style.
    ToneMismatch {
        expected: ToneStyle,
        detected: String,
    },
}

/// Concrete remediation attached to a violation.
///
/// `ReplaceColor`, `ReplaceFont`, and `RaiseFontSize` are the
/// auto-fixable variants; `Advice` is guidance only.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum SuggestedFix {
    ReplaceColor { from: String, to: String },
    ReplaceFont { from: String, to: String },
    RaiseFontSize { minimum: f64 },
    Advice { note: String },
}

/// A single detected deviation from the rule set.
///
/// Violations are created only by checkers. `resolved` belongs to the
/// caller: the engine sets it to `false` and never flips it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Violation {
    pub category: Category,
    pub severity: Severity,
    pub description: String,
    pub detail: ViolationDetail,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggested_fix: Option<SuggestedFix>,
    pub auto_fixable: bool,
    #[serde(default)]
    pub resolved: bool,
}

/// Finding from a single category checker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFinding {
    pub category: Category,
    /// Raw category score in `[0, 100]`, unrounded.
    pub score: f64,
    pub violations: Vec<Violation>,
}

impl CategoryFinding {
    /// A perfect finding with no violations.
    pub fn clean(category: Category) -> Self {
        Self {
            category,
            score: 100.0,
            violations: Vec::new(),
        }
    }
}

/// Findings from all five checkers, one slot per category.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFindings {
    pub color: CategoryFinding,
    pub font: CategoryFinding,
    pub logo: CategoryFinding,
    pub accessibility: CategoryFinding,
    pub tone: CategoryFinding,
}

impl CategoryFindings {
    /// Findings in canonical category order.
    pub fn in_order(&self) -> [&CategoryFinding; 5] {
        [
            &self.color,
            &self.font,
            &self.logo,
            &self.accessibility,
            &self.tone,
        ]
    }
}

/// Per-category sub-score in the final report.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryScore {
    pub category: Category,
    /// Rounded score in `[0, 100]`.
    pub score: u32,
    /// Weight applied during aggregation, in `[0, 5]`.
    pub weight: f64,
    pub violation_count: usize,
}

/// Qualitative tier for an overall score.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ScoreLabel {
    Excellent,
    Good,
    NeedsWork,
    Poor,
}

impl ScoreLabel {
    /// Minimum score for the Excellent tier.
    pub const EXCELLENT_MIN: u32 = 90;
    /// Minimum score for the Good tier.
    pub const GOOD_MIN: u32 = 70;
    /// Minimum score for the NeedsWork tier.
    pub const NEEDS_WORK_MIN: u32 = 50;

    /// Classify a rounded overall score.
    pub fn from_score(score: u32) -> Self {
        if score >= Self::EXCELLENT_MIN {
            ScoreLabel::Excellent
        } else if score >= Self::GOOD_MIN {
            ScoreLabel::Good
        } else if score >= Self::NEEDS_WORK_MIN {
            ScoreLabel::NeedsWork
        } else {
            ScoreLabel::Poor
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => "excellent",
            ScoreLabel::Good => "good",
            ScoreLabel::NeedsWork => "needs_work",
            ScoreLabel::Poor => "poor",
        }
    }

    /// The canned summary sentence for this tier.
    pub fn summary(&self) -> &'static str {
        match self {
            ScoreLabel::Excellent => {
                "Excellent brand compliance. The design follows the guidelines closely."
            }
            ScoreLabel::Good => {
                "Good brand compliance with a few deviations worth reviewing."
            }
            ScoreLabel::NeedsWork => {
                "The design needs work: several guideline violations should be addressed."
            }
            ScoreLabel::Poor => {
                "Poor brand compliance. The design departs substantially from the guidelines."
            }
        }
    }
}

/// The final compliance report.
///
/// A plain serializable value with no references back into caller-owned
/// data; persisting or transporting it is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ComplianceReport {
    /// Weighted overall score, rounded to `[0, 100]`.
    pub compliance_score: u32,
    pub score_label: ScoreLabel,
    pub summary: String,
    pub category_scores: Vec<CategoryScore>,
    pub violations: Vec<Violation>,
    /// When the analysis ran. Caller-suppliable for reproducible runs.
    pub analyzed_at: DateTime<Utc>,
}

impl ComplianceReport {
    /// Violations of a single category, in report order.
    pub fn violations_for(&self, category: Category) -> impl Iterator<Item = &Violation> {
        self.violations.iter().filter(move |v| v.category == category)
    }
}

/// One concrete edit applied by the auto-fix engine.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppliedFix {
    pub category: Category,
    pub before: String,
    pub after: String,
    pub description: String,
}

/// A violation the auto-fix engine could not resolve.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SkippedFix {
    pub category: Category,
    pub description: String,
    pub reason: String,
}

/// Result of running the auto-fix engine over a violation list.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixResult {
    /// A fresh snapshot with all fixes applied. The input snapshot is
    /// never mutated.
    pub fixed_snapshot: DesignSnapshot,
    pub applied_fixes: Vec<AppliedFix>,
    pub skipped_fixes: Vec<SkippedFix>,
}

/// Inputs for one analysis run.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub ruleset: RuleSet,
    pub snapshot: DesignSnapshot,
}
