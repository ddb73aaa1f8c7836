//! Brand rule set parsing from YAML/JSON.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a rule set.
#[derive(Error, Debug)]
pub enum RuleSetError {
    #[error("Failed to read rule set file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Rule set validation failed: {0}")]
    Validation(String),

    #[error("Missing required field: {0}")]
    MissingField(String),
}

/// Role a brand color plays in the design system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColorUsage {
    Primary,
    Secondary,
    Accent,
    Background,
    Text,
    #[default]
    Any,
}

/// Role a brand font plays in the design system.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontUsage {
    Heading,
    Body,
    Accent,
    #[default]
    Any,
}

impl FontUsage {
    pub fn as_str(&self) -> &'static str {
        match self {
            FontUsage::Heading => "heading",
            FontUsage::Body => "body",
            FontUsage::Accent => "accent",
            FontUsage::Any => "any",
        }
    }
}

/// Brand voice the copy should carry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ToneStyle {
    Formal,
    Casual,
    Professional,
    Friendly,
    #[default]
    Any,
}

impl ToneStyle {
    pub fn as_str(&self) -> &'static str {
        match self {
            ToneStyle::Formal => "formal",
            ToneStyle::Casual => "casual",
            ToneStyle::Professional => "professional",
            ToneStyle::Friendly => "friendly",
            ToneStyle::Any => "any",
        }
    }
}

/// A named brand color with a perceptual tolerance.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ColorRule {
    pub name: String,

    /// Canonical hex value (`#rrggbb` or shorthand).
    pub hex: String,

    /// Maximum acceptable Delta-E from this color, `0..=100`.
    /// Defaults to 10 when unset.
    #[serde(default)]
    pub tolerance: Option<f64>,

    #[serde(default)]
    pub usage: ColorUsage,
}

impl ColorRule {
    /// Delta-E threshold applied when matching against this color.
    pub const DEFAULT_TOLERANCE: f64 = 10.0;

    pub fn tolerance(&self) -> f64 {
        self.tolerance.unwrap_or(Self::DEFAULT_TOLERANCE)
    }
}

/// A named brand font with its accepted fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FontRule {
    pub name: String,

    /// Alternative family names treated as equivalent to `name`.
    #[serde(default)]
    pub fallbacks: Vec<String>,

    #[serde(default)]
    pub usage: FontUsage,

    /// Permitted weights (e.g. 400, 700). Empty means unrestricted.
    #[serde(default)]
    pub weights: Vec<u32>,
}

/// Geometric constraints on logo placements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogoRules {
    #[serde(default = "default_min_width")]
    pub min_width: f64,

    #[serde(default = "default_min_height")]
    pub min_height: f64,

    /// Required clear space per side as a fraction of `min(width, height)`.
    #[serde(default = "default_clear_space_ratio")]
    pub clear_space_ratio: f64,

    /// Maximum relative deviation from the original aspect ratio.
    #[serde(default = "default_aspect_ratio_tolerance")]
    pub aspect_ratio_tolerance: f64,

    /// Hex backgrounds the logo may sit on. Empty means unrestricted.
    #[serde(default)]
    pub allowed_backgrounds: Vec<String>,
}

fn default_min_width() -> f64 {
    100.0
}

fn default_min_height() -> f64 {
    50.0
}

fn default_clear_space_ratio() -> f64 {
    0.5
}

fn default_aspect_ratio_tolerance() -> f64 {
    0.05
}

impl Default for LogoRules {
    fn default() -> Self {
        Self {
            min_width: default_min_width(),
            min_height: default_min_height(),
            clear_space_ratio: default_clear_space_ratio(),
            aspect_ratio_tolerance: default_aspect_ratio_tolerance(),
            allowed_backgrounds: Vec::new(),
        }
    }
}

/// Contrast and alt-text requirements.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AccessibilityRules {
    /// Required contrast ratio for normal text. WCAG AA default.
    #[serde(default = "default_min_contrast")]
    pub min_contrast_ratio: f64,

    /// Required contrast ratio for large text. WCAG AA default.
    #[serde(default = "default_large_text_contrast")]
    pub large_text_min_contrast: f64,

    #[serde(default = "default_true")]
    pub require_alt_text: bool,
}

fn default_min_contrast() -> f64 {
    4.5
}

fn default_large_text_contrast() -> f64 {
    3.0
}

fn default_true() -> bool {
    true
}

impl Default for AccessibilityRules {
    fn default() -> Self {
        Self {
            min_contrast_ratio: default_min_contrast(),
            large_text_min_contrast: default_large_text_contrast(),
            require_alt_text: true,
        }
    }
}

/// Voice rules for the design's copy.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ToneRules {
    #[serde(default)]
    pub style: ToneStyle,

    /// Words that must not appear (whole-word, case-insensitive).
    #[serde(default)]
    pub banned_words: Vec<String>,

    /// Phrases that must appear somewhere in the copy.
    #[serde(default)]
    pub required_phrases: Vec<String>,

    /// Maximum words per sentence, when configured.
    #[serde(default)]
    pub max_sentence_length: Option<usize>,
}

/// A brand guideline document: the rules a design is checked against.
///
/// A rule set with zero colors or zero fonts is a valid input; the
/// engine scores it rather than rejecting it.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct RuleSet {
    /// Human-readable name.
    pub name: String,

    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub colors: Vec<ColorRule>,

    #[serde(default)]
    pub fonts: Vec<FontRule>,

    #[serde(default)]
    pub logo: LogoRules,

    #[serde(default)]
    pub accessibility: AccessibilityRules,

    #[serde(default)]
    pub tone: ToneRules,
}

impl RuleSet {
    /// Parse a rule set from a YAML string and validate it.
    pub fn from_yaml(yaml: &str) -> Result<Self, RuleSetError> {
        let ruleset: RuleSet = serde_yaml::from_str(yaml)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Parse a rule set from a JSON string and validate it.
    pub fn from_json(json: &str) -> Result<Self, RuleSetError> {
        let ruleset: RuleSet = serde_json::from_str(json)?;
        ruleset.validate()?;
        Ok(ruleset)
    }

    /// Parse a rule set from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a rule set from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, RuleSetError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Validate structural invariants.
    ///
    /// Rejects only defects that would make scoring meaningless for a
    /// single rule: an empty name, out-of-range tolerances, duplicate
    /// rule names, negative logo minima. Empty rule collections pass.
    pub fn validate(&self) -> Result<(), RuleSetError> {
        if self.name.trim().is_empty() {
            return Err(RuleSetError::MissingField("name".to_string()));
        }

        for color in &self.colors {
            if let Some(tolerance) = color.tolerance {
                if !(0.0..=100.0).contains(&tolerance) {
                    return Err(RuleSetError::Validation(format!(
                        "color '{}' tolerance {} outside 0-100",
                        color.name, tolerance
                    )));
                }
            }
        }

        if self.logo.min_width < 0.0 || self.logo.min_height < 0.0 {
            return Err(RuleSetError::Validation(
                "logo minimum dimensions must be non-negative".to_string(),
            ));
        }

        self.validate_unique_names()?;

        Ok(())
    }

    /// Rule names must be unique (case-insensitive) within their section.
    fn validate_unique_names(&self) -> Result<(), RuleSetError> {
        let mut seen = std::collections::HashSet::new();
        for color in &self.colors {
            if !seen.insert(color.name.to_lowercase()) {
                return Err(RuleSetError::Validation(format!(
                    "Duplicate color name: {}",
                    color.name
                )));
            }
        }

        seen.clear();
        for font in &self.fonts {
            if !seen.insert(font.name.to_lowercase()) {
                return Err(RuleSetError::Validation(format!(
                    "Duplicate font name: {}",
                    font.name
                )));
            }
        }

        Ok(())
    }
}
