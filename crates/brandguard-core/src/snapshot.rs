//! Design snapshot: the structured extraction of a design under review.
//!
//! Snapshots are produced by an external extraction tool (an editor or
//! canvas integration) and treated as already-shaped data. The engine
//! never mutates a snapshot; the auto-fix engine returns fresh copies.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to read snapshot file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// What an image in the design represents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ImageType {
    Logo,
    Photo,
    Graphic,
    Icon,
    Background,
    #[default]
    Unknown,
}

/// Canvas position of an element's top-left corner.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

/// One run of styled text in the design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TextElement {
    pub text: String,
    pub font: String,
    pub font_size: f64,

    /// Hex text color, when the extractor could resolve one.
    #[serde(default)]
    pub color: Option<String>,

    #[serde(default)]
    pub is_bold: bool,

    #[serde(default)]
    pub is_italic: bool,
}

/// One placed image in the design.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ImageElement {
    #[serde(default)]
    pub image_type: ImageType,

    pub width: f64,
    pub height: f64,

    #[serde(default)]
    pub alt_text: Option<String>,

    #[serde(default)]
    pub position: Option<Position>,

    #[serde(default)]
    pub canvas_width: Option<f64>,

    #[serde(default)]
    pub canvas_height: Option<f64>,

    /// Source asset dimensions, when known. Used to detect distortion.
    #[serde(default)]
    pub original_width: Option<f64>,

    #[serde(default)]
    pub original_height: Option<f64>,
}

/// The structured extraction of a design's colors, fonts, text, and images.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
pub struct DesignSnapshot {
    /// Hex colors used anywhere in the design. May contain malformed
    /// entries; those score as non-compliant, never as errors.
    #[serde(default)]
    pub colors_used: Vec<String>,

    /// Font family names used anywhere in the design.
    #[serde(default)]
    pub fonts_used: Vec<String>,

    #[serde(default)]
    pub text_content: Vec<TextElement>,

    #[serde(default)]
    pub images: Vec<ImageElement>,

    #[serde(default)]
    pub layout: Option<String>,

    /// Dominant background color, when the extractor resolved one.
    #[serde(default)]
    pub background_color: Option<String>,
}

impl DesignSnapshot {
    /// Parse a snapshot from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self, SnapshotError> {
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Parse a snapshot from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a snapshot from a YAML file.
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_yaml(&contents)
    }

    /// Parse a snapshot from a JSON file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, SnapshotError> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Images of type `logo`, with their indices in `images`.
    pub fn logos(&self) -> impl Iterator<Item = (usize, &ImageElement)> {
        self.images
            .iter()
            .enumerate()
            .filter(|(_, image)| image.image_type == ImageType::Logo)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_snapshot() {
        let yaml = r##"
colors_used: ["#1A73E8", "#FF5733"]
fonts_used: ["Inter", "Comic Sans MS"]
text_content:
  - text: "Welcome to Acme"
    font: "Inter"
    font_size: 24
    color: "#202124"
    is_bold: true
images:
  - image_type: logo
    width: 140
    height: 70
    alt_text: "Acme logo"
    position: { x: 40, y: 40 }
    canvas_width: 800
    canvas_height: 600
background_color: "#ffffff"
"##;
        let snapshot = DesignSnapshot::from_yaml(yaml).unwrap();
        assert_eq!(snapshot.colors_used.len(), 2);
        assert_eq!(snapshot.text_content[0].font_size, 24.0);
        assert!(snapshot.text_content[0].is_bold);
        assert_eq!(snapshot.logos().count(), 1);
    }

    #[test]
    fn empty_snapshot_is_valid() {
        let snapshot = DesignSnapshot::from_json("{}").unwrap();
        assert!(snapshot.colors_used.is_empty());
        assert!(snapshot.images.is_empty());
        assert!(snapshot.background_color.is_none());
    }

    #[test]
    fn logos_filters_by_type() {
        let snapshot = DesignSnapshot {
            images: vec![
                ImageElement {
                    image_type: ImageType::Photo,
                    width: 100.0,
                    height: 100.0,
                    alt_text: None,
                    position: None,
                    canvas_width: None,
                    canvas_height: None,
                    original_width: None,
                    original_height: None,
                },
                ImageElement {
                    image_type: ImageType::Logo,
                    width: 120.0,
                    height: 60.0,
                    alt_text: None,
                    position: None,
                    canvas_width: None,
                    canvas_height: None,
                    original_width: None,
                    original_height: None,
                },
            ],
            ..Default::default()
        };

        let logos: Vec<_> = snapshot.logos().collect();
        assert_eq!(logos.len(), 1);
        assert_eq!(logos[0].0, 1);
    }
}
