//! Color math primitives.
//!
//! Hex parsing, sRGB to CIE LAB conversion, Delta-E (CIE76), and WCAG
//! relative luminance / contrast ratio. The color checker uses Delta-E for
//! perceptual comparison; the accessibility checker reuses the luminance
//! primitives for contrast math.
//!
//! ## Delta-E scale
//!
//! | Value | Perception |
//! |-------|------------|
//! | 0 | Identical |
//! | 1-2 | Imperceptible to most observers |
//! | 2-10 | Noticeable at a glance |
//! | 10+ | Clearly different colors |

use serde::{Deserialize, Serialize};

/// An 8-bit sRGB triple.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// A point in CIE LAB space (D65 white point).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lab {
    pub l: f64,
    pub a: f64,
    pub b: f64,
}

/// Normalize a hex color to canonical `#rrggbb` form.
///
/// Trims whitespace, strips the leading `#`, lowercases, and expands
/// 3-digit shorthand (`#fff` becomes `#ffffff`). Returns `None` for
/// anything that is not a 3- or 6-digit hex string.
pub fn normalize_hex(input: &str) -> Option<String> {
    let trimmed = input.trim().trim_start_matches('#').to_lowercase();

    if !trimmed.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }

    match trimmed.len() {
        3 => {
            let mut expanded = String::with_capacity(7);
            expanded.push('#');
            for c in trimmed.chars() {
                expanded.push(c);
                expanded.push(c);
            }
            Some(expanded)
        }
        6 => Some(format!("#{}", trimmed)),
        _ => None,
    }
}

/// Parse a hex color into an [`Rgb`] triple. Accepts anything
/// [`normalize_hex`] accepts.
pub fn parse_hex(input: &str) -> Option<Rgb> {
    let normalized = normalize_hex(input)?;
    let digits = &normalized[1..];

    let r = u8::from_str_radix(&digits[0..2], 16).ok()?;
    let g = u8::from_str_radix(&digits[2..4], 16).ok()?;
    let b = u8::from_str_radix(&digits[4..6], 16).ok()?;

    Some(Rgb { r, g, b })
}

/// sRGB gamma decode for the LAB conversion path.
fn srgb_to_linear(channel: f64) -> f64 {
    if channel <= 0.04045 {
        channel / 12.92
    } else {
        ((channel + 0.055) / 1.055).powf(2.4)
    }
}

/// Convert an sRGB triple to CIE LAB via XYZ, normalized against D65.
pub fn rgb_to_lab(rgb: Rgb) -> Lab {
    let r = srgb_to_linear(rgb.r as f64 / 255.0);
    let g = srgb_to_linear(rgb.g as f64 / 255.0);
    let b = srgb_to_linear(rgb.b as f64 / 255.0);

    // Linear RGB -> XYZ (sRGB matrix), then normalize to the D65 white point.
    let x = (r * 0.4124 + g * 0.3576 + b * 0.1805) / 0.95047;
    let y = (r * 0.2126 + g * 0.7152 + b * 0.0722) / 1.0;
    let z = (r * 0.0193 + g * 0.1192 + b * 0.9505) / 1.08883;

    let fx = lab_f(x);
    let fy = lab_f(y);
    let fz = lab_f(z);

    Lab {
        l: 116.0 * fy - 16.0,
        a: 500.0 * (fx - fy),
        b: 200.0 * (fy - fz),
    }
}

/// The XYZ -> LAB cube-root/linear piecewise function.
fn lab_f(t: f64) -> f64 {
    const EPSILON: f64 = 0.008856;
    if t > EPSILON {
        t.cbrt()
    } else {
        7.787 * t + 16.0 / 116.0
    }
}

/// Delta-E (CIE76) between two RGB colors: Euclidean distance in LAB.
pub fn delta_e_rgb(a: Rgb, b: Rgb) -> f64 {
    let la = rgb_to_lab(a);
    let lb = rgb_to_lab(b);

    let dl = la.l - lb.l;
    let da = la.a - lb.a;
    let db = la.b - lb.b;

    (dl * dl + da * da + db * db).sqrt()
}

/// Delta-E (CIE76) between two hex colors. `None` if either is malformed.
pub fn delta_e(a: &str, b: &str) -> Option<f64> {
    Some(delta_e_rgb(parse_hex(a)?, parse_hex(b)?))
}

/// WCAG relative luminance of an sRGB color.
pub fn relative_luminance(rgb: Rgb) -> f64 {
    let decode = |channel: u8| {
        let c = channel as f64 / 255.0;
        if c <= 0.03928 {
            c / 12.92
        } else {
            ((c + 0.055) / 1.055).powf(2.4)
        }
    };

    0.2126 * decode(rgb.r) + 0.7152 * decode(rgb.g) + 0.0722 * decode(rgb.b)
}

/// WCAG contrast ratio between two colors. Always in `[1, 21]`.
pub fn contrast_ratio(a: Rgb, b: Rgb) -> f64 {
    let la = relative_luminance(a);
    let lb = relative_luminance(b);

    let lighter = la.max(lb);
    let darker = la.min(lb);

    (lighter + 0.05) / (darker + 0.05)
}

/// Contrast ratio between two hex colors. `None` if either is malformed.
pub fn contrast_ratio_hex(a: &str, b: &str) -> Option<f64> {
    Some(contrast_ratio(parse_hex(a)?, parse_hex(b)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalizes_shorthand_and_case() {
        assert_eq!(normalize_hex("#FFF").as_deref(), Some("#ffffff"));
        assert_eq!(normalize_hex("1A73E8").as_deref(), Some("#1a73e8"));
        assert_eq!(normalize_hex("  #abc  ").as_deref(), Some("#aabbcc"));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(normalize_hex("#12345"), None);
        assert_eq!(normalize_hex("not-a-color"), None);
        assert_eq!(normalize_hex("#gggggg"), None);
        assert_eq!(normalize_hex(""), None);
        assert_eq!(parse_hex("#12"), None);
    }

    #[test]
    fn parses_hex_channels() {
        assert_eq!(
            parse_hex("#1a73e8"),
            Some(Rgb { r: 0x1a, g: 0x73, b: 0xe8 })
        );
        assert_eq!(parse_hex("#fff"), Some(Rgb { r: 255, g: 255, b: 255 }));
    }

    #[test]
    fn delta_e_identity_is_zero() {
        for hex in ["#000000", "#ffffff", "#1a73e8", "#abc"] {
            let d = delta_e(hex, hex).unwrap();
            assert!(d.abs() < 1e-9, "delta_e({hex}, {hex}) = {d}");
        }
    }

    #[test]
    fn delta_e_is_symmetric() {
        let ab = delta_e("#1a73e8", "#ff5733").unwrap();
        let ba = delta_e("#ff5733", "#1a73e8").unwrap();
        assert!((ab - ba).abs() < 1e-9);
    }

    #[test]
    fn delta_e_tracks_perceptual_distance() {
        // A one-step channel nudge is imperceptible.
        let near = delta_e("#1a73e8", "#1b74e9").unwrap();
        assert!(near < 2.0, "near = {near}");

        // Blue vs orange is clearly different.
        let far = delta_e("#1a73e8", "#ff5733").unwrap();
        assert!(far > 10.0, "far = {far}");
    }

    #[test]
    fn delta_e_none_on_malformed() {
        assert_eq!(delta_e("#xyz", "#ffffff"), None);
        assert_eq!(delta_e("#ffffff", ""), None);
    }

    #[test]
    fn black_on_white_contrast_is_21() {
        let ratio = contrast_ratio_hex("#000000", "#ffffff").unwrap();
        assert!((ratio - 21.0).abs() < 0.01, "ratio = {ratio}");
    }

    #[test]
    fn contrast_is_symmetric_and_at_least_one() {
        let ab = contrast_ratio_hex("#1a73e8", "#ff5733").unwrap();
        let ba = contrast_ratio_hex("#ff5733", "#1a73e8").unwrap();
        assert!((ab - ba).abs() < 1e-9);
        assert!(ab >= 1.0);

        let same = contrast_ratio_hex("#777777", "#777777").unwrap();
        assert!((same - 1.0).abs() < 1e-9);
    }

    #[test]
    fn luminance_extremes() {
        assert!(relative_luminance(Rgb { r: 0, g: 0, b: 0 }).abs() < 1e-9);
        let white = relative_luminance(Rgb { r: 255, g: 255, b: 255 });
        assert!((white - 1.0).abs() < 1e-9);
    }
}
