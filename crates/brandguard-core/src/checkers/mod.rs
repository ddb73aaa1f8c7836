//! The five category checkers.
//!
//! Each checker evaluates one compliance dimension and produces a
//! [`CategoryFinding`] independently of the others. Checkers are pure
//! functions of the request: no I/O, no shared mutable state, bounded
//! work proportional to input size. They may run concurrently; ordering
//! of the final violation list is applied by the aggregator, never by
//! gating checker execution.

mod accessibility;
mod color;
mod font;
mod logo;
mod tone;

pub use accessibility::AccessibilityChecker;
pub use color::{ColorChecker, ColorMatch};
pub use font::{normalize_font, FontChecker, FontMatch};
pub use logo::LogoChecker;
pub use tone::{detect_tone, ToneChecker};

use crate::types::{AnalysisRequest, Category, CategoryFinding};

/// Trait implemented by all category checkers.
pub trait Checker {
    /// The category this checker scores.
    fn category(&self) -> Category;

    /// The compliance question this checker answers.
    fn concern(&self) -> &'static str {
        self.category().concern()
    }

    /// Evaluate the request against this checker's rules.
    fn check(&self, request: &AnalysisRequest) -> CategoryFinding;
}
