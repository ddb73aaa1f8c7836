//! Tone-of-voice checker.
//!
//! Scans the design's copy for banned words (whole-word, case-insensitive),
//! required phrases, over-long sentences, and a keyword-bucket tone style
//! heuristic. Each finding deducts a fixed penalty from 100.

use lazy_static::lazy_static;
use regex::RegexBuilder;
use std::collections::HashSet;

use crate::ruleset::{ToneRules, ToneStyle};
use crate::types::{
    AnalysisRequest, Category, CategoryFinding, Severity, SuggestedFix, Violation,
    ViolationDetail,
};

use super::Checker;

/// Penalty per distinct banned word found.
const BANNED_WORD_PENALTY: f64 = 15.0;

/// Penalty per missing required phrase.
const MISSING_PHRASE_PENALTY: f64 = 10.0;

/// Penalty per over-long sentence.
const LONG_SENTENCE_PENALTY: f64 = 5.0;

/// Penalty for a tone-style mismatch.
const TONE_MISMATCH_PENALTY: f64 = 20.0;

lazy_static! {
    static ref FORMAL_INDICATORS: HashSet<&'static str> = [
        "therefore", "furthermore", "moreover", "consequently", "hereby",
        "pursuant", "accordingly", "henceforth", "notwithstanding", "shall",
        "regarding", "sincerely", "respectfully",
    ]
    .into_iter()
    .collect();

    static ref CASUAL_INDICATORS: HashSet<&'static str> = [
        "hey", "yeah", "cool", "awesome", "gonna", "wanna", "stuff",
        "kinda", "sorta", "totally", "super", "btw", "ok", "okay",
    ]
    .into_iter()
    .collect();

    static ref FRIENDLY_INDICATORS: HashSet<&'static str> = [
        "welcome", "thanks", "thank", "love", "enjoy", "happy", "glad",
        "great", "wonderful", "please", "together", "community",
    ]
    .into_iter()
    .collect();
}

/// Classify the dominant tone of a text.
///
/// Counts whole-word hits per indicator bucket; exclamation marks past
/// the first add to the casual bucket (capped at 3). Buckets are compared
/// in the order formal, casual, friendly with a strict greater-than, so
/// formal wins ties; all-zero text reports "professional".
pub fn detect_tone(text: &str) -> &'static str {
    let mut formal = 0usize;
    let mut casual = 0usize;
    let mut friendly = 0usize;

    for token in text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|t| !t.is_empty())
    {
        let token = token.to_lowercase();
        if FORMAL_INDICATORS.contains(token.as_str()) {
            formal += 1;
        }
        if CASUAL_INDICATORS.contains(token.as_str()) {
            casual += 1;
        }
        if FRIENDLY_INDICATORS.contains(token.as_str()) {
            friendly += 1;
        }
    }

    let exclamations = text.chars().filter(|c| *c == '!').count();
    casual += exclamations.saturating_sub(1).min(3);

    let mut detected = "professional";
    let mut best = 0usize;
    for (name, hits) in [
        ("formal", formal),
        ("casual", casual),
        ("friendly", friendly),
    ] {
        if hits > best {
            best = hits;
            detected = name;
        }
    }

    detected
}

/// The tone-of-voice checker.
pub struct ToneChecker;

impl ToneChecker {
    pub fn new() -> Self {
        Self
    }

    /// Count whole-word, case-insensitive occurrences of `word`.
    fn count_word(corpus: &str, word: &str) -> usize {
        let pattern = format!(r"\b{}\b", regex::escape(word.trim()));
        match RegexBuilder::new(&pattern).case_insensitive(true).build() {
            Ok(re) => re.find_iter(corpus).count(),
            Err(_) => 0,
        }
    }

    fn check_banned_words(corpus: &str, rules: &ToneRules) -> (Vec<Violation>, f64) {
        let mut violations = Vec::new();
        let mut penalty = 0.0;
        let mut seen = HashSet::new();

        for word in &rules.banned_words {
            let word = word.trim();
            if word.is_empty() || !seen.insert(word.to_lowercase()) {
                continue;
            }

            let occurrences = Self::count_word(corpus, word);
            if occurrences == 0 {
                continue;
            }

            violations.push(Violation {
                category: Category::Tone,
                severity: Severity::High,
                description: format!(
                    "Banned word {:?} appears {} time{}",
                    word,
                    occurrences,
                    if occurrences == 1 { "" } else { "s" }
                ),
                detail: ViolationDetail::BannedWord {
                    word: word.to_string(),
                    occurrences,
                },
                suggested_fix: Some(SuggestedFix::Advice {
                    note: format!("Remove or rephrase every use of {:?}", word),
                }),
                auto_fixable: false,
                resolved: false,
            });
            penalty += BANNED_WORD_PENALTY;
        }

        (violations, penalty)
    }

    fn check_required_phrases(corpus: &str, rules: &ToneRules) -> (Vec<Violation>, f64) {
        let corpus_lower = corpus.to_lowercase();
        let mut violations = Vec::new();
        let mut penalty = 0.0;

        for phrase in &rules.required_phrases {
            let phrase = phrase.trim();
            if phrase.is_empty() || corpus_lower.contains(&phrase.to_lowercase()) {
                continue;
            }

            violations.push(Violation {
                category: Category::Tone,
                severity: Severity::Medium,
                description: format!("Required phrase {:?} is missing from the copy", phrase),
                detail: ViolationDetail::MissingPhrase {
                    phrase: phrase.to_string(),
                },
                suggested_fix: Some(SuggestedFix::Advice {
                    note: format!("Include the phrase {:?}", phrase),
                }),
                auto_fixable: false,
                resolved: false,
            });
            penalty += MISSING_PHRASE_PENALTY;
        }

        (violations, penalty)
    }

    fn check_sentence_length(corpus: &str, rules: &ToneRules) -> (Vec<Violation>, f64) {
        let Some(limit) = rules.max_sentence_length else {
            return (Vec::new(), 0.0);
        };

        let mut violations = Vec::new();
        let mut penalty = 0.0;

        for (index, sentence) in corpus
            .split(['.', '!', '?'])
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .enumerate()
        {
            let words = sentence.split_whitespace().count();
            if words <= limit {
                continue;
            }

            violations.push(Violation {
                category: Category::Tone,
                severity: Severity::Low,
                description: format!(
                    "Sentence {} runs {} words, over the {}-word limit",
                    index + 1,
                    words,
                    limit
                ),
                detail: ViolationDetail::LongSentence {
                    sentence: index,
                    words,
                    limit,
                },
                suggested_fix: Some(SuggestedFix::Advice {
                    note: "Split the sentence into shorter ones".to_string(),
                }),
                auto_fixable: false,
                resolved: false,
            });
            penalty += LONG_SENTENCE_PENALTY;
        }

        (violations, penalty)
    }

    fn check_style(corpus: &str, rules: &ToneRules) -> (Vec<Violation>, f64) {
        if rules.style == ToneStyle::Any {
            return (Vec::new(), 0.0);
        }

        let detected = detect_tone(corpus);
        if detected == rules.style.as_str() {
            return (Vec::new(), 0.0);
        }

        let violation = Violation {
            category: Category::Tone,
            severity: Severity::Medium,
            description: format!(
                "Copy reads as {} but the brand voice is {}",
                detected,
                rules.style.as_str()
            ),
            detail: ViolationDetail::ToneMismatch {
                expected: rules.style,
                detected: detected.to_string(),
            },
            suggested_fix: Some(SuggestedFix::Advice {
                note: format!("Rewrite the copy in a {} voice", rules.style.as_str()),
            }),
            auto_fixable: false,
            resolved: false,
        };

        (vec![violation], TONE_MISMATCH_PENALTY)
    }
}

impl Default for ToneChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl Checker for ToneChecker {
    fn category(&self) -> Category {
        Category::Tone
    }

    fn check(&self, request: &AnalysisRequest) -> CategoryFinding {
        let rules = &request.ruleset.tone;

        let corpus = request
            .snapshot
            .text_content
            .iter()
            .map(|element| element.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");

        if corpus.trim().is_empty() {
            // No copy to judge.
            return CategoryFinding::clean(Category::Tone);
        }

        let mut violations = Vec::new();
        let mut penalty = 0.0;

        let (banned, p) = Self::check_banned_words(&corpus, rules);
        violations.extend(banned);
        penalty += p;

        let (phrases, p) = Self::check_required_phrases(&corpus, rules);
        violations.extend(phrases);
        penalty += p;

        let (sentences, p) = Self::check_sentence_length(&corpus, rules);
        violations.extend(sentences);
        penalty += p;

        let (style, p) = Self::check_style(&corpus, rules);
        violations.extend(style);
        penalty += p;

        CategoryFinding {
            category: Category::Tone,
            score: (100.0 - penalty).max(0.0),
            violations,
        }
    }
}
