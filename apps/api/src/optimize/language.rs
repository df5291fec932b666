//! Job-description language detection via script-range heuristics.
//!
//! Checks run in a fixed order and the first match wins: CJK ideographs, then
//! kana, then Hangul. Kanji-bearing Japanese therefore detects as `Zh` — kana
//! is the distinguishing signal this heuristic has for Japanese.

use serde::{Deserialize, Serialize};

/// Languages the optimizer can be asked to respond in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Zh,
    Ja,
    Ko,
    De,
    It,
    Es,
}

impl Language {
    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Zh => "zh",
            Language::Ja => "ja",
            Language::Ko => "ko",
            Language::De => "de",
            Language::It => "it",
            Language::Es => "es",
        }
    }
}

fn is_cjk_ideograph(c: char) -> bool {
    ('\u{4e00}'..='\u{9fff}').contains(&c)
}

fn is_kana(c: char) -> bool {
    ('\u{3040}'..='\u{309f}').contains(&c) || ('\u{30a0}'..='\u{30ff}').contains(&c)
}

fn is_hangul_syllable(c: char) -> bool {
    ('\u{ac00}'..='\u{d7af}').contains(&c)
}

/// Detects the dominant script of a job description. Returns `None` when no
/// CJK script is present, letting the caller fall back to the requested
/// language.
pub fn detect_job_language(text: &str) -> Option<Language> {
    if text.chars().any(is_cjk_ideograph) {
        return Some(Language::Zh);
    }
    if text.chars().any(is_kana) {
        return Some(Language::Ja);
    }
    if text.chars().any(is_hangul_syllable) {
        return Some(Language::Ko);
    }
    None
}

/// The language the model is instructed to respond in: detected script wins,
/// otherwise the caller's requested language.
pub fn effective_language(job_description: &str, requested: Language) -> Language {
    detect_job_language(job_description).unwrap_or(requested)
}
