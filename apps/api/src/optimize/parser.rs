//! Response parsing and normalization for raw model output.
//!
//! The model is instructed to return a single JSON object, but real output
//! arrives wrapped in prose, code fences, or with fields missing. This module
//! extracts the first syntactically balanced JSON object (string-aware, so
//! braces inside string literals don't confuse it), then merges the parsed
//! object over a complete set of defaults. The return value is always
//! structurally complete, and the origin marker tells callers whether they
//! got model output or the canned fallback.

use serde_json::{Map, Value};

use crate::models::resume::{
    EnhancementAnalysis, OptimizationResult, PersonalInfo, RecruitmentIntent, ResumeData,
};

const DEFAULT_MATCH_SCORE: u8 = 75;
const DEFAULT_IMPROVEMENT_ITEMS: u32 = 3;
const DEFAULT_KEYWORD_MATCHES: u32 = 8;

const DEFAULT_MATCHED_KEYWORDS: &[&str] = &["leadership", "management"];
const DEFAULT_ADDED_KEYWORDS: &[&str] = &["strategy", "innovation"];
const DEFAULT_SUGGESTIONS: &[&str] = &[
    "Enhanced professional summary",
    "Improved keyword integration",
];
const DEFAULT_IMPROVEMENTS: &[&str] = &[
    "hrInsightOptimization",
    "recruitmentIntentAlignment",
    "professionalLanguageUpgrade",
];
const FALLBACK_IMPROVEMENTS: &[&str] = &[
    "hrInsightOptimization",
    "recruitmentIntentAlignment",
    "professionalLanguageUpgrade",
    "resumeAestheticEnhancement",
    "crossCulturalAdaptation",
];

/// Where a parsed result came from.
///
/// `Model` carries the names of fields that were absent in the model output
/// and had to be backfilled; `Fallback` means no JSON object could be
/// recovered at all and the entire result is canned. Callers that need to
/// distinguish a degraded run from a real one read this instead of guessing
/// from the result's contents.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOrigin {
    Model { defaulted_fields: Vec<&'static str> },
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ParsedCompletion {
    pub result: OptimizationResult,
    pub origin: ParseOrigin,
}

/// Parses raw model output into a structurally complete [`OptimizationResult`].
/// Never fails: unparseable input degrades to the fixed fallback result.
pub fn parse_completion(raw: &str) -> ParsedCompletion {
    match extract_first_json_object(raw) {
        Some(object) => {
            let (result, defaulted_fields) = normalize(object);
            ParsedCompletion {
                result,
                origin: ParseOrigin::Model { defaulted_fields },
            }
        }
        None => ParsedCompletion {
            result: fallback_result(),
            origin: ParseOrigin::Fallback,
        },
    }
}

/// Finds the first substring that is a syntactically balanced, valid JSON
/// object. Candidates that balance but fail to parse (prose braces like
/// `{x}`) are skipped and the scan continues.
fn extract_first_json_object(raw: &str) -> Option<Map<String, Value>> {
    let bytes = raw.as_bytes();
    let mut search_from = 0;

    while let Some(offset) = raw[search_from..].find('{') {
        let start = search_from + offset;
        if let Some(len) = balanced_object_len(&bytes[start..]) {
            // Brace and quote bytes are ASCII, so these indices are always
            // char boundaries.
            let candidate = &raw[start..start + len];
            if let Ok(Value::Object(object)) = serde_json::from_str::<Value>(candidate) {
                return Some(object);
            }
        }
        search_from = start + 1;
    }

    None
}

/// Byte length of the balanced object starting at a `{`, tracking string
/// literals and escapes so braces inside strings don't count.
fn balanced_object_len(bytes: &[u8]) -> Option<usize> {
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (i, &b) in bytes.iter().enumerate() {
        if in_string {
            if escaped {
                escaped = false;
            } else if b == b'\\' {
                escaped = true;
            } else if b == b'"' {
                in_string = false;
            }
            continue;
        }
        match b {
            b'"' => in_string = true,
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }

    None
}

/// Merges a parsed object over the complete defaults. Presence decides:
/// a field that is there — even an empty list or an explicit 0 — is kept
/// verbatim; absent or null fields are backfilled and recorded.
fn normalize(object: Map<String, Value>) -> (OptimizationResult, Vec<&'static str>) {
    let mut defaulted = Vec::new();

    let optimized_resume = match present(&object, "optimizedResume")
        .and_then(|v| serde_json::from_value::<ResumeData>(v.clone()).ok())
    {
        Some(resume) => resume,
        None => {
            defaulted.push("optimizedResume");
            default_optimized_resume()
        }
    };

    let match_score = match present(&object, "matchScore").and_then(Value::as_f64) {
        Some(n) => clamp_score(n),
        None => {
            defaulted.push("matchScore");
            DEFAULT_MATCH_SCORE
        }
    };

    let improvement_items = take_count(
        &object,
        "improvementItems",
        DEFAULT_IMPROVEMENT_ITEMS,
        &mut defaulted,
    );
    let keyword_matches = take_count(
        &object,
        "keywordMatches",
        DEFAULT_KEYWORD_MATCHES,
        &mut defaulted,
    );

    let matched_keywords = take_string_list(
        &object,
        "matchedKeywords",
        DEFAULT_MATCHED_KEYWORDS,
        &mut defaulted,
    );
    let added_keywords = take_string_list(
        &object,
        "addedKeywords",
        DEFAULT_ADDED_KEYWORDS,
        &mut defaulted,
    );
    let optimization_suggestions = take_string_list(
        &object,
        "optimizationSuggestions",
        DEFAULT_SUGGESTIONS,
        &mut defaulted,
    );
    let optimization_improvements = take_string_list(
        &object,
        "optimizationImprovements",
        DEFAULT_IMPROVEMENTS,
        &mut defaulted,
    );

    // Optional analysis fields pass through when present; they have no
    // defaults in the merge path.
    let job_language = present(&object, "jobLanguage")
        .and_then(Value::as_str)
        .map(str::to_string);
    let recruitment_intent = present(&object, "recruitmentIntent")
        .and_then(|v| serde_json::from_value::<RecruitmentIntent>(v.clone()).ok());
    let enhancement_analysis = present(&object, "enhancementAnalysis")
        .and_then(|v| serde_json::from_value::<EnhancementAnalysis>(v.clone()).ok());

    let result = OptimizationResult {
        optimized_resume,
        match_score,
        improvement_items,
        keyword_matches,
        matched_keywords,
        added_keywords,
        optimization_suggestions,
        optimization_improvements,
        job_language,
        recruitment_intent,
        enhancement_analysis,
    };

    (result, defaulted)
}

fn present<'a>(object: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    object.get(key).filter(|v| !v.is_null())
}

fn clamp_score(raw: f64) -> u8 {
    raw.floor().clamp(0.0, 100.0) as u8
}

fn take_count(
    object: &Map<String, Value>,
    key: &'static str,
    default: u32,
    defaulted: &mut Vec<&'static str>,
) -> u32 {
    match present(object, key).and_then(Value::as_u64) {
        Some(n) => n.min(u32::MAX as u64) as u32,
        None => {
            defaulted.push(key);
            default
        }
    }
}

fn take_string_list(
    object: &Map<String, Value>,
    key: &'static str,
    defaults: &[&str],
    defaulted: &mut Vec<&'static str>,
) -> Vec<String> {
    match present(object, key).and_then(|v| serde_json::from_value::<Vec<String>>(v.clone()).ok()) {
        Some(list) => list,
        None => {
            defaulted.push(key);
            to_owned_list(defaults)
        }
    }
}

fn to_owned_list(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn default_optimized_resume() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            name: "Professional".to_string(),
            email: "professional@example.com".to_string(),
            phone: None,
            location: None,
            linkedin: None,
            summary: "Professional summary optimized for the target position.".to_string(),
        },
        experience: vec![],
        education: vec![],
        skills: vec![],
        achievements: vec![],
    }
}

/// The fixed result substituted when no JSON object can be recovered from the
/// model output. No optimization actually occurred when this is returned.
pub fn fallback_result() -> OptimizationResult {
    OptimizationResult {
        optimized_resume: default_optimized_resume(),
        match_score: DEFAULT_MATCH_SCORE,
        improvement_items: DEFAULT_IMPROVEMENT_ITEMS,
        keyword_matches: DEFAULT_KEYWORD_MATCHES,
        matched_keywords: to_owned_list(DEFAULT_MATCHED_KEYWORDS),
        added_keywords: to_owned_list(DEFAULT_ADDED_KEYWORDS),
        optimization_suggestions: to_owned_list(DEFAULT_SUGGESTIONS),
        optimization_improvements: to_owned_list(FALLBACK_IMPROVEMENTS),
        job_language: None,
        recruitment_intent: Some(RecruitmentIntent {
            core_requirements: vec![
                "Core technical skills".to_string(),
                "Relevant industry experience".to_string(),
            ],
            hidden_expectations: vec![
                "Team collaboration".to_string(),
                "Growth potential".to_string(),
            ],
            cultural_fit: "A culture that values innovation and execution".to_string(),
            career_level: "Mid-to-senior professional".to_string(),
        }),
        enhancement_analysis: Some(EnhancementAnalysis {
            professional_upgrades: vec![
                "Standardized professional terminology".to_string(),
                "Industry-aligned phrasing".to_string(),
            ],
            language_refinements: vec![
                "More precise wording".to_string(),
                "Clearer structure of ideas".to_string(),
            ],
            structural_improvements: vec![
                "Better information hierarchy".to_string(),
                "Sharper emphasis on key points".to_string(),
            ],
        }),
    }
}
