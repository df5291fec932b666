//! Wire-level data model shared with the AI completion contract.
//!
//! Field names are camelCase on the wire — the prompt instructs the model to
//! return exactly this schema, and the parser deserializes straight into these
//! types. Every collection field defaults to empty so a partially-filled model
//! response still produces a structurally complete value.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub summary: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Experience {
    pub title: String,
    pub company: String,
    pub duration: String,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Education {
    pub degree: String,
    pub school: String,
    pub year: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// A structured resume. Immutable input to the optimizer; the optimized copy
/// in an [`OptimizationResult`] carries the same shape.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResumeData {
    pub personal_info: PersonalInfo,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub skills: Vec<String>,
    pub achievements: Vec<String>,
}

/// The model's reading of what the employer is actually hiring for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RecruitmentIntent {
    pub core_requirements: Vec<String>,
    pub hidden_expectations: Vec<String>,
    pub cultural_fit: String,
    pub career_level: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnhancementAnalysis {
    pub professional_upgrades: Vec<String>,
    pub language_refinements: Vec<String>,
    pub structural_improvements: Vec<String>,
}

/// Result of one optimization run. Produced once per run and never mutated —
/// only replaced wholesale. `match_score` is always within 0–100; the parser
/// clamps before this type is constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OptimizationResult {
    pub optimized_resume: ResumeData,
    pub match_score: u8,
    pub improvement_items: u32,
    pub keyword_matches: u32,
    pub matched_keywords: Vec<String>,
    pub added_keywords: Vec<String>,
    pub optimization_suggestions: Vec<String>,
    pub optimization_improvements: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub job_language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recruitment_intent: Option<RecruitmentIntent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub enhancement_analysis: Option<EnhancementAnalysis>,
}

/// Deterministic job-description analysis. A placeholder for a real analysis
/// call: validation is real, the returned fields are fixed and illustrative.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAnalysis {
    pub title: String,
    pub company: String,
    pub location: String,
    #[serde(rename = "type")]
    pub job_type: String,
    pub key_skills: Vec<String>,
    pub requirements: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resume_data_roundtrips_with_camel_case_keys() {
        let resume = ResumeData {
            personal_info: PersonalInfo {
                name: "Jane Doe".to_string(),
                email: "jane@example.com".to_string(),
                phone: None,
                location: Some("Berlin".to_string()),
                linkedin: None,
                summary: "Engineer".to_string(),
            },
            experience: vec![Experience {
                title: "Engineer".to_string(),
                company: "Acme".to_string(),
                duration: "2020 - Present".to_string(),
                description: "Built things".to_string(),
            }],
            education: vec![],
            skills: vec!["Rust".to_string()],
            achievements: vec![],
        };

        let json = serde_json::to_value(&resume).unwrap();
        assert!(json.get("personalInfo").is_some());
        assert!(json["personalInfo"].get("phone").is_none());

        let recovered: ResumeData = serde_json::from_value(json).unwrap();
        assert_eq!(recovered, resume);
    }

    #[test]
    fn test_partial_resume_object_fills_defaults() {
        // A resume the model returned with only a name must still deserialize
        // into a structurally complete value.
        let json = serde_json::json!({
            "personalInfo": { "name": "Someone" }
        });
        let resume: ResumeData = serde_json::from_value(json).unwrap();
        assert_eq!(resume.personal_info.name, "Someone");
        assert!(resume.personal_info.email.is_empty());
        assert!(resume.experience.is_empty());
        assert!(resume.skills.is_empty());
    }

    #[test]
    fn test_job_analysis_serializes_type_field() {
        let analysis = JobAnalysis {
            title: "Engineer".to_string(),
            company: "Acme".to_string(),
            location: "Remote".to_string(),
            job_type: "Full-time".to_string(),
            key_skills: vec![],
            requirements: vec![],
        };
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["type"], "Full-time");
        assert!(json.get("keySkills").is_some());
    }
}
