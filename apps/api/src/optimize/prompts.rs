//! Prompt constants and the prompt builder for the optimization call.
//!
//! The rendered prompt is deterministic for identical inputs: no timestamps,
//! no randomness. The resume block is pretty-printed JSON with struct field
//! order, so the serialized key order is stable across calls.

use serde_json::Error as JsonError;

use crate::models::resume::ResumeData;
use crate::optimize::language::{effective_language, Language};

/// Per-language response instruction. The sentence is embedded verbatim in
/// the prompt; each one tells the model to answer in that language and keep
/// the output resume language aligned with the job description.
pub fn language_instruction(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Please respond in English and ensure the output resume language \
             matches the job description language"
        }
        Language::Zh => "请用中文回复，确保输出简历的语言与招聘描述的语言保持一致",
        Language::Ja => {
            "日本語で回答し、出力される履歴書の言語が求人記述の言語と一致するようにしてください"
        }
        Language::Ko => {
            "한국어로 답변하고, 출력되는 이력서의 언어가 채용 공고의 언어와 일치하도록 해주세요"
        }
        Language::De => {
            "Antworten Sie auf Deutsch und stellen Sie sicher, dass die Sprache des \
             ausgegebenen Lebenslaufs der Sprache der Stellenausschreibung entspricht"
        }
        Language::It => {
            "Rispondi in italiano e assicurati che la lingua del curriculum in output \
             corrisponda alla lingua della descrizione del lavoro"
        }
        Language::Es => {
            "Responde en español y asegúrate de que el idioma del currículum de salida \
             coincida con el idioma de la descripción del trabajo"
        }
    }
}

/// Optimization prompt template.
/// Replace: {language_instruction}, {resume_json}, {job_description}, {job_language}
const OPTIMIZATION_PROMPT_TEMPLATE: &str = r#"You are a senior HR headhunter and resume optimization expert with 15 years of experience, deep human-resources insight, and sharp market awareness. {language_instruction}.

## Your professional background:
- 15 years of HR and executive-search experience across 500+ well-known companies
- Deep understanding of hiring needs and candidate standards across industries
- Skilled at reading the underlying intent behind a job posting from the recruiter's perspective
- Expert in resume polishing and professional phrasing
- Fluent in ATS systems and keyword-matching strategy

## Task:
Analyze the following job posting from a professional recruiter's perspective, then optimize the candidate's resume for it:

**Original resume:**
{resume_json}

**Target job description:**
{job_description}

## Analysis steps:
1. **Recruitment intent**: read the real needs and expectations behind the posting
2. **Match assessment**: judge how well the current resume fits the role, as a recruiter would
3. **Professional polish**: upgrade phrasing to raise the resume's professionalism and appeal
4. **Language consistency**: keep the output resume language identical to the job description language

Return the optimization result in exactly this JSON format:
{
  "jobLanguage": "{job_language}",
  "recruitmentIntent": {
    "coreRequirements": ["core requirement 1", "core requirement 2"],
    "hiddenExpectations": ["implicit expectation 1", "implicit expectation 2"],
    "culturalFit": "what the company culture demands",
    "careerLevel": "the seniority the role targets"
  },
  "optimizedResume": {
    "personalInfo": {
      "name": "...",
      "email": "...",
      "phone": "...",
      "location": "...",
      "linkedin": "...",
      "summary": "highly professional summary expressing a clear value proposition"
    },
    "experience": [
      {
        "title": "optimized job title",
        "company": "company name",
        "duration": "employment period",
        "description": "polished description emphasizing achievements and value created"
      }
    ],
    "education": [
      {
        "degree": "degree",
        "school": "institution",
        "year": "year",
        "details": "relevant details"
      }
    ],
    "skills": ["optimized skill keywords"],
    "achievements": ["quantified achievement statements"]
  },
  "enhancementAnalysis": {
    "professionalUpgrades": ["professional phrasing upgrade 1", "professional phrasing upgrade 2"],
    "languageRefinements": ["language refinement 1", "language refinement 2"],
    "structuralImprovements": ["structural improvement 1", "structural improvement 2"]
  },
  "matchScore": 85,
  "improvementItems": 5,
  "keywordMatches": 12,
  "matchedKeywords": ["matched keyword 1", "matched keyword 2"],
  "addedKeywords": ["added keyword 1", "added keyword 2"],
  "optimizationSuggestions": ["suggestion 1", "suggestion 2"],
  "optimizationImprovements": [
    "hrInsightOptimization",
    "recruitmentIntentAlignment",
    "professionalLanguageUpgrade",
    "resumeAestheticEnhancement",
    "crossCulturalAdaptation"
  ]
}

## Core optimization principles:
1. **Read the hiring intent**: interpret the posting's real expectations from the recruiter's side
2. **Professional phrasing**: use industry-standard terminology and professional expression
3. **Value-oriented rewriting**: foreground the value the candidate created for employers
4. **Quantified achievements**: prove ability with data and concrete outcomes wherever possible
5. **Cultural fit**: reflect alignment with the target company's culture
6. **Language consistency**: keep the output resume language 100% aligned with the job description
7. **Presentation polish**: raise the overall professionalism of the resume's wording
8. **Natural keyword integration**: weave keywords in smoothly, never stuff them — rephrase, do not fabricate

Make sure the response is valid JSON and that all text content uses the same language as the job description."#;

/// Renders the optimization prompt for one run. Pure: identical inputs yield
/// an identical string.
pub fn build_prompt(
    resume: &ResumeData,
    job_description: &str,
    requested: Language,
) -> Result<String, JsonError> {
    let language = effective_language(job_description, requested);
    let resume_json = serde_json::to_string_pretty(resume)?;

    Ok(OPTIMIZATION_PROMPT_TEMPLATE
        .replace("{language_instruction}", language_instruction(language))
        .replace("{resume_json}", &resume_json)
        .replace("{job_description}", job_description)
        .replace("{job_language}", language.code()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::PersonalInfo;

    fn sample_resume() -> ResumeData {
        ResumeData {
            personal_info: PersonalInfo {
                name: "John Doe".to_string(),
                email: "john.doe@example.com".to_string(),
                phone: None,
                location: None,
                linkedin: None,
                summary: "Software engineer".to_string(),
            },
            experience: vec![],
            education: vec![],
            skills: vec!["JavaScript".to_string(), "React".to_string()],
            achievements: vec![],
        }
    }

    #[test]
    fn test_build_prompt_is_deterministic() {
        let resume = sample_resume();
        let jd = "We are hiring a frontend engineer with React experience.";
        let first = build_prompt(&resume, jd, Language::En).unwrap();
        let second = build_prompt(&resume, jd, Language::En).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_prompt_embeds_resume_and_job_description_verbatim() {
        let resume = sample_resume();
        let jd = "Unique marker: need Kubernetes experience.";
        let prompt = build_prompt(&resume, jd, Language::En).unwrap();
        assert!(prompt.contains("john.doe@example.com"));
        assert!(prompt.contains(jd));
    }

    #[test]
    fn test_prompt_uses_detected_language_instruction() {
        let resume = sample_resume();
        let prompt = build_prompt(&resume, "招聘前端工程师，要求五年以上经验", Language::En).unwrap();
        assert!(prompt.contains("请用中文回复"));
        assert!(prompt.contains(r#""jobLanguage": "zh""#));
    }

    #[test]
    fn test_prompt_falls_back_to_requested_language() {
        let resume = sample_resume();
        let prompt = build_prompt(&resume, "Plain ASCII job description", Language::De).unwrap();
        assert!(prompt.contains("Antworten Sie auf Deutsch"));
        assert!(prompt.contains(r#""jobLanguage": "de""#));
    }

    #[test]
    fn test_prompt_specifies_response_schema() {
        let resume = sample_resume();
        let prompt = build_prompt(&resume, "Some job description", Language::En).unwrap();
        assert!(prompt.contains(r#""matchScore""#));
        assert!(prompt.contains(r#""optimizedResume""#));
        assert!(prompt.contains(r#""recruitmentIntent""#));
        assert!(prompt.contains(r#""enhancementAnalysis""#));
    }
}
