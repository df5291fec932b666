//! Upload and job-description validation. Pure, synchronous, no side effects —
//! failures are structured values, converted to HTTP 400 only at the handler
//! boundary.

/// Maximum accepted upload size: 10 MB.
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Minimum job-description length, in characters.
pub const MIN_JOB_DESCRIPTION_CHARS: usize = 50;

/// MIME types accepted for resume uploads.
pub const SUPPORTED_FILE_TYPES: &[&str] = &[
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
];

/// Outcome of a validation check. `error` is always present when invalid.
#[derive(Debug, Clone, PartialEq)]
pub struct Validation {
    pub is_valid: bool,
    pub error: Option<String>,
}

impl Validation {
    fn ok() -> Self {
        Validation {
            is_valid: true,
            error: None,
        }
    }

    fn fail(message: &str) -> Self {
        Validation {
            is_valid: false,
            error: Some(message.to_string()),
        }
    }
}

/// Metadata of an uploaded file, as seen by the multipart handler.
#[derive(Debug, Clone)]
pub struct FileMeta {
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

/// Validates uploaded-file metadata: MIME allow-list, then size ceiling.
pub fn validate_file(meta: &FileMeta) -> Validation {
    if !SUPPORTED_FILE_TYPES.contains(&meta.content_type.as_str()) {
        return Validation::fail("Unsupported file type. Please upload PDF, DOC, or DOCX files.");
    }

    if meta.size > MAX_FILE_SIZE {
        return Validation::fail("File size too large. Maximum size is 10MB.");
    }

    Validation::ok()
}

/// Validates a free-text job description: non-blank, then minimum length.
pub fn validate_job_description(description: &str) -> Validation {
    if description.trim().is_empty() {
        return Validation::fail("Job description cannot be empty.");
    }

    if description.chars().count() < MIN_JOB_DESCRIPTION_CHARS {
        return Validation::fail("Job description is too short. Please provide more details.");
    }

    Validation::ok()
}
