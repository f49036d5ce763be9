//! # Assist Error Types
//!
//! Error types for AI service calls.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Assist Error Categories                            │
//! │                                                                         │
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Response            │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  MissingApiKey  │  │  RequestFailed  │  │  EmptyResponse          │ │
//! │  │  InvalidConfig  │  │  HttpStatus     │  │  DecodeFailed           │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! None of these reach the operator: the fallback wrappers turn every one
//! of them into a default result and a log line.

use thiserror::Error;

/// Result type alias for AI calls.
pub type AssistResult<T> = Result<T, AssistError>;

#[derive(Debug, Error)]
pub enum AssistError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// No API key configured; the service is never contacted.
    #[error("AI API key not configured (set API_KEY or GEMINI_API_KEY)")]
    MissingApiKey,

    #[error("Invalid AI configuration: {0}")]
    InvalidConfig(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// The request never produced an HTTP response.
    #[error("AI request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a non-success status.
    #[error("AI service returned {status}: {body}")]
    HttpStatus { status: u16, body: String },

    // =========================================================================
    // Response Errors
    // =========================================================================
    /// The response carried no text part.
    #[error("AI response contained no text")]
    EmptyResponse,

    /// The text was not the JSON the schema asked for.
    #[error("Could not decode AI response: {0}")]
    DecodeFailed(String),
}

// =============================================================================
// Error Conversions
// =============================================================================

impl From<reqwest::Error> for AssistError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            AssistError::DecodeFailed(err.to_string())
        } else {
            AssistError::RequestFailed(err.to_string())
        }
    }
}

impl From<serde_json::Error> for AssistError {
    fn from(err: serde_json::Error) -> Self {
        AssistError::DecodeFailed(err.to_string())
    }
}

// =============================================================================
// Error Categorization
// =============================================================================

impl AssistError {
    /// Returns true if this error indicates a configuration problem.
    pub fn is_config_error(&self) -> bool {
        matches!(self, AssistError::MissingApiKey | AssistError::InvalidConfig(_))
    }

    /// Returns true if the service was reached but answered badly.
    pub fn is_service_error(&self) -> bool {
        matches!(
            self,
            AssistError::HttpStatus { .. } | AssistError::EmptyResponse | AssistError::DecodeFailed(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        assert!(AssistError::MissingApiKey.is_config_error());
        assert!(!AssistError::MissingApiKey.is_service_error());

        let status = AssistError::HttpStatus {
            status: 429,
            body: "quota".to_string(),
        };
        assert!(status.is_service_error());
        assert_eq!(status.to_string(), "AI service returned 429: quota");
    }

    #[test]
    fn test_json_error_is_decode_failure() {
        let err: AssistError = serde_json::from_str::<Vec<u8>>("{").unwrap_err().into();
        assert!(matches!(err, AssistError::DecodeFailed(_)));
    }
}
