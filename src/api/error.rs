// API errors
// Validation failures are the caller's fault (400); analysis failures are ours (500)

use thiserror::Error;

use super::ANALYSIS_FAILED;
use crate::models::ErrorResponse;
use crate::services::AnalysisError;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Text is required")]
    EmptyText,
    #[error("Text must be at least {min} characters long (got {actual})")]
    TextTooShort { min: usize, actual: usize },
    #[error("Text must be at most {max} characters long (got {actual})")]
    TextTooLong { max: usize, actual: usize },
    #[error("At least one text is required")]
    EmptyBatch,
    #[error("A batch may contain at most {max} texts (got {actual})")]
    TooManyTexts { max: usize, actual: usize },
    #[error("Sensitivity must be between 0 and 100 (got {0})")]
    SensitivityOutOfRange(i64),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error("Analysis failed: {0}")]
    Analysis(#[from] AnalysisError),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Analysis(_) => 500,
        }
    }

    /// Wire shape. Internal details only leave the process in development mode.
    pub fn to_response(&self, development: bool) -> ErrorResponse {
        match self {
            ApiError::Validation(e) => ErrorResponse {
                success: false,
                error: e.to_string(),
                details: None,
            },
            ApiError::Analysis(e) => ErrorResponse {
                success: false,
                error: ANALYSIS_FAILED.to_string(),
                details: development.then(|| e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(ApiError::from(ValidationError::EmptyText).status_code(), 400);
        let analysis = AnalysisError::NonFiniteScore { analyzer: "pattern" };
        assert_eq!(ApiError::from(analysis).status_code(), 500);
    }

    #[test]
    fn test_analysis_details_hidden_outside_development() {
        let err = ApiError::from(AnalysisError::AnalyzerFailed {
            analyzer: "structure",
            message: "index out of bounds".to_string(),
        });

        let public = err.to_response(false);
        assert!(!public.success);
        assert_eq!(public.error, "Analysis failed");
        assert!(public.details.is_none());

        let dev = err.to_response(true);
        assert!(dev.details.unwrap().contains("index out of bounds"));
    }

    #[test]
    fn test_validation_message_is_always_shown() {
        let err = ApiError::from(ValidationError::TextTooShort { min: 10, actual: 5 });
        let body = err.to_response(false);
        assert_eq!(body.error, "Text must be at least 10 characters long (got 5)");
    }
}
