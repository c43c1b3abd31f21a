use thiserror::Error;

/// Errors raised by the lecture pipeline.
///
/// The generation variants (`Extraction`, `Analysis`, `Generation`, `Refine`)
/// wrap failures of the external service. `Validation` and
/// `UnsupportedFileType` are detected locally, before any request is sent.
#[derive(Debug, Error)]
pub enum LectureError {
    #[error("Failed to extract syllabus text: {0}")]
    Extraction(String),

    #[error("Failed to analyze syllabus: {0}")]
    Analysis(String),

    #[error("Failed to generate lecture materials: {0}")]
    Generation(String),

    #[error("Failed to refine slide: {0}")]
    Refine(String),

    #[error("Unsupported file type: {0}. Use PDF, PNG, JPEG, WebP, .txt or .md")]
    UnsupportedFileType(String),

    #[error("{0}")]
    Validation(String),

    #[error("Library storage error: {0}")]
    Storage(String),

    #[error("Cannot {event} while in the {state} step")]
    InvalidTransition {
        state: &'static str,
        event: &'static str,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl LectureError {
    /// True for failures of the external generation service.
    pub fn is_service_failure(&self) -> bool {
        matches!(
            self,
            Self::Extraction(_) | Self::Analysis(_) | Self::Generation(_) | Self::Refine(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, LectureError>;
