use crate::model::EntryKind;
use thiserror::Error;

/// Rejected input. Raised before any state is mutated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Please enter a title.")]
    EmptyTitle,

    #[error("Please enter a valid 4-digit PIN.")]
    InvalidPin,

    #[error("A diary titled \"{0}\" already exists.")]
    DuplicateTitle(String),

    #[error("Please enter some text.")]
    EmptyText,

    #[error("The attachment is empty.")]
    EmptyPayload,

    #[error("Content is not a base64 data URL.")]
    MalformedDataUrl,

    #[error("A {kind} entry cannot hold {media_type} content.")]
    MediaMismatch {
        kind: EntryKind,
        media_type: String,
    },

    #[error("The drawing is empty.")]
    BlankDrawing,

    #[error("Unsupported media: {0}")]
    UnsupportedMedia(String),
}

#[derive(Error, Debug)]
pub enum DiaryError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Diary not found: {0}")]
    NotFound(String),

    #[error("Wrong PIN!")]
    Auth,

    #[error("Stored collection '{key}' is unreadable: {source}")]
    StorageCorruption {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Api Error: {0}")]
    Api(String),
}

impl DiaryError {
    /// True when the error carries the given validation failure.
    pub fn is_validation(&self, expected: &ValidationError) -> bool {
        matches!(self, DiaryError::Validation(v) if v == expected)
    }
}

pub type Result<T> = std::result::Result<T, DiaryError>;
