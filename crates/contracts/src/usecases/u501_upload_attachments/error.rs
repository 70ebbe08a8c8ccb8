use crate::domain::a002_upload_record::TransitionError;
use thiserror::Error;

/// Ошибка загрузки одного файла
///
/// Текст ошибки показывается пользователю рядом с файлом.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Upload API URL not configured")]
    NotConfigured,

    #[error("Failed to get pre-signed URL: {status} {body}")]
    PresignStatus { status: u16, body: String },

    #[error("No upload URL provided by server")]
    MissingUploadUrl,

    #[error("No file URL provided by server")]
    MissingFileUrl,

    #[error("Failed to upload file: {status} {body}")]
    PutStatus { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error(transparent)]
    Transition(#[from] TransitionError),
}
