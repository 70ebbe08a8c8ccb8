//! Проверка выбранных файлов до добавления в набор вложений

use super::aggregate::Attachment;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Максимальный размер файла (10 MiB)
pub const MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Допустимые MIME-типы
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "application/pdf",
    "text/plain",
    "image/jpeg",
    "image/png",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "application/vnd.openxmlformats-officedocument.presentationml.presentation",
    "text/csv",
];

/// Расширения для фильтра диалога выбора файлов
pub const ALLOWED_EXTENSIONS: &[&str] = &[
    "pdf", "doc", "docx", "txt", "jpg", "jpeg", "png", "csv", "xlsx", "xls", "ppt", "pptx",
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("File size exceeds the {limit_mb}MB limit")]
    TooLarge { size: u64, limit_mb: u64 },

    #[error("File type not supported")]
    UnsupportedType { content_type: String },
}

/// Файл, отклонённый при выборе (показывается рядом с полем ввода)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedFile {
    pub name: String,
    pub reason: String,
}

impl RejectedFile {
    pub fn new(name: impl Into<String>, error: &ValidationError) -> Self {
        Self {
            name: name.into(),
            reason: error.to_string(),
        }
    }
}

/// Значение атрибута `accept` для `<input type="file">`
pub fn accept_attribute() -> String {
    ALLOWED_EXTENSIONS
        .iter()
        .map(|ext| format!(".{}", ext))
        .collect::<Vec<_>>()
        .join(",")
}

/// Проверить файл по размеру и MIME-типу
///
/// Размер проверяется первым: слишком большой файл неподдерживаемого типа
/// отклоняется с ошибкой размера.
pub fn validate_file(content_type: &str, size: u64) -> Result<(), ValidationError> {
    if size > MAX_FILE_SIZE {
        return Err(ValidationError::TooLarge {
            size,
            limit_mb: MAX_FILE_SIZE / (1024 * 1024),
        });
    }

    if !ALLOWED_MIME_TYPES.contains(&content_type) {
        return Err(ValidationError::UnsupportedType {
            content_type: content_type.to_string(),
        });
    }

    Ok(())
}

/// Проверить выбранный файл и создать вложение либо запись об отказе
pub fn screen_file(name: &str, content_type: &str, size: u64) -> Result<Attachment, RejectedFile> {
    validate_file(content_type, size)
        .map(|_| Attachment::new(name, content_type, size))
        .map_err(|e| RejectedFile::new(name, &e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_allowed_file() {
        assert_eq!(validate_file("application/pdf", 2 * 1024 * 1024), Ok(()));
        assert_eq!(validate_file("text/plain", 0), Ok(()));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        assert!(validate_file("image/png", MAX_FILE_SIZE).is_ok());

        let err = validate_file("image/png", MAX_FILE_SIZE + 1).unwrap_err();
        assert_eq!(err.to_string(), "File size exceeds the 10MB limit");
    }

    #[test]
    fn test_rejects_disallowed_type() {
        let err = validate_file("video/quicktime", 1024).unwrap_err();
        assert!(matches!(err, ValidationError::UnsupportedType { .. }));
        assert_eq!(err.to_string(), "File type not supported");
    }

    #[test]
    fn test_size_checked_before_type() {
        let err = validate_file("video/quicktime", MAX_FILE_SIZE * 2).unwrap_err();
        assert!(matches!(err, ValidationError::TooLarge { .. }));
    }

    #[test]
    fn test_empty_content_type_rejected() {
        // Браузер отдаёт пустой type для неизвестных расширений
        assert!(validate_file("", 100).is_err());
    }

    #[test]
    fn test_accept_attribute() {
        let accept = accept_attribute();
        assert!(accept.starts_with(".pdf,.doc,.docx"));
        assert!(accept.ends_with(".ppt,.pptx"));
        assert_eq!(accept.split(',').count(), ALLOWED_EXTENSIONS.len());
    }

    #[test]
    fn test_screen_mixed_selection() {
        let selection = [
            ("report.pdf", "application/pdf", 2 * 1024 * 1024),
            ("video.mov", "video/quicktime", 5 * 1024 * 1024),
        ];

        let (accepted, rejected): (Vec<_>, Vec<_>) = selection
            .iter()
            .map(|(name, ty, size)| screen_file(name, ty, *size))
            .partition(|r| r.is_ok());

        let accepted: Vec<Attachment> = accepted.into_iter().filter_map(Result::ok).collect();
        let rejected: Vec<RejectedFile> = rejected.into_iter().filter_map(Result::err).collect();

        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].name, "report.pdf");
        assert_eq!(
            rejected,
            vec![RejectedFile {
                name: "video.mov".into(),
                reason: "File type not supported".into(),
            }]
        );
    }
}
