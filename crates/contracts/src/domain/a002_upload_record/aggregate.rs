use crate::domain::a001_attachment::AttachmentId;
use serde::{Deserialize, Serialize};

/// Состояние загрузки файла
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum UploadState {
    Pending,
    Uploading,
    Success { url: String },
    Error { message: String },
}

impl UploadState {
    /// Success и Error завершают текущую попытку
    pub fn is_terminal(&self) -> bool {
        matches!(self, UploadState::Success { .. } | UploadState::Error { .. })
    }

    pub fn is_in_flight(&self) -> bool {
        matches!(self, UploadState::Uploading)
    }

    /// Файл нужно (пере)загрузить перед отправкой сообщения
    pub fn needs_upload(&self) -> bool {
        matches!(self, UploadState::Pending | UploadState::Error { .. })
    }

    pub fn url(&self) -> Option<&str> {
        match self {
            UploadState::Success { url } => Some(url.as_str()),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            UploadState::Error { message } => Some(message.as_str()),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            UploadState::Pending => "pending",
            UploadState::Uploading => "uploading",
            UploadState::Success { .. } => "success",
            UploadState::Error { .. } => "error",
        }
    }

    /// Подпись для индикатора рядом с файлом
    pub fn label(&self) -> &'static str {
        match self {
            UploadState::Pending => "Pending",
            UploadState::Uploading => "Uploading...",
            UploadState::Success { .. } => "Uploaded",
            UploadState::Error { .. } => "Failed",
        }
    }
}

/// Запись о загрузке одного вложения
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadRecord {
    pub attachment_id: AttachmentId,
    pub name: String,
    pub state: UploadState,
}

impl UploadRecord {
    pub fn pending(attachment_id: AttachmentId, name: impl Into<String>) -> Self {
        Self {
            attachment_id,
            name: name.into(),
            state: UploadState::Pending,
        }
    }
}
