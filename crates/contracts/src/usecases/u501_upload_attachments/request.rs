use crate::domain::a001_attachment::Attachment;
use serde::{Deserialize, Serialize};

/// Запрос pre-signed URL у шлюза загрузки
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignRequest {
    pub file_name: String,
    pub content_type: String,
}

impl PresignRequest {
    pub fn for_attachment(attachment: &Attachment) -> Self {
        Self {
            file_name: attachment.name.clone(),
            content_type: attachment.content_type.clone(),
        }
    }
}

/// Ответ шлюза: куда загружать и где файл будет доступен
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresignResponse {
    #[serde(default)]
    pub upload_url: String,
    #[serde(default)]
    pub file_url: String,
}
