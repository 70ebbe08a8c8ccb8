use crate::enums::MimeCategory;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// ID вложения, генерируется при выборе файла
///
/// Имя файла не уникально (два разных файла могут называться одинаково),
/// поэтому всё состояние на клиенте хранится по этому ID.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AttachmentId(pub Uuid);

impl AttachmentId {
    pub fn new(value: Uuid) -> Self {
        Self(value)
    }
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
    pub fn value(&self) -> Uuid {
        self.0
    }
    pub fn as_string(&self) -> String {
        self.0.to_string()
    }
}

/// Вложение, подготовленное к загрузке
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attachment {
    pub id: AttachmentId,
    pub name: String,
    pub content_type: String,
    pub size: u64,
}

impl Attachment {
    /// Создать вложение с новым ID
    pub fn new(name: impl Into<String>, content_type: impl Into<String>, size: u64) -> Self {
        Self {
            id: AttachmentId::new_v4(),
            name: name.into(),
            content_type: content_type.into(),
            size,
        }
    }

    pub fn category(&self) -> MimeCategory {
        MimeCategory::detect(&self.name, &self.content_type)
    }
}

/// Ссылка на загруженный файл в теле запроса к чату
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttachmentRef {
    pub name: String,
    #[serde(rename = "type")]
    pub content_type: String,
    pub url: String,
}

impl AttachmentRef {
    pub fn new(attachment: &Attachment, url: impl Into<String>) -> Self {
        Self {
            name: attachment.name.clone(),
            content_type: attachment.content_type.clone(),
            url: url.into(),
        }
    }

    pub fn category(&self) -> MimeCategory {
        MimeCategory::detect(&self.name, &self.content_type)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_name_gets_distinct_ids() {
        let first = Attachment::new("report.pdf", "application/pdf", 10);
        let second = Attachment::new("report.pdf", "application/pdf", 10);
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn test_attachment_ref_wire_format() {
        let attachment = Attachment::new("report.pdf", "application/pdf", 2_000_000);
        let reference = AttachmentRef::new(&attachment, "https://files.example.com/report.pdf");
        let json = serde_json::to_value(&reference).unwrap();

        assert_eq!(
            json,
            serde_json::json!({
                "name": "report.pdf",
                "type": "application/pdf",
                "url": "https://files.example.com/report.pdf"
            })
        );
    }
}
