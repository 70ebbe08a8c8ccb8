use crate::domain::a001_attachment::validation::{ALLOWED_EXTENSIONS, MAX_FILE_SIZE};
use serde::{Deserialize, Serialize};

/// Настройки клиента, отдаются бэкендом через `GET /api/config`
///
/// Отсутствие `upload_gateway_url` означает, что загрузка файлов отключена;
/// текстовые сообщения при этом отправляются как обычно.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientConfig {
    #[serde(default)]
    pub upload_gateway_url: Option<String>,
    pub max_file_size: u64,
    pub allowed_extensions: Vec<String>,
}

impl ClientConfig {
    pub fn new(upload_gateway_url: Option<String>) -> Self {
        Self {
            upload_gateway_url: upload_gateway_url.filter(|url| !url.trim().is_empty()),
            max_file_size: MAX_FILE_SIZE,
            allowed_extensions: ALLOWED_EXTENSIONS.iter().map(|e| e.to_string()).collect(),
        }
    }

    pub fn uploads_enabled(&self) -> bool {
        self.upload_gateway_url.is_some()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_gateway_disables_uploads() {
        assert!(!ClientConfig::new(Some("  ".into())).uploads_enabled());
        assert!(!ClientConfig::default().uploads_enabled());
        assert!(ClientConfig::new(Some("https://gw.example.com/presign".into())).uploads_enabled());
    }
}
