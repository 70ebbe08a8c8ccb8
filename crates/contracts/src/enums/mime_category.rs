use serde::{Deserialize, Serialize};

/// Категория вложения, определяет инструкцию для модели и иконку в UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MimeCategory {
    Document,
    Image,
    Spreadsheet,
    Presentation,
    Other,
}

impl MimeCategory {
    /// Получить код категории
    pub fn code(&self) -> &'static str {
        match self {
            MimeCategory::Document => "document",
            MimeCategory::Image => "image",
            MimeCategory::Spreadsheet => "spreadsheet",
            MimeCategory::Presentation => "presentation",
            MimeCategory::Other => "other",
        }
    }

    /// Категории, для которых есть отдельная инструкция модели (в порядке вывода)
    pub fn described() -> Vec<MimeCategory> {
        vec![
            MimeCategory::Document,
            MimeCategory::Image,
            MimeCategory::Spreadsheet,
            MimeCategory::Presentation,
        ]
    }

    /// Категория по MIME-типу
    pub fn from_content_type(content_type: &str) -> Self {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();

        match essence.as_str() {
            "application/pdf"
            | "text/plain"
            | "application/rtf"
            | "application/msword"
            | "application/vnd.openxmlformats-officedocument.wordprocessingml.document" => {
                MimeCategory::Document
            }
            "text/csv"
            | "application/vnd.ms-excel"
            | "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet" => {
                MimeCategory::Spreadsheet
            }
            "application/vnd.ms-powerpoint"
            | "application/vnd.openxmlformats-officedocument.presentationml.presentation" => {
                MimeCategory::Presentation
            }
            other if other.starts_with("image/") => MimeCategory::Image,
            _ => MimeCategory::Other,
        }
    }

    /// Категория по расширению имени файла (без учёта регистра)
    pub fn from_file_name(name: &str) -> Self {
        let Some((_, extension)) = name.rsplit_once('.') else {
            return MimeCategory::Other;
        };

        match extension.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" => MimeCategory::Image,
            "pdf" | "doc" | "docx" | "txt" | "rtf" => MimeCategory::Document,
            "csv" | "xlsx" | "xls" => MimeCategory::Spreadsheet,
            "ppt" | "pptx" => MimeCategory::Presentation,
            _ => MimeCategory::Other,
        }
    }

    /// MIME-тип в приоритете, расширение как запасной вариант
    pub fn detect(name: &str, content_type: &str) -> Self {
        match Self::from_content_type(content_type) {
            MimeCategory::Other => Self::from_file_name(name),
            category => category,
        }
    }
}

impl std::fmt::Display for MimeCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}
