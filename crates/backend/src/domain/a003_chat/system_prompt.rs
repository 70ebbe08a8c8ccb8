use contracts::domain::a001_attachment::AttachmentRef;
use contracts::enums::MimeCategory;

const BASE_PROMPT: &str =
    "You are an AI assistant specialized in document analysis. Be helpful, clear, and concise.";

/// Инструкция модели для категории файла
fn category_instruction(category: MimeCategory) -> Option<&'static str> {
    match category {
        MimeCategory::Document => {
            Some("For PDFs, DOC, DOCX, and TXT files, offer to analyze the text content.")
        }
        MimeCategory::Image => {
            Some("For images (JPG, JPEG, PNG), offer to describe what's in the image.")
        }
        MimeCategory::Spreadsheet => {
            Some("For spreadsheets (CSV, XLSX, XLS), offer to analyze the data.")
        }
        MimeCategory::Presentation => {
            Some("For presentations (PPT, PPTX), offer to review the slides.")
        }
        MimeCategory::Other => None,
    }
}

/// Системный промпт с перечнем вложений
///
/// Модель получает только имена, типы и ссылки на файлы, не содержимое.
/// Инструкции добавляются только для категорий, которые есть среди
/// вложений, в фиксированном порядке.
pub fn build_system_prompt(attachments: &[AttachmentRef]) -> String {
    let mut prompt = BASE_PROMPT.to_string();
    if attachments.is_empty() {
        return prompt;
    }

    let names: Vec<&str> = attachments.iter().map(|a| a.name.as_str()).collect();
    prompt.push_str(&format!(
        " The user has attached the following files: {}. ",
        names.join(", ")
    ));
    prompt.push_str("Acknowledge the files and offer to analyze them based on their types.");

    let present: Vec<MimeCategory> = attachments.iter().map(|a| a.category()).collect();
    let instructions: Vec<&str> = MimeCategory::described()
        .into_iter()
        .filter(|c| present.contains(c))
        .filter_map(category_instruction)
        .collect();
    if !instructions.is_empty() {
        prompt.push(' ');
        prompt.push_str(&instructions.join(" "));
    }

    let locations: Vec<String> = attachments
        .iter()
        .map(|a| format!("{} ({})", a.name, a.url))
        .collect();
    prompt.push_str(&format!(
        " Files are available at: {}.",
        locations.join(", ")
    ));

    prompt
}
