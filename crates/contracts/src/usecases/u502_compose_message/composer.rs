use crate::domain::a001_attachment::{Attachment, AttachmentRef};
use crate::domain::a002_upload_record::UploadTracker;
use crate::domain::a003_chat::{ChatData, ChatMessage, ChatRequest};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComposeError {
    #[error("Nothing to send")]
    Empty,

    #[error("{count} upload(s) still in progress")]
    UploadsInFlight { count: usize },

    #[error("None of the attached files could be uploaded")]
    NothingUploaded,
}

/// Исходящее сообщение пользователя
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComposedMessage {
    pub text: String,
    pub attachments: Vec<AttachmentRef>,
}

impl ComposedMessage {
    pub fn to_chat_message(&self) -> ChatMessage {
        ChatMessage::user(self.text.clone())
    }

    pub fn data(&self) -> ChatData {
        ChatData {
            attachments: self.attachments.clone(),
        }
    }

    pub fn attachment_names(&self) -> Vec<String> {
        self.attachments.iter().map(|a| a.name.clone()).collect()
    }

    /// Запрос к прокси: история + это сообщение
    pub fn into_request(self, mut history: Vec<ChatMessage>) -> ChatRequest {
        history.push(self.to_chat_message());
        ChatRequest {
            messages: history,
            data: ChatData {
                attachments: self.attachments,
            },
        }
    }
}

/// Есть что отправлять: непустой текст или хотя бы одно вложение
pub fn should_submit(text: &str, attachments: &[Attachment]) -> bool {
    !text.trim().is_empty() || !attachments.is_empty()
}

/// Собрать сообщение после завершения всех загрузок
///
/// В сообщение попадают только вложения в состоянии Success, в порядке
/// выбора. Файлы с ошибкой пропускаются (пользователь видит их как
/// Failed). Текст передаётся как есть.
pub fn compose(
    text: &str,
    attachments: &[Attachment],
    tracker: &UploadTracker,
) -> Result<ComposedMessage, ComposeError> {
    if !should_submit(text, attachments) {
        return Err(ComposeError::Empty);
    }

    let in_flight = tracker.in_flight_count();
    if in_flight > 0 {
        return Err(ComposeError::UploadsInFlight { count: in_flight });
    }

    let refs = attachments
        .iter()
        .filter_map(|attachment| {
            tracker
                .state(&attachment.id)
                .and_then(|state| state.url())
                .map(|url| AttachmentRef::new(attachment, url))
        })
        .collect::<Vec<_>>();

    // Без текста сообщение имеет смысл только с загруженными файлами
    if text.trim().is_empty() && refs.is_empty() {
        return Err(ComposeError::NothingUploaded);
    }

    Ok(ComposedMessage {
        text: text.to_string(),
        attachments: refs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn uploaded(tracker: &mut UploadTracker, name: &str) -> Attachment {
        let file = Attachment::new(name, "application/pdf", 100);
        tracker.register(&file);
        tracker.begin_upload(file.id).unwrap();
        tracker
            .complete(file.id, format!("https://bucket/{}", name))
            .unwrap();
        file
    }

    #[test]
    fn test_empty_submission_is_rejected() {
        let tracker = UploadTracker::new();
        assert_eq!(compose("   \n", &[], &tracker), Err(ComposeError::Empty));
        assert!(!should_submit("", &[]));
    }

    #[test]
    fn test_text_only() {
        let tracker = UploadTracker::new();
        let message = compose("Hello", &[], &tracker).unwrap();
        assert_eq!(message.text, "Hello");
        assert!(message.attachments.is_empty());
    }

    #[test]
    fn test_only_successful_attachments_included() {
        let mut tracker = UploadTracker::new();
        let a = uploaded(&mut tracker, "a.pdf");
        let b = Attachment::new("b.pdf", "application/pdf", 100);
        tracker.register(&b);
        tracker.begin_upload(b.id).unwrap();
        tracker.fail(b.id, "Failed to upload file: 500 ").unwrap();
        let c = uploaded(&mut tracker, "c.pdf");

        let message = compose("Please review", &[a, b, c], &tracker).unwrap();

        assert_eq!(message.text, "Please review");
        assert_eq!(message.attachment_names(), vec!["a.pdf", "c.pdf"]);
        assert_eq!(message.attachments[1].url, "https://bucket/c.pdf");
    }

    #[test]
    fn test_waits_for_in_flight_uploads() {
        let mut tracker = UploadTracker::new();
        let file = Attachment::new("a.pdf", "application/pdf", 100);
        tracker.register(&file);
        tracker.begin_upload(file.id).unwrap();

        assert_eq!(
            compose("x", &[file], &tracker),
            Err(ComposeError::UploadsInFlight { count: 1 })
        );
    }

    #[test]
    fn test_attachments_without_text() {
        let mut tracker = UploadTracker::new();
        let file = uploaded(&mut tracker, "scan.pdf");

        let message = compose("", &[file], &tracker).unwrap();
        assert_eq!(message.text, "");
        assert_eq!(message.attachments.len(), 1);
    }

    #[test]
    fn test_blank_text_with_only_failed_uploads() {
        let mut tracker = UploadTracker::new();
        let file = Attachment::new("a.pdf", "application/pdf", 100);
        tracker.register(&file);
        tracker.fail(file.id, "Upload API URL not configured").unwrap();

        assert_eq!(compose(" ", &[file.clone()], &tracker), Err(ComposeError::NothingUploaded));
        assert!(compose("Still here?", &[file], &tracker).unwrap().attachments.is_empty());
    }

    #[test]
    fn test_into_request_appends_user_message() {
        let mut tracker = UploadTracker::new();
        let file = uploaded(&mut tracker, "a.pdf");
        let message = compose("Summarize", &[file], &tracker).unwrap();

        let request = message.into_request(vec![
            ChatMessage::user("Hi"),
            ChatMessage::assistant("Hello!"),
        ]);

        assert_eq!(request.messages.len(), 3);
        assert_eq!(request.messages[2], ChatMessage::user("Summarize"));
        assert_eq!(request.data.attachments[0].name, "a.pdf");
    }
}
