//! Область ввода: выбранные вложения, их загрузки и отклонённые файлы

use super::composer::{compose, should_submit, ComposeError, ComposedMessage};
use crate::domain::a001_attachment::{Attachment, AttachmentId, RejectedFile};
use crate::domain::a002_upload_record::UploadTracker;
use crate::usecases::u501_upload_attachments::{
    BlobTransport, UploadOutcome, UploadStateStore, Uploader,
};
use std::cell::RefCell;

/// Состояние под полем ввода до отправки
///
/// Вложения и записи загрузок живут вместе: запись появляется при выборе
/// файла и исчезает при его удалении или после успешной отправки.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ComposeArea {
    pub attachments: Vec<Attachment>,
    pub tracker: UploadTracker,
    pub rejected: Vec<RejectedFile>,
}

impl ComposeArea {
    pub fn new() -> Self {
        Self::default()
    }

    /// Результат проверки выбранных файлов
    ///
    /// Принятые добавляются в конец в состоянии Pending, список
    /// отклонённых заменяется целиком.
    pub fn add_screened(&mut self, screened: Vec<Result<Attachment, RejectedFile>>) {
        self.rejected.clear();
        for result in screened {
            match result {
                Ok(attachment) => {
                    self.tracker.register(&attachment);
                    self.attachments.push(attachment);
                }
                Err(rejected) => self.rejected.push(rejected),
            }
        }
    }

    pub fn remove(&mut self, id: &AttachmentId) -> bool {
        let before = self.attachments.len();
        self.attachments.retain(|a| &a.id != id);
        self.tracker.remove(id);
        self.attachments.len() != before
    }

    pub fn can_submit(&self, text: &str) -> bool {
        should_submit(text, &self.attachments)
    }

    pub fn compose(&self, text: &str) -> Result<ComposedMessage, ComposeError> {
        compose(text, &self.attachments, &self.tracker)
    }

    /// Ответ получен полностью: вложения и записи загрузок сбрасываются
    ///
    /// Возвращает id снятых вложений, чтобы освободить их файлы.
    pub fn submit_succeeded(&mut self) -> Vec<AttachmentId> {
        let ids = self.attachments.iter().map(|a| a.id).collect();
        self.attachments.clear();
        self.tracker.clear();
        self.rejected.clear();
        ids
    }

    /// Поток ответа оборвался: вложения остаются для повторной отправки,
    /// отправленный текст возвращается в поле ввода, если оно ещё пустое
    pub fn submit_failed(&self, draft: &mut String, sent: &str) {
        if draft.trim().is_empty() {
            *draft = sent.to_string();
        }
    }
}

impl UploadStateStore for RefCell<ComposeArea> {
    fn with_tracker<R>(&self, f: impl FnOnce(&mut UploadTracker) -> R) -> R {
        f(&mut self.borrow_mut().tracker)
    }
}

/// Загрузить вложения перед отправкой
///
/// Пустая отправка завершается [`ComposeError::Empty`] без обращения к
/// транспорту. Вложения передаются снимком, трекер меняется через `store`.
pub async fn upload_for_submit<T: BlobTransport, S: UploadStateStore>(
    uploader: &Uploader<T>,
    store: &S,
    text: &str,
    attachments: &[Attachment],
) -> Result<Vec<UploadOutcome>, ComposeError> {
    if !should_submit(text, attachments) {
        return Err(ComposeError::Empty);
    }
    if attachments.is_empty() {
        return Ok(Vec::new());
    }
    Ok(uploader.upload_all(store, attachments).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a001_attachment::screen_file;
    use crate::domain::a002_upload_record::UploadState;
    use crate::system::config::ClientConfig;
    use crate::usecases::u501_upload_attachments::{
        PresignRequest, PresignResponse, UploadError,
    };
    use async_trait::async_trait;
    use futures::executor::block_on;
    use std::cell::Cell;

    /// Транспорт, который только считает обращения
    #[derive(Default)]
    struct CountingTransport {
        presign_calls: Cell<usize>,
        put_calls: Cell<usize>,
    }

    #[async_trait(?Send)]
    impl BlobTransport for CountingTransport {
        async fn request_upload_url(
            &self,
            _gateway_url: &str,
            request: &PresignRequest,
        ) -> Result<PresignResponse, UploadError> {
            self.presign_calls.set(self.presign_calls.get() + 1);
            Ok(PresignResponse {
                upload_url: format!("https://bucket/upload/{}", request.file_name),
                file_url: format!("https://bucket/{}", request.file_name),
            })
        }

        async fn put_object(&self, _upload_url: &str, _attachment: &Attachment) -> Result<(), UploadError> {
            self.put_calls.set(self.put_calls.get() + 1);
            Ok(())
        }
    }

    fn uploader() -> Uploader<CountingTransport> {
        Uploader::new(
            CountingTransport::default(),
            &ClientConfig::new(Some("https://gw.example.com/presign".into())),
        )
    }

    fn area_with(files: &[(&str, &str)]) -> ComposeArea {
        let mut area = ComposeArea::new();
        area.add_screened(
            files
                .iter()
                .map(|(name, content_type)| screen_file(name, content_type, 1024))
                .collect(),
        );
        area
    }

    fn transport_calls(uploader: &Uploader<CountingTransport>) -> usize {
        uploader.transport().presign_calls.get() + uploader.transport().put_calls.get()
    }

    #[test]
    fn test_empty_submission_makes_no_network_call() {
        let uploader = uploader();
        let store = RefCell::new(ComposeArea::new());

        let result = block_on(upload_for_submit(&uploader, &store, "   ", &[]));

        assert_eq!(result, Err(ComposeError::Empty));
        assert_eq!(transport_calls(&uploader), 0);
        assert!(!store.borrow().can_submit("   "));
    }

    #[test]
    fn test_text_only_submission_skips_transport() {
        let uploader = uploader();
        let store = RefCell::new(ComposeArea::new());

        let outcomes = block_on(upload_for_submit(&uploader, &store, "Hello", &[])).unwrap();

        assert!(outcomes.is_empty());
        assert_eq!(transport_calls(&uploader), 0);
        assert_eq!(store.borrow().compose("Hello").unwrap().text, "Hello");
    }

    #[test]
    fn test_success_clears_attachments_and_records() {
        let uploader = uploader();
        let store = RefCell::new(area_with(&[
            ("report.pdf", "application/pdf"),
            ("chart.png", "image/png"),
        ]));
        let attachments = store.borrow().attachments.clone();

        let outcomes = block_on(upload_for_submit(&uploader, &store, "", &attachments)).unwrap();
        assert_eq!(outcomes.len(), 2);
        assert!(outcomes.iter().all(|(_, r)| r.is_ok()));

        let message = store.borrow().compose("").unwrap();
        assert_eq!(message.attachment_names(), vec!["report.pdf", "chart.png"]);

        let released = store.borrow_mut().submit_succeeded();
        assert_eq!(released, attachments.iter().map(|a| a.id).collect::<Vec<_>>());

        let area = store.borrow();
        assert!(area.attachments.is_empty());
        assert!(area.tracker.is_empty());
        assert!(area.rejected.is_empty());
    }

    #[test]
    fn test_failure_keeps_attachments_and_restores_text() {
        let uploader = uploader();
        let store = RefCell::new(area_with(&[("report.pdf", "application/pdf")]));
        let attachments = store.borrow().attachments.clone();
        let id = attachments[0].id;

        block_on(upload_for_submit(&uploader, &store, "Summarize", &attachments)).unwrap();
        assert_eq!(transport_calls(&uploader), 2);

        let mut draft = String::new();
        store.borrow().submit_failed(&mut draft, "Summarize");

        assert_eq!(draft, "Summarize");
        assert_eq!(store.borrow().attachments, attachments);
        assert!(matches!(
            store.borrow().tracker.state(&id),
            Some(UploadState::Success { .. })
        ));

        // повторная отправка не загружает файл заново
        block_on(upload_for_submit(&uploader, &store, &draft, &attachments)).unwrap();
        assert_eq!(transport_calls(&uploader), 2);

        let message = store.borrow().compose(&draft).unwrap();
        assert_eq!(message.text, "Summarize");
        assert_eq!(message.attachments[0].url, "https://bucket/report.pdf");
    }

    #[test]
    fn test_failure_keeps_newly_typed_draft() {
        let area = ComposeArea::new();
        let mut draft = "Another question".to_string();

        area.submit_failed(&mut draft, "Summarize");

        assert_eq!(draft, "Another question");
    }

    #[test]
    fn test_add_screened_replaces_rejected_list() {
        let mut area = area_with(&[("movie.mp4", "video/mp4"), ("notes.txt", "text/plain")]);
        assert_eq!(area.attachments.len(), 1);
        assert_eq!(area.rejected.len(), 1);
        assert_eq!(area.rejected[0].name, "movie.mp4");

        area.add_screened(vec![screen_file("data.csv", "text/csv", 10)]);

        assert_eq!(area.attachments.len(), 2);
        assert!(area.rejected.is_empty());
        assert_eq!(area.tracker.len(), 2);
    }

    #[test]
    fn test_remove_drops_record() {
        let mut area = area_with(&[("notes.txt", "text/plain"), ("data.csv", "text/csv")]);
        let id = area.attachments[0].id;

        assert!(area.remove(&id));
        assert!(!area.remove(&id));

        assert_eq!(area.attachments.len(), 1);
        assert!(area.tracker.get(&id).is_none());
        assert_eq!(area.tracker.len(), 1);
    }
}
