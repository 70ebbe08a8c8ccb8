//! Загрузчик вложений: pre-signed URL → PUT → состояние в трекере

use super::error::UploadError;
use super::request::PresignRequest;
use super::transport::BlobTransport;
use crate::domain::a001_attachment::{Attachment, AttachmentId};
use crate::domain::a002_upload_record::UploadTracker;
use crate::system::config::ClientConfig;
use futures::future::join_all;
use std::cell::RefCell;

/// Доступ к трекеру, которым владеет UI
///
/// Загрузчик только меняет состояния записей; сам трекер живёт в
/// реактивном состоянии страницы (или в `RefCell` в тестах).
pub trait UploadStateStore {
    fn with_tracker<R>(&self, f: impl FnOnce(&mut UploadTracker) -> R) -> R;
}

impl UploadStateStore for RefCell<UploadTracker> {
    fn with_tracker<R>(&self, f: impl FnOnce(&mut UploadTracker) -> R) -> R {
        f(&mut self.borrow_mut())
    }
}

/// Результат загрузки одного файла: URL в хранилище или ошибка
pub type UploadOutcome = (AttachmentId, Result<String, UploadError>);

pub struct Uploader<T: BlobTransport> {
    transport: T,
    gateway_url: Option<String>,
}

impl<T: BlobTransport> Uploader<T> {
    pub fn new(transport: T, config: &ClientConfig) -> Self {
        Self {
            transport,
            gateway_url: config.upload_gateway_url.clone(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.gateway_url.is_some()
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Загрузить один файл
    ///
    /// Любая ошибка записывается в трекер как Error с текстом и
    /// возвращается вызывающему. Повторов нет.
    pub async fn upload_file<S: UploadStateStore>(
        &self,
        store: &S,
        attachment: &Attachment,
    ) -> Result<String, UploadError> {
        store.with_tracker(|t| {
            if t.get(&attachment.id).is_none() {
                t.register(attachment);
            }
        });

        let Some(gateway_url) = self.gateway_url.as_deref() else {
            let err = UploadError::NotConfigured;
            store.with_tracker(|t| t.fail(attachment.id, err.to_string()))?;
            return Err(err);
        };

        store.with_tracker(|t| t.begin_upload(attachment.id))?;

        match self.transfer(gateway_url, attachment).await {
            Ok(file_url) => {
                store.with_tracker(|t| t.complete(attachment.id, file_url.clone()))?;
                Ok(file_url)
            }
            Err(err) => {
                store.with_tracker(|t| t.fail(attachment.id, err.to_string()))?;
                Err(err)
            }
        }
    }

    async fn transfer(&self, gateway_url: &str, attachment: &Attachment) -> Result<String, UploadError> {
        let presigned = self
            .transport
            .request_upload_url(gateway_url, &PresignRequest::for_attachment(attachment))
            .await?;

        if presigned.upload_url.trim().is_empty() {
            return Err(UploadError::MissingUploadUrl);
        }
        if presigned.file_url.trim().is_empty() {
            return Err(UploadError::MissingFileUrl);
        }

        self.transport
            .put_object(&presigned.upload_url, attachment)
            .await?;

        Ok(presigned.file_url)
    }

    /// Загрузить все файлы в состоянии Pending или Error одновременно
    ///
    /// Уже загруженные файлы пропускаются. Ошибка одного файла не влияет
    /// на остальные; порядок завершения не важен, итог хранится в трекере.
    pub async fn upload_all<S: UploadStateStore>(
        &self,
        store: &S,
        attachments: &[Attachment],
    ) -> Vec<UploadOutcome> {
        let targets: Vec<&Attachment> = attachments
            .iter()
            .filter(|a| {
                store.with_tracker(|t| t.state(&a.id).map(|s| s.needs_upload()).unwrap_or(true))
            })
            .collect();

        join_all(
            targets
                .into_iter()
                .map(|a| async move { (a.id, self.upload_file(store, a).await) }),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a002_upload_record::UploadState;
    use crate::usecases::u501_upload_attachments::PresignResponse;
    use async_trait::async_trait;
    use futures::executor::block_on;

    /// Транспорт-заглушка: ошибки задаются по имени файла
    #[derive(Default)]
    struct MockTransport {
        presign_fail: Vec<(&'static str, u16)>,
        put_fail: Vec<(&'static str, u16)>,
        no_upload_url: Vec<&'static str>,
        calls: RefCell<Vec<String>>,
    }

    #[async_trait(?Send)]
    impl BlobTransport for MockTransport {
        async fn request_upload_url(
            &self,
            gateway_url: &str,
            request: &PresignRequest,
        ) -> Result<PresignResponse, UploadError> {
            self.calls
                .borrow_mut()
                .push(format!("POST {} {}", gateway_url, request.file_name));

            if let Some((_, status)) = self.presign_fail.iter().find(|(n, _)| *n == request.file_name) {
                return Err(UploadError::PresignStatus {
                    status: *status,
                    body: "denied".into(),
                });
            }

            let upload_url = if self.no_upload_url.iter().any(|n| *n == request.file_name) {
                String::new()
            } else {
                format!("https://bucket/upload/{}?sig=1", request.file_name)
            };

            Ok(PresignResponse {
                upload_url,
                file_url: format!("https://bucket/{}", request.file_name),
            })
        }

        async fn put_object(&self, upload_url: &str, attachment: &Attachment) -> Result<(), UploadError> {
            self.calls
                .borrow_mut()
                .push(format!("PUT {} {}", upload_url, attachment.content_type));

            if let Some((_, status)) = self.put_fail.iter().find(|(n, _)| *n == attachment.name) {
                return Err(UploadError::PutStatus {
                    status: *status,
                    body: String::new(),
                });
            }
            Ok(())
        }
    }

    fn config() -> ClientConfig {
        ClientConfig::new(Some("https://gw/presign".into()))
    }

    fn pdf(name: &str) -> Attachment {
        Attachment::new(name, "application/pdf", 1024)
    }

    #[test]
    fn test_upload_success_records_url() {
        let uploader = Uploader::new(MockTransport::default(), &config());
        let store = RefCell::new(UploadTracker::new());
        let file = pdf("report.pdf");
        store.borrow_mut().register(&file);

        let url = block_on(uploader.upload_file(&store, &file)).unwrap();

        assert_eq!(url, "https://bucket/report.pdf");
        assert_eq!(
            store.borrow().state(&file.id),
            Some(&UploadState::Success {
                url: "https://bucket/report.pdf".into()
            })
        );
        assert_eq!(
            *uploader.transport().calls.borrow(),
            vec![
                "POST https://gw/presign report.pdf".to_string(),
                "PUT https://bucket/upload/report.pdf?sig=1 application/pdf".to_string(),
            ]
        );
    }

    #[test]
    fn test_presign_failure_skips_put() {
        let transport = MockTransport {
            presign_fail: vec![("report.pdf", 403)],
            ..Default::default()
        };
        let uploader = Uploader::new(transport, &config());
        let store = RefCell::new(UploadTracker::new());
        let file = pdf("report.pdf");

        let err = block_on(uploader.upload_file(&store, &file)).unwrap_err();

        assert_eq!(err.to_string(), "Failed to get pre-signed URL: 403 denied");
        assert_eq!(
            store.borrow().state(&file.id).and_then(|s| s.error_message().map(String::from)),
            Some("Failed to get pre-signed URL: 403 denied".to_string())
        );
        let calls = uploader.transport().calls.borrow();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].starts_with("POST"));
    }

    #[test]
    fn test_missing_upload_url_is_error() {
        let transport = MockTransport {
            no_upload_url: vec!["a.pdf"],
            ..Default::default()
        };
        let uploader = Uploader::new(transport, &config());
        let store = RefCell::new(UploadTracker::new());
        let file = pdf("a.pdf");

        let err = block_on(uploader.upload_file(&store, &file)).unwrap_err();
        assert_eq!(err, UploadError::MissingUploadUrl);
        assert_eq!(uploader.transport().calls.borrow().len(), 1);
    }

    #[test]
    fn test_not_configured_marks_error_without_network() {
        let uploader = Uploader::new(MockTransport::default(), &ClientConfig::default());
        let store = RefCell::new(UploadTracker::new());
        let file = pdf("a.pdf");

        assert!(!uploader.is_enabled());
        let err = block_on(uploader.upload_file(&store, &file)).unwrap_err();

        assert_eq!(err, UploadError::NotConfigured);
        assert_eq!(
            store.borrow().state(&file.id).and_then(|s| s.error_message().map(String::from)),
            Some("Upload API URL not configured".to_string())
        );
        assert!(uploader.transport().calls.borrow().is_empty());
    }

    #[test]
    fn test_upload_all_isolates_failures() {
        let transport = MockTransport {
            put_fail: vec![("b.pdf", 500)],
            ..Default::default()
        };
        let uploader = Uploader::new(transport, &config());
        let store = RefCell::new(UploadTracker::new());
        let files = vec![pdf("a.pdf"), pdf("b.pdf"), pdf("c.pdf")];
        for f in &files {
            store.borrow_mut().register(f);
        }

        let outcomes = block_on(uploader.upload_all(&store, &files));

        assert_eq!(outcomes.len(), 3);
        let tracker = store.borrow();
        assert!(matches!(tracker.state(&files[0].id), Some(UploadState::Success { .. })));
        assert_eq!(
            tracker.state(&files[1].id),
            Some(&UploadState::Error {
                message: "Failed to upload file: 500 ".into()
            })
        );
        assert!(matches!(tracker.state(&files[2].id), Some(UploadState::Success { .. })));
        assert!(tracker.is_settled());
    }

    #[test]
    fn test_upload_all_skips_successful_and_retries_errors() {
        let uploader = Uploader::new(MockTransport::default(), &config());
        let store = RefCell::new(UploadTracker::new());
        let done = pdf("done.pdf");
        let failed = pdf("failed.pdf");
        {
            let mut t = store.borrow_mut();
            t.register(&done);
            t.begin_upload(done.id).unwrap();
            t.complete(done.id, "https://bucket/done.pdf").unwrap();
            t.register(&failed);
            t.begin_upload(failed.id).unwrap();
            t.fail(failed.id, "network").unwrap();
        }

        let outcomes = block_on(uploader.upload_all(&store, &[done.clone(), failed.clone()]));

        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].0, failed.id);
        assert!(store.borrow().state(&failed.id).and_then(|s| s.url()).is_some());
        assert!(!uploader
            .transport()
            .calls
            .borrow()
            .iter()
            .any(|c| c.contains("done.pdf")));
    }
}
