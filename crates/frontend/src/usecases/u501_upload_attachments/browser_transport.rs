//! Загрузка вложений из браузера: fetch через gloo-net

use async_trait::async_trait;
use contracts::domain::a001_attachment::{Attachment, AttachmentId};
use contracts::domain::a002_upload_record::UploadTracker;
use contracts::usecases::u501_upload_attachments::{
    BlobTransport, PresignRequest, PresignResponse, UploadError, UploadStateStore,
};
use contracts::usecases::u502_compose_message::ComposeArea;
use gloo_net::http::Request;
use leptos::prelude::*;
use std::cell::RefCell;
use std::collections::HashMap;

/// Транспорт загрузчика поверх fetch
///
/// Держит `File` выбранных вложений: в состоянии страницы хранятся
/// только метаданные, сами байты читает браузер при PUT.
#[derive(Default)]
pub struct BrowserBlobTransport {
    files: RefCell<HashMap<AttachmentId, web_sys::File>>,
}

impl BrowserBlobTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, id: AttachmentId, file: web_sys::File) {
        self.files.borrow_mut().insert(id, file);
    }

    pub fn remove(&self, id: &AttachmentId) {
        self.files.borrow_mut().remove(id);
    }
}

#[async_trait(?Send)]
impl BlobTransport for BrowserBlobTransport {
    async fn request_upload_url(
        &self,
        gateway_url: &str,
        request: &PresignRequest,
    ) -> Result<PresignResponse, UploadError> {
        let response = Request::post(gateway_url)
            .json(request)
            .map_err(|e| UploadError::Network(format!("Failed to serialize request: {}", e)))?
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::PresignStatus {
                status: response.status(),
                body,
            });
        }

        response
            .json::<PresignResponse>()
            .await
            .map_err(|e| UploadError::Network(format!("Failed to parse response: {}", e)))
    }

    async fn put_object(&self, upload_url: &str, attachment: &Attachment) -> Result<(), UploadError> {
        let file = self
            .files
            .borrow()
            .get(&attachment.id)
            .cloned()
            .ok_or_else(|| UploadError::Network(format!("File {} is no longer selected", attachment.name)))?;

        let response = Request::put(upload_url)
            .header("Content-Type", &attachment.content_type)
            .body(file)
            .map_err(|e| UploadError::Network(e.to_string()))?
            .send()
            .await
            .map_err(|e| UploadError::Network(e.to_string()))?;

        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            return Err(UploadError::PutStatus {
                status: response.status(),
                body,
            });
        }

        Ok(())
    }
}

/// Трекер загрузок внутри реактивной области ввода
#[derive(Clone, Copy)]
pub struct SignalTracker(pub RwSignal<ComposeArea>);

impl UploadStateStore for SignalTracker {
    fn with_tracker<R>(&self, f: impl FnOnce(&mut UploadTracker) -> R) -> R {
        let mut area = self.0.write();
        f(&mut area.tracker)
    }
}
