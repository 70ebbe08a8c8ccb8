use super::error::UploadError;
use super::request::{PresignRequest, PresignResponse};
use crate::domain::a001_attachment::Attachment;
use async_trait::async_trait;

/// Сетевой транспорт загрузчика
///
/// В браузере реализован поверх fetch; futures там не `Send`.
#[async_trait(?Send)]
pub trait BlobTransport {
    /// `POST <gateway_url>` с `{fileName, contentType}`
    ///
    /// Ответ не 2xx должен возвращаться как [`UploadError::PresignStatus`].
    async fn request_upload_url(
        &self,
        gateway_url: &str,
        request: &PresignRequest,
    ) -> Result<PresignResponse, UploadError>;

    /// `PUT <upload_url>` с байтами файла и его `Content-Type`
    ///
    /// Ответ не 2xx должен возвращаться как [`UploadError::PutStatus`].
    async fn put_object(&self, upload_url: &str, attachment: &Attachment) -> Result<(), UploadError>;
}
