pub mod error;
pub mod request;
pub mod transport;
pub mod uploader;

pub use error::UploadError;
pub use request::{PresignRequest, PresignResponse};
pub use transport::BlobTransport;
pub use uploader::{UploadOutcome, UploadStateStore, Uploader};

use crate::usecases::common::UseCaseMetadata;

pub struct UploadAttachments;

impl UseCaseMetadata for UploadAttachments {
    fn usecase_index() -> &'static str {
        "u501"
    }

    fn usecase_name() -> &'static str {
        "upload_attachments"
    }

    fn display_name() -> &'static str {
        "Загрузка вложений"
    }

    fn description() -> &'static str {
        "Получение pre-signed URL у шлюза и загрузка файла напрямую в хранилище"
    }
}
