//! Attachment Domain Module
//!
//! Файлы, выбранные пользователем для отправки вместе с сообщением.
//! Включает проверку размера и типа файла до попадания в набор вложений.

pub mod aggregate;
pub mod validation;

pub use aggregate::{Attachment, AttachmentId, AttachmentRef};
pub use validation::{screen_file, validate_file, RejectedFile, ValidationError};
