pub mod common;
pub mod u501_upload_attachments;
pub mod u502_compose_message;
