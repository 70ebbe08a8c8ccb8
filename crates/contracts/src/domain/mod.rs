pub mod a001_attachment;
pub mod a002_upload_record;
pub mod a003_chat;
