pub mod a001_attachment;
pub mod a003_chat;
