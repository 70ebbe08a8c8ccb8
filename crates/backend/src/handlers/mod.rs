pub mod a003_chat;
pub mod client_config;
