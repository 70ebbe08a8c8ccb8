pub mod a003_chat;
