pub mod service;
pub mod system_prompt;
