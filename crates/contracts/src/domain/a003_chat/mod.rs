//! Chat Domain Module
//!
//! Формат запроса к прокси `/api/chat`, модель переписки на клиенте и
//! построчный протокол потока токенов.

pub mod aggregate;
pub mod stream_protocol;
pub mod transcript;

pub use aggregate::{ChatData, ChatMessage, ChatRequest, ChatRole};
pub use stream_protocol::{StreamDecodeError, StreamDecoder, StreamPart};
pub use transcript::{Transcript, Turn, TurnId, TurnStatus};
