//! Построчный протокол потока ответа `/api/chat`
//!
//! Каждая строка: `<код>:<JSON>\n`.
//!
//! | код | содержимое                      |
//! |-----|---------------------------------|
//! | `f` | `{"messageId": "..."}`, начало |
//! | `0` | строка с фрагментом текста      |
//! | `3` | строка с текстом ошибки         |
//! | `d` | `{"finishReason": "..."}`       |

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamPart {
    Start { message_id: String },
    Text(String),
    Error(String),
    Finish { finish_reason: String },
}

#[derive(Serialize, Deserialize)]
struct StartPayload {
    #[serde(rename = "messageId")]
    message_id: String,
}

#[derive(Serialize, Deserialize)]
struct FinishPayload {
    #[serde(rename = "finishReason")]
    finish_reason: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StreamDecodeError {
    #[error("Malformed stream line: {0}")]
    MalformedLine(String),

    #[error("Unknown stream part code: {0}")]
    UnknownCode(String),

    #[error("Invalid stream payload: {0}")]
    InvalidPayload(String),
}

impl StreamPart {
    pub fn code(&self) -> &'static str {
        match self {
            StreamPart::Start { .. } => "f",
            StreamPart::Text(_) => "0",
            StreamPart::Error(_) => "3",
            StreamPart::Finish { .. } => "d",
        }
    }

    /// Закодировать в строку протокола (с завершающим `\n`)
    pub fn encode(&self) -> String {
        let payload = match self {
            StreamPart::Start { message_id } => serde_json::to_string(&StartPayload {
                message_id: message_id.clone(),
            }),
            StreamPart::Text(text) => serde_json::to_string(text),
            StreamPart::Error(message) => serde_json::to_string(message),
            StreamPart::Finish { finish_reason } => serde_json::to_string(&FinishPayload {
                finish_reason: finish_reason.clone(),
            }),
        }
        // Сериализация строк и простых структур не может завершиться ошибкой
        .unwrap_or_default();

        format!("{}:{}\n", self.code(), payload)
    }

    /// Разобрать одну строку без завершающего `\n`
    pub fn decode_line(line: &str) -> Result<Self, StreamDecodeError> {
        let (code, payload) = line
            .split_once(':')
            .ok_or_else(|| StreamDecodeError::MalformedLine(line.to_string()))?;

        let invalid = |e: serde_json::Error| StreamDecodeError::InvalidPayload(e.to_string());

        match code {
            "f" => {
                let p: StartPayload = serde_json::from_str(payload).map_err(invalid)?;
                Ok(StreamPart::Start {
                    message_id: p.message_id,
                })
            }
            "0" => Ok(StreamPart::Text(serde_json::from_str(payload).map_err(invalid)?)),
            "3" => Ok(StreamPart::Error(serde_json::from_str(payload).map_err(invalid)?)),
            "d" => {
                let p: FinishPayload = serde_json::from_str(payload).map_err(invalid)?;
                Ok(StreamPart::Finish {
                    finish_reason: p.finish_reason,
                })
            }
            other => Err(StreamDecodeError::UnknownCode(other.to_string())),
        }
    }
}

/// Декодер потока, принимающий произвольно нарезанные куски байт
///
/// Неполная строка (и неполная UTF-8 последовательность) остаётся в буфере
/// до следующего куска.
#[derive(Debug, Default)]
pub struct StreamDecoder {
    buffer: Vec<u8>,
}

impl StreamDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, chunk: &[u8]) -> Vec<Result<StreamPart, StreamDecodeError>> {
        self.buffer.extend_from_slice(chunk);

        let mut parts = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|b| *b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(part) = Self::decode_bytes(&line[..line.len() - 1]) {
                parts.push(part);
            }
        }
        parts
    }

    /// Разобрать остаток буфера после окончания потока
    pub fn finish(&mut self) -> Option<Result<StreamPart, StreamDecodeError>> {
        let rest = std::mem::take(&mut self.buffer);
        Self::decode_bytes(&rest)
    }

    fn decode_bytes(line: &[u8]) -> Option<Result<StreamPart, StreamDecodeError>> {
        let line = match std::str::from_utf8(line) {
            Ok(s) => s.trim_end_matches('\r'),
            Err(e) => return Some(Err(StreamDecodeError::MalformedLine(e.to_string()))),
        };
        if line.trim().is_empty() {
            return None;
        }
        Some(StreamPart::decode_line(line))
    }
}
