//! Переписка на клиенте: реплики пользователя и ассистента
//!
//! Ответ ассистента добавляется по токенам, пока реплика в статусе
//! Streaming, затем завершается или помечается как неудачная.

use super::aggregate::{ChatMessage, ChatRole};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TurnId(pub Uuid);

impl TurnId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnStatus {
    Complete,
    Streaming,
    Failed { message: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub role: ChatRole,
    pub content: String,
    /// Имена приложенных файлов (только для реплик пользователя)
    pub attachments: Vec<String>,
    pub status: TurnStatus,
}

impl Turn {
    pub fn is_failed(&self) -> bool {
        matches!(self.status, TurnStatus::Failed { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transcript {
    turns: Vec<Turn>,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn push_user(&mut self, content: impl Into<String>, attachments: Vec<String>) -> TurnId {
        let id = TurnId::new_v4();
        self.turns.push(Turn {
            id,
            role: ChatRole::User,
            content: content.into(),
            attachments,
            status: TurnStatus::Complete,
        });
        id
    }

    pub fn begin_assistant(&mut self) -> TurnId {
        let id = TurnId::new_v4();
        self.turns.push(Turn {
            id,
            role: ChatRole::Assistant,
            content: String::new(),
            attachments: Vec::new(),
            status: TurnStatus::Streaming,
        });
        id
    }

    fn streaming_turn(&mut self, id: TurnId) -> Option<&mut Turn> {
        self.turns
            .iter_mut()
            .find(|t| t.id == id && t.status == TurnStatus::Streaming)
    }

    /// Добавить токен к реплике; игнорируется, если реплика уже завершена
    pub fn append_token(&mut self, id: TurnId, token: &str) -> bool {
        match self.streaming_turn(id) {
            Some(turn) => {
                turn.content.push_str(token);
                true
            }
            None => false,
        }
    }

    pub fn finish(&mut self, id: TurnId) -> bool {
        match self.streaming_turn(id) {
            Some(turn) => {
                turn.status = TurnStatus::Complete;
                true
            }
            None => false,
        }
    }

    pub fn fail(&mut self, id: TurnId, message: impl Into<String>) -> bool {
        match self.streaming_turn(id) {
            Some(turn) => {
                turn.status = TurnStatus::Failed {
                    message: message.into(),
                };
                true
            }
            None => false,
        }
    }

    /// Идёт генерация ответа: новая отправка запрещена
    pub fn is_generating(&self) -> bool {
        self.turns.iter().any(|t| t.status == TurnStatus::Streaming)
    }

    /// История для следующего запроса к прокси
    ///
    /// Неудачные и пустые реплики не отправляются.
    pub fn history(&self) -> Vec<ChatMessage> {
        self.turns
            .iter()
            .filter(|t| !t.is_failed() && t.status != TurnStatus::Streaming)
            .filter(|t| !t.content.is_empty() || !t.attachments.is_empty())
            .map(|t| ChatMessage {
                role: t.role,
                content: t.content.clone(),
            })
            .collect()
    }
}
