//! Хранилище состояний загрузки, по ключу [`AttachmentId`]
//!
//! Все переходы выполняются только через методы трекера; недопустимый
//! переход возвращает ошибку и не меняет состояние.

use super::aggregate::{UploadRecord, UploadState};
use crate::domain::a001_attachment::{Attachment, AttachmentId};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("Unknown attachment: {0:?}")]
    UnknownAttachment(AttachmentId),

    #[error("Invalid upload transition for {name}: {from} -> {to}")]
    InvalidTransition {
        name: String,
        from: &'static str,
        to: &'static str,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UploadTracker {
    records: HashMap<AttachmentId, UploadRecord>,
    order: Vec<AttachmentId>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Зарегистрировать вложение в состоянии Pending
    ///
    /// Повторная регистрация сбрасывает запись в Pending, если файл
    /// сейчас не загружается.
    pub fn register(&mut self, attachment: &Attachment) {
        match self.records.get_mut(&attachment.id) {
            Some(record) if record.state.is_in_flight() => {}
            Some(record) => record.state = UploadState::Pending,
            None => {
                self.order.push(attachment.id);
                self.records.insert(
                    attachment.id,
                    UploadRecord::pending(attachment.id, attachment.name.clone()),
                );
            }
        }
    }

    /// Pending | Error | Success → Uploading
    ///
    /// Переход из Success допускается только как явный повтор пользователем.
    pub fn begin_upload(&mut self, id: AttachmentId) -> Result<(), TransitionError> {
        self.transition(id, UploadState::Uploading, |from| !from.is_in_flight())
    }

    /// Uploading → Success
    pub fn complete(&mut self, id: AttachmentId, url: impl Into<String>) -> Result<(), TransitionError> {
        let next = UploadState::Success { url: url.into() };
        self.transition(id, next, |from| from.is_in_flight())
    }

    /// Любое состояние кроме Success → Error
    pub fn fail(&mut self, id: AttachmentId, message: impl Into<String>) -> Result<(), TransitionError> {
        let next = UploadState::Error {
            message: message.into(),
        };
        self.transition(id, next, |from| !matches!(from, UploadState::Success { .. }))
    }

    fn transition(
        &mut self,
        id: AttachmentId,
        next: UploadState,
        allowed: impl Fn(&UploadState) -> bool,
    ) -> Result<(), TransitionError> {
        let record = self
            .records
            .get_mut(&id)
            .ok_or(TransitionError::UnknownAttachment(id))?;

        if !allowed(&record.state) {
            return Err(TransitionError::InvalidTransition {
                name: record.name.clone(),
                from: record.state.as_str(),
                to: next.as_str(),
            });
        }

        record.state = next;
        Ok(())
    }

    pub fn get(&self, id: &AttachmentId) -> Option<&UploadRecord> {
        self.records.get(id)
    }

    pub fn state(&self, id: &AttachmentId) -> Option<&UploadState> {
        self.records.get(id).map(|r| &r.state)
    }

    pub fn remove(&mut self, id: &AttachmentId) -> Option<UploadRecord> {
        self.order.retain(|existing| existing != id);
        self.records.remove(id)
    }

    pub fn clear(&mut self) {
        self.records.clear();
        self.order.clear();
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Записи в порядке регистрации
    pub fn records(&self) -> Vec<&UploadRecord> {
        self.order
            .iter()
            .filter_map(|id| self.records.get(id))
            .collect()
    }

    /// Вложения, которые нужно загрузить (Pending или Error)
    pub fn pending_ids(&self) -> Vec<AttachmentId> {
        self.records()
            .into_iter()
            .filter(|r| r.state.needs_upload())
            .map(|r| r.attachment_id)
            .collect()
    }

    /// Успешно загруженные вложения с их URL
    pub fn successful(&self) -> Vec<(AttachmentId, String)> {
        self.records()
            .into_iter()
            .filter_map(|r| r.state.url().map(|url| (r.attachment_id, url.to_string())))
            .collect()
    }

    pub fn in_flight_count(&self) -> usize {
        self.records
            .values()
            .filter(|r| r.state.is_in_flight())
            .count()
    }

    /// Нет ни одной загрузки в процессе
    pub fn is_settled(&self) -> bool {
        self.in_flight_count() == 0
    }
}
