//! Chat - View Model

use super::model::stream_chat;
use crate::usecases::u501_upload_attachments::{BrowserBlobTransport, SignalTracker};
use contracts::domain::a001_attachment::{screen_file, AttachmentId};
use contracts::domain::a003_chat::Transcript;
use contracts::usecases::common::UseCaseMetadata;
use contracts::usecases::u501_upload_attachments::{UploadAttachments, Uploader};
use contracts::usecases::u502_compose_message::{upload_for_submit, ComposeArea, ComposeMessage};
use leptos::prelude::*;
use std::rc::Rc;

pub type ChatUploader = Uploader<BrowserBlobTransport>;

#[derive(Clone, Copy)]
pub struct ChatVm {
    pub transcript: RwSignal<Transcript>,
    pub input: RwSignal<String>,
    pub area: RwSignal<ComposeArea>,
    pub error: RwSignal<Option<String>>,
    pub is_sending: RwSignal<bool>,
}

impl ChatVm {
    pub fn new() -> Self {
        Self {
            transcript: RwSignal::new(Transcript::new()),
            input: RwSignal::new(String::new()),
            area: RwSignal::new(ComposeArea::new()),
            error: RwSignal::new(None),
            is_sending: RwSignal::new(false),
        }
    }

    /// Есть текст или файлы, и предыдущий ответ уже завершён
    pub fn can_send(&self) -> bool {
        !self.is_sending.get()
            && !self.transcript.with(|t| t.is_generating())
            && self
                .input
                .with(|text| self.area.with(|area| area.can_submit(text)))
    }

    /// Принять файлы из `<input type="file">`
    ///
    /// Прошедшие проверку становятся вложениями в состоянии Pending,
    /// остальные показываются в списке отклонённых.
    pub fn add_files(&self, files: web_sys::FileList, uploader: &ChatUploader) {
        let mut screened = Vec::new();

        for index in 0..files.length() {
            let Some(file) = files.get(index) else {
                continue;
            };
            let result = screen_file(&file.name(), &file.type_(), file.size() as u64);
            match &result {
                Ok(attachment) => uploader.transport().insert(attachment.id, file),
                Err(rejected) => log::warn!("Rejected {}: {}", rejected.name, rejected.reason),
            }
            screened.push(result);
        }

        self.area.update(|area| area.add_screened(screened));
    }

    pub fn remove_attachment(&self, id: AttachmentId, uploader: &ChatUploader) {
        self.area.update(|area| {
            area.remove(&id);
        });
        uploader.transport().remove(&id);
    }

    /// Отправить сообщение: загрузка вложений → сборка → поток ответа
    pub async fn send(self, uploader: Rc<ChatUploader>) {
        let text = self.input.get_untracked();
        let attachments = self.area.with_untracked(|area| area.attachments.clone());

        if self.is_sending.get_untracked() || self.transcript.with_untracked(|t| t.is_generating()) {
            return;
        }
        if !self.area.with_untracked(|area| area.can_submit(&text)) {
            return;
        }

        self.is_sending.set(true);
        self.error.set(None);

        if !attachments.is_empty() {
            log::info!(
                "{}: {} file(s)",
                UploadAttachments::full_name(),
                attachments.len()
            );
        }
        let store = SignalTracker(self.area);
        let uploaded = upload_for_submit(uploader.as_ref(), &store, &text, &attachments).await;
        for (id, outcome) in uploaded.unwrap_or_default() {
            if let Err(e) = outcome {
                log::error!("Upload {} failed: {}", id.as_string(), e);
            }
        }

        let composed = match self.area.with_untracked(|area| area.compose(&text)) {
            Ok(message) => message,
            Err(e) => {
                log::warn!("{}: {}", ComposeMessage::full_name(), e);
                self.error.set(Some(e.to_string()));
                self.is_sending.set(false);
                return;
            }
        };

        let history = self.transcript.with_untracked(|t| t.history());
        let names = composed.attachment_names();
        let request = composed.into_request(history);

        self.transcript.update(|t| {
            t.push_user(text.clone(), names);
        });
        self.input.set(String::new());
        let assistant = self.transcript.write().begin_assistant();

        let transcript = self.transcript;
        let result = stream_chat(&request, |token| {
            transcript.update(|t| {
                t.append_token(assistant, token);
            });
        })
        .await;

        match result {
            Ok(()) => {
                self.transcript.update(|t| {
                    t.finish(assistant);
                });
                let released = self.area.write().submit_succeeded();
                for id in &released {
                    uploader.transport().remove(id);
                }
            }
            Err(e) => {
                log::error!("Chat stream failed: {}", e);
                self.transcript.update(|t| {
                    t.fail(assistant, e.clone());
                });
                self.error.set(Some(e));
                self.area
                    .with_untracked(|area| self.input.update(|draft| area.submit_failed(draft, &text)));
            }
        }

        self.is_sending.set(false);
    }
}
