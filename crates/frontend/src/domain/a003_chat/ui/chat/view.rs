//! Chat - View Component

use super::message_bubble::MessageBubble;
use super::view_model::{ChatUploader, ChatVm};
use crate::domain::a001_attachment::ui::attachment_chip::AttachmentChip;
use crate::shared::icons::icon;
use crate::usecases::u501_upload_attachments::BrowserBlobTransport;
use contracts::domain::a001_attachment::validation::accept_attribute;
use contracts::domain::a001_attachment::AttachmentId;
use contracts::system::config::ClientConfig;
use leptos::prelude::*;
use std::rc::Rc;
use thaw::*;

#[component]
#[allow(non_snake_case)]
pub fn ChatPage(config: ClientConfig) -> impl IntoView {
    let vm = ChatVm::new();
    let uploads_enabled = config.uploads_enabled();
    let uploader = StoredValue::new_local(Rc::new(ChatUploader::new(
        BrowserBlobTransport::new(),
        &config,
    )));
    let messages_container_ref = NodeRef::<leptos::html::Div>::new();
    let file_input_ref = NodeRef::<leptos::html::Input>::new();

    // Прокрутка вниз при каждом изменении переписки
    Effect::new(move |_| {
        vm.transcript.track();
        if let Some(container) = messages_container_ref.get() {
            request_animation_frame(move || {
                container.set_scroll_top(container.scroll_height());
            });
        }
    });

    let handle_send = Callback::new(move |_: ()| {
        if !vm.can_send() {
            return;
        }
        let uploader = uploader.get_value();
        wasm_bindgen_futures::spawn_local(vm.send(uploader));
    });

    let handle_remove = Callback::new(move |id: AttachmentId| {
        vm.remove_attachment(id, &uploader.get_value());
    });

    let is_busy = Signal::derive(move || vm.is_sending.get() || vm.transcript.with(|t| t.is_generating()));

    view! {
        <div style="height: 100%; width: 100%; max-width: 880px; display: flex; flex-direction: column; padding: 20px; box-sizing: border-box;">
            // Error display
            {move || {
                vm.error
                    .get()
                    .map(|e| {
                        view! {
                            <div style="padding: 12px; margin-bottom: 16px; background: var(--color-error-50); border: 1px solid var(--color-error-100); border-radius: 8px;">
                                <span style="color: var(--color-error);">{e}</span>
                            </div>
                        }
                    })
            }}

            // Messages area
            <div
                node_ref=messages_container_ref
                style="flex: 1; overflow-y: auto; display: flex; flex-direction: column; gap: 12px; margin-bottom: 16px; padding: 12px; background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); border-radius: 8px;"
            >
                <Show
                    when=move || !vm.transcript.with(|t| t.is_empty())
                    fallback=|| {
                        view! {
                            <div style="margin: auto; text-align: center; color: var(--colorNeutralForeground3);">
                                <div style="font-size: 16px; font-weight: 600;">"Start a conversation"</div>
                                <div style="font-size: 13px; margin-top: 4px;">
                                    "Ask a question or attach a document to analyze"
                                </div>
                            </div>
                        }
                    }
                >
                    <For
                        each=move || vm.transcript.with(|t| t.turns().iter().map(|turn| turn.id).collect::<Vec<_>>())
                        key=|id| *id
                        let:id
                    >
                        <MessageBubble id=id transcript=vm.transcript />
                    </For>
                </Show>
            </div>

            // Input area
            <div style="display: flex; flex-direction: column; gap: 8px;">
                // Rejected files
                <For
                    each=move || vm.area.with(|a| a.rejected.clone())
                    key=|r| (r.name.clone(), r.reason.clone())
                    let:rejected
                >
                    <div style="font-size: 13px; color: var(--colorPaletteRedForeground1); display: flex; align-items: center; gap: 6px;">
                        {icon("alert")}
                        <span>{format!("{}: {}", rejected.name, rejected.reason)}</span>
                    </div>
                </For>

                // File attachments display
                <Show when=move || !vm.area.with(|a| a.attachments.is_empty())>
                    <Flex style="gap: 8px; flex-wrap: wrap;">
                        <For
                            each=move || vm.area.with(|a| a.attachments.clone())
                            key=|a| a.id
                            let:attachment
                        >
                            <AttachmentChip
                                attachment=attachment
                                area=vm.area
                                disabled=is_busy
                                on_remove=handle_remove
                            />
                        </For>
                    </Flex>
                </Show>

                <Flex style="gap: 8px; align-items: flex-end;">
                    <input
                        node_ref=file_input_ref
                        type="file"
                        multiple=true
                        accept=accept_attribute()
                        style="display: none;"
                        on:change=move |ev| {
                            use wasm_bindgen::JsCast;
                            let Some(input) = ev
                                .target()
                                .and_then(|t| t.dyn_into::<web_sys::HtmlInputElement>().ok()) else {
                                return;
                            };
                            if let Some(files) = input.files() {
                                vm.add_files(files, &uploader.get_value());
                            }
                            // Clear input so the same file can be picked again
                            input.set_value("");
                        }
                    />

                    <div style="flex: 1;">
                        <Textarea
                            value=vm.input
                            placeholder="Type a message... (Ctrl+Enter to send)"
                            attr:style="width: 100%; min-height: 60px; max-height: 200px; resize: vertical;"
                            on:keydown=move |ev: web_sys::KeyboardEvent| {
                                if ev.key() == "Enter" && (ev.ctrl_key() || ev.meta_key()) {
                                    ev.prevent_default();
                                    handle_send.run(());
                                }
                            }
                        />
                    </div>

                    <Button
                        appearance=ButtonAppearance::Secondary
                        disabled=is_busy
                        attr:title=if uploads_enabled { "Attach files" } else { "File uploads are not configured" }
                        on_click=move |_| {
                            if let Some(input) = file_input_ref.get() {
                                input.click();
                            }
                        }
                    >
                        {icon("attach")}
                    </Button>

                    <Button
                        appearance=ButtonAppearance::Primary
                        disabled=Signal::derive(move || !vm.can_send())
                        on_click=move |_| handle_send.run(())
                    >
                        {icon("send")}
                        {move || if vm.is_sending.get() { " Sending..." } else { " Send" }}
                    </Button>
                </Flex>
            </div>
        </div>
    }
}
