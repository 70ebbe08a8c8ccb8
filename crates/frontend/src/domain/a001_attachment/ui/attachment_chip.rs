//! Attachment Chip - выбранный файл со статусом загрузки

use crate::shared::icons::category_icon;
use crate::shared::icons::icon;
use contracts::domain::a001_attachment::{Attachment, AttachmentId};
use contracts::domain::a002_upload_record::UploadState;
use contracts::shared::format::format_file_size;
use contracts::usecases::u502_compose_message::ComposeArea;
use leptos::prelude::*;

fn status_color(state: &UploadState) -> &'static str {
    match state {
        UploadState::Pending => "var(--colorNeutralForeground3)",
        UploadState::Uploading => "var(--colorBrandForeground1)",
        UploadState::Success { .. } => "var(--colorPaletteGreenForeground1)",
        UploadState::Error { .. } => "var(--colorPaletteRedForeground1)",
    }
}

#[component]
#[allow(non_snake_case)]
pub fn AttachmentChip(
    attachment: Attachment,
    area: RwSignal<ComposeArea>,
    #[prop(into)] disabled: Signal<bool>,
    on_remove: Callback<AttachmentId>,
) -> impl IntoView {
    let id = attachment.id;
    let state = Memo::new(move |_| area.with(|a| a.tracker.state(&id).cloned()));
    let size = format_file_size(attachment.size);

    view! {
        <div
            style="padding: 6px 10px; background: var(--colorNeutralBackground1); border: 1px solid var(--colorNeutralStroke2); border-radius: 6px; display: flex; align-items: center; gap: 8px; max-width: 280px;"
            title=move || state.get().and_then(|s| s.error_message().map(str::to_string))
        >
            {category_icon(attachment.category())}
            <div style="display: flex; flex-direction: column; min-width: 0;">
                <span style="font-size: 13px; white-space: nowrap; overflow: hidden; text-overflow: ellipsis;">
                    {attachment.name.clone()}
                </span>
                <span style="font-size: 11px; color: var(--colorNeutralForeground3);">
                    {size}
                    {move || {
                        state
                            .get()
                            .map(|s| {
                                view! {
                                    " · "
                                    <span style=format!("color: {};", status_color(&s))>{s.label()}</span>
                                }
                            })
                    }}
                </span>
            </div>
            <button
                style="background: none; border: none; cursor: pointer; padding: 2px; color: var(--colorNeutralForeground3);"
                title="Remove"
                disabled=move || disabled.get()
                on:click=move |_| on_remove.run(id)
            >
                {icon("close")}
            </button>
        </div>
    }
}
