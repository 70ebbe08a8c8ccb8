//! ChatHeader component - application top bar.

use leptos::prelude::*;

#[component]
pub fn ChatHeader() -> impl IntoView {
    view! {
        <header style="padding: 12px 20px; border-bottom: 1px solid var(--colorNeutralStroke2); background: var(--colorNeutralBackground1);">
            <h1 style="font-size: 18px; font-weight: bold; margin: 0;">"Document Chat"</h1>
            <span style="color: var(--colorNeutralForeground3); font-size: 13px;">
                "Ask questions, attach PDFs, images, spreadsheets or presentations"
            </span>
        </header>
    }
}
