pub mod chat_header;

use leptos::prelude::*;

/// Каркас страницы: шапка сверху, содержимое занимает остаток высоты
#[component]
pub fn Shell<C>(center: C) -> impl IntoView
where
    C: Fn() -> AnyView + 'static + Send + Sync,
{
    view! {
        <div style="height: 100vh; display: flex; flex-direction: column; background: var(--colorNeutralBackground2);">
            <chat_header::ChatHeader />
            <main style="flex: 1; min-height: 0; display: flex; justify-content: center;">
                {move || center()}
            </main>
        </div>
    }
}
