use crate::domain::a003_chat::ui::chat::model::fetch_client_config;
use crate::domain::a003_chat::ui::chat::ChatPage;
use crate::layout::Shell;
use contracts::system::config::ClientConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Настройки приходят с бэкенда один раз; без них загрузка файлов отключена
    let config = RwSignal::new(None::<ClientConfig>);

    wasm_bindgen_futures::spawn_local(async move {
        let loaded = match fetch_client_config().await {
            Ok(c) => {
                if !c.uploads_enabled() {
                    log::warn!("Upload gateway is not configured, file uploads are disabled");
                }
                c
            }
            Err(e) => {
                log::error!("Failed to load client config: {}", e);
                ClientConfig::default()
            }
        };
        config.set(Some(loaded));
    });

    view! {
        <thaw::ConfigProvider>
            <Shell center=move || {
                match config.get() {
                    Some(c) => view! { <ChatPage config=c /> }.into_any(),
                    None => view! {
                        <div style="margin: auto; color: var(--colorNeutralForeground3);">"Loading..."</div>
                    }.into_any(),
                }
            } />
        </thaw::ConfigProvider>
    }
}
