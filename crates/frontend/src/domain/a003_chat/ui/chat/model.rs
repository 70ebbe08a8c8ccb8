//! Chat - Model (API functions)

use crate::shared::api_utils::{api_url, error_text};
use contracts::domain::a003_chat::{ChatRequest, StreamDecodeError, StreamDecoder, StreamPart};
use contracts::system::config::ClientConfig;
use gloo_net::http::Request;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;

/// Получить настройки клиента (шлюз загрузки, лимиты)
pub async fn fetch_client_config() -> Result<ClientConfig, String> {
    let response = Request::get(&api_url("/api/config"))
        .send()
        .await
        .map_err(|e| format!("Request failed: {}", e))?;

    if !response.ok() {
        return Err(format!("HTTP error: {}", response.status()));
    }

    response
        .json::<ClientConfig>()
        .await
        .map_err(|e| format!("Failed to parse response: {}", e))
}

/// Отправить переписку в `/api/chat` и читать ответ по мере генерации
///
/// `on_token` вызывается на каждый фрагмент текста. Кадр ошибки из потока
/// возвращается как `Err` с текстом ошибки.
pub async fn stream_chat(request: &ChatRequest, mut on_token: impl FnMut(&str)) -> Result<(), String> {
    let response = Request::post(&api_url("/api/chat"))
        .json(request)
        .map_err(|e| format!("Failed to serialize request: {}", e))?
        .send()
        .await
        .map_err(|e| format!("Failed to send request: {}", e))?;

    if !response.ok() {
        let body = response.text().await.unwrap_or_default();
        return Err(format!(
            "Chat request failed: {} {}",
            response.status(),
            error_text(&body)
        ));
    }

    let body = response
        .body()
        .ok_or_else(|| "Empty response body".to_string())?;
    let reader: web_sys::ReadableStreamDefaultReader = body
        .get_reader()
        .dyn_into()
        .map_err(|_| "Response stream is not readable".to_string())?;

    let mut decoder = StreamDecoder::new();
    let mut finished = false;

    loop {
        let chunk = JsFuture::from(reader.read())
            .await
            .map_err(|e| format!("Stream read failed: {:?}", e))?;

        let done = js_sys::Reflect::get(&chunk, &"done".into())
            .ok()
            .and_then(|v| v.as_bool())
            .unwrap_or(true);
        if done {
            break;
        }

        let value = js_sys::Reflect::get(&chunk, &"value".into())
            .map_err(|e| format!("Stream read failed: {:?}", e))?;
        let bytes = js_sys::Uint8Array::new(&value).to_vec();

        for part in decoder.push(&bytes) {
            finished |= apply_part(part, &mut on_token)?;
        }
    }

    if let Some(part) = decoder.finish() {
        finished |= apply_part(part, &mut on_token)?;
    }

    if !finished {
        log::warn!("Chat stream closed without a finish frame");
    }
    Ok(())
}

/// Обработать кадр; `Ok(true)` для кадра завершения
fn apply_part(
    part: Result<StreamPart, StreamDecodeError>,
    on_token: &mut impl FnMut(&str),
) -> Result<bool, String> {
    match part {
        Ok(StreamPart::Start { message_id }) => {
            log::debug!("Chat stream started: {}", message_id);
            Ok(false)
        }
        Ok(StreamPart::Text(text)) => {
            on_token(&text);
            Ok(false)
        }
        Ok(StreamPart::Error(message)) => Err(message),
        Ok(StreamPart::Finish { finish_reason }) => {
            log::debug!("Chat stream finished: {}", finish_reason);
            Ok(true)
        }
        Err(e) => {
            log::warn!("Skipping malformed stream line: {}", e);
            Ok(false)
        }
    }
}
