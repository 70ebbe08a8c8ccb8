/// Форматирует число с разделителями тысяч (точками): `1234567` -> `1.234.567`
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, ch) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push('.');
        }
        result.push(ch);
    }
    result.chars().rev().collect()
}

/// Размер ответа для журнала запросов
///
/// Потоковые ответы не имеют `Content-Length`, для них пишется `stream`.
pub fn format_body_size(content_length: Option<u64>) -> String {
    match content_length {
        Some(n) => format_number(n),
        None => "stream".to_string(),
    }
}
