use contracts::system::config::ClientConfig;
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub llm: LlmConfig,
    #[serde(default)]
    pub upload: UploadConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Директория со сборкой фронтенда
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LlmConfig {
    pub api_endpoint: String,
    #[serde(default)]
    pub api_key: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: i32,
    /// Предельная длительность одного запроса к чату, включая стрим
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct UploadConfig {
    /// Шлюз, выдающий pre-signed URL. Без значения загрузка отключена.
    pub gateway_url: Option<String>,
}

fn default_static_dir() -> String {
    "dist".to_string()
}

/// Default configuration embedded in the binary
const DEFAULT_CONFIG: &str = r#"
[server]
host = "0.0.0.0"
port = 3000
static_dir = "dist"

[llm]
api_endpoint = "https://api.openai.com/v1"
api_key = ""
model = "gpt-4o"
temperature = 0.7
max_tokens = 4096
request_timeout_secs = 30

[upload]
"#;

impl Config {
    pub fn parse(contents: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(contents)?;
        Ok(config)
    }

    /// Переопределение из переменных окружения (пустые значения игнорируются)
    pub fn apply_env_overrides(&mut self, get_var: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| get_var(key).filter(|v| !v.trim().is_empty());

        if let Some(api_key) = non_empty("OPENAI_API_KEY") {
            self.llm.api_key = api_key;
        }
        if let Some(model) = non_empty("LLM_MODEL") {
            self.llm.model = model;
        }
        if let Some(gateway_url) = non_empty("UPLOAD_API_URL") {
            self.upload.gateway_url = Some(gateway_url);
        }

        if self
            .upload
            .gateway_url
            .as_deref()
            .map_or(false, |url| url.trim().is_empty())
        {
            self.upload.gateway_url = None;
        }
    }

    pub fn request_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.llm.request_timeout_secs)
    }

    pub fn client_config(&self) -> ClientConfig {
        ClientConfig::new(self.upload.gateway_url.clone())
    }
}

/// Load configuration from config.toml file
///
/// Search order:
/// 1. Next to the executable (for production)
/// 2. Falls back to embedded default config
///
/// Environment overrides are applied on top in both cases.
pub fn load_config() -> anyhow::Result<Config> {
    let mut config = load_file_or_default()?;
    config.apply_env_overrides(|key| std::env::var(key).ok());
    Ok(config)
}

fn load_file_or_default() -> anyhow::Result<Config> {
    // Try to find config.toml next to the executable
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            let config_path = exe_dir.join("config.toml");

            if config_path.exists() {
                tracing::info!("Loading config from: {}", config_path.display());
                let contents = std::fs::read_to_string(&config_path)?;
                return Config::parse(&contents);
            } else {
                tracing::warn!("config.toml not found at: {}", config_path.display());
            }
        }
    }

    // Fall back to default config
    tracing::info!("Using default embedded configuration");
    Config::parse(DEFAULT_CONFIG)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_default_config_loads() {
        let config = Config::parse(DEFAULT_CONFIG).unwrap();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(config.request_timeout(), std::time::Duration::from_secs(30));
        assert!(config.upload.gateway_url.is_none());
        assert!(!config.client_config().uploads_enabled());
    }

    #[test]
    fn test_upload_section_is_optional() {
        let config = Config::parse(
            r#"
            [server]
            host = "127.0.0.1"
            port = 8080

            [llm]
            api_endpoint = "http://localhost:11434/v1"
            model = "llama3"
            temperature = 0.2
            max_tokens = 512
            request_timeout_secs = 10
            "#,
        )
        .unwrap();
        assert_eq!(config.server.static_dir, "dist");
        assert!(config.llm.api_key.is_empty());
        assert!(config.upload.gateway_url.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let mut config = Config::parse(DEFAULT_CONFIG).unwrap();
        let env: HashMap<&str, &str> = HashMap::from([
            ("OPENAI_API_KEY", "sk-test"),
            ("UPLOAD_API_URL", "https://gw.example.com/presign"),
            ("LLM_MODEL", ""),
        ]);

        config.apply_env_overrides(|key| env.get(key).map(|v| v.to_string()));

        assert_eq!(config.llm.api_key, "sk-test");
        assert_eq!(config.llm.model, "gpt-4o");
        assert_eq!(
            config.client_config().upload_gateway_url.as_deref(),
            Some("https://gw.example.com/presign")
        );
    }

    #[test]
    fn test_blank_gateway_in_file_disables_uploads() {
        let mut config = Config::parse(&DEFAULT_CONFIG.replace(
            "[upload]",
            "[upload]\ngateway_url = \"  \"",
        ))
        .unwrap();
        config.apply_env_overrides(|_| None);
        assert!(config.upload.gateway_url.is_none());
    }
}
