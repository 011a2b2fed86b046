use std::str::FromStr;

#[derive(Debug, Clone)]
pub struct Settings {
    pub server: ServerSettings,
    pub model: ModelSettings,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone)]
pub struct ModelSettings {
    pub name: String,
    pub device: String,
    pub api_key: String,
    pub base_url: Option<String>,
    pub worker_slots: u32,
    pub queue_depth: u32,
}

impl Settings {
    /// Environment-first configuration with serviceable defaults; only the
    /// Whisper API key has no default.
    pub fn from_env() -> Self {
        Self {
            server: ServerSettings {
                host: env_or("SERVER_HOST", "0.0.0.0"),
                port: env_parse("SERVER_PORT", 3000),
            },
            model: ModelSettings {
                name: env_or("WHISPER_MODEL", "whisper-1"),
                device: env_or("WHISPER_DEVICE", "api"),
                api_key: env_or("OPENAI_API_KEY", ""),
                base_url: std::env::var("OPENAI_BASE_URL").ok(),
                worker_slots: env_parse("TRANSCRIPTION_WORKER_SLOTS", 2),
                queue_depth: env_parse("TRANSCRIPTION_QUEUE_DEPTH", 8),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => match raw.parse() {
            Ok(value) => value,
            Err(_) => {
                tracing::warn!(key, value = %raw, "Ignoring malformed environment value");
                default
            }
        },
        Err(_) => default,
    }
}
