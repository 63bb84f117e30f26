use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Directory generated audio files are written to and served from.
    pub static_dir: PathBuf,
    /// Prefix of the audio URLs handed back to clients, without trailing slash.
    pub public_base_url: String,
    pub search_base_url: String,
    pub translate_url: String,
    pub tts_url: String,
    pub audio_lang: String,
    /// Text Embeddings Inference server used for keyword ranking, if any.
    pub tei_url: Option<String>,
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
