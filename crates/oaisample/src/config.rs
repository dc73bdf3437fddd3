use std::io::ErrorKind;
use std::path::Path;
use std::time::Duration;

use oaisample_client::ClientConfig;
use serde::Deserialize;
use thiserror::Error;
use tokio::fs;

// ============================================================================
// Config (root)
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub image: ImageConfig,
    #[serde(default)]
    pub audio: AudioConfig,
    #[serde(default)]
    pub moderation: ModerationConfig,
}

impl Config {
    pub async fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = match fs::read_to_string(path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
            Err(e) => return Err(ConfigError::Io(e)),
        };
        let config: Self = serde_saphyr::from_str(&contents)?;
        config.api.validate()?;
        Ok(config)
    }

    /// Read the API secret from the environment variable named by `api.api_key_env`.
    pub fn api_key(&self) -> Result<String, ConfigError> {
        let var = &self.api.api_key_env;
        match std::env::var(var) {
            Ok(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(ConfigError::MissingApiKey(var.clone())),
        }
    }

    /// Build client settings, acquiring the secret at the point of use.
    pub fn client_config(&self) -> Result<ClientConfig, ConfigError> {
        Ok(ClientConfig {
            base_url: self.api.base_url.clone(),
            api_key: self.api_key()?,
            organization: self.api.organization.clone(),
            request_timeout: Duration::from_secs(self.api.request_timeout_seconds),
        })
    }
}

// ============================================================================
// ApiConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Name of the environment variable that holds the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default = "default_request_timeout")]
    pub request_timeout_seconds: u64,
}

impl ApiConfig {
    fn validate(&self) -> Result<(), ConfigError> {
        url::Url::parse(&self.base_url)
            .map(|_| ())
            .map_err(|e| ConfigError::InvalidBaseUrl {
                url: self.base_url.clone(),
                source: e,
            })
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            organization: None,
            request_timeout_seconds: default_request_timeout(),
        }
    }
}

fn default_base_url() -> String {
    ClientConfig::DEFAULT_BASE_URL.to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_request_timeout() -> u64 {
    120
}

// ============================================================================
// ChatConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_chat_model")]
    pub model: String,
    /// Upper bound on generated tokens per reply.
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_candidates")]
    pub candidates: u32,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            model: default_chat_model(),
            max_tokens: default_max_tokens(),
            candidates: default_candidates(),
        }
    }
}

fn default_chat_model() -> String {
    "gpt-3.5-turbo".to_string()
}

fn default_max_tokens() -> u32 {
    30
}

fn default_candidates() -> u32 {
    1
}

// ============================================================================
// ImageConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ImageConfig {
    #[serde(default = "default_image_size")]
    pub size: String,
    /// `url` or `b64_json`.
    #[serde(default = "default_image_response_format")]
    pub response_format: String,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            size: default_image_size(),
            response_format: default_image_response_format(),
        }
    }
}

fn default_image_size() -> String {
    "256x256".to_string()
}

fn default_image_response_format() -> String {
    "url".to_string()
}

// ============================================================================
// AudioConfig
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct AudioConfig {
    #[serde(default = "default_audio_model")]
    pub model: String,
    #[serde(default = "default_audio_language")]
    pub language: Option<String>,
    #[serde(default = "default_audio_response_format")]
    pub response_format: String,
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self {
            model: default_audio_model(),
            language: default_audio_language(),
            response_format: default_audio_response_format(),
        }
    }
}

fn default_audio_model() -> String {
    "whisper-1".to_string()
}

fn default_audio_language() -> Option<String> {
    Some("en".to_string())
}

fn default_audio_response_format() -> String {
    "verbose_json".to_string()
}

// ============================================================================
// ModerationConfig
// ============================================================================

#[derive(Debug, Default, Deserialize)]
pub struct ModerationConfig {
    /// Provider default when unset.
    #[serde(default)]
    pub model: Option<String>,
}

// ============================================================================
// ConfigError
// ============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config file: {0}")]
    Yaml(#[from] serde_saphyr::Error),

    #[error("invalid api base url {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    #[error("api key not found: set the {0} environment variable")]
    MissingApiKey(String),
}

// ============================================================================
// Tests
// ============================================================================
