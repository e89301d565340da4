use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub completion: CompletionSettings,
    pub backend: BackendSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    pub workers: Option<usize>,
}

/// Generative-text provider settings
#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    #[serde(default = "default_completion_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_completion_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Answer with the fallback set instead of an error when the provider fails
    #[serde(default = "default_true")]
    pub fallback_on_error: bool,
    #[serde(default)]
    pub generation: GenerationSettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct GenerationSettings {
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_top_k")]
    pub top_k: u32,
    #[serde(default = "default_top_p")]
    pub top_p: f32,
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
        }
    }
}

fn default_completion_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_completion_model() -> String { "gemini-1.5-flash".to_string() }
fn default_true() -> bool { true }
fn default_temperature() -> f32 { 0.7 }
fn default_top_k() -> u32 { 40 }
fn default_top_p() -> f32 { 0.95 }
fn default_max_output_tokens() -> u32 { 2048 }

/// Lume REST backend settings
#[derive(Debug, Clone, Deserialize)]
pub struct BackendSettings {
    pub base_url: String,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with COACH_)
    /// 5. `GEMINI_API_KEY` and `COACH_BACKEND__BASE_URL`
    pub fn load() -> Result<Self, ConfigError> {
        let mut settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., COACH_SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("COACH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings = substitute_env_vars(settings)?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("COACH")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

/// Apply the well-known environment variables on top of the layered config
fn substitute_env_vars(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GEMINI_API_KEY").ok().filter(|k| !k.trim().is_empty());
    let backend_url = env::var("COACH_BACKEND__BASE_URL")
        .or_else(|_| env::var("LUME_API_BASE_URL"))
        .ok();

    let mut builder = Config::builder()
        .add_source(settings)
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8081)?
        .set_default("completion.endpoint", default_completion_endpoint())?
        .set_default("backend.base_url", "http://localhost:3000")?;

    if let Some(api_key) = api_key {
        builder = builder.set_override("completion.api_key", api_key)?;
    }
    if let Some(url) = backend_url {
        builder = builder.set_override("backend.base_url", url)?;
    }

    builder.build()
}
