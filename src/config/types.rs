// Configuration type definitions

use serde::Deserialize;

use crate::session::SuggestionMode;

/// Default chat-completions endpoint (OpenAI-compatible)
pub const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
pub const DEFAULT_MODEL: &str = "llama-3.1-8b-instant";
pub const DEFAULT_TEMPERATURE: f32 = 0.1;
pub const DEFAULT_MAX_TOKENS: u32 = 1000;
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_RELAY_BIND: &str = "127.0.0.1:8787";

/// Schema used when none is configured
pub const DEFAULT_SCHEMA: &str = "Table: events
Description: User-generated analytics events such as page views, clicks, and custom actions.

Columns:
- id (bigint, primary key)
- user_id (bigint, foreign key to users.id) - the user who triggered the event
- name (text) - name of the event, e.g. \"page_view\", \"signup\", \"purchase\"
- properties (jsonb) - miscellaneous attributes describing the event
- occurred_at (timestamp) - timestamp when the event occurred";

/// Where suggestions come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AiProviderType {
    /// Call the completion service directly
    #[default]
    Groq,
    /// Go through a relay that holds the credential
    Relay,
}

/// `[ai.groq]` section: direct completion-service settings
#[derive(Debug, Clone, Deserialize)]
pub struct GroqConfig {
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GroqConfig {
    fn default() -> Self {
        GroqConfig {
            api_key: None,
            model: default_model(),
            base_url: default_base_url(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[ai.relay]` section: client side of the relay
#[derive(Debug, Clone, Deserialize)]
pub struct RelayClientConfig {
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for RelayClientConfig {
    fn default() -> Self {
        RelayClientConfig {
            url: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// `[ai]` section
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub provider: AiProviderType,
    #[serde(default)]
    pub groq: GroqConfig,
    #[serde(default)]
    pub relay: RelayClientConfig,
}

impl Default for AiConfig {
    fn default() -> Self {
        AiConfig {
            enabled: true,
            provider: AiProviderType::Groq,
            groq: GroqConfig::default(),
            relay: RelayClientConfig::default(),
        }
    }
}

/// `[session]` section
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SessionConfig {
    #[serde(default)]
    pub mode: SuggestionMode,
}

/// `[schema]` section
///
/// `path` wins over `description` when both are set.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SchemaConfig {
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub path: Option<std::path::PathBuf>,
}

/// `[relay]` section: server side of the relay
#[derive(Debug, Clone, Deserialize)]
pub struct RelayServerConfig {
    #[serde(default = "default_relay_bind")]
    pub bind: String,
}

impl Default for RelayServerConfig {
    fn default() -> Self {
        RelayServerConfig {
            bind: default_relay_bind(),
        }
    }
}

/// Root configuration structure
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub ai: AiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub schema: SchemaConfig,
    #[serde(default)]
    pub relay: RelayServerConfig,
}

fn default_enabled() -> bool {
    true
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_temperature() -> f32 {
    DEFAULT_TEMPERATURE
}

fn default_max_tokens() -> u32 {
    DEFAULT_MAX_TOKENS
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_relay_bind() -> String {
    DEFAULT_RELAY_BIND.to_string()
}
