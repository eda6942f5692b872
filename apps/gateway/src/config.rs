//! Gateway configuration.
//!
//! Loaded from a TOML file; secrets are named by environment variable so
//! they never live in the file itself.

use anyhow::{Context, Result};
use runtime::Business;
use serde::Deserialize;
use std::path::Path;

/// Top-level gateway configuration.
#[derive(Debug, Deserialize)]
pub struct GatewayConfig {
    /// Address to bind, e.g. "127.0.0.1:8089".
    #[serde(default = "default_bind")]
    pub bind: String,

    /// Business identity for prompts and the fallback reply.
    #[serde(default)]
    pub business: Business,

    /// Completion provider settings.
    pub model: ModelConfig,

    /// Contact-store settings.
    pub store: StoreConfig,

    /// Link-issuing endpoint settings.
    pub links: LinkConfig,
}

/// Completion provider settings.
#[derive(Debug, Deserialize)]
pub struct ModelConfig {
    /// Base URL of the OpenAI-compatible endpoint.
    #[serde(default = "default_model_url")]
    pub base_url: String,

    /// Environment variable holding the API key.
    #[serde(default = "default_model_key_env")]
    pub api_key_env: String,

    /// Model identifier.
    #[serde(default = "default_model")]
    pub model: String,
}

/// Contact-store settings.
#[derive(Debug, Deserialize)]
pub struct StoreConfig {
    /// Base URL of the store's REST endpoint.
    pub base_url: String,

    /// Environment variable holding the service key.
    #[serde(default = "default_store_key_env")]
    pub service_key_env: String,
}

/// Link-issuing endpoint settings.
#[derive(Debug, Deserialize)]
pub struct LinkConfig {
    /// Full URL of the link-generation endpoint.
    pub endpoint: String,
}

fn default_bind() -> String {
    "127.0.0.1:8089".into()
}

fn default_model_url() -> String {
    "https://api.openai.com/v1".into()
}

fn default_model_key_env() -> String {
    "OPENAI_API_KEY".into()
}

fn default_model() -> String {
    "gpt-4o-mini".into()
}

fn default_store_key_env() -> String {
    "STORE_SERVICE_KEY".into()
}

impl GatewayConfig {
    /// Load and parse the config file at `path`.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
    }

    /// Resolve a secret named by `env_var`.
    pub fn secret(env_var: &str) -> Result<String> {
        std::env::var(env_var).with_context(|| format!("environment variable {env_var} not set"))
    }
}
