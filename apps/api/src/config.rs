use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

/// Application configuration loaded from environment variables.
/// Every variable has a default; only malformed values abort startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Holds `Historical_ticket_data.csv` and the `Conversation/` directory.
    pub data_dir: PathBuf,
    pub default_provider: String,
    pub ollama_url: String,
    pub ollama_model: String,
    pub gemini_api_key: Option<String>,
    pub gemini_model: String,
    pub gemini_api_url: String,
    pub llm_timeout: Duration,
}

/// Provider names the registry knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["ollama", "gemini"];

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        let default_provider = var("DEFAULT_PROVIDER", "ollama").to_lowercase();
        if !KNOWN_PROVIDERS.contains(&default_provider.as_str()) {
            bail!(
                "DEFAULT_PROVIDER must be one of {:?}, got '{default_provider}'",
                KNOWN_PROVIDERS
            );
        }

        let timeout_secs = var("LLM_TIMEOUT_SECS", "120")
            .parse::<u64>()
            .context("LLM_TIMEOUT_SECS must be a whole number of seconds")?;

        Ok(Config {
            port: var("PORT", "5000")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
            data_dir: PathBuf::from(var("DATA_DIR", "data")),
            default_provider,
            ollama_url: trim_base_url(var("OLLAMA_URL", "http://localhost:11434")),
            ollama_model: var("OLLAMA_MODEL", "llama3"),
            gemini_api_key: lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()),
            gemini_model: var("GEMINI_MODEL", "gemini-1.5-flash"),
            gemini_api_url: trim_base_url(var(
                "GEMINI_API_URL",
                "https://generativelanguage.googleapis.com",
            )),
            llm_timeout: Duration::from_secs(timeout_secs),
        })
    }
}

fn trim_base_url(url: String) -> String {
    url.trim_end_matches('/').to_string()
}
