use std::env;
use std::fmt;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::format;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt as fmt_layer, registry, EnvFilter};

const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
const DEFAULT_PORT: u16 = 5000;

/// Process-wide configuration, read once at startup and immutable after.
/// Per-request bearer credentials never live here; only the relay's own
/// model API key does.
#[derive(Debug, Clone)]
pub struct Config {
    pub model_api_key: ApiKey,
    pub model_api_base: Option<String>,
    pub model: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();

        let model_api_key =
            ApiKey::new(env::var("OPENAI_API_KEY").context("OPENAI_API_KEY is not set")?);
        let model_api_base = env::var("OPENAI_API_BASE").ok();
        let model = env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_owned());
        let port = match env::var("PORT") {
            Ok(port) => port.parse().context("PORT is not a valid port number")?,
            Err(_) => DEFAULT_PORT,
        };

        Ok(Self {
            model_api_key,
            model_api_base,
            model,
            port,
        })
    }
}

/// Model API key newtype so accidental `Debug` output stays redacted.
#[derive(Clone)]
pub struct ApiKey {
    key: String,
}

impl ApiKey {
    pub fn new(key: String) -> Self {
        Self { key }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKey").field("key", &"<hidden>").finish()
    }
}

pub fn init_tracing() {
    registry()
        .with(fmt_layer::layer().event_format(format().pretty()))
        .with(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env()
                .unwrap(),
        )
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_key_debug_is_redacted() {
        let key = ApiKey::new("sk-secret".to_owned());
        let debugged = format!("{key:?}");
        assert!(!debugged.contains("sk-secret"));
        assert!(debugged.contains("<hidden>"));
    }
}
