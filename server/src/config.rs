use anyhow::{Context, Result};
use axum::http::HeaderValue;

pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub cors_allowed_origin: HeaderValue,
}

impl AppConfig {
    /// Reads the process environment; `.env` must already be loaded.
    pub fn load() -> Result<Self> {
        let origin = std::env::var("CORS_ALLOWED_ORIGIN")
            .ok()
            .map(|raw| raw.trim().to_string())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.into());
        Self::with_origin(&origin)
    }

    pub fn with_origin(origin: &str) -> Result<Self> {
        let cors_allowed_origin = origin
            .parse::<HeaderValue>()
            .with_context(|| format!("invalid CORS_ALLOWED_ORIGIN `{origin}`"))?;
        Ok(Self {
            cors_allowed_origin,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn origin_must_be_a_header_value() {
        assert!(AppConfig::with_origin("http://localhost:3000").is_ok());
        let err = AppConfig::with_origin("http://bad\norigin").unwrap_err();
        assert!(err.to_string().contains("CORS_ALLOWED_ORIGIN"));
    }
}
