/// Process-wide configuration
///
/// Read once from the environment (and a `.env` file during development) at
/// startup and treated as immutable for the process lifetime. The API key is
/// the only required value; everything else has a sensible default.

use std::env;

use thiserror::Error;

/// Default Gemini model used for headshot generation
const DEFAULT_IMAGE_MODEL: &str = "gemini-2.5-flash-image";

/// Default API endpoint prefix
const DEFAULT_API_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("GEMINI_API_KEY is not set. Export it or add it to a .env file.")]
    MissingApiKey,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_image_model: String,
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    pub log_level: String,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let gemini_api_key = env_string("GEMINI_API_KEY", "");
        if gemini_api_key.trim().is_empty() {
            return Err(ConfigError::MissingApiKey);
        }

        Ok(Config {
            gemini_api_key,
            gemini_image_model: env_string("GEMINI_IMAGE_MODEL", DEFAULT_IMAGE_MODEL),
            api_base_url: env_string("GEMINI_API_BASE_URL", DEFAULT_API_BASE_URL),
            request_timeout_secs: env_u64("REQUEST_TIMEOUT_SECS", 90),
            log_level: env_string("LOG_LEVEL", "info"),
        })
    }
}

fn env_string(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_u64(key: &str, default: u64) -> u64 {
    env::var(key)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_u64_rejects_garbage() {
        // Unset variables and unparsable values both fall back to the default
        assert_eq!(env_u64("HEADSHOT_STUDIO_TEST_UNSET", 90), 90);
        env::set_var("HEADSHOT_STUDIO_TEST_TIMEOUT", "not a number");
        assert_eq!(env_u64("HEADSHOT_STUDIO_TEST_TIMEOUT", 90), 90);
        env::set_var("HEADSHOT_STUDIO_TEST_TIMEOUT", " 30 ");
        assert_eq!(env_u64("HEADSHOT_STUDIO_TEST_TIMEOUT", 90), 30);
        env::remove_var("HEADSHOT_STUDIO_TEST_TIMEOUT");
    }
}
