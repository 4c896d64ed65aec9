use crate::error::{Error, Result};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    /// Optional; without it the weather lookup always reports no data
    pub weather_api_key: Option<String>,
}

/// Load configuration from `.env` and environment
pub fn load_config() -> Result<Config> {
    // Load `.env` file if present
    dotenv::dotenv().ok();
    config_from_lookup(|key| std::env::var(key).ok())
}

/// Build the configuration from any key lookup, blank values count as unset
fn config_from_lookup<F>(lookup: F) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let var = |key: &str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
    };

    let api_key = var("OPENAI_API_KEY").ok_or_else(|| {
        Error::MissingCredential(
            "OPENAI_API_KEY is not set. Add it to your environment or to a .env file.".to_string(),
        )
    })?;

    Ok(Config {
        api_key,
        base_url: var("OPENAI_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
        model: var("OPENAI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        weather_api_key: var("OPENWEATHER_API_KEY"),
    })
}
