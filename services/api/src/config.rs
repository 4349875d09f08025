//! services/api/src/config.rs
//!
//! Defines the application's configuration structure and loading logic.
//!
//! All configuration is loaded from environment variables at startup. The `.env`
//! file is used for local development.

use std::net::SocketAddr;
use std::str::FromStr;
use std::time::Duration;
use tracing::Level;

/// A custom error type for configuration loading failures.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for the environment variable {0}: {1}")]
    InvalidValue(String, String),
}

/// Origins always allowed by CORS, in addition to `CORS_ORIGINS`.
pub const DEFAULT_CORS_ORIGINS: &[&str] = &[
    "http://localhost:3000",
    "https://masalsepeti.com",
    "https://www.masalsepeti.com",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoryProvider {
    OpenAi,
    Gemini,
}

impl FromStr for StoryProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(StoryProvider::OpenAi),
            "gemini" => Ok(StoryProvider::Gemini),
            other => Err(format!("'{other}' is not a story provider (openai, gemini)")),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpeechProvider {
    OpenAi,
    ElevenLabs,
}

impl FromStr for SpeechProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "openai" => Ok(SpeechProvider::OpenAi),
            "elevenlabs" => Ok(SpeechProvider::ElevenLabs),
            other => Err(format!("'{other}' is not a TTS provider (openai, elevenlabs)")),
        }
    }
}

/// Holds all configuration loaded from the environment at startup.
#[derive(Clone, Debug)]
pub struct Config {
    pub bind_address: SocketAddr,
    /// `None` runs on the in-memory store.
    pub database_url: Option<String>,
    pub log_level: Level,
    pub cors_origins: Vec<String>,
    pub story_provider: StoryProvider,
    pub tts_provider: SpeechProvider,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub elevenlabs_api_key: Option<String>,
    pub story_model: String,
    /// Upper bound on one story text call. Speech, moderation and OAuth use a
    /// fixed shorter timeout.
    pub story_timeout: Duration,
    pub tts_voice: String,
    pub elevenlabs_voice_id: String,
    pub tts_speed: f32,
    pub moderation_enabled: bool,
    pub google_client_id: Option<String>,
    pub google_client_secret: Option<String>,
    pub google_redirect_uri: Option<String>,
    pub admin_email: String,
    pub admin_password: String,
    pub cookie_secure: bool,
}

impl Config {
    /// Loads configuration from environment variables.
    ///
    /// It will look for a `.env` file in the current directory for development,
    /// but this is skipped in test environments to ensure tests are hermetic.
    pub fn from_env() -> Result<Self, ConfigError> {
        if !cfg!(test) {
            dotenvy::dotenv().ok();
        }

        // --- Server and Database Settings ---
        let bind_address = parse_var::<SocketAddr>("BIND_ADDRESS", "0.0.0.0:8001")?;
        let database_url = optional_var("DATABASE_URL");

        let log_level_str = std::env::var("RUST_LOG").unwrap_or_else(|_| "INFO".to_string());
        let log_level = log_level_str.parse::<Level>().map_err(|_| {
            ConfigError::InvalidValue(
                "RUST_LOG".to_string(),
                format!("'{}' is not a valid log level", log_level_str),
            )
        })?;

        let mut cors_origins: Vec<String> =
            DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect();
        if let Some(extra) = optional_var("CORS_ORIGINS") {
            for origin in extra.split(',').map(str::trim).filter(|o| !o.is_empty()) {
                if !cors_origins.iter().any(|o| o == origin) {
                    cors_origins.push(origin.to_string());
                }
            }
        }

        // --- Providers ---
        let story_provider = parse_var::<StoryProvider>("STORY_PROVIDER", "openai")?;
        let tts_provider = parse_var::<SpeechProvider>("TTS_PROVIDER", "openai")?;

        // API keys are optional: a missing key surfaces when the provider is called.
        let openai_api_key = optional_var("OPENAI_API_KEY");
        let gemini_api_key = optional_var("GEMINI_API_KEY");
        let elevenlabs_api_key = optional_var("ELEVENLABS_API_KEY");

        let default_model = match story_provider {
            StoryProvider::OpenAi => "gpt-4o",
            StoryProvider::Gemini => "gemini-2.0-flash",
        };
        let story_model = optional_var("STORY_MODEL").unwrap_or_else(|| default_model.to_string());
        let story_timeout_secs = parse_var::<u64>("STORY_TIMEOUT_SECS", "120")?;
        if story_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue(
                "STORY_TIMEOUT_SECS".to_string(),
                "must be at least 1 second".to_string(),
            ));
        }
        let story_timeout = Duration::from_secs(story_timeout_secs);
        let tts_voice = optional_var("TTS_VOICE").unwrap_or_else(|| "shimmer".to_string());
        let elevenlabs_voice_id = optional_var("ELEVENLABS_VOICE_ID")
            .unwrap_or_else(|| "21m00Tcm4TlvDq8ikWAM".to_string());
        let tts_speed = parse_var::<f32>("TTS_SPEED", "0.9")?;
        if !(0.25..=4.0).contains(&tts_speed) {
            return Err(ConfigError::InvalidValue(
                "TTS_SPEED".to_string(),
                "must be between 0.25 and 4.0".to_string(),
            ));
        }
        let moderation_enabled = parse_bool("MODERATION_ENABLED", true)?;

        // --- OAuth ---
        let google_client_id = optional_var("GOOGLE_CLIENT_ID");
        let google_client_secret = optional_var("GOOGLE_CLIENT_SECRET");
        let google_redirect_uri = optional_var("GOOGLE_REDIRECT_URI");

        // --- Admin and cookies ---
        let admin_email =
            optional_var("ADMIN_EMAIL").unwrap_or_else(|| "admin@masalsepeti.com".to_string());
        let admin_password = optional_var("ADMIN_PASSWORD").unwrap_or_else(|| "admin123".to_string());
        let cookie_secure = parse_bool("COOKIE_SECURE", true)?;

        Ok(Self {
            bind_address,
            database_url,
            log_level,
            cors_origins,
            story_provider,
            tts_provider,
            openai_api_key,
            gemini_api_key,
            elevenlabs_api_key,
            story_model,
            story_timeout,
            tts_voice,
            elevenlabs_voice_id,
            tts_speed,
            moderation_enabled,
            google_client_id,
            google_client_secret,
            google_redirect_uri,
            admin_email,
            admin_password,
            cookie_secure,
        })
    }
}

impl Default for Config {
    /// Settings for local runs and tests: in-memory store, no provider keys.
    fn default() -> Self {
        Self {
            bind_address: SocketAddr::from(([127, 0, 0, 1], 8001)),
            database_url: None,
            log_level: Level::INFO,
            cors_origins: DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect(),
            story_provider: StoryProvider::OpenAi,
            tts_provider: SpeechProvider::OpenAi,
            openai_api_key: None,
            gemini_api_key: None,
            elevenlabs_api_key: None,
            story_model: "gpt-4o".to_string(),
            story_timeout: Duration::from_secs(120),
            tts_voice: "shimmer".to_string(),
            elevenlabs_voice_id: "21m00Tcm4TlvDq8ikWAM".to_string(),
            tts_speed: 0.9,
            moderation_enabled: false,
            google_client_id: None,
            google_client_secret: None,
            google_redirect_uri: None,
            admin_email: "admin@masalsepeti.com".to_string(),
            admin_password: "admin123".to_string(),
            cookie_secure: true,
        }
    }
}

fn optional_var(name: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_var<T>(name: &str, default: &str) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    let raw = optional_var(name).unwrap_or_else(|| default.to_string());
    raw.parse::<T>()
        .map_err(|e| ConfigError::InvalidValue(name.to_string(), e.to_string()))
}

fn parse_bool(name: &str, default: bool) -> Result<bool, ConfigError> {
    match optional_var(name).map(|v| v.to_lowercase()) {
        None => Ok(default),
        Some(v) if matches!(v.as_str(), "1" | "true" | "yes" | "on") => Ok(true),
        Some(v) if matches!(v.as_str(), "0" | "false" | "no" | "off") => Ok(false),
        Some(v) => Err(ConfigError::InvalidValue(
            name.to_string(),
            format!("'{v}' is not a boolean"),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: &[&str] = &[
        "BIND_ADDRESS",
        "DATABASE_URL",
        "RUST_LOG",
        "CORS_ORIGINS",
        "STORY_PROVIDER",
        "TTS_PROVIDER",
        "STORY_MODEL",
        "STORY_TIMEOUT_SECS",
        "TTS_SPEED",
        "MODERATION_ENABLED",
        "COOKIE_SECURE",
        "ADMIN_EMAIL",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn defaults_apply_without_environment() {
        clear_env();
        let config = Config::from_env().unwrap();
        assert_eq!(config.bind_address.port(), 8001);
        assert!(config.database_url.is_none());
        assert_eq!(config.story_provider, StoryProvider::OpenAi);
        assert_eq!(config.story_model, "gpt-4o");
        assert_eq!(config.tts_speed, 0.9);
        assert_eq!(config.story_timeout, Duration::from_secs(120));
        assert!(config.moderation_enabled);
        assert!(config.cookie_secure);
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len());
    }

    #[test]
    #[serial]
    fn gemini_switches_the_default_model_and_extra_origins_are_merged() {
        clear_env();
        std::env::set_var("STORY_PROVIDER", "Gemini");
        std::env::set_var(
            "CORS_ORIGINS",
            format!("https://masal.example, {}", DEFAULT_CORS_ORIGINS[0]),
        );
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.story_provider, StoryProvider::Gemini);
        assert_eq!(config.story_model, "gemini-2.0-flash");
        assert_eq!(config.cors_origins.len(), DEFAULT_CORS_ORIGINS.len() + 1);
        assert!(config.cors_origins.iter().any(|o| o == "https://masal.example"));
    }

    #[test]
    #[serial]
    fn invalid_values_are_reported_by_name() {
        clear_env();
        std::env::set_var("TTS_SPEED", "9");
        let err = Config::from_env().unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "TTS_SPEED"));

        clear_env();
        std::env::set_var("STORY_TIMEOUT_SECS", "0");
        let err = Config::from_env().unwrap_err();
        assert!(
            matches!(err, ConfigError::InvalidValue(ref name, _) if name == "STORY_TIMEOUT_SECS")
        );

        clear_env();
        std::env::set_var("COOKIE_SECURE", "maybe");
        let err = Config::from_env().unwrap_err();
        clear_env();
        assert!(matches!(err, ConfigError::InvalidValue(ref name, _) if name == "COOKIE_SECURE"));
    }
}
