//! services/api/src/bin/api.rs

use api_lib::{
    adapters::{
        self,
        tts::parse_voice, DbAdapter, ElevenLabsTtsAdapter, GeminiStoryAdapter, GoogleOAuthAdapter,
        MemoryDb, OpenAiModerationAdapter, OpenAiStoryAdapter, OpenAiTtsAdapter,
        UnconfiguredProvider,
    },
    config::{Config, SpeechProvider, StoryProvider},
    error::ApiError,
    session::SessionManager,
    web::{build_router, state::AppState},
};
use async_openai::{config::OpenAIConfig, types::SpeechModel, Client};
use masal_core::ports::{
    DatabaseService, ModerationService, OAuthService, StoryTextService, TextToSpeechService,
};
use masal_core::generation::StoryGenerator;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Speech, moderation and OAuth calls that take longer than this are treated as failed.
/// Story text generation uses `Config::story_timeout`.
const PROVIDER_TIMEOUT: Duration = Duration::from_secs(10);

fn http_client(timeout: Option<Duration>) -> Result<reqwest::Client, ApiError> {
    adapters::http_client(timeout).map_err(client_error)
}

fn openai_client(api_key: &str, timeout: Duration) -> Result<Client<OpenAIConfig>, ApiError> {
    adapters::openai_client(api_key, timeout).map_err(client_error)
}

fn client_error(e: reqwest::Error) -> ApiError {
    ApiError::Internal(format!("Failed to build HTTP client: {e}"))
}

#[tokio::main]
async fn main() -> Result<(), ApiError> {
    // --- 1. Load Configuration & Set Up Logging ---
    let config = Arc::new(Config::from_env()?);
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(config.log_level.to_string()))
        .with(tracing_subscriber::fmt::layer())
        .init();
    info!("Configuration loaded. Starting server...");

    // --- 2. Connect to Database & Run Migrations ---
    let db: Arc<dyn DatabaseService> = match &config.database_url {
        Some(url) => {
            info!("Connecting to database...");
            let db_pool = PgPoolOptions::new().max_connections(5).connect(url).await?;
            let db_adapter = DbAdapter::new(db_pool);
            info!("Running database migrations...");
            db_adapter.run_migrations().await?;
            info!("Database migrations complete.");
            Arc::new(db_adapter)
        }
        None => {
            warn!("DATABASE_URL is not set; using the in-memory store. Data is lost on restart.");
            Arc::new(MemoryDb::new())
        }
    };

    // --- 3. Initialize Service Adapters ---
    let story_text: Arc<dyn StoryTextService> = match config.story_provider {
        StoryProvider::OpenAi => match &config.openai_api_key {
            Some(key) => Arc::new(OpenAiStoryAdapter::new(
                openai_client(key, config.story_timeout)?,
                config.story_model.clone(),
            )),
            None => Arc::new(UnconfiguredProvider::new("OPENAI_API_KEY")),
        },
        StoryProvider::Gemini => match &config.gemini_api_key {
            Some(key) => Arc::new(GeminiStoryAdapter::new(
                http_client(Some(config.story_timeout))?,
                key.clone(),
                config.story_model.clone(),
            )),
            None => Arc::new(UnconfiguredProvider::new("GEMINI_API_KEY")),
        },
    };

    let speech: Arc<dyn TextToSpeechService> = match config.tts_provider {
        SpeechProvider::OpenAi => match &config.openai_api_key {
            Some(key) => Arc::new(OpenAiTtsAdapter::new(
                openai_client(key, PROVIDER_TIMEOUT)?,
                SpeechModel::Tts1,
                parse_voice(&config.tts_voice),
                config.tts_speed,
            )),
            None => Arc::new(UnconfiguredProvider::new("OPENAI_API_KEY")),
        },
        SpeechProvider::ElevenLabs => match &config.elevenlabs_api_key {
            Some(key) => Arc::new(ElevenLabsTtsAdapter::new(
                http_client(Some(PROVIDER_TIMEOUT))?,
                key.clone(),
                config.elevenlabs_voice_id.clone(),
                config.tts_speed,
            )),
            None => Arc::new(UnconfiguredProvider::new("ELEVENLABS_API_KEY")),
        },
    };

    let moderation: Option<Arc<dyn ModerationService>> =
        match (config.moderation_enabled, &config.openai_api_key) {
            (true, Some(key)) => Some(Arc::new(OpenAiModerationAdapter::new(openai_client(
                key,
                PROVIDER_TIMEOUT,
            )?))),
            (true, None) => {
                warn!("OPENAI_API_KEY is not set; only the local word filter will moderate input.");
                None
            }
            (false, _) => None,
        };

    let oauth: Arc<dyn OAuthService> = match (
        &config.google_client_id,
        &config.google_client_secret,
        &config.google_redirect_uri,
    ) {
        (Some(id), Some(secret), Some(redirect)) => Arc::new(GoogleOAuthAdapter::new(
            http_client(Some(PROVIDER_TIMEOUT))?,
            id.clone(),
            secret.clone(),
            redirect.clone(),
        )),
        _ => Arc::new(UnconfiguredProvider::new("GOOGLE_CLIENT_ID")),
    };

    // --- 4. Build the Shared AppState ---
    let generator = StoryGenerator::new(db.clone(), story_text, speech, moderation)
        .with_speaking_rate(config.tts_speed);
    let sessions = SessionManager::new(db.clone(), oauth, &config);
    let app_state = Arc::new(AppState {
        db,
        config: config.clone(),
        sessions,
        generator,
    });

    // --- 5. Create the Web Router ---
    let app = build_router(app_state);

    // --- 6. Start the Server ---
    info!("Starting server on {}", config.bind_address);
    info!(
        "Swagger UI available at http://{}/swagger-ui",
        config.bind_address
    );
    let listener = tokio::net::TcpListener::bind(&config.bind_address).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
