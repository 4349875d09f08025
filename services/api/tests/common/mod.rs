//! Shared fixtures for the API integration tests: an in-memory store and
//! fake providers that count how often they were called.

#![allow(dead_code)]

use api_lib::adapters::MemoryDb;
use api_lib::config::Config;
use api_lib::session::{Registration, SessionManager};
use api_lib::web::state::AppState;
use async_trait::async_trait;
use masal_core::domain::{ModerationVerdict, OAuthProfile, User};
use masal_core::generation::StoryGenerator;
use masal_core::ports::{
    DatabaseService, ModerationService, OAuthService, PortError, PortResult, StoryTextService,
    TextToSpeechService,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const STORY_REPLY: &str = "Başlık: Cesur Tavşan\n\nBir varmış, bir yokmuş. Küçük bir tavşan ormanda yeni arkadaşlar edinmiş ve herkesle paylaşmayı öğrenmiş.";

pub struct FakeText {
    pub calls: AtomicUsize,
    reply: String,
}

impl FakeText {
    pub fn new(reply: &str) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            reply: reply.to_string(),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StoryTextService for FakeText {
    async fn complete(&self, _system: &str, _prompt: &str) -> PortResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.reply.clone())
    }
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum SpeechMode {
    Audio,
    QuotaExceeded,
    Broken,
}

pub struct FakeSpeech {
    pub calls: AtomicUsize,
    mode: SpeechMode,
}

impl FakeSpeech {
    pub fn new(mode: SpeechMode) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            mode,
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextToSpeechService for FakeSpeech {
    async fn synthesize(&self, _text: &str) -> PortResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.mode {
            SpeechMode::Audio => Ok(b"ID3fake-mp3".to_vec()),
            SpeechMode::QuotaExceeded => Err(PortError::QuotaExceeded(
                "You exceeded your current quota".to_string(),
            )),
            SpeechMode::Broken => Err(PortError::Unexpected("connection reset".to_string())),
        }
    }
}

/// Flags every input, so a request only gets through if the remote check is skipped.
pub struct FlagEverything {
    pub calls: AtomicUsize,
}

#[async_trait]
impl ModerationService for FlagEverything {
    async fn moderate(&self, _text: &str) -> PortResult<ModerationVerdict> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(ModerationVerdict {
            flagged: true,
            categories: vec!["violence".to_string()],
        })
    }
}

/// Returns whatever profile the test last configured.
pub struct FakeOAuth {
    profile: Mutex<OAuthProfile>,
}

impl FakeOAuth {
    pub fn new(email: &str, name: &str) -> Self {
        Self {
            profile: Mutex::new(OAuthProfile {
                email: email.to_string(),
                name: name.to_string(),
                picture: Some("https://example.com/p.png".to_string()),
            }),
        }
    }

    pub fn set_name(&self, name: &str) {
        if let Ok(mut profile) = self.profile.lock() {
            profile.name = name.to_string();
        }
    }
}

#[async_trait]
impl OAuthService for FakeOAuth {
    async fn exchange_code(&self, code: &str) -> PortResult<OAuthProfile> {
        if code == "bad-code" {
            return Err(PortError::Unauthorized);
        }
        self.profile
            .lock()
            .map(|p| p.clone())
            .map_err(|_| PortError::Unexpected("poisoned".to_string()))
    }
}

pub struct TestApp {
    pub state: Arc<AppState>,
    pub db: Arc<MemoryDb>,
    pub text: Arc<FakeText>,
    pub speech: Arc<FakeSpeech>,
    pub oauth: Arc<FakeOAuth>,
}

impl TestApp {
    pub fn new() -> Self {
        Self::build(STORY_REPLY, SpeechMode::Audio, None)
    }

    pub fn with_speech(mode: SpeechMode) -> Self {
        Self::build(STORY_REPLY, mode, None)
    }

    pub fn with_remote_moderation(moderation: Arc<dyn ModerationService>) -> Self {
        Self::build(STORY_REPLY, SpeechMode::Audio, Some(moderation))
    }

    /// The fake model answers every prompt with `reply`.
    pub fn with_story_reply(reply: &str) -> Self {
        Self::build(reply, SpeechMode::Audio, None)
    }

    fn build(
        reply: &str,
        mode: SpeechMode,
        moderation: Option<Arc<dyn ModerationService>>,
    ) -> Self {
        let config = Arc::new(Config::default());
        let db = Arc::new(MemoryDb::new());
        let text = Arc::new(FakeText::new(reply));
        let speech = Arc::new(FakeSpeech::new(mode));
        let oauth = Arc::new(FakeOAuth::new("ayse@example.com", "Ayşe Yılmaz"));

        let dyn_db: Arc<dyn DatabaseService> = db.clone();
        let generator = StoryGenerator::new(dyn_db.clone(), text.clone(), speech.clone(), moderation);
        let sessions = SessionManager::new(dyn_db.clone(), oauth.clone(), &config);
        let state = Arc::new(AppState {
            db: dyn_db,
            config,
            sessions,
            generator,
        });
        Self {
            state,
            db,
            text,
            speech,
            oauth,
        }
    }

    /// Registers a local account and signs it in, returning the user and token.
    pub async fn sign_up(&self, email: &str) -> (User, String) {
        self.state
            .sessions
            .register(Registration {
                name: "Deniz".to_string(),
                surname: "Kara".to_string(),
                email: email.to_string(),
                phone: Some("05550000000".to_string()),
                password: "gizli123".to_string(),
            })
            .await
            .expect("registration succeeds");
        let issued = self
            .state
            .sessions
            .login(email, "gizli123")
            .await
            .expect("login succeeds");
        (issued.user, issued.token)
    }

    pub async fn admin(&self) -> (User, String) {
        let issued = self
            .state
            .sessions
            .admin_login("admin@masalsepeti.com", "admin123")
            .await
            .expect("admin login succeeds");
        (issued.user, issued.token)
    }

    pub async fn user(&self, user: &User) -> User {
        self.db.get_user(user.user_id).await.expect("user exists")
    }
}
