mod common;

use api_lib::web::middleware::{CurrentUser, MaybeUser};
use api_lib::web::stories::{
    delete_story_handler, generate_story_handler, get_story_handler, list_stories_handler,
    play_story_handler, GenerateStoryRequest, ListStoriesQuery,
};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use common::{FlagEverything, SpeechMode, TestApp};
use masal_core::domain::AdminUserUpdate;
use masal_core::ports::DatabaseService;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn request(theme: &str) -> GenerateStoryRequest {
    GenerateStoryRequest {
        topic_id: "vucudumuz".to_string(),
        subtopic_id: Some("kalp".to_string()),
        theme: theme.to_string(),
        age_group: "4-6".to_string(),
        character: Some("Pamuk".to_string()),
        kazanim_based: true,
    }
}

#[tokio::test]
async fn signed_in_generation_spends_one_credit() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;

    let Json(story) = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(user.clone())),
        Json(request("paylaşmak")),
    )
    .await
    .expect("story is generated");

    assert_eq!(story.title, "Cesur Tavşan");
    assert_eq!(story.slug.as_deref(), Some("4-6-yas-cesur-tavsan"));
    assert_eq!(story.user_id, Some(user.user_id));
    assert_eq!(story.creator_name.as_deref(), Some("Deniz Kara"));
    assert!(story.audio_base64.is_some());
    assert!(story.duration.unwrap_or(0) > 0);
    assert!(story.kazanim.is_some());
    assert!(story.audio_warning.is_none());
    assert_eq!(app.user(&user).await.credits, user.credits - 1);
}

#[tokio::test]
async fn anonymous_generation_is_allowed() {
    let app = TestApp::new();

    let Json(story) = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(None),
        Json(request("dostluk")),
    )
    .await
    .expect("story is generated");

    assert_eq!(story.user_id, None);
    assert_eq!(story.creator_name, None);
    assert_eq!(app.text.calls(), 1);
}

#[tokio::test]
async fn no_credits_means_402_before_any_provider_call() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    let broke = app
        .db
        .admin_update_user(
            user.user_id,
            AdminUserUpdate {
                credits: Some(0),
                ..Default::default()
            },
        )
        .await
        .expect("update succeeds");

    let err = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(broke)),
        Json(request("paylaşmak")),
    )
    .await
    .expect_err("generation must be refused");

    assert_eq!(err.status_and_detail().0, StatusCode::PAYMENT_REQUIRED);
    assert_eq!(app.text.calls(), 0);
    assert_eq!(app.speech.calls(), 0);
}

#[tokio::test]
async fn bad_word_in_theme_is_rejected_before_generation() {
    let app = TestApp::new();

    let err = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(None),
        Json(request("kumar oynayan tavşan")),
    )
    .await
    .expect_err("theme must be rejected");

    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
    assert_eq!(app.text.calls(), 0);
}

#[tokio::test]
async fn remote_moderation_flag_stops_the_request() {
    let moderation = Arc::new(FlagEverything {
        calls: AtomicUsize::new(0),
    });
    let app = TestApp::with_remote_moderation(moderation.clone());

    let err = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(None),
        Json(request("dostluk")),
    )
    .await
    .expect_err("flagged input must be rejected");

    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
    assert_eq!(moderation.calls.load(Ordering::SeqCst), 1);
    assert_eq!(app.text.calls(), 0);
}

#[tokio::test]
async fn generated_story_with_a_bad_word_is_discarded() {
    let app = TestApp::with_story_reply(
        "Başlık: Tilki ve Zar\n\nBir varmış, bir yokmuş. Tilki bütün gün kumar oynarmış.",
    );
    let (user, _) = app.sign_up("deniz@example.com").await;

    let err = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(user.clone())),
        Json(request("paylaşmak")),
    )
    .await
    .expect_err("generated text must be rejected");

    let (status, detail) = err.status_and_detail();
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(detail.contains("içerik denetiminden geçemedi"));
    assert_eq!(app.text.calls(), 1);
    assert_eq!(app.speech.calls(), 0);
    assert_eq!(app.user(&user).await.credits, user.credits);
    let stories = list_stories_handler(State(app.state.clone()), Query(ListStoriesQuery::default()))
        .await
        .unwrap();
    assert!(stories.0.is_empty());
}

#[tokio::test]
async fn unknown_topic_is_a_bad_request() {
    let app = TestApp::new();
    let mut req = request("dostluk");
    req.topic_id = "uzay-korsanlari".to_string();

    let err = generate_story_handler(State(app.state.clone()), MaybeUser(None), Json(req))
        .await
        .expect_err("unknown topic");

    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exhausted_speech_quota_saves_story_without_audio() {
    let app = TestApp::with_speech(SpeechMode::QuotaExceeded);
    let (user, _) = app.sign_up("deniz@example.com").await;

    let Json(story) = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(user.clone())),
        Json(request("paylaşmak")),
    )
    .await
    .expect("story is saved anyway");

    assert!(story.audio_base64.is_none());
    assert!(story.duration.is_none());
    assert!(story.audio_warning.is_some());
    assert!(app.db.get_story(story.id).await.unwrap().is_some());
    assert_eq!(app.user(&user).await.credits, user.credits - 1);
}

#[tokio::test]
async fn other_speech_failures_abort_without_saving() {
    let app = TestApp::with_speech(SpeechMode::Broken);
    let (user, _) = app.sign_up("deniz@example.com").await;

    let err = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(user.clone())),
        Json(request("paylaşmak")),
    )
    .await
    .expect_err("speech failure is fatal");

    assert_eq!(err.status_and_detail().0, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(app.user(&user).await.credits, user.credits);
    let stories = list_stories_handler(State(app.state.clone()), Query(ListStoriesQuery::default()))
        .await
        .unwrap();
    assert!(stories.0.is_empty());
}

#[tokio::test]
async fn same_title_gets_a_numbered_slug() {
    let app = TestApp::new();
    let mut slugs = Vec::new();
    for _ in 0..2 {
        let Json(story) = generate_story_handler(
            State(app.state.clone()),
            MaybeUser(None),
            Json(request("dostluk")),
        )
        .await
        .unwrap();
        slugs.push(story.slug.unwrap_or_default());
    }
    assert_eq!(slugs, ["4-6-yas-cesur-tavsan", "4-6-yas-cesur-tavsan-1"]);
}

#[tokio::test]
async fn plays_are_counted_and_slug_lookup_falls_back() {
    let app = TestApp::new();
    let Json(story) = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(None),
        Json(request("dostluk")),
    )
    .await
    .unwrap();

    for _ in 0..2 {
        play_story_handler(State(app.state.clone()), Path(story.id.to_string()))
            .await
            .unwrap();
    }
    let slug = story.slug.clone().unwrap_or_default();
    let Json(fetched) = get_story_handler(State(app.state.clone()), Path(slug))
        .await
        .expect("slug resolves through the id route");
    assert_eq!(fetched.id, story.id);
    assert_eq!(fetched.play_count, 2);

    let err = play_story_handler(State(app.state.clone()), Path("not-a-uuid".to_string()))
        .await
        .expect_err("bad id");
    assert_eq!(err.status_and_detail().0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn only_owner_or_admin_may_delete() {
    let app = TestApp::new();
    let (owner, _) = app.sign_up("owner@example.com").await;
    let (stranger, _) = app.sign_up("stranger@example.com").await;
    let (admin, _) = app.admin().await;

    let Json(story) = generate_story_handler(
        State(app.state.clone()),
        MaybeUser(Some(owner)),
        Json(request("dostluk")),
    )
    .await
    .unwrap();

    let err = delete_story_handler(
        State(app.state.clone()),
        CurrentUser(stranger),
        Path(story.id.to_string()),
    )
    .await
    .expect_err("strangers cannot delete");
    assert_eq!(err.status_and_detail().0, StatusCode::FORBIDDEN);

    delete_story_handler(
        State(app.state.clone()),
        CurrentUser(admin),
        Path(story.id.to_string()),
    )
    .await
    .expect("admins can delete");
    assert!(app.db.get_story(story.id).await.unwrap().is_none());
}

#[tokio::test]
async fn unknown_sort_is_rejected() {
    let app = TestApp::new();
    let query = ListStoriesQuery {
        sort: Some("random".to_string()),
        ..Default::default()
    };
    let err = list_stories_handler(State(app.state.clone()), Query(query))
        .await
        .expect_err("invalid sort");
    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
}
