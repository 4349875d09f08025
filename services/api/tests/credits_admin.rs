mod common;

use api_lib::web::admin::{
    backfill_slugs_handler, delete_user_handler, list_credit_requests_handler,
    list_users_handler, stats_handler, update_credit_request_handler, update_story_handler,
    update_user_handler, AdminUpdateUserRequest, UpdateCreditRequestRequest,
    UpdateStoryTitleRequest,
};
use api_lib::web::credits::{create_credit_request_handler, CreateCreditRequest};
use api_lib::web::middleware::CurrentUser;
use api_lib::web::rest::health_handler;
use api_lib::web::users::{
    add_favorite_handler, check_favorite_handler, list_favorites_handler,
    public_profile_handler, remove_favorite_handler,
};
use api_lib::web::build_router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::{Extension, Json};
use chrono::Utc;
use common::TestApp;
use masal_core::domain::{Story, User};
use masal_core::ports::DatabaseService;
use uuid::Uuid;

fn story_by(owner: Option<&User>, title: &str, slug: Option<&str>) -> Story {
    Story {
        id: Uuid::new_v4(),
        slug: slug.map(str::to_string),
        title: title.to_string(),
        content: "Bir varmış, bir yokmuş.".to_string(),
        topic_id: "vucudumuz".to_string(),
        topic_name: "Vücudumuz".to_string(),
        subtopic_id: None,
        subtopic_name: None,
        kazanim: None,
        theme: "dostluk".to_string(),
        age_group: "4-6".to_string(),
        character: None,
        audio_base64: None,
        duration: None,
        play_count: 0,
        created_at: Utc::now(),
        user_id: owner.map(|u| u.user_id),
    }
}

async fn request_credits(app: &TestApp, user: &User, amount: i64) -> Uuid {
    let (status, Json(created)) = create_credit_request_handler(
        State(app.state.clone()),
        Extension(CurrentUser(user.clone())),
        Json(CreateCreditRequest {
            requested_credits: amount,
            message: Some("  Okulda kullanacağız  ".to_string()),
        }),
    )
    .await
    .expect("request is recorded");
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created.status, "pending");
    assert_eq!(created.message.as_deref(), Some("Okulda kullanacağız"));
    created.id
}

#[tokio::test]
async fn approving_a_request_adds_exactly_the_requested_credits() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    let (admin, _) = app.admin().await;
    let request_id = request_credits(&app, &user, 25).await;

    let Json(updated) = update_credit_request_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin.clone())),
        Path(request_id),
        Json(UpdateCreditRequestRequest {
            status: "approved".to_string(),
            credits: None,
        }),
    )
    .await
    .expect("approval succeeds");

    assert_eq!(updated.status, "approved");
    assert_eq!(app.user(&user).await.credits, user.credits + 25);

    let err = update_credit_request_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin)),
        Path(request_id),
        Json(UpdateCreditRequestRequest {
            status: "approved".to_string(),
            credits: None,
        }),
    )
    .await
    .expect_err("a decided request cannot be approved twice");
    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
    assert_eq!(app.user(&user).await.credits, user.credits + 25);
}

#[tokio::test]
async fn simultaneous_approvals_grant_credits_once() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    let (admin, _) = app.admin().await;
    let request_id = request_credits(&app, &user, 25).await;

    let approve = || {
        update_credit_request_handler(
            State(app.state.clone()),
            Extension(CurrentUser(admin.clone())),
            Path(request_id),
            Json(UpdateCreditRequestRequest {
                status: "approved".to_string(),
                credits: None,
            }),
        )
    };
    let (first, second) = tokio::join!(approve(), approve());

    let outcomes = [first.is_ok(), second.is_ok()];
    assert_eq!(outcomes.iter().filter(|ok| **ok).count(), 1);
    let loser = first.err().or(second.err()).expect("one approval is refused");
    assert_eq!(loser.status_and_detail().0, StatusCode::BAD_REQUEST);
    assert_eq!(app.user(&user).await.credits, user.credits + 25);
}

#[tokio::test]
async fn admin_may_grant_a_different_amount_or_reject() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    let (admin, _) = app.admin().await;

    let first = request_credits(&app, &user, 50).await;
    update_credit_request_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin.clone())),
        Path(first),
        Json(UpdateCreditRequestRequest {
            status: "approved".to_string(),
            credits: Some(5),
        }),
    )
    .await
    .unwrap();
    assert_eq!(app.user(&user).await.credits, user.credits + 5);

    let second = request_credits(&app, &user, 50).await;
    let Json(rejected) = update_credit_request_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin.clone())),
        Path(second),
        Json(UpdateCreditRequestRequest {
            status: "rejected".to_string(),
            credits: None,
        }),
    )
    .await
    .unwrap();
    assert_eq!(rejected.status, "rejected");
    assert_eq!(app.user(&user).await.credits, user.credits + 5);

    let Json(all) = list_credit_requests_handler(State(app.state.clone()))
        .await
        .unwrap();
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn credit_request_amount_is_bounded() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    for amount in [0, -3, 101] {
        let err = create_credit_request_handler(
            State(app.state.clone()),
            Extension(CurrentUser(user.clone())),
            Json(CreateCreditRequest {
                requested_credits: amount,
                message: None,
            }),
        )
        .await
        .expect_err("out of range");
        assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
    }
}

#[tokio::test]
async fn admin_user_edits_are_validated() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;

    let err = update_user_handler(
        State(app.state.clone()),
        Path(user.user_id),
        Json(AdminUpdateUserRequest {
            role: Some("superuser".to_string()),
            ..Default::default()
        }),
    )
    .await
    .expect_err("unknown role");
    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);

    let Json(updated) = update_user_handler(
        State(app.state.clone()),
        Path(user.user_id),
        Json(AdminUpdateUserRequest {
            credits: Some(42),
            role: Some("admin".to_string()),
            is_verified: Some(true),
        }),
    )
    .await
    .unwrap();
    assert_eq!(updated.credits, 42);
    assert_eq!(updated.role, "admin");
    assert!(updated.is_verified);

    let err = update_user_handler(
        State(app.state.clone()),
        Path(Uuid::new_v4()),
        Json(AdminUpdateUserRequest::default()),
    )
    .await
    .expect_err("unknown user");
    assert_eq!(err.status_and_detail().0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn deleting_a_user_ends_their_sessions_but_keeps_stories() {
    let app = TestApp::new();
    let (user, token) = app.sign_up("deniz@example.com").await;
    let (admin, _) = app.admin().await;
    let story = story_by(Some(&user), "Deniz Feneri", Some("deniz-feneri"));
    app.db.insert_story(&story, None).await.unwrap();

    let err = delete_user_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin.clone())),
        Path(admin.user_id),
    )
    .await
    .expect_err("admins cannot delete themselves");
    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);

    delete_user_handler(
        State(app.state.clone()),
        Extension(CurrentUser(admin)),
        Path(user.user_id),
    )
    .await
    .unwrap();

    assert!(app.state.sessions.resolve(&token).await.is_err());
    let kept = app.db.get_story(story.id).await.unwrap().expect("story survives");
    assert_eq!(kept.user_id, Some(user.user_id));

    let Json(users) = list_users_handler(State(app.state.clone())).await.unwrap();
    assert_eq!(users.total, 1);
}

#[tokio::test]
async fn renaming_a_story_regenerates_its_slug() {
    let app = TestApp::new();
    let story = story_by(None, "Eski Ad", Some("4-6-yas-eski-ad"));
    app.db.insert_story(&story, None).await.unwrap();

    let Json(renamed) = update_story_handler(
        State(app.state.clone()),
        Path(story.id.to_string()),
        Json(UpdateStoryTitleRequest {
            title: "Uçan Balina".to_string(),
        }),
    )
    .await
    .unwrap();
    assert_eq!(renamed.title, "Uçan Balina");
    assert_eq!(renamed.slug.as_deref(), Some("4-6-yas-ucan-balina"));

    let err = update_story_handler(
        State(app.state.clone()),
        Path(story.id.to_string()),
        Json(UpdateStoryTitleRequest {
            title: "   ".to_string(),
        }),
    )
    .await
    .expect_err("blank title");
    assert_eq!(err.status_and_detail().0, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn backfill_assigns_slugs_only_where_missing() {
    let app = TestApp::new();
    app.db
        .insert_story(&story_by(None, "Kayıp Yıldız", None), None)
        .await
        .unwrap();
    app.db
        .insert_story(&story_by(None, "Kayıp Yıldız", None), None)
        .await
        .unwrap();
    app.db
        .insert_story(&story_by(None, "Hazır", Some("hazir")), None)
        .await
        .unwrap();

    let Json(result) = backfill_slugs_handler(State(app.state.clone())).await.unwrap();
    assert_eq!(result.updated, 2);
    assert!(app.db.stories_without_slug().await.unwrap().is_empty());
    assert!(app
        .db
        .get_story_by_slug("4-6-yas-kayip-yildiz-1")
        .await
        .unwrap()
        .is_some());

    let Json(again) = backfill_slugs_handler(State(app.state.clone())).await.unwrap();
    assert_eq!(again.updated, 0);
}

#[tokio::test]
async fn dashboard_counts_users_stories_and_pending_requests() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    app.admin().await;
    let story = story_by(Some(&user), "Say Beni", Some("say-beni"));
    app.db.insert_story(&story, None).await.unwrap();
    app.db.increment_play_count(story.id).await.unwrap();
    request_credits(&app, &user, 10).await;

    let Json(stats) = stats_handler(State(app.state.clone())).await.unwrap();
    assert_eq!(stats.total_users, 2);
    assert_eq!(stats.total_stories, 1);
    assert_eq!(stats.total_plays, 1);
    assert_eq!(stats.pending_credit_requests, 1);
    assert_eq!(stats.stories_today, 1);
}

#[tokio::test]
async fn favorites_follow_story_lifecycle() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    let story = story_by(None, "Sevilen Masal", Some("sevilen-masal"));
    app.db.insert_story(&story, None).await.unwrap();

    for _ in 0..2 {
        add_favorite_handler(
            State(app.state.clone()),
            Extension(CurrentUser(user.clone())),
            Path(story.id.to_string()),
        )
        .await
        .unwrap();
    }
    let user = app.user(&user).await;
    assert_eq!(user.favorites, vec![story.id]);

    let Json(status) = check_favorite_handler(
        Extension(CurrentUser(user.clone())),
        Path(story.id.to_string()),
    )
    .await
    .unwrap();
    assert!(status.is_favorite);

    let Json(listed) = list_favorites_handler(
        State(app.state.clone()),
        Extension(CurrentUser(user.clone())),
    )
    .await
    .unwrap();
    assert_eq!(listed.len(), 1);

    let err = add_favorite_handler(
        State(app.state.clone()),
        Extension(CurrentUser(user.clone())),
        Path(Uuid::new_v4().to_string()),
    )
    .await
    .expect_err("unknown story");
    assert_eq!(err.status_and_detail().0, StatusCode::NOT_FOUND);

    remove_favorite_handler(
        State(app.state.clone()),
        Extension(CurrentUser(user.clone())),
        Path(story.id.to_string()),
    )
    .await
    .unwrap();
    assert!(app.user(&user).await.favorites.is_empty());

    // Deleting a story drops it from every favorites list.
    add_favorite_handler(
        State(app.state.clone()),
        Extension(CurrentUser(user.clone())),
        Path(story.id.to_string()),
    )
    .await
    .unwrap();
    app.db.delete_story(story.id).await.unwrap();
    assert!(app.user(&user).await.favorites.is_empty());
}

#[tokio::test]
async fn public_profile_lists_the_authors_stories() {
    let app = TestApp::new();
    let (user, _) = app.sign_up("deniz@example.com").await;
    app.db
        .insert_story(&story_by(Some(&user), "Birinci", Some("birinci")), None)
        .await
        .unwrap();

    let Json(profile) =
        public_profile_handler(State(app.state.clone()), Path(user.user_id.to_string()))
            .await
            .unwrap();
    assert_eq!(profile.user.name, "Deniz");
    assert_eq!(profile.stories.len(), 1);
    assert_eq!(profile.stories[0].creator_name.as_deref(), Some("Deniz Kara"));

    let err = public_profile_handler(State(app.state.clone()), Path("nobody".to_string()))
        .await
        .expect_err("bad id");
    assert_eq!(err.status_and_detail().0, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn router_builds_and_health_reports_connected() {
    let app = TestApp::new();
    let _router = build_router(app.state.clone());

    let (status, Json(health)) = health_handler(State(app.state.clone())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(health.status, "healthy");
    assert_eq!(health.database, "connected");
}
