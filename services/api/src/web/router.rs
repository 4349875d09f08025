//! services/api/src/web/router.rs
//!
//! Assembles the full HTTP application: public, signed-in and admin route
//! groups, CORS, body limit and the Swagger UI.

use axum::{
    extract::DefaultBodyLimit,
    http::{
        header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware as axum_middleware,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::warn;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::web::middleware::{require_admin, require_auth};
use crate::web::rest::{health_handler, root_handler, ApiDoc};
use crate::web::state::AppState;
use crate::web::{admin, auth, credits, stories, topics, users};

/// Story audio is stored inline, so responses and some admin payloads are large.
const BODY_LIMIT_BYTES: usize = 10 * 1024 * 1024;

/// Builds a CORS layer that allows credentials from the configured origins.
/// Origins that are not valid header values are skipped with a warning.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin '{}'", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(allowed)
        .allow_credentials(true)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE, ACCEPT])
}

pub fn build_router(app_state: Arc<AppState>) -> Router {
    // Public routes (no auth required). Handlers that need a user on these
    // paths resolve the session themselves.
    let public_routes = Router::new()
        .route("/api", get(root_handler))
        .route("/api/", get(root_handler))
        .route("/api/health", get(health_handler))
        // --- Auth ---
        .route("/api/auth/register", post(auth::register_handler))
        .route("/api/auth/login", post(auth::login_handler))
        .route("/api/auth/google/session", post(auth::google_session_handler))
        .route("/api/auth/me", get(auth::me_handler))
        .route("/api/auth/logout", post(auth::logout_handler))
        .route("/api/admin/login", post(auth::admin_login_handler))
        // --- Catalog ---
        .route("/api/topics", get(topics::list_topics_handler))
        .route("/api/topics/{topic_id}", get(topics::get_topic_handler))
        .route(
            "/api/topics/{topic_id}/subtopics",
            get(topics::list_subtopics_handler),
        )
        .route(
            "/api/topics/{topic_id}/subtopics/{subtopic_id}",
            get(topics::get_subtopic_handler),
        )
        .route("/api/subtopics/all", get(topics::all_subtopics_handler))
        .route("/api/kazanim/search", get(topics::search_kazanim_handler))
        // --- Stories ---
        .route("/api/stories", get(stories::list_stories_handler))
        .route("/api/stories/popular", get(stories::popular_stories_handler))
        .route("/api/stories/generate", post(stories::generate_story_handler))
        .route(
            "/api/stories/slug/{slug}",
            get(stories::get_story_by_slug_handler),
        )
        .route(
            "/api/stories/{story_id}",
            get(stories::get_story_handler).delete(stories::delete_story_handler),
        )
        .route("/api/stories/{story_id}/play", post(stories::play_story_handler))
        .route(
            "/api/users/public/{user_id}",
            get(users::public_profile_handler),
        );

    // Protected routes (auth required)
    let protected_routes = Router::new()
        .route(
            "/api/users/profile",
            get(users::get_profile_handler).put(users::update_profile_handler),
        )
        .route("/api/users/credits", get(users::credits_handler))
        .route("/api/users/stories", get(users::my_stories_handler))
        .route(
            "/api/users/stories/{story_id}",
            delete(users::delete_my_story_handler),
        )
        .route("/api/users/favorites", get(users::list_favorites_handler))
        .route(
            "/api/users/favorites/{story_id}",
            get(users::check_favorite_handler)
                .post(users::add_favorite_handler)
                .delete(users::remove_favorite_handler),
        )
        .route(
            "/api/credits/request",
            post(credits::create_credit_request_handler),
        )
        .route(
            "/api/credits/requests",
            get(credits::my_credit_requests_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_auth,
        ));

    // Admin routes (admin role required)
    let admin_routes = Router::new()
        .route("/api/admin/stats", get(admin::stats_handler))
        .route("/api/admin/users", get(admin::list_users_handler))
        .route(
            "/api/admin/users/{user_id}",
            put(admin::update_user_handler).delete(admin::delete_user_handler),
        )
        .route("/api/admin/stories", get(admin::list_stories_handler))
        .route(
            "/api/admin/stories/backfill-slugs",
            post(admin::backfill_slugs_handler),
        )
        .route(
            "/api/admin/stories/{story_id}",
            put(admin::update_story_handler).delete(admin::delete_story_handler),
        )
        .route(
            "/api/admin/credit-requests",
            get(admin::list_credit_requests_handler),
        )
        .route(
            "/api/admin/credit-requests/{request_id}",
            put(admin::update_credit_request_handler),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            require_admin,
        ));

    let cors = cors_layer(&app_state.config.cors_origins);

    let api_router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .merge(admin_routes)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .with_state(app_state);

    Router::new()
        .merge(api_router)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
