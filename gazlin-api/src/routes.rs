//! Route table.
//!
//! Everything except the liveness root lives under `/api/v1`. Search and
//! favorites need a bearer token and `/admin` additionally needs the admin role.

use axum::Router;
use axum::http::{HeaderValue, Method, header};
use axum::middleware::{from_fn, from_fn_with_state};
use axum::routing::{get, post, put};
use gazlin_translate::ConfigError;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{admin, auth, favorites, minerals, root, translation};
use crate::middleware::{admin_only, require_auth};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/minerals", post(admin::create_mineral))
        .route(
            "/minerals/{id}",
            put(admin::update_mineral).delete(admin::delete_mineral),
        )
        .route_layer(from_fn(admin_only))
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let signed_in = Router::new()
        .route("/find-minerals", get(translation::find_minerals))
        .route("/favorites", get(favorites::list_favorites))
        .route(
            "/favorites/{id}",
            post(favorites::add_favorite).delete(favorites::remove_favorite),
        )
        .route_layer(from_fn_with_state(state.clone(), require_auth));

    let v1 = Router::new()
        .route("/languages", get(translation::list_languages))
        .route("/minerals", get(minerals::list_minerals))
        .route("/minerals/{id}", get(minerals::get_mineral))
        .route("/minerals-translated", get(translation::list_translated))
        .route("/minerals-translated/{id}", get(translation::get_translated))
        .route("/translation/health", get(translation::translation_health))
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .merge(signed_in)
        .nest("/admin", admin_routes);

    Router::new()
        .route("/", get(root))
        .nest("/api/v1", v1)
        .with_state(state)
}

/// Wrap the router with CORS for `cors_origin` and request tracing
pub fn with_http_layers(router: Router, cors_origin: &str) -> Result<Router, ConfigError> {
    let origin = HeaderValue::from_str(cors_origin).map_err(|_| ConfigError::InvalidValue {
        key: "CORS_ORIGIN".to_string(),
        value: cors_origin.to_string(),
    })?;

    let cors = CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true);

    Ok(router.layer(cors).layer(TraceLayer::new_for_http()))
}
