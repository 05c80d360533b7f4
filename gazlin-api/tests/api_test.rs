use std::num::NonZeroU32;
use std::sync::Arc;

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use gazlin_api::{
    AppState, InMemoryMineralStore, NewMineral, Role, TokenSigner, UserDirectory, router,
};
use gazlin_translate::{
    LanguageRegistry, MockBackend, MockMode, TranslateError, TranslateResult, TranslationBackend,
    TranslationCache, TranslationService,
};
use serde_json::{Value, json};
use tower::ServiceExt;

const SECRET: &[u8] = b"api-test-secret";

fn seed() -> Vec<NewMineral> {
    vec![
        NewMineral {
            title: "Кварц".to_string(),
            description: "Прозрачный минерал".to_string(),
            model_path: "/storage/models/quartz.glb".to_string(),
            preview_image_path: String::new(),
        },
        NewMineral {
            title: "Агат".to_string(),
            description: String::new(),
            model_path: "/storage/models/agate.glb".to_string(),
            preview_image_path: String::new(),
        },
    ]
}

async fn setup(backend: Arc<dyn TranslationBackend>) -> (Router, AppState) {
    let translator = TranslationService::new(
        LanguageRegistry::default(),
        Arc::new(TranslationCache::new()),
        backend,
    );
    let users = UserDirectory::with_iterations(NonZeroU32::new(1_000).unwrap());
    users.add("admin", "admin-pw", Role::Admin).await.unwrap();
    users.add("reader", "reader-pw", Role::User).await.unwrap();

    let state = AppState::new(
        Arc::new(translator),
        Arc::new(InMemoryMineralStore::with_minerals(seed()).await.unwrap()),
        users,
        TokenSigner::new(SECRET),
    );
    (router(state.clone()), state)
}

fn mappings() -> Arc<MockBackend> {
    Arc::new(MockBackend::with_mappings([
        ("Кварц", "en", "Quartz"),
        ("Агат", "en", "Agate"),
        ("Прозрачный минерал", "en", "Transparent mineral"),
    ]))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn with_token(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

fn token_for(state: &AppState, role: Role) -> String {
    state.tokens.issue(1, "tester", role).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

// "К", percent-encoded for the query string
const QUERY_KA: &str = "%D0%9A";

/// Fails every text listed in `broken` with `TranslationFailed`
struct PartiallyBrokenBackend {
    broken: Vec<&'static str>,
}

#[async_trait]
impl TranslationBackend for PartiallyBrokenBackend {
    async fn translate(&self, text: &str, _source: &str, target: &str) -> TranslateResult<String> {
        if self.broken.contains(&text) {
            Err(TranslateError::TranslationFailed(
                "unexpected status code: 500".to_string(),
            ))
        } else {
            Ok(format!("{}_{}", text, target))
        }
    }

    async fn check_availability(&self) -> TranslateResult<()> {
        Ok(())
    }

    fn backend_name(&self) -> &str {
        "partially broken"
    }
}

#[tokio::test]
async fn test_root_and_languages() {
    let (app, _) = setup(mappings()).await;

    let (status, body) = send(&app, get("/")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let (status, body) = send(&app, get("/api/v1/languages")).await;
    assert_eq!(status, StatusCode::OK);
    let codes: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|l| l["code"].as_str().unwrap())
        .collect();
    assert_eq!(codes.len(), 5);
    assert!(codes.contains(&"ru") && codes.contains(&"en"));
}

#[tokio::test]
async fn test_minerals_untranslated() {
    let (app, _) = setup(mappings()).await;

    let (status, body) = send(&app, get("/api/v1/minerals")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Кварц");

    let (status, _) = send(&app, get("/api/v1/minerals/99")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get("/api/v1/minerals/abc")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_translated_list_and_cache() {
    let backend = mappings();
    let (app, state) = setup(backend.clone()).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Quartz");
    assert_eq!(body["data"][0]["description"], "Transparent mineral");
    assert_eq!(body["data"][0]["model_path"], "/storage/models/quartz.glb");
    assert_eq!(body["data"][1]["title"], "Agate");
    // Empty description is returned unchanged without a backend call
    assert_eq!(body["data"][1]["description"], "");
    assert_eq!(backend.calls(), 3);

    let (status, _) = send(&app, get("/api/v1/minerals-translated?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(backend.calls(), 3);
    assert_eq!(state.translator.cache().len(), 3);
}

#[tokio::test]
async fn test_translated_list_defaults_to_russian() {
    let backend = Arc::new(MockBackend::new(MockMode::Suffix));
    let (app, _) = setup(backend).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Кварц_ru");
}

#[tokio::test]
async fn test_unsupported_language_rejected() {
    let backend = mappings();
    let (app, _) = setup(backend.clone()).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated?lang=zz")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("zz"));

    let (status, _) = send(&app, get("/api/v1/minerals-translated/1?lang=zz")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.calls(), 0);
}

#[tokio::test]
async fn test_batch_falls_back_per_item() {
    let backend = Arc::new(PartiallyBrokenBackend {
        broken: vec!["Кварц"],
    });
    let (app, _) = setup(backend).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Кварц");
    assert_eq!(body["data"][0]["description"], "Прозрачный минерал_en");
    assert_eq!(body["data"][1]["title"], "Агат_en");
}

#[tokio::test]
async fn test_batch_fails_fast_when_unavailable() {
    let backend = mappings();
    backend.set_available(false);
    let (app, _) = setup(backend.clone()).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated?lang=en")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert!(body["error"].as_str().is_some());
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_single_item_surfaces_failure_kind() {
    let broken = Arc::new(PartiallyBrokenBackend {
        broken: vec!["Кварц"],
    });
    let (app, _) = setup(broken).await;
    let (status, _) = send(&app, get("/api/v1/minerals-translated/1?lang=en")).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let down = mappings();
    down.set_available(false);
    let (app, _) = setup(down).await;
    let (status, _) = send(&app, get("/api/v1/minerals-translated/1?lang=en")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_single_item_translation() {
    let (app, _) = setup(mappings()).await;

    let (status, body) = send(&app, get("/api/v1/minerals-translated/2?lang=en")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Agate");
    assert_eq!(body["data"]["description"], "");

    let (status, _) = send(&app, get("/api/v1/minerals-translated/42?lang=en")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_find_minerals_requires_token() {
    let (app, state) = setup(mappings()).await;

    let (status, _) = send(&app, get("/api/v1/find-minerals?query=qu&lang=en")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?query=qu&lang=en", "garbage", None),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let token = token_for(&state, Role::User);
    let (status, body) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?query=QU&lang=en", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Quartz");

    let (status, body) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?lang=en", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_login() {
    let (app, state) = setup(mappings()).await;

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "admin-pw"}).to_string(),
        ))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "admin");

    let claims = state.tokens.verify(body["token"].as_str().unwrap()).unwrap();
    assert_eq!(claims.username, "admin");
    assert_eq!(claims.role, Role::Admin);

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "wrong"}).to_string(),
        ))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_admin_routes_require_admin_role() {
    let (app, state) = setup(mappings()).await;
    let body = json!({"title": "Яшма", "model_path": "/storage/models/jasper.glb"});

    let request = Request::builder()
        .method("POST")
        .uri("/api/v1/admin/minerals")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let user_token = token_for(&state, Role::User);
    let (status, _) = send(
        &app,
        with_token("POST", "/api/v1/admin/minerals", &user_token, Some(body)),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_admin_crud() {
    let (app, state) = setup(mappings()).await;
    let token = token_for(&state, Role::Admin);

    let (status, body) = send(
        &app,
        with_token(
            "POST",
            "/api/v1/admin/minerals",
            &token,
            Some(json!({"title": "Яшма", "model_path": "/storage/models/jasper.glb"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["id"], 3);

    let (status, _) = send(
        &app,
        with_token(
            "POST",
            "/api/v1/admin/minerals",
            &token,
            Some(json!({"title": "Яшма", "model_path": "/storage/models/jasper.obj"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        with_token(
            "PUT",
            "/api/v1/admin/minerals/3",
            &token,
            Some(json!({"title": "", "description": "Непрозрачная порода"})),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Яшма");
    assert_eq!(body["data"]["description"], "Непрозрачная порода");

    let (status, _) = send(
        &app,
        with_token("DELETE", "/api/v1/admin/minerals/3", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        with_token("DELETE", "/api/v1/admin/minerals/3", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_translation_health() {
    let backend = mappings();
    let (app, _) = setup(backend.clone()).await;

    let (status, body) = send(&app, get("/api/v1/translation/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["availability"]["available"], true);
    assert_eq!(body["data"]["cached_translations"], 0);

    backend.set_available(false);
    let (status, body) = send(&app, get("/api/v1/translation/health")).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["data"]["availability"]["available"], false);
}

#[tokio::test]
async fn test_find_minerals_fails_fast_when_unavailable() {
    let backend = mappings();
    backend.set_available(false);
    let (app, state) = setup(backend.clone()).await;
    let token = token_for(&state, Role::User);

    let (status, body) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?query=qu&lang=en", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"], "Translation service temporarily unavailable");
    assert_eq!(backend.calls(), 1);
}

#[tokio::test]
async fn test_find_minerals_skips_untranslatable_title() {
    let backend = Arc::new(PartiallyBrokenBackend {
        broken: vec!["Кварц"],
    });
    let (app, state) = setup(backend).await;
    let token = token_for(&state, Role::User);

    let uri = format!("/api/v1/find-minerals?query={}&lang=en", QUERY_KA);
    let (status, body) = send(&app, with_token("GET", &uri, &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!([]));

    // The other mineral is still searchable
    let (status, body) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?query=%D0%90&lang=en", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"][0]["title"], "Агат_en");
}

#[tokio::test]
async fn test_find_minerals_keeps_original_description_on_failure() {
    let backend = Arc::new(PartiallyBrokenBackend {
        broken: vec!["Прозрачный минерал"],
    });
    let (app, state) = setup(backend).await;
    let token = token_for(&state, Role::User);

    let uri = format!("/api/v1/find-minerals?query={}&lang=en", QUERY_KA);
    let (status, body) = send(&app, with_token("GET", &uri, &token, None)).await;
    assert_eq!(status, StatusCode::OK);
    let results = body["data"].as_array().unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0]["title"], "Кварц_en");
    assert_eq!(results[0]["description"], "Прозрачный минерал");
}

#[tokio::test]
async fn test_register_issues_user_token() {
    let (app, state) = setup(mappings()).await;

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/register",
            json!({"username": "geologist", "password": "pw"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["user"]["username"], "geologist");
    assert_eq!(body["user"]["role"], "user");
    let token = body["token"].as_str().unwrap().to_string();
    let claims = state.tokens.verify(&token).unwrap();
    assert_eq!(claims.role, Role::User);
    assert_eq!(claims.id, body["user"]["id"].as_i64().unwrap());

    // The new account can search and log in
    let (status, _) = send(
        &app,
        with_token("GET", "/api/v1/find-minerals?query=qu&lang=en", &token, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = send(
        &app,
        post_json(
            "/api/v1/login",
            json!({"username": "geologist", "password": "pw"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_register_rejections() {
    let (app, _) = setup(mappings()).await;

    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/register",
            json!({"username": "reader", "password": "x"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = send(
        &app,
        post_json("/api/v1/register", json!({"username": "", "password": "x"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json(
            "/api/v1/register",
            json!({"username": "mallory", "password": "x", "role": "admin"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_favorites() {
    let (app, state) = setup(mappings()).await;

    let (status, _) = send(&app, get("/api/v1/favorites")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let alice = state.tokens.issue(10, "alice", Role::User).unwrap();
    let bob = state.tokens.issue(11, "bob", Role::User).unwrap();

    for id in [2, 1, 2] {
        let (status, body) = send(
            &app,
            with_token("POST", &format!("/api/v1/favorites/{}", id), &alice, None),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "success");
    }

    let (status, _) = send(
        &app,
        with_token("POST", "/api/v1/favorites/99", &alice, None),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(
        &app,
        with_token("POST", "/api/v1/favorites/abc", &alice, None),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = send(&app, with_token("GET", "/api/v1/favorites", &alice, None)).await;
    assert_eq!(body["data"], json!([1, 2]));
    let (_, body) = send(&app, with_token("GET", "/api/v1/favorites", &bob, None)).await;
    assert_eq!(body["data"], json!([]));

    let (status, _) = send(
        &app,
        with_token("DELETE", "/api/v1/favorites/1", &alice, None),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = send(&app, with_token("GET", "/api/v1/favorites", &alice, None)).await;
    assert_eq!(body["data"], json!([2]));
}
