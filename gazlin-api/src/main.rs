use std::sync::Arc;

use gazlin_api::{
    ApiConfig, AppState, InMemoryMineralStore, MineralStore, Role, TokenSigner, UserDirectory,
    router, with_http_layers,
};
use gazlin_translate::{TranslationConfig, TranslationService};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // A missing .env file is fine; the process environment still applies
    let _ = dotenv::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config = ApiConfig::from_env().map_err(|e| format!("Invalid server configuration: {}", e))?;
    let translation_config = TranslationConfig::from_env()
        .map_err(|e| format!("Invalid translation configuration: {}", e))?;

    let translator = TranslationService::from_config(&translation_config)
        .map_err(|e| format!("Failed to initialize translator: {}", e))?;
    info!(
        base_url = %translation_config.base_url,
        timeout_secs = translation_config.timeout.as_secs(),
        languages = translator.supported_languages().len(),
        "translation service configured"
    );

    let store = match &config.minerals_seed {
        Some(path) => {
            let seed = InMemoryMineralStore::load_seed(path)
                .map_err(|e| format!("Failed to load mineral seed: {}", e))?;
            InMemoryMineralStore::with_minerals(seed).await?
        }
        None => InMemoryMineralStore::new(),
    };
    info!(minerals = store.all().await?.len(), "mineral store ready");

    let users = UserDirectory::new();
    match &config.admin {
        Some((username, password)) => {
            users.add(username, password, Role::Admin).await?;
            info!(username = %username, "admin account registered");
        }
        None => warn!("ADMIN_USERNAME/ADMIN_PASSWORD not set; no admin account"),
    }

    let state = AppState::new(
        Arc::new(translator),
        Arc::new(store),
        users,
        TokenSigner::new(config.jwt_secret.as_bytes()),
    );

    // Unreachable translation server is logged, not fatal
    state.prober.log_startup().await;

    let app = with_http_layers(router(state), &config.cors_origin)?;

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    info!("Server running at http://{}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
