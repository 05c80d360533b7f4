//! HTTP API for the GazlinGO mineral catalog.
//!
//! Serves minerals as stored and translated on the fly through
//! [`gazlin_translate::TranslationService`], plus login and admin maintenance
//! routes guarded by HS256 bearer tokens.

pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod state;
pub mod store;
pub mod users;

pub use auth::{AuthError, Claims, TokenSigner, require_role};
pub use config::ApiConfig;
pub use error::ApiError;
pub use models::{
    Mineral, MineralUpdate, NewMineral, RegisterRequest, RegisterResponse, Role, User,
    ValidationError,
};
pub use routes::{router, with_http_layers};
pub use state::AppState;
pub use store::{InMemoryMineralStore, MineralStore, StoreError};
pub use users::{UserDirectory, UserError};
