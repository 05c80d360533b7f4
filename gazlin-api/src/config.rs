//! Server settings read from the environment.
//!
//! `JWT_SECRET` is mandatory. Everything else has a default.

use std::net::SocketAddr;
use std::path::PathBuf;

use gazlin_translate::ConfigError;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:5173";

#[derive(Clone)]
pub struct ApiConfig {
    pub jwt_secret: String,
    pub bind_addr: SocketAddr,
    pub cors_origin: String,
    /// Seeded admin account, when both halves are set
    pub admin: Option<(String, String)>,
    pub minerals_seed: Option<PathBuf>,
}

impl std::fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConfig")
            .field("jwt_secret", &"***")
            .field("bind_addr", &self.bind_addr)
            .field("cors_origin", &self.cors_origin)
            .field("admin", &self.admin.as_ref().map(|(name, _)| name))
            .field("minerals_seed", &self.minerals_seed)
            .finish()
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let jwt_secret =
            non_empty("JWT_SECRET").ok_or_else(|| ConfigError::Missing("JWT_SECRET".to_string()))?;

        let raw_addr = non_empty("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = raw_addr
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue {
                key: "BIND_ADDR".to_string(),
                value: raw_addr.clone(),
            })?;

        let admin = match (non_empty("ADMIN_USERNAME"), non_empty("ADMIN_PASSWORD")) {
            (Some(username), Some(password)) => Some((username, password)),
            _ => None,
        };

        Ok(Self {
            jwt_secret,
            bind_addr,
            cors_origin: non_empty("CORS_ORIGIN")
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            admin,
            minerals_seed: non_empty("MINERALS_SEED").map(PathBuf::from),
        })
    }
}
