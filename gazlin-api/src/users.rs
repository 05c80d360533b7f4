// In-memory account directory behind the login and register endpoints.
// Passwords are never stored: only a salted PBKDF2-HMAC-SHA256 digest,
// checked with ring's constant-time verify.

use std::collections::HashMap;
use std::num::NonZeroU32;

use ring::rand::{SecureRandom, SystemRandom};
use ring::{digest, pbkdf2};
use tokio::sync::RwLock;

use crate::models::{Role, User};

static PASSWORD_ALGORITHM: pbkdf2::Algorithm = pbkdf2::PBKDF2_HMAC_SHA256;
const DIGEST_LEN: usize = digest::SHA256_OUTPUT_LEN;
const SALT_LEN: usize = 16;

pub const DEFAULT_ITERATIONS: NonZeroU32 = match NonZeroU32::new(100_000) {
    Some(n) => n,
    None => unreachable!(),
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UserError {
    AlreadyExists(String),
    /// Username or password missing
    EmptyCredentials,
    /// Salt generation failed
    Crypto,
}

impl std::fmt::Display for UserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserError::AlreadyExists(name) => write!(f, "user '{}' already exists", name),
            UserError::EmptyCredentials => write!(f, "username and password are required"),
            UserError::Crypto => write!(f, "failed to hash password"),
        }
    }
}

impl std::error::Error for UserError {}

struct Account {
    user: User,
    salt: [u8; SALT_LEN],
    digest: [u8; DIGEST_LEN],
}

#[derive(Default)]
struct Accounts {
    by_name: HashMap<String, Account>,
    last_id: i64,
}

pub struct UserDirectory {
    iterations: NonZeroU32,
    rng: SystemRandom,
    accounts: RwLock<Accounts>,
}

impl Default for UserDirectory {
    fn default() -> Self {
        Self::new()
    }
}

impl UserDirectory {
    pub fn new() -> Self {
        Self::with_iterations(DEFAULT_ITERATIONS)
    }

    /// Directory with a custom PBKDF2 work factor
    pub fn with_iterations(iterations: NonZeroU32) -> Self {
        Self {
            iterations,
            rng: SystemRandom::new(),
            accounts: RwLock::new(Accounts::default()),
        }
    }

    fn hash(&self, password: &str) -> Result<([u8; SALT_LEN], [u8; DIGEST_LEN]), UserError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng.fill(&mut salt).map_err(|_| UserError::Crypto)?;
        let mut digest = [0u8; DIGEST_LEN];
        pbkdf2::derive(
            PASSWORD_ALGORITHM,
            self.iterations,
            &salt,
            password.as_bytes(),
            &mut digest,
        );
        Ok((salt, digest))
    }

    /// Create or replace an account. Used for the configured admin.
    pub async fn add(&self, username: &str, password: &str, role: Role) -> Result<User, UserError> {
        let (salt, digest) = self.hash(password)?;
        let mut accounts = self.accounts.write().await;
        let id = match accounts.by_name.get(username) {
            Some(existing) => existing.user.id,
            None => {
                accounts.last_id += 1;
                accounts.last_id
            }
        };
        let user = User {
            id,
            username: username.to_string(),
            role,
        };
        accounts.by_name.insert(
            username.to_string(),
            Account {
                user: user.clone(),
                salt,
                digest,
            },
        );
        Ok(user)
    }

    /// Create a new account; an existing username is rejected.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
        role: Role,
    ) -> Result<User, UserError> {
        let username = username.trim();
        if username.is_empty() || password.is_empty() {
            return Err(UserError::EmptyCredentials);
        }
        let (salt, digest) = self.hash(password)?;

        let mut accounts = self.accounts.write().await;
        if accounts.by_name.contains_key(username) {
            return Err(UserError::AlreadyExists(username.to_string()));
        }
        accounts.last_id += 1;
        let user = User {
            id: accounts.last_id,
            username: username.to_string(),
            role,
        };
        accounts.by_name.insert(
            username.to_string(),
            Account {
                user: user.clone(),
                salt,
                digest,
            },
        );
        Ok(user)
    }

    /// Check credentials. Unknown users and wrong passwords look the same to the caller.
    pub async fn authenticate(&self, username: &str, password: &str) -> Option<User> {
        let (user, salt, digest) = {
            let accounts = self.accounts.read().await;
            let account = accounts.by_name.get(username)?;
            (account.user.clone(), account.salt, account.digest)
        };
        pbkdf2::verify(
            PASSWORD_ALGORITHM,
            self.iterations,
            &salt,
            password.as_bytes(),
            &digest,
        )
        .ok()?;
        Some(user)
    }

    pub async fn len(&self) -> usize {
        self.accounts.read().await.by_name.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
