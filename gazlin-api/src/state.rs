use std::sync::Arc;

use gazlin_translate::{AvailabilityProber, TranslationService};

use crate::auth::TokenSigner;
use crate::store::MineralStore;
use crate::users::UserDirectory;

/// Shared handles passed to every handler
#[derive(Clone)]
pub struct AppState {
    pub translator: Arc<TranslationService>,
    pub minerals: Arc<dyn MineralStore>,
    pub users: Arc<UserDirectory>,
    pub tokens: Arc<TokenSigner>,
    pub prober: AvailabilityProber,
}

impl AppState {
    pub fn new(
        translator: Arc<TranslationService>,
        minerals: Arc<dyn MineralStore>,
        users: UserDirectory,
        tokens: TokenSigner,
    ) -> Self {
        let prober = AvailabilityProber::new(translator.backend().clone());
        Self {
            translator,
            minerals,
            users: Arc::new(users),
            tokens: Arc::new(tokens),
            prober,
        }
    }
}
