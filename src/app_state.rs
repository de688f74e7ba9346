use crate::auth::TokenService;
use crate::config::Config;
use crate::store::DocumentStore;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn DocumentStore>,
    pub tokens: TokenService,
}

impl AppState {
    pub fn new(store: Arc<dyn DocumentStore>, config: &Config) -> Self {
        let tokens = TokenService::new(&config.jwt_secret);
        Self { store, tokens }
    }
}
