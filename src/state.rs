use crate::{auth::TokenService, db::Database, utils::Config};
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub token_service: Arc<TokenService>,
    pub config: Arc<Config>,
}
