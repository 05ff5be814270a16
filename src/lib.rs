pub mod app;
pub mod auth;
pub mod db;
pub mod fred;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod state;
pub mod utils;

pub use app::create_app;
pub use auth::TokenService;
pub use db::Database;
pub use state::AppState;
pub use utils::{ApiError, ApiResult, Config};
