use axum::Router;

use crate::state::AppState;

mod dto;
mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;
pub mod repo;
pub mod repo_types;
pub mod validate;

pub fn router() -> Router<AppState> {
    handlers::account_routes()
}
