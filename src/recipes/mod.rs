pub mod composer;
mod dto;
pub mod handlers;
mod repo;
pub mod repo_types;

use crate::state::AppState;
use axum::Router;

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::generate_routes())
        .merge(handlers::history_routes())
}
