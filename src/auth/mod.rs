use crate::state::AppState;
use axum::Router;

mod dto;
pub mod handlers;
pub mod repo;
mod repo_types;
pub mod services;
pub mod session;

pub use session::{CurrentUser, Session};

pub fn router() -> Router<AppState> {
    Router::new()
        .merge(handlers::auth_routes())
        .merge(handlers::me_routes())
}
