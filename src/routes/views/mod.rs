use std::sync::Arc;

use axum::Router;

use crate::state::AppState;

pub mod artists;
pub mod home;
pub mod public;
pub mod shows;
pub mod venues;

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .merge(public::router(&state.config.general))
        .merge(home::router(state.clone()))
        .merge(venues::router(state.clone()))
        .merge(artists::router(state.clone()))
        .merge(shows::router(state))
        .fallback(public::not_found)
}
