use axum::{Router, routing::get};

use super::handlers::{create_profile, get_profile, update_profile};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new().route(
        "/me",
        get(get_profile).post(create_profile).put(update_profile),
    )
}
