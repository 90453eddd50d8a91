use axum::{
    Router,
    routing::{get, post},
};

use super::handlers::{
    create_bag_setup, delete_bag_setup, get_bag_setup, list_bag_setups, set_default_bag_setup,
    update_bag_setup,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_bag_setups).post(create_bag_setup))
        .route(
            "/:id",
            get(get_bag_setup).put(update_bag_setup).delete(delete_bag_setup),
        )
        .route("/:id/default", post(set_default_bag_setup))
}
