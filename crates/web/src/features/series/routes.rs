use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{
    create_series, delete_series, get_series, invite_participant, list_participants, list_series,
    update_participant, update_series,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_series).post(create_series))
        .route(
            "/:id",
            get(get_series).put(update_series).delete(delete_series),
        )
        .route(
            "/:id/participants",
            get(list_participants).post(invite_participant),
        )
        .route("/:id/participants/:participant_id", put(update_participant))
}
