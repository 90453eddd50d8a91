use axum::{
    Router,
    routing::{get, put},
};

use super::handlers::{
    add_participant, create_event, delete_event, get_event, get_leaderboard, list_events,
    list_participants, list_scorecards, submit_scorecard, update_event, update_participant,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route(
            "/:id",
            get(get_event).put(update_event).delete(delete_event),
        )
        .route(
            "/:id/participants",
            get(list_participants).post(add_participant),
        )
        .route("/:id/participants/:participant_id", put(update_participant))
        .route("/:id/scorecards", get(list_scorecards).put(submit_scorecard))
        .route("/:id/leaderboard", get(get_leaderboard))
}
