use axum::{Router, routing::get};

use super::handlers::{
    create_course, delete_course, get_course, list_courses, list_tee_sets, replace_tee_sets,
    update_course,
};
use crate::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(list_courses).post(create_course))
        .route(
            "/:id",
            get(get_course).put(update_course).delete(delete_course),
        )
        .route("/:id/tees", get(list_tee_sets).put(replace_tee_sets))
}
