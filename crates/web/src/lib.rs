use std::sync::Arc;

use axum::{Json, Router, extract::State, middleware::from_fn_with_state, routing::get};
use serde_json::{Value, json};
use storage::store::RecordStore;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub mod config;
pub mod envelope;
pub mod error;
pub mod extract;
pub mod features;
pub mod middleware;
mod openapi;

use features::{bag_setups, courses, events, profiles, series};
use middleware::auth::{SessionVerifier, require_auth};
use openapi::ApiDoc;

/// Shared handler state: the record store every request goes through.
#[derive(Clone)]
pub struct AppState {
    store: Arc<dyn RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &dyn RecordStore {
        self.store.as_ref()
    }
}

pub fn build_router(state: AppState, sessions: SessionVerifier) -> Router {
    let api = Router::new()
        .nest("/profiles", profiles::routes::routes())
        .nest("/bag-setups", bag_setups::routes::routes())
        .nest("/courses", courses::routes::routes())
        .nest("/series", series::routes::routes())
        .nest("/events", events::routes::routes())
        .route_layer(from_fn_with_state(sessions, require_auth));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "status": "ok", "store": state.store().backend_tag() }))
}
