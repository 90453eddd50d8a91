use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Method, Request, StatusCode, header},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use hmac::{Hmac, Mac};
use serde_json::{Value, json};
use sha2::Sha256;
use storage::{context::Caller, models::Profile, repository::Repository, store::MemoryStore};
use tower::ServiceExt;
use uuid::Uuid;
use web::{AppState, build_router, middleware::auth::SessionVerifier};

pub const SECRET: &str = "integration-test-secret";

pub struct TestApp {
    pub store: Arc<MemoryStore>,
    router: Router,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::new());
        let router = build_router(
            AppState::new(store.clone()),
            SessionVerifier::new(SECRET),
        );
        Self { store, router }
    }

    /// Seeds a profile with the site admin flag, bypassing the API.
    pub async fn seed_admin(&self) -> Uuid {
        let user_id = Uuid::new_v4();
        let caller = Caller::new(user_id);
        Repository::<Profile>::new(self.store.as_ref(), &caller)
            .create(&json!({ "id": user_id, "displayName": "Committee", "isAdmin": true }))
            .await
            .expect("seed admin profile");
        user_id
    }

    pub async fn request(
        &self,
        method: Method,
        uri: &str,
        user: Option<Uuid>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token_for(user)));
        }
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };
        self.send(builder.body(body).expect("request")).await
    }

    pub async fn send(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("router is infallible");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("read body");
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).expect("json body")
        };
        (status, body)
    }

    pub async fn get(&self, uri: &str, user: Uuid) -> (StatusCode, Value) {
        self.request(Method::GET, uri, Some(user), None).await
    }

    pub async fn post(&self, uri: &str, user: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::POST, uri, Some(user), Some(body)).await
    }

    pub async fn put(&self, uri: &str, user: Uuid, body: Value) -> (StatusCode, Value) {
        self.request(Method::PUT, uri, Some(user), Some(body)).await
    }
}

pub fn token_for(user: Uuid) -> String {
    sign(json!({
        "sub": user,
        "exp": chrono::Utc::now().timestamp() + 3600,
        "email": "golfer@example.com",
    }))
}

pub fn sign(claims: Value) -> String {
    let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
    let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
    let signing_input = format!("{}.{}", header, payload);
    let mut mac = Hmac::<Sha256>::new_from_slice(SECRET.as_bytes()).expect("hmac key");
    mac.update(signing_input.as_bytes());
    format!(
        "{}.{}",
        signing_input,
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    )
}

pub fn course_body() -> Value {
    json!({ "name": "Old Course", "country": "GB", "holes": 18, "par": 72 })
}

pub fn tee_body(name: &str, rating: f64) -> Value {
    json!({ "name": name, "courseRating": rating, "slopeRating": 132, "par": 72, "yardage": 6800 })
}

pub fn error_code(body: &Value) -> &str {
    body["error"]["code"].as_str().unwrap_or_default()
}
