use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::Utc;
use hmac::{Hmac, Mac};
use serde::Deserialize;
use sha2::Sha256;
use storage::context::Caller;
use uuid::Uuid;

use crate::error::WebError;

type HmacSha256 = Hmac<Sha256>;

/// Puts the verified [`Caller`] into the request extensions, or answers 401.
pub async fn require_auth(
    State(sessions): State<SessionVerifier>,
    mut req: Request,
    next: Next,
) -> Result<Response, WebError> {
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or(WebError::Unauthorized("missing bearer token"))?;

    let caller = sessions.verify(token).map_err(|reason| {
        tracing::warn!(reason, "Rejected session token");
        WebError::Unauthorized(reason)
    })?;

    req.extensions_mut().insert(caller);
    Ok(next.run(req).await)
}

#[derive(Debug, Deserialize)]
struct Header {
    alg: String,
}

#[derive(Debug, Deserialize)]
struct Claims {
    sub: Uuid,
    exp: i64,
    email: Option<String>,
}

/// Verifies HS256 session tokens issued by the auth provider.
#[derive(Clone)]
pub struct SessionVerifier {
    secret: Arc<[u8]>,
}

impl SessionVerifier {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: Arc::from(secret.as_bytes()),
        }
    }

    pub fn verify(&self, token: &str) -> Result<Caller, &'static str> {
        let (signing_input, signature) = token.rsplit_once('.').ok_or("malformed token")?;
        let Some((header, payload)) = signing_input.split_once('.') else {
            return Err("malformed token");
        };
        if payload.contains('.') {
            return Err("malformed token");
        }

        let header: Header = decode_segment(header)?;
        if header.alg != "HS256" {
            return Err("unsupported algorithm");
        }

        let signature = URL_SAFE_NO_PAD
            .decode(signature)
            .map_err(|_| "malformed signature")?;
        let mut mac =
            HmacSha256::new_from_slice(&self.secret).map_err(|_| "invalid signing secret")?;
        mac.update(signing_input.as_bytes());
        mac.verify_slice(&signature).map_err(|_| "bad signature")?;

        let claims: Claims = decode_segment(payload)?;
        if claims.exp <= Utc::now().timestamp() {
            return Err("token expired");
        }

        let caller = Caller::new(claims.sub);
        Ok(match claims.email {
            Some(email) => caller.with_email(email),
            None => caller,
        })
    }
}

fn decode_segment<T: serde::de::DeserializeOwned>(segment: &str) -> Result<T, &'static str> {
    let bytes = URL_SAFE_NO_PAD
        .decode(segment)
        .map_err(|_| "malformed token")?;
    serde_json::from_slice(&bytes).map_err(|_| "malformed claims")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sign(secret: &str, claims: serde_json::Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(json!({ "alg": "HS256", "typ": "JWT" }).to_string());
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string());
        let signing_input = format!("{}.{}", header, payload);
        let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
        mac.update(signing_input.as_bytes());
        let signature = URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes());
        format!("{}.{}", signing_input, signature)
    }

    fn claims(user: Uuid, exp_offset: i64) -> serde_json::Value {
        json!({
            "sub": user,
            "exp": Utc::now().timestamp() + exp_offset,
            "email": "player@example.com",
        })
    }

    #[test]
    fn test_valid_token_yields_caller() {
        let user = Uuid::new_v4();
        let verifier = SessionVerifier::new("top-secret");
        let caller = verifier.verify(&sign("top-secret", claims(user, 600))).unwrap();

        assert_eq!(caller.user_id, user);
        assert_eq!(caller.email.as_deref(), Some("player@example.com"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let verifier = SessionVerifier::new("top-secret");
        let token = sign("guess", claims(Uuid::new_v4(), 600));
        assert_eq!(verifier.verify(&token), Err("bad signature"));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let verifier = SessionVerifier::new("top-secret");
        let token = sign("top-secret", claims(Uuid::new_v4(), -5));
        assert_eq!(verifier.verify(&token), Err("token expired"));
    }

    #[test]
    fn test_tampered_payload_is_rejected() {
        let verifier = SessionVerifier::new("top-secret");
        let token = sign("top-secret", claims(Uuid::new_v4(), 600));
        let mut parts: Vec<&str> = token.split('.').collect();
        let forged = URL_SAFE_NO_PAD.encode(claims(Uuid::new_v4(), 600).to_string());
        parts[1] = &forged;

        assert!(verifier.verify(&parts.join(".")).is_err());
        assert_eq!(verifier.verify("not-a-token"), Err("malformed token"));
    }
}
