//! HTTP client for the external authentication service
//!
//! User identity is owned by a separate service; before an order is
//! written, the referenced user id must be verified against it. A single
//! bounded GET decides the outcome; there are no retries, one failed
//! attempt is final.

use anyhow::Result;
use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, warn};
use uuid::Uuid;

/// Timeout applied to every request towards the authentication service
const AUTH_REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// Outcome of a user-existence check
///
/// The order service treats every non-`Verified` outcome the same way,
/// but keeping the variants apart lets callers log the actual cause
/// (a revoked token is not a missing user).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCheck {
    /// The auth service answered 200 for this user id
    Verified,
    /// The auth service answered 404
    NotFound,
    /// The auth service rejected the bearer token (401/403)
    Unauthorized,
    /// Network failure, timeout, or an unexpected status
    Unreachable,
}

impl UserCheck {
    pub fn is_verified(&self) -> bool {
        matches!(self, UserCheck::Verified)
    }
}

/// User record as returned by the authentication service
#[derive(Debug, Clone, Deserialize)]
pub struct AuthUserRecord {
    pub id: Uuid,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
}

/// Client for the authentication service's user-lookup endpoint
#[derive(Clone)]
pub struct AuthServiceClient {
    http: reqwest::Client,
    base_url: String,
}

impl AuthServiceClient {
    /// Create a new client for the given auth service base URL
    pub fn new(base_url: String) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(AUTH_REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http, base_url })
    }

    fn user_url(&self, user_id: &str) -> String {
        format!("{}/api/auth/users/{}", self.base_url, user_id)
    }

    /// Check that a user exists in the authentication service
    ///
    /// Issues `GET {base}/api/auth/users/{id}` with the bearer token
    /// attached and reduces the response to a [`UserCheck`].
    pub async fn check_user(&self, user_id: &str, token: &str) -> UserCheck {
        let url = self.user_url(user_id);
        info!("Validating user {} against auth service", user_id);

        match self.http.get(&url).bearer_auth(token).send().await {
            Ok(response) => match response.status() {
                StatusCode::OK => UserCheck::Verified,
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                    warn!("Auth service rejected token while validating user {}", user_id);
                    UserCheck::Unauthorized
                }
                StatusCode::NOT_FOUND => UserCheck::NotFound,
                status => {
                    warn!(
                        "Unexpected auth service status {} for user {}",
                        status, user_id
                    );
                    UserCheck::Unreachable
                }
            },
            Err(e) => {
                warn!("Auth service unreachable while validating user {}: {}", user_id, e);
                UserCheck::Unreachable
            }
        }
    }

    /// Fetch the full user record, best effort
    ///
    /// Any failure, whatever its cause, collapses to `None`.
    pub async fn fetch_user(&self, user_id: &str, token: &str) -> Option<AuthUserRecord> {
        let url = self.user_url(user_id);

        let response = self.http.get(&url).bearer_auth(token).send().await.ok()?;
        if response.status() != StatusCode::OK {
            return None;
        }

        response.json::<AuthUserRecord>().await.ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Json, Router,
        extract::Path,
        http::{HeaderMap, StatusCode},
        routing::get,
    };
    use serde_json::json;

    /// Serve a stub auth service on an ephemeral port, returning its base URL
    async fn spawn_stub(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("stub local addr");
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("serve stub");
        });
        format!("http://{addr}")
    }

    fn client_for(base_url: String) -> AuthServiceClient {
        AuthServiceClient::new(base_url).expect("build auth client")
    }

    #[tokio::test]
    async fn verified_when_auth_service_answers_ok() {
        let app = Router::new().route(
            "/api/auth/users/:id",
            get(|Path(id): Path<Uuid>| async move {
                Json(json!({"id": id, "username": "runner", "email": "runner@example.com"}))
            }),
        );
        let client = client_for(spawn_stub(app).await);

        let user_id = Uuid::new_v4().to_string();
        let outcome = client.check_user(&user_id, "token-1").await;
        assert_eq!(outcome, UserCheck::Verified);
        assert!(outcome.is_verified());
    }

    #[tokio::test]
    async fn not_found_when_auth_service_answers_404() {
        let app = Router::new().route(
            "/api/auth/users/:id",
            get(|| async { StatusCode::NOT_FOUND }),
        );
        let client = client_for(spawn_stub(app).await);

        let outcome = client.check_user("missing-user", "token-1").await;
        assert_eq!(outcome, UserCheck::NotFound);
    }

    #[tokio::test]
    async fn unauthorized_when_token_is_rejected() {
        let app = Router::new().route(
            "/api/auth/users/:id",
            get(|| async { StatusCode::UNAUTHORIZED }),
        );
        let client = client_for(spawn_stub(app).await);

        let outcome = client.check_user("some-user", "expired-token").await;
        assert_eq!(outcome, UserCheck::Unauthorized);
    }

    #[tokio::test]
    async fn unreachable_when_nothing_listens() {
        // Bind then drop a listener so the port is known to be closed
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}"));
        let outcome = client.check_user("any-user", "token-1").await;
        assert_eq!(outcome, UserCheck::Unreachable);
    }

    #[tokio::test]
    async fn bearer_token_is_forwarded() {
        let app = Router::new().route(
            "/api/auth/users/:id",
            get(|headers: HeaderMap, Path(id): Path<Uuid>| async move {
                let authorization = headers
                    .get("authorization")
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or_default();
                if authorization == "Bearer secret-token" {
                    Ok(Json(json!({"id": id})))
                } else {
                    Err(StatusCode::UNAUTHORIZED)
                }
            }),
        );
        let client = client_for(spawn_stub(app).await);
        let user_id = Uuid::new_v4().to_string();

        let outcome = client.check_user(&user_id, "secret-token").await;
        assert_eq!(outcome, UserCheck::Verified);

        let outcome = client.check_user(&user_id, "wrong-token").await;
        assert_eq!(outcome, UserCheck::Unauthorized);
    }

    #[tokio::test]
    async fn fetch_user_returns_record_on_ok_and_none_otherwise() {
        let known = Uuid::new_v4();
        let app = Router::new().route(
            "/api/auth/users/:id",
            get(move |Path(id): Path<Uuid>| async move {
                if id == known {
                    Ok(Json(json!({"id": id, "email": "runner@example.com"})))
                } else {
                    Err(StatusCode::NOT_FOUND)
                }
            }),
        );
        let client = client_for(spawn_stub(app).await);

        let record = client
            .fetch_user(&known.to_string(), "token-1")
            .await
            .expect("known user should resolve");
        assert_eq!(record.id, known);
        assert_eq!(record.email.as_deref(), Some("runner@example.com"));
        assert_eq!(record.username, None);

        let missing = client.fetch_user(&Uuid::new_v4().to_string(), "token-1").await;
        assert!(missing.is_none());
    }
}
