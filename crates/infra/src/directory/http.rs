//! HTTP client for the user-directory service.

use std::time::{Duration, Instant};

use serde::Serialize;

use passgate_auth::{
    CreateUserRequest, DirectoryError, DirectoryResponse, UserDirectory, ValidateCredentialsRequest,
};

use super::{CREATE_USER_PATH, VALIDATE_CREDENTIALS_PATH};

/// Connection settings for the directory service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectoryConfig {
    /// Base URL, e.g. `http://user-service:8081`.
    pub base_url: String,

    /// Upper bound for a whole request/response round trip.
    pub timeout: Duration,
}

/// Directory adapter over HTTP/JSON.
///
/// Returns every response that arrives, whatever its status; only a missing
/// response (connect failure, timeout, broken body) is an error. No retries.
#[derive(Debug, Clone)]
pub struct HttpUserDirectory {
    client: reqwest::Client,
    create_url: String,
    validate_url: String,
}

impl HttpUserDirectory {
    pub fn new(config: &DirectoryConfig) -> Result<Self, DirectoryError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DirectoryError::Transport(format!("failed to build http client: {e}")))?;

        let base = config.base_url.trim_end_matches('/');
        Ok(Self {
            client,
            create_url: format!("{base}{CREATE_USER_PATH}"),
            validate_url: format!("{base}{VALIDATE_CREDENTIALS_PATH}"),
        })
    }

    async fn post_json<T>(&self, url: &str, payload: &T) -> Result<DirectoryResponse, DirectoryError>
    where
        T: Serialize + Sync + ?Sized,
    {
        let started = Instant::now();

        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        tracing::debug!(
            %url,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "directory call completed"
        );

        Ok(DirectoryResponse::new(status.as_u16(), status.to_string(), Some(body)))
    }
}

fn transport_error(err: reqwest::Error) -> DirectoryError {
    if err.is_timeout() {
        DirectoryError::Timeout
    } else {
        DirectoryError::Transport(err.to_string())
    }
}

#[async_trait::async_trait]
impl UserDirectory for HttpUserDirectory {
    async fn create_user(
        &self,
        request: &CreateUserRequest,
    ) -> Result<DirectoryResponse, DirectoryError> {
        self.post_json(&self.create_url, request).await
    }

    async fn validate_credentials(
        &self,
        request: &ValidateCredentialsRequest,
    ) -> Result<DirectoryResponse, DirectoryError> {
        self.post_json(&self.validate_url, request).await
    }
}

#[cfg(test)]
mod tests {
    use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
    use serde_json::{Value, json};

    use super::*;

    async fn stub_create(Json(body): Json<Value>) -> impl IntoResponse {
        match body["username"].as_str() {
            Some("taken") => (StatusCode::CONFLICT, String::new()),
            Some("broken") => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "db offline" }).to_string(),
            ),
            _ => (
                StatusCode::CREATED,
                json!({
                    "id": 5,
                    "username": body["username"],
                    "email": body["email"],
                    "role": body["role"],
                    "pendingApproval": false
                })
                .to_string(),
            ),
        }
    }

    async fn stub_validate(Json(body): Json<Value>) -> impl IntoResponse {
        if body["username"] == "slow" {
            tokio::time::sleep(Duration::from_secs(5)).await;
        }
        if body["password"] == "secret" {
            (StatusCode::OK, json!({ "id": 5, "username": body["username"], "role": "MEMBER" }).to_string())
        } else {
            (StatusCode::UNAUTHORIZED, json!({ "message": "bad password" }).to_string())
        }
    }

    async fn spawn_stub() -> (String, tokio::task::JoinHandle<()>) {
        let app = Router::new()
            .route(CREATE_USER_PATH, post(stub_create))
            .route(VALIDATE_CREDENTIALS_PATH, post(stub_validate));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/"), handle)
    }

    fn client(base_url: &str, timeout: Duration) -> HttpUserDirectory {
        HttpUserDirectory::new(&DirectoryConfig {
            base_url: base_url.to_string(),
            timeout,
        })
        .unwrap()
    }

    fn create(username: &str) -> CreateUserRequest {
        CreateUserRequest {
            username: username.into(),
            email: format!("{username}@example.com"),
            password: "pw".into(),
            role: "MEMBER".into(),
        }
    }

    fn validate(username: &str, password: &str) -> ValidateCredentialsRequest {
        ValidateCredentialsRequest {
            username: username.into(),
            password: password.into(),
        }
    }

    #[tokio::test]
    async fn surfaces_status_and_body() {
        let (base, handle) = spawn_stub().await;
        let dir = client(&base, Duration::from_secs(2));

        let created = dir.create_user(&create("alice")).await.unwrap();
        assert_eq!(created.status, 201);
        assert_eq!(created.status_line, "201 Created");
        let body: Value = serde_json::from_str(created.body().unwrap()).unwrap();
        assert_eq!(body["username"], "alice");

        let conflict = dir.create_user(&create("taken")).await.unwrap();
        assert_eq!(conflict.status, 409);
        assert_eq!(conflict.status_line, "409 Conflict");
        assert!(conflict.body().is_none());

        let failed = dir.create_user(&create("broken")).await.unwrap();
        assert_eq!(failed.status, 500);
        assert!(failed.body().unwrap().contains("db offline"));

        let ok = dir.validate_credentials(&validate("alice", "secret")).await.unwrap();
        assert_eq!(ok.status, 200);

        let denied = dir.validate_credentials(&validate("alice", "nope")).await.unwrap();
        assert_eq!(denied.status, 401);
        assert!(denied.body().unwrap().contains("bad password"));

        handle.abort();
    }

    #[tokio::test]
    async fn slow_directory_is_a_timeout() {
        let (base, handle) = spawn_stub().await;
        let dir = client(&base, Duration::from_millis(100));

        let err = dir
            .validate_credentials(&validate("slow", "secret"))
            .await
            .unwrap_err();
        assert_eq!(err, DirectoryError::Timeout);

        handle.abort();
    }

    #[tokio::test]
    async fn unreachable_directory_is_a_transport_error() {
        // Reserve a port, then free it so nothing is listening there.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let dir = client(&format!("http://{addr}"), Duration::from_secs(2));
        let err = dir.create_user(&create("alice")).await.unwrap_err();
        assert!(matches!(err, DirectoryError::Transport(_)));
    }
}
