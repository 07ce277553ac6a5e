//! Alerts backend HTTP client.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, StatusCode, header};
use tracing::{debug, warn};

use super::dto::{ErrorResponse, UserResponse};
use crate::application::services::SessionStore;
use crate::domain::entities::{Alert, NewAlert, SessionToken, User};
use crate::domain::errors::{ApiError, AuthError};
use crate::domain::ports::{AlertApiPort, AuthPort};

/// Default backend location.
pub const DEFAULT_API_BASE: &str = "https://api.coinalert.app/v1";
const USER_AGENT: &str = concat!("coinalert/", env!("CARGO_PKG_VERSION"));
const RETRY_AFTER_FALLBACK_MS: u64 = 5000;

/// HTTP adapter for both the auth and the alerts ports.
///
/// Alert calls authenticate with whatever token the session store holds.
pub struct HttpApiClient {
    client: Client,
    base_url: String,
    session: Arc<SessionStore>,
}

impl HttpApiClient {
    /// Creates client for `base_url`.
    ///
    /// # Errors
    /// Returns error if HTTP client creation fails.
    pub fn new(base_url: impl Into<String>, session: Arc<SessionStore>) -> Result<Self, ApiError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            session,
        })
    }

    /// Returns the backend base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn authorized(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        let session = self.session.current();
        let token = session.token().ok_or(ApiError::Unauthorized)?;
        Ok(self
            .client
            .request(method, self.url(path))
            .bearer_auth(token.as_str()))
    }

    async fn send(&self, request: RequestBuilder) -> Result<reqwest::Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request to alerts API failed");
            transport_error(&e)
        })?;

        let status = response.status();
        if status.is_success() {
            Ok(response)
        } else {
            Err(error_from_response(status, response).await)
        }
    }

    async fn send_empty(&self, method: Method, path: &str) -> Result<(), ApiError> {
        debug!(%method, path, "Calling alerts API");
        let request = self.authorized(method, path)?;
        self.send(request).await.map(|_| ())
    }
}

fn transport_error(e: &reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::network("request timed out")
    } else if e.is_connect() {
        ApiError::network("failed to connect to the alerts API")
    } else {
        ApiError::network(e.to_string())
    }
}

fn retry_after_ms(response: &reqwest::Response) -> u64 {
    response
        .headers()
        .get(header::RETRY_AFTER)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.trim().parse::<u64>().ok())
        .map_or(RETRY_AFTER_FALLBACK_MS, |secs| secs.saturating_mul(1000))
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> ApiError {
    let retry_after = retry_after_ms(&response);
    let message = match response.json::<ErrorResponse>().await {
        Ok(error) => error.message,
        Err(_) => format!("HTTP {status}"),
    };
    map_status(status, message, retry_after)
}

fn map_status(status: StatusCode, message: String, retry_after_ms: u64) -> ApiError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => ApiError::Unauthorized,
        StatusCode::TOO_MANY_REQUESTS => ApiError::RateLimited { retry_after_ms },
        StatusCode::BAD_REQUEST
        | StatusCode::NOT_FOUND
        | StatusCode::CONFLICT
        | StatusCode::UNPROCESSABLE_ENTITY => ApiError::Rejected { message },
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => {
            ApiError::network("alerts API is temporarily unavailable")
        }
        _ => ApiError::unexpected(format!("unexpected response: {status} - {message}")),
    }
}

fn auth_error(error: ApiError) -> AuthError {
    match error {
        ApiError::Unauthorized => AuthError::rejected("invalid or expired token"),
        ApiError::RateLimited { retry_after_ms } => AuthError::RateLimited { retry_after_ms },
        ApiError::Network { message } => AuthError::network(message),
        ApiError::Rejected { message } | ApiError::Unexpected { message } => {
            AuthError::unexpected(message)
        }
    }
}

#[async_trait]
impl AuthPort for HttpApiClient {
    async fn validate_token(&self, token: &SessionToken) -> Result<User, AuthError> {
        debug!("Validating token against alerts API");

        let request = self
            .client
            .get(self.url("/auth/me"))
            .bearer_auth(token.as_str());
        let response = self.send(request).await.map_err(auth_error)?;

        let user: UserResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse user response");
            AuthError::unexpected(format!("failed to parse response: {e}"))
        })?;

        debug!(user_id = %user.id, username = %user.username, "Token validated successfully");
        Ok(User::new(user.id, user.username, user.first_name))
    }
}

#[async_trait]
impl AlertApiPort for HttpApiClient {
    async fn create_alert(&self, alert: &NewAlert) -> Result<Alert, ApiError> {
        debug!(symbol = %alert.symbol, request_id = %alert.request_id, "Creating alert");

        let request = self
            .authorized(Method::POST, "/alerts")?
            .header("Idempotency-Key", alert.request_id.to_string())
            .json(alert);
        let response = self.send(request).await?;

        response.json::<Alert>().await.map_err(|e| {
            warn!(error = %e, "Failed to parse alert response");
            ApiError::unexpected(format!("failed to parse response: {e}"))
        })
    }

    async fn clear_watchlist(&self) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, "/watchlist").await
    }

    async fn delete_all_alerts(&self) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, "/alerts").await
    }

    async fn clear_history(&self) -> Result<(), ApiError> {
        self.send_empty(Method::DELETE, "/history").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    fn client() -> HttpApiClient {
        HttpApiClient::new("http://localhost:9/v1/", Arc::new(SessionStore::new())).unwrap()
    }

    #[test]
    fn test_base_url_is_normalized() {
        let client = client();
        assert_eq!(client.base_url(), "http://localhost:9/v1");
        assert_eq!(client.url("/alerts"), "http://localhost:9/v1/alerts");
    }

    #[tokio::test]
    async fn test_alert_calls_require_session() {
        let client = client();
        assert_eq!(client.clear_history().await, Err(ApiError::Unauthorized));
    }

    #[test_case(StatusCode::UNAUTHORIZED, ApiError::Unauthorized ; "unauthorized")]
    #[test_case(StatusCode::TOO_MANY_REQUESTS, ApiError::RateLimited { retry_after_ms: 3000 } ; "rate_limited")]
    #[test_case(StatusCode::UNPROCESSABLE_ENTITY, ApiError::rejected("bad") ; "rejected")]
    #[test_case(StatusCode::SERVICE_UNAVAILABLE, ApiError::network("alerts API is temporarily unavailable") ; "unavailable")]
    fn test_status_mapping(status: StatusCode, expected: ApiError) {
        assert_eq!(map_status(status, "bad".to_string(), 3000), expected);
    }

    #[test]
    fn test_unauthorized_becomes_rejection() {
        assert!(auth_error(ApiError::Unauthorized).is_rejection());
        assert!(auth_error(ApiError::network("down")).is_network_error());
    }
}
