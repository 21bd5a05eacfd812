//! Session exchange client: trades credentials for a [`Session`].
//!
//! The exchange never touches storage. Callers decide what to do with the
//! session it returns, which keeps it testable with a fake [`Transport`].

use serde_json::{Value, json};
use tracing::{debug, instrument, warn};

use campusdesk_config::ApiConfig;
use campusdesk_models::{
    Credentials, ErrorBody, Identity, LoginResponseBody, RefreshResponseBody, Role, Session,
    UserPayload,
};

use crate::error::LoginError;
use crate::transport::{Transport, TransportError, TransportResponse};

const LOGIN_FAILED: &str = "Login failed";
const REFRESH_FAILED: &str = "Session refresh failed";

pub struct SessionExchange<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: Transport> SessionExchange<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// `POST {base}/auth/login`.
    ///
    /// # Errors
    ///
    /// - [`LoginError::InvalidCredentials`] for any non-2xx answer
    /// - [`LoginError::Unreachable`] when no response arrives in time or the
    ///   body is not JSON
    /// - [`LoginError::MalformedResponse`] when a 2xx body lacks a token or
    ///   the user, or names an unknown role
    #[instrument(skip(self, credentials), fields(email = %credentials.email, role = %credentials.role))]
    pub async fn login(&self, credentials: &Credentials) -> Result<Session, LoginError> {
        let body = json!({
            "email": credentials.email,
            "password": credentials.password,
            "role": credentials.role.as_str(),
        });

        let response = self.send(&self.config.login_url(), body).await?;
        if !response.is_success() {
            let message = server_message(&response, LOGIN_FAILED);
            debug!(status = response.status, %message, "Login rejected");
            return Err(LoginError::InvalidCredentials(message));
        }

        let payload: LoginResponseBody = parse_success_body(&response)?;
        let session = session_from(payload)?;
        debug!(role = %session.identity.role, "Login accepted");
        Ok(session)
    }

    /// `POST {base}/auth/refresh` with the session's refresh token.
    ///
    /// The identity is carried over unchanged. If the server does not rotate
    /// the refresh token, the current one is kept.
    #[instrument(skip(self, session), fields(email = %session.identity.email))]
    pub async fn refresh(&self, session: &Session) -> Result<Session, LoginError> {
        let body = json!({ "refreshToken": session.refresh_token });

        let response = self.send(&self.config.refresh_url(), body).await?;
        if !response.is_success() {
            return Err(LoginError::InvalidCredentials(server_message(
                &response,
                REFRESH_FAILED,
            )));
        }

        let payload: RefreshResponseBody = parse_success_body(&response)?;
        let access_token = payload
            .access_token
            .ok_or_else(|| LoginError::MalformedResponse("missing accessToken".to_string()))?;
        let refresh_token = payload
            .refresh_token
            .unwrap_or_else(|| session.refresh_token.clone());

        Ok(Session::new(
            access_token,
            refresh_token,
            session.identity.clone(),
        ))
    }

    async fn send(&self, url: &str, body: Value) -> Result<TransportResponse, LoginError> {
        match tokio::time::timeout(self.config.timeout, self.transport.post_json(url, body)).await
        {
            Ok(Ok(response)) => Ok(response),
            Ok(Err(e)) => {
                warn!(url, error = %e, "Authentication API unreachable");
                Err(LoginError::Unreachable(e.to_string()))
            }
            Err(_) => {
                warn!(url, timeout_ms = self.config.timeout.as_millis() as u64, "Authentication request timed out");
                Err(LoginError::Unreachable(TransportError::Timeout.to_string()))
            }
        }
    }
}

fn server_message(response: &TransportResponse, fallback: &str) -> String {
    serde_json::from_slice::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .unwrap_or_else(|| fallback.to_string())
}

/// Non-JSON counts as a broken exchange; JSON of the wrong shape as a
/// protocol error.
fn parse_success_body<B>(response: &TransportResponse) -> Result<B, LoginError>
where
    B: serde::de::DeserializeOwned,
{
    let value: Value = serde_json::from_slice(&response.body)
        .map_err(|e| LoginError::Unreachable(format!("response body is not JSON: {e}")))?;

    serde_json::from_value(value)
        .map_err(|e| LoginError::MalformedResponse(format!("unexpected response shape: {e}")))
}

fn session_from(payload: LoginResponseBody) -> Result<Session, LoginError> {
    let missing = |field: &str| LoginError::MalformedResponse(format!("missing {field}"));

    let access_token = payload.access_token.ok_or_else(|| missing("accessToken"))?;
    let refresh_token = payload.refresh_token.ok_or_else(|| missing("refreshToken"))?;
    let user = payload.user.ok_or_else(|| missing("user"))?;

    Ok(Session::new(access_token, refresh_token, identity_from(user)?))
}

fn identity_from(user: UserPayload) -> Result<Identity, LoginError> {
    let missing = |field: &str| LoginError::MalformedResponse(format!("missing user.{field}"));

    let name = user.name.ok_or_else(|| missing("name"))?;
    let email = user.email.ok_or_else(|| missing("email"))?;
    let raw_role = user.role.ok_or_else(|| missing("role"))?;
    let role = raw_role
        .parse::<Role>()
        .map_err(|e| LoginError::MalformedResponse(e.to_string()))?;

    Ok(Identity { name, email, role })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;
    use std::time::Duration;

    /// Replies with a fixed response and records every request.
    struct FakeTransport {
        reply: Result<TransportResponse, TransportError>,
        requests: Mutex<Vec<(String, Value)>>,
    }

    impl FakeTransport {
        fn replying(status: u16, body: Value) -> Self {
            Self {
                reply: Ok(TransportResponse::json(status, &body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn raw(status: u16, body: &str) -> Self {
            Self {
                reply: Ok(TransportResponse::new(status, body)),
                requests: Mutex::new(Vec::new()),
            }
        }

        fn failing(err: TransportError) -> Self {
            Self {
                reply: Err(err),
                requests: Mutex::new(Vec::new()),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn post_json(
            &self,
            url: &str,
            body: Value,
        ) -> Result<TransportResponse, TransportError> {
            self.requests.lock().unwrap().push((url.to_string(), body));
            self.reply.clone()
        }
    }

    struct HangingTransport;

    impl Transport for HangingTransport {
        async fn post_json(
            &self,
            _url: &str,
            _body: Value,
        ) -> Result<TransportResponse, TransportError> {
            std::future::pending().await
        }
    }

    fn exchange<T: Transport>(transport: T) -> SessionExchange<T> {
        SessionExchange::new(transport, ApiConfig::new("http://auth.test/api"))
    }

    fn credentials() -> Credentials {
        Credentials {
            role: Role::Student,
            email: "a@b.com".to_string(),
            password: "x".to_string(),
        }
    }

    fn success_body() -> Value {
        json!({
            "accessToken": "t1",
            "refreshToken": "t2",
            "user": {"name": "A", "email": "a@b.com", "role": "Student"}
        })
    }

    #[tokio::test]
    async fn test_login_success() {
        let exchange = exchange(FakeTransport::replying(200, success_body()));

        let session = exchange.login(&credentials()).await.unwrap();

        assert_eq!(session.access_token, "t1");
        assert_eq!(session.refresh_token, "t2");
        assert_eq!(session.identity.name, "A");
        assert_eq!(session.identity.role, Role::Student);
    }

    #[tokio::test]
    async fn test_login_sends_triple_to_login_url() {
        let exchange = exchange(FakeTransport::replying(200, success_body()));
        exchange.login(&credentials()).await.unwrap();

        let requests = exchange.transport.requests.lock().unwrap();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].0, "http://auth.test/api/auth/login");
        assert_eq!(
            requests[0].1,
            json!({"email": "a@b.com", "password": "x", "role": "Student"})
        );
    }

    #[tokio::test]
    async fn test_login_rejected_uses_server_message() {
        let exchange = exchange(FakeTransport::replying(
            401,
            json!({"message": "Invalid credentials"}),
        ));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert_eq!(
            err,
            LoginError::InvalidCredentials("Invalid credentials".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_rejected_without_message_uses_fallback() {
        let exchange = exchange(FakeTransport::raw(500, "<html>oops</html>"));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert_eq!(err, LoginError::InvalidCredentials("Login failed".to_string()));
    }

    #[tokio::test]
    async fn test_login_missing_tokens_is_malformed() {
        for field in ["accessToken", "refreshToken", "user"] {
            let mut body = success_body();
            body.as_object_mut().unwrap().remove(field);
            let exchange = exchange(FakeTransport::replying(200, body));

            let err = exchange.login(&credentials()).await.unwrap_err();
            assert!(
                matches!(err, LoginError::MalformedResponse(ref detail) if detail.contains(field)),
                "expected malformed response for missing {field}, got {err:?}"
            );
        }
    }

    #[tokio::test]
    async fn test_login_empty_token_is_malformed() {
        let mut body = success_body();
        body["accessToken"] = json!("");
        let exchange = exchange(FakeTransport::replying(200, body));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, LoginError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_login_unknown_role_is_malformed() {
        let mut body = success_body();
        body["user"]["role"] = json!("Parent");
        let exchange = exchange(FakeTransport::replying(200, body));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, LoginError::MalformedResponse(ref d) if d.contains("Parent")));
    }

    #[tokio::test]
    async fn test_login_user_without_name_is_malformed() {
        let mut body = success_body();
        body["user"].as_object_mut().unwrap().remove("name");
        let exchange = exchange(FakeTransport::replying(200, body));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert_eq!(
            err,
            LoginError::MalformedResponse("missing user.name".to_string())
        );
    }

    #[tokio::test]
    async fn test_login_wrong_field_type_is_malformed() {
        let mut body = success_body();
        body["accessToken"] = json!(42);
        let exchange = exchange(FakeTransport::replying(200, body));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, LoginError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn test_login_non_json_success_is_unreachable() {
        let exchange = exchange(FakeTransport::raw(200, "not json"));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, LoginError::Unreachable(_)));
    }

    #[tokio::test]
    async fn test_login_transport_failure_is_unreachable() {
        let exchange = exchange(FakeTransport::failing(TransportError::Connect(
            "connection refused".to_string(),
        )));

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert!(matches!(err, LoginError::Unreachable(ref d) if d.contains("connection refused")));
    }

    #[tokio::test]
    async fn test_login_times_out() {
        let exchange = SessionExchange::new(
            HangingTransport,
            ApiConfig::new("http://auth.test").with_timeout(Duration::from_millis(20)),
        );

        let err = exchange.login(&credentials()).await.unwrap_err();
        assert_eq!(err, LoginError::Unreachable("request timed out".to_string()));
    }

    #[tokio::test]
    async fn test_refresh_rotates_tokens_and_keeps_identity() {
        let exchange = exchange(FakeTransport::replying(
            200,
            json!({"accessToken": "t3", "refreshToken": "t4"}),
        ));
        let current = exchange_session();

        let refreshed = exchange.refresh(&current).await.unwrap();

        assert_eq!(refreshed.access_token, "t3");
        assert_eq!(refreshed.refresh_token, "t4");
        assert_eq!(refreshed.identity, current.identity);

        let requests = exchange.transport.requests.lock().unwrap();
        assert_eq!(requests[0].0, "http://auth.test/api/auth/refresh");
        assert_eq!(requests[0].1, json!({"refreshToken": "t2"}));
    }

    #[tokio::test]
    async fn test_refresh_keeps_refresh_token_when_not_rotated() {
        let exchange = exchange(FakeTransport::replying(200, json!({"accessToken": "t3"})));

        let refreshed = exchange.refresh(&exchange_session()).await.unwrap();
        assert_eq!(refreshed.refresh_token, "t2");
    }

    #[tokio::test]
    async fn test_refresh_rejected() {
        let exchange = exchange(FakeTransport::replying(401, json!({})));

        let err = exchange.refresh(&exchange_session()).await.unwrap_err();
        assert_eq!(
            err,
            LoginError::InvalidCredentials("Session refresh failed".to_string())
        );
    }

    fn exchange_session() -> Session {
        Session::new(
            "t1",
            "t2",
            Identity {
                name: "A".to_string(),
                email: "a@b.com".to_string(),
                role: Role::Student,
            },
        )
    }
}
