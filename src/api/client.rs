use crate::api::error::ApiError;
use crate::api::models::{Account, AccountId, PlaybackState, SessionUser};
use crate::api::navigator::{BrowserNavigator, Navigator};
use crate::api::transport::{ApiRequest, AppTransport, RawResponse, Transport};
use crate::config::PanelConfig;
use dioxus::logger::tracing::{debug, warn};
use serde::de::DeserializeOwned;

/// The client the running app shares through context.
pub type PanelClient = ApiClient<AppTransport, BrowserNavigator>;

/// Typed wrapper over the backend's HTTP surface.
///
/// Every authenticated call goes through [`ApiClient::send`], which turns a 401
/// into a navigation to the login entry point.
#[derive(Debug, Clone)]
pub struct ApiClient<T: Transport, N: Navigator> {
    transport: T,
    navigator: N,
    login_url: String,
}

impl PanelClient {
    pub fn from_config(config: &PanelConfig) -> Self {
        Self::new(
            AppTransport::new(config.api_base_url.clone()),
            BrowserNavigator,
            config.backend_url(&config.login_path),
        )
    }
}

impl<T: Transport, N: Navigator> ApiClient<T, N> {
    pub fn new(transport: T, navigator: N, login_url: impl Into<String>) -> Self {
        Self {
            transport,
            navigator,
            login_url: login_url.into(),
        }
    }

    async fn send(&self, request: ApiRequest) -> Result<RawResponse, ApiError> {
        let method = request.method.clone();
        let path = request.path.clone();
        let response = self
            .transport
            .execute(request)
            .await
            .map_err(ApiError::Network)?;

        if response.status == 401 {
            warn!("{method} {path} answered 401, redirecting to login");
            self.navigator.navigate(&self.login_url);
            return Err(ApiError::Unauthenticated);
        }
        if !response.is_success() {
            debug!("{method} {path} failed with {}", response.status);
            return Err(ApiError::Status(response.status));
        }
        Ok(response)
    }

    async fn send_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R, ApiError> {
        let response = self.send(request).await?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn send_command(&self, request: ApiRequest) -> Result<(), ApiError> {
        self.send(request).await.map(|_| ())
    }

    /// Returns the signed-in user, or `None` on any failure. Never redirects.
    pub async fn check_session(&self) -> Option<SessionUser> {
        let response = match self.transport.execute(ApiRequest::get("/google/me")).await {
            Ok(response) => response,
            Err(err) => {
                debug!("session check failed: {err}");
                return None;
            }
        };
        if !response.is_success() {
            return None;
        }
        serde_json::from_str(&response.body).ok()
    }

    /// Ends the session and leaves for the login page whatever the backend says.
    pub async fn logout(&self) {
        if let Err(err) = self.transport.execute(ApiRequest::post("/google/logout")).await {
            warn!("logout request failed: {err}");
        }
        self.navigator.navigate(&self.login_url);
    }

    pub async fn list_accounts(&self) -> Result<Vec<Account>, ApiError> {
        self.send_json(ApiRequest::get("/auth/accounts")).await
    }

    pub async fn delete_account(&self, account_id: AccountId) -> Result<(), ApiError> {
        self.send_command(ApiRequest::delete(format!("/auth/accounts/{account_id}")))
            .await
    }

    /// Replaces the persisted order with `ordered_ids`.
    pub async fn reorder_accounts(&self, ordered_ids: &[AccountId]) -> Result<(), ApiError> {
        self.send_command(
            ApiRequest::put("/auth/accounts/reorder").json(serde_json::json!(ordered_ids)),
        )
        .await
    }

    pub async fn playback_state(&self, account_id: AccountId) -> Result<PlaybackState, ApiError> {
        self.send_json(ApiRequest::get(format!("/playback/{account_id}/state")))
            .await
    }

    pub async fn play(&self, account_id: AccountId) -> Result<(), ApiError> {
        self.send_command(ApiRequest::put(format!("/playback/{account_id}/play")))
            .await
    }

    pub async fn pause(&self, account_id: AccountId) -> Result<(), ApiError> {
        self.send_command(ApiRequest::put(format!("/playback/{account_id}/pause")))
            .await
    }

    pub async fn set_volume(&self, account_id: AccountId, level: u8) -> Result<(), ApiError> {
        self.send_command(
            ApiRequest::put(format!("/playback/{account_id}/volume")).query("level", level.min(100)),
        )
        .await
    }

    pub async fn seek(&self, account_id: AccountId, position_ms: u64) -> Result<(), ApiError> {
        self.send_command(
            ApiRequest::put(format!("/playback/{account_id}/seek"))
                .query("position_ms", position_ms),
        )
        .await
    }

    pub async fn next_track(&self, account_id: AccountId) -> Result<(), ApiError> {
        self.send_command(ApiRequest::post(format!("/playback/{account_id}/next")))
            .await
    }

    pub async fn previous_track(&self, account_id: AccountId) -> Result<(), ApiError> {
        self.send_command(ApiRequest::post(format!("/playback/{account_id}/previous")))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::{RecordingNavigator, ScriptedTransport};
    use reqwest::Method;

    const LOGIN: &str = "http://panel.test/google/login";

    fn client(
        transport: &ScriptedTransport,
        navigator: &RecordingNavigator,
    ) -> ApiClient<ScriptedTransport, RecordingNavigator> {
        ApiClient::new(transport.clone(), navigator.clone(), LOGIN)
    }

    #[tokio::test]
    async fn check_session_returns_user() {
        let transport = ScriptedTransport::new();
        transport.respond(200, r#"{"email":"a@b.com"}"#);
        let navigator = RecordingNavigator::default();

        let user = client(&transport, &navigator).check_session().await;
        assert_eq!(
            user,
            Some(SessionUser {
                email: "a@b.com".to_string()
            })
        );
        assert_eq!(transport.requests()[0].path, "/google/me");
    }

    #[tokio::test]
    async fn check_session_swallows_every_failure() {
        let transport = ScriptedTransport::new();
        transport.respond(401, "");
        transport.fail("connection refused");
        transport.respond(200, "not json");
        let navigator = RecordingNavigator::default();
        let client = client(&transport, &navigator);

        assert_eq!(client.check_session().await, None);
        assert_eq!(client.check_session().await, None);
        assert_eq!(client.check_session().await, None);
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn unauthorized_navigates_once_per_failing_call() {
        let transport = ScriptedTransport::new();
        transport.respond(401, "");
        transport.respond(401, "");
        let navigator = RecordingNavigator::default();
        let client = client(&transport, &navigator);

        let err = client.list_accounts().await.unwrap_err();
        assert!(err.is_unauthenticated());
        assert_eq!(err.to_string(), "Not authenticated");
        assert_eq!(navigator.visits(), vec![LOGIN.to_string()]);

        let err = client.play(7).await.unwrap_err();
        assert_eq!(err, ApiError::Unauthenticated);
        assert_eq!(navigator.visits().len(), 2);
    }

    #[tokio::test]
    async fn every_authenticated_endpoint_redirects_on_401() {
        let transport = ScriptedTransport::new();
        let navigator = RecordingNavigator::default();
        let client = client(&transport, &navigator);

        for _ in 0..10 {
            transport.respond(401, "");
        }
        assert!(client.list_accounts().await.is_err());
        assert!(client.delete_account(1).await.is_err());
        assert!(client.reorder_accounts(&[1, 2]).await.is_err());
        assert!(client.playback_state(1).await.is_err());
        assert!(client.play(1).await.is_err());
        assert!(client.pause(1).await.is_err());
        assert!(client.set_volume(1, 50).await.is_err());
        assert!(client.seek(1, 0).await.is_err());
        assert!(client.next_track(1).await.is_err());
        assert!(client.previous_track(1).await.is_err());

        assert_eq!(navigator.visits().len(), 10);
    }

    #[tokio::test]
    async fn other_statuses_carry_the_code() {
        let transport = ScriptedTransport::new();
        transport.respond(502, "bad gateway");
        let navigator = RecordingNavigator::default();

        let err = client(&transport, &navigator)
            .playback_state(4)
            .await
            .unwrap_err();
        assert_eq!(err, ApiError::Status(502));
        assert_eq!(err.to_string(), "API error: 502");
        assert!(navigator.visits().is_empty());
    }

    #[tokio::test]
    async fn transport_failure_is_a_network_error() {
        let transport = ScriptedTransport::new();
        transport.fail("dns failure");
        let navigator = RecordingNavigator::default();

        let err = client(&transport, &navigator).pause(2).await.unwrap_err();
        assert_eq!(err, ApiError::Network("dns failure".to_string()));
    }

    #[tokio::test]
    async fn malformed_body_is_a_decode_error() {
        let transport = ScriptedTransport::new();
        transport.respond(200, "[{\"id\": \"x\"}]");
        let navigator = RecordingNavigator::default();

        let err = client(&transport, &navigator)
            .list_accounts()
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn operations_use_the_documented_routes() {
        let transport = ScriptedTransport::new();
        let navigator = RecordingNavigator::default();
        let client = client(&transport, &navigator);
        for _ in 0..8 {
            transport.respond(200, r#"{"ok":true}"#);
        }

        client.delete_account(3).await.unwrap();
        client.reorder_accounts(&[3, 1, 2]).await.unwrap();
        client.play(3).await.unwrap();
        client.pause(3).await.unwrap();
        client.set_volume(3, 140).await.unwrap();
        client.seek(3, 91_000).await.unwrap();
        client.next_track(3).await.unwrap();
        client.previous_track(3).await.unwrap();

        let seen: Vec<(Method, String)> = transport
            .requests()
            .into_iter()
            .map(|r| (r.method, r.path))
            .collect();
        assert_eq!(
            seen,
            vec![
                (Method::DELETE, "/auth/accounts/3".to_string()),
                (Method::PUT, "/auth/accounts/reorder".to_string()),
                (Method::PUT, "/playback/3/play".to_string()),
                (Method::PUT, "/playback/3/pause".to_string()),
                (Method::PUT, "/playback/3/volume".to_string()),
                (Method::PUT, "/playback/3/seek".to_string()),
                (Method::POST, "/playback/3/next".to_string()),
                (Method::POST, "/playback/3/previous".to_string()),
            ]
        );

        let requests = transport.requests();
        assert_eq!(requests[1].body, Some(serde_json::json!([3, 1, 2])));
        assert_eq!(requests[4].query, vec![("level", "100".to_string())]);
        assert_eq!(requests[5].query, vec![("position_ms", "91000".to_string())]);
    }

    #[tokio::test]
    async fn logout_navigates_even_when_the_call_fails() {
        let transport = ScriptedTransport::new();
        transport.fail("offline");
        let navigator = RecordingNavigator::default();

        client(&transport, &navigator).logout().await;
        assert_eq!(transport.requests()[0].method, Method::POST);
        assert_eq!(transport.requests()[0].path, "/google/logout");
        assert_eq!(navigator.visits(), vec![LOGIN.to_string()]);
    }
}
