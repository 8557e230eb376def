//! Network seam between [`ApiClient`](super::ApiClient) and the backend.

use once_cell::sync::Lazy;
use reqwest::Method;
#[cfg(not(target_arch = "wasm32"))]
use serde::Deserialize;
use std::future::Future;

static HTTP_CLIENT: Lazy<reqwest::Client> = Lazy::new(reqwest::Client::new);

/// A request relative to the backend origin.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn query(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }
}

/// Status and body of a completed exchange. Interpreting the status is the
/// client's job, not the transport's.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    pub body: String,
}

impl RawResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

pub trait Transport: Clone + 'static {
    /// Sends one request. `Err` means the exchange never produced a response.
    fn execute(&self, request: ApiRequest) -> impl Future<Output = Result<RawResponse, String>>;
}

/// `reqwest`-backed transport rooted at the backend origin.
#[derive(Debug, Clone)]
pub struct HttpTransport {
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url_for(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Transport for HttpTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let mut builder = HTTP_CLIENT.request(request.method, self.url_for(&request.path));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = request.body.as_ref() {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| e.to_string())?;
        let status = response.status().as_u16();
        let body = response.text().await.map_err(|e| e.to_string())?;
        Ok(RawResponse { status, body })
    }
}

/// Transport the running app uses. The desktop build shares the webview's
/// cookie jar, where the sign-in happened, by fetching from inside it.
#[cfg(any(target_arch = "wasm32", not(feature = "desktop")))]
pub type AppTransport = HttpTransport;
#[cfg(all(not(target_arch = "wasm32"), feature = "desktop"))]
pub type AppTransport = WebviewTransport;

/// Runs each request as a `fetch` inside the desktop webview, with
/// `credentials: "include"`, so the backend's session cookie goes along.
#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
#[derive(Debug, Clone)]
pub struct WebviewTransport {
    http: HttpTransport,
}

/// What the fetch script sends back.
#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum FetchReply {
    Response { status: u16, body: String },
    Failed { error: String },
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
impl FetchReply {
    fn into_outcome(self) -> Result<RawResponse, String> {
        match self {
            Self::Response { status, body } => Ok(RawResponse { status, body }),
            Self::Failed { error } => Err(error),
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
impl WebviewTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: HttpTransport::new(base_url),
        }
    }

    /// Script that performs `request` and returns its status and body.
    pub fn fetch_script(&self, request: &ApiRequest) -> Result<String, String> {
        let base = self.http.url_for(&request.path);
        let url = if request.query.is_empty() {
            reqwest::Url::parse(&base)
        } else {
            reqwest::Url::parse_with_params(&base, &request.query)
        }
        .map_err(|e| e.to_string())?;
        let init = serde_json::json!({
            "url": url.as_str(),
            "method": request.method.as_str(),
            "body": request.body.as_ref().map(|b| b.to_string()),
        });
        Ok(format!(
            r#"const req = {init};
const headers = req.body === null ? {{}} : {{ "Content-Type": "application/json" }};
return fetch(req.url, {{ method: req.method, credentials: "include", headers, body: req.body ?? undefined }})
  .then(async (res) => ({{ status: res.status, body: await res.text() }}))
  .catch((err) => ({{ error: String(err) }}));"#
        ))
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl Transport for WebviewTransport {
    async fn execute(&self, request: ApiRequest) -> Result<RawResponse, String> {
        let script = self.fetch_script(&request)?;
        let reply = dioxus::document::eval(&script)
            .join::<FetchReply>()
            .await
            .map_err(|e| e.to_string())?;
        reply.into_outcome()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let transport = HttpTransport::new("http://localhost:8000/");
        assert_eq!(
            transport.url_for("/auth/accounts"),
            "http://localhost:8000/auth/accounts"
        );
    }

    #[test]
    fn builder_collects_query_and_body() {
        let request = ApiRequest::put("/playback/1/seek").query("position_ms", 42u64);
        assert_eq!(request.method, Method::PUT);
        assert_eq!(request.query, vec![("position_ms", "42".to_string())]);
        assert!(request.body.is_none());

        let request = ApiRequest::put("/auth/accounts/reorder").json(serde_json::json!([3, 1]));
        assert_eq!(request.body, Some(serde_json::json!([3, 1])));
    }

    #[test]
    fn webview_fetch_sends_cookies_to_the_full_url() {
        let transport = WebviewTransport::new("http://localhost:8000");
        let script = transport
            .fetch_script(&ApiRequest::put("/playback/2/seek").query("position_ms", 1500u64))
            .unwrap();
        assert!(script.contains(r#"credentials: "include""#));
        assert!(script.contains(r#""url":"http://localhost:8000/playback/2/seek?position_ms=1500""#));
        assert!(script.contains(r#""method":"PUT""#));
        assert!(script.contains(r#""body":null"#));

        let script = transport
            .fetch_script(&ApiRequest::put("/auth/accounts/reorder").json(serde_json::json!([2, 1])))
            .unwrap();
        assert!(script.contains(r#""url":"http://localhost:8000/auth/accounts/reorder""#));
        assert!(script.contains(r#""body":"[2,1]""#));
    }

    #[test]
    fn webview_replies_map_to_outcomes() {
        let ok: FetchReply = serde_json::from_str(r#"{"status": 401, "body": ""}"#).unwrap();
        assert_eq!(
            ok.into_outcome(),
            Ok(RawResponse {
                status: 401,
                body: String::new()
            })
        );

        let failed: FetchReply =
            serde_json::from_str(r#"{"error": "TypeError: Failed to fetch"}"#).unwrap();
        assert_eq!(
            failed.into_outcome(),
            Err("TypeError: Failed to fetch".to_string())
        );
    }
}
