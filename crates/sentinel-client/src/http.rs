//! JSON-RPC provider over HTTP.

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use sentinel_core::ProviderError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};
use url::Url;

use crate::provider::WalletProvider;

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Provider that forwards requests to a node's JSON-RPC endpoint.
///
/// The node signs with its own unlocked accounts, so there is no approval
/// prompt: `eth_requestAccounts` is answered with `eth_accounts`.
#[derive(Clone)]
pub struct HttpProvider {
    inner: Arc<ProviderInner>,
}

struct ProviderInner {
    http: HttpClient,
    url: Url,
    timeout: Duration,
    next_id: AtomicU64,
}

#[derive(Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: Value,
}

#[derive(Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

#[derive(Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
    #[serde(default)]
    data: Option<Value>,
}

impl HttpProvider {
    /// Create a provider for `url` using default settings
    pub fn new(url: impl Into<String>) -> Result<Self, ProviderError> {
        HttpProviderBuilder::new(url).build()
    }

    /// Create a builder for custom configuration
    #[must_use]
    pub fn builder(url: impl Into<String>) -> HttpProviderBuilder {
        HttpProviderBuilder::new(url)
    }

    /// Endpoint this provider talks to
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    fn map_transport(&self, err: &reqwest::Error) -> ProviderError {
        if err.is_timeout() {
            ProviderError::Timeout(self.inner.timeout)
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}

#[async_trait]
impl WalletProvider for HttpProvider {
    fn name(&self) -> &str {
        "http"
    }

    async fn request(&self, method: &str, params: Value) -> Result<Value, ProviderError> {
        let method = match method {
            "eth_requestAccounts" => "eth_accounts",
            other => other,
        };
        let id = self.inner.next_id.fetch_add(1, Ordering::Relaxed);
        let body = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        debug!(url = %self.inner.url, method, id, "JSON-RPC request");

        let response = self
            .inner
            .http
            .post(self.inner.url.clone())
            .json(&body)
            .send()
            .await
            .map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        let text = response.text().await.map_err(|e| self.map_transport(&e))?;

        if !status.is_success() {
            warn!(status = status.as_u16(), method, "JSON-RPC endpoint returned an error status");
            return Err(ProviderError::Http(format!("HTTP {}: {text}", status.as_u16())));
        }

        let reply: JsonRpcResponse = serde_json::from_str(&text)?;
        if let Some(error) = reply.error {
            return Err(ProviderError::Rpc {
                code: error.code,
                message: error.message,
                data: error.data,
            });
        }

        Ok(reply.result.unwrap_or(Value::Null))
    }
}

/// Builder for configuring an [`HttpProvider`]
pub struct HttpProviderBuilder {
    url: String,
    timeout: Duration,
    user_agent: String,
}

impl HttpProviderBuilder {
    /// Create a new builder for the endpoint at `url`
    #[must_use]
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            timeout: DEFAULT_TIMEOUT,
            user_agent: format!("sentinelchain/{}", env!("CARGO_PKG_VERSION")),
        }
    }

    /// Set the request timeout
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the User-Agent header
    #[must_use]
    pub fn user_agent(mut self, agent: impl Into<String>) -> Self {
        self.user_agent = agent.into();
        self
    }

    /// Build the provider
    pub fn build(self) -> Result<HttpProvider, ProviderError> {
        let url = Url::parse(&self.url)
            .map_err(|e| ProviderError::Http(format!("invalid RPC URL {}: {e}", self.url)))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ProviderError::Http(format!(
                "unsupported RPC URL scheme: {}",
                url.scheme()
            )));
        }

        let http = HttpClient::builder()
            .timeout(self.timeout)
            .user_agent(&self.user_agent)
            .gzip(true)
            .build()
            .map_err(|e| ProviderError::Http(e.to_string()))?;

        Ok(HttpProvider {
            inner: Arc::new(ProviderInner {
                http,
                url,
                timeout: self.timeout,
                next_id: AtomicU64::new(1),
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn provider(server: &MockServer) -> HttpProvider {
        HttpProvider::new(server.uri()).unwrap()
    }

    #[tokio::test]
    async fn test_returns_result_field() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "jsonrpc": "2.0", "method": "eth_call" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": "0x01"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server)
            .await
            .request("eth_call", json!([{ "to": "0x00" }, "latest"]))
            .await
            .unwrap();
        assert_eq!(result, json!("0x01"));
    }

    #[tokio::test]
    async fn test_request_accounts_is_forwarded_as_eth_accounts() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "method": "eth_accounts" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "result": ["0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266"]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let result = provider(&server)
            .await
            .request("eth_requestAccounts", json!([]))
            .await
            .unwrap();
        assert_eq!(result[0], "0xf39fd6e51aad88f6f4ce6ab8827279cfffb92266");
    }

    #[tokio::test]
    async fn test_rpc_error_object() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1,
                "error": { "code": 4001, "message": "User rejected the request." }
            })))
            .mount(&server)
            .await;

        let err = provider(&server)
            .await
            .request("eth_sendTransaction", json!([]))
            .await
            .unwrap_err();
        assert!(err.is_user_rejection());
        assert_eq!(err.code(), Some(4001));
    }

    #[tokio::test]
    async fn test_http_error_status() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .await
            .request("eth_call", json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Http(ref msg) if msg.contains("502")));
    }

    #[tokio::test]
    async fn test_malformed_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
            .mount(&server)
            .await;

        let err = provider(&server)
            .await
            .request("eth_call", json!([]))
            .await
            .unwrap_err();
        assert!(matches!(err, ProviderError::Json(_)));
    }

    #[tokio::test]
    async fn test_null_result() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "jsonrpc": "2.0", "id": 1, "result": null
            })))
            .mount(&server)
            .await;

        let result = provider(&server)
            .await
            .request("eth_getTransactionReceipt", json!(["0x00"]))
            .await
            .unwrap();
        assert!(result.is_null());
    }

    #[tokio::test]
    async fn test_timeout() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "jsonrpc": "2.0", "id": 1, "result": "0x" }))
                    .set_delay(Duration::from_millis(500)),
            )
            .mount(&server)
            .await;

        let provider = HttpProvider::builder(server.uri())
            .timeout(Duration::from_millis(50))
            .build()
            .unwrap();
        let err = provider.request("eth_call", json!([])).await.unwrap_err();
        assert!(matches!(err, ProviderError::Timeout(d) if d == Duration::from_millis(50)));
    }

    #[test]
    fn test_builder_rejects_bad_urls() {
        assert!(HttpProvider::new("not a url").is_err());
        assert!(HttpProvider::new("ftp://localhost:8545").is_err());
        let provider = HttpProvider::new("http://127.0.0.1:8545").unwrap();
        assert_eq!(provider.url().port(), Some(8545));
        assert_eq!(provider.name(), "http");
    }
}
