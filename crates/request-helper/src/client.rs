use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, warn};
use url::Url;

use crate::errors::RequestError;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Thin JSON client bound to one base URL.
///
/// Relative paths are resolved against the base with [`Url::join`], so a
/// trailing slash on the base keeps its last segment ("http://host/api/" +
/// "users" -> "/api/users") while an absolute path replaces it.
#[derive(Debug)]
pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
}

/// Collects connection settings before the underlying client is built.
pub struct ApiClientBuilder {
    base: String,
    timeout: Duration,
    headers: Vec<(String, String)>,
}

impl ApiClient {
    /// Client with the default timeout and no extra headers.
    pub fn new(base_url: &str) -> Result<Self, RequestError> {
        Self::builder(base_url).build()
    }

    pub fn builder(base_url: &str) -> ApiClientBuilder {
        ApiClientBuilder {
            base: base_url.to_string(),
            timeout: DEFAULT_TIMEOUT,
            headers: Vec::new(),
        }
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub async fn get_json(&self, path: &str) -> Result<Value, RequestError> {
        let url = self.join(path)?;
        debug!(method = "GET", url = %url, "sending request");
        let response = self.client.get(url.clone()).send().await?;
        self.read_json("GET", &url, response).await
    }

    pub async fn post_json<T: Serialize>(&self, path: &str, body: &T) -> Result<Value, RequestError> {
        let url = self.join(path)?;
        debug!(method = "POST", url = %url, "sending request");
        let response = self.client.post(url.clone()).json(body).send().await?;
        self.read_json("POST", &url, response).await
    }

    /// Sends a DELETE and discards any response body.
    pub async fn delete(&self, path: &str) -> Result<(), RequestError> {
        let url = self.join(path)?;
        debug!(method = "DELETE", url = %url, "sending request");
        let response = self.client.delete(url.clone()).send().await?;
        let status = response.status();
        info!(method = "DELETE", url = %url, status = status.as_u16(), "response received");
        if status.is_success() {
            return Ok(());
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<response unavailable>".to_string());
        warn!(method = "DELETE", url = %url, status = status.as_u16(), "request rejected");
        Err(RequestError::status(status.as_u16(), &text))
    }

    pub(crate) fn join(&self, path: &str) -> Result<Url, RequestError> {
        Ok(self.base.join(path)?)
    }

    async fn read_json(
        &self,
        method: &str,
        url: &Url,
        response: reqwest::Response,
    ) -> Result<Value, RequestError> {
        let status = response.status();
        info!(method, url = %url, status = status.as_u16(), "response received");
        if !status.is_success() {
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "<response unavailable>".to_string());
            warn!(method, url = %url, status = status.as_u16(), "request rejected");
            return Err(RequestError::status(status.as_u16(), &text));
        }
        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|err| RequestError::Decode(err.to_string()))
    }
}

impl ApiClientBuilder {
    /// Bounds every request sent through the built client.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Header attached to every request.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_string(), value.to_string()));
        self
    }

    pub fn build(self) -> Result<ApiClient, RequestError> {
        let base = Url::parse(&self.base)?;
        let mut headers = HeaderMap::new();
        for (name, value) in &self.headers {
            let header_name = HeaderName::try_from(name.as_str())
                .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
            let header_value = HeaderValue::try_from(value.as_str())
                .map_err(|_| RequestError::InvalidHeader { name: name.clone() })?;
            headers.insert(header_name, header_value);
        }
        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .default_headers(headers)
            .build()?;
        Ok(ApiClient { base, client })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn relative_paths_extend_the_base() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        let url = client.join("users/7").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/api/users/7");
    }

    #[test]
    fn absolute_paths_replace_the_base_path() {
        let client = ApiClient::new("http://localhost:8080/api/").unwrap();
        let url = client.join("/health").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/health");
    }

    #[test]
    fn a_base_without_a_trailing_slash_drops_its_last_segment() {
        let client = ApiClient::new("http://localhost:8080/api").unwrap();
        let url = client.join("users").unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/users");
    }

    #[test]
    fn an_unparseable_base_is_rejected_up_front() {
        let err = ApiClient::new("not a url").unwrap_err();
        assert!(matches!(err, RequestError::InvalidUrl(_)));
    }

    #[test]
    fn an_invalid_header_name_is_rejected_at_build() {
        let err = ApiClient::builder("http://localhost:8080/")
            .with_header("bad name", "1")
            .build()
            .unwrap_err();
        match err {
            RequestError::InvalidHeader { name } => assert_eq!(name, "bad name"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn builder_accepts_auth_headers_and_timeouts() {
        let client = ApiClient::builder("http://localhost:8080/api/")
            .with_timeout(Duration::from_millis(250))
            .with_header("authorization", "Bearer token")
            .with_header("x-request-source", "pagemend")
            .build()
            .unwrap();
        assert_eq!(client.base_url().as_str(), "http://localhost:8080/api/");
    }

    #[tokio::test]
    async fn an_unreachable_host_surfaces_as_a_transport_error() {
        // Port 9 (discard) is never served in the test environment.
        let client = ApiClient::builder("http://127.0.0.1:9/")
            .with_timeout(Duration::from_millis(500))
            .build()
            .unwrap();
        let err = client.get_json("status").await.unwrap_err();
        assert!(matches!(err, RequestError::Http(_)));
    }
}
