//! Shared HTTP transport with bearer authorization.

use std::sync::{Arc, RwLock};

use secrecy::{ExposeSecret, SecretString};

use crate::config::ApiConfig;
use crate::error::ApiError;

/// Shared API transport.
///
/// Holds the `reqwest` client, the base URL, and the access-token cell the
/// [`SessionStore`](crate::session::SessionStore) writes. Before sending,
/// each request passes the authorizer: if the target URL starts with one of
/// the configured origins and a token is present, the token is attached as
/// a bearer credential; otherwise the request goes out unchanged.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    client: reqwest::Client,
    base_url: String,
    authorized_origins: Vec<String>,
    access_token: RwLock<Option<SecretString>>,
}

impl ApiClient {
    /// Create a new API client.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let client = reqwest::Client::builder().build()?;

        Ok(Self {
            inner: Arc::new(ApiClientInner {
                client,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                authorized_origins: config.authorized_origins.clone(),
                access_token: RwLock::new(None),
            }),
        })
    }

    /// The API base URL, without a trailing slash.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Replace the access token used by the authorizer.
    pub fn set_access_token(&self, token: Option<SecretString>) {
        if let Ok(mut slot) = self.inner.access_token.write() {
            *slot = token;
        }
    }

    /// Current access token, if any.
    #[must_use]
    pub fn access_token(&self) -> Option<SecretString> {
        self.inner
            .access_token
            .read()
            .ok()
            .and_then(|slot| slot.clone())
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn has_access_token(&self) -> bool {
        self.inner
            .access_token
            .read()
            .is_ok_and(|slot| slot.is_some())
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.inner.base_url)
    }

    /// Whether the authorizer may attach credentials to this URL.
    fn is_authorized_target(&self, url: &str) -> bool {
        self.inner
            .authorized_origins
            .iter()
            .any(|origin| url.starts_with(origin.as_str()))
    }

    /// Attach the bearer token when the target is an API origin.
    fn authorize(&self, request: reqwest::RequestBuilder, url: &str) -> reqwest::RequestBuilder {
        if !self.is_authorized_target(url) {
            return request;
        }
        match self.access_token() {
            Some(token) => request.bearer_auth(token.expose_secret()),
            None => request,
        }
    }

    /// Execute a GET request against the API.
    pub(crate) async fn get<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.authorize(self.inner.client.get(&url), &url);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a POST request with a JSON body.
    pub(crate) async fn post<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.authorize(self.inner.client.post(&url), &url).json(body);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a PUT request with a JSON body.
    pub(crate) async fn put<T: serde::de::DeserializeOwned, B: serde::Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self.authorize(self.inner.client.put(&url), &url).json(body);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Execute a DELETE request, ignoring any response body.
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let url = self.url(path);
        let request = self.authorize(self.inner.client.delete(&url), &url);
        let response = request.send().await?;

        let status = response.status();
        if status.is_success() {
            return Ok(());
        }

        Err(Self::parse_error(response).await)
    }

    /// Execute a multipart POST (image upload).
    pub(crate) async fn post_multipart<T: serde::de::DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        let request = self
            .authorize(self.inner.client.post(&url), &url)
            .multipart(form);
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Handle an API response and parse the JSON body.
    async fn handle_response<T: serde::de::DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();

        if status.is_success() {
            return response
                .json()
                .await
                .map_err(|e| ApiError::Parse(format!("failed to parse response: {e}")));
        }

        Err(Self::parse_error(response).await)
    }

    /// Map an error response onto the [`ApiError`] taxonomy.
    ///
    /// The backend reports failures as `{"error": "..."}`; the message is
    /// carried through where the status alone is not enough.
    async fn parse_error(response: reqwest::Response) -> ApiError {
        let status = response.status().as_u16();
        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .map_or(body, |parsed| parsed.error),
            Err(_) => "unknown error".to_string(),
        };

        match status {
            401 | 403 => ApiError::Unauthorized,
            404 => ApiError::NotFound(message),
            409 => ApiError::Conflict(message),
            _ => ApiError::Api { status, message },
        }
    }
}

#[derive(serde::Deserialize)]
struct ErrorBody {
    error: String,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.inner.base_url)
            .field("authorized_origins", &self.inner.authorized_origins)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use url::Url;

    fn client() -> ApiClient {
        let config = ApiConfig {
            base_url: Url::parse("http://localhost:5000/api").unwrap(),
            authorized_origins: vec!["http://localhost:5000".to_string()],
            session_file: None,
        };
        ApiClient::new(&config).unwrap()
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client();
        assert_eq!(client.url("/propiedades"), "http://localhost:5000/api/propiedades");
    }

    #[test]
    fn test_authorizer_matches_only_configured_origins() {
        let client = client();
        assert!(client.is_authorized_target("http://localhost:5000/api/user"));
        assert!(!client.is_authorized_target("https://evil.example.com/api/user"));
    }

    #[test]
    fn test_token_cell_roundtrip() {
        let client = client();
        assert!(!client.has_access_token());
        client.set_access_token(Some(SecretString::from("tok-1")));
        assert!(client.has_access_token());
        assert_eq!(
            client.access_token().map(|t| t.expose_secret().to_string()),
            Some("tok-1".to_string())
        );
        client.set_access_token(None);
        assert!(!client.has_access_token());
    }
}
