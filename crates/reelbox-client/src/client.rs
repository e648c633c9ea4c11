use crate::api::{Auth, Items, Movies, Users, Watchlists};
use crate::error::ApiError;
use crate::middleware::Pipeline;
use crate::navigation::Navigator;
use crate::session::Session;
use reelbox_config::ApiConfig;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;

/// Shared dispatch surface for every backend call.
///
/// Requests go through the [`Pipeline`] before sending and outcomes go
/// through it on the way back. No retry, backoff or timeout is applied here;
/// callers that need bounded latency wrap the call themselves.
#[derive(Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
    session: Session,
    navigator: Arc<dyn Navigator>,
    pipeline: Pipeline,
}

impl ApiClient {
    /// Client with the default session pipeline.
    pub fn new(config: &ApiConfig, session: Session, navigator: Arc<dyn Navigator>) -> Result<Self, ApiError> {
        let pipeline = Pipeline::session_defaults(session.clone(), navigator.clone());
        Self::with_pipeline(config, session, navigator, pipeline)
    }

    pub fn with_pipeline(
        config: &ApiConfig,
        session: Session,
        navigator: Arc<dyn Navigator>,
        pipeline: Pipeline,
    ) -> Result<Self, ApiError> {
        let base_url = config.base_url.trim().trim_end_matches('/').to_string();
        Url::parse(&base_url).map_err(|e| ApiError::InvalidUrl {
            url: base_url.clone(),
            reason: e.to_string(),
        })?;

        let mut headers = HeaderMap::new();
        let content_type = HeaderValue::from_str(&config.content_type).map_err(|_| ApiError::InvalidHeader {
            name: CONTENT_TYPE.to_string(),
        })?;
        headers.insert(CONTENT_TYPE, content_type);

        let http = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(ApiError::Transport)?;

        Ok(Self {
            http,
            base_url,
            session,
            navigator,
            pipeline,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    pub fn auth(&self) -> Auth<'_> {
        Auth::new(self)
    }

    pub fn users(&self) -> Users<'_> {
        Users::new(self)
    }

    pub fn movies(&self) -> Movies<'_> {
        Movies::new(self)
    }

    pub fn watchlists(&self) -> Watchlists<'_> {
        Watchlists::new(self)
    }

    pub fn items(&self) -> Items<'_> {
        Items::new(self)
    }

    /// Absolute URL for a relative path.
    pub fn url(&self, path: &str) -> Result<Url, ApiError> {
        let joined = if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        };
        Url::parse(&joined).map_err(|e| ApiError::InvalidUrl {
            url: joined.clone(),
            reason: e.to_string(),
        })
    }

    pub fn request(&self, method: Method, path: &str) -> Result<RequestBuilder, ApiError> {
        Ok(self.http.request(method, self.url(path)?))
    }

    /// Run a built request through the pipeline and the network.
    pub async fn execute(&self, builder: RequestBuilder) -> Result<Response, ApiError> {
        let request = builder.build().map_err(ApiError::Transport)?;
        let request = self.pipeline.prepare(request).await?;
        let outcome = self.dispatch(request).await;
        self.pipeline.inspect(outcome).await
    }

    async fn dispatch(&self, request: reqwest::Request) -> Result<Response, ApiError> {
        let method = request.method().to_string();
        let url = request.url().to_string();
        debug!(%method, %url, "Dispatching request");

        let response = self.http.execute(request).await.map_err(ApiError::Transport)?;
        let status = response.status();
        if status.is_success() {
            debug!(%method, %url, status = status.as_u16(), "Request succeeded");
            return Ok(response);
        }

        let body = response.text().await.ok().filter(|b| !b.trim().is_empty());
        debug!(%method, %url, status = status.as_u16(), "Request failed");
        Err(ApiError::Status {
            method,
            url,
            status,
            body,
        })
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.execute(self.request(Method::GET, path)?).await?;
        decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, path: &str, query: &Q) -> Result<T, ApiError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let response = self.execute(self.request(Method::GET, path)?.query(query)).await?;
        decode(response).await
    }

    pub async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::POST, path)?.json(body)).await?;
        decode(response).await
    }

    /// POST whose response body the caller does not need.
    pub async fn post_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::POST, path)?.json(body)).await?;
        Ok(())
    }

    pub async fn put<B, T>(&self, path: &str, body: &B) -> Result<T, ApiError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self.execute(self.request(Method::PUT, path)?.json(body)).await?;
        decode(response).await
    }

    pub async fn put_discard<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<(), ApiError> {
        self.execute(self.request(Method::PUT, path)?.json(body)).await?;
        Ok(())
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.execute(self.request(Method::DELETE, path)?).await?;
        Ok(())
    }

    /// The stored user id, for user-scoped endpoints.
    pub async fn require_user_id(&self) -> Result<String, ApiError> {
        self.session.user_id().await?.ok_or(ApiError::NotLoggedIn)
    }
}

async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
    let url = response.url().to_string();
    let bytes = response.bytes().await.map_err(ApiError::Transport)?;
    serde_json::from_slice(&bytes).map_err(|source| ApiError::Decode { url, source })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::NoopNavigator;

    fn client(base_url: &str) -> Result<ApiClient, ApiError> {
        let config = ApiConfig {
            base_url: base_url.to_string(),
            ..ApiConfig::default()
        };
        ApiClient::new(&config, Session::in_memory(), Arc::new(NoopNavigator))
    }

    #[test]
    fn test_url_joins_base_and_path() {
        let client = client("http://192.168.8.115:8082/api").unwrap();
        assert_eq!(client.url("/movies/42").unwrap().as_str(), "http://192.168.8.115:8082/api/movies/42");
        assert_eq!(client.url("movies").unwrap().as_str(), "http://192.168.8.115:8082/api/movies");
    }

    #[test]
    fn test_trailing_slash_on_base_is_ignored() {
        let client = client("http://localhost:8082/api/").unwrap();
        assert_eq!(client.base_url(), "http://localhost:8082/api");
        assert_eq!(client.url("/users/login").unwrap().as_str(), "http://localhost:8082/api/users/login");
    }

    #[test]
    fn test_invalid_base_url_is_rejected() {
        assert!(matches!(client("not a url"), Err(ApiError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_require_user_id_without_session() {
        let client = client("http://localhost:8082/api").unwrap();
        assert!(matches!(client.require_user_id().await, Err(ApiError::NotLoggedIn)));
    }
}
