use crate::error::ApiError;
use crate::navigation::{Navigator, Route};
use crate::session::{InvalidationReason, Session};
use async_trait::async_trait;
use reqwest::header::{HeaderValue, AUTHORIZATION};
use reqwest::{Request, Response};
use std::sync::Arc;
use tracing::{trace, warn};

/// A stage applied to every outbound request before it is sent.
///
/// Returning an error aborts the request; nothing reaches the network.
#[async_trait]
pub trait RequestMiddleware: Send + Sync {
    async fn on_request(&self, request: Request) -> Result<Request, ApiError>;
}

/// A stage applied to every call outcome, success or failure.
#[async_trait]
pub trait ResponseMiddleware: Send + Sync {
    async fn on_response(&self, outcome: Result<Response, ApiError>) -> Result<Response, ApiError>;
}

/// Ordered request and response stages. Request stages run first to last,
/// response stages likewise.
#[derive(Clone, Default)]
pub struct Pipeline {
    request: Vec<Arc<dyn RequestMiddleware>>,
    response: Vec<Arc<dyn ResponseMiddleware>>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bearer injection on the way out, 401 handling on the way back.
    pub fn session_defaults(session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self::new()
            .with_request(BearerAuth::new(session.clone()))
            .with_response(UnauthorizedRedirect::new(session, navigator))
    }

    pub fn with_request(mut self, stage: impl RequestMiddleware + 'static) -> Self {
        self.request.push(Arc::new(stage));
        self
    }

    pub fn with_response(mut self, stage: impl ResponseMiddleware + 'static) -> Self {
        self.response.push(Arc::new(stage));
        self
    }

    pub async fn prepare(&self, mut request: Request) -> Result<Request, ApiError> {
        for stage in &self.request {
            request = stage.on_request(request).await?;
        }
        Ok(request)
    }

    pub async fn inspect(&self, mut outcome: Result<Response, ApiError>) -> Result<Response, ApiError> {
        for stage in &self.response {
            outcome = stage.on_response(outcome).await;
        }
        outcome
    }
}

/// Attaches `Authorization: Bearer <token>` when a token is stored.
///
/// The header is inserted, not appended, so running the stage again on a
/// retried request leaves a single header.
pub struct BearerAuth {
    session: Session,
}

impl BearerAuth {
    pub fn new(session: Session) -> Self {
        Self { session }
    }
}

#[async_trait]
impl RequestMiddleware for BearerAuth {
    async fn on_request(&self, mut request: Request) -> Result<Request, ApiError> {
        if let Some(token) = self.session.token().await? {
            let mut value = HeaderValue::from_str(&format!("Bearer {}", token)).map_err(|_| ApiError::InvalidHeader {
                name: AUTHORIZATION.to_string(),
            })?;
            value.set_sensitive(true);
            request.headers_mut().insert(AUTHORIZATION, value);
        } else {
            trace!(url = %request.url(), "No stored token, sending unauthenticated");
        }
        Ok(request)
    }
}

/// On a 401, wipes the credential pair and replaces the current location
/// with the login route, then hands the same error back.
///
/// Every other outcome passes through untouched. The original request is
/// never retried.
pub struct UnauthorizedRedirect {
    session: Session,
    navigator: Arc<dyn Navigator>,
}

impl UnauthorizedRedirect {
    pub fn new(session: Session, navigator: Arc<dyn Navigator>) -> Self {
        Self { session, navigator }
    }
}

#[async_trait]
impl ResponseMiddleware for UnauthorizedRedirect {
    async fn on_response(&self, outcome: Result<Response, ApiError>) -> Result<Response, ApiError> {
        match outcome {
            Err(err) if err.is_unauthorized() => {
                warn!(error = %err, "Session rejected by backend, clearing stored credentials");
                if let Err(clear_err) = self.session.invalidate(InvalidationReason::Unauthorized).await {
                    // The caller still gets the 401; it is the more useful error
                    warn!(error = %clear_err, "Failed to clear stored credentials");
                }
                self.navigator.replace(Route::Login);
                Err(err)
            }
            other => other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reelbox_models::Credentials;
    use reqwest::{Method, StatusCode, Url};
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingNavigator {
        routes: Mutex<Vec<Route>>,
    }

    impl Navigator for RecordingNavigator {
        fn replace(&self, route: Route) {
            self.routes.lock().unwrap().push(route);
        }
    }

    fn request() -> Request {
        Request::new(Method::GET, Url::parse("http://localhost:8082/api/movies/42").unwrap())
    }

    fn status_error(status: StatusCode) -> ApiError {
        ApiError::Status {
            method: "GET".to_string(),
            url: "http://localhost:8082/api/movies/42".to_string(),
            status,
            body: None,
        }
    }

    async fn logged_in_session() -> Session {
        let session = Session::in_memory();
        session
            .establish(&Credentials {
                token: "abc123".to_string(),
                user_id: "u1".to_string(),
            })
            .await
            .unwrap();
        session
    }

    #[tokio::test]
    async fn test_bearer_added_when_token_present() {
        let stage = BearerAuth::new(logged_in_session().await);
        let request = stage.on_request(request()).await.unwrap();
        assert_eq!(request.headers().get(AUTHORIZATION).unwrap(), "Bearer abc123");
    }

    #[tokio::test]
    async fn test_no_header_without_token() {
        let stage = BearerAuth::new(Session::in_memory());
        let request = stage.on_request(request()).await.unwrap();
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[tokio::test]
    async fn test_bearer_is_idempotent_on_retry() {
        let stage = BearerAuth::new(logged_in_session().await);
        let once = stage.on_request(request()).await.unwrap();
        let twice = stage.on_request(once).await.unwrap();
        let values: Vec<_> = twice.headers().get_all(AUTHORIZATION).iter().collect();
        assert_eq!(values.len(), 1);
        assert_eq!(values[0], "Bearer abc123");
    }

    #[tokio::test]
    async fn test_unauthorized_clears_pair_and_redirects_once() {
        let session = logged_in_session().await;
        let navigator = Arc::new(RecordingNavigator::default());
        let stage = UnauthorizedRedirect::new(session.clone(), navigator.clone());

        let outcome = stage.on_response(Err(status_error(StatusCode::UNAUTHORIZED))).await;

        let err = outcome.unwrap_err();
        assert!(err.is_unauthorized());
        assert_eq!(session.token().await.unwrap(), None);
        assert_eq!(session.user_id().await.unwrap(), None);
        assert_eq!(*navigator.routes.lock().unwrap(), vec![Route::Login]);
    }

    #[tokio::test]
    async fn test_other_failures_pass_through_untouched() {
        let session = logged_in_session().await;
        let navigator = Arc::new(RecordingNavigator::default());
        let stage = UnauthorizedRedirect::new(session.clone(), navigator.clone());

        for status in [StatusCode::FORBIDDEN, StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR] {
            let err = stage.on_response(Err(status_error(status))).await.unwrap_err();
            assert_eq!(err.status(), Some(status));
        }
        // no status at all
        let err = stage.on_response(Err(ApiError::NotLoggedIn)).await.unwrap_err();
        assert!(matches!(err, ApiError::NotLoggedIn));

        assert!(session.is_logged_in().await.unwrap());
        assert!(navigator.routes.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_pipeline_runs_request_stages_in_order() {
        struct Tag(&'static str);

        #[async_trait]
        impl RequestMiddleware for Tag {
            async fn on_request(&self, mut request: Request) -> Result<Request, ApiError> {
                request
                    .headers_mut()
                    .append("x-stage", HeaderValue::from_static(self.0));
                Ok(request)
            }
        }

        let pipeline = Pipeline::new().with_request(Tag("first")).with_request(Tag("second"));
        let request = pipeline.prepare(request()).await.unwrap();
        let stages: Vec<_> = request
            .headers()
            .get_all("x-stage")
            .iter()
            .map(|v| v.to_str().unwrap().to_string())
            .collect();
        assert_eq!(stages, vec!["first", "second"]);
    }
}
