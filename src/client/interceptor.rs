//! Response interceptor that recovers from expired access tokens
//!
//! A request that fails with 401 triggers one refresh through the shared
//! [`TokenRefresher`] and is replayed once with the new token. If the refresh
//! fails, the navigator is sent to the login route and the refresh error is
//! returned in place of the original failure.

use std::sync::Arc;

use log::{debug, warn};
use reqwest::Method;

use super::refresh::TokenRefresher;
use super::session::{ApiRequest, ApiResponse, AuthHeader, SessionClient};
use crate::error::Result;
use crate::router::{Navigator, Route};

pub struct AuthInterceptor {
    session: Arc<SessionClient>,
    refresher: Arc<TokenRefresher>,
    navigator: Arc<dyn Navigator>,
}

impl AuthInterceptor {
    pub fn new(
        session: Arc<SessionClient>,
        refresher: Arc<TokenRefresher>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            session,
            refresher,
            navigator,
        }
    }

    pub fn session(&self) -> &Arc<SessionClient> {
        &self.session
    }

    /// Send `method path` with an optional JSON body through the interceptor
    pub async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<serde_json::Value>,
    ) -> Result<ApiResponse> {
        self.execute(ApiRequest::new(method, path).body(body)).await
    }

    /// Send a request, refreshing and replaying once on 401
    pub async fn execute(&self, mut request: ApiRequest) -> Result<ApiResponse> {
        let sent_with = self.session.bearer_token_for(&request).await;

        match self.session.send(&request).await {
            Err(err) if err.is_unauthorized() && !request.retried => {
                debug!(
                    "{} {} returned 401; refreshing access token",
                    request.method, request.path
                );

                let access = match self
                    .refresher
                    .refresh_access_token(sent_with.as_deref())
                    .await
                {
                    Ok(access) => access,
                    Err(refresh_err) => {
                        warn!("Session could not be refreshed; signing out");
                        self.navigator.navigate(Route::Login).await;
                        return Err(refresh_err);
                    }
                };

                request.retried = true;
                request.authorization = AuthHeader::Bearer(access);
                self.session.send(&request).await
            }
            other => other,
        }
    }
}
