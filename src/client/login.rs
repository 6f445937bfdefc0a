//! Login, logout and token refresh against the task API

use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use reqwest::{Method, StatusCode};

use super::api::AuthApi;
use super::interceptor::AuthInterceptor;
use super::models::{LoginRequest, LoginResponse, User};
use super::refresh::TokenRefresher;
use super::session::{ApiRequest, AuthHeader};
use super::{LOGIN_PATH, LOGOUT_PATH};
use crate::error::{AuthError, Error, Result};
use crate::token::TokenStore;

pub struct LoginClient {
    interceptor: Arc<AuthInterceptor>,
    tokens: Arc<dyn TokenStore>,
    refresher: Arc<TokenRefresher>,
}

impl LoginClient {
    pub fn new(
        interceptor: Arc<AuthInterceptor>,
        tokens: Arc<dyn TokenStore>,
        refresher: Arc<TokenRefresher>,
    ) -> Self {
        Self {
            interceptor,
            tokens,
            refresher,
        }
    }
}

#[async_trait]
impl AuthApi for LoginClient {
    async fn login(&self, username: &str, password: &str) -> Result<User> {
        let credentials = LoginRequest {
            username: username.to_lowercase(),
            password: password.to_string(),
        };

        // Bypasses the interceptor: a 401 here means bad credentials, not an
        // expired token.
        let request = ApiRequest::post(LOGIN_PATH)
            .json(&credentials)?
            .authorization(AuthHeader::Omit);

        let session = self.interceptor.session();
        let response: LoginResponse = session
            .send(&request)
            .await
            .and_then(|r| r.json())
            .map_err(|e| match e {
                Error::Api(api) => AuthError::LoginFailed(api.to_string()),
                other => AuthError::LoginFailed(other.to_string()),
            })?;

        session.set_bearer(&response.access).await;
        self.tokens.store_pair(&response.token_pair()).await?;
        debug!("Logged in as {}", response.user.username);

        Ok(response.user)
    }

    async fn logout(&self) -> bool {
        match self.interceptor.request(Method::POST, LOGOUT_PATH, None).await {
            Ok(response) => response.status == StatusCode::OK,
            Err(err) => {
                debug!("Logout request failed: {}", err);
                false
            }
        }
    }

    async fn refresh_token(&self) -> Result<()> {
        self.refresher.refresh_access_token(None).await.map(|_| ())
    }
}
