//! Access-token refresh shared by the interceptor, the navigation guard and
//! the login client.

use std::sync::Arc;

use log::{debug, warn};
use tokio::sync::Mutex;

use super::models::{RefreshRequest, RefreshResponse};
use super::session::{ApiRequest, AuthHeader, SessionClient};
use crate::error::{AuthError, Result};
use crate::token::{ACCESS_KEY, TokenStore};

/// Endpoint that exchanges a refresh token for a new access token
pub const REFRESH_PATH: &str = "token/refresh/";

/// Mints new access tokens from the stored refresh token.
///
/// At most one refresh is in flight at a time. A caller that queued behind a
/// refresh reuses its outcome instead of issuing a second `token/refresh/`.
pub struct TokenRefresher {
    session: Arc<SessionClient>,
    tokens: Arc<dyn TokenStore>,
    in_flight: Mutex<()>,
}

impl TokenRefresher {
    pub fn new(session: Arc<SessionClient>, tokens: Arc<dyn TokenStore>) -> Self {
        Self {
            session,
            tokens,
            in_flight: Mutex::new(()),
        }
    }

    /// Obtain a fresh access token.
    ///
    /// `stale_access` is the token the caller was rejected with. If the stored
    /// access token has already moved past it, that token is returned without
    /// a network call.
    ///
    /// On success the new token is stored and becomes the session's default
    /// `Authorization` header. On failure both stored tokens and the default
    /// header are cleared before the error is returned.
    pub async fn refresh_access_token(&self, stale_access: Option<&str>) -> Result<String> {
        let _guard = self.in_flight.lock().await;

        if let Some(stale) = stale_access {
            if let Some(current) = self.tokens.access().await? {
                if current != stale {
                    debug!("Access token was refreshed by a concurrent request; reusing it");
                    self.session.set_bearer(&current).await;
                    return Ok(current);
                }
            }
        }

        match self.exchange().await {
            Ok(access) => {
                self.tokens.set(ACCESS_KEY, &access).await?;
                self.session.set_bearer(&access).await;
                debug!("Access token refreshed");
                Ok(access)
            }
            Err(err) => {
                warn!("Token refresh failed, clearing stored tokens: {}", err);
                self.session.clear_authorization().await;
                if let Err(clear_err) = self.tokens.clear().await {
                    warn!("Could not remove stored tokens: {}", clear_err);
                }
                Err(err)
            }
        }
    }

    async fn exchange(&self) -> Result<String> {
        let refresh = self
            .tokens
            .refresh()
            .await?
            .ok_or(AuthError::MissingRefreshToken)?;

        let request = ApiRequest::post(REFRESH_PATH)
            .json(&RefreshRequest { refresh })?
            .authorization(AuthHeader::Omit);

        let response = self
            .session
            .send(&request)
            .await
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        let parsed: RefreshResponse = response
            .json()
            .map_err(|e| AuthError::RefreshFailed(e.to_string()))?;

        Ok(parsed.access)
    }
}
