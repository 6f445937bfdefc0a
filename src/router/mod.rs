//! Route table and navigation guard
//!
//! Every authenticated command navigates to a [`Route`] first. The
//! [`NavigationGuard`] decides, from the stored access token and the `me/`
//! endpoint, whether the navigation proceeds or is redirected.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::StatusCode;
use tokio::sync::RwLock;

use crate::client::refresh::TokenRefresher;
use crate::client::session::{ApiRequest, SessionClient};
use crate::client::{ME_PATH, User};
use crate::error::{Error, Result};
use crate::session::SessionState;
use crate::token::TokenStore;

/// Upper bound on chained redirects for a single navigation
const MAX_REDIRECTS: usize = 3;

/// Application routes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Tasks,
}

impl Route {
    pub fn name(&self) -> &'static str {
        match self {
            Route::Login => "Login",
            Route::Tasks => "Tasks",
        }
    }

    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Tasks => "/tasks",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Outcome of a guard check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Navigation {
    Proceed,
    Redirect(Route),
}

/// Something that can be told to move to a route out of band
#[async_trait]
pub trait Navigator: Send + Sync {
    async fn navigate(&self, to: Route);
}

/// Pre-navigation authentication check
pub struct NavigationGuard {
    session: Arc<SessionClient>,
    tokens: Arc<dyn TokenStore>,
    refresher: Arc<TokenRefresher>,
}

impl NavigationGuard {
    pub fn new(
        session: Arc<SessionClient>,
        tokens: Arc<dyn TokenStore>,
        refresher: Arc<TokenRefresher>,
    ) -> Self {
        Self {
            session,
            tokens,
            refresher,
        }
    }

    /// Decide whether navigation to `to` may proceed, updating `state`.
    pub async fn before_each(&self, to: Route, state: &mut SessionState) -> Result<Navigation> {
        let Some(access) = self.tokens.access().await? else {
            state.logout();
            return Ok(unauthenticated(to));
        };

        self.session.set_bearer(&access).await;

        match self.session.send(&ApiRequest::get(ME_PATH)).await {
            Ok(response) if response.status == StatusCode::OK => match response.json::<User>() {
                Ok(user) => {
                    state.set_user(&user);
                    if to == Route::Login {
                        Ok(Navigation::Redirect(Route::Tasks))
                    } else {
                        Ok(Navigation::Proceed)
                    }
                }
                Err(err) => {
                    debug!("Unreadable {} response: {}", ME_PATH, err);
                    self.recover(&access, state).await
                }
            },
            Ok(response) => {
                warn!(
                    "{} answered {} instead of 200; treating session as signed out",
                    ME_PATH, response.status
                );
                state.logout();
                Ok(unauthenticated(to))
            }
            Err(err) => {
                debug!("{} failed ({}); attempting token refresh", ME_PATH, err);
                self.recover(&access, state).await
            }
        }
    }

    /// Refresh once and re-fetch the user; any failure ends at the login route.
    async fn recover(&self, stale_access: &str, state: &mut SessionState) -> Result<Navigation> {
        if let Err(err) = self.refresher.refresh_access_token(Some(stale_access)).await {
            debug!("Guard refresh failed: {}", err);
            state.logout();
            return Ok(Navigation::Redirect(Route::Login));
        }

        match self.fetch_user().await {
            Ok(user) => {
                state.set_user(&user);
                Ok(Navigation::Redirect(Route::Tasks))
            }
            Err(err) => {
                warn!("Could not load the current user after refresh: {}", err);
                self.session.clear_authorization().await;
                self.tokens.clear().await?;
                state.logout();
                Ok(Navigation::Redirect(Route::Login))
            }
        }
    }

    async fn fetch_user(&self) -> Result<User> {
        self.session.send(&ApiRequest::get(ME_PATH)).await?.json()
    }
}

fn unauthenticated(to: Route) -> Navigation {
    if to == Route::Login {
        Navigation::Proceed
    } else {
        Navigation::Redirect(Route::Login)
    }
}

/// Runs the guard on every navigation and tracks the current route
pub struct Router {
    guard: NavigationGuard,
    state: Arc<RwLock<SessionState>>,
    current: RwLock<Option<Route>>,
}

impl Router {
    pub fn new(guard: NavigationGuard, state: Arc<RwLock<SessionState>>) -> Self {
        Self {
            guard,
            state,
            current: RwLock::new(None),
        }
    }

    /// Navigate to `to`, following guard redirects. Returns the route reached.
    pub async fn push(&self, to: Route) -> Result<Route> {
        let mut target = to;

        for _ in 0..=MAX_REDIRECTS {
            let mut state = self.state.read().await.clone();
            let decision = self.guard.before_each(target, &mut state).await?;
            *self.state.write().await = state;

            match decision {
                Navigation::Redirect(next) if next != target => {
                    debug!("Navigation to {} redirected to {}", target, next);
                    target = next;
                }
                _ => {
                    debug!("Navigated to {}", target);
                    *self.current.write().await = Some(target);
                    return Ok(target);
                }
            }
        }

        Err(Error::Other(format!(
            "Too many redirects while navigating to {}",
            to
        )))
    }

    #[cfg(test)]
    pub async fn current(&self) -> Option<Route> {
        *self.current.read().await
    }
}

#[async_trait]
impl Navigator for Router {
    async fn navigate(&self, to: Route) {
        debug!("Forced navigation to {} ({})", to.name(), to);
        if to == Route::Login {
            self.state.write().await.logout();
        }
        *self.current.write().await = Some(to);
    }
}
