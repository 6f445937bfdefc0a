//! Command execution context
//!
//! Builds the shared client stack once per invocation and hands it to the
//! command handlers: session client, token store, refresher, router and
//! the two API clients, plus the in-memory session state.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;

use crate::cli::{GlobalOptions, OutputFormat};
use crate::client::{AuthInterceptor, LoginClient, SessionClient, TaskClient, TokenRefresher};
use crate::config::Config;
use crate::error::{AuthError, Result};
use crate::router::{NavigationGuard, Route, Router};
use crate::session::SessionState;
use crate::token::{FileTokenStore, TokenStore};

/// Context for command execution
pub struct CommandContext {
    /// Loaded configuration
    pub config: Config,
    /// Where the configuration lives (tokens are stored next to it)
    pub config_path: PathBuf,
    /// Resolved output format
    pub format: OutputFormat,
    /// Shared HTTP session
    pub session: Arc<SessionClient>,
    /// Durable token storage
    pub tokens: Arc<dyn TokenStore>,
    /// Current user
    pub state: Arc<RwLock<SessionState>>,
    /// Route tracking and navigation guard
    pub router: Arc<Router>,
    /// Login/logout/refresh
    pub auth: LoginClient,
    /// Task CRUD
    pub tasks: TaskClient,
}

impl CommandContext {
    /// Build the context from global options, using the file token store
    /// next to the config file.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let config = Config::load_from(&config_path)?;
        let tokens: Arc<dyn TokenStore> =
            Arc::new(FileTokenStore::new(Config::token_path(&config_path)));

        Self::with_token_store(opts, config, config_path, tokens)
    }

    /// Build the context around an explicit token store
    pub fn with_token_store(
        opts: &GlobalOptions,
        config: Config,
        config_path: PathBuf,
        tokens: Arc<dyn TokenStore>,
    ) -> Result<Self> {
        let base_url = config.base_url(opts.base_url_ref())?;
        debug!("Using API base URL {}", base_url);

        let format = opts
            .format
            .or_else(|| {
                config
                    .preferences
                    .format
                    .as_deref()
                    .and_then(OutputFormat::from_name)
            })
            .unwrap_or_default();

        let session = Arc::new(SessionClient::new(base_url)?);
        let refresher = Arc::new(TokenRefresher::new(session.clone(), tokens.clone()));
        let state = Arc::new(RwLock::new(SessionState::default()));

        let guard = NavigationGuard::new(session.clone(), tokens.clone(), refresher.clone());
        let router = Arc::new(Router::new(guard, state.clone()));

        let interceptor = Arc::new(AuthInterceptor::new(
            session.clone(),
            refresher.clone(),
            router.clone(),
        ));

        Ok(Self {
            config,
            config_path,
            format,
            session,
            tokens: tokens.clone(),
            state,
            router,
            auth: LoginClient::new(interceptor.clone(), tokens, refresher),
            tasks: TaskClient::new(interceptor),
        })
    }

    /// Navigate to a route through the guard; returns the route reached
    pub async fn navigate(&self, route: Route) -> Result<Route> {
        self.router.push(route).await
    }

    /// Enter the task area, failing when the guard sends us to the login route
    pub async fn require_session(&self) -> Result<SessionState> {
        match self.navigate(Route::Tasks).await? {
            Route::Tasks => Ok(self.state.read().await.clone()),
            Route::Login => Err(AuthError::NotLoggedIn.into()),
        }
    }

    /// Persist the configuration back to where it was loaded from
    pub fn save_config(&self) -> Result<()> {
        self.config.save_to(&self.config_path)
    }
}
