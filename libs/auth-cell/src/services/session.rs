use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info, warn};

use shared_models::auth::{SessionInfo, UserRole};

use crate::models::{AuthError, LoginRequest, CURRENT_ROLE_KEY, IS_AUTHENTICATED_KEY, MOCK_ACCOUNTS};
use crate::services::store::{InMemoryKeyValueStore, KeyValueStore};

/// The single front-desk session, kept as two string flags in a key/value
/// store: `currentRole` and `isAuthenticated` (`"true"` when logged in).
#[derive(Clone)]
pub struct SessionService {
    store: Arc<dyn KeyValueStore>,
    login_delay: Duration,
}

impl SessionService {
    pub fn new(store: Arc<dyn KeyValueStore>, login_delay: Duration) -> Self {
        Self { store, login_delay }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryKeyValueStore::new()), Duration::ZERO)
    }

    /// Checks credentials against the built-in accounts.
    pub fn authenticate(&self, username: &str, password: &str) -> Result<UserRole, AuthError> {
        MOCK_ACCOUNTS
            .iter()
            .find(|account| account.username == username && account.password == password)
            .map(|account| account.role)
            .ok_or_else(|| {
                warn!("Failed login attempt for '{}'", username);
                AuthError::InvalidCredentials
            })
    }

    pub async fn login(&self, request: LoginRequest) -> Result<SessionInfo, AuthError> {
        debug!("Login requested for '{}'", request.username);
        if !self.login_delay.is_zero() {
            tokio::time::sleep(self.login_delay).await;
        }

        let role = self.authenticate(&request.username, &request.password)?;
        self.store.set(CURRENT_ROLE_KEY, role.as_str());
        self.store.set(IS_AUTHENTICATED_KEY, "true");

        info!("Logged in as {}", role);
        Ok(self.session_info())
    }

    pub fn logout(&self) {
        self.store.remove(CURRENT_ROLE_KEY);
        self.store.remove(IS_AUTHENTICATED_KEY);
        info!("Logged out");
    }

    pub fn set_role(&self, role: UserRole) {
        debug!("Switching role to {}", role);
        self.store.set(CURRENT_ROLE_KEY, role.as_str());
    }

    /// Defaults to receptionist when nothing (or garbage) is stored.
    pub fn current_role(&self) -> UserRole {
        match self.store.get(CURRENT_ROLE_KEY) {
            Some(stored) => stored.parse().unwrap_or_else(|e| {
                warn!("Ignoring stored role: {}", e);
                UserRole::default()
            }),
            None => UserRole::default(),
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.store.get(IS_AUTHENTICATED_KEY).as_deref() == Some("true")
    }

    pub fn session_info(&self) -> SessionInfo {
        SessionInfo {
            is_authenticated: self.is_authenticated(),
            role: self.current_role(),
        }
    }

    pub fn require_authenticated(&self) -> Result<SessionInfo, AuthError> {
        let session = self.session_info();
        if session.is_authenticated {
            Ok(session)
        } else {
            Err(AuthError::NotAuthenticated)
        }
    }
}
