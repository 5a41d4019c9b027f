use std::path::PathBuf;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use crate::config::AppConfig;
use crate::core::session::{Session, User};
use crate::error::AuthError;
use crate::storage;

/// Simulated remote-call latency for login. No network I/O happens.
pub const LOGIN_DELAY: Duration = Duration::from_millis(800);

struct Credential {
    username: &'static str,
    password: &'static str,
    name: &'static str,
}

// Stand-in for a backend user directory.
const CREDENTIALS: &[Credential] = &[
    Credential {
        username: "kacper",
        password: "reliance123",
        name: "Kacper",
    },
    Credential {
        username: "demo",
        password: "demo123",
        name: "Demo User",
    },
];

struct SessionInner {
    session: Session,
    path: PathBuf,
}

/// Owner of authentication state. The persisted session is restored on open
/// without re-validating credentials; in-memory state is the source of truth
/// for the current session, so persistence failures are logged, not fatal.
#[derive(Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<SessionInner>>,
}

impl SessionStore {
    pub fn open(config: &AppConfig) -> Self {
        let path = config.session_path();
        let session = match storage::load_session(&path) {
            Ok(session) => session,
            Err(e) => {
                log::debug!("No restorable session at {}: {e}", path.display());
                Session::logged_out()
            }
        };
        Self {
            inner: Arc::new(Mutex::new(SessionInner { session, path })),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Validate against the fixed credential list: username case-insensitive,
    /// password exact. On success the session is stored and persisted.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        tokio::time::sleep(LOGIN_DELAY).await;

        let credential = CREDENTIALS
            .iter()
            .find(|c| c.username.eq_ignore_ascii_case(username) && c.password == password)
            .ok_or(AuthError::InvalidCredentials)?;

        let user = User {
            username: credential.username.to_string(),
            name: credential.name.to_string(),
            email: format!("{}@example.com", credential.username),
        };

        let mut inner = self.lock();
        inner.session = Session::logged_in(user.clone());
        if let Err(e) = storage::save_session(&inner.path, &inner.session) {
            log::warn!("Failed to persist session: {e}");
        }
        log::info!("Logged in as {}", user.name);
        Ok(user)
    }

    /// Clear in-memory and persisted session state.
    pub fn logout(&self) {
        let mut inner = self.lock();
        inner.session = Session::logged_out();
        if let Err(e) = storage::clear_session(&inner.path) {
            log::warn!("Failed to clear persisted session: {e}");
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.lock().session.is_authenticated
    }

    pub fn current_user(&self) -> Option<User> {
        self.lock().session.user.clone()
    }
}
