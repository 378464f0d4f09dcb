use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

#[derive(Debug, Default)]
struct SessionState {
    username: Option<String>,
    token: Option<String>,
}

/// Who is logged in, shared by everything that stamps requests with the
/// acting user.
///
/// `Session` is a cheap handle: clones observe the same state. Build one at
/// start-up and pass it to the components that need it.
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionState>>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read(|state| state.username.is_some())
    }

    pub fn current_user(&self) -> Option<String> {
        self.read(|state| state.username.clone())
    }

    /// Bearer token handed out by the last successful login, if any.
    pub fn token(&self) -> Option<String> {
        self.read(|state| state.token.clone())
    }

    pub fn login(&self, username: impl Into<String>, token: Option<String>) {
        let username = username.into();
        info!("Session started for {}", username);
        self.write(|state| {
            state.username = Some(username);
            state.token = token;
        });
    }

    pub fn logout(&self) {
        if let Some(username) = self.current_user() {
            info!("Session ended for {}", username);
        }
        self.write(|state| *state = SessionState::default());
    }

    fn read<T>(&self, f: impl FnOnce(&SessionState) -> T) -> T {
        let guard = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut SessionState)) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard);
    }
}
