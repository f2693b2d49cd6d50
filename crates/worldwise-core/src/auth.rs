// ── Login stub ──
//
// A single hard-coded account. `AuthState` changes only through `reduce`.

use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use tracing::{debug, info};

use crate::error::CoreError;
use crate::position::Navigator;

pub const APP_ROUTE: &str = "/app";
pub const HOME_ROUTE: &str = "/";

const FAKE_EMAIL: &str = "vy@example.com";
const FAKE_PASSWORD: &str = "qwerty";
const FAKE_NAME: &str = "Vy";
const FAKE_AVATAR: &str = "https://i.pravatar.cc/100?u=zz";

/// The signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    pub email: String,
    pub name: String,
    pub avatar: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthState {
    pub user: Option<User>,
    pub is_authenticated: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    Login { email: String },
    Logout,
}

/// Apply one auth action. Logout keeps the last user.
pub fn reduce(state: AuthState, action: AuthAction) -> AuthState {
    match action {
        AuthAction::Login { email } => AuthState {
            user: Some(User {
                email,
                name: FAKE_NAME.to_owned(),
                avatar: FAKE_AVATAR.to_owned(),
            }),
            is_authenticated: true,
        },
        AuthAction::Logout => AuthState {
            is_authenticated: false,
            ..state
        },
    }
}

/// Credential check against the one known account.
#[derive(Debug, Clone, Default)]
pub struct FakeAuth {
    state: AuthState,
}

impl FakeAuth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &AuthState {
        &self.state
    }

    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated
    }

    pub fn user(&self) -> Option<&User> {
        self.state.user.as_ref()
    }

    /// Returns `true` on success. Wrong credentials change nothing.
    pub fn login(&mut self, email: &str, password: &SecretString) -> bool {
        if email.trim() != FAKE_EMAIL || password.expose_secret() != FAKE_PASSWORD {
            debug!(email, "login refused");
            return false;
        }
        info!(email, "logged in");
        self.dispatch(AuthAction::Login {
            email: email.trim().to_owned(),
        });
        true
    }

    /// Only dispatches while authenticated.
    pub fn logout(&mut self) {
        if self.state.is_authenticated {
            self.dispatch(AuthAction::Logout);
        }
    }

    fn dispatch(&mut self, action: AuthAction) {
        self.state = reduce(std::mem::take(&mut self.state), action);
    }
}

/// Route guard: sends unauthenticated visitors home.
///
/// Returns whether the protected view may render.
pub fn require_auth<N: Navigator>(auth: &FakeAuth, navigator: &mut N) -> Result<bool, CoreError> {
    if auth.is_authenticated() {
        return Ok(true);
    }
    navigator.navigate(HOME_ROUTE)?;
    Ok(false)
}
