//! Login command handler.

use std::io::IsTerminal;

use dialoguer::{Input, Password};
use secrecy::SecretString;
use serde::Serialize;

use worldwise_core::auth::APP_ROUTE;
use worldwise_core::{AuthState, FakeAuth, MemoryNavigator, Navigator, require_auth};

use crate::cli::LoginArgs;
use crate::error::CliError;
use crate::output;

use super::Session;

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

fn require_terminal(field: &str) -> Result<(), CliError> {
    if std::io::stdin().is_terminal() {
        Ok(())
    } else {
        Err(CliError::Validation {
            field: field.into(),
            reason: format!("pass --{field} when not running interactively"),
        })
    }
}

/// The signed-in state plus where the login page sent the user.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginView {
    #[serde(flatten)]
    state: AuthState,
    location: String,
}

fn detail(view: &LoginView, color: bool) -> String {
    match view.state.user {
        Some(ref user) => format!(
            "{}\n  {}{}\n  {}{}\n  {}{}",
            output::heading(&format!("Welcome, {}", user.name), color),
            output::label("Email", color),
            user.email,
            output::label("Avatar", color),
            output::link(&user.avatar, color),
            output::label("Location", color),
            view.location
        ),
        None => String::new(),
    }
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: LoginArgs, session: &Session<'_>) -> Result<(), CliError> {
    let email = match args.email {
        Some(email) => email,
        None => {
            require_terminal("email")?;
            Input::new()
                .with_prompt("Email")
                .interact_text()
                .map_err(prompt_err)?
        }
    };
    let password = match args.password {
        Some(password) => SecretString::from(password),
        None => {
            require_terminal("password")?;
            let raw = Password::new()
                .with_prompt("Password")
                .interact()
                .map_err(prompt_err)?;
            SecretString::from(raw)
        }
    };

    let mut auth = FakeAuth::new();
    if !auth.login(&email, &password) {
        return Err(CliError::AuthFailed);
    }

    // The login page replaces itself with the app, which the guard admits.
    let mut navigator = MemoryNavigator::new("/login")?;
    navigator.replace(APP_ROUTE)?;
    if !require_auth(&auth, &mut navigator)? {
        return Err(CliError::AuthFailed);
    }
    tracing::debug!(location = %navigator.location(), "signed in");

    let view = LoginView {
        state: auth.state().clone(),
        location: navigator.location().path().to_owned(),
    };
    let out = output::render_single(
        session.output,
        &view,
        |v| detail(v, session.color),
        |v| v.state.user.as_ref().map(|u| u.email.clone()).unwrap_or_default(),
    );
    output::print_output(&out, session.global.quiet);
    Ok(())
}
