//! Shared helpers for command handlers.

use std::future::Future;
use std::io::IsTerminal;
use std::time::Duration;

use chrono::{DateTime, NaiveDate, Utc};
use indicatif::{ProgressBar, ProgressStyle};

use worldwise_core::{CityId, CollectionState};

use crate::error::CliError;

/// Spinner on stderr while `fut` runs. Hidden when quiet or not a terminal.
pub async fn with_spinner<F: Future>(message: &str, quiet: bool, fut: F) -> F::Output {
    let bar = if quiet || !std::io::stderr().is_terminal() {
        ProgressBar::hidden()
    } else {
        let bar = ProgressBar::new_spinner();
        bar.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        bar.enable_steady_tick(Duration::from_millis(80));
        bar
    };
    bar.set_message(message.to_owned());
    let out = fut.await;
    bar.finish_and_clear();
    out
}

/// Resolve a city id against the loaded collection.
pub fn require_city(state: &CollectionState, id: u64) -> Result<CityId, CliError> {
    let id = CityId(id);
    if state.city(id).is_some() {
        return Ok(id);
    }
    Err(CliError::NotFound {
        resource_type: "city".into(),
        identifier: id.to_string(),
        list_command: "cities list".into(),
    })
}

/// Prompt for confirmation, auto-approving if `--yes` was passed.
pub fn confirm(message: &str, yes_flag: bool) -> Result<bool, CliError> {
    if yes_flag {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: message.into(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(message)
        .default(false)
        .interact()
        .map_err(|e| CliError::Io(std::io::Error::other(e)))?;
    Ok(confirmed)
}

/// Parse `--date`: `YYYY-MM-DD` (midnight UTC) or RFC 3339.
pub fn parse_visit_date(raw: &str) -> Result<DateTime<Utc>, CliError> {
    if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
        return Ok(ts.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|day| day.and_hms_opt(0, 0, 0))
        .map(|dt| dt.and_utc())
        .ok_or_else(|| CliError::Validation {
            field: "date".into(),
            reason: format!("expected YYYY-MM-DD or RFC 3339, got '{raw}'"),
        })
}
