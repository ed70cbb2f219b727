//! Google Calendar implementation of [`CalendarService`].
//!
//! Credentials and session live in ~/.config/bcscal/google/:
//!   app_config.toml  OAuth client id and secret (user-provided)
//!   session.toml     access and refresh tokens (written by `bcscal auth`)

pub mod app_config;
pub mod auth;
pub mod convert;
pub mod session;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;
use bcscal_core::{BcsError, BcsResult, CalendarMetadata, CalendarService, NewEvent, RemoteEvent};
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use google_calendar::Client;
use google_calendar::types::{MinAccessRole, OrderBy, SendUpdates};

use crate::settings;
use convert::{from_google_event, to_google_event};
use session::Session;

pub const SCOPES: &[&str] = &["https://www.googleapis.com/auth/calendar"];

const REDIRECT_PORT: u16 = 8085;

/// Google's alias for the user's main calendar
const PRIMARY_CALENDAR_ID: &str = "primary";

pub fn redirect_uri() -> String {
    format!("http://localhost:{}/callback", REDIRECT_PORT)
}

pub fn redirect_address() -> String {
    format!("127.0.0.1:{}", REDIRECT_PORT)
}

/// ~/.config/bcscal/google
pub fn base_dir() -> Result<PathBuf> {
    Ok(settings::config_dir()?.join("google"))
}

pub struct GoogleCalendar {
    client: Client,
}

impl GoogleCalendar {
    /// Open a client from the stored session, refreshing the token if needed.
    pub async fn connect(base_dir: &Path) -> Result<Self> {
        let session = Session::load_valid(base_dir)
            .await
            .context("Could not open a Google Calendar session")?;

        Ok(GoogleCalendar {
            client: session.client(),
        })
    }
}

fn calendar_error(action: &str, calendar_id: &str, e: impl std::fmt::Display) -> BcsError {
    BcsError::Calendar(format!("Failed to {action} on calendar {calendar_id}: {e}"))
}

#[async_trait]
impl CalendarService for GoogleCalendar {
    async fn list_upcoming(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> BcsResult<Vec<RemoteEvent>> {
        let time_min = from.to_rfc3339();

        let response = self
            .client
            .events()
            .list_all(
                calendar_id,
                "",
                0,
                OrderBy::default(),
                &[],
                "", // search query
                &[],
                false,
                false,
                true, // expand recurring events into instances
                "",
                &time_min,
                "",
                "",
            )
            .await
            .map_err(|e| calendar_error("list events", calendar_id, e))?;

        let mut events: Vec<RemoteEvent> = response
            .body
            .into_iter()
            .filter_map(from_google_event)
            .collect();
        events.sort_by_key(|e| e.start.to_utc(&Tz::UTC));

        tracing::debug!(calendar = calendar_id, count = events.len(), "listed upcoming events");
        Ok(events)
    }

    async fn insert(&self, calendar_id: &str, event: &NewEvent) -> BcsResult<RemoteEvent> {
        let response = self
            .client
            .events()
            .insert(
                calendar_id,
                0,
                0,
                false,
                SendUpdates::None,
                false,
                &to_google_event(event),
            )
            .await
            .map_err(|e| calendar_error(&format!("insert '{}'", event.summary), calendar_id, e))?;

        from_google_event(response.body).ok_or_else(|| {
            BcsError::Calendar(format!(
                "Google returned an incomplete event for '{}'",
                event.summary
            ))
        })
    }

    async fn delete(&self, calendar_id: &str, event_id: &str) -> BcsResult<()> {
        let result = self
            .client
            .events()
            .delete(calendar_id, event_id, false, SendUpdates::None)
            .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) => {
                let error_str = e.to_string();
                if error_str.contains("410") || error_str.contains("Gone") {
                    tracing::debug!(id = event_id, "event already deleted");
                    Ok(())
                } else {
                    Err(calendar_error(&format!("delete {event_id}"), calendar_id, e))
                }
            }
        }
    }

    async fn calendar_metadata(&self, calendar_id: &str) -> BcsResult<CalendarMetadata> {
        let calendars = self
            .client
            .calendar_list()
            .list_all(MinAccessRole::default(), false, false)
            .await
            .map_err(|e| calendar_error("read metadata", calendar_id, e))?
            .body;

        calendars
            .into_iter()
            .find(|c| {
                c.id == calendar_id || (calendar_id == PRIMARY_CALENDAR_ID && c.primary)
            })
            .map(|c| CalendarMetadata {
                id: c.id,
                display_name: if c.summary.is_empty() {
                    "(unnamed)".to_string()
                } else {
                    c.summary
                },
            })
            .ok_or_else(|| {
                BcsError::Calendar(format!(
                    "Calendar {calendar_id} is not in this account's calendar list"
                ))
            })
    }
}
