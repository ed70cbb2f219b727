//! The remote calendar seam.
//!
//! The reconciler only talks to a calendar through [`CalendarService`]; the
//! binary provides the Google implementation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::error::BcsResult;
use crate::event::{NewEvent, RemoteEvent};

/// What we need to know about a calendar besides its events.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarMetadata {
    pub id: String,
    pub display_name: String,
}

#[async_trait]
pub trait CalendarService: Send + Sync {
    /// Events of `calendar_id` starting at or after `from`, ordered by start.
    async fn list_upcoming(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> BcsResult<Vec<RemoteEvent>>;

    async fn insert(&self, calendar_id: &str, event: &NewEvent) -> BcsResult<RemoteEvent>;

    async fn delete(&self, calendar_id: &str, event_id: &str) -> BcsResult<()>;

    async fn calendar_metadata(&self, calendar_id: &str) -> BcsResult<CalendarMetadata>;
}

/// Reads from the wrapped calendar but only logs the writes it is asked for.
pub struct DryRunCalendar<C> {
    inner: C,
}

impl<C> DryRunCalendar<C> {
    pub fn new(inner: C) -> Self {
        DryRunCalendar { inner }
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }
}

#[async_trait]
impl<C: CalendarService> CalendarService for DryRunCalendar<C> {
    async fn list_upcoming(
        &self,
        calendar_id: &str,
        from: DateTime<Utc>,
    ) -> BcsResult<Vec<RemoteEvent>> {
        self.inner.list_upcoming(calendar_id, from).await
    }

    async fn insert(&self, calendar_id: &str, event: &NewEvent) -> BcsResult<RemoteEvent> {
        tracing::info!(
            calendar = calendar_id,
            id = %event.id,
            summary = %event.summary,
            start = %event.window.start,
            end = %event.window.end,
            "[dry run] would insert"
        );
        Ok(event.to_remote())
    }

    async fn delete(&self, calendar_id: &str, event_id: &str) -> BcsResult<()> {
        tracing::info!(calendar = calendar_id, id = event_id, "[dry run] would delete");
        Ok(())
    }

    async fn calendar_metadata(&self, calendar_id: &str) -> BcsResult<CalendarMetadata> {
        self.inner.calendar_metadata(calendar_id).await
    }
}
