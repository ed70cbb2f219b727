//! Per-category reconciliation.
//!
//! One pass over a category:
//!
//! 1. list the calendar's upcoming events,
//! 2. keep only the ones bcscal created (ids starting with
//!    [`NAMESPACE`](crate::event_id::NAMESPACE)),
//! 3. for each item in catalog order: delete the owned events overlapping
//!    its window (when overriding), then insert the item as a new event.
//!
//! Every remote call is awaited before the next one is issued. Nothing is
//! rolled back: if an insert fails after the deletes for that item went
//! through, those events stay deleted.

use std::ops::AddAssign;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use tracing::Instrument;

use crate::calendar::CalendarService;
use crate::catalog::Category;
use crate::conflict::conflicts;
use crate::error::BcsResult;
use crate::event::{NewEvent, RemoteEvent};
use crate::event_id::EventId;

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    /// Zone the catalog's days and times are written in.
    pub timezone: Tz,
    /// Delete owned events that overlap a new item before inserting it.
    pub override_existing: bool,
}

/// What a pass did to a calendar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub inserted: usize,
    pub deleted: usize,
    /// Upcoming events left alone because bcscal did not create them.
    pub skipped_foreign: usize,
}

impl AddAssign for ReconcileReport {
    fn add_assign(&mut self, other: Self) {
        self.inserted += other.inserted;
        self.deleted += other.deleted;
        self.skipped_foreign += other.skipped_foreign;
    }
}

pub struct Reconciler<'a> {
    calendar: &'a dyn CalendarService,
    options: ReconcileOptions,
}

impl<'a> Reconciler<'a> {
    pub fn new(calendar: &'a dyn CalendarService, options: ReconcileOptions) -> Self {
        Reconciler { calendar, options }
    }

    /// Publish every item of `category`.
    pub async fn reconcile(&self, category: &Category) -> BcsResult<ReconcileReport> {
        let span = tracing::info_span!(
            "category",
            name = %category.name,
            calendar = %category.calendar_id
        );
        self.reconcile_inner(category, Utc::now()).instrument(span).await
    }

    /// Delete every upcoming event bcscal created in `category`'s calendar,
    /// without inserting anything.
    pub async fn prune(&self, category: &Category) -> BcsResult<ReconcileReport> {
        let span = tracing::info_span!(
            "prune",
            name = %category.name,
            calendar = %category.calendar_id
        );
        self.prune_inner(category, Utc::now()).instrument(span).await
    }

    async fn reconcile_inner(
        &self,
        category: &Category,
        now: DateTime<Utc>,
    ) -> BcsResult<ReconcileReport> {
        let (mut owned, mut report) = self.load_owned(category, now).await?;

        for item in &category.items {
            let window = item.window(self.options.timezone).inspect_err(|e| {
                tracing::error!(item = %item.title, "invalid item: {e}");
            })?;

            let mut deleted_for_item = Vec::new();
            if self.options.override_existing {
                let (conflicting, kept): (Vec<_>, Vec<_>) =
                    owned.into_iter().partition(|e| conflicts(e, &window));
                owned = kept;

                for existing in conflicting {
                    tracing::info!(
                        item = %item.title,
                        existing = %existing.summary,
                        id = %existing.id,
                        "deleting conflicting event"
                    );
                    self.calendar
                        .delete(&category.calendar_id, &existing.id)
                        .await
                        .inspect_err(|e| {
                            tracing::error!(item = %item.title, id = %existing.id, "delete failed: {e}");
                        })?;
                    report.deleted += 1;
                    deleted_for_item.push(existing.id);
                }
            }

            let event = NewEvent::from_item(EventId::generate(&category.name), item, window);
            tracing::info!(
                item = %item.title,
                id = %event.id,
                start = %event.window.start,
                end = %event.window.end,
                "inserting event"
            );
            self.calendar
                .insert(&category.calendar_id, &event)
                .await
                .inspect_err(|e| {
                    tracing::error!(
                        item = %item.title,
                        already_deleted = ?deleted_for_item,
                        "insert failed: {e}"
                    );
                })?;
            report.inserted += 1;
        }

        tracing::info!(
            inserted = report.inserted,
            deleted = report.deleted,
            foreign = report.skipped_foreign,
            "category done"
        );
        Ok(report)
    }

    async fn prune_inner(
        &self,
        category: &Category,
        now: DateTime<Utc>,
    ) -> BcsResult<ReconcileReport> {
        let (owned, mut report) = self.load_owned(category, now).await?;

        for existing in owned {
            tracing::info!(existing = %existing.summary, id = %existing.id, "pruning event");
            self.calendar
                .delete(&category.calendar_id, &existing.id)
                .await?;
            report.deleted += 1;
        }

        tracing::info!(deleted = report.deleted, "prune done");
        Ok(report)
    }

    /// Upcoming events of the category's calendar that bcscal created.
    async fn load_owned(
        &self,
        category: &Category,
        now: DateTime<Utc>,
    ) -> BcsResult<(Vec<RemoteEvent>, ReconcileReport)> {
        let upcoming = self
            .calendar
            .list_upcoming(&category.calendar_id, now)
            .await?;
        let total = upcoming.len();

        let owned: Vec<RemoteEvent> = upcoming
            .into_iter()
            .filter(|e| {
                let own = e.is_self_owned();
                if !own {
                    tracing::debug!(id = %e.id, summary = %e.summary, "ignoring foreign event");
                }
                own
            })
            .collect();

        let report = ReconcileReport {
            skipped_foreign: total - owned.len(),
            ..Default::default()
        };
        tracing::info!(
            upcoming = total,
            owned = owned.len(),
            "loaded existing events"
        );
        Ok((owned, report))
    }
}
