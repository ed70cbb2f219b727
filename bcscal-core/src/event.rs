//! Calendar event records as seen by the reconciler.

use chrono::{DateTime, FixedOffset, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;

use crate::catalog::Item;
use crate::error::{BcsError, BcsResult};
use crate::event_id::EventId;
use crate::time_window::TimeWindow;

/// Start or end of a remote event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTime {
    /// Precise instant, as returned with an explicit UTC offset.
    DateTime(DateTime<FixedOffset>),
    /// All-day event boundary.
    Date(NaiveDate),
}

impl EventTime {
    /// Parse a value in the wire format of the calendar API: RFC 3339 with an
    /// explicit offset (`2025-09-01T14:30:00+02:00`), or `YYYY-MM-DD` for
    /// all-day events.
    pub fn parse_wire(s: &str) -> BcsResult<Self> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(EventTime::DateTime(dt));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(EventTime::Date)
            .map_err(|_| BcsError::parse(s, "expected RFC 3339 date-time or YYYY-MM-DD"))
    }

    /// Resolve to an instant. All-day dates are taken as local midnight in
    /// `tz`.
    pub fn to_utc(&self, tz: &Tz) -> Option<DateTime<Utc>> {
        match self {
            EventTime::DateTime(dt) => Some(dt.with_timezone(&Utc)),
            EventTime::Date(d) => tz
                .from_local_datetime(&d.and_hms_opt(0, 0, 0)?)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl From<DateTime<Utc>> for EventTime {
    fn from(dt: DateTime<Utc>) -> Self {
        EventTime::DateTime(dt.fixed_offset())
    }
}

/// Read-only snapshot of an event that already exists on a calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteEvent {
    pub id: String,
    pub summary: String,
    pub start: EventTime,
    pub end: EventTime,
}

impl RemoteEvent {
    pub fn is_self_owned(&self) -> bool {
        EventId::is_self_owned(&self.id)
    }
}

/// An event about to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub struct NewEvent {
    pub id: EventId,
    pub summary: String,
    pub location: String,
    pub description: String,
    pub window: TimeWindow,
}

impl NewEvent {
    pub fn from_item(id: EventId, item: &Item, window: TimeWindow) -> Self {
        NewEvent {
            id,
            summary: item.title.clone(),
            location: item.location.clone(),
            description: item.description.clone(),
            window,
        }
    }

    /// IANA name of the zone the window is expressed in.
    pub fn time_zone(&self) -> &'static str {
        self.window.start.timezone().name()
    }

    /// Snapshot of this event as it would be listed after insertion.
    pub fn to_remote(&self) -> RemoteEvent {
        RemoteEvent {
            id: self.id.to_string(),
            summary: self.summary.clone(),
            start: EventTime::DateTime(self.window.start.fixed_offset()),
            end: EventTime::DateTime(self.window.end.fixed_offset()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    #[test]
    fn parse_wire_datetime_keeps_offset() {
        let t = EventTime::parse_wire("2025-09-01T14:30:00+02:00").unwrap();
        let EventTime::DateTime(dt) = t else {
            panic!("expected a date-time, got {t:?}");
        };
        assert_eq!(dt.offset().local_minus_utc(), 2 * 3600);
        assert_eq!(dt.to_rfc3339(), "2025-09-01T14:30:00+02:00");
    }

    #[test]
    fn parse_wire_all_day() {
        assert_eq!(
            EventTime::parse_wire("2025-09-01").unwrap(),
            EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap())
        );
    }

    #[test]
    fn parse_wire_rejects_garbage() {
        assert!(matches!(
            EventTime::parse_wire("01/09/2025"),
            Err(BcsError::Parse { .. })
        ));
    }

    #[test]
    fn all_day_resolves_to_local_midnight() {
        let t = EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        let utc = t.to_utc(&Paris).unwrap();
        assert_eq!(utc.to_rfc3339(), "2025-08-31T22:00:00+00:00");
    }
}
