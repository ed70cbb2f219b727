//! Overlap test between a catalog window and an event already on the calendar.

use chrono::{DateTime, Utc};

use crate::event::RemoteEvent;
use crate::time_window::TimeWindow;

/// Whether `existing` starts or ends inside `window`, endpoints included.
///
/// Only the endpoints of `existing` are tested: an event that begins before
/// the window and ends after it is not reported. Events whose boundaries
/// cannot be resolved never conflict.
pub fn conflicts(existing: &RemoteEvent, window: &TimeWindow) -> bool {
    let tz = window.start.timezone();
    let window_start = window.start.with_timezone(&Utc);
    let window_end = window.end.with_timezone(&Utc);
    let inside = |t: DateTime<Utc>| t >= window_start && t <= window_end;

    let start_inside = existing.start.to_utc(&tz).is_some_and(inside);
    let end_inside = existing.end.to_utc(&tz).is_some_and(inside);

    if start_inside || end_inside {
        tracing::debug!(
            event = %existing.id,
            summary = %existing.summary,
            start = %window.start,
            end = %window.end,
            "existing event overlaps window"
        );
        return true;
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::EventTime;
    use chrono::NaiveDate;
    use chrono_tz::Europe::Paris;

    fn window() -> TimeWindow {
        // 2025-09-01 14:00 -> 15:30 +02:00
        TimeWindow::build("01/09/2025", "14h00", 90, Paris).unwrap()
    }

    fn event(start: &str, end: &str) -> RemoteEvent {
        RemoteEvent {
            id: "bcscalyoga0123".to_string(),
            summary: "Yoga".to_string(),
            start: EventTime::parse_wire(start).unwrap(),
            end: EventTime::parse_wire(end).unwrap(),
        }
    }

    #[test]
    fn start_inside_window() {
        let e = event("2025-09-01T14:30:00+02:00", "2025-09-01T16:00:00+02:00");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn end_inside_window() {
        let e = event("2025-09-01T13:00:00+02:00", "2025-09-01T14:15:00+02:00");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn start_equal_to_window_start() {
        let e = event("2025-09-01T14:00:00+02:00", "2025-09-01T18:00:00+02:00");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn start_equal_to_window_end() {
        let e = event("2025-09-01T15:30:00+02:00", "2025-09-01T16:30:00+02:00");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn end_equal_to_window_start() {
        let e = event("2025-09-01T13:00:00+02:00", "2025-09-01T14:00:00+02:00");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn offsets_are_compared_as_instants() {
        // 12:45Z is 14:45 in Paris.
        let e = event("2025-09-01T12:45:00Z", "2025-09-01T13:45:00Z");
        assert!(conflicts(&e, &window()));
    }

    #[test]
    fn disjoint_events_do_not_conflict() {
        let before = event("2025-09-01T10:00:00+02:00", "2025-09-01T13:59:00+02:00");
        let after = event("2025-09-01T15:31:00+02:00", "2025-09-01T17:00:00+02:00");
        assert!(!conflicts(&before, &window()));
        assert!(!conflicts(&after, &window()));
    }

    #[test]
    fn containing_event_is_not_detected() {
        let e = event("2025-09-01T13:00:00+02:00", "2025-09-01T17:00:00+02:00");
        assert!(!conflicts(&e, &window()));
    }

    #[test]
    fn all_day_events_use_local_midnight() {
        let d = |day| EventTime::Date(NaiveDate::from_ymd_opt(2025, 9, day).unwrap());
        let e = RemoteEvent {
            id: "bcscal42".to_string(),
            summary: "Stage".to_string(),
            start: d(1),
            end: d(2),
        };
        assert!(!conflicts(&e, &window()));

        let midnight = TimeWindow::build("01/09/2025", "00h00", 60, Paris).unwrap();
        assert!(conflicts(&e, &midnight));
    }
}
