//! Conversions between Google Calendar API events and bcscal's event records.

use bcscal_core::{EventTime, NewEvent, RemoteEvent};
use chrono::Utc;
use google_calendar::types::EventDateTime;

fn from_google_time(time: Option<&EventDateTime>) -> Option<EventTime> {
    let time = time?;
    if let Some(dt) = time.date_time {
        Some(EventTime::from(dt))
    } else {
        time.date.map(EventTime::Date)
    }
}

/// Convert a Google event to a [`RemoteEvent`].
///
/// Cancelled events and events without an id or boundaries are dropped.
pub fn from_google_event(event: google_calendar::types::Event) -> Option<RemoteEvent> {
    if event.id.is_empty() || event.status == "cancelled" {
        return None;
    }

    let start = from_google_time(event.start.as_ref())?;
    let end = from_google_time(event.end.as_ref())?;

    Some(RemoteEvent {
        id: event.id,
        summary: if event.summary.is_empty() {
            "(No title)".to_string()
        } else {
            event.summary
        },
        start,
        end,
    })
}

/// Convert a [`NewEvent`] to the body of a Google insert request.
pub fn to_google_event(event: &NewEvent) -> google_calendar::types::Event {
    let time_zone = event.time_zone().to_string();

    google_calendar::types::Event {
        id: event.id.to_string(),
        summary: event.summary.clone(),
        location: event.location.clone(),
        description: event.description.clone(),
        start: Some(EventDateTime {
            date: None,
            date_time: Some(event.window.start.with_timezone(&Utc)),
            time_zone: time_zone.clone(),
        }),
        end: Some(EventDateTime {
            date: None,
            date_time: Some(event.window.end.with_timezone(&Utc)),
            time_zone,
        }),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bcscal_core::{EventId, Item, TimeWindow};
    use chrono::NaiveDate;
    use chrono_tz::Europe::Paris;
    use pretty_assertions::assert_eq;

    fn new_event() -> NewEvent {
        let item = Item {
            title: "Yoga doux".into(),
            location: "Salle 2".into(),
            description: "Cours".into(),
            start_day: "01/09/2025".into(),
            start_time: "14h00".into(),
            duration: 90,
        };
        let window = TimeWindow::build("01/09/2025", "14h00", 90, Paris).unwrap();
        NewEvent::from_item(EventId::generate("yoga"), &item, window)
    }

    #[test]
    fn new_event_keeps_instants_and_zone() {
        let event = new_event();
        let google = to_google_event(&event);

        assert_eq!(google.id, event.id.to_string());
        assert_eq!(google.summary, "Yoga doux");
        assert_eq!(google.location, "Salle 2");
        let start = google.start.unwrap();
        assert_eq!(start.time_zone, "Europe/Paris");
        assert_eq!(
            start.date_time.unwrap().to_rfc3339(),
            "2025-09-01T12:00:00+00:00"
        );
        assert_eq!(
            google.end.unwrap().date_time.unwrap().to_rfc3339(),
            "2025-09-01T13:30:00+00:00"
        );
    }

    #[test]
    fn inserted_event_reads_back() {
        let event = new_event();
        let remote = from_google_event(to_google_event(&event)).unwrap();
        assert_eq!(remote.id, event.id.to_string());
        assert!(remote.is_self_owned());
    }

    #[test]
    fn all_day_event_uses_date() {
        let day = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let google = google_calendar::types::Event {
            id: "holiday1".into(),
            summary: String::new(),
            start: Some(EventDateTime {
                date: Some(day),
                date_time: None,
                time_zone: String::new(),
            }),
            end: Some(EventDateTime {
                date: day.succ_opt(),
                date_time: None,
                time_zone: String::new(),
            }),
            ..Default::default()
        };

        let remote = from_google_event(google).unwrap();
        assert_eq!(remote.summary, "(No title)");
        assert_eq!(remote.start, EventTime::Date(day));
        assert!(!remote.is_self_owned());
    }

    #[test]
    fn cancelled_and_incomplete_events_are_dropped() {
        let cancelled = google_calendar::types::Event {
            id: "bcscal01".into(),
            status: "cancelled".into(),
            ..Default::default()
        };
        assert!(from_google_event(cancelled).is_none());

        let no_start = google_calendar::types::Event {
            id: "bcscal02".into(),
            ..Default::default()
        };
        assert!(from_google_event(no_start).is_none());
    }
}
