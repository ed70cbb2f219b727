//! Turning catalog day/time strings into concrete instants.

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

use crate::error::{BcsError, BcsResult};

/// Zone the catalog is written in unless configured otherwise.
pub const DEFAULT_TIMEZONE: &str = "Europe/Paris";

const DAY_FORMAT: &str = "%d/%m/%Y";
const TIME_FORMAT: &str = "%Hh%M";

/// Parse an IANA zone name such as `Europe/Paris`.
pub fn parse_timezone(name: &str) -> BcsResult<Tz> {
    name.parse::<Tz>()
        .map_err(|_| BcsError::UnknownTimezone(name.to_string()))
}

/// Start and end of one catalog item, in civil time of the configured zone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
}

impl TimeWindow {
    /// Build the window for an item starting on `day` (`DD/MM/YYYY`) at
    /// `start_time` (`HHhMM`, e.g. `14h30`) and lasting `duration_minutes`.
    ///
    /// Local times repeated by the autumn DST change resolve to the earlier
    /// instant (summer offset). Local times skipped by the spring change are
    /// rejected with [`BcsError::NonexistentLocalTime`].
    pub fn build(day: &str, start_time: &str, duration_minutes: u32, tz: Tz) -> BcsResult<Self> {
        if duration_minutes == 0 {
            return Err(BcsError::parse("0", "duration must be at least one minute"));
        }

        let date = NaiveDate::parse_from_str(day.trim(), DAY_FORMAT)
            .map_err(|e| BcsError::parse(day, format!("expected DD/MM/YYYY ({e})")))?;
        let time = NaiveTime::parse_from_str(start_time.trim(), TIME_FORMAT)
            .map_err(|e| BcsError::parse(start_time, format!("expected HHhMM ({e})")))?;
        let naive = date.and_time(time);

        let start = tz.from_local_datetime(&naive).earliest().ok_or_else(|| {
            BcsError::NonexistentLocalTime(naive.to_string(), tz.name().to_string())
        })?;
        let end = start + Duration::minutes(i64::from(duration_minutes));

        tracing::debug!(%start, %end, day, start_time, duration_minutes, "built time window");
        Ok(TimeWindow { start, end })
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono_tz::Europe::Paris;

    #[test]
    fn summer_item_gets_cest_offset() {
        let w = TimeWindow::build("01/09/2025", "14h00", 90, Paris).unwrap();
        assert_eq!(w.start.to_rfc3339(), "2025-09-01T14:00:00+02:00");
        assert_eq!(w.end.to_rfc3339(), "2025-09-01T15:30:00+02:00");
    }

    #[test]
    fn winter_item_gets_cet_offset() {
        let w = TimeWindow::build("15/01/2026", "09h15", 60, Paris).unwrap();
        assert_eq!(w.start.to_rfc3339(), "2026-01-15T09:15:00+01:00");
        assert_eq!(w.end.to_rfc3339(), "2026-01-15T10:15:00+01:00");
    }

    #[test]
    fn end_minus_start_is_duration() {
        for minutes in [1, 45, 90, 24 * 60, 3 * 24 * 60] {
            let w = TimeWindow::build("20/06/2025", "18h30", minutes, Paris).unwrap();
            assert_eq!(w.duration(), Duration::minutes(i64::from(minutes)));
        }
    }

    #[test]
    fn duration_holds_across_dst_change() {
        // Spans the 2025-10-26 fall-back: wall clock moves 2h, elapsed is 3h.
        let w = TimeWindow::build("26/10/2025", "01h00", 180, Paris).unwrap();
        assert_eq!(w.duration(), Duration::minutes(180));
        assert_eq!(w.start.to_rfc3339(), "2025-10-26T01:00:00+02:00");
        assert_eq!(w.end.to_rfc3339(), "2025-10-26T03:00:00+01:00");
    }

    #[test]
    fn building_is_deterministic() {
        let a = TimeWindow::build("01/09/2025", "14h00", 90, Paris).unwrap();
        let b = TimeWindow::build("01/09/2025", "14h00", 90, Paris).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn ambiguous_local_time_picks_earlier_offset() {
        let w = TimeWindow::build("26/10/2025", "02h30", 30, Paris).unwrap();
        assert_eq!(w.start.to_rfc3339(), "2025-10-26T02:30:00+02:00");
    }

    #[test]
    fn nonexistent_local_time_is_rejected() {
        let err = TimeWindow::build("30/03/2025", "02h30", 30, Paris).unwrap_err();
        assert!(matches!(err, BcsError::NonexistentLocalTime(..)), "{err}");
    }

    #[test]
    fn malformed_inputs_are_parse_errors() {
        for (day, time) in [
            ("2025-09-01", "14h00"),
            ("01/09/2025", "14:00"),
            ("31/02/2025", "14h00"),
            ("01/09/2025", "25h00"),
            ("", "14h00"),
        ] {
            let err = TimeWindow::build(day, time, 60, Paris).unwrap_err();
            assert!(matches!(err, BcsError::Parse { .. }), "{day} {time}: {err}");
        }
    }

    #[test]
    fn zero_duration_is_rejected() {
        assert!(matches!(
            TimeWindow::build("01/09/2025", "14h00", 0, Paris),
            Err(BcsError::Parse { .. })
        ));
    }

    #[test]
    fn timezone_names() {
        assert_eq!(parse_timezone(DEFAULT_TIMEZONE).unwrap(), Paris);
        assert!(matches!(
            parse_timezone("Mars/Olympus"),
            Err(BcsError::UnknownTimezone(_))
        ));
    }
}
