//! Clock and timezone provider
//!
//! The datetime section reads wall-clock time through the [`Clock`] trait so
//! the hook can be driven by a fixed clock in tests.

use chrono::{DateTime, Local, NaiveDateTime, Utc};
use thiserror::Error;

/// Layout of the rendered timestamp
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Error)]
pub enum ClockError {
    #[error("system clock unavailable: {0}")]
    Unavailable(String),
}

/// A local wall-clock reading plus the zone it was taken in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Timestamp {
    pub local: NaiveDateTime,
    /// Short zone name such as `UTC` or `CEST`
    pub zone: String,
}

impl Timestamp {
    pub fn new(local: NaiveDateTime, zone: impl Into<String>) -> Self {
        Self {
            local,
            zone: zone.into(),
        }
    }

    /// Render as `YYYY-MM-DD HH:MM:SS`, optionally followed by the zone name
    pub fn render(&self, include_zone: bool) -> String {
        let base = self.local.format(TIMESTAMP_FORMAT).to_string();
        if include_zone && !self.zone.is_empty() {
            format!("{} {}", base, self.zone)
        } else {
            base
        }
    }
}

/// Source of the current local time
pub trait Clock: Send + Sync {
    fn now(&self) -> Result<Timestamp, ClockError>;
}

/// Reads the operating system clock and local timezone
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Result<Timestamp, ClockError> {
        let utc = Utc::now();
        let local = utc.with_timezone(&Local);
        let zone = zone_abbreviation(&utc)
            .unwrap_or_else(|| fallback_zone(local.offset().local_minus_utc()));
        Ok(Timestamp::new(local.naive_local(), zone))
    }
}

/// Abbreviation of the system zone at `at`, e.g. `PDT`
///
/// Returns `None` when the zone cannot be identified; `TZ` wins over the
/// platform's configured zone.
fn zone_abbreviation(at: &DateTime<Utc>) -> Option<String> {
    let name = std::env::var("TZ")
        .ok()
        .map(|tz| tz.trim_start_matches(':').to_string())
        .filter(|tz| !tz.is_empty())
        .or_else(|| iana_time_zone::get_timezone().ok())?;
    let tz: chrono_tz::Tz = name.parse().ok()?;
    Some(at.with_timezone(&tz).format("%Z").to_string())
}

/// Zone token when the zone has no known name
///
/// Only a zero offset has a safe alphabetic name; any other offset yields
/// an empty zone so the rendered line carries no suffix.
fn fallback_zone(offset_secs: i32) -> String {
    if offset_secs == 0 {
        "UTC".to_string()
    } else {
        String::new()
    }
}

/// Always returns the same reading
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: Timestamp,
}

impl FixedClock {
    pub fn new(timestamp: Timestamp) -> Self {
        Self { timestamp }
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Result<Timestamp, ClockError> {
        Ok(self.timestamp.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn sample() -> Timestamp {
        let local = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(7, 5, 1)
            .unwrap();
        Timestamp::new(local, "PST")
    }

    #[test]
    fn test_render_without_zone() {
        assert_eq!(sample().render(false), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_render_with_zone() {
        assert_eq!(sample().render(true), "2024-03-09 07:05:01 PST");
    }

    #[test]
    fn test_render_skips_empty_zone() {
        let ts = Timestamp::new(sample().local, "");
        assert_eq!(ts.render(true), "2024-03-09 07:05:01");
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock::new(sample());
        assert_eq!(clock.now().unwrap(), sample());
    }

    #[test]
    fn test_system_clock_is_current() {
        let before = Local::now().naive_local();
        let reading = SystemClock::new().now().unwrap();
        let drift = (reading.local - before).num_seconds().abs();
        assert!(drift < 5, "clock drifted {}s", drift);
        assert!(!reading.zone.contains(':'));
    }

    #[test]
    fn test_unnamed_zone_fallback() {
        assert_eq!(fallback_zone(0), "UTC");
        assert_eq!(fallback_zone(3 * 3600 + 30 * 60), "");
        assert_eq!(fallback_zone(-5 * 3600), "");

        let ts = Timestamp::new(sample().local, fallback_zone(12_600));
        assert_eq!(ts.render(true), "2024-03-09 07:05:01");
    }
}
