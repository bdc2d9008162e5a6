//! Clock
//!
//! Source of the current instant, in the time zone dates are displayed in.

use jiff::{Timestamp, Zoned, tz::TimeZone};

/// Source of the current instant.
pub trait Clock {
    /// The current instant, in the display time zone.
    fn now(&self) -> Zoned;
}

/// Wall clock in a fixed display time zone.
#[derive(Debug, Clone)]
pub struct SystemClock {
    time_zone: TimeZone,
}

impl SystemClock {
    /// Wall clock in the given time zone.
    pub fn new(time_zone: TimeZone) -> Self {
        Self { time_zone }
    }

    /// Wall clock in the host's time zone.
    pub fn system() -> Self {
        Self::new(TimeZone::system())
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::system()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Zoned {
        Timestamp::now().to_zoned(self.time_zone.clone())
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: Zoned,
}

impl FixedClock {
    /// Clock that always reports `now`.
    pub fn new(now: Zoned) -> Self {
        Self { now }
    }

    /// Clock stopped at `timestamp` in UTC.
    pub fn utc(timestamp: Timestamp) -> Self {
        Self::new(timestamp.to_zoned(TimeZone::UTC))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> Zoned {
        self.now.clone()
    }
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now(&self) -> Zoned {
        (**self).now()
    }
}

/// `D-M-YYYY`, no zero padding.
pub fn display_date(zoned: &Zoned) -> String {
    format!("{}-{}-{}", zoned.day(), zoned.month(), zoned.year())
}

/// `D/M/YYYY`, the Spanish short date.
pub fn locale_date(zoned: &Zoned) -> String {
    format!("{}/{}/{}", zoned.day(), zoned.month(), zoned.year())
}

/// `YYYY-MM-DD` of the instant in UTC.
pub fn iso_date(zoned: &Zoned) -> String {
    zoned.timestamp().to_zoned(TimeZone::UTC).date().to_string()
}
