//! date::zone
//!
//! Time zones used when formatting and converting dates.
//!
//! A zone is written as `Z`, a `±HH:MM` designator, or an IANA name such
//! as `Europe/London`. [`Zone::Local`] stands for the host's zone and is
//! only produced by the `server` time zone setting.

use std::str::FromStr;

use chrono::{
    DateTime, FixedOffset, Local, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc,
};
use chrono_tz::Tz;

use super::DateError;

/// A time zone a date can be shown in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Zone {
    Utc,
    Local,
    Fixed(FixedOffset),
    Named(Tz),
}

impl Zone {
    /// The UTC offset in effect at an instant.
    pub fn offset_at(&self, instant: &DateTime<Utc>) -> FixedOffset {
        let naive = instant.naive_utc();
        match self {
            Zone::Utc => Utc.fix(),
            Zone::Local => Local.offset_from_utc_datetime(&naive).fix(),
            Zone::Fixed(offset) => *offset,
            Zone::Named(tz) => tz.offset_from_utc_datetime(&naive).fix(),
        }
    }

    /// Express an instant as wall-clock time in this zone.
    pub fn convert(&self, instant: DateTime<Utc>) -> DateTime<FixedOffset> {
        instant.with_timezone(&self.offset_at(&instant))
    }

    /// Interpret a wall-clock time as local to this zone.
    ///
    /// Ambiguous times (DST fold) take the earlier instant. Times inside a
    /// DST gap are moved forward by an hour.
    pub fn from_local(&self, naive: &NaiveDateTime) -> DateTime<FixedOffset> {
        let resolved = match self {
            Zone::Utc => resolve_local(&Utc, naive),
            Zone::Local => resolve_local(&Local, naive),
            Zone::Fixed(offset) => resolve_local(offset, naive),
            Zone::Named(tz) => resolve_local(tz, naive),
        };
        resolved.unwrap_or_else(|| Utc.from_utc_datetime(naive).fixed_offset())
    }
}

fn resolve_local<T: TimeZone>(tz: &T, naive: &NaiveDateTime) -> Option<DateTime<FixedOffset>> {
    tz.from_local_datetime(naive)
        .earliest()
        .or_else(|| {
            tz.from_local_datetime(&(*naive + TimeDelta::hours(1)))
                .earliest()
        })
        .map(|dt| dt.fixed_offset())
}

impl FromStr for Zone {
    type Err = DateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == "Z" || s == "z" {
            return Ok(Zone::Utc);
        }
        if s.starts_with('+') || s.starts_with('-') {
            return parse_designator(s)
                .map(Zone::Fixed)
                .ok_or_else(|| DateError::InvalidTimeZone(s.to_string()));
        }
        s.parse::<Tz>()
            .map(Zone::Named)
            .map_err(|_| DateError::InvalidTimeZone(s.to_string()))
    }
}

/// Parse `+HH:MM`, `-HH:MM`, `+HHMM` or `+HH`.
fn parse_designator(s: &str) -> Option<FixedOffset> {
    let (sign, rest) = s.split_at(1);
    let digits: String = rest.chars().filter(|c| *c != ':').collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    let (hours, minutes) = match digits.len() {
        2 => (digits.parse::<i32>().ok()?, 0),
        4 => (digits[..2].parse::<i32>().ok()?, digits[2..].parse::<i32>().ok()?),
        _ => return None,
    };
    if minutes >= 60 {
        return None;
    }
    let seconds = (hours * 60 + minutes) * 60;
    match sign {
        "+" => FixedOffset::east_opt(seconds),
        _ => FixedOffset::west_opt(seconds),
    }
}
