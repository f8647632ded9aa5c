//! date
//!
//! Date parsing, formatting and time zone conversion.
//!
//! # Overview
//!
//! - [`format_date`] formats an ISO 8601 string (or `"now"`) with the token
//!   language described in [`format`]
//! - [`get_date`] applies a publication's time zone setting to a date
//! - [`get_time_zone_designator`] renders an offset in minutes behind UTC
//! - [`is_date`] checks that a string parses as a date
//!
//! # Time zone settings
//!
//! | setting | behaviour |
//! |---|---|
//! | `client` | dates are kept exactly as the client sent them |
//! | `server` | dates are converted to the host's zone |
//! | IANA name or `±HH:MM` | dates are converted to that zone |
//!
//! Strings without an offset are wall-clock time in the zone being
//! formatted to (UTC if none is given). The host zone is only consulted
//! for the `server` setting.
//!
//! # Example
//!
//! ```
//! use postdata::date::{format_date, FormatOptions, SystemClock};
//!
//! let options = FormatOptions::default();
//! let formatted = format_date("2020-09-01T10:00:00Z", "d MMMM yyyy", &options, &SystemClock)
//!     .unwrap();
//! assert_eq!(formatted.as_deref(), Some("1 September 2020"));
//!
//! // An empty date is "no date", not an error
//! assert_eq!(format_date("", "yyyy", &options, &SystemClock).unwrap(), None);
//! ```

mod clock;
pub mod format;
mod zone;

pub use clock::{Clock, FixedClock, SystemClock};
pub use format::{is_date_token, resolve_locale, ParsedDate, DATE_TOKENS};
pub use zone::Zone;

use chrono::{DateTime, Local, Locale, Offset, SecondsFormat, TimeZone, Utc};
use thiserror::Error;

use format::{format_pattern, offset_designator};

/// Errors from date operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DateError {
    /// The string is not a valid ISO 8601 date.
    #[error("invalid date '{0}'")]
    Parse(String),

    /// The time zone is neither a designator nor a known IANA name.
    #[error("invalid time zone '{0}'")]
    InvalidTimeZone(String),
}

/// Pattern used when serialising zoned dates.
const ZONED_ISO_PATTERN: &str = "yyyy-MM-dd'T'HH:mm:ss.SSSXXX";

/// Pattern accepted by `datetime-local` form inputs.
const LOCAL_INPUT_PATTERN: &str = "yyyy-MM-dd'T'HH:mm";

/// Options for [`format_date`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormatOptions {
    /// Locale for month names, e.g. `en`, `de` or `fr-CA`.
    pub locale: Option<String>,
    /// Zone whose wall-clock time is shown. UTC when absent.
    pub time_zone: Option<String>,
}

impl FormatOptions {
    pub fn with_locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    pub fn with_time_zone(mut self, time_zone: impl Into<String>) -> Self {
        self.time_zone = Some(time_zone.into());
        self
    }
}

/// Format a date.
///
/// `input` is an ISO 8601 string or `"now"`, which reads `clock`.
/// Returns `Ok(None)` when `input` is empty.
///
/// # Errors
///
/// - `DateError::Parse` if `input` is not a date
/// - `DateError::InvalidTimeZone` if `options.time_zone` is not a zone
pub fn format_date(
    input: &str,
    pattern: &str,
    options: &FormatOptions,
    clock: &dyn Clock,
) -> Result<Option<String>, DateError> {
    if input.is_empty() {
        return Ok(None);
    }

    let zone = match options.time_zone.as_deref() {
        Some(tz) => tz.parse::<Zone>()?,
        None => Zone::Utc,
    };
    let locale = resolve_locale(options.locale.as_deref());

    let parsed = if input == "now" {
        ParsedDate::Instant(clock.now().fixed_offset())
    } else {
        ParsedDate::parse(input)?
    };

    Ok(Some(format_pattern(&parsed.resolve(&zone), pattern, locale)))
}

/// Format a date as wall-clock time for a `datetime-local` input.
///
/// Dates with an offset are converted into `time_zone`; dates without one
/// are taken to already be in it.
///
/// ```
/// use postdata::date::format_date_to_local;
///
/// let local = format_date_to_local("2023-08-28T12:30+01:00", "America/New_York").unwrap();
/// assert_eq!(local, "2023-08-28T07:30");
/// ```
pub fn format_date_to_local(input: &str, time_zone: &str) -> Result<String, DateError> {
    let zone = time_zone.parse::<Zone>()?;
    let parsed = ParsedDate::parse(input)?;
    Ok(format_pattern(
        &parsed.resolve(&zone),
        LOCAL_INPUT_PATTERN,
        Locale::en_US,
    ))
}

/// Apply a time zone setting to a date string.
///
/// - `client`: `date` is returned unchanged, or the current time as an
///   ISO string when empty
/// - `server`: `date` is converted to the host's zone
/// - any other value is parsed as a zone and `date` converted into it
///
/// Date-only strings keep their calendar date and gain a midnight time
/// with the zone's offset. Full timestamps are converted and serialised
/// with millisecond precision.
///
/// # Example
///
/// ```
/// use postdata::date::{get_date, SystemClock};
///
/// let date = get_date("Asia/Kolkata", "2019-02-01T10:00:00Z", &SystemClock).unwrap();
/// assert_eq!(date, "2019-02-01T15:30:00.000+05:30");
///
/// let date = get_date("Asia/Kolkata", "2019-02-01", &SystemClock).unwrap();
/// assert_eq!(date, "2019-02-01T00:00:00.000+05:30");
/// ```
pub fn get_date(setting: &str, date: &str, clock: &dyn Clock) -> Result<String, DateError> {
    if setting == "client" {
        if date.is_empty() {
            return Ok(clock.now().to_rfc3339_opts(SecondsFormat::Millis, true));
        }
        return Ok(date.to_string());
    }

    let zone = if setting == "server" {
        Zone::Local
    } else {
        setting.parse::<Zone>()?
    };

    if date.is_empty() {
        return Ok(format_pattern(
            &zone.convert(clock.now()),
            ZONED_ISO_PATTERN,
            Locale::en_US,
        ));
    }

    let parsed = ParsedDate::parse(date)?;

    if let Some(day) = ParsedDate::date_only(date) {
        let midnight = parsed.instant();
        let offset = offset_designator(&zone.offset_at(&midnight));
        return Ok(format!("{}T00:00:00.000{}", day.format("%Y-%m-%d"), offset));
    }

    Ok(format_pattern(
        &parsed.resolve(&zone),
        ZONED_ISO_PATTERN,
        Locale::en_US,
    ))
}

/// Render an offset as a time zone designator.
///
/// `minutes` follows the "minutes behind UTC" convention: zones east of
/// UTC are negative. So `-60` renders `+01:00`, `60` renders `-01:00` and
/// `0` renders `Z`.
///
/// ```
/// use postdata::date::get_time_zone_designator;
///
/// assert_eq!(get_time_zone_designator(0), "Z");
/// assert_eq!(get_time_zone_designator(-330), "+05:30");
/// assert_eq!(get_time_zone_designator(360), "-06:00");
/// ```
pub fn get_time_zone_designator(minutes: i32) -> String {
    if minutes == 0 {
        return "Z".to_string();
    }
    let sign = if minutes < 0 { '+' } else { '-' };
    let abs = minutes.unsigned_abs();
    format!("{}{:02}:{:02}", sign, abs / 60, abs % 60)
}

/// Designator for the host's zone at the clock's current instant.
pub fn local_time_zone_designator(clock: &dyn Clock) -> String {
    let now = clock.now();
    let east = Local.offset_from_utc_datetime(&now.naive_utc()).fix();
    get_time_zone_designator(-east.local_minus_utc() / 60)
}

/// Offset of a zone at an instant, in minutes behind UTC.
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use postdata::date::get_time_zone_offset;
///
/// let summer = Utc.with_ymd_and_hms(2020, 7, 1, 0, 0, 0).unwrap();
/// assert_eq!(get_time_zone_offset("Europe/London", summer).unwrap(), -60);
/// ```
pub fn get_time_zone_offset(time_zone: &str, instant: DateTime<Utc>) -> Result<i32, DateError> {
    let zone = time_zone.parse::<Zone>()?;
    Ok(-zone.offset_at(&instant).local_minus_utc() / 60)
}

/// Whether a string parses as a date. Never fails.
pub fn is_date(input: &str) -> bool {
    ParsedDate::parse(input).is_ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed() -> FixedClock {
        FixedClock::new(Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap())
    }

    mod format_date {
        use super::*;

        #[test]
        fn empty_input_is_none() {
            let result = format_date("", "yyyy", &FormatOptions::default(), &fixed());
            assert_eq!(result, Ok(None));
        }

        #[test]
        fn now_reads_the_clock() {
            let result = format_date("now", "yyyy-MM-dd", &FormatOptions::default(), &fixed());
            assert_eq!(result, Ok(Some("2020-01-01".to_string())));
        }

        #[test]
        fn time_zone_changes_wall_clock() {
            let options = FormatOptions::default().with_time_zone("America/New_York");
            let result = format_date("2020-01-01T03:00:00Z", "yyyy-MM-dd HH", &options, &fixed());
            assert_eq!(result, Ok(Some("2019-12-31 22".to_string())));
        }

        #[test]
        fn floating_input_stays_in_zone() {
            let options = FormatOptions::default().with_time_zone("Asia/Tokyo");
            let result = format_date("2020-01-01", "yyyy/MM/dd HH:mm", &options, &fixed());
            assert_eq!(result, Ok(Some("2020/01/01 00:00".to_string())));
        }

        #[test]
        fn locale_month_names() {
            let options = FormatOptions::default().with_locale("de");
            let result = format_date("2020-01-15", "MMMM", &options, &fixed());
            assert_eq!(result, Ok(Some("Januar".to_string())));
        }

        #[test]
        fn unknown_locale_falls_back() {
            let options = FormatOptions::default().with_locale("tlh");
            let result = format_date("2020-09-15", "MMM", &options, &fixed());
            assert_eq!(result, Ok(Some("Sep".to_string())));
        }

        #[test]
        fn errors() {
            assert_eq!(
                format_date("yesterday", "yyyy", &FormatOptions::default(), &fixed()),
                Err(DateError::Parse("yesterday".to_string()))
            );
            let options = FormatOptions::default().with_time_zone("Nowhere/Special");
            assert_eq!(
                format_date("2020-01-01", "yyyy", &options, &fixed()),
                Err(DateError::InvalidTimeZone("Nowhere/Special".to_string()))
            );
        }
    }

    mod get_date {
        use super::*;

        #[test]
        fn client_passes_through() {
            assert_eq!(
                get_date("client", "2019-02-01T10:00+05:00", &fixed()).unwrap(),
                "2019-02-01T10:00+05:00"
            );
        }

        #[test]
        fn client_stamps_now() {
            assert_eq!(
                get_date("client", "", &fixed()).unwrap(),
                "2020-01-01T00:00:00.000Z"
            );
        }

        #[test]
        fn zone_stamps_now() {
            assert_eq!(
                get_date("Europe/Paris", "", &fixed()).unwrap(),
                "2020-01-01T01:00:00.000+01:00"
            );
        }

        #[test]
        fn full_timestamp_is_converted() {
            assert_eq!(
                get_date("America/Los_Angeles", "2019-07-01T12:00:00.250Z", &fixed()).unwrap(),
                "2019-07-01T05:00:00.250-07:00"
            );
            assert_eq!(
                get_date("UTC", "2019-07-01T12:00:00+02:00", &fixed()).unwrap(),
                "2019-07-01T10:00:00.000Z"
            );
        }

        #[test]
        fn short_date_is_not_shifted() {
            assert_eq!(
                get_date("America/Los_Angeles", "2019-02-01", &fixed()).unwrap(),
                "2019-02-01T00:00:00.000-08:00"
            );
            assert_eq!(
                get_date("Europe/London", "2019-02-01", &fixed()).unwrap(),
                "2019-02-01T00:00:00.000Z"
            );
        }

        #[test]
        fn space_separated_timestamp_is_converted() {
            assert_eq!(
                get_date("UTC", "2019-02-01 10:00", &fixed()).unwrap(),
                "2019-02-01T10:00:00.000Z"
            );
            assert_eq!(
                get_date("Asia/Kolkata", "2019-02-01 10:00:00Z", &fixed()).unwrap(),
                "2019-02-01T15:30:00.000+05:30"
            );
        }

        #[test]
        fn server_converts_to_host_zone() {
            let instant = Utc.with_ymd_and_hms(2019, 7, 1, 12, 0, 0).unwrap();
            let local = instant.with_timezone(&Local);
            let expected = format!(
                "{}{}",
                local.format("%Y-%m-%dT%H:%M:%S%.3f"),
                host_designator(local.offset().fix())
            );
            assert_eq!(
                get_date("server", "2019-07-01T12:00:00Z", &fixed()).unwrap(),
                expected
            );
        }

        #[test]
        fn server_short_date_keeps_wall_clock() {
            let midnight = Utc.with_ymd_and_hms(2019, 2, 1, 0, 0, 0).unwrap();
            let offset = Local.offset_from_utc_datetime(&midnight.naive_utc()).fix();
            assert_eq!(
                get_date("server", "2019-02-01", &fixed()).unwrap(),
                format!("2019-02-01T00:00:00.000{}", host_designator(offset))
            );
        }

        #[test]
        fn server_stamps_now() {
            let local = fixed().now().with_timezone(&Local);
            let expected = format!(
                "{}{}",
                local.format("%Y-%m-%dT%H:%M:%S%.3f"),
                host_designator(local.offset().fix())
            );
            assert_eq!(get_date("server", "", &fixed()).unwrap(), expected);
        }

        fn host_designator(offset: chrono::FixedOffset) -> String {
            if offset.local_minus_utc() == 0 {
                "Z".to_string()
            } else {
                offset.to_string()
            }
        }

        #[test]
        fn invalid_inputs() {
            assert!(matches!(
                get_date("Not/AZone", "2019-02-01", &fixed()),
                Err(DateError::InvalidTimeZone(_))
            ));
            assert!(matches!(
                get_date("UTC", "31/01/2019", &fixed()),
                Err(DateError::Parse(_))
            ));
        }
    }

    #[test]
    fn designators() {
        assert_eq!(get_time_zone_designator(0), "Z");
        assert_eq!(get_time_zone_designator(-60), "+01:00");
        assert_eq!(get_time_zone_designator(60), "-01:00");
        assert_eq!(get_time_zone_designator(-345), "+05:45");
        assert_eq!(get_time_zone_designator(570), "-09:30");
    }

    #[test]
    fn local_designator_is_well_formed() {
        let designator = local_time_zone_designator(&fixed());
        assert!(designator == "Z" || designator.len() == 6, "{designator}");
    }

    #[test]
    fn time_zone_offsets() {
        let winter = Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(get_time_zone_offset("Europe/London", winter), Ok(0));
        assert_eq!(get_time_zone_offset("Asia/Kolkata", winter), Ok(-330));
        assert_eq!(get_time_zone_offset("America/Chicago", winter), Ok(360));
        assert!(get_time_zone_offset("Bogus", winter).is_err());
    }

    #[test]
    fn format_to_local() {
        assert_eq!(
            format_date_to_local("2023-08-28T12:30", "Europe/London").unwrap(),
            "2023-08-28T12:30"
        );
        assert_eq!(
            format_date_to_local("2023-08-28T11:30:00Z", "Europe/London").unwrap(),
            "2023-08-28T12:30"
        );
    }

    #[test]
    fn is_date_never_panics() {
        assert!(is_date("2020-01-01"));
        assert!(is_date("2020-01-01T10:00:00.000+01:00"));
        assert!(!is_date(""));
        assert!(!is_date("now"));
        assert!(!is_date("not a date"));
        assert!(!is_date("2020-02-31"));
    }
}
