//! date::format
//!
//! ISO 8601 parsing and the token pattern language.
//!
//! # Pattern syntax
//!
//! A pattern is scanned left to right. A run of the same ASCII letter forms
//! one token (`yyyy`, `MM`, `d`). Known tokens are replaced by the date
//! component; unknown runs are copied through unchanged. Text between single
//! quotes is literal and `''` produces a single quote.
//!
//! | token | meaning |
//! |---|---|
//! | `y` / `yyyy` | calendar year, unpadded / padded to 4 |
//! | `M` / `MM` | month number, unpadded / padded |
//! | `MMM` / `MMMM` | month name, abbreviated / full |
//! | `w` / `ww` | ISO week number, unpadded / padded |
//! | `D` / `DDD` | day of year, unpadded / padded to 3 |
//! | `d` / `dd` | day of month, unpadded / padded |
//! | `h` / `hh` | hour 1-12, unpadded / padded |
//! | `H` / `HH` | hour 0-23, unpadded / padded |
//! | `m` / `mm` | minute, unpadded / padded |
//! | `s` / `ss` | second, unpadded / padded |
//! | `t` / `T` | UNIX epoch seconds / milliseconds |
//! | `SSS` | milliseconds, padded to 3 |
//! | `XXX` | offset designator, `Z` or `±HH:MM` |

use chrono::{
    DateTime, Datelike, FixedOffset, Locale, NaiveDate, NaiveDateTime, NaiveTime, Timelike, Utc,
};

use super::zone::Zone;
use super::{get_time_zone_designator, DateError};

/// Tokens recognised inside path templates.
pub const DATE_TOKENS: &[&str] = &[
    "y", "yyyy", "M", "MM", "MMM", "MMMM", "w", "ww", "D", "DDD", "d", "dd", "h", "hh", "H", "HH",
    "m", "mm", "s", "ss", "t", "T",
];

/// Whether a template token names a date component.
pub fn is_date_token(token: &str) -> bool {
    DATE_TOKENS.contains(&token)
}

/// A parsed ISO 8601 string.
///
/// Strings carrying an offset denote an instant. Strings without one are
/// wall-clock times that only become an instant once a zone is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParsedDate {
    Instant(DateTime<FixedOffset>),
    Floating(NaiveDateTime),
}

const OFFSET_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S%.f%:z",
    "%Y-%m-%dT%H:%M%:z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M%z",
];

const FLOATING_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"];

impl ParsedDate {
    /// Parse an ISO 8601 date, date-time or date-time with offset.
    ///
    /// # Errors
    ///
    /// Returns `DateError::Parse` if the string matches none of the
    /// accepted shapes or names an impossible date.
    pub fn parse(input: &str) -> Result<Self, DateError> {
        let trimmed = input.trim();

        // Accept a space between date and time
        let mut normalised = trimmed.to_string();
        if normalised.len() > 10 && normalised.as_bytes()[10] == b' ' {
            normalised.replace_range(10..11, "T");
        }
        if let Some(rest) = normalised
            .strip_suffix('Z')
            .or_else(|| normalised.strip_suffix('z'))
        {
            normalised = format!("{rest}+00:00");
        }

        for format in OFFSET_FORMATS {
            if let Ok(dt) = DateTime::parse_from_str(&normalised, format) {
                return Ok(ParsedDate::Instant(dt));
            }
        }

        for format in FLOATING_FORMATS {
            if let Ok(naive) = NaiveDateTime::parse_from_str(&normalised, format) {
                return Ok(ParsedDate::Floating(naive));
            }
        }

        NaiveDate::parse_from_str(&normalised, "%Y-%m-%d")
            .map(|date| ParsedDate::Floating(date.and_time(NaiveTime::MIN)))
            .map_err(|_| DateError::Parse(input.to_string()))
    }

    /// The calendar date of an input that has no time component.
    ///
    /// `2019-02-01` is date-only; `2019-02-01 10:00` and
    /// `2019-02-01T00:00` are not.
    pub fn date_only(input: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").ok()
    }

    /// Wall-clock time of this date in a zone.
    ///
    /// Floating times are read as local to `zone`.
    pub fn resolve(&self, zone: &Zone) -> DateTime<FixedOffset> {
        match self {
            ParsedDate::Instant(dt) => zone.convert(dt.with_timezone(&Utc)),
            ParsedDate::Floating(naive) => zone.from_local(naive),
        }
    }

    /// The instant, reading floating times as UTC.
    pub fn instant(&self) -> DateTime<Utc> {
        self.resolve(&Zone::Utc).with_timezone(&Utc)
    }
}

/// Format a zoned date using the token pattern language.
pub fn format_pattern(dt: &DateTime<FixedOffset>, pattern: &str, locale: Locale) -> String {
    let mut out = String::with_capacity(pattern.len() + 8);
    let mut chars = pattern.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '\'' {
            if chars.peek() == Some(&'\'') {
                chars.next();
                out.push('\'');
                continue;
            }
            while let Some(ch) = chars.next() {
                if ch != '\'' {
                    out.push(ch);
                } else if chars.peek() == Some(&'\'') {
                    chars.next();
                    out.push('\'');
                } else {
                    break;
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let mut len = 1;
            while chars.peek() == Some(&c) {
                chars.next();
                len += 1;
            }
            match render_token(dt, c, len, locale) {
                Some(value) => out.push_str(&value),
                None => out.extend(std::iter::repeat(c).take(len)),
            }
            continue;
        }

        out.push(c);
    }

    out
}

fn render_token(dt: &DateTime<FixedOffset>, letter: char, len: usize, locale: Locale) -> Option<String> {
    let value = match (letter, len) {
        ('y', 1) => dt.year().to_string(),
        ('y', 4) => format!("{:04}", dt.year()),
        ('M', 1) => dt.month().to_string(),
        ('M', 2) => format!("{:02}", dt.month()),
        ('M', 3) => dt.format_localized("%b", locale).to_string(),
        ('M', 4) => dt.format_localized("%B", locale).to_string(),
        ('w', 1) => dt.iso_week().week().to_string(),
        ('w', 2) => format!("{:02}", dt.iso_week().week()),
        ('D', 1) => dt.ordinal().to_string(),
        ('D', 3) => format!("{:03}", dt.ordinal()),
        ('d', 1) => dt.day().to_string(),
        ('d', 2) => format!("{:02}", dt.day()),
        ('h', 1) => dt.hour12().1.to_string(),
        ('h', 2) => format!("{:02}", dt.hour12().1),
        ('H', 1) => dt.hour().to_string(),
        ('H', 2) => format!("{:02}", dt.hour()),
        ('m', 1) => dt.minute().to_string(),
        ('m', 2) => format!("{:02}", dt.minute()),
        ('s', 1) => dt.second().to_string(),
        ('s', 2) => format!("{:02}", dt.second()),
        ('t', 1) => dt.timestamp().to_string(),
        ('T', 1) => dt.timestamp_millis().to_string(),
        ('S', 3) => format!("{:03}", dt.timestamp_subsec_millis().min(999)),
        ('X', 3) => offset_designator(dt.offset()),
        _ => return None,
    };
    Some(value)
}

/// `Z` for UTC, otherwise `±HH:MM` east of UTC.
pub(crate) fn offset_designator(offset: &FixedOffset) -> String {
    get_time_zone_designator(-offset.local_minus_utc() / 60)
}

/// Map a locale name such as `en`, `en-GB` or `fr_FR` to a chrono locale.
///
/// Bare language codes pick their most common region. Unknown names fall
/// back to `en_US`.
pub fn resolve_locale(name: Option<&str>) -> Locale {
    let Some(name) = name.filter(|n| !n.is_empty()) else {
        return Locale::en_US;
    };
    let normalised = name.replace('-', "_");
    if let Ok(locale) = Locale::try_from(normalised.as_str()) {
        return locale;
    }

    let language = normalised.split('_').next().unwrap_or_default();
    match language.to_ascii_lowercase().as_str() {
        "cs" => Locale::cs_CZ,
        "da" => Locale::da_DK,
        "de" => Locale::de_DE,
        "es" => Locale::es_ES,
        "fi" => Locale::fi_FI,
        "fr" => Locale::fr_FR,
        "hi" => Locale::hi_IN,
        "id" => Locale::id_ID,
        "it" => Locale::it_IT,
        "ja" => Locale::ja_JP,
        "ko" => Locale::ko_KR,
        "nb" => Locale::nb_NO,
        "nl" => Locale::nl_NL,
        "pl" => Locale::pl_PL,
        "pt" => Locale::pt_PT,
        "ru" => Locale::ru_RU,
        "sv" => Locale::sv_SE,
        "tr" => Locale::tr_TR,
        "uk" => Locale::uk_UA,
        "zh" => Locale::zh_CN,
        _ => Locale::en_US,
    }
}
