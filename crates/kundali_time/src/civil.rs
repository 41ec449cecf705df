//! Civil birth time: parsing wall-clock input and localising it through the
//! IANA time-zone database.
//!
//! Accepted dates are `YYYY-MM-DD` and `DD/MM/YYYY`; times are `HH:MM` or
//! `HH:MM:SS`. A wall-clock time repeated by a DST fall-back resolves to
//! the later (standard-time) instant; one skipped by a spring-forward is an
//! error.

use chrono::{
    DateTime, Datelike, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Timelike, Utc,
};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::TimeError;
use crate::julian::{jd_midnight, utc_to_jd};

const DATE_FORMATS: [&str; 2] = ["%Y-%m-%d", "%d/%m/%Y"];
const TIME_FORMATS: [&str; 2] = ["%H:%M:%S", "%H:%M"];

/// Parse a calendar date in either accepted format.
pub fn parse_date(s: &str) -> Result<NaiveDate, TimeError> {
    let s = s.trim();
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(s, fmt).ok())
        .ok_or_else(|| {
            TimeError::invalid("date", format!("'{s}' is not YYYY-MM-DD or DD/MM/YYYY"))
        })
}

/// Parse a wall-clock time, `HH:MM` or `HH:MM:SS`.
pub fn parse_time(s: &str) -> Result<NaiveTime, TimeError> {
    let s = s.trim();
    TIME_FORMATS
        .iter()
        .find_map(|fmt| NaiveTime::parse_from_str(s, fmt).ok())
        .ok_or_else(|| TimeError::invalid("time", format!("'{s}' is not HH:MM or HH:MM:SS")))
}

/// Parse separate date and time fields.
pub fn parse_birth_datetime(date: &str, time: &str) -> Result<NaiveDateTime, TimeError> {
    Ok(parse_date(date)?.and_time(parse_time(time)?))
}

/// Parse `<date> <time>` or a bare date (midnight).
pub fn parse_query_datetime(s: &str) -> Result<NaiveDateTime, TimeError> {
    let s = s.trim();
    match s.split_once(char::is_whitespace) {
        Some((date, time)) => parse_birth_datetime(date, time),
        None => Ok(parse_date(s)?.and_time(NaiveTime::MIN)),
    }
}

/// Parse an IANA zone name such as `Asia/Kolkata`.
pub fn parse_timezone(name: &str) -> Result<Tz, TimeError> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| TimeError::invalid("timezone", format!("unknown zone '{}'", name.trim())))
}

/// Where the zone used for localisation came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TimezoneSource {
    /// Given explicitly by the caller.
    Explicit,
    /// Found by a coordinate-to-zone lookup.
    Lookup,
    /// Lookup failed; the configured default was used.
    Fallback,
}

/// Pick the zone from a lookup result, falling back to `default_zone` when
/// the lookup missed or returned an unknown name. Only an invalid default
/// is an error.
pub fn resolve_timezone(
    looked_up: Option<&str>,
    default_zone: &str,
) -> Result<(Tz, TimezoneSource), TimeError> {
    if let Some(name) = looked_up {
        match parse_timezone(name) {
            Ok(tz) => return Ok((tz, TimezoneSource::Lookup)),
            Err(e) => log::warn!("timezone lookup returned unusable zone: {e}"),
        }
    } else {
        log::warn!("timezone lookup failed; using default {default_zone}");
    }
    Ok((parse_timezone(default_zone)?, TimezoneSource::Fallback))
}

/// A wall-clock instant resolved to UTC.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocalInstant {
    pub local: NaiveDateTime,
    pub utc: DateTime<Utc>,
    /// JD (UTC) of the instant.
    pub jd_utc: f64,
    /// IANA zone name.
    pub timezone: String,
    pub utc_offset_seconds: i32,
}

impl LocalInstant {
    /// Local weekday, 0 = Sunday .. 6 = Saturday.
    pub fn weekday(&self) -> u8 {
        self.local.weekday().num_days_from_sunday() as u8
    }

    /// Local hour, 0..=23.
    pub fn hour(&self) -> u32 {
        self.local.hour()
    }

    /// JD at 0h UT of the local civil date.
    pub fn civil_date_jd_midnight(&self) -> f64 {
        let d = self.local.date();
        jd_midnight(d.year(), d.month(), d.day())
    }
}

/// Localise a wall-clock time in `tz`.
pub fn localize(local: NaiveDateTime, tz: Tz) -> Result<LocalInstant, TimeError> {
    let zoned = match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(a, b) => {
            let later = a.max(b);
            log::debug!("{local} is ambiguous in {tz}; using {later}");
            later
        }
        LocalResult::None => {
            return Err(TimeError::NonexistentLocalTime {
                local: local.to_string(),
                zone: tz.name().to_string(),
            });
        }
    };
    let utc = zoned.with_timezone(&Utc);
    let utc_offset_seconds = (zoned.naive_local() - zoned.naive_utc()).num_seconds() as i32;
    Ok(LocalInstant {
        local,
        utc,
        jd_utc: utc_to_jd(&utc),
        timezone: tz.name().to_string(),
        utc_offset_seconds,
    })
}

/// The current instant, expressed in `tz`.
pub fn now_in(tz: Tz) -> LocalInstant {
    let utc = Utc::now();
    let zoned = utc.with_timezone(&tz);
    LocalInstant {
        local: zoned.naive_local(),
        utc,
        jd_utc: utc_to_jd(&utc),
        timezone: tz.name().to_string(),
        utc_offset_seconds: (zoned.naive_local() - zoned.naive_utc()).num_seconds() as i32,
    }
}
