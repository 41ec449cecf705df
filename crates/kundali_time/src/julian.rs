//! Julian Date ↔ calendar conversions (proleptic Gregorian, Meeus ch. 7).

use chrono::{DateTime, Datelike, Timelike, Utc};

use crate::error::TimeError;

/// JD of J2000.0 (2000-01-01 12:00 TT).
pub const J2000_JD: f64 = 2_451_545.0;

/// JD of the Unix epoch (1970-01-01 00:00 UTC).
pub const UNIX_EPOCH_JD: f64 = 2_440_587.5;

pub const SECONDS_PER_DAY: f64 = 86_400.0;

/// Calendar date to Julian Date. `day` carries the fraction of the day.
pub fn calendar_to_jd(year: i32, month: u32, day: f64) -> f64 {
    let (y, m) = if month <= 2 {
        (year - 1, month + 12)
    } else {
        (year, month)
    };
    let a = y.div_euclid(100);
    let b = 2 - a + a.div_euclid(4);
    (365.25 * (y as f64 + 4716.0)).floor() + (30.6001 * (m as f64 + 1.0)).floor() + day
        + b as f64
        - 1524.5
}

/// Julian Date to calendar `(year, month, day_with_fraction)`.
pub fn jd_to_calendar(jd: f64) -> (i32, u32, f64) {
    let z = (jd + 0.5).floor();
    let f = jd + 0.5 - z;
    let alpha = ((z - 1_867_216.25) / 36_524.25).floor();
    let a = z + 1.0 + alpha - (alpha / 4.0).floor();
    let b = a + 1524.0;
    let c = ((b - 122.1) / 365.25).floor();
    let d = (365.25 * c).floor();
    let e = ((b - d) / 30.6001).floor();
    let day = b - d - (30.6001 * e).floor() + f;
    let month = if e < 14.0 { e - 1.0 } else { e - 13.0 };
    let year = if month > 2.0 { c - 4716.0 } else { c - 4715.0 };
    (year as i32, month as u32, day)
}

/// JD (UTC) of a UTC instant.
pub fn utc_to_jd(utc: &DateTime<Utc>) -> f64 {
    let day_frac = utc.day() as f64
        + utc.hour() as f64 / 24.0
        + utc.minute() as f64 / 1440.0
        + (utc.second() as f64 + utc.nanosecond() as f64 * 1e-9) / SECONDS_PER_DAY;
    calendar_to_jd(utc.year(), utc.month(), day_frac)
}

/// UTC instant of a JD (UTC), rounded to the millisecond.
pub fn jd_to_utc(jd: f64) -> Result<DateTime<Utc>, TimeError> {
    if !jd.is_finite() {
        return Err(TimeError::invalid("jd", "must be finite"));
    }
    let millis = ((jd - UNIX_EPOCH_JD) * SECONDS_PER_DAY * 1000.0).round();
    if millis.abs() > i64::MAX as f64 {
        return Err(TimeError::invalid("jd", format!("{jd} is out of range")));
    }
    DateTime::from_timestamp_millis(millis as i64)
        .ok_or_else(|| TimeError::invalid("jd", format!("{jd} is out of range")))
}

/// JD at 0h UT of a calendar date.
pub fn jd_midnight(year: i32, month: u32, day: u32) -> f64 {
    calendar_to_jd(year, month, day as f64)
}
