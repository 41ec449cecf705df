//! Civil time for birth charts.
//!
//! This crate provides:
//! - Julian Date ↔ calendar conversions
//! - Parsing of wall-clock birth dates and times
//! - Localisation through the IANA zone database, with a declared
//!   fallback zone when coordinate lookup fails

pub mod civil;
pub mod error;
pub mod julian;

pub use civil::{
    LocalInstant, TimezoneSource, localize, now_in, parse_birth_datetime, parse_date,
    parse_query_datetime, parse_time, parse_timezone, resolve_timezone,
};
pub use error::TimeError;
pub use julian::{
    J2000_JD, SECONDS_PER_DAY, UNIX_EPOCH_JD, calendar_to_jd, jd_midnight, jd_to_calendar,
    jd_to_utc, utc_to_jd,
};
