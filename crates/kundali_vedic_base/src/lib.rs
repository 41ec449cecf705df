//! Pure sidereal jyotish calculations for birth charts.
//!
//! This crate provides:
//! - Rashi, nakshatra/pada and navamsha classification of a longitude
//! - Maandi (Gulika) placement
//! - Chart composition: position table, sign charts, house table
//! - The Vimshottari dasha tree and point-in-time resolver
//! - A closed-form sunrise/sunset estimate for the day/night flag
//!
//! Nothing here performs I/O or holds state; every function is a pure
//! transformation of its arguments.

pub mod ashtakavarga;
pub mod bhava;
pub mod chart;
pub mod dasha;
pub mod error;
pub mod graha;
pub mod maandi;
pub mod nakshatra;
pub mod navamsa;
pub mod rashi;
pub mod riseset;
pub mod util;

pub use ashtakavarga::{CONTRIBUTOR_POINTS, OccupancyAshtakavarga, occupancy_ashtakavarga};
pub use bhava::{HouseRow, house_rashi, house_table, rashi_midpoint};
pub use chart::{
    ChartInputs, ChartKind, ChartPoint, PositionRow, SOUTH_INDIAN_CENTRE,
    SOUTH_INDIAN_CENTRE_SPAN, SOUTH_INDIAN_GRID, SOUTH_INDIAN_LAYOUT, SignChart, position_row,
    position_table, sign_chart, south_indian_rashi_at,
};
pub use dasha::{
    ActiveDasha, ActivePeriod, DAYS_PER_YEAR, DEFAULT_DASHA_DEPTH, DashaBalance, DashaLevel,
    DashaPeriod, DashaSnapshot, MAX_DASHA_DEPTH, VIMSHOTTARI_SEQUENCE, VIMSHOTTARI_YEARS,
    VimshottariTree, active_dasha, find_active_period, snapshot_from_tree, vimshottari_balance,
    vimshottari_snapshot, vimshottari_tree,
};
pub use error::VedicError;
pub use graha::{ALL_GRAHAS, Graha, GrahaLongitudes, SAPTA_GRAHAS, ketu_from_rahu, rashi_lord};
pub use maandi::{
    DEFAULT_DAYTIME_CUTOFF_HOUR, DaySegment, DaySegmentBasis, MAANDI_OFFSETS, MaandiInfo,
    locate_maandi, maandi_longitude, maandi_offset, segment_from_hour, weekday_name,
};
pub use nakshatra::{
    ALL_NAKSHATRAS_27, NAKSHATRA_SPAN_27, Nakshatra, NakshatraInfo, PADA_SPAN,
    nakshatra_from_longitude,
};
pub use navamsa::{NAVAMSA_PARTS, NAVAMSA_SPAN, NavamsaInfo, navamsa_from_longitude};
pub use rashi::{
    ALL_RASHIS, Dms, MAX_DMS_DEGREES, RASHI_SPAN, Rashi, RashiInfo, deg_to_dms, format_dms,
    format_rashi_dms, rashi_from_longitude, try_deg_to_dms,
};
pub use riseset::{
    GeoLocation, SUNRISE_ALTITUDE_DEG, SunEvents, is_before_sunset,
    sun_events,
};
pub use util::normalize_360;
