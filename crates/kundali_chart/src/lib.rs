//! Birth chart assembly over pluggable collaborators.
//!
//! `kundali_vedic_base` is pure math; this crate wires it to the outside
//! world through four traits ([`SiderealEphemeris`], [`Geocoder`],
//! [`TimezoneLookup`], [`DaylightOracle`]) and decides which failures are
//! surfaced and which are recovered.

pub mod birth;
pub mod error;
pub mod manual;
pub mod provider;

pub use birth::{
    BirthChart, BirthInput, BirthPlace, Collaborators, SummaryEntry, compute_birth_chart,
};
pub use error::ChartError;
pub use manual::{FixedTimezoneLookup, GazetteerGeocoder, ManualEphemeris, SunriseEquationOracle};
pub use provider::{DaylightOracle, Geocoder, ResolvedPlace, SiderealEphemeris, TimezoneLookup};
