//! End-to-end birth chart assembly.
//!
//! Place → coordinates → zone → UTC instant → positions → Maandi →
//! chart tables → dasha tree → active dasha at the query instant.

use chrono::NaiveDateTime;
use chrono_tz::Tz;
use kundali_config::ChartSettings;
use kundali_time::{
    LocalInstant, TimezoneSource, localize, now_in, parse_timezone, resolve_timezone,
};
use kundali_vedic_base::{
    ActiveDasha, ChartInputs, ChartKind, ChartPoint, DashaSnapshot, GeoLocation, Graha,
    GrahaLongitudes, HouseRow, MAX_DASHA_DEPTH, MaandiInfo, OccupancyAshtakavarga, PositionRow,
    Rashi, SAPTA_GRAHAS, SignChart, VimshottariTree, house_table, locate_maandi,
    occupancy_ashtakavarga, position_table, rashi_from_longitude, sign_chart, snapshot_from_tree,
    vimshottari_tree,
};
use serde::Serialize;

use crate::error::ChartError;
use crate::provider::{
    DaylightOracle, Geocoder, ResolvedPlace, SiderealEphemeris, TimezoneLookup,
};

/// Where the birth happened.
#[derive(Debug, Clone, PartialEq)]
pub enum BirthPlace {
    /// A name for the geocoder.
    Named(String),
    /// Explicit coordinates; no geocoding.
    Coordinates { latitude: f64, longitude: f64 },
}

/// Everything the caller supplies for one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct BirthInput {
    /// Local wall-clock birth time.
    pub local: NaiveDateTime,
    pub place: BirthPlace,
    /// Explicit zone; skips the lookup when set.
    pub timezone: Option<String>,
    /// Local wall-clock query time for the active dasha; `None` means now.
    pub query: Option<NaiveDateTime>,
    /// Overrides the configured dasha depth.
    pub dasha_depth: Option<u8>,
}

/// The external collaborators used by [`compute_birth_chart`].
#[derive(Clone, Copy)]
pub struct Collaborators<'a> {
    pub ephemeris: &'a dyn SiderealEphemeris,
    pub geocoder: &'a dyn Geocoder,
    pub timezones: &'a dyn TimezoneLookup,
    pub daylight: &'a dyn DaylightOracle,
}

/// One row of the headline summary: a point, its longitude and its sign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SummaryEntry {
    pub point: ChartPoint,
    pub longitude: f64,
    pub rashi: Rashi,
    pub degrees_in_rashi: f64,
}

/// A fully assembled birth chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BirthChart {
    pub birth: LocalInstant,
    pub place: ResolvedPlace,
    pub timezone_source: TimezoneSource,
    pub maandi: MaandiInfo,
    pub ascendant: f64,
    pub cusps: [f64; 12],
    /// Ascendant, Sun, Moon, Mercury, Venus, Saturn, Maandi.
    pub summary: Vec<SummaryEntry>,
    pub positions: Vec<PositionRow>,
    pub rasi: SignChart,
    pub navamsa: SignChart,
    pub houses: [HouseRow; 12],
    pub ashtakavarga: OccupancyAshtakavarga,
    pub dasha: VimshottariTree,
    pub query: LocalInstant,
    pub snapshot: DashaSnapshot,
    pub active_dasha: ActiveDasha,
}

const SUMMARY_GRAHAS: [Graha; 5] = [
    Graha::Surya,
    Graha::Chandra,
    Graha::Buddh,
    Graha::Shukra,
    Graha::Shani,
];

fn resolve_place(
    place: &BirthPlace,
    geocoder: &dyn Geocoder,
) -> Result<ResolvedPlace, ChartError> {
    match place {
        BirthPlace::Named(name) => {
            let resolved = geocoder.geocode(name)?;
            log::debug!(
                "geocoded '{name}' to {} ({:.4}, {:.4})",
                resolved.address,
                resolved.location.latitude_deg,
                resolved.location.longitude_deg
            );
            Ok(resolved)
        }
        BirthPlace::Coordinates {
            latitude,
            longitude,
        } => Ok(ResolvedPlace {
            address: format!("{latitude:.4}, {longitude:.4}"),
            location: GeoLocation::new(*latitude, *longitude)?,
            timezone: None,
        }),
    }
}

fn choose_timezone(
    explicit: Option<&str>,
    place: &ResolvedPlace,
    lookup: &dyn TimezoneLookup,
    default_zone: &str,
) -> Result<(Tz, TimezoneSource), ChartError> {
    if let Some(name) = explicit {
        return Ok((parse_timezone(name)?, TimezoneSource::Explicit));
    }
    let looked_up = place
        .timezone
        .clone()
        .or_else(|| lookup.timezone_of(&place.location));
    Ok(resolve_timezone(looked_up.as_deref(), default_zone)?)
}

fn graha_longitudes(
    ephemeris: &dyn SiderealEphemeris,
    jd_utc: f64,
) -> Result<GrahaLongitudes, ChartError> {
    let mut sapta = [0.0; 7];
    for (slot, graha) in sapta.iter_mut().zip(SAPTA_GRAHAS) {
        *slot = ephemeris.sidereal_longitude(graha, jd_utc)?;
    }
    let rahu = ephemeris.sidereal_longitude(Graha::Rahu, jd_utc)?;
    Ok(GrahaLongitudes::from_sapta_and_rahu(sapta, rahu)?)
}

fn summary_entry(point: ChartPoint, longitude: f64) -> SummaryEntry {
    let info = rashi_from_longitude(longitude);
    SummaryEntry {
        point,
        longitude,
        rashi: info.rashi,
        degrees_in_rashi: info.degrees_in_rashi,
    }
}

/// Assemble a birth chart.
///
/// Only geocoding misses, malformed input and ephemeris failures are
/// errors. A zone lookup miss falls back to `settings.default_timezone`
/// and an undecidable day/night falls back to the hour heuristic; both are
/// recorded on the result.
pub fn compute_birth_chart(
    input: &BirthInput,
    settings: &ChartSettings,
    collaborators: &Collaborators<'_>,
) -> Result<BirthChart, ChartError> {
    let depth = input.dasha_depth.unwrap_or(settings.dasha_depth);
    if !(1..=MAX_DASHA_DEPTH).contains(&depth) {
        return Err(ChartError::InvalidInput {
            field: "dasha_depth",
            reason: format!("must be 1..={MAX_DASHA_DEPTH}, got {depth}"),
        });
    }

    let place = resolve_place(&input.place, collaborators.geocoder)?;
    let (tz, timezone_source) = choose_timezone(
        input.timezone.as_deref(),
        &place,
        collaborators.timezones,
        &settings.default_timezone,
    )?;
    let birth = localize(input.local, tz)?;
    log::debug!(
        "birth {} {} = JD {:.6} UTC ({timezone_source:?})",
        birth.local,
        birth.timezone,
        birth.jd_utc
    );

    let grahas = graha_longitudes(collaborators.ephemeris, birth.jd_utc)?;
    let (ascendant, cusps) = collaborators
        .ephemeris
        .ascendant_and_cusps(birth.jd_utc, &place.location)?;

    let is_daytime = collaborators.daylight.is_daytime(&birth, &place.location);
    let maandi = locate_maandi(
        grahas.longitude(Graha::Surya),
        birth.weekday(),
        birth.hour(),
        is_daytime,
        settings.daytime_cutoff_hour,
    )?;

    let inputs = ChartInputs::new(grahas, ascendant, maandi.longitude)?;
    let summary = std::iter::once(summary_entry(ChartPoint::Lagna, inputs.ascendant))
        .chain(
            SUMMARY_GRAHAS
                .iter()
                .map(|&g| summary_entry(ChartPoint::Graha(g), inputs.grahas.longitude(g))),
        )
        .chain(std::iter::once(summary_entry(
            ChartPoint::Maandi,
            inputs.maandi,
        )))
        .collect();

    let dasha = vimshottari_tree(birth.jd_utc, inputs.grahas.longitude(Graha::Chandra), depth)?;
    let query = match input.query {
        Some(q) => localize(q, tz)?,
        None => now_in(tz),
    };
    let snapshot = snapshot_from_tree(&dasha, query.jd_utc);
    let active_dasha = snapshot.active();
    if active_dasha.mahadasha.is_none() {
        log::warn!("query {} lies outside the dasha tree", query.local);
    }

    Ok(BirthChart {
        positions: position_table(&inputs),
        rasi: sign_chart(&inputs, ChartKind::Rasi),
        navamsa: sign_chart(&inputs, ChartKind::Navamsa),
        houses: house_table(inputs.ascendant),
        ashtakavarga: occupancy_ashtakavarga(&inputs),
        ascendant: inputs.ascendant,
        cusps,
        summary,
        birth,
        place,
        timezone_source,
        maandi,
        dasha,
        query,
        snapshot,
        active_dasha,
    })
}
