//! Offline providers: caller-supplied positions, a config-backed gazetteer,
//! a fixed zone table and the sunrise-equation daylight oracle.

use kundali_config::KundaliConfig;
use kundali_time::LocalInstant;
use kundali_vedic_base::{
    GeoLocation, Graha, SAPTA_GRAHAS, is_before_sunset, normalize_360, sun_events,
};

use crate::error::ChartError;
use crate::provider::{
    DaylightOracle, Geocoder, ResolvedPlace, SiderealEphemeris, TimezoneLookup,
};

/// Positions supplied directly by the caller, the same for any instant.
/// House cusps are equal 30° houses from the ascendant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ManualEphemeris {
    /// Sun..Saturn in [`SAPTA_GRAHAS`] order.
    pub sapta: [f64; 7],
    pub rahu: f64,
    pub ascendant: f64,
}

impl ManualEphemeris {
    pub fn new(sapta: [f64; 7], rahu: f64, ascendant: f64) -> Result<Self, ChartError> {
        let finite = sapta.iter().chain([&rahu, &ascendant]).all(|v| v.is_finite());
        if !finite {
            return Err(ChartError::InvalidInput {
                field: "longitudes",
                reason: "every longitude must be finite".to_string(),
            });
        }
        Ok(Self {
            sapta,
            rahu,
            ascendant,
        })
    }

    /// Parse `Su,Mo,Ma,Me,Ju,Ve,Sa,Ra`: eight comma-separated degrees.
    pub fn parse(grahas: &str, ascendant: f64) -> Result<Self, ChartError> {
        let values: Vec<f64> = grahas
            .split(',')
            .map(|s| {
                s.trim().parse::<f64>().map_err(|e| ChartError::InvalidInput {
                    field: "grahas",
                    reason: format!("'{}': {e}", s.trim()),
                })
            })
            .collect::<Result<_, _>>()?;
        let [su, mo, ma, me, ju, ve, sa, ra] = values[..] else {
            return Err(ChartError::InvalidInput {
                field: "grahas",
                reason: format!(
                    "expected 8 values (Su,Mo,Ma,Me,Ju,Ve,Sa,Ra), got {}",
                    values.len()
                ),
            });
        };
        Self::new([su, mo, ma, me, ju, ve, sa], ra, ascendant)
    }
}

impl SiderealEphemeris for ManualEphemeris {
    fn sidereal_longitude(&self, graha: Graha, _jd_utc: f64) -> Result<f64, ChartError> {
        match graha {
            Graha::Rahu => Ok(normalize_360(self.rahu)),
            Graha::Ketu => Err(ChartError::Ephemeris(
                "Ketu is derived from Rahu, not looked up".to_string(),
            )),
            g => SAPTA_GRAHAS
                .iter()
                .position(|&s| s == g)
                .map(|i| normalize_360(self.sapta[i]))
                .ok_or_else(|| ChartError::Ephemeris(format!("no position for {g}"))),
        }
    }

    fn ascendant_and_cusps(
        &self,
        _jd_utc: f64,
        _location: &GeoLocation,
    ) -> Result<(f64, [f64; 12]), ChartError> {
        let asc = normalize_360(self.ascendant);
        let cusps = std::array::from_fn(|i| normalize_360(asc + 30.0 * i as f64));
        Ok((asc, cusps))
    }
}

/// Geocoder backed by the `[places]` table of the configuration.
#[derive(Debug, Clone, Copy)]
pub struct GazetteerGeocoder<'a> {
    config: &'a KundaliConfig,
}

impl<'a> GazetteerGeocoder<'a> {
    pub fn new(config: &'a KundaliConfig) -> Self {
        Self { config }
    }
}

impl Geocoder for GazetteerGeocoder<'_> {
    fn geocode(&self, place: &str) -> Result<ResolvedPlace, ChartError> {
        let (key, entry) = self
            .config
            .lookup_place(place)
            .ok_or_else(|| ChartError::LocationNotFound(place.trim().to_string()))?;
        let location = GeoLocation::new(entry.latitude, entry.longitude)?;
        Ok(ResolvedPlace {
            address: entry.address.clone().unwrap_or_else(|| key.to_string()),
            location,
            timezone: entry.timezone.clone(),
        })
    }
}

/// Zone table keyed by coordinates; a location matches an entry within
/// `tolerance_deg` in both latitude and longitude.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FixedTimezoneLookup {
    entries: Vec<(GeoLocation, String)>,
    tolerance_deg: f64,
}

impl FixedTimezoneLookup {
    pub fn new(tolerance_deg: f64) -> Self {
        Self {
            entries: Vec::new(),
            tolerance_deg,
        }
    }

    pub fn with_entry(mut self, location: GeoLocation, zone: impl Into<String>) -> Self {
        self.entries.push((location, zone.into()));
        self
    }

    /// Entries for every gazetteer place that names a zone.
    pub fn from_config(config: &KundaliConfig, tolerance_deg: f64) -> Self {
        config
            .places
            .values()
            .filter_map(|p| {
                let zone = p.timezone.as_ref()?;
                let loc = GeoLocation::new(p.latitude, p.longitude).ok()?;
                Some((loc, zone.clone()))
            })
            .fold(Self::new(tolerance_deg), |acc, (loc, zone)| {
                acc.with_entry(loc, zone)
            })
    }
}

impl TimezoneLookup for FixedTimezoneLookup {
    fn timezone_of(&self, location: &GeoLocation) -> Option<String> {
        self.entries
            .iter()
            .find(|(loc, _)| {
                (loc.latitude_deg - location.latitude_deg).abs() <= self.tolerance_deg
                    && (loc.longitude_deg - location.longitude_deg).abs() <= self.tolerance_deg
            })
            .map(|(_, zone)| zone.clone())
    }
}

/// Daylight from the closed-form sunrise equation: day means before the
/// civil date's sunset.
#[derive(Debug, Clone, Copy, Default)]
pub struct SunriseEquationOracle;

impl DaylightOracle for SunriseEquationOracle {
    fn is_daytime(&self, instant: &LocalInstant, location: &GeoLocation) -> Option<bool> {
        let events = sun_events(instant.civil_date_jd_midnight(), location);
        let day = is_before_sunset(instant.jd_utc, events);
        if day.is_none() {
            log::warn!(
                "no sunrise/sunset at latitude {:.2} on {}",
                location.latitude_deg,
                instant.local.date()
            );
        }
        day
    }
}
