//! Birth chart pipeline with in-memory collaborators.

use chrono::NaiveDateTime;
use kundali_chart::{
    BirthInput, ChartError, Collaborators, DaylightOracle, FixedTimezoneLookup,
    GazetteerGeocoder, ManualEphemeris, BirthPlace, SunriseEquationOracle, compute_birth_chart,
};
use kundali_config::{ChartSettings, KundaliConfig};
use kundali_time::{LocalInstant, TimezoneSource};
use kundali_vedic_base::{
    ChartPoint, DaySegment, DaySegmentBasis, GeoLocation, Graha, Rashi, VIMSHOTTARI_SEQUENCE,
};

const CONFIG: &str = r#"
[chart]
dasha_depth = 3

[places."Chennai"]
latitude = 13.0827
longitude = 80.2707
timezone = "Asia/Kolkata"
address = "Chennai, Tamil Nadu, India"

[places."Madurai"]
latitude = 9.9252
longitude = 78.1198
"#;

struct NeverDecides;

impl DaylightOracle for NeverDecides {
    fn is_daytime(&self, _: &LocalInstant, _: &GeoLocation) -> Option<bool> {
        None
    }
}

struct AlwaysNight;

impl DaylightOracle for AlwaysNight {
    fn is_daytime(&self, _: &LocalInstant, _: &GeoLocation) -> Option<bool> {
        Some(false)
    }
}

fn dt(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M").unwrap()
}

fn ephemeris() -> ManualEphemeris {
    // Su, Mo, Ma, Me, Ju, Ve, Sa, Ra; Moon at 45° is in Rohini.
    ManualEphemeris::new([16.0, 45.0, 95.0, 20.0, 205.0, 340.0, 290.0], 100.0, 155.0).unwrap()
}

fn input(place: BirthPlace) -> BirthInput {
    BirthInput {
        local: dt("1990-05-15 10:30"),
        place,
        timezone: None,
        query: Some(dt("1995-01-01 00:00")),
        dasha_depth: None,
    }
}

#[test]
fn unknown_place_is_surfaced() {
    let config = KundaliConfig::from_toml_str(CONFIG).unwrap();
    let eph = ephemeris();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::from_config(&config, 0.5);
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let err = compute_birth_chart(
        &input(BirthPlace::Named("Atlantis".into())),
        &config.chart,
        &c,
    )
    .unwrap_err();
    assert!(matches!(err, ChartError::LocationNotFound(ref p) if p == "Atlantis"));
}

#[test]
fn named_place_with_zone_is_a_lookup() {
    let config = KundaliConfig::from_toml_str(CONFIG).unwrap();
    let eph = ephemeris();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let chart =
        compute_birth_chart(&input(BirthPlace::Named("chennai".into())), &config.chart, &c)
            .unwrap();
    assert_eq!(chart.place.address, "Chennai, Tamil Nadu, India");
    assert_eq!(chart.timezone_source, TimezoneSource::Lookup);
    assert_eq!(chart.birth.timezone, "Asia/Kolkata");
    assert_eq!(chart.birth.utc_offset_seconds, 19_800);
    // 1990-05-15 was a Tuesday; 10:30 IST is daytime in Chennai.
    assert_eq!(chart.maandi.weekday, 2);
    assert_eq!(chart.maandi.segment, DaySegment::Day);
    assert_eq!(chart.maandi.basis, DaySegmentBasis::SunriseSunset);
    assert!((chart.maandi.longitude - (16.0 + 108.0)).abs() < 1e-9);
}

#[test]
fn zone_lookup_miss_falls_back_to_default() {
    let config = KundaliConfig::from_toml_str(CONFIG).unwrap();
    let eph = ephemeris();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::from_config(&config, 0.5);
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    // Madurai has no zone and is more than 0.5° from Chennai.
    let chart =
        compute_birth_chart(&input(BirthPlace::Named("Madurai".into())), &config.chart, &c)
            .unwrap();
    assert_eq!(chart.timezone_source, TimezoneSource::Fallback);
    assert_eq!(chart.birth.timezone, config.chart.default_timezone);
}

#[test]
fn explicit_zone_wins() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let mut inp = input(BirthPlace::Coordinates {
        latitude: 51.5,
        longitude: -0.12,
    });
    inp.timezone = Some("Europe/London".into());
    let chart = compute_birth_chart(&inp, &settings, &c).unwrap();
    assert_eq!(chart.timezone_source, TimezoneSource::Explicit);
    // BST in May.
    assert_eq!(chart.birth.utc_offset_seconds, 3600);
}

#[test]
fn undecidable_daylight_uses_hour_heuristic() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &NeverDecides,
    };
    let mut inp = input(BirthPlace::Coordinates {
        latitude: 13.0,
        longitude: 80.0,
    });
    inp.local = dt("1990-05-15 19:00");
    let chart = compute_birth_chart(&inp, &settings, &c).unwrap();
    assert_eq!(
        chart.maandi.basis,
        DaySegmentBasis::HourHeuristic { cutoff_hour: 18 }
    );
    assert_eq!(chart.maandi.segment, DaySegment::Night);
    // Tuesday night offset.
    assert!((chart.maandi.longitude - (16.0 + 192.0)).abs() < 1e-9);
}

#[test]
fn oracle_answer_beats_the_hour() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &AlwaysNight,
    };
    let chart = compute_birth_chart(
        &input(BirthPlace::Coordinates {
            latitude: 13.0,
            longitude: 80.0,
        }),
        &settings,
        &c,
    )
    .unwrap();
    assert_eq!(chart.maandi.segment, DaySegment::Night);
    assert_eq!(chart.maandi.basis, DaySegmentBasis::SunriseSunset);
}

#[test]
fn tables_and_dasha_are_consistent() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let chart = compute_birth_chart(
        &input(BirthPlace::Coordinates {
            latitude: 13.0,
            longitude: 80.0,
        }),
        &settings,
        &c,
    )
    .unwrap();

    assert_eq!(chart.positions.len(), 11);
    assert_eq!(chart.summary.len(), 7);
    assert_eq!(chart.summary[0].point, ChartPoint::Lagna);
    assert_eq!(chart.summary[0].rashi, Rashi::Kanya);
    assert_eq!(chart.summary[6].point, ChartPoint::Maandi);
    assert_eq!(chart.houses[0].rashi, Rashi::Kanya);
    assert_eq!(chart.rasi.occupants(Rashi::Kanya), &[ChartPoint::Lagna]);
    assert_eq!(chart.ashtakavarga.grand_total(), 8);
    assert!((chart.cusps[1] - 185.0).abs() < 1e-9);

    // Moon at 45° leaves 6.25y of the Moon's mahadasha; the query is
    // about 4.6y after birth.
    assert_eq!(chart.dasha.depth, 3);
    assert_eq!(chart.dasha.periods.len(), VIMSHOTTARI_SEQUENCE.len());
    assert_eq!(chart.dasha.periods[0].lord, Graha::Chandra);
    assert_eq!(chart.active_dasha.mahadasha, Some(Graha::Chandra));
    assert!(chart.active_dasha.bhukti.is_some());
    assert!(chart.active_dasha.antara.is_some());
    assert_eq!(chart.snapshot.periods.len(), 3);
}

#[test]
fn depth_override_is_validated() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let mut inp = input(BirthPlace::Coordinates {
        latitude: 13.0,
        longitude: 80.0,
    });
    inp.dasha_depth = Some(6);
    let err = compute_birth_chart(&inp, &settings, &c).unwrap_err();
    assert!(matches!(err, ChartError::InvalidInput { field: "dasha_depth", .. }));
}

#[test]
fn chart_serializes_to_json() {
    let settings = ChartSettings::default();
    let eph = ephemeris();
    let config = KundaliConfig::default();
    let geocoder = GazetteerGeocoder::new(&config);
    let zones = FixedTimezoneLookup::default();
    let c = Collaborators {
        ephemeris: &eph,
        geocoder: &geocoder,
        timezones: &zones,
        daylight: &SunriseEquationOracle,
    };
    let chart = compute_birth_chart(
        &input(BirthPlace::Coordinates {
            latitude: 13.0,
            longitude: 80.0,
        }),
        &settings,
        &c,
    )
    .unwrap();
    let json = serde_json::to_value(&chart).unwrap();
    assert_eq!(json["summary"][0]["point"], "Lagna");
    assert_eq!(json["timezone_source"], "Fallback");
    assert_eq!(json["active_dasha"]["mahadasha"], chart_lord_name(&chart));
}

fn chart_lord_name(chart: &kundali_chart::BirthChart) -> serde_json::Value {
    serde_json::to_value(chart.active_dasha.mahadasha).unwrap()
}
