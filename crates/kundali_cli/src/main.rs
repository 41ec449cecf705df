use std::fmt::Display;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use kundali_chart::{
    BirthInput, BirthPlace, Collaborators, DaylightOracle, FixedTimezoneLookup,
    GazetteerGeocoder, ManualEphemeris, SunriseEquationOracle, compute_birth_chart,
};
use kundali_config::KundaliConfig;
use kundali_time::{
    LocalInstant, localize, parse_birth_datetime, parse_query_datetime, parse_timezone,
};
use kundali_vedic_base::{
    GeoLocation, locate_maandi, nakshatra_from_longitude, navamsa_from_longitude,
    rashi_from_longitude, snapshot_from_tree, try_deg_to_dms, vimshottari_tree, weekday_name,
};

mod render;

/// Degrees of slack when matching coordinates against gazetteer zones.
const ZONE_MATCH_TOLERANCE_DEG: f64 = 0.5;

#[derive(Parser)]
#[command(name = "kundali", about = "Sidereal birth chart and Vimshottari dasha CLI")]
struct Cli {
    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Configuration file (TOML)
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rashi from sidereal longitude
    Rashi {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Nakshatra and pada from sidereal longitude
    Nakshatra {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Navamsa (D9) sign from sidereal longitude
    Navamsa {
        /// Sidereal ecliptic longitude in degrees
        lon: f64,
    },
    /// Convert degrees to DMS
    Dms {
        /// Angle in decimal degrees
        deg: f64,
    },
    /// Maandi longitude from the Sun and the local birth time
    Maandi {
        /// Sidereal Sun longitude in degrees
        #[arg(long)]
        sun: f64,
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// IANA zone (default from config)
        #[arg(long)]
        tz: Option<String>,
        /// Latitude for sunrise/sunset; without it the hour rule decides
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude for sunrise/sunset
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
    },
    /// Vimshottari dasha tree from the Moon's longitude
    Dasha {
        /// Sidereal Moon longitude in degrees
        #[arg(long)]
        moon: f64,
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// IANA zone (default from config)
        #[arg(long)]
        tz: Option<String>,
        /// Levels to compute, 1 (mahadasha) to 5 (prana)
        #[arg(long)]
        depth: Option<u8>,
        /// Also resolve the active periods at this local date/time
        #[arg(long)]
        at: Option<String>,
    },
    /// Full birth chart from supplied sidereal positions
    Chart {
        /// Birth date (YYYY-MM-DD or DD/MM/YYYY)
        #[arg(long)]
        date: String,
        /// Birth time (HH:MM or HH:MM:SS)
        #[arg(long)]
        time: String,
        /// Place name from the config gazetteer
        #[arg(long, conflicts_with_all = ["lat", "lon"], required_unless_present = "lat")]
        place: Option<String>,
        /// Latitude in degrees
        #[arg(long, requires = "lon", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lon: Option<f64>,
        /// IANA zone; skips the coordinate lookup
        #[arg(long)]
        tz: Option<String>,
        /// Sidereal longitudes Su,Mo,Ma,Me,Ju,Ve,Sa,Ra
        #[arg(long)]
        grahas: String,
        /// Sidereal ascendant in degrees
        #[arg(long)]
        ascendant: f64,
        /// Query local date/time for the active dasha (default: now)
        #[arg(long)]
        at: Option<String>,
        /// Dasha depth override
        #[arg(long)]
        depth: Option<u8>,
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,
    },
}

fn or_exit<T, E: Display>(result: Result<T, E>) -> T {
    result.unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        std::process::exit(1);
    })
}

fn load_config(path: Option<&PathBuf>) -> KundaliConfig {
    match path {
        Some(p) => or_exit(KundaliConfig::load(p)),
        None => KundaliConfig::default(),
    }
}

fn localize_or_exit(
    date: &str,
    time: &str,
    tz: Option<&str>,
    config: &KundaliConfig,
) -> LocalInstant {
    let local = or_exit(parse_birth_datetime(date, time));
    let zone = or_exit(parse_timezone(tz.unwrap_or(&config.chart.default_timezone)));
    or_exit(localize(local, zone))
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(if cli.verbose { "debug" } else { "warn" }),
    )
    .init();
    let config = load_config(cli.config.as_ref());

    match cli.command {
        Commands::Rashi { lon } => {
            let info = rashi_from_longitude(lon);
            let dms = info.dms;
            println!(
                "{} ({}) - {} deg {} min {:.1} sec ({:.4} deg in rashi)",
                info.rashi.name(),
                info.rashi.western_name(),
                dms.degrees,
                dms.minutes,
                dms.seconds,
                info.degrees_in_rashi
            );
        }

        Commands::Nakshatra { lon } => {
            let info = nakshatra_from_longitude(lon);
            println!(
                "{} (index {}) - Pada {} ({:.4} deg in nakshatra, {:.4} deg in pada)",
                info.nakshatra.name(),
                info.nakshatra_index,
                info.pada,
                info.degrees_in_nakshatra,
                info.degrees_in_pada
            );
        }

        Commands::Navamsa { lon } => {
            let info = navamsa_from_longitude(lon);
            println!(
                "{} (index {}) - part {} of {}",
                info.rashi.name(),
                info.rashi_index,
                info.part + 1,
                rashi_from_longitude(lon).rashi.name()
            );
        }

        Commands::Dms { deg } => {
            let d = or_exit(try_deg_to_dms(deg));
            println!("{} deg {} min {:.2} sec", d.degrees, d.minutes, d.seconds);
        }

        Commands::Maandi {
            sun,
            date,
            time,
            tz,
            lat,
            lon,
        } => {
            let birth = localize_or_exit(&date, &time, tz.as_deref(), &config);
            let is_daytime = match (lat, lon) {
                (Some(lat), Some(lon)) => {
                    let location = or_exit(GeoLocation::new(lat, lon));
                    SunriseEquationOracle.is_daytime(&birth, &location)
                }
                _ => None,
            };
            let info = or_exit(locate_maandi(
                sun,
                birth.weekday(),
                birth.hour(),
                is_daytime,
                config.chart.daytime_cutoff_hour,
            ));
            let rashi = rashi_from_longitude(info.longitude);
            println!(
                "Maandi: {:.4} deg ({} {:.4} deg)",
                info.longitude,
                rashi.rashi.name(),
                rashi.degrees_in_rashi
            );
            println!(
                "  {} {} (Sun + {:.0} deg, basis {:?})",
                weekday_name(info.weekday).unwrap_or("?"),
                info.segment,
                info.offset_deg,
                info.basis
            );
        }

        Commands::Dasha {
            moon,
            date,
            time,
            tz,
            depth,
            at,
        } => {
            let birth = localize_or_exit(&date, &time, tz.as_deref(), &config);
            let depth = depth.unwrap_or(config.chart.dasha_depth);
            let tree = or_exit(vimshottari_tree(birth.jd_utc, moon, depth));
            println!(
                "Vimshottari for birth {} {} ({} levels)\n",
                birth.local, birth.timezone, tree.depth
            );
            print!("{}", render::dasha_tree(&tree));
            if let Some(at) = at {
                let local = or_exit(parse_query_datetime(&at));
                let zone = or_exit(parse_timezone(&birth.timezone));
                let query = or_exit(localize(local, zone));
                println!("\nActive at {at}:");
                print!(
                    "{}",
                    render::dasha_snapshot(&snapshot_from_tree(&tree, query.jd_utc))
                );
            }
        }

        Commands::Chart {
            date,
            time,
            place,
            lat,
            lon,
            tz,
            grahas,
            ascendant,
            at,
            depth,
            json,
        } => {
            let place = match (place, lat, lon) {
                (Some(name), _, _) => BirthPlace::Named(name),
                (None, Some(latitude), Some(longitude)) => BirthPlace::Coordinates {
                    latitude,
                    longitude,
                },
                _ => {
                    eprintln!("Error: give --place or both --lat and --lon");
                    std::process::exit(1);
                }
            };
            let input = BirthInput {
                local: or_exit(parse_birth_datetime(&date, &time)),
                place,
                timezone: tz,
                query: at.as_deref().map(parse_query_datetime).map(or_exit),
                dasha_depth: depth,
            };
            let ephemeris = or_exit(ManualEphemeris::parse(&grahas, ascendant));
            let geocoder = GazetteerGeocoder::new(&config);
            let zones = FixedTimezoneLookup::from_config(&config, ZONE_MATCH_TOLERANCE_DEG);
            let collaborators = Collaborators {
                ephemeris: &ephemeris,
                geocoder: &geocoder,
                timezones: &zones,
                daylight: &SunriseEquationOracle,
            };
            let chart = or_exit(compute_birth_chart(&input, &config.chart, &collaborators));

            if json {
                println!("{}", or_exit(serde_json::to_string_pretty(&chart)));
                return;
            }

            println!(
                "Birth: {} {} (UTC {}, JD {:.6})",
                chart.birth.local,
                chart.birth.timezone,
                chart.birth.utc.format("%Y-%m-%d %H:%M:%S"),
                chart.birth.jd_utc
            );
            println!(
                "Place: {} ({:.4}, {:.4}), zone from {:?}\n",
                chart.place.address,
                chart.place.location.latitude_deg,
                chart.place.location.longitude_deg,
                chart.timezone_source
            );
            for entry in &chart.summary {
                println!(
                    "{:<8} {:>9.4}  {} {:.4}",
                    entry.point.name(),
                    entry.longitude,
                    entry.rashi.name(),
                    entry.degrees_in_rashi
                );
            }
            println!("\n{}", render::position_table(&chart.positions));
            print!("{}", render::south_indian_grid(&chart.rasi));
            println!();
            print!("{}", render::south_indian_grid(&chart.navamsa));
            println!("\n{}", render::house_table(&chart.houses));
            println!("{}", render::ashtakavarga_table(&chart));
            print!("{}", render::dasha_tree(&chart.dasha));
            println!("\nActive at {}:", chart.query.local);
            print!("{}", render::dasha_snapshot(&chart.snapshot));
        }
    }
}
