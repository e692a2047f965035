use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use mapmeasure_core::{
    calculate_angle, calculate_azimuth, format_length, from_geographic, AngleUnit, DistanceUnit,
    GeoPoint, Haversine, Line, LineCoordinates, LineMetrics, ProjectedPoint, UnitsConfig,
};
use mapmeasure_storage::{Preferences, Storage};
use serde::Serialize;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "mapmeasure-cli")]
#[command(about = "Measure lengths, azimuths and angles of map lines")]
#[command(after_help = "Points may be negative (e.g. -74.0,40.7); pass options before the points.")]
pub struct Cli {
    /// Directory holding preferences.json (defaults to the platform data dir).
    #[arg(long, global = true, value_name = "DIR")]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the geodesic length of a path given as LON,LAT vertices.
    Length {
        #[arg(
            value_name = "LON,LAT",
            num_args = 2..,
            required = true,
            allow_hyphen_values = true,
            value_parser = parse_geo
        )]
        points: Vec<GeoPoint>,
        #[command(flatten)]
        units: UnitArgs,
    },
    /// Print the azimuth from one LON,LAT point to another.
    Azimuth {
        #[arg(value_name = "LON,LAT", allow_hyphen_values = true, value_parser = parse_geo)]
        start: GeoPoint,
        #[arg(value_name = "LON,LAT", allow_hyphen_values = true, value_parser = parse_geo)]
        end: GeoPoint,
        #[command(flatten)]
        units: UnitArgs,
    },
    /// Print the angle between the last two segments of a path of X,Y map coordinates.
    Angle {
        #[arg(
            value_name = "X,Y",
            num_args = 1..,
            required = true,
            allow_hyphen_values = true,
            value_parser = parse_projected
        )]
        points: Vec<ProjectedPoint>,
        #[command(flatten)]
        units: UnitArgs,
    },
    /// Print the label of a line between two LON,LAT points.
    Line {
        #[arg(value_name = "LON,LAT", allow_hyphen_values = true, value_parser = parse_geo)]
        start: GeoPoint,
        #[arg(value_name = "LON,LAT", allow_hyphen_values = true, value_parser = parse_geo)]
        end: GeoPoint,
        /// Emit length, azimuth and label as JSON.
        #[arg(long)]
        json: bool,
        #[command(flatten)]
        units: UnitArgs,
    },
    /// Show or change the stored display units.
    Units {
        #[command(subcommand)]
        command: UnitsCommand,
    },
    /// Print CLI version.
    Version,
}

#[derive(Debug, Subcommand)]
enum UnitsCommand {
    /// Print the stored display units.
    Show,
    /// Store new display units.
    Set {
        #[arg(long, value_name = "UNIT")]
        distance_unit: Option<DistanceUnit>,
        #[arg(long, value_name = "UNIT")]
        angle_unit: Option<AngleUnit>,
    },
}

/// Per-invocation unit overrides
#[derive(Debug, Args)]
struct UnitArgs {
    /// miles, kilometers or meters (overrides the stored preference).
    #[arg(long, value_name = "UNIT")]
    distance_unit: Option<DistanceUnit>,
    /// degrees or radians (overrides the stored preference).
    #[arg(long, value_name = "UNIT")]
    angle_unit: Option<AngleUnit>,
}

#[derive(Debug, Serialize)]
struct LineOutput {
    length: String,
    azimuth: String,
    label: String,
}

pub fn run<I, T>(args: I) -> Result<()>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let cli = Cli::parse_from(args);
    let data_dir = cli.data_dir;

    match cli.command {
        Commands::Length { points, units } => {
            let units = resolve_units(data_dir, &units);
            let projected = points.into_iter().map(from_geographic).collect();
            let line = Line::new(projected).context("invalid path")?;
            println!("{}", format_length(&line, &units, &Haversine::default()));
            Ok(())
        }
        Commands::Azimuth { start, end, units } => {
            let units = resolve_units(data_dir, &units);
            let azimuth =
                calculate_azimuth(start, end, &units).context("failed to compute azimuth")?;
            println!("{azimuth}");
            Ok(())
        }
        Commands::Angle { points, units } => {
            let units = resolve_units(data_dir, &units);
            let angle = calculate_angle(&points, &units).context("failed to compute angle")?;
            println!("{angle}");
            Ok(())
        }
        Commands::Line { start, end, json, units } => {
            let units = resolve_units(data_dir, &units);
            run_line(start, end, json, &units)
        }
        Commands::Units { command } => run_units(data_dir, command),
        Commands::Version => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn run_line(start: GeoPoint, end: GeoPoint, json: bool, units: &UnitsConfig) -> Result<()> {
    let line = LineCoordinates::new(start, end).to_line().context("invalid line")?;
    let metrics = LineMetrics::calculate(&line, start, end, units, &Haversine::default())
        .context("failed to measure line")?;

    if json {
        let payload = LineOutput {
            label: metrics.label(),
            length: metrics.length,
            azimuth: metrics.azimuth,
        };
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{}", metrics.label());
    }

    Ok(())
}

fn run_units(data_dir: Option<PathBuf>, command: UnitsCommand) -> Result<()> {
    let storage = open_storage(data_dir)?;
    let mut preferences = storage.load_preferences().with_context(|| {
        format!("failed to read preferences from {}", storage.preferences_path().display())
    })?;

    if let UnitsCommand::Set { distance_unit, angle_unit } = command {
        if distance_unit.is_none() && angle_unit.is_none() {
            anyhow::bail!("nothing to set: pass --distance-unit and/or --angle-unit");
        }
        if let Some(unit) = distance_unit {
            preferences.units = preferences.units.with_distance_unit(unit);
        }
        if let Some(unit) = angle_unit {
            preferences.units = preferences.units.with_angle_unit(unit);
        }
        storage.save_preferences(&preferences).with_context(|| {
            format!("failed to write preferences to {}", storage.preferences_path().display())
        })?;
    }

    println!("distance_unit: {}", preferences.units.distance_unit);
    println!("angle_unit: {}", preferences.units.angle_unit);
    Ok(())
}

fn open_storage(data_dir: Option<PathBuf>) -> Result<Storage> {
    match data_dir {
        Some(root) => Ok(Storage::with_root(root)),
        None => Storage::from_default_project().context("failed to locate preferences"),
    }
}

/// Flags win over stored preferences; unreadable preferences fall back to defaults.
fn resolve_units(data_dir: Option<PathBuf>, args: &UnitArgs) -> UnitsConfig {
    let stored = match args.distance_unit.zip(args.angle_unit) {
        Some(_) => UnitsConfig::default(),
        None => stored_units(open_storage(data_dir)),
    };

    let mut units = stored;
    if let Some(unit) = args.distance_unit {
        units = units.with_distance_unit(unit);
    }
    if let Some(unit) = args.angle_unit {
        units = units.with_angle_unit(unit);
    }
    log::debug!("measuring in {} and {}", units.distance_unit, units.angle_unit);
    units
}

fn stored_units(storage: Result<Storage>) -> UnitsConfig {
    let loaded =
        storage.and_then(|storage| storage.load_preferences().map_err(anyhow::Error::from));
    match loaded {
        Ok(Preferences { units }) => units,
        Err(error) => {
            log::warn!("ignoring stored preferences: {error:#}");
            UnitsConfig::default()
        }
    }
}

fn parse_pair(value: &str) -> std::result::Result<(f64, f64), String> {
    let (first, second) = value
        .split_once(',')
        .ok_or_else(|| format!("expected two comma-separated numbers, got '{value}'"))?;
    let parse = |part: &str| {
        let part = part.trim();
        part.parse::<f64>().map_err(|error| format!("invalid number '{part}': {error}"))
    };
    Ok((parse(first)?, parse(second)?))
}

fn parse_geo(value: &str) -> std::result::Result<GeoPoint, String> {
    parse_pair(value).map(|(lon, lat)| GeoPoint::new(lon, lat))
}

fn parse_projected(value: &str) -> std::result::Result<ProjectedPoint, String> {
    parse_pair(value).map(|(x, y)| ProjectedPoint::new(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_pair_accepts_spaces_and_negatives() {
        assert_eq!(parse_pair("-1.5, 2").expect("valid pair"), (-1.5, 2.0));
    }

    #[test]
    fn parse_pair_rejects_malformed_input() {
        assert!(parse_pair("1.5").is_err());
        assert!(parse_pair("a,2").is_err());
    }

    #[test]
    fn flags_override_everything() {
        let args = UnitArgs {
            distance_unit: Some(DistanceUnit::Miles),
            angle_unit: Some(AngleUnit::Radians),
        };
        let units = resolve_units(None, &args);
        assert_eq!(units, UnitsConfig::new(DistanceUnit::Miles, AngleUnit::Radians));
    }

    #[test]
    fn stored_preferences_fill_missing_flags() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        let storage = Storage::with_root(temp.path());
        storage
            .save_preferences(&Preferences {
                units: UnitsConfig::new(DistanceUnit::Miles, AngleUnit::Radians),
            })
            .expect("save should succeed");

        let args = UnitArgs { distance_unit: None, angle_unit: Some(AngleUnit::Degrees) };
        let units = resolve_units(Some(temp.path().to_path_buf()), &args);
        assert_eq!(units, UnitsConfig::new(DistanceUnit::Miles, AngleUnit::Degrees));
    }

    #[test]
    fn unreadable_preferences_fall_back_to_defaults() {
        let temp = tempfile::tempdir().expect("temp dir should be created");
        std::fs::write(temp.path().join("preferences.json"), "not json")
            .expect("write should succeed");

        let args = UnitArgs { distance_unit: None, angle_unit: None };
        let units = resolve_units(Some(temp.path().to_path_buf()), &args);
        assert_eq!(units, UnitsConfig::default());
    }

    #[test]
    fn missing_data_dir_falls_back_to_defaults() {
        let no_data_dir = Err::<Storage, _>(mapmeasure_storage::StorageError::NoDataDirectory)
            .context("failed to locate preferences");
        assert_eq!(stored_units(no_data_dir), UnitsConfig::default());
    }

    #[test]
    fn parse_pair_accepts_negative_longitude() {
        let point = parse_geo("-74.0,40.7").expect("valid point");
        assert_eq!(point, GeoPoint::new(-74.0, 40.7));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
