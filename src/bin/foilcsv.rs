//! Command line front end for checking, splitting and converting profile coordinate files.
//!
//! Examples:
//!   foilcsv check naca0012.csv                  # Repair and validate, may write naca0012_sort.csv
//!   foilcsv check naca0012.csv --no-write       # Report only
//!   foilcsv split naca0012.csv --depth 250      # Print the surfaces at a 250 unit chord as JSON
//!   foilcsv split root.csv --second tip.csv --offset 600 --rotate 2.5
//!   foilcsv flight path.csv --unit m            # Print the path in centimetres as JSON

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use foilcsv::geom3::PlaneBasis;
use foilcsv::io::read_flight_path;
use foilcsv::pipeline::{
    ProfileOptions, ProfileRequest, SecondProfile, load_profile, place_profiles,
};
use foilcsv::units::LengthUnit;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[clap(
    name = "foilcsv",
    version,
    about = "Repair, validate and split airfoil profile CSV files"
)]
struct Cli {
    /// JSON file with pipeline options; missing fields take their defaults
    #[clap(long, global = true)]
    config: Option<PathBuf>,

    /// Never write a corrected copy of a repaired profile
    #[clap(long = "no-write", global = true)]
    no_write: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load a profile, applying repairs, and report whether it is valid
    Check {
        csv: PathBuf,

        /// Label prefixed to error messages
        #[clap(long)]
        label: Option<String>,
    },

    /// Split one or two profiles into lower and upper surfaces and print them as JSON
    Split {
        csv: PathBuf,

        /// Chord length to scale the profile to
        #[clap(long, default_value_t = 1.0)]
        depth: f64,

        /// Flip the profile about its chord line
        #[clap(long)]
        mirror: bool,

        /// A second profile, placed on a plane offset along the normal
        #[clap(long)]
        second: Option<PathBuf>,

        /// Chord length of the second profile, defaults to `depth`
        #[clap(long)]
        second_depth: Option<f64>,

        #[clap(long)]
        second_mirror: bool,

        /// Distance between the two profile planes
        #[clap(long, default_value_t = 0.0)]
        offset: f64,

        /// Rotation of the second profile about the first profile's leading edge, in degrees
        #[clap(long, default_value_t = 0.0, allow_hyphen_values = true)]
        rotate: f64,
    },

    /// Read a 3D flight path file and print its points, converted to centimetres, as JSON
    Flight {
        csv: PathBuf,

        /// Length unit of the file: mm, cm, m, in or ft
        #[clap(long, default_value = "cm")]
        unit: LengthUnit,
    },
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("foilcsv=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_options(cli: &Cli) -> Result<ProfileOptions> {
    let mut options = match &cli.config {
        Some(path) => ProfileOptions::from_json_file(path)
            .with_context(|| format!("Reading options from {}", path.display()))?,
        None => ProfileOptions::default(),
    };
    if cli.no_write {
        options.write_corrected_file = false;
    }
    Ok(options)
}

fn check(csv: &Path, label: Option<&str>, options: &ProfileOptions) -> Result<()> {
    let loaded = load_profile(csv, label, options)?;
    println!("Profile is valid ({} points).", loaded.points.len());
    for note in loaded.notes.entries() {
        println!("  {note}");
    }
    if loaded.effective_path != csv {
        println!("Corrected profile written to {}", loaded.effective_path.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let options = load_options(&cli)?;

    match &cli.command {
        Command::Check { csv, label } => check(csv, label.as_deref(), &options)?,

        Command::Split {
            csv,
            depth,
            mirror,
            second,
            second_depth,
            second_mirror,
            offset,
            rotate,
        } => {
            let first = ProfileRequest {
                mirror: *mirror,
                ..ProfileRequest::new(csv, *depth)
            };
            let second = SecondProfile {
                request: second.as_ref().map(|path| ProfileRequest {
                    mirror: *second_mirror,
                    ..ProfileRequest::new(path, second_depth.unwrap_or(*depth))
                }),
                offset: *offset,
                rotation: rotate.to_radians(),
            };

            let placement = place_profiles(&first, &second, &PlaneBasis::xy(), &options)?;
            println!("{}", serde_json::to_string_pretty(&placement)?);
        }

        Command::Flight { csv, unit } => {
            let points = read_flight_path(csv, *unit)?;
            println!("{}", serde_json::to_string_pretty(&points)?);
        }
    }

    Ok(())
}
