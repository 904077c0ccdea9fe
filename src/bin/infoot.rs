//! Command-line front end: check whether coordinates fall within the survey footprint.
//!
//! Usage:
//!   infoot -c 10:00:00,-00:30:00              # single position, RA in hours
//!   infoot -c 150.0,-0.5 -d deg               # single position, RA in degrees
//!   infoot -f targets.csv                     # table with RA/DEC columns → targets_matched.csv
//!
//! The tile catalog comes from `--catalog`, else `$INFOOT_CATALOG`, else `tiles_nc.csv` in the
//! working directory.
use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::{ArgAction, ArgGroup, Parser};
use tracing::{debug, error};
use tracing_subscriber::EnvFilter;

use infoot::{
    config::{CATALOG_ENV_VAR, DEFAULT_CATALOG_FILE},
    report::SingleMatchReport,
    Infoot, InfootError, MatchConfig, DEFAULT_THRESHOLD_DEG,
};

#[derive(Parser, Debug)]
#[command(name = "infoot", version)]
#[command(about = "CheckInFoot - check if your coordinates are within the survey footprint")]
#[command(group(ArgGroup::new("input").required(true).args(["coordinates", "coords_file"])))]
struct Cli {
    /// Comma separated RA,DEC of the object (decimal, hh:mm:ss or 10h20m30s forms)
    #[arg(short = 'c', long, allow_hyphen_values = true)]
    coordinates: Option<String>,

    /// Table with at least RA and DEC columns; results go to <name>_matched.<ext>
    #[arg(short = 'f', long)]
    coords_file: Option<Utf8PathBuf>,

    /// Unit of the RA values: 'hour' or 'deg'. DEC is always degrees
    #[arg(short = 'd', long, default_value = "hour")]
    cformat: String,

    /// Tile catalog with NAME, RA [hours], DEC [deg] and STATUS columns
    #[arg(long, env = CATALOG_ENV_VAR, default_value = DEFAULT_CATALOG_FILE)]
    catalog: Utf8PathBuf,

    /// Footprint membership radius in degrees
    #[arg(long, default_value_t = DEFAULT_THRESHOLD_DEG)]
    threshold: f64,

    /// Increase log verbosity (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn init_logging(verbose: u8) {
    let base_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(base_level));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<(), InfootError> {
    // the unit token is checked before the catalog is touched
    let config = MatchConfig::builder()
        .ra_unit_str(&cli.cformat)?
        .catalog_path(cli.catalog.clone())
        .threshold_deg(cli.threshold)
        .build()?;
    debug!(?config, "run configuration");

    let infoot = Infoot::new(config)?;

    if let Some(coordinates) = &cli.coordinates {
        let (position, outcome) = infoot.check_coordinates(coordinates)?;
        println!("{}", SingleMatchReport::new(&position, &outcome));
    } else if let Some(path) = &cli.coords_file {
        let outcome = infoot.check_table(path)?;
        println!("{}", outcome.summary());
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(error = %e, "infoot failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
