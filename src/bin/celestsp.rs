use std::process::ExitCode;

use camino::Utf8PathBuf;
use clap::Parser;
use hifitime::Epoch;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use celestsp::bodies::name_resolver::SesameResolver;
use celestsp::bodies::target_file::read_target_file;
use celestsp::celestsp_errors::CelestspError;
use celestsp::env_state::CelestspEnv;
use celestsp::observers::{ObservationContext, ObserverSite};
use celestsp::planner::start::StartStrategy;
use celestsp::planner::{ObservationPlanner, PlannerParams};
use celestsp::report::{write_csv, PlanDisplay};
use celestsp::time::{resolve_observation_instant, utc_date_time_strings};
use celestsp::transform::MeanHorizontal;

/// Plan the order in which to observe a list of celestial bodies tonight.
#[derive(Parser, Debug)]
#[command(name = "celestsp")]
#[command(about = "Celestial observation planner (greedy tour over the visible sky)")]
struct Args {
    /// Target list: one name, or `name | ra_deg | dec_deg`, per line.
    input_file_path: Utf8PathBuf,

    /// Latitude of the observation site in degrees (default: from IP, else 0).
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude of the observation site in degrees, east positive (default: from IP, else 0).
    #[arg(long, allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Height of the observation site in meters.
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    height: f64,

    /// Observation date, YYYY-MM-DD (default: today, UTC).
    #[arg(long)]
    date: Option<String>,

    /// Observation time, HH:MM:SS (default: now, UTC).
    #[arg(long)]
    time: Option<String>,

    /// Time zone offset in hours of --date/--time (e.g. +9 for JST).
    #[arg(long, default_value = "+9", allow_hyphen_values = true)]
    tz: String,

    /// Write the plan as CSV to this path.
    #[arg(long)]
    output: Option<Utf8PathBuf>,

    /// Name of the celestial body to start the tour from.
    #[arg(long, alias = "first_body", conflicts_with = "westernmost")]
    first_body: Option<String>,

    /// Start from the body closest to the western horizon instead of the first to set.
    #[arg(long)]
    westernmost: bool,
}

impl Args {
    fn strategy(&self) -> StartStrategy {
        match (&self.first_body, self.westernmost) {
            (Some(name), _) if !name.is_empty() => StartStrategy::Override(name.clone()),
            (_, true) => StartStrategy::Westernmost,
            _ => StartStrategy::SoonestSetting,
        }
    }
}

fn not_observable_message(observable: usize, total: usize) -> String {
    format!("Some celestial bodies are not observable ({observable} of {total} above the horizon)")
}

fn run(args: Args) -> Result<(), CelestspError> {
    let env = CelestspEnv::new();

    let (lat, lon) = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => (lat, lon),
        (lat, lon) => {
            let (ip_lat, ip_lon) = env.locate_by_ip().unwrap_or((0.0, 0.0));
            (lat.unwrap_or(ip_lat), lon.unwrap_or(ip_lon))
        }
    };
    let site = ObserverSite::new(lat, lon, args.height)?;

    let epoch = resolve_observation_instant(
        args.date.as_deref(),
        args.time.as_deref(),
        &args.tz,
        Epoch::now()?,
    )?;
    let context = ObservationContext::new(site, epoch);

    let (date, time) = utc_date_time_strings(&epoch);
    println!("Location: {site}");
    println!("Observation Date: {date}");
    println!("Observation Time: {time} UTC");

    let resolver = SesameResolver::new(&env);
    let catalog = read_target_file(&args.input_file_path, &resolver)?;
    info!(bodies = catalog.len(), file = %args.input_file_path, "Loaded targets");

    let planner = ObservationPlanner::new(MeanHorizontal, PlannerParams::default());
    let plan = planner.plan(&catalog, &context, &args.strategy())?;

    println!("{}", PlanDisplay::new(&plan));
    if !plan.all_observable() {
        warn!("{}", not_observable_message(plan.observable_count(), catalog.len()));
    }

    if let Some(path) = &args.output {
        write_csv(&plan, path)?;
        info!("Plan written to {path}");
    }

    Ok(())
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    match run(Args::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err}");
            ExitCode::FAILURE
        }
    }
}
