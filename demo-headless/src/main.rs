use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io;
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wake_sim_core::{
    AnalysisOptions, EngineConfig, LayoutSpec, Megawatts, ParallelMode, PlainTextRenderer,
    SimulationArtifact, SimulationEngine, SimulationOutcome, SimulationRequest, TraceRenderer,
    TurbinePosition, TurbineRegistry, WakeModelVariant,
};

/// Meters per degree of latitude
const METERS_PER_DEGREE: f64 = 111_320.0;

/// Wind farm wake simulation demo
#[derive(Parser, Debug)]
#[command(name = "wake-sim-demo")]
#[command(about = "Wind farm wake and energy yield simulation", long_about = None)]
struct Args {
    /// JSON simulation request; overrides the grid options below
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Turbine model name
    #[arg(short, long, default_value = "GE 2.5-120")]
    model: String,

    /// Grid rows (north-south)
    #[arg(long, default_value_t = 2)]
    rows: usize,

    /// Grid columns (east-west)
    #[arg(long, default_value_t = 5)]
    cols: usize,

    /// Grid spacing in meters
    #[arg(short, long, default_value_t = 840.0)]
    spacing: f64,

    /// Latitude of the south-west turbine
    #[arg(long, default_value_t = 55.0, allow_hyphen_values = true)]
    lat: f64,

    /// Longitude of the south-west turbine
    #[arg(long, default_value_t = 8.0, allow_hyphen_values = true)]
    lon: f64,

    /// Ambient turbulence intensity (0-0.5)
    #[arg(short, long, default_value_t = 0.10)]
    turbulence: f64,

    /// Disable wake modelling
    #[arg(long)]
    no_wake: bool,

    /// Parallel per-direction analysis (auto, always, never)
    #[arg(long, default_value = "auto")]
    parallel: String,

    /// Print the outcome as JSON instead of text
    #[arg(long)]
    json: bool,

    /// List turbine models and exit
    #[arg(long)]
    list_models: bool,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(log_filter())
        .with_writer(io::stderr)
        .init();

    if let Err(e) = run() {
        error!("{e:?}");
        std::process::exit(1);
    }
}

/// `RUST_LOG` when set, otherwise warnings only
fn log_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
}

fn run() -> Result<()> {
    let args = Args::parse();
    let registry = TurbineRegistry::standard();

    if args.list_models {
        for name in registry.model_names() {
            if let Some(spec) = registry.get(&name) {
                println!(
                    "{name}: {:.1}, {:.0} rotor, cut-in {:.1}, rated {:.1}, cut-out {:.1}",
                    spec.capacity,
                    spec.rotor_diameter,
                    spec.cut_in_speed,
                    spec.rated_speed,
                    spec.cut_out_speed
                );
            }
        }
        return Ok(());
    }

    let parallel = match args.parallel.to_lowercase().as_str() {
        "auto" => ParallelMode::Auto,
        "always" => ParallelMode::Always,
        "never" => ParallelMode::Never,
        other => bail!("unknown parallel mode '{other}' (expected auto, always or never)"),
    };

    let request = match &args.request {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read request {}", path.display()))?;
            serde_json::from_str::<SimulationRequest>(&text)
                .with_context(|| format!("Failed to parse request {}", path.display()))?
        }
        None => grid_request(&args, &registry),
    };

    info!(
        "Running {} x {}",
        request.layout.len(),
        request.layout.turbine_model
    );
    let engine = SimulationEngine::with_config(
        registry,
        EngineConfig {
            parallel,
            ..EngineConfig::default()
        },
    )
    .context("Failed to configure engine")?;
    let outcome = engine.run(&request);

    if args.json {
        println!(
            "{}",
            serde_json::to_string_pretty(&outcome).context("Failed to serialize outcome")?
        );
        return Ok(());
    }

    println!("{}", PlainTextRenderer::default().render(outcome.trace()));
    match outcome {
        SimulationOutcome::Success { artifact, .. } => {
            print_turbines(&artifact);
            Ok(())
        }
        SimulationOutcome::Failure { error, .. } => bail!("Simulation rejected: {error}"),
    }
}

/// Regular grid request from the command-line options
fn grid_request(args: &Args, registry: &TurbineRegistry) -> SimulationRequest {
    let dlat = args.spacing / METERS_PER_DEGREE;
    let dlon = args.spacing / (METERS_PER_DEGREE * args.lat.to_radians().cos());

    let turbines = (0..args.rows)
        .flat_map(|r| (0..args.cols).map(move |c| (r, c)))
        .map(|(r, c)| {
            TurbinePosition::new(
                format!("WTG-{:02}", r * args.cols + c + 1),
                args.lat + r as f64 * dlat,
                args.lon + c as f64 * dlon,
            )
        })
        .collect::<Vec<_>>();

    let count = turbines.len() as f64;
    let mut layout = LayoutSpec::new(turbines, args.model.clone());
    if let Some(spec) = registry.get(&args.model) {
        layout = layout.with_total_capacity(spec.capacity * count);
    }

    SimulationRequest::new(layout).with_options(AnalysisOptions {
        wake_model: if args.no_wake {
            WakeModelVariant::NoWake
        } else {
            WakeModelVariant::Jensen
        },
        ambient_turbulence: args.turbulence,
        ..AnalysisOptions::default()
    })
}

fn print_turbines(artifact: &SimulationArtifact) {
    println!("Per-turbine yield");
    println!("=================");
    println!(
        "{:<8} {:>9} {:>9} {:>14} {:>10} {:>10}",
        "ID", "x (m)", "y (m)", "AEP (MWh)", "Loss (%)", "v (m/s)"
    );
    for t in &artifact.turbines {
        println!(
            "{:<8} {:>9.0} {:>9.0} {:>14.0} {:>10.2} {:>10.2}",
            t.id, *t.x, *t.y, *t.annual_energy, *t.wake_loss, *t.mean_effective_speed
        );
    }

    let capacity: Megawatts = artifact.configuration.total_capacity;
    println!(
        "\n{} turbines, {:.1} installed, {} recommendation(s)",
        artifact.configuration.turbine_count,
        capacity,
        artifact.recommendations.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grid_request_declares_fleet_capacity() {
        let args = Args::parse_from(["wake-sim-demo", "--rows", "2", "--cols", "3"]);
        let request = grid_request(&args, &TurbineRegistry::standard());
        assert_eq!(request.layout.len(), 6);
        assert_eq!(request.layout.total_capacity, Some(Megawatts::new(15.0)));
        assert_eq!(request.layout.turbines[5].id, "WTG-06");
    }

    #[test]
    fn test_grid_request_unknown_model_leaves_capacity_undeclared() {
        let args = Args::parse_from(["wake-sim-demo", "--model", "Nope 1.0"]);
        let request = grid_request(&args, &TurbineRegistry::standard());
        assert_eq!(request.layout.len(), 10);
        assert!(request.layout.total_capacity.is_none());
    }

    #[test]
    fn test_rust_log_overrides_default_filter() {
        std::env::set_var("RUST_LOG", "info");
        let filter = log_filter().to_string();
        assert!(filter.contains("info"), "{filter}");
        assert!(!filter.contains("warn"), "{filter}");

        std::env::remove_var("RUST_LOG");
        assert_eq!(log_filter().to_string(), "warn");
    }
}
