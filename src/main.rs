use orbsim::{bench_step, DiagnosticsReport, Engine, OsculatingElements, Scenario, ScenarioConfig};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(about = "Advance a star and its planets with velocity-Verlet and an optional 1PN correction")]
struct Args {
    /// Scenario file: a path, or a name under `scenarios/`
    #[arg(short, default_value = "solar_system.yaml")]
    file_name: String,

    /// Override the end time (yr)
    #[arg(long)]
    t_end: Option<f64>,

    /// Override the timestep (yr)
    #[arg(long)]
    dt: Option<f64>,

    /// Integrate plain Newtonian gravity
    #[arg(long)]
    no_relativity: bool,

    /// Run the step timing benchmark instead of a simulation
    #[arg(long)]
    bench: bool,

    /// Print the final report and elements as YAML instead of a table
    #[arg(long)]
    yaml: bool,
}

#[derive(Serialize)]
struct RunSummary {
    t: f64,
    steps: u64,
    report: DiagnosticsReport,
    elements: Vec<NamedElements>,
}

#[derive(Serialize)]
struct NamedElements {
    name: String,
    #[serde(flatten)]
    osculating: OsculatingElements,
}

fn resolve_scenario_path(file_name: &str) -> PathBuf {
    let direct = PathBuf::from(file_name);
    if direct.exists() {
        return direct;
    }
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("scenarios").join(file_name)
}

// load here to keep main clean
fn load_scenario(args: &Args) -> Result<Scenario> {
    let path = resolve_scenario_path(&args.file_name);
    let cfg = ScenarioConfig::from_path(&path)?;
    let mut scenario = Scenario::build_scenario(cfg)
        .with_context(|| format!("invalid scenario {}", path.display()))?;

    let mut params = scenario.parameters.clone();
    if let Some(t_end) = args.t_end {
        params.t_end = t_end;
    }
    if let Some(dt) = args.dt {
        anyhow::ensure!(dt.is_finite() && dt != 0.0, "--dt must be finite and non-zero");
        params.dt = dt;
    }
    if args.no_relativity {
        params.relativity = false;
    }
    scenario = scenario.with_parameters(params);

    info!(path = %path.display(), bodies = scenario.system.len(), "scenario loaded");
    Ok(scenario)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();

    if args.bench {
        bench_step();
        return Ok(());
    }

    let scenario = load_scenario(&args)?;
    let mut engine = Engine::new(scenario);
    let report = engine.run();

    if args.yaml {
        let summary = RunSummary {
            t: engine.time(),
            steps: engine.steps(),
            report,
            elements: engine
                .osculating()
                .into_iter()
                .map(|(name, osculating)| NamedElements { name, osculating })
                .collect(),
        };
        print!("{}", serde_yaml::to_string(&summary).context("cannot serialize run summary")?);
        return Ok(());
    }

    println!("t = {:.4} yr after {} steps", engine.time(), engine.steps());
    println!(
        "E = {:.9e}  dE/E0 = {:.3e}  |dH|/|H0| = {:.3e}",
        report.energy,
        report.energy_drift.unwrap_or(0.0),
        report.angular_momentum_drift.unwrap_or(0.0)
    );
    println!("{:<10} {:>10} {:>9} {:>9} {:>9} {:>9} {:>9}", "body", "a [AU]", "e", "i [deg]", "Om [deg]", "w [deg]", "M [deg]");
    for (name, osc) in engine.osculating() {
        let el = osc.elements;
        let deg = orbsim::simulation::constants::RAD2DEG;
        println!(
            "{:<10} {:>10.6} {:>9.6} {:>9.4} {:>9.4} {:>9.4} {:>9.4}",
            name,
            el.a,
            el.e,
            el.i * deg,
            el.raan * deg,
            el.arg_periapsis * deg,
            el.mean_anomaly() * deg
        );
    }

    Ok(())
}
