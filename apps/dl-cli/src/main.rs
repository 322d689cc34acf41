use clap::{Parser, Subcommand};
use dl_coupling::OpeningParam;
use dl_project::{ProjectResult, Scenario};
use dl_sim::{CouplingSession, StepReport};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "dl-cli")]
#[command(about = "DrainLink CLI - surface/sewer drainage coupling", long_about = None)]
struct Cli {
    /// Log filter (trace, debug, info, warn, error); falls back to RUST_LOG
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate scenario file syntax and structure
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// List nodes and their openings
    Nodes {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Step the coupling against the scenario's hydraulic state
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Time step in seconds (overrides the scenario)
        #[arg(long)]
        dt: Option<f64>,
        /// Number of steps (overrides the scenario)
        #[arg(long)]
        steps: Option<u32>,
        /// Evaluate nodes in parallel
        #[arg(long)]
        parallel: bool,
    },
}

fn main() -> ProjectResult<()> {
    let cli = Cli::parse();

    let filter = match cli.log_level.as_deref() {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Nodes { scenario_path } => cmd_nodes(&scenario_path),
        Commands::Run {
            scenario_path,
            dt,
            steps,
            parallel,
        } => cmd_run(&scenario_path, dt, steps, parallel),
    }
}

fn cmd_validate(scenario_path: &Path) -> ProjectResult<()> {
    println!("Validating scenario: {}", scenario_path.display());
    let scenario = dl_project::load_yaml(scenario_path)?;
    dl_project::build_network(&scenario)?;
    println!("✓ Scenario is valid");
    Ok(())
}

fn cmd_nodes(scenario_path: &Path) -> ProjectResult<()> {
    let scenario = dl_project::load_yaml(scenario_path)?;
    let session = dl_project::open_session(&scenario)?;
    let network = session.network();

    if network.is_empty() {
        println!("No nodes found in scenario");
        return Ok(());
    }

    println!("Nodes in scenario '{}':", scenario.name);
    for node in network.nodes() {
        let ids = session.opening_ids(node.id)?;
        println!(
            "  {} - crest {:.3}, {} openings",
            node.name,
            node.hydraulics.crest_elev(),
            ids.len()
        );
        for id in ids {
            let area = session.opening_param(node.id, id, OpeningParam::Area)?;
            let width = session.opening_param(node.id, id, OpeningParam::Width)?;
            println!(
                "      opening {}: {:?}, area {:.3}, width {:.3}, {}",
                id,
                session.opening_kind(node.id, id)?,
                area,
                width,
                session.opening_coupling_type(node.id, id)?
            );
        }
    }
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    dt: Option<f64>,
    steps: Option<u32>,
    parallel: bool,
) -> ProjectResult<()> {
    let mut scenario = dl_project::load_yaml(scenario_path)?;
    if let Some(dt) = dt {
        scenario.timestep = dt;
    }
    if let Some(steps) = steps {
        scenario.steps = steps;
    }
    scenario.options.parallel |= parallel;
    dl_project::validate_scenario(&scenario)?;

    println!(
        "Running '{}': {} steps of {} s",
        scenario.name, scenario.steps, scenario.timestep
    );

    let mut session = dl_project::open_session(&scenario)?;
    session.start()?;
    let mut totals = StepReport::default();
    for _ in 0..scenario.steps {
        let report = session.step(scenario.timestep)?;
        totals.clamped_nodes += report.clamped_nodes;
        totals.damped_openings += report.damped_openings;
        totals.coupled_nodes = report.coupled_nodes;
    }
    session.end()?;

    print_inflows(&scenario, &session)?;
    println!(
        "✓ {} coupled nodes, {} clamped node-steps, {} damped reversals",
        totals.coupled_nodes, totals.clamped_nodes, totals.damped_openings
    );
    Ok(())
}

fn print_inflows(scenario: &Scenario, session: &CouplingSession) -> ProjectResult<()> {
    let label = scenario.options.units.flow_label();
    println!("{:<16} {:>14}  openings", "node", format!("inflow [{label}]"));
    for node in session.network().nodes() {
        let inflow = session.node_coupling_inflow(node.id)?;
        let mut parts = Vec::new();
        for id in session.opening_ids(node.id)? {
            parts.push(format!(
                "{}:{}={:.4}",
                id,
                session.opening_coupling_type(node.id, id)?,
                session.opening_flow(node.id, id)?
            ));
        }
        println!("{:<16} {:>14.4}  {}", node.name, inflow, parts.join(" "));
    }
    Ok(())
}
