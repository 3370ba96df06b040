mod viewer;

use clap::{Parser, Subcommand};
use lorentz_core::{build_simulation, PendingTick, ScenarioConfig, Simulation, TickOutcome};
use std::path::{Path, PathBuf};
use std::time::Instant;

#[derive(Parser)]
#[command(name = "lorentz")]
#[command(about = "Lorentz - charged particle motion in uniform E and B fields", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a scenario headless and print the trajectory
    Run {
        /// Path to a YAML scenario file (built-in scenario if omitted)
        #[arg(long)]
        scenario: Option<PathBuf>,

        /// Override fields as Ex,Ey,Ez,Bx,By,Bz
        #[arg(long, value_delimiter = ',', allow_hyphen_values = true)]
        fields: Option<Vec<f32>>,

        /// Wait the scenario's tick interval between steps
        #[arg(long)]
        realtime: bool,
    },
    /// Open the interactive viewer
    View {
        /// Path to a YAML scenario file, watched for field changes
        #[arg(long)]
        scenario: Option<PathBuf>,
    },
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Run {
            scenario,
            fields,
            realtime,
        } => run_headless(scenario.as_deref(), fields.as_deref(), realtime),
        Commands::View { scenario } => viewer::run_viewer(scenario),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn load_scenario(path: Option<&Path>) -> Result<ScenarioConfig, Box<dyn std::error::Error>> {
    match path {
        Some(path) => Ok(ScenarioConfig::load(path)?),
        None => Ok(ScenarioConfig::default()),
    }
}

fn run_headless(
    scenario: Option<&Path>,
    fields: Option<&[f32]>,
    realtime: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_scenario(scenario)?;
    let mut sim = build_simulation(&config)?;
    if let Some(values) = fields {
        sim.set_fields_from_slice(values)?;
    }

    if realtime {
        run_paced(&mut sim);
    } else {
        for outcome in sim.run_to_completion() {
            print_outcome(&outcome);
        }
    }

    let state = sim.state().to_array();
    println!(
        "final: pos = ({}, {}, {}) vel = ({}, {}, {})",
        state[0], state[1], state[2], state[3], state[4], state[5]
    );
    Ok(())
}

/// Drive the simulation from the wall clock, sleeping until each tick is due
fn run_paced(sim: &mut Simulation) {
    sim.start();
    while let Some(pending) = sim.next_tick_due() {
        if let PendingTick::At(deadline) = pending {
            let now = Instant::now();
            if deadline > now {
                std::thread::sleep(deadline - now);
            }
        }
        if let Some(outcome) = sim.poll(Instant::now()) {
            print_outcome(&outcome);
        }
    }
}

fn print_outcome(outcome: &TickOutcome) {
    match outcome {
        TickOutcome::Advanced { step, position } => {
            println!("{} {} {} {}", step, position.x, position.y, position.z);
        }
        TickOutcome::Stalled { step, position } => {
            println!("{} {} {} {} (stalled)", step, position.x, position.y, position.z);
        }
        TickOutcome::Paused | TickOutcome::Halted => {}
    }
}
