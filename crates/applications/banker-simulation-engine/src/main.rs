//! Banker Simulation Engine CLI
//!
//! Generates (or loads) a system, builds its request timeline and processes it
//! tick by tick, printing each decision.
//!
//! ```bash
//! # Random 5×3 system, reproducible
//! banker-sim --processes 5 --resources 3 --seed 42
//!
//! # User-supplied matrices, discarding requests while the state is unsafe
//! banker-sim --scenario scenario.json --skip-unsafe --output result.json
//! ```

use std::fs;

use anyhow::Context;
use banker_core::{Decision, Matrix};
use banker_simulation_engine::{RunPolicy, Scenario, SimulationConfig, Simulator};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "banker-sim")]
#[command(about = "Simulate resource allocation under the Banker's algorithm", long_about = None)]
struct Args {
    /// Number of processes (1-10)
    #[arg(short = 'n', long, default_value_t = 5)]
    processes: usize,

    /// Number of resource classes (1-5)
    #[arg(short = 'm', long, default_value_t = 3)]
    resources: usize,

    /// Minimum total per resource class
    #[arg(long, default_value_t = 3)]
    lowest: u32,

    /// Maximum total per resource class
    #[arg(long, default_value_t = 20)]
    highest: u32,

    /// Idle entries appended to the request queue
    #[arg(long, default_value_t = banker_simulation_engine::config::DEFAULT_PADDING)]
    padding: usize,

    /// Seed for reproducible generation
    #[arg(short, long)]
    seed: Option<u64>,

    /// JSON scenario with user-supplied matrices (overrides random generation)
    #[arg(long)]
    scenario: Option<String>,

    /// Discard the pending request whenever the current state is unsafe
    #[arg(long)]
    skip_unsafe: bool,

    /// Print every safe completion order of the initial state
    #[arg(long)]
    enumerate: bool,

    /// Output JSON file path (optional)
    #[arg(short, long)]
    output: Option<String>,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            processes: self.processes,
            resources: self.resources,
            lowest: self.lowest,
            highest: self.highest,
            padding: self.padding,
            seed: self.seed,
        }
    }
}

fn print_matrix(name: &str, matrix: &Matrix) {
    println!("{}:", name);
    for (pid, row) in matrix.iter().enumerate() {
        println!("  P{:<3} {:?}", pid, row);
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "banker_simulation_engine=info,info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let config = args.config();
    let mut rng = config.rng();

    println!("╔══════════════════════════════════════════════════════════╗");
    println!("║  Banker's Algorithm Simulation                           ║");
    println!("╚══════════════════════════════════════════════════════════╝\n");

    let mut simulator = match &args.scenario {
        Some(path) => Scenario::load(path)
            .and_then(|scenario| scenario.into_simulator(config.padding, &mut rng))
            .with_context(|| format!("Failed to load scenario {}", path))?,
        None => Simulator::from_config(&config, &mut rng).context("Invalid configuration")?,
    };
    info!(seed = ?config.seed, requests = simulator.queue().len(), "Simulation ready");

    let system = simulator.system();
    println!("Total resources: {:?}", system.total);
    println!("Available:       {:?}\n", system.available);
    print_matrix("Max claim", &system.max_claim);
    print_matrix("Allocation", &system.allocation);
    print_matrix("Need", &system.need);

    let initial = simulator.safety();
    println!(
        "\nInitial state: {} (sequence {:?})",
        if initial.safe { "SAFE" } else { "UNSAFE" },
        initial.sequence
    );

    if args.enumerate {
        let orders = simulator.safe_sequences();
        println!("{} safe completion orders:", orders.len());
        for order in &orders {
            println!("  {:?}", order);
        }
    }

    let policy = if args.skip_unsafe {
        RunPolicy::SkipWhenUnsafe
    } else {
        RunPolicy::AlwaysAdvance
    };

    let result = simulator.run(policy)?;

    println!("\n{:<6} {:<28} {}", "Tick", "Request", "Decision");
    println!("{}", "-".repeat(72));
    for outcome in simulator.history() {
        let decision = match &outcome.decision {
            Decision::Granted {
                safe_sequence,
                completed,
            } => {
                let suffix = if *completed { ", process completed" } else { "" };
                format!("granted, safe sequence {:?}{}", safe_sequence, suffix)
            }
            Decision::Rejected(reason) => format!("rejected: {}", reason),
            Decision::Skipped => "skipped".to_string(),
            Decision::Idle => "idle".to_string(),
        };
        println!("{:<6} {:<28} {}", outcome.tick, outcome.request.to_string(), decision);
    }

    println!("\n{}", "-".repeat(72));
    println!("Granted:   {}", result.granted);
    println!(
        "Rejected:  {} (need {}, available {}, unsafe {})",
        result.rejected_exceeds_need + result.rejected_exceeds_available + result.rejected_unsafe,
        result.rejected_exceeds_need,
        result.rejected_exceeds_available,
        result.rejected_unsafe
    );
    println!("Skipped:   {}", result.skipped);
    println!("Completed: {:?}", result.completed_processes);
    println!("Available: {:?}", result.final_state.available);

    if let Some(output_path) = &args.output {
        println!("\nWriting results to {}...", output_path);
        let json = serde_json::to_string_pretty(&result)?;
        fs::write(output_path, json)
            .with_context(|| format!("Failed to write {}", output_path))?;
        println!("  Results saved");
    }

    println!("\n✅ Simulation complete!\n");
    Ok(())
}
