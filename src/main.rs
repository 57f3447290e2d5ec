use std::error::Error;

use clap::{ArgAction, Parser};

use dcf_slot_sim::consts::{MAX_CW_SIZE, MAX_SLOT_SIZE};
use dcf_slot_sim::logging::init_logging;
use dcf_slot_sim::sweep::{doubling_cw_sizes, run_cw_sweep};
use dcf_slot_sim::{Scheduler, SimConfig, SimError};

#[derive(Parser)]
#[command(author, version, about = "Slotted 802.11 DCF channel efficiency simulator", long_about = None)]
struct Cli {
    /// Slots occupied by one transmission or collision
    pkt_size: usize,
    /// Number of contending nodes
    node_count: usize,
    /// Initial contention window size
    cw_size: u64,
    /// Seed for the backoff draws (random if omitted)
    #[arg(long)]
    seed: Option<u64>,
    /// Length of the slot timeline
    #[arg(long, default_value_t = MAX_SLOT_SIZE)]
    max_slots: usize,
    /// Print the report as JSON
    #[arg(long)]
    json: bool,
    /// Print per-node success probabilities
    #[arg(long)]
    per_node: bool,
    /// Sweep the contention window from cw-size, doubling up to this value
    #[arg(long, value_name = "CW")]
    sweep_to: Option<u64>,
    /// More log output (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config =
        SimConfig::new(cli.pkt_size, cli.node_count, cli.cw_size).with_max_slots(cli.max_slots);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let result = match cli.sweep_to {
        Some(end) => sweep(&config, end),
        None => single(&config, cli.json, cli.per_node),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn single(config: &SimConfig, json: bool, per_node: bool) -> Result<(), Box<dyn Error>> {
    let mut scheduler = Scheduler::from_config(config)?;
    let report = scheduler.run()?;

    if json {
        println!("{}", report.to_json()?);
    } else {
        report.print_stats();
        if per_node {
            report.print_node_stats();
        }
    }
    Ok(())
}

fn sweep(config: &SimConfig, end: u64) -> Result<(), Box<dyn Error>> {
    if end > MAX_CW_SIZE {
        return Err(SimError::BoundExceeded {
            parameter: "sweep_to",
            value: end,
            max: MAX_CW_SIZE,
        }
        .into());
    }
    for point in run_cw_sweep(config, &doubling_cw_sizes(config.cw_size, end)) {
        match point.outcome {
            Ok(report) => println!(" {} {:.6}", point.cw_size, report.efficiency),
            Err(e) => eprintln!(" {} failed: {}", point.cw_size, e),
        }
    }
    Ok(())
}
