use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use kissmin::dot::StgGraph;
use kissmin::execution_profile::{ExecutionProfile, ThreadLocalParams};
use kissmin::kiss::KissDescription;

mod common;

/// Minimize a KISS2 finite-state machine and draw its state-transition graph
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input KISS2 file
    #[arg(value_name = "INPUT.kiss")]
    input: PathBuf,
    /// Output file for the minimized KISS2 description
    #[arg(value_name = "OUTPUT.kiss")]
    output_kiss: PathBuf,
    /// Output file for the DOT graph of the minimized machine
    #[arg(value_name = "OUTPUT.dot")]
    output_dot: PathBuf,

    /// Maximum number of states accepted in the input machine
    #[arg(long, default_value_t = ExecutionProfile::default().max_number_of_states)]
    max_states: usize,
    /// Fail when a reachable state lacks a transition for some input pattern
    #[arg(long)]
    reject_incomplete: bool,
    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::init_logger(cli.verbose);

    ThreadLocalParams::init_profile(&ExecutionProfile {
        max_number_of_states: cli.max_states,
        reject_incomplete: cli.reject_incomplete,
    });

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot open input file: {}", cli.input.display()))?;
    let description = KissDescription::parse(&text)
        .with_context(|| format!("cannot read KISS description: {}", cli.input.display()))?;
    let fsm = description.to_fsm()?;
    let minimized = fsm.minimize()?;
    info!(
        "Minimized {} states into {} in {} refinement steps.",
        minimized.get_original_number_of_states(),
        minimized.get_number_of_states(),
        minimized.get_iterations()
    );

    let kiss = minimized.to_string();
    let dot = StgGraph::from_machine(&minimized).to_string();

    fs::write(&cli.output_kiss, kiss).with_context(|| {
        format!(
            "cannot open output KISS file: {}",
            cli.output_kiss.display()
        )
    })?;
    fs::write(&cli.output_dot, dot)
        .with_context(|| format!("cannot open output DOT file: {}", cli.output_dot.display()))?;

    Ok(())
}
