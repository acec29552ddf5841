use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;

use kissmin::dot::StgGraph;
use kissmin::kiss::KissDescription;

mod common;

/// Draw the state-transition graph of a KISS2 finite-state machine as is
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input KISS2 file
    #[arg(value_name = "INPUT.kiss")]
    input: PathBuf,
    /// Output file for the DOT graph
    #[arg(value_name = "OUTPUT.dot")]
    output_dot: PathBuf,

    /// Increase logging verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    common::init_logger(cli.verbose);

    let text = fs::read_to_string(&cli.input)
        .with_context(|| format!("cannot open input KISS file: {}", cli.input.display()))?;
    let graph = StgGraph::from_description(&KissDescription::parse_unchecked(&text));

    fs::write(&cli.output_dot, graph.to_string())
        .with_context(|| format!("cannot open output DOT file: {}", cli.output_dot.display()))?;

    Ok(())
}
