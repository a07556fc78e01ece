#![warn(clippy::pedantic)]
//! ** es_grapher **
//! Reads mission and event data and writes a Graphviz dependency graph.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use es_grapher::{compile_files, load_config, load_input, write_output};

#[derive(Parser)]
#[command(author, version, about = "Graph the dependencies between Endless Sky missions and events.")]
struct Cli {
    /// Data file or directory to read (standard input when omitted).
    #[arg(short, long, value_name = "PATH")]
    input: Option<PathBuf>,
    /// File to write the graph to (standard output when omitted).
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    let config = load_config();

    info!("Start: loading data files...");
    let files = load_input(cli.input.as_deref()).context("while loading data files")?;
    let graph = compile_files(&files, &config).context("while compiling the graph")?;
    write_output(cli.output.as_deref(), &graph).context("while writing the graph")?;
    info!("Done.");
    Ok(())
}
