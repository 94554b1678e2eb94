use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use clap::Parser;
use color_eyre::Result;
use log::info;
use netbdd::eval;
use netbdd::netlist::Netlist;
use netbdd::reorder;

#[derive(Parser)]
#[command(author, version, about = "Build and sift a ROBDD for a gate-level netlist")]
struct Cli {
    /// Input netlist (defaults to standard input)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    /// Print the diagram under the declared input order, without sifting
    #[arg(long)]
    no_sift: bool,

    /// Increase log verbosity (-v: info, -vv: debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => simplelog::LevelFilter::Warn,
        1 => simplelog::LevelFilter::Info,
        _ => simplelog::LevelFilter::Debug,
    };
    simplelog::TermLogger::init(
        level,
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )?;

    let netlist = match &cli.input {
        Some(path) => Netlist::from_reader(BufReader::new(File::open(path)?))?,
        None => Netlist::from_reader(io::stdin().lock())?,
    };
    info!(
        "netlist: {} inputs, {} outputs, {} gates",
        netlist.inputs.len(),
        netlist.outputs.len(),
        netlist.gates.len()
    );

    let (cx, root) = if cli.no_sift {
        eval::build(&netlist)
    } else {
        let (cx, root, stats) = reorder::sift(&netlist);
        info!(
            "sift: size {} -> {} ({:.1}% reduction) in {} rebuilds",
            stats.initial_size,
            stats.final_size,
            stats.reduction_percent(),
            stats.rebuilds
        );
        info!(
            "sift: final order: {}",
            cx.order().ordered_names().collect::<Vec<_>>().join(", ")
        );
        (cx, root)
    };

    print!("{}", cx.to_tree_string(root));
    Ok(())
}
