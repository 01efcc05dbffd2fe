//! Run a branch predictor over a trace and report its accuracy.

use std::io;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use bpred::*;
use bpred::stats::*;

#[derive(Parser, Debug)]
#[command(
    name = "bpsim",
    version,
    about = "Trace-driven branch predictor simulator",
    long_about = "Reads one '<pc in hex> <0|1>' record per line and reports \
        how often the selected predictor guessed the outcome.\n\n\
        Examples:\n  bpsim --predictor gshare:13 trace.txt\n  \
        bzcat trace.bz2 | bpsim --predictor tournament:9:10:10"
)]
struct Cli {
    /// Predictor to simulate: static, gshare:<ghist>,
    /// tournament:<ghist>:<lhist>:<pcindex>, or custom[:<ghist>:<lhist>:<pcindex>]
    #[arg(short, long, default_value = "static")]
    predictor: PredictorConfig,

    /// Print the predictor configuration before running.
    #[arg(short, long)]
    verbose: bool,

    /// Also report the N branches with the most mispredictions.
    #[arg(long, value_name = "N")]
    per_branch: Option<usize>,

    /// Trace file. Standard input is read when this is omitted.
    trace: Option<PathBuf>,
}

fn run(cli: &Cli) -> Result<BranchStats, TraceError> {
    let mut sim = Simulator::new(cli.predictor.build());
    if cli.per_branch.is_some() {
        sim = sim.with_per_branch_stats();
    }

    match &cli.trace {
        Some(path) => sim.try_run(TraceReader::from_file(path)?)?,
        None => sim.try_run(TraceReader::from_reader(io::stdin().lock()))?,
    }
    Ok(sim.finish().1)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let cfg = &cli.predictor;
    if cli.verbose {
        println!("Predictor:      {}", cfg.scheme);
        match cfg.scheme {
            Scheme::Static => {},
            Scheme::Gshare => {
                println!("ghistoryBits:   {}", cfg.ghistory_bits);
            },
            Scheme::Tournament | Scheme::Custom => {
                println!("ghistoryBits:   {}", cfg.ghistory_bits);
                println!("lhistoryBits:   {}", cfg.lhistory_bits);
                println!("pcIndexBits:    {}", cfg.pc_index_bits);
            },
        }
    }

    let stats = match run(&cli) {
        Ok(stats) => stats,
        Err(e) => {
            eprintln!("bpsim: {}", e);
            process::exit(1);
        },
    };

    println!("{}", cfg.scheme);
    println!("Branches:        {:10}", stats.global_brns());
    println!("Incorrect:       {:10}", stats.global_miss());
    println!("Misprediction Rate: {:7.3}", stats.miss_rate() * 100.0);

    if let Some(n) = cli.per_branch {
        println!("Unique branches: {}", stats.num_unique_branches());
        println!("Always taken:    {}", stats.num_always_taken());
        println!("Never taken:     {}", stats.num_never_taken());
        println!("Low hit-rate branches:");
        for (pc, data) in stats.get_low_rate_branches(n) {
            println!("  {:08x} {:8}/{:8} ({:.4}) H={:.2}",
                pc, data.hits, data.occ, data.hit_rate(),
                data.shannon_entropy()
            );
        }
    }
}
