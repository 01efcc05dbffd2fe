//! Evaluate every predictor against a synthetic workload.

use clap::Parser;
use bpred::*;
use bpred::synth::*;

#[derive(Parser, Debug)]
#[command(name = "evaluate-synthetic", about = "Compare predictors on a synthetic trace")]
struct Cli {
    /// Number of branch records to generate
    #[arg(short, long, default_value_t = 100_000)]
    records: usize,

    /// Seed for randomly-resolved branches
    #[arg(short, long, default_value_t = 0)]
    seed: u64,
}

const CORRELATED: &[Outcome] = &[
    Outcome::T, Outcome::T, Outcome::N, Outcome::T, Outcome::N, Outcome::N,
];

fn workload(seed: u64) -> SyntheticTrace {
    SyntheticTrace::new(seed)
        .branch(0x0040_1000, BranchPattern::NotTakenPeriodic(8))
        .branch(0x0040_1010, BranchPattern::Pattern(CORRELATED))
        .branch(0x0040_1024, BranchPattern::AlwaysTaken)
        .branch(0x0040_2000, BranchPattern::TakenPeriodic(3))
        .branch(0x0040_2008, BranchPattern::Random(0.9))
        .branch(0x0040_3000, BranchPattern::NeverTaken)
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let records = workload(cli.seed).generate(cli.records);
    println!("[*] Generated {} records (seed {})", records.len(), cli.seed);

    for scheme in Scheme::ALL {
        let cfg = PredictorConfig { scheme, ..PredictorConfig::default() };
        let mut sim = Simulator::new(cfg.build());
        sim.run(records.iter());
        let stat = sim.stats();
        println!("  {:12} Global hit rate: {}/{} ({:.2}% correct) ({} misses)",
            scheme.name(),
            stat.global_hits(),
            stat.global_brns(),
            stat.hit_rate() * 100.0,
            stat.global_miss()
        );
    }
}
