use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::{arg, Command};
use tracing_subscriber::EnvFilter;

use permqubo::decode::AssignmentGrid;
use permqubo::sampler::Sampler;
use permqubo::solver_logger::SolverOutputLogger;
use permqubo::solver_options::SolverOptions;

fn cli() -> Command {
    Command::new("permqubo")
        .about("Builds the permutation penalty QUBO, samples it and prints the decoded node/order table")
        .arg(
            arg!(--config [CONFIG] "Path to a TOML options file")
                .value_parser(clap::value_parser!(PathBuf)),
        )
        .arg(arg!(--nodes [NODES] "Number of nodes").value_parser(clap::value_parser!(usize)))
        .arg(
            arg!(--orders [ORDERS] "Number of order slots, defaults to the node count")
                .value_parser(clap::value_parser!(usize)),
        )
        .arg(
            arg!(--penalty [PENALTY] "Base penalty B, the constraint weight is 1.5 * B")
                .value_parser(clap::value_parser!(f64)),
        )
        .arg(
            arg!(--sampler [SAMPLER] "enumerate or local")
                .value_parser(clap::value_parser!(String)),
        )
        .arg(arg!(--reads [READS] "Number of reads to return").value_parser(clap::value_parser!(usize)))
        .arg(arg!(--seed [SEED] "Seed for the local search starts").value_parser(clap::value_parser!(u64)))
        .arg(
            arg!(--verbose [LEVEL] "Output level: 0 silent, 1 summary, 2 every sample")
                .value_parser(clap::value_parser!(usize)),
        )
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let matches = cli().get_matches();

    if let Err(e) = options_from(&matches).and_then(run) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn options_from(matches: &clap::ArgMatches) -> Result<SolverOptions> {
    let mut options = match matches.get_one::<PathBuf>("config") {
        Some(path) => SolverOptions::load(path)?,
        None => SolverOptions::new(),
    };

    if let Some(n_nodes) = matches.get_one::<usize>("nodes") {
        options.n_nodes = *n_nodes;
    }
    if let Some(n_orders) = matches.get_one::<usize>("orders") {
        options.n_orders = Some(*n_orders);
    }
    if let Some(penalty_b) = matches.get_one::<f64>("penalty") {
        options.penalty_b = *penalty_b;
    }
    if let Some(num_reads) = matches.get_one::<usize>("reads") {
        options.num_reads = *num_reads;
    }
    if let Some(seed) = matches.get_one::<u64>("seed") {
        options.seed = *seed;
    }
    if let Some(verbose) = matches.get_one::<usize>("verbose") {
        options.verbose = *verbose;
    }
    options.set_sampler(matches.get_one::<String>("sampler").cloned())?;

    Ok(options)
}

fn run(options: SolverOptions) -> Result<()> {
    let logger = SolverOutputLogger::new(options.verbose);

    let qubo = options.builder()?.build();
    logger.output_header(&qubo);

    let samples = options.make_sampler().sample(&qubo)?;
    logger.output_samples(&samples);

    let best = samples
        .first()
        .ok_or_else(|| anyhow!("sampler returned no samples"))?;
    let decoded = AssignmentGrid::decode(qubo.grid(), &best.assignment)?;
    logger.output_solution(&qubo, best.energy, &decoded);

    Ok(())
}
