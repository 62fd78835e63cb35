//! Generate (or load) a random Boolean network, simulate it, and print the visited
//! states to stdout. Progress and diagnostics go to stderr via `tracing`.

use biodivine_lib_rbn::simulation::Simulation;
use biodivine_lib_rbn::{render, FunctionPolicy, Rbn, RbnError};
use clap::{Parser, ValueEnum};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "simulate", about = "Simulate a random Boolean network.")]
struct Args {
    /// Number of nodes of the generated network.
    #[arg(long, default_value_t = 15, conflicts_with = "model")]
    nodes: usize,
    /// Smallest number of inputs a node can have.
    #[arg(long, default_value_t = 1, conflicts_with = "model")]
    min_k: usize,
    /// Largest number of inputs a node can have (must stay below the node count).
    #[arg(long, default_value_t = 2, conflicts_with = "model")]
    max_k: usize,
    /// Probability with which every node's bit is flipped after each step.
    #[arg(long, default_value_t = 0.0)]
    noise_level: f64,
    /// Number of synchronous update steps to simulate.
    #[arg(long, default_value_t = 50)]
    steps: usize,
    /// Seed for every random decision of the run (topology, functions, initial
    /// state, noise). A random seed is drawn when not given.
    #[arg(long)]
    seed: Option<u64>,
    /// Read the network from an `.rbn` file instead of generating a random one.
    #[arg(long)]
    model: Option<PathBuf>,
    /// How update functions are assigned to the nodes of a generated network.
    #[arg(long, value_enum, default_value = "operators", conflicts_with = "model")]
    functions: Functions,
    /// How the visited states are printed.
    #[arg(long, value_enum, default_value = "heatmap")]
    output: Output,
    /// Print the network itself (in the `.rbn` format) before the history.
    #[arg(long)]
    print_network: bool,
}

#[derive(Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Functions {
    /// Fully random truth tables.
    Tables,
    /// Named operators (AND, OR, XOR, ...) or random constants.
    Operators,
}

#[derive(Clone, Copy, Eq, PartialEq, ValueEnum)]
enum Output {
    /// One row per node, one column per time step.
    Heatmap,
    /// One row per time step, one column per node.
    Table,
}

fn main() -> Result<(), RbnError> {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();

    let args = Args::parse();
    let seed = args.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let network = if let Some(path) = &args.model {
        let mut network = Rbn::try_from_file(path)?;
        network.set_noise_level(args.noise_level)?;
        network
    } else {
        let policy = match args.functions {
            Functions::Tables => FunctionPolicy::RandomTable,
            Functions::Operators => FunctionPolicy::NamedOperator,
        };
        Rbn::random(
            args.nodes,
            args.min_k,
            args.max_k,
            args.noise_level,
            policy,
            &mut rng,
        )?
    };

    tracing::info!(
        seed,
        nodes = network.num_nodes(),
        noise_level = network.noise_level(),
        "network ready"
    );
    for node in network.topology().nodes() {
        tracing::debug!(
            node = %network.topology()[node],
            inputs = network.topology().in_degree(node),
            function = %network.get_function(node),
            "node wiring"
        );
    }

    if args.print_network {
        print!("{}", network);
        println!();
    }

    let mut simulation = Simulation::with_rng(network, rng);
    simulation.run(args.steps)?;

    let rendered = match args.output {
        Output::Heatmap => {
            render::heatmap_string(simulation.network().topology(), simulation.history())
        }
        Output::Table => {
            render::table_string(simulation.network().topology(), simulation.history())
        }
    };
    print!("{}", rendered);
    Ok(())
}
