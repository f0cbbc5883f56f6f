//! CLI for the edge-swap Markov chain sampler.
use mimalloc::MiMalloc;
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use anyhow::{ensure, Context, Result};
use clap::{value_t, App, Arg};
use rand::rngs::SmallRng;
use rand::SeedableRng;
use serde_json::json;
use sha3::{Digest, Sha3_256};
use std::fs::File;
use std::io::{self, BufWriter};
use ustree::buffers::TreeBuffer;
use ustree::forest::PathForest;
use ustree::init::{from_edge_list, write_tree};
use ustree::mixer::{mixing_steps, EdgeSwapMixer};

fn main() -> Result<()> {
    let matches = App::new("edge-swap")
        .version("0.1.0")
        .about("Samples near-uniform spanning trees with the edge-swap Markov chain")
        .arg(
            Arg::with_name("input")
                .index(1)
                .required(true)
                .help("The path of the graph description (edge list)."),
        )
        .arg(
            Arg::with_name("output")
                .index(2)
                .required(true)
                .help("The path to write the sampled trees to."),
        )
        .arg(
            Arg::with_name("repetitions")
                .index(3)
                .default_value("1")
                .help("The number of trees to generate."),
        )
        .arg(
            Arg::with_name("extra")
                .index(4)
                .default_value("0.0")
                .help(
                    "Extra mixing: the chain runs m * (extra + ln m) steps \
                     per tree, where m is the number of edges.",
                ),
        )
        .arg(
            Arg::with_name("rng_seed")
                .long("rng-seed")
                .takes_value(true)
                .help("The seed of the RNG used to drive the chain."),
        )
        .arg(
            Arg::with_name("reset")
                .long("reset")
                .help(
                    "Reseed the chain between repetitions. By default the chain \
                     keeps evolving, so successive trees are correlated draws \
                     from one trajectory.",
                ),
        )
        .get_matches();
    let repetitions = value_t!(matches.value_of("repetitions"), u64).unwrap_or_else(|e| e.exit());
    let extra = value_t!(matches.value_of("extra"), f64).unwrap_or_else(|e| e.exit());
    let input = matches.value_of("input").unwrap();
    let output = matches.value_of("output").unwrap();
    let reset = matches.is_present("reset");
    let rng_seed = match matches.value_of("rng_seed") {
        Some(raw) => raw.parse::<u64>().context("could not parse RNG seed")?,
        None => rand::random(),
    };
    ensure!(extra >= 0.0, "extra must be nonnegative");

    let graph = from_edge_list(input)?;
    ensure!(graph.is_connected(), "input graph is not connected");
    let tau = mixing_steps(graph.num_edges(), extra);

    let mut input_file =
        File::open(input).with_context(|| format!("could not open input file {}", input))?;
    let mut hasher = Sha3_256::new();
    io::copy(&mut input_file, &mut hasher)?;
    let meta = json!({
        "input": input,
        "output": output,
        "graph_sha3": format!("{:x}", hasher.finalize()),
        "num_vertices": graph.num_vertices(),
        "num_edges": graph.num_edges(),
        "repetitions": repetitions,
        "extra": extra,
        "steps_per_tree": tau,
        "rng_seed": rng_seed,
        "reset": reset,
    });
    println!("{}", json!({ "meta": meta }).to_string());

    let mut mixer = EdgeSwapMixer::new(&graph, PathForest::new(graph.num_vertices()))?;
    let mut rng: SmallRng = SeedableRng::seed_from_u64(rng_seed);
    let mut buf = TreeBuffer::new(graph.num_vertices());
    let mut out = BufWriter::new(
        File::create(output).with_context(|| format!("could not open output file {}", output))?,
    );
    for rep in 0..repetitions {
        mixer.mix(tau, &mut rng);
        mixer.extract_tree(&mut buf);
        write_tree(&mut out, &buf)?;
        if reset && rep + 1 < repetitions {
            mixer.reset()?;
        }
    }
    return Ok(());
}
