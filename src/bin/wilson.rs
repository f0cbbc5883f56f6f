//! CLI for the exact uniform spanning tree sampler.
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
use ustree::init::{from_edge_list, write_tree};
use ustree::spanning_tree::{RandomWalkSampler, SpanningTreeSampler, WilsonSampler};

fn main() -> Result<()> {
    let matches = App::new("wilson")
        .version("0.1.0")
        .about("Samples uniformly random spanning trees of a connected graph")
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
            Arg::with_name("rng_seed")
                .long("rng-seed")
                .takes_value(true)
                .help("The seed of the RNG used to draw trees."),
        )
        .arg(
            Arg::with_name("sampler")
                .long("sampler")
                .takes_value(true)
                .default_value("wilson")
                .help("The sampling algorithm (wilson or random-walk)."),
        )
        .get_matches();
    let repetitions = value_t!(matches.value_of("repetitions"), u64).unwrap_or_else(|e| e.exit());
    let input = matches.value_of("input").unwrap();
    let output = matches.value_of("output").unwrap();
    let sampler_str = matches.value_of("sampler").unwrap();
    let rng_seed = match matches.value_of("rng_seed") {
        Some(raw) => raw.parse::<u64>().context("could not parse RNG seed")?,
        None => rand::random(),
    };

    let graph = from_edge_list(input)?;
    ensure!(graph.is_connected(), "input graph is not connected");

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
        "rng_seed": rng_seed,
        "sampler": sampler_str,
    });
    println!("{}", json!({ "meta": meta }).to_string());

    let mut sampler: Box<dyn SpanningTreeSampler> = match sampler_str {
        "wilson" => Box::new(WilsonSampler::new(graph.num_vertices())),
        "random-walk" => Box::new(RandomWalkSampler::new(graph.num_vertices())),
        bad => panic!("Parameter error: invalid sampler '{}'", bad),
    };
    let mut rng: SmallRng = SeedableRng::seed_from_u64(rng_seed);
    let mut buf = TreeBuffer::new(graph.num_vertices());
    let mut out = BufWriter::new(
        File::create(output).with_context(|| format!("could not open output file {}", output))?,
    );
    for _ in 0..repetitions {
        sampler.random_spanning_tree(&graph, &mut buf, &mut rng);
        write_tree(&mut out, &buf)?;
    }
    return Ok(());
}
