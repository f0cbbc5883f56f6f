//! Utility functions for loading graphs and writing sampled trees.
use crate::buffers::TreeBuffer;
use crate::graph::{Edge, Graph};
use anyhow::{bail, Context, Result};
use std::fs;
use std::io::Write;

/// Loads a graph from the plain-text edge list format: the vertex count
/// and edge count, followed by one pair of 1-based endpoints per edge,
/// all whitespace-separated. Edges need not be sorted.
///
/// # Arguments
///
/// * `path` - the path of the graph description file.
pub fn from_edge_list(path: &str) -> Result<Graph> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("could not read graph file {}", path))?;
    return parse_edge_list(&raw).with_context(|| format!("malformed graph file {}", path));
}

/// Parses the edge list format from a string. A truncated or garbled
/// description is an error, never an empty graph.
pub fn parse_edge_list(raw: &str) -> Result<Graph> {
    let mut tokens = raw.split_whitespace();
    let num_vertices = next_count(&mut tokens, "vertex count")?;
    let num_edges = next_count(&mut tokens, "edge count")?;

    let mut edges = Vec::<Edge>::with_capacity(num_edges);
    for idx in 0..num_edges {
        let u = next_count(&mut tokens, "edge endpoint")
            .with_context(|| format!("while reading edge {}", idx))?;
        let v = next_count(&mut tokens, "edge endpoint")
            .with_context(|| format!("while reading edge {}", idx))?;
        if u < 1 || u > num_vertices || v < 1 || v > num_vertices {
            bail!(
                "edge {} endpoint out of range 1..={}: ({}, {})",
                idx,
                num_vertices,
                u,
                v
            );
        }
        edges.push(Edge(u - 1, v - 1));
    }
    return Ok(Graph::new(num_vertices, edges));
}

/// Reads the next whitespace-separated token as a nonnegative integer.
fn next_count<'a>(tokens: &mut impl Iterator<Item = &'a str>, what: &str) -> Result<usize> {
    let token = tokens
        .next()
        .with_context(|| format!("missing {}", what))?;
    return token
        .parse::<usize>()
        .with_context(|| format!("could not parse {} '{}'", what, token));
}

/// Writes one tree block in the output format: a `<child> <parent>`
/// line (1-based) for every non-root node, terminated by a blank line.
pub fn write_tree<W: Write>(out: &mut W, tree: &TreeBuffer) -> std::io::Result<()> {
    for (child, parent) in tree.edges() {
        writeln!(out, "{} {}", child + 1, parent + 1)?;
    }
    return writeln!(out);
}
