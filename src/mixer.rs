//! The edge-swap Markov chain over spanning trees.
//!
//! One chain step proposes a non-tree edge, picks a uniformly random
//! tree edge on the unique cycle the proposal would close, and swaps
//! the two. The chain is irreducible and aperiodic over the spanning
//! trees of the graph, and its stationary distribution is uniform; the
//! number of steps needed to get close to uniform is bounded by
//! `m * (extra + ln m)` for a graph with `m` edges.
use crate::buffers::TreeBuffer;
use crate::forest::DynamicForest;
use crate::graph::{Edge, Graph};
use crate::perm::Permutation;
use anyhow::{bail, Result};
use rand::rngs::SmallRng;
use rand::Rng;
use std::collections::VecDeque;

/// The number of chain steps suggested by the standard mixing-time
/// bound for a graph with `num_edges` edges. `extra` trades runtime for
/// closeness to the uniform distribution.
pub fn mixing_steps(num_edges: usize, extra: f64) -> u64 {
    let m = num_edges as f64;
    return (m * (extra + m.ln())).ceil() as u64;
}

/// One evolving edge-swap chain: a dynamic forest embedding the current
/// spanning tree, plus a permutation over edge indices whose slots
/// `[0, V-1)` name exactly the current tree edges and whose slots
/// `[V-1, e)` name exactly the non-tree edges.
///
/// The pair is exclusively owned by the mixer; every step mutates both
/// in lockstep, so the partition invariant holds between any two steps.
pub struct EdgeSwapMixer<'a, F: DynamicForest> {
    graph: &'a Graph,
    forest: F,
    perm: Permutation,
}

impl<'a, F: DynamicForest> EdgeSwapMixer<'a, F> {
    /// Seeds the chain. `forest` must be edgeless with one node per
    /// graph vertex; it is loaded with a greedily built spanning tree
    /// of `graph`, and the permutation is laid out to match. Errors if
    /// the graph is empty or not connected.
    pub fn new(graph: &'a Graph, forest: F) -> Result<EdgeSwapMixer<'a, F>> {
        let mut mixer = EdgeSwapMixer {
            graph: graph,
            forest: forest,
            perm: Permutation::identity(graph.num_edges()),
        };
        mixer.seed()?;
        return Ok(mixer);
    }

    /// Builds the initial embedding in one pass over the edge list:
    /// links every edge whose endpoints are not yet connected, placing
    /// tree edges in the leading permutation slots in discovery order
    /// and all other edges in the trailing slots.
    fn seed(&mut self) -> Result<()> {
        let n = self.graph.num_vertices();
        let e = self.graph.num_edges();
        if n == 0 {
            bail!("cannot mix over an empty graph");
        }
        if self.forest.num_vertices() != n {
            bail!(
                "forest has {} vertices but the graph has {}",
                self.forest.num_vertices(),
                n
            );
        }
        if e < n - 1 {
            bail!("graph is not connected: {} edges < {} vertices - 1", e, n);
        }

        let mut forward = vec![0 as usize; e];
        let mut next_tree = 0;
        let mut next_free = n - 1;
        for (idx, &Edge(u, v)) in self.graph.edges().iter().enumerate() {
            if !self.forest.connected(u, v) {
                self.forest.link(u, v);
                forward[next_tree] = idx;
                next_tree += 1;
            } else {
                forward[next_free] = idx;
                next_free += 1;
            }
        }
        if next_tree != n - 1 {
            bail!(
                "graph is not connected: spanning forest has {} edges, expected {}",
                next_tree,
                n - 1
            );
        }
        self.perm = Permutation::from_forward(forward);
        return Ok(());
    }

    /// Advances the chain by one transition.
    ///
    /// The candidate edge is drawn uniformly from the non-tree slots.
    /// Inserting it would close exactly one cycle in the tree; a
    /// uniformly random tree edge along that cycle is cut, the
    /// candidate is linked, and the two edges swap permutation slots so
    /// the tree/non-tree partition stays correct.
    pub fn step(&mut self, rng: &mut SmallRng) {
        let n = self.graph.num_vertices();
        let e = self.graph.num_edges();
        if e == n - 1 {
            // The graph is a tree: the chain has a single state.
            return;
        }

        let slot = rng.gen_range((n - 1)..e);
        let insert = self.perm.at(slot);
        let Edge(iu, iv) = self.graph.edges()[insert];
        // A candidate from the non-tree slots is never a tree edge
        // while the partition invariant holds.
        debug_assert!(!self.forest.has_edge(iu, iv), "improper insert");

        let cycle_len = self.forest.cycle(iu, iv);
        let k = rng.gen_range(1..cycle_len);
        let ou = self.forest.select_aux(iu, k);
        let ov = self.forest.successor(ou);
        debug_assert!(self.forest.has_edge(ou, ov), "improper removal");

        self.forest.cut(ou, ov);
        self.forest.link(iu, iv);
        let removed = self
            .graph
            .edge_idx(ou, ov)
            .expect("cut tree edge is missing from the graph");
        let i = self.perm.position(insert);
        let j = self.perm.position(removed);
        self.perm.swap(i, j);
    }

    /// Runs `steps` chain transitions.
    pub fn mix(&mut self, steps: u64, rng: &mut SmallRng) {
        for _ in 0..steps {
            self.step(rng);
        }
    }

    /// Discards the chain state and reseeds the forest and permutation
    /// from scratch. Successive trees drawn from one mixer are
    /// correlated draws along a single trajectory; resetting between
    /// draws restarts the chain from the deterministic seed tree.
    pub fn reset(&mut self) -> Result<()> {
        let tree: Vec<usize> = self.tree_edges().collect();
        for idx in tree {
            let Edge(u, v) = self.graph.edges()[idx];
            self.forest.cut(u, v);
        }
        return self.seed();
    }

    /// The edge indices of the chain's current spanning tree (the
    /// leading `V - 1` permutation slots).
    pub fn tree_edges(&self) -> impl Iterator<Item = usize> + '_ {
        return (0..self.graph.num_vertices() - 1).map(move |slot| self.perm.at(slot));
    }

    /// Writes the chain's current tree into `buf` as parent pointers,
    /// rooted at node 0 (BFS orientation).
    pub fn extract_tree(&self, buf: &mut TreeBuffer) {
        buf.clear();
        let n = self.graph.num_vertices();
        let mut adj = vec![Vec::<usize>::with_capacity(4); n];
        for idx in self.tree_edges() {
            let Edge(u, v) = self.graph.edges()[idx];
            adj[u].push(v);
            adj[v].push(u);
        }
        let mut visited = vec![false; n];
        let mut deque = VecDeque::with_capacity(n);
        visited[0] = true;
        deque.push_back(0);
        while let Some(next) = deque.pop_front() {
            for &neighbor in adj[next].iter() {
                if !visited[neighbor] {
                    visited[neighbor] = true;
                    buf.parent[neighbor] = next as i64;
                    deque.push_back(neighbor);
                }
            }
        }
    }

    /// The permutation tracking the tree/non-tree edge partition.
    pub fn permutation(&self) -> &Permutation {
        return &self.perm;
    }

    /// The forest embedding the current tree.
    pub fn forest(&self) -> &F {
        return &self.forest;
    }
}
