//! Functions for generating random spanning trees.
use crate::buffers::TreeBuffer;
use crate::graph::Graph;
use crate::perm::Permutation;
use rand::rngs::SmallRng;
use rand::Rng;

pub trait SpanningTreeSampler {
    /// Samples a random spanning tree of `graph` using `rng`; writes the
    /// tree's parent pointers into `buf`.
    fn random_spanning_tree(&mut self, graph: &Graph, buf: &mut TreeBuffer, rng: &mut SmallRng);
}
pub use crate::spanning_tree::random_walk::RandomWalkSampler;
pub use crate::spanning_tree::wilson::WilsonSampler;

/// An upper bound on random-walk steps before a sampler gives up.
///
/// Both samplers terminate with probability 1 on connected graphs in
/// O(V·e) expected steps; on a disconnected graph they would walk
/// forever. The budget is a very generous multiple of the expected
/// bound, so exceeding it signals a disconnected (or otherwise invalid)
/// input graph.
fn step_budget(graph: &Graph) -> u64 {
    let n = graph.num_vertices() as u64;
    let e = graph.num_edges() as u64;
    return 4096 * n * e.max(1) + (1 << 20);
}

/// Exact uniform sampling by loop-erased random walk (Wilson's algorithm).
mod wilson {
    use super::*;

    /// Samples spanning trees from the exactly uniform distribution.
    ///
    /// The scratch state is reused across calls but fully cleared at the
    /// start of each call; no sampling state survives between draws.
    pub struct WilsonSampler {
        /// The episode that last stamped each node (0 = unvisited).
        color: Vec<u32>,
        /// Node permutation. Unvisited nodes occupy the leading slots;
        /// committed nodes occupy the trailing slots in commit order,
        /// which doubles as the current walk's path stack.
        perm: Permutation,
    }

    impl WilsonSampler {
        /// Creates a Wilson sampler for a graph of size `n`.
        pub fn new(n: usize) -> WilsonSampler {
            return WilsonSampler {
                color: vec![0; n],
                perm: Permutation::identity(n),
            };
        }
    }

    impl SpanningTreeSampler for WilsonSampler {
        /// Draws a random spanning tree of a graph from the uniform
        /// distribution using Wilson's algorithm [1].
        ///
        /// Each episode starts a random walk at a uniformly chosen
        /// unvisited node and walks until it hits the growing tree,
        /// erasing any loop it closes along the way; the surviving
        /// loop-erased path is attached to the tree. Keeping unvisited
        /// nodes in the leading permutation slots makes the episode
        /// start an unbiased O(1) draw, and the committed suffix of the
        /// permutation serves as the walk's path stack during loop
        /// erasure.
        ///
        /// The tree is exactly uniform over all spanning trees provided
        /// every random choice is exactly uniform, which `gen_range`
        /// guarantees. The graph must be connected; a disconnected
        /// graph trips the step budget and panics.
        ///
        /// # References
        /// [1]  Wilson, David Bruce. "Generating random spanning trees more quickly
        ///      than the cover time." Proceedings of the twenty-eighth annual ACM
        ///      symposium on Theory of computing. 1996.
        fn random_spanning_tree(
            &mut self,
            graph: &Graph,
            buf: &mut TreeBuffer,
            rng: &mut SmallRng,
        ) {
            buf.clear();
            self.color.fill(0);
            self.perm.reset();
            let n = graph.num_vertices();
            if n == 0 {
                return;
            }
            let mut budget = step_budget(graph);

            // The first episode commits the root alone.
            let mut committed = 1;
            let slot = rng.gen_range(0..n);
            let root = self.perm.at(slot);
            self.color[root] = 1;
            buf.parent[root] = -1;
            self.perm.swap(slot, n - committed);

            let mut episode: u32 = 1;
            while committed < n {
                episode += 1;
                let slot = rng.gen_range(0..(n - committed));
                let mut u = self.perm.at(slot);
                self.color[u] = episode;
                committed += 1;
                self.perm.swap(slot, n - committed);

                let mut v = u;
                while self.color[v] == episode {
                    // One uniform step among u's neighbors.
                    let incident = graph.incident_edges(u);
                    let pick = incident[rng.gen_range(0..incident.len())];
                    v = graph.opposite(u, pick);

                    if self.color[v] < episode {
                        // The step leaves this episode's path: toward a
                        // fresh node, or joining a finished episode.
                        buf.parent[u] = v as i64;
                    }
                    if self.color[v] == 0 {
                        self.color[v] = episode;
                        committed += 1;
                        let pos = self.perm.position(v);
                        self.perm.swap(pos, n - committed);
                        u = v;
                    } else if self.color[v] == episode {
                        // The walk closed a loop: pop the path stack
                        // back to v, uncommitting and uncoloring the
                        // erased nodes, then resume from v.
                        while u != v {
                            self.color[u] = 0;
                            committed -= 1;
                            u = self.perm.at(n - committed);
                        }
                    }

                    budget -= 1;
                    if budget == 0 {
                        panic!("step budget exhausted; input graph is likely disconnected");
                    }
                }
            }
        }
    }
}

/// Uniform sampling by first-entry random walk (Aldous/Broder).
mod random_walk {
    use super::*;

    /// Samples spanning trees by walking until every node has been
    /// visited and keeping each node's first-entry edge.
    ///
    /// Also exactly uniform, but typically slower than Wilson's
    /// algorithm (cover time versus mean hitting time).
    pub struct RandomWalkSampler {
        /// Whether each node has been visited.
        visited: Vec<bool>,
    }

    impl RandomWalkSampler {
        /// Creates a random-walk sampler for a graph of size `n`.
        pub fn new(n: usize) -> RandomWalkSampler {
            return RandomWalkSampler {
                visited: vec![false; n],
            };
        }
    }

    impl SpanningTreeSampler for RandomWalkSampler {
        /// Draws a random spanning tree by simple random walk: the walk
        /// starts at a uniform node (the root), and the edge by which
        /// each other node is first reached becomes its parent edge.
        /// The graph must be connected; a disconnected graph trips the
        /// step budget and panics.
        fn random_spanning_tree(
            &mut self,
            graph: &Graph,
            buf: &mut TreeBuffer,
            rng: &mut SmallRng,
        ) {
            buf.clear();
            self.visited.fill(false);
            let n = graph.num_vertices();
            if n == 0 {
                return;
            }
            let mut budget = step_budget(graph);

            let mut u = rng.gen_range(0..n);
            self.visited[u] = true;
            buf.parent[u] = -1;
            let mut n_visited = 1;

            while n_visited < n {
                let incident = graph.incident_edges(u);
                let pick = incident[rng.gen_range(0..incident.len())];
                let v = graph.opposite(u, pick);
                if !self.visited[v] {
                    self.visited[v] = true;
                    buf.parent[v] = u as i64;
                    n_visited += 1;
                }
                u = v;

                budget -= 1;
                if budget == 0 {
                    panic!("step budget exhausted; input graph is likely disconnected");
                }
            }
        }
    }
}
