//! A compact undirected graph with sorted adjacency.
use petgraph::unionfind::UnionFind;

/// Edges are pairs of node indices (smaller index first).
#[derive(Clone, Copy, Debug, Hash, Eq, PartialEq)]
pub struct Edge(pub usize, pub usize);

/// An immutable undirected graph in a CSR-style layout.
///
/// Nodes are `0..num_vertices`. Adjacency is derived, not stored
/// redundantly: one shared index array into `edges`, where the slice
/// belonging to each node lists its incident edges sorted by the index
/// of the opposite endpoint. The sorted order is what makes
/// [Graph::edge_idx] a binary search.
///
/// The node count and edge list are fixed at construction; inputs are
/// assumed to be simple graphs (no multi-edges or self-loops).
#[derive(Clone)]
pub struct Graph {
    /// The graph's edges; each pair is canonicalized so the smaller
    /// node index comes first.
    edges: Vec<Edge>,
    /// Start of each node's block in `adj` (length `num_vertices + 1`).
    offsets: Vec<usize>,
    /// Indices into `edges`, grouped by node and sorted by the opposite
    /// endpoint within each block.
    adj: Vec<usize>,
}

impl Graph {
    /// Builds a graph from an edge list in O(V + e) using two counting
    /// passes (no comparison sort).
    ///
    /// The first pass buckets every (node, edge) incidence by the
    /// *opposite* endpoint; the second scatters the result by owning
    /// node. Both passes are stable, so each node's block comes out
    /// sorted by neighbor index.
    pub fn new(num_vertices: usize, mut edges: Vec<Edge>) -> Graph {
        for edge in edges.iter_mut() {
            if edge.0 > edge.1 {
                *edge = Edge(edge.1, edge.0);
            }
        }
        let num_edges = edges.len();

        let mut offsets = vec![0 as usize; num_vertices + 1];
        for &Edge(u, v) in edges.iter() {
            offsets[u + 1] += 1;
            offsets[v + 1] += 1;
        }
        for node in 0..num_vertices {
            offsets[node + 1] += offsets[node];
        }

        // Pass 1: bucket incidences by the opposite endpoint.
        // An incidence is (owning node, edge index); the incidence owned
        // by `u` is keyed on `v` and vice versa.
        let mut bucket = vec![0 as usize; num_vertices + 1];
        for &Edge(u, v) in edges.iter() {
            bucket[u + 1] += 1;
            bucket[v + 1] += 1;
        }
        for node in 0..num_vertices {
            bucket[node + 1] += bucket[node];
        }
        let mut by_neighbor = vec![(0 as usize, 0 as usize); 2 * num_edges];
        for (idx, &Edge(u, v)) in edges.iter().enumerate() {
            by_neighbor[bucket[v]] = (u, idx);
            bucket[v] += 1;
            by_neighbor[bucket[u]] = (v, idx);
            bucket[u] += 1;
        }

        // Pass 2: stable scatter by owning node.
        let mut cursor = offsets[..num_vertices].to_vec();
        let mut adj = vec![0 as usize; 2 * num_edges];
        for &(owner, idx) in by_neighbor.iter() {
            adj[cursor[owner]] = idx;
            cursor[owner] += 1;
        }

        return Graph {
            edges: edges,
            offsets: offsets,
            adj: adj,
        };
    }

    /// Builds a rectangular grid graph (rook adjacency) with
    /// `width * height` nodes. Useful for tests and benchmarks.
    pub fn rect_grid(width: usize, height: usize) -> Graph {
        let mut edges = Vec::<Edge>::with_capacity(2 * width * height);
        for x in 0..width {
            for y in 0..height {
                let node = (x * height) + y;
                if y + 1 < height {
                    edges.push(Edge(node, node + 1));
                }
                if x + 1 < width {
                    edges.push(Edge(node, node + height));
                }
            }
        }
        return Graph::new(width * height, edges);
    }

    /// The number of nodes in the graph.
    pub fn num_vertices(&self) -> usize {
        return self.offsets.len() - 1;
    }

    /// The number of edges in the graph.
    pub fn num_edges(&self) -> usize {
        return self.edges.len();
    }

    /// The graph's edges (canonicalized, in input order).
    pub fn edges(&self) -> &[Edge] {
        return &self.edges;
    }

    /// The degree of node `v`.
    pub fn degree(&self, v: usize) -> usize {
        return self.offsets[v + 1] - self.offsets[v];
    }

    /// The indices of the edges incident to `v`, sorted by the index of
    /// the opposite endpoint.
    pub fn incident_edges(&self, v: usize) -> &[usize] {
        return &self.adj[self.offsets[v]..self.offsets[v + 1]];
    }

    /// The endpoint of `edge_idx` that is not `v`.
    pub fn opposite(&self, v: usize, edge_idx: usize) -> usize {
        let Edge(a, b) = self.edges[edge_idx];
        if a == v {
            return b;
        }
        return a;
    }

    /// Iterates over the neighbors of `v` in ascending index order.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = usize> + '_ {
        return self
            .incident_edges(v)
            .iter()
            .map(move |&idx| self.opposite(v, idx));
    }

    /// Finds the index of the edge between `u` and `v` (in either
    /// orientation) by binary search over `u`'s block, in
    /// O(log degree(u)). Returns `None` if the nodes are not adjacent.
    pub fn edge_idx(&self, u: usize, v: usize) -> Option<usize> {
        let block = self.incident_edges(u);
        return block
            .binary_search_by_key(&v, |&idx| self.opposite(u, idx))
            .ok()
            .map(|pos| block[pos]);
    }

    /// Whether the graph is connected (union-find over the edge list).
    pub fn is_connected(&self) -> bool {
        let n = self.num_vertices();
        if n == 0 {
            return true;
        }
        let mut uf = UnionFind::<usize>::new(n);
        let mut n_unions = 0;
        for &Edge(u, v) in self.edges.iter() {
            if uf.union(u, v) {
                n_unions += 1;
            }
        }
        return n_unions == n - 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// The construction scenario: V=4, e=5 with edges
    /// (1,2), (2,3), (3,4), (1,4), (1,3) in 1-based terms.
    fn diamond() -> Graph {
        let edges = vec![Edge(0, 1), Edge(1, 2), Edge(2, 3), Edge(0, 3), Edge(0, 2)];
        return Graph::new(4, edges);
    }

    #[test]
    fn neighbors_sorted_ascending() {
        let graph = diamond();
        let neighbors: Vec<usize> = graph.neighbors(0).collect();
        assert_eq!(neighbors, vec![1, 2, 3]);
        for v in 0..graph.num_vertices() {
            let block: Vec<usize> = graph.neighbors(v).collect();
            let mut sorted = block.clone();
            sorted.sort();
            assert_eq!(block, sorted);
        }
    }

    #[test]
    fn edge_idx_symmetric() {
        let graph = diamond();
        assert_eq!(graph.edge_idx(0, 2), Some(4));
        assert_eq!(graph.edge_idx(2, 0), Some(4));
        assert_eq!(graph.edge_idx(0, 2), graph.edge_idx(2, 0));
        assert_eq!(graph.edge_idx(1, 3), None);
    }

    #[test]
    fn edge_idx_round_trips_all_edges() {
        let graph = Graph::rect_grid(4, 3);
        for (idx, &Edge(u, v)) in graph.edges().iter().enumerate() {
            assert_eq!(graph.edge_idx(u, v), Some(idx));
            assert_eq!(graph.edge_idx(v, u), Some(idx));
        }
    }

    #[test]
    fn degrees_match_adjacency() {
        let graph = diamond();
        assert_eq!(graph.degree(0), 3);
        assert_eq!(graph.degree(1), 2);
        assert_eq!(graph.degree(2), 3);
        assert_eq!(graph.degree(3), 2);
        let total: usize = (0..4).map(|v| graph.degree(v)).sum();
        assert_eq!(total, 2 * graph.num_edges());
    }

    #[test]
    fn edges_canonicalized() {
        let graph = Graph::new(3, vec![Edge(2, 0), Edge(1, 0), Edge(2, 1)]);
        for &Edge(u, v) in graph.edges().iter() {
            assert!(u < v);
        }
    }

    #[test]
    fn connectivity() {
        assert!(diamond().is_connected());
        assert!(Graph::rect_grid(5, 5).is_connected());
        // Two disjoint segments.
        let split = Graph::new(4, vec![Edge(0, 1), Edge(2, 3)]);
        assert!(!split.is_connected());
        // An isolated node.
        let isolated = Graph::new(3, vec![Edge(0, 1)]);
        assert!(!isolated.is_connected());
    }
}
