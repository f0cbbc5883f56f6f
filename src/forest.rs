//! The dynamic forest consumed by the edge-swap chain.

/// A forest under online `link`/`cut` updates with path queries.
///
/// The mixer only needs this contract; the balancing machinery of a
/// real link-cut tree is deliberately behind it. `cycle` exposes the
/// tree path between two nodes, and `select_aux`/`successor` then read
/// positions along that exposed path until the next `cycle` call.
pub trait DynamicForest {
    /// The number of nodes in the forest.
    fn num_vertices(&self) -> usize;

    /// Adds the tree edge (u, v). The endpoints must currently be in
    /// different trees.
    fn link(&mut self, u: usize, v: usize);

    /// Removes the tree edge (u, v), which must exist.
    fn cut(&mut self, u: usize, v: usize);

    /// Whether any tree path connects `u` and `v`.
    fn connected(&mut self, u: usize, v: usize) -> bool;

    /// Whether (u, v) is a tree edge.
    fn has_edge(&self, u: usize, v: usize) -> bool;

    /// Exposes the tree path from `u` to `v` (which must be connected)
    /// and returns the length of the cycle that adding the edge (u, v)
    /// would close: the number of path edges plus one.
    fn cycle(&mut self, u: usize, v: usize) -> usize;

    /// The k-th vertex along the exposed path, 1-based from `u`
    /// (so `select_aux(u, 1) == u`).
    fn select_aux(&self, u: usize, k: usize) -> usize;

    /// The vertex after `v` along the exposed path.
    fn successor(&self, v: usize) -> usize;
}

/// A reference implementation of [DynamicForest] over plain adjacency
/// lists with breadth-first path queries.
///
/// Operations are linear in the tree size rather than poly-logarithmic;
/// correctness-wise it is interchangeable with a link-cut tree, and the
/// mixer is generic so one can be dropped in for large graphs.
pub struct PathForest {
    /// Tree adjacency lists.
    adj: Vec<Vec<usize>>,
    /// The most recently exposed path, in order from the `cycle` call's
    /// first argument to its second.
    path: Vec<usize>,
}

impl PathForest {
    /// Creates an edgeless forest on `n` nodes.
    pub fn new(n: usize) -> PathForest {
        return PathForest {
            adj: vec![Vec::<usize>::with_capacity(4); n],
            path: Vec::<usize>::new(),
        };
    }

    /// Finds the tree path from `u` to `v` by BFS, or `None` if they
    /// are in different trees.
    fn find_path(&self, u: usize, v: usize) -> Option<Vec<usize>> {
        let n = self.adj.len();
        if u == v {
            return Some(vec![u]);
        }
        let mut pred = vec![usize::MAX; n];
        let mut queue = std::collections::VecDeque::with_capacity(n);
        pred[u] = u;
        queue.push_back(u);
        while let Some(next) = queue.pop_front() {
            for &neighbor in self.adj[next].iter() {
                if pred[neighbor] == usize::MAX {
                    pred[neighbor] = next;
                    if neighbor == v {
                        let mut path = vec![v];
                        let mut node = v;
                        while node != u {
                            node = pred[node];
                            path.push(node);
                        }
                        path.reverse();
                        return Some(path);
                    }
                    queue.push_back(neighbor);
                }
            }
        }
        return None;
    }
}

impl DynamicForest for PathForest {
    fn num_vertices(&self) -> usize {
        return self.adj.len();
    }

    fn link(&mut self, u: usize, v: usize) {
        debug_assert!(!self.has_edge(u, v), "link of an existing edge");
        self.adj[u].push(v);
        self.adj[v].push(u);
    }

    fn cut(&mut self, u: usize, v: usize) {
        let pos_v = self.adj[u]
            .iter()
            .position(|&x| x == v)
            .expect("cut of a missing tree edge");
        self.adj[u].swap_remove(pos_v);
        let pos_u = self.adj[v]
            .iter()
            .position(|&x| x == u)
            .expect("cut of a missing tree edge");
        self.adj[v].swap_remove(pos_u);
    }

    fn connected(&mut self, u: usize, v: usize) -> bool {
        return self.find_path(u, v).is_some();
    }

    fn has_edge(&self, u: usize, v: usize) -> bool {
        return self.adj[u].contains(&v);
    }

    fn cycle(&mut self, u: usize, v: usize) -> usize {
        self.path = self
            .find_path(u, v)
            .expect("cycle query between disconnected nodes");
        return self.path.len();
    }

    fn select_aux(&self, u: usize, k: usize) -> usize {
        debug_assert_eq!(self.path.first(), Some(&u), "path not exposed from u");
        return self.path[k - 1];
    }

    fn successor(&self, v: usize) -> usize {
        let pos = self
            .path
            .iter()
            .position(|&x| x == v)
            .expect("vertex not on the exposed path");
        return self.path[pos + 1];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Builds a path forest 0 - 1 - 2 - 3 - 4.
    fn chain() -> PathForest {
        let mut forest = PathForest::new(5);
        for v in 0..4 {
            forest.link(v, v + 1);
        }
        return forest;
    }

    #[test]
    fn link_cut_connectivity() {
        let mut forest = chain();
        assert!(forest.connected(0, 4));
        assert!(forest.has_edge(1, 2));
        assert!(!forest.has_edge(0, 2));
        forest.cut(1, 2);
        assert!(!forest.connected(0, 4));
        assert!(forest.connected(0, 1));
        assert!(forest.connected(2, 4));
        forest.link(0, 4);
        assert!(forest.connected(1, 3));
    }

    #[test]
    fn cycle_exposes_path() {
        let mut forest = chain();
        // Adding (0, 4) would close a 5-cycle.
        assert_eq!(forest.cycle(0, 4), 5);
        assert_eq!(forest.select_aux(0, 1), 0);
        assert_eq!(forest.select_aux(0, 3), 2);
        assert_eq!(forest.successor(2), 3);
        assert_eq!(forest.successor(0), 1);
    }

    #[test]
    fn cycle_of_adjacent_nodes() {
        let mut forest = chain();
        assert_eq!(forest.cycle(2, 3), 2);
        assert_eq!(forest.successor(2), 3);
    }

    #[test]
    fn branching_tree_paths() {
        // A star with center 0 plus a tail at 1.
        let mut forest = PathForest::new(5);
        forest.link(0, 1);
        forest.link(0, 2);
        forest.link(0, 3);
        forest.link(1, 4);
        assert_eq!(forest.cycle(4, 3), 4);
        assert_eq!(forest.select_aux(4, 2), 1);
        assert_eq!(forest.successor(1), 0);
        assert_eq!(forest.successor(0), 3);
    }
}
