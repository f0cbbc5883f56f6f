//! Buffer data structures to avoid memory reallocation.

/// A reusable spanning tree buffer in parent-pointer form.
///
/// Node indices are 0-based; the root's parent is -1. A valid tree has
/// exactly one root, `n - 1` parent edges, and every node reaches the
/// root by following parents.
pub struct TreeBuffer {
    /// The parent of each node in the tree (-1 for the root).
    pub parent: Vec<i64>,
}

impl TreeBuffer {
    /// Creates a buffer for spanning trees of a graph of size `n`.
    pub fn new(n: usize) -> TreeBuffer {
        return TreeBuffer {
            parent: vec![-1 as i64; n],
        };
    }

    /// Resets the buffer.
    pub fn clear(&mut self) {
        self.parent.fill(-1);
    }

    /// Iterates over the tree's (child, parent) pairs, skipping the root.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        return self
            .parent
            .iter()
            .enumerate()
            .filter_map(|(child, &parent)| {
                if parent >= 0 {
                    Some((child, parent as usize))
                } else {
                    None
                }
            });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edges_skip_the_root() {
        let mut buf = TreeBuffer::new(4);
        buf.parent[1] = 0;
        buf.parent[2] = 1;
        buf.parent[3] = 1;
        let edges: Vec<(usize, usize)> = buf.edges().collect();
        assert_eq!(edges, vec![(1, 0), (2, 1), (3, 1)]);
        buf.clear();
        assert_eq!(buf.edges().count(), 0);
    }
}
