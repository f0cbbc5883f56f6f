//! A permutation stored together with its inverse.

/// A bijection on `[0, len)` whose inverse is maintained alongside it,
/// so both directions are O(1) lookups and a pairwise swap is the only
/// mutation.
///
/// The samplers use this to track element identity under reordering:
/// the exact sampler permutes vertex slots to pick unvisited vertices
/// without bias or rescanning, and the edge-swap mixer keeps tree edges
/// in the leading slots and non-tree edges in the trailing ones.
#[derive(Clone, Debug)]
pub struct Permutation {
    /// Maps slots to elements.
    forward: Vec<usize>,
    /// Maps elements to slots; `inverse[forward[i]] == i` always holds.
    inverse: Vec<usize>,
}

impl Permutation {
    /// Creates the identity permutation on `[0, len)`.
    pub fn identity(len: usize) -> Permutation {
        return Permutation {
            forward: (0..len).collect(),
            inverse: (0..len).collect(),
        };
    }

    /// Creates a permutation from a forward mapping, deriving the
    /// inverse. `forward` must be a bijection on `[0, forward.len())`.
    pub fn from_forward(forward: Vec<usize>) -> Permutation {
        let mut inverse = vec![0 as usize; forward.len()];
        for (slot, &element) in forward.iter().enumerate() {
            inverse[element] = slot;
        }
        return Permutation {
            forward: forward,
            inverse: inverse,
        };
    }

    /// The size of the permuted range.
    pub fn len(&self) -> usize {
        return self.forward.len();
    }

    /// Whether the permuted range is empty.
    pub fn is_empty(&self) -> bool {
        return self.forward.is_empty();
    }

    /// The element in `slot`.
    pub fn at(&self, slot: usize) -> usize {
        return self.forward[slot];
    }

    /// The slot holding `element`.
    pub fn position(&self, element: usize) -> usize {
        return self.inverse[element];
    }

    /// Restores the identity mapping.
    pub fn reset(&mut self) {
        for i in 0..self.forward.len() {
            self.forward[i] = i;
            self.inverse[i] = i;
        }
    }

    /// Exchanges the elements in slots `i` and `j` and updates the
    /// inverse for both. Preserves bijectivity by construction.
    pub fn swap(&mut self, i: usize, j: usize) {
        self.forward.swap(i, j);
        self.inverse[self.forward[i]] = i;
        self.inverse[self.forward[j]] = j;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::{Rng, SeedableRng};

    /// Checks that `forward` is a bijection and `inverse` is its exact
    /// inverse.
    fn consistent(perm: &Permutation) -> bool {
        let n = perm.len();
        let mut seen = vec![false; n];
        for slot in 0..n {
            let element = perm.at(slot);
            if element >= n || seen[element] || perm.position(element) != slot {
                return false;
            }
            seen[element] = true;
        }
        return true;
    }

    #[test]
    fn identity_round_trip() {
        let perm = Permutation::identity(8);
        for i in 0..8 {
            assert_eq!(perm.at(i), i);
            assert_eq!(perm.position(i), i);
        }
        assert!(consistent(&perm));
    }

    #[test]
    fn swap_updates_both_directions() {
        let mut perm = Permutation::identity(4);
        perm.swap(0, 3);
        assert_eq!(perm.at(0), 3);
        assert_eq!(perm.at(3), 0);
        assert_eq!(perm.position(3), 0);
        assert_eq!(perm.position(0), 3);
        assert!(consistent(&perm));
    }

    #[test]
    fn random_swap_sequences_preserve_invariant() {
        let mut rng: SmallRng = SeedableRng::seed_from_u64(17);
        let mut perm = Permutation::identity(37);
        for _ in 0..10_000 {
            let i = rng.gen_range(0..37);
            let j = rng.gen_range(0..37);
            perm.swap(i, j);
            assert!(consistent(&perm));
        }
    }

    #[test]
    fn from_forward_derives_inverse() {
        let perm = Permutation::from_forward(vec![2, 0, 3, 1]);
        assert_eq!(perm.position(2), 0);
        assert_eq!(perm.position(0), 1);
        assert_eq!(perm.position(3), 2);
        assert_eq!(perm.position(1), 3);
        assert!(consistent(&perm));
    }

    #[test]
    fn reset_restores_identity() {
        let mut perm = Permutation::identity(5);
        perm.swap(1, 4);
        perm.swap(0, 2);
        perm.reset();
        for i in 0..5 {
            assert_eq!(perm.at(i), i);
        }
    }
}
