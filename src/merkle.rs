//! A binary SHA-256 Merkle tree over an ordered sequence of leaves.
//!
//! At each level, consecutive nodes are paired and hashed together; a level with an odd count
//! carries its last node forward by re-hashing it alone (rather than duplicating it, which is
//! the more common construction but not what this corpus's original implementation does).
//! Construction is deterministic and position-sensitive: swapping two leaves changes the root.

use sha2::{Digest as Sha2Digest, Sha256};

/// A SHA-256 digest, as stored in a [`Tree`]'s leaves and internal nodes.
pub type Hash = [u8; 32];

/// A binary Merkle tree: a root digest plus the ordered leaves it was built from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    root: Hash,
    leaves: Vec<Hash>,
}

impl Tree {
    /// Builds a tree over `leaves`. Returns `None` for an empty input — the neutral sentinel the
    /// Go original returns as a `nil` tree, since there's no meaningful root for zero leaves.
    #[must_use]
    pub fn new(leaves: Vec<Hash>) -> Option<Tree> {
        if leaves.is_empty() {
            return None;
        }

        let mut layer = leaves.clone();
        while layer.len() > 1 {
            layer = next_layer(&layer);
        }

        Some(Tree { root: sha256(&layer[0]), leaves })
    }

    /// The tree's root digest.
    #[must_use]
    pub fn root(&self) -> Hash {
        self.root
    }

    /// The leaves the tree was built from, in order.
    #[must_use]
    pub fn leaves(&self) -> &[Hash] {
        &self.leaves
    }

    /// The number of leaves in the tree.
    #[must_use]
    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }
}

fn next_layer(nodes: &[Hash]) -> Vec<Hash> {
    let mut out = Vec::new();
    for pair in nodes.chunks(2) {
        out.push(match pair {
            [left, right] => hash_pair(left, right),
            [last] => sha256(last),
            _ => unreachable!("chunks(2) never yields more than 2 elements"),
        });
    }
    out
}

fn hash_pair(left: &Hash, right: &Hash) -> Hash {
    let mut buf = [0u8; 64];
    buf[..32].copy_from_slice(left);
    buf[32..].copy_from_slice(right);
    sha256(&buf)
}

/// Hashes arbitrary data into a leaf-compatible digest.
#[must_use]
pub fn sha256(data: &[u8]) -> Hash {
    Sha256::digest(data).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaves(n: usize) -> Vec<Hash> {
        (0..n).map(|i| sha256(&i.to_be_bytes())).collect()
    }

    #[test]
    fn empty_input_has_no_tree() {
        assert!(Tree::new(Vec::new()).is_none());
    }

    #[test]
    fn single_leaf_tree_hashes_the_leaf_alone() {
        let ls = leaves(1);
        let tree = Tree::new(ls.clone()).unwrap();
        assert_eq!(sha256(&ls[0]), tree.root());
    }

    #[test]
    fn root_is_stable_across_runs() {
        for count in [1, 2, 3, 4, 8, 9, 15, 16] {
            let ls = leaves(count);
            let a = Tree::new(ls.clone()).unwrap();
            let b = Tree::new(ls).unwrap();
            assert_eq!(a.root(), b.root());
        }
    }

    #[test]
    fn distinct_leaf_counts_have_distinct_roots() {
        let mut roots = Vec::new();
        for count in [1, 2, 3, 4, 8, 9, 15, 16] {
            roots.push(Tree::new(leaves(count)).unwrap().root());
        }
        for (i, a) in roots.iter().enumerate() {
            for (j, b) in roots.iter().enumerate() {
                if i != j {
                    assert_ne!(a, b, "leaf counts produced the same root");
                }
            }
        }
    }

    #[test]
    fn swapping_two_leaves_changes_the_root() {
        let mut ls = leaves(9);
        let original = Tree::new(ls.clone()).unwrap().root();
        ls.swap(2, 5);
        let swapped = Tree::new(ls).unwrap().root();
        assert_ne!(original, swapped);
    }
}
