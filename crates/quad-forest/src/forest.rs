use alloc::vec::Vec;

use crate::context::ForestContext;
use crate::tree::Tree;

/// A forest: one allocation context shared by every tree, indexed by
/// tree id — the minimal multi-tree aggregate that gives `quad-mesh`'s
/// connectivity somewhere to load its per-tree quadrant storage into.
#[derive(Debug)]
pub struct Forest {
    pub context: ForestContext,
    pub trees: Vec<Tree>,
}

impl Forest {
    /// Creates a forest of `num_trees` empty trees sharing one
    /// context with the given `data_size`.
    pub fn new(num_trees: usize, data_size: usize) -> Self {
        let mut trees = Vec::with_capacity(num_trees);
        trees.resize_with(num_trees, Tree::new);
        Self {
            context: ForestContext::new(data_size),
            trees,
        }
    }

    pub fn num_trees(&self) -> usize {
        self.trees.len()
    }

    pub fn tree(&self, which_tree: usize) -> &Tree {
        &self.trees[which_tree]
    }

    pub fn tree_mut(&mut self, which_tree: usize) -> &mut Tree {
        &mut self.trees[which_tree]
    }
}
