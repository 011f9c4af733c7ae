//! MCTS tree structure with arena allocation.
//!
//! The tree uses arena allocation for efficient node storage and
//! cache-friendly traversal. Nodes are stored in a contiguous Vec
//! and referenced by NodeId indices; parent links are indices too, so
//! the arena is the single owner of every node.

use games_connect4::Board;

use crate::node::{MctsNode, NodeId};

/// MCTS tree with arena-based node storage.
#[derive(Debug, Clone)]
pub struct MctsTree {
    /// Arena storing all nodes
    nodes: Vec<MctsNode>,

    /// Root node index (always 0 after initialization or reroot)
    root: NodeId,
}

impl MctsTree {
    /// Create a new single-node tree rooted at `board`.
    pub fn new(board: Board) -> Self {
        Self {
            nodes: vec![MctsNode::new_root(board)],
            root: NodeId(0),
        }
    }

    /// Get the root node ID.
    #[inline]
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Position at the root.
    #[inline]
    pub fn root_board(&self) -> &Board {
        &self.get(self.root).board
    }

    /// Get a reference to a node by ID.
    #[inline]
    pub fn get(&self, id: NodeId) -> &MctsNode {
        &self.nodes[id.0 as usize]
    }

    /// Get a mutable reference to a node by ID.
    #[inline]
    pub fn get_mut(&mut self, id: NodeId) -> &mut MctsNode {
        &mut self.nodes[id.0 as usize]
    }

    /// Allocate a new node and return its ID.
    pub fn allocate(&mut self, node: MctsNode) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(node);
        id
    }

    /// Get the total number of nodes in the tree.
    #[inline]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if tree is empty (should never be true after construction).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Get the arena slice for read access.
    #[inline]
    pub fn arena(&self) -> &[MctsNode] {
        &self.nodes
    }

    /// Select the child of a node with the highest UCT score.
    /// Ties go to the child expanded last.
    pub fn select_child(&self, node_id: NodeId, exploration: f64) -> Option<NodeId> {
        let node = self.get(node_id);
        // Pre-compute ln once instead of per-child comparison
        let ln_parent_visits = (node.visit_count as f64).ln();

        node.children
            .iter()
            .max_by(|(_, id_a), (_, id_b)| {
                let score_a = self.get(*id_a).uct_score(ln_parent_visits, exploration);
                let score_b = self.get(*id_b).uct_score(ln_parent_visits, exploration);
                score_a
                    .partial_cmp(&score_b)
                    .unwrap_or(std::cmp::Ordering::Equal)
            })
            .map(|(_, id)| *id)
    }

    /// Find the child reached by playing `action` from `node_id`.
    pub fn child(&self, node_id: NodeId, action: u8) -> Option<NodeId> {
        self.get(node_id)
            .children
            .iter()
            .find(|(a, _)| *a == action)
            .map(|(_, id)| *id)
    }

    /// Add a child to a parent node and remove `action` from the parent's
    /// untried columns. Returns the new child's NodeId.
    pub fn add_child(&mut self, parent_id: NodeId, action: u8, board: Board) -> NodeId {
        let child_id = self.allocate(MctsNode::new_child(parent_id, action, board));

        let parent = self.get_mut(parent_id);
        parent.untried.retain(|&c| c != action);
        parent.children.push((action, child_id));

        child_id
    }

    /// Backpropagate a finished rollout from a node to the root inclusive.
    /// Every node on the path is credited with the outcome from its own
    /// piece's perspective.
    pub fn backpropagate(&mut self, leaf_id: NodeId, outcome: &Board) {
        let mut current_id = leaf_id;

        while current_id.is_some() {
            let node = self.get_mut(current_id);
            node.visit_count += 1;
            node.wins += outcome.translate_outcome(node.piece);
            current_id = node.parent;
        }
    }

    /// Get the best column from the root by win rate (not visit count).
    /// Returns (column, win_rate) or None if the root has no children.
    /// Ties go to the child expanded last.
    pub fn best_action(&self) -> Option<(u8, f64)> {
        let root = self.get(self.root);
        root.children
            .iter()
            .map(|(action, id)| (*action, self.get(*id).win_rate()))
            .max_by(|(_, a), (_, b)| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal))
    }

    /// Make the root's child for `action` the new root, discarding the old
    /// root and every sibling subtree. The surviving subtree is compacted
    /// into a fresh arena with the new root at index 0.
    ///
    /// Returns false, leaving the tree untouched, if no such child exists.
    pub fn reroot(&mut self, action: u8) -> bool {
        let Some(new_root) = self.child(self.root, action) else {
            return false;
        };

        let mut remap = vec![NodeId::NONE; self.nodes.len()];
        let mut order = vec![new_root];
        remap[new_root.0 as usize] = NodeId(0);

        // Breadth-first, so every parent is renumbered before its children
        let mut i = 0;
        while i < order.len() {
            let id = order[i];
            for &(_, child) in &self.get(id).children {
                remap[child.0 as usize] = NodeId(order.len() as u32);
                order.push(child);
            }
            i += 1;
        }

        let mut old: Vec<Option<MctsNode>> = std::mem::take(&mut self.nodes)
            .into_iter()
            .map(Some)
            .collect();
        let mut nodes = Vec::with_capacity(order.len());
        for id in order {
            let Some(mut node) = old[id.0 as usize].take() else {
                continue;
            };
            node.parent = if id == new_root {
                NodeId::NONE
            } else {
                remap[node.parent.0 as usize]
            };
            for (_, child) in node.children.iter_mut() {
                *child = remap[child.0 as usize];
            }
            nodes.push(node);
        }

        self.nodes = nodes;
        self.root = NodeId(0);
        true
    }

    /// Get statistics about the tree for debugging.
    pub fn stats(&self) -> TreeStats {
        let root = self.get(self.root);
        TreeStats {
            total_nodes: self.nodes.len(),
            root_visits: root.visit_count,
            root_win_rate: root.win_rate(),
            max_depth: self.compute_max_depth(self.root, 0),
        }
    }

    fn compute_max_depth(&self, node_id: NodeId, current_depth: u32) -> u32 {
        let node = self.get(node_id);
        if node.children.is_empty() {
            return current_depth;
        }

        node.children
            .iter()
            .map(|(_, id)| self.compute_max_depth(*id, current_depth + 1))
            .max()
            .unwrap_or(current_depth)
    }
}

/// Statistics about an MCTS tree.
#[derive(Debug, Clone)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub root_visits: u32,
    pub root_win_rate: f64,
    pub max_depth: u32,
}
