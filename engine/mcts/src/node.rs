//! MCTS tree node representation.
//!
//! Each node owns a snapshot of the position reached by taking `action` from
//! the parent. Statistics are kept from the point of view of `piece`, the
//! player who made that move, so a parent picks among its children by their
//! own win rates.

use games_connect4::{Board, Piece};

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A node in the MCTS tree.
#[derive(Debug, Clone)]
pub struct MctsNode {
    /// Parent node index (NONE for root)
    pub parent: NodeId,

    /// Column that led to this node from parent (None for a fresh root)
    pub action: Option<u8>,

    /// Position at this node
    pub board: Board,

    /// Player who moved into this position; results are credited to them
    pub piece: Piece,

    /// Columns not yet expanded into children. Empty for terminal positions.
    pub untried: Vec<u8>,

    /// Children: Vec of (column, NodeId) pairs in expansion order.
    pub children: Vec<(u8, NodeId)>,

    /// Number of iterations that passed through this node
    pub visit_count: u32,

    /// Sum of rollout results from `piece`'s perspective (1 win, 0.5 draw, 0 loss)
    pub wins: f64,
}

impl MctsNode {
    /// Create a new root node.
    pub fn new_root(board: Board) -> Self {
        Self::new(NodeId::NONE, board.last_move(), board)
    }

    /// Create a new child node.
    pub fn new_child(parent: NodeId, action: u8, board: Board) -> Self {
        Self::new(parent, Some(action), board)
    }

    fn new(parent: NodeId, action: Option<u8>, board: Board) -> Self {
        let untried = if board.is_terminal() {
            Vec::new()
        } else {
            board.valid_columns()
        };
        Self {
            parent,
            action,
            piece: board.previous_player(),
            board,
            untried,
            children: Vec::new(),
            visit_count: 0,
            wins: 0.0,
        }
    }

    /// Mean result `wins / visit_count`. Returns 0.0 if never visited.
    #[inline]
    pub fn win_rate(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.wins / self.visit_count as f64
        }
    }

    /// UCT score for child selection.
    /// UCT = w/n + c * sqrt(ln N / n)
    ///
    /// Takes pre-computed ln(parent_visits) to avoid redundant log calls
    /// when comparing siblings. Unvisited nodes score +inf.
    #[inline]
    pub fn uct_score(&self, ln_parent_visits: f64, exploration: f64) -> f64 {
        if self.visit_count == 0 {
            return f64::INFINITY;
        }
        let n = self.visit_count as f64;
        self.win_rate() + exploration * (ln_parent_visits / n).sqrt()
    }

    /// Check if every legal column has a child.
    #[inline]
    pub fn is_fully_expanded(&self) -> bool {
        self.untried.is_empty()
    }

    /// Check if this node has been expanded (has children).
    #[inline]
    pub fn is_expanded(&self) -> bool {
        !self.children.is_empty()
    }

    /// Check if selection stops here: either columns remain to expand, or
    /// the position is terminal and has no children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        !self.is_fully_expanded() || !self.is_expanded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id_none() {
        assert!(NodeId::NONE.is_none());
        assert!(!NodeId::NONE.is_some());
        assert!(!NodeId(0).is_none());
        assert!(NodeId(0).is_some());
    }

    #[test]
    fn test_new_root() {
        let node = MctsNode::new_root(Board::new());

        assert!(node.parent.is_none());
        assert_eq!(node.action, None);
        assert_eq!(node.visit_count, 0);
        assert_eq!(node.untried, vec![0, 1, 2, 3, 4, 5, 6]);
        assert!(node.children.is_empty());
        // Nobody has moved yet; the root is credited to the side not on move
        assert_eq!(node.piece, Piece::Yellow);
    }

    #[test]
    fn test_child_credits_mover() {
        let board = Board::new().with_move(3, Piece::Red).unwrap();
        let node = MctsNode::new_child(NodeId(0), 3, board);

        assert_eq!(node.parent, NodeId(0));
        assert_eq!(node.action, Some(3));
        assert_eq!(node.piece, Piece::Red);
    }

    #[test]
    fn test_terminal_position_has_nothing_to_expand() {
        let board = Board::from_rows(&[
            ".......", //
            ".......", //
            ".......", //
            ".......", //
            "YYY....", //
            "RRRR...", //
        ])
        .unwrap();
        let node = MctsNode::new_root(board);

        assert!(node.untried.is_empty());
        assert!(node.is_leaf());
    }

    #[test]
    fn test_win_rate() {
        let mut node = MctsNode::new_root(Board::new());

        // Unvisited
        assert!(node.win_rate().abs() < 1e-12);

        // After visits
        node.visit_count = 4;
        node.wins = 2.5;
        assert!((node.win_rate() - 0.625).abs() < 1e-12);
    }

    #[test]
    fn test_uct_score() {
        let mut node = MctsNode::new_root(Board::new());
        node.visit_count = 10;
        node.wins = 5.0;

        let parent_visits = 100u32;
        let ln_parent = (parent_visits as f64).ln();

        // UCT = 0.5 + sqrt(2) * sqrt(ln(100) / 10) = 0.5 + sqrt(2 * 4.60517 / 10)
        let uct = node.uct_score(ln_parent, std::f64::consts::SQRT_2);
        assert!((uct - 1.4597).abs() < 1e-3);

        node.visit_count = 0;
        assert!(node.uct_score(ln_parent, 1.0).is_infinite());
    }

    #[test]
    fn test_is_leaf() {
        let mut node = MctsNode::new_root(Board::new());

        // Unexpanded columns remain
        assert!(node.is_leaf());

        // Fully expanded with children
        node.untried.clear();
        node.children.push((0, NodeId(1)));
        assert!(!node.is_leaf());
        assert!(node.is_fully_expanded());
    }
}
