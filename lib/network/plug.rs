use std::fmt;
use crate::network::{ Edge, GateKey };

/// The side of a node a plug faces.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Direction {
    /// Input-facing.
    Left,
    /// Output-facing.
    Right,
}

impl Direction {
    /// Return the opposite direction.
    pub fn invert(self) -> Self {
        match self {
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// Identifies a plug by its owning node, row, and direction.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlugKey {
    pub node: GateKey,
    pub j: usize,
    pub direction: Direction,
}

impl PlugKey {
    pub fn new(node: GateKey, j: usize, direction: Direction) -> Self {
        Self { node, j, direction }
    }

    /// Key of the input-facing plug of `node` at row `j`.
    pub fn left(node: GateKey, j: usize) -> Self {
        Self::new(node, j, Direction::Left)
    }

    /// Key of the output-facing plug of `node` at row `j`.
    pub fn right(node: GateKey, j: usize) -> Self {
        Self::new(node, j, Direction::Right)
    }
}

impl fmt::Display for PlugKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let d = match self.direction {
            Direction::Left => 'L',
            Direction::Right => 'R',
        };
        write!(f, "{}[{}{}]", self.node, self.j, d)
    }
}

/// A directional port on a node, linked to at most one [`Edge`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Plug {
    pub(crate) key: PlugKey,
    pub(crate) edge: Option<Edge>,
}

impl Plug {
    pub(crate) fn new(node: GateKey, j: usize, direction: Direction) -> Self {
        Self { key: PlugKey::new(node, j, direction), edge: None }
    }

    pub fn key(&self) -> PlugKey { self.key }

    /// Return the row index.
    pub fn j(&self) -> usize { self.key.j }

    pub fn direction(&self) -> Direction { self.key.direction }

    /// Return the key of the owning node.
    pub fn node(&self) -> GateKey { self.key.node }

    pub fn edge(&self) -> Option<Edge> { self.edge }

    pub fn is_connected(&self) -> bool { self.edge.is_some() }

    /// Return the key of the plug on the other end of the attached edge.
    pub fn peer(&self) -> Option<PlugKey> {
        self.edge.and_then(|edge| edge.other(self.key))
    }
}
