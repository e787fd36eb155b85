use std::fmt;
use crate::network::{ Direction, NetworkError, NetworkResult, PlugKey };

/// A directed wire from the output-facing plug of one node to the
/// input-facing plug of another.
///
/// Edges are content-addressed: two edges joining the same pair of plugs are
/// the same edge, and the edge value serves as its own key.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    left_plug: PlugKey,
    right_plug: PlugKey,
}

impl Edge {
    /// Create a new edge.
    ///
    /// `left_plug` is the upstream end and must face [right][Direction::Right];
    /// `right_plug` is the downstream end and must face
    /// [left][Direction::Left].
    ///
    /// Fails with [`InvalidWiring`][NetworkError::InvalidWiring] otherwise.
    pub fn new(left_plug: PlugKey, right_plug: PlugKey) -> NetworkResult<Self> {
        if left_plug.direction != Direction::Right
            || right_plug.direction != Direction::Left
        {
            return Err(NetworkError::InvalidWiring(left_plug, right_plug));
        }
        Ok(Self { left_plug, right_plug })
    }

    /// Return the upstream (output-facing) end.
    pub fn left_plug(&self) -> PlugKey { self.left_plug }

    /// Return the downstream (input-facing) end.
    pub fn right_plug(&self) -> PlugKey { self.right_plug }

    /// Return the end opposite `plug`, or `None` if `plug` is not an end of
    /// `self`.
    pub fn other(&self, plug: PlugKey) -> Option<PlugKey> {
        if plug == self.left_plug {
            Some(self.right_plug)
        } else if plug == self.right_plug {
            Some(self.left_plug)
        } else {
            None
        }
    }

    /// Return `true` if `plug` is either end of `self`.
    pub fn has_plug(&self, plug: &PlugKey) -> bool {
        self.left_plug == *plug || self.right_plug == *plug
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} -> {}", self.left_plug, self.right_plug)
    }
}
