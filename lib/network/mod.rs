//! Directed port-graph representation of tensor-network diagrams.
//!
//! A diagram ([`TensorNetwork`]) is a set of nodes ([`Gate`]s) placed on a
//! circuit lattice, each carrying one input-facing and one output-facing
//! [`Plug`] per row it covers. [`Edge`]s always run from an output-facing plug
//! to an input-facing one. Nodes, plugs, and edges are identified by value
//! ([`GateKey`], [`PlugKey`], and the edge itself), so diagrams compare, hash,
//! and clone structurally.
//!
//! Weighted formal sums of diagrams are held in a [`TensorNetworks`]
//! ensemble.

use thiserror::Error;

/// Errors for fallible operations on diagrams.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// Returned when attempting to wire two plugs whose directions are
    /// incompatible, i.e. anything other than output-facing to input-facing.
    #[error("invalid wiring {0} -> {1}")]
    InvalidWiring(PlugKey, PlugKey),

    /// Returned when a unitary node's group has no entry in the group index.
    #[error("unknown group {0}")]
    UnknownGroup(GroupId),

    /// Returned when a node does not exist under a given key.
    #[error("missing node {0}")]
    MissingNode(GateKey),

    /// Returned when a plug does not exist under a given key.
    #[error("missing plug {0}")]
    MissingPlug(PlugKey),

    /// Returned when rewiring needs the partner of a plug that has no edge.
    #[error("plug {0} is not connected")]
    DanglingPlug(PlugKey),

    /// Returned when the group selected for integration has a number of
    /// members other than 2 or 4.
    #[error("cannot integrate group {0} with {1} member(s)")]
    UnsupportedGroupSize(GroupId, usize),

    /// Returned when the number of closed loops has no dimension factor.
    #[error("no dimension factor for {0} closed loops")]
    LoopOverflow(usize),

    /// Returned when building gradient diagrams from a circuit without an
    /// observable.
    #[error("circuit has no observable")]
    MissingObservable,

    /// Returned when a circuit gate lies to the right of the mirror axis set by
    /// the observable.
    #[error("gate at {0} lies beyond the observable")]
    MisplacedGate(Location),
}
pub type NetworkResult<T> = Result<T, NetworkError>;

/// Identifies the circuit gate a node was derived from.
pub type GroupId = num_rational::Rational64;

mod location;
pub use location::*;

mod plug;
pub use plug::*;

mod edge;
pub use edge::*;

mod gate;
pub use gate::*;

mod tensor_network;
pub use tensor_network::*;

mod ensemble;
pub use ensemble::*;
