//! Symbolic Haar averages over tensor-network diagrams.
//!
//! This package estimates how the gradient statistics of a parameterized
//! quantum circuit scale with the number of qubits when its gates are drawn
//! from the Haar measure. Everything is kept symbolic: a circuit is unrolled
//! into directed port-graph diagrams, unitaries are integrated out group by
//! group with the second- and fourth-moment Weingarten formulas, and the
//! resulting coefficients are read as powers of the local dimension.
//!
//! - [`network`] holds the diagram representation: nodes on a circuit
//! lattice, their plugs, and the edges between them.
//! - [`circuit`] builds the average and variance diagrams of a gradient from a
//! layered circuit.
//! - [`compute`] implements the transformations applied to diagram ensembles,
//! chiefly Haar integration and the fusion of adjacent nodes.
//! - [`coeff`] and [`interpret`] track the symbolic coefficients and reduce
//! them to closed-form decay factors.
//!
//! # Further reading
//! - J. R. McClean *et al.*, "Barren plateaus in quantum neural network
//! training landscapes." [arXiv:1803.11173](https://arxiv.org/abs/1803.11173)
//! - B. Collins and P. Śniady, "Integration with respect to the Haar measure
//! on unitary, orthogonal and symplectic group."
//! [arXiv:math-ph/0402073](https://arxiv.org/abs/math-ph/0402073)

pub mod network;
pub mod coeff;
pub mod compute;
pub mod circuit;
pub mod interpret;
