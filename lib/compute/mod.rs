//! Ensemble-level transformations.
//!
//! Each transformation is represented by a type implementing [`Computation`],
//! which maps a whole [`TensorNetworks`] ensemble to a new one. Transformations
//! are usually chained, as in
//!
//! ```
//! # use haar_tn::compute::{ Computation, HaarIntegration, Multiply, compute_all };
//! # use haar_tn::network::{ GateType, TensorNetworks };
//! let steps: [&dyn Computation; 2] = [
//!     &HaarIntegration::new(2),
//!     &Multiply::new(
//!         GateType::Grad, false,
//!         GateType::UnintegrableUnitary, true,
//!         GateType::UrWUr, false,
//!     ),
//! ];
//! let result = compute_all(TensorNetworks::new(), steps).unwrap();
//! assert!(result.is_empty());
//! ```
//!
//! The Haar integration engine ([`HaarIntegration`]) removes groups of random
//! unitaries using the two-fold ([`TwoHaarIntegration`]) and four-fold
//! ([`FourHaarIntegration`]) moment formulas. The rewiring that each four-fold
//! formula induces is worked out by the [`path`] module.

use crate::network::{ NetworkResult, TensorNetworks };

/// A transformation of a whole ensemble.
pub trait Computation {
    /// Map `networks` to a new ensemble.
    ///
    /// Failure on any term fails the whole computation.
    fn compute(&self, networks: TensorNetworks) -> NetworkResult<TensorNetworks>;
}

impl<C> Computation for &C
where C: Computation + ?Sized
{
    fn compute(&self, networks: TensorNetworks) -> NetworkResult<TensorNetworks> {
        (**self).compute(networks)
    }
}

/// Apply a sequence of computations in order.
pub fn compute_all<I>(networks: TensorNetworks, computations: I)
    -> NetworkResult<TensorNetworks>
where
    I: IntoIterator,
    I::Item: Computation,
{
    computations.into_iter()
        .try_fold(networks, |acc, computation| computation.compute(acc))
}

mod multiply;
pub use multiply::*;

pub mod path;

mod two_haar;
pub use two_haar::*;

mod four_haar;
pub use four_haar::*;

mod haar;
pub use haar::*;
