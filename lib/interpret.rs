//! Closed-form reading of symbolic coefficients.
//!
//! With *D* = 2<sup>*m*</sup> for *m* qubits, every [`Coefficient`] reduces to
//! a term `digit × D^d / (D² − 1)^g`. A [`DecayFactor`] holds `(digit, d, g)`
//! for one coefficient; factors with equal exponents can be summed with
//! [`merge`]. The leading decay of a diagram is then the largest approximate
//! exponent `d − 2g` among its nonzero terms.

use std::fmt;
use num_complex::Complex64 as C64;
use num_traits::Zero;
use rustc_hash::FxHashMap;
use thiserror::Error;
use crate::{
    coeff::{ Coefficient, Factor },
    network::{ TensorNetwork, TensorNetworks },
};

#[derive(Debug, Error)]
pub enum InterpretError {
    /// Returned when attempting to sum two decay factors with different
    /// exponents.
    #[error("cannot append 2^({2}m)/(2^(2m)-1)^{3} to 2^({0}m)/(2^(2m)-1)^{1}")]
    NonAppendableCoefficient(i32, u32, i32, u32),
}
pub type InterpretResult<T> = Result<T, InterpretError>;

/// A coefficient read as `digit × 2^(d m) / (2^(2m) − 1)^g`.
#[derive(Clone, Debug, PartialEq)]
pub struct DecayFactor {
    digit: C64,
    d_count: i32,
    g_count: u32,
    histories: Vec<usize>,
}

impl DecayFactor {
    pub fn new(digit: C64, d_count: i32, g_count: u32) -> Self {
        Self { digit, d_count, g_count, histories: Vec::new() }
    }

    pub fn digit(&self) -> C64 { self.digit }

    /// Return the exponent of *D* in the numerator.
    pub fn d_count(&self) -> i32 { self.d_count }

    /// Return the exponent of *D*² − 1 in the denominator.
    pub fn g_count(&self) -> u32 { self.g_count }

    /// Return the four-fold branch indices recorded in the source
    /// coefficient, in order.
    ///
    /// These are cleared once the factor absorbs another.
    pub fn histories(&self) -> &[usize] { &self.histories }

    /// Return the leading exponent of *D*, approximating *D*² − 1 as *D*².
    ///
    /// Returns zero if the digit is zero.
    pub fn approximate_d_count(&self) -> i32 {
        if self.digit.is_zero() {
            0
        } else {
            self.d_count - 2 * self.g_count as i32
        }
    }

    /// Return `true` if `other` has the same exponents as `self`.
    pub fn is_appendable(&self, other: &Self) -> bool {
        self.d_count == other.d_count && self.g_count == other.g_count
    }

    fn absorb(&mut self, other: &Self) {
        self.digit += other.digit;
        self.histories.clear();
    }

    /// Add the digit of `other` to `self`, dropping recorded histories.
    ///
    /// Fails if the exponents differ.
    pub fn append(&mut self, other: &Self) -> InterpretResult<()> {
        if !self.is_appendable(other) {
            return Err(InterpretError::NonAppendableCoefficient(
                self.d_count, self.g_count, other.d_count, other.g_count));
        }
        self.absorb(other);
        Ok(())
    }
}

impl fmt::Display for DecayFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "{} x 2^({}m)/(2^(2m)-1)^{}",
            self.digit, self.d_count, self.g_count,
        )
    }
}

/// Read a coefficient as a [`DecayFactor`].
///
/// The exponent of *D* is the sum over all factors, each
/// [`G`][Factor::G] adds one to the denominator's exponent, and each
/// [`MI`][Factor::MI] flips the sign of the digit.
pub fn interpret(coefficient: &Coefficient) -> DecayFactor {
    let histories: Vec<usize> =
        coefficient.factors().iter()
        .filter_map(|f| f.history())
        .collect();
    let mut digit = coefficient.digit();
    let mut d_count: i32 = 0;
    let mut g_count: u32 = 0;
    for factor in coefficient.canonical_factors().into_iter() {
        d_count += factor.d_count();
        match factor {
            Factor::G => { g_count += 1; },
            Factor::MI => { digit = -digit; },
            _ => { },
        }
    }
    DecayFactor { digit, d_count, g_count, histories }
}

/// Sum decay factors with equal exponents.
///
/// Each factor is folded into the first earlier factor with the same
/// exponents; the order in which exponent classes first appear is preserved.
pub fn merge<I>(factors: I) -> Vec<DecayFactor>
where I: IntoIterator<Item = DecayFactor>
{
    let mut merged: Vec<DecayFactor> = Vec::new();
    for factor in factors.into_iter() {
        match merged.iter_mut().find(|m| m.is_appendable(&factor)) {
            Some(m) => { m.absorb(&factor); },
            None => { merged.push(factor); },
        }
    }
    merged
}

/// Return the largest nonzero approximate exponent, if any.
pub fn max_d_count(factors: &[DecayFactor]) -> Option<i32> {
    factors.iter()
        .map(|f| f.approximate_d_count())
        .filter(|d| *d != 0)
        .max()
}

/// Group the terms of an ensemble by structurally equal diagrams, in order of
/// first appearance.
pub fn bucket(networks: &TensorNetworks)
    -> Vec<(&TensorNetwork, Vec<&Coefficient>)>
{
    let mut index: FxHashMap<&TensorNetwork, usize> = FxHashMap::default();
    let mut buckets: Vec<(&TensorNetwork, Vec<&Coefficient>)> = Vec::new();
    for (coeff, net) in networks.iter() {
        match index.get(net) {
            Some(k) => { buckets[*k].1.push(coeff); },
            None => {
                index.insert(net, buckets.len());
                buckets.push((net, vec![coeff]));
            },
        }
    }
    buckets
}

/// Bucket an ensemble, then interpret and merge the coefficients of each
/// bucket.
pub fn summarize(networks: &TensorNetworks)
    -> Vec<(&TensorNetwork, Vec<DecayFactor>)>
{
    bucket(networks).into_iter()
        .map(|(net, coeffs)| {
            (net, merge(coeffs.into_iter().map(interpret)))
        })
        .collect()
}
