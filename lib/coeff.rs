//! Symbolic coefficients attached to each term of an ensemble.
//!
//! A [`Coefficient`] is a complex scalar times a multiset of [`Factor`] tags.
//! With *D* the Hilbert-space dimension, each tag stands for a power of *D*, a
//! sign, the normalization 1/(*D*² − 1), or a provenance marker recording which
//! four-fold integration branch produced a term.
//!
//! ```
//! # use haar_tn::coeff::{ Coefficient, Factor };
//! # use num_complex::Complex64 as C64;
//! let mut c = Coefficient::new(C64::new(2.0, 0.0));
//! c.extend([Factor::G, Factor::DF, Factor::D2]);
//! assert_eq!(c.d_count(), 1);
//! assert_eq!(c.to_string(), "2+0i × D^2 × 1/D × 1/(D^2-1)");
//! ```

use std::fmt;
use itertools::Itertools;
use num_complex::Complex64 as C64;
use num_traits::One;

/// A single symbolic tag.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Factor {
    /// *D*
    D,
    /// *D*²
    D2,
    /// *D*³
    D3,
    /// *D*⁴
    D4,
    /// 1/*D*
    DF,
    /// −1
    MI,
    /// 1/(*D*² − 1)
    G,
    /// Produced by the unswapped parallel four-fold branch.
    Hist1,
    /// Produced by the swapped parallel four-fold branch.
    Hist2,
    /// Produced by the unswapped cross four-fold branch.
    Hist3,
    /// Produced by the swapped cross four-fold branch.
    Hist4,
}

impl Factor {
    pub fn label(&self) -> &'static str {
        match self {
            Self::D => "D",
            Self::D2 => "D^2",
            Self::D3 => "D^3",
            Self::D4 => "D^4",
            Self::DF => "1/D",
            Self::MI => "-",
            Self::G => "1/(D^2-1)",
            Self::Hist1 => "H1",
            Self::Hist2 => "H2",
            Self::Hist3 => "H3",
            Self::Hist4 => "H4",
        }
    }

    /// Tie-break ID for canonical ordering.
    pub fn id(&self) -> u8 {
        match self {
            Self::D => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::DF => 5,
            Self::MI => 6,
            Self::G => 7,
            Self::Hist1 => 1,
            Self::Hist2 => 2,
            Self::Hist3 => 3,
            Self::Hist4 => 4,
        }
    }

    /// Exponent of *D* contributed by the factor.
    ///
    /// The normalization [`G`][Self::G] contributes nothing here; it is counted
    /// separately.
    pub fn d_count(&self) -> i32 {
        match self {
            Self::D => 1,
            Self::D2 => 2,
            Self::D3 => 3,
            Self::D4 => 4,
            Self::DF => -1,
            _ => 0,
        }
    }

    /// Return `true` if `self` is a provenance marker.
    pub fn is_history(&self) -> bool { self.history().is_some() }

    /// Return the branch index (1 through 4) of a provenance marker.
    pub fn history(&self) -> Option<usize> {
        match self {
            Self::Hist1 => Some(1),
            Self::Hist2 => Some(2),
            Self::Hist3 => Some(3),
            Self::Hist4 => Some(4),
            _ => None,
        }
    }

    /// Return the factor for `n` closed loops: *D*ⁿ for `n` in 1 through 4.
    pub fn loops(n: usize) -> Option<Self> {
        match n {
            1 => Some(Self::D),
            2 => Some(Self::D2),
            3 => Some(Self::D3),
            4 => Some(Self::D4),
            _ => None,
        }
    }
}

impl fmt::Display for Factor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A scalar times an unordered collection of [`Factor`]s.
///
/// Factors are kept in the order they were added, which records how a term
/// was produced; all algebra treats them as a multiset.
#[derive(Clone, Debug, PartialEq)]
pub struct Coefficient {
    digit: C64,
    factors: Vec<Factor>,
}

impl Default for Coefficient {
    fn default() -> Self { Self::new(C64::one()) }
}

impl Coefficient {
    /// Create a new coefficient with no factors.
    pub fn new(digit: C64) -> Self { Self { digit, factors: Vec::new() } }

    /// Create a new coefficient with initial factors.
    pub fn with_factors<I>(digit: C64, factors: I) -> Self
    where I: IntoIterator<Item = Factor>
    {
        Self { digit, factors: factors.into_iter().collect() }
    }

    pub fn digit(&self) -> C64 { self.digit }

    pub fn factors(&self) -> &[Factor] { &self.factors }

    /// Append a factor.
    pub fn add(&mut self, factor: Factor) { self.factors.push(factor); }

    /// Append several factors.
    pub fn extend<I>(&mut self, factors: I)
    where I: IntoIterator<Item = Factor>
    {
        self.factors.extend(factors);
    }

    /// Multiply the scalar part by `v`.
    pub fn multiply(&mut self, v: C64) { self.digit *= v; }

    /// Return the factors sorted by ID, then label.
    pub fn canonical_factors(&self) -> Vec<Factor> {
        self.factors.iter().copied()
            .sorted_by_key(|f| (f.id(), f.label()))
            .collect()
    }

    /// Return the total exponent of *D* carried by all factors.
    pub fn d_count(&self) -> i32 {
        self.factors.iter().map(|f| f.d_count()).sum()
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.factors.is_empty() {
            write!(f, "{}", self.digit)
        } else {
            write!(
                f, "{} × {}",
                self.digit,
                self.canonical_factors().iter().join(" × "),
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn factor_table() {
        assert_eq!(Factor::G.label(), "1/(D^2-1)");
        assert_eq!(Factor::DF.d_count(), -1);
        assert_eq!(Factor::Hist3.d_count(), 0);
        assert_eq!(Factor::Hist2.history(), Some(2));
        assert!(!Factor::MI.is_history());
        assert_eq!(Factor::loops(3), Some(Factor::D3));
        assert_eq!(Factor::loops(0), None);
        assert_eq!(Factor::loops(5), None);
    }

    #[test]
    fn accumulate() {
        let mut c = Coefficient::default();
        c.add(Factor::G);
        c.extend([Factor::MI, Factor::D, Factor::Hist1]);
        c.multiply(C64::new(0.0, -1.0));
        assert_eq!(c.digit(), C64::new(0.0, -1.0));
        assert_eq!(c.factors(), &[Factor::G, Factor::MI, Factor::D, Factor::Hist1]);
        assert_eq!(
            c.canonical_factors(),
            vec![Factor::D, Factor::Hist1, Factor::MI, Factor::G],
        );
        assert_eq!(c.d_count(), 1);
        let copy = c.clone();
        c.add(Factor::DF);
        assert_eq!(copy.factors().len(), 4);
        assert_eq!(c.d_count(), 0);
    }
}
