use std::{ fmt, ops::RangeInclusive };
use num_rational::Rational64 as R64;

/// The position of a node on the circuit lattice.
///
/// A node sits in column `x` and covers the inclusive row range
/// `y_start..=y_end`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Location {
    pub x: usize,
    pub y_start: usize,
    pub y_end: usize,
}

impl Location {
    /// Create a new `Location`.
    pub fn new(x: usize, y_start: usize, y_end: usize) -> Self {
        Self { x, y_start, y_end }
    }

    /// Return the sortable identifier `x + 1 / (y_start + 1)`.
    ///
    /// Gates built from a circuit conventionally use this as their group ID.
    /// Distinct locations can share an identifier (e.g. rows that differ only
    /// in `y_end`), so this is not a substitute for the location itself.
    ///
    /// ```
    /// # use haar_tn::network::Location;
    /// # use num_rational::Rational64 as R64;
    /// assert_eq!( Location::new(1, 0, 1).sort_id(), R64::new(2, 1) );
    /// assert_eq!( Location::new(2, 3, 3).sort_id(), R64::new(9, 4) );
    /// ```
    pub fn sort_id(&self) -> R64 {
        R64::from_integer(self.x as i64) + R64::new(1, self.y_start as i64 + 1)
    }

    /// Return the range of rows covered.
    pub fn rows(&self) -> RangeInclusive<usize> { self.y_start..=self.y_end }

    /// Return the number of rows covered.
    pub fn height(&self) -> usize {
        (self.y_end + 1).saturating_sub(self.y_start)
    }

    /// Return a copy of `self` moved to column `x`.
    pub fn at_column(self, x: usize) -> Self { Self { x, ..self } }

    /// Return a copy of `self` shifted down by `dy` rows.
    pub fn shifted(self, dy: usize) -> Self {
        Self { y_start: self.y_start + dy, y_end: self.y_end + dy, ..self }
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}-{})", self.x, self.y_start, self.y_end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_id() {
        assert_eq!(Location::new(0, 0, 3).sort_id(), R64::new(1, 1));
        assert_eq!(Location::new(1, 2, 3).sort_id(), R64::new(4, 3));
        assert_eq!(Location::new(2, 1, 2).sort_id(), R64::new(5, 2));
        assert!(Location::new(2, 0, 0).sort_id() > Location::new(1, 0, 1).sort_id());
        assert_eq!(Location::new(3, 1, 1).sort_id(), Location::new(3, 1, 2).sort_id());
    }

    #[test]
    fn rows() {
        let loc = Location::new(4, 2, 5);
        assert_eq!(loc.rows().collect::<Vec<_>>(), vec![2, 3, 4, 5]);
        assert_eq!(loc.height(), 4);
        assert_eq!(loc.shifted(3), Location::new(4, 5, 8));
        assert_eq!(loc.at_column(0), Location::new(0, 2, 5));
        assert_eq!(loc.to_string(), "(4, 2-5)");
    }
}
