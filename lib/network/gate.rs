use std::{ fmt, hash::{ Hash, Hasher }, ops::RangeInclusive };
use crate::network::{ Direction, GroupId, Location, Plug };

/// The role a node plays in a diagram.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum GateType {
    /// A Haar-random unitary that can be integrated out.
    Unitary,
    /// A unitary excluded from integration.
    UnintegrableUnitary,
    /// The measured observable.
    Observable,
    /// The gate at which the gradient is taken.
    Grad,
    /// Initial state (or, daggered, its adjoint effect).
    Initial,
    /// A gradient gate fused with its conjugate partner.
    UrWUr,
}

impl GateType {
    /// Return a short label for display.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Unitary => "U",
            Self::UnintegrableUnitary => "W_",
            Self::Observable => "O",
            Self::Grad => "W",
            Self::Initial => "|0>",
            Self::UrWUr => "UrWUr",
        }
    }
}

/// Identifies a node in a [`TensorNetwork`][crate::network::TensorNetwork].
///
/// Two structurally identical nodes (same location, group, dagger flag, and
/// type) have the same key and are the same node as far as a diagram is
/// concerned.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GateKey {
    pub location: Location,
    pub group_id: GroupId,
    pub dagger: bool,
    pub kind: GateType,
}

impl fmt::Display for GateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f, "{}{}@{}",
            self.kind.label(),
            if self.dagger { "†" } else { "" },
            self.location,
        )
    }
}

/// A single node in a diagram with its plugs.
///
/// Left plugs face inputs and right plugs face outputs; there is one of each
/// per row covered by the node's [`Location`], except for
/// [`Initial`][GateType::Initial] nodes, which have only right plugs (or, if
/// daggered, only left plugs).
///
/// Equality and hashing go through [`GateKey`].
#[derive(Clone, Debug)]
pub struct Gate {
    pub(crate) location: Location,
    pub(crate) group_id: GroupId,
    pub(crate) kind: GateType,
    pub(crate) dagger: bool,
    pub(crate) left: Vec<Plug>,
    pub(crate) right: Vec<Plug>,
}

impl PartialEq for Gate {
    fn eq(&self, other: &Self) -> bool { self.key() == other.key() }
}

impl Eq for Gate { }

impl Hash for Gate {
    fn hash<H: Hasher>(&self, state: &mut H) { self.key().hash(state); }
}

impl Gate {
    /// Create a new, unwired gate.
    pub fn new(location: Location, group_id: GroupId, kind: GateType) -> Self {
        let mut gate = Self {
            location,
            group_id,
            kind,
            dagger: false,
            left: Vec::new(),
            right: Vec::new(),
        };
        gate.make_plugs();
        gate
    }

    /// Create a new, unwired [`Unitary`][GateType::Unitary] whose group ID is
    /// the [sort ID][Location::sort_id] of its location.
    pub fn unitary(location: Location) -> Self {
        Self::new(location, location.sort_id(), GateType::Unitary)
    }

    /// Return `self` with the dagger flag set to `dagger`.
    pub fn with_dagger(mut self, dagger: bool) -> Self {
        self.dagger = dagger;
        self.make_plugs();
        self
    }

    /// Return an unwired copy of `self` placed at `location`.
    pub fn copy_to(&self, location: Location) -> Self {
        Self::new(location, self.group_id, self.kind).with_dagger(self.dagger)
    }

    /// Return an unwired copy of `self` with the dagger flag flipped.
    pub fn conjugate(&self) -> Self {
        self.copy_to(self.location).with_dagger(!self.dagger)
    }

    /// Return the identifying key.
    pub fn key(&self) -> GateKey {
        GateKey {
            location: self.location,
            group_id: self.group_id,
            dagger: self.dagger,
            kind: self.kind,
        }
    }

    pub fn location(&self) -> Location { self.location }

    pub fn group_id(&self) -> GroupId { self.group_id }

    pub fn kind(&self) -> GateType { self.kind }

    pub fn is_dagger(&self) -> bool { self.dagger }

    /// Return the range of rows covered.
    pub fn rows(&self) -> RangeInclusive<usize> { self.location.rows() }

    /// Return all input-facing plugs, ordered by row.
    pub fn left_plugs(&self) -> &[Plug] { &self.left }

    /// Return all output-facing plugs, ordered by row.
    pub fn right_plugs(&self) -> &[Plug] { &self.right }

    /// Return all plugs facing a particular direction, ordered by row.
    pub fn plugs(&self, direction: Direction) -> &[Plug] {
        match direction {
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }

    /// Return an iterator over all plugs, left before right.
    pub fn all_plugs(&self) -> impl Iterator<Item = &Plug> + '_ {
        self.left.iter().chain(self.right.iter())
    }

    /// Get the plug facing `direction` at row `j`, if it exists.
    pub fn plug(&self, direction: Direction, j: usize) -> Option<&Plug> {
        let k = j.checked_sub(self.location.y_start)?;
        self.plugs(direction).get(k)
    }

    pub(crate) fn plug_mut(&mut self, direction: Direction, j: usize)
        -> Option<&mut Plug>
    {
        let k = j.checked_sub(self.location.y_start)?;
        match direction {
            Direction::Left => self.left.get_mut(k),
            Direction::Right => self.right.get_mut(k),
        }
    }

    /// Get the plug on `self` that could accept a wire from `plug`: the one on
    /// the same row facing the opposite direction.
    pub fn connectable(&self, plug: &Plug) -> Option<&Plug> {
        self.plug(plug.direction().invert(), plug.j())
    }

    // change type and dagger flag, regenerating all plugs unwired
    pub(crate) fn relabel(&mut self, kind: GateType, dagger: bool) {
        self.kind = kind;
        self.dagger = dagger;
        self.make_plugs();
    }

    fn make_plugs(&mut self) {
        let key = self.key();
        let has_left = !(self.kind == GateType::Initial && !self.dagger);
        let has_right = !(self.kind == GateType::Initial && self.dagger);
        self.left =
            if has_left {
                self.rows().map(|j| Plug::new(key, j, Direction::Left)).collect()
            } else {
                Vec::new()
            };
        self.right =
            if has_right {
                self.rows().map(|j| Plug::new(key, j, Direction::Right)).collect()
            } else {
                Vec::new()
            };
    }
}

impl fmt::Display for Gate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.kind.label(), if self.dagger { "†" } else { "" })
    }
}
