use crate::{
    coeff::Factor,
    compute::path::{ self, Decomposition, HaarPair },
    network::{ GroupId, NetworkError, NetworkResult, PlugKey, TensorNetwork },
};
use NetworkError::*;

/// The plugs of four integrated nodes `(u1, ū1, u2, ū2)` at one aligned pair of
/// rows.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RowPlugs {
    pub l1: PlugKey,
    pub l1d: PlugKey,
    pub r1: PlugKey,
    pub r1d: PlugKey,
    pub l2: PlugKey,
    pub l2d: PlugKey,
    pub r2: PlugKey,
    pub r2d: PlugKey,
}

impl RowPlugs {
    // exchange the roles of the two adjoints
    fn swapped(self) -> Self {
        Self {
            l1d: self.l2d,
            r1d: self.r2d,
            l2d: self.l1d,
            r2d: self.r1d,
            ..self
        }
    }
}

/// A single term of the four-fold Haar moment formula.
///
/// Each variant fixes which plugs of the four integrated nodes become joined
/// (its Haar pairs), the factors it contributes, and a provenance marker.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Integrator {
    /// Pair each unitary with its own adjoint.
    Parallel,
    /// [`Parallel`][Self::Parallel] with the two adjoints exchanged.
    ParallelSwap,
    /// Pair each unitary's adjoint with the other unitary.
    Cross,
    /// [`Cross`][Self::Cross] with the two adjoints exchanged.
    CrossSwap,
}

impl Integrator {
    /// All variants, in branch order.
    pub const ALL: [Self; 4] =
        [Self::Parallel, Self::ParallelSwap, Self::Cross, Self::CrossSwap];

    pub fn is_swapped(&self) -> bool {
        matches!(self, Self::ParallelSwap | Self::CrossSwap)
    }

    pub fn is_cross(&self) -> bool {
        matches!(self, Self::Cross | Self::CrossSwap)
    }

    /// Return the Haar pairs proposed for a single row pair.
    pub fn haar_pairs(&self, plugs: RowPlugs) -> [HaarPair; 4] {
        let p = if self.is_swapped() { plugs.swapped() } else { plugs };
        if self.is_cross() {
            [(p.l1, p.r1d), (p.l1d, p.r2), (p.l2, p.r2d), (p.l2d, p.r1)]
        } else {
            [(p.l1, p.r1d), (p.l1d, p.r1), (p.l2, p.r2d), (p.l2d, p.r2)]
        }
    }

    /// Return the factors contributed by every row pair, before loops.
    pub fn base_factors(&self) -> &'static [Factor] {
        if self.is_cross() {
            &[Factor::G, Factor::DF, Factor::MI]
        } else {
            &[Factor::G]
        }
    }

    /// Return the provenance marker of the branch.
    pub fn history(&self) -> Factor {
        match self {
            Self::Parallel => Factor::Hist1,
            Self::ParallelSwap => Factor::Hist2,
            Self::Cross => Factor::Hist3,
            Self::CrossSwap => Factor::Hist4,
        }
    }

    fn integrate_row(&self, net: &mut TensorNetwork, plugs: RowPlugs)
        -> NetworkResult<Vec<Factor>>
    {
        let haar_pairs = self.haar_pairs(plugs);
        let Decomposition { final_pairs, loops } =
            path::find_outside_pairs(net, &haar_pairs)?;
        let mut factors: Vec<Factor> = self.base_factors().to_vec();
        if loops > 0 {
            factors.push(Factor::loops(loops).ok_or(LoopOverflow(loops))?);
        }
        for (a, b) in haar_pairs.iter() {
            net.remove_edge(a);
            net.remove_edge(b);
        }
        for (lp, rp) in final_pairs.into_iter() {
            net.add_edge(lp, rp)?;
        }
        Ok(factors)
    }

    /// Integrate out a four-member group in place, returning the accumulated
    /// factors (without the provenance marker).
    ///
    /// Group members are taken in insertion order as `(u1, ū1, u2, ū2)` and the
    /// rows of `u1` and `u2` are paired up in order. All four nodes are removed
    /// afterward.
    pub fn integrate(&self, net: &mut TensorNetwork, group_id: GroupId)
        -> NetworkResult<Vec<Factor>>
    {
        let members = net.group(&group_id).ok_or(UnknownGroup(group_id))?;
        let &[u1, u1d, u2, u2d] = members
            else { return Err(UnsupportedGroupSize(group_id, members.len())); };
        let rows1 = net.get_node(&u1).ok_or(MissingNode(u1))?.rows();
        let rows2 = net.get_node(&u2).ok_or(MissingNode(u2))?.rows();
        let mut factors: Vec<Factor> = Vec::new();
        for (y1, y2) in rows1.zip(rows2) {
            let plugs = RowPlugs {
                l1: PlugKey::left(u1, y1),
                l1d: PlugKey::left(u1d, y1),
                r1: PlugKey::right(u1, y1),
                r1d: PlugKey::right(u1d, y1),
                l2: PlugKey::left(u2, y2),
                l2d: PlugKey::left(u2d, y2),
                r2: PlugKey::right(u2, y2),
                r2d: PlugKey::right(u2d, y2),
            };
            factors.append(&mut self.integrate_row(net, plugs)?);
        }
        for key in [u1, u2, u1d, u2d] {
            net.remove_simple(key)?;
        }
        Ok(factors)
    }
}

/// Integration of a group holding two unitaries and their adjoints.
///
/// Every configured [`Integrator`] is applied to its own copy of the diagram,
/// producing one branch per integrator.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FourHaarIntegration {
    integrators: Vec<Integrator>,
}

impl Default for FourHaarIntegration {
    fn default() -> Self { Self { integrators: Integrator::ALL.to_vec() } }
}

impl FourHaarIntegration {
    /// Create a new integration with all four branches.
    pub fn new() -> Self { Self::default() }

    /// Create a new integration with a custom set of branches.
    pub fn with_integrators<I>(integrators: I) -> Self
    where I: IntoIterator<Item = Integrator>
    {
        Self { integrators: integrators.into_iter().collect() }
    }

    pub fn integrators(&self) -> &[Integrator] { &self.integrators }

    /// Integrate out a group on copies of `net`, returning one
    /// `(factors, diagram)` branch per integrator, each tagged with the
    /// integrator's provenance marker.
    pub fn integrate(&self, net: &TensorNetwork, group_id: GroupId)
        -> NetworkResult<Vec<(Vec<Factor>, TensorNetwork)>>
    {
        self.integrators.iter()
            .map(|integrator| {
                let mut branch = net.clone();
                let mut factors = integrator.integrate(&mut branch, group_id)?;
                factors.push(integrator.history());
                Ok((factors, branch))
            })
            .collect()
    }
}
