use tracing::debug;
use crate::{
    compute::Computation,
    network::{
        GateKey,
        GateType,
        NetworkError,
        NetworkResult,
        PlugKey,
        TensorNetwork,
        TensorNetworks,
    },
};

/// Fuse pairs of adjacent nodes of given types into a single node.
///
/// A pair is a node matching the left type whose output side is wired entirely
/// into one node matching the right type. The right node is cut out, its
/// outward wires are reattached to the left node, and the left node is then
/// relabelled to the result type.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Multiply {
    type_left: GateType,
    dagger_left: bool,
    type_right: GateType,
    dagger_right: bool,
    type_result: GateType,
    dagger_result: bool,
}

impl Multiply {
    pub fn new(
        type_left: GateType,
        dagger_left: bool,
        type_right: GateType,
        dagger_right: bool,
        type_result: GateType,
        dagger_result: bool,
    ) -> Self
    {
        Self {
            type_left,
            dagger_left,
            type_right,
            dagger_right,
            type_result,
            dagger_result,
        }
    }

    fn find_pairs(&self, net: &TensorNetwork) -> Vec<(GateKey, GateKey)> {
        net.nodes()
            .filter(|n| n.kind() == self.type_left && n.is_dagger() == self.dagger_left)
            .filter_map(|n| {
                let partner = net.right_partner(&n.key())?;
                (
                    partner.kind() == self.type_right
                    && partner.is_dagger() == self.dagger_right
                    && partner.key() != n.key()
                ).then_some((n.key(), partner.key()))
            })
            .collect()
    }

    fn fuse(&self, net: &mut TensorNetwork, left: GateKey, right: GateKey)
        -> NetworkResult<()>
    {
        let outer: Vec<(usize, PlugKey)> =
            net.get_node(&right)
            .ok_or(NetworkError::MissingNode(right))?
            .right_plugs().iter()
            .filter_map(|p| {
                p.peer()
                    .filter(|k| k.node != right)
                    .map(|k| (p.j(), k))
            })
            .collect();
        net.remove_simple(right)?;
        for (j, rp) in outer.into_iter() {
            let lp = PlugKey::right(left, j);
            if net.get_plug(&lp).is_none() { continue; }
            net.add_edge(lp, rp)?;
        }
        net.change_node(left, self.type_result, self.dagger_result)?;
        Ok(())
    }

    /// Fuse all matching pairs in a single diagram and return the number of
    /// fusions performed.
    ///
    /// All pairs are found before any is fused; a pair whose nodes were
    /// consumed by an earlier fusion is skipped.
    pub fn apply(&self, net: &mut TensorNetwork) -> NetworkResult<usize> {
        let mut count: usize = 0;
        for (left, right) in self.find_pairs(net).into_iter() {
            if !net.has_node(&left) || !net.has_node(&right) { continue; }
            self.fuse(net, left, right)?;
            count += 1;
        }
        Ok(count)
    }
}

impl Computation for Multiply {
    fn compute(&self, mut networks: TensorNetworks)
        -> NetworkResult<TensorNetworks>
    {
        let mut fused: usize = 0;
        for net in networks.networks_mut().iter_mut() {
            fused += self.apply(net)?;
        }
        debug!(
            left = self.type_left.label(),
            right = self.type_right.label(),
            fused,
            "multiply"
        );
        Ok(networks)
    }
}
