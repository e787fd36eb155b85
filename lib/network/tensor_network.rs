use std::{
    collections::BTreeMap,
    fmt,
    hash::{ Hash, Hasher },
};
use itertools::Itertools;
use rustc_hash::{ FxHashMap, FxHashSet };
use tracing::trace;
use crate::network::{
    Direction,
    Edge,
    Gate,
    GateKey,
    GateType,
    GroupId,
    NetworkError,
    NetworkResult,
    Plug,
    PlugKey,
};
use NetworkError::*;

/// A single diagram: a directed port graph of [`Gate`]s joined by [`Edge`]s.
///
/// Alongside the nodes and edges, a diagram keeps an index from each group ID
/// to the [`Unitary`][GateType::Unitary] nodes currently carrying it, in the
/// order they were added. A group has an entry in this index if and only if at
/// least one of its unitary members is present.
///
/// Cloning a diagram produces a fully independent structural copy: all nodes,
/// plugs, and edges are addressed by value, so the copy's edges refer to the
/// copy's own plugs.
#[derive(Clone, Debug, Default)]
pub struct TensorNetwork {
    pub(crate) node_map: BTreeMap<GateKey, Gate>,
    pub(crate) edges: FxHashSet<Edge>,
    pub(crate) group_map: BTreeMap<GroupId, Vec<GateKey>>,
}

impl PartialEq for TensorNetwork {
    fn eq(&self, other: &Self) -> bool {
        self.node_map.len() == other.node_map.len()
            && self.node_map.keys().eq(other.node_map.keys())
            && self.edges == other.edges
    }
}

impl Eq for TensorNetwork { }

impl Hash for TensorNetwork {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node_map.keys().for_each(|key| key.hash(state));
        self.edges.iter().sorted().for_each(|edge| edge.hash(state));
    }
}

impl TensorNetwork {
    /// Create a new, empty diagram.
    pub fn new() -> Self { Self::default() }

    /// Create a new, unwired diagram from a set of nodes.
    pub fn from_nodes<I>(nodes: I) -> Self
    where I: IntoIterator<Item = Gate>
    {
        let mut net = Self::new();
        nodes.into_iter()
            .for_each(|gate| { net.add_node(gate); });
        net
    }

    /// Return the number of nodes.
    pub fn count_nodes(&self) -> usize { self.node_map.len() }

    /// Return the number of edges.
    pub fn count_edges(&self) -> usize { self.edges.len() }

    /// Return the number of groups with at least one unitary member.
    pub fn count_groups(&self) -> usize { self.group_map.len() }

    /// Return an iterator over all nodes, visited in key order.
    pub fn nodes(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.node_map.values()
    }

    /// Return an iterator over all edges, visited in arbitrary order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.iter()
    }

    /// Get the node associated with a particular key if it exists.
    pub fn get_node(&self, key: &GateKey) -> Option<&Gate> {
        self.node_map.get(key)
    }

    /// Return `true` if a node exists with the given key.
    pub fn has_node(&self, key: &GateKey) -> bool {
        self.node_map.contains_key(key)
    }

    /// Get the plug associated with a particular key if it exists.
    pub fn get_plug(&self, key: &PlugKey) -> Option<&Plug> {
        self.node_map.get(&key.node)?.plug(key.direction, key.j)
    }

    fn get_plug_mut(&mut self, key: &PlugKey) -> Option<&mut Plug> {
        self.node_map.get_mut(&key.node)?.plug_mut(key.direction, key.j)
    }

    /// Return the key of the plug wired to `plug`, if both exist.
    pub fn peer(&self, plug: &PlugKey) -> Option<PlugKey> {
        self.get_plug(plug)?.peer()
    }

    /// Get the unitary members of a group, in insertion order.
    pub fn group(&self, group_id: &GroupId) -> Option<&[GateKey]> {
        self.group_map.get(group_id).map(|members| members.as_slice())
    }

    /// Return an iterator over all groups in increasing ID order.
    pub fn groups(&self) -> impl Iterator<Item = (GroupId, &[GateKey])> + '_ {
        self.group_map.iter()
            .map(|(group_id, members)| (*group_id, members.as_slice()))
    }

    /// Return the group with the highest ID, if any.
    pub fn last_group(&self) -> Option<(GroupId, &[GateKey])> {
        self.group_map.iter().next_back()
            .map(|(group_id, members)| (*group_id, members.as_slice()))
    }

    /// Add a node to the diagram and return its key.
    ///
    /// Any edges the node carries are dropped. A node already present under the
    /// same key is removed first, along with its edges.
    pub fn add_node(&mut self, mut gate: Gate) -> GateKey {
        let key = gate.key();
        self.take_node(key);
        gate.left.iter_mut().chain(gate.right.iter_mut())
            .for_each(|plug| { plug.edge = None; });
        if gate.kind() == GateType::Unitary {
            self.group_map.entry(gate.group_id()).or_default().push(key);
        }
        self.node_map.insert(key, gate);
        key
    }

    /// Add an edge from the output-facing plug `left_plug` to the input-facing
    /// plug `right_plug`.
    ///
    /// Any edges already attached to either plug are removed first.
    ///
    /// Fails if the plug directions are swapped or either plug doesn't exist.
    pub fn add_edge(&mut self, left_plug: PlugKey, right_plug: PlugKey)
        -> NetworkResult<Edge>
    {
        let edge = Edge::new(left_plug, right_plug)?;
        self.get_plug(&left_plug).ok_or(MissingPlug(left_plug))?;
        self.get_plug(&right_plug).ok_or(MissingPlug(right_plug))?;
        self.remove_edge(&left_plug);
        self.remove_edge(&right_plug);
        for key in [left_plug, right_plug] {
            if let Some(plug) = self.get_plug_mut(&key) {
                plug.edge = Some(edge);
            }
        }
        self.edges.insert(edge);
        Ok(edge)
    }

    /// Remove the edge attached to a plug and return it, clearing the links on
    /// both of its ends.
    ///
    /// No operation is performed if the plug doesn't exist or isn't connected.
    pub fn remove_edge(&mut self, plug: &PlugKey) -> Option<Edge> {
        let edge = self.get_plug(plug)?.edge?;
        self.edges.remove(&edge);
        for key in [edge.left_plug(), edge.right_plug()] {
            if let Some(end) = self.get_plug_mut(&key) {
                end.edge = None;
            }
        }
        Some(edge)
    }

    /// Return `true` if the output-facing `plug1` is wired directly to the
    /// input-facing `plug2`.
    ///
    /// Fails if `plug1` faces left or `plug2` faces right, or if `plug1` does
    /// not exist.
    pub fn connected(&self, plug1: &PlugKey, plug2: &PlugKey)
        -> NetworkResult<bool>
    {
        if plug1.direction == Direction::Left
            || plug2.direction == Direction::Right
        {
            return Err(InvalidWiring(*plug1, *plug2));
        }
        let plug = self.get_plug(plug1).ok_or(MissingPlug(*plug1))?;
        Ok(plug.edge().is_some_and(|edge| edge.right_plug() == *plug2))
    }

    // fail if `gate` is a unitary whose group has gone missing from the index
    fn check_indexed(&self, gate: &Gate) -> NetworkResult<()> {
        if gate.kind() == GateType::Unitary
            && !self.group_map.contains_key(&gate.group_id())
        {
            Err(UnknownGroup(gate.group_id()))
        } else {
            Ok(())
        }
    }

    // remove a node with all its edges, and drop it from the group index if
    // it's there
    fn take_node(&mut self, key: GateKey) -> Option<Gate> {
        let wired: Vec<PlugKey> =
            self.node_map.get(&key)?
            .all_plugs()
            .filter(|plug| plug.is_connected())
            .map(|plug| plug.key())
            .collect();
        wired.iter()
            .for_each(|plug| { self.remove_edge(plug); });
        let gate = self.node_map.remove(&key)?;
        if let Some(members) = self.group_map.get_mut(&gate.group_id()) {
            members.retain(|member| *member != key);
            if members.is_empty() {
                self.group_map.remove(&gate.group_id());
            }
        }
        Some(gate)
    }

    /// Remove a node and return it, pruning it from the group index.
    ///
    /// Any edges still attached to the node are removed as well.
    ///
    /// Fails if the node doesn't exist, or if it is a unitary whose group is
    /// not indexed.
    pub fn remove_simple(&mut self, key: GateKey) -> NetworkResult<Gate> {
        let gate = self.node_map.get(&key).ok_or(MissingNode(key))?;
        self.check_indexed(gate)?;
        self.take_node(key).ok_or(MissingNode(key))
    }

    /// Splice out a pair of nodes.
    ///
    /// For every row where both the input side of `l_node` and the output side
    /// of `r_node` are wired to other nodes, those two outer endpoints are
    /// connected directly. Both nodes are then removed along with their edges.
    ///
    /// Fails if either node doesn't exist or is a unitary with an unindexed
    /// group.
    pub fn remove(&mut self, l_node: GateKey, r_node: GateKey)
        -> NetworkResult<()>
    {
        let left = self.node_map.get(&l_node).ok_or(MissingNode(l_node))?;
        let right = self.node_map.get(&r_node).ok_or(MissingNode(r_node))?;
        self.check_indexed(left)?;
        self.check_indexed(right)?;
        let is_outer = |k: &PlugKey| k.node != l_node && k.node != r_node;
        let outer_left: Vec<(usize, PlugKey)> =
            left.left_plugs().iter()
            .filter_map(|p| p.peer().filter(|k| is_outer(k)).map(|k| (p.j(), k)))
            .collect();
        let outer_right: FxHashMap<usize, PlugKey> =
            right.right_plugs().iter()
            .filter_map(|p| p.peer().filter(|k| is_outer(k)).map(|k| (p.j(), k)))
            .collect();
        self.take_node(l_node);
        self.take_node(r_node);
        for (j, lp) in outer_left.into_iter() {
            if let Some(rp) = outer_right.get(&j) {
                self.add_edge(lp, *rp)?;
            }
        }
        Ok(())
    }

    /// Change the type and dagger flag of a node in place and return its new
    /// key.
    ///
    /// The node's plugs are regenerated and its edges moved over to the new
    /// plugs wherever a plug with the same row and direction still exists.
    /// Group membership is updated to match the new type.
    pub fn change_node(&mut self, key: GateKey, kind: GateType, dagger: bool)
        -> NetworkResult<GateKey>
    {
        let gate = self.node_map.get(&key).ok_or(MissingNode(key))?;
        self.check_indexed(gate)?;
        let peers: Vec<(Direction, usize, PlugKey)> =
            gate.all_plugs()
            .filter_map(|p| p.peer().map(|k| (p.direction(), p.j(), k)))
            .collect();
        let mut gate = self.take_node(key).ok_or(MissingNode(key))?;
        gate.relabel(kind, dagger);
        let new_key = self.add_node(gate);
        for (direction, j, peer) in peers.into_iter() {
            let own = PlugKey::new(new_key, j, direction);
            let peer =
                if peer.node == key { PlugKey { node: new_key, ..peer } }
                else { peer };
            if self.get_plug(&own).is_none() || self.get_plug(&peer).is_none() {
                continue;
            }
            match direction {
                Direction::Right => { self.add_edge(own, peer)?; },
                Direction::Left => { self.add_edge(peer, own)?; },
            }
        }
        Ok(new_key)
    }

    /// Wire the diagram from node locations alone and return the number of
    /// edges added.
    ///
    /// Every unconnected output-facing plug is connected to the first free
    /// input-facing plug on the same row found among nodes strictly to its
    /// right, scanning in order of increasing column.
    pub fn transpile(&mut self) -> NetworkResult<usize> {
        let order: Vec<&Gate> =
            self.node_map.values()
            .sorted_by_key(|node| node.location().x)
            .collect();
        let mut taken: FxHashSet<PlugKey> = FxHashSet::default();
        let mut wires: Vec<(PlugKey, PlugKey)> = Vec::new();
        for node in order.iter() {
            let x = node.location().x;
            for plug in node.right_plugs().iter().filter(|p| !p.is_connected()) {
                let target =
                    order.iter()
                    .filter(|other| other.location().x > x)
                    .filter_map(|other| other.connectable(plug))
                    .find(|p| !p.is_connected() && !taken.contains(&p.key()));
                if let Some(target) = target {
                    taken.insert(target.key());
                    wires.push((plug.key(), target.key()));
                }
            }
        }
        let count = wires.len();
        for (lp, rp) in wires.into_iter() {
            self.add_edge(lp, rp)?;
        }
        Ok(count)
    }

    /// Get the single node that every output-facing plug of `key` is wired
    /// into, if there is one.
    ///
    /// Returns `None` if `key` has no output-facing plugs, if any of them is
    /// unconnected, or if they lead to more than one node.
    pub fn right_partner(&self, key: &GateKey) -> Option<&Gate> {
        let mut peers =
            self.node_map.get(key)?
            .right_plugs().iter()
            .map(|plug| plug.peer().map(|peer| peer.node));
        let first = peers.next()??;
        if peers.all(|node| node == Some(first)) {
            self.node_map.get(&first)
        } else {
            None
        }
    }

    // find a unitary whose output side is wired entirely into a single other
    // unitary of the same group; pairs that also close back into the unitary's
    // input side form traces and are left for integration
    fn find_reducible(&self) -> Option<(GateKey, GateKey)> {
        self.node_map.values()
            .filter(|node| node.kind() == GateType::Unitary)
            .find_map(|node| {
                let partner = self.right_partner(&node.key())?;
                let closes =
                    node.left_plugs().iter()
                    .any(|p| p.peer().is_some_and(|k| k.node == partner.key()));
                (
                    partner.kind() == GateType::Unitary
                    && partner.group_id() == node.group_id()
                    && partner.key() != node.key()
                    && !closes
                ).then_some((node.key(), partner.key()))
            })
    }

    /// Repeatedly splice out pairs of same-group unitaries wired fully
    /// back-to-back until none remain, returning the number of pairs removed.
    ///
    /// A pair whose second node also feeds back into the first on any row is
    /// left in place for integration.
    ///
    /// Each pass scans for a single pair, removes it via
    /// [`remove`][Self::remove], and starts over.
    pub fn reduce(&mut self) -> NetworkResult<usize> {
        let mut count: usize = 0;
        while let Some((l_node, r_node)) = self.find_reducible() {
            trace!(left = %l_node, right = %r_node, "splice back-to-back pair");
            self.remove(l_node, r_node)?;
            count += 1;
        }
        Ok(count)
    }
}

impl fmt::Display for TensorNetwork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "nodes:")?;
        for key in self.node_map.keys() {
            write!(f, "\n  {}", key)?;
        }
        write!(f, "\nedges:")?;
        for edge in self.edges.iter().sorted() {
            write!(f, "\n  {}", edge)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use num_rational::Rational64 as R64;
    use crate::network::Location;
    use super::*;

    const G: R64 = R64::new_raw(10, 1);

    fn ket(x: usize, y0: usize, y1: usize) -> Gate {
        Gate::new(Location::new(x, y0, y1), R64::new(1, 1), GateType::Initial)
    }

    fn unitary(x: usize, y0: usize, y1: usize) -> Gate {
        Gate::new(Location::new(x, y0, y1), G, GateType::Unitary)
    }

    fn observable(x: usize, y: usize) -> Gate {
        Gate::new(Location::new(x, y, y), R64::new(2, 1), GateType::Observable)
    }

    // |0> -- U -- O -- U† -- <0|
    fn build_chain() -> (TensorNetwork, [GateKey; 5]) {
        let mut net = TensorNetwork::new();
        let k = net.add_node(ket(0, 0, 0));
        let u = net.add_node(unitary(1, 0, 0));
        let o = net.add_node(observable(2, 0));
        let ud = net.add_node(unitary(3, 0, 0).with_dagger(true));
        let b = net.add_node(ket(4, 0, 0).with_dagger(true));
        assert_eq!(net.transpile().unwrap(), 4);
        (net, [k, u, o, ud, b])
    }

    fn hash_of(net: &TensorNetwork) -> u64 {
        let mut state = DefaultHasher::new();
        net.hash(&mut state);
        state.finish()
    }

    #[test]
    fn transpile_chain() {
        let (net, [k, u, o, ud, b]) = build_chain();
        assert_eq!(net.count_nodes(), 5);
        assert_eq!(net.count_edges(), 4);
        assert!(net.connected(&PlugKey::right(k, 0), &PlugKey::left(u, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(u, 0), &PlugKey::left(o, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(o, 0), &PlugKey::left(ud, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(ud, 0), &PlugKey::left(b, 0)).unwrap());
        assert!(!net.connected(&PlugKey::right(k, 0), &PlugKey::left(o, 0)).unwrap());
        assert_eq!(net.group(&G), Some([u, ud].as_slice()));
        assert_eq!(net.last_group().map(|(g, _)| g), Some(G));
        assert_eq!(net.count_groups(), 1);
    }

    #[test]
    fn transpile_skips_taken_target() {
        // two sources on the same row and column compete for C; the loser
        // goes on to D, leaving C's own output with nowhere to go
        let a = Gate::new(Location::new(0, 0, 0), R64::new(1, 1), GateType::Observable);
        let b = Gate::new(Location::new(0, 0, 0), R64::new(2, 1), GateType::Observable);
        let c = observable(1, 0);
        let d = Gate::new(Location::new(2, 0, 0), R64::new(3, 1), GateType::Observable);
        let (ka, kb, kc, kd) = (a.key(), b.key(), c.key(), d.key());
        let mut net = TensorNetwork::from_nodes([a, b, c, d]);
        assert_eq!(net.transpile().unwrap(), 2);
        assert!(net.connected(&PlugKey::right(ka, 0), &PlugKey::left(kc, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(kb, 0), &PlugKey::left(kd, 0)).unwrap());
        assert_eq!(net.peer(&PlugKey::right(kc, 0)), None);
    }

    #[test]
    fn transpile_multirow() {
        let mut net = TensorNetwork::from_nodes([
            ket(0, 0, 1),
            unitary(1, 0, 0),
            observable(2, 1),
            ket(3, 0, 1).with_dagger(true),
        ]);
        assert_eq!(net.transpile().unwrap(), 4);
        // already wired plugs are left alone
        assert_eq!(net.transpile().unwrap(), 0);
        let k = ket(0, 0, 1).key();
        let o = observable(2, 1).key();
        assert_eq!(net.peer(&PlugKey::right(k, 1)), Some(PlugKey::left(o, 1)));
    }

    #[test]
    fn wiring_directions() {
        let (mut net, [k, u, o, _, _]) = build_chain();
        assert!(matches!(
            net.add_edge(PlugKey::left(u, 0), PlugKey::right(k, 0)),
            Err(InvalidWiring(..)),
        ));
        assert!(matches!(
            net.connected(&PlugKey::left(u, 0), &PlugKey::right(k, 0)),
            Err(InvalidWiring(..)),
        ));
        assert!(matches!(
            net.add_edge(PlugKey::right(k, 3), PlugKey::left(o, 0)),
            Err(MissingPlug(..)),
        ));
        assert_eq!(net.count_edges(), 4);
    }

    #[test]
    fn add_edge_replaces() {
        let (mut net, [k, u, o, _, _]) = build_chain();
        net.add_edge(PlugKey::right(k, 0), PlugKey::left(o, 0)).unwrap();
        assert_eq!(net.count_edges(), 3);
        assert_eq!(net.peer(&PlugKey::left(u, 0)), None);
        assert_eq!(net.peer(&PlugKey::right(u, 0)), None);
        assert_eq!(net.peer(&PlugKey::left(o, 0)), Some(PlugKey::right(k, 0)));
    }

    #[test]
    fn remove_edge() {
        let (mut net, [k, u, _, _, _]) = build_chain();
        let edge = net.remove_edge(&PlugKey::left(u, 0)).unwrap();
        assert_eq!(edge.left_plug(), PlugKey::right(k, 0));
        assert_eq!(net.count_edges(), 3);
        assert!(net.get_plug(&PlugKey::right(k, 0)).is_some_and(|p| !p.is_connected()));
        assert!(net.remove_edge(&PlugKey::left(u, 0)).is_none());
        assert!(net.remove_edge(&PlugKey::left(k, 0)).is_none());
        assert_eq!(net.count_edges(), 3);
    }

    #[test]
    fn remove_simple() {
        let (mut net, [_, u, o, ud, _]) = build_chain();
        assert_eq!(net.remove_simple(o).unwrap().key(), o);
        assert_eq!(net.count_edges(), 2);
        assert!(net.group_map.contains_key(&G));
        net.remove_simple(u).unwrap();
        assert_eq!(net.group(&G), Some([ud].as_slice()));
        net.remove_simple(ud).unwrap();
        assert!(net.group(&G).is_none());
        assert_eq!(net.count_nodes(), 2);
        assert_eq!(net.count_edges(), 0);
        assert!(matches!(net.remove_simple(u), Err(MissingNode(..))));
    }

    #[test]
    fn remove_simple_unknown_group() {
        let (mut net, [_, u, o, _, _]) = build_chain();
        net.group_map.clear();
        assert!(matches!(net.remove_simple(u), Err(UnknownGroup(g)) if g == G));
        assert!(net.has_node(&u));
        // non-unitary nodes are never indexed
        assert!(net.remove_simple(o).is_ok());
    }

    #[test]
    fn reduce_back_to_back() {
        // |0> -- U -- U† -- O -- <0|
        let mut net = TensorNetwork::from_nodes([
            ket(0, 0, 1),
            unitary(1, 0, 1),
            unitary(2, 0, 1).with_dagger(true),
            observable(3, 0),
            ket(4, 0, 1).with_dagger(true),
        ]);
        net.transpile().unwrap();
        assert_eq!(net.count_edges(), 7);
        assert_eq!(net.reduce().unwrap(), 1);
        assert_eq!(net.count_nodes(), 3);
        assert_eq!(net.count_edges(), 3);
        assert_eq!(net.count_groups(), 0);
        let k = ket(0, 0, 1).key();
        let b = ket(4, 0, 1).with_dagger(true).key();
        let o = observable(3, 0).key();
        assert_eq!(net.peer(&PlugKey::right(k, 0)), Some(PlugKey::left(o, 0)));
        assert_eq!(net.peer(&PlugKey::right(k, 1)), Some(PlugKey::left(b, 1)));
    }

    #[test]
    fn reduce_idempotent() {
        let (mut net, _) = build_chain();
        let before = net.clone();
        assert_eq!(net.reduce().unwrap(), 0);
        assert_eq!(net, before);
        assert_eq!(net.count_nodes(), 5);
        assert_eq!(net.count_edges(), 4);

        let mut net = TensorNetwork::from_nodes([
            ket(0, 0, 0),
            unitary(1, 0, 0),
            unitary(2, 0, 0).with_dagger(true),
            ket(3, 0, 0).with_dagger(true),
        ]);
        net.transpile().unwrap();
        assert_eq!(net.reduce().unwrap(), 1);
        let reduced = net.clone();
        assert_eq!(net.reduce().unwrap(), 0);
        assert_eq!(net, reduced);
        assert_eq!(net.count_edges(), 1);
    }

    #[test]
    fn reduce_keeps_closed_loop() {
        // U and U† wired into each other with nothing outside
        let mut net = TensorNetwork::new();
        let u = net.add_node(unitary(1, 0, 0));
        let ud = net.add_node(unitary(2, 0, 0).with_dagger(true));
        net.add_edge(PlugKey::right(u, 0), PlugKey::left(ud, 0)).unwrap();
        net.add_edge(PlugKey::right(ud, 0), PlugKey::left(u, 0)).unwrap();
        let before = net.clone();
        assert_eq!(net.reduce().unwrap(), 0);
        assert_eq!(net, before);
        assert_eq!(net.count_groups(), 1);

        // closed on one row only
        let mut net = TensorNetwork::new();
        let u = net.add_node(unitary(1, 0, 1));
        let ud = net.add_node(unitary(2, 0, 1).with_dagger(true));
        let k = net.add_node(ket(0, 1, 1));
        let b = net.add_node(ket(3, 1, 1).with_dagger(true));
        net.add_edge(PlugKey::right(u, 0), PlugKey::left(ud, 0)).unwrap();
        net.add_edge(PlugKey::right(u, 1), PlugKey::left(ud, 1)).unwrap();
        net.add_edge(PlugKey::right(ud, 0), PlugKey::left(u, 0)).unwrap();
        net.add_edge(PlugKey::right(k, 1), PlugKey::left(u, 1)).unwrap();
        net.add_edge(PlugKey::right(ud, 1), PlugKey::left(b, 1)).unwrap();
        assert_eq!(net.reduce().unwrap(), 0);
        assert_eq!(net.count_nodes(), 4);
        assert_eq!(net.count_edges(), 5);
    }

    #[test]
    fn change_node() {
        let (mut net, [k, u, o, ud, _]) = build_chain();
        let w = net.change_node(o, GateType::UrWUr, false).unwrap();
        assert!(!net.has_node(&o));
        assert_eq!(net.get_node(&w).map(|n| n.kind()), Some(GateType::UrWUr));
        assert_eq!(net.count_edges(), 4);
        assert_eq!(net.peer(&PlugKey::right(u, 0)), Some(PlugKey::left(w, 0)));
        assert_eq!(net.peer(&PlugKey::left(ud, 0)), Some(PlugKey::right(w, 0)));

        let g = net.change_node(u, GateType::Grad, false).unwrap();
        assert_eq!(net.group(&G), Some([ud].as_slice()));
        assert_eq!(net.peer(&PlugKey::right(k, 0)), Some(PlugKey::left(g, 0)));
        let u2 = net.change_node(g, GateType::Unitary, true).unwrap();
        assert_eq!(net.group(&G), Some([ud, u2].as_slice()));
        assert_eq!(net.count_edges(), 4);
    }

    #[test]
    fn copy_is_independent() {
        let (net, [_, _, o, _, _]) = build_chain();
        let mut copy = net.clone();
        assert_eq!(copy, net);
        assert_eq!(hash_of(&copy), hash_of(&net));
        copy.remove_simple(o).unwrap();
        assert_ne!(copy, net);
        assert_eq!(net.count_edges(), 4);
        assert_eq!(copy.count_edges(), 2);
        assert!(net.get_plug(&PlugKey::left(o, 0)).is_some_and(|p| p.is_connected()));
    }
}
