use crate::{
    coeff::Factor,
    network::{ GateKey, NetworkError, NetworkResult, PlugKey, TensorNetwork },
};

/// Integration of a group holding a single unitary and its adjoint.
///
/// Each row covered by the unitary is treated independently according to the
/// wiring already present between the two nodes:
///
/// | existing wiring              | rewiring                              | factor |
/// |------------------------------|---------------------------------------|--------|
/// | `ū → u` and `u → ū`          | none; the row closes into a trace     | *D*    |
/// | `ū → u` only                 | ū's input partner to u's output partner | none |
/// | `u → ū` only                 | u's input partner to ū's output partner | none |
/// | neither                      | ū's input to u's output partner, u's input to ū's output partner | 1/*D* |
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TwoHaarIntegration;

fn partner(net: &TensorNetwork, plug: PlugKey) -> NetworkResult<PlugKey> {
    net.peer(&plug).ok_or(NetworkError::DanglingPlug(plug))
}

impl TwoHaarIntegration {
    /// Integrate out the pair `(u, u_dagger)` and remove both nodes, returning
    /// one (possibly absent) factor for every row covered by `u`.
    pub fn integrate(
        &self,
        net: &mut TensorNetwork,
        u: GateKey,
        u_dagger: GateKey,
    ) -> NetworkResult<Vec<Option<Factor>>>
    {
        let rows = net.get_node(&u).ok_or(NetworkError::MissingNode(u))?.rows();
        if !net.has_node(&u_dagger) {
            return Err(NetworkError::MissingNode(u_dagger));
        }
        let factors: Vec<Option<Factor>> =
            rows.map(|y| self.integrate_row(net, u, u_dagger, y))
            .collect::<NetworkResult<_>>()?;
        net.remove_simple(u)?;
        net.remove_simple(u_dagger)?;
        Ok(factors)
    }

    fn integrate_row(
        &self,
        net: &mut TensorNetwork,
        u: GateKey,
        u_dagger: GateKey,
        y: usize,
    ) -> NetworkResult<Option<Factor>>
    {
        let l = PlugKey::left(u, y);
        let r = PlugKey::right(u, y);
        let ld = PlugKey::left(u_dagger, y);
        let rd = PlugKey::right(u_dagger, y);
        let back = net.connected(&rd, &l)?;
        let forward = net.connected(&r, &ld)?;
        let (new_edges, factor) =
            match (back, forward) {
                (true, true) => (Vec::new(), Some(Factor::D)),
                (true, false) => {
                    let ldp = partner(net, ld)?;
                    let rp = partner(net, r)?;
                    (vec![(ldp, rp)], None)
                },
                (false, true) => {
                    let lp = partner(net, l)?;
                    let rdp = partner(net, rd)?;
                    (vec![(lp, rdp)], None)
                },
                (false, false) => {
                    let lp = partner(net, l)?;
                    let rp = partner(net, r)?;
                    let ldp = partner(net, ld)?;
                    let rdp = partner(net, rd)?;
                    (vec![(ldp, rp), (lp, rdp)], Some(Factor::DF))
                },
            };
        for plug in [l, r, ld, rd] {
            net.remove_edge(&plug);
        }
        for (lp, rp) in new_edges.into_iter() {
            net.add_edge(lp, rp)?;
        }
        Ok(factor)
    }
}

#[cfg(test)]
mod tests {
    use num_rational::Rational64 as R64;
    use crate::network::{ Gate, GateType, Location };
    use super::*;

    const G: R64 = R64::new_raw(3, 2);

    fn node(x: usize, y0: usize, y1: usize, kind: GateType) -> Gate {
        Gate::new(Location::new(x, y0, y1), R64::new(x as i64 + 10, 1), kind)
    }

    fn unitary(x: usize, y0: usize, y1: usize, dagger: bool) -> Gate {
        Gate::new(Location::new(x, y0, y1), G, GateType::Unitary)
            .with_dagger(dagger)
    }

    #[test]
    fn open_row() {
        // |0> -- U -- O -- U† -- <0|
        let ket = node(0, 0, 0, GateType::Initial);
        let obs = node(2, 0, 0, GateType::Observable);
        let bra = node(4, 0, 0, GateType::Initial).with_dagger(true);
        let (k, o, b) = (ket.key(), obs.key(), bra.key());
        let mut net = TensorNetwork::from_nodes([
            ket, unitary(1, 0, 0, false), obs, unitary(3, 0, 0, true), bra,
        ]);
        net.transpile().unwrap();
        let u = unitary(1, 0, 0, false).key();
        let ud = unitary(3, 0, 0, true).key();
        let factors = TwoHaarIntegration.integrate(&mut net, u, ud).unwrap();
        assert_eq!(factors, vec![Some(Factor::DF)]);
        assert_eq!(net.count_nodes(), 3);
        assert_eq!(net.count_edges(), 2);
        assert_eq!(net.count_groups(), 0);
        assert!(net.connected(&PlugKey::right(k, 0), &PlugKey::left(b, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(o, 0), &PlugKey::left(o, 0)).unwrap());
    }

    #[test]
    fn closed_trace() {
        let mut net = TensorNetwork::new();
        let u = net.add_node(unitary(1, 0, 0, false));
        let ud = net.add_node(unitary(2, 0, 0, true));
        net.add_edge(PlugKey::right(ud, 0), PlugKey::left(u, 0)).unwrap();
        net.add_edge(PlugKey::right(u, 0), PlugKey::left(ud, 0)).unwrap();
        let factors = TwoHaarIntegration.integrate(&mut net, u, ud).unwrap();
        assert_eq!(factors, vec![Some(Factor::D)]);
        assert_eq!(net.count_nodes(), 0);
        assert_eq!(net.count_edges(), 0);
        assert!(net.group(&G).is_none());
    }

    #[test]
    fn back_wired_only() {
        let mut net = TensorNetwork::new();
        let a = net.add_node(node(0, 0, 0, GateType::Observable));
        let u = net.add_node(unitary(1, 0, 0, false));
        let ud = net.add_node(unitary(2, 0, 0, true));
        let b = net.add_node(node(3, 0, 0, GateType::Observable));
        net.add_edge(PlugKey::right(ud, 0), PlugKey::left(u, 0)).unwrap();
        net.add_edge(PlugKey::right(u, 0), PlugKey::left(b, 0)).unwrap();
        net.add_edge(PlugKey::right(a, 0), PlugKey::left(ud, 0)).unwrap();
        let factors = TwoHaarIntegration.integrate(&mut net, u, ud).unwrap();
        assert_eq!(factors, vec![None]);
        assert_eq!(net.count_edges(), 1);
        assert!(net.connected(&PlugKey::right(a, 0), &PlugKey::left(b, 0)).unwrap());
    }

    #[test]
    fn forward_wired_only() {
        let mut net = TensorNetwork::new();
        let a = net.add_node(node(0, 0, 0, GateType::Observable));
        let u = net.add_node(unitary(1, 0, 0, false));
        let ud = net.add_node(unitary(2, 0, 0, true));
        let b = net.add_node(node(3, 0, 0, GateType::Observable));
        net.add_edge(PlugKey::right(a, 0), PlugKey::left(u, 0)).unwrap();
        net.add_edge(PlugKey::right(u, 0), PlugKey::left(ud, 0)).unwrap();
        net.add_edge(PlugKey::right(ud, 0), PlugKey::left(b, 0)).unwrap();
        let factors = TwoHaarIntegration.integrate(&mut net, u, ud).unwrap();
        assert_eq!(factors, vec![None]);
        assert_eq!(net.count_nodes(), 2);
        assert!(net.connected(&PlugKey::right(a, 0), &PlugKey::left(b, 0)).unwrap());
    }

    #[test]
    fn one_factor_per_row() {
        // row 0 passes the observable, row 1 runs straight from U into U†
        let ket = node(0, 0, 1, GateType::Initial);
        let bra = node(4, 0, 1, GateType::Initial).with_dagger(true);
        let (k, b) = (ket.key(), bra.key());
        let mut net = TensorNetwork::from_nodes([
            ket,
            unitary(1, 0, 1, false),
            node(2, 0, 0, GateType::Observable),
            unitary(3, 0, 1, true),
            bra,
        ]);
        net.transpile().unwrap();
        let u = unitary(1, 0, 1, false).key();
        let ud = unitary(3, 0, 1, true).key();
        let factors = TwoHaarIntegration.integrate(&mut net, u, ud).unwrap();
        assert_eq!(factors, vec![Some(Factor::DF), None]);
        assert_eq!(net.count_edges(), 3);
        assert!(net.connected(&PlugKey::right(k, 0), &PlugKey::left(b, 0)).unwrap());
        assert!(net.connected(&PlugKey::right(k, 1), &PlugKey::left(b, 1)).unwrap());
    }

    #[test]
    fn dangling() {
        let mut net = TensorNetwork::new();
        let u = net.add_node(unitary(1, 0, 0, false));
        let ud = net.add_node(unitary(2, 0, 0, true));
        assert!(matches!(
            TwoHaarIntegration.integrate(&mut net, u, ud),
            Err(NetworkError::DanglingPlug(..)),
        ));
    }
}
