//! Construction of gradient diagrams from a layered circuit.
//!
//! A [`Circuit`] is a list of gates placed on a lattice together with a single
//! measured observable. The expectation value of the observable is laid out as
//! one diagram: the circuit, then the observable, then the adjoint circuit
//! mirrored about the observable's column. Differentiating with respect to
//! one gate marks that gate as [`Grad`][GateType::Grad] on one side of the
//! mirror and as [`UnintegrableUnitary`][GateType::UnintegrableUnitary] on the
//! other.
//!
//! ```
//! # use haar_tn::circuit::Circuit;
//! # use haar_tn::network::{ Gate, GateType, Location };
//! # use num_rational::Rational64 as R64;
//! let mut circuit = Circuit::new(1);
//! circuit.add_gate(Gate::new(Location::new(0, 0, 1), R64::new(1, 1), GateType::Initial));
//! circuit.add_gate(Gate::unitary(Location::new(1, 0, 1)));
//! circuit.add_observable(Gate::new(Location::new(2, 0, 0), R64::new(0, 1), GateType::Observable));
//! let avg = circuit.to_grad_avg(Location::new(1, 0, 1).sort_id()).unwrap();
//! assert_eq!(avg.len(), 2);
//! assert_eq!(avg.networks()[0].count_nodes(), 5);
//! ```

use num_complex::Complex64 as C64;
use crate::{
    coeff::Coefficient,
    network::{
        Gate,
        GateType,
        GroupId,
        NetworkError,
        NetworkResult,
        TensorNetwork,
        TensorNetworks,
    },
};

/// A layered circuit with a single observable.
#[derive(Clone, Debug)]
pub struct Circuit {
    b_height: usize,
    gates: Vec<Gate>,
    observable: Option<Gate>,
}

impl Circuit {
    /// Create a new, empty circuit spanning `b_height` rows.
    pub fn new(b_height: usize) -> Self {
        Self { b_height, gates: Vec::new(), observable: None }
    }

    pub fn b_height(&self) -> usize { self.b_height }

    pub fn gates(&self) -> &[Gate] { &self.gates }

    pub fn observable(&self) -> Option<&Gate> { self.observable.as_ref() }

    /// Append a gate.
    pub fn add_gate(&mut self, gate: Gate) { self.gates.push(gate); }

    /// Set the observable, replacing any previous one.
    pub fn add_observable(&mut self, observable: Gate) {
        self.observable = Some(observable);
    }

    fn get_observable(&self) -> NetworkResult<&Gate> {
        let obs = self.observable.as_ref().ok_or(NetworkError::MissingObservable)?;
        let x_obs = obs.location().x;
        if let Some(gate) =
            self.gates.iter().find(|gate| gate.location().x >= x_obs)
        {
            return Err(NetworkError::MisplacedGate(gate.location()));
        }
        Ok(obs)
    }

    // lay out one expectation value, shifted down by `y_offset` rows; if
    // `swapped`, the gradient sits on the mirrored side
    fn add_expectation(
        &self,
        net: &mut TensorNetwork,
        grad_id: GroupId,
        swapped: bool,
        y_offset: usize,
    ) -> NetworkResult<()>
    {
        let obs = self.get_observable()?;
        let axis = 2 * obs.location().x;
        for gate in self.gates.iter() {
            let loc = gate.location().shifted(y_offset);
            if gate.group_id() == grad_id {
                let kind =
                    if swapped { GateType::UnintegrableUnitary }
                    else { GateType::Grad };
                net.add_node(Gate::new(loc, grad_id, kind));
            } else {
                net.add_node(gate.copy_to(loc));
            }
        }
        net.add_node(obs.copy_to(obs.location().shifted(y_offset)));
        for gate in self.gates.iter().rev() {
            let loc =
                gate.location()
                .at_column(axis - gate.location().x)
                .shifted(y_offset);
            if gate.group_id() == grad_id {
                let kind =
                    if swapped { GateType::Grad }
                    else { GateType::UnintegrableUnitary };
                net.add_node(Gate::new(loc, grad_id, kind).with_dagger(true));
            } else {
                net.add_node(gate.conjugate().copy_to(loc));
            }
        }
        Ok(())
    }

    fn build(&self, layout: &[(bool, usize)], grad_id: GroupId)
        -> NetworkResult<TensorNetwork>
    {
        let mut net = TensorNetwork::new();
        for &(swapped, y_offset) in layout.iter() {
            self.add_expectation(&mut net, grad_id, swapped, y_offset)?;
        }
        net.transpile()?;
        Ok(net)
    }

    /// Build the diagrams whose weighted sum is the gradient of the
    /// expectation value with respect to the gate of group `grad_id`.
    ///
    /// Produces two diagrams, weighted by −*i* and +*i*; the second carries the
    /// gradient on the mirrored side.
    pub fn to_grad_avg(&self, grad_id: GroupId)
        -> NetworkResult<TensorNetworks>
    {
        let mut result = TensorNetworks::new();
        result.add(
            Coefficient::new(C64::new(0.0, -1.0)),
            self.build(&[(false, 0)], grad_id)?,
        );
        result.add(
            Coefficient::new(C64::new(0.0, 1.0)),
            self.build(&[(true, 0)], grad_id)?,
        );
        Ok(result)
    }

    /// Build the doubled diagrams whose weighted sum is the square of the
    /// gradient with respect to the gate of group `grad_id`.
    ///
    /// The second copy of each diagram is shifted down by `b_height + 1` rows.
    /// Produces three diagrams, weighted by −1, 2, and −1.
    pub fn to_grad_var(&self, grad_id: GroupId)
        -> NetworkResult<TensorNetworks>
    {
        let dy = self.b_height + 1;
        let mut result = TensorNetworks::new();
        result.add(
            Coefficient::new(C64::new(-1.0, 0.0)),
            self.build(&[(false, 0), (false, dy)], grad_id)?,
        );
        result.add(
            Coefficient::new(C64::new(2.0, 0.0)),
            self.build(&[(false, 0), (true, dy)], grad_id)?,
        );
        result.add(
            Coefficient::new(C64::new(-1.0, 0.0)),
            self.build(&[(true, 0), (true, dy)], grad_id)?,
        );
        Ok(result)
    }
}
