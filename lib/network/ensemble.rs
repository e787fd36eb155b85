use crate::{ coeff::Coefficient, network::TensorNetwork };

/// A weighted formal sum of diagrams.
///
/// Held as two parallel sequences so that `coefficients()[i]` weights
/// `networks()[i]`. No deduplication is performed; see
/// [`bucket`][crate::interpret::bucket] for grouping equal diagrams.
#[derive(Clone, Debug, Default)]
pub struct TensorNetworks {
    coefficients: Vec<Coefficient>,
    networks: Vec<TensorNetwork>,
}

impl TensorNetworks {
    /// Create a new, empty ensemble.
    pub fn new() -> Self { Self::default() }

    /// Append a weighted diagram.
    pub fn add(&mut self, coefficient: Coefficient, network: TensorNetwork) {
        self.coefficients.push(coefficient);
        self.networks.push(network);
    }

    /// Return the number of terms.
    pub fn len(&self) -> usize { self.networks.len() }

    /// Return `true` if there are no terms.
    pub fn is_empty(&self) -> bool { self.networks.is_empty() }

    pub fn coefficients(&self) -> &[Coefficient] { &self.coefficients }

    pub fn networks(&self) -> &[TensorNetwork] { &self.networks }

    pub fn networks_mut(&mut self) -> &mut [TensorNetwork] {
        &mut self.networks
    }

    /// Return an iterator over all `(coefficient, diagram)` terms.
    pub fn iter(&self)
        -> impl Iterator<Item = (&Coefficient, &TensorNetwork)> + '_
    {
        self.coefficients.iter().zip(self.networks.iter())
    }
}

impl IntoIterator for TensorNetworks {
    type Item = (Coefficient, TensorNetwork);
    type IntoIter = std::iter::Zip<
        std::vec::IntoIter<Coefficient>,
        std::vec::IntoIter<TensorNetwork>,
    >;

    fn into_iter(self) -> Self::IntoIter {
        self.coefficients.into_iter().zip(self.networks)
    }
}

impl FromIterator<(Coefficient, TensorNetwork)> for TensorNetworks {
    fn from_iter<I>(iter: I) -> Self
    where I: IntoIterator<Item = (Coefficient, TensorNetwork)>
    {
        let (coefficients, networks) = iter.into_iter().unzip();
        Self { coefficients, networks }
    }
}

impl Extend<(Coefficient, TensorNetwork)> for TensorNetworks {
    fn extend<I>(&mut self, iter: I)
    where I: IntoIterator<Item = (Coefficient, TensorNetwork)>
    {
        iter.into_iter()
            .for_each(|(coefficient, network)| self.add(coefficient, network));
    }
}

#[cfg(test)]
mod tests {
    use num_complex::Complex64 as C64;
    use crate::network::{ Gate, Location };
    use super::*;

    #[test]
    fn parallel_terms() {
        let mut ens = TensorNetworks::new();
        assert!(ens.is_empty());
        let net = TensorNetwork::from_nodes([Gate::unitary(Location::new(1, 0, 0))]);
        ens.add(Coefficient::new(C64::new(-1.0, 0.0)), net.clone());
        ens.add(Coefficient::new(C64::new(2.0, 0.0)), TensorNetwork::new());
        assert_eq!(ens.len(), 2);
        assert_eq!(ens.networks()[0], net);
        assert_eq!(ens.coefficients()[1].digit(), C64::new(2.0, 0.0));

        let copy: TensorNetworks = ens.clone().into_iter().rev().collect();
        assert_eq!(copy.len(), 2);
        assert_eq!(copy.coefficients()[0].digit(), C64::new(2.0, 0.0));
        assert_eq!(copy.networks()[1], net);
    }
}
