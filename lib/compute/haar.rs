use tracing::{ debug, trace };
use crate::{
    coeff::Coefficient,
    compute::{ Computation, FourHaarIntegration, TwoHaarIntegration },
    network::{
        GateKey,
        GateType,
        NetworkError,
        NetworkResult,
        TensorNetwork,
        TensorNetworks,
    },
};

/// Average an ensemble over the Haar measure, one group at a time.
///
/// Each step maps every diagram of the ensemble to one or more successors: the
/// diagram is first [reduced][TensorNetwork::reduce], then its unitary group
/// with the highest ID is integrated out with the two-fold formula (two
/// members) or the four-fold formula (four members, producing one successor per
/// branch). Diagrams with no group left pass through unchanged.
///
/// A fixed number of steps is run; diagrams that still hold unitary groups
/// after the last step are returned as-is.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HaarIntegration {
    n_steps: usize,
    two_haar: TwoHaarIntegration,
    four_haar: FourHaarIntegration,
}

impl HaarIntegration {
    /// Create a new integration running `n_steps` steps with all four-fold
    /// branches.
    pub fn new(n_steps: usize) -> Self {
        Self {
            n_steps,
            two_haar: TwoHaarIntegration,
            four_haar: FourHaarIntegration::default(),
        }
    }

    /// Replace the four-fold integration.
    pub fn with_four_haar(mut self, four_haar: FourHaarIntegration) -> Self {
        self.four_haar = four_haar;
        self
    }

    pub fn n_steps(&self) -> usize { self.n_steps }

    /// Perform a single step over a whole ensemble.
    pub fn step(&self, networks: TensorNetworks)
        -> NetworkResult<TensorNetworks>
    {
        let mut result = TensorNetworks::new();
        for (coeff, net) in networks.into_iter() {
            self.integrate_one(&mut result, coeff, net)?;
        }
        Ok(result)
    }

    fn integrate_one(
        &self,
        result: &mut TensorNetworks,
        coeff: Coefficient,
        mut net: TensorNetwork,
    ) -> NetworkResult<()>
    {
        net.reduce()?;
        let last: Option<(_, Vec<GateKey>)> =
            net.last_group().map(|(group_id, members)| (group_id, members.to_vec()));
        let Some((group_id, members)) = last else {
            result.add(coeff, net);
            return Ok(());
        };
        debug_assert!(members.iter().all(|key| key.kind == GateType::Unitary));
        trace!(group = %group_id, size = members.len(), "integrate group");
        match members.as_slice() {
            &[u, u_dagger] => {
                let factors = self.two_haar.integrate(&mut net, u, u_dagger)?;
                let mut coeff = coeff;
                coeff.extend(factors.into_iter().flatten());
                result.add(coeff, net);
            },
            &[_, _, _, _] => {
                let branches = self.four_haar.integrate(&net, group_id)?;
                for (factors, branch) in branches.into_iter() {
                    let mut coeff = coeff.clone();
                    coeff.extend(factors);
                    result.add(coeff, branch);
                }
            },
            _ => {
                return Err(
                    NetworkError::UnsupportedGroupSize(group_id, members.len()));
            },
        }
        Ok(())
    }
}

impl Computation for HaarIntegration {
    fn compute(&self, networks: TensorNetworks)
        -> NetworkResult<TensorNetworks>
    {
        (0..self.n_steps)
            .try_fold(networks, |acc, step| {
                let terms_in = acc.len();
                let acc = self.step(acc)?;
                debug!(step, terms_in, terms_out = acc.len(), "haar integration");
                Ok(acc)
            })
    }
}
