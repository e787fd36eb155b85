//! Decomposition of proposed Haar pairings against existing wiring.
//!
//! Integrating out a group of random unitaries proposes a set of *Haar pairs*:
//! correspondences between an input-facing plug and an output-facing plug of
//! the integrated nodes. Together with the diagram's current edges, these form
//! the union of two partial matchings on the plugs of the integrated nodes,
//! which always splits into disjoint simple paths and cycles. Each path joins
//! two plugs outside the integrated nodes and becomes a new edge; each cycle
//! is a closed loop contributing a factor of *D*.
//!
//! The decomposition proceeds in three stages:
//! 1. [`find_pairs`] threads Haar pairs through the existing wiring: for each
//!    Haar pair whose input-facing plug is fed by another Haar pair's
//!    output-facing plug, it records the two plugs as a linked pair.
//! 2. Every Haar pair whose input-facing plug is not part of any linked pair
//!    starts a path, which is walked by alternately consuming unused Haar pairs
//!    and linked pairs until it can no longer be extended or closes on itself.
//!    The plugs wired to the two open ends form one final pair.
//! 3. Linked pairs are walked the same way; each walk that shares no plug with
//!    a path found earlier is counted as a loop.

use crate::network::{ NetworkError, NetworkResult, PlugKey, TensorNetwork };

/// A proposed correspondence between an input-facing plug and an
/// output-facing plug.
pub type HaarPair = (PlugKey, PlugKey);

/// Output of [`find_outside_pairs`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Decomposition {
    /// Endpoints of new edges, each oriented from an output-facing plug to an
    /// input-facing plug.
    pub final_pairs: Vec<(PlugKey, PlugKey)>,
    /// Number of closed loops.
    pub loops: usize,
}

/// Thread Haar pairs through the existing wiring.
///
/// For each pair `p`, and each pair `q` whose output-facing end is wired to the
/// input-facing end of `p`, `(p.0, q.1)` is recorded.
pub fn find_pairs(net: &TensorNetwork, haar_pairs: &[HaarPair])
    -> NetworkResult<Vec<HaarPair>>
{
    let mut pairs: Vec<HaarPair> = Vec::new();
    for p in haar_pairs.iter() {
        for q in haar_pairs.iter() {
            if net.connected(&q.1, &p.0)? {
                pairs.push((p.0, q.1));
            }
        }
    }
    Ok(pairs)
}

// walk from `start`, preferring Haar pairs over linked pairs at every step;
// each walk draws from its own copies of both pools
fn walk(start: PlugKey, pairs: &[HaarPair], haar_pairs: &[HaarPair])
    -> Vec<PlugKey>
{
    let mut pairs: Vec<HaarPair> = pairs.to_vec();
    let mut haar_pairs: Vec<HaarPair> = haar_pairs.to_vec();
    let mut path: Vec<PlugKey> = vec![start];
    let mut plug = start;
    loop {
        if let Some(k) =
            haar_pairs.iter().position(|(a, b)| *a == plug || *b == plug)
        {
            let (a, b) = haar_pairs.remove(k);
            plug = if a == plug { b } else { a };
            path.push(plug);
            continue;
        }
        let Some(k) =
            pairs.iter().position(|(a, b)| *a == plug || *b == plug)
            else { break; };
        let (a, b) = pairs[k];
        let next = if a == plug { b } else { a };
        if path.contains(&next) { break; }
        pairs.remove(k);
        plug = next;
        path.push(plug);
    }
    path
}

fn overlaps(paths: &[Vec<PlugKey>], path: &[PlugKey]) -> bool {
    paths.iter()
        .any(|known| path.iter().any(|plug| known.contains(plug)))
}

/// Decompose a set of Haar pairs against the existing wiring of `net` into the
/// new edges they induce and a number of closed loops.
///
/// Fails if a path ends on a plug with no edge leading outside the integrated
/// nodes.
pub fn find_outside_pairs(net: &TensorNetwork, haar_pairs: &[HaarPair])
    -> NetworkResult<Decomposition>
{
    let pairs = find_pairs(net, haar_pairs)?;
    let starts: Vec<PlugKey> =
        haar_pairs.iter()
        .map(|p| p.0)
        .filter(|plug| !pairs.iter().any(|(a, b)| a == plug || b == plug))
        .collect();

    let mut paths: Vec<Vec<PlugKey>> = Vec::new();
    let mut final_pairs: Vec<(PlugKey, PlugKey)> = Vec::new();
    for start in starts.into_iter() {
        let path = walk(start, &pairs, haar_pairs);
        let end = path.last().copied().unwrap_or(start);
        let outer_left =
            net.peer(&start).ok_or(NetworkError::DanglingPlug(start))?;
        let outer_right =
            net.peer(&end).ok_or(NetworkError::DanglingPlug(end))?;
        final_pairs.push((outer_left, outer_right));
        paths.push(path);
    }

    let mut loops: usize = 0;
    for (start, _) in pairs.iter() {
        let path = walk(*start, &pairs, haar_pairs);
        if overlaps(&paths, &path) { continue; }
        paths.push(path);
        loops += 1;
    }
    Ok(Decomposition { final_pairs, loops })
}
