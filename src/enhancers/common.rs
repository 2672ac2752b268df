use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::GraphError;
use crate::graph::Graph;

/// Frees a port at `v` if it is already at full degree, by removing one of
/// its edges at random.
pub fn ensure_can_add_edge(graph: &mut Graph, v: usize, rng: &mut StdRng) {
    if graph.degree_of(v) == graph.degree() {
        remove_random_edge(graph, v, true, rng);
    }
}

/// Removes one random edge incident to `v`. When `allow_complete_disconnect`
/// is false, skips neighbours that would be left with no edges at all.
pub fn remove_random_edge(graph: &mut Graph, v: usize, allow_complete_disconnect: bool, rng: &mut StdRng) {
    let mut neighbors = graph.neighbors(v).to_vec();
    neighbors.shuffle(rng);
    for other in neighbors {
        if allow_complete_disconnect || graph.degree_of(other) > 1 {
            graph.remove_edge_unsafe(v, other);
            return;
        }
    }
}

/// The vertex pairs realizing the graph's current diameter (i.e. the
/// longest shortest paths). Requires a clean graph.
pub fn longest_paths(graph: &mut Graph) -> Result<Vec<(usize, usize)>, GraphError> {
    let mut max_hops = 0usize;
    let mut pairs = Vec::new();
    for a in 0..graph.order() {
        for b in (a + 1)..graph.order() {
            let hops = graph.hops(a, b)?;
            let count = hops.len();
            match count.cmp(&max_hops) {
                std::cmp::Ordering::Greater => {
                    max_hops = count;
                    pairs = vec![(a, b)];
                }
                std::cmp::Ordering::Equal => pairs.push((a, b)),
                std::cmp::Ordering::Less => {}
            }
        }
    }
    Ok(pairs)
}

/// Whether this enhancer's parameterization could ever touch at least two
/// vertices. An enhancer that would only ever act on 0 or 1 vertices can
/// never usefully re-complete the graph.
pub fn has_enough_sample(sample_size: usize) -> bool {
    sample_size >= 2
}
