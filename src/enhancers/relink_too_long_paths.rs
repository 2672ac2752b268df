use std::collections::BTreeSet;

use rand::rngs::StdRng;

use crate::error::GraphError;
use crate::graph::Graph;

use super::common::ensure_can_add_edge;
use super::Enhancer;

/// Frees a port at every vertex on every path whose length exceeds the
/// theoretical diameter lower bound, then lets random re-completion try to
/// shorten them.
pub struct RandomlyRelinkAllInTooLongPaths;

impl Enhancer for RandomlyRelinkAllInTooLongPaths {
    fn name(&self) -> &'static str {
        "randomly-relink-all-in-too-long-paths"
    }

    fn applicable_to(&self, graph: &Graph) -> bool {
        graph.order() - 1 > graph.degree()
    }

    fn modify_graph(&self, graph: &mut Graph, rng: &mut StdRng) -> Result<(), GraphError> {
        let diameter_lower_bound = graph.diameter_lower_bound();

        // Collect every vertex touched by a too-long path before mutating
        // anything: hops() requires a clean graph.
        let mut affected = BTreeSet::new();
        for a in 0..graph.order() {
            for b in (a + 1)..graph.order() {
                let hops = graph.hops(a, b)?;
                if hops.len() + 1 > diameter_lower_bound {
                    affected.insert(a);
                    affected.insert(b);
                    affected.extend(hops.iter().copied());
                }
            }
        }

        for v in affected {
            ensure_can_add_edge(graph, v, rng);
        }
        graph.add_as_many_random_edges_as_possible(None, rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn frees_ports_along_paths_exceeding_the_bound_and_respects_degree_cap() {
        let mut g = Graph::from_edges(5, 2, &[(0, 1), (1, 2), (2, 3), (3, 4)]);
        g.analyze().unwrap();
        assert!(g.diameter().unwrap() > g.diameter_lower_bound());

        let mut candidate = g.duplicate();
        let mut rng = StdRng::seed_from_u64(11);
        RandomlyRelinkAllInTooLongPaths
            .modify_graph(&mut candidate, &mut rng)
            .unwrap();
        for v in 0..candidate.order() {
            assert!(candidate.degree_of(v) <= candidate.degree());
        }
    }
}
