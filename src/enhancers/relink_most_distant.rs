use rand::rngs::StdRng;

use crate::error::GraphError;
use crate::graph::Graph;

use super::common::{ensure_can_add_edge, longest_paths};
use super::Enhancer;

/// Frees a port at every vertex that sits at the graph's current diameter,
/// then lets random re-completion find new connections for them.
pub struct RandomlyRelinkMostDistant;

impl Enhancer for RandomlyRelinkMostDistant {
    fn name(&self) -> &'static str {
        "randomly-relink-most-distant"
    }

    fn applicable_to(&self, graph: &Graph) -> bool {
        graph.order() - 1 > graph.degree()
    }

    fn modify_graph(&self, graph: &mut Graph, rng: &mut StdRng) -> Result<(), GraphError> {
        let pairs = longest_paths(graph)?;
        for (a, b) in pairs {
            ensure_can_add_edge(graph, a, rng);
            ensure_can_add_edge(graph, b, rng);
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
    fn not_applicable_to_a_complete_graph() {
        let g = Graph::from_edges(5, 4, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        assert!(!RandomlyRelinkMostDistant.applicable_to(&g));
    }

    #[test]
    fn modify_graph_keeps_degree_bound_respected() {
        let mut g = Graph::from_edges(6, 3, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5)]);
        g.add_as_many_random_edges_as_possible(None, &mut StdRng::seed_from_u64(7));
        g.analyze().unwrap();
        let mut candidate = g.duplicate();
        let mut rng = StdRng::seed_from_u64(3);
        RandomlyRelinkMostDistant
            .modify_graph(&mut candidate, &mut rng)
            .unwrap();
        for v in 0..candidate.order() {
            assert!(candidate.degree_of(v) <= candidate.degree());
        }
    }
}
