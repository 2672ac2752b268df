use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::GraphError;
use crate::graph::Graph;

use super::common::{has_enough_sample, remove_random_edge};
use super::Enhancer;

/// Samples `percentage`% of vertices, removes one random incident edge from
/// each, then re-completes among just that sample.
pub struct ReplacePercentOfEdges {
    percentage: u32,
}

impl ReplacePercentOfEdges {
    pub fn new(percentage: u32) -> Self {
        assert!(percentage > 0 && percentage <= 100);
        Self { percentage }
    }

    fn sample_size(&self, graph: &Graph) -> usize {
        (self.percentage as usize * graph.order()) / 100
    }
}

impl Enhancer for ReplacePercentOfEdges {
    fn name(&self) -> &'static str {
        match self.percentage {
            5 => "randomly-replace-5-percent-edges",
            10 => "randomly-replace-10-percent-edges",
            50 => "randomly-replace-50-percent-edges",
            _ => "randomly-replace-percent-edges",
        }
    }

    fn applicable_to(&self, graph: &Graph) -> bool {
        has_enough_sample(self.sample_size(graph)) && graph.order() - 1 > graph.degree()
    }

    fn modify_graph(&self, graph: &mut Graph, rng: &mut StdRng) -> Result<(), GraphError> {
        let sample_size = self.sample_size(graph);
        let mut vertices: Vec<usize> = (0..graph.order()).collect();
        vertices.shuffle(rng);
        let sampled: Vec<usize> = vertices.into_iter().take(sample_size).collect();

        for &v in &sampled {
            remove_random_edge(graph, v, true, rng);
        }
        graph.add_as_many_random_edges_as_possible(Some(sampled), rng);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    #[test]
    fn not_applicable_when_sample_too_small() {
        let g = Graph::from_edges(10, 3, &[]);
        let e = ReplacePercentOfEdges::new(5);
        assert!(!e.applicable_to(&g)); // floor(5 * 10 / 100) == 0
    }

    #[test]
    fn applicable_once_sample_reaches_two() {
        let g = Graph::from_edges(50, 3, &[]);
        let e = ReplacePercentOfEdges::new(5);
        assert!(e.sample_size(&g) >= 2);
    }

    #[test]
    fn modify_graph_respects_degree_cap() {
        let mut g = Graph::new(20, 3);
        g.add_as_many_random_edges_as_possible(None, &mut StdRng::seed_from_u64(2));
        let e = ReplacePercentOfEdges::new(10);
        let mut rng = StdRng::seed_from_u64(5);
        e.modify_graph(&mut g, &mut rng).unwrap();
        for v in 0..g.order() {
            assert!(g.degree_of(v) <= g.degree());
        }
    }
}
