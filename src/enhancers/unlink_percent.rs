use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::GraphError;
use crate::graph::Graph;

use super::common::has_enough_sample;
use super::Enhancer;

/// Samples `percentage`% of vertices and strips every edge incident to
/// them, then re-completes among just that sample. More destructive per
/// attempt than [`super::replace_percent::ReplacePercentOfEdges`], which
/// only drops one edge per sampled vertex.
pub struct UnlinkPercentOfVertices {
    percentage: u32,
}

impl UnlinkPercentOfVertices {
    pub fn new(percentage: u32) -> Self {
        assert!(percentage > 0 && percentage <= 100);
        Self { percentage }
    }

    fn sample_size(&self, graph: &Graph) -> usize {
        (self.percentage as usize * graph.order()) / 100
    }
}

impl Enhancer for UnlinkPercentOfVertices {
    fn name(&self) -> &'static str {
        match self.percentage {
            5 => "unlink-5-percent-vertices",
            10 => "unlink-10-percent-vertices",
            _ => "unlink-percent-vertices",
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
            let neighbors = graph.neighbors(v).to_vec();
            for n in neighbors {
                graph.remove_edge_unsafe(v, n);
            }
        }
        graph.add_as_many_random_edges_as_possible(Some(sampled), rng);
        Ok(())
    }
}
