use rand::rngs::StdRng;

use crate::error::GraphError;
use crate::graph::Graph;

use super::common::{ensure_can_add_edge, longest_paths};
use super::Enhancer;

/// Frees a port at both ends of each diametral pair and connects them
/// directly, shrinking those paths to a single hop.
pub struct ConnectMostDistant;

impl Enhancer for ConnectMostDistant {
    fn name(&self) -> &'static str {
        "connect-most-distant"
    }

    fn applicable_to(&self, graph: &Graph) -> bool {
        graph.order() - 1 > graph.degree()
    }

    fn modify_graph(&self, graph: &mut Graph, rng: &mut StdRng) -> Result<(), GraphError> {
        let pairs = longest_paths(graph)?;
        for (a, b) in pairs {
            ensure_can_add_edge(graph, a, rng);
            ensure_can_add_edge(graph, b, rng);
            if a != b
                && !graph.neighbors(a).contains(&b)
                && graph.degree_of(a) < graph.degree()
                && graph.degree_of(b) < graph.degree()
            {
                graph.add_edge_unsafe(a, b);
            }
        }
        Ok(())
    }
}
