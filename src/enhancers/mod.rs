//! Enhancers are the graph mutation strategies the tournament controller
//! races against each other each round. Each one implements a different
//! heuristic for shrinking diameter and average shortest path length.

mod common;
mod connect_most_distant;
mod relink_most_distant;
mod relink_too_long_paths;
mod replace_percent;
mod unlink_percent;

use std::cmp::Ordering;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};

use rand::rngs::StdRng;

use crate::error::GraphError;
use crate::graph::Graph;

pub use connect_most_distant::ConnectMostDistant;
pub use relink_most_distant::RandomlyRelinkMostDistant;
pub use relink_too_long_paths::RandomlyRelinkAllInTooLongPaths;
pub use replace_percent::ReplacePercentOfEdges;
pub use unlink_percent::UnlinkPercentOfVertices;

/// A graph mutation strategy that the tournament controller can race.
///
/// Implementations must be cheap to construct (the controller builds one
/// instance per applicable enhancer per round) and must not hold any state
/// across calls; all mutation state lives on the `Graph` passed in.
pub trait Enhancer: Send {
    fn name(&self) -> &'static str;

    /// Whether this enhancer could meaningfully act on `graph` right now
    /// (e.g. there is at least one free port to exploit, or the sample size
    /// its percentage implies is large enough to matter).
    fn applicable_to(&self, graph: &Graph) -> bool;

    /// Mutates `graph` in place, one attempt's worth of changes. May query
    /// `graph.hops(..)`, which requires the graph still be clean at the
    /// point of the call.
    fn modify_graph(&self, graph: &mut Graph, rng: &mut StdRng) -> Result<(), GraphError>;
}

pub type EnhancerFactory = Box<dyn Fn() -> Box<dyn Enhancer> + Send + Sync>;

fn factory<F>(f: F) -> EnhancerFactory
where
    F: Fn() -> Box<dyn Enhancer> + Send + Sync + 'static,
{
    Box::new(f)
}

/// The full set of enhancer strategies the tournament draws from each
/// round. Registering the same strategy with different parameters (as done
/// here for the percentage-based enhancers) gives it a larger share of the
/// tournament's worker pool without changing its individual odds of
/// winning any one attempt.
pub fn default_registry() -> Vec<EnhancerFactory> {
    vec![
        factory(|| Box::new(RandomlyRelinkMostDistant)),
        factory(|| Box::new(ConnectMostDistant)),
        factory(|| Box::new(RandomlyRelinkAllInTooLongPaths)),
        factory(|| Box::new(ReplacePercentOfEdges::new(5))),
        factory(|| Box::new(ReplacePercentOfEdges::new(10))),
        factory(|| Box::new(ReplacePercentOfEdges::new(50))),
        factory(|| Box::new(UnlinkPercentOfVertices::new(10))),
    ]
}

/// Repeatedly duplicates `best`, lets `enhancer` mutate the copy, and
/// analyzes it, until either a strictly better graph is found or `cancel`
/// is observed set (another worker in this round already won).
///
/// A candidate that turns out disconnected, or that analysis abandons
/// early because it cannot beat `best`, is simply discarded and another
/// attempt is made; neither condition is a fatal error for the search.
pub fn enhance(
    enhancer: &dyn Enhancer,
    best: &Graph,
    cancel: &AtomicBool,
    rng: &mut StdRng,
) -> Option<Graph> {
    loop {
        if cancel.load(AtomicOrdering::Relaxed) {
            return None;
        }

        let mut candidate = best.duplicate();
        if enhancer.modify_graph(&mut candidate, rng).is_err() {
            continue;
        }

        match candidate.analyze() {
            Ok(()) => {
                if candidate.is_analyzed() && candidate.compare_quality(best) == Ordering::Less {
                    return Some(candidate);
                }
            }
            Err(GraphError::Partitioned { .. }) => continue,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use std::sync::atomic::AtomicBool;

    #[test]
    fn enhance_returns_none_once_cancelled() {
        let g = Graph::from_edges(5, 4, &[(0, 1), (0, 2), (0, 3), (0, 4)]);
        let cancel = AtomicBool::new(true);
        let mut rng = StdRng::seed_from_u64(1);
        let result = enhance(&RandomlyRelinkMostDistant, &g, &cancel, &mut rng);
        assert!(result.is_none());
    }

    #[test]
    fn enhance_finds_a_strictly_better_line_three_graph() {
        // Line(3, 2) is not ideal (diameter 2 vs lower bound possibly lower);
        // ConnectMostDistant should collapse it towards the triangle.
        let mut best = Graph::from_edges(3, 2, &[(0, 1), (1, 2)]);
        best.analyze().unwrap();
        let cancel = AtomicBool::new(false);
        let mut rng = StdRng::seed_from_u64(1);
        let found = enhance(&ConnectMostDistant, &best, &cancel, &mut rng);
        let found = found.expect("connect-most-distant should close the triangle");
        assert_eq!(found.compare_quality(&best), Ordering::Less);
    }

    #[test]
    fn default_registry_has_one_factory_per_registered_strategy() {
        assert_eq!(default_registry().len(), 7);
    }

    #[test]
    fn complete_graph_has_no_applicable_enhancer() {
        let g = Graph::from_edges(
            5,
            4,
            &[
                (0, 1),
                (0, 2),
                (0, 3),
                (0, 4),
                (1, 2),
                (1, 3),
                (1, 4),
                (2, 3),
                (2, 4),
                (3, 4),
            ],
        );
        for factory in default_registry() {
            let enhancer = factory();
            assert!(!enhancer.applicable_to(&g), "{} should be inapplicable", enhancer.name());
        }
    }
}
