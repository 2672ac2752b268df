use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time;
use tracing::{debug, info};

use crate::enhancers::{self, Enhancer, EnhancerFactory};
use crate::error::ControllerError;
use crate::graph::Graph;

const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);

pub struct TournamentConfig {
    pub serial: bool,
    pub once: bool,
}

/// Runs tournament rounds against `initial` until either a round produces
/// nothing every enhancer can improve on, `config.once` stops it after one
/// round, or the process receives Ctrl+C. Returns the best graph found.
pub async fn run(config: TournamentConfig, initial: Graph) -> Result<Graph, ControllerError> {
    let registry = enhancers::default_registry();
    let mut best = initial;
    let interrupted = Arc::new(AtomicBool::new(false));

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        if !applicable_enhancers(&registry, &best).any(|_| true) {
            info!(graph = %best, "no enhancer applicable, search has converged");
            break;
        }

        tokio::select! {
            biased;
            _ = &mut ctrl_c => {
                info!("interrupt received, stopping after current best");
                interrupted.store(true, AtomicOrdering::Relaxed);
                break;
            }
            round = run_round(&best, &registry, config.serial, &interrupted) => {
                match round? {
                    RoundOutcome::Adopted(graph) => {
                        info!(graph = %graph, "adopted new best graph");
                        best = graph;
                        if config.once {
                            break;
                        }
                    }
                    RoundOutcome::Stalled => {
                        debug!("round produced no improvement, trying again");
                    }
                }
            }
        }
    }

    Ok(best)
}

fn applicable_enhancers<'a>(
    registry: &'a [EnhancerFactory],
    graph: &'a Graph,
) -> impl Iterator<Item = Box<dyn Enhancer>> + 'a {
    registry
        .iter()
        .map(|factory| factory())
        .filter(move |enhancer| enhancer.applicable_to(graph))
}

enum RoundOutcome {
    Adopted(Graph),
    Stalled,
}

async fn run_round(
    best: &Graph,
    registry: &[EnhancerFactory],
    serial: bool,
    interrupted: &Arc<AtomicBool>,
) -> Result<RoundOutcome, ControllerError> {
    let applicable: Vec<Box<dyn Enhancer>> = applicable_enhancers(registry, best).collect();
    if applicable.is_empty() {
        return Ok(RoundOutcome::Stalled);
    }

    // Reset for this round: a previous round may have left this set (either
    // from its own winner-found cancellation, or from an interrupt that
    // raced it). The outer loop never calls run_round again after an
    // interrupt, so a fresh round always starts uncancelled.
    interrupted.store(false, AtomicOrdering::Relaxed);

    if serial {
        return run_round_serial(best, applicable, interrupted).await;
    }

    let (tx, mut rx) = mpsc::channel::<Graph>(applicable.len().max(1));
    let cancel = Arc::clone(interrupted);
    let mut handles: Vec<JoinHandle<()>> = Vec::with_capacity(applicable.len());

    for enhancer in applicable {
        let tx = tx.clone();
        let cancel = Arc::clone(&cancel);
        let best = best.duplicate();
        handles.push(tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::from_seed(rand::random());
            if let Some(found) = enhancers::enhance(enhancer.as_ref(), &best, &cancel, &mut rng) {
                let _ = tx.blocking_send(found);
            }
        }));
    }
    drop(tx);

    let outcome = wait_for_winner(&mut rx).await;

    cancel.store(true, AtomicOrdering::Relaxed);
    while rx.try_recv().is_ok() {}
    for handle in handles {
        handle.abort();
    }

    Ok(outcome)
}

async fn wait_for_winner(rx: &mut mpsc::Receiver<Graph>) -> RoundOutcome {
    let mut heartbeat = time::interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await; // first tick fires immediately; discard it
    loop {
        tokio::select! {
            biased;
            maybe = rx.recv() => {
                return match maybe {
                    Some(graph) => RoundOutcome::Adopted(graph),
                    None => RoundOutcome::Stalled,
                };
            }
            _ = heartbeat.tick() => {
                debug!("tournament round still searching");
            }
        }
    }
}

async fn run_round_serial(
    best: &Graph,
    applicable: Vec<Box<dyn Enhancer>>,
    interrupted: &Arc<AtomicBool>,
) -> Result<RoundOutcome, ControllerError> {
    let cancel = Arc::clone(interrupted);
    for enhancer in applicable {
        let best_copy = best.duplicate();
        let cancel = Arc::clone(&cancel);
        let handle = tokio::task::spawn_blocking(move || {
            let mut rng = StdRng::from_seed(rand::random());
            enhancers::enhance(enhancer.as_ref(), &best_copy, &cancel, &mut rng)
        });
        if let Some(found) = handle.await.map_err(ControllerError::WorkerJoin)? {
            return Ok(RoundOutcome::Adopted(found));
        }
    }
    Ok(RoundOutcome::Stalled)
}
