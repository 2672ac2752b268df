use std::path::PathBuf;

use thiserror::Error;

/// Raised by [`crate::graph::Graph::hops`] and [`crate::graph::Graph::analyze`] when a
/// breadth-first search cannot reach its target because the graph has become disconnected.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum GraphError {
    #[error("graph is partitioned: no path between vertex {from} and vertex {to}")]
    Partitioned { from: usize, to: usize },
}

#[derive(Debug, Error)]
pub enum ArgsError {
    #[error("order must be at least 2, got {0}")]
    OrderTooSmall(usize),
    #[error("degree must be at least 2, got {0}")]
    DegreeTooSmall(usize),
    #[error("degree must be less than order (degree={degree}, order={order})")]
    DegreeNotLessThanOrder { degree: usize, order: usize },
}

#[derive(Debug, Error)]
pub enum EdgeListError {
    #[error("edge list {path} could not be opened")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("edge list {path} could not be written")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("edge list {path} line {line_no} is not a valid \"u v\" pair: {text:?}")]
    ParseLine {
        path: PathBuf,
        line_no: usize,
        text: String,
    },
    #[error("edge list {path} references vertex {vertex}, outside order {order}")]
    VertexOutOfRange {
        path: PathBuf,
        vertex: usize,
        order: usize,
    },
    #[error("edge list {path} would give vertex {vertex} degree above {degree}")]
    DegreeExceeded {
        path: PathBuf,
        vertex: usize,
        degree: usize,
    },
    #[error("edge list {path} repeats edge ({u}, {v})")]
    DuplicateEdge { path: PathBuf, u: usize, v: usize },
}

#[derive(Debug, Error)]
pub enum ControllerError {
    #[error("enhancer worker task failed")]
    WorkerJoin(#[source] tokio::task::JoinError),
}
