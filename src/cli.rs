use std::path::PathBuf;

use clap::Parser;

use crate::error::ArgsError;

/// Search for small-diameter, low-ASPL k-regular graphs
/// (see http://research.nii.ac.jp/graphgolf/).
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Number of vertices.
    pub order: usize,

    /// Number of edges per vertex.
    pub degree: usize,

    /// Start from this edge list instead of a random graph.
    #[arg(short = 'e', long = "edges")]
    pub edges: Option<PathBuf>,

    /// Run enhancers one at a time instead of racing them. Useful for
    /// debugging a single strategy; because no other strategy ever races
    /// it, a round can only ever finish with that one enhancer's result.
    #[arg(short = 's', long = "serial")]
    pub serial: bool,

    /// Run a single tournament round and exit instead of looping until
    /// interrupted.
    #[arg(short = 'o', long = "once")]
    pub once: bool,

    /// Enable debug logging.
    #[arg(short = 'd', long = "debug")]
    pub debug: bool,

    /// Enable verbose (trace) logging.
    #[arg(short = 'v', long = "verbose")]
    pub verbose: bool,
}

impl Cli {
    pub fn validate(&self) -> Result<(), ArgsError> {
        if self.order < 2 {
            return Err(ArgsError::OrderTooSmall(self.order));
        }
        if self.degree < 2 {
            return Err(ArgsError::DegreeTooSmall(self.degree));
        }
        if self.degree >= self.order {
            return Err(ArgsError::DegreeNotLessThanOrder {
                degree: self.degree,
                order: self.order,
            });
        }
        Ok(())
    }
}
