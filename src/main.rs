use std::path::Path;

use anyhow::Context;
use clap::Parser;
use graph_golf::cli::Cli;
use graph_golf::controller::{self, TournamentConfig};
use graph_golf::edge_list;
use graph_golf::graph::Graph;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::{fmt::format::FmtSpan, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli)?;
    cli.validate()?;

    let mut graph = match &cli.edges {
        Some(path) => {
            let edges = edge_list::read_edge_list(path, cli.order, cli.degree)
                .with_context(|| format!("loading edge list from {}", path.display()))?;
            Graph::from_edges(cli.order, cli.degree, &edges)
        }
        None => {
            let mut graph = Graph::new(cli.order, cli.degree);
            let mut rng = StdRng::from_seed(rand::random());
            graph.add_as_many_random_edges_as_possible(None, &mut rng);
            graph
        }
    };
    graph.analyze()?;
    info!(
        order = cli.order,
        degree = cli.degree,
        diameter_lower_bound = graph.diameter_lower_bound(),
        aspl_lower_bound = graph.aspl_lower_bound(),
        graph = %graph,
        "starting search"
    );

    let best = controller::run(
        TournamentConfig {
            serial: cli.serial,
            once: cli.once,
        },
        graph,
    )
    .await?;

    let filename = edge_list::output_filename(&best);
    edge_list::write_edge_list(Path::new(&filename), &best.edges())
        .with_context(|| format!("writing result to {filename}"))?;
    info!(graph = %best, path = %filename, "search finished");

    Ok(())
}

fn init_tracing(cli: &Cli) -> anyhow::Result<()> {
    let default_level = if cli.verbose {
        "graph_golf=trace"
    } else if cli.debug {
        "graph_golf=debug"
    } else {
        "graph_golf=info"
    };

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_span_events(FmtSpan::ENTER | FmtSpan::EXIT)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}
