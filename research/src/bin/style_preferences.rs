use std::{
    error::Error as StdError,
    io,
    io::{BufWriter, Write as _},
};

use beerwise::{analyse_relationships, preference_graph, EdgeFilter};
use beerwise_research::ingest::{dominant_styles, EventLog};
use clap::Parser;
use petgraph::visit::EdgeRef;

/// Directed style-preference edges, from a rating log on stdin.
#[derive(Parser)]
struct Args {
    /// Minimum number of ratings behind a relation (strict).
    #[arg(long, default_value_t = 200)]
    min_samples: u64,
    /// Minimum absolute mean deviation of a relation (strict).
    #[arg(long, default_value_t = 0.25)]
    min_effect: f64,
}

fn main() -> Result<(), Box<dyn StdError>> {
    let args = Args::parse();

    let log = EventLog::from_csv(io::stdin().lock())?;
    let dominant = dominant_styles(&log.events);
    let relations = analyse_relationships(&log.events, &dominant);
    let filter = EdgeFilter {
        min_samples: args.min_samples,
        min_effect: args.min_effect,
    };
    let graph = preference_graph(&relations, &filter);

    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(stdout, "source,target,weight,rating")?;
    for edge in graph.edge_references() {
        writeln!(
            stdout,
            "{},{},{},{}",
            graph[edge.source()],
            graph[edge.target()],
            edge.weight().weight,
            edge.weight().rating,
        )?;
    }

    Ok(())
}
