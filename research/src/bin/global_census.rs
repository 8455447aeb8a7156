use std::{
    error::Error as StdError,
    io,
    io::{BufWriter, Write as _},
};

use beerwise::{
    compute_thresholds, ever_global_experts, global_expert_census, score_knowledge,
    AvailabilityTimeline,
};
use beerwise_research::{
    ingest::{fold_progress, EventLog},
    rating::RatingDay,
};
use clap::Parser;

/// Daily census of active global experts, from a rating log on stdin.
#[derive(Parser)]
struct Args {
    /// Population quantile for the global expert threshold.
    #[arg(long, default_value_t = 0.99)]
    quantile: f64,
}

fn main() -> Result<(), Box<dyn StdError>> {
    let args = Args::parse();

    let log = EventLog::from_csv(io::stdin().lock())?;
    let availability = AvailabilityTimeline::from_events(&log.events)?;
    let progress = fold_progress(&log.events);
    let records = score_knowledge(&progress, &availability);
    let thresholds = compute_thresholds(&records, args.quantile);
    let threshold = thresholds
        .global
        .ok_or("no knowledge records to threshold")?;
    let experts = ever_global_experts(&records, &thresholds);
    let census = global_expert_census(&records, &availability, &experts, threshold);

    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(stdout, "day,active_experts")?;
    for (day, count) in census.iter() {
        writeln!(stdout, "{},{}", RatingDay::from_day(day), count)?;
    }

    Ok(())
}
