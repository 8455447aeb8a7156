use std::{
    error::Error as StdError,
    io,
    io::{BufWriter, Write as _},
};

use beerwise::{
    compute_thresholds, ever_local_experts, local_expert_census, local_expert_flags,
    score_knowledge, AvailabilityTimeline, BootstrapOverride, Style,
};
use beerwise_research::{
    ingest::{fold_progress, EventLog},
    rating::RatingDay,
};
use clap::Parser;

/// Daily census of active local experts per style, from a rating log on
/// stdin.
#[derive(Parser)]
struct Args {
    /// Population quantile for the per-style expert thresholds.
    #[arg(long, default_value_t = 0.99)]
    quantile: f64,
    /// Day of the known anomalous bootstrap rows in the source data, if any.
    #[arg(long, requires = "bootstrap_user")]
    bootstrap_day: Option<RatingDay>,
    /// The only user whose counts on the bootstrap day are real.
    #[arg(long, requires = "bootstrap_day")]
    bootstrap_user: Option<String>,
}

fn main() -> Result<(), Box<dyn StdError>> {
    let args = Args::parse();

    let log = EventLog::from_csv(io::stdin().lock())?;
    let bootstrap = match (args.bootstrap_day, &args.bootstrap_user) {
        (Some(day), Some(name)) => Some(BootstrapOverride {
            day: day.to_day(),
            reference_user: log
                .users
                .get(name)
                .ok_or("bootstrap user not present in the rating log")?,
        }),
        _ => None,
    };

    let availability = AvailabilityTimeline::from_events(&log.events)?;
    let progress = fold_progress(&log.events);
    let records = score_knowledge(&progress, &availability);
    let thresholds = compute_thresholds(&records, args.quantile);
    let flags = local_expert_flags(&records, &thresholds);
    let experts = ever_local_experts(&records, &flags);
    let census = local_expert_census(&progress, &availability, &experts, bootstrap.as_ref());

    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(
        stdout,
        "day,{}",
        Style::ALL.map(|style| style.name()).join(",")
    )?;
    for (day, row) in census.iter() {
        write!(stdout, "{}", RatingDay::from_day(day))?;
        for (_, count) in row.iter() {
            write!(stdout, ",{}", count)?;
        }
        writeln!(stdout)?;
    }

    Ok(())
}
