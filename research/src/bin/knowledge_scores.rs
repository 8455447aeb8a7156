use std::{
    error::Error as StdError,
    io,
    io::{BufWriter, Write as _},
};

use beerwise::{score_knowledge, AvailabilityTimeline};
use beerwise_research::{
    ingest::{fold_progress, EventLog},
    rating::RatingDay,
};

fn main() -> Result<(), Box<dyn StdError>> {
    let log = EventLog::from_csv(io::stdin().lock())?;
    let availability = AvailabilityTimeline::from_events(&log.events)?;
    let progress = fold_progress(&log.events);
    let records = score_knowledge(&progress, &availability);

    let mut stdout = BufWriter::new(io::stdout().lock());
    writeln!(
        stdout,
        "user_id,day,style_tried,style_tried_share,mean_beer_tried,mean_beers,local_knowledge,global_knowledge"
    )?;
    for record in &records {
        writeln!(
            stdout,
            "{},{},{},{},{},{},{},{}",
            log.users.name(record.user),
            RatingDay::from_day(record.day),
            record.style_tried,
            record.style_tried_share,
            record.mean_beer_tried,
            record.mean_beers,
            record
                .local_knowledge
                .map(|score| score.to_string())
                .unwrap_or_default(),
            record.global_knowledge,
        )?;
    }

    Ok(())
}
