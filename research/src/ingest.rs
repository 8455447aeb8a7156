use beerwise::{BeerIds, ByStyle, ProgressRecord, RatingEvent, Style, UserId, UserIds};
use rustc_hash::FxHashMap;

use crate::rating::RawRating;

/// An interned rating log: raw string identifiers live here, the pipeline
/// only ever sees dense ids.
#[derive(Default)]
pub struct EventLog {
    pub users: UserIds,
    pub beers: BeerIds,
    pub events: Vec<RatingEvent>,
}

impl EventLog {
    pub fn push(&mut self, raw: RawRating) {
        let user = self.users.get_or_insert(raw.user_id);
        let beer = self.beers.get_or_insert(raw.beer_id);
        self.events.push(RatingEvent {
            user,
            beer,
            day: raw.day.to_day(),
            style: raw.style,
            rating: raw.rating,
        });
    }

    /// Read a whole headerless CSV rating log.
    pub fn from_csv<R: std::io::Read>(reader: R) -> Result<EventLog, csv::Error> {
        let mut log = EventLog::default();
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(reader);
        for raw in reader.deserialize() {
            log.push(raw?);
        }
        Ok(log)
    }
}

/// Fold events into the cumulative per-user progress table the scorer
/// consumes: one record per event, counts accumulated in day order.
pub fn fold_progress(events: &[RatingEvent]) -> Vec<ProgressRecord> {
    let mut order: Vec<&RatingEvent> = events.iter().collect();
    order.sort_by_key(|event| event.day);

    let mut counts: FxHashMap<UserId, ByStyle<u32>> = FxHashMap::default();
    order
        .into_iter()
        .map(|event| {
            let user_counts = counts.entry(event.user).or_default();
            *user_counts.get_mut(event.style) += 1;
            ProgressRecord {
                user: event.user,
                day: event.day,
                last_beer: event.beer,
                counts: user_counts.clone(),
            }
        })
        .collect()
}

/// Each user's most-rated style, ties broken by canonical style order.
pub fn dominant_styles(events: &[RatingEvent]) -> FxHashMap<UserId, Style> {
    let mut counts: FxHashMap<UserId, ByStyle<u32>> = FxHashMap::default();
    for event in events {
        *counts.entry(event.user).or_default().get_mut(event.style) += 1;
    }

    counts
        .into_iter()
        .map(|(user, counts)| {
            let mut dominant = Style::ALL[0];
            let mut best = 0;
            for (style, &count) in counts.iter() {
                if count > best {
                    dominant = style;
                    best = count;
                }
            }
            (user, dominant)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rating::RatingDay;

    fn raw(user: &str, beer: &str, day: &str, style: Style, rating: f64) -> RawRating {
        RawRating {
            user_id: user.to_string(),
            beer_id: beer.to_string(),
            day: day.parse::<RatingDay>().unwrap(),
            style,
            rating,
        }
    }

    #[test]
    fn csv_log_is_interned() {
        let data = "\
ann,407,2002-01-03,India Pale Ale,4.5
ben,407,2002-01-04,India Pale Ale,3.0
ann,12,2002-01-04,Stout,4.0
";
        let log = EventLog::from_csv(data.as_bytes()).unwrap();
        assert_eq!(log.events.len(), 3);
        assert_eq!(log.users.len(), 2);
        assert_eq!(log.beers.len(), 2);
        assert_eq!(log.events[0].beer, log.events[1].beer);
        assert_eq!(log.events[1].day - log.events[0].day, beerwise::Days(1));
    }

    #[test]
    fn unknown_style_fails_the_run() {
        let data = "ann,407,2002-01-03,Milk Stout,4.5\n";
        assert!(EventLog::from_csv(data.as_bytes()).is_err());
    }

    #[test]
    fn progress_counts_accumulate_in_day_order() {
        let mut log = EventLog::default();
        // Deliberately out of day order.
        log.push(raw("ann", "b2", "2002-01-05", Style::Stout, 4.0));
        log.push(raw("ann", "b1", "2002-01-03", Style::IndiaPaleAle, 4.5));
        log.push(raw("ann", "b3", "2002-01-05", Style::Stout, 3.5));

        let progress = fold_progress(&log.events);
        assert_eq!(progress.len(), 3);
        assert_eq!(*progress[0].counts.get(Style::IndiaPaleAle), 1);
        assert_eq!(*progress[0].counts.get(Style::Stout), 0);
        assert_eq!(*progress[1].counts.get(Style::Stout), 1);
        assert_eq!(*progress[2].counts.get(Style::Stout), 2);
        for record in &progress {
            assert_eq!(record.user, log.events[0].user);
        }
    }

    #[test]
    fn dominant_style_is_the_most_rated() {
        let mut log = EventLog::default();
        log.push(raw("ann", "b1", "2002-01-03", Style::Stout, 4.0));
        log.push(raw("ann", "b2", "2002-01-04", Style::Stout, 4.0));
        log.push(raw("ann", "b3", "2002-01-05", Style::Porter, 4.0));
        // A perfect tie resolves to the canonical order.
        log.push(raw("ben", "b1", "2002-01-03", Style::Stout, 3.0));
        log.push(raw("ben", "b4", "2002-01-04", Style::Bock, 3.0));

        let ann = log.users.get("ann").unwrap();
        let ben = log.users.get("ben").unwrap();
        let dominant = dominant_styles(&log.events);
        assert_eq!(dominant[&ann], Style::Stout);
        assert_eq!(dominant[&ben], Style::Bock);
    }
}
