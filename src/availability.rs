use rustc_hash::FxHashMap;

use crate::{
    day::Day,
    error::PipelineError,
    event::{BeerId, RatingEvent},
    style::{ByStyle, Style},
};

/// Cumulative count of distinct beers ever seen per style, one row per
/// calendar day over the full `[min_day, max_day]` range of the event log.
///
/// Dense by construction: days without introductions carry the previous
/// day's counts forward, so per-style counts never reset or decrease.
#[derive(Debug, Clone)]
pub struct AvailabilityTimeline {
    start: Day,
    days: Vec<ByStyle<u32>>,
}

impl AvailabilityTimeline {
    /// Build the timeline from a raw event log.
    ///
    /// A beer is introduced on the earliest day it is ever rated; later
    /// ratings of the same beer do not count again.
    pub fn from_events(events: &[RatingEvent]) -> Result<AvailabilityTimeline, PipelineError> {
        let mut first_seen: FxHashMap<(Style, BeerId), Day> = FxHashMap::default();
        let mut min_day = Day(i64::MAX);
        let mut max_day = Day(i64::MIN);

        for event in events {
            min_day = min_day.min(event.day);
            max_day = max_day.max(event.day);
            first_seen
                .entry((event.style, event.beer))
                .and_modify(|day| *day = (*day).min(event.day))
                .or_insert(event.day);
        }

        if events.is_empty() {
            return Err(PipelineError::EmptyLog);
        }
        if min_day == max_day {
            return Err(PipelineError::TooFewDays);
        }

        let span = (max_day - min_day).0 as usize + 1;
        let mut introduced: Vec<ByStyle<u32>> = vec![ByStyle::default(); span];
        for ((style, _), day) in first_seen {
            *introduced[(day - min_day).0 as usize].get_mut(style) += 1;
        }

        // Running cumulative sum doubles as the carry-forward fill.
        let mut days = introduced;
        for i in 1..days.len() {
            let previous = days[i - 1].clone();
            for (style, &carried) in previous.iter() {
                *days[i].get_mut(style) += carried;
            }
        }

        Ok(AvailabilityTimeline {
            start: min_day,
            days,
        })
    }

    pub fn start(&self) -> Day {
        self.start
    }

    pub fn end(&self) -> Day {
        self.start + crate::day::Days(self.days.len() as i64 - 1)
    }

    /// Cumulative counts on `day`.
    ///
    /// Days before the start of the log have no availability; days past the
    /// end carry the final counts forward, matching the fill semantics used
    /// when user days are joined against the timeline.
    pub fn on(&self, day: Day) -> ByStyle<u32> {
        if day < self.start {
            return ByStyle::default();
        }
        let index = ((day - self.start).0 as usize).min(self.days.len() - 1);
        self.days[index].clone()
    }

    /// Mean cumulative availability across all styles on `day`.
    pub fn mean_beers(&self, day: Day) -> f64 {
        let counts = self.on(day);
        counts.values().iter().map(|&c| c as f64).sum::<f64>() / Style::COUNT as f64
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &ByStyle<u32>)> {
        self.start
            .range_inclusive(self.end())
            .zip(self.days.iter())
    }
}
