use rustc_hash::FxHashMap;

use crate::{
    availability::AvailabilityTimeline, day::Day, knowledge::KnowledgeRecord,
    progress::ProgressRecord, style::ByStyle, user::UserId,
};

/// A one-off correction for the anomalous bootstrap rows at the start of
/// the source data: on `day`, every user except `reference_user` observes an
/// all-zero count vector instead of whatever the log recorded, and those
/// zeros fill forward until the user's next real observation.
#[derive(Debug, Copy, Clone)]
pub struct BootstrapOverride {
    pub day: Day,
    pub reference_user: UserId,
}

/// Daily count of users whose engagement still matches the population
/// benchmark, per style. Dense over the full day range.
#[derive(Debug, Clone)]
pub struct LocalCensus {
    start: Day,
    rows: Vec<ByStyle<u32>>,
}

impl LocalCensus {
    pub fn start(&self) -> Day {
        self.start
    }

    pub fn end(&self) -> Day {
        self.start + crate::day::Days(self.rows.len() as i64 - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, &ByStyle<u32>)> {
        self.start.range_inclusive(self.end()).zip(self.rows.iter())
    }
}

/// Daily count of active global experts. Dense over the full day range.
#[derive(Debug, Clone)]
pub struct GlobalCensus {
    start: Day,
    rows: Vec<u32>,
}

impl GlobalCensus {
    pub fn start(&self) -> Day {
        self.start
    }

    pub fn end(&self) -> Day {
        self.start + crate::day::Days(self.rows.len() as i64 - 1)
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, u32)> + '_ {
        self.start
            .range_inclusive(self.end())
            .zip(self.rows.iter().copied())
    }
}

/// Merge a sparse progress table into per-user, per-day count vectors.
///
/// Same-day duplicates (one record per rating event) collapse by elementwise
/// max, which for cumulative counts is the day's final state.
fn merge_by_user_day(
    progress: &[ProgressRecord],
) -> FxHashMap<UserId, FxHashMap<Day, ByStyle<u32>>> {
    let mut merged: FxHashMap<UserId, FxHashMap<Day, ByStyle<u32>>> = FxHashMap::default();
    for record in progress {
        let by_day = merged.entry(record.user).or_default();
        match by_day.get_mut(&record.day) {
            Some(counts) => {
                for (style, &count) in record.counts.iter() {
                    let slot = counts.get_mut(style);
                    *slot = (*slot).max(count);
                }
            }
            None => {
                by_day.insert(record.day, record.counts.clone());
            }
        }
    }
    merged
}

/// Census of active local experts: for every day in the availability range
/// and every ever-expert user, forward-fill the user's cumulative counts and
/// count, per style, the users whose count still reaches that style's
/// population count for the day.
///
/// Users are walked independently over the dense day axis, so the cartesian
/// (day × user) expansion never materializes.
pub fn local_expert_census(
    progress: &[ProgressRecord],
    availability: &AvailabilityTimeline,
    experts: &[UserId],
    bootstrap: Option<&BootstrapOverride>,
) -> LocalCensus {
    let reference: Vec<ByStyle<u32>> = availability.iter().map(|(_, c)| c.clone()).collect();
    let merged = merge_by_user_day(progress);

    let mut rows = vec![ByStyle::<u32>::default(); reference.len()];
    for &user in experts {
        let by_day = merged.get(&user);
        let mut filled: Option<ByStyle<u32>> = None;

        for (i, day) in availability.start().range_inclusive(availability.end()).enumerate() {
            if let Some(counts) = by_day.and_then(|by_day| by_day.get(&day)) {
                filled = Some(counts.clone());
            }
            if let Some(bootstrap) = bootstrap {
                if day == bootstrap.day && user != bootstrap.reference_user {
                    filled = Some(ByStyle::default());
                }
            }

            let Some(counts) = &filled else { continue };
            for (style, &count) in counts.iter() {
                if count >= *reference[i].get(style) {
                    *rows[i].get_mut(style) += 1;
                }
            }
        }
    }

    LocalCensus {
        start: availability.start(),
        rows,
    }
}

/// Census of active global experts: for every day and every ever-global
/// expert, forward- and backward-fill the breadth and depth inputs,
/// recompute global knowledge against the (forward-filled) population mean,
/// and count users at or above `threshold`.
pub fn global_expert_census(
    records: &[KnowledgeRecord],
    availability: &AvailabilityTimeline,
    experts: &[UserId],
    threshold: f64,
) -> GlobalCensus {
    let span = availability.start().range_inclusive(availability.end()).len();

    // Population mean availability is only observed on days with activity;
    // quiet days carry the last observation forward.
    let mut observed_means: FxHashMap<Day, f64> = FxHashMap::default();
    for record in records {
        observed_means.insert(record.day, record.mean_beers);
    }
    let mut mean_beers: Vec<Option<f64>> = Vec::with_capacity(span);
    let mut last_mean = None;
    for day in availability.start().range_inclusive(availability.end()) {
        if let Some(&mean) = observed_means.get(&day) {
            last_mean = Some(mean);
        }
        mean_beers.push(last_mean);
    }

    // Per user: (style_tried_share, mean_beer_tried) per active day, merged
    // by max (within a day both only grow).
    let mut inputs: FxHashMap<UserId, FxHashMap<Day, (f64, f64)>> = FxHashMap::default();
    for record in records {
        let by_day = inputs.entry(record.user).or_default();
        by_day
            .entry(record.day)
            .and_modify(|(share, tried)| {
                *share = share.max(record.style_tried_share);
                *tried = tried.max(record.mean_beer_tried);
            })
            .or_insert((record.style_tried_share, record.mean_beer_tried));
    }

    let mut rows = vec![0u32; span];
    for &user in experts {
        let Some(by_day) = inputs.get(&user) else { continue };
        let mut observed: Vec<(Day, (f64, f64))> =
            by_day.iter().map(|(&day, &values)| (day, values)).collect();
        observed.sort_unstable_by_key(|&(day, _)| day);

        let mut next = 0;
        let mut current: Option<(f64, f64)> = None;
        for (i, day) in availability.start().range_inclusive(availability.end()).enumerate() {
            while next < observed.len() && observed[next].0 <= day {
                current = Some(observed[next].1);
                next += 1;
            }
            // Backward fill: days before the user's first rating borrow the
            // first observation.
            let (share, tried) = current
                .or_else(|| observed.first().map(|&(_, values)| values))
                .unwrap_or((0.0, 0.0));
            let Some(mean) = mean_beers[i] else { continue };

            let damping = (1.0 + mean).ln();
            let global_knowledge = if damping > 0.0 {
                share * (1.0 + tried).ln() / damping
            } else {
                0.0
            };
            if global_knowledge >= threshold {
                rows[i] += 1;
            }
        }
    }

    GlobalCensus {
        start: availability.start(),
        rows,
    }
}
