use ordered_float::OrderedFloat;
use rustc_hash::FxHashMap;

use crate::{knowledge::KnowledgeRecord, style::ByStyle, user::UserId};

/// Population quantile thresholds, computed once per run and passed
/// explicitly into every downstream stage.
#[derive(Debug, Clone)]
pub struct ExpertThresholds {
    /// Per-style threshold over personal-best local contributions. `None`
    /// where no user ever had a defined contribution for the style.
    pub local: ByStyle<Option<f64>>,
    /// Threshold over personal-best global knowledge.
    pub global: Option<f64>,
}

/// Linearly interpolated quantile of an unsorted sample.
pub fn quantile(values: &[f64], q: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let mut sorted: Vec<OrderedFloat<f64>> = values.iter().copied().map(OrderedFloat).collect();
    sorted.sort_unstable();

    let position = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let below = position.floor() as usize;
    let above = position.ceil() as usize;
    let lower = sorted[below].into_inner();
    let upper = sorted[above].into_inner();
    Some(lower + (upper - lower) * (position - below as f64))
}

/// Compute the per-style and global thresholds at quantile `q` over each
/// user's personal best scores.
pub fn compute_thresholds(records: &[KnowledgeRecord], q: f64) -> ExpertThresholds {
    let mut best_local: FxHashMap<UserId, ByStyle<Option<f64>>> = FxHashMap::default();
    let mut best_global: FxHashMap<UserId, f64> = FxHashMap::default();

    for record in records {
        let local = best_local
            .entry(record.user)
            .or_insert_with(ByStyle::default);
        for (style, &contribution) in record.local.iter() {
            if let Some(contribution) = contribution {
                let best = local.get_mut(style);
                *best = Some(best.map_or(contribution, |b| f64::max(b, contribution)));
            }
        }

        best_global
            .entry(record.user)
            .and_modify(|best| *best = f64::max(*best, record.global_knowledge))
            .or_insert(record.global_knowledge);
    }

    let local = ByStyle::from_fn(|style| {
        let bests: Vec<f64> = best_local
            .values()
            .filter_map(|best| *best.get(style))
            .collect();
        quantile(&bests, q)
    });

    let bests: Vec<f64> = best_global.values().copied().collect();
    let global = quantile(&bests, q);

    ExpertThresholds { local, global }
}

/// Per-record local expert flags, parallel to `records`: a record is an
/// expert in a style iff its contribution strictly exceeds the style's
/// threshold.
pub fn local_expert_flags(
    records: &[KnowledgeRecord],
    thresholds: &ExpertThresholds,
) -> Vec<ByStyle<bool>> {
    records
        .iter()
        .map(|record| {
            record.local.map(|style, &contribution| {
                match (contribution, *thresholds.local.get(style)) {
                    (Some(contribution), Some(threshold)) => contribution > threshold,
                    _ => false,
                }
            })
        })
        .collect()
}

/// Users flagged expert in at least one style on at least one day, in
/// interning order.
pub fn ever_local_experts(records: &[KnowledgeRecord], flags: &[ByStyle<bool>]) -> Vec<UserId> {
    let mut experts: Vec<UserId> = records
        .iter()
        .zip(flags)
        .filter(|(_, flags)| flags.values().iter().any(|&flagged| flagged))
        .map(|(record, _)| record.user)
        .collect();
    experts.sort_unstable();
    experts.dedup();
    experts
}

/// Users whose global knowledge ever met the global threshold, in interning
/// order.
pub fn ever_global_experts(records: &[KnowledgeRecord], thresholds: &ExpertThresholds) -> Vec<UserId> {
    let Some(threshold) = thresholds.global else {
        return Vec::new();
    };
    let mut experts: Vec<UserId> = records
        .iter()
        .filter(|record| record.global_knowledge >= threshold)
        .map(|record| record.user)
        .collect();
    experts.sort_unstable();
    experts.dedup();
    experts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{day::Day, style::Style};

    #[test]
    fn quantile_interpolates_between_order_statistics() {
        let values = [4.0, 1.0, 3.0, 2.0];
        assert_eq!(quantile(&values, 0.0), Some(1.0));
        assert_eq!(quantile(&values, 0.5), Some(2.5));
        assert_eq!(quantile(&values, 1.0), Some(4.0));
        assert_eq!(quantile(&[], 0.5), None);
        assert_eq!(quantile(&[7.0], 0.99), Some(7.0));
    }

    fn record(user: UserId, day: i64, stout: Option<f64>, global: f64) -> KnowledgeRecord {
        let mut local = ByStyle::default();
        *local.get_mut(Style::Stout) = stout;
        KnowledgeRecord {
            user,
            day: Day(day),
            counts: ByStyle::default(),
            style_tried: 1,
            style_tried_share: 1.0 / Style::COUNT as f64,
            mean_beer_tried: 1.0,
            mean_beers: 1.0,
            local,
            local_knowledge: stout,
            global_knowledge: global,
        }
    }

    fn users(n: usize) -> Vec<UserId> {
        let mut ids = crate::user::UserIds::default();
        (0..n).map(|i| ids.get_or_insert(format!("u{i}"))).collect()
    }

    #[test]
    fn thresholds_use_personal_bests() {
        let u = users(2);
        // User 0 peaks at 0.9 across two days; user 1 at 0.5. The median of
        // personal bests is 0.7 even though the record median is lower.
        let records = [
            record(u[0], 1, Some(0.9), 0.0),
            record(u[0], 2, Some(0.1), 0.0),
            record(u[1], 1, Some(0.5), 0.0),
        ];
        let thresholds = compute_thresholds(&records, 0.5);
        let threshold = (*thresholds.local.get(Style::Stout)).unwrap();
        assert!((threshold - 0.7).abs() < 1e-12);
        assert_eq!(*thresholds.local.get(Style::Bock), None);
    }

    #[test]
    fn flagging_is_strict_exceedance() {
        let u = users(3);
        let records = [
            record(u[0], 1, Some(0.2), 0.0),
            record(u[1], 1, Some(0.4), 0.0),
            record(u[2], 1, Some(0.6), 0.0),
        ];
        let thresholds = compute_thresholds(&records, 0.5);
        let flags = local_expert_flags(&records, &thresholds);

        // Threshold is exactly 0.4: equal contributions must not be flagged.
        assert!(!*flags[0].get(Style::Stout));
        assert!(!*flags[1].get(Style::Stout));
        assert!(*flags[2].get(Style::Stout));

        assert_eq!(ever_local_experts(&records, &flags), vec![u[2]]);
    }

    #[test]
    fn global_experts_meet_the_threshold_inclusively() {
        let u = users(2);
        let records = [
            record(u[0], 1, None, 0.8),
            record(u[0], 2, None, 0.2),
            record(u[1], 1, None, 0.4),
        ];
        let thresholds = compute_thresholds(&records, 1.0);
        assert_eq!(thresholds.global, Some(0.8));
        assert_eq!(ever_global_experts(&records, &thresholds), vec![u[0]]);
    }
}
