use crate::{
    availability::AvailabilityTimeline,
    day::Day,
    progress::ProgressRecord,
    style::{ByStyle, Style},
    user::UserId,
};

/// A progress record enriched with the knowledge scores derived from it.
#[derive(Debug, Clone)]
pub struct KnowledgeRecord {
    pub user: UserId,
    pub day: Day,
    pub counts: ByStyle<u32>,
    /// Number of styles with at least one rating.
    pub style_tried: u32,
    /// `style_tried` as a share of the full style set.
    pub style_tried_share: f64,
    /// Mean cumulative count across tried styles, 0 when none were tried.
    pub mean_beer_tried: f64,
    /// Population mean availability across all styles on this day.
    pub mean_beers: f64,
    /// Per-style mastery contributions. `None` where the style had no
    /// population availability yet, so no ratio is defined.
    pub local: ByStyle<Option<f64>>,
    /// Best single-style mastery: the maximum defined contribution.
    pub local_knowledge: Option<f64>,
    /// Breadth-weighted mastery across all styles.
    pub global_knowledge: f64,
}

/// Score every progress record against the availability timeline.
///
/// Population availability is taken from the dense timeline, which carries
/// the last known value forward onto any user day without introductions.
pub fn score_knowledge(
    progress: &[ProgressRecord],
    availability: &AvailabilityTimeline,
) -> Vec<KnowledgeRecord> {
    progress
        .iter()
        .map(|record| score_record(record, availability))
        .collect()
}

fn score_record(record: &ProgressRecord, availability: &AvailabilityTimeline) -> KnowledgeRecord {
    let available = availability.on(record.day);

    let style_tried = record.counts.values().iter().filter(|&&c| c > 0).count() as u32;
    let style_tried_share = f64::from(style_tried) / Style::COUNT as f64;

    let total_tried: u32 = record.counts.values().iter().sum();
    let mean_beer_tried = if style_tried == 0 {
        0.0
    } else {
        f64::from(total_tried) / f64::from(style_tried)
    };

    let mean_beers = availability.mean_beers(record.day);
    let damping = (1.0 + mean_beers).ln();
    let global_knowledge = if damping > 0.0 {
        style_tried_share * (1.0 + mean_beer_tried).ln() / damping
    } else {
        0.0
    };

    // Styles nothing has been rated in yet have no population denominator
    // and are excluded from the maximum rather than divided by.
    let local = record.counts.map(|style, &count| {
        let population = *available.get(style);
        if population == 0 {
            None
        } else {
            Some((f64::from(count) / f64::from(population)).cbrt())
        }
    });

    let local_knowledge = local.values().iter().flatten().copied().reduce(f64::max);

    KnowledgeRecord {
        user: record.user,
        day: record.day,
        counts: record.counts.clone(),
        style_tried,
        style_tried_share,
        mean_beer_tried,
        mean_beers,
        local,
        local_knowledge,
        global_knowledge,
    }
}
