#![no_main]

use arbitrary::Arbitrary;
use beerwise::{
    score_knowledge, AvailabilityTimeline, BeerIds, ByStyle, Day, ProgressRecord, RatingEvent,
    Style, UserIds,
};
use libfuzzer_sys::fuzz_target;
use rustc_hash::FxHashMap;

#[derive(Arbitrary, Debug)]
struct ArbitraryEvent {
    user: u8,
    beer: u8,
    day: u8,
    style: u8,
}

fuzz_target!(|raw_events: Vec<ArbitraryEvent>| {
    let mut users = UserIds::default();
    let mut beers = BeerIds::default();

    let events: Vec<RatingEvent> = raw_events
        .iter()
        .map(|raw| RatingEvent {
            user: users.get_or_insert(format!("u{}", raw.user)),
            beer: beers.get_or_insert(format!("b{}", raw.beer)),
            day: Day(i64::from(raw.day)),
            style: Style::ALL[usize::from(raw.style) % Style::COUNT],
            rating: 3.5,
        })
        .collect();

    let Ok(availability) = AvailabilityTimeline::from_events(&events) else {
        return;
    };

    // Availability stays monotonic and dense no matter the log shape.
    let mut previous = ByStyle::<u32>::default();
    let mut days = 0;
    for (_, counts) in availability.iter() {
        for (style, &count) in counts.iter() {
            assert!(count >= *previous.get(style));
        }
        previous = counts.clone();
        days += 1;
    }
    assert_eq!(
        i64::from(availability.end() - availability.start()) + 1,
        days
    );

    let mut order: Vec<&RatingEvent> = events.iter().collect();
    order.sort_by_key(|event| event.day);
    let mut counts: FxHashMap<beerwise::UserId, ByStyle<u32>> = FxHashMap::default();
    let progress: Vec<ProgressRecord> = order
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
        .collect();

    for record in score_knowledge(&progress, &availability) {
        assert!(record.global_knowledge.is_finite());
        assert!(record.global_knowledge >= 0.0);
        assert!(record.mean_beer_tried >= 0.0);
        if let Some(local) = record.local_knowledge {
            assert!(local.is_finite());
            assert!(local >= 0.0);
        }
        if record.style_tried == 0 {
            assert_eq!(record.mean_beer_tried, 0.0);
            assert_eq!(record.global_knowledge, 0.0);
        }
    }
});
