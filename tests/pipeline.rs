use beerwise::{
    analyse_relationships, compute_thresholds, ever_global_experts, ever_local_experts,
    global_expert_census, local_expert_census, local_expert_flags, preference_graph,
    score_knowledge, AvailabilityTimeline, BeerIds, ByStyle, Day, EdgeFilter, ProgressRecord,
    RatingEvent, Style, UserIds,
};
use rustc_hash::FxHashMap;

struct Log {
    users: UserIds,
    beers: BeerIds,
    events: Vec<RatingEvent>,
}

fn fixture() -> Log {
    let mut users = UserIds::default();
    let mut beers = BeerIds::default();
    let mut events = Vec::new();
    for (user, beer, day, style, rating) in [
        ("ann", "i1", 1, Style::IndiaPaleAle, 4.0),
        ("ann", "i2", 2, Style::IndiaPaleAle, 4.5),
        ("ann", "s1", 3, Style::Stout, 3.0),
        ("ann", "i3", 4, Style::IndiaPaleAle, 4.0),
        ("ben", "i1", 2, Style::IndiaPaleAle, 3.5),
        ("ben", "s1", 4, Style::Stout, 4.0),
        ("cal", "s2", 1, Style::Stout, 2.0),
    ] {
        events.push(RatingEvent {
            user: users.get_or_insert(user.to_string()),
            beer: beers.get_or_insert(beer.to_string()),
            day: Day(day),
            style,
            rating,
        });
    }
    Log {
        users,
        beers,
        events,
    }
}

/// Cumulative per-user progress, one record per event, as the ingestion
/// layer would emit it.
fn fold_progress(log: &Log) -> Vec<ProgressRecord> {
    let mut order: Vec<&RatingEvent> = log.events.iter().collect();
    order.sort_by_key(|event| event.day);

    let mut counts: FxHashMap<beerwise::UserId, ByStyle<u32>> = FxHashMap::default();
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

#[test]
fn expertise_pipeline_end_to_end() {
    let log = fixture();
    let ann = log.users.get("ann").unwrap();
    let cal = log.users.get("cal").unwrap();

    let availability = AvailabilityTimeline::from_events(&log.events).unwrap();
    let ipa: Vec<u32> = availability
        .iter()
        .map(|(_, counts)| *counts.get(Style::IndiaPaleAle))
        .collect();
    assert_eq!(ipa, [1, 2, 2, 3]);

    let progress = fold_progress(&log);
    let records = score_knowledge(&progress, &availability);
    assert_eq!(records.len(), log.events.len());

    let thresholds = compute_thresholds(&records, 0.5);
    let flags = local_expert_flags(&records, &thresholds);

    // Personal bests per style: ann 1.0 / ben (1/2)^(1/3) in IPA, cal 1.0 /
    // ann and ben (1/2)^(1/3) in Stout. At the median threshold only the
    // style leaders strictly exceed it.
    let experts = ever_local_experts(&records, &flags);
    assert_eq!(experts, vec![ann, cal]);

    let census = local_expert_census(&progress, &availability, &experts, None);
    assert_eq!(census.iter().count(), 4);
    let ipa_experts: Vec<u32> = census
        .iter()
        .map(|(_, row)| *row.get(Style::IndiaPaleAle))
        .collect();
    let stout_experts: Vec<u32> = census
        .iter()
        .map(|(_, row)| *row.get(Style::Stout))
        .collect();
    // Ann keeps pace with every IPA introduction; cal owns the only stout
    // until day 3 doubles the population.
    assert_eq!(ipa_experts, [1, 1, 1, 1]);
    assert_eq!(stout_experts, [1, 1, 0, 0]);

    let global_threshold = thresholds.global.unwrap();
    let global_experts = ever_global_experts(&records, &thresholds);
    assert!(!global_experts.is_empty());
    let global_census =
        global_expert_census(&records, &availability, &global_experts, global_threshold);
    assert_eq!(global_census.iter().count(), 4);
    for (_, count) in global_census.iter() {
        assert!(count as usize <= global_experts.len());
    }
}

#[test]
fn preference_pipeline_end_to_end() {
    let log = fixture();
    let ann = log.users.get("ann").unwrap();
    let ben = log.users.get("ben").unwrap();
    let cal = log.users.get("cal").unwrap();

    let mut dominant = FxHashMap::default();
    dominant.insert(ann, Style::IndiaPaleAle);
    dominant.insert(ben, Style::IndiaPaleAle);
    dominant.insert(cal, Style::Stout);

    let relations = analyse_relationships(&log.events, &dominant);
    assert_eq!(relations.len(), 3);

    // The IPA group's six ratings average 23/6; its stout ratings average
    // 3.5, a deviation of -1/3.
    let ipa_to_stout = relations
        .iter()
        .find(|r| r.group == Style::IndiaPaleAle && r.target == Style::Stout)
        .unwrap();
    assert_eq!(ipa_to_stout.sample_count, 2);
    assert!((ipa_to_stout.mean_deviation - (3.5 - 23.0 / 6.0)).abs() < 1e-12);

    // Nothing survives the production thresholds on a log this small.
    let graph = preference_graph(&relations, &EdgeFilter::default());
    assert_eq!(graph.edge_count(), 0);

    let relaxed = EdgeFilter {
        min_samples: 1,
        min_effect: 0.25,
    };
    let graph = preference_graph(&relations, &relaxed);
    assert_eq!(graph.edge_count(), 1);
    let edge = graph.edge_weights().next().unwrap();
    assert_eq!(edge.weight, 2);
    assert!(edge.rating < 0.0);
}
