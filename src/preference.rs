use petgraph::graph::{DiGraph, NodeIndex};
use rustc_hash::FxHashMap;

use crate::{event::RatingEvent, style::Style, user::UserId};

/// Deviation statistics of one (dominant-style group, target style) pair:
/// how raters whose dominant style is `group` rate beers of `target`,
/// relative to the group's own mean rating.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleRelation {
    pub group: Style,
    pub target: Style,
    pub mean_deviation: f64,
    /// Sample standard deviation of the deviations; `None` below two
    /// samples.
    pub std_deviation: Option<f64>,
    pub sample_count: u64,
}

/// Thresholds an edge must pass to enter the preference graph. Both are
/// strict.
#[derive(Debug, Copy, Clone)]
pub struct EdgeFilter {
    pub min_samples: u64,
    pub min_effect: f64,
}

impl Default for EdgeFilter {
    fn default() -> EdgeFilter {
        EdgeFilter {
            min_samples: 200,
            min_effect: 0.25,
        }
    }
}

/// Attributes of a retained preference edge.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PreferenceEdge {
    /// Number of ratings behind the relation.
    pub weight: u64,
    /// Mean rating deviation of the group for the target style.
    pub rating: f64,
}

#[derive(Default, Copy, Clone)]
struct RunningSum {
    sum: f64,
    sum_squares: f64,
    count: u64,
}

impl RunningSum {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.sum_squares += value * value;
        self.count += 1;
    }

    fn mean(&self) -> f64 {
        self.sum / self.count as f64
    }

    /// Sample standard deviation. Shifting every value by a constant leaves
    /// it unchanged, so it is also the deviation of the deviations.
    fn sample_std(&self) -> Option<f64> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as f64;
        let variance = (self.sum_squares - self.sum * self.sum / n) / (n - 1.0);
        Some(variance.max(0.0).sqrt())
    }
}

/// Deviation statistics for every (group, target) style pair with at least
/// one rating, in canonical style order.
///
/// Events by users without a dominant-style label are ignored.
pub fn analyse_relationships(
    events: &[RatingEvent],
    dominant: &FxHashMap<UserId, Style>,
) -> Vec<StyleRelation> {
    let mut group_ratings: FxHashMap<Style, RunningSum> = FxHashMap::default();
    let mut pair_ratings: FxHashMap<(Style, Style), RunningSum> = FxHashMap::default();

    for event in events {
        let Some(&group) = dominant.get(&event.user) else { continue };
        group_ratings.entry(group).or_default().push(event.rating);
        pair_ratings
            .entry((group, event.style))
            .or_default()
            .push(event.rating);
    }

    let mut relations = Vec::new();
    for group in Style::ALL {
        let Some(baseline) = group_ratings.get(&group) else { continue };
        let group_mean = baseline.mean();
        for target in Style::ALL {
            let Some(ratings) = pair_ratings.get(&(group, target)) else { continue };
            relations.push(StyleRelation {
                group,
                target,
                mean_deviation: ratings.mean() - group_mean,
                std_deviation: ratings.sample_std(),
                sample_count: ratings.count,
            });
        }
    }
    relations
}

/// Materialize the filtered relations as a directed weighted graph.
///
/// Styles appear as nodes only once an edge references them; self-loops are
/// retained when they pass the filter.
pub fn preference_graph(
    relations: &[StyleRelation],
    filter: &EdgeFilter,
) -> DiGraph<Style, PreferenceEdge> {
    let mut graph = DiGraph::new();
    let mut nodes: FxHashMap<Style, NodeIndex> = FxHashMap::default();

    for relation in relations {
        if relation.sample_count <= filter.min_samples
            || relation.mean_deviation.abs() <= filter.min_effect
        {
            continue;
        }
        let source = node(&mut graph, &mut nodes, relation.group);
        let target = node(&mut graph, &mut nodes, relation.target);
        graph.add_edge(
            source,
            target,
            PreferenceEdge {
                weight: relation.sample_count,
                rating: relation.mean_deviation,
            },
        );
    }
    graph
}

fn node(
    graph: &mut DiGraph<Style, PreferenceEdge>,
    nodes: &mut FxHashMap<Style, NodeIndex>,
    style: Style,
) -> NodeIndex {
    match nodes.get(&style) {
        Some(&index) => index,
        None => {
            let index = graph.add_node(style);
            nodes.insert(style, index);
            index
        }
    }
}
