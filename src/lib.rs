//! Longitudinal beer-style expertise scoring and style-preference graphs.
//!
//! Given a log of rating events (who rated what beer, of what style, on
//! what day), the pipeline reconstructs, for every user and calendar day,
//! how broadly and deeply that user had explored each style relative to
//! what was knowable at the time, classifies users as local or global
//! experts via population quantile thresholds, and counts active experts
//! per day. Independently, it derives a directed weighted graph of
//! cross-style rating preferences.
//!
//! ```text
//! events ─┬─ AvailabilityTimeline ──┐
//!         │                         ├─ score_knowledge ─ compute_thresholds ─ censuses
//!         │   progress (upstream) ──┘
//!         └─ analyse_relationships ─ preference_graph
//! ```
//!
//! Everything is a pure batch transformation: each stage consumes immutable
//! tables and produces a new one, and thresholds travel as explicit values.

pub mod availability;
pub mod census;
pub mod day;
pub mod error;
pub mod event;
pub mod expert;
pub mod knowledge;
pub mod preference;
pub mod progress;
pub mod style;
pub mod user;

pub use availability::AvailabilityTimeline;
pub use census::{
    global_expert_census, local_expert_census, BootstrapOverride, GlobalCensus, LocalCensus,
};
pub use day::{Day, DayRange, Days};
pub use error::PipelineError;
pub use event::{BeerId, BeerIds, RatingEvent};
pub use expert::{
    compute_thresholds, ever_global_experts, ever_local_experts, local_expert_flags, quantile,
    ExpertThresholds,
};
pub use knowledge::{score_knowledge, KnowledgeRecord};
pub use preference::{
    analyse_relationships, preference_graph, EdgeFilter, PreferenceEdge, StyleRelation,
};
pub use progress::ProgressRecord;
pub use style::{ByStyle, InvalidStyle, Style};
pub use user::{ByUser, UserId, UserIds};
