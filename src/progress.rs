use crate::{day::Day, event::BeerId, style::ByStyle, user::UserId};

/// Cumulative per-style rating counts of one user as of one day.
///
/// Produced by the ingestion layer, one record per rating event, so a user
/// active on a day appears with at least one record for that day. Counts are
/// cumulative over the user's whole history and therefore non-decreasing;
/// same-day duplicates are merged downstream by elementwise max.
#[derive(Debug, Clone, PartialEq)]
pub struct ProgressRecord {
    pub user: UserId,
    pub day: Day,
    /// The beer whose rating produced this snapshot.
    pub last_beer: BeerId,
    pub counts: ByStyle<u32>,
}
