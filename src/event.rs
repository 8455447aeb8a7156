use rustc_hash::FxHashMap;

use crate::{day::Day, style::Style, user::UserId};

/// Dense index for an interned beer.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct BeerId(usize);

impl BeerId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// Interns raw beer identifiers into dense [`BeerId`]s.
#[derive(Default)]
pub struct BeerIds {
    inner: FxHashMap<Box<str>, BeerId>,
}

impl BeerIds {
    pub fn get_or_insert(&mut self, name: String) -> BeerId {
        let next_id = BeerId(self.inner.len());
        *self.inner.entry(name.into_boxed_str()).or_insert(next_id)
    }

    pub fn get(&self, name: &str) -> Option<BeerId> {
        self.inner.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

/// A single rating: one user rated one beer of one style on one day.
///
/// Multiple events per user per day are expected.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct RatingEvent {
    pub user: UserId,
    pub beer: BeerId,
    pub day: Day,
    pub style: Style,
    pub rating: f64,
}
