use std::collections::HashMap;

use super::filter::{Comparator, Condition, FlagField, PositionField, RecordFilter};
use crate::error::EngineError;

fn position(field: PositionField, op: Comparator, value: u32) -> Condition {
    Condition::Position { field, op, value }
}

fn finish_between(low: u32, high: u32) -> Vec<Condition> {
    vec![
        position(PositionField::Finish, Comparator::Gte, low),
        position(PositionField::Finish, Comparator::Lte, high),
    ]
}

fn flag(field: FlagField, value: bool) -> Condition {
    Condition::Flag { field, value }
}

/// Records available without any configuration.
pub fn builtin_filters() -> Vec<RecordFilter> {
    use Comparator::{Eq, Gte, Lte};
    use PositionField::{Finish, Qualifying};

    vec![
        RecordFilter::new("POLE", "Pole", vec![position(Qualifying, Eq, 1)], false),
        RecordFilter::new(
            "FIRST-ROW",
            "First row",
            vec![position(Qualifying, Gte, 1), position(Qualifying, Lte, 2)],
            false,
        ),
        RecordFilter::new(
            "COMEBACK-TO-TEN",
            "Comeback to 10 firsts",
            vec![
                position(Qualifying, Gte, 11),
                position(Finish, Gte, 1),
                position(Finish, Lte, 10),
            ],
            false,
        ),
        RecordFilter::new("WIN", "Win", vec![position(Finish, Eq, 1)], false),
        RecordFilter::new(
            "POLE-WIN",
            "Pole and Win",
            vec![position(Qualifying, Eq, 1), position(Finish, Eq, 1)],
            false,
        ),
        RecordFilter::new(
            "POLE-WIN-FL",
            "Pole, Win, Fastest lap",
            vec![
                position(Qualifying, Eq, 1),
                position(Finish, Eq, 1),
                flag(FlagField::FastestLap, true),
            ],
            false,
        ),
        RecordFilter::new(
            "FASTEST",
            "Fastest lap",
            vec![flag(FlagField::FastestLap, true)],
            false,
        ),
        RecordFilter::new("FIRST-TWO", "Finish 1st or 2nd", finish_between(1, 2), true),
        RecordFilter::new("PODIUM", "Podium", finish_between(1, 3), true),
        RecordFilter::new("OUT", "OUT", vec![flag(FlagField::Retired, true)], true),
        RecordFilter::new(
            "CHECKERED-FLAG",
            "Checkered Flag",
            vec![flag(FlagField::Retired, false)],
            true,
        ),
        RecordFilter::new("TOP5", "Top 5", finish_between(1, 5), true),
        RecordFilter::new("TOP10", "Top 10", finish_between(1, 10), true),
    ]
}

/// Named record filters, in registration order.
#[derive(Debug, Clone, Default)]
pub struct RecordFilterCatalog {
    filters: Vec<RecordFilter>,
    index: HashMap<String, usize>,
}

impl RecordFilterCatalog {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        let mut catalog = Self::empty();
        for filter in builtin_filters() {
            catalog.insert(filter);
        }
        catalog
    }

    /// Add a filter; codes must be unique across built-in and configured filters.
    pub fn register(&mut self, filter: RecordFilter) -> Result<(), EngineError> {
        if self.index.contains_key(&filter.code) {
            return Err(EngineError::DuplicateFilter(filter.code));
        }
        tracing::debug!(code = %filter.code, "registered record filter");
        self.insert(filter);
        Ok(())
    }

    fn insert(&mut self, filter: RecordFilter) {
        self.index.insert(filter.code.clone(), self.filters.len());
        self.filters.push(filter);
    }

    pub fn get(&self, code: &str) -> Result<&RecordFilter, EngineError> {
        self.index
            .get(code)
            .map(|&i| &self.filters[i])
            .ok_or_else(|| EngineError::UnknownFilterCode(code.to_string()))
    }

    pub fn codes(&self) -> Vec<&str> {
        self.filters.iter().map(|f| f.code.as_str()).collect()
    }

    /// Filters usable for race-level team streaks and doubles counts.
    pub fn team_doubles(&self) -> impl Iterator<Item = &RecordFilter> {
        self.filters.iter().filter(|f| f.team_doubles_filter)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecordFilter> {
        self.filters.iter()
    }

    pub fn len(&self) -> usize {
        self.filters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
