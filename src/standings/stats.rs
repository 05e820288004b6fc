use std::collections::HashMap;

use serde::Serialize;

use crate::model::{Entrant, ResultRecord};
use crate::records::RecordFilter;

/// How team records are counted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TeamStatMode {
    /// 1 for every matching result
    Stats,
    /// 1 for every race where any seat matched
    Races,
    /// 1 for every race where at least two seats matched
    Doubles,
}

/// A record count (or streak, or comeback total) for one entrant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatEntry {
    pub entrant: Entrant,
    pub value: i64,
    pub team_summary: Option<String>,
}

/// A record count for one entrant in one season.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SeasonStatEntry {
    pub entrant: Entrant,
    pub year: i32,
    pub value: i64,
    pub team_summary: Option<String>,
}

pub fn count_matching<'a, I>(results: I, filter: &RecordFilter) -> u32
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    results.into_iter().filter(|r| filter.matches(r)).count() as u32
}

/// Races in which at least `min_matches` results matched.
pub fn races_matching<'a, I>(results: I, filter: &RecordFilter, min_matches: usize) -> u32
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    let mut per_race: HashMap<u64, usize> = HashMap::new();
    for result in results.into_iter().filter(|r| filter.matches(r)) {
        *per_race.entry(result.race.id).or_insert(0) += 1;
    }
    per_race.values().filter(|&&n| n >= min_matches).count() as u32
}

pub fn team_stat<'a, I>(results: I, filter: &RecordFilter, mode: TeamStatMode) -> u32
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    match mode {
        TeamStatMode::Stats => count_matching(results, filter),
        TeamStatMode::Races => races_matching(results, filter, 1),
        TeamStatMode::Doubles => races_matching(results, filter, 2),
    }
}

/// Positions gained from the grid, summed over the results matching `filter`.
pub fn comeback_gain<'a, I>(results: I, filter: &RecordFilter) -> i64
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    results
        .into_iter()
        .filter(|r| filter.matches(r))
        .filter_map(|r| match (r.qualifying, r.finish) {
            (Some(q), Some(f)) => Some(i64::from(q) - i64::from(f)),
            _ => None,
        })
        .sum()
}

/// Value descending, then entrant id.
pub fn order_stats(entries: &mut [StatEntry]) {
    entries.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.entrant.id.cmp(&b.entrant.id))
    });
}

/// Value descending, then season year, then entrant id.
pub fn order_season_stats(entries: &mut [SeasonStatEntry]) {
    entries.sort_by(|a, b| {
        b.value
            .cmp(&a.value)
            .then_with(|| a.year.cmp(&b.year))
            .then_with(|| a.entrant.id.cmp(&b.entrant.id))
    });
}
