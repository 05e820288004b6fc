use std::cmp::Ordering;
use std::collections::HashMap;

use serde::Serialize;

use super::olympic::{position_counts, positions_key};
use super::EntrantResults;
use crate::model::{Entrant, EntrantKind, ResultRecord};
use crate::punctuation::{PunctuationScheme, ScoringCalculator};

/// One row of a points table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StandingEntry {
    pub entrant: Entrant,
    pub points: f64,
    /// Olympic key, compared when points are level
    pub tie_break: String,
    /// Teams a driver raced for, in order of first appearance
    pub team_summary: Option<String>,
}

/// Sum of points over `results`.
///
/// With a round cap only the `cap` best rounds count. A round's value is the
/// sum of every result the entrant has in that race, so a team's round is
/// worth what all of its seats scored there.
pub fn entrant_points<F>(results: &[&ResultRecord], score: F, round_cap: Option<usize>) -> f64
where
    F: Fn(&ResultRecord) -> f64,
{
    let Some(cap) = round_cap else {
        return results.iter().map(|r| score(*r)).sum();
    };

    let mut rounds: Vec<f64> = Vec::new();
    let mut slot_by_race: HashMap<u64, usize> = HashMap::new();
    for result in results {
        let value = score(*result);
        match slot_by_race.get(&result.race.id) {
            Some(&slot) => rounds[slot] += value,
            None => {
                slot_by_race.insert(result.race.id, rounds.len());
                rounds.push(value);
            }
        }
    }
    rounds.sort_by(|a, b| b.total_cmp(a));
    rounds.iter().take(cap).sum()
}

/// Teams a driver raced for, joined with ", ". Teams get no summary.
pub fn team_summary(entrant: &Entrant, results: &[&ResultRecord]) -> Option<String> {
    if entrant.kind != EntrantKind::Driver {
        return None;
    }
    let mut teams: Vec<&str> = Vec::new();
    for result in results {
        let name = result.seat.team.name.as_str();
        if !teams.contains(&name) {
            teams.push(name);
        }
    }
    if teams.is_empty() {
        None
    } else {
        Some(teams.join(", "))
    }
}

/// Points table for every entrant, scoring each result with `score`.
pub fn standings_by<F>(
    rows: &[EntrantResults<'_>],
    score: F,
    round_cap: Option<usize>,
) -> Vec<StandingEntry>
where
    F: Fn(&ResultRecord) -> f64,
{
    let mut entries: Vec<StandingEntry> = rows
        .iter()
        .map(|row| StandingEntry {
            entrant: row.entrant.clone(),
            points: entrant_points(&row.results, &score, round_cap),
            tie_break: positions_key(&position_counts(row.results.iter().copied())),
            team_summary: team_summary(&row.entrant, &row.results),
        })
        .collect();
    order_standings(&mut entries);
    entries
}

/// Points table with every result scored under one scheme.
pub fn standings(
    rows: &[EntrantResults<'_>],
    scheme: Option<&PunctuationScheme>,
    round_cap: Option<usize>,
) -> Vec<StandingEntry> {
    let calculator = ScoringCalculator::new(scheme);
    standings_by(rows, |r| calculator.total(r), round_cap)
}

/// Points descending, then olympic key descending, then entrant id.
pub fn order_standings(entries: &mut [StandingEntry]) {
    entries.sort_by(|a, b| {
        let points_cmp = b.points.partial_cmp(&a.points).unwrap_or(Ordering::Equal);
        if points_cmp != Ordering::Equal {
            return points_cmp;
        }
        b.tie_break
            .cmp(&a.tie_break)
            .then_with(|| a.entrant.id.cmp(&b.entrant.id))
    });
}
