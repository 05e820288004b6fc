use serde::Serialize;

use super::EntrantResults;
use crate::model::{Entrant, ResultRecord};

/// Finish positions counted by the olympic table.
pub const OLYMPIC_POSITIONS: usize = 20;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OlympicEntry {
    pub entrant: Entrant,
    /// Zero-padded counts of 1st..20th places, comparable as a string
    pub key: String,
    pub positions: [u32; OLYMPIC_POSITIONS],
}

/// How many times each of the first 20 finish positions was reached.
pub fn position_counts<'a, I>(results: I) -> [u32; OLYMPIC_POSITIONS]
where
    I: IntoIterator<Item = &'a ResultRecord>,
{
    let mut counts = [0u32; OLYMPIC_POSITIONS];
    for finish in results.into_iter().filter_map(|r| r.finish) {
        let index = finish as usize;
        if (1..=OLYMPIC_POSITIONS).contains(&index) {
            counts[index - 1] += 1;
        }
    }
    counts
}

/// Each count padded to three digits, 1st place first: `[2, 0, 1]` -> "002000001".
pub fn positions_key(counts: &[u32]) -> String {
    counts.iter().map(|c| format!("{:03}", c)).collect()
}

/// Entrants ordered by wins, then 2nd places, and so on down to 20th.
pub fn olympic_rank(rows: &[EntrantResults<'_>]) -> Vec<OlympicEntry> {
    let mut entries: Vec<OlympicEntry> = rows
        .iter()
        .map(|row| {
            let positions = position_counts(row.results.iter().copied());
            OlympicEntry {
                entrant: row.entrant.clone(),
                key: positions_key(&positions),
                positions,
            }
        })
        .collect();
    entries.sort_by(|a, b| {
        b.key
            .cmp(&a.key)
            .then_with(|| a.entrant.id.cmp(&b.entrant.id))
    });
    entries
}
