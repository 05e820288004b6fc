use std::collections::HashMap;

use crate::model::ResultRecord;
use crate::records::RecordFilter;

/// Counts consecutive races satisfying a record filter.
///
/// Results must be ordered most recent race first. In current mode the scan
/// stops at the first miss; in max mode a miss resets the run and the longest
/// run over the whole history is returned.
#[derive(Debug, Clone, Copy)]
pub struct StreakCalculator<'a> {
    filter: &'a RecordFilter,
    max_streak: bool,
    unique_by_race: bool,
}

impl<'a> StreakCalculator<'a> {
    pub fn new(filter: &'a RecordFilter) -> Self {
        Self {
            filter,
            max_streak: false,
            unique_by_race: false,
        }
    }

    pub fn max_streak(mut self, max_streak: bool) -> Self {
        self.max_streak = max_streak;
        self
    }

    /// Collapse results to one outcome per race: a race counts when any result in it matches.
    pub fn unique_by_race(mut self, unique_by_race: bool) -> Self {
        self.unique_by_race = unique_by_race;
        self
    }

    pub fn run<'r, I>(&self, results: I) -> u32
    where
        I: IntoIterator<Item = &'r ResultRecord>,
    {
        if self.unique_by_race {
            count_run(race_outcomes(results, self.filter), self.max_streak)
        } else {
            count_run(
                results.into_iter().map(|r| self.filter.matches(r)),
                self.max_streak,
            )
        }
    }
}

/// Streak length for results ordered most recent first.
pub fn streak<'r, I>(results: I, filter: &RecordFilter, max_streak: bool, unique_by_race: bool) -> u32
where
    I: IntoIterator<Item = &'r ResultRecord>,
{
    StreakCalculator::new(filter)
        .max_streak(max_streak)
        .unique_by_race(unique_by_race)
        .run(results)
}

fn count_run<I>(outcomes: I, max_streak: bool) -> u32
where
    I: IntoIterator<Item = bool>,
{
    let mut count = 0;
    let mut best = 0;
    for matched in outcomes {
        if !matched {
            if max_streak {
                count = 0;
                continue;
            }
            break;
        }
        count += 1;
        best = best.max(count);
    }
    if max_streak {
        best
    } else {
        count
    }
}

/// One outcome per race, in the order each race first appears.
fn race_outcomes<'r, I>(results: I, filter: &RecordFilter) -> Vec<bool>
where
    I: IntoIterator<Item = &'r ResultRecord>,
{
    let mut outcomes: Vec<bool> = Vec::new();
    let mut slot_by_race: HashMap<u64, usize> = HashMap::new();
    for result in results {
        let matched = filter.matches(result);
        match slot_by_race.get(&result.race.id) {
            Some(&slot) => outcomes[slot] |= matched,
            None => {
                slot_by_race.insert(result.race.id, outcomes.len());
                outcomes.push(matched);
            }
        }
    }
    outcomes
}
