//! YAML season files read by the command line tool.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::model::{AlterPunctuation, RaceRef, ResultRecord, Seat};
use crate::standings::Season;

/// A season as exported by the results store.
///
/// Races without results are the pending ones.
///
/// Example YAML:
/// ```yaml
/// competition: F1
/// year: 2021
/// punctuation: F1-25
/// seats:
///   - id: 1
///     driver: { id: 44, name: Lewis Hamilton }
///     team: { id: 1, name: Mercedes }
/// races:
///   - id: 1
///     round: 1
///     date: 2021-03-28
///     results:
///       - { seat: 1, qualifying: 2, finish: 1 }
///   - id: 2
///     round: 2
///     alter_punctuation: half
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct SeasonFile {
    pub competition: String,
    pub year: i32,
    #[serde(default)]
    pub punctuation: Option<String>,
    /// Only the best N rounds count towards the standings
    #[serde(default)]
    pub best_rounds: Option<usize>,
    pub seats: Vec<Seat>,
    #[serde(default)]
    pub races: Vec<RaceEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RaceEntry {
    pub id: u64,
    pub round: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub alter_punctuation: Option<AlterPunctuation>,
    #[serde(default)]
    pub results: Vec<ResultEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ResultEntry {
    pub seat: u64,
    #[serde(default)]
    pub qualifying: Option<u32>,
    #[serde(default)]
    pub finish: Option<u32>,
    #[serde(default)]
    pub fastest_lap: bool,
    #[serde(default)]
    pub retired: bool,
    #[serde(default)]
    pub wildcard: bool,
}

impl SeasonFile {
    /// Resolve seat references and split races into run and pending.
    pub fn into_season(self) -> Result<Season> {
        let mut seats: HashMap<u64, &Seat> = HashMap::new();
        for seat in &self.seats {
            if seats.insert(seat.id, seat).is_some() {
                bail!("seat {} is listed more than once", seat.id);
            }
        }

        let mut results = Vec::new();
        let mut pending = Vec::new();
        let mut race_ids = HashSet::new();

        for race in &self.races {
            if !race_ids.insert(race.id) {
                bail!("race {} (round {}) is listed more than once", race.id, race.round);
            }
            let race_ref = RaceRef {
                id: race.id,
                season_year: self.year,
                round: race.round,
                date: race.date,
                alter_punctuation: race.alter_punctuation,
            };
            if race.results.is_empty() {
                pending.push(race_ref);
                continue;
            }

            let mut seen = HashSet::new();
            for entry in &race.results {
                let Some(seat) = seats.get(&entry.seat) else {
                    bail!("race {} (round {}): unknown seat {}", race.id, race.round, entry.seat);
                };
                if !seen.insert(entry.seat) {
                    bail!(
                        "race {} (round {}): seat {} has more than one result",
                        race.id,
                        race.round,
                        entry.seat
                    );
                }
                if entry.qualifying == Some(0) || entry.finish == Some(0) {
                    bail!(
                        "race {} (round {}): positions start at 1 (seat {})",
                        race.id,
                        race.round,
                        entry.seat
                    );
                }
                results.push(ResultRecord {
                    race: race_ref.clone(),
                    seat: (*seat).clone(),
                    qualifying: entry.qualifying,
                    finish: entry.finish,
                    fastest_lap: entry.fastest_lap,
                    retired: entry.retired,
                    wildcard: entry.wildcard,
                });
            }
        }

        tracing::debug!(
            year = self.year,
            results = results.len(),
            pending = pending.len(),
            "loaded season"
        );

        Ok(Season::new(self.competition, self.year, self.punctuation)
            .with_best_rounds(self.best_rounds)
            .with_seats(self.seats)
            .with_results(results)
            .with_pending_races(pending))
    }
}

pub fn load_season(path: &Path) -> Result<Season> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read season file at {}", path.display()))?;
    let file: SeasonFile = serde_saphyr::from_str(&content)
        .with_context(|| format!("Failed to parse season: invalid YAML in {}", path.display()))?;
    file.into_season()
        .with_context(|| format!("Invalid season in {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EntrantKind;
    use crate::standings::RankScope;
    use std::io::Write;

    const SEASON: &str = r#"
competition: F1
year: 2021
punctuation: F1-25
seats:
  - id: 1
    driver: { id: 44, name: Lewis Hamilton }
    team: { id: 1, name: Mercedes }
  - id: 2
    driver: { id: 33, name: Max Verstappen }
    team: { id: 2, name: Red Bull }
races:
  - id: 2
    round: 2
    alter_punctuation: half
    results:
      - { seat: 2, qualifying: 1, finish: 1 }
      - { seat: 1, qualifying: 2, finish: 2, fastest_lap: true }
  - id: 1
    round: 1
    date: 2021-03-28
    results:
      - { seat: 1, qualifying: 2, finish: 1 }
      - { seat: 2, qualifying: 1, retired: true }
  - id: 3
    round: 3
"#;

    #[test]
    fn test_into_season() {
        let file: SeasonFile = serde_saphyr::from_str(SEASON).unwrap();
        let season = file.into_season().unwrap();
        assert_eq!(season.results().len(), 4);
        assert_eq!(season.results()[0].race.round, 1);
        assert_eq!(season.pending_races().len(), 1);
        assert_eq!(
            season.results()[2].race.alter_punctuation,
            Some(AlterPunctuation::Half)
        );
        assert_eq!(season.entrants(EntrantKind::Team).len(), 2);
    }

    #[test]
    fn test_unknown_seat_rejected() {
        let yaml = SEASON.replace("{ seat: 2, qualifying: 1, finish: 1 }", "{ seat: 9, finish: 1 }");
        let file: SeasonFile = serde_saphyr::from_str(&yaml).unwrap();
        let err = file.into_season().unwrap_err();
        assert!(err.to_string().contains("unknown seat 9"));
    }

    #[test]
    fn test_seat_with_two_results_rejected() {
        let yaml = SEASON.replace("{ seat: 2, qualifying: 1, finish: 1 }", "{ seat: 1, finish: 3 }");
        let file: SeasonFile = serde_saphyr::from_str(&yaml).unwrap();
        assert!(file.into_season().is_err());
    }

    #[test]
    fn test_duplicate_race_id_rejected() {
        let yaml = SEASON.replace("  - id: 3\n    round: 3\n", "  - id: 1\n    round: 3\n");
        let file: SeasonFile = serde_saphyr::from_str(&yaml).unwrap();
        let err = file.into_season().unwrap_err();
        assert!(err.to_string().contains("race 1 (round 3) is listed more than once"));
    }

    #[test]
    fn test_duplicate_seat_id_rejected() {
        let yaml = SEASON.replace("  - id: 2\n    driver: { id: 33", "  - id: 1\n    driver: { id: 33");
        let file: SeasonFile = serde_saphyr::from_str(&yaml).unwrap();
        let err = file.into_season().unwrap_err();
        assert!(err.to_string().contains("seat 1 is listed more than once"));
    }

    #[test]
    fn test_zero_position_rejected() {
        let yaml = SEASON.replace("{ seat: 2, qualifying: 1, finish: 1 }", "{ seat: 2, finish: 0 }");
        let file: SeasonFile = serde_saphyr::from_str(&yaml).unwrap();
        assert!(file.into_season().is_err());
    }

    #[test]
    fn test_load_season_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{}", SEASON).unwrap();
        let season = load_season(file.path()).unwrap();
        assert_eq!(season.year, 2021);
        assert_eq!(season.punctuation.as_deref(), Some("F1-25"));
    }
}
