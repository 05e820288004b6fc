pub mod contenders;
pub mod olympic;
pub mod points;
pub mod scope;
pub mod stats;

pub use contenders::{leader, runner_up, title_contention, TitleContention};
pub use olympic::{olympic_rank, OlympicEntry};
pub use points::{standings, standings_by, StandingEntry};
pub use scope::{Competition, RankScope, Season};
pub use stats::{SeasonStatEntry, StatEntry, TeamStatMode};

use crate::catalogs::Catalogs;
use crate::error::EngineError;
use std::collections::HashSet;

use crate::model::{Entrant, EntrantKind, RaceRef, ResultRecord};
use crate::punctuation::ScoringCalculator;
use crate::streak::StreakCalculator;

/// Record used by the comeback rank.
pub const COMEBACK_RECORD: &str = "COMEBACK-TO-TEN";

/// An entrant together with its results in scope, oldest race first.
#[derive(Debug, Clone)]
pub struct EntrantResults<'a> {
    pub entrant: Entrant,
    pub results: Vec<&'a ResultRecord>,
}

/// Split `results` among `entrants`. Entrants without results get an empty row.
pub fn group_by_entrant<'a>(
    entrants: Vec<Entrant>,
    results: &[&'a ResultRecord],
) -> Vec<EntrantResults<'a>> {
    entrants
        .into_iter()
        .map(|entrant| {
            let results = results
                .iter()
                .copied()
                .filter(|r| r.seat.belongs_to(&entrant))
                .collect();
            EntrantResults { entrant, results }
        })
        .collect()
}

/// Builds the ranks of one season or competition.
pub struct Ranker<'a, S: RankScope + ?Sized> {
    scope: &'a S,
    catalogs: &'a Catalogs,
    round_limit: Option<u32>,
}

impl<'a, S: RankScope + ?Sized> Ranker<'a, S> {
    pub fn new(scope: &'a S, catalogs: &'a Catalogs) -> Self {
        Self {
            scope,
            catalogs,
            round_limit: None,
        }
    }

    /// Rank as of round `round`: results of later rounds are left out.
    ///
    /// In a competition the limit applies to every season. Title contention
    /// treats the left-out races as still pending.
    pub fn up_to_round(mut self, round: Option<u32>) -> Self {
        self.round_limit = round;
        self
    }

    fn within_limit(&self, result: &ResultRecord) -> bool {
        self.round_limit.map_or(true, |limit| result.race.round <= limit)
    }

    fn results(&self) -> Vec<&'a ResultRecord> {
        self.scope
            .results()
            .into_iter()
            .filter(|r| self.within_limit(r))
            .collect()
    }

    fn rows(&self, kind: EntrantKind) -> Vec<EntrantResults<'a>> {
        group_by_entrant(self.scope.entrants(kind), &self.results())
    }

    /// Points table. `punctuation` overrides the scope's own scheme for every result.
    pub fn points_rank(&self, kind: EntrantKind, punctuation: Option<&str>) -> Vec<StandingEntry> {
        let rows = self.rows(kind);
        let cap = self.scope.best_rounds();
        tracing::debug!(?kind, entrants = rows.len(), ?cap, "building points rank");

        match punctuation {
            Some(code) => standings(&rows, self.catalogs.resolve_scheme(code), cap),
            None => standings_by(
                &rows,
                |result| {
                    let scheme = self
                        .scope
                        .scheme_code(result)
                        .and_then(|code| self.catalogs.punctuation.resolve(code));
                    ScoringCalculator::new(scheme).total(result)
                },
                cap,
            ),
        }
    }

    pub fn olympic_rank(&self, kind: EntrantKind) -> Vec<OlympicEntry> {
        olympic_rank(&self.rows(kind))
    }

    /// Count of results matching `record`. Teams are counted according to `mode`.
    pub fn stats_rank(
        &self,
        kind: EntrantKind,
        record: &str,
        mode: TeamStatMode,
    ) -> Result<Vec<StatEntry>, EngineError> {
        let filter = self.catalogs.record(record)?;
        let mode = match kind {
            EntrantKind::Driver => TeamStatMode::Stats,
            EntrantKind::Team => mode,
        };
        let mut entries: Vec<StatEntry> = self
            .rows(kind)
            .into_iter()
            .map(|row| StatEntry {
                value: i64::from(stats::team_stat(row.results.iter().copied(), filter, mode)),
                team_summary: points::team_summary(&row.entrant, &row.results),
                entrant: row.entrant,
            })
            .collect();
        stats::order_stats(&mut entries);
        Ok(entries)
    }

    /// Current (or longest, with `max_streak`) streak of every entrant.
    ///
    /// Team streaks count races in which any seat matched. With `only_actives`,
    /// entrants without results in the latest season in scope are left out.
    pub fn streak_rank(
        &self,
        kind: EntrantKind,
        record: &str,
        max_streak: bool,
        only_actives: bool,
    ) -> Result<Vec<StatEntry>, EngineError> {
        let filter = self.catalogs.record(record)?;
        let calculator = StreakCalculator::new(filter)
            .max_streak(max_streak)
            .unique_by_race(kind == EntrantKind::Team);
        let latest_year = self.results().iter().map(|r| r.race.season_year).max();
        let mut entries: Vec<StatEntry> = self
            .rows(kind)
            .into_iter()
            .filter(|row| !only_actives || is_active(row, latest_year))
            .map(|row| StatEntry {
                value: i64::from(calculator.run(row.results.iter().rev().copied())),
                team_summary: points::team_summary(&row.entrant, &row.results),
                entrant: row.entrant,
            })
            .collect();
        stats::order_stats(&mut entries);
        Ok(entries)
    }

    /// Drivers by positions gained from the grid in their comeback drives.
    pub fn comeback_rank(&self) -> Result<Vec<StatEntry>, EngineError> {
        let filter = self.catalogs.record(COMEBACK_RECORD)?;
        let mut entries: Vec<StatEntry> = self
            .rows(EntrantKind::Driver)
            .into_iter()
            .filter(|row| row.results.iter().any(|r| filter.matches(r)))
            .map(|row| StatEntry {
                value: stats::comeback_gain(row.results.iter().copied(), filter),
                team_summary: points::team_summary(&row.entrant, &row.results),
                entrant: row.entrant,
            })
            .collect();
        stats::order_stats(&mut entries);
        Ok(entries)
    }

    /// Who can still take the title given the scope's pending races.
    pub fn title_contention(&self, kind: EntrantKind, punctuation: Option<&str>) -> TitleContention {
        let rank = self.points_rank(kind, punctuation);
        let scheme = punctuation
            .or_else(|| self.scope.pending_scheme_code())
            .and_then(|code| self.catalogs.resolve_scheme(code));
        let mut seen = HashSet::new();
        let left_out: Vec<&RaceRef> = self
            .scope
            .results()
            .into_iter()
            .filter(|r| !self.within_limit(r))
            .map(|r| &r.race)
            .filter(|race| seen.insert(race.id))
            .collect();
        let pending = contenders::pending_points(
            self.scope.pending_races().into_iter().chain(left_out),
            scheme,
        );
        title_contention(&rank, pending)
    }
}

/// Active entrants have at least one result in the latest season.
fn is_active(row: &EntrantResults<'_>, latest_year: Option<i32>) -> bool {
    latest_year.is_some_and(|year| row.results.iter().any(|r| r.race.season_year == year))
}

impl<'a> Ranker<'a, Competition> {
    /// Points of `entrant` in each season, oldest first, under that season's scheme and cap.
    pub fn points_by_season(&self, entrant: &Entrant) -> Vec<(i32, f64)> {
        self.scope
            .seasons()
            .iter()
            .map(|season| {
                let scheme = season
                    .punctuation
                    .as_deref()
                    .and_then(|code| self.catalogs.punctuation.resolve(code));
                let calculator = ScoringCalculator::new(scheme);
                let mut results = season.results_of(entrant);
                results.retain(|r| self.within_limit(r));
                let total =
                    points::entrant_points(&results, |r| calculator.total(r), season.best_rounds());
                (season.year, total)
            })
            .collect()
    }

    /// Record counts per entrant and season, one row per season the entrant took part in.
    pub fn seasons_rank(
        &self,
        kind: EntrantKind,
        record: &str,
        mode: TeamStatMode,
    ) -> Result<Vec<SeasonStatEntry>, EngineError> {
        let filter = self.catalogs.record(record)?;
        let mode = match kind {
            EntrantKind::Driver => TeamStatMode::Stats,
            EntrantKind::Team => mode,
        };
        let mut entries = Vec::new();
        for season in self.scope.seasons() {
            let results: Vec<&ResultRecord> = season
                .results()
                .into_iter()
                .filter(|r| self.within_limit(r))
                .collect();
            for row in group_by_entrant(season.entrants(kind), &results) {
                if row.results.is_empty() {
                    continue;
                }
                entries.push(SeasonStatEntry {
                    year: season.year,
                    value: i64::from(stats::team_stat(row.results.iter().copied(), filter, mode)),
                    team_summary: points::team_summary(&row.entrant, &row.results),
                    entrant: row.entrant,
                });
            }
        }
        stats::order_season_stats(&mut entries);
        Ok(entries)
    }
}
