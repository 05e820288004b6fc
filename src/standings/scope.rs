use std::collections::BTreeMap;

use crate::model::{sort_chronological, Entrant, EntrantKind, RaceRef, ResultRecord, Seat};

/// What a ranking needs from a season or a competition.
pub trait RankScope {
    /// Every driver or team taking part, ordered by id.
    fn entrants(&self, kind: EntrantKind) -> Vec<Entrant>;

    /// Results in scope, oldest race first.
    fn results(&self) -> Vec<&ResultRecord>;

    /// Punctuation code that applies to `result`.
    fn scheme_code(&self, result: &ResultRecord) -> Option<&str>;

    /// Only the best N rounds count, when set.
    fn best_rounds(&self) -> Option<usize> {
        None
    }

    /// Races still to be run, used for title contention.
    fn pending_races(&self) -> Vec<&RaceRef> {
        Vec::new()
    }

    /// Punctuation code for the pending races.
    fn pending_scheme_code(&self) -> Option<&str> {
        None
    }

    /// Results of one entrant, oldest race first.
    fn results_of(&self, entrant: &Entrant) -> Vec<&ResultRecord> {
        self.results()
            .into_iter()
            .filter(|r| r.seat.belongs_to(entrant))
            .collect()
    }
}

fn collect_entrants<'a, I>(seats: I, kind: EntrantKind) -> Vec<Entrant>
where
    I: IntoIterator<Item = &'a Seat>,
{
    let mut by_id: BTreeMap<u64, Entrant> = BTreeMap::new();
    for seat in seats {
        let entrant = seat.entrant(kind);
        by_id.entry(entrant.id).or_insert(entrant);
    }
    by_id.into_values().collect()
}

/// One season of a competition.
#[derive(Debug, Clone, PartialEq)]
pub struct Season {
    pub competition: String,
    pub year: i32,
    pub punctuation: Option<String>,
    pub best_rounds: Option<usize>,
    seats: Vec<Seat>,
    results: Vec<ResultRecord>,
    pending_races: Vec<RaceRef>,
}

impl Season {
    pub fn new(competition: impl Into<String>, year: i32, punctuation: Option<String>) -> Self {
        Self {
            competition: competition.into(),
            year,
            punctuation,
            best_rounds: None,
            seats: Vec::new(),
            results: Vec::new(),
            pending_races: Vec::new(),
        }
    }

    pub fn with_best_rounds(mut self, best_rounds: Option<usize>) -> Self {
        self.best_rounds = best_rounds;
        self
    }

    /// Seats registered in the season, including those without results yet.
    pub fn with_seats(mut self, seats: Vec<Seat>) -> Self {
        self.seats = seats;
        self
    }

    pub fn with_results(mut self, mut results: Vec<ResultRecord>) -> Self {
        sort_chronological(&mut results);
        self.results = results;
        self
    }

    pub fn with_pending_races(mut self, pending_races: Vec<RaceRef>) -> Self {
        self.pending_races = pending_races;
        self
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }
}

impl RankScope for Season {
    fn entrants(&self, kind: EntrantKind) -> Vec<Entrant> {
        collect_entrants(
            self.seats.iter().chain(self.results.iter().map(|r| &r.seat)),
            kind,
        )
    }

    fn results(&self) -> Vec<&ResultRecord> {
        self.results.iter().collect()
    }

    fn scheme_code(&self, _result: &ResultRecord) -> Option<&str> {
        self.punctuation.as_deref()
    }

    fn best_rounds(&self) -> Option<usize> {
        self.best_rounds
    }

    fn pending_races(&self) -> Vec<&RaceRef> {
        self.pending_races.iter().collect()
    }

    fn pending_scheme_code(&self) -> Option<&str> {
        self.punctuation.as_deref()
    }
}

/// All seasons of a competition. Each result scores under its own season's scheme.
#[derive(Debug, Clone, PartialEq)]
pub struct Competition {
    pub name: String,
    seasons: Vec<Season>,
}

impl Competition {
    pub fn new(name: impl Into<String>, mut seasons: Vec<Season>) -> Self {
        seasons.sort_by_key(|s| s.year);
        Self {
            name: name.into(),
            seasons,
        }
    }

    pub fn seasons(&self) -> &[Season] {
        &self.seasons
    }

    pub fn season(&self, year: i32) -> Option<&Season> {
        self.seasons.iter().find(|s| s.year == year)
    }
}

impl RankScope for Competition {
    fn entrants(&self, kind: EntrantKind) -> Vec<Entrant> {
        collect_entrants(
            self.seasons
                .iter()
                .flat_map(|s| s.seats.iter().chain(s.results.iter().map(|r| &r.seat))),
            kind,
        )
    }

    fn results(&self) -> Vec<&ResultRecord> {
        self.seasons.iter().flat_map(|s| s.results.iter()).collect()
    }

    fn scheme_code(&self, result: &ResultRecord) -> Option<&str> {
        self.season(result.race.season_year)
            .and_then(|s| s.punctuation.as_deref())
    }
}
