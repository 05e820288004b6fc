use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Per-race modifier applied to finish points only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlterPunctuation {
    Double,
    Half,
}

impl AlterPunctuation {
    pub fn factor(self) -> f64 {
        match self {
            AlterPunctuation::Double => 2.0,
            AlterPunctuation::Half => 0.5,
        }
    }
}

/// Factor for an optional modifier: races without one score at x1.
pub fn punctuation_factor(modifier: Option<AlterPunctuation>) -> f64 {
    modifier.map_or(1.0, AlterPunctuation::factor)
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Participant {
    pub id: u64,
    pub name: String,
}

impl Participant {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A driver's assignment to a team. Results accrue to seats.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Seat {
    pub id: u64,
    pub driver: Participant,
    pub team: Participant,
}

impl Seat {
    pub fn new(id: u64, driver: Participant, team: Participant) -> Self {
        Self { id, driver, team }
    }

    /// The driver or the team behind this seat, depending on `kind`.
    pub fn entrant(&self, kind: EntrantKind) -> Entrant {
        let who = match kind {
            EntrantKind::Driver => &self.driver,
            EntrantKind::Team => &self.team,
        };
        Entrant {
            kind,
            id: who.id,
            name: who.name.clone(),
        }
    }

    pub fn belongs_to(&self, entrant: &Entrant) -> bool {
        match entrant.kind {
            EntrantKind::Driver => self.driver.id == entrant.id,
            EntrantKind::Team => self.team.id == entrant.id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntrantKind {
    Driver,
    Team,
}

/// Whoever is being ranked: a driver or a team.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Entrant {
    pub kind: EntrantKind,
    pub id: u64,
    pub name: String,
}

/// The race a result belongs to, with everything scoring and ordering need.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RaceRef {
    pub id: u64,
    pub season_year: i32,
    pub round: u32,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub alter_punctuation: Option<AlterPunctuation>,
}

impl RaceRef {
    pub fn new(id: u64, season_year: i32, round: u32) -> Self {
        Self {
            id,
            season_year,
            round,
            date: None,
            alter_punctuation: None,
        }
    }

    /// Chronological ordering key: season year, round, then race date.
    ///
    /// Dates only separate races sharing a round, so an undated race never
    /// jumps ahead of earlier rounds.
    pub fn recency_key(&self) -> (i32, u32, Option<NaiveDate>) {
        (self.season_year, self.round, self.date)
    }
}

/// One seat's outcome in one race.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResultRecord {
    pub race: RaceRef,
    pub seat: Seat,
    pub qualifying: Option<u32>,
    pub finish: Option<u32>,
    pub fastest_lap: bool,
    pub retired: bool,
    pub wildcard: bool,
}

impl ResultRecord {
    pub fn new(race: RaceRef, seat: Seat) -> Self {
        Self {
            race,
            seat,
            qualifying: None,
            finish: None,
            fastest_lap: false,
            retired: false,
            wildcard: false,
        }
    }

    pub fn alter_punctuation(&self) -> Option<AlterPunctuation> {
        self.race.alter_punctuation
    }
}

/// Oldest race first. Results of the same race keep their relative order.
pub fn sort_chronological(results: &mut [ResultRecord]) {
    results.sort_by(|a, b| a.race.recency_key().cmp(&b.race.recency_key()));
}

/// Most recent race first, the order streaks are scanned in.
pub fn sort_reverse_chronological(results: &mut [ResultRecord]) {
    results.sort_by(|a, b| b.race.recency_key().cmp(&a.race.recency_key()));
}
