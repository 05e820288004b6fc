//! Points, standings, record filters and streaks for motorsport championships.
//!
//! Results come in from whatever stores them; this crate only turns them
//! into points and ordered tables.

pub mod catalogs;
pub mod config;
pub mod error;
pub mod model;
pub mod output;
pub mod punctuation;
pub mod records;
pub mod snapshot;
pub mod standings;
pub mod streak;

pub use catalogs::Catalogs;
pub use error::EngineError;
pub use model::{AlterPunctuation, Entrant, EntrantKind, RaceRef, ResultRecord, Seat};
pub use punctuation::{points, PunctuationCatalog, PunctuationScheme, ScoringCalculator};
pub use records::{matches_filter, RecordFilter, RecordFilterCatalog};
pub use standings::{
    olympic_rank, standings, Competition, EntrantResults, OlympicEntry, RankScope, Ranker,
    Season, StandingEntry,
};
pub use streak::{streak, StreakCalculator};

/// Scheme lookup in the process-wide catalogs.
pub fn resolve_scheme(code: &str) -> Option<&'static PunctuationScheme> {
    catalogs::global().punctuation.resolve(code)
}
