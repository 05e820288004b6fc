pub mod types;

pub use types::{
    punctuation_factor, sort_chronological, sort_reverse_chronological, AlterPunctuation,
    Entrant, EntrantKind, Participant, RaceRef, ResultRecord, Seat,
};

#[cfg(test)]
pub(crate) mod fixtures;
