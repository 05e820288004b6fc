pub mod calculator;
pub mod catalog;
pub mod config;

pub use calculator::{points, ScoringCalculator};
pub use catalog::PunctuationCatalog;
pub use config::{builtin_schemes, PunctuationScheme};
