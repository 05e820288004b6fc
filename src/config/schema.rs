use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::punctuation::PunctuationScheme;
use crate::records::FilterValue;

/// Catalog extensions loaded once at startup.
///
/// Example YAML:
/// ```yaml
/// punctuation:
///   - code: CLUB
///     label: "Club series"
///     finish: [10, 6, 4, 3, 2, 1]
///     fastest_lap: 1
/// records:
///   - code: HAT-TRICK
///     label: "Pole, win and fastest lap"
///     filter:
///       qualifying__exact: 1
///       finish__exact: 1
///       fastest_lap: true
/// ```
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct EngineConfig {
    /// Extra punctuation schemes, added after the built-in ones
    #[serde(default)]
    pub punctuation: Vec<PunctuationScheme>,

    /// Extra record filters, added after the built-in ones
    #[serde(default)]
    pub records: Vec<RecordFilterConfig>,
}

/// Record filter as written in config.
///
/// Filter keys are `field` or `field__comparator`, with fields `qualifying`,
/// `finish`, `retired`, `fastest_lap` and comparators `lte`, `gte`, `eq`, `exact`.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct RecordFilterConfig {
    pub code: String,
    pub label: String,
    pub filter: BTreeMap<String, FilterValue>,
    #[serde(default)]
    pub team_doubles_filter: bool,
}
