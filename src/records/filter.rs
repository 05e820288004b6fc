use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;
use crate::model::ResultRecord;

/// Raw value on the right-hand side of a filter key, as written in config.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FilterValue {
    Bool(bool),
    Int(i64),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PositionField {
    Qualifying,
    Finish,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagField {
    Retired,
    FastestLap,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparator {
    Lte,
    Gte,
    Eq,
}

impl Comparator {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "lte" => Some(Comparator::Lte),
            "gte" => Some(Comparator::Gte),
            "eq" | "exact" => Some(Comparator::Eq),
            _ => None,
        }
    }

    pub fn compare(&self, actual: u32, expected: u32) -> bool {
        match self {
            Comparator::Lte => actual <= expected,
            Comparator::Gte => actual >= expected,
            Comparator::Eq => actual == expected,
        }
    }
}

/// One typed test against a result field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    Position {
        field: PositionField,
        op: Comparator,
        value: u32,
    },
    Flag {
        field: FlagField,
        value: bool,
    },
}

impl Condition {
    /// Parse a `field[__comparator]` key and its value.
    ///
    /// Positions accept `lte`, `gte`, `eq` and `exact`; flags only equality.
    /// `code` is the owning filter, used in error messages.
    pub fn parse(code: &str, key: &str, value: FilterValue) -> Result<Self, EngineError> {
        let key = key.trim();
        if key.is_empty() || !key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(EngineError::invalid_filter(
                code,
                format!("invalid filter syntax '{}'", key),
            ));
        }

        let (field, op) = match key.split_once("__") {
            Some((field, op)) => {
                let op = Comparator::parse(op).ok_or_else(|| {
                    EngineError::invalid_filter(code, format!("unknown comparator in '{}'", key))
                })?;
                (field, op)
            }
            None => (key, Comparator::Eq),
        };

        match field {
            "qualifying" | "finish" => {
                let field = if field == "qualifying" {
                    PositionField::Qualifying
                } else {
                    PositionField::Finish
                };
                let FilterValue::Int(raw) = value else {
                    return Err(EngineError::invalid_filter(
                        code,
                        format!("'{}' expects an integer position", key),
                    ));
                };
                let value = u32::try_from(raw).map_err(|_| {
                    EngineError::invalid_filter(code, format!("'{}' has a negative position", key))
                })?;
                Ok(Condition::Position { field, op, value })
            }
            "retired" | "fastest_lap" => {
                if op != Comparator::Eq {
                    return Err(EngineError::invalid_filter(
                        code,
                        format!("'{}' only supports equality", key),
                    ));
                }
                let field = if field == "retired" {
                    FlagField::Retired
                } else {
                    FlagField::FastestLap
                };
                let FilterValue::Bool(value) = value else {
                    return Err(EngineError::invalid_filter(
                        code,
                        format!("'{}' expects true or false", key),
                    ));
                };
                Ok(Condition::Flag { field, value })
            }
            other => Err(EngineError::invalid_filter(
                code,
                format!("unknown field '{}'", other),
            )),
        }
    }

    pub fn matches(&self, result: &ResultRecord) -> bool {
        match *self {
            Condition::Position { field, op, value } => {
                let actual = match field {
                    PositionField::Qualifying => result.qualifying,
                    PositionField::Finish => result.finish,
                };
                // A missing position never satisfies a comparison
                actual.is_some_and(|actual| op.compare(actual, value))
            }
            Condition::Flag { field, value } => {
                let actual = match field {
                    FlagField::Retired => result.retired,
                    FlagField::FastestLap => result.fastest_lap,
                };
                actual == value
            }
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Condition::Position { field, op, value } => {
                let field = match field {
                    PositionField::Qualifying => "qualifying",
                    PositionField::Finish => "finish",
                };
                let op = match op {
                    Comparator::Lte => "<=",
                    Comparator::Gte => ">=",
                    Comparator::Eq => "=",
                };
                write!(f, "{} {} {}", field, op, value)
            }
            Condition::Flag { field, value } => {
                let field = match field {
                    FlagField::Retired => "retired",
                    FlagField::FastestLap => "fastest_lap",
                };
                write!(f, "{} = {}", field, value)
            }
        }
    }
}

/// A named record: every condition must hold for a result to count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordFilter {
    pub code: String,
    pub label: String,
    pub conditions: Vec<Condition>,
    /// Meaningful at team level as "any seat of the team did it in this race".
    pub team_doubles_filter: bool,
}

impl RecordFilter {
    pub fn new(
        code: impl Into<String>,
        label: impl Into<String>,
        conditions: Vec<Condition>,
        team_doubles_filter: bool,
    ) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            conditions,
            team_doubles_filter,
        }
    }

    /// Build a filter from its config form, validating every key.
    pub fn parse(
        code: &str,
        label: &str,
        filter: &BTreeMap<String, FilterValue>,
        team_doubles_filter: bool,
    ) -> Result<Self, EngineError> {
        if code.trim().is_empty() {
            return Err(EngineError::invalid_filter(code, "code must not be empty"));
        }
        let conditions = filter
            .iter()
            .map(|(key, value)| Condition::parse(code, key, *value))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(code, label, conditions, team_doubles_filter))
    }

    pub fn matches(&self, result: &ResultRecord) -> bool {
        self.conditions.iter().all(|c| c.matches(result))
    }

    /// Conditions joined for display, e.g. "finish >= 1, finish <= 3".
    pub fn describe(&self) -> String {
        self.conditions
            .iter()
            .map(|c| c.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

pub fn matches_filter(result: &ResultRecord, filter: &RecordFilter) -> bool {
    filter.matches(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{finished, qualified, race, retired, seat};

    fn parse(pairs: &[(&str, FilterValue)]) -> Result<RecordFilter, EngineError> {
        let map: BTreeMap<String, FilterValue> =
            pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        RecordFilter::parse("TEST", "Test", &map, false)
    }

    #[test]
    fn test_parse_exact_and_eq_are_equal() {
        let exact = Condition::parse("T", "finish__exact", FilterValue::Int(1)).unwrap();
        let eq = Condition::parse("T", "finish__eq", FilterValue::Int(1)).unwrap();
        let bare = Condition::parse("T", "finish", FilterValue::Int(1)).unwrap();
        assert_eq!(exact, eq);
        assert_eq!(eq, bare);
    }

    #[test]
    fn test_podium_range() {
        let podium = parse(&[
            ("finish__gte", FilterValue::Int(1)),
            ("finish__lte", FilterValue::Int(3)),
        ])
        .unwrap();
        assert!(podium.matches(&finished(race(1, 1), seat(1, 1, 1), 1)));
        assert!(podium.matches(&finished(race(1, 1), seat(1, 1, 1), 3)));
        assert!(!podium.matches(&finished(race(1, 1), seat(1, 1, 1), 4)));
    }

    #[test]
    fn test_missing_position_never_matches() {
        let top10 = parse(&[("finish__lte", FilterValue::Int(10))]).unwrap();
        assert!(!top10.matches(&retired(race(1, 1), seat(1, 1, 1))));
    }

    #[test]
    fn test_flag_conditions() {
        let out = parse(&[("retired", FilterValue::Bool(true))]).unwrap();
        let checkered = parse(&[("retired", FilterValue::Bool(false))]).unwrap();
        let dnf = retired(race(1, 1), seat(1, 1, 1));
        let classified = finished(race(1, 1), seat(1, 1, 1), 8);
        assert!(out.matches(&dnf));
        assert!(!out.matches(&classified));
        assert!(checkered.matches(&classified));
        assert!(!checkered.matches(&dnf));
    }

    #[test]
    fn test_conditions_are_anded() {
        let pole_win = parse(&[
            ("qualifying__exact", FilterValue::Int(1)),
            ("finish__exact", FilterValue::Int(1)),
        ])
        .unwrap();
        assert!(pole_win.matches(&qualified(race(1, 1), seat(1, 1, 1), 1, Some(1))));
        assert!(!pole_win.matches(&qualified(race(1, 1), seat(1, 1, 1), 2, Some(1))));
        assert!(!pole_win.matches(&qualified(race(1, 1), seat(1, 1, 1), 1, Some(2))));
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let any = parse(&[]).unwrap();
        assert!(any.matches(&retired(race(1, 1), seat(1, 1, 1))));
    }

    #[test]
    fn test_unknown_field_rejected() {
        let err = parse(&[("grid__lte", FilterValue::Int(3))]).unwrap_err();
        assert!(matches!(err, EngineError::InvalidFilter { .. }));
        assert!(err.to_string().contains("unknown field 'grid'"));
    }

    #[test]
    fn test_unknown_comparator_rejected() {
        let err = parse(&[("finish__lt", FilterValue::Int(3))]).unwrap_err();
        assert!(err.to_string().contains("unknown comparator"));
    }

    #[test]
    fn test_bad_syntax_rejected() {
        assert!(parse(&[("finish-lte", FilterValue::Int(3))]).is_err());
        assert!(parse(&[("finish__gte__lte", FilterValue::Int(3))]).is_err());
        assert!(parse(&[("", FilterValue::Int(3))]).is_err());
    }

    #[test]
    fn test_type_mismatch_rejected() {
        assert!(parse(&[("finish", FilterValue::Bool(true))]).is_err());
        assert!(parse(&[("retired", FilterValue::Int(1))]).is_err());
        assert!(parse(&[("retired__gte", FilterValue::Bool(true))]).is_err());
        assert!(parse(&[("finish__gte", FilterValue::Int(-1))]).is_err());
    }

    #[test]
    fn test_describe() {
        let filter = parse(&[
            ("finish__lte", FilterValue::Int(3)),
            ("fastest_lap", FilterValue::Bool(true)),
        ])
        .unwrap();
        // BTreeMap orders keys alphabetically
        assert_eq!(filter.describe(), "fastest_lap = true, finish <= 3");
    }

    #[test]
    fn test_filter_value_parses_untagged() {
        let map: BTreeMap<String, FilterValue> =
            serde_saphyr::from_str("qualifying__gte: 11\nretired: false\n").unwrap();
        assert_eq!(map["qualifying__gte"], FilterValue::Int(11));
        assert_eq!(map["retired"], FilterValue::Bool(false));
    }
}
