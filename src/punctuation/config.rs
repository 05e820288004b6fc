use serde::{Deserialize, Serialize};

/// A named points table.
///
/// `finish[0]` is the value of 1st place, `finish[1]` of 2nd place and so on.
/// Positions past the end of a table score nothing.
///
/// Example YAML:
/// ```yaml
/// punctuation:
///   - code: SPRINT-8
///     label: "Sprint (8p 1st)"
///     finish: [8, 7, 6, 5, 4, 3, 2, 1]
///     qualifying: [3, 2, 1]
///     fastest_lap: 1
/// ```
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PunctuationScheme {
    /// Stable identifier referenced by seasons (e.g. "F1-25")
    pub code: String,

    /// Human readable name
    pub label: String,

    /// Points by finish position, 1st place first
    pub finish: Vec<f64>,

    /// Points by qualifying position, pole first
    #[serde(default)]
    pub qualifying: Option<Vec<f64>>,

    /// Bonus for the fastest lap of the race
    #[serde(default)]
    pub fastest_lap: Option<f64>,
}

impl PunctuationScheme {
    pub fn new(code: impl Into<String>, label: impl Into<String>, finish: Vec<f64>) -> Self {
        Self {
            code: code.into(),
            label: label.into(),
            finish,
            qualifying: None,
            fastest_lap: None,
        }
    }

    pub fn with_qualifying(mut self, qualifying: Vec<f64>) -> Self {
        self.qualifying = Some(qualifying);
        self
    }

    pub fn with_fastest_lap(mut self, bonus: f64) -> Self {
        self.fastest_lap = Some(bonus);
        self
    }
}

fn builtin(code: &str, label: &str, finish: &[u32]) -> PunctuationScheme {
    PunctuationScheme::new(code, label, finish.iter().map(|&p| f64::from(p)).collect())
        .with_fastest_lap(0.0)
}

/// Schemes available without any configuration.
pub fn builtin_schemes() -> Vec<PunctuationScheme> {
    vec![
        builtin(
            "F1-25",
            "F1 (25p 1st)",
            &[25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        ),
        builtin("F1-10+8", "F1 (10p 1st, 8p 2nd)", &[10, 8, 6, 4, 3, 2, 1]),
        builtin("F1-10+6", "F1 (10p 1st, 6p 2nd)", &[10, 6, 4, 3, 2, 1]),
        builtin(
            "MotoGP",
            "Moto GP",
            &[25, 20, 16, 13, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        ),
        builtin(
            "MotoGP-92",
            "Moto GP (only 1992)",
            &[20, 15, 12, 10, 8, 6, 4, 3, 2, 1],
        ),
        builtin(
            "MotoGP-88-91",
            "Moto GP (1988-91)",
            &[20, 17, 15, 13, 11, 10, 9, 8, 7, 6, 5, 4, 3, 2, 1],
        ),
        builtin(
            "MotoGP-77-87",
            "Moto GP (1977-87)",
            &[15, 12, 10, 8, 6, 6, 5, 3, 2, 1],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_codes_are_unique() {
        let schemes = builtin_schemes();
        let mut codes: Vec<&str> = schemes.iter().map(|s| s.code.as_str()).collect();
        codes.sort();
        codes.dedup();
        assert_eq!(codes.len(), schemes.len());
    }

    #[test]
    fn test_builtin_f1_25_table() {
        let schemes = builtin_schemes();
        let f1 = schemes.iter().find(|s| s.code == "F1-25").unwrap();
        assert_eq!(f1.finish.len(), 10);
        assert_eq!(f1.finish[0], 25.0);
        assert_eq!(f1.finish[9], 1.0);
        assert!(f1.qualifying.is_none());
    }

    #[test]
    fn test_full_scheme_parse() {
        let yaml = r#"
code: SPRINT-8
label: "Sprint (8p 1st)"
finish: [8, 7, 6, 5, 4, 3, 2, 1]
qualifying: [3, 2, 1]
fastest_lap: 1
"#;
        let scheme: PunctuationScheme = serde_saphyr::from_str(yaml).unwrap();
        assert_eq!(scheme.code, "SPRINT-8");
        assert_eq!(scheme.finish.len(), 8);
        assert_eq!(scheme.qualifying, Some(vec![3.0, 2.0, 1.0]));
        assert_eq!(scheme.fastest_lap, Some(1.0));
    }

    #[test]
    fn test_minimal_scheme_parse() {
        let yaml = r#"
code: CLUB
label: Club
finish: [3, 2, 1]
"#;
        let scheme: PunctuationScheme = serde_saphyr::from_str(yaml).unwrap();
        assert!(scheme.qualifying.is_none());
        assert!(scheme.fastest_lap.is_none());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let yaml = r#"
code: CLUB
label: Club
finish: [3, 2, 1]
bonus: 4
"#;
        let parsed: Result<PunctuationScheme, _> = serde_saphyr::from_str(yaml);
        assert!(parsed.is_err());
    }
}
