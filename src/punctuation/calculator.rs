use super::config::PunctuationScheme;
use crate::model::{punctuation_factor, AlterPunctuation, ResultRecord};

/// Points earned by one result, split by where they came from.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointsBreakdown {
    pub qualifying: f64,
    pub finish: f64,
    pub fastest_lap: f64,
}

impl PointsBreakdown {
    pub fn total(&self) -> f64 {
        self.qualifying + self.finish + self.fastest_lap
    }
}

/// Scores results under one scheme. A missing scheme scores everything as zero.
#[derive(Debug, Clone, Copy)]
pub struct ScoringCalculator<'a> {
    scheme: Option<&'a PunctuationScheme>,
}

impl<'a> ScoringCalculator<'a> {
    pub fn new(scheme: Option<&'a PunctuationScheme>) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> Option<&'a PunctuationScheme> {
        self.scheme
    }

    pub fn qualifying_points(&self, qualifying: Option<u32>) -> f64 {
        let table = self.scheme.and_then(|s| s.qualifying.as_deref());
        match (table, qualifying) {
            (Some(table), Some(position)) => table_value(table, position),
            _ => 0.0,
        }
    }

    pub fn finish_points(&self, finish: Option<u32>, modifier: Option<AlterPunctuation>) -> f64 {
        match (self.scheme, finish) {
            (Some(scheme), Some(position)) => {
                table_value(&scheme.finish, position) * punctuation_factor(modifier)
            }
            _ => 0.0,
        }
    }

    pub fn fastest_lap_points(&self, fastest_lap: bool) -> f64 {
        match self.scheme.and_then(|s| s.fastest_lap) {
            Some(bonus) if fastest_lap => bonus,
            _ => 0.0,
        }
    }

    /// Component points using an explicit race modifier instead of the result's own race.
    pub fn breakdown_with(
        &self,
        result: &ResultRecord,
        modifier: Option<AlterPunctuation>,
    ) -> PointsBreakdown {
        if result.wildcard {
            return PointsBreakdown::default();
        }
        PointsBreakdown {
            qualifying: self.qualifying_points(result.qualifying),
            finish: self.finish_points(result.finish, modifier),
            fastest_lap: self.fastest_lap_points(result.fastest_lap),
        }
    }

    pub fn breakdown(&self, result: &ResultRecord) -> PointsBreakdown {
        self.breakdown_with(result, result.alter_punctuation())
    }

    /// Total points, zero when nothing was scored.
    pub fn total(&self, result: &ResultRecord) -> f64 {
        self.breakdown(result).total()
    }

    /// Total points, or `None` when the result did not score.
    pub fn points(&self, result: &ResultRecord) -> Option<f64> {
        non_zero(self.total(result))
    }
}

/// Points for `result` under `scheme`, with `modifier` scaling the finish points.
///
/// Returns `None` when the result scores nothing: wildcards, positions outside
/// the tables, or an unknown scheme.
pub fn points(
    result: &ResultRecord,
    scheme: Option<&PunctuationScheme>,
    modifier: Option<AlterPunctuation>,
) -> Option<f64> {
    non_zero(ScoringCalculator::new(scheme).breakdown_with(result, modifier).total())
}

// Positions start at 1; 0 and anything past the table are worth nothing.
fn table_value(table: &[f64], position: u32) -> f64 {
    let index = position as usize;
    if index == 0 || index > table.len() {
        0.0
    } else {
        table[index - 1]
    }
}

fn non_zero(total: f64) -> Option<f64> {
    if total == 0.0 {
        None
    } else {
        Some(total)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::fixtures::{finished, qualified, race, race_with, seat};
    use crate::punctuation::PunctuationCatalog;

    fn f1_25() -> PunctuationScheme {
        PunctuationCatalog::builtin().resolve("F1-25").unwrap().clone()
    }

    #[test]
    fn test_every_finish_position_maps_to_table() {
        let scheme = f1_25();
        for (i, expected) in scheme.finish.iter().enumerate() {
            let result = finished(race(1, 1), seat(1, 1, 1), i as u32 + 1);
            assert_eq!(points(&result, Some(&scheme), None), Some(*expected));
        }
        let outside = finished(race(1, 1), seat(1, 1, 1), 11);
        assert_eq!(points(&outside, Some(&scheme), None), None);
    }

    #[test]
    fn test_win_scores_25() {
        let result = finished(race(1, 1), seat(1, 1, 1), 1);
        assert_eq!(points(&result, Some(&f1_25()), None), Some(25.0));
    }

    #[test]
    fn test_double_and_half_modifiers() {
        let scheme = f1_25();
        let win = finished(race(1, 1), seat(1, 1, 1), 1);
        assert_eq!(
            points(&win, Some(&scheme), Some(AlterPunctuation::Double)),
            Some(50.0)
        );
        let second = finished(race(1, 1), seat(1, 1, 1), 2);
        assert_eq!(
            points(&second, Some(&scheme), Some(AlterPunctuation::Half)),
            Some(9.0)
        );
    }

    #[test]
    fn test_calculator_uses_race_modifier() {
        let scheme = f1_25();
        let calculator = ScoringCalculator::new(Some(&scheme));
        let result = finished(race_with(1, 1, AlterPunctuation::Half), seat(1, 1, 1), 1);
        assert_eq!(calculator.total(&result), 12.5);
    }

    #[test]
    fn test_wildcard_never_scores() {
        let scheme = f1_25().with_fastest_lap(1.0);
        let mut result = finished(race(1, 1), seat(1, 1, 1), 1);
        result.wildcard = true;
        result.fastest_lap = true;
        assert_eq!(points(&result, Some(&scheme), None), None);
        assert_eq!(ScoringCalculator::new(Some(&scheme)).total(&result), 0.0);
    }

    #[test]
    fn test_fastest_lap_bonus_only_when_defined() {
        let mut result = finished(race(1, 1), seat(1, 1, 1), 11);
        result.fastest_lap = true;

        let without = PunctuationScheme::new("X", "X", vec![25.0]);
        assert_eq!(points(&result, Some(&without), None), None);

        let with = without.clone().with_fastest_lap(1.0);
        assert_eq!(points(&result, Some(&with), None), Some(1.0));

        result.fastest_lap = false;
        assert_eq!(points(&result, Some(&with), None), None);
    }

    #[test]
    fn test_qualifying_points() {
        let scheme = PunctuationScheme::new("Q", "Q", vec![10.0, 5.0]).with_qualifying(vec![3.0, 1.0]);
        let calculator = ScoringCalculator::new(Some(&scheme));

        let pole_win = qualified(race(1, 1), seat(1, 1, 1), 1, Some(1));
        let breakdown = calculator.breakdown(&pole_win);
        assert_eq!(breakdown.qualifying, 3.0);
        assert_eq!(breakdown.finish, 10.0);
        assert_eq!(breakdown.total(), 13.0);

        let back_of_grid = qualified(race(1, 1), seat(1, 1, 1), 3, None);
        assert_eq!(calculator.points(&back_of_grid), None);
    }

    #[test]
    fn test_qualifying_not_scaled_by_modifier() {
        let scheme = PunctuationScheme::new("Q", "Q", vec![10.0]).with_qualifying(vec![4.0]);
        let result = qualified(race(1, 1), seat(1, 1, 1), 1, Some(1));
        assert_eq!(
            points(&result, Some(&scheme), Some(AlterPunctuation::Double)),
            Some(24.0)
        );
    }

    #[test]
    fn test_unknown_scheme_scores_zero() {
        let catalog = PunctuationCatalog::builtin();
        let mut result = qualified(race(1, 1), seat(1, 1, 1), 1, Some(1));
        result.fastest_lap = true;
        assert_eq!(points(&result, catalog.resolve("UNKNOWN"), None), None);
    }

    #[test]
    fn test_missing_positions_score_zero() {
        let scheme = f1_25();
        let result = crate::model::ResultRecord::new(race(1, 1), seat(1, 1, 1));
        assert_eq!(points(&result, Some(&scheme), None), None);
    }
}
