use serde::Serialize;

use super::points::StandingEntry;
use crate::model::RaceRef;
use crate::punctuation::{PunctuationScheme, ScoringCalculator};

/// Who can still win the title.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TitleContention {
    /// Most points a single entrant can still add
    pub pending_points: f64,
    /// Leader's points minus `pending_points`; `None` with an empty table
    pub leader_window: Option<f64>,
    pub contenders: Vec<StandingEntry>,
}

impl TitleContention {
    /// The champion, once only one contender is left.
    pub fn champion(&self) -> Option<&StandingEntry> {
        match self.contenders.as_slice() {
            [only] => Some(only),
            _ => None,
        }
    }
}

/// Maximum points available in `pending` races: pole, win and fastest lap in each.
pub fn pending_points<'a, I>(pending: I, scheme: Option<&PunctuationScheme>) -> f64
where
    I: IntoIterator<Item = &'a RaceRef>,
{
    let calculator = ScoringCalculator::new(scheme);
    pending
        .into_iter()
        .map(|race| {
            calculator.qualifying_points(Some(1))
                + calculator.finish_points(Some(1), race.alter_punctuation)
                + calculator.fastest_lap_points(true)
        })
        .sum()
}

pub fn leader(rank: &[StandingEntry]) -> Option<&StandingEntry> {
    rank.first()
}

pub fn runner_up(rank: &[StandingEntry]) -> Option<&StandingEntry> {
    rank.get(1)
}

/// Points a contender needs right now to still catch the leader.
pub fn leader_window(rank: &[StandingEntry], pending_points: f64) -> Option<f64> {
    leader(rank).map(|entry| entry.points - pending_points)
}

/// `rank` must already be ordered by points.
pub fn title_contention(rank: &[StandingEntry], pending_points: f64) -> TitleContention {
    let window = leader_window(rank, pending_points);
    let contenders = match window {
        Some(window) => rank
            .iter()
            .filter(|entry| entry.points >= window)
            .cloned()
            .collect(),
        None => Vec::new(),
    };
    TitleContention {
        pending_points,
        leader_window: window,
        contenders,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AlterPunctuation, Entrant, EntrantKind};
    use crate::punctuation::PunctuationCatalog;

    fn entry(id: u64, points: f64) -> StandingEntry {
        StandingEntry {
            entrant: Entrant {
                kind: EntrantKind::Driver,
                id,
                name: format!("Driver {}", id),
            },
            points,
            tie_break: String::new(),
            team_summary: None,
        }
    }

    #[test]
    fn test_pending_points_with_modifiers() {
        let catalog = PunctuationCatalog::builtin();
        let scheme = catalog.resolve("F1-25");
        let mut last = RaceRef::new(22, 2014, 19);
        last.alter_punctuation = Some(AlterPunctuation::Double);
        let races = vec![RaceRef::new(21, 2014, 18), last];
        // Built-in fastest lap bonus is 0
        assert_eq!(pending_points(&races, scheme), 75.0);
    }

    #[test]
    fn test_pending_points_with_qualifying_and_fastest_lap() {
        let scheme = PunctuationScheme::new("X", "X", vec![10.0])
            .with_qualifying(vec![2.0])
            .with_fastest_lap(1.0);
        let races = vec![RaceRef::new(1, 2020, 1)];
        assert_eq!(pending_points(&races, Some(&scheme)), 13.0);
    }

    #[test]
    fn test_contenders_and_champion() {
        let rank = vec![entry(1, 100.0), entry(2, 80.0), entry(3, 40.0)];

        let open = title_contention(&rank, 25.0);
        assert_eq!(open.leader_window, Some(75.0));
        assert_eq!(open.contenders.len(), 2);
        assert!(open.champion().is_none());

        let decided = title_contention(&rank, 10.0);
        assert_eq!(decided.contenders.len(), 1);
        assert_eq!(decided.champion().unwrap().entrant.id, 1);
    }

    #[test]
    fn test_empty_rank() {
        let contention = title_contention(&[], 25.0);
        assert!(contention.leader_window.is_none());
        assert!(contention.contenders.is_empty());
        assert!(leader(&[]).is_none());
    }

    #[test]
    fn test_leader_and_runner_up() {
        let rank = vec![entry(1, 100.0), entry(2, 80.0)];
        assert_eq!(leader(&rank).unwrap().entrant.id, 1);
        assert_eq!(runner_up(&rank).unwrap().entrant.id, 2);
        assert!(runner_up(&rank[..1]).is_none());
    }
}
