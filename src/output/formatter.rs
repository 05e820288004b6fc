use std::io::IsTerminal;

use owo_colors::OwoColorize;

use crate::punctuation::PunctuationCatalog;
use crate::records::RecordFilterCatalog;
use crate::standings::{OlympicEntry, StandingEntry, StatEntry, TitleContention};

/// Points without trailing zeros: 25, 12.5, 0.25
pub fn format_points(points: f64) -> String {
    if points.fract() == 0.0 {
        format!("{:.0}", points)
    } else {
        let formatted = format!("{:.2}", points);
        formatted.trim_end_matches('0').to_string()
    }
}

/// Check if stdout is a TTY (for auto-detecting color support)
pub fn should_use_colors() -> bool {
    std::io::stdout().is_terminal()
}

fn position(idx: usize) -> String {
    format!("{:>3}.", idx + 1)
}

fn name_with_team(name: &str, team: Option<&str>, use_colors: bool) -> String {
    match (team, use_colors) {
        (Some(team), true) => format!("{} {}", name.bold(), format!("({})", team).cyan()),
        (Some(team), false) => format!("{} ({})", name, team),
        (None, true) => name.bold().to_string(),
        (None, false) => name.to_string(),
    }
}

/// Points table, one line per entrant
/// Points column is right-aligned, 7 chars wide
pub fn format_standings_table(entries: &[StandingEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No entrants found.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let points = format!("{:>7}", format_points(entry.points));
            let name = name_with_team(
                &entry.entrant.name,
                entry.team_summary.as_deref(),
                use_colors,
            );
            if use_colors {
                format!("{} {}  {}", position(idx).dimmed(), points.yellow(), name)
            } else {
                format!("{} {}  {}", position(idx), points, name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Olympic table: counts of 1st, 2nd and 3rd places, then the rest of the top ten.
pub fn format_olympic_table(entries: &[OlympicEntry], use_colors: bool) -> String {
    if entries.is_empty() {
        return "No entrants found.".to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| {
            let podium = entry.positions[..3]
                .iter()
                .map(|c| format!("{:>3}", c))
                .collect::<Vec<_>>()
                .join(" ");
            let rest = entry.positions[3..10]
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            if use_colors {
                format!(
                    "{} {}  {}  {}",
                    position(idx).dimmed(),
                    podium.yellow(),
                    rest.dimmed(),
                    entry.entrant.name.bold()
                )
            } else {
                format!("{} {}  {}  {}", position(idx), podium, rest, entry.entrant.name)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Record counts, streaks and comeback totals. Entrants with zero are left out.
pub fn format_stat_table(entries: &[StatEntry], use_colors: bool) -> String {
    let rows: Vec<String> = entries
        .iter()
        .filter(|entry| entry.value != 0)
        .enumerate()
        .map(|(idx, entry)| {
            let value = format!("{:>5}", entry.value);
            let name = name_with_team(
                &entry.entrant.name,
                entry.team_summary.as_deref(),
                use_colors,
            );
            if use_colors {
                format!("{} {}  {}", position(idx).dimmed(), value.yellow(), name)
            } else {
                format!("{} {}  {}", position(idx), value, name)
            }
        })
        .collect();

    if rows.is_empty() {
        "No entrants found.".to_string()
    } else {
        rows.join("\n")
    }
}

pub fn format_contention(contention: &TitleContention, use_colors: bool) -> String {
    let Some(window) = contention.leader_window else {
        return "No entrants found.".to_string();
    };

    let mut lines = vec![format!(
        "Points still available: {}",
        format_points(contention.pending_points)
    )];
    match contention.champion() {
        Some(champion) if use_colors => {
            lines.push(format!("Champion: {}", champion.entrant.name.bold().green()))
        }
        Some(champion) => lines.push(format!("Champion: {}", champion.entrant.name)),
        None => {
            lines.push(format!("Contenders need at least {} points:", format_points(window)));
            lines.push(format_standings_table(&contention.contenders, use_colors));
        }
    }
    lines.join("\n")
}

/// Punctuation schemes as "CODE  label  finish table"
pub fn format_schemes(catalog: &PunctuationCatalog, use_colors: bool) -> String {
    catalog
        .iter()
        .map(|scheme| {
            let finish = scheme
                .finish
                .iter()
                .map(|p| format_points(*p))
                .collect::<Vec<_>>()
                .join("-");
            let code = format!("{:<10}", scheme.code);
            if use_colors {
                format!("{}  {}  {}", code.bold(), scheme.label, finish.dimmed())
            } else {
                format!("{}  {}  {}", code, scheme.label, finish)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Record filters as "CODE  label  conditions", team-doubles ones marked with "*"
pub fn format_records(catalog: &RecordFilterCatalog, use_colors: bool) -> String {
    catalog
        .iter()
        .map(|filter| {
            let marker = if filter.team_doubles_filter { "*" } else { " " };
            let code = format!("{:<16}", filter.code);
            if use_colors {
                format!(
                    "{}{}  {}  {}",
                    marker,
                    code.bold(),
                    filter.label,
                    filter.describe().dimmed()
                )
            } else {
                format!("{}{}  {}  {}", marker, code, filter.label, filter.describe())
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
