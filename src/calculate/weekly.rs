//! Per-week team performance.

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, Weekday};

use crate::calculate::standings::calculate_win_pct;
use crate::models::{GameLog, GameResult, WeeklyStats, WeeklyTeamStats};

/// ISO week label ("2025-W07") and its Monday..Sunday bounds.
pub fn week_of(date: NaiveDate) -> (String, NaiveDate, NaiveDate) {
    let iso = date.iso_week();
    let label = format!("{}-W{:02}", iso.year(), iso.week());
    let offset = date.weekday().num_days_from_monday() as u64;
    let monday = date - chrono::Days::new(offset);
    let sunday = monday + chrono::Days::new(6);
    debug_assert_eq!(monday.weekday(), Weekday::Mon);
    (label, monday, sunday)
}

/// Break every team's games down by ISO week, oldest week first.
///
/// Every team in the log appears in every week, with zeros if idle.
pub fn weekly_performance(log: &GameLog) -> Vec<WeeklyStats> {
    let mut weeks: BTreeMap<String, WeeklyStats> = BTreeMap::new();

    for (team, games) in log.iter() {
        for game in games {
            let (label, start_date, end_date) = week_of(game.date);
            let week = weeks.entry(label.clone()).or_insert_with(|| WeeklyStats {
                week: label,
                start_date,
                end_date,
                teams: log
                    .teams()
                    .map(|t| (t.to_string(), WeeklyTeamStats::default()))
                    .collect(),
            });

            let stats = week.teams.entry(team.to_string()).or_default();
            stats.games += 1;
            match game.result {
                GameResult::Win => stats.wins += 1,
                GameResult::Loss => stats.losses += 1,
                GameResult::Draw => stats.draws += 1,
            }
            stats.runs_scored = stats.runs_scored.saturating_add(game.runs_for);
            stats.runs_allowed = stats.runs_allowed.saturating_add(game.runs_against);
        }
    }

    let mut weeks: Vec<WeeklyStats> = weeks.into_values().collect();
    for week in &mut weeks {
        for stats in week.teams.values_mut() {
            stats.win_pct = calculate_win_pct(stats.wins, stats.losses);
            stats.run_differential = stats.runs_scored as i64 - stats.runs_allowed as i64;
        }
    }
    weeks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Game;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_week_of() {
        // 2025-04-02 is a Wednesday
        let (label, start, end) = week_of(date("2025-04-02"));
        assert_eq!(label, "2025-W14");
        assert_eq!(start, date("2025-03-31"));
        assert_eq!(end, date("2025-04-06"));

        let (label, start, _) = week_of(date("2025-04-06"));
        assert_eq!(label, "2025-W14");
        assert_eq!(start, date("2025-03-31"));
    }

    #[test]
    fn test_weekly_performance() {
        let mut teams = BTreeMap::new();
        teams.insert(
            "LG".to_string(),
            vec![
                Game::new(date("2025-04-01"), "KT", true, 5, 2),
                Game::new(date("2025-04-02"), "KT", true, 1, 3),
                Game::new(date("2025-04-08"), "NC", false, 4, 4),
            ],
        );
        teams.insert(
            "KT".to_string(),
            vec![
                Game::new(date("2025-04-01"), "LG", false, 2, 5),
                Game::new(date("2025-04-02"), "LG", false, 3, 1),
            ],
        );
        let log = GameLog::from_teams(teams);

        let weeks = weekly_performance(&log);
        assert_eq!(weeks.len(), 2);

        let first = &weeks[0];
        assert_eq!(first.week, "2025-W14");
        let lg = &first.teams["LG"];
        assert_eq!((lg.games, lg.wins, lg.losses), (2, 1, 1));
        assert_eq!(lg.win_pct, 0.5);
        assert_eq!(lg.run_differential, 3);

        let second = &weeks[1];
        assert_eq!(second.teams["LG"].draws, 1);
        assert_eq!(second.teams["LG"].win_pct, 0.0);
        // Idle team still listed
        assert_eq!(second.teams["KT"].games, 0);
    }
}
