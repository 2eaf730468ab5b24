//! League-wide sweep highlights.

use std::collections::BTreeMap;

use crate::models::{Series, StreakType, SweepHighlight, SweepHighlights, SweepRanking};

/// How many recent sweeps the highlights keep.
pub const RECENT_SWEEPS: usize = 10;

/// Collect sweeps across all teams and rank teams by sweep difference.
pub fn sweep_highlights(series_by_team: &BTreeMap<String, Vec<Series>>) -> SweepHighlights {
    let mut recent: Vec<SweepHighlight> = series_by_team
        .iter()
        .flat_map(|(team, series)| {
            series.iter().filter(|s| s.is_sweep).map(move |s| SweepHighlight {
                team: team.clone(),
                opponent: s.opponent.clone(),
                sweep_type: if s.is_winning_sweep {
                    StreakType::Win
                } else {
                    StreakType::Loss
                },
                game_count: s.total_games(),
                start_date: s.start_date,
                end_date: s.end_date,
                scores: s.scores(),
            })
        })
        .collect();

    // Newest first; team code keeps equal dates deterministic
    recent.sort_by(|a, b| b.end_date.cmp(&a.end_date).then_with(|| a.team.cmp(&b.team)));
    recent.truncate(RECENT_SWEEPS);

    let mut rankings: Vec<SweepRanking> = series_by_team
        .iter()
        .map(|(team, series)| {
            let sweep_wins = series.iter().filter(|s| s.is_winning_sweep).count() as u32;
            let sweep_losses = series.iter().filter(|s| s.is_losing_sweep).count() as u32;
            SweepRanking {
                team: team.clone(),
                sweep_wins,
                sweep_losses,
                sweep_difference: sweep_wins as i64 - sweep_losses as i64,
            }
        })
        .collect();
    rankings.sort_by(|a, b| {
        b.sweep_difference
            .cmp(&a.sweep_difference)
            .then_with(|| a.team.cmp(&b.team))
    });

    SweepHighlights {
        recent_sweeps: recent,
        rankings,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::series::analyze_series;
    use crate::models::Game;
    use chrono::NaiveDate;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 8, day).unwrap()
    }

    fn sweep(opp: &str, start: u32, won: bool) -> Vec<Game> {
        (0..3)
            .map(|i| {
                let (rf, ra) = if won { (4, 1) } else { (1, 4) };
                Game::new(d(start + i), opp, true, rf, ra)
            })
            .collect()
    }

    #[test]
    fn test_highlights_and_rankings() {
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let mut by_team = BTreeMap::new();

        let mut a_games = sweep("B", 1, true);
        a_games.extend(sweep("C", 4, true));
        by_team.insert("A".to_string(), analyze_series("A", &a_games, as_of));

        let b_games = sweep("A", 1, false);
        by_team.insert("B".to_string(), analyze_series("B", &b_games, as_of));

        by_team.insert("C".to_string(), Vec::new());

        let highlights = sweep_highlights(&by_team);

        assert_eq!(highlights.recent_sweeps.len(), 3);
        let newest = &highlights.recent_sweeps[0];
        assert_eq!(newest.team, "A");
        assert_eq!(newest.opponent, "C");
        assert_eq!(newest.end_date, d(6));
        assert_eq!(newest.sweep_type, StreakType::Win);
        assert_eq!(newest.scores, vec!["4:1", "4:1", "4:1"]);

        let order: Vec<&str> = highlights.rankings.iter().map(|r| r.team.as_str()).collect();
        assert_eq!(order, vec!["A", "C", "B"]);
        assert_eq!(highlights.rankings[0].sweep_difference, 2);
        assert_eq!(highlights.rankings[2].sweep_difference, -1);
    }

    #[test]
    fn test_recent_sweeps_capped() {
        let as_of = NaiveDate::from_ymd_opt(2025, 12, 1).unwrap();
        let mut games = Vec::new();
        for i in 0..12u32 {
            let opp = if i % 2 == 0 { "B" } else { "C" };
            let (rf, ra) = (2, 0);
            for j in 0..3 {
                games.push(Game::new(d(1) + chrono::Days::new((i * 3 + j) as u64), opp, true, rf, ra));
            }
        }
        let mut by_team = BTreeMap::new();
        by_team.insert("A".to_string(), analyze_series("A", &games, as_of));

        let highlights = sweep_highlights(&by_team);
        assert_eq!(highlights.recent_sweeps.len(), RECENT_SWEEPS);
        assert_eq!(highlights.rankings[0].sweep_wins, 12);
    }
}
