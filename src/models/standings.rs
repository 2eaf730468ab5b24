//! Standings models.

use serde::{Deserialize, Serialize};

use super::{Game, GameResult};

/// Aggregate game totals for one team.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamTotals {
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
}

impl TeamTotals {
    /// Sum a team's games.
    pub fn from_games(team: &str, games: &[Game]) -> Self {
        let mut totals = Self {
            team: team.to_string(),
            ..Default::default()
        };
        for game in games {
            match game.result {
                GameResult::Win => totals.wins += 1,
                GameResult::Loss => totals.losses += 1,
                GameResult::Draw => totals.draws += 1,
            }
            totals.runs_scored = totals.runs_scored.saturating_add(game.runs_for);
            totals.runs_allowed = totals.runs_allowed.saturating_add(game.runs_against);
        }
        totals
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses + self.draws
    }
}

/// One row of the standings table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandingsEntry {
    /// 1-based position after sorting
    pub rank: u32,
    pub team: String,
    pub wins: u32,
    pub losses: u32,
    pub draws: u32,
    pub games_played: u32,
    /// wins / (wins + losses); draws excluded
    pub win_pct: f64,
    /// Half-game distance from the leader; leader is 0
    pub games_behind: f64,
    pub remaining_games: u32,
    pub runs_scored: u32,
    pub runs_allowed: u32,
    pub run_differential: i64,
}

impl StandingsEntry {
    /// Wins reachable by winning every remaining game.
    pub fn max_wins(&self) -> u32 {
        self.wins + self.remaining_games
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_totals_from_games() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let games = vec![
            Game::new(d, "KT", true, 5, 2),
            Game::new(d, "KT", true, 1, 4),
            Game::new(d, "KT", true, 3, 3),
        ];

        let totals = TeamTotals::from_games("LG", &games);
        assert_eq!(totals.wins, 1);
        assert_eq!(totals.losses, 1);
        assert_eq!(totals.draws, 1);
        assert_eq!(totals.games_played(), 3);
        assert_eq!(totals.runs_scored, 9);
        assert_eq!(totals.runs_allowed, 9);
    }

    #[test]
    fn test_totals_saturate_on_huge_scores() {
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        let games = vec![
            Game::new(d, "KT", true, 4_000_000_000, 0),
            Game::new(d, "KT", true, 4_000_000_000, 0),
        ];
        let totals = TeamTotals::from_games("LG", &games);
        assert_eq!(totals.runs_scored, u32::MAX);
        assert_eq!(totals.wins, 2);
    }

    #[test]
    fn test_max_wins() {
        let entry = StandingsEntry {
            rank: 1,
            team: "NC".to_string(),
            wins: 70,
            losses: 60,
            draws: 2,
            games_played: 132,
            win_pct: 70.0 / 130.0,
            games_behind: 0.0,
            remaining_games: 12,
            runs_scored: 600,
            runs_allowed: 580,
            run_differential: 20,
        };
        assert_eq!(entry.max_wins(), 82);
    }
}
