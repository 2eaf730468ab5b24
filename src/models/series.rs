//! Series models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Game, GameResult, SeriesId};

/// Classification of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SeriesResult {
    Win,
    Loss,
    Split,
    /// Most recent series, not yet decided
    Ongoing,
}

impl SeriesResult {
    /// Whether the result can take part in a streak.
    pub fn is_decisive(self) -> bool {
        matches!(self, SeriesResult::Win | SeriesResult::Loss)
    }
}

impl std::fmt::Display for SeriesResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SeriesResult::Win => write!(f, "WIN"),
            SeriesResult::Loss => write!(f, "LOSS"),
            SeriesResult::Split => write!(f, "SPLIT"),
            SeriesResult::Ongoing => write!(f, "ONGOING"),
        }
    }
}

/// A contiguous run of games against one opponent with a fixed home/away side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    /// Deterministic ID (team, opponent, start date, side)
    pub id: SeriesId,

    /// 1-based position in the team's season
    pub series_number: u32,

    pub opponent: String,
    pub is_home: bool,

    /// Games in chronological order
    pub games: Vec<Game>,

    pub start_date: NaiveDate,
    pub end_date: NaiveDate,

    pub wins: u32,
    pub losses: u32,
    pub draws: u32,

    pub result: SeriesResult,
    pub is_sweep: bool,
    pub is_winning_sweep: bool,
    pub is_losing_sweep: bool,
}

impl Series {
    /// Open a series with its first game. Result starts as ONGOING until classified.
    pub fn open(team: &str, series_number: u32, game: Game) -> Self {
        let side = if game.is_home { "home" } else { "away" };
        let start = game.date.format("%Y-%m-%d").to_string();
        let id = SeriesId::generate(&[team, &game.opponent, &start, side]);

        let mut series = Self {
            id,
            series_number,
            opponent: game.opponent.clone(),
            is_home: game.is_home,
            games: Vec::new(),
            start_date: game.date,
            end_date: game.date,
            wins: 0,
            losses: 0,
            draws: 0,
            result: SeriesResult::Ongoing,
            is_sweep: false,
            is_winning_sweep: false,
            is_losing_sweep: false,
        };
        series.push(game);
        series
    }

    /// Whether a game continues this series.
    pub fn accepts(&self, game: &Game) -> bool {
        self.opponent == game.opponent && self.is_home == game.is_home
    }

    /// Append a game and update the tallies.
    pub fn push(&mut self, game: Game) {
        match game.result {
            GameResult::Win => self.wins += 1,
            GameResult::Loss => self.losses += 1,
            GameResult::Draw => self.draws += 1,
        }
        self.end_date = game.date;
        self.games.push(game);
    }

    pub fn total_games(&self) -> u32 {
        self.games.len() as u32
    }

    pub fn home_games(&self) -> u32 {
        if self.is_home {
            self.total_games()
        } else {
            0
        }
    }

    pub fn away_games(&self) -> u32 {
        if self.is_home {
            0
        } else {
            self.total_games()
        }
    }

    pub fn scores(&self) -> Vec<String> {
        self.games.iter().map(Game::score).collect()
    }
}

/// Per-team series totals.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SeriesSummary {
    pub total_series: u32,
    pub winning_series: u32,
    pub losing_series: u32,
    pub split_series: u32,
    pub ongoing_series: u32,
    pub sweep_wins: u32,
    pub sweep_losses: u32,
    /// winning_series / total_series * 100, one decimal
    pub series_win_rate: f64,
}
