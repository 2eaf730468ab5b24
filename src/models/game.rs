//! Games as seen from a single team.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{EntityId, SnapshotId};

/// Outcome of a single game for the team that owns the record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    #[serde(rename = "W")]
    Win,
    #[serde(rename = "L")]
    Loss,
    #[serde(rename = "D")]
    Draw,
}

impl GameResult {
    /// Parse the upstream single-letter code.
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim() {
            "W" | "w" => Some(GameResult::Win),
            "L" | "l" => Some(GameResult::Loss),
            "D" | "d" => Some(GameResult::Draw),
            _ => None,
        }
    }

    /// The result implied by a final score.
    pub fn from_score(runs_for: u32, runs_against: u32) -> Self {
        match runs_for.cmp(&runs_against) {
            std::cmp::Ordering::Greater => GameResult::Win,
            std::cmp::Ordering::Less => GameResult::Loss,
            std::cmp::Ordering::Equal => GameResult::Draw,
        }
    }

    /// The same game seen from the other dugout.
    pub fn inverse(self) -> Self {
        match self {
            GameResult::Win => GameResult::Loss,
            GameResult::Loss => GameResult::Win,
            GameResult::Draw => GameResult::Draw,
        }
    }
}

impl std::fmt::Display for GameResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameResult::Win => write!(f, "W"),
            GameResult::Loss => write!(f, "L"),
            GameResult::Draw => write!(f, "D"),
        }
    }
}

/// A validated, completed game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    /// Calendar date the game was played
    pub date: NaiveDate,

    /// Opponent team code
    pub opponent: String,

    /// Whether the owning team was at home
    pub is_home: bool,

    /// Result for the owning team
    pub result: GameResult,

    /// Runs scored by the owning team
    pub runs_for: u32,

    /// Runs scored by the opponent
    pub runs_against: u32,
}

impl Game {
    pub fn new(
        date: NaiveDate,
        opponent: impl Into<String>,
        is_home: bool,
        runs_for: u32,
        runs_against: u32,
    ) -> Self {
        Self {
            date,
            opponent: opponent.into(),
            is_home,
            result: GameResult::from_score(runs_for, runs_against),
            runs_for,
            runs_against,
        }
    }

    /// Score formatted the way upstream supplies it ("runsFor:runsAgainst").
    pub fn score(&self) -> String {
        format!("{}:{}", self.runs_for, self.runs_against)
    }
}

/// Raw per-team record as supplied by the upstream parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamGameRecord {
    pub team: String,
    pub date: String,
    pub opponent: String,
    pub is_home: bool,
    pub result: String,
    /// "runsFor:runsAgainst"
    pub score: String,
}

/// One played game in league-schedule form (both teams on one line).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueGame {
    pub date: NaiveDate,
    pub home_team: String,
    pub away_team: String,
    pub home_score: u32,
    pub away_score: u32,
}

impl LeagueGame {
    /// Expand into the two per-team records (home first).
    pub fn to_team_records(&self) -> [TeamGameRecord; 2] {
        let date = self.date.format("%Y-%m-%d").to_string();
        let home_result = GameResult::from_score(self.home_score, self.away_score);
        [
            TeamGameRecord {
                team: self.home_team.clone(),
                date: date.clone(),
                opponent: self.away_team.clone(),
                is_home: true,
                result: home_result.to_string(),
                score: format!("{}:{}", self.home_score, self.away_score),
            },
            TeamGameRecord {
                team: self.away_team.clone(),
                date,
                opponent: self.home_team.clone(),
                is_home: false,
                result: home_result.inverse().to_string(),
                score: format!("{}:{}", self.away_score, self.home_score),
            },
        ]
    }
}

/// Validated per-team game lists, each sorted ascending by date.
///
/// Built through [`crate::ingest`]; immutable afterwards. Deserializing
/// goes through [`GameLog::from_teams`], so the ordering holds there too.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "RawGameLog")]
pub struct GameLog {
    teams: BTreeMap<String, Vec<Game>>,
}

#[derive(Deserialize)]
struct RawGameLog {
    teams: BTreeMap<String, Vec<Game>>,
}

impl From<RawGameLog> for GameLog {
    fn from(raw: RawGameLog) -> Self {
        Self::from_teams(raw.teams)
    }
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a log from per-team game lists. Lists are re-sorted by date.
    pub fn from_teams(teams: BTreeMap<String, Vec<Game>>) -> Self {
        let teams = teams
            .into_iter()
            .map(|(team, mut games)| {
                games.sort_by_key(|g| g.date);
                (team, games)
            })
            .collect();
        Self { teams }
    }

    /// Team codes in the log, sorted.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }

    /// A team's games, or an empty slice for an unknown team.
    pub fn games(&self, team: &str) -> &[Game] {
        self.teams.get(team).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains_team(&self, team: &str) -> bool {
        self.teams.contains_key(team)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Game])> {
        self.teams.iter().map(|(t, g)| (t.as_str(), g.as_slice()))
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    pub fn total_games(&self) -> usize {
        self.teams.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.teams.is_empty()
    }

    /// Most recent game date across all teams.
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.teams
            .values()
            .filter_map(|games| games.last().map(|g| g.date))
            .max()
    }

    /// Content fingerprint of this snapshot of the log.
    pub fn fingerprint(&self) -> SnapshotId {
        let payload = serde_json::to_vec(&self.teams).unwrap_or_default();
        EntityId::from_content(&payload)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_result_codes() {
        assert_eq!(GameResult::from_code("W"), Some(GameResult::Win));
        assert_eq!(GameResult::from_code(" l "), Some(GameResult::Loss));
        assert_eq!(GameResult::from_code("D"), Some(GameResult::Draw));
        assert_eq!(GameResult::from_code("T"), None);
        assert_eq!(GameResult::Win.to_string(), "W");
    }

    #[test]
    fn test_result_from_score() {
        assert_eq!(GameResult::from_score(5, 3), GameResult::Win);
        assert_eq!(GameResult::from_score(2, 3), GameResult::Loss);
        assert_eq!(GameResult::from_score(4, 4), GameResult::Draw);
    }

    #[test]
    fn test_game_score_format() {
        let game = Game::new(date("2025-04-01"), "KIA", true, 7, 2);
        assert_eq!(game.score(), "7:2");
        assert_eq!(game.result, GameResult::Win);
    }

    #[test]
    fn test_league_game_expansion() {
        let game = LeagueGame {
            date: date("2025-05-03"),
            home_team: "LG".to_string(),
            away_team: "NC".to_string(),
            home_score: 3,
            away_score: 6,
        };

        let [home, away] = game.to_team_records();
        assert_eq!(home.team, "LG");
        assert!(home.is_home);
        assert_eq!(home.result, "L");
        assert_eq!(home.score, "3:6");
        assert_eq!(away.team, "NC");
        assert!(!away.is_home);
        assert_eq!(away.result, "W");
        assert_eq!(away.score, "6:3");
        assert_eq!(away.date, "2025-05-03");
    }

    #[test]
    fn test_game_log_sorts_and_fingerprints() {
        let mut teams = BTreeMap::new();
        teams.insert(
            "LG".to_string(),
            vec![
                Game::new(date("2025-04-03"), "KT", false, 1, 0),
                Game::new(date("2025-04-01"), "KT", false, 0, 1),
            ],
        );
        let log = GameLog::from_teams(teams.clone());

        assert_eq!(log.games("LG")[0].date, date("2025-04-01"));
        assert!(log.games("SSG").is_empty());
        assert_eq!(log.total_games(), 2);
        assert_eq!(log.last_date(), Some(date("2025-04-03")));
        assert_eq!(log.fingerprint(), GameLog::from_teams(teams).fingerprint());
    }

    #[test]
    fn test_game_log_deserialize_sorts() {
        let json = r#"{"teams":{"LG":[
            {"date":"2025-04-05","opponent":"KT","is_home":true,"result":"W","runs_for":2,"runs_against":1},
            {"date":"2025-04-02","opponent":"KT","is_home":true,"result":"L","runs_for":0,"runs_against":1}
        ]}}"#;
        let log: GameLog = serde_json::from_str(json).unwrap();
        let lg = log.games("LG");
        assert_eq!(lg[0].date, date("2025-04-02"));
        assert_eq!(lg[1].date, date("2025-04-05"));
    }

    #[test]
    fn test_game_serialization_uses_result_codes() {
        let game = Game::new(date("2025-04-01"), "KIA", false, 2, 2);
        let json = serde_json::to_string(&game).unwrap();
        assert!(json.contains("\"result\":\"D\""));
        let back: Game = serde_json::from_str(&json).unwrap();
        assert_eq!(back, game);
    }
}
