//! Per-season inputs and derived outputs.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::PathBuf;

use serde::Serialize;
use tracing::{debug, info};

use super::{EntityType, JsonlReader, JsonlWriter, StorageConfig, StorageError};
use crate::calculate::SeasonReport;
use crate::ingest::{build_from_league_games, build_game_log, IngestReport};
use crate::models::{LeagueGame, MagicNumberEntry, Series, TeamGameRecord};

/// File name of the full report written next to the JSONL outputs.
pub const REPORT_FILENAME: &str = "season_report.json";

/// One row of `series.jsonl`.
#[derive(Debug, Serialize)]
struct TeamSeriesRow<'a> {
    team: &'a str,
    #[serde(flatten)]
    series: &'a Series,
}

/// What [`write_season_outputs`] wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedOutputs {
    pub dir: PathBuf,
    pub standings: usize,
    pub series: usize,
    pub magic_numbers: usize,
}

/// Seasons with an input directory, sorted by name.
pub fn list_seasons(config: &StorageConfig) -> Result<Vec<String>, StorageError> {
    let dir = config.normalized_dir();
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let mut seasons = Vec::new();
    for entry in fs::read_dir(&dir)? {
        let entry = entry?;
        if entry.file_type()?.is_dir() {
            if let Some(name) = entry.file_name().to_str() {
                seasons.push(name.to_string());
            }
        }
    }

    seasons.sort();
    Ok(seasons)
}

/// Load and validate a season's game log.
///
/// Per-team records are preferred; league schedule lines are the fallback.
pub fn load_game_log(
    config: &StorageConfig,
    season: &str,
    known_teams: &[String],
) -> Result<IngestReport, StorageError> {
    let team_games: JsonlReader<TeamGameRecord> =
        JsonlReader::for_entity(config, EntityType::TeamGame, season)?;
    if team_games.exists() {
        let records = team_games.read_all()?;
        debug!("Loaded {} team game records for {}", records.len(), season);
        return Ok(build_game_log(&records, known_teams));
    }

    let league_games: JsonlReader<LeagueGame> =
        JsonlReader::for_entity(config, EntityType::LeagueGame, season)?;
    if league_games.exists() {
        let games = league_games.read_all()?;
        debug!("Loaded {} league games for {}", games.len(), season);
        return Ok(build_from_league_games(&games, known_teams));
    }

    Err(StorageError::PathNotFound(config.season_input_dir(season)?))
}

/// Write the report and its per-row JSONL views under `derived/<season>/`.
pub fn write_season_outputs(
    config: &StorageConfig,
    season: &str,
    report: &SeasonReport,
) -> Result<DerivedOutputs, StorageError> {
    let dir = config.season_output_dir(season)?;
    fs::create_dir_all(&dir)?;

    let file = File::create(dir.join(REPORT_FILENAME))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, report)?;
    writer.flush()?;

    let standings = JsonlWriter::for_entity(config, EntityType::Standings, season)?
        .write_all(&report.standings)?;

    let rows: Vec<TeamSeriesRow> = report
        .teams
        .iter()
        .flat_map(|(team, record)| {
            record.series.iter().map(move |series| TeamSeriesRow {
                team: team.as_str(),
                series,
            })
        })
        .collect();
    let series = JsonlWriter::for_entity(config, EntityType::Series, season)?.write_all(&rows)?;

    let magic: Vec<&MagicNumberEntry> = report
        .championship
        .iter()
        .chain(report.playoff.iter())
        .collect();
    let magic_numbers = JsonlWriter::for_entity(config, EntityType::MagicNumber, season)?
        .write_all(magic.iter().copied())?;

    info!(
        "Wrote derived outputs for {} to {:?} ({} standings, {} series, {} magic numbers)",
        season, dir, standings, series, magic_numbers
    );

    Ok(DerivedOutputs {
        dir,
        standings,
        series,
        magic_numbers,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::standings::NoTieBreak;
    use crate::calculate::{analyze_season, SeasonSettings};
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    fn league_games() -> Vec<LeagueGame> {
        let d = NaiveDate::from_ymd_opt(2025, 4, 1).unwrap();
        (0..3)
            .map(|i| LeagueGame {
                date: d + chrono::Days::new(i),
                home_team: "LG".to_string(),
                away_team: "KT".to_string(),
                home_score: 4,
                away_score: 1,
            })
            .collect()
    }

    #[test]
    fn test_load_prefers_team_games() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        JsonlWriter::for_entity(&config, EntityType::LeagueGame, "2025")
            .unwrap()
            .write_all(&league_games())
            .unwrap();
        let records = vec![TeamGameRecord {
            team: "NC".to_string(),
            date: "2025-04-01".to_string(),
            opponent: "SSG".to_string(),
            is_home: true,
            result: "W".to_string(),
            score: "2:1".to_string(),
        }];
        JsonlWriter::for_entity(&config, EntityType::TeamGame, "2025")
            .unwrap()
            .write_all(&records)
            .unwrap();

        let report = load_game_log(&config, "2025", &[]).unwrap();
        assert!(report.log.contains_team("NC"));
        assert!(!report.log.contains_team("LG"));
    }

    #[test]
    fn test_load_falls_back_to_league_games() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        JsonlWriter::for_entity(&config, EntityType::LeagueGame, "2025")
            .unwrap()
            .write_all(&league_games())
            .unwrap();

        let report = load_game_log(&config, "2025", &[]).unwrap();
        assert_eq!(report.accepted, 6);
        assert_eq!(report.log.games("KT").len(), 3);
    }

    #[test]
    fn test_load_missing_season() {
        let temp_dir = TempDir::new().unwrap();
        let err = load_game_log(&config(&temp_dir), "1999", &[]).unwrap_err();
        assert!(matches!(err, StorageError::PathNotFound(_)));
    }

    #[test]
    fn test_list_seasons() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);
        assert!(list_seasons(&config).unwrap().is_empty());

        fs::create_dir_all(config.normalized_dir().join("2025")).unwrap();
        fs::create_dir_all(config.normalized_dir().join("2024")).unwrap();
        fs::write(config.normalized_dir().join("notes.txt"), "x").unwrap();

        assert_eq!(list_seasons(&config).unwrap(), vec!["2024", "2025"]);
    }

    #[test]
    fn test_write_season_outputs() {
        let temp_dir = TempDir::new().unwrap();
        let config = config(&temp_dir);

        let log = build_from_league_games(&league_games(), &[]).log;
        let settings = SeasonSettings {
            as_of: NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
            total_games_per_team: 10,
            playoff_cutoff: 1,
        };
        let report = analyze_season(&log, &settings, &NoTieBreak);

        let outputs = write_season_outputs(&config, "2025", &report).unwrap();
        assert_eq!(outputs.standings, 2);
        assert_eq!(outputs.series, 2);
        assert_eq!(outputs.magic_numbers, 4);
        assert!(outputs.dir.join(REPORT_FILENAME).exists());

        let series: Vec<serde_json::Value> =
            JsonlReader::new(outputs.dir.join("series.jsonl")).read_all().unwrap();
        assert_eq!(series[0]["team"], "KT");
        assert_eq!(series[0]["is_losing_sweep"], true);

        let saved: SeasonReport = serde_json::from_reader(
            File::open(outputs.dir.join(REPORT_FILENAME)).unwrap(),
        )
        .unwrap();
        assert_eq!(saved.snapshot, report.snapshot);
        assert_eq!(saved.teams.len(), report.teams.len());
        assert_eq!(saved.standings.len(), report.standings.len());

        let text = fs::read_to_string(outputs.dir.join(REPORT_FILENAME)).unwrap();
        assert!(text.trim_end().ends_with('}'));
    }
}
