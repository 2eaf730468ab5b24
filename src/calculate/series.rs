//! Series grouping and classification.

use chrono::NaiveDate;

use crate::models::{Game, Series, SeriesResult, SeriesSummary};

/// Minimum games for a series to count as a sweep.
pub const SWEEP_MIN_GAMES: u32 = 3;

/// Partition a team's games into series.
///
/// A new series starts whenever the (opponent, home/away) pair changes.
/// Calendar gaps never split a series, so postponed games stay with
/// their series. Input is re-sorted by date (stable).
pub fn group_series(team: &str, games: &[Game]) -> Vec<Series> {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|g| g.date);

    let mut series: Vec<Series> = Vec::new();
    for game in sorted {
        match series.last_mut() {
            Some(open) if open.accepts(&game) => open.push(game),
            _ => {
                let number = series.len() as u32 + 1;
                series.push(Series::open(team, number, game));
            }
        }
    }
    series
}

/// Whether a series is decided.
///
/// Anything but the team's latest series is complete. The latest one is
/// complete once its last game is more than a day before `as_of`, or once
/// one side already has two wins against at most one. This does not model
/// doubleheaders or long-delayed makeup games.
pub fn is_complete(series: &Series, is_latest: bool, as_of: NaiveDate) -> bool {
    if !is_latest {
        return true;
    }
    if (as_of - series.end_date).num_days() > 1 {
        return true;
    }
    let (w, l) = (series.wins, series.losses);
    (w >= 2 && l <= 1) || (l >= 2 && w <= 1)
}

/// Result of a complete series from its decisive game counts.
pub fn series_result(wins: u32, losses: u32) -> SeriesResult {
    match wins.cmp(&losses) {
        std::cmp::Ordering::Greater => SeriesResult::Win,
        std::cmp::Ordering::Less => SeriesResult::Loss,
        std::cmp::Ordering::Equal => SeriesResult::Split,
    }
}

/// Assign result and sweep flags to every series.
pub fn classify_series(mut series: Vec<Series>, as_of: NaiveDate) -> Vec<Series> {
    let latest = series.len().saturating_sub(1);
    for (i, s) in series.iter_mut().enumerate() {
        if !is_complete(s, i == latest, as_of) {
            s.result = SeriesResult::Ongoing;
            s.is_sweep = false;
            s.is_winning_sweep = false;
            s.is_losing_sweep = false;
            continue;
        }

        s.result = series_result(s.wins, s.losses);

        // Draws are allowed in a sweep; the swept side just can't win a game.
        let long_enough = s.total_games() >= SWEEP_MIN_GAMES;
        s.is_winning_sweep = long_enough && s.wins > 0 && s.losses == 0;
        s.is_losing_sweep = long_enough && s.losses > 0 && s.wins == 0;
        s.is_sweep = s.is_winning_sweep || s.is_losing_sweep;
    }
    series
}

/// Group and classify in one step.
pub fn analyze_series(team: &str, games: &[Game], as_of: NaiveDate) -> Vec<Series> {
    classify_series(group_series(team, games), as_of)
}

/// Roll a team's series into totals.
pub fn summarize_series(series: &[Series]) -> SeriesSummary {
    let mut summary = SeriesSummary {
        total_series: series.len() as u32,
        ..Default::default()
    };

    for s in series {
        match s.result {
            SeriesResult::Win => summary.winning_series += 1,
            SeriesResult::Loss => summary.losing_series += 1,
            SeriesResult::Split => summary.split_series += 1,
            SeriesResult::Ongoing => summary.ongoing_series += 1,
        }
        if s.is_winning_sweep {
            summary.sweep_wins += 1;
        }
        if s.is_losing_sweep {
            summary.sweep_losses += 1;
        }
    }

    if summary.total_series > 0 {
        let pct = summary.winning_series as f64 / summary.total_series as f64 * 100.0;
        summary.series_win_rate = (pct * 10.0).round() / 10.0;
    }
    summary
}
