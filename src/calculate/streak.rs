//! Win/loss streaks over series and over individual games.

use chrono::NaiveDate;

use crate::models::{Game, GameResult, Series, SeriesResult, Streak, StreakSummary, StreakType};

/// One element of a streak scan. `kind == None` breaks any run.
#[derive(Debug, Clone, Copy)]
struct Link {
    kind: Option<StreakType>,
    start: NaiveDate,
    end: NaiveDate,
}

fn series_links(series: &[Series]) -> Vec<Link> {
    // Only WIN/LOSS series count; SPLIT and ONGOING are dropped, not breaks.
    series
        .iter()
        .filter_map(|s| {
            let kind = match s.result {
                SeriesResult::Win => StreakType::Win,
                SeriesResult::Loss => StreakType::Loss,
                SeriesResult::Split | SeriesResult::Ongoing => return None,
            };
            Some(Link {
                kind: Some(kind),
                start: s.start_date,
                end: s.end_date,
            })
        })
        .collect()
}

fn game_links(games: &[Game]) -> Vec<Link> {
    games
        .iter()
        .map(|g| Link {
            kind: match g.result {
                GameResult::Win => Some(StreakType::Win),
                GameResult::Loss => Some(StreakType::Loss),
                GameResult::Draw => None,
            },
            start: g.date,
            end: g.date,
        })
        .collect()
}

fn current(links: &[Link]) -> Streak {
    let Some(kind) = links.last().and_then(|l| l.kind) else {
        return Streak::none();
    };

    let run: Vec<&Link> = links
        .iter()
        .rev()
        .take_while(|l| l.kind == Some(kind))
        .collect();

    Streak {
        streak_type: kind,
        count: run.len() as u32,
        start_date: run.last().map(|l| l.start),
        end_date: run.first().map(|l| l.end),
    }
}

fn longest(links: &[Link], kind: StreakType) -> Streak {
    let mut best = Streak::empty(kind);
    let mut count = 0u32;
    let mut run_start = None;

    for link in links {
        if link.kind != Some(kind) {
            count = 0;
            run_start = None;
            continue;
        }
        if count == 0 {
            run_start = Some(link.start);
        }
        count += 1;
        if count > best.count {
            best.count = count;
            best.start_date = run_start;
            best.end_date = Some(link.end);
        }
    }
    best
}

/// Current series streak, counted back from the most recent WIN/LOSS series.
pub fn current_series_streak(series: &[Series]) -> Streak {
    current(&series_links(series))
}

/// Longest run of series with the given result (WIN or LOSS).
pub fn longest_series_streak(series: &[Series], kind: StreakType) -> Streak {
    longest(&series_links(series), kind)
}

/// Current and longest series streaks. `series` must be chronological.
pub fn series_streaks(series: &[Series]) -> StreakSummary {
    let links = series_links(series);
    StreakSummary {
        current: current(&links),
        longest_win: longest(&links, StreakType::Win),
        longest_loss: longest(&links, StreakType::Loss),
    }
}

/// Current and longest game streaks. A draw ends any run.
pub fn game_streaks(games: &[Game]) -> StreakSummary {
    let mut sorted = games.to_vec();
    sorted.sort_by_key(|g| g.date);
    let links = game_links(&sorted);
    StreakSummary {
        current: current(&links),
        longest_win: longest(&links, StreakType::Win),
        longest_loss: longest(&links, StreakType::Loss),
    }
}
