//! League-wide totals.

use std::collections::{BTreeSet, HashSet};

use crate::models::{LeagueSummary, Toss};

use super::{converted, game_key, percentage, DataLookup};

/// Summarize every toss in the timeline.
///
/// Only counts, sets and extremes are taken, so input order does not matter.
pub fn league_summary<L: DataLookup + ?Sized>(timeline: &[Toss], lookup: &L) -> LeagueSummary {
    let games: HashSet<_> = timeline.iter().map(|t| game_key(t, lookup)).collect();
    let teams: BTreeSet<&str> = timeline
        .iter()
        .flat_map(|t| [t.winner.as_str(), t.loser.as_str()])
        .collect();

    let mut summary = LeagueSummary {
        games: games.len() as u32,
        teams: teams.len() as u32,
        first_season: timeline.iter().map(|t| t.season).min(),
        last_season: timeline.iter().map(|t| t.season).max(),
        ..LeagueSummary::default()
    };

    let mut choices = 0u32;
    for toss in timeline {
        if !toss.is_regular() {
            summary.overtime_tosses += 1;
            continue;
        }
        summary.regular_tosses += 1;

        if toss.is_defer() {
            summary.defers += 1;
            choices += 1;
        } else if toss.is_receive() {
            choices += 1;
        }

        if let Some(won_game) = converted(toss, &toss.winner, lookup) {
            summary.resolved_games += 1;
            if won_game {
                summary.toss_winner_game_wins += 1;
            }
        }
    }

    summary.defer_pct = percentage(summary.defers, choices);
    summary.toss_winner_game_win_pct =
        percentage(summary.toss_winner_game_wins, summary.resolved_games);
    summary
}
