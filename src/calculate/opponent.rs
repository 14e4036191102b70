//! Head-to-head rollups for one team against one opponent.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::models::{OpponentStat, Toss};

use super::ordering::{chronological_refs, compare_tosses};
use super::streak::{self, StreakSummary};
use super::{converted, game_key, percentage, DataLookup};

/// Stats for `team` against `opponent`. The timeline may be in any order.
pub fn opponent_stat<L: DataLookup + ?Sized>(
    team: &str,
    opponent: &str,
    timeline: &[Toss],
    lookup: &L,
) -> OpponentStat {
    let meetings = chronological_refs(timeline.iter().filter(|t| t.is_between(team, opponent)));
    summarize(team, opponent, &meetings, lookup).0
}

/// One stat line per opponent the team has met, sorted by opponent.
pub fn opponent_stats<L: DataLookup + ?Sized>(
    team: &str,
    timeline: &[Toss],
    lookup: &L,
) -> Vec<OpponentStat> {
    let mut by_opponent: BTreeMap<&str, Vec<&Toss>> = BTreeMap::new();
    for toss in timeline {
        if let Some(opponent) = toss.opponent_of(team) {
            by_opponent.entry(opponent).or_default().push(toss);
        }
    }

    by_opponent
        .into_iter()
        .map(|(opponent, mut meetings)| {
            meetings.sort_by(|a, b| compare_tosses(a, b));
            summarize(team, opponent, &meetings, lookup).0
        })
        .collect()
}

/// Every pairing in the timeline, keyed by the lexicographically ordered pair.
/// Each pairing's tosses are in canonical order.
pub fn group_by_pair(timeline: &[Toss]) -> BTreeMap<(&str, &str), Vec<&Toss>> {
    let mut pairs: BTreeMap<(&str, &str), Vec<&Toss>> = BTreeMap::new();
    for toss in timeline {
        pairs.entry(toss.team_pair()).or_default().push(toss);
    }
    for meetings in pairs.values_mut() {
        meetings.sort_by(|a, b| compare_tosses(a, b));
    }
    pairs
}

/// Distinct opponents the team has met.
pub fn opponents_of<'a>(team: &str, timeline: &'a [Toss]) -> BTreeSet<&'a str> {
    timeline.iter().filter_map(|t| t.opponent_of(team)).collect()
}

/// Build the pairing's stat line together with the raw streak scan.
///
/// `meetings` must hold only tosses between the two teams, oldest first.
/// Games played counts each game once, while the toss win percentage counts
/// the regular and the overtime toss of a game separately.
pub(crate) fn summarize<L: DataLookup + ?Sized>(
    team: &str,
    opponent: &str,
    meetings: &[&Toss],
    lookup: &L,
) -> (OpponentStat, StreakSummary) {
    let games: HashSet<_> = meetings.iter().map(|t| game_key(t, lookup)).collect();

    let total_tosses = meetings.len() as u32;
    let toss_wins = meetings.iter().filter(|t| t.winner == team).count() as u32;
    let regular_wins = meetings
        .iter()
        .filter(|t| t.is_regular() && t.winner == team)
        .count() as u32;
    let defers = meetings
        .iter()
        .filter(|t| t.winner == team && t.is_defer())
        .count() as u32;

    let mut conversion_tosses = 0u32;
    let mut conversions = 0u32;
    for won_game in meetings.iter().filter_map(|t| converted(t, team, lookup)) {
        conversion_tosses += 1;
        if won_game {
            conversions += 1;
        }
    }

    let streaks = streak::scan(meetings, |t| t.winner == team);

    let stat = OpponentStat {
        team: team.to_string(),
        opponent: opponent.to_string(),
        games_played: games.len() as u32,
        total_tosses,
        toss_wins,
        toss_losses: total_tosses - toss_wins,
        toss_win_pct: percentage(toss_wins, total_tosses),
        defers,
        defer_pct: percentage(defers, regular_wins),
        conversion_tosses,
        conversions,
        game_win_pct: percentage(conversions, conversion_tosses),
        current_streak: streaks.current,
        longest_win_streak: streaks.longest_win.map(|r| streak::span_of(&r, meetings)),
        longest_loss_streak: streaks.longest_loss.map(|r| streak::span_of(&r, meetings)),
    };

    (stat, streaks)
}
