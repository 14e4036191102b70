//! Per-team toss rollups.

use std::collections::BTreeMap;

use crate::models::{TeamStat, Toss};

use super::ordering::{chronological_refs, compare_tosses};
use super::streak::{self, StreakSummary};
use super::{converted, percentage, DataLookup};

/// Stats for one team. The timeline may be in any order.
pub fn team_stat<L: DataLookup + ?Sized>(team: &str, timeline: &[Toss], lookup: &L) -> TeamStat {
    let events = chronological_refs(timeline.iter().filter(|t| t.involves(team)));
    summarize(team, &events, lookup).0
}

/// Stats for every team in the timeline, sorted by abbreviation.
pub fn team_stats<L: DataLookup + ?Sized>(timeline: &[Toss], lookup: &L) -> Vec<TeamStat> {
    group_by_team(timeline)
        .into_iter()
        .map(|(team, events)| summarize(team, &events, lookup).0)
        .collect()
}

/// Each team's tosses in canonical order, keyed by abbreviation.
pub fn group_by_team(timeline: &[Toss]) -> BTreeMap<&str, Vec<&Toss>> {
    let mut groups: BTreeMap<&str, Vec<&Toss>> = BTreeMap::new();
    for toss in timeline {
        groups.entry(toss.winner.as_str()).or_default().push(toss);
        groups.entry(toss.loser.as_str()).or_default().push(toss);
    }
    for events in groups.values_mut() {
        events.sort_by(|a, b| compare_tosses(a, b));
    }
    groups
}

/// Build the team's stat line together with the raw streak scan.
///
/// `events` must hold only tosses the team took part in, oldest first.
/// Percentages and defers count regular tosses; streaks count every toss,
/// since an overtime flip is an outcome of its own.
pub(crate) fn summarize<L: DataLookup + ?Sized>(
    team: &str,
    events: &[&Toss],
    lookup: &L,
) -> (TeamStat, StreakSummary) {
    let mut total_tosses = 0u32;
    let mut toss_wins = 0u32;
    let mut defers = 0u32;
    let mut receives = 0u32;
    let mut overtime_tosses = 0u32;
    let mut overtime_wins = 0u32;
    let mut conversion_tosses = 0u32;
    let mut conversions = 0u32;

    for toss in events {
        let won = toss.winner == team;
        if !toss.is_regular() {
            overtime_tosses += 1;
            if won {
                overtime_wins += 1;
            }
            continue;
        }

        total_tosses += 1;
        if won {
            toss_wins += 1;
            if toss.is_defer() {
                defers += 1;
            } else if toss.is_receive() {
                receives += 1;
            }
        }
        if let Some(won_game) = converted(toss, team, lookup) {
            conversion_tosses += 1;
            if won_game {
                conversions += 1;
            }
        }
    }

    let streaks = streak::scan(events, |t| t.winner == team);
    let team_ref = lookup.team_for(team);

    let stat = TeamStat {
        team: team.to_string(),
        name: team_ref.map(|t| t.name.clone()),
        defunct: team_ref.is_some_and(|t| t.defunct),
        total_tosses,
        toss_wins,
        toss_losses: total_tosses - toss_wins,
        toss_win_pct: percentage(toss_wins, total_tosses),
        defers,
        receives,
        defer_pct: percentage(defers, toss_wins),
        overtime_tosses,
        overtime_wins,
        conversion_tosses,
        conversions,
        game_win_pct: percentage(conversions, conversion_tosses),
        current_streak: streaks.current,
        longest_win_streak: streaks.longest_win.map(|r| streak::span_of(&r, events)),
        longest_loss_streak: streaks.longest_loss.map(|r| streak::span_of(&r, events)),
    };

    (stat, streaks)
}
