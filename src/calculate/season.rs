//! Per-season toss records.

use std::collections::BTreeMap;

use crate::models::{SeasonStat, Toss};

use super::percentage;

/// One record per season for the team, oldest season first.
///
/// Only regular tosses are decisions; overtime flips do not count here.
pub fn season_stats(team: &str, events: &[&Toss]) -> Vec<SeasonStat> {
    let mut seasons: BTreeMap<i32, (u32, u32)> = BTreeMap::new();
    for toss in events.iter().filter(|t| t.is_regular()) {
        let Some(won) = toss.outcome_for(team) else {
            continue;
        };
        let (wins, losses) = seasons.entry(toss.season).or_default();
        if won {
            *wins += 1;
        } else {
            *losses += 1;
        }
    }

    seasons
        .into_iter()
        .map(|(season, (wins, losses))| SeasonStat {
            team: team.to_string(),
            season,
            tosses: wins + losses,
            toss_wins: wins,
            toss_losses: losses,
            toss_win_pct: percentage(wins, wins + losses),
        })
        .collect()
}
