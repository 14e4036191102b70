//! Per-query working set of tosses.
//!
//! The ledger takes its own filtered copy of the caller's tosses, puts it in
//! canonical order once and serves every aggregate from that copy.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{
    GameType, LeagueSummary, OpponentStat, RecordBook, SeasonStat, TeamStat, Toss,
};

use super::ordering::compare_tosses;
use super::records::{extract_records, RecordThresholds};
use super::{league, opponent, season, team, DataLookup};

/// Team identifiers used by data sources for "no team".
pub const PLACEHOLDER_TEAMS: &[&str] = &["Unknown", "UNK", "TBD", ""];

/// Narrows which tosses a query considers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossFilter {
    /// First season included
    #[serde(default)]
    pub season_from: Option<i32>,

    /// Last season included
    #[serde(default)]
    pub season_to: Option<i32>,

    /// Game types included; empty means all
    #[serde(default)]
    pub game_types: Vec<GameType>,

    /// Team identifiers dropped entirely (compared case-insensitively)
    #[serde(default = "default_excluded_teams")]
    pub excluded_teams: Vec<String>,
}

fn default_excluded_teams() -> Vec<String> {
    PLACEHOLDER_TEAMS.iter().map(|s| s.to_string()).collect()
}

impl Default for TossFilter {
    fn default() -> Self {
        Self {
            season_from: None,
            season_to: None,
            game_types: Vec::new(),
            excluded_teams: default_excluded_teams(),
        }
    }
}

impl TossFilter {
    /// Builder method to restrict the season range (inclusive).
    pub fn with_seasons(mut self, from: Option<i32>, to: Option<i32>) -> Self {
        self.season_from = from;
        self.season_to = to;
        self
    }

    /// Builder method to restrict game types.
    pub fn with_game_types(mut self, game_types: Vec<GameType>) -> Self {
        self.game_types = game_types;
        self
    }

    /// Builder method to replace the excluded team identifiers.
    pub fn with_excluded_teams(mut self, teams: Vec<String>) -> Self {
        self.excluded_teams = teams;
        self
    }

    pub fn is_excluded_team(&self, team: &str) -> bool {
        let team = team.trim();
        self.excluded_teams
            .iter()
            .any(|x| x.trim().eq_ignore_ascii_case(team))
    }

    /// Whether a toss is part of the query.
    ///
    /// Rows naming a placeholder team, or the same team on both sides, are
    /// never counted.
    pub fn matches(&self, toss: &Toss) -> bool {
        if self.season_from.is_some_and(|from| toss.season < from) {
            return false;
        }
        if self.season_to.is_some_and(|to| toss.season > to) {
            return false;
        }
        if !self.game_types.is_empty() && !self.game_types.contains(&toss.game_type) {
            return false;
        }
        if self.is_excluded_team(&toss.winner) || self.is_excluded_team(&toss.loser) {
            return false;
        }
        toss.winner != toss.loser
    }
}

/// Number of places where dated tosses, taken in date order, step backwards
/// in season/week.
///
/// The canonical order is only independent of input order when this is zero.
pub fn schedule_conflicts(tosses: &[Toss]) -> usize {
    let mut dated: Vec<_> = tosses
        .iter()
        .filter_map(|t| t.game_date.map(|d| (d, t.season, t.week)))
        .collect();
    dated.sort();
    dated
        .windows(2)
        .filter(|w| (w[1].1, w[1].2) < (w[0].1, w[0].2))
        .count()
}

/// Canonically ordered tosses plus the lookups needed to aggregate them.
pub struct TossLedger<'a, L: DataLookup + ?Sized> {
    timeline: Vec<Toss>,
    lookup: &'a L,
}

impl<'a, L: DataLookup + ?Sized> TossLedger<'a, L> {
    /// Copy the matching tosses and sort them. The input is not modified.
    pub fn new(tosses: &[Toss], lookup: &'a L, filter: &TossFilter) -> Self {
        let mut timeline: Vec<Toss> = tosses.iter().filter(|t| filter.matches(t)).cloned().collect();
        timeline.sort_by(compare_tosses);

        debug!(
            input = tosses.len(),
            kept = timeline.len(),
            "Built toss ledger"
        );

        let conflicts = schedule_conflicts(&timeline);
        if conflicts > 0 {
            debug!(
                conflicts,
                "Game dates disagree with season/week; order may depend on input order"
            );
        }

        Self { timeline, lookup }
    }

    /// Ledger over every toss except placeholder rows.
    pub fn unfiltered(tosses: &[Toss], lookup: &'a L) -> Self {
        Self::new(tosses, lookup, &TossFilter::default())
    }

    /// All tosses in canonical order.
    pub fn timeline(&self) -> &[Toss] {
        &self.timeline
    }

    pub fn is_empty(&self) -> bool {
        self.timeline.is_empty()
    }

    /// Every team with at least one toss, sorted.
    pub fn teams(&self) -> Vec<&str> {
        team::group_by_team(&self.timeline).into_keys().collect()
    }

    /// The most recent toss the team took part in.
    pub fn latest_toss(&self, team: &str) -> Option<&Toss> {
        self.timeline.iter().rev().find(|t| t.involves(team))
    }

    pub fn team_stat(&self, team: &str) -> TeamStat {
        team::team_stat(team, &self.timeline, self.lookup)
    }

    pub fn team_stats(&self) -> Vec<TeamStat> {
        team::team_stats(&self.timeline, self.lookup)
    }

    pub fn opponent_stat(&self, team: &str, opponent: &str) -> OpponentStat {
        opponent::opponent_stat(team, opponent, &self.timeline, self.lookup)
    }

    pub fn opponent_stats(&self, team: &str) -> Vec<OpponentStat> {
        opponent::opponent_stats(team, &self.timeline, self.lookup)
    }

    pub fn season_stats(&self, team: &str) -> Vec<SeasonStat> {
        let events: Vec<&Toss> = self.timeline.iter().filter(|t| t.involves(team)).collect();
        season::season_stats(team, &events)
    }

    pub fn league_summary(&self) -> LeagueSummary {
        league::league_summary(&self.timeline, self.lookup)
    }

    pub fn records(&self, thresholds: &RecordThresholds) -> RecordBook {
        extract_records(&self.timeline, self.lookup, thresholds)
    }
}
