//! Derived statistics models.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Toss, TossType};

/// Where a toss sits in the timeline; used as streak start/end markers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TossMarker {
    pub game_id: String,
    pub season: i32,
    pub week: u32,
    pub game_date: Option<NaiveDate>,
    pub toss_type: TossType,
}

impl From<&Toss> for TossMarker {
    fn from(toss: &Toss) -> Self {
        Self {
            game_id: toss.game_id.clone(),
            season: toss.season,
            week: toss.week,
            game_date: toss.game_date,
            toss_type: toss.toss_type,
        }
    }
}

/// A maximal run of same-outcome tosses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StreakSpan {
    pub length: u32,
    pub start: TossMarker,
    pub end: TossMarker,
}

/// Per-team toss statistics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamStat {
    /// Team abbreviation
    pub team: String,

    /// Display name, when the team is in the reference table
    pub name: Option<String>,

    pub defunct: bool,

    /// Regular (game-opening) tosses only
    pub total_tosses: u32,

    pub toss_wins: u32,

    pub toss_losses: u32,

    /// toss_wins / total_tosses, as a percentage
    pub toss_win_pct: f64,

    /// Regular toss wins where the team deferred
    pub defers: u32,

    /// Regular toss wins where the team received
    pub receives: u32,

    /// defers / toss_wins, as a percentage
    pub defer_pct: f64,

    pub overtime_tosses: u32,

    pub overtime_wins: u32,

    /// Regular toss wins whose game has a final score
    pub conversion_tosses: u32,

    /// Of those, games the team went on to win
    pub conversions: u32,

    /// conversions / conversion_tosses, as a percentage. The denominator is
    /// this team's own scored regular toss wins, not every scored toss it
    /// took part in; a tied game counts in the denominator only.
    pub game_win_pct: f64,

    /// Positive for an active winning run, negative for a losing run
    pub current_streak: i32,

    pub longest_win_streak: Option<StreakSpan>,

    pub longest_loss_streak: Option<StreakSpan>,
}

/// Toss statistics for one team against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpponentStat {
    pub team: String,

    pub opponent: String,

    /// Distinct games between the two, overtime counted once
    pub games_played: u32,

    /// Every toss between the two, overtime included
    pub total_tosses: u32,

    pub toss_wins: u32,

    pub toss_losses: u32,

    /// toss_wins / total_tosses, as a percentage
    pub toss_win_pct: f64,

    pub defers: u32,

    /// defers / regular toss wins, as a percentage
    pub defer_pct: f64,

    /// Regular toss wins against this opponent whose game has a final score
    pub conversion_tosses: u32,

    pub conversions: u32,

    /// conversions / conversion_tosses, as a percentage
    pub game_win_pct: f64,

    pub current_streak: i32,

    pub longest_win_streak: Option<StreakSpan>,

    pub longest_loss_streak: Option<StreakSpan>,
}

/// One team's regular toss record within a single season.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonStat {
    pub team: String,
    pub season: i32,
    pub tosses: u32,
    pub toss_wins: u32,
    pub toss_losses: u32,
    pub toss_win_pct: f64,
}

/// League-wide totals for the tosses in a query.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeagueSummary {
    /// Distinct games
    pub games: u32,

    pub regular_tosses: u32,

    pub overtime_tosses: u32,

    /// Distinct teams that appear in at least one toss
    pub teams: u32,

    pub defers: u32,

    /// defers / regular tosses with a recorded choice, as a percentage
    pub defer_pct: f64,

    /// Regular tosses whose game has a final score
    pub resolved_games: u32,

    /// Of those, games won by the toss winner
    pub toss_winner_game_wins: u32,

    pub toss_winner_game_win_pct: f64,

    pub first_season: Option<i32>,

    pub last_season: Option<i32>,
}
