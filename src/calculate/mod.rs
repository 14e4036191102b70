//! Statistics calculation engine.
//!
//! Computes derived metrics from toss history:
//! - Canonical event ordering
//! - Current and longest streaks
//! - Team and head-to-head rollups
//! - Season records and league totals
//! - League-wide records with shared holders
//!
//! Everything here is a pure function of its inputs. Callers hand in
//! already-loaded tosses, games and teams; nothing is read or written.

pub mod ledger;
pub mod league;
pub mod lookup;
pub mod opponent;
pub mod ordering;
pub mod records;
pub mod season;
pub mod streak;
pub mod team;

pub use ledger::{schedule_conflicts, TossFilter, TossLedger, PLACEHOLDER_TEAMS};
pub use lookup::{DataLookup, TableLookup};
pub use records::RecordThresholds;

use crate::models::{GameKey, Toss};

/// Percentage (0-100) of `part` in `total`; an empty total yields 0.
pub fn percentage(part: u32, total: u32) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Unique game key for a toss, so overtime tosses fold into their game.
pub fn game_key<L: DataLookup + ?Sized>(toss: &Toss, lookup: &L) -> GameKey {
    match lookup.game_for(toss) {
        Some(game) => GameKey::for_slot(toss.season, toss.week, &game.home_team, &game.away_team),
        None => GameKey::for_pairing(toss.season, toss.week, &toss.winner, &toss.loser),
    }
}

/// Whether the team won a regular toss and then the game.
///
/// `None` when the toss does not qualify: overtime, a lost toss, no game
/// row, or a game without a final score.
pub fn converted<L: DataLookup + ?Sized>(toss: &Toss, team: &str, lookup: &L) -> Option<bool> {
    if !toss.is_regular() || toss.winner != team {
        return None;
    }
    lookup.game_for(toss)?.won_by(team)
}
