//! Canonical chronological order for toss events.
//!
//! Every aggregate in the crate sorts through [`compare_tosses`]; nothing else
//! interprets dates or breaks ties on its own.

use std::cmp::Ordering;

use crate::models::Toss;

/// Total order over tosses, oldest first.
///
/// 1. Game date, when both tosses have one and the dates differ.
/// 2. Otherwise season, then week.
/// 3. Within the same instant, tosses of the same game (same date and the
///    same pair of teams) put the regular toss before the overtime toss.
/// 4. Anything still tied is ordered undated-first, then by team pair, toss
///    type, game id and winner so the result never depends on input order.
///
/// Dates are compared as plain calendar days. The order is total as long as
/// dated rows agree with their season/week, which holds for real schedules.
pub fn compare_tosses(a: &Toss, b: &Toss) -> Ordering {
    if let (Some(date_a), Some(date_b)) = (a.game_date, b.game_date) {
        if date_a != date_b {
            return date_a.cmp(&date_b);
        }
    }

    a.season
        .cmp(&b.season)
        .then(a.week.cmp(&b.week))
        .then_with(|| a.game_date.cmp(&b.game_date))
        .then_with(|| a.team_pair().cmp(&b.team_pair()))
        .then_with(|| a.toss_type.cmp(&b.toss_type))
        .then_with(|| a.game_id.cmp(&b.game_id))
        .then_with(|| a.winner.cmp(&b.winner))
}

/// Copy the tosses into canonical order. The input is left untouched.
pub fn chronological(tosses: &[Toss]) -> Vec<Toss> {
    let mut sorted = tosses.to_vec();
    sorted.sort_by(compare_tosses);
    sorted
}

/// Borrowing variant of [`chronological`].
pub fn chronological_refs<'a, I>(tosses: I) -> Vec<&'a Toss>
where
    I: IntoIterator<Item = &'a Toss>,
{
    let mut sorted: Vec<&Toss> = tosses.into_iter().collect();
    sorted.sort_by(|a, b| compare_tosses(a, b));
    sorted
}
