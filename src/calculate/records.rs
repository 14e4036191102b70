//! League-wide record extraction.
//!
//! Every record is tracked as "current best value + everyone holding it".
//! A strictly better value replaces the holders; an equal value joins them.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::{Record, RecordBook, RecordHolder, RecordKind, RecordValue, Toss};

use super::streak::{self, Run};
use super::{opponent, season, team, DataLookup};

/// Minimum sample sizes for percentage-based records.
///
/// A candidate below a floor is invisible to that record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordThresholds {
    /// Regular tosses needed for best/worst toss win %
    #[serde(default = "default_min_tosses")]
    pub min_tosses: u32,

    /// Qualifying tosses needed for best conversion %
    #[serde(default = "default_min_conversion_tosses")]
    pub min_conversion_tosses: u32,

    /// Distinct games needed for a rivalry to count
    #[serde(default = "default_min_rivalry_meetings")]
    pub min_rivalry_meetings: u32,

    /// Regular tosses in a season needed for season records
    #[serde(default = "default_min_season_decisions")]
    pub min_season_decisions: u32,
}

fn default_min_tosses() -> u32 {
    50
}

fn default_min_conversion_tosses() -> u32 {
    20
}

fn default_min_rivalry_meetings() -> u32 {
    5
}

fn default_min_season_decisions() -> u32 {
    10
}

impl Default for RecordThresholds {
    fn default() -> Self {
        Self {
            min_tosses: default_min_tosses(),
            min_conversion_tosses: default_min_conversion_tosses(),
            min_rivalry_meetings: default_min_rivalry_meetings(),
            min_season_decisions: default_min_season_decisions(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Goal {
    Highest,
    Lowest,
}

/// Best value seen so far and every holder sharing it.
#[derive(Debug)]
struct RecordTracker<V> {
    kind: RecordKind,
    goal: Goal,
    best: Option<V>,
    holders: Vec<RecordHolder>,
}

impl<V: PartialOrd + Copy> RecordTracker<V> {
    fn highest(kind: RecordKind) -> Self {
        Self {
            kind,
            goal: Goal::Highest,
            best: None,
            holders: Vec::new(),
        }
    }

    fn lowest(kind: RecordKind) -> Self {
        Self {
            goal: Goal::Lowest,
            ..Self::highest(kind)
        }
    }

    /// Offer a candidate. The holder is only built if it makes the record.
    fn offer(&mut self, value: V, holder: impl FnOnce() -> RecordHolder) {
        let ordering = match self.best {
            None => Ordering::Greater,
            Some(best) => {
                let cmp = value.partial_cmp(&best).unwrap_or(Ordering::Less);
                match self.goal {
                    Goal::Highest => cmp,
                    Goal::Lowest => cmp.reverse(),
                }
            }
        };

        match ordering {
            Ordering::Greater => {
                self.best = Some(value);
                self.holders.clear();
                self.holders.push(holder());
            }
            Ordering::Equal => self.holders.push(holder()),
            Ordering::Less => {}
        }
    }

    fn finish(mut self, to_value: impl Fn(V) -> RecordValue) -> Option<Record> {
        let best = self.best?;
        self.holders.sort_by(|a, b| {
            a.team
                .cmp(&b.team)
                .then_with(|| a.opponent.cmp(&b.opponent))
                .then_with(|| a.season.cmp(&b.season))
        });
        Some(Record {
            kind: self.kind,
            value: to_value(best),
            holders: self.holders,
        })
    }
}

/// Extract the full record catalogue. The timeline may be in any order.
pub fn extract_records<L: DataLookup + ?Sized>(
    timeline: &[Toss],
    lookup: &L,
    thresholds: &RecordThresholds,
) -> RecordBook {
    let mut active_win = RecordTracker::highest(RecordKind::ActiveWinStreak);
    let mut active_loss = RecordTracker::highest(RecordKind::ActiveLossStreak);
    let mut longest_win = RecordTracker::highest(RecordKind::LongestWinStreak);
    let mut longest_loss = RecordTracker::highest(RecordKind::LongestLossStreak);
    let mut best_pct = RecordTracker::highest(RecordKind::BestTossWinPct);
    let mut worst_pct = RecordTracker::lowest(RecordKind::WorstTossWinPct);
    let mut best_conversion = RecordTracker::highest(RecordKind::BestConversionPct);
    let mut lopsided = RecordTracker::highest(RecordKind::MostLopsidedRivalry);
    let mut head_to_head = RecordTracker::highest(RecordKind::LongestHeadToHeadStreak);
    let mut defer_run = RecordTracker::highest(RecordKind::MostConsecutiveDefers);
    let mut best_season = RecordTracker::highest(RecordKind::BestSeason);
    let mut worst_season = RecordTracker::lowest(RecordKind::WorstSeason);

    let by_team = team::group_by_team(timeline);
    debug!(teams = by_team.len(), "Extracting team records");

    for (abbr, events) in &by_team {
        let (stat, streaks) = team::summarize(abbr, events, lookup);

        // A defunct franchise cannot hold an active streak
        if !lookup.is_defunct(abbr) && stat.current_streak != 0 {
            let length = stat.current_streak.unsigned_abs();
            let tracker = if stat.current_streak > 0 {
                &mut active_win
            } else {
                &mut active_loss
            };
            tracker.offer(length, || {
                let tail = &events[events.len() - length as usize..];
                RecordHolder::new(*abbr, length)
                    .with_evidence(tail.iter().map(|t| (*t).clone()).collect())
            });
        }

        if let Some(run) = streaks.longest_win {
            longest_win.offer(run.length, || streak_holder(abbr, &run, events));
        }
        if let Some(run) = streaks.longest_loss {
            longest_loss.offer(run.length, || streak_holder(abbr, &run, events));
        }

        if stat.total_tosses >= thresholds.min_tosses {
            best_pct.offer(stat.toss_win_pct, || {
                RecordHolder::new(*abbr, stat.total_tosses)
            });
            worst_pct.offer(stat.toss_win_pct, || {
                RecordHolder::new(*abbr, stat.total_tosses)
            });
        }

        if stat.conversion_tosses >= thresholds.min_conversion_tosses {
            best_conversion.offer(stat.game_win_pct, || {
                RecordHolder::new(*abbr, stat.conversion_tosses)
            });
        }

        let regular_wins: Vec<&Toss> = events
            .iter()
            .copied()
            .filter(|t| t.is_regular() && t.winner == *abbr)
            .collect();
        if let Some(run) = streak::longest_run(&regular_wins, |t| t.is_defer()) {
            defer_run.offer(run.length, || streak_holder(abbr, &run, &regular_wins));
        }

        for line in season::season_stats(abbr, events) {
            if line.tosses < thresholds.min_season_decisions {
                continue;
            }
            best_season.offer(line.toss_win_pct, || {
                RecordHolder::new(*abbr, line.tosses).in_season(line.season)
            });
            worst_season.offer(line.toss_win_pct, || {
                RecordHolder::new(*abbr, line.tosses).in_season(line.season)
            });
        }
    }

    let by_pair = opponent::group_by_pair(timeline);
    debug!(pairs = by_pair.len(), "Extracting head-to-head records");

    for ((first, second), meetings) in &by_pair {
        for (side, other) in [(*first, *second), (*second, *first)] {
            let (stat, streaks) = opponent::summarize(side, other, meetings, lookup);

            if stat.games_played >= thresholds.min_rivalry_meetings {
                lopsided.offer(stat.toss_win_pct, || {
                    RecordHolder::new(side, stat.games_played).against(other)
                });
            }

            if let Some(run) = streaks.longest_win {
                head_to_head.offer(run.length, || {
                    streak_holder(side, &run, meetings).against(other)
                });
            }
        }
    }

    RecordBook {
        active_win_streak: active_win.finish(RecordValue::Count),
        active_loss_streak: active_loss.finish(RecordValue::Count),
        longest_win_streak: longest_win.finish(RecordValue::Count),
        longest_loss_streak: longest_loss.finish(RecordValue::Count),
        best_toss_win_pct: best_pct.finish(RecordValue::Percentage),
        worst_toss_win_pct: worst_pct.finish(RecordValue::Percentage),
        best_conversion_pct: best_conversion.finish(RecordValue::Percentage),
        most_lopsided_rivalry: lopsided.finish(RecordValue::Percentage),
        longest_head_to_head_streak: head_to_head.finish(RecordValue::Count),
        most_consecutive_defers: defer_run.finish(RecordValue::Count),
        best_season: best_season.finish(RecordValue::Percentage),
        worst_season: worst_season.finish(RecordValue::Percentage),
    }
}

fn streak_holder(team: &str, run: &Run, events: &[&Toss]) -> RecordHolder {
    RecordHolder::new(team, run.length).with_evidence(streak::evidence(run, events))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::ordering::chronological;
    use crate::calculate::TableLookup;
    use crate::models::{Game, Team, TossChoice};
    use pretty_assertions::assert_eq;

    fn lookup() -> TableLookup<'static> {
        TableLookup::default()
    }

    /// `n` regular tosses for `team`, one per week starting at `week`,
    /// won when `wins` says so.
    fn run_of(team: &str, opponent: &str, season: i32, week: u32, wins: &[bool]) -> Vec<Toss> {
        wins.iter()
            .enumerate()
            .map(|(i, &won)| {
                let week = week + i as u32;
                let id = format!("{}_{}_{}_{}", season, week, team, opponent);
                if won {
                    Toss::new(id, season, week, team, opponent)
                } else {
                    Toss::new(id, season, week, opponent, team)
                }
            })
            .collect()
    }

    #[test]
    fn test_tracker_highest_replaces_and_ties() {
        let mut tracker = RecordTracker::highest(RecordKind::LongestWinStreak);
        tracker.offer(5u32, || RecordHolder::new("A", 5));
        tracker.offer(7, || RecordHolder::new("B", 7));
        tracker.offer(7, || RecordHolder::new("C", 7));
        tracker.offer(6, || RecordHolder::new("D", 6));

        let record = tracker.finish(RecordValue::Count).unwrap();
        assert_eq!(record.value, RecordValue::Count(7));
        assert_eq!(record.holder_teams(), vec!["B", "C"]);
    }

    #[test]
    fn test_tracker_tie_with_first_holder_keeps_both() {
        let mut tracker = RecordTracker::highest(RecordKind::LongestWinStreak);
        tracker.offer(7u32, || RecordHolder::new("KC", 7));
        tracker.offer(7, || RecordHolder::new("BUF", 7));

        let record = tracker.finish(RecordValue::Count).unwrap();
        // Holders are reported by abbreviation
        assert_eq!(record.holder_teams(), vec!["BUF", "KC"]);
    }

    #[test]
    fn test_tracker_new_best_resets_ties() {
        let mut tracker = RecordTracker::highest(RecordKind::LongestWinStreak);
        tracker.offer(3u32, || RecordHolder::new("A", 3));
        tracker.offer(3, || RecordHolder::new("B", 3));
        tracker.offer(4, || RecordHolder::new("C", 4));

        let record = tracker.finish(RecordValue::Count).unwrap();
        assert_eq!(record.holder_teams(), vec!["C"]);
    }

    #[test]
    fn test_tracker_lowest() {
        let mut tracker = RecordTracker::lowest(RecordKind::WorstTossWinPct);
        tracker.offer(40.0, || RecordHolder::new("A", 50));
        tracker.offer(35.0, || RecordHolder::new("B", 50));
        tracker.offer(45.0, || RecordHolder::new("C", 50));

        let record = tracker.finish(RecordValue::Percentage).unwrap();
        assert_eq!(record.value, RecordValue::Percentage(35.0));
        assert_eq!(record.holder_teams(), vec!["B"]);
    }

    #[test]
    fn test_tracker_empty() {
        let tracker: RecordTracker<u32> = RecordTracker::highest(RecordKind::BestSeason);
        assert!(tracker.finish(RecordValue::Count).is_none());
    }

    #[test]
    fn test_tied_longest_win_streaks_share_record() {
        let mut tosses = run_of("AAA", "XXX", 2020, 1, &[true; 7]);
        tosses.extend(run_of("BBB", "YYY", 2021, 1, &[true; 7]));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        let record = book.longest_win_streak.unwrap();

        assert_eq!(record.value, RecordValue::Count(7));
        assert_eq!(record.holder_teams(), vec!["AAA", "BBB"]);
        assert_eq!(record.holders[0].evidence.len(), 7);
        assert!(record.is_shared());
    }

    #[test]
    fn test_toss_win_pct_floor() {
        // 49 tosses at 100% vs 50 tosses at 60%
        let mut tosses = run_of("SML", "OPP", 2020, 1, &[true; 49]);
        let mut big = vec![true; 30];
        big.extend(vec![false; 20]);
        tosses.extend(run_of("BIG", "OTH", 2021, 1, &big));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        let best = book.best_toss_win_pct.unwrap();
        assert_eq!(best.holder_teams(), vec!["BIG"]);
        assert_eq!(best.value, RecordValue::Percentage(60.0));
        assert_eq!(best.holders[0].sample_size, 50);

        // OPP lost 49 tosses but is also below the floor; OTH at 40% qualifies
        let worst = book.worst_toss_win_pct.unwrap();
        assert_eq!(worst.holder_teams(), vec!["OTH"]);
    }

    #[test]
    fn test_toss_win_pct_floor_exactly_fifty_is_eligible() {
        let tosses = run_of("FIF", "OPP", 2020, 1, &[true; 50]);
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        let best = book.best_toss_win_pct.unwrap();
        assert_eq!(best.holder_teams(), vec!["FIF"]);
        assert_eq!(best.value, RecordValue::Percentage(100.0));

        let worst = book.worst_toss_win_pct.unwrap();
        assert_eq!(worst.holder_teams(), vec!["OPP"]);
    }

    #[test]
    fn test_active_streaks_exclude_defunct_teams() {
        let teams = vec![Team::new("OLD", "Old Franchise").defunct()];
        let lookup = TableLookup::new(&[], &teams);
        let mut tosses = run_of("OLD", "AAA", 1990, 1, &[true; 5]);
        tosses.extend(run_of("NEW", "BBB", 2020, 1, &[true, true, true]));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup, &RecordThresholds::default());

        let active = book.active_win_streak.unwrap();
        assert_eq!(active.holder_teams(), vec!["NEW"]);
        assert_eq!(active.value, RecordValue::Count(3));
        assert_eq!(active.holders[0].evidence.len(), 3);

        // Historical records still include the defunct team
        let longest = book.longest_win_streak.unwrap();
        assert_eq!(longest.holder_teams(), vec!["OLD"]);
        assert_eq!(longest.value, RecordValue::Count(5));
    }

    #[test]
    fn test_active_loss_streak() {
        let timeline = chronological(&run_of("AAA", "BBB", 2020, 1, &[true, false, false]));
        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());

        let record = book.active_loss_streak.unwrap();
        assert_eq!(record.holder_teams(), vec!["AAA"]);
        assert_eq!(record.value, RecordValue::Count(2));

        // BBB is on a 2-toss winning run
        let record = book.active_win_streak.unwrap();
        assert_eq!(record.holder_teams(), vec!["BBB"]);
    }

    #[test]
    fn test_most_lopsided_rivalry_respects_floor() {
        // Four meetings, all won: below the floor
        let mut tosses = run_of("AAA", "BBB", 2020, 1, &[true; 4]);
        // Five meetings, four won
        tosses.extend(run_of("CCC", "DDD", 2021, 1, &[true, true, false, true, true]));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        let record = book.most_lopsided_rivalry.unwrap();

        assert_eq!(record.value, RecordValue::Percentage(80.0));
        assert_eq!(record.holders.len(), 1);
        assert_eq!(record.holders[0].team, "CCC");
        assert_eq!(record.holders[0].opponent.as_deref(), Some("DDD"));
        assert_eq!(record.holders[0].sample_size, 5);
    }

    #[test]
    fn test_rivalry_meetings_count_games_not_tosses() {
        // Three games, two of them with overtime: five tosses but three meetings
        let mut tosses = run_of("AAA", "BBB", 2020, 1, &[true, true, true]);
        tosses.push(Toss::new("2020_1_AAA_BBB", 2020, 1, "AAA", "BBB").overtime());
        tosses.push(Toss::new("2020_2_AAA_BBB", 2020, 2, "AAA", "BBB").overtime());
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        assert!(book.most_lopsided_rivalry.is_none());

        let h2h = book.longest_head_to_head_streak.unwrap();
        assert_eq!(h2h.value, RecordValue::Count(5));
        assert_eq!(h2h.holders[0].opponent.as_deref(), Some("BBB"));
    }

    #[test]
    fn test_most_consecutive_defers() {
        let choices = [
            Some(TossChoice::Defer),
            Some(TossChoice::Defer),
            Some(TossChoice::Receive),
            Some(TossChoice::Defer),
            Some(TossChoice::Defer),
            Some(TossChoice::Defer),
        ];
        let mut tosses: Vec<Toss> = choices
            .iter()
            .enumerate()
            .map(|(i, choice)| {
                let mut toss = Toss::new(format!("g{}", i), 2021, i as u32 + 1, "KC", "DEN");
                toss.winner_choice = *choice;
                toss
            })
            .collect();
        // A lost toss in the middle of the run does not break it
        tosses.push(Toss::new("lost", 2021, 5, "DEN", "KC").with_choice(TossChoice::Receive));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());
        let record = book.most_consecutive_defers.unwrap();

        assert_eq!(record.value, RecordValue::Count(3));
        assert_eq!(record.holder_teams(), vec!["KC"]);
        let weeks: Vec<u32> = record.holders[0].evidence.iter().map(|t| t.week).collect();
        assert_eq!(weeks, vec![4, 5, 6]);
    }

    #[test]
    fn test_season_records() {
        let mut wins = vec![true; 9];
        wins.push(false);
        // 9-1 season qualifies; 5-0 season is below the floor
        let mut tosses = run_of("GUD", "AAA", 2020, 1, &wins);
        tosses.extend(run_of("GUD", "BBB", 2021, 1, &[true; 5]));
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup(), &RecordThresholds::default());

        let best = book.best_season.unwrap();
        assert_eq!(best.value, RecordValue::Percentage(90.0));
        assert_eq!(best.holder_teams(), vec!["GUD"]);
        assert_eq!(best.holders[0].season, Some(2020));

        // The opponent's 1-9 season is the worst on record
        let worst = book.worst_season.unwrap();
        assert_eq!(worst.value, RecordValue::Percentage(10.0));
        assert_eq!(worst.holder_teams(), vec!["AAA"]);
        assert_eq!(worst.holders[0].season, Some(2020));
    }

    #[test]
    fn test_best_conversion_pct() {
        let mut games = Vec::new();
        let mut tosses = Vec::new();
        for week in 1..=20u32 {
            let id = format!("c{}", week);
            // CON wins every toss, and 15 of the 20 games
            let score = if week <= 15 { (30, 10) } else { (10, 30) };
            games.push(Game::new(id.clone(), "CON", "OPP").with_score(score.0, score.1));
            tosses.push(Toss::new(id, 2022, week, "CON", "OPP"));
        }
        // Below the floor despite a perfect rate
        games.push(Game::new("s1", "SML", "OPP").with_score(21, 0));
        tosses.push(Toss::new("s1", 2023, 1, "SML", "OPP"));

        let lookup = TableLookup::new(&games, &[]);
        let timeline = chronological(&tosses);

        let book = extract_records(&timeline, &lookup, &RecordThresholds::default());
        let record = book.best_conversion_pct.unwrap();

        assert_eq!(record.value, RecordValue::Percentage(75.0));
        assert_eq!(record.holder_teams(), vec!["CON"]);
        assert_eq!(record.holders[0].sample_size, 20);
    }

    #[test]
    fn test_records_independent_of_input_order() {
        let mut tosses = run_of("AAA", "BBB", 2020, 1, &[true, false, true, true]);
        tosses.push(Toss::new("2020_2_AAA_BBB", 2020, 2, "AAA", "BBB").overtime());
        tosses.extend(run_of("CCC", "AAA", 2021, 1, &[false, false, true]));

        let forward = chronological(&tosses);
        tosses.reverse();
        let backward = chronological(&tosses);

        let thresholds = RecordThresholds::default();
        assert_eq!(
            extract_records(&forward, &lookup(), &thresholds),
            extract_records(&backward, &lookup(), &thresholds)
        );
    }

    #[test]
    fn test_records_from_unsorted_slice() {
        let mut tosses = run_of("AAA", "BBB", 2020, 1, &[true, true, false]);
        let sorted = chronological(&tosses);
        tosses.reverse();

        let thresholds = RecordThresholds::default();
        let book = extract_records(&tosses, &lookup(), &thresholds);
        assert_eq!(book, extract_records(&sorted, &lookup(), &thresholds));

        // Week 3 loss is the most recent event for AAA
        let active = book.active_loss_streak.unwrap();
        assert_eq!(active.holder_teams(), vec!["AAA"]);
        assert_eq!(book.active_win_streak.unwrap().holder_teams(), vec!["BBB"]);
    }

    #[test]
    fn test_empty_timeline() {
        let book = extract_records(&[], &lookup(), &RecordThresholds::default());
        assert_eq!(book, RecordBook::default());
        assert!(book.records().is_empty());
    }

    #[test]
    fn test_thresholds_default() {
        let t = RecordThresholds::default();
        assert_eq!(t.min_tosses, 50);
        assert_eq!(t.min_conversion_tosses, 20);
        assert_eq!(t.min_rivalry_meetings, 5);
        assert_eq!(t.min_season_decisions, 10);
    }
}
