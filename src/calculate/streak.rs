//! Streak detection over canonically ordered events.

use crate::models::{StreakSpan, Toss, TossMarker};

/// A run of consecutive events satisfying a predicate.
///
/// `start` and `end` are inclusive indices into the scanned slice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Run {
    pub length: u32,
    pub start: usize,
    pub end: usize,
}

impl Run {
    /// The events making up this run.
    pub fn slice<'a, T>(&self, events: &'a [T]) -> &'a [T] {
        &events[self.start..=self.end]
    }
}

/// Streak figures for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakSummary {
    /// Signed length of the run ending at the most recent event
    pub current: i32,
    pub longest_win: Option<Run>,
    pub longest_loss: Option<Run>,
}

/// Signed length of the trailing run.
///
/// Positive when the most recent event is a win, negative when it is a loss.
/// Empty input yields 0.
pub fn current_streak<T>(events: &[T], is_win: impl Fn(&T) -> bool) -> i32 {
    let Some(last) = events.last() else {
        return 0;
    };
    let side = is_win(last);
    let length = events.iter().rev().take_while(|e| is_win(e) == side).count() as i32;
    if side {
        length
    } else {
        -length
    }
}

/// Longest run of consecutive events satisfying `pred`.
///
/// Only a strictly longer run replaces the one already found, so the
/// earliest of equally long runs is reported.
pub fn longest_run<T>(events: &[T], pred: impl Fn(&T) -> bool) -> Option<Run> {
    let mut best: Option<Run> = None;
    let mut count = 0u32;
    let mut start = 0usize;

    for (i, event) in events.iter().enumerate() {
        if !pred(event) {
            count = 0;
            continue;
        }
        if count == 0 {
            start = i;
        }
        count += 1;
        if best.map_or(true, |b| count > b.length) {
            best = Some(Run {
                length: count,
                start,
                end: i,
            });
        }
    }

    best
}

/// Current streak plus longest win and loss runs in one call.
pub fn scan<T>(events: &[T], is_win: impl Fn(&T) -> bool) -> StreakSummary {
    StreakSummary {
        current: current_streak(events, &is_win),
        longest_win: longest_run(events, &is_win),
        longest_loss: longest_run(events, |e| !is_win(e)),
    }
}

/// Start/end markers for a run over a toss slice.
pub fn span_of(run: &Run, events: &[&Toss]) -> StreakSpan {
    StreakSpan {
        length: run.length,
        start: TossMarker::from(events[run.start]),
        end: TossMarker::from(events[run.end]),
    }
}

/// Owned copies of the tosses in a run, oldest first.
pub fn evidence(run: &Run, events: &[&Toss]) -> Vec<Toss> {
    run.slice(events).iter().map(|t| (*t).clone()).collect()
}
