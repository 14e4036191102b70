//! League-wide record models.

use serde::{Deserialize, Serialize};

use super::Toss;

/// The fixed catalogue of league records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    ActiveWinStreak,
    ActiveLossStreak,
    LongestWinStreak,
    LongestLossStreak,
    BestTossWinPct,
    WorstTossWinPct,
    BestConversionPct,
    MostLopsidedRivalry,
    LongestHeadToHeadStreak,
    MostConsecutiveDefers,
    BestSeason,
    WorstSeason,
}

impl RecordKind {
    /// Human-readable title.
    pub fn title(&self) -> &'static str {
        match self {
            RecordKind::ActiveWinStreak => "Active toss win streak",
            RecordKind::ActiveLossStreak => "Active toss loss streak",
            RecordKind::LongestWinStreak => "Longest toss win streak",
            RecordKind::LongestLossStreak => "Longest toss loss streak",
            RecordKind::BestTossWinPct => "Best toss win %",
            RecordKind::WorstTossWinPct => "Worst toss win %",
            RecordKind::BestConversionPct => "Best toss-to-game conversion %",
            RecordKind::MostLopsidedRivalry => "Most lopsided rivalry",
            RecordKind::LongestHeadToHeadStreak => "Longest head-to-head streak",
            RecordKind::MostConsecutiveDefers => "Most consecutive defers",
            RecordKind::BestSeason => "Best single-season record",
            RecordKind::WorstSeason => "Worst single-season record",
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.title())
    }
}

/// Magnitude of a record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "unit", content = "value", rename_all = "snake_case")]
pub enum RecordValue {
    Count(u32),
    Percentage(f64),
}

impl std::fmt::Display for RecordValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RecordValue::Count(n) => write!(f, "{}", n),
            RecordValue::Percentage(p) => write!(f, "{:.1}%", p),
        }
    }
}

/// One team sharing a record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordHolder {
    pub team: String,

    /// Set for head-to-head records
    pub opponent: Option<String>,

    /// Set for single-season records
    pub season: Option<i32>,

    /// Tosses, games or decisions behind the value
    pub sample_size: u32,

    /// The contributing tosses, oldest first (streak records only)
    pub evidence: Vec<Toss>,
}

impl RecordHolder {
    pub fn new(team: impl Into<String>, sample_size: u32) -> Self {
        Self {
            team: team.into(),
            opponent: None,
            season: None,
            sample_size,
            evidence: Vec::new(),
        }
    }

    pub fn against(mut self, opponent: impl Into<String>) -> Self {
        self.opponent = Some(opponent.into());
        self
    }

    pub fn in_season(mut self, season: i32) -> Self {
        self.season = Some(season);
        self
    }

    pub fn with_evidence(mut self, evidence: Vec<Toss>) -> Self {
        self.evidence = evidence;
        self
    }
}

/// A league record and everyone who holds it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub kind: RecordKind,
    pub value: RecordValue,
    pub holders: Vec<RecordHolder>,
}

impl Record {
    pub fn is_shared(&self) -> bool {
        self.holders.len() > 1
    }

    pub fn holder_teams(&self) -> Vec<&str> {
        self.holders.iter().map(|h| h.team.as_str()).collect()
    }
}

/// The full record catalogue. A record is `None` when no team qualifies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecordBook {
    pub active_win_streak: Option<Record>,
    pub active_loss_streak: Option<Record>,
    pub longest_win_streak: Option<Record>,
    pub longest_loss_streak: Option<Record>,
    pub best_toss_win_pct: Option<Record>,
    pub worst_toss_win_pct: Option<Record>,
    pub best_conversion_pct: Option<Record>,
    pub most_lopsided_rivalry: Option<Record>,
    pub longest_head_to_head_streak: Option<Record>,
    pub most_consecutive_defers: Option<Record>,
    pub best_season: Option<Record>,
    pub worst_season: Option<Record>,
}

impl RecordBook {
    /// Records that have a holder, in catalogue order.
    pub fn records(&self) -> Vec<&Record> {
        [
            &self.active_win_streak,
            &self.active_loss_streak,
            &self.longest_win_streak,
            &self.longest_loss_streak,
            &self.best_toss_win_pct,
            &self.worst_toss_win_pct,
            &self.best_conversion_pct,
            &self.most_lopsided_rivalry,
            &self.longest_head_to_head_streak,
            &self.most_consecutive_defers,
            &self.best_season,
            &self.worst_season,
        ]
        .into_iter()
        .filter_map(Option::as_ref)
        .collect()
    }
}
