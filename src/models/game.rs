//! Game and team reference models.

use serde::{Deserialize, Serialize};

/// Result of a game as derived from its final score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    HomeWin,
    AwayWin,
    Tie,
    /// Unplayed, or the score was never recorded
    NoData,
}

/// One scheduled contest between two teams.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Game {
    pub game_id: String,

    pub home_team: String,

    pub away_team: String,

    #[serde(default)]
    pub home_score: Option<u32>,

    #[serde(default)]
    pub away_score: Option<u32>,
}

impl Game {
    /// Create a game with no score recorded.
    pub fn new(
        game_id: impl Into<String>,
        home_team: impl Into<String>,
        away_team: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            home_team: home_team.into(),
            away_team: away_team.into(),
            home_score: None,
            away_score: None,
        }
    }

    /// Builder method to set the final score.
    pub fn with_score(mut self, home_score: u32, away_score: u32) -> Self {
        self.home_score = Some(home_score);
        self.away_score = Some(away_score);
        self
    }

    /// Derive the outcome; a single missing score means no data.
    pub fn outcome(&self) -> GameOutcome {
        match (self.home_score, self.away_score) {
            (Some(home), Some(away)) => match home.cmp(&away) {
                std::cmp::Ordering::Greater => GameOutcome::HomeWin,
                std::cmp::Ordering::Less => GameOutcome::AwayWin,
                std::cmp::Ordering::Equal => GameOutcome::Tie,
            },
            _ => GameOutcome::NoData,
        }
    }

    pub fn has_result(&self) -> bool {
        self.outcome() != GameOutcome::NoData
    }

    /// The team with the strictly greater score.
    pub fn winner(&self) -> Option<&str> {
        match self.outcome() {
            GameOutcome::HomeWin => Some(&self.home_team),
            GameOutcome::AwayWin => Some(&self.away_team),
            GameOutcome::Tie | GameOutcome::NoData => None,
        }
    }

    /// `Some(true)` if the team won, `Some(false)` on a loss or tie,
    /// `None` when there is no result.
    pub fn won_by(&self, team: &str) -> Option<bool> {
        if !self.has_result() {
            return None;
        }
        Some(self.winner() == Some(team))
    }
}

/// Static team reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    /// Short code used in toss rows (e.g., "KC")
    pub abbreviation: String,

    /// Display name (e.g., "Kansas City Chiefs")
    pub name: String,

    #[serde(default)]
    pub logo: Option<String>,

    #[serde(default)]
    pub primary_color: Option<String>,

    #[serde(default)]
    pub secondary_color: Option<String>,

    #[serde(default)]
    pub conference: Option<String>,

    #[serde(default)]
    pub division: Option<String>,

    /// Franchise no longer plays; kept for historical totals only
    #[serde(default)]
    pub defunct: bool,
}

impl Team {
    pub fn new(abbreviation: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            abbreviation: abbreviation.into(),
            name: name.into(),
            logo: None,
            primary_color: None,
            secondary_color: None,
            conference: None,
            division: None,
            defunct: false,
        }
    }

    /// Builder method to flag the team as defunct.
    pub fn defunct(mut self) -> Self {
        self.defunct = true;
        self
    }
}
