//! Coin toss event model.

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

/// Phase of the season a game belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GameType {
    #[serde(alias = "PRE", alias = "preseason")]
    Preseason,
    #[serde(alias = "REG", alias = "regular_season")]
    RegularSeason,
    #[serde(alias = "POST", alias = "postseason")]
    Postseason,
}

impl GameType {
    pub const ALL: [GameType; 3] = [
        GameType::Preseason,
        GameType::RegularSeason,
        GameType::Postseason,
    ];
}

impl std::fmt::Display for GameType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GameType::Preseason => write!(f, "preseason"),
            GameType::RegularSeason => write!(f, "regular season"),
            GameType::Postseason => write!(f, "postseason"),
        }
    }
}

/// Whether a toss opened the game or started overtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TossType {
    #[serde(alias = "REG", alias = "regular")]
    Regular,
    #[serde(alias = "OT", alias = "overtime")]
    Overtime,
}

/// What the toss winner elected to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TossChoice {
    #[serde(alias = "defer", alias = "DEFER")]
    Defer,
    #[serde(alias = "receive", alias = "RECEIVE")]
    Receive,
}

/// One coin flip belonging to a game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Toss {
    /// Game this toss belongs to (a game has one or two tosses)
    pub game_id: String,

    pub season: i32,

    pub week: u32,

    /// Calendar date of the game; missing for some historical rows
    #[serde(default, deserialize_with = "deserialize_game_date")]
    pub game_date: Option<NaiveDate>,

    pub game_type: GameType,

    pub toss_type: TossType,

    /// Team that won the flip
    pub winner: String,

    /// Team that lost the flip
    pub loser: String,

    /// Only meaningful for regular tosses
    #[serde(default)]
    pub winner_choice: Option<TossChoice>,
}

impl Toss {
    /// Create a regular-season opening toss with no date or choice recorded.
    pub fn new(
        game_id: impl Into<String>,
        season: i32,
        week: u32,
        winner: impl Into<String>,
        loser: impl Into<String>,
    ) -> Self {
        Self {
            game_id: game_id.into(),
            season,
            week,
            game_date: None,
            game_type: GameType::RegularSeason,
            toss_type: TossType::Regular,
            winner: winner.into(),
            loser: loser.into(),
            winner_choice: None,
        }
    }

    /// Builder method to set the game date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.game_date = Some(date);
        self
    }

    /// Builder method to set the game type.
    pub fn with_game_type(mut self, game_type: GameType) -> Self {
        self.game_type = game_type;
        self
    }

    /// Builder method to set the winner's choice.
    pub fn with_choice(mut self, choice: TossChoice) -> Self {
        self.winner_choice = Some(choice);
        self
    }

    /// Builder method to mark this as the overtime toss.
    pub fn overtime(mut self) -> Self {
        self.toss_type = TossType::Overtime;
        self
    }

    pub fn is_regular(&self) -> bool {
        self.toss_type == TossType::Regular
    }

    /// Whether the team took part in this toss.
    pub fn involves(&self, team: &str) -> bool {
        self.winner == team || self.loser == team
    }

    /// Whether this toss was between exactly these two teams, in either role.
    pub fn is_between(&self, team: &str, opponent: &str) -> bool {
        (self.winner == team && self.loser == opponent)
            || (self.winner == opponent && self.loser == team)
    }

    /// `Some(true)` if the team won the flip, `Some(false)` if it lost,
    /// `None` if it did not take part.
    pub fn outcome_for(&self, team: &str) -> Option<bool> {
        if self.winner == team {
            Some(true)
        } else if self.loser == team {
            Some(false)
        } else {
            None
        }
    }

    /// The other participant, if the team took part.
    pub fn opponent_of(&self, team: &str) -> Option<&str> {
        match self.outcome_for(team)? {
            true => Some(&self.loser),
            false => Some(&self.winner),
        }
    }

    /// Regular toss whose winner chose to defer.
    pub fn is_defer(&self) -> bool {
        self.is_regular() && self.winner_choice == Some(TossChoice::Defer)
    }

    /// Regular toss whose winner chose to receive.
    pub fn is_receive(&self) -> bool {
        self.is_regular() && self.winner_choice == Some(TossChoice::Receive)
    }

    /// Both participants, lexicographically ordered.
    pub fn team_pair(&self) -> (&str, &str) {
        if self.winner <= self.loser {
            (&self.winner, &self.loser)
        } else {
            (&self.loser, &self.winner)
        }
    }
}

/// Parse a game date from either `YYYY-MM-DD` or an ISO-8601 timestamp.
///
/// Only the literal calendar prefix is read. A timestamp is never shifted
/// through a time zone, so `2021-09-12T23:30:00-07:00` is 2021-09-12.
pub fn parse_game_date(raw: &str) -> Option<NaiveDate> {
    let date_part = raw.trim().get(..10)?;
    NaiveDate::parse_from_str(date_part, "%Y-%m-%d").ok()
}

fn deserialize_game_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    // Unreadable dates degrade to "no date" so ordering falls back to season/week.
    Ok(raw.as_deref().and_then(parse_game_date))
}
