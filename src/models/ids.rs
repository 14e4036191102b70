//! Deterministic game keys using SHA256 hashing.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

/// Identity of one scheduled contest, derived from its schedule slot.
///
/// A Regular and an Overtime toss from the same game map to the same key,
/// which is what lets head-to-head rollups count games once.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameKey(String);

impl GameKey {
    /// Generate a key from input fields.
    /// Uses SHA256 and takes the first 16 characters for brevity.
    pub fn generate(fields: &[&str]) -> Self {
        let mut hasher = Sha256::new();
        for (i, field) in fields.iter().enumerate() {
            if i > 0 {
                hasher.update(b"|");
            }
            hasher.update(field.as_bytes());
        }
        let hash = hex::encode(hasher.finalize());
        Self(hash[..16].to_string())
    }

    /// Key for a game in a schedule slot with known home/away sides.
    pub fn for_slot(season: i32, week: u32, home_team: &str, away_team: &str) -> Self {
        Self::generate(&[
            &season.to_string(),
            &week.to_string(),
            home_team,
            away_team,
        ])
    }

    /// Key for a game whose home/away sides are unknown.
    ///
    /// The pair is sorted so either participant order yields the same key.
    pub fn for_pairing(season: i32, week: u32, team_a: &str, team_b: &str) -> Self {
        let (first, second) = if team_a <= team_b {
            (team_a, team_b)
        } else {
            (team_b, team_a)
        };
        Self::generate(&[&season.to_string(), &week.to_string(), first, second, "?"])
    }

    /// Get the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for GameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "GameKey({})", self.0)
    }
}
