//! Game and team lookups used by the aggregators.

use std::collections::HashMap;

use crate::models::{Game, Team, Toss};

/// Resolves the game and team rows a toss refers to.
///
/// A missing row is never an error: aggregators treat it as "no data".
pub trait DataLookup {
    /// The game a toss belongs to.
    fn game_for(&self, toss: &Toss) -> Option<&Game>;

    /// Team reference data by abbreviation.
    fn team_for(&self, abbreviation: &str) -> Option<&Team>;

    /// Whether the team is flagged defunct. Unknown teams are not.
    fn is_defunct(&self, abbreviation: &str) -> bool {
        self.team_for(abbreviation).is_some_and(|t| t.defunct)
    }
}

/// Hash-map backed lookup over borrowed game and team tables.
#[derive(Debug, Default)]
pub struct TableLookup<'a> {
    games: HashMap<&'a str, &'a Game>,
    teams: HashMap<&'a str, &'a Team>,
}

impl<'a> TableLookup<'a> {
    /// Index the tables. Later rows win when an id repeats.
    pub fn new(games: &'a [Game], teams: &'a [Team]) -> Self {
        Self {
            games: games.iter().map(|g| (g.game_id.as_str(), g)).collect(),
            teams: teams.iter().map(|t| (t.abbreviation.as_str(), t)).collect(),
        }
    }

    pub fn game_count(&self) -> usize {
        self.games.len()
    }

    pub fn team_count(&self) -> usize {
        self.teams.len()
    }
}

impl DataLookup for TableLookup<'_> {
    fn game_for(&self, toss: &Toss) -> Option<&Game> {
        self.games.get(toss.game_id.as_str()).copied()
    }

    fn team_for(&self, abbreviation: &str) -> Option<&Team> {
        self.teams.get(abbreviation).copied()
    }
}
