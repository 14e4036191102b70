//! JSONL (JSON Lines) storage.
//!
//! Each line is a JSON object holding one toss, game or team. Lines that do
//! not parse are logged and skipped so one bad row never hides the rest.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use super::{StorageConfig, StorageError};
use crate::calculate::TableLookup;
use crate::models::{Game, Team, Toss};

/// JSONL file reader.
pub struct JsonlReader<T> {
    path: PathBuf,
    _marker: PhantomData<T>,
}

impl<T: DeserializeOwned> JsonlReader<T> {
    /// Create a new JSONL reader for the given path.
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            _marker: PhantomData,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Check if the file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Read all entities from the file. A missing file reads as empty.
    pub fn read_all(&self) -> Result<Vec<T>, StorageError> {
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let file = File::open(&self.path)?;
        let reader = BufReader::new(file);
        let mut entities = Vec::new();
        let mut skipped = 0usize;

        for (index, line) in reader.lines().enumerate() {
            let line = line?;

            if line.trim().is_empty() {
                continue;
            }

            match serde_json::from_str(&line) {
                Ok(entity) => entities.push(entity),
                Err(e) => {
                    skipped += 1;
                    warn!(
                        "Failed to parse line {} in {:?}: {}",
                        index + 1,
                        self.path,
                        e
                    );
                }
            }
        }

        debug!(
            "Read {} entities from {:?} ({} skipped)",
            entities.len(),
            self.path,
            skipped
        );
        Ok(entities)
    }

    /// Read entities matching a predicate.
    pub fn read_where<F>(&self, predicate: F) -> Result<Vec<T>, StorageError>
    where
        F: Fn(&T) -> bool,
    {
        let all = self.read_all()?;
        Ok(all.into_iter().filter(predicate).collect())
    }
}

/// Everything a query needs, loaded from the data directory.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub tosses: Vec<Toss>,
    pub games: Vec<Game>,
    pub teams: Vec<Team>,
}

impl Dataset {
    /// Load the three collections. Missing game or team files leave those
    /// lookups empty; a missing toss file is an error.
    pub fn load(config: &StorageConfig) -> Result<Self, StorageError> {
        let tosses: JsonlReader<Toss> = JsonlReader::new(config.tosses_path());
        if !tosses.exists() {
            return Err(StorageError::PathNotFound(config.tosses_path()));
        }

        let dataset = Self {
            tosses: tosses.read_all()?,
            games: JsonlReader::new(config.games_path()).read_all()?,
            teams: JsonlReader::new(config.teams_path()).read_all()?,
        };

        info!(
            tosses = dataset.tosses.len(),
            games = dataset.games.len(),
            teams = dataset.teams.len(),
            "Loaded dataset from {:?}",
            config.data_dir
        );
        Ok(dataset)
    }

    /// Index games and teams for lookup.
    pub fn lookup(&self) -> TableLookup<'_> {
        TableLookup::new(&self.games, &self.teams)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculate::DataLookup;
    use crate::models::{TossChoice, TossType};
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> StorageConfig {
        StorageConfig::new(temp_dir.path().to_path_buf())
    }

    #[test]
    fn test_read_all_skips_bad_lines() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("teams.jsonl");

        std::fs::write(
            &path,
            r#"{"abbreviation":"KC","name":"Kansas City Chiefs"}
not-valid-json

{"abbreviation":"OAK","name":"Oakland Raiders","defunct":true}
"#,
        )
        .unwrap();

        let reader: JsonlReader<Team> = JsonlReader::new(path);
        let teams = reader.read_all().unwrap();
        assert_eq!(teams.len(), 2);
        assert_eq!(teams[0].abbreviation, "KC");
        assert!(teams[1].defunct);
    }

    #[test]
    fn test_read_missing_file_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let reader: JsonlReader<Game> = JsonlReader::new(temp_dir.path().join("none.jsonl"));

        assert!(!reader.exists());
        assert!(reader.read_all().unwrap().is_empty());
    }

    #[test]
    fn test_read_where() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("games.jsonl");
        std::fs::write(
            &path,
            r#"{"game_id":"g1","home_team":"KC","away_team":"BUF","home_score":42,"away_score":36}
{"game_id":"g2","home_team":"NE","away_team":"MIA","home_score":null,"away_score":null}
"#,
        )
        .unwrap();

        let reader: JsonlReader<Game> = JsonlReader::new(path);
        let scored = reader.read_where(|g| g.has_result()).unwrap();
        assert_eq!(scored.len(), 1);
        assert_eq!(scored[0].game_id, "g1");
    }

    #[test]
    fn test_read_tosses_with_source_codes() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tosses.jsonl");
        std::fs::write(
            &path,
            r#"{"game_id":"g1","season":2023,"week":1,"game_date":"2023-09-07T20:20:00Z","game_type":"REG","toss_type":"REG","winner":"DET","loser":"KC","winner_choice":"defer"}
{"game_id":"g1","season":2023,"week":1,"game_date":"","game_type":"REG","toss_type":"OT","winner":"KC","loser":"DET"}
{"game_id":"g2","season":2023,"week":1,"game_type":"REG","toss_type":"REG","winner":"BUF"}
"#,
        )
        .unwrap();

        let reader: JsonlReader<Toss> = JsonlReader::new(path);
        let tosses = reader.read_all().unwrap();

        // The third row has no loser and is skipped
        assert_eq!(tosses.len(), 2);
        assert_eq!(
            tosses[0].game_date,
            chrono::NaiveDate::from_ymd_opt(2023, 9, 7)
        );
        assert_eq!(tosses[0].winner_choice, Some(TossChoice::Defer));
        assert_eq!(tosses[1].toss_type, TossType::Overtime);
        assert_eq!(tosses[1].game_date, None);
    }

    #[test]
    fn test_dataset_load() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);
        std::fs::write(
            config.tosses_path(),
            r#"{"game_id":"g1","season":2020,"week":1,"game_type":"REG","toss_type":"REG","winner":"KC","loser":"HOU"}"#,
        )
        .unwrap();
        std::fs::write(
            config.games_path(),
            r#"{"game_id":"g1","home_team":"KC","away_team":"HOU","home_score":34,"away_score":20}"#,
        )
        .unwrap();

        let dataset = Dataset::load(&config).unwrap();
        assert_eq!(dataset.tosses.len(), 1);
        assert_eq!(dataset.games.len(), 1);
        assert!(dataset.teams.is_empty());

        let lookup = dataset.lookup();
        assert!(lookup.game_for(&dataset.tosses[0]).is_some());
        assert!(lookup.team_for("KC").is_none());
    }

    #[test]
    fn test_dataset_requires_tosses() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let result = Dataset::load(&config);
        assert!(matches!(result, Err(StorageError::PathNotFound(_))));
    }
}
