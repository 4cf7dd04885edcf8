//! Selection history
//!
//! Finished rounds become selection records the caller can post to its
//! logging endpoint. A bounded local history keeps the most recent ones.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::prize::Assignment;

/// Maximum number of records to keep
pub const MAX_HISTORY: usize = 20;

/// One finished round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SelectionRecord {
    /// Unix timestamp (ms) when the round finished
    pub timestamp: f64,
    /// Session seed, enough to replay the round
    pub seed: u64,
    /// Player -> prize, in start column order
    pub assignments: Vec<Assignment>,
}

impl SelectionRecord {
    /// Prize name won by a player, if they played this round
    pub fn prize_for(&self, player: &str) -> Option<&str> {
        self.assignments
            .iter()
            .find(|a| a.player.name == player)
            .map(|a| a.prize.name.as_str())
    }
}

/// Recent rounds, newest first
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SelectionHistory {
    pub entries: Vec<SelectionRecord>,
}

impl SelectionHistory {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Add a record, dropping the oldest past the cap
    pub fn add(&mut self, record: SelectionRecord) {
        self.entries.insert(0, record);
        self.entries.truncate(MAX_HISTORY);
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn latest(&self) -> Option<&SelectionRecord> {
        self.entries.first()
    }

    /// How many recorded rounds awarded a prize id
    pub fn times_won(&self, prize_id: &str) -> usize {
        self.entries
            .iter()
            .flat_map(|r| &r.assignments)
            .filter(|a| a.prize.id == prize_id)
            .count()
    }

    /// Load history, starting fresh when the file is missing or corrupt
    pub fn load(path: &Path) -> Self {
        let read = || -> Result<Self, StoreError> {
            let json = std::fs::read_to_string(path)?;
            Ok(serde_json::from_str(&json)?)
        };
        match read() {
            Ok(history) => {
                log::info!("Loaded {} selection records", history.entries.len());
                history
            }
            Err(e) => {
                log::warn!("No usable history at {} ({}), starting fresh", path.display(), e);
                Self::new()
            }
        }
    }

    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let json = serde_json::to_string(self)?;
        std::fs::write(path, json)?;
        log::info!("History saved ({} entries)", self.entries.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prize::{Player, Prize};

    fn record(timestamp: f64, winner: &str, prize: &str) -> SelectionRecord {
        SelectionRecord {
            timestamp,
            seed: 1,
            assignments: vec![Assignment {
                player: Player {
                    name: winner.to_string(),
                },
                start_column: 0,
                terminal_column: 1,
                prize: Prize::new(prize, format!("{} Kitchen", prize)),
            }],
        }
    }

    #[test]
    fn test_add_keeps_newest_first_and_caps() {
        let mut history = SelectionHistory::new();
        for i in 0..(MAX_HISTORY + 5) {
            history.add(record(i as f64, "a", "r0"));
        }
        assert_eq!(history.len(), MAX_HISTORY);
        assert_eq!(history.latest().map(|r| r.timestamp), Some((MAX_HISTORY + 4) as f64));
    }

    #[test]
    fn test_prize_for_and_times_won() {
        let mut history = SelectionHistory::new();
        history.add(record(1.0, "Ann", "r1"));
        history.add(record(2.0, "Bo", "r1"));
        history.add(record(3.0, "Ann", "r2"));

        assert_eq!(history.times_won("r1"), 2);
        assert_eq!(history.times_won("r9"), 0);
        let latest = history.latest().unwrap();
        assert_eq!(latest.prize_for("Ann"), Some("r2 Kitchen"));
        assert_eq!(latest.prize_for("Bo"), None);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("ghost_leg_history_{}.json", std::process::id()));
        let mut history = SelectionHistory::new();
        history.add(record(5.0, "Cy", "r3"));
        history.save(&path).unwrap();

        let loaded = SelectionHistory::load(&path);
        assert_eq!(loaded.entries, history.entries);
        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_load_corrupt_starts_fresh() {
        let path = std::env::temp_dir().join(format!("ghost_leg_bad_history_{}.json", std::process::id()));
        std::fs::write(&path, "not json").unwrap();
        assert!(SelectionHistory::load(&path).is_empty());
        let _ = std::fs::remove_file(&path);
    }
}
