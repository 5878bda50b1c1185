//! High score leaderboard
//!
//! The score is the completion time - lower is better. Records append to
//! the store with no dedup; reads come back sorted ascending by time.
//! Store failures never reach the simulation: a bad read degrades to an
//! empty list, a bad write is logged and dropped.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Maximum number of rows shown on the leaderboard
pub const MAX_HIGH_SCORES: usize = 10;

/// A single finished-run record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreRecord {
    /// Player name, capped at entry time
    pub name: String,
    /// Completion time in whole seconds; lower ranks higher
    pub time_seconds: u64,
    /// Unix seconds when the run finished
    pub date: u64,
}

/// Persistence collaborator for finished runs
pub trait ScoreStore {
    /// Top `n` records ascending by completion time. Failures degrade to
    /// an empty list.
    fn load_top(&self, n: usize) -> Vec<ScoreRecord>;
    /// Append one record. Failures are logged and swallowed.
    fn save(&mut self, record: ScoreRecord);
}

fn top_n(mut records: Vec<ScoreRecord>, n: usize) -> Vec<ScoreRecord> {
    records.sort_by_key(|r| r.time_seconds);
    records.truncate(n);
    records
}

/// In-memory store for tests and the demo harness
#[derive(Debug, Default)]
pub struct MemoryStore {
    pub records: Vec<ScoreRecord>,
}

impl ScoreStore for MemoryStore {
    fn load_top(&self, n: usize) -> Vec<ScoreRecord> {
        top_n(self.records.clone(), n)
    }

    fn save(&mut self, record: ScoreRecord) {
        self.records.push(record);
    }
}

/// JSON-file-backed store
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn read_all(&self) -> Vec<ScoreRecord> {
        match fs::read_to_string(&self.path) {
            Ok(json) => match serde_json::from_str(&json) {
                Ok(records) => records,
                Err(err) => {
                    log::warn!("unreadable score file {:?}: {err}", self.path);
                    Vec::new()
                }
            },
            // Missing file is the normal first-run case
            Err(_) => Vec::new(),
        }
    }
}

impl ScoreStore for JsonFileStore {
    fn load_top(&self, n: usize) -> Vec<ScoreRecord> {
        top_n(self.read_all(), n)
    }

    fn save(&mut self, record: ScoreRecord) {
        let mut records = self.read_all();
        records.push(record);
        let json = match serde_json::to_string_pretty(&records) {
            Ok(json) => json,
            Err(err) => {
                log::warn!("score serialization failed: {err}");
                return;
            }
        };
        if let Err(err) = fs::write(&self.path, json) {
            log::warn!("score save to {:?} failed: {err}", self.path);
        } else {
            log::info!("saved score ({} records)", records.len());
        }
    }
}

/// Current time as unix seconds, for stamping records
pub fn unix_now() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

/// mm:ss formatting for the HUD clock and leaderboard rows
pub fn format_clock(total_secs: u64) -> String {
    format!("{:02}:{:02}", total_secs / 60, total_secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(name: &str, time_seconds: u64) -> ScoreRecord {
        ScoreRecord {
            name: name.into(),
            time_seconds,
            date: 1_700_000_000,
        }
    }

    #[test]
    fn test_load_top_sorts_ascending_and_truncates() {
        let mut store = MemoryStore::default();
        for (name, time) in [("C", 300), ("A", 100), ("B", 200)] {
            store.save(record(name, time));
        }

        let top = store.load_top(2);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "A");
        assert_eq!(top[1].name, "B");
    }

    #[test]
    fn test_append_keeps_duplicates() {
        let mut store = MemoryStore::default();
        store.save(record("SAME", 60));
        store.save(record("SAME", 60));
        assert_eq!(store.load_top(10).len(), 2);
    }

    #[test]
    fn test_file_store_round_trip() {
        let path = std::env::temp_dir().join(format!("comet_breaker_scores_{}.json", unix_now()));
        let _ = fs::remove_file(&path);

        let mut store = JsonFileStore::new(&path);
        assert!(store.load_top(10).is_empty());

        store.save(record("ACE", 95));
        store.save(record("ZED", 40));

        let top = store.load_top(10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].name, "ZED");

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_corrupt_file_degrades_to_empty() {
        let path = std::env::temp_dir().join(format!("comet_breaker_corrupt_{}.json", unix_now()));
        fs::write(&path, "not json at all").unwrap();

        let store = JsonFileStore::new(&path);
        assert!(store.load_top(10).is_empty());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_format_clock() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(75), "01:15");
        assert_eq!(format_clock(600), "10:00");
    }
}
