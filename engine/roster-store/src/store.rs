use async_trait::async_trait;
use rank_aggregator::{RosterEntry, RosterSource};
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::defaults::default_roster;
use crate::error::{Result, RosterError};

/// Roster persisted as a JSON array of `{name, position}` records
///
/// All reads and writes go through one lock, so a reader never sees a
/// half-applied change from a concurrent writer.
#[derive(Debug)]
pub struct JsonRosterStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonRosterStore {
    /// Open the roster file, writing the default roster if it does not exist
    pub async fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let store = Self { path: path.as_ref().to_path_buf(), lock: Mutex::new(()) };

        if let Some(parent) = store.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).await?;
        }

        if fs::try_exists(&store.path).await? {
            debug!("Using existing roster file {:?}", store.path);
        } else {
            let roster = default_roster();
            info!("Seeding roster file {:?} with {} default players", store.path, roster.len());
            store.write_entries(&roster).await?;
        }

        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All rostered players ordered by name
    pub async fn list(&self) -> Result<Vec<RosterEntry>> {
        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    /// Add a player; name and position are trimmed before storing.
    ///
    /// Fails with `Duplicate` when a player with the same name, ignoring case
    /// and surrounding whitespace, is already rostered.
    pub async fn add(&self, name: &str, position: &str) -> Result<RosterEntry> {
        let name = name.trim();
        let position = position.trim();
        if name.is_empty() {
            return Err(RosterError::InvalidEntry("name must not be blank".to_string()));
        }
        if position.is_empty() {
            return Err(RosterError::InvalidEntry("position must not be blank".to_string()));
        }

        let _guard = self.lock.lock().await;
        let mut entries = self.read_entries().await?;
        if entries.iter().any(|entry| same_name(&entry.name, name)) {
            return Err(RosterError::Duplicate(name.to_string()));
        }

        let entry = RosterEntry::new(name, position);
        entries.push(entry.clone());
        self.write_entries(&entries).await?;

        info!("Added {} ({}) to roster", entry.name, entry.position);
        Ok(entry)
    }

    /// Remove every player whose name matches, ignoring case and surrounding
    /// whitespace. Returns the removed entries.
    pub async fn remove(&self, name: &str) -> Result<Vec<RosterEntry>> {
        let _guard = self.lock.lock().await;
        let entries = self.read_entries().await?;

        let (removed, kept): (Vec<RosterEntry>, Vec<RosterEntry>) =
            entries.into_iter().partition(|entry| same_name(&entry.name, name));
        if removed.is_empty() {
            return Err(RosterError::NotFound(name.trim().to_string()));
        }

        self.write_entries(&kept).await?;
        info!("Removed {} roster entries matching {:?}", removed.len(), name.trim());
        Ok(removed)
    }

    async fn read_entries(&self) -> Result<Vec<RosterEntry>> {
        let content = fs::read_to_string(&self.path).await?;
        Ok(serde_json::from_str(&content)?)
    }

    async fn write_entries(&self, entries: &[RosterEntry]) -> Result<()> {
        let json = serde_json::to_string_pretty(entries)?;
        let tmp = self.temp_path();
        fs::write(&tmp, json).await?;
        fs::rename(&tmp, &self.path).await?;
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl RosterSource for JsonRosterStore {
    async fn load_roster(&self) -> anyhow::Result<Vec<RosterEntry>> {
        Ok(self.list().await?)
    }
}

fn same_name(stored: &str, requested: &str) -> bool {
    stored.trim().to_lowercase() == requested.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn open_in(dir: &TempDir) -> JsonRosterStore {
        JsonRosterStore::open(dir.path().join("players.json")).await.unwrap()
    }

    #[test]
    fn test_same_name_ignores_case_and_whitespace() {
        assert!(same_name("Chris Olave", "  chris olave "));
        assert!(!same_name("Chris Olave", "Chris Olav"));
    }

    #[tokio::test]
    async fn test_temp_file_sits_next_to_roster() {
        let dir = TempDir::new().unwrap();
        let store = open_in(&dir).await;
        assert_eq!(store.temp_path(), dir.path().join("players.json.tmp"));
        assert!(!store.temp_path().exists());
    }

    #[tokio::test]
    async fn test_list_is_sorted_by_name() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.json");
        std::fs::write(
            &path,
            r#"[{"name":"Tony Pollard","position":"RB"},{"name":"Bijan Robinson","position":"RB"}]"#,
        )
        .unwrap();

        let store = JsonRosterStore::open(&path).await.unwrap();
        let names: Vec<String> = store.list().await.unwrap().into_iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Bijan Robinson", "Tony Pollard"]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_json_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("players.json");
        std::fs::write(&path, "not json").unwrap();

        let store = JsonRosterStore::open(&path).await.unwrap();
        assert!(matches!(store.list().await, Err(RosterError::Json(_))));
    }
}
