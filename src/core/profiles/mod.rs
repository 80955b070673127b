// ─── Accounts & Profiles ───
// Flat key-value JSON persistence for the front-end collaborator. The core
// only reads these to source a LaunchRequest's initial values.

use std::collections::BTreeMap;
use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::LaunchRequest;

/// One saved launch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Profile {
    pub version: String,
    pub username: String,
    pub ram: u32,
    #[serde(default)]
    pub mod_folder: Option<PathBuf>,
    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Profile {
    /// Source a launch request's initial values from this profile.
    pub fn launch_request(&self) -> LaunchRequest {
        LaunchRequest {
            version_id: self.version.clone(),
            username: self.username.clone(),
            ram_gigabytes: self.ram,
            mod_folder: self.mod_folder.clone(),
        }
    }
}

/// Profile name → profile, persisted as one flat JSON object.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: BTreeMap<String, Profile>,
}

impl ProfileStore {
    /// Load from disk; a missing or unreadable file yields an empty store.
    pub fn load(path: PathBuf) -> Self {
        let profiles = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, profiles }
    }

    pub fn save(&self) -> LauncherResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.profiles)?;
        std::fs::write(&self.path, json).map_err(|source| LauncherError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Insert or replace a profile, stamping the save time.
    pub fn insert(&mut self, name: &str, mut profile: Profile) {
        profile.saved_at = Some(Utc::now());
        self.profiles.insert(name.to_string(), profile);
        info!("Saved profile {}", name);
    }

    pub fn remove(&mut self, name: &str) -> Option<Profile> {
        self.profiles.remove(name)
    }

    pub fn get(&self, name: &str) -> Option<&Profile> {
        self.profiles.get(name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }
}

/// Username → opaque settings object, persisted as one flat JSON object.
/// The backend never interprets the settings payload.
#[derive(Debug)]
pub struct AccountStore {
    path: PathBuf,
    accounts: BTreeMap<String, serde_json::Value>,
}

impl AccountStore {
    pub fn load(path: PathBuf) -> Self {
        let accounts = std::fs::read_to_string(&path)
            .ok()
            .and_then(|raw| serde_json::from_str(&raw).ok())
            .unwrap_or_default();
        Self { path, accounts }
    }

    pub fn save(&self) -> LauncherResult<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| LauncherError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(&self.accounts)?;
        std::fs::write(&self.path, json).map_err(|source| LauncherError::Io {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    pub fn add(&mut self, username: &str) {
        self.accounts
            .entry(username.to_string())
            .or_insert_with(|| serde_json::json!({}));
    }

    pub fn remove(&mut self, username: &str) -> bool {
        self.accounts.remove(username).is_some()
    }

    pub fn usernames(&self) -> impl Iterator<Item = &str> {
        self.accounts.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch(tag: &str) -> PathBuf {
        let dir =
            std::env::temp_dir().join(format!("catclient-store-{}-{}", tag, std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn missing_file_loads_as_empty_store() {
        let dir = scratch("missing");
        let store = ProfileStore::load(dir.join("profiles.json"));
        assert_eq!(store.names().count(), 0);
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn profiles_round_trip_through_disk() {
        let dir = scratch("roundtrip");
        let path = dir.join("profiles.json");

        let mut store = ProfileStore::load(path.clone());
        store.insert(
            "default",
            Profile {
                version: "1.21".into(),
                username: "Steve".into(),
                ram: 4,
                mod_folder: Some(PathBuf::from("/mods")),
                saved_at: None,
            },
        );
        store.save().unwrap();

        let reloaded = ProfileStore::load(path);
        let profile = reloaded.get("default").unwrap();
        assert_eq!(profile.version, "1.21");
        assert_eq!(profile.ram, 4);
        assert!(profile.saved_at.is_some());

        let request = profile.launch_request();
        assert_eq!(request.version_id, "1.21");
        assert_eq!(request.username, "Steve");
        assert_eq!(request.ram_gigabytes, 4);
        assert_eq!(request.mod_folder, Some(PathBuf::from("/mods")));

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn accounts_are_opaque_unique_keys() {
        let dir = scratch("accounts");
        let path = dir.join("accounts.json");

        let mut store = AccountStore::load(path.clone());
        store.add("Steve");
        store.add("Steve");
        store.add("Alex");
        store.save().unwrap();

        let reloaded = AccountStore::load(path);
        let names: Vec<_> = reloaded.usernames().collect();
        assert_eq!(names, vec!["Alex", "Steve"]);

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn legacy_schema_without_saved_at_still_loads() {
        let dir = scratch("legacy");
        let path = dir.join("profiles.json");
        std::fs::write(
            &path,
            r#"{"old": {"version": "1.8.9", "username": "Alex", "ram": 2}}"#,
        )
        .unwrap();

        let store = ProfileStore::load(path);
        let profile = store.get("old").unwrap();
        assert_eq!(profile.ram, 2);
        assert!(profile.mod_folder.is_none());
        assert!(profile.saved_at.is_none());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
