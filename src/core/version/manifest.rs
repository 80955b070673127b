// ─── Version Manifest ───
// Fetches and parses the global version index, bucketed by channel.

use std::collections::HashMap;

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::error::LauncherResult;

pub const VERSION_MANIFEST_URL: &str =
    "https://launchermeta.mojang.com/mc/game/version_manifest.json";

/// Raw top-level manifest document.
#[derive(Debug, Deserialize)]
pub struct VersionManifest {
    pub latest: LatestPointers,
    pub versions: Vec<VersionEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LatestPointers {
    pub release: String,
    pub snapshot: String,
}

/// A single entry in the manifest index.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionEntry {
    pub id: String,
    #[serde(rename = "type")]
    pub version_type: String,
    pub url: String,
}

/// Classification bucket for an installable version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    LatestRelease,
    LatestSnapshot,
    Release,
    Snapshot,
    OldBeta,
    OldAlpha,
}

impl Channel {
    /// Base channel for a manifest `type` string, if recognized.
    fn from_type(version_type: &str) -> Option<Channel> {
        match version_type {
            "release" => Some(Channel::Release),
            "snapshot" => Some(Channel::Snapshot),
            "old_beta" => Some(Channel::OldBeta),
            "old_alpha" => Some(Channel::OldAlpha),
            _ => None,
        }
    }
}

/// One fetched index snapshot: every listed version plus channel buckets.
///
/// A snapshot is immutable; refreshing means fetching a whole new value, so
/// a failed fetch can never corrupt a catalog a caller already holds.
#[derive(Debug)]
pub struct VersionCatalog {
    latest: LatestPointers,
    versions: Vec<VersionEntry>,
    channels: HashMap<Channel, Vec<String>>,
}

impl VersionCatalog {
    /// Fetch the version manifest using a shared HTTP client.
    pub async fn fetch(client: &reqwest::Client, manifest_url: &str) -> LauncherResult<Self> {
        info!("Fetching version manifest...");

        let raw = client.get(manifest_url).send().await?.text().await?;
        let manifest: VersionManifest = serde_json::from_str(&raw)?;

        info!("Loaded {} versions from manifest", manifest.versions.len());
        Ok(Self::from_manifest(manifest))
    }

    /// Classify a parsed manifest into channel buckets, manifest order
    /// preserved. The latest-release and latest-snapshot ids land in their
    /// marker channel in addition to their base-type channel. Entries with
    /// an unrecognized `type` stay resolvable by id but join no bucket.
    pub fn from_manifest(manifest: VersionManifest) -> Self {
        let mut channels: HashMap<Channel, Vec<String>> = HashMap::new();

        for entry in &manifest.versions {
            if entry.id == manifest.latest.release {
                channels
                    .entry(Channel::LatestRelease)
                    .or_default()
                    .push(entry.id.clone());
            }
            if entry.id == manifest.latest.snapshot {
                channels
                    .entry(Channel::LatestSnapshot)
                    .or_default()
                    .push(entry.id.clone());
            }

            match Channel::from_type(&entry.version_type) {
                Some(channel) => channels
                    .entry(channel)
                    .or_default()
                    .push(entry.id.clone()),
                None => debug!(
                    "Version {} has unknown type {:?}; resolvable by id only",
                    entry.id, entry.version_type
                ),
            }
        }

        Self {
            latest: manifest.latest,
            versions: manifest.versions,
            channels,
        }
    }

    /// Version ids in a channel, insertion order = manifest order.
    pub fn channel(&self, channel: Channel) -> &[String] {
        self.channels
            .get(&channel)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Find a version entry by id, bucketed or not.
    pub fn find(&self, id: &str) -> Option<&VersionEntry> {
        self.versions.iter().find(|v| v.id == id)
    }

    /// Like [`find`](Self::find), but a missing id is a configuration
    /// failure (unselected or stale version choice).
    pub fn require(&self, id: &str) -> LauncherResult<&VersionEntry> {
        self.find(id)
            .ok_or_else(|| crate::core::error::LauncherError::VersionNotFound(id.to_string()))
    }

    pub fn latest(&self) -> &LatestPointers {
        &self.latest
    }
}
