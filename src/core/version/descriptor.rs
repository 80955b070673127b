// ─── Version Descriptor ───
// Typed per-version JSON: main class, artifacts, libraries, launch arguments.
// Decoded once at the boundary; silent dict-walking defaults are replaced by
// explicit serde defaults documented on each field.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::{debug, info};

use crate::core::downloader::{DownloadEntry, Downloader};
use crate::core::error::{LauncherError, LauncherResult};
use crate::core::paths::LauncherPaths;
use crate::core::platform::Platform;

use super::rules::{self, Rule};

fn default_main_class() -> String {
    "net.minecraft.client.main.Main".to_string()
}

fn default_version_type() -> String {
    "release".to_string()
}

/// A fully parsed version descriptor document.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VersionDescriptor {
    #[serde(default)]
    pub id: Option<String>,
    /// Defaults to the vanilla client entry point when absent.
    #[serde(default = "default_main_class")]
    pub main_class: String,
    /// Defaults to `release` when absent.
    #[serde(rename = "type", default = "default_version_type")]
    pub version_type: String,
    #[serde(default)]
    pub asset_index: Option<AssetIndexRef>,
    #[serde(default)]
    pub downloads: Option<VersionDownloads>,
    #[serde(default)]
    pub libraries: Vec<LibraryEntry>,
    #[serde(default)]
    pub arguments: Option<Arguments>,
    /// Legacy single-string argument blob (pre-1.13 descriptors).
    #[serde(default)]
    pub minecraft_arguments: Option<String>,
    #[serde(default)]
    pub java_version: Option<JavaVersionInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JavaVersionInfo {
    pub major_version: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AssetIndexRef {
    pub id: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub sha1: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct VersionDownloads {
    pub client: Option<DownloadArtifact>,
}

/// A downloadable binary with its expected content digest.
#[derive(Debug, Clone, Deserialize)]
pub struct DownloadArtifact {
    pub sha1: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub size: Option<u64>,
    pub url: String,
}

// ─── Arguments ───

#[derive(Debug, Default, Deserialize)]
pub struct Arguments {
    #[serde(default)]
    pub game: Vec<ArgumentSpec>,
    #[serde(default)]
    pub jvm: Vec<ArgumentSpec>,
}

/// One entry of a structured argument list: either a literal token, or a
/// value gated by a rule list.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArgumentSpec {
    Literal(String),
    Conditional {
        #[serde(default)]
        rules: Vec<Rule>,
        value: ArgumentValue,
    },
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ArgumentValue {
    Single(String),
    Many(Vec<String>),
}

impl ArgumentSpec {
    /// Append this spec's value(s) to `out` when its rules accept the
    /// target platform. List values expand in their internal order.
    pub fn append_for(&self, platform: Platform, out: &mut Vec<String>) {
        match self {
            ArgumentSpec::Literal(token) => out.push(token.clone()),
            ArgumentSpec::Conditional { rules, value } => {
                if rules::evaluate(rules, platform) {
                    match value {
                        ArgumentValue::Single(token) => out.push(token.clone()),
                        ArgumentValue::Many(tokens) => out.extend(tokens.iter().cloned()),
                    }
                }
            }
        }
    }
}

// ─── Libraries ───

#[derive(Debug, Deserialize)]
pub struct LibraryEntry {
    pub name: String,
    #[serde(default)]
    pub downloads: Option<LibraryDownloads>,
    #[serde(default)]
    pub rules: Option<Vec<Rule>>,
    #[serde(default)]
    pub natives: Option<HashMap<String, String>>,
}

#[derive(Debug, Deserialize)]
pub struct LibraryDownloads {
    #[serde(default)]
    pub artifact: Option<LibraryArtifact>,
    #[serde(default)]
    pub classifiers: Option<HashMap<String, LibraryArtifact>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LibraryArtifact {
    pub path: String,
    pub sha1: String,
    #[allow(dead_code)]
    #[serde(default)]
    pub size: Option<u64>,
    pub url: String,
}

impl LibraryEntry {
    /// Whether this library's rule list accepts the target platform.
    pub fn is_allowed_for(&self, platform: Platform) -> bool {
        match &self.rules {
            Some(rules) => rules::evaluate(rules, platform),
            None => true,
        }
    }

    /// Native classifier key for the target platform, `${arch}` resolved
    /// against the machine actually running the backend.
    pub fn native_classifier_for(&self, platform: Platform) -> Option<String> {
        let natives = self.natives.as_ref()?;
        let raw = natives.get(platform.manifest_name())?;
        let arch = if cfg!(target_arch = "x86_64") {
            "64"
        } else {
            "32"
        };
        Some(raw.replace("${arch}", arch))
    }

    /// The rule-selected native bundle artifact for the target platform.
    pub fn native_artifact_for(&self, platform: Platform) -> Option<&LibraryArtifact> {
        if !self.is_allowed_for(platform) {
            return None;
        }
        let classifier = self.native_classifier_for(platform)?;
        self.downloads
            .as_ref()?
            .classifiers
            .as_ref()?
            .get(&classifier)
    }
}

impl VersionDescriptor {
    /// Fetch and parse a descriptor from its manifest URL. Always fetched
    /// fresh; a persisted local copy is never trusted as a substitute.
    pub async fn fetch(client: &reqwest::Client, url: &str) -> LauncherResult<(Self, String)> {
        let raw = client.get(url).send().await?.text().await?;
        let descriptor: VersionDescriptor = serde_json::from_str(&raw)?;
        Ok((descriptor, raw))
    }

    /// Persist the raw descriptor document to the version directory for
    /// inspection and for re-reading at plan time.
    pub async fn save_to(raw_json: &str, descriptor_path: &Path) -> LauncherResult<()> {
        if let Some(parent) = descriptor_path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|source| LauncherError::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
        }
        tokio::fs::write(descriptor_path, raw_json)
            .await
            .map_err(|source| LauncherError::Io {
                path: descriptor_path.to_path_buf(),
                source,
            })?;
        Ok(())
    }

    /// Re-read a persisted descriptor. Unreadable or malformed local copies
    /// are a configuration failure surfaced to the caller, never retried.
    pub fn load(descriptor_path: &Path) -> LauncherResult<Self> {
        let raw = std::fs::read_to_string(descriptor_path).map_err(|source| {
            LauncherError::Config(format!(
                "cannot read descriptor {:?}: {}",
                descriptor_path, source
            ))
        })?;
        serde_json::from_str(&raw).map_err(|source| {
            LauncherError::Config(format!(
                "cannot parse descriptor {:?}: {}",
                descriptor_path, source
            ))
        })
    }

    /// Asset index id, defaulting to `legacy` when the descriptor carries
    /// no asset index at all.
    pub fn asset_index_id(&self) -> &str {
        self.asset_index
            .as_ref()
            .map(|ai| ai.id.as_str())
            .unwrap_or("legacy")
    }

    /// Required Java major version; modern descriptors declare it, older
    /// ones fall back to the managed default.
    pub fn required_java_major(&self) -> u32 {
        self.java_version
            .as_ref()
            .map(|j| j.major_version)
            .unwrap_or(21)
    }

    /// The client artifact reference, required for any launch.
    pub fn client_artifact(&self, version_id: &str) -> LauncherResult<&DownloadArtifact> {
        self.downloads
            .as_ref()
            .and_then(|d| d.client.as_ref())
            .ok_or_else(|| LauncherError::MissingClientArtifact(version_id.to_string()))
    }

    /// Ensure the client jar is present and digest-valid in the version
    /// directory.
    pub async fn ensure_client(
        &self,
        version_id: &str,
        paths: &LauncherPaths,
        downloader: &Downloader,
    ) -> LauncherResult<PathBuf> {
        let client = self.client_artifact(version_id)?;
        let jar_path = paths.client_jar_path(version_id);
        downloader
            .ensure_file(&client.url, &jar_path, Some(&client.sha1))
            .await?;
        info!("Client jar ready for {}", version_id);
        Ok(jar_path)
    }

    /// Ensure every declared library artifact is present and digest-valid
    /// in the library store. Returns local paths in declaration order —
    /// the same order the classpath is emitted in. Libraries are fetched
    /// unconditionally so every emitted classpath entry resolves; rules
    /// gate only argument specs and native bundles.
    pub async fn ensure_libraries(
        &self,
        paths: &LauncherPaths,
        downloader: &Downloader,
    ) -> LauncherResult<Vec<PathBuf>> {
        let libs_dir = paths.libraries_dir();
        let mut local_paths = Vec::new();
        let mut entries = Vec::new();

        for lib in &self.libraries {
            let Some(artifact) = lib.downloads.as_ref().and_then(|d| d.artifact.as_ref()) else {
                debug!("Library {} declares no artifact; skipping", lib.name);
                continue;
            };
            let dest = libs_dir.join(&artifact.path);
            entries.push(DownloadEntry {
                url: artifact.url.clone(),
                dest: dest.clone(),
                sha1: Some(artifact.sha1.clone()),
            });
            local_paths.push(dest);
        }

        let failures = downloader.ensure_batch(entries).await;
        if let Some((entry, error)) = failures.into_iter().next() {
            debug!("Library download failed: {:?}", entry.dest);
            return Err(error);
        }

        info!(
            "Library store ready: {} of {} entries carry artifacts",
            local_paths.len(),
            self.libraries.len()
        );
        Ok(local_paths)
    }

    /// Ensure the rule-selected native bundle jars for the target platform
    /// are present. Returns their local paths for extraction.
    pub async fn ensure_native_bundles(
        &self,
        platform: Platform,
        paths: &LauncherPaths,
        downloader: &Downloader,
    ) -> LauncherResult<Vec<PathBuf>> {
        let libs_dir = paths.libraries_dir();
        let mut local_paths = Vec::new();
        let mut entries = Vec::new();

        for lib in &self.libraries {
            let Some(artifact) = lib.native_artifact_for(platform) else {
                continue;
            };
            let dest = libs_dir.join(&artifact.path);
            entries.push(DownloadEntry {
                url: artifact.url.clone(),
                dest: dest.clone(),
                sha1: Some(artifact.sha1.clone()),
            });
            local_paths.push(dest);
        }

        let failures = downloader.ensure_batch(entries).await;
        if let Some((_, error)) = failures.into_iter().next() {
            return Err(error);
        }

        Ok(local_paths)
    }

    /// Classpath entries for this descriptor in emission order: client jar
    /// first, then every library that declares an artifact, declaration
    /// order, duplicates preserved.
    pub fn classpath_artifact_paths(&self, paths: &LauncherPaths) -> Vec<PathBuf> {
        let libs_dir = paths.libraries_dir();
        self.libraries
            .iter()
            .filter_map(|lib| lib.downloads.as_ref()?.artifact.as_ref())
            .map(|artifact| libs_dir.join(&artifact.path))
            .collect()
    }
}
