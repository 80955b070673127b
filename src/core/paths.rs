// ─── On-Disk Layout ───
// Every root is configuration handed in by the caller; nothing is hardcoded
// beyond the conventional defaults.

use std::path::{Path, PathBuf};

const GAME_DIR_NAME: &str = ".minecraft";
const RUNTIME_DIR_NAME: &str = ".catclient/java";

/// Filesystem layout the backend reads and writes:
/// - `<game>/versions/<id>/<id>.json` — persisted version descriptor
/// - `<game>/versions/<id>/<id>.jar`  — verified client artifact
/// - `<game>/versions/<id>/natives`   — extracted native bundles
/// - `<game>/libraries/<artifact path>` — library store
/// - `<game>/assets` — asset root (populated by a collaborator)
/// - `<runtime>` — managed Java installs, keyed by version and platform
#[derive(Debug, Clone)]
pub struct LauncherPaths {
    game_dir: PathBuf,
    runtime_dir: PathBuf,
}

impl LauncherPaths {
    pub fn new(game_dir: PathBuf, runtime_dir: PathBuf) -> Self {
        Self {
            game_dir,
            runtime_dir,
        }
    }

    /// Conventional roots under the user's home directory.
    pub fn default_dirs() -> Self {
        let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
        Self {
            game_dir: home.join(GAME_DIR_NAME),
            runtime_dir: home.join(RUNTIME_DIR_NAME),
        }
    }

    pub fn game_dir(&self) -> &Path {
        &self.game_dir
    }

    pub fn runtime_dir(&self) -> &Path {
        &self.runtime_dir
    }

    pub fn versions_dir(&self) -> PathBuf {
        self.game_dir.join("versions")
    }

    pub fn version_dir(&self, version_id: &str) -> PathBuf {
        self.versions_dir().join(version_id)
    }

    pub fn descriptor_path(&self, version_id: &str) -> PathBuf {
        self.version_dir(version_id)
            .join(format!("{}.json", version_id))
    }

    pub fn client_jar_path(&self, version_id: &str) -> PathBuf {
        self.version_dir(version_id)
            .join(format!("{}.jar", version_id))
    }

    pub fn natives_dir(&self, version_id: &str) -> PathBuf {
        self.version_dir(version_id).join("natives")
    }

    pub fn libraries_dir(&self) -> PathBuf {
        self.game_dir.join("libraries")
    }

    pub fn assets_dir(&self) -> PathBuf {
        self.game_dir.join("assets")
    }

    pub fn accounts_path(&self) -> PathBuf {
        self.game_dir.join("accounts.json")
    }

    pub fn profiles_path(&self) -> PathBuf {
        self.game_dir.join("profiles.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_files_live_under_their_id_directory() {
        let paths = LauncherPaths::new(PathBuf::from("/data/game"), PathBuf::from("/data/java"));
        assert_eq!(
            paths.descriptor_path("1.21"),
            PathBuf::from("/data/game/versions/1.21/1.21.json")
        );
        assert_eq!(
            paths.client_jar_path("1.21"),
            PathBuf::from("/data/game/versions/1.21/1.21.jar")
        );
        assert_eq!(
            paths.natives_dir("1.21"),
            PathBuf::from("/data/game/versions/1.21/natives")
        );
        assert_eq!(paths.libraries_dir(), PathBuf::from("/data/game/libraries"));
    }
}
