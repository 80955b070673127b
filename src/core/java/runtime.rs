// ─── Java Runtime ───
// Decides which Java binary a launch should use. Downloading/installing a
// runtime is an external collaborator's job behind `RuntimeProvider`; this
// module only discovers and locates.

use std::path::{Path, PathBuf};
use std::process::Command;

use async_trait::async_trait;
use tracing::debug;

use crate::core::error::LauncherResult;
use crate::core::platform::Platform;

/// Directory name of the managed JDK under the runtime root.
const MANAGED_JDK_DIR: &str = "jdk-21.0.5+11";

/// Probe for a usable `java` on PATH.
pub fn find_system_java() -> Option<PathBuf> {
    let output = Command::new("java").arg("-version").output().ok()?;
    if output.status.success() {
        debug!("Found system java on PATH");
        Some(PathBuf::from("java"))
    } else {
        None
    }
}

/// Well-known location of the managed runtime binary for a platform,
/// whether or not anything is installed there yet.
pub fn expected_runtime_binary(runtime_dir: &Path, platform: Platform) -> PathBuf {
    runtime_dir
        .join(MANAGED_JDK_DIR)
        .join("bin")
        .join(platform.java_binary_name())
}

/// Java binary a launch plan should name: a discovered system runtime when
/// present, else the managed install location.
pub fn resolve_java_binary(runtime_dir: &Path, platform: Platform) -> PathBuf {
    match find_system_java() {
        Some(java) => java,
        None => expected_runtime_binary(runtime_dir, platform),
    }
}

/// Provisioning seam: implementations resolve a compatible runtime binary,
/// installing one if they know how. Failures surface as the provisioning
/// error kind and are terminal to the launch attempt.
#[async_trait]
pub trait RuntimeProvider: Send + Sync {
    async fn ensure_runtime(&self, platform: Platform) -> LauncherResult<PathBuf>;
}

/// Locate-only provider: reports where a runtime is expected, never
/// installs one.
pub struct WellKnownRuntime {
    runtime_dir: PathBuf,
}

impl WellKnownRuntime {
    pub fn new(runtime_dir: PathBuf) -> Self {
        Self { runtime_dir }
    }
}

#[async_trait]
impl RuntimeProvider for WellKnownRuntime {
    async fn ensure_runtime(&self, platform: Platform) -> LauncherResult<PathBuf> {
        Ok(resolve_java_binary(&self.runtime_dir, platform))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expected_binary_is_platform_suffixed() {
        let root = Path::new("/data/java");
        assert_eq!(
            expected_runtime_binary(root, Platform::Windows),
            PathBuf::from("/data/java/jdk-21.0.5+11/bin/java.exe")
        );
        assert_eq!(
            expected_runtime_binary(root, Platform::Linux),
            PathBuf::from("/data/java/jdk-21.0.5+11/bin/java")
        );
        assert_eq!(
            expected_runtime_binary(root, Platform::Osx),
            PathBuf::from("/data/java/jdk-21.0.5+11/bin/java")
        );
    }

    #[tokio::test]
    async fn well_known_provider_always_yields_a_path() {
        let provider = WellKnownRuntime::new(PathBuf::from("/data/java"));
        let binary = provider.ensure_runtime(Platform::Windows).await.unwrap();
        assert!(binary.ends_with("java.exe") || binary == PathBuf::from("java"));
    }
}
