pub mod core;

pub use crate::core::error::{ErrorKind, LauncherError, LauncherResult};
pub use crate::core::launch::{LaunchPlan, LaunchRequest};
pub use crate::core::paths::LauncherPaths;
pub use crate::core::platform::Platform;
pub use crate::core::state::LauncherBackend;
pub use crate::core::version::{Channel, VersionCatalog};

use tracing_subscriber::EnvFilter;

/// Initialize structured logging for a host binary. Library consumers that
/// install their own subscriber should skip this.
pub fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,catclient_core=debug")),
        )
        .init();
}
