// ─── Launcher Backend ───
// Facade the front-end collaborator drives: catalog refresh, version
// preparation, launch planning. Holds the shared HTTP client and the
// artifact fetcher; every launch-scoped value travels through explicit
// request/plan objects.

use reqwest::Client;
use tracing::info;

use crate::core::downloader::Downloader;
use crate::core::error::LauncherResult;
use crate::core::http::build_http_client;
use crate::core::java::{RuntimeProvider, WellKnownRuntime};
use crate::core::launch::classpath::extract_natives;
use crate::core::launch::{build_plan, LaunchPlan, LaunchRequest};
use crate::core::paths::LauncherPaths;
use crate::core::platform::Platform;
use crate::core::profiles::{AccountStore, ProfileStore};
use crate::core::version::manifest::VERSION_MANIFEST_URL;
use crate::core::version::{VersionCatalog, VersionDescriptor, VersionEntry};

pub struct LauncherBackend {
    paths: LauncherPaths,
    http_client: Client,
    downloader: Downloader,
    manifest_url: String,
}

impl LauncherBackend {
    pub fn new(paths: LauncherPaths) -> LauncherResult<Self> {
        let http_client = build_http_client()?;
        let downloader = Downloader::with_client(http_client.clone());
        Ok(Self {
            paths,
            http_client,
            downloader,
            manifest_url: VERSION_MANIFEST_URL.to_string(),
        })
    }

    /// Point the catalog at a different index (mirrors, tests).
    pub fn with_manifest_url(mut self, url: impl Into<String>) -> Self {
        self.manifest_url = url.into();
        self
    }

    pub fn paths(&self) -> &LauncherPaths {
        &self.paths
    }

    /// Fetch a fresh version catalog. The returned snapshot is immutable;
    /// on failure any previously fetched catalog stays authoritative.
    pub async fn fetch_catalog(&self) -> LauncherResult<VersionCatalog> {
        VersionCatalog::fetch(&self.http_client, &self.manifest_url).await
    }

    /// Resolve a version for launch: fetch its descriptor fresh, persist
    /// it, and ensure the client jar, library store, and native bundles
    /// are present and digest-valid.
    pub async fn prepare_version(
        &self,
        entry: &VersionEntry,
        platform: Platform,
    ) -> LauncherResult<VersionDescriptor> {
        info!("Preparing version {}", entry.id);

        let (descriptor, raw) = VersionDescriptor::fetch(&self.http_client, &entry.url).await?;
        VersionDescriptor::save_to(&raw, &self.paths.descriptor_path(&entry.id)).await?;

        descriptor
            .ensure_client(&entry.id, &self.paths, &self.downloader)
            .await?;
        descriptor
            .ensure_libraries(&self.paths, &self.downloader)
            .await?;

        let bundles = descriptor
            .ensure_native_bundles(platform, &self.paths, &self.downloader)
            .await?;
        if !bundles.is_empty() {
            extract_natives(&bundles, &self.paths.natives_dir(&entry.id)).await?;
        }

        info!("Version {} ready", entry.id);
        Ok(descriptor)
    }

    /// Build the launch plan for a prepared version, resolving the runtime
    /// through the locate-only provider.
    pub async fn plan_launch(
        &self,
        request: &LaunchRequest,
        platform: Platform,
    ) -> LauncherResult<LaunchPlan> {
        let provider = WellKnownRuntime::new(self.paths.runtime_dir().to_path_buf());
        self.plan_launch_with(request, platform, &provider).await
    }

    /// Same, with a caller-supplied runtime provisioning strategy.
    pub async fn plan_launch_with(
        &self,
        request: &LaunchRequest,
        platform: Platform,
        runtime: &dyn RuntimeProvider,
    ) -> LauncherResult<LaunchPlan> {
        // The persisted descriptor is re-read per launch; it is never
        // cached across resolutions.
        let descriptor =
            VersionDescriptor::load(&self.paths.descriptor_path(&request.version_id))?;
        let java_binary = runtime.ensure_runtime(platform).await?;
        Ok(build_plan(
            &descriptor,
            request,
            platform,
            &self.paths,
            java_binary,
        ))
    }

    pub fn profile_store(&self) -> ProfileStore {
        ProfileStore::load(self.paths.profiles_path())
    }

    pub fn account_store(&self) -> AccountStore {
        AccountStore::load(self.paths.accounts_path())
    }
}
