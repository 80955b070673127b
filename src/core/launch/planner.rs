// ─── Launch Planner ───
// Translates a version descriptor plus user settings into a fully resolved
// process invocation.

use std::path::PathBuf;

use tracing::{debug, info};

use crate::core::auth::OfflineSession;
use crate::core::launch::classpath::{build_classpath_entries, safe_path_str};
use crate::core::launch::request::{LaunchPlan, LaunchRequest, PlaceholderContext};
use crate::core::paths::LauncherPaths;
use crate::core::platform::Platform;
use crate::core::version::VersionDescriptor;

const START_ON_FIRST_THREAD_FLAG: &str = "-XstartOnFirstThread";
const LIBRARY_PATH_FLAG_PREFIX: &str = "-Djava.library.path";

/// Build the launch plan for one request.
///
/// The descriptor has already been fetched and persisted; the runtime
/// binary has already been resolved. Everything here is deterministic
/// assembly: no network, no retries.
pub fn build_plan(
    descriptor: &VersionDescriptor,
    request: &LaunchRequest,
    platform: Platform,
    paths: &LauncherPaths,
    java_binary: PathBuf,
) -> LaunchPlan {
    let version_id = request.version_id.as_str();

    if let Some(mod_folder) = &request.mod_folder {
        debug!("Mod folder configured (not consumed by plan): {:?}", mod_folder);
    }

    // Classpath: client jar first, then declared libraries in order.
    let classpath_entries = build_classpath_entries(
        &paths.client_jar_path(version_id),
        &descriptor.classpath_artifact_paths(paths),
    );

    // JVM flags: memory ceiling first, then the descriptor's declarative pass.
    let mut jvm_flags = vec![format!("-Xmx{}G", request.ram_gigabytes)];
    if let Some(arguments) = &descriptor.arguments {
        for spec in &arguments.jvm {
            spec.append_for(platform, &mut jvm_flags);
        }
    }

    // Platform fixups run after the declarative pass.
    apply_jvm_fixups(&mut jvm_flags, platform, paths, version_id);

    // Game arguments: structured specs, or the legacy whitespace blob.
    let raw_game_args = collect_game_arguments(descriptor, platform);

    // Placeholder substitution over every produced token.
    let session = OfflineSession::new(&request.username);
    let context = placeholder_context(descriptor, &session, version_id, paths);
    let game_arguments: Vec<String> = raw_game_args
        .iter()
        .map(|token| context.apply(token))
        .collect();

    let plan = LaunchPlan {
        executable: java_binary,
        jvm_flags,
        classpath_entries,
        main_class: descriptor.main_class.clone(),
        game_arguments,
    };

    info!(
        "Planned launch of {} for {}: {} classpath entries, {} jvm flags, {} game args",
        version_id,
        session.username,
        plan.classpath_entries.len(),
        plan.jvm_flags.len(),
        plan.game_arguments.len()
    );

    plan
}

/// On macOS the first-thread flag is required by the windowing stack; on
/// every platform the natives directory is wired in unless the descriptor
/// already set one.
fn apply_jvm_fixups(
    jvm_flags: &mut Vec<String>,
    platform: Platform,
    paths: &LauncherPaths,
    version_id: &str,
) {
    if platform == Platform::Osx
        && !jvm_flags.iter().any(|flag| flag == START_ON_FIRST_THREAD_FLAG)
    {
        jvm_flags.push(START_ON_FIRST_THREAD_FLAG.into());
    }

    if !jvm_flags
        .iter()
        .any(|flag| flag.starts_with(LIBRARY_PATH_FLAG_PREFIX))
    {
        jvm_flags.push(format!(
            "{}={}",
            LIBRARY_PATH_FLAG_PREFIX,
            safe_path_str(&paths.natives_dir(version_id))
        ));
    }
}

fn collect_game_arguments(descriptor: &VersionDescriptor, platform: Platform) -> Vec<String> {
    if let Some(arguments) = &descriptor.arguments {
        let mut out = Vec::new();
        for spec in &arguments.game {
            spec.append_for(platform, &mut out);
        }
        return out;
    }

    // Legacy blob: whitespace-split literals, no rule evaluation.
    match &descriptor.minecraft_arguments {
        Some(blob) => blob.split_whitespace().map(str::to_string).collect(),
        None => Vec::new(),
    }
}

fn placeholder_context(
    descriptor: &VersionDescriptor,
    session: &OfflineSession,
    version_id: &str,
    paths: &LauncherPaths,
) -> PlaceholderContext {
    let mut context = PlaceholderContext::new();
    context.set("${auth_player_name}", session.username.clone());
    context.set("${version_name}", version_id);
    context.set("${game_directory}", safe_path_str(paths.game_dir()));
    context.set("${assets_root}", safe_path_str(&paths.assets_dir()));
    context.set("${assets_index_name}", descriptor.asset_index_id());
    context.set("${auth_uuid}", session.uuid.clone());
    context.set("${auth_access_token}", session.access_token.clone());
    context.set("${user_type}", session.user_type.clone());
    context.set("${version_type}", descriptor.version_type.clone());
    context.set("${user_properties}", session.user_properties.clone());
    context.set("${quickPlayRealms}", "");
    context
}
