// ─── Launch Request / Plan ───
// Explicit value objects: the front-end hands in a LaunchRequest, the
// planner hands back a LaunchPlan. Nothing launch-scoped lives on shared
// state.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::platform::Platform;

/// Everything the backend needs to resolve one launch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchRequest {
    pub version_id: String,
    pub username: String,
    pub ram_gigabytes: u32,
    /// Carried from the profile; not consumed by plan assembly.
    #[serde(default)]
    pub mod_folder: Option<PathBuf>,
}

/// Fully resolved process invocation, consumed by the external executor.
/// Created fresh per request; classpath entries stay a list until emission.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchPlan {
    pub executable: PathBuf,
    pub jvm_flags: Vec<String>,
    pub classpath_entries: Vec<String>,
    pub main_class: String,
    pub game_arguments: Vec<String>,
}

impl LaunchPlan {
    /// Classpath entries joined with the platform separator.
    pub fn classpath_string(&self, platform: Platform) -> String {
        self.classpath_entries
            .join(platform.classpath_separator())
    }

    /// Final command assembly order:
    /// executable, jvm flags, `-cp`, joined classpath, main class, game args.
    pub fn command_line(&self, platform: Platform) -> Vec<String> {
        let mut command = Vec::with_capacity(self.jvm_flags.len() + self.game_arguments.len() + 4);
        command.push(self.executable.to_string_lossy().to_string());
        command.extend(self.jvm_flags.iter().cloned());
        command.push("-cp".into());
        command.push(self.classpath_string(platform));
        command.push(self.main_class.clone());
        command.extend(self.game_arguments.iter().cloned());
        command
    }
}

/// Placeholder markers and their substituted values for one launch.
///
/// Substitution is literal substring replacement, single-pass and
/// non-recursive; markers are non-overlapping, so replacement order among
/// keys does not matter. Unknown markers are left in place.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderContext {
    entries: Vec<(&'static str, String)>,
}

impl PlaceholderContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, marker: &'static str, value: impl Into<String>) {
        self.entries.push((marker, value.into()));
    }

    /// Replace every known marker occurring anywhere inside `token`.
    pub fn apply(&self, token: &str) -> String {
        let mut resolved = token.to_string();
        for (marker, value) in &self.entries {
            resolved = resolved.replace(marker, value);
        }
        resolved
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classpath_join_is_platform_specific() {
        let plan = LaunchPlan {
            executable: PathBuf::from("java"),
            jvm_flags: vec![],
            classpath_entries: vec!["client.jar".into(), "a.jar".into(), "b.jar".into()],
            main_class: "Main".into(),
            game_arguments: vec![],
        };
        assert_eq!(
            plan.classpath_string(Platform::Windows),
            "client.jar;a.jar;b.jar"
        );
        assert_eq!(
            plan.classpath_string(Platform::Linux),
            "client.jar:a.jar:b.jar"
        );
    }

    #[test]
    fn command_line_assembly_order() {
        let plan = LaunchPlan {
            executable: PathBuf::from("/usr/bin/java"),
            jvm_flags: vec!["-Xmx4G".into(), "-XstartOnFirstThread".into()],
            classpath_entries: vec!["client.jar".into(), "lib.jar".into()],
            main_class: "net.minecraft.client.main.Main".into(),
            game_arguments: vec!["--username".into(), "Steve".into()],
        };

        assert_eq!(
            plan.command_line(Platform::Osx),
            vec![
                "/usr/bin/java",
                "-Xmx4G",
                "-XstartOnFirstThread",
                "-cp",
                "client.jar:lib.jar",
                "net.minecraft.client.main.Main",
                "--username",
                "Steve",
            ]
        );
    }

    #[test]
    fn known_markers_replace_inside_tokens() {
        let mut context = PlaceholderContext::new();
        context.set("${auth_player_name}", "Steve");
        assert_eq!(
            context.apply("--username ${auth_player_name}"),
            "--username Steve"
        );
    }

    #[test]
    fn unknown_markers_are_left_as_is() {
        let mut context = PlaceholderContext::new();
        context.set("${auth_player_name}", "Steve");
        assert_eq!(context.apply("${foo}"), "${foo}");
        assert_eq!(
            context.apply("${auth_player_name}:${foo}"),
            "Steve:${foo}"
        );
    }

    #[test]
    fn multiple_markers_replace_within_one_token() {
        let mut context = PlaceholderContext::new();
        context.set("${auth_player_name}", "Steve");
        context.set("${version_name}", "1.21");
        assert_eq!(
            context.apply("${auth_player_name}-${version_name}-${auth_player_name}"),
            "Steve-1.21-Steve"
        );
    }
}
