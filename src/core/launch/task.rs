// ─── Launch Task ───
// Thin handoff from a resolved plan to the external process executor.

use std::path::Path;
use std::process::Stdio;

use tracing::{debug, info};

use crate::core::error::{LauncherError, LauncherResult};
use crate::core::launch::request::LaunchPlan;
use crate::core::platform::Platform;

/// Render a plan into a spawnable command. The invocation surface is
/// exactly the plan's fields; nothing is injected here.
pub fn into_command(
    plan: &LaunchPlan,
    platform: Platform,
    game_dir: &Path,
) -> std::process::Command {
    let mut cmd = std::process::Command::new(&plan.executable);

    for flag in &plan.jvm_flags {
        cmd.arg(flag);
    }
    cmd.arg("-cp").arg(plan.classpath_string(platform));
    cmd.arg(&plan.main_class);
    for arg in &plan.game_arguments {
        cmd.arg(arg);
    }

    cmd.current_dir(game_dir);
    cmd.stdout(Stdio::piped());
    cmd.stderr(Stdio::piped());
    cmd
}

/// Spawn the game process.
///
/// Returns immediately after spawning; monitoring the child is the
/// caller's responsibility.
pub fn spawn_plan(
    plan: &LaunchPlan,
    platform: Platform,
    game_dir: &Path,
) -> LauncherResult<std::process::Child> {
    let mut cmd = into_command(plan, platform, game_dir);

    info!("Launching {:?}", plan.executable);
    debug!("Command: {:?}", cmd);

    cmd.spawn().map_err(|source| LauncherError::Io {
        path: plan.executable.clone(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn command_mirrors_the_plan_surface() {
        let plan = LaunchPlan {
            executable: PathBuf::from("/usr/bin/java"),
            jvm_flags: vec!["-Xmx2G".into()],
            classpath_entries: vec!["client.jar".into(), "lib.jar".into()],
            main_class: "Main".into(),
            game_arguments: vec!["--username".into(), "Steve".into()],
        };

        let cmd = into_command(&plan, Platform::Linux, Path::new("/game"));
        assert_eq!(cmd.get_program().to_string_lossy(), "/usr/bin/java");
        let args: Vec<String> = cmd
            .get_args()
            .map(|a| a.to_string_lossy().to_string())
            .collect();
        assert_eq!(
            args,
            vec![
                "-Xmx2G",
                "-cp",
                "client.jar:lib.jar",
                "Main",
                "--username",
                "Steve"
            ]
        );
        assert_eq!(cmd.get_current_dir(), Some(Path::new("/game")));
    }
}
