// ─── Classpath & Natives ───
// Classpath entry assembly and native bundle extraction.

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::core::error::{LauncherError, LauncherResult};

/// Classpath entries in emission order: the client jar first, then every
/// declared library artifact in descriptor declaration order. Duplicates
/// are preserved — a well-formed descriptor never lists a library twice,
/// and the emitted order must mirror the declaration exactly.
pub fn build_classpath_entries(client_jar: &Path, library_paths: &[PathBuf]) -> Vec<String> {
    let mut entries = Vec::with_capacity(library_paths.len() + 1);
    entries.push(safe_path_str(client_jar));
    entries.extend(library_paths.iter().map(|path| safe_path_str(path)));
    entries
}

/// Convert path to string, using the canonical form where the file exists.
/// Strips the `\\?\` prefix on Windows: Java classpath handling fails for
/// extended-length paths and reports `ClassNotFoundException` even when the
/// jars exist.
pub fn safe_path_str(path: &Path) -> String {
    let resolved = std::fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf());
    let text = resolved.to_string_lossy().to_string();

    #[cfg(target_os = "windows")]
    {
        if let Some(stripped) = text.strip_prefix(r"\\?\") {
            return stripped.to_string();
        }
    }

    text
}

/// Extract native libraries (`.dll`, `.so`, `.dylib`, `.jnilib`) from the
/// downloaded native bundle jars into the version's `natives/` directory.
///
/// The directory is rebuilt from scratch on every call so a stale bundle
/// from a previous descriptor revision never lingers.
pub async fn extract_natives(
    native_jars: &[PathBuf],
    natives_dir: &Path,
) -> LauncherResult<PathBuf> {
    if natives_dir.exists() {
        let _ = tokio::fs::remove_dir_all(natives_dir).await;
    }
    tokio::fs::create_dir_all(natives_dir)
        .await
        .map_err(|e| LauncherError::Io {
            path: natives_dir.to_path_buf(),
            source: e,
        })?;

    for jar_path in native_jars {
        let jar_bytes = tokio::fs::read(jar_path)
            .await
            .map_err(|e| LauncherError::Io {
                path: jar_path.clone(),
                source: e,
            })?;

        let dest_dir = natives_dir.to_path_buf();
        let path_debug = jar_path.clone();
        tokio::task::spawn_blocking(move || {
            let cursor = std::io::Cursor::new(jar_bytes);
            let mut archive = match zip::ZipArchive::new(cursor) {
                Ok(a) => a,
                Err(e) => {
                    warn!("Cannot open native bundle {:?}: {}", path_debug, e);
                    return;
                }
            };

            for i in 0..archive.len() {
                let Ok(mut file) = archive.by_index(i) else {
                    continue;
                };
                let name = file.name().to_string();

                if name.contains("META-INF") || name.contains('/') || name.contains('\\') {
                    continue;
                }

                let is_native = name.ends_with(".dll")
                    || name.ends_with(".so")
                    || name.ends_with(".dylib")
                    || name.ends_with(".jnilib");

                if is_native {
                    let dest = dest_dir.join(&name);
                    let mut out = match std::fs::File::create(&dest) {
                        Ok(file) => file,
                        Err(_) => continue,
                    };
                    let _ = std::io::copy(&mut file, &mut out);
                    debug!("Extracted native: {}", name);
                }
            }
        })
        .await
        .map_err(|e| LauncherError::Config(format!("Native extraction task failed: {}", e)))?;
    }

    Ok(natives_dir.to_path_buf())
}
