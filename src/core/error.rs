use std::path::PathBuf;
use thiserror::Error;

/// Central error type for the entire launcher backend.
/// Every module returns `Result<T, LauncherError>`.
#[derive(Debug, Error)]
pub enum LauncherError {
    // ── IO ──────────────────────────────────────────────
    #[error("IO error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    // ── Network ─────────────────────────────────────────
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Download failed for {url}: HTTP {status}")]
    DownloadFailed { url: String, status: u16 },

    // ── Integrity ───────────────────────────────────────
    #[error("SHA-1 mismatch for {path:?}: expected {expected}, got {actual}")]
    Sha1Mismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    // ── JSON ────────────────────────────────────────────
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ── Configuration ───────────────────────────────────
    #[error("Version not found in manifest: {0}")]
    VersionNotFound(String),

    #[error("Version {0} declares no client download")]
    MissingClientArtifact(String),

    #[error("Config error: {0}")]
    Config(String),

    // ── Runtime provisioning ────────────────────────────
    #[error("Runtime provisioning failed: {0}")]
    Provisioning(String),

    // ── Archive ─────────────────────────────────────────
    #[error("Zip extraction error: {0}")]
    Zip(#[from] zip::result::ZipError),
}

/// Convenience alias used throughout the crate.
pub type LauncherResult<T> = Result<T, LauncherError>;

/// Coarse classification the UI layer keys its retry/prompt policy on.
/// Every failure is terminal to the current launch attempt; the backend
/// never retries on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Parse,
    Integrity,
    Config,
    Provisioning,
    Io,
}

impl LauncherError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LauncherError::Io { .. } => ErrorKind::Io,
            // reqwest surfaces body-decode failures through the same error
            // type as transport failures; split them for the caller.
            LauncherError::Http(source) if source.is_decode() => ErrorKind::Parse,
            LauncherError::Http(_) | LauncherError::DownloadFailed { .. } => ErrorKind::Network,
            LauncherError::Sha1Mismatch { .. } => ErrorKind::Integrity,
            LauncherError::Json(_) | LauncherError::Zip(_) => ErrorKind::Parse,
            LauncherError::VersionNotFound(_)
            | LauncherError::MissingClientArtifact(_)
            | LauncherError::Config(_) => ErrorKind::Config,
            LauncherError::Provisioning(_) => ErrorKind::Provisioning,
        }
    }
}

impl From<std::io::Error> for LauncherError {
    fn from(source: std::io::Error) -> Self {
        LauncherError::Io {
            path: PathBuf::new(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_map_onto_the_error_taxonomy() {
        let integrity = LauncherError::Sha1Mismatch {
            path: PathBuf::from("client.jar"),
            expected: "aa".into(),
            actual: "bb".into(),
        };
        assert_eq!(integrity.kind(), ErrorKind::Integrity);

        let network = LauncherError::DownloadFailed {
            url: "https://example.com/x.jar".into(),
            status: 503,
        };
        assert_eq!(network.kind(), ErrorKind::Network);

        let parse: LauncherError = serde_json::from_str::<serde_json::Value>("{oops")
            .unwrap_err()
            .into();
        assert_eq!(parse.kind(), ErrorKind::Parse);

        assert_eq!(
            LauncherError::VersionNotFound("1.99".into()).kind(),
            ErrorKind::Config
        );
        assert_eq!(
            LauncherError::Provisioning("no runtime".into()).kind(),
            ErrorKind::Provisioning
        );
    }
}
