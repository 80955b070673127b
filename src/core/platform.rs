// ─── Target Platform ───
// The platform a launch is planned for. Always an explicit input: rule
// evaluation and plan assembly never read the ambient OS on their own.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Windows,
    Osx,
    Linux,
}

impl Platform {
    /// Platform of the machine the backend is running on.
    pub fn current() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::Osx
        } else {
            Platform::Linux
        }
    }

    /// OS name as it appears in manifest rule constraints.
    pub fn manifest_name(&self) -> &'static str {
        match self {
            Platform::Windows => "windows",
            Platform::Osx => "osx",
            Platform::Linux => "linux",
        }
    }

    /// Java classpath separator for this platform.
    pub fn classpath_separator(&self) -> &'static str {
        match self {
            Platform::Windows => ";",
            _ => ":",
        }
    }

    /// File name of the Java launcher binary.
    pub fn java_binary_name(&self) -> &'static str {
        match self {
            Platform::Windows => "java.exe",
            _ => "java",
        }
    }
}

impl std::fmt::Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.manifest_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classpath_separator_is_semicolon_only_on_windows() {
        assert_eq!(Platform::Windows.classpath_separator(), ";");
        assert_eq!(Platform::Osx.classpath_separator(), ":");
        assert_eq!(Platform::Linux.classpath_separator(), ":");
    }

    #[test]
    fn manifest_names_match_the_rule_vocabulary() {
        assert_eq!(Platform::Osx.manifest_name(), "osx");
        assert_eq!(Platform::Windows.to_string(), "windows");
    }

    #[test]
    fn deserializes_from_lowercase_names() {
        let p: Platform = serde_json::from_str("\"osx\"").unwrap();
        assert_eq!(p, Platform::Osx);
    }
}
