// ─── Conditional Rules ───
// Rule lists gate arguments and native bundles per platform.

use serde::Deserialize;

use crate::core::platform::Platform;

#[derive(Debug, Clone, Deserialize)]
pub struct Rule {
    pub action: RuleAction,
    #[serde(default)]
    pub os: Option<OsConstraint>,
    /// Feature-gated rules are skipped wholesale; see `evaluate`.
    #[serde(default)]
    pub features: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OsConstraint {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub arch: Option<String>,
    #[serde(default)]
    pub version: Option<String>,
}

impl OsConstraint {
    fn matches(&self, platform: Platform) -> bool {
        self.name.as_deref() == Some(platform.manifest_name())
    }
}

/// Evaluate a rule list against a target platform.
///
/// - Empty list → unconditionally allowed.
/// - Otherwise start disallowed and apply rules in declaration order; later
///   rules override earlier ones.
/// - An allow rule matches with no OS constraint or with one naming the
///   target platform; a disallow rule only flips the accumulator when its OS
///   constraint names the target platform.
/// - Rules carrying a feature constraint are skipped entirely. Known
///   limitation: an argument gated solely by a feature flag is never
///   emitted, regardless of platform.
pub fn evaluate(rules: &[Rule], platform: Platform) -> bool {
    if rules.is_empty() {
        return true;
    }

    let mut allowed = false;
    for rule in rules {
        if rule.features.is_some() {
            continue;
        }

        match rule.action {
            RuleAction::Allow => {
                if rule.os.as_ref().map_or(true, |os| os.matches(platform)) {
                    allowed = true;
                }
            }
            RuleAction::Disallow => {
                if rule.os.as_ref().is_some_and(|os| os.matches(platform)) {
                    allowed = false;
                }
            }
        }
    }

    allowed
}
