pub mod descriptor;
pub mod manifest;
pub mod rules;

pub use descriptor::{ArgumentSpec, ArgumentValue, Arguments, VersionDescriptor};
pub use manifest::{Channel, VersionCatalog, VersionEntry, VersionManifest};
pub use rules::{evaluate, Rule, RuleAction};
