pub mod runtime;

pub use runtime::expected_runtime_binary;
pub use runtime::find_system_java;
pub use runtime::resolve_java_binary;
pub use runtime::RuntimeProvider;
pub use runtime::WellKnownRuntime;
