pub mod backend;

pub use backend::LauncherBackend;
