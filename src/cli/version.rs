//! Version reported by `drawppt --version`.

/// The current version of drawppt, read from Cargo.toml at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
