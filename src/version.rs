//! Version utilities for corpusdex
//!
//! This module provides utilities for getting version information at runtime.

/// Get the version string from Cargo.toml
pub fn get_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

/// Get the package name from Cargo.toml
pub fn get_package_name() -> &'static str {
    env!("CARGO_PKG_NAME")
}

/// Get a formatted version string with package name
pub fn get_version_info() -> String {
    format!("{} {}", get_package_name(), get_version())
}
