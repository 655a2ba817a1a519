use std::fmt;

/// Compile-time build metadata, populated by `build.rs`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildInfo {
    pub package_version: &'static str,
    pub repo_version: &'static str,
    pub profile: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
}

impl BuildInfo {
    pub const fn new() -> Self {
        Self {
            package_version: env!("CARGO_PKG_VERSION"),
            repo_version: env!("REPO_VERSION"),
            profile: env!("BUILD_PROFILE"),
            timestamp: env!("BUILD_TIMESTAMP"),
            target: env!("BUILD_TARGET"),
        }
    }
}

impl Default for BuildInfo {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BuildInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "decloud {} ({}, {} build for {}, built {})",
            self.package_version, self.repo_version, self.profile, self.target, self.timestamp
        )
    }
}

/// Expands to the [`BuildInfo`] of the current build.
#[macro_export]
macro_rules! build_info {
    () => {
        $crate::version::BuildInfo::new()
    };
}

pub use crate::build_info;
