//! Build metadata stamped by `build.rs`.

#[derive(Debug, Clone, Copy)]
pub struct BuildMetadata {
    pub version: &'static str,
    pub git_hash: &'static str,
    pub git_status: &'static str,
    pub timestamp: &'static str,
    pub target: &'static str,
    pub profile: &'static str,
    pub rustc: &'static str,
}

macro_rules! stamped {
    ($key:literal) => {
        match option_env!($key) {
            Some(value) => value,
            None => "unknown",
        }
    };
}

pub const BUILD: BuildMetadata = BuildMetadata {
    version: env!("CARGO_PKG_VERSION"),
    git_hash: stamped!("PITAKA_BUILD_HASH"),
    git_status: stamped!("PITAKA_BUILD_STATUS"),
    timestamp: stamped!("PITAKA_BUILD_TIMESTAMP"),
    target: stamped!("PITAKA_BUILD_TARGET"),
    profile: stamped!("PITAKA_BUILD_PROFILE"),
    rustc: stamped!("PITAKA_BUILD_RUSTC"),
};

impl BuildMetadata {
    /// `0.1.0 (abc1234, clean)`
    pub fn summary(&self) -> String {
        format!("{} ({}, {})", self.version, self.git_hash, self.git_status)
    }
}

pub fn current() -> BuildMetadata {
    BUILD
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn version_matches_package() {
        let meta = current();
        assert_eq!(meta.version, env!("CARGO_PKG_VERSION"));
        assert!(meta.summary().starts_with(meta.version));
    }
}
