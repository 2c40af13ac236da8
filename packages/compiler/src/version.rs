//! Version Information

use once_cell::sync::Lazy;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Version {
    pub full: String,
    pub major: String,
    pub minor: String,
    pub patch: String,
}

impl Version {
    pub fn new(full: &str) -> Self {
        let mut parts = full.split('.');
        let mut next = || parts.next().unwrap_or("0").to_string();
        Version {
            full: full.to_string(),
            major: next(),
            minor: next(),
            patch: next(),
        }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.full)
    }
}

/// Version of this compiler build.
pub static VERSION: Lazy<Version> = Lazy::new(|| Version::new(env!("CARGO_PKG_VERSION")));
