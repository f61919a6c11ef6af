//! Functions runtime versions

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// App setting that pins the Functions host version
pub const EXTENSION_VERSION_SETTING: &str = "FUNCTIONS_EXTENSION_VERSION";

/// Major version of the Azure Functions host
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum FuncVersion {
    V1,
    V2,
    V3,
    V4,
}

impl FuncVersion {
    /// Version assumed when a site does not pin one. The platform runs
    /// unpinned apps on the 1.x host.
    pub const DEFAULT: FuncVersion = FuncVersion::V1;

    /// The `~N` form written to `FUNCTIONS_EXTENSION_VERSION`
    pub fn as_setting(self) -> &'static str {
        match self {
            FuncVersion::V1 => "~1",
            FuncVersion::V2 => "~2",
            FuncVersion::V3 => "~3",
            FuncVersion::V4 => "~4",
        }
    }

    /// Whether host.json nests http settings under `extensions`
    pub fn uses_extensions_section(self) -> bool {
        self >= FuncVersion::V2
    }

    fn from_major(major: u64) -> Option<Self> {
        match major {
            1 => Some(FuncVersion::V1),
            2 => Some(FuncVersion::V2),
            3 => Some(FuncVersion::V3),
            4 => Some(FuncVersion::V4),
            _ => None,
        }
    }
}

impl fmt::Display for FuncVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_setting())
    }
}

/// Error for values that name no known host version
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownVersion(pub String);

impl fmt::Display for UnknownVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown Functions runtime version '{}'", self.0)
    }
}

impl std::error::Error for UnknownVersion {}

impl FromStr for FuncVersion {
    type Err = UnknownVersion;

    /// Accepts `~2`, `2`, `2.x`, `2.0`, full versions like `2.0.12050`,
    /// and the legacy `beta` alias for 2.x.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        let unknown = || UnknownVersion(s.to_string());

        if value.eq_ignore_ascii_case("beta") {
            return Ok(FuncVersion::V2);
        }

        let value = value.trim_start_matches('~');
        if let Ok(version) = semver::Version::parse(value) {
            return Self::from_major(version.major).ok_or_else(unknown);
        }

        let major = value.split('.').next().unwrap_or_default();
        let rest_ok = value
            .split('.')
            .skip(1)
            .all(|part| part.eq_ignore_ascii_case("x") || part.parse::<u64>().is_ok());
        if !rest_ok {
            return Err(unknown());
        }

        major
            .parse::<u64>()
            .ok()
            .and_then(Self::from_major)
            .ok_or_else(unknown)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_tilde_forms() {
        assert_eq!("~1".parse::<FuncVersion>().unwrap(), FuncVersion::V1);
        assert_eq!("~4".parse::<FuncVersion>().unwrap(), FuncVersion::V4);
    }

    #[test]
    fn parses_full_and_wildcard_versions() {
        assert_eq!("2.0.12050".parse::<FuncVersion>().unwrap(), FuncVersion::V2);
        assert_eq!("3.x".parse::<FuncVersion>().unwrap(), FuncVersion::V3);
        assert_eq!("1.0".parse::<FuncVersion>().unwrap(), FuncVersion::V1);
    }

    #[test]
    fn beta_means_v2() {
        assert_eq!("beta".parse::<FuncVersion>().unwrap(), FuncVersion::V2);
    }

    #[test]
    fn rejects_garbage() {
        assert!("latest".parse::<FuncVersion>().is_err());
        assert!("~9".parse::<FuncVersion>().is_err());
        assert!("".parse::<FuncVersion>().is_err());
        assert!("2.banana".parse::<FuncVersion>().is_err());
    }

    #[test]
    fn extensions_section_from_v2() {
        assert!(!FuncVersion::V1.uses_extensions_section());
        assert!(FuncVersion::V2.uses_extensions_section());
        assert!(FuncVersion::V4.uses_extensions_section());
    }
}
