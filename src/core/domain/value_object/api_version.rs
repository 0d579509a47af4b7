use crate::core::domain::error::{MaasResult, ValidationError};
use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

/// Represents a validated MAAS API version number.
///
/// Versions are dotted `major.minor` with an optional `patch` component, as
/// reported by the region controller's version endpoint (e.g. `"2.0"`,
/// `"2.1.9"`). The total order over (major, minor, patch) is what the
/// reader registries use to pick the best decoder for a target version.
///
/// A version parsed with an explicit patch keeps it through `Display`, so
/// `"1.9.0"` renders as `"1.9.0"` in error messages rather than collapsing
/// to `"1.9"`. Comparison treats a missing patch as zero, so `"2.0"` and
/// `"2.0.0"` are equal and order identically.
#[derive(Debug, Clone, Copy)]
pub struct ApiVersion {
    major: u32,
    minor: u32,
    patch: Option<u32>,
}

impl ApiVersion {
    /// Creates a version without a patch component. `const` so reader
    /// tables can be declared statically.
    pub const fn new(major: u32, minor: u32) -> Self {
        Self {
            major,
            minor,
            patch: None,
        }
    }

    pub const fn with_patch(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch: Some(patch),
        }
    }

    /// Parses a dotted version string with two or three components.
    ///
    /// # Errors
    ///
    /// Returns `MaasError::Validation` if the string is not of the form
    /// `major.minor` or `major.minor.patch` with numeric components.
    pub fn parse(value: &str) -> MaasResult<Self> {
        let parts: Vec<&str> = value.split('.').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(ValidationError::Format(format!(
                "API version '{}' must be 'major.minor' or 'major.minor.patch'",
                value
            ))
            .into());
        }
        let mut numbers = Vec::with_capacity(parts.len());
        for part in &parts {
            numbers.push(part.trim().parse::<u32>().map_err(|_| {
                ValidationError::Format(format!(
                    "API version '{}' has a non-numeric component '{}'",
                    value, part
                ))
            })?);
        }
        Ok(Self {
            major: numbers[0],
            minor: numbers[1],
            patch: numbers.get(2).copied(),
        })
    }

    pub fn major(&self) -> u32 {
        self.major
    }

    pub fn minor(&self) -> u32 {
        self.minor
    }

    pub fn patch(&self) -> u32 {
        self.patch.unwrap_or(0)
    }

    fn order_key(&self) -> (u32, u32, u32) {
        (self.major, self.minor, self.patch.unwrap_or(0))
    }
}

impl PartialEq for ApiVersion {
    fn eq(&self, other: &Self) -> bool {
        self.order_key() == other.order_key()
    }
}

impl Eq for ApiVersion {}

impl Ord for ApiVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.order_key().cmp(&other.order_key())
    }
}

impl PartialOrd for ApiVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Hash for ApiVersion {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.order_key().hash(state);
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.patch {
            Some(patch) => write!(f, "{}.{}.{}", self.major, self.minor, patch),
            None => write!(f, "{}.{}", self.major, self.minor),
        }
    }
}

impl FromStr for ApiVersion {
    type Err = crate::core::domain::error::MaasError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ApiVersion::parse(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_two_part_versions() {
        let v = ApiVersion::parse("2.0").unwrap();
        assert_eq!(v, ApiVersion::new(2, 0));
        assert_eq!(v.to_string(), "2.0");
    }

    #[test]
    fn parses_three_part_versions() {
        let v = ApiVersion::parse("2.1.9").unwrap();
        assert_eq!(v, ApiVersion::with_patch(2, 1, 9));
        assert_eq!(v.to_string(), "2.1.9");
    }

    #[test]
    fn explicit_zero_patch_survives_display() {
        let v = ApiVersion::parse("1.9.0").unwrap();
        assert_eq!(v.to_string(), "1.9.0");
        assert_eq!(ApiVersion::with_patch(1, 9, 0).to_string(), "1.9.0");
        assert_eq!(ApiVersion::new(1, 9).to_string(), "1.9");
    }

    #[test]
    fn zero_patch_compares_equal_to_no_patch() {
        assert_eq!(ApiVersion::parse("2.0.0").unwrap(), ApiVersion::new(2, 0));
        assert_eq!(
            ApiVersion::with_patch(2, 0, 0).cmp(&ApiVersion::new(2, 0)),
            std::cmp::Ordering::Equal
        );
    }

    #[test]
    fn rejects_malformed_versions() {
        for bad in ["", "2", "2.x", "2.0.1.4", "a.b"] {
            assert!(ApiVersion::parse(bad).is_err(), "accepted {:?}", bad);
        }
    }

    #[test]
    fn orders_by_major_minor_patch() {
        assert!(ApiVersion::new(2, 0) < ApiVersion::new(2, 1));
        assert!(ApiVersion::new(2, 1) < ApiVersion::with_patch(2, 1, 9));
        assert!(ApiVersion::new(1, 9) < ApiVersion::new(2, 0));
    }
}
