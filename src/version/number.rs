//! Dotted version numbers and the bump rule

use crate::pipeline::ReleaseError;
use std::fmt;
use std::str::FromStr;

/// Value at which the last component rolls over into the one before it
pub const CARRY_BASE: u64 = 10;

/// A version made of one or more non-negative integer components
///
/// ```rust
/// use shipline::Version;
///
/// let version: Version = "1.2.9".parse().unwrap();
/// assert_eq!(version.bump().unwrap().to_string(), "1.3.0");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Version {
    components: Vec<u64>,
}

impl Version {
    /// Components from most to least significant
    #[must_use]
    pub fn components(&self) -> &[u64] {
        &self.components
    }

    /// Returns the next version
    ///
    /// The last component is incremented. When it reaches [`CARRY_BASE`] it
    /// resets to zero and the second-to-last component is incremented once.
    /// The carry never cascades further, so `1.9.9` becomes `1.10.0`.
    ///
    /// # Errors
    ///
    /// Returns [`ReleaseError::VersionOverflow`] if a component would exceed
    /// `u64::MAX`.
    pub fn bump(&self) -> Result<Self, ReleaseError> {
        let overflow = || ReleaseError::VersionOverflow {
            version: self.to_string(),
        };

        let mut components = self.components.clone();
        let len = components.len();

        let last = components.last_mut().ok_or_else(overflow)?;
        *last = last.checked_add(1).ok_or_else(overflow)?;

        if *last == CARRY_BASE && len >= 2 {
            *last = 0;
            let previous = &mut components[len - 2];
            *previous = previous.checked_add(1).ok_or_else(overflow)?;
        }

        Ok(Self { components })
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: String| ReleaseError::VersionParse {
            line: value.to_string(),
            reason,
        };

        let components = value
            .split('.')
            .map(|part| {
                if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(invalid(format!("'{part}' is not a base-10 integer")));
                }
                part.parse::<u64>()
                    .map_err(|e| invalid(format!("'{part}' is out of range: {e}")))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { components })
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = self.components.iter();
        if let Some(first) = parts.next() {
            write!(f, "{first}")?;
        }
        for part in parts {
            write!(f, ".{part}")?;
        }
        Ok(())
    }
}
