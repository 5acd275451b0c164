// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE-APACHE file or at:
//     https://www.apache.org/licenses/LICENSE-2.0

//! Sort order types

use smol_str::SmolStr;
use std::fmt;
use std::str::FromStr;

/// Sort direction
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The direction's query name: `asc` or `desc`
    pub fn as_str(self) -> &'static str {
        match self {
            SortDirection::Ascending => "asc",
            SortDirection::Descending => "desc",
        }
    }

    /// The opposite direction
    #[must_use = "method does not modify self but returns a new value"]
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error parsing a [`SortDirection`]
#[derive(Clone, Debug, thiserror::Error, PartialEq, Eq)]
#[error("expected `asc` or `desc`, found `{0}`")]
pub struct ParseDirectionError(String);

impl FromStr for SortDirection {
    type Err = ParseDirectionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asc" => Ok(SortDirection::Ascending),
            "desc" => Ok(SortDirection::Descending),
            other => Err(ParseDirectionError(other.to_string())),
        }
    }
}

/// A sort instruction: attribute name plus direction
///
/// At most one sort instruction is active per list view; see
/// [`CoalescerHandle::set_sorting`](crate::CoalescerHandle::set_sorting).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortOrder {
    pub attribute: SmolStr,
    pub direction: SortDirection,
}

impl SortOrder {
    pub fn new(attribute: impl Into<SmolStr>, direction: SortDirection) -> Self {
        SortOrder {
            attribute: attribute.into(),
            direction,
        }
    }

    /// Ascending sort on `attribute`
    pub fn ascending(attribute: impl Into<SmolStr>) -> Self {
        Self::new(attribute, SortDirection::Ascending)
    }

    /// Descending sort on `attribute`
    pub fn descending(attribute: impl Into<SmolStr>) -> Self {
        Self::new(attribute, SortDirection::Descending)
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.attribute, self.direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_direction() {
        assert_eq!("asc".parse(), Ok(SortDirection::Ascending));
        assert_eq!("desc".parse(), Ok(SortDirection::Descending));
        assert!("ascending".parse::<SortDirection>().is_err());
    }

    #[test]
    fn display() {
        assert_eq!(SortOrder::descending("Name").to_string(), "Name desc");
        assert_eq!(SortDirection::Ascending.reversed().as_str(), "desc");
    }
}
