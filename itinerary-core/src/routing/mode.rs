//! Travel modes understood by route providers.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Means of travel requested from the routing backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TravelMode {
    /// On foot.
    #[default]
    Walking,
    /// By bicycle.
    Cycling,
    /// By car.
    Driving,
}

impl TravelMode {
    /// Profile name as routing services spell it.
    ///
    /// # Examples
    /// ```
    /// use itinerary_core::TravelMode;
    ///
    /// assert_eq!(TravelMode::Walking.as_str(), "walking");
    /// ```
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::Driving => "driving",
        }
    }
}

impl fmt::Display for TravelMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown travel mode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown travel mode: {0}")]
pub struct ParseTravelModeError(pub String);

impl FromStr for TravelMode {
    type Err = ParseTravelModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "walking" | "foot" => Ok(Self::Walking),
            "cycling" | "bike" => Ok(Self::Cycling),
            "driving" | "car" => Ok(Self::Driving),
            _ => Err(ParseTravelModeError(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("walking", TravelMode::Walking)]
    #[case("Foot", TravelMode::Walking)]
    #[case("bike", TravelMode::Cycling)]
    #[case("CAR", TravelMode::Driving)]
    fn parses_aliases(#[case] input: &str, #[case] expected: TravelMode) {
        assert_eq!(input.parse::<TravelMode>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_mode() {
        let err = "teleport"
            .parse::<TravelMode>()
            .expect_err("unknown mode should fail");
        assert_eq!(err.to_string(), "unknown travel mode: teleport");
    }
}
