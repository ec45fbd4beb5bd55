//! Resolved places on the campus map.

use geo::Coord;
use serde::{Deserialize, Serialize};

/// A resolved place on the campus map.
///
/// Coordinates are WGS84 with `x = longitude` and `y = latitude`. The optional
/// `data` payload is carried through untouched so callers can attach whatever
/// their map layer needs.
///
/// # Examples
/// ```
/// use geo::Coord;
/// use itinerary_core::Location;
///
/// let library = Location::new("Library", Coord { x: 8.54, y: 47.37 });
/// assert_eq!(library.name.as_deref(), Some("Library"));
/// assert!(library.data.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Location {
    /// Human readable place name, if known.
    #[serde(default)]
    pub name: Option<String>,
    /// Position of the place.
    pub coordinates: Coord<f64>,
    /// Opaque caller data.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl Location {
    /// Construct a named location.
    #[must_use]
    pub fn new(name: impl Into<String>, coordinates: Coord<f64>) -> Self {
        Self {
            name: Some(name.into()),
            coordinates,
            data: None,
        }
    }

    /// Construct a location without a name, e.g. a raw GPS fix.
    ///
    /// # Examples
    /// ```
    /// use geo::Coord;
    /// use itinerary_core::Location;
    ///
    /// let fix = Location::unnamed(Coord { x: 0.0, y: 0.0 });
    /// assert!(fix.name.is_none());
    /// ```
    #[must_use]
    pub const fn unnamed(coordinates: Coord<f64>) -> Self {
        Self {
            name: None,
            coordinates,
            data: None,
        }
    }

    /// Attach opaque caller data.
    #[must_use]
    pub fn with_data(mut self, data: serde_json::Value) -> Self {
        self.data = Some(data);
        self
    }

    /// Name used in log lines and error messages.
    #[must_use]
    pub fn label(&self) -> String {
        self.name.clone().unwrap_or_else(|| {
            format!("({}, {})", self.coordinates.x, self.coordinates.y)
        })
    }
}
