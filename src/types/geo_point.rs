//! Geographic points and the one-degree grid cells that index the dataset.

use ordered_float::NotNan;
use std::fmt;

/// Represents a geographical coordinate using latitude and longitude.
///
/// Latitude is the first element (index 0), and longitude is the second (index 1).
/// Both values are in degrees; longitude may carry either sign and is
/// normalized internally when mapped onto the grid.
///
/// # Examples
///
/// ```
/// use gldas::GeoPoint;
///
/// let new_orleans = GeoPoint(30.0, -90.1);
/// assert_eq!(new_orleans.0, 30.0); // Latitude
/// assert_eq!(new_orleans.1, -90.1); // Longitude
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoPoint(pub f64, pub f64);

impl GeoPoint {
    /// Label used for this point in extraction results: `"<lat>, <lon>"`,
    /// formatted from the coordinates as given, before any normalization.
    pub fn label(&self) -> String {
        format!("{}, {}", self.0, self.1)
    }
}

/// Normalizes a longitude in degrees into the range `[0, 360)`.
///
/// The operation is idempotent: normalizing an already-normalized value
/// returns it unchanged.
///
/// # Examples
///
/// ```
/// use gldas::normalize_longitude;
///
/// assert_eq!(normalize_longitude(-90.5), 269.5);
/// assert_eq!(normalize_longitude(360.0), 0.0);
/// assert_eq!(normalize_longitude(13.4), 13.4);
/// ```
pub fn normalize_longitude(lon: f64) -> f64 {
    let normalized = lon.rem_euclid(360.0);
    // rem_euclid can round up to the modulus itself for tiny negative inputs.
    if normalized == 360.0 {
        0.0
    } else {
        normalized
    }
}

/// The center of the one-degree grid cell containing a point.
///
/// Cell centers sit on the half-degree (`floor(coordinate) + 0.5`), so every
/// fractional coordinate within the same integer degree maps to the same
/// cell. Longitude is normalized into `[0, 360)` before discretization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridCell {
    lat_index: NotNan<f64>,
    lon_index: NotNan<f64>,
}

impl GridCell {
    /// Builds the cell containing `point`, or `None` when a coordinate is
    /// not a finite number.
    pub fn containing(point: GeoPoint) -> Option<GridCell> {
        GridCell::at(
            point.0.floor() + 0.5,
            normalize_longitude(point.1).floor() + 0.5,
        )
    }

    /// Builds a cell directly from its center coordinates, or `None` when a
    /// coordinate is not a finite number.
    pub fn at(lat_index: f64, lon_index: f64) -> Option<GridCell> {
        if !lat_index.is_finite() || !lon_index.is_finite() {
            return None;
        }
        Some(GridCell {
            lat_index: NotNan::new(lat_index).ok()?,
            lon_index: NotNan::new(lon_index).ok()?,
        })
    }

    pub fn lat_index(&self) -> f64 {
        self.lat_index.into_inner()
    }

    pub fn lon_index(&self) -> f64 {
        self.lon_index.into_inner()
    }
}

impl fmt::Display for GridCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.lat_index, self.lon_index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_longitude_is_idempotent_and_in_range() {
        for lon in [-720.25, -360.0, -90.8, -0.5, 0.0, 13.4, 180.0, 359.9, 360.0, 723.1] {
            let once = normalize_longitude(lon);
            assert!((0.0..360.0).contains(&once), "{} normalized to {}", lon, once);
            assert_eq!(normalize_longitude(once), once);
        }
    }

    #[test]
    fn normalize_longitude_adds_full_turn_to_negative_values() {
        assert_eq!(normalize_longitude(-90.8), 269.2);
        assert_eq!(normalize_longitude(-0.5), 359.5);
    }

    #[test]
    fn cells_are_stable_within_one_integer_degree() {
        let a = GridCell::containing(GeoPoint(3.1, 10.2)).unwrap();
        let b = GridCell::containing(GeoPoint(3.9, 10.9)).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lat_index(), 3.5);
        assert_eq!(a.lon_index(), 10.5);
    }

    #[test]
    fn cells_normalize_longitude_first() {
        let cell = GridCell::containing(GeoPoint(30.2, -90.8)).unwrap();
        assert_eq!(cell.lat_index(), 30.5);
        assert_eq!(cell.lon_index(), 269.5);
    }

    #[test]
    fn southern_latitudes_floor_away_from_zero() {
        let cell = GridCell::containing(GeoPoint(-33.9, 18.4)).unwrap();
        assert_eq!(cell.lat_index(), -33.5);
        assert_eq!(cell.lon_index(), 18.5);
    }

    #[test]
    fn non_finite_coordinates_have_no_cell() {
        assert!(GridCell::containing(GeoPoint(f64::NAN, 10.0)).is_none());
        assert!(GridCell::containing(GeoPoint(10.0, f64::INFINITY)).is_none());
    }

    #[test]
    fn labels_use_the_original_coordinates() {
        assert_eq!(GeoPoint(30.2, -90.8).label(), "30.2, -90.8");
        assert_eq!(GeoPoint(-33.0, 18.5).label(), "-33, 18.5");
    }
}
