use crate::error::{ProcessingError, Result};
use crate::utils::constants::{SEOUL_MAX_LAT, SEOUL_MAX_LON, SEOUL_MIN_LAT, SEOUL_MIN_LON};

/// Check whether a coordinate falls inside the Seoul bounding box
pub fn is_within_seoul_bounds(latitude: f64, longitude: f64) -> bool {
    (SEOUL_MIN_LAT..=SEOUL_MAX_LAT).contains(&latitude)
        && (SEOUL_MIN_LON..=SEOUL_MAX_LON).contains(&longitude)
}

/// Validate Seoul coordinate bounds
pub fn validate_seoul_coordinates(latitude: f64, longitude: f64) -> Result<()> {
    if !(SEOUL_MIN_LAT..=SEOUL_MAX_LAT).contains(&latitude) {
        return Err(ProcessingError::InvalidFormat(format!(
            "Latitude {} is outside Seoul bounds [{}, {}]",
            latitude, SEOUL_MIN_LAT, SEOUL_MAX_LAT
        )));
    }

    if !(SEOUL_MIN_LON..=SEOUL_MAX_LON).contains(&longitude) {
        return Err(ProcessingError::InvalidFormat(format!(
            "Longitude {} is outside Seoul bounds [{}, {}]",
            longitude, SEOUL_MIN_LON, SEOUL_MAX_LON
        )));
    }

    Ok(())
}
