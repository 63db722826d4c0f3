//! Listing enumerations and the checks that keep stored tags inside them.
//!
//! The values are stored as plain text and mirrored by CHECK constraints in
//! the `properties` migration; keep both lists in sync.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Property types
// ---------------------------------------------------------------------------

pub const PROPERTY_TYPES: &[&str] = &[
    "Rooms",
    "Tinyhouse",
    "Apartment",
    "Villa",
    "Townhouse",
    "Cottage",
];

/// Type preselected on the new-listing form.
pub const DEFAULT_PROPERTY_TYPE: &str = "Apartment";

// ---------------------------------------------------------------------------
// Amenities and highlights
// ---------------------------------------------------------------------------

pub const AMENITIES: &[&str] = &[
    "WasherDryer",
    "AirConditioning",
    "Dishwasher",
    "HighSpeedInternet",
    "HardwoodFloors",
    "WalkInClosets",
    "Microwave",
    "Refrigerator",
    "Pool",
    "Gym",
    "Parking",
    "PetsAllowed",
    "WiFi",
];

pub const HIGHLIGHTS: &[&str] = &[
    "HighSpeedInternetAccess",
    "WasherDryer",
    "AirConditioning",
    "Heating",
    "SmokeFree",
    "CableReady",
    "SatelliteTV",
    "DoubleVanities",
    "TubShower",
    "Intercom",
    "SprinklerSystem",
    "RecentlyRenovated",
    "CloseToTransit",
    "GreatView",
    "QuietNeighborhood",
];

// ---------------------------------------------------------------------------
// Limits
// ---------------------------------------------------------------------------

pub const MIN_ROOMS: i32 = 1;
pub const MAX_ROOMS: i32 = 10;

/// Upper bound on photos accepted for a single listing.
pub const MAX_PHOTOS: usize = 20;

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

pub fn validate_property_type(value: &str) -> Result<(), CoreError> {
    validate_member(value, PROPERTY_TYPES, "property type")
}

pub fn validate_amenities(values: &[String]) -> Result<(), CoreError> {
    values
        .iter()
        .try_for_each(|v| validate_member(v, AMENITIES, "amenity"))
}

pub fn validate_highlights(values: &[String]) -> Result<(), CoreError> {
    values
        .iter()
        .try_for_each(|v| validate_member(v, HIGHLIGHTS, "highlight"))
}

/// Validate the number of photos attached to a listing.
pub fn validate_photo_count(count: usize) -> Result<(), CoreError> {
    if count == 0 {
        return Err(CoreError::Validation(
            "At least one photo is required".into(),
        ));
    }
    if count > MAX_PHOTOS {
        return Err(CoreError::Validation(format!(
            "At most {MAX_PHOTOS} photos are allowed, got {count}"
        )));
    }
    Ok(())
}

fn validate_member(value: &str, allowed: &[&str], what: &str) -> Result<(), CoreError> {
    if allowed.contains(&value) {
        Ok(())
    } else {
        Err(CoreError::Validation(format!(
            "Invalid {what} '{value}'. Must be one of: {allowed:?}"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_type_is_known() {
        assert!(validate_property_type(DEFAULT_PROPERTY_TYPE).is_ok());
    }

    #[test]
    fn rejects_unknown_property_type() {
        assert!(validate_property_type("Castle").is_err());
        assert!(validate_property_type("apartment").is_err());
    }

    #[test]
    fn amenity_and_highlight_lists_are_distinct_vocabularies() {
        assert!(validate_amenities(&strings(&["Pool", "WiFi"])).is_ok());
        assert!(validate_highlights(&strings(&["Pool"])).is_err());
        assert!(validate_highlights(&strings(&["GreatView", "WasherDryer"])).is_ok());
    }

    #[test]
    fn one_bad_tag_fails_the_whole_list() {
        let err = validate_amenities(&strings(&["Pool", "Sauna"])).unwrap_err();
        assert!(err.to_string().contains("Sauna"));
    }

    #[test]
    fn photo_count_bounds() {
        assert!(validate_photo_count(0).is_err());
        assert!(validate_photo_count(1).is_ok());
        assert!(validate_photo_count(MAX_PHOTOS).is_ok());
        assert!(validate_photo_count(MAX_PHOTOS + 1).is_err());
    }
}
