//! Property search filters.
//!
//! Filters arrive as loosely typed query parameters. They are cleaned with
//! [`clean_params`](crate::params::clean_params) first, then parsed here into
//! a typed [`PropertyFilter`] that the repository layer turns into SQL.

use std::str::FromStr;

use serde_json::{Map, Value};

use crate::error::CoreError;
use crate::property::{validate_amenities, validate_property_type};
use crate::types::DbId;

/// Default page size for search results.
pub const DEFAULT_LIMIT: i64 = 50;
/// Hard cap on page size.
pub const MAX_LIMIT: i64 = 200;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    /// Free text matched against address, city, state and country.
    pub location: Option<String>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    /// Minimum number of beds.
    pub beds: Option<i32>,
    /// Minimum number of baths.
    pub baths: Option<i32>,
    pub property_type: Option<String>,
    pub square_feet_min: Option<i32>,
    pub square_feet_max: Option<i32>,
    /// Listings must offer every amenity in this list.
    pub amenities: Vec<String>,
    /// Restrict results to these listing ids (a tenant's favourites view).
    pub favorite_ids: Vec<DbId>,
    pub limit: i64,
    pub offset: i64,
}

impl PropertyFilter {
    /// Parse cleaned query parameters. Unknown keys are ignored.
    pub fn from_params(params: &Map<String, Value>) -> Result<Self, CoreError> {
        let property_type = text(params, "propertyType");
        if let Some(pt) = &property_type {
            validate_property_type(pt)?;
        }

        let amenities = list(params, "amenities");
        validate_amenities(&amenities)?;

        let favorite_ids = list(params, "favoriteIds")
            .iter()
            .map(|raw| parse_value::<DbId>(raw, "favoriteIds"))
            .collect::<Result<Vec<_>, _>>()?;

        let filter = PropertyFilter {
            location: text(params, "location"),
            price_min: number(params, "priceMin")?,
            price_max: number(params, "priceMax")?,
            beds: number(params, "beds")?,
            baths: number(params, "baths")?,
            property_type,
            square_feet_min: number(params, "squareFeetMin")?,
            square_feet_max: number(params, "squareFeetMax")?,
            amenities,
            favorite_ids,
            limit: clamp_limit(number(params, "limit")?),
            offset: clamp_offset(number(params, "offset")?),
        };

        if let (Some(min), Some(max)) = (filter.price_min, filter.price_max) {
            if min > max {
                return Err(CoreError::Validation(format!(
                    "priceMin ({min}) must not exceed priceMax ({max})"
                )));
            }
        }
        Ok(filter)
    }
}

pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT)
}

pub fn clamp_offset(offset: Option<i64>) -> i64 {
    offset.unwrap_or(0).max(0)
}

fn text(params: &Map<String, Value>, key: &str) -> Option<String> {
    match params.get(key)? {
        Value::String(s) => Some(s.trim().to_string()).filter(|s| !s.is_empty()),
        other => Some(other.to_string()),
    }
}

fn number<T: FromStr>(params: &Map<String, Value>, key: &str) -> Result<Option<T>, CoreError> {
    match params.get(key) {
        None => Ok(None),
        Some(Value::String(s)) => parse_value(s.trim(), key).map(Some),
        Some(Value::Number(n)) => parse_value(&n.to_string(), key).map(Some),
        Some(other) => Err(CoreError::Validation(format!(
            "{key} must be a number, got {other}"
        ))),
    }
}

/// Accept either a JSON array or a comma-separated string.
fn list(params: &Map<String, Value>, key: &str) -> Vec<String> {
    match params.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| match v {
                Value::String(s) => Some(s.trim().to_string()),
                Value::Null => None,
                other => Some(other.to_string()),
            })
            .filter(|s| !s.is_empty())
            .collect(),
        Some(Value::String(s)) => s
            .split(',')
            .map(|part| part.trim().to_string())
            .filter(|part| !part.is_empty())
            .collect(),
        Some(Value::Number(n)) => vec![n.to_string()],
        _ => Vec::new(),
    }
}

fn parse_value<T: FromStr>(raw: &str, key: &str) -> Result<T, CoreError> {
    raw.parse::<T>()
        .map_err(|_| CoreError::Validation(format!("{key} must be a number, got '{raw}'")))
}
