//! Property (rental listing) entity model and DTOs.

use serde::Serialize;
use sqlx::FromRow;
use stayio_core::forms::PropertyDetails;
use stayio_core::types::{DbId, Timestamp};

/// A row from the `properties` table.
#[derive(Debug, Clone, FromRow, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    pub id: DbId,
    pub name: String,
    pub description: String,
    pub price_per_month: f64,
    pub security_deposit: f64,
    pub application_fee: f64,
    pub photo_urls: Vec<String>,
    pub amenities: Vec<String>,
    pub highlights: Vec<String>,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    pub beds: i32,
    pub baths: i32,
    pub square_feet: i32,
    pub property_type: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub country: String,
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub posted_date: Timestamp,
    pub average_rating: Option<f64>,
    pub number_of_reviews: Option<i32>,
    pub manager_cognito_id: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for inserting a listing whose photos are already stored.
#[derive(Debug, Clone)]
pub struct CreateProperty {
    pub details: PropertyDetails,
    pub photo_urls: Vec<String>,
    pub manager_cognito_id: String,
}
