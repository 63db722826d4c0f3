//! Response shapes returned by the API.

use serde::{Deserialize, Serialize};
use stayio_core::types::{DbId, Timestamp};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Manager {
    pub id: DbId,
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tenant {
    pub id: DbId,
    pub cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    #[serde(default)]
    pub favorites: Vec<DbId>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
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
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Application {
    pub id: DbId,
    pub application_date: Timestamp,
    pub status: String,
    pub property_id: DbId,
    pub property_name: String,
    pub manager_cognito_id: String,
    pub tenant_cognito_id: String,
    pub name: String,
    pub email: String,
    pub phone_number: String,
    pub message: Option<String>,
}

/// The signed-in user's database record.
#[derive(Debug, Clone, PartialEq)]
pub enum UserRecord {
    Manager(Manager),
    Tenant(Tenant),
}
