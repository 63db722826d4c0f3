//! Form schemas shared by the server handlers and the client.
//!
//! Field-level rules are declared with `validator`; rules that need the
//! domain vocabularies (property types, amenities, highlights) or that
//! `validator` cannot express run in each form's `check` method.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidateEmail, ValidationErrors};

use crate::error::CoreError;
use crate::property::{
    validate_amenities, validate_highlights, validate_property_type, DEFAULT_PROPERTY_TYPE,
};

// ---------------------------------------------------------------------------
// Property listing
// ---------------------------------------------------------------------------

/// Every listing field except the photos, which travel as binary parts.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PropertyDetails {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Description is required"))]
    pub description: String,
    #[validate(range(min = 1.0, message = "Price must be positive"))]
    pub price_per_month: f64,
    #[validate(range(min = 1.0, message = "Security deposit must be positive"))]
    pub security_deposit: f64,
    #[validate(range(min = 1.0, message = "Application fee must be positive"))]
    pub application_fee: f64,
    pub is_pets_allowed: bool,
    pub is_parking_included: bool,
    #[validate(length(min = 1, message = "At least one amenity is required"))]
    pub amenities: Vec<String>,
    #[validate(length(min = 1, message = "At least one highlight is required"))]
    pub highlights: Vec<String>,
    #[validate(range(min = 1, max = 10, message = "Beds must be between 1 and 10"))]
    pub beds: i32,
    #[validate(range(min = 1, max = 10, message = "Baths must be between 1 and 10"))]
    pub baths: i32,
    #[validate(range(min = 1, message = "Square meters must be positive"))]
    pub square_feet: i32,
    pub property_type: String,
    #[validate(length(min = 1, message = "Address is required"))]
    pub address: String,
    #[validate(length(min = 1, message = "City is required"))]
    pub city: String,
    #[validate(length(min = 1, message = "State is required"))]
    pub state: String,
    #[validate(length(min = 1, message = "Country is required"))]
    pub country: String,
    #[validate(length(min = 1, message = "Postal code is required"))]
    pub postal_code: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

impl Default for PropertyDetails {
    /// Blank form as first rendered: pets and parking on, apartment selected.
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            price_per_month: 0.0,
            security_deposit: 0.0,
            application_fee: 0.0,
            is_pets_allowed: true,
            is_parking_included: true,
            amenities: Vec::new(),
            highlights: Vec::new(),
            beds: 0,
            baths: 0,
            square_feet: 0,
            property_type: DEFAULT_PROPERTY_TYPE.to_string(),
            address: String::new(),
            city: String::new(),
            state: String::new(),
            country: String::new(),
            postal_code: String::new(),
            latitude: None,
            longitude: None,
        }
    }
}

impl PropertyDetails {
    /// Run the declarative rules, then the money and vocabulary checks.
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        validate_whole_amount(self.price_per_month, "Price")?;
        validate_whole_amount(self.security_deposit, "Security deposit")?;
        validate_whole_amount(self.application_fee, "Application fee")?;
        validate_property_type(&self.property_type)?;
        validate_amenities(&self.amenities)?;
        validate_highlights(&self.highlights)?;
        validate_coordinate(self.latitude, 90.0, "Latitude")?;
        validate_coordinate(self.longitude, 180.0, "Longitude")?;
        Ok(())
    }
}

fn validate_coordinate(value: Option<f64>, bound: f64, name: &str) -> Result<(), CoreError> {
    match value {
        Some(v) if !(-bound..=bound).contains(&v) => Err(CoreError::Validation(format!(
            "{name} must be between -{bound} and {bound}, got {v}"
        ))),
        _ => Ok(()),
    }
}

impl PropertyDetails {
    /// Encode as multipart text fields.
    ///
    /// Numbers and booleans are stringified, tag lists are JSON-encoded and
    /// left out when empty, unset coordinates are left out.
    pub fn to_form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("description", self.description.clone()),
            ("pricePerMonth", self.price_per_month.to_string()),
            ("securityDeposit", self.security_deposit.to_string()),
            ("applicationFee", self.application_fee.to_string()),
            ("isPetsAllowed", self.is_pets_allowed.to_string()),
            ("isParkingIncluded", self.is_parking_included.to_string()),
            ("beds", self.beds.to_string()),
            ("baths", self.baths.to_string()),
            ("squareFeet", self.square_feet.to_string()),
            ("propertyType", self.property_type.clone()),
            ("address", self.address.clone()),
            ("city", self.city.clone()),
            ("state", self.state.clone()),
            ("country", self.country.clone()),
            ("postalCode", self.postal_code.clone()),
        ];
        for (key, tags) in [("amenities", &self.amenities), ("highlights", &self.highlights)] {
            if !tags.is_empty() {
                fields.push((key, serde_json::Value::from(tags.clone()).to_string()));
            }
        }
        if let Some(lat) = self.latitude {
            fields.push(("latitude", lat.to_string()));
        }
        if let Some(lon) = self.longitude {
            fields.push(("longitude", lon.to_string()));
        }
        fields
    }

    /// Decode multipart text fields. Does not run [`check`](Self::check).
    ///
    /// Tag lists accept a JSON array or a comma-separated string. Missing
    /// text fields decode as empty so that `check` reports them.
    pub fn from_form_fields(fields: &HashMap<String, String>) -> Result<Self, CoreError> {
        let text = |key: &str| fields.get(key).map(|v| v.trim().to_string()).unwrap_or_default();

        Ok(Self {
            name: text("name"),
            description: text("description"),
            price_per_month: required_number(fields, "pricePerMonth")?,
            security_deposit: required_number(fields, "securityDeposit")?,
            application_fee: required_number(fields, "applicationFee")?,
            is_pets_allowed: flag(fields, "isPetsAllowed")?,
            is_parking_included: flag(fields, "isParkingIncluded")?,
            amenities: tags(fields, "amenities")?,
            highlights: tags(fields, "highlights")?,
            beds: required_number(fields, "beds")?,
            baths: required_number(fields, "baths")?,
            square_feet: required_number(fields, "squareFeet")?,
            property_type: text("propertyType"),
            address: text("address"),
            city: text("city"),
            state: text("state"),
            country: text("country"),
            postal_code: text("postalCode"),
            latitude: optional_number(fields, "latitude")?,
            longitude: optional_number(fields, "longitude")?,
        })
    }
}

/// Numeric types accepted from form text. Values are read as `f64` first so
/// `"2.0"` is a valid integer while `"2.5"` is not.
trait FormNumber: Sized {
    fn from_f64(value: f64) -> Option<Self>;
}

impl FormNumber for f64 {
    fn from_f64(value: f64) -> Option<Self> {
        value.is_finite().then_some(value)
    }
}

impl FormNumber for i32 {
    fn from_f64(value: f64) -> Option<Self> {
        let in_range = value >= f64::from(i32::MIN) && value <= f64::from(i32::MAX);
        (value.fract() == 0.0 && in_range).then_some(value as i32)
    }
}

fn required_number<T: FormNumber>(
    fields: &HashMap<String, String>,
    key: &str,
) -> Result<T, CoreError> {
    optional_number(fields, key)?
        .ok_or_else(|| CoreError::Validation(format!("{key} is required")))
}

fn optional_number<T: FormNumber>(
    fields: &HashMap<String, String>,
    key: &str,
) -> Result<Option<T>, CoreError> {
    let Some(raw) = fields.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(None);
    };
    let value = raw
        .parse::<f64>()
        .map_err(|_| CoreError::Validation(format!("{key} must be a number, got '{raw}'")))?;
    T::from_f64(value)
        .map(Some)
        .ok_or_else(|| CoreError::Validation(format!("{key} must be a whole number, got '{raw}'")))
}

fn flag(fields: &HashMap<String, String>, key: &str) -> Result<bool, CoreError> {
    match fields.get(key).map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") | Some("false") | Some("off") => Ok(false),
        Some("true") | Some("on") => Ok(true),
        Some(other) => Err(CoreError::Validation(format!(
            "{key} must be true or false, got '{other}'"
        ))),
    }
}

fn tags(fields: &HashMap<String, String>, key: &str) -> Result<Vec<String>, CoreError> {
    let Some(raw) = fields.get(key).map(|v| v.trim()).filter(|v| !v.is_empty()) else {
        return Ok(Vec::new());
    };
    if raw.starts_with('[') {
        return serde_json::from_str::<Vec<String>>(raw)
            .map_err(|e| CoreError::Validation(format!("{key} must be a JSON string array: {e}")));
    }
    Ok(raw
        .split(',')
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .collect())
}

fn validate_whole_amount(value: f64, name: &str) -> Result<(), CoreError> {
    if value.fract() != 0.0 {
        return Err(CoreError::Validation(format!(
            "{name} must be a whole number, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// User records
// ---------------------------------------------------------------------------

/// Body of `POST /managers` and `POST /tenants`.
///
/// Sent right after sign-up, before the user has filled in settings, so
/// `email` and `phone_number` may be empty.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    #[validate(length(min = 1, message = "Cognito id is required"))]
    pub cognito_id: String,
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone_number: String,
}

impl Registration {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)?;
        if !self.email.is_empty() && !self.email.validate_email() {
            return Err(CoreError::Validation("Invalid email address".into()));
        }
        Ok(())
    }
}

/// Body of `PUT /managers/{id}` and `PUT /tenants/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SettingsForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone_number: String,
}

impl SettingsForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

// ---------------------------------------------------------------------------
// Applications
// ---------------------------------------------------------------------------

/// Contact details a tenant submits when applying for a listing.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationForm {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: String,
    #[validate(length(min = 10, message = "Phone number must be at least 10 digits"))]
    pub phone_number: String,
    #[validate(length(max = 2000, message = "Message must be at most 2000 characters"))]
    pub message: Option<String>,
}

impl ApplicationForm {
    pub fn check(&self) -> Result<(), CoreError> {
        self.validate().map_err(validation_error)
    }
}

/// Flatten `validator` output into a single, deterministic message.
pub fn validation_error(errors: ValidationErrors) -> CoreError {
    let mut messages: Vec<String> = errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = field.to_string();
            errs.iter().map(move |e| match &e.message {
                Some(msg) => msg.to_string(),
                None => format!("{field} is invalid"),
            })
        })
        .collect();
    messages.sort();
    messages.dedup();
    CoreError::Validation(messages.join("; "))
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    fn valid_details() -> PropertyDetails {
        PropertyDetails {
            name: "Sunny loft".into(),
            description: "Top floor, lots of light".into(),
            price_per_month: 1800.0,
            security_deposit: 1800.0,
            application_fee: 50.0,
            amenities: vec!["WiFi".into(), "Dishwasher".into()],
            highlights: vec!["GreatView".into()],
            beds: 2,
            baths: 1,
            square_feet: 85,
            address: "12 Harbour St".into(),
            city: "Izmir".into(),
            state: "Izmir".into(),
            country: "Turkey".into(),
            postal_code: "35000".into(),
            ..PropertyDetails::default()
        }
    }

    #[test]
    fn valid_listing_passes() {
        assert!(valid_details().check().is_ok());
    }

    #[test]
    fn blank_form_reports_required_fields() {
        let err = PropertyDetails::default().check().unwrap_err();
        assert_matches!(err, CoreError::Validation(ref msg) => {
            assert!(msg.contains("Name is required"));
            assert!(msg.contains("At least one amenity is required"));
            assert!(msg.contains("Price must be positive"));
        });
    }

    #[test]
    fn fractional_price_is_rejected() {
        let details = PropertyDetails {
            price_per_month: 1200.5,
            ..valid_details()
        };
        let err = details.check().unwrap_err();
        assert!(err.to_string().contains("whole number"));
    }

    #[test]
    fn beds_above_ten_are_rejected() {
        let details = PropertyDetails {
            beds: 11,
            ..valid_details()
        };
        assert!(details.check().is_err());
    }

    #[test]
    fn unknown_amenity_is_rejected() {
        let details = PropertyDetails {
            amenities: vec!["Helipad".into()],
            ..valid_details()
        };
        assert!(details.check().unwrap_err().to_string().contains("Helipad"));
    }

    #[test]
    fn out_of_range_latitude_is_rejected() {
        let details = PropertyDetails {
            latitude: Some(91.0),
            ..valid_details()
        };
        assert!(details.check().unwrap_err().to_string().contains("Latitude"));
    }

    #[test]
    fn form_fields_decode_back_to_the_same_listing() {
        let details = PropertyDetails {
            latitude: Some(38.42),
            ..valid_details()
        };
        let fields: HashMap<String, String> = details
            .to_form_fields()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect();
        assert_eq!(fields["amenities"], r#"["WiFi","Dishwasher"]"#);
        assert_eq!(fields["pricePerMonth"], "1800");

        let decoded = PropertyDetails::from_form_fields(&fields).unwrap();
        assert_eq!(decoded.amenities, details.amenities);
        assert_eq!(decoded.price_per_month, 1800.0);
        assert_eq!(decoded.latitude, Some(38.42));
        assert!(decoded.check().is_ok());
    }

    #[test]
    fn empty_tag_lists_are_omitted_from_form_fields() {
        let keys: Vec<_> = PropertyDetails::default()
            .to_form_fields()
            .into_iter()
            .map(|(k, _)| k)
            .collect();
        assert!(!keys.contains(&"amenities"));
        assert!(!keys.contains(&"latitude"));
    }

    #[test]
    fn decoding_accepts_comma_separated_tags() {
        let mut fields = HashMap::new();
        fields.insert("amenities".to_string(), "Pool, Gym".to_string());
        fields.insert("pricePerMonth".to_string(), "900".to_string());
        fields.insert("securityDeposit".to_string(), "900".to_string());
        fields.insert("applicationFee".to_string(), "20".to_string());
        fields.insert("beds".to_string(), "1".to_string());
        fields.insert("baths".to_string(), "1".to_string());
        fields.insert("squareFeet".to_string(), "40".to_string());
        let decoded = PropertyDetails::from_form_fields(&fields).unwrap();
        assert_eq!(decoded.amenities, vec!["Pool", "Gym"]);
        assert!(!decoded.is_pets_allowed);
    }

    #[test]
    fn decoding_reports_non_numeric_price() {
        let mut fields = HashMap::new();
        fields.insert("pricePerMonth".to_string(), "lots".to_string());
        assert_matches!(
            PropertyDetails::from_form_fields(&fields),
            Err(CoreError::Validation(msg)) if msg.contains("pricePerMonth")
        );
    }

    #[test]
    fn integer_fields_accept_whole_decimals_only() {
        let mut fields = HashMap::new();
        fields.insert("pricePerMonth".to_string(), "900".to_string());
        fields.insert("securityDeposit".to_string(), "900".to_string());
        fields.insert("applicationFee".to_string(), "20".to_string());
        fields.insert("beds".to_string(), "2.0".to_string());
        fields.insert("baths".to_string(), "1".to_string());
        fields.insert("squareFeet".to_string(), "40".to_string());
        assert_eq!(PropertyDetails::from_form_fields(&fields).unwrap().beds, 2);

        fields.insert("beds".to_string(), "2.5".to_string());
        assert_matches!(
            PropertyDetails::from_form_fields(&fields),
            Err(CoreError::Validation(msg)) if msg.contains("beds must be a whole number")
        );

        fields.insert("beds".to_string(), "1e12".to_string());
        assert_matches!(
            PropertyDetails::from_form_fields(&fields),
            Err(CoreError::Validation(_))
        );
    }

    #[test]
    fn registration_allows_empty_contact_fields() {
        let reg = Registration {
            cognito_id: "abc-123".into(),
            name: "jane".into(),
            email: String::new(),
            phone_number: String::new(),
        };
        assert!(reg.check().is_ok());
    }

    #[test]
    fn registration_rejects_malformed_email() {
        let reg = Registration {
            cognito_id: "abc-123".into(),
            name: "jane".into(),
            email: "not-an-email".into(),
            phone_number: String::new(),
        };
        assert!(reg.check().is_err());
    }

    #[test]
    fn registration_requires_cognito_id() {
        let reg = Registration {
            cognito_id: String::new(),
            name: "jane".into(),
            email: String::new(),
            phone_number: String::new(),
        };
        assert!(reg.check().unwrap_err().to_string().contains("Cognito id"));
    }

    #[test]
    fn settings_require_ten_digit_phone() {
        let form = SettingsForm {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone_number: "555-1234".into(),
        };
        let err = form.check().unwrap_err();
        assert!(err.to_string().contains("at least 10 digits"));
    }

    #[test]
    fn application_message_is_optional() {
        let form = ApplicationForm {
            name: "Jane".into(),
            email: "jane@example.com".into(),
            phone_number: "5551234567".into(),
            message: None,
        };
        assert!(form.check().is_ok());
    }
}
