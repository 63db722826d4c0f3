//! REST client for the STAYIO API.
//!
//! Every form-backed call validates its input with the shared
//! `stayio_core::forms` schemas before anything is sent.

use reqwest::multipart::{Form, Part};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Map, Value};
use stayio_core::application::validate_status;
use stayio_core::forms::{ApplicationForm, PropertyDetails, Registration, SettingsForm};
use stayio_core::params::clean_params;
use stayio_core::property::validate_photo_count;
use stayio_core::roles::Role;
use stayio_core::types::DbId;
use url::Url;

use crate::error::ClientError;
use crate::models::{Application, Manager, Property, Tenant, UserRecord};

/// A photo selected for upload.
#[derive(Debug, Clone)]
pub struct Photo {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Identity of the signed-in user as read from the provider session.
#[derive(Debug, Clone)]
pub struct Session {
    pub cognito_id: String,
    pub role: Role,
    pub username: String,
    /// Sign-in login id, when it is an email address.
    pub email: Option<String>,
}

/// Body of `POST /applications`.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ApplicationRequest<'a> {
    property_id: DbId,
    #[serde(flatten)]
    form: &'a ApplicationForm,
}

/// The signed-in user together with their database record.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub session: Session,
    pub record: UserRecord,
}

/// HTTP client for one API deployment.
#[derive(Debug, Clone)]
pub struct ApiClient {
    client: reqwest::Client,
    /// API root, e.g. `http://localhost:3001/api/v1`.
    base_url: Url,
    token: Option<String>,
}

impl ApiClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_client(reqwest::Client::new(), base_url)
    }

    /// Reuse an existing [`reqwest::Client`] (shared connection pool).
    pub fn with_client(client: reqwest::Client, base_url: &str) -> Result<Self, ClientError> {
        let base_url = Url::parse(base_url)?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase));
        }
        Ok(Self {
            client,
            base_url,
            token: None,
        })
    }

    /// Attach the provider-issued ID token to every request.
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    // ---- managers ----

    pub async fn get_manager(&self, cognito_id: &str) -> Result<Manager, ClientError> {
        self.get_json(&["managers", cognito_id]).await
    }

    pub async fn create_manager(&self, input: &Registration) -> Result<Manager, ClientError> {
        input.check()?;
        self.send_json(Method::POST, &["managers"], input).await
    }

    pub async fn update_manager(
        &self,
        cognito_id: &str,
        input: &SettingsForm,
    ) -> Result<Manager, ClientError> {
        input.check()?;
        self.send_json(Method::PUT, &["managers", cognito_id], input)
            .await
    }

    pub async fn list_manager_properties(
        &self,
        cognito_id: &str,
    ) -> Result<Vec<Property>, ClientError> {
        self.get_json(&["managers", cognito_id, "properties"]).await
    }

    // ---- tenants ----

    pub async fn get_tenant(&self, cognito_id: &str) -> Result<Tenant, ClientError> {
        self.get_json(&["tenants", cognito_id]).await
    }

    pub async fn create_tenant(&self, input: &Registration) -> Result<Tenant, ClientError> {
        input.check()?;
        self.send_json(Method::POST, &["tenants"], input).await
    }

    pub async fn update_tenant(
        &self,
        cognito_id: &str,
        input: &SettingsForm,
    ) -> Result<Tenant, ClientError> {
        input.check()?;
        self.send_json(Method::PUT, &["tenants", cognito_id], input)
            .await
    }

    pub async fn add_favorite(
        &self,
        cognito_id: &str,
        property_id: DbId,
    ) -> Result<Tenant, ClientError> {
        let id = property_id.to_string();
        let request = self.request(Method::POST, &["tenants", cognito_id, "favorites", &id])?;
        Self::parse_response(request.send().await?).await
    }

    pub async fn remove_favorite(
        &self,
        cognito_id: &str,
        property_id: DbId,
    ) -> Result<Tenant, ClientError> {
        let id = property_id.to_string();
        let request = self.request(Method::DELETE, &["tenants", cognito_id, "favorites", &id])?;
        Self::parse_response(request.send().await?).await
    }

    // ---- properties ----

    /// Search listings. Placeholder values are dropped before sending.
    pub async fn search_properties(
        &self,
        filters: Map<String, Value>,
    ) -> Result<Vec<Property>, ClientError> {
        let query = query_pairs(clean_params(filters));
        let request = self.request(Method::GET, &["properties"])?.query(&query);
        Self::parse_response(request.send().await?).await
    }

    pub async fn get_property(&self, id: DbId) -> Result<Property, ClientError> {
        self.get_json(&["properties", &id.to_string()]).await
    }

    /// Submit a new listing as multipart form data.
    ///
    /// Fails with a validation error, without contacting the server, when the
    /// details or the photo count are invalid.
    pub async fn create_property(
        &self,
        details: &PropertyDetails,
        photos: Vec<Photo>,
        manager_cognito_id: &str,
    ) -> Result<Property, ClientError> {
        details.check()?;
        validate_photo_count(photos.len())?;

        let mut form = Form::new();
        for (name, value) in details.to_form_fields() {
            form = form.text(name, value);
        }
        form = form.text("managerCognitoId", manager_cognito_id.to_string());
        for photo in photos {
            form = form.part("photos", Part::bytes(photo.bytes).file_name(photo.file_name));
        }

        let request = self.request(Method::POST, &["properties"])?.multipart(form);
        let property: Property = Self::parse_response(request.send().await?).await?;
        tracing::debug!(property_id = property.id, "Listing created");
        Ok(property)
    }

    // ---- applications ----

    pub async fn create_application(
        &self,
        property_id: DbId,
        form: &ApplicationForm,
    ) -> Result<Application, ClientError> {
        form.check()?;
        let body = ApplicationRequest { property_id, form };
        self.send_json(Method::POST, &["applications"], &body).await
    }

    pub async fn list_applications(&self) -> Result<Vec<Application>, ClientError> {
        self.get_json(&["applications"]).await
    }

    pub async fn update_application_status(
        &self,
        id: DbId,
        status: &str,
    ) -> Result<Application, ClientError> {
        validate_status(status)?;
        self.send_json(
            Method::PUT,
            &["applications", &id.to_string(), "status"],
            &json!({ "status": status }),
        )
        .await
    }

    // ---- session ----

    /// Fetch the signed-in user's record, creating it on first sign-in.
    pub async fn get_auth_user(&self, session: &Session) -> Result<AuthUser, ClientError> {
        let record = match session.role {
            Role::Manager => match self.get_manager(&session.cognito_id).await {
                Ok(m) => UserRecord::Manager(m),
                Err(e) if is_not_found(&e) => {
                    UserRecord::Manager(self.create_manager(&registration(session)).await?)
                }
                Err(e) => return Err(e),
            },
            Role::Tenant => match self.get_tenant(&session.cognito_id).await {
                Ok(t) => UserRecord::Tenant(t),
                Err(e) if is_not_found(&e) => {
                    UserRecord::Tenant(self.create_tenant(&registration(session)).await?)
                }
                Err(e) => return Err(e),
            },
        };

        Ok(AuthUser {
            session: session.clone(),
            record,
        })
    }

    // ---- private helpers ----

    fn url(&self, segments: &[&str]) -> Result<Url, ClientError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::Url(url::ParseError::RelativeUrlWithCannotBeABaseBase))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn request(
        &self,
        method: Method,
        segments: &[&str],
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let mut builder = self.client.request(method, self.url(segments)?);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        Ok(builder)
    }

    async fn get_json<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, ClientError> {
        let response = self.request(Method::GET, segments)?.send().await?;
        Self::parse_response(response).await
    }

    async fn send_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        method: Method,
        segments: &[&str],
        body: &B,
    ) -> Result<T, ClientError> {
        let response = self.request(method, segments)?.json(body).send().await?;
        Self::parse_response(response).await
    }

    /// Return the response unchanged on success, or an [`ClientError::Api`]
    /// holding the status and the (JSON if possible) body.
    async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, ClientError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let text = response
            .text()
            .await
            .unwrap_or_else(|_| "<unreadable body>".to_string());
        let body = serde_json::from_str(&text).unwrap_or(Value::String(text));
        Err(ClientError::Api {
            status: status.as_u16(),
            body,
        })
    }

    async fn parse_response<T: DeserializeOwned>(
        response: reqwest::Response,
    ) -> Result<T, ClientError> {
        let response = Self::ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

fn is_not_found(err: &ClientError) -> bool {
    err.status() == Some(StatusCode::NOT_FOUND.as_u16())
}

/// Registration sent on first sign-in; contact details are filled in later.
fn registration(session: &Session) -> Registration {
    Registration {
        cognito_id: session.cognito_id.clone(),
        name: session.username.clone(),
        email: session.email.clone().unwrap_or_default(),
        phone_number: String::new(),
    }
}

/// Flatten cleaned filters into query pairs; arrays become comma lists.
fn query_pairs(params: Map<String, Value>) -> Vec<(String, String)> {
    params
        .into_iter()
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s,
                Value::Array(items) => items
                    .iter()
                    .filter(|v| !v.is_null())
                    .map(|v| match v {
                        Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(","),
                other => other.to_string(),
            };
            (key, value)
        })
        .collect()
}
