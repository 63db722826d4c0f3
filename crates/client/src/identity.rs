//! Identity-provider (hosted UI) configuration.
//!
//! The provider issues the tokens; this module only knows where its hosted
//! sign-in, sign-up and sign-out pages live and how to link to them.

use stayio_core::roles::{Role, SIGN_UP_ROLES};
use url::Url;

use crate::error::ClientError;

/// OAuth scopes requested from the hosted UI.
pub const SCOPES: &[&str] = &["openid", "email", "profile"];

/// Name of the user attribute holding the role picked at sign-up.
pub const ROLE_ATTRIBUTE: &str = "custom:role";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityConfig {
    pub user_pool_id: String,
    pub client_id: String,
    /// Hosted UI domain, with or without scheme.
    pub domain: String,
    /// Where the provider sends users back after sign-in and sign-out.
    pub app_url: String,
}

impl IdentityConfig {
    /// Load from environment variables.
    ///
    /// | Env Var                       | Required |
    /// |-------------------------------|----------|
    /// | `COGNITO_USER_POOL_ID`        | yes      |
    /// | `COGNITO_USER_POOL_CLIENT_ID` | yes      |
    /// | `COGNITO_DOMAIN`              | yes      |
    /// | `APP_URL`                     | no, defaults to `http://localhost:3000` |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing.
    pub fn from_env() -> Self {
        Self {
            user_pool_id: std::env::var("COGNITO_USER_POOL_ID")
                .expect("COGNITO_USER_POOL_ID must be set"),
            client_id: std::env::var("COGNITO_USER_POOL_CLIENT_ID")
                .expect("COGNITO_USER_POOL_CLIENT_ID must be set"),
            domain: std::env::var("COGNITO_DOMAIN").expect("COGNITO_DOMAIN must be set"),
            app_url: std::env::var("APP_URL").unwrap_or_else(|_| "http://localhost:3000".into()),
        }
    }

    /// Roles a new user can pick on the sign-up form.
    pub fn sign_up_roles(&self) -> &'static [Role] {
        SIGN_UP_ROLES
    }

    /// Token issuer (`iss` claim) of the user pool; the pool id starts with its region.
    pub fn issuer(&self) -> String {
        let region = self
            .user_pool_id
            .split_once('_')
            .map_or(self.user_pool_id.as_str(), |(region, _)| region);
        format!(
            "https://cognito-idp.{region}.amazonaws.com/{}",
            self.user_pool_id
        )
    }

    fn base(&self) -> Result<Url, ClientError> {
        let domain = self.domain.trim_end_matches('/');
        if domain.contains("://") {
            Ok(Url::parse(domain)?)
        } else {
            Ok(Url::parse(&format!("https://{domain}"))?)
        }
    }

    fn authorize_url(&self, path: &str) -> Result<Url, ClientError> {
        let mut url = self.base()?.join(path)?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("response_type", "code")
            .append_pair("scope", &SCOPES.join(" "))
            .append_pair("redirect_uri", &self.app_url);
        Ok(url)
    }

    /// Hosted sign-in page (authorization-code flow).
    pub fn sign_in_url(&self) -> Result<Url, ClientError> {
        self.authorize_url("/oauth2/authorize")
    }

    /// Hosted sign-up page.
    pub fn sign_up_url(&self) -> Result<Url, ClientError> {
        self.authorize_url("/signup")
    }

    /// Hosted sign-out endpoint, returning to the app afterwards.
    pub fn sign_out_url(&self) -> Result<Url, ClientError> {
        let mut url = self.base()?.join("/logout")?;
        url.query_pairs_mut()
            .append_pair("client_id", &self.client_id)
            .append_pair("logout_uri", &self.app_url);
        Ok(url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(domain: &str) -> IdentityConfig {
        IdentityConfig {
            user_pool_id: "eu-central-1_abc".into(),
            client_id: "client123".into(),
            domain: domain.into(),
            app_url: "http://localhost:3000".into(),
        }
    }

    #[test]
    fn sign_in_url_uses_code_flow_and_scopes() {
        let url = config("stayio.auth.eu-central-1.amazoncognito.com")
            .sign_in_url()
            .unwrap();

        assert_eq!(url.scheme(), "https");
        assert_eq!(url.path(), "/oauth2/authorize");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("scope".into(), "openid email profile".into())));
        assert!(pairs.contains(&("redirect_uri".into(), "http://localhost:3000".into())));
    }

    #[test]
    fn domain_with_scheme_is_kept() {
        let url = config("http://localhost:9229/").sign_out_url().unwrap();
        assert_eq!(url.as_str().split('?').next(), Some("http://localhost:9229/logout"));
    }

    #[test]
    fn issuer_derives_region_from_pool_id() {
        assert_eq!(
            config("auth.example.com").issuer(),
            "https://cognito-idp.eu-central-1.amazonaws.com/eu-central-1_abc"
        );
    }

    #[test]
    fn sign_up_offers_both_roles() {
        let roles = config("auth.example.com").sign_up_roles();
        assert_eq!(roles, &[Role::Tenant, Role::Manager]);
    }
}
