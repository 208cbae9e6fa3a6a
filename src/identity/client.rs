use crate::error::IdentityError;
use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;

pub const DEFAULT_API_URL: &str = "https://api.clerk.com";

#[derive(Debug, Clone, Deserialize)]
pub struct EmailAddress {
    pub id: String,
    pub email_address: String,
}

/// User as returned by the identity service backend API
#[derive(Debug, Clone, Deserialize)]
pub struct IdentityUser {
    pub id: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub username: Option<String>,
    #[serde(default)]
    pub email_addresses: Vec<EmailAddress>,
    pub primary_email_address_id: Option<String>,
}

impl IdentityUser {
    pub fn primary_email(&self) -> Option<&str> {
        let primary = self.primary_email_address_id.as_deref();
        self.email_addresses
            .iter()
            .find(|e| Some(e.id.as_str()) == primary)
            .or_else(|| self.email_addresses.first())
            .map(|e| e.email_address.as_str())
    }

    pub fn display_name(&self) -> Option<String> {
        match (self.first_name.as_deref(), self.last_name.as_deref()) {
            (Some(first), Some(last)) => Some(format!("{} {}", first, last)),
            (Some(first), None) => Some(first.to_string()),
            (None, Some(last)) => Some(last.to_string()),
            (None, None) => self.username.clone(),
        }
    }
}

pub struct ClerkClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl ClerkClient {
    pub fn new(secret_key: &str) -> Self {
        Self {
            client: Client::new(),
            base_url: DEFAULT_API_URL.to_string(),
            secret_key: secret_key.to_string(),
        }
    }

    /// Helper for testing to override base URL (e.g. wiremock)
    pub fn with_base_url(mut self, url: &str) -> Self {
        self.base_url = url.trim_end_matches('/').to_string();
        self
    }

    /// Look up a user by id. Unknown ids yield `Ok(None)`.
    pub fn get_user(&self, user_id: &str) -> Result<Option<IdentityUser>, IdentityError> {
        let url = format!("{}/v1/users/{}", self.base_url, user_id);
        debug!(url = %url, "looking up user");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()?;

        match response.status() {
            StatusCode::NOT_FOUND => Ok(None),
            status if status.is_success() => Ok(Some(response.json::<IdentityUser>()?)),
            status => Err(IdentityError::Api {
                status: status.as_u16(),
                body: response.text().unwrap_or_default(),
            }),
        }
    }
}
