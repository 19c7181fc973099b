//! WhatsApp Business Cloud API credentials and endpoint URLs

use crate::error::{Error, Result};
use serde::Deserialize;

const GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// WhatsApp Business Cloud API credentials
#[derive(Debug, Clone, Deserialize)]
pub struct Credentials {
    /// Access token (from Meta Business Suite)
    pub access_token: String,
    /// Phone Number ID (the sending phone number)
    pub phone_number_id: String,
    /// Business Account ID, required only for template and catalog management
    #[serde(default)]
    pub business_account_id: Option<String>,
    /// Graph API version (default: v21.0)
    #[serde(default = "default_api_version")]
    pub api_version: String,
}

fn default_api_version() -> String {
    "v21.0".to_string()
}

impl Credentials {
    /// Create from environment variables
    pub fn from_env() -> Result<Self> {
        let access_token = std::env::var("WHATSAPP_ACCESS_TOKEN")
            .map_err(|_| Error::Credentials("WHATSAPP_ACCESS_TOKEN not set".to_string()))?;

        let phone_number_id = std::env::var("WHATSAPP_PHONE_NUMBER_ID")
            .map_err(|_| Error::Credentials("WHATSAPP_PHONE_NUMBER_ID not set".to_string()))?;

        let business_account_id = std::env::var("WHATSAPP_BUSINESS_ACCOUNT_ID")
            .ok()
            .filter(|id| !id.is_empty());

        let api_version =
            std::env::var("WHATSAPP_API_VERSION").unwrap_or_else(|_| default_api_version());

        Ok(Self {
            access_token,
            phone_number_id,
            business_account_id,
            api_version,
        })
    }

    /// Create with required fields
    #[must_use]
    pub fn new(access_token: impl Into<String>, phone_number_id: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            phone_number_id: phone_number_id.into(),
            business_account_id: None,
            api_version: default_api_version(),
        }
    }

    /// Set the business account ID
    #[must_use]
    pub fn with_business_account_id(mut self, id: impl Into<String>) -> Self {
        self.business_account_id = Some(id.into());
        self
    }

    /// Set the Graph API version
    #[must_use]
    pub fn with_api_version(mut self, version: impl Into<String>) -> Self {
        self.api_version = version.into();
        self
    }

    /// URL of the phone-number-scoped messages endpoint
    #[must_use]
    pub fn messages_url(&self) -> String {
        format!(
            "{GRAPH_BASE_URL}/{}/{}/messages",
            self.api_version, self.phone_number_id
        )
    }

    /// URL of the business-account message templates endpoint, with an
    /// optional `?name=` filter
    ///
    /// # Errors
    /// Fails when no business account ID is configured.
    pub fn message_templates_url(&self, name: Option<&str>) -> Result<String> {
        let account = self.require_business_account_id()?;
        let url = format!(
            "{GRAPH_BASE_URL}/{}/{account}/message_templates",
            self.api_version
        );
        Ok(match name {
            Some(name) => format!("{url}?name={name}"),
            None => url,
        })
    }

    /// URL of the business-account product catalogs endpoint
    ///
    /// # Errors
    /// Fails when no business account ID is configured.
    pub fn product_catalogs_url(&self) -> Result<String> {
        let account = self.require_business_account_id()?;
        Ok(format!(
            "{GRAPH_BASE_URL}/{}/{account}/product_catalogs",
            self.api_version
        ))
    }

    fn require_business_account_id(&self) -> Result<&str> {
        self.business_account_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .ok_or_else(|| {
                Error::Credentials(
                    "business account ID is required for template and catalog management"
                        .to_string(),
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_builder() {
        let credentials = Credentials::new("token", "phone_id")
            .with_business_account_id("business_id")
            .with_api_version("v20.0");

        assert_eq!(credentials.access_token, "token");
        assert_eq!(credentials.phone_number_id, "phone_id");
        assert_eq!(credentials.business_account_id.as_deref(), Some("business_id"));
        assert_eq!(credentials.api_version, "v20.0");
    }

    #[test]
    fn test_messages_url() {
        let credentials = Credentials::new("token", "12345");
        assert_eq!(
            credentials.messages_url(),
            "https://graph.facebook.com/v21.0/12345/messages"
        );
    }

    #[test]
    fn test_message_templates_url() {
        let credentials = Credentials::new("token", "12345").with_business_account_id("67890");

        assert_eq!(
            credentials.message_templates_url(None).unwrap(),
            "https://graph.facebook.com/v21.0/67890/message_templates"
        );
        assert_eq!(
            credentials.message_templates_url(Some("welcome")).unwrap(),
            "https://graph.facebook.com/v21.0/67890/message_templates?name=welcome"
        );
    }

    #[test]
    fn test_business_account_id_required() {
        let credentials = Credentials::new("token", "12345");

        let err = credentials.message_templates_url(None).unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));

        let err = credentials.product_catalogs_url().unwrap_err();
        assert!(matches!(err, Error::Credentials(_)));
    }

    #[test]
    fn test_empty_business_account_id_rejected() {
        let credentials = Credentials::new("token", "12345").with_business_account_id("");
        assert!(credentials.product_catalogs_url().is_err());
    }
}
