//! Merchant configuration and gateway-facing types.

use error_stack::report;
use secrecy::{ExposeSecret, Secret};
use serde::de::Deserialize;

use crate::{
    consts,
    errors::{CustomResult, ValidationError},
};

/// Gateway deployment targeted by a session.
///
/// Both gateway URLs of an attempt resolve from one of these values, so the
/// handshake endpoint and the payment page can never belong to different
/// deployments within an attempt.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    serde::Deserialize,
    serde::Serialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Environment {
    /// Isolated test deployment of the gateway.
    Sandbox,
    /// Live deployment.
    #[default]
    Production,
}

/// Resolved gateway URLs for one attempt.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GatewayEndpoints {
    /// Handshake (HS) API endpoint receiving the token request.
    pub handshake_url: String,
    /// Hosted payment page receiving the final form POST.
    pub payment_page_url: String,
}

impl GatewayEndpoints {
    /// The fixed endpoint pair of `environment`.
    pub fn for_environment(environment: Environment) -> Self {
        match environment {
            Environment::Sandbox => Self {
                handshake_url: consts::SANDBOX_HANDSHAKE_URL.to_string(),
                payment_page_url: consts::SANDBOX_PAYMENT_PAGE_URL.to_string(),
            },
            Environment::Production => Self {
                handshake_url: consts::PRODUCTION_HANDSHAKE_URL.to_string(),
                payment_page_url: consts::PRODUCTION_PAYMENT_PAGE_URL.to_string(),
            },
        }
    }
}

/// Opaque token issued by the handshake API.
///
/// Valid for a single submission attempt; never cached or reused.
#[derive(Clone, Debug, PartialEq, Eq, serde::Deserialize, serde::Serialize)]
pub struct AuthToken(String);

impl AuthToken {
    /// The token value as sent in the redirect form.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for AuthToken {
    fn from(token: String) -> Self {
        Self(token)
    }
}

/// Merchant configuration for the hosted checkout.
///
/// Supplied wholly by the caller and bound to a session; nothing here is
/// read from the process environment. The secret keys are signing material
/// only and never leave the process; the password travels solely inside the
/// signed handshake request.
#[derive(Clone, Debug, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlfaPaymentConfig {
    /// Merchant identifier issued by the gateway.
    #[serde(deserialize_with = "deserialize_identifier")]
    pub merchant_id: String,
    /// Store identifier issued by the gateway.
    #[serde(deserialize_with = "deserialize_identifier")]
    pub store_id: String,
    /// Channel identifier issued by the gateway.
    #[serde(deserialize_with = "deserialize_identifier")]
    pub channel_id: String,
    /// Merchant hash issued by the gateway.
    pub merchant_hash: String,
    /// API username of the merchant account.
    pub merchant_username: String,
    /// API password of the merchant account.
    pub merchant_password: Secret<String>,
    /// URL the gateway redirects the customer back to.
    pub redirect_url: String,
    /// Merchant-chosen reference identifying the transaction.
    #[serde(deserialize_with = "deserialize_identifier")]
    pub transaction_reference_number: String,
    /// Transaction amount in major units (PKR).
    pub transaction_amount: f64,
    /// First signing key.
    pub secret_key_1: Secret<String>,
    /// Second signing key.
    pub secret_key_2: Secret<String>,
}

impl AlfaPaymentConfig {
    /// Checks the configuration for completeness.
    ///
    /// Submission itself performs no such check: unset fields sign as empty
    /// placeholders (see [`crate::crypto::generate_request_hash`]), matching
    /// the gateway's own tolerance. Callers wanting to fail loudly before
    /// reaching the gateway can call this first. Empty signing keys are
    /// allowed here; they only produce a warning at submission time.
    pub fn validate(&self) -> CustomResult<(), ValidationError> {
        let required = [
            ("merchantId", self.merchant_id.as_str()),
            ("storeId", self.store_id.as_str()),
            ("channelId", self.channel_id.as_str()),
            ("merchantHash", self.merchant_hash.as_str()),
            ("merchantUsername", self.merchant_username.as_str()),
            (
                "merchantPassword",
                self.merchant_password.expose_secret().as_str(),
            ),
            (
                "transactionReferenceNumber",
                self.transaction_reference_number.as_str(),
            ),
        ];
        for (field_name, value) in required {
            if value.is_empty() {
                return Err(report!(ValidationError::MissingRequiredField { field_name }));
            }
        }
        if !(self.transaction_amount.is_finite() && self.transaction_amount > 0.0) {
            return Err(report!(ValidationError::InvalidValue {
                message: format!(
                    "transactionAmount must be a positive amount, got: {}",
                    self.transaction_amount
                ),
            }));
        }
        url::Url::parse(&self.redirect_url).map_err(|error| {
            report!(ValidationError::InvalidValue {
                message: format!("redirectUrl is not a valid URL: {error}"),
            })
        })?;
        Ok(())
    }
}

/// Response body of the handshake API.
///
/// The gateway reports failures in-band on a success status, so everything
/// is optional here and the client decides what counts as a usable answer.
#[derive(Clone, Debug, serde::Deserialize)]
pub struct AlfaHandshakeResponse {
    /// Token authorizing the redirect submission.
    #[serde(rename = "AuthToken")]
    pub auth_token: Option<String>,
    /// Return URL echoed by the gateway.
    #[serde(rename = "ReturnURL")]
    pub return_url: Option<String>,
    /// "true"/"false" success marker.
    #[serde(rename = "Success")]
    pub success: Option<String>,
    /// Human-readable failure reason.
    #[serde(rename = "ErrorMessage")]
    pub error_message: Option<String>,
}

// Merchant portals hand out the identifiers as numbers; configs built from
// their JSON may carry either representation.
fn deserialize_identifier<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::String(str_val) => Ok(str_val),
        serde_json::Value::Number(num_val) => Ok(num_val.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "unexpected data format - expected string or number, got: {other:?}"
        ))),
    }
}
