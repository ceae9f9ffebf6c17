//! HTTP client for the gateway's handshake API.

use std::time::Duration;

use error_stack::{report, ResultExt};
use tracing::instrument;

use crate::{
    consts,
    errors::{CustomResult, GatewayError},
    fields::FieldMap,
    types::{AlfaHandshakeResponse, AuthToken, GatewayEndpoints},
};

/// Client for the gateway's handshake (HS) API.
///
/// Bound to one [`GatewayEndpoints`] pair for its lifetime; no other
/// endpoint is reachable through it.
#[derive(Clone, Debug)]
pub struct GatewayClient {
    http_client: reqwest::Client,
    endpoints: GatewayEndpoints,
}

impl GatewayClient {
    /// Builds a client bound to `endpoints`.
    pub fn new(endpoints: GatewayEndpoints) -> CustomResult<Self, GatewayError> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(consts::REQUEST_TIME_OUT))
            .build()
            .change_context(GatewayError::ClientConstructionFailed)?;
        Ok(Self {
            http_client,
            endpoints,
        })
    }

    /// The endpoints this client is bound to.
    pub fn endpoints(&self) -> &GatewayEndpoints {
        &self.endpoints
    }

    /// Exchanges signed handshake fields for an authorization token.
    ///
    /// Exactly one POST per call, no retry, no backoff; a fresh token is
    /// fetched on every attempt. Failures propagate unmodified so the
    /// caller decides what to surface.
    #[instrument(skip_all)]
    pub async fn request_auth_token(
        &self,
        fields: &FieldMap,
        request_hash: &str,
    ) -> CustomResult<AuthToken, GatewayError> {
        let body = handshake_body(fields, request_hash);
        tracing::debug!(url = %self.endpoints.handshake_url, "sending handshake request");

        let response = self
            .http_client
            .post(&self.endpoints.handshake_url)
            .json(&body)
            .send()
            .await
            .change_context(GatewayError::RequestNotSent)
            .attach_printable("Unable to send handshake request to the gateway")?;

        let status = response.status();
        tracing::debug!(status = status.as_u16(), "handshake response received");
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let mut report = report!(GatewayError::UnexpectedHttpStatus {
                status_code: status.as_u16(),
            });
            if !body.is_empty() {
                report = report.attach_printable(format!("response body: {body}"));
            }
            return Err(report);
        }

        let bytes = response
            .bytes()
            .await
            .change_context(GatewayError::ResponseDeserializationFailed)?;
        let response: AlfaHandshakeResponse = serde_json::from_slice(&bytes)
            .change_context(GatewayError::ResponseDeserializationFailed)
            .attach_printable("Failed to parse the handshake response as JSON")?;

        let token = response
            .auth_token
            .filter(|token| !token.is_empty())
            .ok_or_else(|| {
                let mut report = report!(GatewayError::AuthTokenMissing);
                if let Some(message) = response.error_message {
                    report = report.attach_printable(format!("gateway message: {message}"));
                }
                report
            })?;

        tracing::debug!("authorization token obtained");
        Ok(AuthToken::from(token))
    }
}

// The HS API reads fields by name, so object key order does not matter here;
// only the signing order inside `request_hash` does.
fn handshake_body(fields: &FieldMap, request_hash: &str) -> serde_json::Value {
    let mut body = serde_json::Map::new();
    for (name, value) in fields.iter() {
        body.insert(name.to_string(), serde_json::Value::String(value.to_string()));
    }
    body.insert(
        "HS_RequestHash".to_string(),
        serde_json::Value::String(request_hash.to_string()),
    );
    serde_json::Value::Object(body)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use super::*;

    fn field_map(entries: &[(&'static str, &str)]) -> FieldMap {
        let mut map = FieldMap::with_capacity(entries.len());
        for (name, value) in entries.iter().copied() {
            map.push(name, value.to_string());
        }
        map
    }

    #[test]
    fn handshake_body_holds_all_fields_plus_request_hash() {
        let fields = field_map(&[("HS_MerchantId", "1"), ("HS_StoreId", "2")]);
        let body = handshake_body(&fields, "abc123");
        let object = body.as_object().expect("body should be a JSON object");
        assert_eq!(object.len(), 3);
        assert_eq!(body["HS_MerchantId"], "1");
        assert_eq!(body["HS_StoreId"], "2");
        assert_eq!(body["HS_RequestHash"], "abc123");
    }

    #[test]
    fn handshake_body_keeps_empty_values() {
        let fields = field_map(&[("HS_MerchantId", "")]);
        let body = handshake_body(&fields, "abc123");
        assert_eq!(body["HS_MerchantId"], "");
    }
}
