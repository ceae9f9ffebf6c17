//! Submission pipeline and busy-state tracking.

use std::sync::atomic::{AtomicBool, Ordering};

use error_stack::{report, ResultExt};
use secrecy::ExposeSecret;
use tracing::instrument;

use crate::{
    client::GatewayClient,
    crypto,
    errors::{CheckoutError, CustomResult},
    fields,
    redirect::{Method, Navigator, RedirectionForm},
    types::{AlfaPaymentConfig, Environment, GatewayEndpoints},
};

/// Drives hosted-checkout submissions for one bound merchant configuration.
///
/// A session runs at most one attempt at a time: the busy flag is taken for
/// the whole pipeline and a concurrent [`submit`](Self::submit) observes
/// [`CheckoutError::SubmissionInProgress`] without disturbing the in-flight
/// attempt. Every attempt derives its fields, hashes and token fresh;
/// nothing is carried over between attempts.
#[derive(Debug)]
pub struct CheckoutSession {
    config: AlfaPaymentConfig,
    environment: Environment,
    client: GatewayClient,
    status_message: Option<String>,
    submitting: AtomicBool,
}

impl CheckoutSession {
    /// Creates a session against `environment`'s fixed endpoints.
    pub fn new(
        config: AlfaPaymentConfig,
        environment: Environment,
    ) -> CustomResult<Self, CheckoutError> {
        Self::with_endpoints(config, environment, GatewayEndpoints::for_environment(environment))
    }

    /// Creates a session with explicit endpoints.
    ///
    /// Meant for tests and gateways fronted by proxies; production code
    /// normally goes through [`new`](Self::new) so both URLs come from the
    /// same deployment.
    pub fn with_endpoints(
        config: AlfaPaymentConfig,
        environment: Environment,
        endpoints: GatewayEndpoints,
    ) -> CustomResult<Self, CheckoutError> {
        let client =
            GatewayClient::new(endpoints).change_context(CheckoutError::ClientConstructionFailed)?;
        Ok(Self {
            config,
            environment,
            client,
            status_message: None,
            submitting: AtomicBool::new(false),
        })
    }

    /// Overrides the wait text of the interstitial page.
    pub fn with_status_message(mut self, message: impl Into<String>) -> Self {
        self.status_message = Some(message.into());
        self
    }

    /// The environment this session targets.
    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// The merchant configuration bound to this session.
    pub fn config(&self) -> &AlfaPaymentConfig {
        &self.config
    }

    /// True while a submission attempt is in flight.
    pub fn is_submitting(&self) -> bool {
        self.submitting.load(Ordering::Acquire)
    }

    /// Runs one submission attempt end to end.
    ///
    /// Pipeline: derive the handshake fields, sign them, exchange fields +
    /// hash for an AuthToken, derive the form fields, sign them with the
    /// token appended, then hand the assembled form to `navigator`. No step
    /// is skipped and the form hash is computed strictly after the token
    /// arrives. On success the final [`RedirectionForm`] is also returned
    /// to the caller.
    ///
    /// On any failure nothing has been submitted to the payment page and
    /// the error is returned typed; the busy flag resets on success, on
    /// failure and when the returned future is dropped mid-flight.
    #[instrument(skip_all, fields(environment = %self.environment))]
    pub async fn submit(
        &self,
        navigator: &dyn Navigator,
    ) -> CustomResult<RedirectionForm, CheckoutError> {
        let _guard = SubmitGuard::acquire(&self.submitting)
            .ok_or_else(|| report!(CheckoutError::SubmissionInProgress))?;
        self.warn_on_empty_signing_keys();

        let handshake = fields::handshake_fields(&self.config);
        let handshake_hash = crypto::generate_request_hash(
            &handshake,
            &self.config.secret_key_1,
            &self.config.secret_key_2,
        )
        .change_context(CheckoutError::RequestSigningFailed)?;

        let token = self
            .client
            .request_auth_token(&handshake, &handshake_hash)
            .await
            .change_context(CheckoutError::HandshakeFailed)?;

        let form_fields = fields::redirect_form_fields(&self.config);
        let mut signed_fields = form_fields.clone();
        signed_fields.push("AuthToken", token.as_str().to_string());
        let form_hash = crypto::generate_request_hash(
            &signed_fields,
            &self.config.secret_key_1,
            &self.config.secret_key_2,
        )
        .change_context(CheckoutError::RequestSigningFailed)?;

        let mut payload = Vec::with_capacity(form_fields.len() + 2);
        payload.push(("AuthToken".to_string(), token.as_str().to_string()));
        payload.push(("RequestHash".to_string(), form_hash));
        for (name, value) in form_fields.iter() {
            payload.push((name.to_string(), value.to_string()));
        }

        let form = RedirectionForm {
            endpoint: self.client.endpoints().payment_page_url.clone(),
            method: Method::Post,
            form_fields: payload,
            status_message: self.status_message.clone(),
        };

        tracing::info!(
            field_count = form.form_fields.len(),
            "handing redirect form to the navigator"
        );
        navigator
            .submit(&form)
            .change_context(CheckoutError::NavigationFailed)?;
        Ok(form)
    }

    fn warn_on_empty_signing_keys(&self) {
        if self.config.secret_key_1.expose_secret().is_empty()
            || self.config.secret_key_2.expose_secret().is_empty()
        {
            tracing::warn!("a signing key is empty; request hashes will cover an empty key");
        }
    }
}

/// Holds the busy flag for the duration of one attempt.
///
/// Dropping the guard releases the flag, which covers early returns and a
/// caller dropping the submit future while the handshake is in flight.
struct SubmitGuard<'a> {
    flag: &'a AtomicBool,
}

impl<'a> SubmitGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
            .then_some(Self { flag })
    }
}

impl Drop for SubmitGuard<'_> {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_is_exclusive_until_dropped() {
        let flag = AtomicBool::new(false);

        let guard = SubmitGuard::acquire(&flag);
        assert!(guard.is_some());
        assert!(flag.load(Ordering::Acquire));
        assert!(SubmitGuard::acquire(&flag).is_none());

        drop(guard);
        assert!(!flag.load(Ordering::Acquire));
        assert!(SubmitGuard::acquire(&flag).is_some());
    }
}
