//! Ordered wire-field derivation for the two gateway signatures.
//!
//! Field membership and order are dictated by the gateway and are part of
//! the external contract: the request hash covers the values in exactly the
//! order built here, and the gateway recomputes it server side. Reordering
//! or dropping an entry produces a rejected transaction.

use secrecy::ExposeSecret;

use crate::{consts, types::AlfaPaymentConfig};

/// An insertion-ordered set of wire fields.
///
/// Iteration order is insertion order; it is never sorted, since the order
/// feeds [`crate::crypto::generate_request_hash`].
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldMap {
    entries: Vec<(&'static str, String)>,
}

impl FieldMap {
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: Vec::with_capacity(capacity),
        }
    }

    pub(crate) fn push(&mut self, name: &'static str, value: String) {
        self.entries.push((name, value));
    }

    /// Iterates the fields in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, &str)> + '_ {
        self.entries
            .iter()
            .map(|(name, value)| (*name, value.as_str()))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> Vec<&'static str> {
        self.entries.iter().map(|(name, _)| *name).collect()
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when no field has been derived.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The values concatenated in insertion order, the message half of the
    /// request hash. Empty values contribute nothing but their key stays in
    /// the mapping, so the gateway still receives the field.
    pub(crate) fn concatenated_values(&self) -> String {
        self.entries
            .iter()
            .map(|(_, value)| value.as_str())
            .collect()
    }
}

/// Derives the eight handshake fields in the order the HS API signs them.
///
/// This is the only place the merchant password leaves its secret wrapper;
/// it travels inside the signed handshake body and never reaches the
/// redirect form.
pub fn handshake_fields(config: &AlfaPaymentConfig) -> FieldMap {
    let mut fields = FieldMap::with_capacity(8);
    fields.push("HS_MerchantId", config.merchant_id.clone());
    fields.push("HS_StoreId", config.store_id.clone());
    fields.push("HS_ChannelId", config.channel_id.clone());
    fields.push("HS_MerchantUsername", config.merchant_username.clone());
    fields.push(
        "HS_MerchantPassword",
        config.merchant_password.expose_secret().clone(),
    );
    fields.push("HS_MerchantHash", config.merchant_hash.clone());
    fields.push(
        "HS_TransactionReferenceNumber",
        config.transaction_reference_number.clone(),
    );
    fields.push(
        "HS_TransactionAmount",
        format_amount(config.transaction_amount),
    );
    fields
}

/// Derives the ten fields the hosted payment page expects, in signing order.
///
/// Overlaps the handshake set but excludes the password; the AuthToken is
/// appended by the caller after the token exchange, so the second signature
/// covers these values with the token last.
pub fn redirect_form_fields(config: &AlfaPaymentConfig) -> FieldMap {
    let mut fields = FieldMap::with_capacity(10);
    fields.push("ChannelId", config.channel_id.clone());
    fields.push("Currency", consts::CURRENCY.to_string());
    fields.push("MerchantId", config.merchant_id.clone());
    fields.push("StoreId", config.store_id.clone());
    fields.push("MerchantHash", config.merchant_hash.clone());
    fields.push("MerchantUsername", config.merchant_username.clone());
    fields.push("ReturnURL", config.redirect_url.clone());
    fields.push(
        "TransactionTypeId",
        consts::TRANSACTION_TYPE_PAGE_REDIRECTION.to_string(),
    );
    fields.push(
        "TransactionReferenceNumber",
        config.transaction_reference_number.clone(),
    );
    fields.push(
        "TransactionAmount",
        format_amount(config.transaction_amount),
    );
    fields
}

// The gateway's samples render amounts the way script engines print numbers:
// no trailing zeros, no thousands separators. f64 Display matches that.
pub(crate) fn format_amount(amount: f64) -> String {
    amount.to_string()
}
