//! Error types for the checkout pipeline.

/// Custom Result
/// A custom datatype that wraps the error variant <E> into a report, allowing
/// error_stack::Report<E> specific extendability
///
/// Effectively, equivalent to `Result<T, error_stack::Report<E>>`
///
pub type CustomResult<T, E> = error_stack::Result<T, E>;

/// Cryptographic algorithm errors
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CryptoError {
    /// The cryptographic algorithm was unable to sign the message
    #[error("Failed to sign message")]
    MessageSigningFailed,
}

/// Failures while talking to the gateway's handshake API.
#[allow(missing_docs)] // Only to prevent warnings about struct fields not being documented
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The underlying HTTP client could not be constructed.
    #[error("Failed to construct the HTTP client")]
    ClientConstructionFailed,

    /// The handshake request never reached the gateway.
    #[error("Failed to send the handshake request to the gateway")]
    RequestNotSent,

    /// The gateway answered with a non-success HTTP status.
    #[error("The gateway returned an unexpected HTTP status: {status_code}")]
    UnexpectedHttpStatus { status_code: u16 },

    /// The gateway response body could not be decoded.
    #[error("Failed to deserialize the gateway response")]
    ResponseDeserializationFailed,

    /// The gateway response carried no usable authorization token.
    #[error("The gateway response did not contain an authorization token")]
    AuthTokenMissing,
}

/// Failures handing the redirect form to the embedding application.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum NavigationError {
    /// The navigator could not deliver the redirect form.
    #[error("Failed to hand off the redirect form for submission")]
    SubmissionFailed,
}

/// Caller-facing failures of a submission attempt.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum CheckoutError {
    /// Another attempt holds the busy flag; the in-flight attempt is unaffected.
    #[error("Another submission attempt is already in progress")]
    SubmissionInProgress,

    /// The gateway client could not be constructed for the session.
    #[error("Failed to construct the gateway client")]
    ClientConstructionFailed,

    /// A request hash could not be computed.
    #[error("Failed to compute the request hash")]
    RequestSigningFailed,

    /// The token exchange with the gateway failed.
    #[error("The authorization handshake with the gateway failed")]
    HandshakeFailed,

    /// The navigator rejected the final redirect form.
    #[error("Failed to hand the redirect form to the navigator")]
    NavigationFailed,
}

/// Invalid or incomplete merchant configuration.
#[allow(missing_docs)] // Only to prevent warnings about struct fields not being documented
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    /// The provided configuration is missing a required field.
    #[error("Missing required field: {field_name}")]
    MissingRequiredField { field_name: &'static str },

    /// An invalid value was provided.
    #[error("{message}")]
    InvalidValue { message: String },
}
