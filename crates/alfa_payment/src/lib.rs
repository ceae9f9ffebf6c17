#![forbid(unsafe_code)]
#![warn(
    missing_docs,
    rust_2018_idioms,
    missing_debug_implementations,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::panic,
    clippy::panic_in_result_fn,
    clippy::panicking_unwrap,
    clippy::unreachable,
    clippy::unwrap_in_result,
    clippy::unwrap_used
)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/", "README.md"))]

pub mod checkout;
pub mod client;
pub mod consts;
pub mod crypto;
pub mod errors;
pub mod fields;
pub mod redirect;
pub mod types;

pub use secrecy::{ExposeSecret, Secret};

pub use self::{
    checkout::CheckoutSession,
    errors::{CheckoutError, CustomResult, GatewayError},
    redirect::{Method, Navigator, RedirectionForm},
    types::{AlfaPaymentConfig, AuthToken, Environment, GatewayEndpoints},
};
