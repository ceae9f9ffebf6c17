//! Fixed values of the gateway contract.

/// Production handshake (HS) API endpoint.
pub const PRODUCTION_HANDSHAKE_URL: &str = "https://payments.bankalfalah.com/HS/api/HSAPI/HSAPI";

/// Sandbox handshake (HS) API endpoint.
pub const SANDBOX_HANDSHAKE_URL: &str = "https://sandbox.bankalfalah.com/HS/api/HSAPI/HSAPI";

/// Production hosted payment page receiving the final form POST.
pub const PRODUCTION_PAYMENT_PAGE_URL: &str = "https://payments.bankalfalah.com/SSO/SSO/SSO";

/// Sandbox hosted payment page receiving the final form POST.
pub const SANDBOX_PAYMENT_PAGE_URL: &str = "https://sandbox.bankalfalah.com/SSO/SSO/SSO";

/// Settlement currency of the hosted page.
pub const CURRENCY: &str = "PKR";

/// Transaction type selecting the page-redirection flow on the hosted page.
pub const TRANSACTION_TYPE_PAGE_REDIRECTION: &str = "3";

/// Timeout for the handshake request, in seconds.
pub const REQUEST_TIME_OUT: u64 = 30;
