//! Authentication error model.

use thiserror::Error;

/// Authentication failure.
///
/// `InvalidCredential` deliberately covers *every* way a credential can be
/// bad — unknown email, wrong password, bad signature, malformed payload,
/// expired token. Collapsing these into one variant (and one message) is
/// what keeps the API from acting as an oracle for account enumeration or
/// token probing.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredential,

    /// A cryptographic primitive failed on well-formed input (e.g. a stored
    /// hash is corrupt). Surfaced as an internal fault, never to callers.
    #[error("crypto failure: {0}")]
    Crypto(String),
}
