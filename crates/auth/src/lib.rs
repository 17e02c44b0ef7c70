//! `climabill-auth` — pure authentication/authorization boundary (zero-trust).
//!
//! This crate is intentionally decoupled from HTTP and storage. It owns:
//! credential issuance and verification (JWT), password hashing (Argon2id),
//! the role/permission vocabulary, and the pure authorization check the API
//! layer calls before touching any tenant data.

pub mod authorize;
pub mod claims;
pub mod error;
pub mod password;
pub mod permissions;
pub mod roles;
pub mod token;
pub mod user;

pub use authorize::{authorize, AuthzError, Principal};
pub use claims::Claims;
pub use error::AuthError;
pub use password::{hash_password, verify_password};
pub use permissions::{role_permissions, Permission};
pub use roles::Role;
pub use token::{TokenService, ACCESS_TOKEN_TTL_HOURS};
pub use user::UserAccount;
