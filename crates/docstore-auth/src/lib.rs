//! # docstore-auth
//!
//! Authentication for Docstore.
//!
//! ## Modules
//!
//! - `jwt`: signed bearer token issuance and validation
//! - `password`: Argon2id hashing and the minimum-length policy
//! - `token`: email/password exchange and request authentication

pub mod jwt;
pub mod password;
pub mod token;

pub use jwt::{Claims, JwtDecoder, JwtEncoder, extract_token};
pub use password::{PasswordHasher, PasswordPolicy};
pub use token::{IssuedToken, TokenService};
