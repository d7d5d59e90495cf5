//! Bearer token handling.

pub mod claims;
pub mod decoder;
pub mod encoder;

pub use claims::Claims;
pub use decoder::JwtDecoder;
pub use encoder::JwtEncoder;

/// Authorization schemes accepted in front of the token.
const SCHEMES: [&str; 2] = ["Bearer", "Token"];

/// Pull the token out of an `Authorization` header value.
///
/// Both `Bearer <token>` and `Token <token>` are accepted; the scheme is
/// matched case-insensitively.
pub fn extract_token(header: &str) -> Option<&str> {
    let (scheme, token) = header.trim().split_once(' ')?;
    if !SCHEMES.iter().any(|s| s.eq_ignore_ascii_case(scheme)) {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}
