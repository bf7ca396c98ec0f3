//! Identity recovery from a bearer token.
//!
//! The backend issues JWTs whose payload carries `sub` (user id) and `role`.
//! Signatures are not checked here; the server does that on every request.
//! This is only a fallback for login responses that omit the user record.

use api::{Identity, Role};
use base64::alphabet;
use base64::engine::general_purpose::GeneralPurpose;
use base64::engine::{DecodePaddingMode, GeneralPurposeConfig};
use base64::Engine;
use serde::Deserialize;

const LENIENT: GeneralPurposeConfig =
    GeneralPurposeConfig::new().with_decode_padding_mode(DecodePaddingMode::Indifferent);

/// URL-safe alphabet as issued by JWT libraries.
const URL_SAFE_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::URL_SAFE, LENIENT);
/// Some issuers emit the standard alphabet instead.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(&alphabet::STANDARD, LENIENT);

#[derive(Debug, Deserialize)]
struct Claims {
    sub: String,
    role: String,
}

/// Decode the middle segment of a three-part token into an [`Identity`].
///
/// Returns `None` for anything that is not `header.payload.signature` with a
/// base64 JSON payload holding string `sub` and `role` claims.
pub fn identity_from_token(token: &str) -> Option<Identity> {
    let mut parts = token.split('.');
    let (Some(_), Some(payload), Some(_), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    let bytes = URL_SAFE_LENIENT
        .decode(payload)
        .or_else(|_| STANDARD_LENIENT.decode(payload))
        .ok()?;
    let claims: Claims = serde_json::from_slice(&bytes).ok()?;

    Some(Identity::new(claims.sub, Role::from(claims.role)))
}

#[cfg(test)]
pub(crate) fn token_for(payload: &serde_json::Value) -> String {
    use base64::engine::general_purpose::URL_SAFE_NO_PAD;
    format!("header.{}.sig", URL_SAFE_NO_PAD.encode(payload.to_string()))
}

#[cfg(test)]
mod tests {
    use base64::engine::general_purpose::STANDARD;
    use serde_json::json;

    use super::*;

    #[test]
    fn test_doctor_claims() {
        let token = token_for(&json!({"sub": "user-1", "role": "ROLE_DOCTOR", "iat": 1700000000}));
        assert_eq!(
            identity_from_token(&token),
            Some(Identity::new("user-1", Role::Doctor))
        );
    }

    #[test]
    fn test_padded_standard_alphabet() {
        // "?>" forces '/' in the standard alphabet
        let payload = json!({"sub": "u?>", "role": "ROLE_PATIENT"}).to_string();
        let token = format!("h.{}.s", STANDARD.encode(&payload));
        let identity = identity_from_token(&token).unwrap();
        assert_eq!(identity.id, "u?>");
        assert_eq!(identity.role, Role::Patient);
    }

    #[test]
    fn test_malformed_tokens() {
        assert_eq!(identity_from_token(""), None);
        assert_eq!(identity_from_token("not-a-jwt"), None);
        assert_eq!(identity_from_token("a.b"), None);
        assert_eq!(identity_from_token("a.b.c.d"), None);
        assert_eq!(identity_from_token("header.%%%.sig"), None);

        let not_json = format!("h.{}.s", STANDARD.encode("plain text"));
        assert_eq!(identity_from_token(&not_json), None);
    }

    #[test]
    fn test_missing_claims() {
        assert_eq!(identity_from_token(&token_for(&json!({"sub": "user-1"}))), None);
        assert_eq!(identity_from_token(&token_for(&json!({"role": "ROLE_DOCTOR"}))), None);
        assert_eq!(
            identity_from_token(&token_for(&json!({"sub": 42, "role": "ROLE_DOCTOR"}))),
            None
        );
    }
}
