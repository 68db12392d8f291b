use base32::Alphabet;
use hmac::{Hmac, Mac};
use sha1::Sha1;
use totp_rs::{Algorithm, TOTP};

type HmacSha1 = Hmac<Sha1>;

const B32_NO_PADDING: Alphabet = Alphabet::Rfc4648 { padding: false };

/// Deterministic per-user TOTP secret:
/// `base32_nopad(HMAC-SHA1(key = salt_id, message = user_id))`.
///
/// Pure function of the two identifiers; no randomness and no stored state.
pub fn derive_totp_secret(user_id: &str, salt_id: &str) -> String {
    let mut mac =
        HmacSha1::new_from_slice(salt_id.as_bytes()).expect("HMAC accepts keys of any length");
    mac.update(user_id.as_bytes());
    let digest = mac.finalize().into_bytes();
    base32::encode(B32_NO_PADDING, digest.as_slice())
}

/// Check a time-based code against the derived secret.
///
/// Standard 6-digit, 30-second-step validation with one step of skew.
/// Stateless: no lockout, no rate limiting, no replay tracking.
pub fn validate_totp_code(user_id: &str, salt_id: &str, code: &str) -> bool {
    let secret = derive_totp_secret(user_id, salt_id);
    let Some(secret_bytes) = base32::decode(B32_NO_PADDING, &secret) else {
        return false;
    };
    let Ok(totp) = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret_bytes) else {
        return false;
    };
    totp.check_current(code).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_secret_is_deterministic() {
        let secret = derive_totp_secret("user-1", "salt-1");
        assert_eq!(secret, derive_totp_secret("user-1", "salt-1"));
        assert!(!secret.is_empty());
        assert!(!secret.ends_with('='));
    }

    #[test]
    fn derived_secret_varies_with_inputs() {
        let secret = derive_totp_secret("user-1", "salt-1");
        assert_ne!(secret, derive_totp_secret("user-2", "salt-1"));
        assert_ne!(secret, derive_totp_secret("user-1", "salt-2"));
    }

    #[test]
    fn accepts_a_freshly_generated_code() {
        let secret = derive_totp_secret("user-1", "salt-1");
        let secret_bytes = base32::decode(B32_NO_PADDING, &secret).unwrap();
        let totp = TOTP::new(Algorithm::SHA1, 6, 1, 30, secret_bytes).unwrap();
        let code = totp.generate_current().unwrap();

        assert!(validate_totp_code("user-1", "salt-1", &code));
    }

    #[test]
    fn rejects_an_unrelated_code() {
        // Wrong length can never match a 6-digit code.
        assert!(!validate_totp_code("user-1", "salt-1", "0"));
        assert!(!validate_totp_code("user-1", "salt-1", ""));
    }
}
