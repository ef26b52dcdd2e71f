use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Algorithm, Argon2, Params, Version};

use crate::error::AuthError;

mod werkzeug;

/// Outcome of checking a password against a stored hash.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PasswordCheck {
    Match,
    /// Matched a hash from an older scheme; the caller should store a fresh one.
    MatchNeedsRehash,
    Mismatch,
}

/// Argon2id password hashing in PHC string format.
///
/// Hashes left behind by the werkzeug-based store are still accepted.
#[derive(Clone)]
pub struct Passwords {
    argon: Argon2<'static>,
}

impl Default for Passwords {
    fn default() -> Self {
        Self {
            argon: Argon2::default(),
        }
    }
}

impl Passwords {
    /// Cheap parameters for tests. Verification still works against hashes made with any parameters.
    #[must_use]
    pub fn low_cost() -> Self {
        let params = Params::new(Params::MIN_M_COST, 1, 1, None).unwrap_or_default();
        Self {
            argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
        }
    }

    /// Hash a password with a fresh random salt.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::Hashing` if the salt or hash cannot be produced.
    pub fn hash(&self, password: &str) -> Result<String, AuthError> {
        let salt_bytes: [u8; 16] = rand::random();
        let salt =
            SaltString::encode_b64(&salt_bytes).map_err(|e| AuthError::Hashing(e.to_string()))?;
        self.argon
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Hashing(e.to_string()))
    }

    /// Checks `password` against a stored Argon2 PHC or werkzeug `hash`.
    ///
    /// Unparseable hashes never match.
    #[must_use]
    pub fn check(&self, password: &str, hash: &str) -> PasswordCheck {
        if werkzeug::is_werkzeug(hash) {
            return if werkzeug::verify(password, hash) {
                PasswordCheck::MatchNeedsRehash
            } else {
                PasswordCheck::Mismatch
            };
        }
        let Ok(parsed) = PasswordHash::new(hash) else {
            return PasswordCheck::Mismatch;
        };
        match self.argon.verify_password(password.as_bytes(), &parsed) {
            Ok(()) => PasswordCheck::Match,
            Err(_) => PasswordCheck::Mismatch,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_then_verify() {
        let passwords = Passwords::low_cost();
        let hash = passwords.hash("hunter2").unwrap();
        assert!(hash.starts_with("$argon2id$"));
        assert_eq!(passwords.check("hunter2", &hash), PasswordCheck::Match);
        assert_eq!(passwords.check("hunter3", &hash), PasswordCheck::Mismatch);
    }

    #[test]
    fn salts_differ_between_hashes() {
        let passwords = Passwords::low_cost();
        let a = passwords.hash("same").unwrap();
        let b = passwords.hash("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn garbage_hash_never_matches() {
        let passwords = Passwords::low_cost();
        assert_eq!(passwords.check("pw", "pbkdf2:sha256:600000$abc$def"), PasswordCheck::Mismatch);
        assert_eq!(passwords.check("pw", "not a hash"), PasswordCheck::Mismatch);
        assert_eq!(passwords.check("pw", ""), PasswordCheck::Mismatch);
    }

    #[test]
    fn werkzeug_hash_asks_for_rehash() {
        let passwords = Passwords::low_cost();
        let legacy = "pbkdf2:sha256:1000$NaClNaCl$6b58b6de4d7c0758e6d495897879b8da5fc2bc9c2a4d13e3c49da488fb5f5e2d";
        assert_eq!(passwords.check("secret", legacy), PasswordCheck::MatchNeedsRehash);
        assert_eq!(passwords.check("wrong", legacy), PasswordCheck::Mismatch);

        let fresh = passwords.hash("secret").unwrap();
        assert_eq!(passwords.check("secret", &fresh), PasswordCheck::Match);
    }
}
