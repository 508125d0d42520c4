//! Credential hashing for the admin surface.
//!
//! Hashing is CPU-bound and deliberately slow. It only runs when a record is
//! created or its password patched, never on the request path.

use crate::Result;

/// Output of [`CredentialHasher::hash`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashedCredential {
    pub hash: String,
    /// Tag stored next to the hash (`password_hash_type`).
    pub algorithm: String,
}

pub trait CredentialHasher: Send + Sync {
    fn algorithm(&self) -> &'static str;

    fn hash(&self, plaintext: &str) -> Result<HashedCredential>;

    fn verify(&self, plaintext: &str, hash: &str) -> Result<bool>;
}

#[cfg(feature = "argon2")]
pub use argon::Argon2Hasher;

#[cfg(feature = "argon2")]
mod argon {
    use argon2::password_hash::SaltString;
    use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
    use rand::rngs::OsRng;

    use super::{CredentialHasher, HashedCredential};
    use crate::{GateError, Result};

    /// Argon2id with the crate's default parameters.
    #[derive(Debug, Clone, Copy, Default)]
    pub struct Argon2Hasher;

    impl CredentialHasher for Argon2Hasher {
        fn algorithm(&self) -> &'static str {
            "argon2"
        }

        fn hash(&self, plaintext: &str) -> Result<HashedCredential> {
            let salt = SaltString::generate(&mut OsRng);
            let hash = Argon2::default()
                .hash_password(plaintext.as_bytes(), &salt)
                .map_err(|err| GateError::Hashing {
                    reason: err.to_string(),
                })?;
            Ok(HashedCredential {
                hash: hash.to_string(),
                algorithm: self.algorithm().to_string(),
            })
        }

        fn verify(&self, plaintext: &str, hash: &str) -> Result<bool> {
            let parsed = PasswordHash::new(hash).map_err(|err| GateError::Hashing {
                reason: err.to_string(),
            })?;
            Ok(Argon2::default()
                .verify_password(plaintext.as_bytes(), &parsed)
                .is_ok())
        }
    }

}
