use std::num::NonZeroU32;

use base64::engine::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use ring::pbkdf2;
use ring::rand::{SecureRandom, SystemRandom};

use crate::credential::errors::CredentialError;

const ALGORITHM: &str = "pbkdf2-sha256";
const ITERATIONS: u32 = 100_000;
const SALT_LEN: usize = 16;
const KEY_LEN: usize = 32;

/// Hashing and verification of password credentials.
///
/// `verify_dummy` exists so that lookups for unknown identifiers spend
/// the same hashing work as lookups for known ones.
pub trait PasswordHasher: Send + Sync + 'static {
    fn hash(&self, password: &str) -> Result<String, CredentialError>;
    fn verify(&self, password: &str, hashed: &str) -> Result<bool, CredentialError>;
    fn verify_dummy(&self, password: &str);
}

/// PBKDF2-HMAC-SHA256 hasher producing `pbkdf2-sha256$iter$salt$key`
/// strings with URL-safe base64 components.
pub struct Pbkdf2Hasher {
    rng: SystemRandom,
    dummy_hash: String,
}

impl Default for Pbkdf2Hasher {
    fn default() -> Self {
        Self::new()
    }
}

impl Pbkdf2Hasher {
    pub fn new() -> Self {
        // A fixed throwaway hash keeps dummy verification on the same
        // code path as the real one.
        let dummy_hash = format!(
            "{ALGORITHM}${ITERATIONS}${}${}",
            URL_SAFE_NO_PAD.encode([0u8; SALT_LEN]),
            URL_SAFE_NO_PAD.encode([0u8; KEY_LEN]),
        );
        Self {
            rng: SystemRandom::new(),
            dummy_hash,
        }
    }

    fn derive(&self, password: &str, salt: &[u8], iterations: NonZeroU32) -> [u8; KEY_LEN] {
        let mut key = [0u8; KEY_LEN];
        pbkdf2::derive(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            salt,
            password.as_bytes(),
            &mut key,
        );
        key
    }
}

impl PasswordHasher for Pbkdf2Hasher {
    fn hash(&self, password: &str) -> Result<String, CredentialError> {
        let mut salt = [0u8; SALT_LEN];
        self.rng
            .fill(&mut salt)
            .map_err(|_| CredentialError::Crypto("Failed to generate salt".to_string()))?;

        let iterations = NonZeroU32::new(ITERATIONS)
            .ok_or_else(|| CredentialError::Crypto("Invalid iteration count".to_string()))?;
        let key = self.derive(password, &salt, iterations);

        Ok(format!(
            "{ALGORITHM}${ITERATIONS}${}${}",
            URL_SAFE_NO_PAD.encode(salt),
            URL_SAFE_NO_PAD.encode(key),
        ))
    }

    fn verify(&self, password: &str, hashed: &str) -> Result<bool, CredentialError> {
        let mut parts = hashed.split('$');
        let (algorithm, iterations, salt, key) = match (
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
            parts.next(),
        ) {
            (Some(a), Some(i), Some(s), Some(k), None) => (a, i, s, k),
            _ => {
                return Err(CredentialError::MalformedHash(
                    "expected 4 dollar-separated components".to_string(),
                ));
            }
        };

        if algorithm != ALGORITHM {
            return Err(CredentialError::MalformedHash(format!(
                "unsupported algorithm {algorithm:?}"
            )));
        }

        let iterations: u32 = iterations
            .parse()
            .map_err(|_| CredentialError::MalformedHash("bad iteration count".to_string()))?;
        let iterations = NonZeroU32::new(iterations)
            .ok_or_else(|| CredentialError::MalformedHash("bad iteration count".to_string()))?;

        let salt = URL_SAFE_NO_PAD
            .decode(salt)
            .map_err(|e| CredentialError::MalformedHash(e.to_string()))?;
        let key = URL_SAFE_NO_PAD
            .decode(key)
            .map_err(|e| CredentialError::MalformedHash(e.to_string()))?;

        Ok(pbkdf2::verify(
            pbkdf2::PBKDF2_HMAC_SHA256,
            iterations,
            &salt,
            password.as_bytes(),
            &key,
        )
        .is_ok())
    }

    fn verify_dummy(&self, password: &str) {
        let _ = self.verify(password, &self.dummy_hash);
    }
}
