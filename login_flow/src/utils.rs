use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};
use ring::rand::SecureRandom;
use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),
}

/// Generate `len` random bytes and return them base64url-encoded without padding.
pub(crate) fn gen_random_string(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut buf = vec![0u8; len];
    rng.fill(&mut buf)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(buf))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gen_random_string_length() {
        // 32 bytes base64url-encoded without padding is 43 characters
        let s = gen_random_string(32).unwrap();
        assert_eq!(s.len(), 43);
    }

    #[test]
    fn test_gen_random_string_unique() {
        let a = gen_random_string(32).unwrap();
        let b = gen_random_string(32).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_gen_random_string_url_safe() {
        let s = gen_random_string(64).unwrap();
        assert!(!s.contains('+'));
        assert!(!s.contains('/'));
        assert!(!s.contains('='));
    }
}
