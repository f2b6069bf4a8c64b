//! CSRF state nonce generation.
//!
//! The nonce is 16 bytes drawn from the operating system CSPRNG and rendered
//! as 32 lowercase hex characters. There is no fallback generator: if the OS
//! source fails the caller gets [`OAuthError::Entropy`].

use rand::TryRngCore;
use rand::rngs::OsRng;

use super::OAuthError;

/// Number of random bytes in a state nonce.
pub const STATE_BYTES: usize = 16;

/// Generate a fresh state nonce.
pub fn generate_state() -> Result<String, OAuthError> {
    let mut bytes = [0u8; STATE_BYTES];
    OsRng
        .try_fill_bytes(&mut bytes)
        .map_err(|e| OAuthError::Entropy(e.to_string()))?;
    Ok(bytes.iter().map(|b| format!("{b:02x}")).collect())
}
