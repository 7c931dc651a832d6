//! Password storage.
//!
//! Stored passwords carry an algorithm prefix. New hashes are Argon2id PHC
//! strings prefixed with `argon2`, e.g. `argon2$argon2id$v=19$m=19456,t=2,p=1$...`.

use argon2::{
    Argon2, PasswordHasher, PasswordVerifier,
    password_hash::{PasswordHash, SaltString},
};
use password_hash::rand_core::OsRng;

/// Prefixes of the hash forms accepted as already hashed.
pub const HASH_PREFIXES: [&str; 3] = ["pbkdf2_sha256$", "bcrypt$", "argon2$"];

const ARGON2_PREFIX: &str = "argon2";

pub fn is_hashed(stored: &str) -> bool {
    HASH_PREFIXES.iter().any(|prefix| stored.starts_with(prefix))
}

pub fn make_password(raw: &str) -> Result<String, password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    let phc = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)?
        .to_string();
    Ok(format!("{ARGON2_PREFIX}{phc}"))
}

/// Hashes `value` unless it already carries a recognized prefix.
pub fn hash_if_needed(value: &str) -> Result<Option<String>, password_hash::Error> {
    if is_hashed(value) {
        return Ok(None);
    }
    make_password(value).map(Some)
}

/// Checks `raw` against a stored hash. Only `argon2$` hashes can be verified.
pub fn verify_password(raw: &str, stored: &str) -> bool {
    let Some(phc) = stored.strip_prefix(ARGON2_PREFIX).filter(|p| p.starts_with('$')) else {
        tracing::warn!("stored password uses an unsupported hash algorithm");
        return false;
    };
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(raw.as_bytes(), &parsed)
            .is_ok(),
        Err(err) => {
            tracing::warn!(error = %err, "stored password hash is malformed");
            false
        }
    }
}
