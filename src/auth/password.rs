use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Hashes a plaintext password with a fresh random salt.
pub fn hash(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Checks a plaintext password against a stored hash. Errors only on a
/// malformed hash string; a wrong password returns `Ok(false)`.
pub fn verify(plain: &str, hash: &str) -> anyhow::Result<bool> {
    let parsed = PasswordHash::new(hash).map_err(|e| {
        error!(error = %e, "argon2 parse hash error");
        anyhow::anyhow!(e.to_string())
    })?;
    Ok(Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_round_trip() {
        let password = "secret1";
        let hashed = hash(password).expect("hashing should succeed");
        assert!(verify(password, &hashed).expect("verify should succeed"));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hashed = hash("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify("wrong-password", &hashed).expect("verify should not error"));
    }

    #[test]
    fn salts_are_random() {
        let a = hash("secret1").expect("hash a");
        let b = hash("secret1").expect("hash b");
        assert_ne!(a, b);
    }

    #[test]
    fn hash_never_contains_plaintext() {
        let hashed = hash("hunter2-hunter2").expect("hash");
        assert!(!hashed.contains("hunter2"));
    }

    #[test]
    fn verify_errors_on_malformed_hash() {
        assert!(verify("anything", "not-a-valid-hash").is_err());
    }
}
