use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Hashes with a fresh random salt; the salt travels inside the PHC string.
pub fn hash(plain: &str) -> super::Result<String> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(super::Error::_PasswordHash)
}

/// A stored value that is not a valid hash never verifies.
pub fn verify(plain: &str, stored: &str) -> bool {
    match PasswordHash::new(stored) {
        Ok(parsed) => Argon2::default()
            .verify_password(plain.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn should_verify_own_hash_only() {
        let stored = hash("s3cret!").unwrap();

        assert!(stored.starts_with("$argon2"));
        assert!(verify("s3cret!", &stored));
        assert!(!verify("S3cret!", &stored));
    }

    #[test]
    fn should_salt_every_hash() {
        assert_ne!(hash("same").unwrap(), hash("same").unwrap());
    }

    #[test]
    fn should_reject_malformed_hash() {
        assert!(!verify("whatever", "not-a-hash"));
        assert!(!verify("whatever", ""));
    }
}
