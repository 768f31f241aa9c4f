use argon2::{
    Algorithm, Argon2, Params, PasswordHash, PasswordVerifier, Version,
    password_hash::{PasswordHasher, SaltString, rand_core::OsRng},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PasswordError {
    #[error("Failed to hash password: {0}")]
    HashingFailed(String),

    #[error("Failed to parse password hash: {0}")]
    InvalidHash(String),

    #[error("admin login is not configured")]
    NotConfigured,
}

pub type Result<T> = std::result::Result<T, PasswordError>;

/// Argon2id hasher used for the admin password.
#[derive(Clone)]
pub struct Passwords<'a> {
    a2: Argon2<'a>,
    min_len: usize,
    max_len: usize,
}

impl<'a> Passwords<'a> {
    pub fn new(mem_kib: u32, iters: u32, lanes: u32) -> Result<Self> {
        let params = Params::new(mem_kib, iters, lanes, None)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(Self {
            a2: Argon2::new(Algorithm::Argon2id, Version::V0x13, params),
            min_len: 12,
            max_len: 512,
        })
    }

    /// Produce a PHC string suitable for `ADMIN_PASSWORD_HASH`.
    pub fn hash(&self, password: &str) -> Result<String> {
        let len = password.chars().count();
        if len < self.min_len || len > self.max_len {
            return Err(PasswordError::HashingFailed(format!(
                "admin password must be {}..={} characters",
                self.min_len, self.max_len
            )));
        }
        let salt = SaltString::generate(&mut OsRng);
        let phc = self
            .a2
            .hash_password(password.as_bytes(), &salt)
            .map_err(|e| PasswordError::HashingFailed(e.to_string()))?;
        Ok(phc.to_string())
    }

    /// Parameters embedded in the PHC string win over `self`, so hashes made
    /// with older settings still verify.
    pub fn verify(&self, password: &str, pw_hash: &str) -> Result<bool> {
        let parsed =
            PasswordHash::new(pw_hash).map_err(|e| PasswordError::InvalidHash(e.to_string()))?;
        Ok(self
            .a2
            .verify_password(password.as_bytes(), &parsed)
            .is_ok())
    }
}

impl Default for Passwords<'_> {
    fn default() -> Self {
        Self {
            a2: Argon2::new(Algorithm::Argon2id, Version::V0x13, Params::default()),
            min_len: 12,
            max_len: 512,
        }
    }
}

/// The single admin account allowed to publish posts.
#[derive(Debug, Clone)]
pub struct AdminCredentials {
    username: String,
    password_hash: Option<String>,
}

impl AdminCredentials {
    pub fn new(username: impl Into<String>, password_hash: Option<String>) -> Self {
        Self {
            username: username.into(),
            password_hash,
        }
    }

    /// Without a password hash there is no admin account at all.
    pub fn is_configured(&self) -> bool {
        self.password_hash.is_some()
    }

    pub fn check(&self, username: &str, password: &str) -> Result<bool> {
        let hash = self
            .password_hash
            .as_deref()
            .ok_or(PasswordError::NotConfigured)?;
        // Always run the hash so timing does not reveal a username match.
        let password_ok = Passwords::default().verify(password, hash)?;
        Ok(password_ok && username == self.username)
    }
}
