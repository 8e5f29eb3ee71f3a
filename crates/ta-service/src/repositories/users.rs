//! In-memory user directory.
//!
//! The directory is provisioned once at process start and is read-only
//! afterwards, so concurrent lookups need no locking. There is no
//! persistence layer: the directory is rebuilt from static provisioning on
//! every start.

use crate::crypto;
use crate::errors::TaError;
use std::collections::HashMap;
use std::fmt;

/// The single statically provisioned account.
const BOOTSTRAP_USER_ID: &str = "1";
const BOOTSTRAP_USERNAME: &str = "admin";
const BOOTSTRAP_PASSWORD: &str = "password";

/// A provisioned identity.
///
/// Holds the bcrypt hash of the account password; the plaintext is hashed
/// at provisioning time and never stored. The type is deliberately not
/// `Serialize` so the hash can never end up in a response body, and Debug
/// output redacts it.
#[derive(Clone)]
pub struct User {
    pub id: String,
    pub username: String,
    pub password_hash: String,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password_hash", &"[REDACTED]")
            .finish()
    }
}

/// Lookup table of provisioned identities, keyed by username.
pub struct UserDirectory {
    users: HashMap<String, User>,
}

impl UserDirectory {
    /// Build the directory with the statically provisioned account.
    ///
    /// The bootstrap password is hashed immediately with the configured
    /// bcrypt cost; the plaintext is not retained.
    pub fn bootstrap(bcrypt_cost: u32) -> Result<Self, TaError> {
        let password_hash = crypto::hash_password(BOOTSTRAP_PASSWORD, bcrypt_cost)?;

        let user = User {
            id: BOOTSTRAP_USER_ID.to_string(),
            username: BOOTSTRAP_USERNAME.to_string(),
            password_hash,
        };

        let mut users = HashMap::new();
        users.insert(user.username.clone(), user);

        Ok(Self { users })
    }

    /// Look up a user by username.
    ///
    /// Pure read; returns `None` for unknown names. Callers must not let
    /// the miss/mismatch distinction reach their external error surface.
    pub fn get_by_username(&self, username: &str) -> Option<&User> {
        self.users.get(username)
    }
}
