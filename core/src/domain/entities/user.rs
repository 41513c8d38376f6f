//! User entity representing a registered account in AuthGate.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// User entity. The email is stored normalized (trimmed, lowercased) and is
/// the unique login identifier; the password hash is opaque to everything
/// except the credential verifier. Serialize-only: the hash is skipped on
/// output, so the serialized form is not round-trippable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct User {
    /// Unique identifier for the user
    pub id: Uuid,

    /// Normalized email address, unique across the system
    pub email: String,

    /// Display name
    pub full_name: String,

    /// Bcrypt hash of the user's password
    #[serde(skip_serializing)]
    pub password_hash: String,

    /// Whether the account may authenticate
    pub is_active: bool,

    /// Timestamp when the user was created
    pub created_at: DateTime<Utc>,

    /// Timestamp when the user was last updated
    pub updated_at: DateTime<Utc>,

    /// Timestamp of the user's last login
    pub last_login_at: Option<DateTime<Utc>>,
}

impl User {
    /// Creates a new User with the given normalized email, name, and
    /// password hash.
    pub fn new(email: String, full_name: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            email,
            full_name,
            password_hash,
            is_active: true,
            created_at: now,
            updated_at: now,
            last_login_at: None,
        }
    }

    /// Replaces the stored password hash
    pub fn set_password_hash(&mut self, password_hash: String) {
        self.password_hash = password_hash;
        self.updated_at = Utc::now();
    }

    /// Updates the last login timestamp
    pub fn update_last_login(&mut self) {
        self.last_login_at = Some(Utc::now());
        self.updated_at = Utc::now();
    }

    /// Deactivates the account
    pub fn deactivate(&mut self) {
        self.is_active = false;
        self.updated_at = Utc::now();
    }
}
