//! User repository trait defining the interface for user persistence.
//!
//! The core treats the user store as a key-value-by-email/id collaborator:
//! it consumes lookups, creation, and password updates, and owns none of the
//! storage semantics beyond that.

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::entities::user::User;
use crate::errors::DomainError;

/// Repository trait for User entity persistence operations.
///
/// Implementations handle the actual database access while keeping the
/// boundary between domain and infrastructure layers. All email arguments
/// are expected to be normalized (see `ag_shared::utils::normalize_email`);
/// lookups are exact matches on the stored form.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Find a user by their normalized email address.
    ///
    /// # Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - No user with that email
    /// * `Err(DomainError)` - Database or other error occurred
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// Find a user by their unique identifier.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, DomainError>;

    /// Create a new user.
    ///
    /// # Returns
    /// * `Ok(User)` - The created user
    /// * `Err(DomainError)` - Creation failed (e.g. duplicate email)
    async fn create(&self, user: User) -> Result<User, DomainError>;

    /// Overwrite the password hash for an existing user.
    ///
    /// # Returns
    /// * `Ok(true)` - Password updated
    /// * `Ok(false)` - User not found
    async fn update_password(&self, id: Uuid, password_hash: &str) -> Result<bool, DomainError>;

    /// Update the user's last-login timestamp. Best-effort bookkeeping.
    async fn touch_last_login(&self, id: Uuid) -> Result<(), DomainError>;

    /// Check whether a user exists with the given normalized email.
    async fn exists_by_email(&self, email: &str) -> Result<bool, DomainError>;
}
