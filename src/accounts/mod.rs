pub mod postgres;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use thiserror::Error;

/// Account record held in the gateway's own store (not upstream).
/// `id` and `email` are each unique across the store.
#[derive(Debug, Clone)]
pub struct User {
    pub id: String,
    pub email: String,
    pub subscription_tier: String,
    pub created_at: DateTime<Utc>,
}

/// Fields for a new signup. `id` is the upstream backend's user id.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub id: String,
    pub email: String,
    pub subscription_tier: String,
}

#[derive(Error, Debug)]
pub enum AccountError {
    /// A user with the same email or id already exists. Detected at the
    /// store level (uniqueness constraint), so concurrent signups with the
    /// same email cannot both succeed.
    #[error("user with this email or ID already exists")]
    Conflict,

    #[error(transparent)]
    Store(#[from] anyhow::Error),
}

/// Abstract account store interface.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Look up an existing user by email or id.
    async fn find_by_email_or_id(
        &self,
        email: &str,
        id: &str,
    ) -> anyhow::Result<Option<User>>;

    /// Create a new user. The conflict check and insert are observed as a
    /// single atomic unit; a bare check-then-insert is not acceptable here.
    async fn create(&self, user: NewUser) -> Result<User, AccountError>;

    /// Initialize store tables.
    async fn initialize(&self) -> anyhow::Result<()>;
}
