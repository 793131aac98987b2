use async_trait::async_trait;
use sqlx::postgres::PgPoolOptions;
use sqlx::{PgPool, Row};
use tracing::info;

use super::{AccountError, AccountStore, NewUser, User};

/// PostgreSQL account store.
pub struct PostgresAccountStore {
    pool: PgPool,
}

impl PostgresAccountStore {
    pub async fn new(uri: &str, pool_size: u32) -> anyhow::Result<Self> {
        let clean_uri = uri.replace("postgresql+asyncpg://", "postgresql://");
        let pool = PgPoolOptions::new()
            .max_connections(pool_size)
            .acquire_timeout(std::time::Duration::from_secs(10))
            .connect(&clean_uri)
            .await?;

        info!("Connected to PostgreSQL (pool_size={pool_size})");
        Ok(Self { pool })
    }
}

fn row_to_user(row: sqlx::postgres::PgRow) -> User {
    User {
        id: row.get("id"),
        email: row.get("email"),
        subscription_tier: row.get("subscription_tier"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl AccountStore for PostgresAccountStore {
    async fn initialize(&self) -> anyhow::Result<()> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS users (
                id VARCHAR(255) PRIMARY KEY,
                email VARCHAR(255) NOT NULL UNIQUE,
                subscription_tier VARCHAR(64) NOT NULL DEFAULT 'free',
                created_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at TIMESTAMP WITH TIME ZONE NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
        )
        .execute(&self.pool)
        .await?;

        info!("Account store tables initialized");
        Ok(())
    }

    async fn find_by_email_or_id(
        &self,
        email: &str,
        id: &str,
    ) -> anyhow::Result<Option<User>> {
        let row = sqlx::query(
            "SELECT id, email, subscription_tier, created_at
             FROM users
             WHERE email = $1 OR id = $2",
        )
        .bind(email)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(row_to_user))
    }

    async fn create(&self, user: NewUser) -> Result<User, AccountError> {
        // Single statement; the uniqueness constraints on id and email make
        // the conflict check and insert atomic against concurrent signups.
        let row = sqlx::query(
            "INSERT INTO users (id, email, subscription_tier)
             VALUES ($1, $2, $3)
             ON CONFLICT DO NOTHING
             RETURNING id, email, subscription_tier, created_at",
        )
        .bind(&user.id)
        .bind(&user.email)
        .bind(&user.subscription_tier)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AccountError::Store(e.into()))?;

        match row {
            Some(row) => Ok(row_to_user(row)),
            None => Err(AccountError::Conflict),
        }
    }
}
