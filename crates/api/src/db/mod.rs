//! Data store access for the ProShop backend.
//!
//! # Stores
//!
//! Route handlers never talk to a database directly. They go through the
//! store traits defined here, shared as `Arc<dyn ...>` in [`Stores`]:
//!
//! - [`ProductStore`] - the product catalog
//! - [`UserStore`] - user accounts (seeded, never mutated by routes)
//! - [`OrderStore`] - orders, only ever cleared by the seeder
//!
//! Two backends implement them:
//!
//! - `PostgreSQL` ([`products::PgProductStore`], [`users::PgUserStore`],
//!   [`PgOrderStore`]) for real deployments
//! - in-process maps ([`memory`]) for development without a database and
//!   for tests
//!
//! # Migrations
//!
//! Migrations live in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p proshop-cli -- migrate
//! ```

pub mod memory;
pub mod products;
pub mod users;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use proshop_core::{Email, Product, ProductId, ProductUpdate, User};

pub use memory::{MemoryOrderStore, MemoryProductStore, MemoryUserStore};
pub use products::PgProductStore;
pub use users::PgUserStore;

/// Errors that can occur during store operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx (connection, query or pool failure).
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., duplicate id or email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

/// The product catalog.
///
/// Lookups by id are keyed queries against the backing store; no
/// implementation fetches the collection to search it.
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Every product, in insertion order.
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError>;

    /// The product with this id, or `RepositoryError::NotFound`.
    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError>;

    /// Store a new product. Fails with `Conflict` if the id is taken.
    async fn insert(&self, product: Product) -> Result<Product, RepositoryError>;

    /// Store several products atomically, returning how many were stored.
    async fn insert_many(&self, products: Vec<Product>) -> Result<u64, RepositoryError>;

    /// Apply `update` to the product with this id.
    async fn update(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, RepositoryError>;

    /// Remove the product with this id, or fail with `NotFound`.
    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError>;

    /// Remove every product, returning how many were removed.
    async fn delete_all(&self) -> Result<u64, RepositoryError>;

    /// Cheap round trip used by the readiness probe.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// User accounts.
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Store several users atomically, in order. Fails with `Conflict` on a
    /// duplicate email.
    async fn insert_many(&self, users: Vec<User>) -> Result<u64, RepositoryError>;

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError>;

    /// Every user, in insertion order.
    async fn list_all(&self) -> Result<Vec<User>, RepositoryError>;

    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

/// Orders. Nothing in the API creates them yet; the seeder clears them so a
/// re-import never leaves orders pointing at deleted products.
#[async_trait]
pub trait OrderStore: Send + Sync {
    async fn delete_all(&self) -> Result<u64, RepositoryError>;
}

/// `PostgreSQL` order table.
pub struct PgOrderStore {
    pool: PgPool,
}

impl PgOrderStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl OrderStore for PgOrderStore {
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM orders")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }
}

/// The set of stores the application runs against.
#[derive(Clone)]
pub struct Stores {
    pub products: Arc<dyn ProductStore>,
    pub users: Arc<dyn UserStore>,
    pub orders: Arc<dyn OrderStore>,
}

impl Stores {
    /// Stores backed by a `PostgreSQL` pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            products: Arc::new(PgProductStore::new(pool.clone())),
            users: Arc::new(PgUserStore::new(pool.clone())),
            orders: Arc::new(PgOrderStore::new(pool.clone())),
        }
    }

    /// Empty in-process stores.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            products: Arc::new(MemoryProductStore::default()),
            users: Arc::new(MemoryUserStore::default()),
            orders: Arc::new(MemoryOrderStore),
        }
    }
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}

/// Map a unique-violation into `RepositoryError::Conflict`.
pub(crate) fn conflict_on_unique(err: sqlx::Error, what: &str) -> RepositoryError {
    if let sqlx::Error::Database(ref db_err) = err
        && db_err.is_unique_violation()
    {
        return RepositoryError::Conflict(format!("{what} already exists"));
    }
    RepositoryError::Database(err)
}

/// Pool for the ignored `PostgreSQL` store tests, migrated to the latest
/// schema. Reads `DATABASE_URL`.
#[cfg(test)]
#[allow(clippy::expect_used)]
pub(crate) async fn test_pool() -> PgPool {
    let url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
    let pool = create_pool(&secrecy::SecretString::from(url))
        .await
        .expect("connect to DATABASE_URL");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("run migrations");
    pool
}
