//! In-process stores.
//!
//! Used when no database is configured and throughout the test suites.
//! Products and users are keyed by hash map; a separate id list keeps
//! insertion order for listing.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use proshop_core::{Email, Product, ProductId, ProductUpdate, User, UserId};

use super::{OrderStore, ProductStore, RepositoryError, UserStore};

#[derive(Debug, Default)]
struct Catalog {
    by_id: HashMap<ProductId, Product>,
    order: Vec<ProductId>,
}

impl Catalog {
    fn insert(&mut self, product: Product) -> Result<(), RepositoryError> {
        if self.by_id.contains_key(&product.id) {
            return Err(RepositoryError::Conflict(format!(
                "product {} already exists",
                product.id
            )));
        }
        self.order.push(product.id.clone());
        self.by_id.insert(product.id.clone(), product);
        Ok(())
    }
}

/// Product catalog held in memory.
#[derive(Debug, Default)]
pub struct MemoryProductStore {
    catalog: RwLock<Catalog>,
}

impl MemoryProductStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProductStore for MemoryProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let catalog = self.catalog.read().await;
        Ok(catalog
            .order
            .iter()
            .filter_map(|id| catalog.by_id.get(id).cloned())
            .collect())
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        self.catalog
            .read()
            .await
            .by_id
            .get(id)
            .cloned()
            .ok_or(RepositoryError::NotFound)
    }

    async fn insert(&self, product: Product) -> Result<Product, RepositoryError> {
        self.catalog.write().await.insert(product.clone())?;
        Ok(product)
    }

    async fn insert_many(&self, products: Vec<Product>) -> Result<u64, RepositoryError> {
        let mut catalog = self.catalog.write().await;

        // Check everything first so a conflict leaves the catalog untouched.
        for (i, product) in products.iter().enumerate() {
            let repeated = products.iter().take(i).any(|p| p.id == product.id);
            if repeated || catalog.by_id.contains_key(&product.id) {
                return Err(RepositoryError::Conflict(format!(
                    "product {} already exists",
                    product.id
                )));
            }
        }

        let count = products.len() as u64;
        for product in products {
            catalog.insert(product)?;
        }
        Ok(count)
    }

    async fn update(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        let mut catalog = self.catalog.write().await;
        let product = catalog.by_id.get_mut(id).ok_or(RepositoryError::NotFound)?;
        product.apply(update, Utc::now());
        Ok(product.clone())
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let mut catalog = self.catalog.write().await;
        if catalog.by_id.remove(id).is_none() {
            return Err(RepositoryError::NotFound);
        }
        catalog.order.retain(|existing| existing != id);
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut catalog = self.catalog.write().await;
        let removed = catalog.by_id.len() as u64;
        *catalog = Catalog::default();
        Ok(removed)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        Ok(())
    }
}

#[derive(Debug, Default)]
struct Accounts {
    by_email: HashMap<Email, UserId>,
    users: Vec<User>,
}

/// User accounts held in memory.
#[derive(Debug, Default)]
pub struct MemoryUserStore {
    accounts: RwLock<Accounts>,
}

#[async_trait]
impl UserStore for MemoryUserStore {
    async fn insert_many(&self, users: Vec<User>) -> Result<u64, RepositoryError> {
        let mut accounts = self.accounts.write().await;

        for (i, user) in users.iter().enumerate() {
            let repeated = users.iter().take(i).any(|u| u.email == user.email);
            if repeated || accounts.by_email.contains_key(&user.email) {
                return Err(RepositoryError::Conflict(format!(
                    "user {} already exists",
                    user.email
                )));
            }
        }

        let count = users.len() as u64;
        for user in users {
            accounts.by_email.insert(user.email.clone(), user.id.clone());
            accounts.users.push(user);
        }
        Ok(count)
    }

    async fn get_by_email(&self, email: &Email) -> Result<Option<User>, RepositoryError> {
        let accounts = self.accounts.read().await;
        let Some(id) = accounts.by_email.get(email) else {
            return Ok(None);
        };
        Ok(accounts.users.iter().find(|u| &u.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<User>, RepositoryError> {
        Ok(self.accounts.read().await.users.clone())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let mut accounts = self.accounts.write().await;
        let removed = accounts.users.len() as u64;
        *accounts = Accounts::default();
        Ok(removed)
    }
}

/// Orders are never created in memory; clearing is a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct MemoryOrderStore;

#[async_trait]
impl OrderStore for MemoryOrderStore {
    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        Ok(0)
    }
}
