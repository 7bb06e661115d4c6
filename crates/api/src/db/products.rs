//! `PostgreSQL` product store.
//!
//! Queries are checked at runtime (`query_as` + `FromRow`) so the crate
//! builds without a live database.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use proshop_core::{Price, Product, ProductId, ProductUpdate, UserId};

use super::{ProductStore, RepositoryError, conflict_on_unique};

const PRODUCT_COLUMNS: &str = "id, user_id, name, image, brand, category, description, \
     rating, num_reviews, price, count_in_stock, created_at, updated_at";

/// A `products` row as stored.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: String,
    user_id: Option<String>,
    name: String,
    image: String,
    brand: String,
    category: String,
    description: String,
    rating: Decimal,
    num_reviews: i32,
    price: Decimal,
    count_in_stock: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(row.price)
            .map_err(|e| RepositoryError::DataCorruption(format!("product {}: {e}", row.id)))?;
        let num_reviews = u32::try_from(row.num_reviews).map_err(|_| {
            RepositoryError::DataCorruption(format!("product {}: negative review count", row.id))
        })?;
        let count_in_stock = u32::try_from(row.count_in_stock).map_err(|_| {
            RepositoryError::DataCorruption(format!("product {}: negative stock", row.id))
        })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            image: row.image,
            brand: row.brand,
            category: row.category,
            description: row.description,
            rating: row.rating,
            num_reviews,
            price,
            count_in_stock,
            user: row.user_id.map(UserId::new),
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

fn to_db_count(value: u32, field: &str) -> Result<i32, RepositoryError> {
    i32::try_from(value)
        .map_err(|_| RepositoryError::DataCorruption(format!("{field} out of range: {value}")))
}

/// Product store backed by the `products` table.
pub struct PgProductStore {
    pool: PgPool,
}

impl PgProductStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert `product` and return the row as stored.
    async fn insert_with<'e, E>(executor: E, product: &Product) -> Result<Product, RepositoryError>
    where
        E: sqlx::PgExecutor<'e>,
    {
        let row: ProductRow = sqlx::query_as(&format!(
            r"
            INSERT INTO products
                (id, user_id, name, image, brand, category, description,
                 rating, num_reviews, price, count_in_stock, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(&product.id)
        .bind(product.user.as_ref())
        .bind(&product.name)
        .bind(&product.image)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.rating)
        .bind(to_db_count(product.num_reviews, "num_reviews")?)
        .bind(product.price.amount())
        .bind(to_db_count(product.count_in_stock, "count_in_stock")?)
        .bind(product.created_at)
        .bind(product.updated_at)
        .fetch_one(executor)
        .await
        .map_err(|e| conflict_on_unique(e, "product"))?;

        row.try_into()
    }
}

#[async_trait]
impl ProductStore for PgProductStore {
    async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows: Vec<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products ORDER BY seq ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn get_by_id(&self, id: &ProductId) -> Result<Product, RepositoryError> {
        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn insert(&self, product: Product) -> Result<Product, RepositoryError> {
        Self::insert_with(&self.pool, &product).await
    }

    async fn insert_many(&self, products: Vec<Product>) -> Result<u64, RepositoryError> {
        let mut tx = self.pool.begin().await?;
        let mut inserted = 0;
        for product in &products {
            Self::insert_with(&mut *tx, product).await?;
            inserted += 1;
        }
        tx.commit().await?;
        Ok(inserted)
    }

    async fn update(
        &self,
        id: &ProductId,
        update: ProductUpdate,
    ) -> Result<Product, RepositoryError> {
        let mut tx = self.pool.begin().await?;

        let row: Option<ProductRow> = sqlx::query_as(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1 FOR UPDATE"
        ))
        .bind(id)
        .fetch_optional(&mut *tx)
        .await?;

        let mut product = Product::try_from(row.ok_or(RepositoryError::NotFound)?)?;
        product.apply(update, Utc::now());

        sqlx::query(
            r"
            UPDATE products
            SET name = $2, image = $3, brand = $4, category = $5, description = $6,
                price = $7, count_in_stock = $8, updated_at = $9
            WHERE id = $1
            ",
        )
        .bind(&product.id)
        .bind(&product.name)
        .bind(&product.image)
        .bind(&product.brand)
        .bind(&product.category)
        .bind(&product.description)
        .bind(product.price.amount())
        .bind(to_db_count(product.count_in_stock, "count_in_stock")?)
        .bind(product.updated_at)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }
        Ok(())
    }

    async fn delete_all(&self) -> Result<u64, RepositoryError> {
        let result = sqlx::query("DELETE FROM products")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use proshop_core::NewProduct;

    use super::*;
    use crate::db::test_pool;

    fn product(price_cents: i64) -> Product {
        Product::from_new(
            NewProduct {
                id: Some(ProductId::generate()),
                name: "Airpods".to_owned(),
                price: Price::from_cents(price_cents).unwrap(),
                count_in_stock: 10,
                ..NewProduct::default()
            },
            None,
            Utc::now(),
        )
    }

    #[tokio::test]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL database"]
    async fn test_insert_returns_what_get_reads_back() {
        let store = PgProductStore::new(test_pool().await);
        let new = product(8999);

        let inserted = store.insert(new.clone()).await.unwrap();
        let fetched = store.get_by_id(&new.id).await.unwrap();

        assert_eq!(inserted, fetched);
        assert_eq!(fetched.price.to_string(), "89.99");
        assert_eq!(fetched.count_in_stock, 10);

        store.delete(&new.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL database"]
    async fn test_duplicate_id_is_conflict() {
        let store = PgProductStore::new(test_pool().await);
        let new = product(500);

        store.insert(new.clone()).await.unwrap();
        assert!(matches!(
            store.insert(new.clone()).await,
            Err(RepositoryError::Conflict(_))
        ));

        store.delete(&new.id).await.unwrap();
    }

    #[tokio::test]
    #[ignore = "Requires DATABASE_URL pointing at a PostgreSQL database"]
    async fn test_update_then_delete() {
        let store = PgProductStore::new(test_pool().await);
        let new = product(1999);
        store.insert(new.clone()).await.unwrap();

        let updated = store
            .update(
                &new.id,
                ProductUpdate {
                    price: Some(Price::MAX),
                    count_in_stock: Some(u32::try_from(i32::MAX).unwrap()),
                    ..ProductUpdate::default()
                },
            )
            .await
            .unwrap();
        let fetched = store.get_by_id(&new.id).await.unwrap();
        assert_eq!(fetched.price, Price::MAX);
        assert_eq!(fetched.count_in_stock, updated.count_in_stock);
        assert_eq!(fetched.name, "Airpods");

        store.delete(&new.id).await.unwrap();
        assert!(matches!(
            store.get_by_id(&new.id).await,
            Err(RepositoryError::NotFound)
        ));
        assert!(matches!(
            store.delete(&new.id).await,
            Err(RepositoryError::NotFound)
        ));
    }
}
