//! Product records and the request bodies that create or change them.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::{ProductId, UserId};
use super::price::Price;

/// Highest rating a product can carry.
const MAX_RATING: Decimal = Decimal::from_parts(5, 0, 0, false, 0);

/// Counters are stored as `INTEGER`.
const MAX_COUNT: u32 = i32::MAX.unsigned_abs();

/// Reasons a product payload is rejected.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} cannot be empty")]
    EmptyField(&'static str),
    #[error("rating must be between 0 and 5")]
    RatingOutOfRange,
    #[error("{0} cannot exceed {max}", max = MAX_COUNT)]
    CountOutOfRange(&'static str),
}

/// A catalog product.
///
/// Field names on the wire follow the storefront's JSON format: camelCase
/// with the identifier under `_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(rename = "_id")]
    pub id: ProductId,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub num_reviews: u32,
    pub price: Price,
    pub count_in_stock: u32,
    /// Admin user who created the product.
    #[serde(default)]
    pub user: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a product from a validated payload, assigning a fresh id.
    #[must_use]
    pub fn from_new(new: NewProduct, owner: Option<UserId>, now: DateTime<Utc>) -> Self {
        Self {
            id: new.id.unwrap_or_else(ProductId::generate),
            name: new.name,
            image: new.image,
            brand: new.brand,
            category: new.category,
            description: new.description,
            rating: new.rating,
            num_reviews: new.num_reviews,
            price: new.price,
            count_in_stock: new.count_in_stock,
            user: owner,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply an update in place, bumping `updated_at`.
    pub fn apply(&mut self, update: ProductUpdate, now: DateTime<Utc>) {
        if let Some(name) = update.name {
            self.name = name;
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
        if let Some(brand) = update.brand {
            self.brand = brand;
        }
        if let Some(category) = update.category {
            self.category = category;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(count_in_stock) = update.count_in_stock {
            self.count_in_stock = count_in_stock;
        }
        self.updated_at = now;
    }
}

/// Body of a product create request.
///
/// Every field is optional on the wire; omitted fields take the sample values
/// the admin screen starts from before the product is edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    /// Caller-chosen id, used by seed fixtures. Generated when absent.
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ProductId>,
    pub name: String,
    pub image: String,
    pub brand: String,
    pub category: String,
    pub description: String,
    #[serde(with = "rust_decimal::serde::float")]
    pub rating: Decimal,
    pub num_reviews: u32,
    pub price: Price,
    pub count_in_stock: u32,
}

impl Default for NewProduct {
    fn default() -> Self {
        Self {
            id: None,
            name: "Sample name".to_owned(),
            image: "/images/sample.jpg".to_owned(),
            brand: "Sample brand".to_owned(),
            category: "Sample category".to_owned(),
            description: "Sample description".to_owned(),
            rating: Decimal::ZERO,
            num_reviews: 0,
            price: Price::ZERO,
            count_in_stock: 0,
        }
    }
}

impl NewProduct {
    /// Check the payload before it reaches the store.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if a required text field is blank, the
    /// rating is outside `0..=5` or a counter does not fit the database.
    pub fn validate(&self) -> Result<(), ValidationError> {
        require_text("name", &self.name)?;
        require_text("category", &self.category)?;
        require_text("brand", &self.brand)?;
        if let Some(id) = &self.id {
            require_text("_id", id.as_str())?;
        }
        if self.rating.is_sign_negative() || self.rating > MAX_RATING {
            return Err(ValidationError::RatingOutOfRange);
        }
        require_count("numReviews", self.num_reviews)?;
        require_count("countInStock", self.count_in_stock)?;
        Ok(())
    }
}

/// Body of a product update request. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub price: Option<Price>,
    pub image: Option<String>,
    pub brand: Option<String>,
    pub category: Option<String>,
    pub description: Option<String>,
    pub count_in_stock: Option<u32>,
}

impl ProductUpdate {
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyField` if a provided text field is blank
    /// and `ValidationError::CountOutOfRange` for an oversized stock count.
    pub fn validate(&self) -> Result<(), ValidationError> {
        for (field, value) in [
            ("name", &self.name),
            ("brand", &self.brand),
            ("category", &self.category),
        ] {
            if let Some(value) = value {
                require_text(field, value)?;
            }
        }
        if let Some(count) = self.count_in_stock {
            require_count("countInStock", count)?;
        }
        Ok(())
    }
}

fn require_text(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::EmptyField(field));
    }
    Ok(())
}

const fn require_count(field: &'static str, value: u32) -> Result<(), ValidationError> {
    if value > MAX_COUNT {
        return Err(ValidationError::CountOutOfRange(field));
    }
    Ok(())
}
