//! Sample data import and teardown.
//!
//! `import` wipes orders, products and users, then loads the sample accounts
//! and catalog. Every sample product is owned by the first (admin) account.
//! `destroy` only wipes.

use chrono::Utc;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

use proshop_core::{Email, NewProduct, NewUser, Price, Product};

use crate::db::{RepositoryError, Stores};
use crate::services::auth::{self, AuthError};

/// Password shared by every sample account.
pub const SAMPLE_PASSWORD: &str = "123456";

#[derive(Debug, Error)]
pub enum SeedError {
    #[error("store error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("could not create sample user: {0}")]
    Auth(#[from] AuthError),

    #[error("invalid fixture: {0}")]
    Fixture(String),

    #[error("sample users contain no admin account")]
    NoAdmin,
}

/// Counts of what an import stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub users: u64,
    pub products: u64,
}

/// The sample accounts. The first one is the admin.
///
/// # Errors
///
/// Returns `SeedError::Fixture` if a fixture email fails validation.
pub fn sample_users() -> Result<Vec<NewUser>, SeedError> {
    [
        ("Admin User", "admin@example.com", true),
        ("Justin Cho", "justin@example.com", false),
        ("Amber Lai", "amber@example.com", false),
    ]
    .into_iter()
    .map(|(name, email, is_admin)| -> Result<NewUser, SeedError> {
        Ok(NewUser {
            name: name.to_owned(),
            email: Email::parse(email).map_err(|e| SeedError::Fixture(e.to_string()))?,
            password: SAMPLE_PASSWORD.to_owned(),
            is_admin,
        })
    })
    .collect()
}

struct Fixture {
    name: &'static str,
    image: &'static str,
    description: &'static str,
    brand: &'static str,
    cents: i64,
    count_in_stock: u32,
    rating_tenths: i64,
    num_reviews: u32,
}

const PRODUCTS: &[Fixture] = &[
    Fixture {
        name: "Airpods Wireless Bluetooth Headphones",
        image: "/images/airpods.jpg",
        description: "Bluetooth technology lets you connect it with compatible devices wirelessly. \
            High-quality AAC audio offers immersive listening experience. Built-in microphone \
            allows you to take calls while working",
        brand: "Apple",
        cents: 8999,
        count_in_stock: 10,
        rating_tenths: 45,
        num_reviews: 12,
    },
    Fixture {
        name: "iPhone 11 Pro 256GB Memory",
        image: "/images/phone.jpg",
        description: "Introducing the iPhone 11 Pro. A transformative triple-camera system that \
            adds tons of capability without complexity. An unprecedented leap in battery life",
        brand: "Apple",
        cents: 59999,
        count_in_stock: 7,
        rating_tenths: 40,
        num_reviews: 8,
    },
    Fixture {
        name: "Cannon EOS 80D DSLR Camera",
        image: "/images/camera.jpg",
        description: "Characterized by versatile imaging specs, the Canon EOS 80D further \
            clarifies itself using a pair of robust focusing systems and an intuitive design",
        brand: "Cannon",
        cents: 92999,
        count_in_stock: 5,
        rating_tenths: 30,
        num_reviews: 12,
    },
    Fixture {
        name: "Sony Playstation 4 Pro White Version",
        image: "/images/playstation.jpg",
        description: "The ultimate home entertainment center starts with PlayStation. Whether \
            you are into gaming, HD movies, television, music",
        brand: "Sony",
        cents: 39999,
        count_in_stock: 11,
        rating_tenths: 50,
        num_reviews: 12,
    },
    Fixture {
        name: "Logitech G-Series Gaming Mouse",
        image: "/images/mouse.jpg",
        description: "Get a better handle on your games with this Logitech LIGHTSYNC gaming \
            mouse. The six programmable buttons allow customization for a smooth playing \
            experience",
        brand: "Logitech",
        cents: 4999,
        count_in_stock: 7,
        rating_tenths: 35,
        num_reviews: 10,
    },
    Fixture {
        name: "Amazon Echo Dot 3rd Generation",
        image: "/images/alexa.jpg",
        description: "Meet Echo Dot - Our most popular smart speaker with a fabric design. It is \
            our most compact smart speaker that fits perfectly into small spaces",
        brand: "Amazon",
        cents: 2999,
        count_in_stock: 0,
        rating_tenths: 40,
        num_reviews: 12,
    },
];

/// The sample catalog, without owners.
///
/// # Errors
///
/// Returns `SeedError::Fixture` if a fixture price is invalid.
pub fn sample_products() -> Result<Vec<NewProduct>, SeedError> {
    PRODUCTS
        .iter()
        .map(|f| -> Result<NewProduct, SeedError> {
            Ok(NewProduct {
                id: None,
                name: f.name.to_owned(),
                image: f.image.to_owned(),
                brand: f.brand.to_owned(),
                category: "Electronics".to_owned(),
                description: f.description.to_owned(),
                rating: Decimal::new(f.rating_tenths, 1),
                num_reviews: f.num_reviews,
                price: Price::from_cents(f.cents).map_err(|e| SeedError::Fixture(e.to_string()))?,
                count_in_stock: f.count_in_stock,
            })
        })
        .collect()
}

/// Replace all data with the sample accounts and catalog.
///
/// # Errors
///
/// Returns `SeedError` if a store operation fails or the fixtures are
/// inconsistent.
pub async fn import(stores: &Stores) -> Result<SeedSummary, SeedError> {
    clear(stores).await?;

    let users = sample_users()?
        .into_iter()
        .map(auth::build_user)
        .collect::<Result<Vec<_>, _>>()?;
    let admin = users
        .iter()
        .find(|u| u.is_admin)
        .map(|u| u.id.clone())
        .ok_or(SeedError::NoAdmin)?;
    let user_count = stores.users.insert_many(users).await?;

    let now = Utc::now();
    let products = sample_products()?
        .into_iter()
        .map(|p| Product::from_new(p, Some(admin.clone()), now))
        .collect();
    let product_count = stores.products.insert_many(products).await?;

    info!(users = user_count, products = product_count, "Data imported");
    Ok(SeedSummary {
        users: user_count,
        products: product_count,
    })
}

/// Remove all orders, products and users.
///
/// # Errors
///
/// Returns `SeedError::Repository` if a store operation fails.
pub async fn destroy(stores: &Stores) -> Result<(), SeedError> {
    clear(stores).await?;
    info!("Data destroyed");
    Ok(())
}

async fn clear(stores: &Stores) -> Result<(), SeedError> {
    let orders = stores.orders.delete_all().await?;
    let products = stores.products.delete_all().await?;
    let users = stores.users.delete_all().await?;
    tracing::debug!(orders, products, users, "Cleared existing data");
    Ok(())
}
