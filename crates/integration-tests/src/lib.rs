//! Test harness for end-to-end tests.
//!
//! [`TestServer`] serves the real API router on an ephemeral localhost port,
//! backed by in-memory stores, for the lifetime of the test.
//!
//! ```bash
//! cargo test -p proshop-integration-tests
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::net::SocketAddr;

use chrono::Utc;
use tokio::task::JoinHandle;
use url::Url;

use proshop_api::config::{ApiConfig, Environment};
use proshop_api::db::Stores;
use proshop_api::state::AppState;
use proshop_core::{NewProduct, Price, Product, ProductId};

/// A running API server.
pub struct TestServer {
    addr: SocketAddr,
    stores: Stores,
    handle: JoinHandle<()>,
}

impl TestServer {
    /// Serve `stores` on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    #[allow(clippy::expect_used)]
    pub async fn spawn(stores: Stores) -> Self {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Listener has no address");

        let config = ApiConfig {
            port: addr.port(),
            environment: Environment::Test,
            ..ApiConfig::default()
        };
        let app = proshop_api::app(AppState::new(config, stores.clone()));

        let handle = tokio::spawn(async move {
            let _ = axum::serve(listener, app).await;
        });

        Self {
            addr,
            stores,
            handle,
        }
    }

    /// Serve a catalog holding exactly `products`.
    ///
    /// # Panics
    ///
    /// Panics if a product cannot be inserted.
    #[allow(clippy::expect_used)]
    pub async fn with_products(products: Vec<Product>) -> Self {
        let stores = Stores::in_memory();
        stores
            .products
            .insert_many(products)
            .await
            .expect("Failed to insert test products");
        Self::spawn(stores).await
    }

    /// Base URL, e.g. `http://127.0.0.1:43125/`.
    ///
    /// # Panics
    ///
    /// Never in practice; the address always forms a valid URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn url(&self) -> Url {
        Url::parse(&format!("http://{}", self.addr)).expect("Socket address is a valid URL")
    }

    /// `path` joined to the base URL.
    #[must_use]
    pub fn endpoint(&self, path: &str) -> String {
        format!("http://{}{path}", self.addr)
    }

    #[must_use]
    pub const fn stores(&self) -> &Stores {
        &self.stores
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// A product with the given id and name, priced at 19.99.
///
/// # Panics
///
/// Never; the price is a non-negative constant.
#[must_use]
#[allow(clippy::expect_used)]
pub fn product(id: &str, name: &str) -> Product {
    Product::from_new(
        NewProduct {
            id: Some(ProductId::new(id)),
            name: name.to_owned(),
            price: Price::from_cents(1999).expect("Constant price is valid"),
            count_in_stock: 3,
            ..NewProduct::default()
        },
        None,
        Utc::now(),
    )
}

/// A URL nothing is listening on.
///
/// # Panics
///
/// Panics if no ephemeral port can be bound.
#[allow(clippy::expect_used)]
pub async fn dead_url() -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Listener has no address");
    drop(listener);
    Url::parse(&format!("http://{addr}")).expect("Socket address is a valid URL")
}
