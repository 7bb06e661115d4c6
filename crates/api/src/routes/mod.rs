//! HTTP routes for the API.
//!
//! # Route Structure
//!
//! ```text
//! GET    /                     - Banner ("API IS RUNNING...")
//! GET    /health               - Liveness check
//! GET    /health/ready         - Readiness check (store round trip)
//!
//! # Products
//! GET    /api/products         - Product listing
//! POST   /api/products         - Create product (sample values for missing fields)
//! GET    /api/products/{id}    - Product detail
//! PUT    /api/products/{id}    - Update product
//! DELETE /api/products/{id}    - Delete product
//! ```

pub mod products;

use axum::{
    Router,
    extract::State,
    http::StatusCode,
    middleware::from_fn,
    routing::get,
};
use tower_http::trace::TraceLayer;

use crate::middleware::{request_id::make_request_span, request_id_middleware};
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route(
            "/{id}",
            get(products::show)
                .put(products::update)
                .delete(products::delete),
        )
}

/// Create all routes for the API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(banner))
        .route("/health", get(health))
        .route("/health/ready", get(readiness))
        .nest("/api/products", product_routes())
}

/// The complete application: routes, tracing and request ids, bound to
/// `state`.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(from_fn(request_id_middleware))
        .with_state(state)
}

async fn banner() -> &'static str {
    "API IS RUNNING..."
}

/// Liveness health check endpoint.
///
/// Returns "ok" if the server is running. Does not check dependencies.
async fn health() -> &'static str {
    "ok"
}

/// Readiness health check endpoint.
///
/// Returns 503 Service Unavailable if the product store is not reachable.
async fn readiness(State(state): State<AppState>) -> StatusCode {
    match state.products().ping().await {
        Ok(()) => StatusCode::OK,
        Err(err) => {
            tracing::warn!(error = %err, "Readiness check failed");
            StatusCode::SERVICE_UNAVAILABLE
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::body::Body;
    use axum::http::{Method, Request};
    use chrono::Utc;
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use proshop_core::{NewProduct, Price, Product, ProductId, ProductUpdate};

    use super::*;
    use crate::config::ApiConfig;
    use crate::db::{ProductStore, RepositoryError, Stores};

    fn shirt() -> Product {
        Product::from_new(
            NewProduct {
                id: Some(ProductId::new("p1")),
                name: "Shirt".to_owned(),
                price: Price::from_cents(1999).unwrap(),
                ..NewProduct::default()
            },
            None,
            Utc::now(),
        )
    }

    async fn seeded_app() -> Router {
        let stores = Stores::in_memory();
        stores.products.insert(shirt()).await.unwrap();
        app(AppState::new(ApiConfig::default(), stores))
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let body = body.map_or_else(Body::empty, |v| Body::from(v.to_string()));
        let request = Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(body)
            .unwrap();

        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_list_products() {
        let (status, body) = send(seeded_app().await, Method::GET, "/api/products", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body.as_array().unwrap().len(), 1);
        assert_eq!(body[0]["_id"], "p1");
        assert_eq!(body[0]["price"], json!(19.99));
    }

    #[tokio::test]
    async fn test_show_product() {
        let (status, body) = send(seeded_app().await, Method::GET, "/api/products/p1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "Shirt");
    }

    #[tokio::test]
    async fn test_missing_product_is_404_with_message() {
        let (status, body) = send(seeded_app().await, Method::GET, "/api/products/zz", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({ "message": "Product Not Found" }));
    }

    #[tokio::test]
    async fn test_create_with_empty_body_uses_samples() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), Method::POST, "/api/products", None).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["name"], "Sample name");

        let (_, list) = send(app, Method::GET, "/api/products", None).await;
        assert_eq!(list.as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_payload() {
        let (status, body) = send(
            seeded_app().await,
            Method::POST,
            "/api/products",
            Some(json!({ "name": "" })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "name cannot be empty");
    }

    #[tokio::test]
    async fn test_create_rejects_negative_price() {
        let (status, _) = send(
            seeded_app().await,
            Method::POST,
            "/api/products",
            Some(json!({ "price": -1 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_create_rejects_values_the_database_cannot_hold() {
        for payload in [
            json!({ "price": 19.999 }),
            json!({ "price": 12_345_678_901_234.5 }),
            json!({ "countInStock": 4_000_000_000_u64 }),
            json!({ "numReviews": 4_000_000_000_u64 }),
        ] {
            let (status, body) = send(
                seeded_app().await,
                Method::POST,
                "/api/products",
                Some(payload.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
            assert!(body["message"].is_string(), "{payload}");
        }

        let (status, body) = send(
            seeded_app().await,
            Method::POST,
            "/api/products",
            Some(json!({ "countInStock": 4_000_000_000_u64 })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["message"], "countInStock cannot exceed 2147483647");
    }

    #[tokio::test]
    async fn test_update_rejects_values_the_database_cannot_hold() {
        let app = seeded_app().await;
        for payload in [
            json!({ "price": 0.001 }),
            json!({ "price": 1e13 }),
            json!({ "countInStock": 2_147_483_648_u64 }),
        ] {
            let (status, _) = send(
                app.clone(),
                Method::PUT,
                "/api/products/p1",
                Some(payload.clone()),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{payload}");
        }

        let (_, body) = send(app, Method::GET, "/api/products/p1", None).await;
        assert_eq!(body["price"], json!(19.99));
        assert_eq!(body["countInStock"], 0);
    }

    #[tokio::test]
    async fn test_create_keeps_two_decimal_price() {
        let app = seeded_app().await;
        let (status, created) = send(
            app.clone(),
            Method::POST,
            "/api/products",
            Some(json!({ "price": 9_999_999_999.99 })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);

        let uri = format!("/api/products/{}", created["_id"].as_str().unwrap());
        let (_, fetched) = send(app, Method::GET, &uri, None).await;
        assert_eq!(fetched["price"], created["price"]);
    }

    #[tokio::test]
    async fn test_update_product() {
        let (status, body) = send(
            seeded_app().await,
            Method::PUT,
            "/api/products/p1",
            Some(json!({ "countInStock": 3, "brand": "Acme" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["countInStock"], 3);
        assert_eq!(body["brand"], "Acme");
        assert_eq!(body["name"], "Shirt");
    }

    #[tokio::test]
    async fn test_delete_product() {
        let app = seeded_app().await;
        let (status, body) = send(app.clone(), Method::DELETE, "/api/products/p1", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Product removed");

        let (status, _) = send(app.clone(), Method::GET, "/api/products/p1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, Method::DELETE, "/api/products/p1", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    struct UnavailableStore;

    #[async_trait]
    impl ProductStore for UnavailableStore {
        async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn get_by_id(&self, _: &ProductId) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn insert(&self, _: Product) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn insert_many(&self, _: Vec<Product>) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn update(&self, _: &ProductId, _: ProductUpdate) -> Result<Product, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn delete(&self, _: &ProductId) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn delete_all(&self) -> Result<u64, RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
        async fn ping(&self) -> Result<(), RepositoryError> {
            Err(RepositoryError::Database(sqlx::Error::PoolTimedOut))
        }
    }

    fn unavailable_app() -> Router {
        let stores = Stores {
            products: Arc::new(UnavailableStore),
            ..Stores::in_memory()
        };
        app(AppState::new(ApiConfig::default(), stores))
    }

    #[tokio::test]
    async fn test_store_failure_is_generic_500() {
        for uri in ["/api/products", "/api/products/p1"] {
            let (status, body) = send(unavailable_app(), Method::GET, uri, None).await;
            assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
            assert_eq!(body, json!({ "message": "Internal server error" }));
        }
    }

    #[tokio::test]
    async fn test_readiness_reflects_store() {
        let (status, _) = send(seeded_app().await, Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(unavailable_app(), Method::GET, "/health/ready", None).await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_banner() {
        let response = seeded_app()
            .await
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(bytes, "API IS RUNNING...");
    }

    #[tokio::test]
    async fn test_responses_carry_request_id() {
        let request = Request::builder()
            .uri("/health")
            .header("x-request-id", "abc-123")
            .body(Body::empty())
            .unwrap();
        let response = seeded_app().await.oneshot(request).await.unwrap();
        assert_eq!(response.headers()["x-request-id"], "abc-123");
    }
}
