//! Client store, thunks and screens driven against a live API server.

#![allow(clippy::unwrap_used)]

use proshop_client::actions::{self, Action};
use proshop_client::api::{ApiError, HttpProductApi, ProductApi};
use proshop_client::views::{HomeScreen, ProductListScreen, ProductScreen, Screen, edit_path};
use proshop_client::{AppState, LocalStorage, RequestState, Resource, ResourceAction, Store};
use proshop_core::{Email, ProductId, UserId, UserInfo};
use proshop_integration_tests::{TestServer, dead_url, product};

fn admin() -> UserInfo {
    UserInfo {
        id: UserId::new("u1"),
        name: "Admin User".to_owned(),
        email: Email::parse("admin@example.com").unwrap(),
        is_admin: true,
        token: None,
    }
}

fn admin_store() -> Store {
    Store::new(AppState {
        user_login: Resource::succeeded(admin()),
        ..AppState::default()
    })
}

#[tokio::test]
async fn test_home_screen_over_http() {
    let server = TestServer::with_products(vec![product("p1", "Shirt")]).await;
    let api = HttpProductApi::new(server.url());
    let store = Store::default();
    let mut screen = HomeScreen::new();

    screen.sync(&store, &api).await;

    let out = screen.render(&store.state()).unwrap();
    assert!(out.contains("Shirt | $19.99"));
}

#[tokio::test]
async fn test_product_screen_not_found_over_http() {
    let server = TestServer::with_products(vec![product("p1", "Shirt")]).await;
    let api = HttpProductApi::new(server.url());
    let store = Store::default();
    let mut screen = ProductScreen::new(ProductId::new("zz"));

    screen.sync(&store, &api).await;

    assert_eq!(
        store.state().product_details.state(),
        &RequestState::Failed("Product Not Found".to_owned())
    );
}

#[tokio::test]
async fn test_delete_then_list_over_http() {
    let server =
        TestServer::with_products(vec![product("p1", "Shirt"), product("p2", "Hat")]).await;
    let api = HttpProductApi::new(server.url());
    let store = admin_store();
    let mut screen = ProductListScreen::new();

    screen.sync(&store, &api).await;
    assert_eq!(store.state().product_list.value().unwrap().len(), 2);

    assert!(screen.delete(&store, &api, &ProductId::new("p1"), true).await);
    assert!(store.state().product_delete.is_succeeded());

    screen.sync(&store, &api).await;
    let state = store.state();
    let products = state.product_list.value().unwrap();
    assert!(products.iter().all(|p| p.id.as_str() != "p1"));
    assert_eq!(products.len(), 1);
}

#[tokio::test]
async fn test_create_navigates_to_editor_over_http() {
    let server = TestServer::with_products(vec![]).await;
    let api = HttpProductApi::new(server.url());
    let store = admin_store();
    let mut screen = ProductListScreen::new();
    screen.sync(&store, &api).await;

    screen.create(&store, &api).await;
    let created = store.state().product_create.value().cloned().unwrap();

    let redirect = screen.sync(&store, &api).await;
    assert_eq!(redirect, Some(edit_path(&created.id)));

    let stored = server.stores().products.get_by_id(&created.id).await.unwrap();
    assert_eq!(stored.name, "Sample name");
}

#[tokio::test]
async fn test_unreachable_api_is_transport_error() {
    let api = HttpProductApi::new(dead_url().await);

    let err = api.list_products().await.unwrap_err();
    assert!(matches!(err, ApiError::Transport(_)));

    let store = Store::default();
    let mut screen = HomeScreen::new();
    screen.sync(&store, &api).await;

    let state = store.state();
    assert!(state.product_list.error().is_some());
    let out = screen.render(&state).unwrap();
    assert!(out.contains("[error]"));
    assert!(!out.contains("/product/"));
}

#[tokio::test]
async fn test_late_response_after_reset_is_dropped() {
    let server = TestServer::with_products(vec![product("p1", "Shirt")]).await;
    let api = HttpProductApi::new(server.url());
    let store = Store::default();

    let ticket = store.next_ticket();
    store.dispatch(Action::ProductList(ResourceAction::Request(ticket)));
    let products = api.list_products().await.unwrap();

    store.dispatch(Action::ProductList(ResourceAction::Reset));
    store.dispatch(Action::ProductList(ResourceAction::Success(ticket, products)));

    assert_eq!(store.state().product_list, Resource::default());
}

#[tokio::test]
async fn test_cart_survives_restart() {
    let server = TestServer::with_products(vec![product("p1", "Shirt")]).await;
    let api = HttpProductApi::new(server.url());
    let dir = tempfile::tempdir().unwrap();

    {
        let store = Store::from_storage(LocalStorage::new(dir.path()));
        actions::add_to_cart(&store, &api, &ProductId::new("p1"), 2)
            .await
            .unwrap();
    }

    let store = Store::from_storage(LocalStorage::new(dir.path()));
    let cart = store.state().cart;
    assert_eq!(cart.items.len(), 1);
    assert_eq!(cart.item_count(), 2);
}
