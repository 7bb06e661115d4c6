//! Catalog browsing through the client views.
//!
//! Uses `PROSHOP_API_URL` and `PROSHOP_STORAGE_DIR`, see
//! [`proshop_client::config`].

use proshop_client::views::{HomeScreen, ProductScreen, Screen};
use proshop_client::{ClientConfig, HttpProductApi, LocalStorage, RequestState, Store};
use proshop_core::ProductId;

/// Render the home screen.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the API cannot be reached,
/// or rendering fails.
pub async fn list() -> Result<(), Box<dyn std::error::Error>> {
    let (store, api) = open()?;
    let mut screen = HomeScreen::new();
    screen.sync(&store, &api).await;

    let state = store.state();
    print(&screen.render(&state)?);
    exit_status(state.product_list.state())
}

/// Render the product screen for `id`.
///
/// # Errors
///
/// Returns an error if configuration is invalid, the product cannot be
/// fetched, or rendering fails.
pub async fn show(id: &str) -> Result<(), Box<dyn std::error::Error>> {
    let (store, api) = open()?;
    let mut screen = ProductScreen::new(ProductId::new(id));
    screen.sync(&store, &api).await;

    let state = store.state();
    print(&screen.render(&state)?);
    exit_status(state.product_details.state())
}

fn open() -> Result<(Store, HttpProductApi), Box<dyn std::error::Error>> {
    let config = ClientConfig::from_env()?;
    tracing::debug!(api_url = %config.api_url, "Using API");

    let store = Store::from_storage(LocalStorage::new(config.storage_dir));
    Ok((store, HttpProductApi::new(config.api_url)))
}

/// Exit status follows the request outcome; the message is already printed.
fn exit_status<T>(state: &RequestState<T>) -> Result<(), Box<dyn std::error::Error>> {
    match state {
        RequestState::Failed(message) => Err(message.clone().into()),
        _ => Ok(()),
    }
}

#[allow(clippy::print_stdout)]
fn print(rendered: &str) {
    println!("{}", rendered.trim());
}
