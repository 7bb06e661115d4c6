//! Screens: effects that dispatch fetches, and text rendering derived from
//! state alone.
//!
//! A screen's effect runs on its first [`Screen::sync`] and again whenever
//! the state it depends on changes. Rendering never touches the network.

mod home;
mod product;
mod product_list;

use async_trait::async_trait;

pub use home::HomeScreen;
pub use product::ProductScreen;
pub use product_list::{ProductListScreen, edit_path};

use crate::api::ProductApi;
use crate::reducers::AppState;
use crate::store::Store;

/// Path a screen asks the caller to navigate to.
pub type Redirect = String;

#[async_trait]
pub trait Screen: Send {
    /// Run the effect if its dependencies changed since the last run.
    async fn sync(&mut self, store: &Store, api: &dyn ProductApi) -> Option<Redirect>;

    /// Render the screen from `state`.
    ///
    /// # Errors
    ///
    /// Returns the template error if rendering fails.
    fn render(&self, state: &AppState) -> askama::Result<String>;

    /// Release the screen's resources.
    fn unmount(&mut self, store: &Store);
}
