use askama::Template;
use async_trait::async_trait;

use proshop_core::{Product, ProductId};

use super::{Redirect, Screen};
use crate::actions::{self, Action};
use crate::api::ProductApi;
use crate::reducers::AppState;
use crate::resource::ResourceAction;
use crate::store::Store;

#[derive(Template)]
#[template(path = "product.txt")]
struct ProductTemplate<'a> {
    loading: bool,
    error: Option<&'a str>,
    product: Option<&'a Product>,
}

/// One product's details. Refetches when the id changes.
#[derive(Debug)]
pub struct ProductScreen {
    id: ProductId,
    fetched: Option<ProductId>,
}

impl ProductScreen {
    #[must_use]
    pub const fn new(id: ProductId) -> Self {
        Self { id, fetched: None }
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.id
    }

    /// Point the screen at another product; the next sync fetches it.
    pub fn set_id(&mut self, id: ProductId) {
        self.id = id;
    }
}

#[async_trait]
impl Screen for ProductScreen {
    async fn sync(&mut self, store: &Store, api: &dyn ProductApi) -> Option<Redirect> {
        if self.fetched.as_ref() != Some(&self.id) {
            self.fetched = Some(self.id.clone());
            actions::list_product_details(store, api, &self.id).await;
        }
        None
    }

    fn render(&self, state: &AppState) -> askama::Result<String> {
        let details = &state.product_details;
        ProductTemplate {
            loading: details.is_loading(),
            error: details.error(),
            product: details.value(),
        }
        .render()
    }

    fn unmount(&mut self, store: &Store) {
        self.fetched = None;
        store.dispatch(Action::ProductDetails(ResourceAction::Reset));
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::actions::tests::{FakeApi, product};

    #[tokio::test]
    async fn test_shows_product() {
        let store = Store::default();
        let api = FakeApi::with(vec![product("p1", "Shirt")]);
        let mut screen = ProductScreen::new(ProductId::new("p1"));

        screen.sync(&store, &api).await;

        let out = screen.render(&store.state()).unwrap();
        assert!(out.contains("Shirt"));
        assert!(out.contains("Price: $19.99"));
        assert!(out.contains("In Stock"));
    }

    #[tokio::test]
    async fn test_missing_product_shows_server_message() {
        let store = Store::default();
        let api = FakeApi::with(vec![product("p1", "Shirt")]);
        let mut screen = ProductScreen::new(ProductId::new("zz"));

        screen.sync(&store, &api).await;

        let out = screen.render(&store.state()).unwrap();
        assert!(out.contains("[error] Product Not Found"));
    }

    #[tokio::test]
    async fn test_changing_id_refetches() {
        let store = Store::default();
        let api = FakeApi::with(vec![product("p1", "Shirt"), product("p2", "Hat")]);
        let mut screen = ProductScreen::new(ProductId::new("p1"));

        screen.sync(&store, &api).await;
        screen.set_id(ProductId::new("p2"));
        screen.sync(&store, &api).await;

        let state = store.state();
        assert_eq!(state.product_details.value().unwrap().name, "Hat");
    }
}
