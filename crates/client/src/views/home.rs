use askama::Template;
use async_trait::async_trait;

use proshop_core::Product;

use super::{Redirect, Screen};
use crate::actions::{self, Action};
use crate::api::ProductApi;
use crate::reducers::AppState;
use crate::resource::ResourceAction;
use crate::store::Store;

#[derive(Template)]
#[template(path = "home.txt")]
struct HomeTemplate<'a> {
    loading: bool,
    error: Option<&'a str>,
    products: &'a [Product],
}

/// Latest products.
#[derive(Debug, Default)]
pub struct HomeScreen {
    mounted: bool,
}

impl HomeScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Screen for HomeScreen {
    async fn sync(&mut self, store: &Store, api: &dyn ProductApi) -> Option<Redirect> {
        if !self.mounted {
            self.mounted = true;
            actions::list_products(store, api).await;
        }
        None
    }

    fn render(&self, state: &AppState) -> askama::Result<String> {
        let list = &state.product_list;
        HomeTemplate {
            loading: list.is_loading(),
            error: list.error(),
            products: list.value().map(Vec::as_slice).unwrap_or_default(),
        }
        .render()
    }

    fn unmount(&mut self, store: &Store) {
        self.mounted = false;
        store.dispatch(Action::ProductList(ResourceAction::Reset));
    }
}
