use askama::Template;
use async_trait::async_trait;

use proshop_core::{Product, ProductId, UserInfo};

use super::{Redirect, Screen};
use crate::actions::{self, Action};
use crate::api::ProductApi;
use crate::reducers::AppState;
use crate::resource::ResourceAction;
use crate::store::Store;

#[derive(Template)]
#[template(path = "product_list.txt")]
struct ProductListTemplate<'a> {
    delete_succeeded: bool,
    busy: bool,
    delete_error: Option<&'a str>,
    create_error: Option<&'a str>,
    loading: bool,
    error: Option<&'a str>,
    products: &'a [Product],
}

/// State the admin effect reacts to.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Deps {
    user: Option<UserInfo>,
    delete_succeeded: bool,
    created: Option<ProductId>,
}

impl Deps {
    fn of(state: &AppState) -> Self {
        Self {
            user: state.user_info().cloned(),
            delete_succeeded: state.product_delete.is_succeeded(),
            created: state.product_create.value().map(|p| p.id.clone()),
        }
    }

    fn is_admin(&self) -> bool {
        self.user.as_ref().is_some_and(|u| u.is_admin)
    }
}

/// Admin product table with create and delete.
#[derive(Debug, Default)]
pub struct ProductListScreen {
    last: Option<Deps>,
}

/// Where the editor for `id` lives.
#[must_use]
pub fn edit_path(id: &ProductId) -> Redirect {
    format!("/admin/product/{id}/edit")
}

impl ProductListScreen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Delete a product once the user has confirmed. Returns whether a
    /// delete was dispatched.
    pub async fn delete(
        &self,
        store: &Store,
        api: &dyn ProductApi,
        id: &ProductId,
        confirmed: bool,
    ) -> bool {
        if !confirmed {
            return false;
        }
        actions::delete_product(store, api, id).await;
        true
    }

    /// Create a sample product; the next sync navigates to its editor.
    pub async fn create(&self, store: &Store, api: &dyn ProductApi) {
        actions::create_product(store, api).await;
    }
}

#[async_trait]
impl Screen for ProductListScreen {
    async fn sync(&mut self, store: &Store, api: &dyn ProductApi) -> Option<Redirect> {
        let deps = Deps::of(&store.state());
        if self.last.as_ref() == Some(&deps) {
            return None;
        }

        store.dispatch(Action::ProductCreate(ResourceAction::Reset));

        let redirect = if !deps.is_admin() {
            Some("/login".to_owned())
        } else if let Some(id) = &deps.created {
            Some(edit_path(id))
        } else {
            store.dispatch(Action::ProductDelete(ResourceAction::Reset));
            actions::list_products(store, api).await;
            None
        };

        // Record what the effect left behind so its own resets do not
        // trigger another run.
        self.last = Some(Deps::of(&store.state()));
        redirect
    }

    fn render(&self, state: &AppState) -> askama::Result<String> {
        let list = &state.product_list;
        ProductListTemplate {
            delete_succeeded: state.product_delete.is_succeeded(),
            busy: state.product_delete.is_loading() || state.product_create.is_loading(),
            delete_error: state.product_delete.error(),
            create_error: state.product_create.error(),
            loading: list.is_loading(),
            error: list.error(),
            products: list.value().map(Vec::as_slice).unwrap_or_default(),
        }
        .render()
    }

    fn unmount(&mut self, store: &Store) {
        self.last = None;
        store.dispatch(Action::ProductDelete(ResourceAction::Reset));
        store.dispatch(Action::ProductCreate(ResourceAction::Reset));
    }
}
