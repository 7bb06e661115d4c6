//! Slice reducers and the root reducer.
//!
//! Each slice reducer takes its slice and an [`Action`] and returns the next
//! slice. Actions addressed to other slices return the input unchanged.

use proshop_core::{Product, UserInfo};

use crate::actions::Action;
use crate::cart::CartState;
use crate::resource::Resource;

/// The whole client state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub product_list: Resource<Vec<Product>>,
    pub product_details: Resource<Product>,
    pub product_delete: Resource<()>,
    pub product_create: Resource<Product>,
    pub cart: CartState,
    pub user_login: Resource<UserInfo>,
}

impl AppState {
    /// The logged-in user, if any.
    #[must_use]
    pub const fn user_info(&self) -> Option<&UserInfo> {
        self.user_login.value()
    }
}

#[must_use]
pub fn product_list(state: Resource<Vec<Product>>, action: &Action) -> Resource<Vec<Product>> {
    match action {
        Action::ProductList(a) => state.reduce(a),
        _ => state,
    }
}

#[must_use]
pub fn product_details(state: Resource<Product>, action: &Action) -> Resource<Product> {
    match action {
        Action::ProductDetails(a) => state.reduce(a),
        _ => state,
    }
}

#[must_use]
pub fn product_delete(state: Resource<()>, action: &Action) -> Resource<()> {
    match action {
        Action::ProductDelete(a) => state.reduce(a),
        _ => state,
    }
}

#[must_use]
pub fn product_create(state: Resource<Product>, action: &Action) -> Resource<Product> {
    match action {
        Action::ProductCreate(a) => state.reduce(a),
        _ => state,
    }
}

#[must_use]
pub fn cart(state: CartState, action: &Action) -> CartState {
    match action {
        Action::Cart(a) => state.reduce(a),
        _ => state,
    }
}

#[must_use]
pub fn user_login(state: Resource<UserInfo>, action: &Action) -> Resource<UserInfo> {
    match action {
        Action::UserLogin(a) => state.reduce(a),
        _ => state,
    }
}

/// Root reducer: every slice sees every action.
#[must_use]
pub fn reduce(state: AppState, action: &Action) -> AppState {
    AppState {
        product_list: product_list(state.product_list, action),
        product_details: product_details(state.product_details, action),
        product_delete: product_delete(state.product_delete, action),
        product_create: product_create(state.product_create, action),
        cart: cart(state.cart, action),
        user_login: user_login(state.user_login, action),
    }
}
