//! Actions and the async action creators (thunks) that dispatch them.
//!
//! A thunk dispatches `Request` synchronously, awaits the API, then
//! dispatches `Success` or `Fail` with the same ticket. Errors never escape
//! a thunk; they end up in state as the user-facing message.

use proshop_core::{Product, ProductId, UserInfo};

use crate::api::{ApiError, ProductApi};
use crate::cart::{CartAction, CartItem};
use crate::resource::ResourceAction;
use crate::storage::{CART_ITEMS, USER_INFO};
use crate::store::Store;

/// Everything that can happen to the client state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ProductList(ResourceAction<Vec<Product>>),
    ProductDetails(ResourceAction<Product>),
    ProductDelete(ResourceAction<()>),
    ProductCreate(ResourceAction<Product>),
    Cart(CartAction),
    UserLogin(ResourceAction<UserInfo>),
}

/// Run one request through a resource: `Request`, then `Success` or `Fail`.
async fn run<T, F>(
    store: &Store,
    wrap: impl Fn(ResourceAction<T>) -> Action,
    request: F,
) -> Result<T, ApiError>
where
    T: Clone,
    F: Future<Output = Result<T, ApiError>>,
{
    let ticket = store.next_ticket();
    store.dispatch(wrap(ResourceAction::Request(ticket)));

    match request.await {
        Ok(value) => {
            store.dispatch(wrap(ResourceAction::Success(ticket, value.clone())));
            Ok(value)
        }
        Err(err) => {
            tracing::warn!(error = %err, "API request failed");
            store.dispatch(wrap(ResourceAction::Fail(ticket, err.user_message())));
            Err(err)
        }
    }
}

/// Fetch the product catalog into `product_list`.
pub async fn list_products<A: ProductApi + ?Sized>(store: &Store, api: &A) {
    let _ = run(store, Action::ProductList, api.list_products()).await;
}

/// Fetch one product into `product_details`.
pub async fn list_product_details<A: ProductApi + ?Sized>(store: &Store, api: &A, id: &ProductId) {
    let _ = run(store, Action::ProductDetails, api.get_product(id)).await;
}

/// Delete a product, tracked by `product_delete`.
pub async fn delete_product<A: ProductApi + ?Sized>(store: &Store, api: &A, id: &ProductId) {
    if run(store, Action::ProductDelete, api.delete_product(id)).await.is_ok() {
        tracing::info!(product_id = %id, "Product deleted");
    }
}

/// Create a sample product, tracked by `product_create`.
pub async fn create_product<A: ProductApi + ?Sized>(store: &Store, api: &A) {
    if let Ok(product) = run(store, Action::ProductCreate, api.create_product()).await {
        tracing::info!(product_id = %product.id, "Product created");
    }
}

/// Add `qty` of a product to the cart and persist the cart.
///
/// # Errors
///
/// Returns the `ApiError` if the product could not be fetched; the cart is
/// left untouched.
pub async fn add_to_cart<A: ProductApi + ?Sized>(
    store: &Store,
    api: &A,
    id: &ProductId,
    qty: u32,
) -> Result<(), ApiError> {
    let product = api.get_product(id).await?;
    store.dispatch(Action::Cart(CartAction::AddItem(CartItem::from_product(
        &product, qty,
    ))));
    persist_cart(store);
    Ok(())
}

/// Remove a product from the cart and persist the cart.
pub fn remove_from_cart(store: &Store, id: &ProductId) {
    store.dispatch(Action::Cart(CartAction::RemoveItem(id.clone())));
    persist_cart(store);
}

/// Forget the logged-in user.
pub fn logout(store: &Store) {
    if let Some(storage) = store.storage()
        && let Err(err) = storage.remove(USER_INFO)
    {
        tracing::warn!(error = %err, "Failed to clear persisted user info");
    }
    store.dispatch(Action::UserLogin(ResourceAction::Reset));
}

fn persist_cart(store: &Store) {
    let Some(storage) = store.storage() else {
        return;
    };
    let items = store.state().cart.items;
    if let Err(err) = storage.save(CART_ITEMS, &items) {
        tracing::warn!(error = %err, "Failed to persist cart");
    }
}
