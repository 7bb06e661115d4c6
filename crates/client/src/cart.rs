//! Shopping cart slice.

use serde::{Deserialize, Serialize};

use proshop_core::{Price, Product, ProductId};

/// One cart line, persisted as part of `cartItems`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product: ProductId,
    pub name: String,
    pub image: String,
    pub price: Price,
    pub count_in_stock: u32,
    pub qty: u32,
}

impl CartItem {
    #[must_use]
    pub fn from_product(product: &Product, qty: u32) -> Self {
        Self {
            product: product.id.clone(),
            name: product.name.clone(),
            image: product.image.clone(),
            price: product.price,
            count_in_stock: product.count_in_stock,
            qty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartAction {
    AddItem(CartItem),
    RemoveItem(ProductId),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CartState {
    pub items: Vec<CartItem>,
}

impl CartState {
    #[must_use]
    pub const fn new(items: Vec<CartItem>) -> Self {
        Self { items }
    }

    /// Next state after `action`. Adding a product already in the cart
    /// replaces its line in place.
    #[must_use]
    pub fn reduce(mut self, action: &CartAction) -> Self {
        match action {
            CartAction::AddItem(item) => {
                if let Some(existing) = self.items.iter_mut().find(|i| i.product == item.product) {
                    *existing = item.clone();
                } else {
                    self.items.push(item.clone());
                }
            }
            CartAction::RemoveItem(id) => self.items.retain(|i| &i.product != id),
        }
        self
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|i| i.qty).sum()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(id: &str, qty: u32) -> CartItem {
        CartItem {
            product: ProductId::new(id),
            name: format!("Product {id}"),
            image: "/images/sample.jpg".to_owned(),
            price: Price::from_cents(1999).unwrap(),
            count_in_stock: 10,
            qty,
        }
    }

    #[test]
    fn test_add_appends_new_lines() {
        let cart = CartState::default()
            .reduce(&CartAction::AddItem(item("p1", 1)))
            .reduce(&CartAction::AddItem(item("p2", 2)));
        assert_eq!(cart.items.len(), 2);
        assert_eq!(cart.item_count(), 3);
    }

    #[test]
    fn test_add_replaces_existing_line() {
        let cart = CartState::default()
            .reduce(&CartAction::AddItem(item("p1", 1)))
            .reduce(&CartAction::AddItem(item("p2", 1)))
            .reduce(&CartAction::AddItem(item("p1", 4)));
        assert_eq!(cart.items, vec![item("p1", 4), item("p2", 1)]);
    }

    #[test]
    fn test_remove_drops_line() {
        let cart = CartState::new(vec![item("p1", 1), item("p2", 1)])
            .reduce(&CartAction::RemoveItem(ProductId::new("p1")));
        assert_eq!(cart.items, vec![item("p2", 1)]);
    }

    #[test]
    fn test_cart_item_wire_format() {
        let json = serde_json::to_value(item("p1", 2)).unwrap();
        assert_eq!(json["product"], "p1");
        assert_eq!(json["countInStock"], 10);
        assert_eq!(json["qty"], 2);
    }
}
