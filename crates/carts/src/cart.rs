//! Shopping cart.

use serde::{Deserialize, Serialize};

use unimart_core::{BuyerId, CartId, Entity, ProductId};

/// One cart entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    pub product_id: ProductId,
    pub quantity: i64,
}

/// A buyer's cart. One cart per buyer; adding a product already in the cart
/// merges quantities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    pub id: CartId,
    pub buyer_id: BuyerId,
    pub lines: Vec<CartLine>,
}

impl Cart {
    pub fn new(buyer_id: BuyerId) -> Self {
        Self {
            id: CartId::new(),
            buyer_id,
            lines: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn add(&mut self, product_id: ProductId, quantity: i64) {
        match self.lines.iter_mut().find(|l| l.product_id == product_id) {
            Some(line) => line.quantity += quantity,
            None => self.lines.push(CartLine {
                product_id,
                quantity,
            }),
        }
    }

    /// Overwrite a line's quantity; a quantity of zero drops the line.
    pub fn set_quantity(&mut self, product_id: ProductId, quantity: i64) {
        if quantity == 0 {
            self.remove(product_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.product_id == product_id) {
            line.quantity = quantity;
        }
    }

    pub fn remove(&mut self, product_id: ProductId) {
        self.lines.retain(|l| l.product_id != product_id);
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl Entity for Cart {
    type Id = CartId;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_merges_existing_lines() {
        let mut cart = Cart::new(BuyerId::new());
        let product = ProductId::new();
        cart.add(product, 1);
        cart.add(product, 2);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].quantity, 3);
    }

    #[test]
    fn zero_quantity_drops_the_line() {
        let mut cart = Cart::new(BuyerId::new());
        let product = ProductId::new();
        cart.add(product, 2);
        cart.set_quantity(product, 0);
        assert!(cart.is_empty());
    }

    #[test]
    fn remove_leaves_other_lines() {
        let mut cart = Cart::new(BuyerId::new());
        let a = ProductId::new();
        let b = ProductId::new();
        cart.add(a, 1);
        cart.add(b, 1);
        cart.remove(a);
        assert_eq!(cart.lines.len(), 1);
        assert_eq!(cart.lines[0].product_id, b);
    }
}
