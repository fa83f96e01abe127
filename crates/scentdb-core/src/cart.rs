//! Shopping cart state.
//!
//! Lines are keyed by `(product_id, size_ml)`; adding the same key again
//! merges quantities instead of creating a second line.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: String,
    pub name: String,
    pub brand: String,
    pub image: String,
    #[serde(rename = "size")]
    pub size_ml: u32,
    /// Unit price in minor currency units.
    pub price: i64,
    pub quantity: u32,
}

impl CartItem {
    fn is_line(&self, product_id: &str, size_ml: u32) -> bool {
        self.product_id == product_id && self.size_ml == size_ml
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartItem>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from previously persisted JSON.
    ///
    /// Anything other than a JSON array yields an empty cart. Entries that
    /// are missing a field, carry the wrong type, or have a zero quantity are
    /// dropped individually.
    #[must_use]
    pub fn from_json_lenient(raw: &str) -> Self {
        let Ok(serde_json::Value::Array(entries)) = serde_json::from_str(raw) else {
            return Self::default();
        };

        let items = entries
            .into_iter()
            .filter_map(|entry| serde_json::from_value::<CartItem>(entry).ok())
            .filter(|item| item.quantity > 0)
            .collect();

        Self { items }
    }

    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    fn position(&self, product_id: &str, size_ml: u32) -> Option<usize> {
        self.items.iter().position(|i| i.is_line(product_id, size_ml))
    }

    pub fn add(&mut self, item: CartItem) {
        match self.position(&item.product_id, item.size_ml) {
            Some(idx) => {
                let line = &mut self.items[idx];
                line.quantity = line.quantity.saturating_add(item.quantity);
            }
            None => self.items.push(item),
        }
    }

    pub fn remove(&mut self, product_id: &str, size_ml: u32) {
        self.items.retain(|i| !i.is_line(product_id, size_ml));
    }

    pub fn increase(&mut self, product_id: &str, size_ml: u32) {
        if let Some(idx) = self.position(product_id, size_ml) {
            let line = &mut self.items[idx];
            line.quantity = line.quantity.saturating_add(1);
        }
    }

    /// Decrements a line's quantity, never taking it below one.
    pub fn decrease(&mut self, product_id: &str, size_ml: u32) {
        if let Some(idx) = self.position(product_id, size_ml) {
            let item = &mut self.items[idx];
            if item.quantity > 1 {
                item.quantity -= 1;
            }
        }
    }

    /// Sets a line's quantity; zero or below removes the line. Unknown lines
    /// are ignored.
    pub fn update_quantity(&mut self, product_id: &str, size_ml: u32, quantity: i64) {
        let Some(idx) = self.position(product_id, size_ml) else {
            return;
        };
        if quantity <= 0 {
            self.items.remove(idx);
        } else {
            self.items[idx].quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items
            .iter()
            .fold(0u64, |acc, i| acc.saturating_add(u64::from(i.quantity)))
    }

    /// Sum of price times quantity. Saturates at the `i64` bounds.
    #[must_use]
    pub fn subtotal(&self) -> i64 {
        self.items.iter().fold(0i64, |acc, i| {
            acc.saturating_add(i.price.saturating_mul(i64::from(i.quantity)))
        })
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
