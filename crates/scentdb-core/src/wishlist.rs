use serde::{Deserialize, Serialize};

/// Ordered set of wishlisted product ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Wishlist {
    ids: Vec<String>,
}

impl Wishlist {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a wishlist from persisted JSON. Non-arrays yield an empty
    /// list; non-string entries are dropped.
    #[must_use]
    pub fn from_json_lenient(raw: &str) -> Self {
        let Ok(serde_json::Value::Array(entries)) = serde_json::from_str(raw) else {
            return Self::default();
        };
        let mut wishlist = Self::default();
        for entry in entries {
            if let serde_json::Value::String(id) = entry {
                wishlist.add(&id);
            }
        }
        wishlist
    }

    #[must_use]
    pub fn ids(&self) -> &[String] {
        &self.ids
    }

    #[must_use]
    pub fn contains(&self, product_id: &str) -> bool {
        self.ids.iter().any(|id| id == product_id)
    }

    pub fn toggle(&mut self, product_id: &str) {
        if self.contains(product_id) {
            self.remove(product_id);
        } else {
            self.ids.push(product_id.to_string());
        }
    }

    pub fn add(&mut self, product_id: &str) {
        if !self.contains(product_id) {
            self.ids.push(product_id.to_string());
        }
    }

    pub fn remove(&mut self, product_id: &str) {
        self.ids.retain(|id| id != product_id);
    }

    pub fn clear(&mut self) {
        self.ids.clear();
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.ids.len()
    }
}
