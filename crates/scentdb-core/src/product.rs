use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::CoreError;

/// Scent-family taxonomy bucket. Every product carries exactly one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ScentFamily {
    Floral,
    Woody,
    Oriental,
    Fresh,
    Citrus,
    Gourmand,
}

impl ScentFamily {
    /// Canonical display order used by catalog facets.
    pub const ALL: [ScentFamily; 6] = [
        ScentFamily::Floral,
        ScentFamily::Woody,
        ScentFamily::Oriental,
        ScentFamily::Fresh,
        ScentFamily::Citrus,
        ScentFamily::Gourmand,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ScentFamily::Floral => "Floral",
            ScentFamily::Woody => "Woody",
            ScentFamily::Oriental => "Oriental",
            ScentFamily::Fresh => "Fresh",
            ScentFamily::Citrus => "Citrus",
            ScentFamily::Gourmand => "Gourmand",
        }
    }
}

impl std::fmt::Display for ScentFamily {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScentFamily {
    type Err = CoreError;

    /// Exact, case-sensitive match on the serialized name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ScentFamily::ALL
            .into_iter()
            .find(|family| family.as_str() == s)
            .ok_or_else(|| CoreError::InvalidScentFamily(s.to_string()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Men,
    Women,
    Unisex,
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Men => write!(f, "Men"),
            Gender::Women => write!(f, "Women"),
            Gender::Unisex => write!(f, "Unisex"),
        }
    }
}

impl FromStr for Gender {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Men" => Ok(Gender::Men),
            "Women" => Ok(Gender::Women),
            "Unisex" => Ok(Gender::Unisex),
            other => Err(CoreError::InvalidGender(other.to_string())),
        }
    }
}

/// Fragrance pyramid. Each tier keeps source order and may be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notes {
    #[serde(default)]
    pub top: Vec<String>,
    #[serde(default)]
    pub middle: Vec<String>,
    #[serde(default)]
    pub base: Vec<String>,
}

/// A purchasable bottle size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeTier {
    /// Bottle volume in millilitres. Serialized as `size` to match the
    /// storefront wire format.
    #[serde(rename = "size")]
    pub size_ml: u32,
    /// Price in minor currency units.
    pub price: i64,
}

/// The canonical, UI-facing catalog record.
///
/// Products are created by normalization (or hand-authored), appended to the
/// store, and never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub scent_family: ScentFamily,
    pub gender: Gender,
    #[serde(default)]
    pub notes: Notes,
    pub sizes: Vec<SizeTier>,
    pub image: String,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_new_arrival: bool,
    #[serde(default = "default_in_stock")]
    pub in_stock: bool,
    /// Numeric id of the upstream Fragella record this product came from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragella_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

fn default_in_stock() -> bool {
    true
}

impl Product {
    /// Price of the cheapest size tier, or `None` when the product has no
    /// tiers at all.
    #[must_use]
    pub fn min_price(&self) -> Option<i64> {
        self.sizes.iter().map(|s| s.price).min()
    }

    /// Case-insensitive substring match against name, brand, or description.
    #[must_use]
    pub fn matches_text(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle)
            || self.brand.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }

    /// `true` when `(name, brand)` equals the other product's pair exactly.
    /// This is the ingest-time dedup key.
    #[must_use]
    pub fn same_listing(&self, other: &Product) -> bool {
        self.name == other.name && self.brand == other.brand
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub(crate) fn make_product(id: &str, brand: &str, prices: &[i64]) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Fragrance {id}"),
            brand: brand.to_string(),
            description: "A luxurious fragrance.".to_string(),
            scent_family: ScentFamily::Floral,
            gender: Gender::Unisex,
            notes: Notes::default(),
            sizes: prices
                .iter()
                .enumerate()
                .map(|(i, &price)| SizeTier {
                    size_ml: 50 * (u32::try_from(i).unwrap() + 1),
                    price,
                })
                .collect(),
            image: "/images/placeholder-perfume.jpg".to_string(),
            is_best_seller: false,
            is_new_arrival: false,
            in_stock: true,
            fragella_id: None,
            last_updated: None,
        }
    }
}
