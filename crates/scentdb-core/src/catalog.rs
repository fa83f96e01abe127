//! Catalog filtering, sorting, and facet helpers.
//!
//! Everything here is a pure function over an in-memory product list. The
//! catalog is small (tens of records), so there is no indexing or paging.

use std::cmp::Ordering;
use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::product::{Gender, Product, ScentFamily};
use crate::CoreError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    #[default]
    BestSellers,
    NewArrivals,
}

impl FromStr for SortKey {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "price-asc" => Ok(SortKey::PriceAsc),
            "price-desc" => Ok(SortKey::PriceDesc),
            "best-sellers" => Ok(SortKey::BestSellers),
            "new-arrivals" => Ok(SortKey::NewArrivals),
            other => Err(CoreError::InvalidSortKey(other.to_string())),
        }
    }
}

/// Session-scoped filter and sort selection.
///
/// Criteria combine with AND across categories and OR within a multi-select
/// category. An empty selection in a category matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogFilter {
    pub brands: BTreeSet<String>,
    pub families: BTreeSet<ScentFamily>,
    pub gender: Option<Gender>,
    pub sort: SortKey,
}

impl CatalogFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn toggle_brand(&mut self, brand: &str) {
        if !self.brands.remove(brand) {
            self.brands.insert(brand.to_string());
        }
    }

    pub fn toggle_family(&mut self, family: ScentFamily) {
        if !self.families.remove(&family) {
            self.families.insert(family);
        }
    }

    pub fn set_gender(&mut self, gender: Option<Gender>) {
        self.gender = gender;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// Drops every selection but keeps the current sort key.
    pub fn clear(&mut self) {
        self.brands.clear();
        self.families.clear();
        self.gender = None;
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.brands.is_empty() || !self.families.is_empty() || self.gender.is_some()
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        let brand_ok = self.brands.is_empty() || self.brands.contains(&product.brand);
        let family_ok = self.families.is_empty() || self.families.contains(&product.scent_family);
        let gender_ok = self.gender.is_none_or(|g| g == product.gender);
        brand_ok && family_ok && gender_ok
    }

    /// Returns the visible, ordered subset of `products`.
    ///
    /// Sorting is stable: products with equal keys keep their input order.
    #[must_use]
    pub fn apply(&self, products: &[Product]) -> Vec<Product> {
        let mut visible: Vec<Product> = products
            .iter()
            .filter(|p| self.matches(p))
            .cloned()
            .collect();

        match self.sort {
            SortKey::PriceAsc => visible.sort_by(|a, b| compare_min_price(a, b, false)),
            SortKey::PriceDesc => visible.sort_by(|a, b| compare_min_price(a, b, true)),
            SortKey::BestSellers => visible.sort_by_key(|p| !p.is_best_seller),
            SortKey::NewArrivals => visible.sort_by_key(|p| !p.is_new_arrival),
        }

        visible
    }
}

/// Orders by cheapest size tier. Products without any tier sort last in
/// both directions.
fn compare_min_price(a: &Product, b: &Product, descending: bool) -> Ordering {
    match (a.min_price(), b.min_price()) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Unique brands, sorted ascending.
#[must_use]
pub fn available_brands(products: &[Product]) -> Vec<String> {
    products
        .iter()
        .map(|p| p.brand.clone())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Families that occur at least once, in canonical order.
#[must_use]
pub fn available_scent_families(products: &[Product]) -> Vec<ScentFamily> {
    ScentFamily::ALL
        .into_iter()
        .filter(|family| products.iter().any(|p| p.scent_family == *family))
        .collect()
}

#[must_use]
pub fn best_sellers(products: &[Product]) -> Vec<Product> {
    products.iter().filter(|p| p.is_best_seller).cloned().collect()
}
