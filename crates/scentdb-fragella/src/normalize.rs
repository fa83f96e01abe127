//! Normalization of raw Fragella records into catalog [`Product`]s.
//!
//! [`normalize_fragrance`] is total: every raw field is optional and each
//! derived field has a fixed fallback.

use chrono::Utc;
use scentdb_core::{Gender, Notes, Product, ScentFamily, SizeTier};

use crate::types::{NamedEntry, RawFragrance};

pub const PLACEHOLDER_NAME: &str = "Unknown Fragrance";
pub const PLACEHOLDER_BRAND: &str = "Unknown Brand";
pub const PLACEHOLDER_DESCRIPTION: &str = "A luxurious fragrance.";
pub const PLACEHOLDER_IMAGE: &str = "/images/placeholder-perfume.jpg";

/// Records at batch positions below this are flagged as best-sellers.
pub const BEST_SELLER_POSITIONS: usize = 5;

/// Keyword sets checked in this order; the first set with any hit wins.
///
/// `caramel` appears under both Oriental and Gourmand. Oriental is checked
/// first, so caramel alone classifies as Oriental.
const FAMILY_KEYWORDS: [(ScentFamily, &[&str]); 6] = [
    (
        ScentFamily::Floral,
        &["rose", "iris", "peony", "floral", "bouquet"],
    ),
    (
        ScentFamily::Woody,
        &["sandalwood", "cedarwood", "oud", "agarwood", "woody"],
    ),
    (
        ScentFamily::Oriental,
        &["amber", "musk", "vanilla", "caramel", "oriental"],
    ),
    (
        ScentFamily::Citrus,
        &["lemon", "grapefruit", "bergamot", "citrus", "zest"],
    ),
    (
        ScentFamily::Fresh,
        &["aquatic", "ocean", "watermelon", "mint", "fresh"],
    ),
    (
        ScentFamily::Gourmand,
        &["chocolate", "caramel", "honey", "gourmand", "sweet"],
    ),
];

/// Maps the three gender flags onto a single [`Gender`].
///
/// `unisex` wins outright; `male` and `female` together also mean unisex;
/// no flags at all default to unisex.
#[must_use]
pub fn map_gender(raw: &RawFragrance) -> Gender {
    let male = RawFragrance::flag(raw.male.as_ref());
    let female = RawFragrance::flag(raw.female.as_ref());
    let unisex = RawFragrance::flag(raw.unisex.as_ref());

    match (unisex, male, female) {
        (true, _, _) | (false, true, true) | (false, false, false) => Gender::Unisex,
        (false, true, false) => Gender::Men,
        (false, false, true) => Gender::Women,
    }
}

/// Infers a scent family from the description, every note name, and every
/// accord name. Defaults to [`ScentFamily::Floral`] when nothing matches.
#[must_use]
pub fn classify_scent_family(raw: &RawFragrance) -> ScentFamily {
    let accords: Vec<&str> = raw.accords.iter().filter_map(NamedEntry::name).collect();
    let search_text = format!(
        "{} {} {}",
        raw.description.as_deref().unwrap_or_default(),
        all_note_names(raw).join(" "),
        accords.join(" ")
    )
    .to_lowercase();

    FAMILY_KEYWORDS
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|k| search_text.contains(k)))
        .map_or(ScentFamily::Floral, |(family, _)| *family)
}

/// Non-empty note names pooled from the three tiers and the generic list.
fn all_note_names(raw: &RawFragrance) -> Vec<&str> {
    [&raw.top_notes, &raw.middle_notes, &raw.base_notes, &raw.notes]
        .into_iter()
        .flatten()
        .filter_map(NamedEntry::name)
        .filter(|name| !name.is_empty())
        .collect()
}

/// Builds the note pyramid. Blank entries are dropped; order is preserved.
#[must_use]
pub fn extract_notes(raw: &RawFragrance) -> Notes {
    let tier = |entries: &[NamedEntry]| -> Vec<String> {
        entries
            .iter()
            .filter_map(NamedEntry::name)
            .filter(|name| !name.trim().is_empty())
            .map(str::to_owned)
            .collect()
    };

    Notes {
        top: tier(&raw.top_notes),
        middle: tier(&raw.middle_notes),
        base: tier(&raw.base_notes),
    }
}

/// Returns the image URL to publish, or the placeholder path.
///
/// Named for the planned JPEG-to-WebP CDN rewrite, which is not wired up:
/// source URLs (including `.jpg` / `.jpeg`) pass through unchanged.
#[must_use]
pub fn optimize_image_url(image_url: Option<&str>) -> String {
    match image_url {
        Some(url) if !url.is_empty() => url.to_string(),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

/// Fixed placeholder pricing; upstream prices are ignored.
#[must_use]
pub fn pricing_tiers() -> Vec<SizeTier> {
    vec![
        SizeTier {
            size_ml: 50,
            price: 8_500,
        },
        SizeTier {
            size_ml: 100,
            price: 15_000,
        },
    ]
}

/// `frag_<id>` when the record has a numeric id, otherwise
/// `frag_<brand>_<name>` lowercased with whitespace runs collapsed to `_`.
#[must_use]
pub fn product_id(raw: &RawFragrance) -> String {
    if let Some(id) = raw.id.as_ref().and_then(crate::types::ExternalId::as_i64) {
        return format!("frag_{id}");
    }

    let slug = format!("{}_{}", brand_or_default(raw), name_or_default(raw)).to_lowercase();
    format!("frag_{}", underscore_whitespace_runs(&slug))
}

/// Replaces each run of whitespace with a single `_`. Leading and trailing
/// runs are kept as underscores.
fn underscore_whitespace_runs(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut in_run = false;
    for c in s.chars() {
        if c.is_whitespace() {
            if !in_run {
                out.push('_');
            }
            in_run = true;
        } else {
            out.push(c);
            in_run = false;
        }
    }
    out
}

fn name_or_default(raw: &RawFragrance) -> &str {
    raw.name
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER_NAME)
}

fn brand_or_default(raw: &RawFragrance) -> &str {
    raw.brand
        .as_deref()
        .filter(|s| !s.is_empty())
        .unwrap_or(PLACEHOLDER_BRAND)
}

/// Converts one raw record into a [`Product`].
///
/// `index` is the record's position in the batch being normalized. The first
/// [`BEST_SELLER_POSITIONS`] positions are flagged as best-sellers; this is a
/// property of the batch, not of the fragrance.
#[must_use]
pub fn normalize_fragrance(raw: &RawFragrance, index: usize) -> Product {
    Product {
        id: product_id(raw),
        name: name_or_default(raw).to_string(),
        brand: brand_or_default(raw).to_string(),
        description: raw
            .description
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(PLACEHOLDER_DESCRIPTION)
            .to_string(),
        scent_family: classify_scent_family(raw),
        gender: map_gender(raw),
        notes: extract_notes(raw),
        sizes: pricing_tiers(),
        image: optimize_image_url(raw.image_url.as_deref()),
        is_best_seller: index < BEST_SELLER_POSITIONS,
        is_new_arrival: false,
        in_stock: true,
        fragella_id: raw.id.as_ref().and_then(crate::types::ExternalId::as_i64),
        last_updated: Some(Utc::now()),
    }
}

/// Normalizes a batch, using each record's position as its `index`.
#[must_use]
pub fn normalize_batch(raws: &[RawFragrance]) -> Vec<Product> {
    raws.iter()
        .enumerate()
        .map(|(idx, raw)| normalize_fragrance(raw, idx))
        .collect()
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
