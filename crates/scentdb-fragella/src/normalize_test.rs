use serde_json::json;

use super::*;
use crate::types::Flag;

fn raw(value: serde_json::Value) -> RawFragrance {
    serde_json::from_value(value).expect("valid raw fragrance")
}

fn with_flags(male: Option<bool>, female: Option<bool>, unisex: Option<bool>) -> RawFragrance {
    RawFragrance {
        male: male.map(Flag::Bool),
        female: female.map(Flag::Bool),
        unisex: unisex.map(Flag::Bool),
        ..RawFragrance::default()
    }
}

// ---------------------------------------------------------------------------
// map_gender
// ---------------------------------------------------------------------------

#[test]
fn gender_defaults_to_unisex_without_flags() {
    assert_eq!(map_gender(&RawFragrance::default()), Gender::Unisex);
    assert_eq!(
        map_gender(&with_flags(Some(false), Some(false), Some(false))),
        Gender::Unisex
    );
}

#[test]
fn gender_male_and_female_together_is_unisex() {
    assert_eq!(
        map_gender(&with_flags(Some(true), Some(true), Some(false))),
        Gender::Unisex
    );
}

#[test]
fn gender_unisex_flag_wins() {
    assert_eq!(
        map_gender(&with_flags(Some(true), None, Some(true))),
        Gender::Unisex
    );
    assert_eq!(
        map_gender(&with_flags(None, Some(true), Some(true))),
        Gender::Unisex
    );
}

#[test]
fn gender_single_flag() {
    assert_eq!(map_gender(&with_flags(Some(true), None, None)), Gender::Men);
    assert_eq!(map_gender(&with_flags(None, Some(true), None)), Gender::Women);
}

#[test]
fn gender_accepts_boolish_upstream_values() {
    let record = raw(json!({ "male": 1, "female": "no" }));
    assert_eq!(map_gender(&record), Gender::Men);

    let record = raw(json!({ "female": "true" }));
    assert_eq!(map_gender(&record), Gender::Women);
}

// ---------------------------------------------------------------------------
// classify_scent_family
// ---------------------------------------------------------------------------

#[test]
fn caramel_alone_is_oriental_not_gourmand() {
    let record = raw(json!({ "description": "Warm caramel drizzle" }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Oriental);
}

#[test]
fn earlier_family_wins_when_several_match() {
    // Both Floral (rose) and Woody (sandalwood) hit; Floral is checked first.
    let record = raw(json!({
        "description": "Sandalwood base",
        "top_notes": ["Rose"]
    }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Floral);
}

#[test]
fn family_uses_notes_and_accords_case_insensitively() {
    let record = raw(json!({ "base_notes": [{ "name": "BERGAMOT" }] }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Citrus);

    let record = raw(json!({ "notes": ["Sea salt", "Aquatic accord"] }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Fresh);

    let record = raw(json!({ "accords": [{ "name": "chocolate", "percentage": 70 }] }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Gourmand);
}

#[test]
fn family_defaults_to_floral() {
    assert_eq!(
        classify_scent_family(&RawFragrance::default()),
        ScentFamily::Floral
    );
    let record = raw(json!({ "description": "Leather and tobacco" }));
    assert_eq!(classify_scent_family(&record), ScentFamily::Floral);
}

// ---------------------------------------------------------------------------
// extract_notes / image / id
// ---------------------------------------------------------------------------

#[test]
fn notes_drop_blank_entries_and_keep_order() {
    let record = raw(json!({
        "top_notes": ["Bergamot", "  ", { "name": "Pepper" }, { "name": "" }],
        "middle_notes": null,
        "base_notes": [42, "Ambroxan"],
        "notes": ["Ignored for the pyramid"]
    }));
    let notes = extract_notes(&record);
    assert_eq!(notes.top, vec!["Bergamot", "Pepper"]);
    assert!(notes.middle.is_empty());
    assert_eq!(notes.base, vec!["Ambroxan"]);
}

#[test]
fn image_passes_through_or_falls_back() {
    assert_eq!(
        optimize_image_url(Some("https://cdn.example.com/a.jpg")),
        "https://cdn.example.com/a.jpg"
    );
    assert_eq!(
        optimize_image_url(Some("https://cdn.example.com/b.jpeg")),
        "https://cdn.example.com/b.jpeg"
    );
    assert_eq!(optimize_image_url(Some("")), PLACEHOLDER_IMAGE);
    assert_eq!(optimize_image_url(None), PLACEHOLDER_IMAGE);
}

#[test]
fn numeric_image_url_normalizes_to_placeholder() {
    let record = raw(json!({ "id": 1, "name": "Aventus", "brand": "Creed", "image_url": 12345 }));
    let product = normalize_fragrance(&record, 0);
    assert_eq!(product.image, PLACEHOLDER_IMAGE);
    assert_eq!(product.name, "Aventus");
}

#[test]
fn mistyped_records_keep_their_batch_position() {
    let batch: Vec<RawFragrance> = serde_json::from_value(json!([
        { "id": 1, "name": 7 },
        { "id": 2, "name": "B", "image_url": 12345 },
        { "id": 3, "name": "C" }
    ]))
    .expect("every object decodes");
    let products = normalize_batch(&batch);
    assert_eq!(products.len(), 3);
    assert_eq!(products[0].name, PLACEHOLDER_NAME);
    assert_eq!(products[2].id, "frag_3");
}

#[test]
fn id_prefers_numeric_upstream_id() {
    assert_eq!(product_id(&raw(json!({ "id": 123 }))), "frag_123");
    assert_eq!(product_id(&raw(json!({ "id": "77" }))), "frag_77");
}

#[test]
fn id_falls_back_to_brand_and_name_slug() {
    let record = raw(json!({ "name": "Oud  Wood", "brand": "Tom Ford" }));
    assert_eq!(product_id(&record), "frag_tom_ford_oud_wood");

    let record = raw(json!({ "id": 0, "name": "Sauvage", "brand": "Dior" }));
    assert_eq!(product_id(&record), "frag_dior_sauvage");
}

#[test]
fn id_slug_keeps_edge_whitespace_as_underscores() {
    let record = raw(json!({ "name": "Oud Intense ", "brand": " X" }));
    assert_eq!(product_id(&record), "frag__x_oud_intense_");

    let record = raw(json!({ "name": "Sauvage", "brand": "Dior\t\n" }));
    assert_eq!(product_id(&record), "frag_dior__sauvage");
}

// ---------------------------------------------------------------------------
// normalize_fragrance / normalize_batch
// ---------------------------------------------------------------------------

#[test]
fn empty_record_normalizes_to_placeholders() {
    let product = normalize_fragrance(&RawFragrance::default(), 10);

    assert_eq!(product.name, PLACEHOLDER_NAME);
    assert_eq!(product.brand, PLACEHOLDER_BRAND);
    assert_eq!(product.description, PLACEHOLDER_DESCRIPTION);
    assert_eq!(product.image, PLACEHOLDER_IMAGE);
    assert_eq!(product.gender, Gender::Unisex);
    assert_eq!(product.scent_family, ScentFamily::Floral);
    assert_eq!(product.sizes, pricing_tiers());
    assert_eq!(product.sizes.len(), 2);
    assert_eq!(product.sizes[0].size_ml, 50);
    assert_eq!(product.sizes[1].size_ml, 100);
    assert!(!product.is_best_seller);
    assert!(!product.is_new_arrival);
    assert!(product.in_stock);
    assert!(product.fragella_id.is_none());
    assert!(product.last_updated.is_some());
}

#[test]
fn upstream_pricing_is_ignored() {
    let record = raw(json!({ "name": "Aventus", "price": 435, "sizes": [{ "size": 30 }] }));
    assert_eq!(normalize_fragrance(&record, 0).sizes, pricing_tiers());
}

// Best-seller status comes from batch position, not from anything about the
// fragrance. Reordering a batch changes which products are best-sellers.
#[test]
fn best_seller_is_first_five_batch_positions() {
    let batch: Vec<RawFragrance> = (0..7)
        .map(|i| raw(json!({ "id": i + 1, "name": format!("Scent {i}") })))
        .collect();
    let products = normalize_batch(&batch);

    let flags: Vec<bool> = products.iter().map(|p| p.is_best_seller).collect();
    assert_eq!(flags, vec![true, true, true, true, true, false, false]);

    let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
    assert_eq!(
        ids,
        vec!["frag_1", "frag_2", "frag_3", "frag_4", "frag_5", "frag_6", "frag_7"]
    );
}

#[test]
fn oud_intense_end_to_end_record() {
    let record = raw(json!({
        "name": "Oud Intense",
        "brand": "X",
        "description": "rich oud and leather",
        "male": true
    }));
    let product = normalize_fragrance(&record, 0);

    assert_eq!(product.id, "frag_x_oud_intense");
    assert_eq!(product.gender, Gender::Men);
    assert_eq!(product.scent_family, ScentFamily::Woody);
    assert_eq!(product.sizes, pricing_tiers());
    assert_eq!(product.description, "rich oud and leather");
}

#[test]
fn numeric_id_is_kept_as_provenance() {
    let product = normalize_fragrance(&raw(json!({ "id": 4821, "name": "Aventus" })), 0);
    assert_eq!(product.id, "frag_4821");
    assert_eq!(product.fragella_id, Some(4821));
}
