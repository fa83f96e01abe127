use chrono::SecondsFormat;
use scentdb_core::{
    available_brands, available_scent_families, best_sellers, AppConfig, ScentFamily,
};
use scentdb_store::ProductStore;

pub(crate) fn run_stats(config: &AppConfig) -> anyhow::Result<()> {
    let store = ProductStore::open(&config.store_path)?;
    println!("{}", render_stats(&store));
    Ok(())
}

pub(crate) fn run_clear(config: &AppConfig, confirmed: bool) -> anyhow::Result<()> {
    if !confirmed {
        anyhow::bail!(
            "refusing to clear {} without --yes",
            config.store_path.display()
        );
    }

    let store = ProductStore::open(&config.store_path)?;
    let before = store.stats().count;
    store.clear_all()?;
    println!("cleared {before} products from {}", store.path().display());
    Ok(())
}

fn render_stats(store: &ProductStore) -> String {
    let stats = store.stats();
    let products = store.get_all();
    let families: Vec<&str> = available_scent_families(&products)
        .into_iter()
        .map(ScentFamily::as_str)
        .collect();

    format!(
        "store: {}\nversion: {}\nlast synced: {}\nproducts: {}\nbest sellers: {}\nbrands: [{}]\nfamilies: [{}]",
        store.path().display(),
        stats.version,
        stats.last_synced_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        stats.count,
        best_sellers(&products).len(),
        available_brands(&products).join(", "),
        families.join(", ")
    )
}
