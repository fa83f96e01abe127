use std::io::Write as _;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use scentdb_core::Product;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;

/// Current on-disk schema version.
pub const STORE_VERSION: u32 = 1;

/// The persisted document: `{ version, lastSyncedAt, products }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreDocument {
    pub version: u32,
    pub last_synced_at: DateTime<Utc>,
    pub products: Vec<Product>,
}

impl StoreDocument {
    fn empty() -> Self {
        Self {
            version: STORE_VERSION,
            last_synced_at: Utc::now(),
            products: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub count: usize,
    pub last_synced_at: DateTime<Utc>,
    pub version: u32,
}

/// Product store backed by a single JSON file.
///
/// There is no in-memory cache: every read loads the file again. Mutations
/// are whole-document rewrites through a temp file and rename. Nothing
/// coordinates concurrent writers; two processes adding at the same time can
/// lose one of the additions. The only writer is the offline seed job.
#[derive(Debug, Clone)]
pub struct ProductStore {
    path: PathBuf,
}

impl ProductStore {
    /// Opens the store at `path`, creating the parent directory and an empty
    /// version-1 document when the file does not exist yet.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the directory or initial file cannot be
    /// created.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let store = Self { path: path.into() };
        store.initialize()?;
        Ok(store)
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn initialize(&self) -> Result<(), StoreError> {
        if self.path.exists() {
            return Ok(());
        }
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.io_error(e))?;
        }
        self.write(&StoreDocument::empty())?;
        tracing::info!(path = %self.path.display(), "initialized product store");
        Ok(())
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }

    /// Strict load used by mutations.
    fn load(&self) -> Result<StoreDocument, StoreError> {
        self.initialize()?;
        let content = std::fs::read_to_string(&self.path).map_err(|e| self.io_error(e))?;
        serde_json::from_str(&content).map_err(|e| StoreError::Corrupt {
            path: self.path.display().to_string(),
            source: e,
        })
    }

    /// Lenient load used by reads: any failure degrades to an empty view.
    fn read(&self) -> StoreDocument {
        match self.load() {
            Ok(doc) => doc,
            Err(e) => {
                tracing::warn!(
                    path = %self.path.display(),
                    error = %e,
                    "product store unreadable; serving empty catalog"
                );
                StoreDocument::empty()
            }
        }
    }

    fn write(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let mut bytes = serde_json::to_vec_pretty(doc).map_err(StoreError::Serialize)?;
        bytes.push(b'\n');

        let file_name = self
            .path
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("products.json");
        let tmp = self.path.with_file_name(format!(
            ".{file_name}.tmp.{}",
            std::process::id()
        ));

        {
            let mut f = std::fs::File::create(&tmp).map_err(|e| self.io_error(e))?;
            f.write_all(&bytes).map_err(|e| self.io_error(e))?;
            f.sync_all().map_err(|e| self.io_error(e))?;
        }
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_error(e))
    }

    /// Full snapshot in insertion order.
    #[must_use]
    pub fn get_all(&self) -> Vec<Product> {
        self.read().products
    }

    #[must_use]
    pub fn get_by_id(&self, id: &str) -> Option<Product> {
        self.read().products.into_iter().find(|p| p.id == id)
    }

    /// Appends `product` unless an entry with the same `(name, brand)` already
    /// exists. Returns `true` when the product was added.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Corrupt`] rather than overwriting an unreadable
    /// store file, or [`StoreError::Io`] if the rewrite fails.
    pub fn add(&self, product: Product) -> Result<bool, StoreError> {
        Ok(self.add_batch(vec![product])? == 1)
    }

    /// Adds each product in order, skipping any whose `(name, brand)` matches
    /// an entry already stored or added earlier in the same batch. Returns the
    /// number actually added.
    ///
    /// # Errors
    ///
    /// Same as [`ProductStore::add`].
    pub fn add_batch(&self, products: Vec<Product>) -> Result<usize, StoreError> {
        let mut doc = self.load()?;
        let mut added = 0usize;

        for product in products {
            if doc.products.iter().any(|p| p.same_listing(&product)) {
                tracing::info!(
                    brand = %product.brand,
                    name = %product.name,
                    fragella_id = ?product.fragella_id,
                    "skipped duplicate product"
                );
                continue;
            }
            tracing::info!(brand = %product.brand, name = %product.name, "added product");
            doc.products.push(product);
            added += 1;
        }

        if added > 0 {
            doc.last_synced_at = Utc::now();
            self.write(&doc)?;
        }

        Ok(added)
    }

    /// Removes every product.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Io`] if the rewrite fails.
    pub fn clear_all(&self) -> Result<(), StoreError> {
        let version = self.load().map_or(STORE_VERSION, |doc| doc.version);
        self.write(&StoreDocument {
            version,
            last_synced_at: Utc::now(),
            products: Vec::new(),
        })?;
        tracing::info!(path = %self.path.display(), "cleared all products");
        Ok(())
    }

    /// Case-insensitive substring match on name, brand, or description.
    /// Callers are expected to reject blank queries.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<Product> {
        self.read()
            .products
            .into_iter()
            .filter(|p| p.matches_text(query))
            .collect()
    }

    /// Exact match on the serialized scent-family name. Unknown names match
    /// nothing.
    #[must_use]
    pub fn filter_by_family(&self, family: &str) -> Vec<Product> {
        self.read()
            .products
            .into_iter()
            .filter(|p| p.scent_family.as_str() == family)
            .collect()
    }

    #[must_use]
    pub fn stats(&self) -> StoreStats {
        let doc = self.read();
        StoreStats {
            count: doc.products.len(),
            last_synced_at: doc.last_synced_at,
            version: doc.version,
        }
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
