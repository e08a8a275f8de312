//! Cart store configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rocket_cache::{Cache, CacheError, FileStore};
use rocket_commerce::Currency;
use rocket_data::FetchPolicy;
use serde::{Deserialize, Serialize};

use crate::store::Operation;

/// Key the cart is persisted under.
pub const DEFAULT_STORAGE_KEY: &str = "@RocketShoes:cart";

/// Cart store configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// Durable slot key.
    pub storage_key: String,
    /// Directory for the file-backed slot.
    pub data_dir: PathBuf,
    /// Per-fetch timeout. Absent means wait indefinitely.
    pub fetch_timeout_ms: Option<u64>,
    /// Currency used for cart totals.
    pub currency: Currency,
    /// Messages shown to the shopper.
    pub messages: Messages,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self {
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            data_dir: PathBuf::from(".rocket"),
            fetch_timeout_ms: None,
            currency: Currency::BRL,
            messages: Messages::default(),
        }
    }
}

impl CartConfig {
    /// Load config from a file.
    ///
    /// `.json` files are parsed as JSON, everything else as TOML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if path.extension().is_some_and(|e| e == "json") {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let content = if path.extension().is_some_and(|e| e == "json") {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Fetch policy derived from `fetch_timeout_ms`.
    pub fn fetch_policy(&self) -> FetchPolicy {
        FetchPolicy::from_millis(self.fetch_timeout_ms)
    }

    /// Open the file-backed cache under `data_dir`.
    pub fn open_cache(&self) -> Result<Cache, CacheError> {
        Ok(Cache::new(FileStore::open(&self.data_dir)?))
    }
}

/// Messages shown to the shopper when an operation is rejected.
///
/// Defaults are the storefront's Portuguese strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    /// Adding a product failed.
    pub add_failed: String,
    /// Removing a product failed.
    pub remove_failed: String,
    /// Changing a product's amount failed.
    pub update_failed: String,
    /// Not enough stock for the requested amount.
    pub out_of_stock: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            add_failed: "Erro na adição do produto".to_string(),
            remove_failed: "Erro na remoção do produto".to_string(),
            update_failed: "Erro na alteração de quantidade do produto".to_string(),
            out_of_stock: "Quantidade solicitada fora de estoque".to_string(),
        }
    }
}

impl Messages {
    /// English variants.
    pub fn english() -> Self {
        Self {
            add_failed: "Could not add the product".to_string(),
            remove_failed: "Could not remove the product".to_string(),
            update_failed: "Could not change the product amount".to_string(),
            out_of_stock: "Requested amount is out of stock".to_string(),
        }
    }

    /// Message for a rejected operation.
    ///
    /// Stock shortfalls get their own message whatever the operation.
    pub fn for_failure(&self, operation: Operation, out_of_stock: bool) -> &str {
        if out_of_stock {
            return &self.out_of_stock;
        }
        match operation {
            Operation::Add => &self.add_failed,
            Operation::Remove | Operation::Clear => &self.remove_failed,
            Operation::Update => &self.update_failed,
        }
    }
}
