//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use rocket_cart::{CartConfig, CartStore, TracingNotifier};
use rocket_data::InMemoryApi;

use crate::output::Output;

/// Config file names searched for, nearest directory first.
const CONFIG_NAMES: [&str; 3] = ["rocket.toml", ".rocket.toml", "rocket.json"];

/// Execution context for CLI commands.
pub struct Context {
    /// Cart configuration.
    pub config: CartConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Catalog fixture path, as given on the command line.
    pub db: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, db: &str, output: Output) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let config = if let Some(path) = config_path {
            CartConfig::load(path)?
        } else {
            find_config(&cwd).unwrap_or_default()
        };

        Ok(Self {
            config,
            output,
            cwd,
            db: PathBuf::from(db),
        })
    }

    /// Resolve a path relative to the working directory.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.cwd.join(path)
        }
    }

    /// Load the catalog fixture.
    pub fn api(&self) -> Result<InMemoryApi> {
        let path = self.resolve_path(&self.db);
        self.output
            .debug(&format!("Loading catalog from {}", path.display()));
        InMemoryApi::from_path(&path)
            .with_context(|| format!("Failed to load catalog: {}", path.display()))
    }

    /// Open the cart over the catalog fixture.
    ///
    /// Rejections are printed on stderr, or logged through `tracing` in JSON
    /// mode so stdout stays machine-readable.
    pub fn open_store(&self, api: InMemoryApi) -> Result<CartStore> {
        let mut config = self.config.clone();
        config.data_dir = self.resolve_path(&config.data_dir);
        self.output
            .debug(&format!("Cart data in {}", config.data_dir.display()));

        let store = if self.output.is_json() {
            CartStore::from_config(&config, api.clone(), api, TracingNotifier)
        } else {
            let output = self.output.clone();
            let notify = move |message: &str| output.error(message);
            CartStore::from_config(&config, api.clone(), api, notify)
        };
        store.with_context(|| format!("Failed to open cart in {}", config.data_dir.display()))
    }
}

/// Find a config file in the directory tree.
///
/// A file that fails to parse is skipped and the search continues upward.
fn find_config(start: &Path) -> Option<CartConfig> {
    let mut current = start.to_path_buf();
    loop {
        for name in CONFIG_NAMES {
            let config_path = current.join(name);
            if config_path.exists() {
                match CartConfig::load(&config_path) {
                    Ok(config) => return Some(config),
                    Err(e) => tracing::warn!("Skipping config: {:#}", e),
                }
            }
        }

        if !current.pop() {
            break;
        }
    }

    None
}
