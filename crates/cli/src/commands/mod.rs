//! CLI command implementations.

pub mod address;
pub mod admin;
pub mod browse;
pub mod cart;
pub mod checkout;
pub mod orders;
pub mod wishlist;

use shophub_storefront::cart::CartEngine;
use shophub_storefront::config::StorefrontConfig;
use shophub_storefront::store::JsonSnapshotStore;

pub(crate) type CliResult = Result<(), Box<dyn std::error::Error>>;

/// Rehydrate the cart engine from the configured data directory.
pub(crate) fn open_engine(config: &StorefrontConfig) -> CartEngine<JsonSnapshotStore> {
    CartEngine::load(JsonSnapshotStore::new(&config.data_dir))
}
