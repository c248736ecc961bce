//! Command handlers. Each one calls the catalog and renders the result as
//! pretty-printed JSON.

use jdcat_catalog::{Catalog, CatalogProvider};
use serde::Serialize;

use crate::Commands;

/// Runs `command` against `catalog` and returns the rendered JSON.
///
/// # Errors
///
/// Returns an error only if the result cannot be serialized; provider
/// failures are already downgraded to empty results by the catalog.
pub(crate) async fn run<P: CatalogProvider>(
    catalog: &Catalog<P>,
    command: Commands,
) -> anyhow::Result<String> {
    match command {
        Commands::Search { query } => {
            let query = query.join(" ");
            render(&catalog.search(&query).await)
        }
        Commands::Info { ids } => render(&catalog.information(&normalize_ids(ids)).await),
        Commands::Photos { ids } => render(&catalog.photos(&normalize_ids(ids)).await),
        Commands::Price { id } => render(&catalog.price(&id).await),
        Commands::MinPrice { ids } => render(&catalog.min_price(&normalize_ids(ids)).await),
    }
}

/// Trims ids and drops the empty ones left by stray commas.
pub(crate) fn normalize_ids(ids: Vec<String>) -> Vec<String> {
    ids.into_iter()
        .map(|id| id.trim().to_owned())
        .filter(|id| !id.is_empty())
        .collect()
}

pub(crate) fn render<T: Serialize>(value: &T) -> anyhow::Result<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
