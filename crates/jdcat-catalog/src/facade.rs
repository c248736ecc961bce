//! The public catalog surface.
//!
//! [`Catalog`] wires the provider, the batch fetcher and the normalizers
//! together. Every method except [`Catalog::try_search`] downgrades provider
//! failures to an empty result (or `-1` for prices) after logging them, so
//! callers always get a value of the documented shape.

use std::collections::BTreeMap;

use jdcat_core::{AppConfig, PhotoSet, PriceQuote, ProductInfo, SearchResult};

use crate::batch::{fetch_in_chunks, BatchOptions};
use crate::brand::{extract_product_info, DEFAULT_STORE};
use crate::error::ProviderError;
use crate::photos::{build_photo_set, build_search_result};
use crate::price;
use crate::provider::{fetch_payload, CatalogProvider, CatalogRequest};
use crate::types::{ImagePayload, ProductBasePayload, SearchPayload};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogOptions {
    pub batch: BatchOptions,
    /// Store label for products without a shop name.
    pub default_store: String,
}

impl Default for CatalogOptions {
    fn default() -> Self {
        Self {
            batch: BatchOptions::default(),
            default_store: DEFAULT_STORE.to_owned(),
        }
    }
}

impl CatalogOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            batch: BatchOptions {
                chunk_size: config.batch_chunk_size,
                max_concurrent_chunks: config.batch_max_concurrent_chunks,
            },
            default_store: config.default_store.clone(),
        }
    }
}

pub struct Catalog<P> {
    provider: P,
    options: CatalogOptions,
}

impl<P: CatalogProvider> Catalog<P> {
    pub fn new(provider: P, options: CatalogOptions) -> Self {
        Self { provider, options }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Searches the catalog and returns the underlying error on failure.
    ///
    /// A blank query returns an empty result without contacting the provider.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] if the request fails or the provider answers
    /// with a non-zero code.
    pub async fn try_search(&self, query: &str) -> Result<SearchResult, ProviderError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(SearchResult::empty());
        }

        let payload: SearchPayload =
            fetch_payload(&self.provider, &CatalogRequest::search(query)).await?;
        Ok(build_search_result(&payload.paragraph))
    }

    /// Like [`Catalog::try_search`], but a failure is logged and yields an
    /// empty result.
    pub async fn search(&self, query: &str) -> SearchResult {
        match self.try_search(query).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!(query, kind = %e.kind(), error = %e, "search failed");
                SearchResult::empty()
            }
        }
    }

    /// Display brand, name and store for each id, keyed by SKU id.
    ///
    /// Ids are requested in chunks; ids in a failed chunk are missing from
    /// the map.
    pub async fn information(&self, ids: &[String]) -> BTreeMap<String, ProductInfo> {
        let provider = &self.provider;
        let records = fetch_in_chunks(ids, self.options.batch, |chunk| async move {
            let request = CatalogRequest::ProductBase { ids: chunk };
            fetch_payload::<_, ProductBasePayload>(provider, &request)
                .await
                .map(|payload| payload.listproductbase_result)
        })
        .await;

        records
            .iter()
            .map(|raw| {
                let info = extract_product_info(raw, &self.options.default_store);
                (info.sku_id.clone(), info)
            })
            .collect()
    }

    /// Relative image paths for each id, keyed by SKU id.
    pub async fn photos(&self, ids: &[String]) -> PhotoSet {
        let provider = &self.provider;
        let records = fetch_in_chunks(ids, self.options.batch, |chunk| async move {
            let request = CatalogRequest::ProductImages { sku_ids: chunk };
            fetch_payload::<_, ImagePayload>(provider, &request)
                .await
                .map(|payload| payload.image_path_list)
        })
        .await;

        build_photo_set(&records)
    }

    pub async fn price(&self, id: &str) -> PriceQuote {
        price::quote(&self.provider, id).await
    }

    /// Lowest real price across `ids`, or `-1` when none has one.
    pub async fn min_price(&self, ids: &[String]) -> PriceQuote {
        price::min_quote(&self.provider, ids).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake_provider::{failed, ok, price_payload, ScriptedProvider};
    use crate::photos::PLACEHOLDER_PHOTO;
    use serde_json::json;

    fn ids(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| (*s).to_owned()).collect()
    }

    fn catalog(provider: ScriptedProvider) -> Catalog<ScriptedProvider> {
        Catalog::new(provider, CatalogOptions::default())
    }

    // -----------------------------------------------------------------------
    // search
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn blank_query_skips_provider() {
        let catalog = catalog(ScriptedProvider::unreachable());
        assert_eq!(catalog.search("   ").await.count(), 0);
        assert_eq!(catalog.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn search_maps_paragraphs_to_hits() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({
                "Paragraph": [
                    {
                        "wareid": "1",
                        "Content": { "imageurl": "http://img10.360buyimg.com/n1/jfs/t1/a.jpg" },
                        "SlaveWare": [
                            { "wareid": "2", "Content": { "imageurl": "http://img10.360buyimg.com/n1/jfs/t1/b.jpg" } }
                        ]
                    },
                    { "wareid": "3", "Content": { "imageurl": "" } }
                ]
            }))
        }));

        let result = catalog.search("iphone").await;
        assert_eq!(result.count(), 2);
        let hits = result.hits();
        assert_eq!(hits[0].primary_photo, "jfs/t1/a.jpg");
        assert_eq!(hits[0].sibling_ids, vec!["2"]);
        assert_eq!(hits[0].sibling_photos, vec!["jfs/t1/b.jpg"]);
        assert_eq!(hits[1].primary_photo, PLACEHOLDER_PHOTO);
        assert_eq!(
            catalog.provider().calls(),
            vec![CatalogRequest::search("iphone")]
        );
    }

    #[tokio::test]
    async fn search_without_paragraph_is_empty() {
        let catalog = catalog(ScriptedProvider::new(|_| ok(json!({ "code": "0" }))));
        assert_eq!(catalog.search("nothing").await.count(), 0);
    }

    #[tokio::test]
    async fn search_keeps_hits_around_a_paragraph_without_id() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({
                "Paragraph": [
                    { "wareid": "1", "Content": { "imageurl": "" } },
                    { "Content": { "imageurl": "http://img10.360buyimg.com/n1/jfs/t1/a.jpg" } },
                    { "wareid": "3" }
                ]
            }))
        }));
        let result = catalog.search("iphone").await;
        assert_eq!(result.count(), 2);
        assert_eq!(result.hits()[1].id, "3");
    }

    #[tokio::test]
    async fn search_failure_degrades_to_empty() {
        let catalog = catalog(ScriptedProvider::new(|_| failed("1")));
        assert_eq!(catalog.search("iphone").await.count(), 0);
    }

    #[tokio::test]
    async fn try_search_exposes_error_kind() {
        let catalog = catalog(ScriptedProvider::new(|_| failed("66")));
        let err = catalog.try_search("iphone").await.unwrap_err();
        assert_eq!(err.kind().as_str(), "UNKNOWN");
        assert!(err.to_string().contains("66"));
    }

    // -----------------------------------------------------------------------
    // information
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn information_with_no_ids_skips_provider() {
        let catalog = catalog(ScriptedProvider::unreachable());
        assert!(catalog.information(&[]).await.is_empty());
        assert!(catalog.photos(&[]).await.is_empty());
        assert_eq!(catalog.provider().call_count(), 0);
    }

    #[tokio::test]
    async fn information_is_keyed_by_sku() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({
                "listproductbase_result": [
                    { "skuId": 1, "ebrand": "Apple", "cbrand": "苹果", "pname": "Apple iPhone 13 128GB 全网通" },
                    { "skuId": "2", "cbrand": "小米", "name": "小米 Redmi K40", "shopName": "小米旗舰店" }
                ]
            }))
        }));

        let info = catalog.information(&ids(&["1", "2"])).await;
        assert_eq!(info.len(), 2);
        assert_eq!(info["1"].brand, "Apple/苹果");
        assert_eq!(info["1"].name, "iPhone 13");
        assert_eq!(info["1"].store, DEFAULT_STORE);
        assert_eq!(info["2"].store, "小米旗舰店");
    }

    #[tokio::test]
    async fn information_chunks_by_ten() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({ "listproductbase_result": [] }))
        }));
        let many: Vec<String> = (0..23).map(|i| i.to_string()).collect();
        let _ = catalog.information(&many).await;

        let calls = catalog.provider().calls();
        assert_eq!(calls.len(), 3);
        match &calls[2] {
            CatalogRequest::ProductBase { ids } => assert_eq!(ids.len(), 3),
            other => panic!("unexpected request: {other:?}"),
        }
    }

    #[tokio::test]
    async fn information_drops_failed_chunk() {
        let catalog = catalog(ScriptedProvider::new(|request| match request {
            CatalogRequest::ProductBase { ids } if ids[0] == "0" => failed("1"),
            CatalogRequest::ProductBase { ids } => ok(json!({
                "listproductbase_result": ids
                    .iter()
                    .map(|id| json!({ "skuId": id, "pname": format!("Item {id}") }))
                    .collect::<Vec<_>>()
            })),
            other => panic!("unexpected request: {other:?}"),
        }));
        let many: Vec<String> = (0..12).map(|i| i.to_string()).collect();
        let info = catalog.information(&many).await;
        assert_eq!(info.len(), 2);
        assert!(info.contains_key("10"));
        assert!(info.contains_key("11"));
    }

    #[tokio::test]
    async fn information_skips_record_with_null_sku_only() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({
                "listproductbase_result": [
                    { "skuId": "1", "pname": "Alpha" },
                    { "skuId": "2", "pname": "Beta" },
                    { "skuId": null, "pname": "Gamma" }
                ]
            }))
        }));
        let info = catalog.information(&ids(&["1", "2", "3"])).await;
        assert_eq!(info.len(), 2);
        assert_eq!(info["1"].name, "Alpha");
        assert_eq!(info["2"].name, "Beta");
    }

    #[tokio::test]
    async fn configured_default_store_reaches_extractor() {
        let options = CatalogOptions {
            default_store: "Self-Operated".to_owned(),
            ..CatalogOptions::default()
        };
        let catalog = Catalog::new(
            ScriptedProvider::new(|_| {
                ok(json!({ "listproductbase_result": [{ "skuId": "9", "pname": "Widget" }] }))
            }),
            options,
        );
        let info = catalog.information(&ids(&["9"])).await;
        assert_eq!(info["9"].store, "Self-Operated");
    }

    // -----------------------------------------------------------------------
    // photos
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn photos_are_relative_paths() {
        let catalog = catalog(ScriptedProvider::new(|_| {
            ok(json!({
                "image_path_list": [
                    { "sku_id": "5", "image_list": [
                        { "path": "http://img10.360buyimg.com/n0/jfs/t5/x.jpg" },
                        { "path": "http://img10.360buyimg.com/n0/jfs/t5/y.jpg" }
                    ] }
                ]
            }))
        }));
        let photos = catalog.photos(&ids(&["5"])).await;
        assert_eq!(photos["5"], vec!["jfs/t5/x.jpg", "jfs/t5/y.jpg"]);
    }

    #[tokio::test]
    async fn photos_failure_degrades_to_empty() {
        let catalog = catalog(ScriptedProvider::new(|_| failed("1")));
        assert!(catalog.photos(&ids(&["5"])).await.is_empty());
    }

    // -----------------------------------------------------------------------
    // prices
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn price_and_min_price_delegate() {
        let catalog = catalog(ScriptedProvider::new(|request| match request {
            CatalogRequest::Price { sku_id } if sku_id == "1" => price_payload("0.00"),
            CatalogRequest::Price { .. } => price_payload("149.50"),
            other => panic!("unexpected request: {other:?}"),
        }));
        assert_eq!(catalog.price("2").await, PriceQuote::new(150));
        assert_eq!(
            catalog.min_price(&ids(&["1", "2"])).await,
            PriceQuote::new(150)
        );
    }
}
