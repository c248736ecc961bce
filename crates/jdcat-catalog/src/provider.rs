//! The boundary between the normalization pipeline and whatever actually
//! talks to the catalog provider.
//!
//! Implementations execute a [`CatalogRequest`] and hand back the raw
//! [`ProviderResponse`]; [`fetch_payload`] is the single place where a
//! non-zero response code is turned into [`ProviderError::Unknown`].

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::{json, Value};

use crate::error::ProviderError;

/// Response code the provider uses for success.
pub const SUCCESS_CODE: &str = "0";

/// Fields requested from the product base endpoint.
pub const PRODUCT_BASE_FIELDS: &str = "skuId,ebrand,cbrand,pname,name,shopName";

/// Prefix the price endpoint expects in front of a SKU id.
pub const PRICE_SKU_PREFIX: &str = "J_";

/// A single call against the catalog provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogRequest {
    Search { keyword: String },
    ProductBase { ids: Vec<String> },
    ProductImages { sku_ids: Vec<String> },
    Price { sku_id: String },
}

impl CatalogRequest {
    #[must_use]
    pub fn search(keyword: &str) -> Self {
        Self::Search {
            keyword: keyword.to_owned(),
        }
    }

    #[must_use]
    pub fn price(sku_id: &str) -> Self {
        Self::Price {
            sku_id: sku_id.to_owned(),
        }
    }

    /// Provider method name for this request.
    #[must_use]
    pub fn method(&self) -> &'static str {
        match self {
            CatalogRequest::Search { .. } => "jingdong.ware.search",
            CatalogRequest::ProductBase { .. } => "jingdong.new.ware.baseproduct.get",
            CatalogRequest::ProductImages { .. } => "jingdong.ware.productimage.get",
            CatalogRequest::Price { .. } => "jingdong.ware.price.get",
        }
    }

    /// Business parameters, sent as the request's JSON parameter blob.
    #[must_use]
    pub fn params(&self) -> Value {
        match self {
            CatalogRequest::Search { keyword } => json!({ "key": keyword }),
            CatalogRequest::ProductBase { ids } => json!({
                "ids": ids.join(","),
                "basefields": PRODUCT_BASE_FIELDS,
            }),
            CatalogRequest::ProductImages { sku_ids } => json!({ "sku_id": sku_ids.join(",") }),
            CatalogRequest::Price { sku_id } => {
                json!({ "sku_id": format!("{PRICE_SKU_PREFIX}{sku_id}") })
            }
        }
    }

    /// Short description used as error context and in log fields.
    #[must_use]
    pub fn describe(&self) -> String {
        match self {
            CatalogRequest::Search { keyword } => format!("{}(key={keyword})", self.method()),
            CatalogRequest::ProductBase { ids } => {
                format!("{}(ids={})", self.method(), ids.join(","))
            }
            CatalogRequest::ProductImages { sku_ids } => {
                format!("{}(sku_id={})", self.method(), sku_ids.join(","))
            }
            CatalogRequest::Price { sku_id } => format!("{}(sku_id={sku_id})", self.method()),
        }
    }
}

/// Raw provider answer: the response code plus the payload object it came with.
#[derive(Debug, Clone, PartialEq)]
pub struct ProviderResponse {
    pub code: String,
    pub payload: Value,
}

impl ProviderResponse {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }

    /// Checks the response code and deserializes the payload into `T`.
    ///
    /// # Errors
    ///
    /// - [`ProviderError::Unknown`] when the code is not `"0"`.
    /// - [`ProviderError::Deserialize`] when the payload does not match `T`.
    pub fn into_payload<T: DeserializeOwned>(self, context: &str) -> Result<T, ProviderError> {
        if !self.is_success() {
            let message = ["en_desc", "zh_desc", "msg"]
                .iter()
                .find_map(|key| self.payload.get(*key).and_then(Value::as_str))
                .unwrap_or("unknown error")
                .to_owned();
            return Err(ProviderError::Unknown {
                code: self.code,
                message,
            });
        }

        serde_json::from_value(self.payload).map_err(|e| ProviderError::Deserialize {
            context: context.to_owned(),
            source: e,
        })
    }
}

/// Something that can execute catalog requests: the HTTP client in
/// production, a scripted stand-in in tests.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Executes one request.
    ///
    /// # Errors
    ///
    /// Returns [`ProviderError`] when the request could not be completed.
    /// A completed request with a non-zero code is *not* an error here.
    async fn execute(&self, request: &CatalogRequest) -> Result<ProviderResponse, ProviderError>;
}

/// Executes `request` and deserializes a successful payload into `T`.
///
/// # Errors
///
/// Propagates transport errors from the provider, and the errors of
/// [`ProviderResponse::into_payload`].
pub async fn fetch_payload<P, T>(provider: &P, request: &CatalogRequest) -> Result<T, ProviderError>
where
    P: CatalogProvider + ?Sized,
    T: DeserializeOwned,
{
    let response = provider.execute(request).await?;
    response.into_payload(&request.describe())
}
