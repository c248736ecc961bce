//! Raw payload types for the four provider endpoints.
//!
//! ## Observed shape
//!
//! Field presence is not stable across records: a product may carry `pname`
//! but no `name`, an English brand without a Chinese one, or no `shopName`
//! for self-operated stock. Every such field is an `Option` and callers
//! decide what absence means.
//!
//! SKU ids arrive as JSON strings on some endpoints and as integers on
//! others; prices arrive as decimal strings but occasionally as bare numbers.
//! Both are normalised to `String` at deserialization time.
//!
//! Record lists are decoded one record at a time: a record that does not
//! match its type (a null or missing id, say) is logged and skipped, and the
//! rest of the list survives.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

// ---------------------------------------------------------------------------
// jingdong.ware.search
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct SearchPayload {
    /// Absent (or `null`) when the query matched nothing.
    #[serde(rename = "Paragraph", default, deserialize_with = "lenient_list")]
    pub paragraph: Vec<RawParagraph>,
}

/// One primary search hit.
#[derive(Debug, Clone, Deserialize)]
pub struct RawParagraph {
    #[serde(deserialize_with = "id_string")]
    pub wareid: String,
    #[serde(rename = "Content", default)]
    pub content: Option<RawContent>,
    /// Sibling SKUs of the same product family.
    #[serde(rename = "SlaveWare", default, deserialize_with = "lenient_list")]
    pub slave_ware: Vec<RawSlaveWare>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawContent {
    #[serde(default)]
    pub imageurl: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawSlaveWare {
    #[serde(deserialize_with = "id_string")]
    pub wareid: String,
    #[serde(rename = "Content", default)]
    pub content: Option<RawContent>,
}

impl RawParagraph {
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.imageurl.as_deref())
    }
}

impl RawSlaveWare {
    #[must_use]
    pub fn image_url(&self) -> Option<&str> {
        self.content.as_ref().and_then(|c| c.imageurl.as_deref())
    }
}

// ---------------------------------------------------------------------------
// jingdong.new.ware.baseproduct.get
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ProductBasePayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub listproductbase_result: Vec<RawProductBase>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawProductBase {
    #[serde(rename = "skuId", deserialize_with = "id_string")]
    pub sku_id: String,
    /// English (or romanised) brand.
    #[serde(default)]
    pub ebrand: Option<String>,
    /// Chinese brand.
    #[serde(default)]
    pub cbrand: Option<String>,
    /// Product name; preferred over `name` when present.
    #[serde(default)]
    pub pname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(rename = "shopName", default)]
    pub shop_name: Option<String>,
}

// ---------------------------------------------------------------------------
// jingdong.ware.productimage.get
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct ImagePayload {
    #[serde(default, deserialize_with = "lenient_list")]
    pub image_path_list: Vec<RawImageRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImageRecord {
    #[serde(deserialize_with = "id_string")]
    pub sku_id: String,
    #[serde(default)]
    pub image_list: Vec<RawImage>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawImage {
    /// Absolute image URL. Entries without one are skipped.
    #[serde(default)]
    pub path: Option<String>,
}

// ---------------------------------------------------------------------------
// jingdong.ware.price.get
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct PricePayload {
    /// Only the first entry is meaningful.
    #[serde(default)]
    pub price_changes: Vec<RawPriceChange>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawPriceChange {
    #[serde(default, deserialize_with = "opt_scalar_string")]
    pub price: Option<String>,
}

// ---------------------------------------------------------------------------
// scalar helpers
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Scalar {
    fn into_string(self) -> String {
        match self {
            Scalar::Text(s) => s,
            Scalar::Int(n) => n.to_string(),
            Scalar::Float(f) => f.to_string(),
        }
    }
}

fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Scalar::deserialize(deserializer).map(Scalar::into_string)
}

fn opt_scalar_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Scalar>::deserialize(deserializer).map(|s| s.map(Scalar::into_string))
}

/// Decodes a JSON array record by record, skipping records that fail.
///
/// `null` decodes as an empty list. A value that is not an array at all is
/// still an error.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let raw = Option::<Vec<Value>>::deserialize(deserializer)?.unwrap_or_default();
    let total = raw.len();
    let records: Vec<T> = raw
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value::<T>(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(
                    index,
                    record = std::any::type_name::<T>(),
                    error = %e,
                    "skipping malformed record"
                );
                None
            }
        })
        .collect();

    if records.len() < total {
        tracing::warn!(
            skipped = total - records.len(),
            total,
            "record list decoded with skipped entries"
        );
    }
    Ok(records)
}
