//! Display brand and display name extraction from product base records.
//!
//! The brand is resolved first and its cleaned halves are then stripped out
//! of the product name, so the order of the steps below matters: the name
//! must be cleaned with the already-cleaned brand strings, not the raw
//! `ebrand`/`cbrand` fields.

use jdcat_core::ProductInfo;

use crate::text::{apply_steps, Script, StripRules, TextStep, NOISE_PHRASES};
use crate::types::RawProductBase;

/// Store label for records without a `shopName` (JD self-operated stock).
pub const DEFAULT_STORE: &str = "京东自营店";

const BRAND_FIELD_STEPS: &[TextStep<'static>] =
    &[TextStep::Strip(StripRules::Full), TextStep::TitleCase];

/// Cleans one raw brand field: full glyph strip, then title case.
#[must_use]
pub fn clean_brand_field(raw: Option<&str>) -> String {
    raw.map(|s| apply_steps(s, BRAND_FIELD_STEPS))
        .unwrap_or_default()
}

/// Resolves the English and Chinese brand strings from the raw fields.
///
/// Returns `(brand_en, brand_cn)`; either may be empty.
#[must_use]
pub fn resolve_brand(ebrand: Option<&str>, cbrand: Option<&str>) -> (String, String) {
    let ebrand = clean_brand_field(ebrand);
    let cbrand = clean_brand_field(cbrand);

    let mut combined = ebrand;
    if cbrand != combined {
        combined.push_str(&cbrand);
    }

    let brand_en = apply_steps(&combined, &[TextStep::Script(Script::NonHan)]);
    let brand_cn = apply_steps(&combined, &[TextStep::Script(Script::Han)]);
    (brand_en, brand_cn)
}

/// Cleans the product name: light glyph strip, brand removal, then noise
/// phrase removal.
#[must_use]
pub fn clean_name(raw_name: &str, brand_en: &str, brand_cn: &str) -> String {
    let brand_tokens = [brand_en, brand_cn];
    apply_steps(
        raw_name,
        &[
            TextStep::Strip(StripRules::Light),
            TextStep::RemovePhrases(&brand_tokens),
            TextStep::RemovePhrases(NOISE_PHRASES),
        ],
    )
}

/// Joins the brand halves as `"English/中文"`, or returns whichever is non-empty.
#[must_use]
pub fn display_brand(brand_en: &str, brand_cn: &str) -> String {
    match (brand_en.is_empty(), brand_cn.is_empty()) {
        (false, false) => format!("{brand_en}/{brand_cn}"),
        (false, true) => brand_en.to_owned(),
        (true, _) => brand_cn.to_owned(),
    }
}

/// Builds the display [`ProductInfo`] for one raw product base record.
///
/// `default_store` is used when the record has no `shopName`. When both the
/// brand and the name clean down to nothing, the store is blanked too.
#[must_use]
pub fn extract_product_info(raw: &RawProductBase, default_store: &str) -> ProductInfo {
    let (brand_en, brand_cn) = resolve_brand(raw.ebrand.as_deref(), raw.cbrand.as_deref());

    let raw_name = raw
        .pname
        .as_deref()
        .or(raw.name.as_deref())
        .unwrap_or_default();
    let name = clean_name(raw_name, &brand_en, &brand_cn);

    let brand = display_brand(&brand_en, &brand_cn);

    let mut info = ProductInfo {
        sku_id: raw.sku_id.clone(),
        brand,
        name,
        store: String::new(),
    };
    if !info.is_blank() {
        info.store = raw
            .shop_name
            .clone()
            .unwrap_or_else(|| default_store.to_owned());
    }
    info
}
