//! Single-price lookup and minimum-price reduction.

use jdcat_core::PriceQuote;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::provider::{fetch_payload, CatalogProvider, CatalogRequest};
use crate::types::PricePayload;

/// Parses a decimal price string and rounds it half away from zero.
///
/// Returns [`PriceQuote::UNAVAILABLE`] (`-1`) for anything that does not
/// parse as a decimal or does not fit in an `i64`. A garbage price is not
/// reported as `0`, so callers can tell it apart from a real zero quote.
#[must_use]
pub fn parse_quote(raw: &str) -> PriceQuote {
    raw.trim()
        .parse::<Decimal>()
        .ok()
        .map(|d| d.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero))
        .and_then(|d| d.to_i64())
        .map_or(PriceQuote::UNAVAILABLE, PriceQuote::new)
}

/// Reads the first price entry of a payload.
#[must_use]
pub fn quote_from_payload(payload: &PricePayload) -> PriceQuote {
    payload
        .price_changes
        .first()
        .and_then(|change| change.price.as_deref())
        .map_or(PriceQuote::UNAVAILABLE, parse_quote)
}

/// Looks up the whole-unit price of one SKU.
///
/// An empty id yields `-1` without a provider call. Provider failures are
/// logged and also yield `-1`.
pub async fn quote<P>(provider: &P, id: &str) -> PriceQuote
where
    P: CatalogProvider + ?Sized,
{
    let id = id.trim();
    if id.is_empty() {
        return PriceQuote::UNAVAILABLE;
    }

    match fetch_payload::<_, PricePayload>(provider, &CatalogRequest::price(id)).await {
        Ok(payload) => quote_from_payload(&payload),
        Err(e) => {
            tracing::warn!(sku_id = id, error = %e, "price lookup failed");
            PriceQuote::UNAVAILABLE
        }
    }
}

/// Smallest quote that is neither `0` nor `-1`, or `-1` when none is left.
#[must_use]
pub fn min_of<I>(quotes: I) -> PriceQuote
where
    I: IntoIterator<Item = PriceQuote>,
{
    quotes
        .into_iter()
        .filter(|q| q.is_signal())
        .min()
        .unwrap_or(PriceQuote::UNAVAILABLE)
}

/// Quotes every id in order and reduces them with [`min_of`].
pub async fn min_quote<P>(provider: &P, ids: &[String]) -> PriceQuote
where
    P: CatalogProvider + ?Sized,
{
    let mut quotes = Vec::with_capacity(ids.len());
    for id in ids {
        quotes.push(quote(provider, id).await);
    }
    min_of(quotes)
}
