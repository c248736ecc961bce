//! Photo path extraction for search hits and product image lists.

use std::collections::HashSet;

use jdcat_core::{PhotoSet, SearchHit, SearchResult};

use crate::types::{RawImageRecord, RawParagraph};

/// Shown when a search hit comes without a usable image.
pub const PLACEHOLDER_PHOTO: &str = "/images/photo-placeholder.svg";

/// Strips scheme, host and image bucket from an image URL.
///
/// `"http://img10.360buyimg.com/n1/jfs/t123/abc.jpg"` becomes
/// `"jfs/t123/abc.jpg"`: the first path segment (`n1`, the size bucket) is
/// dropped along with everything before it. Protocol-relative URLs
/// (`"//host/..."`) are accepted. Input without a scheme is returned
/// unchanged; a URL whose path has a single segment returns that segment.
#[must_use]
pub fn relative_path(url: &str) -> String {
    let url = url.trim();
    let Some(after_scheme) = strip_scheme(url) else {
        return url.to_owned();
    };

    let Some((_host, path)) = after_scheme.split_once('/') else {
        return String::new();
    };
    let path = path.trim_start_matches('/');

    match path.split_once('/') {
        Some((_bucket, rest)) => rest.to_owned(),
        None => path.to_owned(),
    }
}

/// Returns the part of `url` after `scheme://` or a leading `//`.
fn strip_scheme(url: &str) -> Option<&str> {
    if let Some(rest) = url.strip_prefix("//") {
        return Some(rest);
    }
    let (scheme, rest) = url.split_once("://")?;
    let valid = !scheme.is_empty()
        && scheme
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some(rest)
}

/// Relative path for a raw image URL, or `None` when there is nothing usable.
fn photo_path(raw: Option<&str>) -> Option<String> {
    raw.map(relative_path).filter(|p| !p.is_empty())
}

/// Builds one [`SearchHit`] from a raw search paragraph.
///
/// Sibling photos are deduplicated in first-seen order and never repeat the
/// primary photo. A sibling without an image still contributes its id.
#[must_use]
pub fn build_search_hit(raw: &RawParagraph) -> SearchHit {
    let primary_photo =
        photo_path(raw.image_url()).unwrap_or_else(|| PLACEHOLDER_PHOTO.to_owned());

    let siblings = &raw.slave_ware;
    let mut sibling_ids = Vec::with_capacity(siblings.len());
    let mut sibling_photos = Vec::new();
    let mut seen: HashSet<String> = HashSet::new();
    seen.insert(primary_photo.clone());

    for sibling in siblings {
        sibling_ids.push(sibling.wareid.clone());
        if let Some(photo) = photo_path(sibling.image_url()) {
            if seen.insert(photo.clone()) {
                sibling_photos.push(photo);
            }
        }
    }

    SearchHit {
        id: raw.wareid.clone(),
        primary_photo,
        sibling_ids,
        sibling_photos,
    }
}

#[must_use]
pub fn build_search_result(paragraphs: &[RawParagraph]) -> SearchResult {
    SearchResult::new(paragraphs.iter().map(build_search_hit).collect())
}

/// Maps each record's image list through [`relative_path`], keeping order.
///
/// Images without a path are skipped. A SKU that appears twice keeps the
/// later record.
#[must_use]
pub fn build_photo_set(records: &[RawImageRecord]) -> PhotoSet {
    records
        .iter()
        .map(|record| {
            let photos = record
                .image_list
                .iter()
                .filter_map(|image| image.path.as_deref())
                .map(relative_path)
                .collect();
            (record.sku_id.clone(), photos)
        })
        .collect()
}
