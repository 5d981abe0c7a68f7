//! Response-shape normalization.
//!
//! The backend wraps the same logical collection in several different
//! shapes depending on endpoint and version: a bare array, a `data` array,
//! a double-nested `data.data` array, a domain-named array (`news`,
//! `categories`), or a success envelope. Nothing above this module is
//! allowed to inspect a raw backend shape; everything goes through
//! [`normalize_list`] / [`normalize_item`] first. Matching is an ordered
//! precedence so an ambiguous payload always resolves the same way.

use crate::error::{ApiError, ApiResult};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Canonical pagination tuple, wherever the metadata was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageInfo {
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub last_page: u64,
    pub has_more: bool,
}

/// Canonical list envelope handed to resource clients.
#[derive(Debug, Clone)]
pub struct ListPayload {
    pub items: Vec<Value>,
    /// Absent when the wrapper carried no pagination metadata at all.
    pub pagination: Option<PageInfo>,
}

/// Caller-supplied context for list normalization.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListHints<'a> {
    /// Page number the caller requested, used when metadata omits it.
    pub page: Option<u64>,
    /// Resource-specific wrapper keys to try, e.g. `["news"]`.
    pub domain_keys: &'a [&'a str],
}

/// Extract the item list and pagination from any of the known wrappers.
///
/// Precedence: bare array, `data` array, `data.data` array, domain-named
/// array. First match wins. Anything else is `MalformedResponse`.
pub fn normalize_list(raw: &Value, hints: &ListHints) -> ApiResult<ListPayload> {
    if let Some(items) = raw.as_array() {
        return Ok(ListPayload {
            items: items.clone(),
            pagination: None,
        });
    }

    if let Some(items) = raw.get("data").and_then(Value::as_array) {
        let pagination = extract_pagination(raw, hints.page, items.len());
        return Ok(ListPayload {
            items: items.clone(),
            pagination,
        });
    }

    if let Some(inner) = raw.get("data").filter(|v| v.is_object()) {
        if let Some(items) = inner.get("data").and_then(Value::as_array) {
            let pagination = extract_pagination(inner, hints.page, items.len());
            return Ok(ListPayload {
                items: items.clone(),
                pagination,
            });
        }
    }

    for key in hints.domain_keys {
        if let Some(items) = raw.get(*key).and_then(Value::as_array) {
            let pagination = extract_pagination(raw, hints.page, items.len());
            return Ok(ListPayload {
                items: items.clone(),
                pagination,
            });
        }
    }

    Err(malformed(raw))
}

/// Extract a single entity from any of the known wrappers.
///
/// An entity is recognized by the presence of an `id` field, checked at the
/// top level, under `data`, then under `data.data`.
pub fn normalize_item(raw: &Value) -> ApiResult<Value> {
    if is_entity(raw) {
        return Ok(raw.clone());
    }
    if let Some(data) = raw.get("data") {
        if is_entity(data) {
            return Ok(data.clone());
        }
        if let Some(inner) = data.get("data") {
            if is_entity(inner) {
                return Ok(inner.clone());
            }
        }
    }
    Err(malformed(raw))
}

/// Deserialize normalized items into the canonical model type.
pub fn decode_items<T: DeserializeOwned>(items: Vec<Value>) -> ApiResult<Vec<T>> {
    items.into_iter().map(decode_item).collect()
}

/// Deserialize one normalized item into the canonical model type.
pub fn decode_item<T: DeserializeOwned>(item: Value) -> ApiResult<T> {
    let keys = top_level_keys(&item);
    serde_json::from_value(item).map_err(|e| {
        tracing::warn!("item decode failed: {e}");
        ApiError::MalformedResponse { keys }
    })
}

fn is_entity(v: &Value) -> bool {
    v.is_object() && v.get("id").is_some()
}

fn malformed(raw: &Value) -> ApiError {
    ApiError::MalformedResponse {
        keys: top_level_keys(raw),
    }
}

/// Top-level key names only, so diagnostics never carry payload fields.
fn top_level_keys(v: &Value) -> Vec<String> {
    v.as_object()
        .map(|m| m.keys().cloned().collect())
        .unwrap_or_default()
}

/// Pagination metadata lives under `meta`, under `pagination`, or inline in
/// the wrapper itself. Missing fields fall back to values derivable from
/// the request, never to an error.
fn extract_pagination(container: &Value, hint_page: Option<u64>, items_len: usize) -> Option<PageInfo> {
    let meta = ["meta", "pagination"]
        .iter()
        .find_map(|k| container.get(*k).filter(|v| v.is_object()))
        .or_else(|| {
            let inline =
                container.get("current_page").is_some() || container.get("last_page").is_some();
            inline.then_some(container)
        })?;

    let page = u64_field(meta, &["current_page", "page"])
        .or(hint_page)
        .unwrap_or(1);
    let per_page = u64_field(meta, &["per_page", "perPage"]).unwrap_or(items_len as u64);
    let total = u64_field(meta, &["total", "total_count"]).unwrap_or(items_len as u64);
    let last_page = u64_field(meta, &["last_page", "lastPage"]).unwrap_or(page);

    // hasMore fallback order: explicit flag, then a non-null next-page URL,
    // then the page comparison. Fixed order keeps the result deterministic
    // when the metadata is only partially populated.
    let has_more = if let Some(flag) = meta.get("has_more_pages").and_then(Value::as_bool) {
        flag
    } else if meta.get("next_page_url").is_some_and(|v| !v.is_null()) {
        true
    } else {
        page < last_page
    };

    Some(PageInfo {
        page,
        per_page,
        total,
        last_page,
        has_more,
    })
}

/// Numeric field that tolerates string-encoded numbers.
fn u64_field(obj: &Value, names: &[&str]) -> Option<u64> {
    names.iter().find_map(|name| {
        let v = obj.get(*name)?;
        v.as_u64()
            .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn no_hints() -> ListHints<'static> {
        ListHints::default()
    }

    #[test]
    fn bare_array_yields_items_without_pagination() {
        let raw = json!([{"id": 1}, {"id": 2}]);
        let out = normalize_list(&raw, &no_hints()).unwrap();
        assert_eq!(out.items.len(), 2);
        assert!(out.pagination.is_none());
    }

    #[test]
    fn data_array_with_meta_pagination() {
        let raw = json!({
            "data": [{"id": 1}],
            "meta": {"current_page": 2, "per_page": 10, "total": 45, "last_page": 5}
        });
        let out = normalize_list(&raw, &no_hints()).unwrap();
        assert_eq!(out.items.len(), 1);
        let p = out.pagination.unwrap();
        assert_eq!(p, PageInfo { page: 2, per_page: 10, total: 45, last_page: 5, has_more: true });
    }

    #[test]
    fn double_nested_data_with_inner_meta() {
        let raw = json!({
            "data": {
                "data": [{"id": 7}],
                "meta": {"current_page": 5, "per_page": 10, "total": 45, "last_page": 5}
            }
        });
        let out = normalize_list(&raw, &no_hints()).unwrap();
        assert_eq!(out.items.len(), 1);
        assert!(!out.pagination.unwrap().has_more);
    }

    #[test]
    fn domain_named_array_is_matched_from_hints() {
        let raw = json!({"news": [{"id": 3}, {"id": 4}], "some_flag": true});
        let hints = ListHints { page: None, domain_keys: &["news"] };
        let out = normalize_list(&raw, &hints).unwrap();
        assert_eq!(out.items.len(), 2);
    }

    #[test]
    fn success_wrapped_data_array_matches_data_rule() {
        let raw = json!({"success": true, "data": [{"id": 9}]});
        let out = normalize_list(&raw, &no_hints()).unwrap();
        assert_eq!(out.items.len(), 1);
    }

    #[test]
    fn all_wrappers_agree_on_the_item_list() {
        let items = json!([{"id": 1}, {"id": 2}, {"id": 3}]);
        let shapes = [
            items.clone(),
            json!({"data": items.clone()}),
            json!({"data": {"data": items.clone()}}),
            json!({"news": items.clone()}),
            json!({"success": true, "data": items.clone()}),
        ];
        let hints = ListHints { page: None, domain_keys: &["news"] };
        for shape in &shapes {
            let out = normalize_list(shape, &hints).unwrap();
            assert_eq!(Value::Array(out.items), items);
        }
    }

    #[test]
    fn has_more_from_explicit_flag_wins() {
        let raw = json!({
            "data": [],
            "meta": {"current_page": 5, "last_page": 5, "has_more_pages": true}
        });
        let p = normalize_list(&raw, &no_hints()).unwrap().pagination.unwrap();
        assert!(p.has_more);
    }

    #[test]
    fn has_more_from_next_page_url_presence() {
        let raw = json!({
            "data": [],
            "pagination": {"page": 1, "next_page_url": "https://x/api/news?page=2"}
        });
        let p = normalize_list(&raw, &no_hints()).unwrap().pagination.unwrap();
        assert!(p.has_more);
    }

    #[test]
    fn null_next_page_url_falls_back_to_page_comparison() {
        let raw = json!({
            "data": [],
            "meta": {"current_page": 2, "last_page": 5, "next_page_url": null}
        });
        let p = normalize_list(&raw, &no_hints()).unwrap().pagination.unwrap();
        assert!(p.has_more);

        let raw = json!({
            "data": [],
            "meta": {"current_page": 5, "last_page": 5, "next_page_url": null}
        });
        let p = normalize_list(&raw, &no_hints()).unwrap().pagination.unwrap();
        assert!(!p.has_more);
    }

    #[test]
    fn inline_laravel_style_pagination_is_recognized() {
        let raw = json!({
            "data": [{"id": 1}],
            "current_page": 1,
            "per_page": "15",
            "total": 30,
            "last_page": 2
        });
        let p = normalize_list(&raw, &no_hints()).unwrap().pagination.unwrap();
        assert_eq!(p.per_page, 15);
        assert!(p.has_more);
    }

    #[test]
    fn page_hint_fills_missing_page_number() {
        let raw = json!({"data": [], "meta": {"last_page": 4}});
        let hints = ListHints { page: Some(3), domain_keys: &[] };
        let p = normalize_list(&raw, &hints).unwrap().pagination.unwrap();
        assert_eq!(p.page, 3);
        assert!(p.has_more);
    }

    #[test]
    fn unrecognized_shape_reports_keys_only() {
        let raw = json!({"secret_token": "abc123", "count": 3});
        let err = normalize_list(&raw, &no_hints()).unwrap_err();
        match err {
            ApiError::MalformedResponse { keys } => {
                assert!(keys.contains(&"secret_token".to_string()));
                // Key names only; the value must not leak into diagnostics.
                assert!(!format!("{keys:?}").contains("abc123"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn item_precedence_matches_at_each_nesting_level() {
        let flat = json!({"id": 1, "title": "a"});
        let wrapped = json!({"data": {"id": 1, "title": "a"}});
        let double = json!({"success": true, "data": {"data": {"id": 1, "title": "a"}}});
        for raw in [&flat, &wrapped, &double] {
            let item = normalize_item(raw).unwrap();
            assert_eq!(item.get("id").and_then(Value::as_u64), Some(1));
        }
    }

    #[test]
    fn item_without_id_anywhere_is_malformed() {
        let raw = json!({"data": {"title": "no id here"}});
        assert!(matches!(
            normalize_item(&raw),
            Err(ApiError::MalformedResponse { .. })
        ));
    }
}
