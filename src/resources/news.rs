//! News endpoint wrappers.

use crate::error::ApiResult;
use crate::model::{NewsItem, Page};
use crate::normalize::{ListHints, decode_item, decode_items, normalize_item, normalize_list};
use crate::transport::Transport;

/// List news articles, optionally filtered by category.
pub async fn list(
    t: &Transport,
    page: u64,
    per_page: u64,
    category_id: Option<i64>,
) -> ApiResult<Page<NewsItem>> {
    let mut path = format!("/news?page={page}&per_page={per_page}");
    if let Some(cat) = category_id {
        path.push_str(&format!("&category_id={cat}"));
    }
    let raw = t.get(&path).await?;
    let hints = ListHints {
        page: Some(page),
        domain_keys: &["news", "articles"],
    };
    let payload = normalize_list(&raw, &hints)?;
    Ok(Page {
        items: decode_items(payload.items)?,
        pagination: payload.pagination,
    })
}

/// Fetch a single article by id.
pub async fn get(t: &Transport, id: i64) -> ApiResult<NewsItem> {
    let raw = t.get(&format!("/news/{id}")).await?;
    decode_item(normalize_item(&raw)?)
}
