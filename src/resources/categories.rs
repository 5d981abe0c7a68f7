//! News category endpoint wrapper.

use crate::error::ApiResult;
use crate::model::Category;
use crate::normalize::{ListHints, decode_items, normalize_list};
use crate::transport::Transport;

/// Fetch the full category list. Not paginated upstream.
pub async fn list(t: &Transport) -> ApiResult<Vec<Category>> {
    let raw = t.get("/categories").await?;
    let hints = ListHints {
        page: None,
        domain_keys: &["categories"],
    };
    let payload = normalize_list(&raw, &hints)?;
    decode_items(payload.items)
}
