//! Global search fan-in.
//!
//! One upstream call returns up to three independently shaped collections.
//! The aggregator guarantees all three keys exist on the way out, so the
//! UI never branches on a missing collection.

use crate::error::ApiResult;
use crate::model::SearchResults;
use crate::transport::Transport;
use serde_json::Value;

/// Search news and reports in one call.
pub async fn global(t: &Transport, query: &str, limit: u32) -> ApiResult<SearchResults> {
    let raw = t
        .get(&format!(
            "/search?q={}&limit={limit}",
            urlencoding::encode(query)
        ))
        .await?;
    Ok(aggregate(&raw))
}

/// Collect the three result sets, unwrapping an outer `data` envelope when
/// present. Collections the upstream omitted become empty vectors.
fn aggregate(raw: &Value) -> SearchResults {
    let container = raw.get("data").filter(|v| v.is_object()).unwrap_or(raw);
    SearchResults {
        news: collection(container, &["news"]),
        monthly_reports: collection(container, &["monthly_reports", "monthlyReports"]),
        yearly_reports: collection(container, &["yearly_reports", "yearlyReports"]),
    }
}

fn collection(v: &Value, names: &[&str]) -> Vec<Value> {
    names
        .iter()
        .find_map(|n| v.get(*n).and_then(Value::as_array))
        .cloned()
        .unwrap_or_default()
}
