//! Report years/months reference data, plus the parallel page-load bundle.

use crate::error::ApiResult;
use crate::model::{Report, ReportMonth, ReportYear};
use crate::normalize::{ListHints, decode_items, normalize_list};
use crate::resources::reports;
use crate::transport::Transport;

/// Publication years administered in the back office.
pub async fn years(t: &Transport) -> ApiResult<Vec<ReportYear>> {
    let raw = t.get("/report-years").await?;
    let hints = ListHints {
        page: None,
        domain_keys: &["years"],
    };
    decode_items(normalize_list(&raw, &hints)?.items)
}

/// Static month reference list, normally exactly 12 entries. A shorter or
/// garbled list is passed through; the reconciliation engine degrades the
/// grid rather than failing the whole page.
pub async fn months(t: &Transport) -> ApiResult<Vec<ReportMonth>> {
    let raw = t.get("/report-months").await?;
    let hints = ListHints {
        page: None,
        domain_keys: &["months"],
    };
    let months: Vec<ReportMonth> = decode_items(normalize_list(&raw, &hints)?.items)?;
    if months.len() != 12 {
        tracing::warn!("month reference list has {} entries", months.len());
    }
    Ok(months)
}

/// Everything the monthly reports page needs, fetched in one pass.
///
/// The three fetches are independent, so each carries its own `Result`:
/// the page can still render years when the month labels failed to load.
#[derive(Debug)]
pub struct MonthlyBundle {
    pub years: ApiResult<Vec<ReportYear>>,
    pub months: ApiResult<Vec<ReportMonth>>,
    pub reports: ApiResult<Vec<Report>>,
}

/// Fetch years, months, and one year's reports concurrently. All three
/// always run to completion; a failure in one never cancels the others.
pub async fn monthly_bundle(t: &Transport, year_id: i64) -> MonthlyBundle {
    let (years, months, reports) = tokio::join!(
        years(t),
        months(t),
        reports::monthly_by_year(t, year_id),
    );
    MonthlyBundle {
        years,
        months,
        reports,
    }
}
