//! Reconciliation of sparse report records into a dense publication grid.
//!
//! Both functions are pure: inputs are read fresh on every call and the
//! output is a new value, so there is no stale derived state to invalidate
//! after a create, edit, or delete.

use crate::model::{GridCell, Report, ReportMonth, YearStatistics};

/// Build the dense year×month grid for the monthly view.
///
/// One cell per month, in month-id order regardless of the order of
/// `reports`. Months without a report get a placeholder cell whose
/// `ui_key` is the synthetic `"{year}-{month_id}"`, used only for UI list
/// keys and never sent back to the backend.
///
/// Two defensive rules, both logged rather than failed:
/// - duplicate month ids in the reference list: first occurrence wins,
///   so the grid keeps exactly one cell per month id;
/// - more than one report for the same month: the lowest report id wins,
///   keeping the one-cell-per-month invariant.
pub fn build_monthly_grid(year: i32, months: &[ReportMonth], reports: &[Report]) -> Vec<GridCell> {
    let mut ordered: Vec<&ReportMonth> = Vec::with_capacity(months.len());
    for month in months {
        if ordered.iter().any(|m| m.id == month.id) {
            tracing::warn!("duplicate month id {} in reference list", month.id);
            continue;
        }
        ordered.push(month);
    }
    ordered.sort_by_key(|m| m.id);

    ordered
        .into_iter()
        .map(|month| {
            let mut candidates: Vec<&Report> = reports
                .iter()
                .filter(|r| r.month_id == Some(month.id))
                .collect();
            candidates.sort_by_key(|r| r.id);
            if candidates.len() > 1 {
                tracing::warn!(
                    "{} reports for year {year} month {}, keeping id {}",
                    candidates.len(),
                    month.id,
                    candidates[0].id
                );
            }
            let report = candidates.first().map(|r| (*r).clone());
            let available = report.as_ref().is_some_and(|r| r.status.is_published());
            let ui_key = report
                .as_ref()
                .map(|r| r.id.to_string())
                .unwrap_or_else(|| format!("{year}-{}", month.id));
            GridCell {
                year,
                month_id: month.id,
                month_name: month.name.clone(),
                ui_key,
                report,
                available,
            }
        })
        .collect()
}

/// Aggregate counts over all reports of a year.
///
/// Operates on the full report slice for the year, not a page of it.
/// `completion_percent` rounds to the nearest integer and is 0 for an
/// empty slice.
pub fn compute_year_statistics(reports: &[Report]) -> YearStatistics {
    let total = reports.len() as u32;
    let published = reports.iter().filter(|r| r.status.is_published()).count() as u32;
    let completion_percent = if total == 0 {
        0
    } else {
        (f64::from(published) / f64::from(total) * 100.0).round() as u8
    };
    YearStatistics {
        total_reports: total,
        published_reports: published,
        draft_reports: total - published,
        completion_percent,
    }
}
