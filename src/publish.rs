//! Report lifecycle operations and the optimistic-update contract.
//!
//! State machine per report: draft ⇄ published, either state → deleted.
//! Every mutation validates client-side first, goes through the reports
//! client, and hands back a [`ListPatch`] the caller applies to its
//! in-memory list instead of re-fetching. `create` is the exception: the
//! server-assigned id arrives in the returned record, so the caller either
//! inserts that or re-fetches. No operation retries automatically.

use crate::error::{ApiError, ApiResult};
use crate::model::{Report, ReportInput, ReportKind, ReportStatus};
use crate::resources::reports;
use crate::transport::Transport;
use std::collections::BTreeMap;

/// Instruction for patching a caller-held report list after a successful
/// mutation. Kept as an explicit value so UI state stays decoupled from
/// the network layer and both sides test independently.
#[derive(Debug, Clone)]
pub enum ListPatch {
    /// Replace the report with the same id, or append when absent.
    Upsert(Report),
    /// Drop the report with this id. No-op when already absent.
    Remove { id: i64 },
}

impl ListPatch {
    /// Apply the patch in place. Idempotent.
    pub fn apply(&self, list: &mut Vec<Report>) {
        match self {
            ListPatch::Upsert(report) => {
                match list.iter_mut().find(|r| r.id == report.id) {
                    Some(slot) => *slot = report.clone(),
                    None => list.push(report.clone()),
                }
            }
            ListPatch::Remove { id } => list.retain(|r| r.id != *id),
        }
    }
}

/// Create a report. Defaults to draft when the input carries no status.
pub async fn create(t: &Transport, input: &ReportInput) -> ApiResult<Report> {
    validate(input)?;
    let created = reports::create(t, input).await?;
    tracing::info!("report {} created as {}", created.id, created.status.as_str());
    Ok(created)
}

/// Update a report's fields and optionally replace its file.
pub async fn update(t: &Transport, id: i64, input: &ReportInput) -> ApiResult<(Report, ListPatch)> {
    validate(input)?;
    let updated = reports::update(t, id, input).await?;
    let patch = ListPatch::Upsert(updated.clone());
    Ok((updated, patch))
}

/// Publish or unpublish. Transitions in either direction any number of
/// times; non-status fields are untouched by the backend.
pub async fn set_status(
    t: &Transport,
    id: i64,
    target: ReportStatus,
) -> ApiResult<(Report, ListPatch)> {
    let updated = reports::set_status(t, id, target).await?;
    tracing::info!("report {id} is now {}", updated.status.as_str());
    let patch = ListPatch::Upsert(updated.clone());
    Ok((updated, patch))
}

/// Delete a report. A repeat delete of the same id comes back as
/// `NotFound`, which callers treat as already-done rather than fatal.
pub async fn remove(t: &Transport, id: i64) -> ApiResult<ListPatch> {
    reports::delete(t, id).await?;
    tracing::info!("report {id} deleted");
    Ok(ListPatch::Remove { id })
}

/// Client-side pre-flight validation, mirroring the shape of a server 422
/// so forms handle both identically.
fn validate(input: &ReportInput) -> ApiResult<()> {
    let mut field_errors: BTreeMap<String, Vec<String>> = BTreeMap::new();
    if input.title.trim().is_empty() {
        field_errors.insert("title".into(), vec!["title is required".into()]);
    }
    if input.year_id.is_none() {
        field_errors.insert("year_id".into(), vec!["year is required".into()]);
    }
    if input.kind == ReportKind::Monthly && input.month_id.is_none() {
        field_errors.insert(
            "month_id".into(),
            vec!["month is required for monthly reports".into()],
        );
    }
    if field_errors.is_empty() {
        Ok(())
    } else {
        Err(ApiError::ValidationFailed { field_errors })
    }
}
