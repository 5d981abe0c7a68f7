//! Monthly and yearly report endpoint wrappers.

use crate::error::{ApiError, ApiResult};
use crate::model::{Report, ReportInput, ReportStatus, UploadPayload};
use crate::normalize::{ListHints, decode_item, decode_items, normalize_item, normalize_list};
use crate::transport::Transport;
use reqwest::multipart::{Form, Part};
use serde_json::{Value, json};

const LIST_HINTS: ListHints<'static> = ListHints {
    page: None,
    domain_keys: &["reports"],
};

/// All monthly reports of one year, drafts included. The admin listing and
/// the reconciliation pass both consume this.
pub async fn monthly_by_year(t: &Transport, year_id: i64) -> ApiResult<Vec<Report>> {
    let raw = t
        .get(&format!("/reports/monthly?year_id={year_id}"))
        .await?;
    decode_items(normalize_list(&raw, &LIST_HINTS)?.items)
}

/// All yearly reports.
pub async fn yearly(t: &Transport) -> ApiResult<Vec<Report>> {
    let raw = t.get("/reports/yearly").await?;
    decode_items(normalize_list(&raw, &LIST_HINTS)?.items)
}

/// Create a report. Multipart when a file is attached, plain JSON otherwise.
pub async fn create(t: &Transport, input: &ReportInput) -> ApiResult<Report> {
    let raw = match &input.file {
        Some(file) => t.post_multipart("/reports", form_body(input, file)?).await?,
        None => t.post("/reports", &json_body(input)).await?,
    };
    decode_item(normalize_item(&raw)?)
}

/// Update a report. An input without a file leaves the stored file as is.
pub async fn update(t: &Transport, id: i64, input: &ReportInput) -> ApiResult<Report> {
    let path = format!("/reports/{id}");
    let raw = match &input.file {
        Some(file) => t.put_multipart(&path, form_body(input, file)?).await?,
        None => t.put(&path, &json_body(input)).await?,
    };
    decode_item(normalize_item(&raw)?)
}

/// Publish or unpublish via the dedicated status endpoints. Kept separate
/// from [`update`] so status transitions stay atomic, auditable operations
/// server-side.
pub async fn set_status(t: &Transport, id: i64, target: ReportStatus) -> ApiResult<Report> {
    let action = if target.is_published() {
        "publish"
    } else {
        "unpublish"
    };
    let raw = t.post(&format!("/reports/{id}/{action}"), &json!({})).await?;
    decode_item(normalize_item(&raw)?)
}

/// Hard delete. A second delete of the same id surfaces as `NotFound`.
pub async fn delete(t: &Transport, id: i64) -> ApiResult<()> {
    t.delete(&format!("/reports/{id}")).await?;
    Ok(())
}

/// JSON body for create/update without an attachment.
fn json_body(input: &ReportInput) -> Value {
    let mut body = serde_json::Map::new();
    body.insert("type".into(), json!(input.kind.as_str()));
    body.insert("title".into(), json!(input.title));
    if let Some(description) = &input.description {
        body.insert("description".into(), json!(description));
    }
    if let Some(year_id) = input.year_id {
        body.insert("year_id".into(), json!(year_id));
    }
    if let Some(month_id) = input.month_id {
        body.insert("month_id".into(), json!(month_id));
    }
    if let Some(date) = input.report_date {
        body.insert("report_date".into(), json!(date.to_string()));
    }
    if let Some(status) = input.status {
        body.insert("status".into(), json!(status.as_str()));
    }
    Value::Object(body)
}

/// Multipart body for create/update with an attachment. No explicit
/// content type is set on the request; reqwest supplies the boundary.
fn form_body(input: &ReportInput, file: &UploadPayload) -> ApiResult<Form> {
    let mut form = Form::new()
        .text("type", input.kind.as_str())
        .text("title", input.title.clone());
    if let Some(description) = &input.description {
        form = form.text("description", description.clone());
    }
    if let Some(year_id) = input.year_id {
        form = form.text("year_id", year_id.to_string());
    }
    if let Some(month_id) = input.month_id {
        form = form.text("month_id", month_id.to_string());
    }
    if let Some(date) = input.report_date {
        form = form.text("report_date", date.to_string());
    }
    if let Some(status) = input.status {
        form = form.text("status", status.as_str());
    }
    let part = Part::bytes(file.bytes.clone())
        .file_name(file.file_name.clone())
        .mime_str(&file.mime)
        .map_err(|e| ApiError::Unknown(format!("invalid upload mime type: {e}")))?;
    Ok(form.part("file", part))
}
