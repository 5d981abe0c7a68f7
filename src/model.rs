//! Canonical domain types for the portal API.
//!
//! Deserialization is deliberately tolerant: the backend mixes snake_case
//! and camelCase across endpoint versions, so fields carry aliases and
//! everything the UI can live without is optional with a default.

use crate::normalize::PageInfo;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Publication state of a report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportStatus {
    Draft,
    Published,
}

impl ReportStatus {
    pub fn is_published(self) -> bool {
        matches!(self, ReportStatus::Published)
    }

    /// Wire form of the status, as the backend spells it.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportStatus::Draft => "draft",
            ReportStatus::Published => "published",
        }
    }
}

/// Position of a report year relative to today, as classified upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum YearStatus {
    Past,
    Current,
    Future,
}

/// A publication year administered in the back office.
#[derive(Debug, Clone, Deserialize)]
pub struct ReportYear {
    pub id: i64,
    #[serde(alias = "yearValue", alias = "year")]
    pub year_value: i32,
    pub status: YearStatus,
}

/// One entry of the static month reference list.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ReportMonth {
    pub id: u8,
    pub name: String,
}

/// A monthly or yearly operational report.
///
/// `month_id` is `None` for the yearly variant. Ids are always
/// server-assigned; this layer never invents them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Report {
    pub id: i64,
    #[serde(alias = "yearId")]
    pub year_id: i64,
    #[serde(default, alias = "monthId")]
    pub month_id: Option<u8>,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub status: ReportStatus,
    #[serde(default, alias = "fileUrl")]
    pub file_url: Option<String>,
    #[serde(default, alias = "fileName")]
    pub file_name: Option<String>,
    #[serde(default, alias = "fileSizeBytes", alias = "file_size")]
    pub file_size_bytes: Option<u64>,
    #[serde(default, alias = "reportDate")]
    pub report_date: Option<NaiveDate>,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "createdBy")]
    pub created_by: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, alias = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Which report collection an input targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportKind {
    Monthly,
    Yearly,
}

impl ReportKind {
    /// Wire form of the kind, used in the `type` field.
    pub fn as_str(self) -> &'static str {
        match self {
            ReportKind::Monthly => "monthly",
            ReportKind::Yearly => "yearly",
        }
    }
}

/// File attached to a report create/update call.
#[derive(Debug, Clone)]
pub struct UploadPayload {
    pub file_name: String,
    pub mime: String,
    pub bytes: Vec<u8>,
}

/// Caller-supplied fields for creating or updating a report.
///
/// An omitted `file` on update leaves the stored file untouched. An
/// omitted `status` defaults to draft on create.
#[derive(Debug, Clone)]
pub struct ReportInput {
    pub kind: ReportKind,
    pub title: String,
    pub description: Option<String>,
    pub year_id: Option<i64>,
    pub month_id: Option<u8>,
    pub report_date: Option<NaiveDate>,
    pub status: Option<ReportStatus>,
    pub file: Option<UploadPayload>,
}

/// One cell of the dense year×month publication grid. Derived, never
/// persisted, rebuilt fresh on every reconciliation pass.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub year: i32,
    pub month_id: u8,
    pub month_name: String,
    /// Stable key for UI lists. The report id when a report exists, else a
    /// synthetic `"{year}-{month_id}"` never sent back to the backend.
    pub ui_key: String,
    pub report: Option<Report>,
    /// True only for a published report.
    pub available: bool,
}

/// Aggregate counts over all reports of a year, not just the current page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct YearStatistics {
    pub total_reports: u32,
    pub published_reports: u32,
    pub draft_reports: u32,
    /// Rounded percentage of published reports; 0 when there are none.
    pub completion_percent: u8,
}

/// A news article on the public site.
#[derive(Debug, Clone, Deserialize)]
pub struct NewsItem {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub excerpt: Option<String>,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default, alias = "imageUrl", alias = "image")]
    pub image_url: Option<String>,
    #[serde(default, alias = "categoryId")]
    pub category_id: Option<i64>,
    #[serde(default, alias = "publishedAt")]
    pub published_at: Option<DateTime<Utc>>,
}

/// A news category.
#[derive(Debug, Clone, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
}

/// One page of a list endpoint.
#[derive(Debug, Clone)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub pagination: Option<PageInfo>,
}

impl<T> Page<T> {
    /// Whether another page exists. Absent metadata means no.
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(|p| p.has_more)
    }
}

/// Result of the global search fan-in. All three collections are always
/// present; upstream omissions become empty vectors, never missing keys.
/// Elements keep their upstream shape because the three collections are
/// heterogeneous.
#[derive(Debug, Clone, Default)]
pub struct SearchResults {
    pub news: Vec<serde_json::Value>,
    pub monthly_reports: Vec<serde_json::Value>,
    pub yearly_reports: Vec<serde_json::Value>,
}
