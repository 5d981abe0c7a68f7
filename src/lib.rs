//! Data access and reconciliation layer for the utility portal.
//!
//! Sits between the web UI and the portal backend: a resilient request
//! client tolerant of the backend's inconsistent response wrappers, typed
//! endpoint clients for news, categories, reports, and search, a pure
//! reconciliation engine that turns sparse report records into a dense
//! year×month publication grid, and the publication controller governing
//! the draft/published lifecycle.
//!
//! The crate installs no tracing subscriber and owns no persistence; the
//! embedding application wires logging, the auth store, and the login
//! redirect.

pub mod auth;
pub mod config;
pub mod error;
pub mod grid;
pub mod model;
pub mod normalize;
pub mod publish;
pub mod resources;
pub mod transport;

pub use auth::{AnonymousAuth, AuthStore, CurrentUser, LoginRedirect, NoRedirect, StaticToken};
pub use config::ApiConfig;
pub use error::{ApiError, ApiResult};
pub use grid::{build_monthly_grid, compute_year_statistics};
pub use model::{
    Category, GridCell, NewsItem, Page, Report, ReportInput, ReportKind, ReportMonth,
    ReportStatus, ReportYear, SearchResults, UploadPayload, YearStatistics, YearStatus,
};
pub use normalize::{ListHints, ListPayload, PageInfo};
pub use publish::ListPatch;
pub use transport::Transport;
