//! Endpoint-specific clients built on the transport and normalizer.
//!
//! Each module knows its path templates, query-parameter names, and field
//! mappings, and nothing else. Aggregation and reconciliation happen above,
//! in [`crate::grid`] and [`crate::publish`].

/// Report years/months reference data and the parallel bundle fetch.
pub mod catalog;
/// News category list.
pub mod categories;
/// Public news articles.
pub mod news;
/// Monthly and yearly report CRUD endpoints.
pub mod reports;
/// Global search fan-in.
pub mod search;
