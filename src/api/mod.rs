//! Monitor REST API client
//!
//! Typed access to the backend endpoints the dashboard page consumes.
//!
//! # Endpoints
//!
//! - `GET /api/dashboard/stats` - Dashboard counters
//! - `GET /escolas/api?<query>` - Paged school listing
//! - `GET /alertas/api?<query>` - Paged alert listing
//!
//! # Example
//!
//! ```rust,no_run
//! use escola_clima::api::{ApiClient, SchoolQuery};
//!
//! # async fn run() -> Result<(), escola_clima::api::ApiError> {
//! let client = ApiClient::new("http://localhost:8080");
//! let stats = client.dashboard_stats().await?;
//! let schools = client.search_schools(&SchoolQuery::new().state("SP")).await?;
//! println!("{:?} schools, first page has {}", stats.total_escolas, schools.content.len());
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod dto;
pub mod error;

pub use client::{with_query, ApiClient, ALERTS_ENDPOINT, SCHOOLS_ENDPOINT};
pub use dto::{
    Alert, AlertLevel, AlertQuery, AlertStatus, DashboardStats, Page, School, SchoolQuery,
    SortDirection,
};
pub use error::{ApiError, ApiResult};
