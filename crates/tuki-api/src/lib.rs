//! HTTP client for the Tuki storefront backend.

pub mod client;
pub mod error;
pub mod storefront;

pub use client::{join_path, ApiClient};
pub use error::{ApiError, CONNECTION_ERROR_MESSAGE};
pub use storefront::{build_orders_url, DashboardSnapshot, TukiApi};
