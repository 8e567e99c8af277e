pub mod app_config;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod dashboard;
pub mod orders;
pub mod session;

use thiserror::Error;

pub use app_config::{ApiEndpoints, AppConfig, Endpoint, Environment, StatusUpdateMethod};
pub use cart::{CartItem, CartLine, CartReconciliation, CartSummary};
pub use catalog::{Category, CategoryInput, Product, ProductInput};
pub use config::{load_app_config, load_app_config_from_env};
pub use dashboard::{
    CategorySummary, DashboardMetrics, OrderSummary, ProductSummary, StatusCount,
};
pub use orders::{
    AdminOrder, CheckoutItem, CheckoutRequest, ClientOrder, CustomerInfo, DeliveryInfo,
    OrderLine, OrderStatus, OrderStatusUpdate, PaymentInfo,
};
pub use session::{LoginRequest, RegisterRequest, Role, SessionUser};

/// Errors raised while reading configuration from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    /// An endpoint was needed but its variable is unset.
    #[error("{what} is not configured (set {var})")]
    NotConfigured { what: &'static str, var: &'static str },
}

/// Errors raised by form-style validation before anything is sent to the backend.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Required(&'static str),

    #[error("{field} is invalid: {reason}")]
    Invalid { field: &'static str, reason: String },
}
