use std::path::PathBuf;

use crate::app_config::{ApiEndpoints, AppConfig, Endpoint, Environment, StatusUpdateMethod};
use crate::ConfigError;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a value is present but invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Empty and whitespace-only values count as unset. Endpoint URLs are all
/// optional; a missing one only fails when a command needs it.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let optional = |var: &str| -> Option<String> {
        lookup(var)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let or_default =
        |var: &str, default: &str| -> String { optional(var).unwrap_or_else(|| default.to_string()) };

    let endpoint = |endpoint: Endpoint| -> Result<Option<String>, ConfigError> {
        let var = endpoint.env_var();
        optional(var)
            .map(|raw| {
                url::Url::parse(&raw)
                    .map(|_| raw.clone())
                    .map_err(|e| ConfigError::InvalidEnvVar {
                        var: var.to_string(),
                        reason: e.to_string(),
                    })
            })
            .transpose()
    };

    let env = parse_environment(&or_default("TUKI_ENV", "development"))?;
    let log_level = or_default("TUKI_LOG_LEVEL", "info");
    let data_dir = PathBuf::from(or_default("TUKI_DATA_DIR", "./.tuki"));
    let user_agent = or_default("TUKI_USER_AGENT", "tuki/0.1 (storefront-client)");

    let request_timeout_secs = optional("TUKI_REQUEST_TIMEOUT_SECS")
        .map(|raw| {
            raw.parse::<u64>().map_err(|e| ConfigError::InvalidEnvVar {
                var: "TUKI_REQUEST_TIMEOUT_SECS".to_string(),
                reason: e.to_string(),
            })
        })
        .transpose()?;

    let shipping_cost = parse_shipping_cost(&or_default("TUKI_SHIPPING_COST", "500"))?;
    let status_update_method =
        parse_status_method(&or_default("TUKI_API_ADMIN_ORDER_STATUS_METHOD", "PATCH"))?;

    let endpoints = ApiEndpoints {
        categories: endpoint(Endpoint::Categories)?,
        products: endpoint(Endpoint::Products)?,
        client_orders: endpoint(Endpoint::ClientOrders)?,
        admin_orders: endpoint(Endpoint::AdminOrders)?,
        admin_order_status: endpoint(Endpoint::AdminOrderStatus)?,
        checkout: endpoint(Endpoint::Checkout)?,
        users_login: endpoint(Endpoint::UsersLogin)?,
        users_create: endpoint(Endpoint::UsersCreate)?,
    };

    Ok(AppConfig {
        env,
        log_level,
        data_dir,
        user_agent,
        request_timeout_secs,
        shipping_cost,
        status_update_method,
        endpoints,
    })
}

/// Parse a string into an `Environment` variant.
///
/// # Errors
///
/// Returns `ConfigError::InvalidEnvVar` for unrecognized values.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TUKI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

/// Only `PUT` switches away from the default; anything else is rejected.
fn parse_status_method(s: &str) -> Result<StatusUpdateMethod, ConfigError> {
    match s.to_ascii_uppercase().as_str() {
        "PATCH" => Ok(StatusUpdateMethod::Patch),
        "PUT" => Ok(StatusUpdateMethod::Put),
        other => Err(ConfigError::InvalidEnvVar {
            var: "TUKI_API_ADMIN_ORDER_STATUS_METHOD".to_string(),
            reason: format!("expected PATCH or PUT, got '{other}'"),
        }),
    }
}

fn parse_shipping_cost(s: &str) -> Result<f64, ConfigError> {
    let invalid = |reason: String| ConfigError::InvalidEnvVar {
        var: "TUKI_SHIPPING_COST".to_string(),
        reason,
    };
    let value = s.parse::<f64>().map_err(|e| invalid(e.to_string()))?;
    if !value.is_finite() || value < 0.0 {
        return Err(invalid(format!("must be a non-negative amount, got {s}")));
    }
    Ok(value)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
