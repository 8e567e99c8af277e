//! Typed storefront operations on top of [`ApiClient`].
//!
//! Every method resolves its endpoint from configuration first, so an unset
//! variable surfaces as [`ApiError::Config`] naming it before any request
//! is made.

use reqwest::Method;
use serde_json::Value;
use tuki_core::{
    AdminOrder, ApiEndpoints, AppConfig, Category, CategoryInput, CategorySummary,
    CheckoutRequest, ClientOrder, Endpoint, LoginRequest, OrderStatus, OrderStatusUpdate,
    OrderSummary, Product, ProductInput, ProductSummary, RegisterRequest, SessionUser,
    StatusUpdateMethod,
};
use tuki_normalize::{
    adapt_admin_orders, adapt_categories, adapt_category, adapt_category_summaries,
    adapt_order_summaries, adapt_orders, adapt_product, adapt_product_response,
    adapt_product_summaries, adapt_products, adapt_session_user, mark_deleted,
};

use crate::client::{encode_segment, join_path, ApiClient};
use crate::error::ApiError;

const USER_ID_PLACEHOLDERS: &[&str] = &["{userId}", ":userId", "{id}", ":id"];

/// Outcome of loading the three dashboard collections.
///
/// Each section keeps its own result so one failing endpoint does not hide
/// the others.
#[derive(Debug)]
pub struct DashboardSnapshot {
    pub categories: Result<Vec<CategorySummary>, ApiError>,
    pub products: Result<Vec<ProductSummary>, ApiError>,
    pub orders: Result<Vec<OrderSummary>, ApiError>,
}

#[derive(Debug, Clone)]
pub struct TukiApi {
    http: ApiClient,
    endpoints: ApiEndpoints,
    status_method: StatusUpdateMethod,
}

impl TukiApi {
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the HTTP client cannot be constructed.
    pub fn from_config(config: &AppConfig) -> Result<Self, ApiError> {
        Ok(Self::new(
            ApiClient::from_config(config)?,
            config.endpoints.clone(),
            config.status_update_method,
        ))
    }

    #[must_use]
    pub fn new(http: ApiClient, endpoints: ApiEndpoints, status_method: StatusUpdateMethod) -> Self {
        Self {
            http,
            endpoints,
            status_method,
        }
    }

    fn endpoint(&self, endpoint: Endpoint) -> Result<&str, ApiError> {
        Ok(self.endpoints.require(endpoint)?)
    }

    fn item_url(&self, endpoint: Endpoint, id: u64) -> Result<String, ApiError> {
        Ok(join_path(self.endpoint(endpoint)?, &id.to_string()))
    }

    fn reactivate_url(&self, endpoint: Endpoint, id: u64) -> Result<String, ApiError> {
        Ok(format!("{}/reactivar", self.item_url(endpoint, id)?))
    }

    // Categories

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        let body = self.http.get(self.endpoint(Endpoint::Categories)?).await?;
        Ok(adapt_categories(&body))
    }

    /// Returns the created category when the backend echoes it back.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn create_category(&self, input: &CategoryInput) -> Result<Option<Category>, ApiError> {
        let body = self
            .http
            .post(self.endpoint(Endpoint::Categories)?, input)
            .await?;
        Ok(adapt_category(&body))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn update_category(
        &self,
        id: u64,
        input: &CategoryInput,
    ) -> Result<Option<Category>, ApiError> {
        let url = self.item_url(Endpoint::Categories, id)?;
        let body = self.http.put(&url, input).await?;
        Ok(adapt_category(&body))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn delete_category(&self, id: u64) -> Result<Option<String>, ApiError> {
        self.http
            .delete(&self.item_url(Endpoint::Categories, id)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn restore_category(&self, id: u64) -> Result<Option<String>, ApiError> {
        let url = self.reactivate_url(Endpoint::Categories, id)?;
        self.http.command::<Value>(Method::PATCH, &url, None).await
    }

    // Products

    /// The public catalog listing.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn products(&self) -> Result<Vec<Product>, ApiError> {
        let body = self.http.get(self.endpoint(Endpoint::Products)?).await?;
        Ok(adapt_products(&body))
    }

    /// Products listed under `{products}/eliminados`.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn deleted_products(&self) -> Result<Vec<Product>, ApiError> {
        let url = join_path(self.endpoint(Endpoint::Products)?, "eliminados");
        let body = self.http.get(&url).await?;
        Ok(adapt_products(&body))
    }

    /// The back-office listing: every product, with deleted ones marked
    /// unavailable. A failing deleted lookup is logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the main listing cannot be loaded.
    pub async fn admin_products(&self) -> Result<Vec<Product>, ApiError> {
        let products = self.products().await?;
        match self.deleted_products().await {
            Ok(deleted) => Ok(mark_deleted(products, &deleted)),
            Err(e) => {
                tracing::warn!(error = %e, "could not load deleted products; showing listing as-is");
                Ok(products)
            }
        }
    }

    /// Loads one product, falling back to the full listing when the detail
    /// endpoint fails or returns something else.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if neither source contains the product.
    /// - The listing's error if the fallback request itself fails.
    pub async fn product(&self, id: u64) -> Result<Product, ApiError> {
        let url = self.item_url(Endpoint::Products, id)?;
        match self.http.get(&url).await {
            Ok(body) => {
                if let Some(product) = adapt_product_response(&body, id) {
                    return Ok(product);
                }
            }
            Err(e) => {
                tracing::debug!(product_id = id, error = %e, "detail lookup failed; trying listing");
            }
        }

        let listing = self.http.get(self.endpoint(Endpoint::Products)?).await?;
        adapt_product_response(&listing, id)
            .ok_or_else(|| ApiError::NotFound(format!("product {id} is not available")))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn create_product(&self, input: &ProductInput) -> Result<Option<Product>, ApiError> {
        let body = self
            .http
            .post(self.endpoint(Endpoint::Products)?, input)
            .await?;
        Ok(adapt_product(&body))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn update_product(
        &self,
        id: u64,
        input: &ProductInput,
    ) -> Result<Option<Product>, ApiError> {
        let url = self.item_url(Endpoint::Products, id)?;
        let body = self.http.put(&url, input).await?;
        Ok(adapt_product(&body))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn delete_product(&self, id: u64) -> Result<Option<String>, ApiError> {
        self.http
            .delete(&self.item_url(Endpoint::Products, id)?)
            .await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn restore_product(&self, id: u64) -> Result<Option<String>, ApiError> {
        let url = self.reactivate_url(Endpoint::Products, id)?;
        self.http.command::<Value>(Method::PATCH, &url, None).await
    }

    /// Reactivates or soft-deletes a product.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn set_product_availability(
        &self,
        id: u64,
        available: bool,
    ) -> Result<Option<String>, ApiError> {
        if available {
            self.restore_product(id).await
        } else {
            self.delete_product(id).await
        }
    }

    // Orders

    /// Orders placed by `user_id`, newest first.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the request fails.
    pub async fn client_orders(&self, user_id: i64) -> Result<Vec<ClientOrder>, ApiError> {
        let template = self.endpoint(Endpoint::ClientOrders)?;
        let url = build_orders_url(template, &user_id.to_string());
        let body = self.http.get(&url).await?;
        Ok(adapt_orders(&body))
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if neither orders endpoint is set or the
    /// request fails.
    pub async fn admin_orders(&self) -> Result<Vec<AdminOrder>, ApiError> {
        let body = self.http.get(self.endpoint(Endpoint::AdminOrders)?).await?;
        Ok(adapt_admin_orders(&body))
    }

    /// Sends `{pedidoId, nuevoEstado}` with the configured method.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if no status endpoint resolves or the backend
    /// rejects the change.
    pub async fn update_order_status(
        &self,
        order_id: u64,
        status: OrderStatus,
    ) -> Result<Option<String>, ApiError> {
        let url = self.endpoint(Endpoint::AdminOrderStatus)?;
        let method = match self.status_method {
            StatusUpdateMethod::Patch => Method::PATCH,
            StatusUpdateMethod::Put => Method::PUT,
        };
        let update = OrderStatusUpdate::new(order_id, status);
        tracing::debug!(order_id, status = %update.nuevo_estado, %method, "updating order status");
        self.http.command(method, url, Some(&update)).await
    }

    /// # Errors
    ///
    /// Returns an [`ApiError`] if the endpoint is unset or the backend
    /// rejects the order.
    pub async fn checkout(&self, request: &CheckoutRequest) -> Result<Value, ApiError> {
        self.http
            .post(self.endpoint(Endpoint::Checkout)?, request)
            .await
    }

    // Users

    /// Signs in and returns the session to store.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Backend`] with the backend's message on bad credentials.
    /// - [`ApiError::UnexpectedResponse`] if the response holds no user id.
    pub async fn login(&self, request: &LoginRequest) -> Result<SessionUser, ApiError> {
        let body = self
            .http
            .post(self.endpoint(Endpoint::UsersLogin)?, request)
            .await?;
        adapt_session_user(&body).ok_or_else(|| ApiError::UnexpectedResponse {
            context: "login".to_string(),
        })
    }

    /// Creates the account, then signs in with the same credentials.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if either step fails.
    pub async fn register(&self, request: &RegisterRequest) -> Result<SessionUser, ApiError> {
        self.http
            .post(self.endpoint(Endpoint::UsersCreate)?, request)
            .await?;
        self.login(&request.login()).await
    }

    // Dashboard

    /// Loads categories, products, and orders concurrently.
    pub async fn dashboard(&self) -> DashboardSnapshot {
        let (categories, products, orders) = tokio::join!(
            self.summary_collection(Endpoint::Categories, adapt_category_summaries),
            self.summary_collection(Endpoint::Products, adapt_product_summaries),
            self.summary_collection(Endpoint::AdminOrders, adapt_order_summaries),
        );
        DashboardSnapshot {
            categories,
            products,
            orders,
        }
    }

    async fn summary_collection<T>(
        &self,
        endpoint: Endpoint,
        adapt: fn(&Value) -> Vec<T>,
    ) -> Result<Vec<T>, ApiError> {
        let body = self.http.get(self.endpoint(endpoint)?).await?;
        Ok(adapt(&body))
    }
}

/// Fills the user id into the client orders URL.
///
/// The first placeholder found is replaced; without one the id is appended
/// as a `userId` query parameter when the URL already has a query, or as a
/// path segment otherwise.
#[must_use]
pub fn build_orders_url(template: &str, user_id: &str) -> String {
    let encoded = encode_segment(user_id);

    if let Some(placeholder) = USER_ID_PLACEHOLDERS
        .iter()
        .find(|p| template.contains(*p))
    {
        return template.replacen(*placeholder, &encoded, 1);
    }

    if template.contains('?') {
        let separator = if template.ends_with('?') || template.ends_with('&') {
            ""
        } else {
            "&"
        };
        return format!("{template}{separator}userId={encoded}");
    }

    if template.ends_with('/') {
        format!("{template}{encoded}")
    } else {
        format!("{template}/{encoded}")
    }
}
