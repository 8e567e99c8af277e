use tuki_core::cart::{self, CartReconciliation, CART_STORAGE_KEY};
use tuki_core::{CartItem, Product};

use crate::{FileStorage, StoreError};

/// The persisted cart. Every mutation loads, applies, and saves.
#[derive(Debug, Clone)]
pub struct CartStore {
    storage: FileStorage,
}

impl CartStore {
    #[must_use]
    pub fn new(storage: FileStorage) -> Self {
        Self { storage }
    }

    /// The stored cart; unreadable or malformed storage reads as empty.
    #[must_use]
    pub fn load(&self) -> Vec<CartItem> {
        match self.storage.get(CART_STORAGE_KEY) {
            Ok(Some(raw)) => cart::parse_cart(&raw),
            Ok(None) => Vec::new(),
            Err(e) => {
                tracing::warn!(error = %e, "could not read stored cart; starting empty");
                Vec::new()
            }
        }
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be written.
    pub fn save(&self, items: &[CartItem]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(items).map_err(|source| StoreError::Encode {
            key: CART_STORAGE_KEY.to_string(),
            source,
        })?;
        self.storage.set(CART_STORAGE_KEY, &raw)
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be written.
    pub fn add(&self, product_id: &str) -> Result<Vec<CartItem>, StoreError> {
        self.update(|items| cart::add_item(items, product_id))
    }

    /// A quantity of zero removes the item.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be written.
    pub fn set_quantity(&self, product_id: &str, quantity: u32) -> Result<Vec<CartItem>, StoreError> {
        self.update(|items| cart::set_item_quantity(items, product_id, quantity))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be written.
    pub fn remove(&self, product_id: &str) -> Result<Vec<CartItem>, StoreError> {
        self.update(|items| cart::remove_item(items, product_id))
    }

    /// # Errors
    ///
    /// Returns [`StoreError`] if the cart cannot be written.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.save(&[])
    }

    #[must_use]
    pub fn count(&self) -> u32 {
        cart::item_count(&self.load())
    }

    /// Checks the stored cart against `products`, writing back corrected
    /// quantities when anything was clamped.
    ///
    /// # Errors
    ///
    /// Returns [`StoreError`] if a corrected cart cannot be written.
    pub fn reconcile(&self, products: &[Product]) -> Result<CartReconciliation, StoreError> {
        let reconciliation = cart::reconcile(&self.load(), products);
        if reconciliation.changed {
            tracing::debug!("cart quantities adjusted to available stock");
            self.save(&reconciliation.items)?;
        }
        Ok(reconciliation)
    }

    fn update(
        &self,
        apply: impl FnOnce(Vec<CartItem>) -> Vec<CartItem>,
    ) -> Result<Vec<CartItem>, StoreError> {
        let items = apply(self.load());
        self.save(&items)?;
        Ok(items)
    }
}
