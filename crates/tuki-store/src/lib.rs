//! Client-side storage for the storefront: the cart and the signed-in user.
//!
//! Values are JSON documents kept one per file under the configured data
//! directory, mirroring the browser `localStorage` keys the backend's web
//! client uses.

pub mod cart;
pub mod file;
pub mod session;

use std::path::PathBuf;

use thiserror::Error;

pub use cart::CartStore;
pub use file::FileStorage;
pub use session::{SessionStore, SESSION_STORAGE_KEY};

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid storage key '{0}'")]
    InvalidKey(String),

    #[error("could not encode value for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
