//! Turns loosely-shaped backend JSON into the typed records in `tuki-core`.
//!
//! The backend is inconsistent about field names, wrapping, and value
//! encodings (numbers as strings, decimal commas, `"si"`/`"no"` flags). Each
//! adapter probes an ordered list of aliases and drops records it cannot use
//! rather than failing the whole response.

pub mod category;
pub mod collection;
pub mod dashboard;
pub mod order;
pub mod primitives;
pub mod product;
pub mod record;
pub mod status;
pub mod user;

pub use category::{adapt_categories, adapt_category};
pub use collection::{unwrap_collection, UnwrapOptions, DEFAULT_COLLECTION_KEYS};
pub use dashboard::{
    adapt_category_summaries, adapt_category_summary, adapt_order_summaries,
    adapt_order_summary, adapt_product_summaries, adapt_product_summary, status_label,
    status_tone, StatusTone,
};
pub use order::{
    adapt_admin_order, adapt_admin_orders, adapt_customer, adapt_delivery, adapt_order,
    adapt_order_line, adapt_order_lines, adapt_orders, adapt_payment, parse_timestamp,
    OrderCosts,
};
pub use primitives::{
    normalize_boolean, normalize_id, normalize_number, normalize_status_text, normalize_string,
    BooleanVocabulary,
};
pub use product::{adapt_product, adapt_product_response, adapt_products, mark_deleted};
pub use record::Record;
pub use status::{adapt_status, resolve_status};
pub use user::{adapt_session_user, resolve_role};
