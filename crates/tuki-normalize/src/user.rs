use serde_json::Value;
use tuki_core::{Role, SessionUser};

use crate::primitives::normalize_status_text;
use crate::record::Record;

const ID: &[&str] = &["id", "usuarioId", "userId", "idUsuario"];
const NAME: &[&str] = &["nombre", "name", "nombreUsuario", "fullName"];
const EMAIL: &[&str] = &["email", "mail", "correo"];
const ROLE: &[&str] = &["rol", "role", "tipo", "perfil"];
const WRAPPERS: &[&str] = &["usuario", "user", "data"];

/// Builds the stored session from a login response.
///
/// The response may be the user itself or wrap it under `usuario`/`user`/
/// `data`. Rejected without an id.
#[must_use]
pub fn adapt_session_user(value: &Value) -> Option<SessionUser> {
    let outer = Record::new(value)?;
    let record = if outer.has_any(ID) {
        outer
    } else {
        outer.nested(WRAPPERS)?
    };

    let id = i64::try_from(record.id(ID)?).ok()?;

    Some(SessionUser {
        id,
        name: record.string(NAME).unwrap_or_default(),
        email: record.string(EMAIL).unwrap_or_default(),
        role: record.string(ROLE).map_or(Role::Customer, |r| resolve_role(&r)),
        logged_in: true,
    })
}

/// Anything other than an administrator role is a customer.
#[must_use]
pub fn resolve_role(raw: &str) -> Role {
    match normalize_status_text(raw).as_str() {
        "administrador" | "admin" | "administrator" | "role_admin" => Role::Admin,
        _ => Role::Customer,
    }
}
