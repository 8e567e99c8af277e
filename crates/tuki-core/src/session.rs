use serde::{Deserialize, Serialize};

use crate::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMINISTRADOR")]
    Admin,
    #[serde(rename = "CLIENTE")]
    Customer,
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Admin => write!(f, "ADMINISTRADOR"),
            Role::Customer => write!(f, "CLIENTE"),
        }
    }
}

/// The signed-in user as kept in client storage under `userData`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    pub logged_in: bool,
}

impl SessionUser {
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] when either field is blank.
    pub fn new(email: &str, password: &str) -> Result<Self, ValidationError> {
        let email = email.trim();
        if email.is_empty() {
            return Err(ValidationError::Required("email"));
        }
        if password.trim().is_empty() {
            return Err(ValidationError::Required("password"));
        }
        Ok(Self {
            email: email.to_string(),
            password: password.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegisterRequest {
    pub nombre: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    /// Trims every field; all three are required.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::Required`] naming the first blank field.
    pub fn new(name: &str, email: &str, password: &str) -> Result<Self, ValidationError> {
        let field = |label: &'static str, value: &str| {
            let value = value.trim();
            if value.is_empty() {
                Err(ValidationError::Required(label))
            } else {
                Ok(value.to_string())
            }
        };
        Ok(Self {
            nombre: field("name", name)?,
            email: field("email", email)?,
            password: field("password", password)?,
        })
    }

    /// Credentials for the automatic sign-in after registering.
    #[must_use]
    pub fn login(&self) -> LoginRequest {
        LoginRequest {
            email: self.email.clone(),
            password: self.password.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_user_uses_storage_field_names() {
        let user = SessionUser {
            id: 4,
            name: "Ana".into(),
            email: "ana@tuki.test".into(),
            role: Role::Admin,
            logged_in: true,
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "id": 4,
                "nombre": "Ana",
                "email": "ana@tuki.test",
                "rol": "ADMINISTRADOR",
                "loggedIn": true
            })
        );
        let back: SessionUser = serde_json::from_value(json).unwrap();
        assert_eq!(back, user);
        assert!(back.is_admin());
    }

    #[test]
    fn login_requires_both_fields() {
        assert_eq!(
            LoginRequest::new("  ", "x"),
            Err(ValidationError::Required("email"))
        );
        assert_eq!(
            LoginRequest::new("a@b.c", ""),
            Err(ValidationError::Required("password"))
        );
        let login = LoginRequest::new(" a@b.c ", "secret").unwrap();
        assert_eq!(login.email, "a@b.c");
    }

    #[test]
    fn register_trims_and_derives_login() {
        let register = RegisterRequest::new(" Ana ", "ana@b.c ", " pw ").unwrap();
        assert_eq!(register.nombre, "Ana");
        assert_eq!(register.password, "pw");
        assert_eq!(register.login().email, "ana@b.c");
        assert_eq!(
            RegisterRequest::new("", "a", "b"),
            Err(ValidationError::Required("name"))
        );
    }
}
