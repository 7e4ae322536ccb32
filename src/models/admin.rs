//! Back-office operator accounts.

use chrono::{DateTime, Utc};
use sqlx::FromRow;
use uuid::Uuid;

/// Operator role. Falls back to `Admin`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdminRole {
    Admin,
    SuperAdmin,
}

impl AdminRole {
    pub fn parse(s: &str) -> Self {
        match s {
            "super_admin" => AdminRole::SuperAdmin,
            _ => AdminRole::Admin,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            AdminRole::Admin => "admin",
            AdminRole::SuperAdmin => "super_admin",
        }
    }
}

/// A back-office operator, linked to the deployment's auth layer by
/// `user_id`. Rows with `is_active` unset are treated as revoked.
#[derive(Debug, Clone, FromRow)]
pub struct AdminUser {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_active: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub user_id: Option<Uuid>,
}

impl AdminUser {
    pub fn role(&self) -> AdminRole {
        AdminRole::parse(&self.role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parse() {
        assert_eq!(AdminRole::parse("super_admin"), AdminRole::SuperAdmin);
        assert_eq!(AdminRole::parse("admin"), AdminRole::Admin);
        assert_eq!(AdminRole::parse("intern"), AdminRole::Admin);
    }
}
