//! The authenticated user, as handed in by the identity provider.
//!
//! Credentials are managed entirely outside this crate; all we hold is an
//! opaque identity plus the admin flag derived from the configured email
//! allowlist.

use shophub_core::UserId;

use crate::config::{ConfigError, get_required_env};

/// An authenticated user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    pub id: UserId,
    pub display_name: String,
    pub email: String,
}

impl CurrentUser {
    /// Read the identity the provider exported into the environment.
    ///
    /// # Environment Variables
    ///
    /// - `SHOPHUB_USER_ID` (required)
    /// - `SHOPHUB_USER_EMAIL` (required)
    /// - `SHOPHUB_USER_NAME` (optional, defaults to the email)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` when the identity is absent.
    pub fn from_env() -> Result<Self, ConfigError> {
        let id = UserId::new(get_required_env("SHOPHUB_USER_ID")?);
        let email = get_required_env("SHOPHUB_USER_EMAIL")?;
        let display_name =
            std::env::var("SHOPHUB_USER_NAME").unwrap_or_else(|_| email.clone());
        Ok(Self {
            id,
            display_name,
            email,
        })
    }

    /// Whether this user's email is on the admin allowlist.
    ///
    /// Matching is case-insensitive; the allowlist is stored lowercased.
    #[must_use]
    pub fn is_admin(&self, admin_emails: &[String]) -> bool {
        let email = self.email.to_lowercase();
        admin_emails.iter().any(|allowed| allowed == &email)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> CurrentUser {
        CurrentUser {
            id: UserId::new("u-1"),
            display_name: "Test User".to_string(),
            email: email.to_string(),
        }
    }

    #[test]
    fn test_admin_match_is_case_insensitive() {
        let allowlist = vec!["admin@shophub.com".to_string()];
        assert!(user("Admin@ShopHub.com").is_admin(&allowlist));
        assert!(user("admin@shophub.com").is_admin(&allowlist));
    }

    #[test]
    fn test_non_admin_email_is_rejected() {
        let allowlist = vec!["admin@shophub.com".to_string()];
        assert!(!user("customer@example.com").is_admin(&allowlist));
        assert!(!user("customer@example.com").is_admin(&[]));
    }
}
