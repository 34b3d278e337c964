//! The signed-in user, passed explicitly to every gated operation.

use crate::error::{Result, VendorError};
use serde::{Deserialize, Serialize};

/// Author name recorded when the user has no display name.
pub const ANONYMOUS: &str = "Anonymous";

/// Current user as reported by the authentication collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub user_id: String,
    pub display_name: Option<String>,
}

impl Identity {
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            display_name: None,
        }
    }

    #[must_use]
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        let name = name.into();
        self.display_name = (!name.trim().is_empty()).then_some(name);
        self
    }

    /// Name shown on reviews.
    pub fn author_name(&self) -> &str {
        self.display_name
            .as_deref()
            .map(str::trim)
            .filter(|name| !name.is_empty())
            .unwrap_or(ANONYMOUS)
    }
}

/// Unwrap an optional identity or fail with [`VendorError::SignInRequired`].
pub fn require<'a>(identity: Option<&'a Identity>, action: &'static str) -> Result<&'a Identity> {
    identity.ok_or(VendorError::SignInRequired { action })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_author_name_defaults_to_anonymous() {
        assert_eq!(Identity::new("u1").author_name(), "Anonymous");
        assert_eq!(Identity::new("u1").with_name("  ").author_name(), "Anonymous");
        assert_eq!(Identity::new("u1").with_name("Asha").author_name(), "Asha");
    }

    #[test]
    fn test_require() {
        let user = Identity::new("u1");
        assert_eq!(require(Some(&user), "review").unwrap().user_id, "u1");
        assert!(matches!(
            require(None, "review"),
            Err(VendorError::SignInRequired { action: "review" })
        ));
    }
}
