//! Role check for the admin console.
//!
//! - No IO
//! - No panics
//! - Only inspects the user record the backend returned

use serde::Serialize;
use thiserror::Error;

use detailing_core::model::User;

/// Coarse role derived from the user record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Customer,
    Sysop,
}

impl Role {
    pub fn of(user: &User) -> Self {
        if user.sysop { Role::Sysop } else { Role::Customer }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AuthzError {
    #[error("forbidden: administrator role required")]
    NotSysop,
}

/// Allow only administrators.
pub fn require_sysop(user: &User) -> Result<(), AuthzError> {
    match Role::of(user) {
        Role::Sysop => Ok(()),
        Role::Customer => Err(AuthzError::NotSysop),
    }
}
