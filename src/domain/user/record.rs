//! User summary as returned by the identity endpoint.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Account role chosen at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Supervisor,
    DeanOffice,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Role::Student => "student",
            Role::Supervisor => "supervisor",
            Role::DeanOffice => "dean_office",
        };
        write!(f, "{}", s)
    }
}

/// Identity summary for the current user.
///
/// Fetched from the `users/me/` endpoint after login or restore. The
/// `is_profile_completed` flag drives the forced redirect to the profile
/// page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub email: String,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub is_profile_completed: bool,
}
