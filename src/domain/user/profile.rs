//! Extended profile payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Full profile record for the current user.
///
/// The backend serializes a different field set per role (students carry
/// skills and course data, supervisors carry capacity data), so everything
/// beyond the completion flag is kept as an opaque field map for the UI to
/// render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    #[serde(default)]
    pub is_profile_completed: bool,

    /// Role-specific remainder of the payload.
    #[serde(flatten)]
    pub fields: serde_json::Map<String, Value>,
}

impl ProfileRecord {
    /// Looks up a role-specific field by name.
    pub fn field(&self, name: &str) -> Option<&Value> {
        self.fields.get(name)
    }
}
