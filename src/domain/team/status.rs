//! Interpretation rules for the team endpoints.
//!
//! The membership endpoint answers with either a single team object, a list
//! of teams, or an error; the join-request endpoint answers with a status
//! record. Both are read defensively: anything unexpected counts as "no".

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Decides whether a `teams/my/` payload means the user belongs to a team.
///
/// A single object counts when it carries an `"id"` key; a list counts when
/// it is non-empty. Every other shape means no membership.
pub fn payload_indicates_membership(payload: &Value) -> bool {
    match payload {
        Value::Object(map) => map.contains_key("id"),
        Value::Array(items) => !items.is_empty(),
        _ => false,
    }
}

/// State of the user's outstanding join request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum JoinRequestStatus {
    Pending,
    Accepted,
    Rejected,
    #[default]
    NoRequest,
    /// Tolerates status strings this client does not know about.
    #[serde(other)]
    Unknown,
}

impl JoinRequestStatus {
    pub fn is_pending(self) -> bool {
        matches!(self, JoinRequestStatus::Pending)
    }
}

/// Payload of `teams/my-join-request/`.
///
/// The team fields are only present while a request exists.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct JoinRequestSnapshot {
    #[serde(default)]
    pub team_id: Option<i64>,
    #[serde(default)]
    pub team_title: Option<String>,
    #[serde(default)]
    pub status: JoinRequestStatus,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_with_id_means_membership() {
        assert!(payload_indicates_membership(&json!({"id": 5, "is_owner": true})));
    }

    #[test]
    fn object_without_id_means_no_membership() {
        assert!(!payload_indicates_membership(&json!({"detail": "No team found"})));
    }

    #[test]
    fn non_empty_list_means_membership() {
        assert!(payload_indicates_membership(&json!([{"id": 1}])));
        assert!(!payload_indicates_membership(&json!([])));
    }

    #[test]
    fn scalars_mean_no_membership() {
        assert!(!payload_indicates_membership(&json!(null)));
        assert!(!payload_indicates_membership(&json!("team")));
        assert!(!payload_indicates_membership(&json!(17)));
    }

    #[test]
    fn pending_snapshot_parses_with_team_fields() {
        let snapshot: JoinRequestSnapshot = serde_json::from_value(json!({
            "team_id": 9,
            "team_title": "Distributed Tracing",
            "status": "pending",
        }))
        .unwrap();

        assert!(snapshot.status.is_pending());
        assert_eq!(snapshot.team_id, Some(9));
        assert_eq!(snapshot.team_title.as_deref(), Some("Distributed Tracing"));
    }

    #[test]
    fn no_request_snapshot_parses_without_team_fields() {
        let snapshot: JoinRequestSnapshot =
            serde_json::from_value(json!({"status": "no_request"})).unwrap();

        assert_eq!(snapshot.status, JoinRequestStatus::NoRequest);
        assert!(!snapshot.status.is_pending());
        assert!(snapshot.team_id.is_none());
    }

    #[test]
    fn unknown_status_is_tolerated() {
        let snapshot: JoinRequestSnapshot =
            serde_json::from_value(json!({"status": "escalated"})).unwrap();

        assert_eq!(snapshot.status, JoinRequestStatus::Unknown);
        assert!(!snapshot.status.is_pending());
    }
}
