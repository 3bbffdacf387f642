//! Team membership and join-request payload interpretation.

mod status;

pub use status::{payload_indicates_membership, JoinRequestSnapshot, JoinRequestStatus};
