//! User identity and profile payloads.

mod profile;
mod record;

pub use profile::ProfileRecord;
pub use record::{Role, UserSummary};
