//! Session storage port.
//!
//! A durable key-value slot with the shape of browser `localStorage`: string
//! keys, string values, no error channel. Implementations that can fail
//! (e.g. file-backed) log and degrade instead of surfacing IO errors.

/// Storage key for the persisted bearer token.
pub const TOKEN_KEY: &str = "token";

/// Storage key for the persisted user snapshot.
pub const USER_KEY: &str = "user";

/// Durable key-value storage for session state.
pub trait SessionStorage: Send + Sync {
    /// Returns the stored value, if any.
    fn get(&self, key: &str) -> Option<String>;

    /// Stores or replaces a value.
    fn set(&self, key: &str, value: &str);

    /// Removes a value. Removing an absent key is a no-op.
    fn remove(&self, key: &str);
}
