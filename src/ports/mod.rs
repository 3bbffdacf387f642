//! Ports: interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between the
//! session core and the outside world. Adapters implement these ports.
//!
//! - `Transport` - HTTP access to the backend API
//! - `SessionStorage` - durable key-value slot for the token and user snapshot

mod storage;
mod transport;

pub use storage::{SessionStorage, TOKEN_KEY, USER_KEY};
pub use transport::{ApiResponse, Transport, TransportError};
