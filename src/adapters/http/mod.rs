//! Transport adapters.

mod mock;
mod reqwest_transport;

pub use mock::{MockTransport, RecordedRequest, StubMethod};
pub use reqwest_transport::HttpTransport;
