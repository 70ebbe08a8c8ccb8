pub mod browser_transport;

pub use browser_transport::{BrowserBlobTransport, SignalTracker};
