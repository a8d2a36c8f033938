// Application layer - use cases and orchestration.
// The CLI talks to the backend only through SplitService.

pub mod error;
pub mod service;
pub mod session;

pub use error::*;
pub use service::*;
pub use session::*;
