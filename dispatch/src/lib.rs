//! OweMe - debt-notice dispatch service.
//!
//! A stateless HTTP service that turns a drafted debt-collection notice into
//! an email. Each request runs one linear pipeline:
//!
//! ```text
//! POST /api/notices → verify token → fetch gif (best-effort) → compose → deliver
//! ```
//!
//! Verification gates delivery; the GIF lookup never does. The front-end is
//! just another HTTP caller and lives in a separate repository.

pub mod compose;
pub mod config;
pub mod deliver;
pub mod dispatch;
pub mod enrich;
pub mod verify;
pub mod web;

// Re-export commonly used types
pub use compose::ComposedMessage;
pub use config::Config;
pub use dispatch::{DispatchOutcome, NoticeRequest};
pub use web::AppState;
