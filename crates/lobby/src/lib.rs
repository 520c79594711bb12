//! Game lifecycle operations.
//!
//! The transport layer resolves a caller identity, then drives everything
//! through [`Lobby`]: create, list, find, join, forfeit, delete, and move
//! application. Every mutating operation persists before returning, every
//! return path is concealed for the caller, and every rejection carries
//! the current concealed state so clients can re-render without a second
//! fetch.
//!
//! ## Collaborators
//!
//! - [`Directory`] — External player accounts, looked up for denormalized
//!   snapshots on rendered views
//! - `GameStore` — Versioned record persistence; stale writes surface as
//!   retryable conflicts
mod directory;
mod lobby;
mod rejection;

pub use directory::*;
pub use lobby::*;
pub use rejection::*;
