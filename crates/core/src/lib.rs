//! Transport-independent support code for the Rakuten Web Service SDK
//!
//! This crate carries the pieces of the SDK that do not depend on an HTTP
//! client:
//!
//! - [`version`]: endpoint version tables and date-string normalization
//! - [`retry`]: backoff policy for transient request failures
//! - [`pacing`]: client-side request budget honoring the vendor's app quota

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod pacing;
pub mod retry;
pub mod version;

pub use pacing::{Pacer, PacingConfig};
pub use retry::RetryConfig;
pub use version::VersionMap;
