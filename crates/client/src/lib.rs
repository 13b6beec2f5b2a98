//! Client SDK for the Rakuten Web Service commerce APIs
//!
//! This crate wraps the Rakuten Web Service API family (Ichiba item, genre
//! and tag search, Books and Kobo genre search, product search, auction
//! item lookup) behind one dispatching client, and covers the OAuth2
//! authorization-code token exchange.
//!
//! # Features
//!
//! - **Operation dispatch**: call any registered operation by name, or use
//!   the typed per-service accessors
//! - **Credential injection**: `applicationId` / `access_token` and
//!   `affiliateId` parameters are attached per operation
//! - **Version tables**: each operation knows its published API versions
//!   and defaults to the newest one
//! - **Iterable responses**: search responses flatten their nested
//!   `Items[].Item`-style collections into a flat entity list
//! - **Resilience**: retry with exponential backoff and client-side
//!   pacing against the vendor's per-application quota
//!
//! # Example
//!
//! ```rust,no_run
//! use rakuten_rws::{ClientConfig, Params, RwsClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::from_env().with_affiliate_id("your-affiliate-id");
//!     let client = RwsClient::with_config(config)?;
//!
//!     // By operation name...
//!     let response = client
//!         .execute("IchibaItemSearch", Params::new().set("keyword", "Rakuten"))
//!         .await?;
//!
//!     // ...or through the typed accessor; both dispatch identically.
//!     let response = client
//!         .ichiba()
//!         .item_search(Params::new().set("keyword", "Rakuten"))
//!         .await?;
//!
//!     for item in &response {
//!         println!("{}", item["itemName"]);
//!     }
//!
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod oauth;
pub mod operations;
pub mod params;
pub mod response;

pub use client::RwsClient;
pub use config::ClientConfig;
pub use error::{RwsError, RwsResult};
pub use oauth::AccessToken;
pub use params::Params;
pub use response::RwsResponse;

// Re-export the tuning knobs so callers rarely need rws-core directly.
pub use rws_core::pacing::PacingConfig;
pub use rws_core::retry::RetryConfig;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::client::RwsClient;
    pub use crate::config::ClientConfig;
    pub use crate::error::{RwsError, RwsResult};
    pub use crate::oauth::AccessToken;
    pub use crate::operations::{AuctionApi, BooksApi, IchibaApi, KoboApi, ProductApi};
    pub use crate::params::Params;
    pub use crate::response::RwsResponse;
}
