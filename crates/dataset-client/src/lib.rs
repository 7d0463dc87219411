//! Domo Dataset Client SDK
//!
//! A Rust HTTP client for the Domo dataset REST API.
//!
//! # Features
//!
//! - **Authentication**: OAuth client-credentials tokens with expiry tracking
//! - **Listing**: Paginated dataset listing and name-to-id resolution
//! - **Data**: CSV download, append and replace
//! - **Provisioning**: Dataset creation from a schema
//! - **Pluggable transport**: Swap the HTTP layer for a scripted double in tests
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use domo_dataset_client::{ClientConfig, DomoClient, UpdateMethod};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = DomoClient::new(
//!         ClientConfig::builder("https://api.domo.com")
//!             .credentials("client-id", "client-secret")
//!             .build()?
//!     )?;
//!
//!     let token = client.create_access_token().await?;
//!
//!     for ds in client.list_datasets(token.as_str()).await? {
//!         println!("{}: {} rows", ds.name(), ds.row_count.unwrap_or(0));
//!     }
//!
//!     let ids = client.dataset_ids_by_name("Sales", token.as_str()).await?;
//!     if let Some(id) = ids.first() {
//!         client
//!             .add_data_to_dataset(id, "region,amount\nEMEA,10\n", UpdateMethod::Append, token.as_str())
//!             .await?;
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! # Error Handling
//!
//! All operations return `Result<T, ClientError>`. Nothing is retried; a
//! failed call is reported as-is:
//!
//! - `Transport`: The request never got a response
//! - `Validation`: A precondition failed before anything was sent
//! - `Api`: The server answered with an unexpected status
//! - `Decode`: The response body had the wrong shape
//! - `Auth`: The token endpoint returned no usable token

pub mod auth;
pub mod client;
pub mod config;
pub mod data;
pub mod directory;
pub mod error;
pub mod provisioning;
pub mod testing;
pub mod transport;
pub mod types;

// Re-exports for convenience
pub use auth::{Credentials, Token};
pub use client::DomoClient;
pub use config::{ClientConfig, ClientConfigBuilder};
pub use directory::PAGE_SIZE;
pub use error::{ClientError, Result};
pub use transport::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use types::{Column, Dataset, DatasetDescriptor, Owner, Schema, UpdateMethod};
