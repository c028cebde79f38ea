//! # accountsapi
//!
//! Async client for the organisation accounts resource API.
//!
//! ## Features
//!
//! - **Operations**: create, fetch, list (one page at a time) and delete
//! - **Client-side validation**: country-specific bank identifier rules are checked
//!   before `create` touches the network
//! - **Strict decoding**: responses that parse but carry no account are errors,
//!   not zero-valued accounts
//! - **Pluggable transport**: `reqwest` by default, any [`Transport`] in tests
//!
//! ## Quick Start
//!
//! ```ignore
//! use accountsapi::{Client, Config, Resource};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_env()?;
//!     let client = Client::new(config)?;
//!
//!     let created = client
//!         .create(Resource {
//!             bank_id: "123456".into(),
//!             bank_id_code: "GBDSC".into(),
//!             bic: "BARCGB22XXX".into(),
//!             ..Resource::new("GB")
//!         })
//!         .await?;
//!
//!     let fetched = client.fetch(&created.data.id).await?;
//!     let page = client.list(0, 100).await?;
//!     println!("{} accounts on the first page", page.data.len());
//!
//!     client.delete(&fetched.data.id, fetched.data.version).await?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

mod client;
pub mod config;
mod error;
pub mod transport;

pub use accountsapi_core::{
    CodecError, Data, Links, MultiPayload, Payload, Resource, ValidationError, Violation,
    validate,
};
pub use client::{API_CONTENT_TYPE, Client};
pub use config::Config;
pub use error::{Error, Result};
pub use transport::{HttpTransport, Request, Response, Transport};
