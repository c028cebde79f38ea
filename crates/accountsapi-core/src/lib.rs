//! # accountsapi-core
//!
//! Domain logic for the organisation accounts API, free of any I/O.
//!
//! This crate provides:
//! - The account [`Resource`] and its wire envelopes ([`Payload`], [`MultiPayload`])
//! - Per-country validation of bank identifiers ([`validate`])
//! - JSON encoding and decoding that rejects structurally empty responses
//!   ([`codec`])
//!
//! ## Example
//!
//! ```
//! use accountsapi_core::{Resource, validate};
//!
//! let account = Resource {
//!     bank_id: "123456".into(),
//!     bank_id_code: "GBDSC".into(),
//!     bic: "BARCGB22XXX".into(),
//!     ..Resource::new("GB")
//! };
//! assert!(validate(&account).is_ok());
//!
//! let short = Resource { bank_id: "1234".into(), ..account };
//! let err = validate(&short).unwrap_err();
//! assert!(err.concerns("bank_id"));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![forbid(unsafe_code)]

pub mod codec;
mod error;
mod resource;
pub mod validation;

pub use codec::{decode, decode_multi, encode};
pub use error::{CodecError, Result};
pub use resource::{
    ACCOUNTS_TYPE, ALTERNATIVE_NAME_LINES, Data, Links, MultiPayload, NAME_LINES, Payload,
    Resource,
};
pub use validation::{ValidationError, ValidationResult, Violation, validate};
