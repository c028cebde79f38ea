//! JSON encoding and decoding of account envelopes.
//!
//! Decoding is two-tier. A body first has to parse into the envelope shape, and the
//! parsed envelope then has to carry an actual resource. Responses such as
//! `{"error":"..."}` parse fine but would otherwise come back as a zero-valued
//! account, so they are reported as [`CodecError::Incomplete`].

use serde::Deserialize;

use crate::error::{CodecError, Result};
use crate::resource::{Data, Links, MultiPayload, Payload, nullable};

/// Renders a single-resource payload as JSON.
///
/// # Errors
///
/// Returns [`CodecError::Encode`] if serialization fails. The data model contains
/// nothing that JSON cannot represent, so this does not happen in practice.
pub fn encode(payload: &Payload) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(CodecError::Encode)
}

/// Decodes a single-resource response body.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if the body is not a JSON payload, or
/// [`CodecError::Incomplete`] if the data section or its attributes are empty.
pub fn decode(body: &[u8]) -> Result<Payload> {
    let payload: Payload = serde_json::from_slice(body).map_err(CodecError::Malformed)?;

    if payload.data.is_empty() {
        return Err(CodecError::Incomplete("data section is empty"));
    }
    if payload.data.attributes.is_empty() {
        return Err(CodecError::Incomplete("data attributes are empty"));
    }

    Ok(payload)
}

/// Collection body as read off the wire, before the presence checks.
#[derive(Deserialize)]
struct RawMultiPayload {
    #[serde(default)]
    data: Option<Vec<Data>>,
    #[serde(default, deserialize_with = "nullable")]
    links: Links,
}

/// Decodes a paginated collection response body.
///
/// An explicit empty `data` list is a valid page with no resources.
///
/// # Errors
///
/// Returns [`CodecError::Malformed`] if the body is not a JSON collection, or
/// [`CodecError::Incomplete`] if `data` is missing or any element has empty
/// attributes. Nothing is returned for the well-formed elements in that case.
pub fn decode_multi(body: &[u8]) -> Result<MultiPayload> {
    let raw: RawMultiPayload = serde_json::from_slice(body).map_err(CodecError::Malformed)?;

    let data = raw
        .data
        .ok_or(CodecError::Incomplete("data section is missing"))?;

    if data.iter().any(|item| item.attributes.is_empty()) {
        return Err(CodecError::Incomplete("data element has empty attributes"));
    }

    Ok(MultiPayload {
        data,
        links: raw.links,
    })
}

#[cfg(test)]
#[allow(
    clippy::unwrap_used,
    clippy::redundant_clone,
    clippy::manual_string_new,
    clippy::needless_collect,
    clippy::unreadable_literal,
    clippy::used_underscore_items,
    clippy::similar_names
)]
mod tests {
    use super::*;
    use crate::resource::Resource;

    #[test]
    fn test_decode_not_json() {
        let err = decode(b"notajson").unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_decode_unrelated_json() {
        let err = decode(br#"{"error":"a string, but not a payload"}"#).unwrap_err();
        assert!(err.is_incomplete());
    }

    #[test]
    fn test_decode_missing_attributes() {
        let err = decode(br#"{"data":{"id":"x"}}"#).unwrap_err();
        assert!(err.is_incomplete());
        assert_eq!(err.to_string(), "incomplete payload: data attributes are empty");
    }

    #[test]
    fn test_decode_null_sections_are_incomplete() {
        let err = decode(br#"{"data":null}"#).unwrap_err();
        assert!(err.is_incomplete());
        assert_eq!(err.to_string(), "incomplete payload: data section is empty");

        let err = decode(br#"{"data":{"id":"x","attributes":null}}"#).unwrap_err();
        assert!(err.is_incomplete());
        assert_eq!(err.to_string(), "incomplete payload: data attributes are empty");
    }

    #[test]
    fn test_decode_null_fields() {
        let body = br#"{"data":{"id":"x","attributes":{"country":"GB","iban":null,"status":"confirmed"}},"links":{"self":"/v1/x","next":null}}"#;
        let payload = decode(body).unwrap();
        assert!(payload.data.attributes.iban.is_empty());
        assert_eq!(payload.data.attributes.status, "confirmed");
        assert!(payload.links.next.is_empty());
    }

    #[test]
    fn test_decode_multi_null_fields() {
        let body = br#"{"data":[{"id":"a","attributes":{"country":"GB","joint_account":null}}],"links":null}"#;
        let multi = decode_multi(body).unwrap();
        assert!(!multi.data[0].attributes.joint_account);
        assert!(multi.links.is_empty());
    }

    #[test]
    fn test_decode_minimal_resource() {
        let payload = decode(br#"{"data":{"id":"x","attributes":{"country":"GB"}}}"#).unwrap();
        assert_eq!(payload.data.id, "x");
        assert_eq!(payload.data.attributes.country, "GB");
        assert!(payload.links.is_empty());
    }

    #[test]
    fn test_decode_multi_empty_list() {
        let multi = decode_multi(br#"{"data":[]}"#).unwrap();
        assert!(multi.data.is_empty());
    }

    #[test]
    fn test_decode_multi_missing_data() {
        assert!(decode_multi(br#"{"error":"not payload"}"#)
            .unwrap_err()
            .is_incomplete());
        assert!(decode_multi(br#"{"data":null}"#).unwrap_err().is_incomplete());
    }

    #[test]
    fn test_decode_multi_wrong_shapes() {
        assert!(decode_multi(br#"{"data":"not a json array"}"#)
            .unwrap_err()
            .is_malformed());
        assert!(decode_multi(br#"{"data":["not an object"]}"#)
            .unwrap_err()
            .is_malformed());
        assert!(decode_multi(b"notajson").unwrap_err().is_malformed());
    }

    #[test]
    fn test_decode_multi_one_bad_element() {
        let body = br#"{"data":[
            {"id":"a","attributes":{"country":"GB"}},
            {"id":"x"}
        ]}"#;
        assert!(decode_multi(body).unwrap_err().is_incomplete());
        assert!(decode_multi(br#"{"data":[{"randomkey":"notdata"}]}"#)
            .unwrap_err()
            .is_incomplete());
    }

    #[test]
    fn test_encode_create_payload_shape() {
        let payload = Payload::new(Data::new("id-1", "org-1", Resource::new("GB")));
        let value: serde_json::Value = serde_json::from_slice(&encode(&payload).unwrap()).unwrap();

        assert_eq!(value["data"]["type"], "accounts");
        assert_eq!(value["data"]["version"], 0);
        assert!(value["data"].get("created_on").is_none());
        assert!(value.get("links").is_none());
    }
}
