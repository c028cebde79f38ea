//! Account resource and the envelopes that carry it on the wire.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Resource type discriminator used by the accounts API.
pub const ACCOUNTS_TYPE: &str = "accounts";

/// Number of lines in an account name.
pub const NAME_LINES: usize = 4;

/// Number of lines in the alternative names of an account.
pub const ALTERNATIVE_NAME_LINES: usize = 3;

/// Attributes of an organisation account.
///
/// An empty string means "not provided". There is no separate unset marker, so
/// optional string fields are plain `String`s and are left off the wire when empty.
/// A `null` on the wire reads the same as an absent field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Resource {
    /// ISO 3166-1 alpha-2 country code; selects the validation rules.
    #[serde(deserialize_with = "nullable")]
    pub country: String,
    /// ISO 4217 currency code.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub base_currency: String,
    /// Local bank identifier (sort code, routing number, ...).
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub bank_id: String,
    /// Identifies the type of `bank_id` (e.g. `GBDSC`).
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub bank_id_code: String,
    /// Account number.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub account_number: String,
    /// SWIFT BIC.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub bic: String,
    /// IBAN.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub iban: String,
    /// Customer reference.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub customer_id: String,
    /// Account holder name, one entry per line.
    #[serde(with = "lines")]
    pub name: [String; NAME_LINES],
    /// Alternative account holder names, one entry per line.
    #[serde(with = "lines", skip_serializing_if = "lines::all_empty")]
    pub alternative_names: [String; ALTERNATIVE_NAME_LINES],
    /// `Personal` or `Business`.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub account_classification: String,
    /// Whether the account is held jointly.
    #[serde(skip_serializing_if = "is_false", deserialize_with = "nullable")]
    pub joint_account: bool,
    /// Opt out of account matching (confirmation of payee).
    #[serde(skip_serializing_if = "is_false", deserialize_with = "nullable")]
    pub account_matching_opt_out: bool,
    /// Additional identification, e.g. a building society roll number.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub secondary_identification: String,
    /// Whether the account has been switched away.
    #[serde(skip_serializing_if = "is_false", deserialize_with = "nullable")]
    pub switched: bool,
    /// Account status.
    #[serde(deserialize_with = "nullable")]
    pub status: String,
}

impl Resource {
    /// Creates a resource for the given country with every other field empty.
    #[must_use]
    pub fn new(country: impl Into<String>) -> Self {
        Self {
            country: country.into(),
            ..Self::default()
        }
    }

    /// Returns true when every field holds its default value.
    ///
    /// Used by the codec to tell a decoded resource apart from a response that
    /// merely parsed. A real resource whose fields are all unset looks the same.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// The `data` section of a request or response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Data {
    /// Resource id; a UUID chosen by the client on create.
    #[serde(deserialize_with = "nullable")]
    pub id: String,
    /// Owning organisation.
    #[serde(deserialize_with = "nullable")]
    pub organisation_id: String,
    /// Always [`ACCOUNTS_TYPE`] for this API.
    #[serde(rename = "type", deserialize_with = "nullable")]
    pub kind: String,
    /// Record version, incremented by the service on every change.
    #[serde(deserialize_with = "nullable")]
    pub version: u64,
    /// Creation time, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_on: Option<DateTime<Utc>>,
    /// Last modification time, assigned by the service.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modified_on: Option<DateTime<Utc>>,
    /// The account itself.
    #[serde(deserialize_with = "nullable")]
    pub attributes: Resource,
}

impl Data {
    /// Wraps a resource in a fresh, unversioned accounts envelope.
    #[must_use]
    pub fn new(
        id: impl Into<String>,
        organisation_id: impl Into<String>,
        attributes: Resource,
    ) -> Self {
        Self {
            id: id.into(),
            organisation_id: organisation_id.into(),
            kind: ACCOUNTS_TYPE.to_string(),
            version: 0,
            created_on: None,
            modified_on: None,
            attributes,
        }
    }

    /// Returns true when every field holds its default value.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Navigation links returned alongside resources.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Links {
    /// Link to the current document.
    #[serde(rename = "self", deserialize_with = "nullable")]
    pub self_link: String,
    /// First page.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub first: String,
    /// Next page.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub next: String,
    /// Last page.
    #[serde(skip_serializing_if = "String::is_empty", deserialize_with = "nullable")]
    pub last: String,
}

impl Links {
    /// Returns true when no link is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Envelope for a single resource (create and fetch).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payload {
    /// The resource envelope.
    #[serde(default, deserialize_with = "nullable")]
    pub data: Data,
    /// Navigation links.
    #[serde(default, skip_serializing_if = "Links::is_empty", deserialize_with = "nullable")]
    pub links: Links,
}

impl Payload {
    /// Creates a payload with no links, as sent on create.
    #[must_use]
    pub fn new(data: Data) -> Self {
        Self {
            data,
            links: Links::default(),
        }
    }
}

/// Envelope for a page of resources (list).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultiPayload {
    /// Resources on this page.
    pub data: Vec<Data>,
    /// Navigation links.
    #[serde(default, skip_serializing_if = "Links::is_empty", deserialize_with = "nullable")]
    pub links: Links,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
const fn is_false(value: &bool) -> bool {
    !*value
}

/// Reads an explicit `null` as the field's default, the same as an absent field.
pub(crate) fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Fixed-size name lines.
///
/// Always written as the full array. On read, shorter arrays (and `null`) are padded
/// with empty lines; longer ones are rejected.
mod lines {
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    pub fn serialize<S, const N: usize>(
        value: &[String; N],
        serializer: S,
    ) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        value.as_slice().serialize(serializer)
    }

    pub fn deserialize<'de, D, const N: usize>(deserializer: D) -> Result<[String; N], D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default();
        if raw.len() > N {
            return Err(D::Error::invalid_length(
                raw.len(),
                &format!("at most {N} lines").as_str(),
            ));
        }

        let mut out: [String; N] = std::array::from_fn(|_| String::new());
        for (slot, line) in out.iter_mut().zip(raw) {
            *slot = line;
        }
        Ok(out)
    }

    pub fn all_empty<const N: usize>(value: &[String; N]) -> bool {
        value.iter().all(String::is_empty)
    }
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

    #[test]
    fn test_resource_new_is_not_empty() {
        assert!(Resource::default().is_empty());
        assert!(!Resource::new("GB").is_empty());
    }

    #[test]
    fn test_data_new_sets_type_and_version() {
        let data = Data::new("id-1", "org-1", Resource::new("GB"));
        assert_eq!(data.kind, ACCOUNTS_TYPE);
        assert_eq!(data.version, 0);
        assert!(data.created_on.is_none());
        assert!(!data.is_empty());
    }

    #[test]
    fn test_empty_optional_fields_are_omitted() {
        let json = serde_json::to_value(Resource::new("GB")).unwrap();
        let object = json.as_object().unwrap();

        assert_eq!(object["country"], "GB");
        assert_eq!(object["status"], "");
        assert_eq!(object["name"].as_array().unwrap().len(), NAME_LINES);
        for key in [
            "bank_id",
            "bic",
            "iban",
            "alternative_names",
            "joint_account",
            "switched",
        ] {
            assert!(!object.contains_key(key), "{key} should be omitted");
        }
    }

    #[test]
    fn test_short_name_is_padded() {
        let resource: Resource =
            serde_json::from_str(r#"{"country":"GB","name":["Jane Doe"]}"#).unwrap();
        assert_eq!(resource.name[0], "Jane Doe");
        assert_eq!(resource.name[3], "");
    }

    #[test]
    fn test_null_alternative_names() {
        let resource: Resource =
            serde_json::from_str(r#"{"country":"GB","alternative_names":null}"#).unwrap();
        assert!(lines::all_empty(&resource.alternative_names));
    }

    #[test]
    fn test_too_many_name_lines_rejected() {
        let result = serde_json::from_str::<Resource>(
            r#"{"country":"GB","name":["a","b","c","d","e"]}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_null_fields_read_as_defaults() {
        let resource: Resource = serde_json::from_str(
            r#"{"country":"GB","iban":null,"joint_account":null,"status":"confirmed"}"#,
        )
        .unwrap();
        assert_eq!(resource.country, "GB");
        assert!(resource.iban.is_empty());
        assert!(!resource.joint_account);
        assert_eq!(resource.status, "confirmed");

        let links: Links = serde_json::from_str(r#"{"self":"/v1/a","next":null}"#).unwrap();
        assert!(links.next.is_empty());

        let data: Data =
            serde_json::from_str(r#"{"id":"x","version":null,"attributes":null}"#).unwrap();
        assert_eq!(data.version, 0);
        assert!(data.attributes.is_empty());
    }

    #[test]
    fn test_links_self_rename() {
        let links: Links = serde_json::from_str(r#"{"self":"/v1/a"}"#).unwrap();
        assert_eq!(links.self_link, "/v1/a");
        assert!(links.first.is_empty());
    }
}
