//! Country-specific account validation.
//!
//! Every supported country has a [rule set](rules) checking a subset of the bank
//! identifiers on a [`Resource`]. All failing checks are reported together so a
//! caller can fix a record in one pass.

mod patterns;
mod rules;

pub use rules::{bank_id_codes, supported_countries};

use std::fmt;

use crate::resource::Resource;

/// A single broken rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Violation {
    /// BIC is required but empty.
    BicRequired,
    /// IBAN was given for a country that does not use one.
    IbanNotSupported {
        /// The rejected IBAN.
        iban: String,
    },
    /// Bank id is required but empty.
    BankIdRequired {
        /// Expected shape.
        expected: &'static str,
    },
    /// Bank id does not have the country's shape.
    BankIdFormat {
        /// The rejected bank id.
        bank_id: String,
        /// Expected shape.
        expected: &'static str,
    },
    /// Bank id was given for a country where it must be empty.
    BankIdNotSupported {
        /// The rejected bank id.
        bank_id: String,
    },
    /// Bank id code differs from the country's code.
    BankIdCodeMismatch {
        /// Code required for the country.
        expected: &'static str,
        /// Code that was supplied.
        actual: String,
    },
    /// Bank id code was given for a country where it must be empty.
    BankIdCodeNotSupported {
        /// Code that was supplied.
        actual: String,
    },
    /// Account number does not have the country's shape.
    AccountNumberFormat {
        /// The rejected account number.
        account_number: String,
        /// Expected shape.
        expected: &'static str,
    },
}

impl Violation {
    /// Get the field name this violation relates to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::BicRequired => "bic",
            Self::IbanNotSupported { .. } => "iban",
            Self::BankIdRequired { .. }
            | Self::BankIdFormat { .. }
            | Self::BankIdNotSupported { .. } => "bank_id",
            Self::BankIdCodeMismatch { .. } | Self::BankIdCodeNotSupported { .. } => {
                "bank_id_code"
            }
            Self::AccountNumberFormat { .. } => "account_number",
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BicRequired => write!(f, "bic is required"),
            Self::IbanNotSupported { iban } => write!(f, "iban is not supported, got '{iban}'"),
            Self::BankIdRequired { expected } => {
                write!(f, "bank_id is required ({expected})")
            }
            Self::BankIdFormat { bank_id, expected } => {
                write!(f, "bank_id must be {expected}, got '{bank_id}'")
            }
            Self::BankIdNotSupported { bank_id } => {
                write!(f, "bank_id is not supported and must be empty, got '{bank_id}'")
            }
            Self::BankIdCodeMismatch { expected, actual } => {
                write!(f, "bank_id_code must be '{expected}', got '{actual}'")
            }
            Self::BankIdCodeNotSupported { actual } => {
                write!(f, "bank_id_code must be empty, got '{actual}'")
            }
            Self::AccountNumberFormat {
                account_number,
                expected,
            } => write!(f, "account_number must be {expected}, got '{account_number}'"),
        }
    }
}

/// Reason an account was rejected before submission.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// No rule set exists for the country code.
    #[error("unsupported country code: '{0}'")]
    UnsupportedCountry(String),

    /// One or more rules for a supported country were broken.
    #[error("invalid {country} account: {}", join(.violations))]
    Invalid {
        /// Country whose rules were applied.
        country: String,
        /// Every broken rule, in field order.
        violations: Vec<Violation>,
    },
}

impl ValidationError {
    /// Returns the broken rules; empty for an unsupported country.
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        match self {
            Self::UnsupportedCountry(_) => &[],
            Self::Invalid { violations, .. } => violations,
        }
    }

    /// Returns true if any violation concerns `field`.
    #[must_use]
    pub fn concerns(&self, field: &str) -> bool {
        self.violations().iter().any(|v| v.field() == field)
    }
}

fn join(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Result of validating an account.
pub type ValidationResult = Result<(), ValidationError>;

/// Validate an account against the rules of its country.
///
/// # Errors
///
/// Returns [`ValidationError::UnsupportedCountry`] for an unknown country code, or
/// [`ValidationError::Invalid`] listing every broken rule.
pub fn validate(resource: &Resource) -> ValidationResult {
    let rules = rules::rules_for(&resource.country)
        .ok_or_else(|| ValidationError::UnsupportedCountry(resource.country.clone()))?;

    let violations = rules.check(resource);
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::Invalid {
            country: resource.country.clone(),
            violations,
        })
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

    const BIC: &str = "BARCGB22XXX";
    const IBAN: &str = "GB33BUKB20201555555555";

    fn account(country: &str, bank_id: &str, code: &str, number: &str) -> Resource {
        Resource {
            bank_id: bank_id.to_string(),
            bank_id_code: code.to_string(),
            account_number: number.to_string(),
            bic: BIC.to_string(),
            ..Resource::new(country)
        }
    }

    #[test]
    fn test_sixteen_countries_supported() {
        assert_eq!(
            supported_countries(),
            vec![
                "AU", "BE", "CA", "CH", "DE", "ES", "FR", "GB", "GR", "HK", "IT", "LU", "NL",
                "PL", "PT", "US"
            ]
        );
    }

    #[test]
    fn test_valid_accounts() {
        let valid = [
            account("GB", "123456", "GBDSC", "12345678"),
            account("AU", "123456", "AUBSB", "123456"),
            account("BE", "123", "BE", "1234567"),
            account("CA", "012345678", "CACPA", "1234567"),
            account("FR", "1234567890", "FR", "1234567890"),
            account("DE", "12345678", "DEBLZ", "1234567"),
            account("GR", "1234567", "GRBIC", "1234567890123456"),
            account("HK", "123", "HKNCC", "123456789"),
            account("IT", "12345678901", "ITNCC", "123456789012"),
            account("IT", "1234567890", "ITNCC", ""),
            account("LU", "123", "LULUX", "1234567890123"),
            account("NL", "", "", "1234567890"),
            account("PL", "12345678", "PLKNR", "1234567890123456"),
            account("PT", "12345678", "PTNCC", "12345678901"),
            account("ES", "12345678", "ESNCC", "1234567890"),
            account("CH", "12345", "CHBCC", "123456789012"),
            account("US", "123456789", "USABA", "123456"),
        ];

        for resource in &valid {
            assert_eq!(validate(resource), Ok(()), "{resource:?}");
        }
    }

    #[test]
    fn test_gb_short_bank_id() {
        let err = validate(&account("GB", "1234", "GBDSC", "")).unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::BankIdFormat {
                bank_id: "1234".to_string(),
                expected: "6 digits",
            }]
        );
        assert!(err.to_string().contains("bank_id"));
    }

    #[test]
    fn test_gb_missing_bic() {
        let mut resource = account("GB", "123456", "GBDSC", "12345678");
        resource.bic.clear();
        resource.iban = IBAN.to_string();

        let err = validate(&resource).unwrap_err();
        assert_eq!(err.violations(), &[Violation::BicRequired]);
    }

    #[test]
    fn test_all_violations_reported() {
        let mut resource = account("US", "12", "XXABA", "12");
        resource.bic.clear();
        resource.iban = IBAN.to_string();

        let err = validate(&resource).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(Violation::field).collect();
        assert_eq!(
            fields,
            vec!["bic", "iban", "bank_id", "bank_id_code", "account_number"]
        );

        let message = err.to_string();
        for field in fields {
            assert!(message.contains(field), "{message} should mention {field}");
        }
    }

    #[test]
    fn test_unsupported_country() {
        let err = validate(&account("XX", "123456", "GBDSC", "12345678")).unwrap_err();
        assert_eq!(err, ValidationError::UnsupportedCountry("XX".to_string()));
        assert!(err.violations().is_empty());
        assert!(err.to_string().contains("unsupported country"));

        assert!(validate(&Resource::default()).is_err());
    }

    #[test]
    fn test_optional_fields_skipped_when_empty() {
        // AU, CA and HK bank ids and CA/HK codes are optional.
        for country in ["AU", "CA", "HK"] {
            let code = if country == "AU" { "AUBSB" } else { "" };
            assert!(validate(&account(country, "", code, "")).is_ok(), "{country}");
        }
    }

    #[test]
    fn test_optional_code_checked_when_present() {
        let err = validate(&account("CA", "", "GBDSC", "")).unwrap_err();
        assert!(err.concerns("bank_id_code"));
    }

    #[test]
    fn test_required_bank_id_missing() {
        let err = validate(&account("DE", "", "DEBLZ", "")).unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::BankIdRequired {
                expected: "8 digits"
            }]
        );
    }

    #[test]
    fn test_iban_not_supported() {
        for (country, bank_id, code) in [
            ("AU", "123456", "AUBSB"),
            ("CA", "012345678", "CACPA"),
            ("HK", "123", "HKNCC"),
            ("US", "123456789", "USABA"),
        ] {
            let mut resource = account(country, bank_id, code, "");
            resource.iban = IBAN.to_string();
            let err = validate(&resource).unwrap_err();
            assert!(err.concerns("iban"), "{country}");
        }

        let mut gb = account("GB", "123456", "GBDSC", "");
        gb.iban = IBAN.to_string();
        assert!(validate(&gb).is_ok());
    }

    #[test]
    fn test_nl_bank_id_and_code_must_be_empty() {
        let err = validate(&account("NL", "123", "NLBANK", "")).unwrap_err();
        let fields: Vec<_> = err.violations().iter().map(Violation::field).collect();
        assert_eq!(fields, vec!["bank_id", "bank_id_code"]);
    }

    #[test]
    fn test_italy_bank_id_length_follows_account_number() {
        // 10 digits only without an account number
        assert!(validate(&account("IT", "1234567890", "ITNCC", "")).is_ok());
        assert!(
            validate(&account("IT", "1234567890", "ITNCC", "123456789012"))
                .unwrap_err()
                .concerns("bank_id")
        );

        // 11 digits only with an account number
        assert!(validate(&account("IT", "12345678901", "ITNCC", "123456789012")).is_ok());
        assert!(
            validate(&account("IT", "12345678901", "ITNCC", ""))
                .unwrap_err()
                .concerns("bank_id")
        );
    }

    #[test]
    fn test_italy_account_number_twelve_digits() {
        let err = validate(&account("IT", "12345678901", "ITNCC", "1234")).unwrap_err();
        assert_eq!(
            err.violations(),
            &[Violation::AccountNumberFormat {
                account_number: "1234".to_string(),
                expected: "12 digits",
            }]
        );
    }

    #[test]
    fn test_au_account_number_leading_zero() {
        let err = validate(&account("AU", "123456", "AUBSB", "0123456")).unwrap_err();
        assert!(err.concerns("account_number"));
    }
}
