//! Property tests for validation and decoding.

use accountsapi_core::validation::supported_countries;
use accountsapi_core::{Resource, ValidationError, decode, decode_multi, validate};
use proptest::prelude::*;

/// A record that satisfies the rules of `country`.
fn valid_account(country: &str) -> Resource {
    let (bank_id, code, number) = match country {
        "GB" => ("123456", "GBDSC", "12345678"),
        "AU" => ("123456", "AUBSB", "123456"),
        "BE" => ("123", "BE", "1234567"),
        "CA" => ("012345678", "CACPA", "1234567"),
        "FR" => ("1234567890", "FR", "1234567890"),
        "DE" => ("12345678", "DEBLZ", "1234567"),
        "GR" => ("1234567", "GRBIC", "1234567890123456"),
        "HK" => ("123", "HKNCC", "123456789"),
        "IT" => ("12345678901", "ITNCC", "123456789012"),
        "LU" => ("123", "LULUX", "1234567890123"),
        "NL" => ("", "", "1234567890"),
        "PL" => ("12345678", "PLKNR", "1234567890123456"),
        "PT" => ("12345678", "PTNCC", "12345678901"),
        "ES" => ("12345678", "ESNCC", "1234567890"),
        "CH" => ("12345", "CHBCC", "123456789012"),
        "US" => ("123456789", "USABA", "123456"),
        other => panic!("no fixture for {other}"),
    };

    Resource {
        bank_id: bank_id.to_string(),
        bank_id_code: code.to_string(),
        account_number: number.to_string(),
        bic: "BARCGB22XXX".to_string(),
        ..Resource::new(country)
    }
}

fn country() -> impl Strategy<Value = &'static str> {
    prop::sample::select(supported_countries())
}

/// Countries that reject an account without a BIC.
const BIC_REQUIRED: [&str; 6] = ["GB", "AU", "CA", "HK", "NL", "US"];

/// Countries where the bank id may be left empty.
const BANK_ID_OPTIONAL: [&str; 4] = ["AU", "CA", "HK", "NL"];

/// Asserts that `resource` fails with exactly one violation, on `field`.
fn assert_single_violation(resource: &Resource, field: &str) -> Result<(), TestCaseError> {
    let err = validate(resource).unwrap_err();
    prop_assert!(err.concerns(field), "{}", err);
    prop_assert_eq!(err.violations().len(), 1, "{}", err);
    Ok(())
}

proptest! {
    #[test]
    fn prop_fixtures_are_valid(country in country()) {
        prop_assert_eq!(validate(&valid_account(country)), Ok(()));
    }

    #[test]
    fn prop_empty_account_number_never_fails_format(country in country()) {
        let mut resource = valid_account(country);
        resource.account_number.clear();
        if country == "IT" {
            // Without an account number Italy wants a 10-digit bank id.
            resource.bank_id = "1234567890".to_string();
        }
        prop_assert_eq!(validate(&resource), Ok(()));
    }

    #[test]
    fn prop_non_numeric_account_number_rejected(
        country in country(),
        letters in "[a-zA-Z]{1,20}",
    ) {
        let mut resource = valid_account(country);
        resource.account_number = letters;
        let err = validate(&resource).unwrap_err();
        prop_assert!(err.concerns("account_number"));
    }

    #[test]
    fn prop_wrong_bank_id_code_rejected(country in country()) {
        let mut resource = valid_account(country);
        resource.bank_id_code = "ZZ".to_string();
        assert_single_violation(&resource, "bank_id_code")?;
    }

    #[test]
    fn prop_missing_bic(country in country()) {
        let mut resource = valid_account(country);
        resource.bic.clear();
        if BIC_REQUIRED.contains(&country) {
            assert_single_violation(&resource, "bic")?;
        } else {
            prop_assert_eq!(validate(&resource), Ok(()));
        }
    }

    #[test]
    fn prop_one_digit_bank_id_rejected(country in country()) {
        let mut resource = valid_account(country);
        resource.bank_id = "1".to_string();
        assert_single_violation(&resource, "bank_id")?;
    }

    #[test]
    fn prop_missing_bank_id(country in country()) {
        let mut resource = valid_account(country);
        resource.bank_id.clear();
        if BANK_ID_OPTIONAL.contains(&country) {
            prop_assert_eq!(validate(&resource), Ok(()));
        } else {
            assert_single_violation(&resource, "bank_id")?;
        }
    }

    #[test]
    fn prop_unknown_country_always_unsupported(
        code in "[A-Z]{2}",
        bank_id in "[0-9]{0,12}",
        bic in ".{0,11}",
    ) {
        prop_assume!(!supported_countries().contains(&code.as_str()));
        let resource = Resource {
            bank_id,
            bic,
            ..Resource::new(code.clone())
        };
        prop_assert_eq!(validate(&resource), Err(ValidationError::UnsupportedCountry(code)));
    }

    #[test]
    fn prop_decode_never_panics(body in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decode(&body);
        let _ = decode_multi(&body);
    }

    #[test]
    fn prop_non_json_is_malformed(text in "[a-z ]{1,40}") {
        prop_assert!(decode(text.as_bytes()).unwrap_err().is_malformed());
    }
}
