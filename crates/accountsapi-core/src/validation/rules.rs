//! Per-country rule sets and the registry that selects them.

use std::collections::HashMap;
use std::sync::LazyLock;

use super::Violation;
use super::patterns::{self, Pattern};
use crate::resource::Resource;

/// Expected `bank_id_code` values per country.
pub mod bank_id_codes {
    /// United Kingdom sort code.
    pub const GB: &str = "GBDSC";
    /// Australian bank state branch code.
    pub const AU: &str = "AUBSB";
    /// Belgium.
    pub const BE: &str = "BE";
    /// Canadian routing number.
    pub const CA: &str = "CACPA";
    /// France.
    pub const FR: &str = "FR";
    /// German Bankleitzahl.
    pub const DE: &str = "DEBLZ";
    /// Greece.
    pub const GR: &str = "GRBIC";
    /// Hong Kong.
    pub const HK: &str = "HKNCC";
    /// Italy.
    pub const IT: &str = "ITNCC";
    /// Luxembourg.
    pub const LU: &str = "LULUX";
    /// Poland.
    pub const PL: &str = "PLKNR";
    /// Portugal.
    pub const PT: &str = "PTNCC";
    /// Spain.
    pub const ES: &str = "ESNCC";
    /// Switzerland.
    pub const CH: &str = "CHBCC";
    /// United States ABA routing number.
    pub const US: &str = "USABA";
}

/// A pattern together with how it reads in an error message.
#[derive(Clone, Copy)]
pub(crate) struct Format {
    pattern: &'static Pattern,
    expected: &'static str,
}

impl Format {
    fn new(pattern: &'static Pattern, expected: &'static str) -> Self {
        Self { pattern, expected }
    }

    fn matches(self, value: &str) -> bool {
        self.pattern.is_match(value)
    }
}

#[derive(Clone, Copy)]
pub(crate) enum BicRule {
    Required,
    Unchecked,
}

#[derive(Clone, Copy)]
pub(crate) enum IbanRule {
    NotSupported,
    Unchecked,
}

#[derive(Clone, Copy)]
pub(crate) enum BankIdRule {
    Required(Format),
    Optional(Format),
    /// Must be empty; the IBAN identifies the bank instead.
    NotSupported,
    /// Shape depends on whether an account number is present.
    Italian,
}

#[derive(Clone, Copy)]
pub(crate) enum BankIdCodeRule {
    Required(&'static str),
    Optional(&'static str),
    Empty,
}

/// Everything checked for one country.
#[derive(Clone, Copy)]
pub(crate) struct RuleSet {
    bic: BicRule,
    iban: IbanRule,
    bank_id: BankIdRule,
    bank_id_code: BankIdCodeRule,
    account_number: Option<Format>,
}

impl RuleSet {
    /// Runs every check and returns all violations, in field order.
    pub(crate) fn check(&self, resource: &Resource) -> Vec<Violation> {
        let mut violations = Vec::new();

        if matches!(self.bic, BicRule::Required) && resource.bic.is_empty() {
            violations.push(Violation::BicRequired);
        }

        if matches!(self.iban, IbanRule::NotSupported) && !resource.iban.is_empty() {
            violations.push(Violation::IbanNotSupported {
                iban: resource.iban.clone(),
            });
        }

        match self.bank_id {
            BankIdRule::Required(format) => {
                required_bank_id(&resource.bank_id, format, &mut violations);
            }
            BankIdRule::Optional(format) => {
                if !resource.bank_id.is_empty() {
                    required_bank_id(&resource.bank_id, format, &mut violations);
                }
            }
            BankIdRule::NotSupported => {
                if !resource.bank_id.is_empty() {
                    violations.push(Violation::BankIdNotSupported {
                        bank_id: resource.bank_id.clone(),
                    });
                }
            }
            BankIdRule::Italian => check_italian_bank_account(resource, &mut violations),
        }

        let code = resource.bank_id_code.as_str();
        match self.bank_id_code {
            BankIdCodeRule::Required(expected) if code != expected => {
                violations.push(Violation::BankIdCodeMismatch {
                    expected,
                    actual: code.to_string(),
                });
            }
            BankIdCodeRule::Optional(expected) if !code.is_empty() && code != expected => {
                violations.push(Violation::BankIdCodeMismatch {
                    expected,
                    actual: code.to_string(),
                });
            }
            BankIdCodeRule::Empty if !code.is_empty() => {
                violations.push(Violation::BankIdCodeNotSupported {
                    actual: code.to_string(),
                });
            }
            _ => {}
        }

        if let Some(format) = self.account_number {
            let number = resource.account_number.as_str();
            if !number.is_empty() && !format.matches(number) {
                violations.push(Violation::AccountNumberFormat {
                    account_number: number.to_string(),
                    expected: format.expected,
                });
            }
        }

        violations
    }
}

fn required_bank_id(bank_id: &str, format: Format, violations: &mut Vec<Violation>) {
    if bank_id.is_empty() {
        violations.push(Violation::BankIdRequired {
            expected: format.expected,
        });
    } else if !format.matches(bank_id) {
        violations.push(Violation::BankIdFormat {
            bank_id: bank_id.to_string(),
            expected: format.expected,
        });
    }
}

/// Italy: the account number, when given, is 12 digits and turns the required
/// bank id from 10 into 11 digits.
fn check_italian_bank_account(resource: &Resource, violations: &mut Vec<Violation>) {
    let account_format = Format::new(&patterns::TWELVE_DIGITS, "12 digits");

    let number = resource.account_number.as_str();
    let bank_id_format = if number.is_empty() {
        Format::new(&patterns::TEN_DIGITS, "10 digits")
    } else {
        if !account_format.matches(number) {
            violations.push(Violation::AccountNumberFormat {
                account_number: number.to_string(),
                expected: account_format.expected,
            });
        }
        Format::new(
            &patterns::ELEVEN_DIGITS,
            "11 digits when an account number is given",
        )
    };

    required_bank_id(&resource.bank_id, bank_id_format, violations);
}

static REGISTRY: LazyLock<HashMap<&'static str, RuleSet>> = LazyLock::new(build_registry);

/// Looks up the rules for a country code.
pub(crate) fn rules_for(country: &str) -> Option<&'static RuleSet> {
    REGISTRY.get(country)
}

/// Country codes with a rule set, sorted.
#[must_use]
pub fn supported_countries() -> Vec<&'static str> {
    let mut countries: Vec<_> = REGISTRY.keys().copied().collect();
    countries.sort_unstable();
    countries
}

#[allow(clippy::too_many_lines)]
fn build_registry() -> HashMap<&'static str, RuleSet> {
    use bank_id_codes as codes;
    use patterns::{
        AU_ACCOUNT_NUMBER, CA_ACCOUNT_NUMBER, CA_ROUTING_NUMBER, EIGHT_DIGITS, ELEVEN_DIGITS,
        FIVE_DIGITS, HK_ACCOUNT_NUMBER, NINE_DIGITS, SEVEN_DIGITS, SIX_DIGITS, SIXTEEN_DIGITS,
        TEN_DIGITS, THIRTEEN_DIGITS, THREE_DIGITS, TWELVE_DIGITS, US_ACCOUNT_NUMBER,
    };

    let three = Format::new(&THREE_DIGITS, "3 digits");
    let five = Format::new(&FIVE_DIGITS, "5 digits");
    let six = Format::new(&SIX_DIGITS, "6 digits");
    let seven = Format::new(&SEVEN_DIGITS, "7 digits");
    let eight = Format::new(&EIGHT_DIGITS, "8 digits");
    let nine = Format::new(&NINE_DIGITS, "9 digits");
    let ten = Format::new(&TEN_DIGITS, "10 digits");
    let eleven = Format::new(&ELEVEN_DIGITS, "11 digits");
    let twelve = Format::new(&TWELVE_DIGITS, "12 digits");
    let thirteen = Format::new(&THIRTEEN_DIGITS, "13 digits");
    let sixteen = Format::new(&SIXTEEN_DIGITS, "16 digits");

    // Countries without BIC or IBAN constraints differ only in these three columns.
    let plain = |bank_id: Format, code: &'static str, account: Format| RuleSet {
        bic: BicRule::Unchecked,
        iban: IbanRule::Unchecked,
        bank_id: BankIdRule::Required(bank_id),
        bank_id_code: BankIdCodeRule::Required(code),
        account_number: Some(account),
    };

    HashMap::from([
        (
            "GB",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::Unchecked,
                bank_id: BankIdRule::Required(six),
                bank_id_code: BankIdCodeRule::Required(codes::GB),
                account_number: Some(eight),
            },
        ),
        (
            "AU",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::NotSupported,
                bank_id: BankIdRule::Optional(six),
                bank_id_code: BankIdCodeRule::Required(codes::AU),
                account_number: Some(Format::new(
                    &AU_ACCOUNT_NUMBER,
                    "6 to 10 digits, not starting with 0",
                )),
            },
        ),
        ("BE", plain(three, codes::BE, seven)),
        (
            "CA",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::NotSupported,
                bank_id: BankIdRule::Optional(Format::new(
                    &CA_ROUTING_NUMBER,
                    "9 digits starting with 0",
                )),
                bank_id_code: BankIdCodeRule::Optional(codes::CA),
                account_number: Some(Format::new(&CA_ACCOUNT_NUMBER, "7 to 12 digits")),
            },
        ),
        ("FR", plain(ten, codes::FR, ten)),
        ("DE", plain(eight, codes::DE, seven)),
        ("GR", plain(seven, codes::GR, sixteen)),
        (
            "HK",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::NotSupported,
                bank_id: BankIdRule::Optional(three),
                bank_id_code: BankIdCodeRule::Optional(codes::HK),
                account_number: Some(Format::new(&HK_ACCOUNT_NUMBER, "9 to 12 digits")),
            },
        ),
        (
            "IT",
            RuleSet {
                bic: BicRule::Unchecked,
                iban: IbanRule::Unchecked,
                bank_id: BankIdRule::Italian,
                bank_id_code: BankIdCodeRule::Required(codes::IT),
                account_number: None,
            },
        ),
        ("LU", plain(three, codes::LU, thirteen)),
        (
            "NL",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::Unchecked,
                bank_id: BankIdRule::NotSupported,
                bank_id_code: BankIdCodeRule::Empty,
                account_number: Some(ten),
            },
        ),
        ("PL", plain(eight, codes::PL, sixteen)),
        ("PT", plain(eight, codes::PT, eleven)),
        ("ES", plain(eight, codes::ES, ten)),
        ("CH", plain(five, codes::CH, twelve)),
        (
            "US",
            RuleSet {
                bic: BicRule::Required,
                iban: IbanRule::NotSupported,
                bank_id: BankIdRule::Required(nine),
                bank_id_code: BankIdCodeRule::Required(codes::US),
                account_number: Some(Format::new(&US_ACCOUNT_NUMBER, "6 to 17 digits")),
            },
        ),
    ])
}
