//! Precompiled identifier patterns.
//!
//! Digit classes are spelled `[0-9]` because `\d` matches any Unicode digit.

use std::sync::LazyLock;

use regex::Regex;

/// A lazily compiled, anchored pattern.
pub type Pattern = LazyLock<Regex>;

#[allow(clippy::expect_used)]
fn compile(source: &str) -> Regex {
    Regex::new(source).expect("identifier patterns are valid regular expressions")
}

pub static THREE_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{3}$"));
pub static FIVE_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{5}$"));
pub static SIX_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{6}$"));
pub static SEVEN_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{7}$"));
pub static EIGHT_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{8}$"));
pub static NINE_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{9}$"));
pub static TEN_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{10}$"));
pub static ELEVEN_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{11}$"));
pub static TWELVE_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{12}$"));
pub static THIRTEEN_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{13}$"));
pub static SIXTEEN_DIGITS: Pattern = LazyLock::new(|| compile(r"^[0-9]{16}$"));

/// Australian account number: 6 to 10 digits, no leading zero.
pub static AU_ACCOUNT_NUMBER: Pattern = LazyLock::new(|| compile(r"^[1-9][0-9]{5,9}$"));
/// Canadian routing number: a zero followed by 8 digits.
pub static CA_ROUTING_NUMBER: Pattern = LazyLock::new(|| compile(r"^0[0-9]{8}$"));
pub static CA_ACCOUNT_NUMBER: Pattern = LazyLock::new(|| compile(r"^[0-9]{7,12}$"));
pub static HK_ACCOUNT_NUMBER: Pattern = LazyLock::new(|| compile(r"^[0-9]{9,12}$"));
pub static US_ACCOUNT_NUMBER: Pattern = LazyLock::new(|| compile(r"^[0-9]{6,17}$"));
