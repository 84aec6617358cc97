/*!
Clarity name type and parsing
*/
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Validate, ValidatedString};

/// Maximum Clarity name length
pub const CLARITY_MAX_NAME_LENGTH: usize = 128;

/// Regex for Clarity names
pub static CLARITY_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new("^[a-zA-Z]([a-zA-Z0-9]|[-_!?+<>=/*])*$|^[-+=/*]$|^[<>]=?$")
		.expect("the Clarity name pattern is a valid regex")
});

/// Clarity name type
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct ValidClarityName(String);

impl Validate for ValidClarityName {
	const ERR_MSG: &'static str = "Clarity name not valid";
	const MAX_LENGTH: usize = CLARITY_MAX_NAME_LENGTH;

	fn validate(text: &str) -> bool {
		CLARITY_NAME_REGEX.is_match(text)
	}

	fn create(text: &str) -> Self {
		Self(text.to_string())
	}

	fn as_str(&self) -> &str {
		&self.0
	}
}

/// A validated Clarity identifier, used for function names, asset names and
/// tuple keys
pub type ClarityName = ValidatedString<ValidClarityName>;

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_accept_clarity_names() {
		for name in ["name-register", "get-name-price", "is-ok?", "+", "<=", "a_b"] {
			assert!(ClarityName::new(name).is_ok(), "{name}");
		}
	}

	#[test]
	fn should_reject_invalid_clarity_names() {
		for name in ["", "1abc", "-abc", "a b", "é", "<<"] {
			assert!(ClarityName::new(name).is_err(), "{name}");
		}
	}

	#[test]
	fn should_enforce_maximum_length() {
		let longest = "a".repeat(CLARITY_MAX_NAME_LENGTH);

		assert!(ClarityName::new(&longest).is_ok());
		assert!(ClarityName::new(format!("{longest}a")).is_err());
	}
}
