/*!
ASCII string type used for contract code bodies
*/
use super::{Validate, ValidatedString};

/// Validated Stacks string type
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct ValidStacksString(String);

impl Validate for ValidStacksString {
	const ERR_MSG: &'static str = "Stacks string must be ASCII";
	const MAX_LENGTH: usize = u32::MAX as usize;

	fn validate(text: &str) -> bool {
		text.is_ascii()
	}

	fn create(text: &str) -> Self {
		Self(text.to_string())
	}

	fn as_str(&self) -> &str {
		&self.0
	}
}

/// An ASCII string with a four byte length prefix on the wire
pub type StacksString = ValidatedString<ValidStacksString>;
