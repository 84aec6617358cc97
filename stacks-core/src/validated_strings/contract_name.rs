/*!
Contract name type and parsing
*/
use once_cell::sync::Lazy;
use regex::Regex;

use super::{Validate, ValidatedString};

/// Minimum contract name length
pub const CONTRACT_MIN_NAME_LENGTH: usize = 1;
/// Maximum length of a newly deployed contract name
pub const CONTRACT_MAX_NAME_LENGTH: usize = 40;
/// Maximum length of a contract name already on chain, deployed before the
/// limit was lowered
pub const CONTRACT_MAX_LEGACY_NAME_LENGTH: usize = 128;

/// Regex for contract names, lengths are checked separately
pub static CONTRACT_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new("^[a-zA-Z][a-zA-Z0-9_-]*$|^__transient$")
		.expect("the contract name pattern is a valid regex")
});

/// Contract name type
#[derive(PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Clone)]
pub struct ValidContractName(String);

impl Validate for ValidContractName {
	const ERR_MSG: &'static str = "Contract name not valid";
	const MAX_LENGTH: usize = CONTRACT_MAX_NAME_LENGTH;

	fn validate(text: &str) -> bool {
		(CONTRACT_MIN_NAME_LENGTH..=CONTRACT_MAX_NAME_LENGTH)
			.contains(&text.len())
			&& CONTRACT_NAME_REGEX.is_match(text)
	}

	fn validate_decoded(text: &str) -> bool {
		(CONTRACT_MIN_NAME_LENGTH..=CONTRACT_MAX_LEGACY_NAME_LENGTH)
			.contains(&text.len())
			&& CONTRACT_NAME_REGEX.is_match(text)
	}

	fn create(text: &str) -> Self {
		Self(text.to_string())
	}

	fn as_str(&self) -> &str {
		&self.0
	}
}

/// A validated contract name
pub type ContractName = ValidatedString<ValidContractName>;

#[cfg(test)]
mod tests {
	use rand::{distributions::Alphanumeric, thread_rng, Rng};

	use super::*;
	use crate::codec::Codec;

	#[test]
	fn should_accept_contract_names() {
		for name in ["bns", "sbtc-token", "a", "name_v2", "__transient"] {
			assert!(ContractName::new(name).is_ok(), "{name}");
		}
	}

	#[test]
	fn should_reject_invalid_contract_names() {
		let too_long = "a".repeat(CONTRACT_MAX_NAME_LENGTH + 1);

		for name in ["", "2fast", "bad.name", "no!", too_long.as_str()] {
			assert!(ContractName::new(name).is_err(), "{name}");
		}
	}

	#[test]
	fn should_accept_random_alphanumeric_names() {
		let mut rng = thread_rng();

		for _ in 0..1_000 {
			let len = rng.gen_range(0..CONTRACT_MAX_NAME_LENGTH);
			let rest: String = (&mut rng)
				.sample_iter(&Alphanumeric)
				.take(len)
				.map(char::from)
				.collect();

			assert!(ContractName::new(format!("c{rest}")).is_ok());
		}
	}

	#[test]
	fn should_decode_legacy_contract_names() {
		let legacy = "a".repeat(CONTRACT_MAX_NAME_LENGTH + 10);
		let bytes = [vec![legacy.len() as u8], legacy.clone().into_bytes()].concat();

		let name = ContractName::deserialize_from_slice(&bytes).unwrap();

		assert_eq!(name.to_string(), legacy);
		assert_eq!(name.serialize_to_vec().unwrap(), bytes);
		assert!(ContractName::new(&legacy).is_err());
	}

	#[test]
	fn should_reject_contract_names_beyond_legacy_limit() {
		let too_long = "a".repeat(CONTRACT_MAX_LEGACY_NAME_LENGTH + 1);
		let bytes = [vec![too_long.len() as u8], too_long.into_bytes()].concat();

		assert!(ContractName::deserialize_from_slice(&bytes).is_err());
	}
}
