use ripemd::{Digest, Ripemd160};
use sha2::Sha256;

use crate::crypto::Hasher;

/// Length of a Hash160 digest
pub const HASH160_LENGTH: usize = 20;

digest_hashing!(
	/// RIPEMD-160 over SHA-256, the digest behind addresses and commitments
	Hash160Hashing,
	HASH160_LENGTH,
	|data| Ripemd160::digest(Sha256::digest(data)).into()
);

/// Hash160 hasher type
pub type Hash160Hasher = Hasher<Hash160Hashing, HASH160_LENGTH>;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::Hashing;

	#[test]
	fn should_hash160_hash_correctly() {
		assert_eq!(
			Hash160Hasher::new("Hello world").to_hex(),
			"f5e95668dadf6fdef8521f7e1aa8a5e650c9f849"
		);
	}

	#[test]
	fn should_parse_its_own_hex() {
		let hash = Hash160Hasher::new("Hello world");

		assert_eq!(Hash160Hasher::from_hex(hash.to_hex()).unwrap(), hash);
	}

	#[test]
	fn should_reject_wrong_length() {
		assert!(Hash160Hasher::from_bytes(&[0u8; 19]).is_err());
	}
}
