use sha2::{Digest, Sha256, Sha512_256};

use crate::crypto::Hasher;

pub(crate) const SHA256_LENGTH: usize = 32;

digest_hashing!(
	/// Single SHA-256
	Sha256Hashing,
	SHA256_LENGTH,
	|data| Sha256::digest(data).into()
);

digest_hashing!(
	/// SHA-256 applied twice, used by c32check checksums
	DoubleSha256Hashing,
	SHA256_LENGTH,
	|data| Sha256::digest(Sha256::digest(data)).into()
);

digest_hashing!(
	/// SHA-512/256, used for transaction ids and sighashes
	Sha512Trunc256Hashing,
	SHA256_LENGTH,
	|data| Sha512_256::digest(data).into()
);

/// The Sha256 hasher type
pub type Sha256Hasher = Hasher<Sha256Hashing, SHA256_LENGTH>;
/// The DoubleSha256 hasher type
pub type DoubleSha256Hasher = Hasher<DoubleSha256Hashing, SHA256_LENGTH>;
/// The SHA-512/256 hasher type
pub type Sha512Trunc256Hasher = Hasher<Sha512Trunc256Hashing, SHA256_LENGTH>;

#[cfg(test)]
mod tests {
	use super::*;
	use crate::crypto::Hashing;

	#[test]
	fn should_sha256_hash_correctly() {
		assert_eq!(
			Sha256Hasher::new("Hello world").to_hex(),
			"64ec88ca00b268e5ba1a35678a1b5316d212f4f366b2477232534a8aeca37f3c"
		);
	}

	#[test]
	fn should_take_checksum_from_digest_prefix() {
		assert_eq!(
			hex::encode(Sha256Hasher::new("Hello world").checksum()),
			"64ec88ca"
		);
	}

	#[test]
	fn should_double_sha256_hash_correctly() {
		assert_eq!(
			DoubleSha256Hasher::new("Hello world").to_hex(),
			"f6dc724d119649460e47ce719139e521e082be8a9755c5bece181de046ee65fe"
		);
	}

	#[test]
	fn should_sha512_256_hash_empty_input() {
		assert_eq!(
			Sha512Trunc256Hasher::hash(&[]).to_hex(),
			"c672b8d1ef56ed28ab87c3622c5114069bdd3ad7b8f9737498d0c01ecef0967a"
		);
	}

	#[test]
	fn should_serialize_digests_as_hex() {
		let digest = Sha512Trunc256Hasher::new("Hello world");
		let json = serde_json::to_string(&digest).unwrap();

		assert_eq!(json, format!("\"{}\"", digest.to_hex()));
		assert_eq!(
			serde_json::from_str::<Sha512Trunc256Hasher>(&json).unwrap(),
			digest
		);
	}
}
