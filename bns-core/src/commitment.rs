use stacks_core::crypto::{hash160::Hash160Hasher, Hashing};

/// Preorder commitment: Hash160 of the identifier followed by the salt.
///
/// The identifier is a namespace for namespace preorders and a fully
/// qualified name for name preorders. The reveal must present the same
/// identifier and salt for the contract to accept it.
pub fn hash_salted_name(identifier: &str, salt: &str) -> Hash160Hasher {
	let mut data = Vec::with_capacity(identifier.len() + salt.len());
	data.extend_from_slice(identifier.as_bytes());
	data.extend_from_slice(salt.as_bytes());

	Hash160Hasher::new(data)
}

/// Hash160 of a zone file, the value stored on-chain for a name
pub fn zonefile_hash(zonefile: &[u8]) -> Hash160Hasher {
	Hash160Hasher::new(zonefile)
}
