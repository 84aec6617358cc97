use std::{fmt, io, str::FromStr};

use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, FromRepr};

use crate::{
	c32::{decode_address, encode_address},
	codec::{ByteReader, Codec, DecodeResult},
	crypto::{
		hash160::{Hash160Hasher, HASH160_LENGTH},
		Hashing,
	},
	StacksError, StacksResult,
};

/// Supported stacks address versions
#[repr(u8)]
#[derive(FromRepr, EnumIter, PartialEq, Eq, Copy, Clone, Debug, Hash)]
pub enum AddressVersion {
	/// Mainnet single sig address version
	MainnetSingleSig = 22,
	/// Mainnet multi sig address version
	MainnetMultiSig = 20,
	/// Testnet single sig address version
	TestnetSingleSig = 26,
	/// Testnet multi sig address version
	TestnetMultiSig = 21,
}

impl AddressVersion {
	/// Whether the version belongs to mainnet
	pub fn is_mainnet(&self) -> bool {
		matches!(self, Self::MainnetSingleSig | Self::MainnetMultiSig)
	}
}

impl TryFrom<u8> for AddressVersion {
	type Error = StacksError;

	fn try_from(value: u8) -> StacksResult<Self> {
		AddressVersion::from_repr(value)
			.ok_or(StacksError::InvalidAddressVersion(value))
	}
}

/// A Stacks address
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct StacksAddress {
	version: AddressVersion,
	hash: Hash160Hasher,
}

impl StacksAddress {
	/// Create a new Stacks address from the given version and hash
	pub fn new(version: AddressVersion, hash: Hash160Hasher) -> Self {
		Self { version, hash }
	}

	/// Get the address version
	pub fn version(&self) -> AddressVersion {
		self.version
	}

	/// Get the address hash
	pub fn hash(&self) -> &Hash160Hasher {
		&self.hash
	}

	/// Create a new Stacks address with a pay-2-public-key-hash
	pub fn p2pkh(version: AddressVersion, key: &PublicKey) -> Self {
		Self::new(version, hash_p2pkh(key))
	}
}

impl Codec for StacksAddress {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&[self.version as u8])?;
		dest.write_all(self.hash.as_ref())
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let offset = reader.position();
		let version_byte = reader.read_u8()?;
		let version = AddressVersion::from_repr(version_byte).ok_or_else(|| {
			ByteReader::invalid_data(
				offset,
				format!("unknown address version {version_byte}"),
			)
		})?;

		let hash = reader.read_array::<HASH160_LENGTH>()?.into();

		Ok(Self { version, hash })
	}
}

impl From<StacksAddress> for String {
	fn from(address: StacksAddress) -> Self {
		address.to_string()
	}
}

impl TryFrom<&str> for StacksAddress {
	type Error = StacksError;

	fn try_from(address: &str) -> Result<Self, Self::Error> {
		let (version, hash_bytes) = decode_address(address)?;

		if hash_bytes.len() != HASH160_LENGTH {
			return Err(StacksError::InvalidArguments(
				"Invalid hash length for address",
			));
		}

		Ok(Self::new(version, Hash160Hasher::from_bytes(&hash_bytes)?))
	}
}

impl TryFrom<String> for StacksAddress {
	type Error = StacksError;

	fn try_from(address: String) -> Result<Self, Self::Error> {
		Self::try_from(address.as_str())
	}
}

impl FromStr for StacksAddress {
	type Err = StacksError;

	fn from_str(address: &str) -> Result<Self, Self::Err> {
		Self::try_from(address)
	}
}

impl fmt::Display for StacksAddress {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}", encode_address(self.version, self.hash.as_ref()))
	}
}

fn hash_p2pkh(key: &PublicKey) -> Hash160Hasher {
	Hash160Hasher::new(key.serialize())
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::DecodeError;

	fn public_key(hex: &str) -> PublicKey {
		PublicKey::from_slice(&hex::decode(hex).unwrap()).unwrap()
	}

	/// Sample data computed with these commands on MacOS:
	///
	/// ```text
	/// CREDENTIALS=$(stx make_keychain)
	/// PUBLIC_KEY=$(echo $CREDENTIALS | jq -r .key_info.publicKey)
	/// EXPECTED_HASH=$(echo $PUBLIC_KEY \
	/// | xxd -r -p \
	/// | openssl dgst -sha256 -binary \
	/// | openssl dgst -ripemd160 -binary \
	/// | xxd -p)
	/// ```
	#[test]
	fn should_correctly_hash_p2pkh() {
		let pk = public_key(
			"03556902f83defc6c63a7eb56a2d8ee4baee109f2126aac41e4f9e3a0835f34bc5",
		);

		assert_eq!(
			hash_p2pkh(&pk).to_hex(),
			"d24206d58967c61b6b302eb14cd254a8ae7e761a"
		);
	}

	/// Data generated with `stx make_keychain`
	#[test]
	fn should_create_correct_address_from_public_key() {
		let addr = StacksAddress::p2pkh(
			AddressVersion::MainnetSingleSig,
			&public_key(
				"02e2ce887c1f1654936fbb7d4036749da5e7b9b64af406e1f3535c8f4336de1c6e",
			),
		);

		assert_eq!(addr.to_string(), "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK");
	}

	#[test]
	fn should_create_correct_address_from_c32_encoded_string() {
		let expected_hash = hash_p2pkh(&public_key(
			"02e2ce887c1f1654936fbb7d4036749da5e7b9b64af406e1f3535c8f4336de1c6e",
		));

		let addr: StacksAddress =
			"SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap();

		assert_eq!(addr.version(), AddressVersion::MainnetSingleSig);
		assert_eq!(addr.hash(), &expected_hash);
	}

	#[test]
	fn should_parse_boot_address() {
		let addr: StacksAddress =
			"ST000000000000000000002AMW42H".parse().unwrap();

		assert_eq!(addr.version(), AddressVersion::TestnetSingleSig);
		assert_eq!(addr.hash(), &Hash160Hasher::default());
		assert!(!addr.version().is_mainnet());
	}

	#[test]
	fn should_keep_multisig_versions_of_parsed_addresses() {
		let addr =
			StacksAddress::new(AddressVersion::MainnetMultiSig, Hash160Hasher::default());
		let parsed: StacksAddress = addr.to_string().parse().unwrap();

		assert!(addr.to_string().starts_with("SM"));
		assert_eq!(parsed.version(), AddressVersion::MainnetMultiSig);
		assert_eq!(parsed, addr);
	}

	#[test]
	fn should_serialize_version_then_hash() {
		let addr: StacksAddress =
			"SP000000000000000000002Q6VF78".parse().unwrap();

		assert_eq!(
			addr.serialize_to_hex().unwrap(),
			"160000000000000000000000000000000000000000"
		);
		assert_eq!(
			StacksAddress::deserialize_from_hex(
				"160000000000000000000000000000000000000000"
			)
			.unwrap(),
			addr
		);
	}

	#[test]
	fn should_reject_unknown_version_byte() {
		let bytes = [vec![0x17], vec![0u8; 20]].concat();

		assert!(matches!(
			StacksAddress::deserialize_from_slice(&bytes),
			Err(StacksError::DecodeError(DecodeError::InvalidData {
				offset: 0,
				..
			}))
		));
	}

	#[test]
	fn should_round_trip_through_serde() {
		let addr: StacksAddress =
			"SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap();
		let json = serde_json::to_string(&addr).unwrap();

		assert_eq!(json, "\"SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK\"");
		assert_eq!(serde_json::from_str::<StacksAddress>(&json).unwrap(), addr);
	}
}
