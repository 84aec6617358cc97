use std::io;

use strum::FromRepr;

use crate::{
	codec::{ByteReader, Codec, DecodeResult},
	crypto::{
		hash160::{Hash160Hasher, HASH160_LENGTH},
		Hashing, PublicKey,
	},
};

/// Length of a recoverable signature
pub const MESSAGE_SIGNATURE_LENGTH: usize = 65;
const COMPRESSED_PUBLIC_KEY_LENGTH: usize = 33;

#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionAuthFlag {
	Standard = 0x04,
	Sponsored = 0x05,
}

impl_byte_enum_codec!(TransactionAuthFlag);

#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionAuthFieldId {
	PublicKeyCompressed = 0x00,
	PublicKeyUncompressed = 0x01,
	SignatureCompressed = 0x02,
	SignatureUncompressed = 0x03,
}

impl_byte_enum_codec!(TransactionAuthFieldId);

/// Hash modes of a single signer
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SinglesigHashMode {
	/// Pay to public key hash
	P2PKH = 0x00,
	/// Pay to witness public key hash
	P2WPKH = 0x02,
}

impl_byte_enum_codec!(SinglesigHashMode);

/// Hash modes of a multisig signer
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultisigHashMode {
	/// Pay to script hash
	P2SH = 0x01,
	/// Pay to witness script hash
	P2WSH = 0x03,
}

impl_byte_enum_codec!(MultisigHashMode);

/// How the public key recovered from a signature is encoded
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionPublicKeyEncoding {
	/// Compressed
	#[default]
	Compressed = 0x00,
	/// Uncompressed
	Uncompressed = 0x01,
}

impl_byte_enum_codec!(TransactionPublicKeyEncoding);

/// A recoverable secp256k1 signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageSignature([u8; MESSAGE_SIGNATURE_LENGTH]);

impl MessageSignature {
	/// Signature of all zeroes, the placeholder of an unsigned transaction
	pub fn empty() -> Self {
		Self([0; MESSAGE_SIGNATURE_LENGTH])
	}

	/// Signature bytes
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl Default for MessageSignature {
	fn default() -> Self {
		Self::empty()
	}
}

impl From<[u8; MESSAGE_SIGNATURE_LENGTH]> for MessageSignature {
	fn from(bytes: [u8; MESSAGE_SIGNATURE_LENGTH]) -> Self {
		Self(bytes)
	}
}

impl Codec for MessageSignature {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&self.0)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self(reader.read_array()?))
	}
}

fn serialize_hash<W: io::Write>(
	hash: &Hash160Hasher,
	dest: &mut W,
) -> io::Result<()> {
	dest.write_all(hash.as_ref())
}

fn deserialize_hash(reader: &mut ByteReader<'_>) -> DecodeResult<Hash160Hasher> {
	Ok(reader.read_array::<HASH160_LENGTH>()?.into())
}

/// A multisig authorization field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAuthField {
	/// A public key of a signer that did not sign
	PublicKey(TransactionPublicKeyEncoding, PublicKey),
	/// A signature from which the signer's public key is recovered
	Signature(TransactionPublicKeyEncoding, MessageSignature),
}

impl Codec for TransactionAuthField {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::PublicKey(encoding, key) => {
				let id = match encoding {
					TransactionPublicKeyEncoding::Compressed => {
						TransactionAuthFieldId::PublicKeyCompressed
					}
					TransactionPublicKeyEncoding::Uncompressed => {
						TransactionAuthFieldId::PublicKeyUncompressed
					}
				};

				id.codec_serialize(dest)?;
				dest.write_all(&key.serialize())
			}
			Self::Signature(encoding, signature) => {
				let id = match encoding {
					TransactionPublicKeyEncoding::Compressed => {
						TransactionAuthFieldId::SignatureCompressed
					}
					TransactionPublicKeyEncoding::Uncompressed => {
						TransactionAuthFieldId::SignatureUncompressed
					}
				};

				id.codec_serialize(dest)?;
				signature.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let id = TransactionAuthFieldId::codec_deserialize(reader)?;

		let field = match id {
			TransactionAuthFieldId::PublicKeyCompressed
			| TransactionAuthFieldId::PublicKeyUncompressed => {
				let offset = reader.position();
				let bytes =
					reader.read_array::<COMPRESSED_PUBLIC_KEY_LENGTH>()?;
				let key = PublicKey::from_slice(&bytes).map_err(|err| {
					ByteReader::invalid_data(offset, err.to_string())
				})?;

				let encoding = if id == TransactionAuthFieldId::PublicKeyCompressed
				{
					TransactionPublicKeyEncoding::Compressed
				} else {
					TransactionPublicKeyEncoding::Uncompressed
				};

				Self::PublicKey(encoding, key)
			}
			TransactionAuthFieldId::SignatureCompressed => Self::Signature(
				TransactionPublicKeyEncoding::Compressed,
				MessageSignature::codec_deserialize(reader)?,
			),
			TransactionAuthFieldId::SignatureUncompressed => Self::Signature(
				TransactionPublicKeyEncoding::Uncompressed,
				MessageSignature::codec_deserialize(reader)?,
			),
		};

		Ok(field)
	}
}

/// Spending condition of a single signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinglesigSpendingCondition {
	/// Hash mode
	pub hash_mode: SinglesigHashMode,
	/// Hash160 of the signer's public key
	pub signer: Hash160Hasher,
	/// Account nonce
	pub nonce: u64,
	/// Fee in microSTX
	pub tx_fee: u64,
	/// Public key encoding
	pub key_encoding: TransactionPublicKeyEncoding,
	/// Signature, empty until signed
	pub signature: MessageSignature,
}

/// Spending condition of a multisig signer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultisigSpendingCondition {
	/// Hash mode
	pub hash_mode: MultisigHashMode,
	/// Hash160 of the redeem script
	pub signer: Hash160Hasher,
	/// Account nonce
	pub nonce: u64,
	/// Fee in microSTX
	pub tx_fee: u64,
	/// Public keys and signatures, in key order
	pub fields: Vec<TransactionAuthField>,
	/// Number of signatures required
	pub signatures_required: u16,
}

/// Who authorizes a transaction and what they pay
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionSpendingCondition {
	/// Single signer
	Singlesig(SinglesigSpendingCondition),
	/// Multisig signer
	Multisig(MultisigSpendingCondition),
}

impl TransactionSpendingCondition {
	/// Unsigned pay to public key hash condition for the given key
	pub fn singlesig_p2pkh(public_key: &PublicKey, nonce: u64, tx_fee: u64) -> Self {
		Self::Singlesig(SinglesigSpendingCondition {
			hash_mode: SinglesigHashMode::P2PKH,
			signer: Hash160Hasher::new(public_key.serialize()),
			nonce,
			tx_fee,
			key_encoding: TransactionPublicKeyEncoding::Compressed,
			signature: MessageSignature::empty(),
		})
	}

	/// Placeholder sponsor condition: a zeroed signer that pays nothing
	pub fn sentinel() -> Self {
		Self::Singlesig(SinglesigSpendingCondition {
			hash_mode: SinglesigHashMode::P2PKH,
			signer: Hash160Hasher::zeroes(),
			nonce: 0,
			tx_fee: 0,
			key_encoding: TransactionPublicKeyEncoding::Compressed,
			signature: MessageSignature::empty(),
		})
	}

	/// Account nonce
	pub fn nonce(&self) -> u64 {
		match self {
			Self::Singlesig(condition) => condition.nonce,
			Self::Multisig(condition) => condition.nonce,
		}
	}

	/// Fee in microSTX
	pub fn tx_fee(&self) -> u64 {
		match self {
			Self::Singlesig(condition) => condition.tx_fee,
			Self::Multisig(condition) => condition.tx_fee,
		}
	}

	/// Signer hash
	pub fn signer(&self) -> &Hash160Hasher {
		match self {
			Self::Singlesig(condition) => &condition.signer,
			Self::Multisig(condition) => &condition.signer,
		}
	}

	/// Zeroes the nonce and fee and drops every signature
	fn clear(&mut self) {
		match self {
			Self::Singlesig(condition) => {
				condition.nonce = 0;
				condition.tx_fee = 0;
				condition.signature = MessageSignature::empty();
			}
			Self::Multisig(condition) => {
				condition.nonce = 0;
				condition.tx_fee = 0;
				condition.fields.clear();
			}
		}
	}
}

impl Codec for TransactionSpendingCondition {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::Singlesig(condition) => {
				condition.hash_mode.codec_serialize(dest)?;
				serialize_hash(&condition.signer, dest)?;
				condition.nonce.codec_serialize(dest)?;
				condition.tx_fee.codec_serialize(dest)?;
				condition.key_encoding.codec_serialize(dest)?;
				condition.signature.codec_serialize(dest)
			}
			Self::Multisig(condition) => {
				condition.hash_mode.codec_serialize(dest)?;
				serialize_hash(&condition.signer, dest)?;
				condition.nonce.codec_serialize(dest)?;
				condition.tx_fee.codec_serialize(dest)?;
				condition.fields.codec_serialize(dest)?;
				condition.signatures_required.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let offset = reader.position();
		let hash_mode = reader.read_u8()?;

		if let Some(hash_mode) = SinglesigHashMode::from_repr(hash_mode) {
			return Ok(Self::Singlesig(SinglesigSpendingCondition {
				hash_mode,
				signer: deserialize_hash(reader)?,
				nonce: u64::codec_deserialize(reader)?,
				tx_fee: u64::codec_deserialize(reader)?,
				key_encoding: TransactionPublicKeyEncoding::codec_deserialize(
					reader,
				)?,
				signature: MessageSignature::codec_deserialize(reader)?,
			}));
		}

		if let Some(hash_mode) = MultisigHashMode::from_repr(hash_mode) {
			return Ok(Self::Multisig(MultisigSpendingCondition {
				hash_mode,
				signer: deserialize_hash(reader)?,
				nonce: u64::codec_deserialize(reader)?,
				tx_fee: u64::codec_deserialize(reader)?,
				fields: Vec::codec_deserialize(reader)?,
				signatures_required: u16::codec_deserialize(reader)?,
			}));
		}

		Err(ByteReader::invalid_data(
			offset,
			format!("unknown hash mode {hash_mode:#04x}"),
		))
	}
}

/// Transaction authorization
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionAuth {
	/// The origin pays its own fee
	Standard(TransactionSpendingCondition),
	/// The second condition pays on behalf of the first
	Sponsored(TransactionSpendingCondition, TransactionSpendingCondition),
}

impl TransactionAuth {
	/// The origin's spending condition
	pub fn origin(&self) -> &TransactionSpendingCondition {
		match self {
			Self::Standard(origin) | Self::Sponsored(origin, _) => origin,
		}
	}

	/// The sponsor's spending condition, if sponsored
	pub fn sponsor(&self) -> Option<&TransactionSpendingCondition> {
		match self {
			Self::Standard(_) => None,
			Self::Sponsored(_, sponsor) => Some(sponsor),
		}
	}

	/// Whether a sponsor pays the fee
	pub fn is_sponsored(&self) -> bool {
		matches!(self, Self::Sponsored(_, _))
	}

	/// Authorization as committed to by the initial sighash: the origin is
	/// cleared and the sponsor replaced by the sentinel condition
	pub fn into_initial_sighash_auth(self) -> Self {
		match self {
			Self::Standard(mut origin) => {
				origin.clear();
				Self::Standard(origin)
			}
			Self::Sponsored(mut origin, _) => {
				origin.clear();
				Self::Sponsored(origin, TransactionSpendingCondition::sentinel())
			}
		}
	}
}

impl Codec for TransactionAuth {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::Standard(origin) => {
				TransactionAuthFlag::Standard.codec_serialize(dest)?;
				origin.codec_serialize(dest)
			}
			Self::Sponsored(origin, sponsor) => {
				TransactionAuthFlag::Sponsored.codec_serialize(dest)?;
				origin.codec_serialize(dest)?;
				sponsor.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		match TransactionAuthFlag::codec_deserialize(reader)? {
			TransactionAuthFlag::Standard => Ok(Self::Standard(
				TransactionSpendingCondition::codec_deserialize(reader)?,
			)),
			TransactionAuthFlag::Sponsored => Ok(Self::Sponsored(
				TransactionSpendingCondition::codec_deserialize(reader)?,
				TransactionSpendingCondition::codec_deserialize(reader)?,
			)),
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::codec::DecodeError;

	fn public_key() -> PublicKey {
		PublicKey::from_slice(
			&hex::decode(
				"03556902f83defc6c63a7eb56a2d8ee4baee109f2126aac41e4f9e3a0835f34bc5",
			)
			.unwrap(),
		)
		.unwrap()
	}

	#[test]
	fn should_serialize_singlesig_condition() {
		let condition =
			TransactionSpendingCondition::singlesig_p2pkh(&public_key(), 1, 2);
		let bytes = condition.serialize_to_vec().unwrap();

		assert_eq!(bytes.len(), 1 + 20 + 8 + 8 + 1 + 65);
		assert_eq!(bytes[0], 0x00);
		assert_eq!(
			hex::encode(&bytes[1..21]),
			"d24206d58967c61b6b302eb14cd254a8ae7e761a"
		);
		assert_eq!(&bytes[21..29], &1u64.to_be_bytes());
		assert_eq!(&bytes[29..37], &2u64.to_be_bytes());
		assert!(bytes[37..].iter().all(|byte| *byte == 0));
	}

	#[test]
	fn should_round_trip_multisig_condition() {
		let condition = TransactionSpendingCondition::Multisig(
			MultisigSpendingCondition {
				hash_mode: MultisigHashMode::P2SH,
				signer: Hash160Hasher::new(b"redeem script"),
				nonce: 4,
				tx_fee: 300,
				fields: vec![
					TransactionAuthField::Signature(
						TransactionPublicKeyEncoding::Compressed,
						MessageSignature::from([7; MESSAGE_SIGNATURE_LENGTH]),
					),
					TransactionAuthField::PublicKey(
						TransactionPublicKeyEncoding::Compressed,
						public_key(),
					),
				],
				signatures_required: 1,
			},
		);

		let bytes = condition.serialize_to_vec().unwrap();

		assert_eq!(bytes.len(), 1 + 20 + 8 + 8 + 4 + 66 + 34 + 2);
		assert_eq!(
			TransactionSpendingCondition::deserialize_from_slice(&bytes).unwrap(),
			condition
		);
	}

	#[test]
	fn should_clear_origin_and_replace_sponsor() {
		let auth = TransactionAuth::Sponsored(
			TransactionSpendingCondition::singlesig_p2pkh(&public_key(), 5, 0),
			TransactionSpendingCondition::singlesig_p2pkh(&public_key(), 9, 1000),
		);

		let cleared = auth.into_initial_sighash_auth();

		assert_eq!(cleared.origin().nonce(), 0);
		assert_eq!(cleared.origin().signer(), &Hash160Hasher::new(public_key().serialize()));
		assert_eq!(
			cleared.sponsor(),
			Some(&TransactionSpendingCondition::sentinel())
		);
	}

	#[test]
	fn should_reject_unknown_auth_flag() {
		let result = TransactionAuth::deserialize_from_hex("06");

		assert!(matches!(
			result,
			Err(crate::StacksError::DecodeError(DecodeError::InvalidData {
				offset: 0,
				..
			}))
		));
	}

	#[test]
	fn should_reject_unknown_hash_mode() {
		let mut bytes = vec![0x04, 0x09];
		bytes.extend_from_slice(&[0; 102]);

		assert!(TransactionAuth::deserialize_from_slice(&bytes).is_err());
	}
}
