/*!
Stacks transactions: the envelope around a payload, its wire format and the
digests derived from it.
*/
use std::io;

use strum::FromRepr;

use crate::{
	codec::{ByteReader, Codec, DecodeResult},
	crypto::{sha256::Sha512Trunc256Hasher, Hashing},
	StacksResult,
};

/// Implements [Codec] for a `#[repr(u8)]` enum deriving [FromRepr]
macro_rules! impl_byte_enum_codec {
	($name:ident) => {
		impl $crate::codec::Codec for $name {
			fn codec_serialize<W: std::io::Write>(
				&self,
				dest: &mut W,
			) -> std::io::Result<()> {
				dest.write_all(&[*self as u8])
			}

			fn codec_deserialize(
				reader: &mut $crate::codec::ByteReader<'_>,
			) -> $crate::codec::DecodeResult<Self> {
				let offset = reader.position();
				let byte = reader.read_u8()?;

				Self::from_repr(byte).ok_or_else(|| {
					$crate::codec::ByteReader::invalid_data(
						offset,
						format!(concat!("unknown ", stringify!($name), " {:#04x}"), byte),
					)
				})
			}
		}
	};
}

/// Module for transaction authorization
pub mod auth;
/// Module for building unsigned transactions
pub mod builder;
/// Module for transaction payloads
pub mod payload;
/// Module for post conditions
pub mod post_condition;
/// Module for token transfer memos
pub mod token_transfer_memo;

use auth::TransactionAuth;
use payload::TransactionPayload;
use post_condition::TransactionPostCondition;

/// Transaction ids and sighashes are SHA-512/256 digests
pub type TransactionId = Sha512Trunc256Hasher;

/// Stacks transaction version
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionVersion {
	/// Mainnet
	Mainnet = 0x00,
	/// Testnet
	Testnet = 0x80,
}

impl_byte_enum_codec!(TransactionVersion);

/// How a transaction may be appended to the chain
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionAnchorMode {
	/// Must be included in an anchored block
	OnChainOnly = 1,
	/// Must be included in a microblock
	OffChainOnly = 2,
	/// Either
	#[default]
	Any = 3,
}

impl_byte_enum_codec!(TransactionAnchorMode);

/// Whether asset transfers not covered by a post condition are allowed
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TransactionPostConditionMode {
	/// Uncovered transfers are allowed
	Allow = 1,
	/// Uncovered transfers abort the transaction
	#[default]
	Deny = 2,
}

impl_byte_enum_codec!(TransactionPostConditionMode);

/// A Stacks transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StacksTransaction {
	/// Network version
	pub version: TransactionVersion,
	/// Chain id
	pub chain_id: u32,
	/// Authorization: who pays and who signs
	pub auth: TransactionAuth,
	/// Anchor mode
	pub anchor_mode: TransactionAnchorMode,
	/// Post condition mode
	pub post_condition_mode: TransactionPostConditionMode,
	/// Post conditions, in the order they are checked
	pub post_conditions: Vec<TransactionPostCondition>,
	/// What the transaction does
	pub payload: TransactionPayload,
}

impl StacksTransaction {
	/// SHA-512/256 of the serialized transaction
	pub fn txid(&self) -> StacksResult<TransactionId> {
		Ok(TransactionId::new(self.serialize_to_vec()?))
	}

	/// The digest the origin signs first: the txid of this transaction with
	/// its authorization cleared. Sponsor fields are replaced by a sentinel
	/// so the origin does not commit to them.
	pub fn initial_sighash(&self) -> StacksResult<TransactionId> {
		let mut transaction = self.clone();
		transaction.auth = transaction.auth.into_initial_sighash_auth();

		transaction.txid()
	}
}

impl Codec for StacksTransaction {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		self.version.codec_serialize(dest)?;
		self.chain_id.codec_serialize(dest)?;
		self.auth.codec_serialize(dest)?;
		self.anchor_mode.codec_serialize(dest)?;
		self.post_condition_mode.codec_serialize(dest)?;
		self.post_conditions.codec_serialize(dest)?;
		self.payload.codec_serialize(dest)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self {
			version: TransactionVersion::codec_deserialize(reader)?,
			chain_id: u32::codec_deserialize(reader)?,
			auth: TransactionAuth::codec_deserialize(reader)?,
			anchor_mode: TransactionAnchorMode::codec_deserialize(reader)?,
			post_condition_mode: TransactionPostConditionMode::codec_deserialize(
				reader,
			)?,
			post_conditions: Vec::codec_deserialize(reader)?,
			payload: TransactionPayload::codec_deserialize(reader)?,
		})
	}
}

/// An unsigned transaction together with the out of band data that travels
/// beside it, such as a zone file. The attachment is never part of the
/// transaction bytes or of any digest over them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
	transaction: StacksTransaction,
	attachment: Option<Vec<u8>>,
}

impl TransactionEnvelope {
	/// Wraps a transaction and its optional attachment
	pub fn new(
		transaction: StacksTransaction,
		attachment: Option<Vec<u8>>,
	) -> Self {
		Self {
			transaction,
			attachment,
		}
	}

	/// The transaction
	pub fn transaction(&self) -> &StacksTransaction {
		&self.transaction
	}

	/// The attachment, if any
	pub fn attachment(&self) -> Option<&[u8]> {
		self.attachment.as_deref()
	}

	/// Splits the envelope, e.g. to hand the transaction to a signer
	pub fn into_parts(self) -> (StacksTransaction, Option<Vec<u8>>) {
		(self.transaction, self.attachment)
	}
}
