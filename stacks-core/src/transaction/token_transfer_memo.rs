use std::io;

use crate::{
	codec::{ByteReader, Codec, DecodeResult},
	StacksError, StacksResult,
};

/// Length of a token transfer memo
pub const TOKEN_TRANSFER_MEMO_LENGTH: usize = 34;

/// Fixed size memo attached to a STX transfer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenTransferMemo([u8; TOKEN_TRANSFER_MEMO_LENGTH]);

impl TokenTransferMemo {
	/// Creates a memo, right padding shorter input with zeroes
	pub fn new(memo: impl AsRef<[u8]>) -> StacksResult<Self> {
		let memo = memo.as_ref();

		if memo.len() > TOKEN_TRANSFER_MEMO_LENGTH {
			return Err(StacksError::InvalidArguments(
				"Token transfer memo must be at most 34 bytes",
			));
		}

		let mut bytes = [0u8; TOKEN_TRANSFER_MEMO_LENGTH];
		bytes[..memo.len()].copy_from_slice(memo);

		Ok(Self(bytes))
	}

	/// Memo bytes, padding included
	pub fn as_bytes(&self) -> &[u8] {
		&self.0
	}
}

impl Default for TokenTransferMemo {
	fn default() -> Self {
		Self([0; TOKEN_TRANSFER_MEMO_LENGTH])
	}
}

impl From<[u8; TOKEN_TRANSFER_MEMO_LENGTH]> for TokenTransferMemo {
	fn from(value: [u8; TOKEN_TRANSFER_MEMO_LENGTH]) -> Self {
		Self(value)
	}
}

impl AsRef<[u8]> for TokenTransferMemo {
	fn as_ref(&self) -> &[u8] {
		&self.0
	}
}

impl Codec for TokenTransferMemo {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&self.0)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self(reader.read_array()?))
	}
}
