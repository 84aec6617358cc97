/*!
Byte reader and the codec trait shared by every wire type
*/
use std::io;

use thiserror::Error;

use crate::{StacksError, StacksResult};

/// Errors raised while decoding malformed or truncated input
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
	/// Attempted to read past the end of the buffer
	#[error(
		"Attempted to read {requested} bytes at offset {offset} with only {remaining} remaining"
	)]
	OutOfBounds {
		/// Cursor position at the time of the read
		offset: usize,
		/// Number of bytes requested
		requested: usize,
		/// Number of bytes left in the buffer
		remaining: usize,
	},
	/// The type prefix byte is not a known Clarity type
	#[error("Unknown Clarity type prefix {prefix:#04x} at offset {offset}")]
	UnknownTypePrefix {
		/// The offending byte
		prefix: u8,
		/// Position of the offending byte
		offset: usize,
	},
	/// The bytes were read but do not describe a valid value
	#[error("Invalid data at offset {offset}: {reason}")]
	InvalidData {
		/// Position of the field that failed validation
		offset: usize,
		/// Description of the failure
		reason: String,
	},
	/// Nesting exceeds the maximum value depth
	#[error("Value nesting exceeds the maximum depth of {0}")]
	DepthExceeded(u8),
	/// Input contained bytes after the decoded value
	#[error("{0} bytes left over after decoding")]
	TrailingBytes(usize),
}

/// Result type for decoding
pub type DecodeResult<T> = Result<T, DecodeError>;

/// Errors raised while serializing
#[derive(Error, Debug)]
pub enum CodecError {
	/// Writing to the destination failed
	#[error("Could not serialize or deserialize: {0}")]
	IoError(#[from] io::Error),
}

/// Cursor based sequential reader over a fixed buffer.
///
/// Reads are bounds checked and never partially advance the cursor: a failed
/// read leaves the position where it was.
#[derive(Debug, Clone)]
pub struct ByteReader<'a> {
	bytes: &'a [u8],
	position: usize,
}

impl<'a> ByteReader<'a> {
	/// Creates a reader positioned at the start of the buffer
	pub fn new(bytes: &'a [u8]) -> Self {
		Self { bytes, position: 0 }
	}

	/// Current cursor position
	pub fn position(&self) -> usize {
		self.position
	}

	/// Number of unread bytes
	pub fn remaining(&self) -> usize {
		self.bytes.len() - self.position
	}

	/// Whether every byte has been consumed
	pub fn is_empty(&self) -> bool {
		self.remaining() == 0
	}

	/// Reads the next byte
	pub fn read_u8(&mut self) -> DecodeResult<u8> {
		let byte = *self
			.bytes
			.get(self.position)
			.ok_or_else(|| self.out_of_bounds(1))?;
		self.position += 1;

		Ok(byte)
	}

	/// Reads the next `len` bytes
	pub fn read_bytes(&mut self, len: usize) -> DecodeResult<&'a [u8]> {
		if len > self.remaining() {
			return Err(self.out_of_bounds(len));
		}

		let buffer: &'a [u8] = self.bytes;
		let bytes = &buffer[self.position..self.position + len];
		self.position += len;

		Ok(bytes)
	}

	/// Reads a fixed size array
	pub fn read_array<const N: usize>(&mut self) -> DecodeResult<[u8; N]> {
		let mut buffer = [0u8; N];
		buffer.copy_from_slice(self.read_bytes(N)?);

		Ok(buffer)
	}

	/// Reads a big endian u16
	pub fn read_u16_be(&mut self) -> DecodeResult<u16> {
		Ok(u16::from_be_bytes(self.read_array()?))
	}

	/// Reads a big endian u32
	pub fn read_u32_be(&mut self) -> DecodeResult<u32> {
		Ok(u32::from_be_bytes(self.read_array()?))
	}

	/// Reads a big endian u64
	pub fn read_u64_be(&mut self) -> DecodeResult<u64> {
		Ok(u64::from_be_bytes(self.read_array()?))
	}

	/// Builds an [DecodeError::InvalidData] error for the given offset
	pub fn invalid_data(offset: usize, reason: impl Into<String>) -> DecodeError {
		DecodeError::InvalidData {
			offset,
			reason: reason.into(),
		}
	}

	fn out_of_bounds(&self, requested: usize) -> DecodeError {
		DecodeError::OutOfBounds {
			offset: self.position,
			requested,
			remaining: self.remaining(),
		}
	}
}

/// Converts a length to the u32 prefix used on the wire
pub(crate) fn u32_length(len: usize) -> io::Result<u32> {
	u32::try_from(len).map_err(|_| {
		io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("Length {len} does not fit in a u32 prefix"),
		)
	})
}

/// Serialization to and from the consensus wire format
pub trait Codec {
	/// Writes the wire representation into the destination
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()>;

	/// Reads a value from the reader, advancing it past the value
	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self>
	where
		Self: Sized;

	/// Serializes into the destination
	fn serialize<W: io::Write>(&self, dest: &mut W) -> StacksResult<()> {
		self.codec_serialize(dest)
			.map_err(|err| CodecError::IoError(err).into())
	}

	/// Deserializes from the reader, leaving any following bytes unread
	fn deserialize(reader: &mut ByteReader<'_>) -> StacksResult<Self>
	where
		Self: Sized,
	{
		Ok(Self::codec_deserialize(reader)?)
	}

	/// Serializes into a new vector
	fn serialize_to_vec(&self) -> StacksResult<Vec<u8>> {
		let mut buffer = Vec::new();
		self.serialize(&mut buffer)?;

		Ok(buffer)
	}

	/// Deserializes a slice that must contain exactly one value
	fn deserialize_from_slice(bytes: &[u8]) -> StacksResult<Self>
	where
		Self: Sized,
	{
		let mut reader = ByteReader::new(bytes);
		let value = Self::codec_deserialize(&mut reader)?;

		if !reader.is_empty() {
			return Err(StacksError::DecodeError(DecodeError::TrailingBytes(
				reader.remaining(),
			)));
		}

		Ok(value)
	}

	/// Serializes into a lowercase hex string
	fn serialize_to_hex(&self) -> StacksResult<String> {
		Ok(hex::encode(self.serialize_to_vec()?))
	}

	/// Deserializes a hex string, with or without a `0x` prefix
	fn deserialize_from_hex(data: impl AsRef<str>) -> StacksResult<Self>
	where
		Self: Sized,
	{
		let data = data.as_ref();
		let bytes = hex::decode(data.strip_prefix("0x").unwrap_or(data))?;

		Self::deserialize_from_slice(&bytes)
	}
}

impl Codec for u8 {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&[*self])
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		reader.read_u8()
	}
}

impl Codec for u16 {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&self.to_be_bytes())
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		reader.read_u16_be()
	}
}

impl Codec for u32 {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&self.to_be_bytes())
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		reader.read_u32_be()
	}
}

impl Codec for u64 {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&self.to_be_bytes())
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		reader.read_u64_be()
	}
}

/// Length prefixed lists: a big endian u32 count followed by the items
impl<T: Codec> Codec for Vec<T> {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		dest.write_all(&u32_length(self.len())?.to_be_bytes())?;

		for item in self {
			item.codec_serialize(dest)?;
		}

		Ok(())
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let len = reader.read_u32_be()?;
		// Every item occupies at least one byte
		let mut items = Vec::with_capacity((len as usize).min(reader.remaining()));

		for _ in 0..len {
			items.push(T::codec_deserialize(reader)?);
		}

		Ok(items)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_read_bytes_sequentially() {
		let bytes = [0x01, 0x02, 0x03, 0x04, 0x05];
		let mut reader = ByteReader::new(&bytes);

		assert_eq!(reader.read_u8().unwrap(), 0x01);
		assert_eq!(reader.read_bytes(2).unwrap(), &[0x02, 0x03]);
		assert_eq!(reader.position(), 3);
		assert_eq!(reader.remaining(), 2);
		assert_eq!(reader.read_bytes(2).unwrap(), &[0x04, 0x05]);
		assert!(reader.is_empty());
	}

	#[test]
	fn should_fail_reading_byte_past_end() {
		let mut reader = ByteReader::new(&[]);

		assert_eq!(
			reader.read_u8(),
			Err(DecodeError::OutOfBounds {
				offset: 0,
				requested: 1,
				remaining: 0
			})
		);
	}

	#[test]
	fn should_not_advance_on_failed_read() {
		let bytes = [0xaa, 0xbb, 0xcc];
		let mut reader = ByteReader::new(&bytes);
		reader.read_u8().unwrap();

		assert_eq!(
			reader.read_bytes(3),
			Err(DecodeError::OutOfBounds {
				offset: 1,
				requested: 3,
				remaining: 2
			})
		);
		assert_eq!(reader.position(), 1);
		assert_eq!(reader.read_bytes(2).unwrap(), &[0xbb, 0xcc]);
	}

	#[test]
	fn should_read_big_endian_integers() {
		let bytes =
			hex::decode("0102000000030000000000000004").unwrap();
		let mut reader = ByteReader::new(&bytes);

		assert_eq!(reader.read_u16_be().unwrap(), 0x0102);
		assert_eq!(reader.read_u32_be().unwrap(), 3);
		assert_eq!(reader.read_u64_be().unwrap(), 4);
	}

	#[test]
	fn should_serialize_length_prefixed_list() {
		let items: Vec<u16> = vec![1, 2];

		assert_eq!(
			hex::encode(items.serialize_to_vec().unwrap()),
			"0000000200010002"
		);
		assert_eq!(
			Vec::<u16>::deserialize_from_hex("0000000200010002").unwrap(),
			items
		);
	}

	#[test]
	fn should_reject_trailing_bytes() {
		let result = u16::deserialize_from_hex("000100");

		assert!(matches!(
			result,
			Err(StacksError::DecodeError(DecodeError::TrailingBytes(1)))
		));
	}
}
