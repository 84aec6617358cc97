/*!
Strings that are checked against a grammar before they can be constructed
*/
use std::{borrow::Borrow, fmt, io, ops::Deref, str::FromStr};

use crate::{
	codec::{u32_length, ByteReader, Codec, DecodeResult},
	StacksError, StacksResult,
};

/// Module for Clarity names
pub mod clarity_name;
/// Module for contract names
pub mod contract_name;
/// Module for ASCII strings such as contract code bodies
pub mod stacks_string;

/// Specifies how to validate a string for a type
pub trait Validate: fmt::Debug + Clone + PartialEq + Eq {
	/// Error message returned when validation fails
	const ERR_MSG: &'static str;
	/// Maximum length in bytes. Strings of at most 255 bytes carry a one byte
	/// length prefix on the wire, longer ones a four byte prefix.
	const MAX_LENGTH: usize;

	/// Validate string
	fn validate(text: &str) -> bool;

	/// Whether a string read off the wire is acceptable. Consensus may hold
	/// strings that are no longer constructible, by default it is not.
	fn validate_decoded(text: &str) -> bool {
		text.len() <= Self::MAX_LENGTH && Self::validate(text)
	}

	/// Create type from valid string
	fn create(text: &str) -> Self
	where
		Self: Sized;

	/// Return a reference to the valid string
	fn as_str(&self) -> &str;

	/// Validate the string and create the type
	fn new(text: impl AsRef<str>) -> StacksResult<Self>
	where
		Self: Sized,
	{
		let text = text.as_ref();

		if text.len() <= Self::MAX_LENGTH && Self::validate(text) {
			Ok(Self::create(text))
		} else {
			Err(StacksError::InvalidArguments(Self::ERR_MSG))
		}
	}
}

/// Validated string of some type
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ValidatedString<T>(T);

impl<T> Validate for ValidatedString<T>
where
	T: Validate,
{
	const ERR_MSG: &'static str = T::ERR_MSG;
	const MAX_LENGTH: usize = T::MAX_LENGTH;

	fn validate(text: &str) -> bool {
		T::validate(text)
	}

	fn validate_decoded(text: &str) -> bool {
		T::validate_decoded(text)
	}

	fn create(text: &str) -> Self {
		Self(T::create(text))
	}

	fn as_str(&self) -> &str {
		self.0.as_str()
	}
}

impl<T> Codec for ValidatedString<T>
where
	T: Validate,
{
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		let bytes = self.as_str().as_bytes();

		if T::MAX_LENGTH <= u8::MAX as usize {
			dest.write_all(&[bytes.len() as u8])?;
		} else {
			dest.write_all(&u32_length(bytes.len())?.to_be_bytes())?;
		}

		dest.write_all(bytes)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let offset = reader.position();
		let len = if T::MAX_LENGTH <= u8::MAX as usize {
			reader.read_u8()? as usize
		} else {
			reader.read_u32_be()? as usize
		};

		let text = std::str::from_utf8(reader.read_bytes(len)?).map_err(|err| {
			ByteReader::invalid_data(offset, err.to_string())
		})?;

		if !T::validate_decoded(text) {
			return Err(ByteReader::invalid_data(offset, T::ERR_MSG));
		}

		Ok(Self::create(text))
	}
}

impl<T> TryFrom<&str> for ValidatedString<T>
where
	T: Validate,
{
	type Error = StacksError;

	fn try_from(value: &str) -> Result<Self, Self::Error> {
		Self::new(value)
	}
}

impl<T> FromStr for ValidatedString<T>
where
	T: Validate,
{
	type Err = StacksError;

	fn from_str(value: &str) -> Result<Self, Self::Err> {
		Self::new(value)
	}
}

impl<T> fmt::Display for ValidatedString<T>
where
	T: Validate,
{
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.0.as_str())
	}
}

impl<T> AsRef<str> for ValidatedString<T>
where
	T: Validate,
{
	fn as_ref(&self) -> &str {
		self.0.as_str()
	}
}

impl<T> Deref for ValidatedString<T>
where
	T: Validate,
{
	type Target = str;

	fn deref(&self) -> &Self::Target {
		self.0.as_str()
	}
}

impl<T> Borrow<str> for ValidatedString<T>
where
	T: Validate,
{
	fn borrow(&self) -> &str {
		self.0.as_str()
	}
}
