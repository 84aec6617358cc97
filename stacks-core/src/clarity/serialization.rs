use std::io;

use super::{
	PrincipalData, ResponseData, TupleData, TypePrefix, Value, MAX_VALUE_DEPTH,
};
use crate::{
	address::StacksAddress,
	codec::{u32_length, ByteReader, Codec, DecodeError, DecodeResult},
	validated_strings::{
		clarity_name::ClarityName, contract_name::ContractName,
	},
};

impl PrincipalData {
	fn serialize_body<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::Standard(address) => address.codec_serialize(dest),
			Self::Contract(address, name) => {
				address.codec_serialize(dest)?;
				name.codec_serialize(dest)
			}
		}
	}

	fn deserialize_body(
		prefix: TypePrefix,
		reader: &mut ByteReader<'_>,
	) -> DecodeResult<Self> {
		let address = StacksAddress::codec_deserialize(reader)?;

		if prefix == TypePrefix::PrincipalContract {
			Ok(Self::Contract(address, ContractName::codec_deserialize(reader)?))
		} else {
			Ok(Self::Standard(address))
		}
	}
}

/// Principals are written exactly as the principal value, type prefix
/// included, wherever they appear outside of a value.
impl Codec for PrincipalData {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		let prefix = match self {
			Self::Standard(_) => TypePrefix::PrincipalStandard,
			Self::Contract(_, _) => TypePrefix::PrincipalContract,
		};

		dest.write_all(&[prefix as u8])?;
		self.serialize_body(dest)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let offset = reader.position();
		let byte = reader.read_u8()?;

		match TypePrefix::from_repr(byte) {
			Some(
				prefix @ (TypePrefix::PrincipalStandard
				| TypePrefix::PrincipalContract),
			) => Self::deserialize_body(prefix, reader),
			_ => Err(ByteReader::invalid_data(
				offset,
				format!("expected a principal, found type prefix {byte:#04x}"),
			)),
		}
	}
}

impl Codec for Value {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		serialize_value(self, dest, 1)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		deserialize_value(reader, 1)
	}
}

/// Mirrors the decoder's depth limit so that every value that serializes
/// can be read back
fn serialize_value<W: io::Write>(
	value: &Value,
	dest: &mut W,
	depth: u8,
) -> io::Result<()> {
	if depth > MAX_VALUE_DEPTH {
		return Err(io::Error::new(
			io::ErrorKind::InvalidInput,
			format!("Value nests deeper than {MAX_VALUE_DEPTH} levels"),
		));
	}

	dest.write_all(&[value.type_prefix() as u8])?;

	match value {
		Value::Int(value) => dest.write_all(&value.to_be_bytes()),
		Value::UInt(value) => dest.write_all(&value.to_be_bytes()),
		Value::Bool(_) | Value::Optional(None) => Ok(()),
		Value::Buffer(bytes) => write_length_prefixed(dest, bytes),
		Value::Principal(principal) => principal.serialize_body(dest),
		Value::Response(ResponseData { data, .. }) => {
			serialize_value(data, dest, depth + 1)
		}
		Value::Optional(Some(inner)) => serialize_value(inner, dest, depth + 1),
		Value::List(items) => {
			dest.write_all(&u32_length(items.len())?.to_be_bytes())?;

			for item in items {
				serialize_value(item, dest, depth + 1)?;
			}

			Ok(())
		}
		Value::Tuple(tuple) => {
			dest.write_all(&u32_length(tuple.len())?.to_be_bytes())?;

			for (key, entry) in tuple.iter() {
				key.codec_serialize(dest)?;
				serialize_value(entry, dest, depth + 1)?;
			}

			Ok(())
		}
		Value::StringAscii(text) => {
			if !text.is_ascii() {
				return Err(io::Error::new(
					io::ErrorKind::InvalidInput,
					"ASCII string contains non ASCII characters",
				));
			}

			write_length_prefixed(dest, text.as_bytes())
		}
		Value::StringUtf8(text) => {
			write_length_prefixed(dest, text.as_bytes())
		}
	}
}

fn write_length_prefixed<W: io::Write>(
	dest: &mut W,
	bytes: &[u8],
) -> io::Result<()> {
	dest.write_all(&u32_length(bytes.len())?.to_be_bytes())?;
	dest.write_all(bytes)
}

fn read_length_prefixed<'a>(
	reader: &mut ByteReader<'a>,
) -> DecodeResult<&'a [u8]> {
	let len = reader.read_u32_be()?;

	reader.read_bytes(len as usize)
}

fn deserialize_value(
	reader: &mut ByteReader<'_>,
	depth: u8,
) -> DecodeResult<Value> {
	if depth > MAX_VALUE_DEPTH {
		return Err(DecodeError::DepthExceeded(MAX_VALUE_DEPTH));
	}

	let offset = reader.position();
	let byte = reader.read_u8()?;
	let prefix = TypePrefix::from_repr(byte).ok_or(
		DecodeError::UnknownTypePrefix {
			prefix: byte,
			offset,
		},
	)?;

	let value = match prefix {
		TypePrefix::Int => Value::Int(i128::from_be_bytes(reader.read_array()?)),
		TypePrefix::UInt => {
			Value::UInt(u128::from_be_bytes(reader.read_array()?))
		}
		TypePrefix::Buffer => Value::Buffer(read_length_prefixed(reader)?.to_vec()),
		TypePrefix::BoolTrue => Value::Bool(true),
		TypePrefix::BoolFalse => Value::Bool(false),
		TypePrefix::PrincipalStandard | TypePrefix::PrincipalContract => {
			Value::Principal(PrincipalData::deserialize_body(prefix, reader)?)
		}
		TypePrefix::ResponseOk | TypePrefix::ResponseErr => {
			Value::Response(ResponseData {
				committed: prefix == TypePrefix::ResponseOk,
				data: Box::new(deserialize_value(reader, depth + 1)?),
			})
		}
		TypePrefix::OptionalNone => Value::Optional(None),
		TypePrefix::OptionalSome => {
			Value::some(deserialize_value(reader, depth + 1)?)
		}
		TypePrefix::List => {
			let len = reader.read_u32_be()?;
			// Every item occupies at least one byte
			let mut items =
				Vec::with_capacity((len as usize).min(reader.remaining()));

			for _ in 0..len {
				items.push(deserialize_value(reader, depth + 1)?);
			}

			Value::List(items)
		}
		TypePrefix::Tuple => {
			let len = reader.read_u32_be()?;
			let mut entries =
				Vec::with_capacity((len as usize).min(reader.remaining()));

			for _ in 0..len {
				let key = ClarityName::codec_deserialize(reader)?;
				let value = deserialize_value(reader, depth + 1)?;

				entries.push((key, value));
			}

			Value::Tuple(TupleData::from_entries(entries).map_err(|err| {
				ByteReader::invalid_data(offset, err.to_string())
			})?)
		}
		TypePrefix::StringAscii => {
			let start = reader.position();
			let bytes = read_length_prefixed(reader)?;

			if !bytes.is_ascii() {
				return Err(ByteReader::invalid_data(
					start,
					"ASCII string contains bytes above 0x7f",
				));
			}

			Value::StringAscii(String::from_utf8(bytes.to_vec()).map_err(
				|err| ByteReader::invalid_data(start, err.to_string()),
			)?)
		}
		TypePrefix::StringUtf8 => {
			let start = reader.position();
			let bytes = read_length_prefixed(reader)?;

			Value::StringUtf8(String::from_utf8(bytes.to_vec()).map_err(
				|err| ByteReader::invalid_data(start, err.to_string()),
			)?)
		}
	};

	Ok(value)
}
