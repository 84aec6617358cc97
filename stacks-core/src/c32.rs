use crate::{
	address::AddressVersion,
	crypto::{sha256::DoubleSha256Hasher, Hashing},
};

const C32_ALPHABET: &[u8; 32] = b"0123456789ABCDEFGHJKMNPQRSTVWXYZ";
const C32_BYTE_MAP: [Option<u8>; 128] = c32_byte_map();

/// Decoding table: both cases map to the same digit, `O` reads as `0` and
/// `I`/`L` read as `1`
const fn c32_byte_map() -> [Option<u8>; 128] {
	let mut map = [None; 128];
	let mut i = 0;

	while i < C32_ALPHABET.len() {
		let c = C32_ALPHABET[i];
		map[c as usize] = Some(i as u8);
		map[c.to_ascii_lowercase() as usize] = Some(i as u8);
		i += 1;
	}

	map[b'O' as usize] = Some(0);
	map[b'o' as usize] = Some(0);
	map[b'I' as usize] = Some(1);
	map[b'i' as usize] = Some(1);
	map[b'L' as usize] = Some(1);
	map[b'l' as usize] = Some(1);

	map
}

fn encode_overhead(len: usize) -> usize {
	(len * 8 + 4) / 5
}

fn decode_underhead(len: usize) -> usize {
	len * 5 / 8
}

/// C32 error type
#[derive(thiserror::Error, Clone, Debug, Eq, PartialEq)]
pub enum C32Error {
	/// Invalid C32 string.
	#[error("Invalid C32 string")]
	InvalidC32,
	/// Invalid character.
	#[error("Invalid C32 character: {0}")]
	InvalidChar(char),
	/// Invalid checksum.
	#[error("Invalid C32 checksum - expected {0:?}, got {1:?}")]
	InvalidChecksum([u8; 4], Vec<u8>),
	/// Invalid C32 address.
	#[error("Invalid C32 address: {0}")]
	InvalidAddress(String),
	/// Invalid C32 address version.
	#[error("Invalid C32 address version: {0}")]
	InvalidAddressVersion(u8),
	/// Conversion error, from utf8.
	#[error(transparent)]
	FromUtf8Error(#[from] std::string::FromUtf8Error),
	/// Integer conversion error.
	#[error(transparent)]
	IntConversionError(#[from] std::num::TryFromIntError),
}

/// C32 encodes the data
pub fn encode(data: impl AsRef<[u8]>) -> Vec<u8> {
	let data = data.as_ref();

	let mut encoded = Vec::with_capacity(encode_overhead(data.len()));
	let mut buffer = 0u32;
	let mut bits = 0;

	for byte in data.iter().rev() {
		buffer |= (*byte as u32) << bits;
		bits += 8;

		while bits >= 5 {
			encoded.push(C32_ALPHABET[(buffer & 0x1F) as usize]);
			buffer >>= 5;
			bits -= 5;
		}
	}

	if bits > 0 {
		encoded.push(C32_ALPHABET[(buffer & 0x1F) as usize]);
	}

	while let Some(i) = encoded.pop() {
		if i != C32_ALPHABET[0] {
			encoded.push(i);
			break;
		}
	}

	for i in data {
		if *i == 0 {
			encoded.push(C32_ALPHABET[0]);
		} else {
			break;
		}
	}

	encoded.reverse();
	encoded
}

/// Decodes C32 encoded data
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, C32Error> {
	let input = input.as_ref();

	if !input.is_ascii() {
		return Err(C32Error::InvalidC32);
	}

	let mut decoded = Vec::with_capacity(decode_underhead(input.len()));
	let mut carry = 0u16;
	let mut carry_bits = 0;

	for byte in input.iter().rev() {
		let Some(bits) = C32_BYTE_MAP[*byte as usize] else {
			return Err(C32Error::InvalidChar(*byte as char));
		};

		carry |= u16::from(bits) << carry_bits;
		carry_bits += 5;

		if carry_bits >= 8 {
			decoded.push((carry & 0xFF) as u8);
			carry >>= 8;
			carry_bits -= 8;
		}
	}

	if carry_bits > 0 {
		decoded.push(u8::try_from(carry)?);
	}

	while let Some(i) = decoded.pop() {
		if i != 0 {
			decoded.push(i);
			break;
		}
	}

	for byte in input.iter() {
		if *byte == b'0' {
			decoded.push(0);
		} else {
			break;
		}
	}

	decoded.reverse();

	Ok(decoded)
}

fn version_check_encode(version: u8, data: &[u8]) -> Vec<u8> {
	let mut buffer = vec![version];
	buffer.extend_from_slice(data);

	let checksum = DoubleSha256Hasher::new(&buffer).checksum();
	buffer.extend_from_slice(&checksum);

	let mut encoded = encode(&buffer[1..]);
	encoded.insert(0, C32_ALPHABET[version as usize]);

	encoded
}

fn version_check_decode(input: &[u8]) -> Result<(u8, Vec<u8>), C32Error> {
	if !input.is_ascii() || input.is_empty() {
		return Err(C32Error::InvalidC32);
	}

	let (version, data) = input.split_at(1);
	let decoded = decode(data)?;

	if decoded.len() < 4 {
		return Err(C32Error::InvalidC32);
	}

	let (bytes, expected_checksum) = decoded.split_at(decoded.len() - 4);

	let version = *decode(version)?.last().unwrap_or(&0);
	let mut check = vec![version];
	check.extend_from_slice(bytes);

	let computed_checksum = DoubleSha256Hasher::new(&check).checksum();

	if computed_checksum != expected_checksum {
		return Err(C32Error::InvalidChecksum(
			computed_checksum,
			expected_checksum.to_vec(),
		));
	}

	Ok((version, bytes.to_vec()))
}

/// Encodes a Stacks address from its version and hash bytes
pub fn encode_address(version: AddressVersion, data: &[u8]) -> String {
	let encoded = version_check_encode(version as u8, data);

	// The c32 alphabet is ASCII
	format!("S{}", String::from_utf8_lossy(&encoded))
}

/// Decodes a Stacks address into its version and hash bytes
pub fn decode_address(
	address: impl AsRef<str>,
) -> Result<(AddressVersion, Vec<u8>), C32Error> {
	let address = address.as_ref();

	if !address.starts_with('S') || address.len() <= 5 {
		return Err(C32Error::InvalidAddress(address.to_string()));
	}

	let (version, bytes) = version_check_decode(address[1..].as_bytes())?;
	let version = AddressVersion::from_repr(version)
		.ok_or(C32Error::InvalidAddressVersion(version))?;

	Ok((version, bytes))
}
