pub use secp256k1::PublicKey;
use serde::{Deserialize, Serialize};

use crate::{StacksError, StacksResult};

/// Declares a fixed length digest `$name` computed by `$hash`, with the hex
/// serde representation every digest shares
macro_rules! digest_hashing {
	($(#[$meta:meta])* $name:ident, $length:expr, $hash:expr) => {
		$(#[$meta])*
		#[derive(
			serde::Serialize,
			serde::Deserialize,
			Debug,
			Clone,
			Copy,
			PartialEq,
			Eq,
			PartialOrd,
			Ord,
		)]
		#[serde(try_from = "crate::crypto::Hex", into = "crate::crypto::Hex")]
		pub struct $name([u8; $length]);

		impl crate::crypto::Hashing<$length> for $name {
			fn hash(data: &[u8]) -> Self {
				let hash: fn(&[u8]) -> [u8; $length] = $hash;
				Self(hash(data))
			}

			fn as_bytes(&self) -> &[u8] {
				&self.0
			}

			fn from_bytes(bytes: &[u8]) -> crate::StacksResult<Self> {
				Ok(Self(bytes.try_into()?))
			}
		}

		impl From<$name> for crate::crypto::Hex {
			fn from(value: $name) -> Self {
				Self(hex::encode(value.0))
			}
		}

		impl TryFrom<crate::crypto::Hex> for $name {
			type Error = crate::StacksError;

			fn try_from(value: crate::crypto::Hex) -> Result<Self, Self::Error> {
				<Self as crate::crypto::Hashing<$length>>::from_bytes(
					&hex::decode(value.0)?,
				)
			}
		}
	};
}

/// Module for Hash160 hashing
pub mod hash160;
/// Module for Sha256 based hashing
pub mod sha256;

const CHECKSUM_LENGTH: usize = 4;

/// Hex encoded digest, the serde representation of every hasher
#[derive(Serialize, Deserialize)]
#[serde(transparent)]
pub struct Hex(pub String);

/// Hashing algorithm producing a digest of `LENGTH` bytes
pub trait Hashing<const LENGTH: usize>: Clone + Sized {
	/// Hashes the data
	fn hash(data: &[u8]) -> Self;
	/// Returns the digest bytes
	fn as_bytes(&self) -> &[u8];
	/// Wraps existing digest bytes
	fn from_bytes(bytes: &[u8]) -> StacksResult<Self>;

	/// Hashes anything that can be viewed as bytes
	fn new(value: impl AsRef<[u8]>) -> Self {
		Self::hash(value.as_ref())
	}

	/// Digest made of zeroes
	fn zeroes() -> Self {
		Self::from_bytes(&[0; LENGTH])
			.expect("a zeroed buffer always has the digest length")
	}

	/// First four bytes of the digest
	fn checksum(&self) -> [u8; CHECKSUM_LENGTH] {
		let mut checksum = [0u8; CHECKSUM_LENGTH];
		checksum.copy_from_slice(&self.as_bytes()[0..CHECKSUM_LENGTH]);

		checksum
	}

	/// Parses a hex encoded digest
	fn from_hex(data: impl AsRef<str>) -> StacksResult<Self> {
		Self::from_bytes(&hex::decode(data.as_ref().as_bytes())?)
	}

	/// Hex encodes the digest
	fn to_hex(&self) -> String {
		hex::encode(self.as_bytes())
	}
}

#[derive(
	Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord,
)]
#[serde(try_from = "Hex")]
#[serde(into = "Hex")]
/// Hasher wrapping a hashing algorithm
pub struct Hasher<T, const LENGTH: usize>(T)
where
	T: Hashing<LENGTH>;

impl<T, const LENGTH: usize> Hashing<LENGTH> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	fn hash(data: &[u8]) -> Self {
		Self(T::hash(data))
	}

	fn as_bytes(&self) -> &[u8] {
		T::as_bytes(&self.0)
	}

	fn from_bytes(bytes: &[u8]) -> StacksResult<Self> {
		Ok(Self(T::from_bytes(bytes)?))
	}
}

impl<T, const LENGTH: usize> AsRef<[u8]> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	fn as_ref(&self) -> &[u8] {
		self.as_bytes()
	}
}

impl<T, const LENGTH: usize> TryFrom<&[u8]> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	type Error = StacksError;

	fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
		Self::from_bytes(value)
	}
}

impl<T, const LENGTH: usize> From<[u8; LENGTH]> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	fn from(value: [u8; LENGTH]) -> Self {
		Self::from_bytes(&value)
			.expect("an array of the digest length is always a valid digest")
	}
}

impl<T, const LENGTH: usize> Default for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	fn default() -> Self {
		Self::zeroes()
	}
}

// From conversion is fallible for this type
#[allow(clippy::from_over_into)]
impl<T, const LENGTH: usize> Into<Hex> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	fn into(self) -> Hex {
		Hex(hex::encode(self.as_bytes()))
	}
}

impl<T, const LENGTH: usize> TryFrom<Hex> for Hasher<T, LENGTH>
where
	T: Hashing<LENGTH>,
{
	type Error = StacksError;

	fn try_from(value: Hex) -> Result<Self, Self::Error> {
		Self::from_bytes(&hex::decode(value.0)?)
	}
}
