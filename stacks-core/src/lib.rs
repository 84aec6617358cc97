#![forbid(missing_docs)]
/*!
# stacks-core library: a library for encoding Clarity values and Stacks transactions
*/

use std::array::TryFromSliceError;

use thiserror::Error;

/// Module for stacks addresses
pub mod address;
/// Module for c32 encoding and decoding
pub mod c32;
/// Module for Clarity values and their wire format
pub mod clarity;
/// Module for the byte reader and the codec trait
pub mod codec;
/// Module for crypto functions
pub mod crypto;
/// Module for network descriptors
pub mod network;
/// Module for Stacks transactions
pub mod transaction;
/// Module for validated strings
pub mod validated_strings;

pub use network::{Network, StacksNetwork};

/// Error type for the stacks-core library
#[derive(Error, Debug)]
pub enum StacksError {
	#[error("Invalid arguments: {0}")]
	/// Invalid arguments
	InvalidArguments(&'static str),
	#[error("Invalid data: {0}")]
	/// Invalid data
	InvalidData(String),
	#[error("Could not crackford32 encode or decode: {0}")]
	/// C32 encoding or decoding error
	C32Error(#[from] c32::C32Error),
	#[error("Address version is invalid: {0}")]
	/// Invalid address version
	InvalidAddressVersion(u8),
	#[error("Could not build array from slice: {0}")]
	/// Invalid slice length
	InvalidSliceLength(#[from] TryFromSliceError),
	#[error("Could not encode or decode hex: {0}")]
	/// Hex encoding or decoding error
	BadHex(#[from] hex::FromHexError),
	#[error("Could not decode: {0}")]
	/// Malformed or truncated binary input
	DecodeError(#[from] codec::DecodeError),
	#[error("Could not serialize: {0}")]
	/// Serialization error
	CodecError(#[from] codec::CodecError),
	#[error("Expected a value of type {expected}, found {found}")]
	/// A value did not have the structural type an operation expected
	UnexpectedType {
		/// The expected type
		expected: &'static str,
		/// The type signature of the value that was found
		found: String,
	},
	#[error("Invalid public key: {0}")]
	/// Invalid secp256k1 public key
	InvalidPublicKey(#[from] secp256k1::Error),
}

/// Result type for the stacks-core library
pub type StacksResult<T> = Result<T, StacksError>;
