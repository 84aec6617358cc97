#![forbid(missing_docs)]
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]
/*!
# bns-core library: transactions and queries for the Blockchain Naming System
*/

use stacks_core::StacksError;
use thiserror::Error;

/// Module for salted commitments and zone file hashes
pub mod commitment;
/// Module for the registry contract address table
pub mod contract;
/// Module for fully qualified names
pub mod fqn;
/// Module for name transactions
pub mod name;
/// Module for namespace transactions
pub mod namespace;
/// Module for read-only queries and the interpretation of their results
pub mod queries;
/// Module for the two phase registration protocol
pub mod registration;

#[derive(Error, Debug)]
/// BNS error type
pub enum BnsError {
	#[error("Invalid input: {0}")]
	/// Caller input violates a precondition, raised before any encoding
	Validation(String),
	#[error("No BNS contract is known for chain id {0:#010x}")]
	/// The chain id is not one of the known networks
	UnknownChainId(u32),
	#[error("Expected {expected}, found {found}")]
	/// A contract result did not have the expected shape
	UnexpectedType {
		/// The expected shape
		expected: &'static str,
		/// The value that was found, as a Clarity literal
		found: String,
	},
	#[error("Contract returned an error: {0}")]
	/// The contract answered with `(err ...)` or the node refused the call
	Remote(String),
	/// Stacks error
	#[error("Stacks error: {0}")]
	Stacks(#[from] StacksError),
}

/// A helper type for BNS results
pub type BnsResult<T> = Result<T, BnsError>;
