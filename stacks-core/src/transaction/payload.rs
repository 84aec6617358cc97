/*!
Types for the payload of a Stacks transaction
*/
use std::{fmt, io};

use strum::FromRepr;

use crate::{
	address::StacksAddress,
	clarity::{PrincipalData, Value},
	codec::{ByteReader, Codec, DecodeResult},
	transaction::token_transfer_memo::TokenTransferMemo,
	validated_strings::{
		clarity_name::ClarityName, contract_name::ContractName,
		stacks_string::StacksString,
	},
};

#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
enum TransactionPayloadId {
	TokenTransfer = 0x00,
	SmartContract = 0x01,
	ContractCall = 0x02,
	VersionedSmartContract = 0x06,
}

impl_byte_enum_codec!(TransactionPayloadId);

/// A call of a public contract function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionContractCall {
	/// Deployer of the contract
	pub address: StacksAddress,
	/// Name of the contract
	pub contract_name: ContractName,
	/// Name of the public function
	pub function_name: ClarityName,
	/// Arguments, in the order the function declares them
	pub function_args: Vec<Value>,
}

impl fmt::Display for TransactionContractCall {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}.{}::{}",
			self.address, self.contract_name, self.function_name
		)
	}
}

impl Codec for TransactionContractCall {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		self.address.codec_serialize(dest)?;
		self.contract_name.codec_serialize(dest)?;
		self.function_name.codec_serialize(dest)?;
		self.function_args.codec_serialize(dest)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self {
			address: StacksAddress::codec_deserialize(reader)?,
			contract_name: ContractName::codec_deserialize(reader)?,
			function_name: ClarityName::codec_deserialize(reader)?,
			function_args: Vec::codec_deserialize(reader)?,
		})
	}
}

/// A contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionSmartContract {
	/// Name the contract is deployed under
	pub name: ContractName,
	/// Clarity source
	pub code_body: StacksString,
}

impl Codec for TransactionSmartContract {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		self.name.codec_serialize(dest)?;
		self.code_body.codec_serialize(dest)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self {
			name: ContractName::codec_deserialize(reader)?,
			code_body: StacksString::codec_deserialize(reader)?,
		})
	}
}

/// Clarity language version a contract is deployed with
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClarityVersion {
	/// Clarity 1
	Clarity1 = 1,
	/// Clarity 2
	Clarity2 = 2,
	/// Clarity 3
	Clarity3 = 3,
}

impl_byte_enum_codec!(ClarityVersion);

/// What a transaction does
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPayload {
	/// Transfers microSTX to the recipient
	TokenTransfer(PrincipalData, u64, TokenTransferMemo),
	/// Calls a public contract function
	ContractCall(TransactionContractCall),
	/// Deploys a contract, optionally pinned to a Clarity version
	SmartContract(TransactionSmartContract, Option<ClarityVersion>),
}

impl Codec for TransactionPayload {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::TokenTransfer(recipient, amount, memo) => {
				TransactionPayloadId::TokenTransfer.codec_serialize(dest)?;
				recipient.codec_serialize(dest)?;
				amount.codec_serialize(dest)?;
				memo.codec_serialize(dest)
			}
			Self::ContractCall(call) => {
				TransactionPayloadId::ContractCall.codec_serialize(dest)?;
				call.codec_serialize(dest)
			}
			Self::SmartContract(contract, None) => {
				TransactionPayloadId::SmartContract.codec_serialize(dest)?;
				contract.codec_serialize(dest)
			}
			Self::SmartContract(contract, Some(version)) => {
				TransactionPayloadId::VersionedSmartContract
					.codec_serialize(dest)?;
				version.codec_serialize(dest)?;
				contract.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let payload = match TransactionPayloadId::codec_deserialize(reader)? {
			TransactionPayloadId::TokenTransfer => Self::TokenTransfer(
				PrincipalData::codec_deserialize(reader)?,
				u64::codec_deserialize(reader)?,
				TokenTransferMemo::codec_deserialize(reader)?,
			),
			TransactionPayloadId::ContractCall => Self::ContractCall(
				TransactionContractCall::codec_deserialize(reader)?,
			),
			TransactionPayloadId::SmartContract => Self::SmartContract(
				TransactionSmartContract::codec_deserialize(reader)?,
				None,
			),
			TransactionPayloadId::VersionedSmartContract => {
				let version = ClarityVersion::codec_deserialize(reader)?;

				Self::SmartContract(
					TransactionSmartContract::codec_deserialize(reader)?,
					Some(version),
				)
			}
		};

		Ok(payload)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn bns_address() -> StacksAddress {
		"SP000000000000000000002Q6VF78".parse().unwrap()
	}

	#[test]
	fn should_keep_argument_order() {
		let call = TransactionContractCall {
			address: bns_address(),
			contract_name: "bns".parse().unwrap(),
			function_name: "name-register".parse().unwrap(),
			function_args: vec![Value::UInt(2), Value::Bool(true)],
		};

		let hex = TransactionPayload::ContractCall(call)
			.serialize_to_hex()
			.unwrap();

		assert_eq!(
			hex,
			format!(
				"0216{}03626e730d6e616d652d726567697374657200000002{}03",
				"00".repeat(20),
				format!("01{:032x}", 2),
			)
		);
	}

	#[test]
	fn should_display_contract_call() {
		let call = TransactionContractCall {
			address: bns_address(),
			contract_name: "bns".parse().unwrap(),
			function_name: "name-preorder".parse().unwrap(),
			function_args: vec![],
		};

		assert_eq!(
			call.to_string(),
			"SP000000000000000000002Q6VF78.bns::name-preorder"
		);
	}

	#[test]
	fn should_prefix_versioned_deploys() {
		let contract = TransactionSmartContract {
			name: "hello".parse().unwrap(),
			code_body: "(define-read-only (hi) u1)".parse().unwrap(),
		};

		let unversioned = TransactionPayload::SmartContract(contract.clone(), None)
			.serialize_to_vec()
			.unwrap();
		let versioned = TransactionPayload::SmartContract(
			contract,
			Some(ClarityVersion::Clarity2),
		)
		.serialize_to_vec()
		.unwrap();

		assert_eq!(unversioned[0], 0x01);
		assert_eq!(&versioned[..2], &[0x06, 0x02]);
		assert_eq!(&versioned[2..], &unversioned[1..]);
		// name length, name, u32 code length
		assert_eq!(&unversioned[1..7], b"\x05hello");
		assert_eq!(&unversioned[7..11], &26u32.to_be_bytes());
	}

	#[test]
	fn should_round_trip_payloads() {
		let payloads = [
			TransactionPayload::TokenTransfer(
				PrincipalData::Contract(bns_address(), "bns".parse().unwrap()),
				1,
				TokenTransferMemo::new(b"hi").unwrap(),
			),
			TransactionPayload::SmartContract(
				TransactionSmartContract {
					name: "a".parse().unwrap(),
					code_body: "".parse().unwrap(),
				},
				Some(ClarityVersion::Clarity3),
			),
		];

		for payload in payloads {
			let bytes = payload.serialize_to_vec().unwrap();

			assert_eq!(
				TransactionPayload::deserialize_from_slice(&bytes).unwrap(),
				payload
			);
		}
	}

	#[test]
	fn should_reject_unsupported_payloads() {
		// coinbase payloads are not part of the supported set
		assert!(TransactionPayload::deserialize_from_hex("04").is_err());
	}
}
