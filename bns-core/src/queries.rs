/*!
Read-only calls against the registry contract and the interpretation of
their results.

A [ReadOnlyFunctionCall] describes the request. Sending it is left to the
caller. The node's answer is decoded by [ReadOnlyResponse::into_value] and
then narrowed to a price or a flag.
*/
use serde::{Deserialize, Serialize};
use stacks_core::{
	address::StacksAddress,
	clarity::Value,
	codec::Codec,
	validated_strings::{clarity_name::ClarityName, contract_name::ContractName},
	StacksNetwork,
};

use crate::{contract::BnsContract, fqn::FullyQualifiedName, BnsError, BnsResult};

/// A call of a read-only contract function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReadOnlyFunctionCall {
	/// Deployer of the contract
	pub contract_address: StacksAddress,
	/// Name of the contract
	pub contract_name: ContractName,
	/// Name of the read-only function
	pub function_name: ClarityName,
	/// Arguments in declaration order
	pub function_args: Vec<Value>,
	/// Account the call is evaluated as
	pub sender_address: StacksAddress,
}

/// Body of a read-only call request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyRequest {
	/// Sender address
	pub sender: String,
	/// `0x` prefixed hex of each serialized argument
	pub arguments: Vec<String>,
}

/// Answer of the node to a read-only call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadOnlyResponse {
	/// Whether the call was evaluated
	pub okay: bool,
	/// `0x` prefixed hex of the serialized result
	pub result: Option<String>,
	/// Why the call could not be evaluated
	pub cause: Option<String>,
}

impl ReadOnlyResponse {
	/// Decodes the result, surfacing a refused call as [BnsError::Remote]
	pub fn into_value(self) -> BnsResult<Value> {
		match (self.okay, self.result) {
			(true, Some(result)) => Ok(Value::deserialize_from_hex(result)?),
			(true, None) => Err(BnsError::Remote(
				"Read-only call succeeded without a result".to_string(),
			)),
			(false, _) => Err(BnsError::Remote(
				self.cause
					.unwrap_or_else(|| "Read-only call failed".to_string()),
			)),
		}
	}
}

impl ReadOnlyFunctionCall {
	fn registry(
		network: &StacksNetwork,
		function_name: &str,
		function_args: Vec<Value>,
		sender_address: StacksAddress,
	) -> BnsResult<Self> {
		let contract = BnsContract::for_chain_id(network.chain_id)?;

		Ok(Self {
			contract_address: contract.address,
			contract_name: contract.name,
			function_name: function_name.parse()?,
			function_args,
			sender_address,
		})
	}

	/// Path of the node endpoint evaluating this call, relative to the API root
	pub fn path(&self) -> String {
		format!(
			"v2/contracts/call-read/{}/{}/{}",
			self.contract_address, self.contract_name, self.function_name
		)
	}

	/// Request body of this call
	pub fn request(&self) -> BnsResult<ReadOnlyRequest> {
		let arguments = self
			.function_args
			.iter()
			.map(|arg| Ok(format!("0x{}", arg.serialize_to_hex()?)))
			.collect::<BnsResult<Vec<_>>>()?;

		Ok(ReadOnlyRequest {
			sender: self.sender_address.to_string(),
			arguments,
		})
	}
}

/// `get-namespace-price`: price of registering a namespace
pub fn get_namespace_price(
	namespace: &str,
	sender_address: StacksAddress,
	network: &StacksNetwork,
) -> BnsResult<ReadOnlyFunctionCall> {
	ReadOnlyFunctionCall::registry(
		network,
		"get-namespace-price",
		vec![Value::buffer_from_str(namespace)],
		sender_address,
	)
}

/// `get-name-price`: price of registering a name
pub fn get_name_price(
	fully_qualified_name: &str,
	sender_address: StacksAddress,
	network: &StacksNetwork,
) -> BnsResult<ReadOnlyFunctionCall> {
	let fqn = FullyQualifiedName::parse(fully_qualified_name)?;
	fqn.ensure_not_subdomain("price")?;

	ReadOnlyFunctionCall::registry(
		network,
		"get-name-price",
		vec![
			Value::buffer_from_str(fqn.namespace()),
			Value::buffer_from_str(fqn.name()),
		],
		sender_address,
	)
}

/// `can-namespace-be-registered`: whether a namespace is available
pub fn can_namespace_be_registered(
	namespace: &str,
	sender_address: StacksAddress,
	network: &StacksNetwork,
) -> BnsResult<ReadOnlyFunctionCall> {
	ReadOnlyFunctionCall::registry(
		network,
		"can-namespace-be-registered",
		vec![Value::buffer_from_str(namespace)],
		sender_address,
	)
}

/// `can-name-be-registered`: whether a name is available
pub fn can_name_be_registered(
	fully_qualified_name: &str,
	sender_address: StacksAddress,
	network: &StacksNetwork,
) -> BnsResult<ReadOnlyFunctionCall> {
	let fqn = FullyQualifiedName::parse(fully_qualified_name)?;
	fqn.ensure_not_subdomain("check")?;

	ReadOnlyFunctionCall::registry(
		network,
		"can-name-be-registered",
		vec![
			Value::buffer_from_str(fqn.namespace()),
			Value::buffer_from_str(fqn.name()),
		],
		sender_address,
	)
}

fn expect_ok<'a>(value: &'a Value, expected: &'static str) -> BnsResult<&'a Value> {
	match value {
		Value::Response(response) if response.committed => Ok(response.data.as_ref()),
		Value::Response(response) => Err(BnsError::Remote(response.data.to_string())),
		other => Err(BnsError::UnexpectedType {
			expected,
			found: other.to_string(),
		}),
	}
}

/// Reads a price from `(ok uint)` or a non-negative `(ok int)`
pub fn interpret_price(value: &Value) -> BnsResult<u128> {
	const EXPECTED: &str = "(ok uint)";

	match expect_ok(value, EXPECTED)? {
		Value::UInt(price) => Ok(*price),
		Value::Int(price) => u128::try_from(*price).map_err(|_| {
			BnsError::UnexpectedType {
				expected: EXPECTED,
				found: value.to_string(),
			}
		}),
		_ => Err(BnsError::UnexpectedType {
			expected: EXPECTED,
			found: value.to_string(),
		}),
	}
}

/// Reads a flag from `(ok bool)`
pub fn interpret_bool(value: &Value) -> BnsResult<bool> {
	const EXPECTED: &str = "(ok bool)";

	match expect_ok(value, EXPECTED)? {
		Value::Bool(flag) => Ok(*flag),
		_ => Err(BnsError::UnexpectedType {
			expected: EXPECTED,
			found: value.to_string(),
		}),
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn sender() -> StacksAddress {
		"SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap()
	}

	#[test]
	fn should_describe_name_price_call() {
		let call =
			get_name_price("alice.btc", sender(), &StacksNetwork::mainnet()).unwrap();

		assert_eq!(
			call.path(),
			"v2/contracts/call-read/SP000000000000000000002Q6VF78/bns/get-name-price"
		);
		assert_eq!(
			call.request().unwrap(),
			ReadOnlyRequest {
				sender: "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".to_string(),
				arguments: vec![
					"0x0200000003627463".to_string(),
					"0x0200000005616c696365".to_string(),
				],
			}
		);
	}

	#[test]
	fn should_serialize_request_body() {
		let call =
			can_namespace_be_registered("id", sender(), &StacksNetwork::testnet())
				.unwrap();

		assert_eq!(
			serde_json::to_value(call.request().unwrap()).unwrap(),
			serde_json::json!({
				"sender": "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK",
				"arguments": ["0x02000000026964"],
			})
		);
		assert_eq!(
			call.path(),
			"v2/contracts/call-read/ST000000000000000000002AMW42H/bns/can-namespace-be-registered"
		);
	}

	#[test]
	fn should_reject_subdomain_queries() {
		let network = StacksNetwork::mainnet();

		assert!(matches!(
			get_name_price("bob.alice.btc", sender(), &network),
			Err(BnsError::Validation(_))
		));
		assert!(matches!(
			can_name_be_registered("bob.alice.btc", sender(), &network),
			Err(BnsError::Validation(_))
		));
	}

	#[test]
	fn should_interpret_prices() {
		assert_eq!(interpret_price(&Value::okay(Value::UInt(2_000))).unwrap(), 2_000);
		assert_eq!(interpret_price(&Value::okay(Value::Int(7))).unwrap(), 7);
		assert!(matches!(
			interpret_price(&Value::okay(Value::Int(-1))),
			Err(BnsError::UnexpectedType { .. })
		));
		assert!(matches!(
			interpret_price(&Value::okay(Value::Bool(true))),
			Err(BnsError::UnexpectedType { .. })
		));
		assert!(matches!(
			interpret_price(&Value::UInt(1)),
			Err(BnsError::UnexpectedType { .. })
		));
	}

	#[test]
	fn should_surface_contract_errors() {
		let result = interpret_price(&Value::error(Value::Int(1001)));

		match result {
			Err(BnsError::Remote(cause)) => assert_eq!(cause, "1001"),
			other => panic!("Unexpected result {other:?}"),
		}
	}

	#[test]
	fn should_interpret_flags() {
		assert!(interpret_bool(&Value::okay(Value::Bool(true))).unwrap());
		assert!(!interpret_bool(&Value::okay(Value::Bool(false))).unwrap());
		assert!(matches!(
			interpret_bool(&Value::okay(Value::UInt(1))),
			Err(BnsError::UnexpectedType { .. })
		));
	}

	#[test]
	fn should_decode_node_responses() {
		let response: ReadOnlyResponse = serde_json::from_value(serde_json::json!({
			"okay": true,
			"result": "0x0701000000000000000000000000000007d0",
		}))
		.unwrap();

		assert_eq!(
			response.into_value().unwrap(),
			Value::okay(Value::UInt(2_000))
		);

		let refused = ReadOnlyResponse {
			okay: false,
			result: None,
			cause: Some("NoSuchContract".to_string()),
		};

		assert!(matches!(
			refused.into_value(),
			Err(BnsError::Remote(cause)) if cause == "NoSuchContract"
		));
	}
}
