/*!
Builders for unsigned transactions.

Every builder validates its string inputs first, then assembles a
[StacksTransaction] whose version and chain id come from the network
descriptor. Signing happens elsewhere: the returned envelope carries an empty
signature for its origin.
*/
use crate::{
	address::StacksAddress,
	clarity::{PrincipalData, Value},
	crypto::PublicKey,
	network::StacksNetwork,
	transaction::{
		auth::{TransactionAuth, TransactionSpendingCondition},
		payload::{
			ClarityVersion, TransactionContractCall, TransactionPayload,
			TransactionSmartContract,
		},
		post_condition::TransactionPostCondition,
		token_transfer_memo::TokenTransferMemo,
		StacksTransaction, TransactionAnchorMode, TransactionEnvelope,
		TransactionPostConditionMode,
	},
	validated_strings::{
		clarity_name::ClarityName, contract_name::ContractName,
		stacks_string::StacksString,
	},
	StacksResult,
};

/// Options shared by every transaction builder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionOptions {
	/// Public key of the origin
	pub public_key: PublicKey,
	/// Origin account nonce
	pub nonce: u64,
	/// Fee in microSTX. Ignored when sponsored, the sponsor sets it later.
	pub fee: u64,
	/// Network the transaction is built for
	pub network: StacksNetwork,
	/// Anchor mode
	pub anchor_mode: TransactionAnchorMode,
	/// Post condition mode
	pub post_condition_mode: TransactionPostConditionMode,
	/// Post conditions
	pub post_conditions: Vec<TransactionPostCondition>,
	/// Whether a sponsor will pay the fee
	pub sponsored: bool,
}

impl TransactionOptions {
	/// Options for an unsponsored transaction with nonce and fee zero, any
	/// anchor mode and deny mode post conditions
	pub fn new(public_key: PublicKey, network: StacksNetwork) -> Self {
		Self {
			public_key,
			nonce: 0,
			fee: 0,
			network,
			anchor_mode: TransactionAnchorMode::default(),
			post_condition_mode: TransactionPostConditionMode::default(),
			post_conditions: vec![],
			sponsored: false,
		}
	}

	fn auth(&self) -> TransactionAuth {
		if self.sponsored {
			TransactionAuth::Sponsored(
				TransactionSpendingCondition::singlesig_p2pkh(
					&self.public_key,
					self.nonce,
					0,
				),
				TransactionSpendingCondition::sentinel(),
			)
		} else {
			TransactionAuth::Standard(
				TransactionSpendingCondition::singlesig_p2pkh(
					&self.public_key,
					self.nonce,
					self.fee,
				),
			)
		}
	}

	fn into_transaction(self, payload: TransactionPayload) -> StacksTransaction {
		StacksTransaction {
			version: self.network.transaction_version(),
			chain_id: self.network.chain_id,
			auth: self.auth(),
			anchor_mode: self.anchor_mode,
			post_condition_mode: self.post_condition_mode,
			post_conditions: self.post_conditions,
			payload,
		}
	}
}

/// Options for a contract call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractCallOptions {
	/// Deployer of the contract
	pub contract_address: StacksAddress,
	/// Name of the contract
	pub contract_name: String,
	/// Name of the public function
	pub function_name: String,
	/// Arguments in declaration order
	pub function_args: Vec<Value>,
	/// Out of band data such as a zone file
	pub attachment: Option<Vec<u8>>,
	/// Shared options
	pub options: TransactionOptions,
}

/// Options for a contract deployment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContractDeployOptions {
	/// Name the contract is deployed under
	pub contract_name: String,
	/// Clarity source
	pub code_body: String,
	/// Clarity version, if pinned
	pub clarity_version: Option<ClarityVersion>,
	/// Shared options
	pub options: TransactionOptions,
}

/// Options for a STX transfer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenTransferOptions {
	/// Recipient of the transfer
	pub recipient: PrincipalData,
	/// Amount in microSTX
	pub amount: u64,
	/// Memo of at most 34 bytes
	pub memo: Vec<u8>,
	/// Shared options
	pub options: TransactionOptions,
}

/// Builds an unsigned contract call
pub fn make_unsigned_contract_call(
	call: ContractCallOptions,
) -> StacksResult<TransactionEnvelope> {
	let contract_name: ContractName = call.contract_name.parse()?;
	let function_name: ClarityName = call.function_name.parse()?;

	let payload = TransactionPayload::ContractCall(TransactionContractCall {
		address: call.contract_address,
		contract_name,
		function_name,
		function_args: call.function_args,
	});

	Ok(TransactionEnvelope::new(
		call.options.into_transaction(payload),
		call.attachment,
	))
}

/// Builds an unsigned contract deployment
pub fn make_unsigned_contract_deploy(
	deploy: ContractDeployOptions,
) -> StacksResult<TransactionEnvelope> {
	let name: ContractName = deploy.contract_name.parse()?;
	let code_body: StacksString = deploy.code_body.parse()?;

	let payload = TransactionPayload::SmartContract(
		TransactionSmartContract { name, code_body },
		deploy.clarity_version,
	);

	Ok(TransactionEnvelope::new(
		deploy.options.into_transaction(payload),
		None,
	))
}

/// Builds an unsigned STX transfer
pub fn make_unsigned_token_transfer(
	transfer: TokenTransferOptions,
) -> StacksResult<TransactionEnvelope> {
	let memo = TokenTransferMemo::new(&transfer.memo)?;

	let payload =
		TransactionPayload::TokenTransfer(transfer.recipient, transfer.amount, memo);

	Ok(TransactionEnvelope::new(
		transfer.options.into_transaction(payload),
		None,
	))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::{
		network::CHAIN_ID_TESTNET, transaction::TransactionVersion,
		validated_strings::Validate, StacksError,
	};

	fn options() -> TransactionOptions {
		let public_key = PublicKey::from_slice(
			&hex::decode(
				"02e2ce887c1f1654936fbb7d4036749da5e7b9b64af406e1f3535c8f4336de1c6e",
			)
			.unwrap(),
		)
		.unwrap();

		TransactionOptions {
			nonce: 12,
			fee: 2_000,
			..TransactionOptions::new(public_key, StacksNetwork::testnet())
		}
	}

	fn call(function_name: &str) -> ContractCallOptions {
		ContractCallOptions {
			contract_address: "ST000000000000000000002AMW42H".parse().unwrap(),
			contract_name: "bns".to_string(),
			function_name: function_name.to_string(),
			function_args: vec![Value::buffer_from_str("btc"), Value::UInt(1)],
			attachment: None,
			options: options(),
		}
	}

	#[test]
	fn should_take_version_and_chain_id_from_network() {
		let envelope = make_unsigned_contract_call(call("namespace-ready")).unwrap();
		let transaction = envelope.transaction();

		assert_eq!(transaction.version, TransactionVersion::Testnet);
		assert_eq!(transaction.chain_id, CHAIN_ID_TESTNET);
		assert_eq!(transaction.auth.origin().nonce(), 12);
		assert_eq!(transaction.auth.origin().tx_fee(), 2_000);
	}

	#[test]
	fn should_keep_function_arguments_in_order() {
		let envelope = make_unsigned_contract_call(call("namespace-ready")).unwrap();

		match &envelope.transaction().payload {
			TransactionPayload::ContractCall(call) => {
				assert_eq!(call.function_name.as_str(), "namespace-ready");
				assert_eq!(
					call.function_args,
					vec![Value::buffer_from_str("btc"), Value::UInt(1)]
				);
			}
			payload => panic!("Unexpected payload {payload:?}"),
		}
	}

	#[test]
	fn should_reject_invalid_names_before_encoding() {
		let result = make_unsigned_contract_call(call("not a function"));

		assert!(matches!(result, Err(StacksError::InvalidArguments(_))));
	}

	#[test]
	fn should_zero_fee_and_add_sentinel_when_sponsored() {
		let mut call = call("namespace-ready");
		call.options.sponsored = true;

		let transaction = make_unsigned_contract_call(call)
			.unwrap()
			.into_parts()
			.0;

		assert_eq!(transaction.auth.origin().tx_fee(), 0);
		assert_eq!(
			transaction.auth.sponsor(),
			Some(&TransactionSpendingCondition::sentinel())
		);
	}

	#[test]
	fn should_carry_attachment() {
		let mut call = call("name-import");
		call.attachment = Some(b"$ORIGIN alice.btc".to_vec());

		let envelope = make_unsigned_contract_call(call).unwrap();

		assert_eq!(envelope.attachment(), Some(&b"$ORIGIN alice.btc"[..]));
	}

	#[test]
	fn should_build_deploys() {
		let envelope = make_unsigned_contract_deploy(ContractDeployOptions {
			contract_name: "hello-world".to_string(),
			code_body: "(define-read-only (hi) u1)".to_string(),
			clarity_version: Some(ClarityVersion::Clarity2),
			options: options(),
		})
		.unwrap();

		assert!(matches!(
			envelope.transaction().payload,
			TransactionPayload::SmartContract(_, Some(ClarityVersion::Clarity2))
		));

		let result = make_unsigned_contract_deploy(ContractDeployOptions {
			contract_name: "hello-world".to_string(),
			code_body: "(print \"\u{e9}\")".to_string(),
			clarity_version: None,
			options: options(),
		});

		assert!(result.is_err());
	}

	#[test]
	fn should_pad_and_limit_transfer_memos() {
		let transfer = |memo: &[u8]| TokenTransferOptions {
			recipient: "ST000000000000000000002AMW42H".parse().unwrap(),
			amount: 100,
			memo: memo.to_vec(),
			options: options(),
		};

		let envelope = make_unsigned_token_transfer(transfer(b"thanks")).unwrap();

		match &envelope.transaction().payload {
			TransactionPayload::TokenTransfer(_, amount, memo) => {
				assert_eq!(*amount, 100);
				assert_eq!(&memo.as_bytes()[..6], b"thanks");
			}
			payload => panic!("Unexpected payload {payload:?}"),
		}

		assert!(make_unsigned_token_transfer(transfer(&[b'x'; 35])).is_err());
	}
}
