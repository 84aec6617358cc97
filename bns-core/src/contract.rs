use std::collections::HashMap;

use once_cell::sync::Lazy;
use stacks_core::{
	address::StacksAddress,
	clarity::{PrincipalData, Value},
	crypto::Hashing,
	network::{CHAIN_ID_MAINNET, CHAIN_ID_TESTNET},
	transaction::{
		builder::{
			make_unsigned_contract_call, ContractCallOptions, TransactionOptions,
		},
		post_condition::AssetInfo,
		TransactionEnvelope,
	},
	validated_strings::{clarity_name::ClarityName, contract_name::ContractName},
};
use tracing::debug;

use crate::{BnsError, BnsResult};

/// Name of the registry contract on every network
pub const BNS_CONTRACT_NAME: &str = "bns";
/// Non-fungible asset representing name ownership
pub const BNS_NAMES_ASSET: &str = "names";

static BNS_CONTRACTS: Lazy<HashMap<u32, BnsContract>> = Lazy::new(|| {
	[
		(CHAIN_ID_MAINNET, "SP000000000000000000002Q6VF78"),
		(CHAIN_ID_TESTNET, "ST000000000000000000002AMW42H"),
	]
	.into_iter()
	.map(|(chain_id, address)| {
		let contract = BnsContract {
			address: address
				.parse()
				.expect("the BNS deployer addresses are valid"),
			name: BNS_CONTRACT_NAME
				.parse()
				.expect("the BNS contract name is valid"),
		};

		(chain_id, contract)
	})
	.collect()
});

/// Where the registry contract lives on a network
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BnsContract {
	/// Deployer address
	pub address: StacksAddress,
	/// Contract name
	pub name: ContractName,
}

impl BnsContract {
	/// Looks up the registry contract of a chain. Unknown chains fail rather
	/// than fall back to another network's contract.
	pub fn for_chain_id(chain_id: u32) -> BnsResult<Self> {
		BNS_CONTRACTS
			.get(&chain_id)
			.cloned()
			.ok_or(BnsError::UnknownChainId(chain_id))
	}

	/// The contract as a principal
	pub fn principal(&self) -> PrincipalData {
		PrincipalData::Contract(self.address.clone(), self.name.clone())
	}

	/// The NFT whose ownership records who holds a name
	pub fn names_asset(&self) -> AssetInfo {
		let asset_name: ClarityName = BNS_NAMES_ASSET
			.parse()
			.expect("the BNS asset name is valid");

		AssetInfo {
			contract_address: self.address.clone(),
			contract_name: self.name.clone(),
			asset_name,
		}
	}

	/// Identifier of a name within [Self::names_asset]
	pub fn name_asset_value(name: &str, namespace: &str) -> Value {
		Value::tuple([
			("name", Value::buffer_from_str(name)),
			("namespace", Value::buffer_from_str(namespace)),
		])
		.expect("the name asset keys are valid and distinct")
	}
}

/// Origin address of the transaction, on the network it targets
pub(crate) fn sender_address(options: &TransactionOptions) -> StacksAddress {
	StacksAddress::p2pkh(options.network.address_version(), &options.public_key)
}

/// Builds an unsigned call of a registry function on the network the options
/// target
pub(crate) fn build_registry_call(
	function_name: &str,
	function_args: Vec<Value>,
	attachment: Option<Vec<u8>>,
	options: TransactionOptions,
) -> BnsResult<TransactionEnvelope> {
	let contract = BnsContract::for_chain_id(options.network.chain_id)?;

	let envelope = make_unsigned_contract_call(ContractCallOptions {
		contract_address: contract.address,
		contract_name: contract.name.to_string(),
		function_name: function_name.to_string(),
		function_args,
		attachment,
		options,
	})?;

	let txid = envelope.transaction().txid()?;

	debug!(
		function = function_name,
		txid = %txid.to_hex(),
		attachment = envelope.attachment().is_some(),
		"Built BNS transaction"
	);

	Ok(envelope)
}
