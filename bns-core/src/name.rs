/*!
Name transactions: preorder, register, update, transfer, revoke and renewal.

Every operation takes a fully qualified `name.namespace` and rejects
subdomains, which live off-chain.
*/
use stacks_core::{
	address::StacksAddress,
	clarity::Value,
	transaction::{
		builder::TransactionOptions,
		post_condition::{
			FungibleConditionCode, NonfungibleConditionCode, PostConditionPrincipal,
			TransactionPostCondition,
		},
		TransactionEnvelope,
	},
};

use crate::{
	commitment::{hash_salted_name, zonefile_hash},
	contract::{build_registry_call, sender_address, BnsContract},
	fqn::FullyQualifiedName,
	BnsResult,
};

/// Options for `name-preorder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamePreorderOptions {
	/// Name to preorder, `name.namespace`
	pub fully_qualified_name: String,
	/// Salt of the commitment, revealed by the registration
	pub salt: String,
	/// microSTX burnt by the preorder
	pub stx_to_burn: u64,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-register`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRegisterOptions {
	/// Name to register, `name.namespace`
	pub fully_qualified_name: String,
	/// Salt used in the preorder
	pub salt: String,
	/// Zone file of the name
	pub zonefile: Vec<u8>,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-update`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameUpdateOptions {
	/// Name to update, `name.namespace`
	pub fully_qualified_name: String,
	/// New zone file
	pub zonefile: Vec<u8>,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-transfer`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameTransferOptions {
	/// Name to transfer, `name.namespace`
	pub fully_qualified_name: String,
	/// Account receiving the name
	pub new_owner_address: StacksAddress,
	/// New zone file. Without one the name keeps no zone file.
	pub zonefile: Option<Vec<u8>>,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-revoke`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRevokeOptions {
	/// Name to revoke, `name.namespace`
	pub fully_qualified_name: String,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-renewal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameRenewalOptions {
	/// Name to renew, `name.namespace`
	pub fully_qualified_name: String,
	/// microSTX burnt by the renewal
	pub stx_to_burn: u64,
	/// Account receiving the name on renewal, if it changes hands
	pub new_owner_address: Option<StacksAddress>,
	/// New zone file
	pub zonefile: Option<Vec<u8>>,
	/// Shared transaction options
	pub options: TransactionOptions,
}

fn parse_top_level(fqn: &str, operation: &str) -> BnsResult<FullyQualifiedName> {
	let fqn = FullyQualifiedName::parse(fqn)?;
	fqn.ensure_not_subdomain(operation)?;

	Ok(fqn)
}

fn name_args(fqn: &FullyQualifiedName) -> Vec<Value> {
	vec![
		Value::buffer_from_str(fqn.namespace()),
		Value::buffer_from_str(fqn.name()),
	]
}

fn burn_post_condition(
	options: &TransactionOptions,
	stx_to_burn: u64,
) -> TransactionPostCondition {
	TransactionPostCondition::Stx(
		PostConditionPrincipal::Standard(sender_address(options)),
		FungibleConditionCode::SentEq,
		stx_to_burn,
	)
}

/// Builds a `name-preorder` committing to the name and salt
pub fn build_name_preorder_tx(
	preorder: NamePreorderOptions,
) -> BnsResult<TransactionEnvelope> {
	let NamePreorderOptions {
		fully_qualified_name,
		salt,
		stx_to_burn,
		mut options,
	} = preorder;

	let fqn = parse_top_level(&fully_qualified_name, "preorder")?;
	let commitment = hash_salted_name(&fqn.to_string(), &salt);

	let burn = burn_post_condition(&options, stx_to_burn);
	options.post_conditions.push(burn);

	build_registry_call(
		"name-preorder",
		vec![
			Value::buffer(commitment.as_ref()),
			Value::UInt(stx_to_burn.into()),
		],
		None,
		options,
	)
}

/// Builds a `name-register` revealing a preordered name
pub fn build_name_register_tx(
	register: NameRegisterOptions,
) -> BnsResult<TransactionEnvelope> {
	let fqn = parse_top_level(&register.fully_qualified_name, "register")?;

	let mut function_args = name_args(&fqn);
	function_args.extend([
		Value::buffer_from_str(&register.salt),
		Value::buffer(zonefile_hash(&register.zonefile).as_ref()),
	]);

	build_registry_call(
		"name-register",
		function_args,
		Some(register.zonefile),
		register.options,
	)
}

/// Builds a `name-update` pointing the name at a new zone file
pub fn build_name_update_tx(
	update: NameUpdateOptions,
) -> BnsResult<TransactionEnvelope> {
	let fqn = parse_top_level(&update.fully_qualified_name, "update")?;

	let mut function_args = name_args(&fqn);
	function_args.push(Value::buffer(zonefile_hash(&update.zonefile).as_ref()));

	build_registry_call(
		"name-update",
		function_args,
		Some(update.zonefile),
		update.options,
	)
}

/// Builds a `name-transfer`. Post conditions require the sender to give up
/// the name NFT and the recipient to keep it.
pub fn build_name_transfer_tx(
	transfer: NameTransferOptions,
) -> BnsResult<TransactionEnvelope> {
	let NameTransferOptions {
		fully_qualified_name,
		new_owner_address,
		zonefile,
		mut options,
	} = transfer;

	let fqn = parse_top_level(&fully_qualified_name, "transfer")?;
	let contract = BnsContract::for_chain_id(options.network.chain_id)?;
	let asset_value = BnsContract::name_asset_value(fqn.name(), fqn.namespace());

	let sender = sender_address(&options);

	options.post_conditions.extend([
		TransactionPostCondition::Nonfungible(
			PostConditionPrincipal::Standard(sender),
			contract.names_asset(),
			asset_value.clone(),
			NonfungibleConditionCode::Sent,
		),
		TransactionPostCondition::Nonfungible(
			PostConditionPrincipal::Standard(new_owner_address.clone()),
			contract.names_asset(),
			asset_value,
			NonfungibleConditionCode::NotSent,
		),
	]);

	let mut function_args = name_args(&fqn);
	function_args.extend([
		Value::standard_principal(new_owner_address),
		match &zonefile {
			Some(zonefile) => {
				Value::some(Value::buffer(zonefile_hash(zonefile).as_ref()))
			}
			None => Value::none(),
		},
	]);

	build_registry_call("name-transfer", function_args, zonefile, options)
}

/// Builds a `name-revoke`, making the name unresolvable
pub fn build_name_revoke_tx(
	revoke: NameRevokeOptions,
) -> BnsResult<TransactionEnvelope> {
	let fqn = parse_top_level(&revoke.fully_qualified_name, "revoke")?;

	build_registry_call("name-revoke", name_args(&fqn), None, revoke.options)
}

/// Builds a `name-renewal`, optionally handing the name to a new owner and
/// pointing it at a new zone file
pub fn build_name_renewal_tx(
	renewal: NameRenewalOptions,
) -> BnsResult<TransactionEnvelope> {
	let NameRenewalOptions {
		fully_qualified_name,
		stx_to_burn,
		new_owner_address,
		zonefile,
		mut options,
	} = renewal;

	let fqn = parse_top_level(&fully_qualified_name, "renew")?;

	let burn = burn_post_condition(&options, stx_to_burn);
	options.post_conditions.push(burn);

	let mut function_args = name_args(&fqn);
	function_args.extend([
		Value::UInt(stx_to_burn.into()),
		match new_owner_address {
			Some(address) => Value::some(Value::standard_principal(address)),
			None => Value::none(),
		},
		match &zonefile {
			Some(zonefile) => {
				Value::some(Value::buffer(zonefile_hash(zonefile).as_ref()))
			}
			None => Value::none(),
		},
	]);

	build_registry_call("name-renewal", function_args, zonefile, options)
}
