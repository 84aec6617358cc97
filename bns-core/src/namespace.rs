/*!
Namespace transactions: preorder, reveal, name import and ready.

A namespace is preordered with a salted commitment and a STX burn, revealed
together with its pricing rules, optionally seeded with imported names and
finally launched with `namespace-ready`.
*/
use stacks_core::{
	address::StacksAddress,
	clarity::Value,
	transaction::{
		builder::TransactionOptions,
		post_condition::{
			FungibleConditionCode, PostConditionPrincipal, TransactionPostCondition,
		},
		TransactionEnvelope,
	},
};

use crate::{
	commitment::{hash_salted_name, zonefile_hash},
	contract::{build_registry_call, sender_address},
	fqn::FullyQualifiedName,
	BnsResult,
};

/// Number of price buckets in a namespace price function
pub const PRICE_BUCKETS: usize = 16;

/// How the registry prices names in a namespace
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceFunction {
	/// Base price
	pub base: u128,
	/// Multiplier of the base price
	pub coefficient: u128,
	/// Exponents by name length, the last bucket covers every longer name
	pub buckets: [u128; PRICE_BUCKETS],
	/// Discount for names containing non-alphabetic characters
	pub non_alpha_discount: u128,
	/// Discount for names without vowels
	pub no_vowel_discount: u128,
}

/// Options for `namespace-preorder`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespacePreorderOptions {
	/// Namespace to preorder
	pub namespace: String,
	/// Salt of the commitment, revealed later
	pub salt: String,
	/// microSTX burnt by the preorder
	pub stx_to_burn: u64,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `namespace-reveal`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceRevealOptions {
	/// Namespace to reveal
	pub namespace: String,
	/// Salt used in the preorder
	pub salt: String,
	/// Pricing rules
	pub price_function: PriceFunction,
	/// Blocks a name stays registered before it must be renewed
	pub lifetime: u128,
	/// Account allowed to import names until the namespace is ready
	pub namespace_import_address: StacksAddress,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `name-import`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NameImportOptions {
	/// Name to import, `name.namespace`
	pub name: String,
	/// Owner of the imported name
	pub beneficiary: StacksAddress,
	/// Zone file of the name
	pub zonefile: Vec<u8>,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Options for `namespace-ready`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamespaceReadyOptions {
	/// Namespace to launch
	pub namespace: String,
	/// Shared transaction options
	pub options: TransactionOptions,
}

/// Builds a `namespace-preorder` committing to the namespace and salt. The
/// sender must burn exactly `stx_to_burn`.
pub fn build_namespace_preorder_tx(
	preorder: NamespacePreorderOptions,
) -> BnsResult<TransactionEnvelope> {
	let NamespacePreorderOptions {
		namespace,
		salt,
		stx_to_burn,
		mut options,
	} = preorder;

	let commitment = hash_salted_name(&namespace, &salt);

	let burn = TransactionPostCondition::Stx(
		PostConditionPrincipal::Standard(sender_address(&options)),
		FungibleConditionCode::SentEq,
		stx_to_burn,
	);
	options.post_conditions.push(burn);

	build_registry_call(
		"namespace-preorder",
		vec![
			Value::buffer(commitment.as_ref()),
			Value::UInt(stx_to_burn.into()),
		],
		None,
		options,
	)
}

/// Builds a `namespace-reveal` disclosing the namespace, its salt and pricing
pub fn build_namespace_reveal_tx(
	reveal: NamespaceRevealOptions,
) -> BnsResult<TransactionEnvelope> {
	let NamespaceRevealOptions {
		namespace,
		salt,
		price_function,
		lifetime,
		namespace_import_address,
		options,
	} = reveal;

	let mut function_args = vec![
		Value::buffer_from_str(&namespace),
		Value::buffer_from_str(&salt),
		Value::UInt(price_function.base),
		Value::UInt(price_function.coefficient),
	];
	function_args.extend(price_function.buckets.map(Value::UInt));
	function_args.extend([
		Value::UInt(price_function.non_alpha_discount),
		Value::UInt(price_function.no_vowel_discount),
		Value::UInt(lifetime),
		Value::standard_principal(namespace_import_address),
	]);

	build_registry_call("namespace-reveal", function_args, None, options)
}

/// Builds a `name-import` into a revealed namespace. The zone file travels
/// as the attachment, only its hash is a function argument.
pub fn build_name_import_tx(
	import: NameImportOptions,
) -> BnsResult<TransactionEnvelope> {
	let fqn = FullyQualifiedName::parse(&import.name)?;
	fqn.ensure_not_subdomain("import")?;

	let zonefile_hash = zonefile_hash(&import.zonefile);

	build_registry_call(
		"name-import",
		vec![
			Value::buffer_from_str(fqn.namespace()),
			Value::buffer_from_str(fqn.name()),
			Value::standard_principal(import.beneficiary),
			Value::buffer(zonefile_hash.as_ref()),
		],
		Some(import.zonefile),
		import.options,
	)
}

/// Builds a `namespace-ready`, opening the namespace to registrations
pub fn build_namespace_ready_tx(
	ready: NamespaceReadyOptions,
) -> BnsResult<TransactionEnvelope> {
	build_registry_call(
		"namespace-ready",
		vec![Value::buffer_from_str(&ready.namespace)],
		None,
		ready.options,
	)
}

#[cfg(test)]
mod tests {
	use stacks_core::{
		crypto::PublicKey,
		transaction::payload::{TransactionContractCall, TransactionPayload},
		StacksNetwork,
	};

	use super::*;
	use crate::BnsError;

	fn options() -> TransactionOptions {
		let public_key = PublicKey::from_slice(
			&hex::decode(
				"02e2ce887c1f1654936fbb7d4036749da5e7b9b64af406e1f3535c8f4336de1c6e",
			)
			.unwrap(),
		)
		.unwrap();

		TransactionOptions::new(public_key, StacksNetwork::mainnet())
	}

	fn contract_call(envelope: &TransactionEnvelope) -> &TransactionContractCall {
		match &envelope.transaction().payload {
			TransactionPayload::ContractCall(call) => call,
			payload => panic!("Unexpected payload {payload:?}"),
		}
	}

	#[test]
	fn should_build_namespace_preorder() {
		let envelope = build_namespace_preorder_tx(NamespacePreorderOptions {
			namespace: "id".to_string(),
			salt: "pepper".to_string(),
			stx_to_burn: 640_000_000,
			options: options(),
		})
		.unwrap();

		let call = contract_call(&envelope);

		assert_eq!(
			call.to_string(),
			"SP000000000000000000002Q6VF78.bns::namespace-preorder"
		);
		assert_eq!(
			call.function_args,
			vec![
				Value::buffer(hash_salted_name("id", "pepper").as_ref()),
				Value::UInt(640_000_000),
			]
		);
		assert_eq!(
			envelope.transaction().post_conditions,
			vec![TransactionPostCondition::Stx(
				PostConditionPrincipal::Standard(
					"SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap()
				),
				FungibleConditionCode::SentEq,
				640_000_000,
			)]
		);
		assert!(envelope.attachment().is_none());
	}

	#[test]
	fn should_build_namespace_reveal_arguments_in_order() {
		let mut buckets = [1; PRICE_BUCKETS];
		buckets[15] = 16;

		let envelope = build_namespace_reveal_tx(NamespaceRevealOptions {
			namespace: "id".to_string(),
			salt: "pepper".to_string(),
			price_function: PriceFunction {
				base: 10,
				coefficient: 2,
				buckets,
				non_alpha_discount: 3,
				no_vowel_discount: 4,
			},
			lifetime: 52_595,
			namespace_import_address: "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK"
				.parse()
				.unwrap(),
			options: options(),
		})
		.unwrap();

		let args = &contract_call(&envelope).function_args;

		assert_eq!(args.len(), 4 + PRICE_BUCKETS + 4);
		assert_eq!(args[0], Value::buffer_from_str("id"));
		assert_eq!(args[1], Value::buffer_from_str("pepper"));
		assert_eq!(args[2], Value::UInt(10));
		assert_eq!(args[19], Value::UInt(16));
		assert_eq!(args[20], Value::UInt(3));
		assert_eq!(args[22], Value::UInt(52_595));
		assert!(matches!(args[23], Value::Principal(_)));
	}

	#[test]
	fn should_attach_zonefile_to_name_import() {
		let zonefile = b"$ORIGIN alice.id\n".to_vec();
		let envelope = build_name_import_tx(NameImportOptions {
			name: "alice.id".to_string(),
			beneficiary: "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap(),
			zonefile: zonefile.clone(),
			options: options(),
		})
		.unwrap();

		assert_eq!(envelope.attachment(), Some(zonefile.as_slice()));
		assert_eq!(
			contract_call(&envelope).function_args[3],
			Value::buffer(zonefile_hash(&zonefile).as_ref())
		);
	}

	#[test]
	fn should_reject_subdomain_imports() {
		let result = build_name_import_tx(NameImportOptions {
			name: "bob.alice.id".to_string(),
			beneficiary: "SPR4FMGJCD78NF4FRGPM621CW1KHNFEG0HSRDSPK".parse().unwrap(),
			zonefile: vec![],
			options: options(),
		});

		assert!(matches!(result, Err(BnsError::Validation(_))));
	}

	#[test]
	fn should_fail_on_unknown_chain() {
		let mut options = options();
		options.network.chain_id = 42;

		let result = build_namespace_ready_tx(NamespaceReadyOptions {
			namespace: "id".to_string(),
			options,
		});

		assert!(matches!(result, Err(BnsError::UnknownChainId(42))));
	}
}
