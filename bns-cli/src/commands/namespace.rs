use std::path::PathBuf;

use anyhow::anyhow;
use bns_core::namespace::{
	build_name_import_tx, build_namespace_preorder_tx, build_namespace_ready_tx,
	build_namespace_reveal_tx, NameImportOptions, NamespacePreorderOptions,
	NamespaceReadyOptions, NamespaceRevealOptions, PriceFunction, PRICE_BUCKETS,
};
use clap::{Args, Subcommand};
use stacks_core::address::StacksAddress;

use crate::commands::utils::{print_envelope, read_zonefile, TransactionArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum NamespaceCommand {
	/// Commit to a namespace and burn its price
	Preorder(NamespacePreorderArgs),
	/// Reveal a preordered namespace with its pricing rules
	Reveal(NamespaceRevealArgs),
	/// Import a name into a revealed namespace
	Import(NameImportArgs),
	/// Open a revealed namespace for registrations
	Ready(NamespaceReadyArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NamespacePreorderArgs {
	/// Namespace to preorder
	namespace: String,
	/// Salt of the commitment, keep it for the reveal
	#[clap(short, long)]
	salt: String,
	/// microSTX to burn, the namespace price
	#[clap(long)]
	stx_to_burn: u64,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct PriceFunctionArgs {
	/// Base price
	#[clap(long)]
	base: u128,
	/// Multiplier of the base price
	#[clap(long)]
	coefficient: u128,
	/// Comma separated exponents by name length
	#[clap(long, value_delimiter = ',', num_args = 1..)]
	buckets: Vec<u128>,
	/// Discount for names with non-alphabetic characters
	#[clap(long, default_value_t = 1)]
	non_alpha_discount: u128,
	/// Discount for names without vowels
	#[clap(long, default_value_t = 1)]
	no_vowel_discount: u128,
}

impl TryFrom<&PriceFunctionArgs> for PriceFunction {
	type Error = anyhow::Error;

	fn try_from(args: &PriceFunctionArgs) -> Result<Self, Self::Error> {
		let buckets: [u128; PRICE_BUCKETS] =
			args.buckets.as_slice().try_into().map_err(|_| {
				anyhow!(
					"Expected {PRICE_BUCKETS} price buckets, got {}",
					args.buckets.len()
				)
			})?;

		Ok(Self {
			base: args.base,
			coefficient: args.coefficient,
			buckets,
			non_alpha_discount: args.non_alpha_discount,
			no_vowel_discount: args.no_vowel_discount,
		})
	}
}

#[derive(Args, Debug, Clone)]
pub struct NamespaceRevealArgs {
	/// Namespace to reveal
	namespace: String,
	/// Salt used in the preorder
	#[clap(short, long)]
	salt: String,
	#[clap(flatten)]
	price_function: PriceFunctionArgs,
	/// Blocks before a name must be renewed, 0 for never
	#[clap(long)]
	lifetime: u128,
	/// Account allowed to import names before launch
	#[clap(long)]
	import_address: StacksAddress,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameImportArgs {
	/// Name to import, `name.namespace`
	name: String,
	/// Owner of the imported name
	#[clap(short, long)]
	beneficiary: StacksAddress,
	/// Path of the zone file
	#[clap(short, long)]
	zonefile: PathBuf,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NamespaceReadyArgs {
	/// Namespace to launch
	namespace: String,
	#[clap(flatten)]
	tx: TransactionArgs,
}

pub fn namespace(command: &NamespaceCommand) -> anyhow::Result<()> {
	let envelope = match command {
		NamespaceCommand::Preorder(args) => {
			build_namespace_preorder_tx(NamespacePreorderOptions {
				namespace: args.namespace.clone(),
				salt: args.salt.clone(),
				stx_to_burn: args.stx_to_burn,
				options: args.tx.transaction_options()?,
			})?
		}
		NamespaceCommand::Reveal(args) => {
			build_namespace_reveal_tx(NamespaceRevealOptions {
				namespace: args.namespace.clone(),
				salt: args.salt.clone(),
				price_function: PriceFunction::try_from(&args.price_function)?,
				lifetime: args.lifetime,
				namespace_import_address: args.import_address.clone(),
				options: args.tx.transaction_options()?,
			})?
		}
		NamespaceCommand::Import(args) => build_name_import_tx(NameImportOptions {
			name: args.name.clone(),
			beneficiary: args.beneficiary.clone(),
			zonefile: read_zonefile(&args.zonefile)?,
			options: args.tx.transaction_options()?,
		})?,
		NamespaceCommand::Ready(args) => {
			build_namespace_ready_tx(NamespaceReadyOptions {
				namespace: args.namespace.clone(),
				options: args.tx.transaction_options()?,
			})?
		}
	};

	print_envelope(&envelope)
}
