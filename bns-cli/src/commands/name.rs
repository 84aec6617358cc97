use std::path::PathBuf;

use bns_core::name::{
	build_name_preorder_tx, build_name_register_tx, build_name_renewal_tx,
	build_name_revoke_tx, build_name_transfer_tx, build_name_update_tx,
	NamePreorderOptions, NameRegisterOptions, NameRenewalOptions,
	NameRevokeOptions, NameTransferOptions, NameUpdateOptions,
};
use clap::{Args, Subcommand};
use stacks_core::address::StacksAddress;

use crate::commands::utils::{print_envelope, read_zonefile, TransactionArgs};

#[derive(Subcommand, Debug, Clone)]
pub enum NameCommand {
	/// Commit to a name and burn its price
	Preorder(NamePreorderArgs),
	/// Reveal and claim a preordered name
	Register(NameRegisterArgs),
	/// Replace the zone file of a name
	Update(NameUpdateArgs),
	/// Hand a name to another account
	Transfer(NameTransferArgs),
	/// Revoke a name for good
	Revoke(NameRevokeArgs),
	/// Extend the registration of a name
	Renew(NameRenewalArgs),
}

#[derive(Args, Debug, Clone)]
pub struct NamePreorderArgs {
	/// Name to preorder, `name.namespace`
	name: String,
	/// Salt of the commitment, keep it for the registration
	#[clap(short, long)]
	salt: String,
	/// microSTX to burn, the name price
	#[clap(long)]
	stx_to_burn: u64,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameRegisterArgs {
	/// Name to register, `name.namespace`
	name: String,
	/// Salt used in the preorder
	#[clap(short, long)]
	salt: String,
	/// Path of the zone file
	#[clap(short, long)]
	zonefile: PathBuf,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameUpdateArgs {
	/// Name to update, `name.namespace`
	name: String,
	/// Path of the new zone file
	#[clap(short, long)]
	zonefile: PathBuf,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameTransferArgs {
	/// Name to transfer, `name.namespace`
	name: String,
	/// Account receiving the name
	#[clap(short = 'o', long)]
	new_owner: StacksAddress,
	/// Path of the zone file the name keeps after the transfer
	#[clap(short, long)]
	zonefile: Option<PathBuf>,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameRevokeArgs {
	/// Name to revoke, `name.namespace`
	name: String,
	#[clap(flatten)]
	tx: TransactionArgs,
}

#[derive(Args, Debug, Clone)]
pub struct NameRenewalArgs {
	/// Name to renew, `name.namespace`
	name: String,
	/// microSTX to burn, the name price
	#[clap(long)]
	stx_to_burn: u64,
	/// Account receiving the name on renewal
	#[clap(short = 'o', long)]
	new_owner: Option<StacksAddress>,
	/// Path of a new zone file
	#[clap(short, long)]
	zonefile: Option<PathBuf>,
	#[clap(flatten)]
	tx: TransactionArgs,
}

pub fn name(command: &NameCommand) -> anyhow::Result<()> {
	let envelope = match command {
		NameCommand::Preorder(args) => build_name_preorder_tx(NamePreorderOptions {
			fully_qualified_name: args.name.clone(),
			salt: args.salt.clone(),
			stx_to_burn: args.stx_to_burn,
			options: args.tx.transaction_options()?,
		})?,
		NameCommand::Register(args) => build_name_register_tx(NameRegisterOptions {
			fully_qualified_name: args.name.clone(),
			salt: args.salt.clone(),
			zonefile: read_zonefile(&args.zonefile)?,
			options: args.tx.transaction_options()?,
		})?,
		NameCommand::Update(args) => build_name_update_tx(NameUpdateOptions {
			fully_qualified_name: args.name.clone(),
			zonefile: read_zonefile(&args.zonefile)?,
			options: args.tx.transaction_options()?,
		})?,
		NameCommand::Transfer(args) => build_name_transfer_tx(NameTransferOptions {
			fully_qualified_name: args.name.clone(),
			new_owner_address: args.new_owner.clone(),
			zonefile: args.zonefile.as_deref().map(read_zonefile).transpose()?,
			options: args.tx.transaction_options()?,
		})?,
		NameCommand::Revoke(args) => build_name_revoke_tx(NameRevokeOptions {
			fully_qualified_name: args.name.clone(),
			options: args.tx.transaction_options()?,
		})?,
		NameCommand::Renew(args) => build_name_renewal_tx(NameRenewalOptions {
			fully_qualified_name: args.name.clone(),
			stx_to_burn: args.stx_to_burn,
			new_owner_address: args.new_owner.clone(),
			zonefile: args.zonefile.as_deref().map(read_zonefile).transpose()?,
			options: args.tx.transaction_options()?,
		})?,
	};

	print_envelope(&envelope)
}
