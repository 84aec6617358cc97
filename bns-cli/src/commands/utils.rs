use std::io::stdout;

use clap::Args;
use serde::Serialize;
use stacks_core::{
	codec::Codec,
	crypto::{Hashing, PublicKey},
	transaction::{builder::TransactionOptions, TransactionEnvelope},
	Network, StacksNetwork,
};

use crate::{client::StacksApiClient, config::read_config};

/// Options every transaction command shares
#[derive(Args, Debug, Clone)]
pub struct TransactionArgs {
	/// Hex encoded compressed public key of the origin
	#[clap(short = 'k', long, env = "BNS_PUBLIC_KEY")]
	pub public_key: String,
	/// Origin account nonce
	#[clap(long, default_value_t = 0)]
	pub nonce: u64,
	/// Fee in microSTX
	#[clap(long, default_value_t = 0)]
	pub fee: u64,
	/// Leave the fee to a sponsor
	#[clap(long)]
	pub sponsored: bool,
	/// Network to build for, defaults to the configured one
	#[clap(short, long)]
	pub network: Option<Network>,
}

impl TransactionArgs {
	pub fn transaction_options(&self) -> anyhow::Result<TransactionOptions> {
		let public_key = PublicKey::from_slice(&hex::decode(&self.public_key)?)?;
		let network = match self.network {
			Some(network) => StacksNetwork::from(network),
			None => read_config()?.stacks_network(None),
		};

		Ok(TransactionOptions {
			nonce: self.nonce,
			fee: self.fee,
			sponsored: self.sponsored,
			..TransactionOptions::new(public_key, network)
		})
	}
}

/// Reads a zone file from disk
pub fn read_zonefile(path: &std::path::Path) -> anyhow::Result<Vec<u8>> {
	Ok(std::fs::read(path)?)
}

/// Client for the configured node, or for the public API of `network`
pub fn api_client(network: Option<Network>) -> anyhow::Result<StacksApiClient> {
	let config = read_config()?;

	StacksApiClient::new(&config.stacks_network(network), config.request_timeout())
}

#[derive(Serialize)]
pub struct TransactionData {
	pub tx_id: String,
	pub tx_hex: String,
	pub initial_sighash: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub attachment_hex: Option<String>,
}

impl TransactionData {
	pub fn from_envelope(envelope: &TransactionEnvelope) -> anyhow::Result<Self> {
		let transaction = envelope.transaction();

		Ok(Self {
			tx_id: transaction.txid()?.to_hex(),
			tx_hex: transaction.serialize_to_hex()?,
			initial_sighash: transaction.initial_sighash()?.to_hex(),
			attachment_hex: envelope.attachment().map(hex::encode),
		})
	}
}

pub fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
	serde_json::to_writer_pretty(stdout(), value)?;
	println!();

	Ok(())
}

pub fn print_envelope(envelope: &TransactionEnvelope) -> anyhow::Result<()> {
	print_json(&TransactionData::from_envelope(envelope)?)
}
