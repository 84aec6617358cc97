use clap::Parser;
use serde::Serialize;
use stacks_core::{
	codec::Codec,
	transaction::{StacksTransaction, TransactionEnvelope},
	Network,
};
use tracing::info;

use crate::commands::utils::{api_client, print_json};

#[derive(Parser, Debug, Clone)]
pub struct BroadcastArgs {
	/// Network to broadcast to, defaults to the configured one
	#[clap(short, long)]
	network: Option<Network>,
	/// Hex encoded zone file sent alongside the transaction
	#[clap(short, long)]
	attachment: Option<String>,
	/// Hex encoded signed transaction
	tx: String,
}

#[derive(Serialize)]
struct BroadcastResult {
	tx_id: String,
}

pub async fn broadcast_tx(broadcast: &BroadcastArgs) -> anyhow::Result<()> {
	let transaction = StacksTransaction::deserialize_from_hex(&broadcast.tx)?;
	let attachment = broadcast
		.attachment
		.as_deref()
		.map(hex::decode)
		.transpose()?;
	let envelope = TransactionEnvelope::new(transaction, attachment);

	let tx_id = api_client(broadcast.network)?.broadcast(&envelope).await?;
	info!(%tx_id, "Transaction accepted");

	print_json(&BroadcastResult { tx_id })
}
