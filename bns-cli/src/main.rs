#![forbid(missing_docs)]

//! BNS CLI builds unsigned Blockchain Naming System transactions, queries
//! the registry contract and broadcasts signed transactions.
//!
//! Transactions are printed as JSON with their id, hex encoding, initial
//! signature hash and attachment, ready to be handed to a signer.
use bns_cli::commands::{
	broadcast::{broadcast_tx, BroadcastArgs},
	decode::{decode, DecodeArgs},
	init::init,
	name::{name, NameCommand},
	namespace::{namespace, NamespaceCommand},
	query::{query, QueryCommand},
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{
	layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

#[derive(Parser)]
struct Cli {
	#[command(subcommand)]
	command: Command,
}

#[derive(Subcommand, Debug, Clone)]
enum Command {
	/// Write a default config file
	Init,
	/// Decode a hex encoded Clarity value
	Decode(DecodeArgs),
	/// Namespace transactions
	#[command(subcommand)]
	Namespace(NamespaceCommand),
	/// Name transactions
	#[command(subcommand)]
	Name(NameCommand),
	/// Read-only registry queries
	#[command(subcommand)]
	Query(QueryCommand),
	/// Broadcast a signed transaction
	Broadcast(BroadcastArgs),
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	tracing_subscriber::registry()
		.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
		.with(
			EnvFilter::try_from_default_env()
				.unwrap_or_else(|_| EnvFilter::new("info")),
		)
		.init();

	let args = Cli::parse();

	match args.command {
		Command::Init => init(),
		Command::Decode(decode_args) => decode(&decode_args),
		Command::Namespace(namespace_command) => namespace(&namespace_command),
		Command::Name(name_command) => name(&name_command),
		Command::Query(query_command) => query(&query_command).await,
		Command::Broadcast(broadcast_args) => broadcast_tx(&broadcast_args).await,
	}
}
