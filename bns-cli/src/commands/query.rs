use bns_core::{
	contract::BnsContract,
	queries::{
		can_name_be_registered, can_namespace_be_registered, get_name_price,
		get_namespace_price, interpret_bool, interpret_price,
	},
};
use clap::{Args, Subcommand};
use serde::Serialize;
use stacks_core::{address::StacksAddress, Network};

use crate::{
	client::{NamePrice, StacksApiClient},
	commands::utils::print_json,
	config::read_config,
};

#[derive(Subcommand, Debug, Clone)]
pub enum QueryCommand {
	/// Price of a namespace according to the registry
	NamespacePrice(QueryArgs),
	/// Price of a name according to the registry
	NamePrice(QueryArgs),
	/// Whether a namespace can be preordered
	CanRegisterNamespace(QueryArgs),
	/// Whether a name can be registered
	CanRegisterName(QueryArgs),
	/// Price of a name according to the node's REST API
	Price(QueryArgs),
}

#[derive(Args, Debug, Clone)]
pub struct QueryArgs {
	/// Namespace, or `name.namespace`
	target: String,
	/// Account the call is evaluated as, defaults to the registry deployer
	#[clap(long)]
	sender: Option<StacksAddress>,
	/// Network to query, defaults to the configured one
	#[clap(short, long)]
	network: Option<Network>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum QueryResult {
	Price { target: String, price: String },
	Availability { target: String, available: bool },
	Rest(NamePrice),
}

pub async fn query(command: &QueryCommand) -> anyhow::Result<()> {
	let args = match command {
		QueryCommand::NamespacePrice(args)
		| QueryCommand::NamePrice(args)
		| QueryCommand::CanRegisterNamespace(args)
		| QueryCommand::CanRegisterName(args)
		| QueryCommand::Price(args) => args,
	};

	let config = read_config()?;
	let network = config.stacks_network(args.network);
	let client = StacksApiClient::new(&network, config.request_timeout())?;
	let sender = match &args.sender {
		Some(sender) => sender.clone(),
		None => BnsContract::for_chain_id(network.chain_id)?.address,
	};
	let target = args.target.as_str();

	let result = match command {
		QueryCommand::NamespacePrice(_) => {
			let call = get_namespace_price(target, sender, &network)?;
			let price = interpret_price(&client.call_read_only(&call).await?)?;

			QueryResult::Price {
				target: target.to_string(),
				price: price.to_string(),
			}
		}
		QueryCommand::NamePrice(_) => {
			let call = get_name_price(target, sender, &network)?;
			let price = interpret_price(&client.call_read_only(&call).await?)?;

			QueryResult::Price {
				target: target.to_string(),
				price: price.to_string(),
			}
		}
		QueryCommand::CanRegisterNamespace(_) => {
			let call = can_namespace_be_registered(target, sender, &network)?;
			let available = interpret_bool(&client.call_read_only(&call).await?)?;

			QueryResult::Availability {
				target: target.to_string(),
				available,
			}
		}
		QueryCommand::CanRegisterName(_) => {
			let call = can_name_be_registered(target, sender, &network)?;
			let available = interpret_bool(&client.call_read_only(&call).await?)?;

			QueryResult::Availability {
				target: target.to_string(),
				available,
			}
		}
		QueryCommand::Price(_) => QueryResult::Rest(client.name_price(target).await?),
	};

	print_json(&result)
}
