/*!
Network descriptors: which chain a transaction targets and where its API lives
*/
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use url::Url;

use crate::{address::AddressVersion, transaction::TransactionVersion};

/// Chain id of the Stacks mainnet
pub const CHAIN_ID_MAINNET: u32 = 0x00000001;
/// Chain id of the Stacks testnet
pub const CHAIN_ID_TESTNET: u32 = 0x80000000;

static MAINNET_API_URL: Lazy<Url> = Lazy::new(|| {
	Url::parse("https://api.mainnet.hiro.so")
		.expect("the mainnet API URL is valid")
});
static TESTNET_API_URL: Lazy<Url> = Lazy::new(|| {
	Url::parse("https://api.testnet.hiro.so")
		.expect("the testnet API URL is valid")
});

/// Stacks network family
#[derive(
	Debug,
	Clone,
	Copy,
	PartialEq,
	Eq,
	Hash,
	Display,
	EnumString,
	EnumIter,
	Serialize,
	Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Network {
	/// Mainnet
	Mainnet,
	/// Testnet
	Testnet,
}

impl Network {
	/// Default chain id of the network
	pub fn chain_id(&self) -> u32 {
		match self {
			Self::Mainnet => CHAIN_ID_MAINNET,
			Self::Testnet => CHAIN_ID_TESTNET,
		}
	}
}

/// Everything a transaction builder needs to know about its target chain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StacksNetwork {
	/// Network family, drives address and transaction versions
	pub network: Network,
	/// Chain id written into transactions
	pub chain_id: u32,
	/// Base URL of the node API
	pub core_api_url: Url,
}

impl StacksNetwork {
	/// Mainnet with the public API
	pub fn mainnet() -> Self {
		Self {
			network: Network::Mainnet,
			chain_id: CHAIN_ID_MAINNET,
			core_api_url: MAINNET_API_URL.clone(),
		}
	}

	/// Testnet with the public API
	pub fn testnet() -> Self {
		Self {
			network: Network::Testnet,
			chain_id: CHAIN_ID_TESTNET,
			core_api_url: TESTNET_API_URL.clone(),
		}
	}

	/// Replaces the API URL, e.g. to target a local node
	pub fn with_url(mut self, core_api_url: Url) -> Self {
		self.core_api_url = core_api_url;
		self
	}

	/// Transaction version for this network
	pub fn transaction_version(&self) -> TransactionVersion {
		match self.network {
			Network::Mainnet => TransactionVersion::Mainnet,
			Network::Testnet => TransactionVersion::Testnet,
		}
	}

	/// Single sig address version for this network
	pub fn address_version(&self) -> AddressVersion {
		match self.network {
			Network::Mainnet => AddressVersion::MainnetSingleSig,
			Network::Testnet => AddressVersion::TestnetSingleSig,
		}
	}
}

impl From<Network> for StacksNetwork {
	fn from(network: Network) -> Self {
		match network {
			Network::Mainnet => Self::mainnet(),
			Network::Testnet => Self::testnet(),
		}
	}
}

#[cfg(test)]
mod tests {
	use strum::IntoEnumIterator;

	use super::*;

	#[test]
	fn should_parse_network_names() {
		for network in Network::iter() {
			assert_eq!(network.to_string().parse::<Network>().unwrap(), network);
		}

		assert_eq!(Network::Mainnet.to_string(), "mainnet");
		assert!("regtest".parse::<Network>().is_err());
	}

	#[test]
	fn should_describe_mainnet() {
		let network = StacksNetwork::mainnet();

		assert_eq!(network.chain_id, 0x00000001);
		assert_eq!(network.transaction_version(), TransactionVersion::Mainnet);
		assert_eq!(network.address_version(), AddressVersion::MainnetSingleSig);
	}

	#[test]
	fn should_describe_testnet() {
		let network = StacksNetwork::testnet();

		assert_eq!(network.chain_id, 0x80000000);
		assert_eq!(network.transaction_version(), TransactionVersion::Testnet);
		assert_eq!(network.address_version(), AddressVersion::TestnetSingleSig);
	}

	#[test]
	fn should_override_url() {
		let url = Url::parse("http://localhost:3999").unwrap();
		let network = StacksNetwork::testnet().with_url(url.clone());

		assert_eq!(network.core_api_url, url);
		assert_eq!(network.chain_id, Network::Testnet.chain_id());
	}
}
