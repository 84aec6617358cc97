//! Stacks node API client

use std::time::Duration;

use anyhow::{anyhow, bail};
use bns_core::queries::{ReadOnlyFunctionCall, ReadOnlyResponse};
use reqwest::{header::CONTENT_TYPE, StatusCode};
use serde::{de::Error, Deserialize, Deserializer, Serialize};
use stacks_core::{
	clarity::Value,
	codec::Codec,
	transaction::TransactionEnvelope,
	StacksNetwork,
};
use tracing::{debug, info};
use url::Url;

/// Single shot calls against a Stacks node API. Nothing is retried.
#[derive(Debug, Clone)]
pub struct StacksApiClient {
	http_client: reqwest::Client,
	base_url: Url,
}

/// Price of a name as reported by the REST API
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamePrice {
	pub units: String,
	#[serde(deserialize_with = "deserialize_amount")]
	pub amount: u128,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NamePriceResponse {
	Flat(NamePrice),
	Nested { name_price: NamePrice },
}

impl From<NamePriceResponse> for NamePrice {
	fn from(response: NamePriceResponse) -> Self {
		match response {
			NamePriceResponse::Flat(price)
			| NamePriceResponse::Nested { name_price: price } => price,
		}
	}
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Amount {
	Text(String),
	Number(u64),
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<u128, D::Error>
where
	D: Deserializer<'de>,
{
	match Amount::deserialize(deserializer)? {
		Amount::Text(amount) => amount.parse().map_err(D::Error::custom),
		Amount::Number(amount) => Ok(amount.into()),
	}
}

#[derive(Serialize)]
struct TransactionWithAttachment {
	tx: String,
	attachment: String,
}

impl StacksApiClient {
	/// Client for the API of the network
	pub fn new(network: &StacksNetwork, timeout: Duration) -> anyhow::Result<Self> {
		let http_client = reqwest::Client::builder().timeout(timeout).build()?;

		let mut base_url = network.core_api_url.clone();
		if !base_url.path().ends_with('/') {
			let path = format!("{}/", base_url.path());
			base_url.set_path(&path);
		}

		Ok(Self {
			http_client,
			base_url,
		})
	}

	/// `path` is relative so a path prefix on the node URL is kept
	fn url(&self, path: &str) -> anyhow::Result<Url> {
		Ok(self.base_url.join(path)?)
	}

	/// Evaluates a read-only function and decodes its result
	pub async fn call_read_only(
		&self,
		call: &ReadOnlyFunctionCall,
	) -> anyhow::Result<Value> {
		let url = self.url(&call.path())?;
		debug!(%url, "Calling read-only function");

		let response: ReadOnlyResponse = self
			.http_client
			.post(url)
			.json(&call.request()?)
			.send()
			.await?
			.error_for_status()?
			.json()
			.await?;

		Ok(response.into_value()?)
	}

	/// Submits a transaction and returns its txid. The attachment, if any,
	/// is sent alongside in a JSON body.
	pub async fn broadcast(
		&self,
		envelope: &TransactionEnvelope,
	) -> anyhow::Result<String> {
		let url = self.url("v2/transactions")?;
		let tx = envelope.transaction().serialize_to_vec()?;
		debug!(%url, attachment = envelope.attachment().is_some(), "Broadcasting transaction");

		let request = match envelope.attachment() {
			Some(attachment) => {
				self.http_client.post(url).json(&TransactionWithAttachment {
					tx: hex::encode(tx),
					attachment: hex::encode(attachment),
				})
			}
			None => self
				.http_client
				.post(url)
				.header(CONTENT_TYPE, "application/octet-stream")
				.body(tx),
		};

		let response = request.send().await?;
		let status = response.status();

		if !status.is_success() {
			let reason = response.text().await?;
			bail!("Transaction rejected with status {status}: {reason}");
		}

		Ok(response.json::<String>().await?)
	}

	/// Looks up the price of a name, falling back to the legacy endpoint
	/// only when the current one does not exist on the node
	pub async fn name_price(&self, name: &str) -> anyhow::Result<NamePrice> {
		let url = self.url(&format!("v2/prices/names/{name}"))?;
		debug!(%url, "Fetching name price");

		let response = self.http_client.get(url).send().await?;

		let response = if response.status() == StatusCode::NOT_FOUND {
			let legacy_url = self.url(&format!("v1/prices/names/{name}"))?;
			info!(%legacy_url, "Price endpoint not found, using legacy endpoint");

			self.http_client.get(legacy_url).send().await?
		} else {
			response
		};

		let price: NamePriceResponse = response
			.error_for_status()
			.map_err(|err| anyhow!("Could not fetch price of {name}: {err}"))?
			.json()
			.await?;

		Ok(price.into())
	}
}
