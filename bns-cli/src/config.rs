use std::{
	fs::{create_dir_all, read_to_string, OpenOptions},
	io::Write,
	path::PathBuf,
	time::Duration,
};

use anyhow::{anyhow, Context};
use serde::Deserialize;
use stacks_core::{Network, StacksNetwork};
use tracing::info;
use url::Url;

pub const GENERATED_CONFIG: &str = include_str!("../generated_config.toml");

fn config_path() -> anyhow::Result<PathBuf> {
	let home_path = dirs::home_dir()
		.ok_or_else(|| anyhow!("Could not determine the home directory"))?;

	Ok(home_path.join(".config/bns/config.toml"))
}

pub fn generate_config() -> anyhow::Result<()> {
	let config_path = config_path()?;

	if let Some(parent) = config_path.parent() {
		create_dir_all(parent)?;
	}

	if config_path.exists() {
		info!("Config file already exists at {}", config_path.display());
		return Ok(());
	}

	let mut config_file = OpenOptions::new()
		.create_new(true)
		.write(true)
		.open(&config_path)
		.with_context(|| {
			format!("Could not create config file at {}", config_path.display())
		})?;

	config_file.write_all(GENERATED_CONFIG.as_bytes())?;
	config_file.flush()?;

	info!(
		"Config file created at {}, make sure to update it before using",
		config_path.display()
	);

	Ok(())
}

pub fn read_config() -> anyhow::Result<Config> {
	let config_path = config_path()?;

	let config_file = read_to_string(&config_path).with_context(|| {
		format!(
			"Could not read bns config at {}, did you try `bns init`?",
			config_path.display()
		)
	})?;

	Ok(toml::from_str(&config_file)?)
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Config {
	pub network: Network,
	pub stacks_node_url: Url,
	pub request_timeout_secs: u64,
}

impl Config {
	/// The configured network, or `network` with its public API when it
	/// overrides a different configured one
	pub fn stacks_network(&self, network: Option<Network>) -> StacksNetwork {
		match network {
			Some(network) if network != self.network => network.into(),
			_ => StacksNetwork::from(self.network)
				.with_url(self.stacks_node_url.clone()),
		}
	}

	pub fn request_timeout(&self) -> Duration {
		Duration::from_secs(self.request_timeout_secs)
	}
}
