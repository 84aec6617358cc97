use std::{fmt, str::FromStr};

use crate::{BnsError, BnsResult};

/// A name qualified by its namespace, optionally below a subdomain:
/// `name.namespace` or `subdomain.name.namespace`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FullyQualifiedName {
	subdomain: Option<String>,
	name: String,
	namespace: String,
}

impl FullyQualifiedName {
	/// Splits a fully qualified name into its labels
	pub fn parse(fqn: &str) -> BnsResult<Self> {
		let labels: Vec<&str> = fqn.split('.').collect();

		if labels.iter().any(|label| label.is_empty()) {
			return Err(BnsError::Validation(format!(
				"{fqn:?} contains an empty label"
			)));
		}

		match labels.as_slice() {
			[name, namespace] => Ok(Self {
				subdomain: None,
				name: name.to_string(),
				namespace: namespace.to_string(),
			}),
			[subdomain, name, namespace] => Ok(Self {
				subdomain: Some(subdomain.to_string()),
				name: name.to_string(),
				namespace: namespace.to_string(),
			}),
			_ => Err(BnsError::Validation(format!(
				"{fqn:?} is not of the form name.namespace or subdomain.name.namespace"
			))),
		}
	}

	/// The subdomain label, if any
	pub fn subdomain(&self) -> Option<&str> {
		self.subdomain.as_deref()
	}

	/// The name label
	pub fn name(&self) -> &str {
		&self.name
	}

	/// The namespace label
	pub fn namespace(&self) -> &str {
		&self.namespace
	}

	/// Whether a subdomain label is present
	pub fn is_subdomain(&self) -> bool {
		self.subdomain.is_some()
	}

	/// Fails for subdomains, which `operation` cannot act on
	pub fn ensure_not_subdomain(&self, operation: &str) -> BnsResult<()> {
		if self.is_subdomain() {
			return Err(BnsError::Validation(format!(
				"Cannot {operation} a subdomain: {self}"
			)));
		}

		Ok(())
	}
}

impl FromStr for FullyQualifiedName {
	type Err = BnsError;

	fn from_str(fqn: &str) -> Result<Self, Self::Err> {
		Self::parse(fqn)
	}
}

impl fmt::Display for FullyQualifiedName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(subdomain) = &self.subdomain {
			write!(f, "{subdomain}.")?;
		}

		write!(f, "{}.{}", self.name, self.namespace)
	}
}
