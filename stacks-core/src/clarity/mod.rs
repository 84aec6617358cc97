/*!
Clarity values: the typed values exchanged with the Clarity VM.

Values are built through the constructors on [Value], serialized with the
[Codec](crate::codec::Codec) implementation in [serialization], rendered as
Clarity literals through [Display](std::fmt::Display) and projected to JSON
with [Value::to_json].
*/
use std::{collections::BTreeMap, fmt, str::FromStr};

use strum::FromRepr;

use crate::{
	address::StacksAddress,
	validated_strings::{
		clarity_name::ClarityName, contract_name::ContractName, Validate,
	},
	StacksError, StacksResult,
};

/// Module for rendering values as Clarity literals
pub mod display;
/// Module for the JSON projection of values
pub mod json;
/// Module for the binary wire format of values
pub mod serialization;

pub use display::BufferEncoding;

/// Maximum nesting depth of a value, matching the VM's type depth limit.
/// Values nested deeper neither serialize nor deserialize.
pub const MAX_VALUE_DEPTH: u8 = 32;

/// Type prefix byte leading every serialized value
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypePrefix {
	/// Signed 128 bit integer
	Int = 0x00,
	/// Unsigned 128 bit integer
	UInt = 0x01,
	/// Byte buffer
	Buffer = 0x02,
	/// Boolean true
	BoolTrue = 0x03,
	/// Boolean false
	BoolFalse = 0x04,
	/// Standard principal
	PrincipalStandard = 0x05,
	/// Contract principal
	PrincipalContract = 0x06,
	/// Committed response
	ResponseOk = 0x07,
	/// Aborted response
	ResponseErr = 0x08,
	/// Empty optional
	OptionalNone = 0x09,
	/// Filled optional
	OptionalSome = 0x0a,
	/// List
	List = 0x0b,
	/// Tuple
	Tuple = 0x0c,
	/// ASCII string
	StringAscii = 0x0d,
	/// UTF-8 string
	StringUtf8 = 0x0e,
}

/// A principal: either an account or a contract
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrincipalData {
	/// Account principal
	Standard(StacksAddress),
	/// Contract principal, `address.name`
	Contract(StacksAddress, ContractName),
}

impl PrincipalData {
	/// The address of the account, or the deployer of the contract
	pub fn address(&self) -> &StacksAddress {
		match self {
			Self::Standard(address) | Self::Contract(address, _) => address,
		}
	}
}

impl fmt::Display for PrincipalData {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Standard(address) => write!(f, "{address}"),
			Self::Contract(address, name) => write!(f, "{address}.{name}"),
		}
	}
}

impl FromStr for PrincipalData {
	type Err = StacksError;

	fn from_str(principal: &str) -> Result<Self, Self::Err> {
		match principal.split_once('.') {
			Some((address, name)) => Ok(Self::Contract(
				address.parse()?,
				ContractName::new(name)?,
			)),
			None => Ok(Self::Standard(principal.parse()?)),
		}
	}
}

impl From<StacksAddress> for PrincipalData {
	fn from(address: StacksAddress) -> Self {
		Self::Standard(address)
	}
}

/// Outcome of a public function: `(ok ...)` or `(err ...)`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseData {
	/// Whether the response is `ok`
	pub committed: bool,
	/// The wrapped value
	pub data: Box<Value>,
}

/// Tuple entries, always held in byte-lexicographic key order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TupleData(BTreeMap<ClarityName, Value>);

impl TupleData {
	/// Builds a tuple from its entries, rejecting duplicate keys
	pub fn from_entries(
		entries: impl IntoIterator<Item = (ClarityName, Value)>,
	) -> StacksResult<Self> {
		let mut data = BTreeMap::new();

		for (key, value) in entries {
			if data.contains_key(&key) {
				return Err(StacksError::InvalidData(format!(
					"Duplicate tuple key {key}"
				)));
			}

			data.insert(key, value);
		}

		Ok(Self(data))
	}

	/// Looks up an entry by key
	pub fn get(&self, key: &str) -> Option<&Value> {
		self.0.get(key)
	}

	/// Entries in key order
	pub fn iter(&self) -> impl Iterator<Item = (&ClarityName, &Value)> {
		self.0.iter()
	}

	/// Number of entries
	pub fn len(&self) -> usize {
		self.0.len()
	}

	/// Whether the tuple has no entries
	pub fn is_empty(&self) -> bool {
		self.0.is_empty()
	}
}

/// A Clarity value
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
	/// Signed 128 bit integer
	Int(i128),
	/// Unsigned 128 bit integer
	UInt(u128),
	/// Boolean
	Bool(bool),
	/// Byte buffer
	Buffer(Vec<u8>),
	/// Principal
	Principal(PrincipalData),
	/// Response
	Response(ResponseData),
	/// Optional
	Optional(Option<Box<Value>>),
	/// List of values
	List(Vec<Value>),
	/// Tuple
	Tuple(TupleData),
	/// ASCII string
	StringAscii(String),
	/// UTF-8 string
	StringUtf8(String),
}

impl Value {
	/// Buffer value
	pub fn buffer(bytes: impl Into<Vec<u8>>) -> Self {
		Self::Buffer(bytes.into())
	}

	/// Buffer holding the UTF-8 bytes of the string
	pub fn buffer_from_str(text: &str) -> Self {
		Self::Buffer(text.as_bytes().to_vec())
	}

	/// ASCII string value, failing on any non ASCII character
	pub fn string_ascii(text: impl Into<String>) -> StacksResult<Self> {
		let text = text.into();

		if !text.is_ascii() {
			return Err(StacksError::InvalidArguments(
				"String is not valid ASCII",
			));
		}

		Ok(Self::StringAscii(text))
	}

	/// UTF-8 string value
	pub fn string_utf8(text: impl Into<String>) -> Self {
		Self::StringUtf8(text.into())
	}

	/// `(some value)`
	pub fn some(value: Value) -> Self {
		Self::Optional(Some(Box::new(value)))
	}

	/// `none`
	pub fn none() -> Self {
		Self::Optional(None)
	}

	/// `(ok value)`
	pub fn okay(value: Value) -> Self {
		Self::Response(ResponseData {
			committed: true,
			data: Box::new(value),
		})
	}

	/// `(err value)`
	pub fn error(value: Value) -> Self {
		Self::Response(ResponseData {
			committed: false,
			data: Box::new(value),
		})
	}

	/// List value, items keep their order
	pub fn list(items: impl IntoIterator<Item = Value>) -> Self {
		Self::List(items.into_iter().collect())
	}

	/// Tuple value. Keys must be valid Clarity names and appear once.
	pub fn tuple<K: AsRef<str>>(
		entries: impl IntoIterator<Item = (K, Value)>,
	) -> StacksResult<Self> {
		let entries = entries
			.into_iter()
			.map(|(key, value)| Ok((ClarityName::new(key)?, value)))
			.collect::<StacksResult<Vec<_>>>()?;

		Ok(Self::Tuple(TupleData::from_entries(entries)?))
	}

	/// Account principal value
	pub fn standard_principal(address: StacksAddress) -> Self {
		Self::Principal(PrincipalData::Standard(address))
	}

	/// Contract principal value
	pub fn contract_principal(
		address: StacksAddress,
		name: ContractName,
	) -> Self {
		Self::Principal(PrincipalData::Contract(address, name))
	}

	/// Parses `ADDRESS` or `ADDRESS.contract-name` into a principal value
	pub fn principal_from_str(principal: &str) -> StacksResult<Self> {
		Ok(Self::Principal(principal.parse()?))
	}

	/// Type prefix this value is serialized with
	pub fn type_prefix(&self) -> TypePrefix {
		match self {
			Self::Int(_) => TypePrefix::Int,
			Self::UInt(_) => TypePrefix::UInt,
			Self::Bool(true) => TypePrefix::BoolTrue,
			Self::Bool(false) => TypePrefix::BoolFalse,
			Self::Buffer(_) => TypePrefix::Buffer,
			Self::Principal(PrincipalData::Standard(_)) => {
				TypePrefix::PrincipalStandard
			}
			Self::Principal(PrincipalData::Contract(_, _)) => {
				TypePrefix::PrincipalContract
			}
			Self::Response(ResponseData {
				committed: true, ..
			}) => TypePrefix::ResponseOk,
			Self::Response(ResponseData {
				committed: false, ..
			}) => TypePrefix::ResponseErr,
			Self::Optional(None) => TypePrefix::OptionalNone,
			Self::Optional(Some(_)) => TypePrefix::OptionalSome,
			Self::List(_) => TypePrefix::List,
			Self::Tuple(_) => TypePrefix::Tuple,
			Self::StringAscii(_) => TypePrefix::StringAscii,
			Self::StringUtf8(_) => TypePrefix::StringUtf8,
		}
	}

	/// Structural type of this value, e.g. `(buff 4)` or
	/// `(response bool UnknownType)`.
	///
	/// Types that cannot be inferred from a single value, such as the untaken
	/// branch of a response or the items of an empty list, are rendered as
	/// `UnknownType`.
	pub fn type_signature(&self) -> String {
		match self {
			Self::Int(_) => "int".into(),
			Self::UInt(_) => "uint".into(),
			Self::Bool(_) => "bool".into(),
			Self::Principal(_) => "principal".into(),
			Self::Buffer(bytes) => format!("(buff {})", bytes.len()),
			Self::StringAscii(text) => format!("(string-ascii {})", text.len()),
			Self::StringUtf8(text) => format!("(string-utf8 {})", text.len()),
			Self::Optional(None) => "(optional none)".into(),
			Self::Optional(Some(value)) => {
				format!("(optional {})", value.type_signature())
			}
			Self::Response(ResponseData {
				committed: true,
				data,
			}) => format!("(response {} UnknownType)", data.type_signature()),
			Self::Response(ResponseData {
				committed: false,
				data,
			}) => format!("(response UnknownType {})", data.type_signature()),
			Self::List(items) => format!(
				"(list {} {})",
				items.len(),
				items
					.first()
					.map(Value::type_signature)
					.unwrap_or_else(|| "UnknownType".into())
			),
			Self::Tuple(tuple) => {
				let entries: Vec<String> = tuple
					.iter()
					.map(|(key, value)| {
						format!("({key} {})", value.type_signature())
					})
					.collect();

				format!("(tuple {})", entries.join(" "))
			}
		}
	}

	fn unexpected(&self, expected: &'static str) -> StacksError {
		StacksError::UnexpectedType {
			expected,
			found: self.type_signature(),
		}
	}

	/// Unwraps a `uint`
	pub fn expect_u128(&self) -> StacksResult<u128> {
		match self {
			Self::UInt(value) => Ok(*value),
			_ => Err(self.unexpected("uint")),
		}
	}

	/// Unwraps an `int`
	pub fn expect_i128(&self) -> StacksResult<i128> {
		match self {
			Self::Int(value) => Ok(*value),
			_ => Err(self.unexpected("int")),
		}
	}

	/// Unwraps a `bool`
	pub fn expect_bool(&self) -> StacksResult<bool> {
		match self {
			Self::Bool(value) => Ok(*value),
			_ => Err(self.unexpected("bool")),
		}
	}

	/// Unwraps a buffer
	pub fn expect_buffer(&self) -> StacksResult<&[u8]> {
		match self {
			Self::Buffer(bytes) => Ok(bytes),
			_ => Err(self.unexpected("buff")),
		}
	}

	/// Unwraps an optional
	pub fn expect_optional(&self) -> StacksResult<Option<&Value>> {
		match self {
			Self::Optional(value) => Ok(value.as_deref()),
			_ => Err(self.unexpected("optional")),
		}
	}

	/// Unwraps a response into `Ok(value)` for `(ok value)` and `Err(value)`
	/// for `(err value)`
	pub fn expect_response(&self) -> StacksResult<Result<&Value, &Value>> {
		match self {
			Self::Response(ResponseData {
				committed: true,
				data,
			}) => Ok(Ok(data)),
			Self::Response(ResponseData {
				committed: false,
				data,
			}) => Ok(Err(data)),
			_ => Err(self.unexpected("response")),
		}
	}

	/// Unwraps a tuple
	pub fn expect_tuple(&self) -> StacksResult<&TupleData> {
		match self {
			Self::Tuple(tuple) => Ok(tuple),
			_ => Err(self.unexpected("tuple")),
		}
	}

	/// Unwraps a list
	pub fn expect_list(&self) -> StacksResult<&[Value]> {
		match self {
			Self::List(items) => Ok(items),
			_ => Err(self.unexpected("list")),
		}
	}

	/// Unwraps a principal
	pub fn expect_principal(&self) -> StacksResult<&PrincipalData> {
		match self {
			Self::Principal(principal) => Ok(principal),
			_ => Err(self.unexpected("principal")),
		}
	}

	/// Unwraps an ASCII string
	pub fn expect_ascii(&self) -> StacksResult<&str> {
		match self {
			Self::StringAscii(text) => Ok(text),
			_ => Err(self.unexpected("string-ascii")),
		}
	}
}

impl From<bool> for Value {
	fn from(value: bool) -> Self {
		Self::Bool(value)
	}
}

impl From<u128> for Value {
	fn from(value: u128) -> Self {
		Self::UInt(value)
	}
}

impl From<i128> for Value {
	fn from(value: i128) -> Self {
		Self::Int(value)
	}
}

impl From<PrincipalData> for Value {
	fn from(principal: PrincipalData) -> Self {
		Self::Principal(principal)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	fn boot_address() -> StacksAddress {
		"SP000000000000000000002Q6VF78".parse().unwrap()
	}

	#[test]
	fn should_sort_tuple_entries_regardless_of_insertion_order() {
		let forward =
			Value::tuple([("a", Value::Bool(true)), ("b", Value::Bool(false))])
				.unwrap();
		let backward =
			Value::tuple([("b", Value::Bool(false)), ("a", Value::Bool(true))])
				.unwrap();

		assert_eq!(forward, backward);

		let keys: Vec<&str> = forward
			.expect_tuple()
			.unwrap()
			.iter()
			.map(|(key, _)| key.as_str())
			.collect();
		assert_eq!(keys, vec!["a", "b"]);
	}

	#[test]
	fn should_reject_duplicate_tuple_keys() {
		let result =
			Value::tuple([("a", Value::Bool(true)), ("a", Value::Bool(false))]);

		assert!(matches!(result, Err(StacksError::InvalidData(_))));
	}

	#[test]
	fn should_reject_invalid_tuple_keys() {
		let result = Value::tuple([("not a name", Value::none())]);

		assert!(matches!(result, Err(StacksError::InvalidArguments(_))));
	}

	#[test]
	fn should_reject_non_ascii_string() {
		assert!(Value::string_ascii("hello").is_ok());
		assert!(Value::string_ascii("héllo").is_err());
	}

	#[test]
	fn should_parse_principals() {
		let standard =
			Value::principal_from_str("SP000000000000000000002Q6VF78").unwrap();
		let contract =
			Value::principal_from_str("SP000000000000000000002Q6VF78.bns")
				.unwrap();

		assert_eq!(standard, Value::standard_principal(boot_address()));
		assert_eq!(
			contract,
			Value::contract_principal(boot_address(), "bns".parse().unwrap())
		);
		assert!(Value::principal_from_str("SP000000000000000000002Q6VF78.1x")
			.is_err());
		assert!(Value::principal_from_str("not-an-address").is_err());
	}

	#[test]
	fn should_describe_type_signatures() {
		let cases = [
			(Value::Int(-1), "int"),
			(Value::UInt(1), "uint"),
			(Value::buffer([0xde, 0xad, 0xbe, 0xef]), "(buff 4)"),
			(Value::string_utf8("é"), "(string-utf8 2)"),
			(Value::none(), "(optional none)"),
			(Value::some(Value::Bool(true)), "(optional bool)"),
			(Value::okay(Value::Bool(true)), "(response bool UnknownType)"),
			(Value::error(Value::UInt(1)), "(response UnknownType uint)"),
			(Value::List(vec![]), "(list 0 UnknownType)"),
			(Value::list([Value::Int(1), Value::Int(2)]), "(list 2 int)"),
			(
				Value::tuple([("b", Value::Int(1)), ("a", Value::none())])
					.unwrap(),
				"(tuple (a (optional none)) (b int))",
			),
		];

		for (value, expected) in cases {
			assert_eq!(value.type_signature(), expected);
		}
	}

	#[test]
	fn should_match_expected_types() {
		assert_eq!(Value::UInt(5).expect_u128().unwrap(), 5);
		assert_eq!(Value::Int(-5).expect_i128().unwrap(), -5);
		assert!(Value::Bool(true).expect_bool().unwrap());
		assert_eq!(
			Value::okay(Value::UInt(1)).expect_response().unwrap(),
			Ok(&Value::UInt(1))
		);
		assert_eq!(
			Value::error(Value::Int(2)).expect_response().unwrap(),
			Err(&Value::Int(2))
		);
		assert_eq!(
			Value::some(Value::Int(1)).expect_optional().unwrap(),
			Some(&Value::Int(1))
		);
	}

	#[test]
	fn should_not_coerce_mismatched_types() {
		let result = Value::Int(1).expect_u128();

		assert!(matches!(
			result,
			Err(StacksError::UnexpectedType {
				expected: "uint",
				ref found,
			}) if found == "int"
		));
		assert!(Value::UInt(1).expect_bool().is_err());
		assert!(Value::none().expect_response().is_err());
	}
}
