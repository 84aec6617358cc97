use std::fmt::{self, Write};

use super::{ResponseData, Value};

/// How buffers are rendered as Clarity literals
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum BufferEncoding {
	/// Always `0x` followed by lowercase hex
	#[default]
	Hex,
	/// A quoted string when every byte is printable ASCII, hex otherwise
	TryAscii,
}

impl Value {
	/// Renders the value as a Clarity literal, choosing how buffers appear
	pub fn to_clarity_string(&self, encoding: BufferEncoding) -> String {
		ClarityLiteral {
			value: self,
			encoding,
		}
		.to_string()
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let literal = ClarityLiteral {
			value: self,
			encoding: BufferEncoding::Hex,
		};

		fmt::Display::fmt(&literal, f)
	}
}

struct ClarityLiteral<'a> {
	value: &'a Value,
	encoding: BufferEncoding,
}

impl<'a> ClarityLiteral<'a> {
	fn nested(&self, value: &'a Value) -> Self {
		Self {
			value,
			encoding: self.encoding,
		}
	}
}

impl fmt::Display for ClarityLiteral<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self.value {
			Value::Int(value) => write!(f, "{value}"),
			Value::UInt(value) => write!(f, "u{value}"),
			Value::Bool(value) => write!(f, "{value}"),
			Value::Buffer(bytes) => {
				let printable = !bytes.is_empty()
					&& bytes.iter().all(|byte| (b' '..=b'~').contains(byte));

				if self.encoding == BufferEncoding::TryAscii && printable {
					write_ascii_literal(f, bytes)
				} else {
					write!(f, "0x{}", hex::encode(bytes))
				}
			}
			Value::Principal(principal) => write!(f, "{principal}"),
			Value::Optional(None) => f.write_str("none"),
			Value::Optional(Some(value)) => {
				write!(f, "(some {})", self.nested(value))
			}
			Value::Response(ResponseData {
				committed: true,
				data,
			}) => write!(f, "(ok {})", self.nested(data)),
			Value::Response(ResponseData {
				committed: false,
				data,
			}) => write!(f, "(err {})", self.nested(data)),
			Value::List(items) => {
				f.write_str("(list")?;
				for item in items {
					write!(f, " {}", self.nested(item))?;
				}
				f.write_char(')')
			}
			Value::Tuple(tuple) => {
				f.write_str("(tuple")?;
				for (key, value) in tuple.iter() {
					write!(f, " ({key} {})", self.nested(value))?;
				}
				f.write_char(')')
			}
			Value::StringAscii(text) => write_ascii_literal(f, text.as_bytes()),
			Value::StringUtf8(text) => {
				f.write_str("u\"")?;
				for c in text.chars() {
					if c.is_ascii() {
						write!(f, "{}", (c as u8).escape_ascii())?;
					} else {
						write!(f, "\\u{{{:x}}}", c as u32)?;
					}
				}
				f.write_char('"')
			}
		}
	}
}

fn write_ascii_literal(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
	write!(f, "\"{}\"", bytes.escape_ascii())
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_render_primitives() {
		assert_eq!(Value::Bool(true).to_string(), "true");
		assert_eq!(Value::Int(-42).to_string(), "-42");
		assert_eq!(Value::UInt(42).to_string(), "u42");
		assert_eq!(Value::buffer([0xde, 0xad]).to_string(), "0xdead");
		assert_eq!(Value::buffer(Vec::new()).to_string(), "0x");
	}

	#[test]
	fn should_render_composites() {
		let value = Value::tuple([
			(
				"owner",
				Value::principal_from_str("SP000000000000000000002Q6VF78.bns")
					.unwrap(),
			),
			("amounts", Value::list([Value::UInt(1), Value::UInt(2)])),
			("memo", Value::some(Value::none())),
		])
		.unwrap();

		assert_eq!(
			value.to_string(),
			"(tuple (amounts (list u1 u2)) (memo (some none)) (owner SP000000000000000000002Q6VF78.bns))"
		);
		assert_eq!(Value::okay(Value::Int(1)).to_string(), "(ok 1)");
		assert_eq!(Value::error(Value::UInt(2)).to_string(), "(err u2)");
		assert_eq!(Value::List(vec![]).to_string(), "(list)");
	}

	#[test]
	fn should_escape_ascii_strings() {
		let value = Value::string_ascii("say \"hi\"\\\n").unwrap();

		assert_eq!(value.to_string(), r#""say \"hi\"\\\n""#);
	}

	#[test]
	fn should_escape_non_ascii_code_points() {
		let value = Value::string_utf8("a\u{e9}\u{1f600}\"");

		assert_eq!(value.to_string(), r#"u"a\u{e9}\u{1f600}\"""#);
	}

	#[test]
	fn should_try_ascii_buffers() {
		let printable = Value::buffer_from_str("hello");
		let binary = Value::buffer([0x00, 0x61]);

		assert_eq!(
			printable.to_clarity_string(BufferEncoding::TryAscii),
			"\"hello\""
		);
		assert_eq!(
			printable.to_clarity_string(BufferEncoding::Hex),
			"0x68656c6c6f"
		);
		assert_eq!(
			binary.to_clarity_string(BufferEncoding::TryAscii),
			"0x0061"
		);
		assert_eq!(
			Value::some(printable).to_clarity_string(BufferEncoding::TryAscii),
			"(some \"hello\")"
		);
	}
}
