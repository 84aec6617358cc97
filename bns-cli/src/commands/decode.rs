use clap::Parser;
use serde::Serialize;
use stacks_core::{
	clarity::{BufferEncoding, Value},
	codec::Codec,
};

use crate::commands::utils::print_json;

#[derive(Parser, Debug, Clone)]
pub struct DecodeArgs {
	/// Render printable buffers as quoted strings
	#[clap(long)]
	try_ascii: bool,
	/// Hex encoded Clarity value, with or without `0x`
	value: String,
}

#[derive(Debug, Serialize)]
struct DecodedValue {
	hex: String,
	repr: String,
	#[serde(rename = "type")]
	type_signature: String,
	json: serde_json::Value,
}

fn decode_value(decode: &DecodeArgs) -> anyhow::Result<DecodedValue> {
	let value = Value::deserialize_from_hex(&decode.value)?;
	let encoding = if decode.try_ascii {
		BufferEncoding::TryAscii
	} else {
		BufferEncoding::Hex
	};

	Ok(DecodedValue {
		hex: format!("0x{}", value.serialize_to_hex()?),
		repr: value.to_clarity_string(encoding),
		type_signature: value.type_signature(),
		json: value.to_json(),
	})
}

pub fn decode(decode: &DecodeArgs) -> anyhow::Result<()> {
	print_json(&decode_value(decode)?)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn should_decode_printable_buffers() {
		let decoded = decode_value(&DecodeArgs {
			try_ascii: true,
			value: "0x0200000003627463".to_string(),
		})
		.unwrap();

		assert_eq!(decoded.hex, "0x0200000003627463");
		assert_eq!(decoded.repr, "\"btc\"");
		assert_eq!(decoded.json["value"], "0x627463");
	}

	#[test]
	fn should_reject_trailing_bytes() {
		assert!(decode_value(&DecodeArgs {
			try_ascii: false,
			value: "030300".to_string(),
		})
		.is_err());
	}
}
