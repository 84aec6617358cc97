use serde_json::{json, Map};

use super::{ResponseData, Value};

impl Value {
	/// Projects the value to JSON as `{"type": ..., "value": ...}`.
	///
	/// Integers are rendered as decimal strings so no precision is lost,
	/// buffers as `0x` prefixed hex and responses carry an extra `success`
	/// flag.
	pub fn to_json(&self) -> serde_json::Value {
		let type_signature = self.type_signature();

		match self {
			Value::Int(value) => json!({
				"type": type_signature,
				"value": value.to_string(),
			}),
			Value::UInt(value) => json!({
				"type": type_signature,
				"value": value.to_string(),
			}),
			Value::Bool(value) => json!({
				"type": type_signature,
				"value": value,
			}),
			Value::Buffer(bytes) => json!({
				"type": type_signature,
				"value": format!("0x{}", hex::encode(bytes)),
			}),
			Value::Principal(principal) => json!({
				"type": type_signature,
				"value": principal.to_string(),
			}),
			Value::Optional(value) => json!({
				"type": type_signature,
				"value": value.as_ref().map(|value| value.to_json()),
			}),
			Value::Response(ResponseData { committed, data }) => json!({
				"type": type_signature,
				"value": data.to_json(),
				"success": committed,
			}),
			Value::List(items) => json!({
				"type": type_signature,
				"value": items.iter().map(Value::to_json).collect::<Vec<_>>(),
			}),
			Value::Tuple(tuple) => {
				let entries: Map<String, serde_json::Value> = tuple
					.iter()
					.map(|(key, value)| (key.to_string(), value.to_json()))
					.collect();

				json!({
					"type": type_signature,
					"value": entries,
				})
			}
			Value::StringAscii(text) | Value::StringUtf8(text) => json!({
				"type": type_signature,
				"value": text,
			}),
		}
	}
}
