use rand::{distributions::Alphanumeric, thread_rng, Rng};
use stacks_core::{
	address::{AddressVersion, StacksAddress},
	clarity::{PrincipalData, Value},
	codec::Codec,
	crypto::{hash160::Hash160Hasher, Hashing},
};

const MAX_DEPTH: u8 = 5;

fn random_string(rng: &mut impl Rng, max_len: usize) -> String {
	let len = rng.gen_range(0..=max_len);

	rng.sample_iter(&Alphanumeric)
		.take(len)
		.map(char::from)
		.collect()
}

fn random_key(rng: &mut impl Rng) -> String {
	format!("k-{}", random_string(rng, 8).to_lowercase())
}

fn random_principal(rng: &mut impl Rng) -> PrincipalData {
	let address = StacksAddress::new(
		AddressVersion::TestnetSingleSig,
		Hash160Hasher::new(rng.gen::<[u8; 16]>()),
	);

	if rng.gen_bool(0.5) {
		PrincipalData::Standard(address)
	} else {
		let name = format!("c{}", random_string(rng, 10));
		PrincipalData::Contract(address, name.parse().unwrap())
	}
}

fn random_leaf(rng: &mut impl Rng) -> Value {
	match rng.gen_range(0..7) {
		0 => Value::Int(rng.gen()),
		1 => Value::UInt(rng.gen()),
		2 => Value::Bool(rng.gen()),
		3 => {
			let len = rng.gen_range(0..64);
			Value::buffer((0..len).map(|_| rng.gen()).collect::<Vec<u8>>())
		}
		4 => Value::string_ascii(random_string(rng, 32)).unwrap(),
		5 => Value::string_utf8(format!("{}\u{1f600}", random_string(rng, 8))),
		_ => Value::Principal(random_principal(rng)),
	}
}

fn random_value(rng: &mut impl Rng, depth: u8) -> Value {
	if depth >= MAX_DEPTH {
		return random_leaf(rng);
	}

	match rng.gen_range(0..6) {
		0 => Value::some(random_value(rng, depth + 1)),
		1 => Value::okay(random_value(rng, depth + 1)),
		2 => Value::error(random_value(rng, depth + 1)),
		3 => {
			let len = rng.gen_range(0..4);
			Value::list((0..len).map(|_| random_value(rng, depth + 1)).collect::<Vec<_>>())
		}
		4 => {
			let mut entries = std::collections::BTreeMap::new();
			for _ in 0..rng.gen_range(1..4) {
				entries.insert(random_key(rng), random_value(rng, depth + 1));
			}
			Value::tuple(entries).unwrap()
		}
		_ => random_leaf(rng),
	}
}

#[test]
fn should_round_trip_random_nested_values() {
	let mut rng = thread_rng();

	for _ in 0..500 {
		let value = random_value(&mut rng, 1);
		let bytes = value.serialize_to_vec().unwrap();

		assert_eq!(Value::deserialize_from_slice(&bytes).unwrap(), value);
	}
}

#[test]
fn should_round_trip_random_values_through_hex() {
	let mut rng = thread_rng();

	for _ in 0..100 {
		let value = random_value(&mut rng, 1);
		let hex = value.serialize_to_hex().unwrap();

		assert_eq!(Value::deserialize_from_hex(format!("0x{hex}")).unwrap(), value);
	}
}

#[test]
fn should_encode_tuples_canonically() {
	let forward = Value::tuple([("a", Value::UInt(1)), ("b", Value::UInt(2))]).unwrap();
	let backward = Value::tuple([("b", Value::UInt(2)), ("a", Value::UInt(1))]).unwrap();

	assert_eq!(
		forward.serialize_to_vec().unwrap(),
		backward.serialize_to_vec().unwrap()
	);
}

#[test]
fn should_fail_on_truncated_values() {
	let mut rng = thread_rng();

	for _ in 0..100 {
		let value = random_value(&mut rng, 1);
		let bytes = value.serialize_to_vec().unwrap();
		let cut = rng.gen_range(0..bytes.len());

		assert!(Value::deserialize_from_slice(&bytes[..cut]).is_err());
	}
}
