use std::{fmt, io, str::FromStr};

use strum::FromRepr;

use crate::{
	address::StacksAddress,
	clarity::{PrincipalData, Value},
	codec::{ByteReader, Codec, DecodeResult},
	validated_strings::{clarity_name::ClarityName, contract_name::ContractName},
	StacksError,
};

#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
enum PostConditionPrincipalId {
	Origin = 0x01,
	Standard = 0x02,
	Contract = 0x03,
}

impl_byte_enum_codec!(PostConditionPrincipalId);

#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
enum AssetInfoId {
	Stx = 0x00,
	FungibleAsset = 0x01,
	NonfungibleAsset = 0x02,
}

impl_byte_enum_codec!(AssetInfoId);

/// The principal whose asset movement a post condition constrains
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostConditionPrincipal {
	/// Whoever originates the transaction
	Origin,
	/// An account
	Standard(StacksAddress),
	/// A contract
	Contract(StacksAddress, ContractName),
}

impl From<PrincipalData> for PostConditionPrincipal {
	fn from(principal: PrincipalData) -> Self {
		match principal {
			PrincipalData::Standard(address) => Self::Standard(address),
			PrincipalData::Contract(address, name) => Self::Contract(address, name),
		}
	}
}

impl Codec for PostConditionPrincipal {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::Origin => PostConditionPrincipalId::Origin.codec_serialize(dest),
			Self::Standard(address) => {
				PostConditionPrincipalId::Standard.codec_serialize(dest)?;
				address.codec_serialize(dest)
			}
			Self::Contract(address, name) => {
				PostConditionPrincipalId::Contract.codec_serialize(dest)?;
				address.codec_serialize(dest)?;
				name.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		match PostConditionPrincipalId::codec_deserialize(reader)? {
			PostConditionPrincipalId::Origin => Ok(Self::Origin),
			PostConditionPrincipalId::Standard => {
				Ok(Self::Standard(StacksAddress::codec_deserialize(reader)?))
			}
			PostConditionPrincipalId::Contract => Ok(Self::Contract(
				StacksAddress::codec_deserialize(reader)?,
				ContractName::codec_deserialize(reader)?,
			)),
		}
	}
}

/// Comparison applied to the amount of a fungible asset that was sent
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FungibleConditionCode {
	/// Sent exactly the amount
	SentEq = 0x01,
	/// Sent more than the amount
	SentGt = 0x02,
	/// Sent at least the amount
	SentGe = 0x03,
	/// Sent less than the amount
	SentLt = 0x04,
	/// Sent at most the amount
	SentLe = 0x05,
}

impl_byte_enum_codec!(FungibleConditionCode);

/// Whether a non-fungible asset leaves the principal
#[repr(u8)]
#[derive(FromRepr, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NonfungibleConditionCode {
	/// The asset is sent
	Sent = 0x10,
	/// The asset is kept
	NotSent = 0x11,
}

impl_byte_enum_codec!(NonfungibleConditionCode);

/// An asset defined by a contract, written `ADDRESS.contract::asset`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetInfo {
	/// Deployer of the defining contract
	pub contract_address: StacksAddress,
	/// Name of the defining contract
	pub contract_name: ContractName,
	/// Name of the asset within the contract
	pub asset_name: ClarityName,
}

impl Codec for AssetInfo {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		self.contract_address.codec_serialize(dest)?;
		self.contract_name.codec_serialize(dest)?;
		self.asset_name.codec_serialize(dest)
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		Ok(Self {
			contract_address: StacksAddress::codec_deserialize(reader)?,
			contract_name: ContractName::codec_deserialize(reader)?,
			asset_name: ClarityName::codec_deserialize(reader)?,
		})
	}
}

impl FromStr for AssetInfo {
	type Err = StacksError;

	fn from_str(asset: &str) -> Result<Self, Self::Err> {
		let (contract, asset_name) = asset.split_once("::").ok_or(
			StacksError::InvalidArguments(
				"Asset must be written as address.contract::asset",
			),
		)?;
		let (address, contract_name) = contract.split_once('.').ok_or(
			StacksError::InvalidArguments(
				"Asset must be written as address.contract::asset",
			),
		)?;

		Ok(Self {
			contract_address: address.parse()?,
			contract_name: contract_name.parse()?,
			asset_name: asset_name.parse()?,
		})
	}
}

impl fmt::Display for AssetInfo {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(
			f,
			"{}.{}::{}",
			self.contract_address, self.contract_name, self.asset_name
		)
	}
}

/// A condition on asset movement checked after the transaction executes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionPostCondition {
	/// STX sent by the principal, in microSTX
	Stx(PostConditionPrincipal, FungibleConditionCode, u64),
	/// Fungible tokens sent by the principal
	Fungible(PostConditionPrincipal, AssetInfo, FungibleConditionCode, u64),
	/// Whether the principal sends the identified non-fungible token
	Nonfungible(
		PostConditionPrincipal,
		AssetInfo,
		Value,
		NonfungibleConditionCode,
	),
}

impl Codec for TransactionPostCondition {
	fn codec_serialize<W: io::Write>(&self, dest: &mut W) -> io::Result<()> {
		match self {
			Self::Stx(principal, code, amount) => {
				AssetInfoId::Stx.codec_serialize(dest)?;
				principal.codec_serialize(dest)?;
				code.codec_serialize(dest)?;
				amount.codec_serialize(dest)
			}
			Self::Fungible(principal, asset, code, amount) => {
				AssetInfoId::FungibleAsset.codec_serialize(dest)?;
				principal.codec_serialize(dest)?;
				asset.codec_serialize(dest)?;
				code.codec_serialize(dest)?;
				amount.codec_serialize(dest)
			}
			Self::Nonfungible(principal, asset, value, code) => {
				AssetInfoId::NonfungibleAsset.codec_serialize(dest)?;
				principal.codec_serialize(dest)?;
				asset.codec_serialize(dest)?;
				value.codec_serialize(dest)?;
				code.codec_serialize(dest)
			}
		}
	}

	fn codec_deserialize(reader: &mut ByteReader<'_>) -> DecodeResult<Self> {
		let condition = match AssetInfoId::codec_deserialize(reader)? {
			AssetInfoId::Stx => Self::Stx(
				PostConditionPrincipal::codec_deserialize(reader)?,
				FungibleConditionCode::codec_deserialize(reader)?,
				u64::codec_deserialize(reader)?,
			),
			AssetInfoId::FungibleAsset => Self::Fungible(
				PostConditionPrincipal::codec_deserialize(reader)?,
				AssetInfo::codec_deserialize(reader)?,
				FungibleConditionCode::codec_deserialize(reader)?,
				u64::codec_deserialize(reader)?,
			),
			AssetInfoId::NonfungibleAsset => Self::Nonfungible(
				PostConditionPrincipal::codec_deserialize(reader)?,
				AssetInfo::codec_deserialize(reader)?,
				Value::codec_deserialize(reader)?,
				NonfungibleConditionCode::codec_deserialize(reader)?,
			),
		};

		Ok(condition)
	}
}
