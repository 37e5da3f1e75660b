use ethers::types::{Address, H256};
use ethers::utils::to_checksum;
use num_bigint::BigUint;
use num_traits::Num;

use crate::error::{DistributorError, Result};

const ADDRESS_HEX_LEN: usize = 40;
const HASH_HEX_LEN: usize = 64;
const WORD_BITS: u64 = 256;

fn strip_hex_prefix(value: &str) -> Option<&str> {
    value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
}

/// Parses 40 hex characters, optional `0x`, in any casing. Mixed-case input is
/// not checked against its checksum; every casing maps to the same address.
pub fn parse_address(value: &str) -> Result<Address> {
    let trimmed = value.trim();
    let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed);

    if digits.len() != ADDRESS_HEX_LEN {
        return Err(DistributorError::InvalidAddress(value.to_string()));
    }

    let mut bytes = [0u8; 20];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|_| DistributorError::InvalidAddress(value.to_string()))?;

    Ok(Address::from(bytes))
}

/// EIP-55 mixed-case form of `address`.
pub fn checksum(address: &Address) -> String {
    to_checksum(address, None)
}

/// Parses a non-negative integer, decimal or `0x`-prefixed hex.
pub fn parse_amount(value: &str) -> Result<BigUint> {
    let trimmed = value.trim();
    let malformed = || DistributorError::NegativeOrMalformedAmount(value.to_string());

    let (digits, radix) = match strip_hex_prefix(trimmed) {
        Some(digits) => (digits, 16),
        None => (trimmed, 10),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(malformed());
    }

    BigUint::from_str_radix(digits, radix).map_err(|_| malformed())
}

/// Big-endian 32-byte word of `amount`, as the leaf encoding expects.
pub fn amount_to_word(amount: &BigUint) -> Result<[u8; 32]> {
    if amount.bits() > WORD_BITS {
        return Err(DistributorError::AmountOutOfRange(amount.clone()));
    }

    let bytes = amount.to_bytes_be();
    let mut word = [0u8; 32];
    word[32 - bytes.len()..].copy_from_slice(&bytes);
    Ok(word)
}

/// `0x`-prefixed lowercase hex with an even number of digits, `0x00` for zero.
pub fn to_hex_string(value: &BigUint) -> String {
    let digits = value.to_str_radix(16);
    if digits.len() % 2 == 1 {
        format!("0x0{digits}")
    } else {
        format!("0x{digits}")
    }
}

pub fn parse_hash(value: &str) -> Result<H256> {
    let trimmed = value.trim();
    let digits = strip_hex_prefix(trimmed).unwrap_or(trimmed);

    if digits.len() != HASH_HEX_LEN {
        return Err(DistributorError::InvalidHash(value.to_string()));
    }

    let mut bytes = [0u8; 32];
    hex::decode_to_slice(digits, &mut bytes)
        .map_err(|_| DistributorError::InvalidHash(value.to_string()))?;

    Ok(H256(bytes))
}

/// Serde adapter for amounts: writes `to_hex_string`, reads anything `parse_amount` accepts.
pub mod hex_biguint {
    use num_bigint::BigUint;
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    use super::{parse_amount, to_hex_string};

    pub fn serialize<S: Serializer>(value: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&to_hex_string(value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse_amount(&raw).map_err(D::Error::custom)
    }
}
