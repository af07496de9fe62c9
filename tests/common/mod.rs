//! This module contains common testing utilities for testing this library.
#![cfg(test)]
#![allow(unused)] // Not every test binary uses every helper

use sha3::{Digest, Keccak256};

/// Computes the four-byte dispatch selector for the provided function
/// `signature` (e.g. `totalSupply()`).
pub fn selector(signature: &str) -> [u8; 4] {
    let hash = Keccak256::digest(signature.as_bytes());
    let mut selector = [0u8; 4];
    selector.copy_from_slice(&hash[..4]);
    selector
}

/// Computes the selector for the provided function `signature` in the
/// `0x`-prefixed lower-case form used as a dispatch-table key.
pub fn selector_hex(signature: &str) -> String {
    format!("0x{}", hex::encode(selector(signature)))
}

/// Computes the 32-byte topic for the provided event `signature`
/// (e.g. `Transfer(address,address,uint256)`).
pub fn event_topic(signature: &str) -> [u8; 32] {
    Keccak256::digest(signature.as_bytes()).into()
}

/// Computes the topic for the provided event `signature` in the
/// `0x`-prefixed lower-case form used for event candidates.
pub fn event_topic_hex(signature: &str) -> String {
    format!("0x{}", hex::encode(event_topic(signature)))
}

/// Encodes a byte sequence as the `0x`-prefixed hex string form that the
/// library ingests.
pub fn to_hex(code: &[u8]) -> String {
    format!("0x{}", hex::encode(code))
}
