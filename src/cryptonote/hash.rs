// Rust PRCY Library
// Written in 2019-2022 by
//   Monero Rust Contributors
// Adapted to PRCY RingCT in 2026 by
//   PRCY Rust Contributors
//
// Permission is hereby granted, free of charge, to any person obtaining a copy
// of this software and associated documentation files (the "Software"), to deal
// in the Software without restriction, including without limitation the rights
// to use, copy, modify, merge, publish, distribute, sublicense, and/or sell
// copies of the Software, and to permit persons to whom the Software is
// furnished to do so, subject to the following conditions:
//
// The above copyright notice and this permission notice shall be included in all
// copies or substantial portions of the Software.
//

//! Hash functions and types (double SHA-256) used in PRCY.
//!
//! ```rust
//! use prcy::cryptonote::hash::{hash256, Hash};
//!
//! let input = "hello, world!";
//! let hash = Hash::new(input);
//!
//! assert_eq!(hash.to_bytes(), hash256(input.as_bytes()));
//! ```
//!

use std::io;

use k256::elliptic_curve::ops::Reduce;
use k256::{FieldBytes, Scalar, U256};
use sealed::sealed;
use sha2::{Digest, Sha256};

use crate::consensus::encode::{self, Decodable};
use crate::util::key::PrivateKey;

fixed_hash::construct_fixed_hash! {
    /// Result of a double SHA-256, a fixed 32-bytes array.
    pub struct Hash(32);
}

impl_hex_serde!(Hash, 32);

impl Hash {
    /// Create a null hash with all zeros.
    pub fn null() -> Hash {
        Hash([0u8; 32])
    }

    /// Hash a stream of bytes with `SHA256(SHA256(x))`.
    pub fn new(input: impl AsRef<[u8]>) -> Hash {
        Hash(hash256(input.as_ref()))
    }

    /// Return the 32-bytes hash array.
    pub fn to_bytes(self) -> [u8; 32] {
        self.0
    }

    /// Return the bytes in reverse order, the way transaction ids are displayed by explorers and
    /// the PRCY daemon.
    pub fn to_reversed_hex(self) -> String {
        let mut bytes = self.0;
        bytes.reverse();
        hex::encode(bytes)
    }

    /// Reduce the hash modulo the curve order and return it as a private key.
    pub fn as_scalar(&self) -> PrivateKey {
        PrivateKey::from_scalar(<Scalar as Reduce<U256>>::reduce_bytes(&FieldBytes::from(
            self.0,
        )))
    }

    /// Hash a stream of bytes and reduce the digest modulo the curve order.
    pub fn hash_to_scalar(input: impl AsRef<[u8]>) -> PrivateKey {
        Self::new(input).as_scalar()
    }
}

/// Capacity of an object to hash itself and return the result as a [`Hash`].
pub trait Hashable {
    /// Return its own hash.
    fn hash(&self) -> Hash;
}

impl Decodable for Hash {
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<Hash, encode::Error> {
        Ok(Hash(Decodable::consensus_decode(d)?))
    }
}

#[sealed]
impl crate::consensus::encode::Encodable for Hash {
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        self.0.consensus_encode(s)
    }
}

/// Compute `SHA256(SHA256(input))`, the digest used for checksums, challenges, shared secrets and
/// signing messages.
pub fn hash256(input: &[u8]) -> [u8; 32] {
    let first = Sha256::digest(input);
    let second = Sha256::digest(&first);
    let mut out = [0u8; 32];
    out.copy_from_slice(&second);
    out
}

#[cfg(test)]
mod tests {
    use super::{hash256, Hash};

    #[test]
    fn double_sha256_vectors() {
        assert_eq!(
            hex::encode(hash256(b"")),
            "5df6e0e2761359d30a8275058e299fcc0381534545f55cf43e41983f5d4c9456"
        );
        assert_eq!(
            hex::encode(hash256(b"hello")),
            "9595c9df90075148eb06860365df33584b75bff782a510c6cd4883a419833d50"
        );
    }

    #[test]
    fn reversed_hex() {
        let mut bytes = [0u8; 32];
        bytes[0] = 0x01;
        bytes[31] = 0xff;
        let hash = Hash(bytes);
        assert!(hash.to_reversed_hex().starts_with("ff"));
        assert!(hash.to_reversed_hex().ends_with("01"));
    }

    #[test]
    fn scalar_reduction_is_deterministic() {
        assert_eq!(Hash::hash_to_scalar(b"prcy"), Hash::hash_to_scalar(b"prcy"));
        assert_ne!(Hash::hash_to_scalar(b"prcy"), Hash::hash_to_scalar(b"PRCY"));
    }
}
