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

//! Private and public keys on the secp256k1 curve.
//!
//! PRCY keys are plain secp256k1 keys: a [`PrivateKey`] is a scalar modulo the curve order,
//! serialized as 32 big-endian bytes, and a [`PublicKey`] is a curve point (never the identity)
//! serialized in SEC1 compressed form, `0x02` or `0x03` followed by the x-coordinate.
//!
//! ```rust
//! use std::str::FromStr;
//! use prcy::util::key::{PrivateKey, PublicKey};
//!
//! let privkey = PrivateKey::from_str(
//!     "0000000000000000000000000000000000000000000000000000000000000001",
//! )?;
//! let pubkey = PublicKey::from_private_key(&privkey)?;
//!
//! assert_eq!(
//!     "0279be667ef9dcbbac55a06295ce870b07029bfcdb2dce28d959f2815b16f81798",
//!     pubkey.to_string()
//! );
//! # Ok::<(), prcy::util::key::Error>(())
//! ```
//!

use std::hash::{Hash, Hasher};
use std::ops::{Add, Mul, Neg, Sub};
use std::str::FromStr;
use std::{fmt, io};

use k256::elliptic_curve::sec1::{FromEncodedPoint, ToEncodedPoint};
use k256::elliptic_curve::PrimeField;
use k256::{AffinePoint, EncodedPoint, FieldBytes, NonZeroScalar, ProjectivePoint, Scalar};
use rand_core::{CryptoRng, RngCore};
use sealed::sealed;
use thiserror::Error;

use crate::consensus::encode::{self, Decodable};

/// Potential errors encountered during key decoding.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Invalid input length.
    #[error("Invalid length")]
    InvalidLength,
    /// The scalar is not reduced modulo the curve order.
    #[error("Not a canonical representation of an secp256k1 scalar")]
    NotCanonicalScalar,
    /// The bytes do not encode a point on the curve, or encode the identity.
    #[error("Invalid point on the curve")]
    InvalidPoint,
    /// Invalid hex representation.
    #[error("Hex error: {0}")]
    Hex(#[from] hex::FromHexError),
}

/// A private key, a valid secp256k1 scalar.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PrivateKey {
    /// The actual secp256k1 scalar.
    pub scalar: Scalar,
}

impl PrivateKey {
    /// Serialize the private key as 32 big-endian bytes.
    pub fn to_bytes(&self) -> [u8; 32] {
        let mut bytes = [0u8; 32];
        bytes.copy_from_slice(&self.scalar.to_bytes());
        bytes
    }

    /// Deserialize a private key from 32 big-endian bytes, fail if the value is not reduced
    /// modulo the curve order.
    pub fn from_slice(data: &[u8]) -> Result<PrivateKey, Error> {
        if data.len() != 32 {
            return Err(Error::InvalidLength);
        }
        let scalar = Option::<Scalar>::from(Scalar::from_repr(FieldBytes::clone_from_slice(data)))
            .ok_or(Error::NotCanonicalScalar)?;
        Ok(PrivateKey { scalar })
    }

    /// Create a private key from a scalar.
    pub fn from_scalar(scalar: Scalar) -> PrivateKey {
        PrivateKey { scalar }
    }

    /// Draw a uniformly random non-zero private key.
    pub fn random<R: RngCore + CryptoRng>(rng: &mut R) -> PrivateKey {
        PrivateKey {
            scalar: *NonZeroScalar::random(rng),
        }
    }

    /// Whether the key is the zero scalar.
    pub fn is_zero(&self) -> bool {
        self.scalar == Scalar::ZERO
    }
}

impl fmt::Debug for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PrivateKey({})", self)
    }
}

impl fmt::Display for PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for PrivateKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes[..])
    }
}

impl Add for PrivateKey {
    type Output = PrivateKey;

    fn add(self, other: PrivateKey) -> PrivateKey {
        PrivateKey::from_scalar(self.scalar + other.scalar)
    }
}

impl Sub for PrivateKey {
    type Output = PrivateKey;

    fn sub(self, other: PrivateKey) -> PrivateKey {
        PrivateKey::from_scalar(self.scalar - other.scalar)
    }
}

impl Mul for PrivateKey {
    type Output = PrivateKey;

    fn mul(self, other: PrivateKey) -> PrivateKey {
        PrivateKey::from_scalar(self.scalar * other.scalar)
    }
}

impl Neg for PrivateKey {
    type Output = PrivateKey;

    fn neg(self) -> PrivateKey {
        PrivateKey::from_scalar(-self.scalar)
    }
}

impl Decodable for PrivateKey {
    fn consensus_decode<D: io::Read>(d: &mut D) -> Result<PrivateKey, encode::Error> {
        let bytes: [u8; 32] = Decodable::consensus_decode(d)?;
        PrivateKey::from_slice(&bytes)
            .map_err(|_| encode::Error::ParseFailed("invalid private key"))
    }
}

#[sealed]
impl crate::consensus::encode::Encodable for PrivateKey {
    fn consensus_encode<S: io::Write>(&self, s: &mut S) -> Result<usize, io::Error> {
        self.to_bytes().consensus_encode(s)
    }
}

/// A public key, a point on the secp256k1 curve other than the identity.
///
/// Public keys are compared and hashed by their compressed encoding.
#[derive(Copy, Clone, PartialEq, Eq)]
pub struct PublicKey {
    point: AffinePoint,
}

impl PublicKey {
    /// Serialize the public key in compressed SEC1 form.
    pub fn to_bytes(&self) -> [u8; 33] {
        let encoded = self.point.to_encoded_point(true);
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(encoded.as_bytes());
        bytes
    }

    /// Deserialize a compressed public key, fail if the prefix is not `0x02`/`0x03` or if the
    /// x-coordinate is not on the curve.
    pub fn from_slice(data: &[u8]) -> Result<PublicKey, Error> {
        if data.len() != 33 {
            return Err(Error::InvalidLength);
        }
        if data[0] != 0x02 && data[0] != 0x03 {
            return Err(Error::InvalidPoint);
        }
        let encoded = EncodedPoint::from_bytes(data).map_err(|_| Error::InvalidPoint)?;
        let point = Option::<AffinePoint>::from(AffinePoint::from_encoded_point(&encoded))
            .ok_or(Error::InvalidPoint)?;
        Ok(PublicKey { point })
    }

    /// Create a public key from a point, fail on the identity.
    pub fn from_point(point: ProjectivePoint) -> Result<PublicKey, Error> {
        if point == ProjectivePoint::IDENTITY {
            return Err(Error::InvalidPoint);
        }
        Ok(PublicKey {
            point: point.to_affine(),
        })
    }

    /// Generate a public key from the private key, fail on the zero key.
    pub fn from_private_key(privkey: &PrivateKey) -> Result<PublicKey, Error> {
        PublicKey::from_point(ProjectivePoint::GENERATOR * privkey.scalar)
    }

    /// Return the underlying curve point.
    pub fn point(&self) -> ProjectivePoint {
        ProjectivePoint::from(self.point)
    }
}

impl Hash for PublicKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.to_bytes().hash(state);
    }
}

impl fmt::Debug for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PublicKey({})", self)
    }
}

impl fmt::Display for PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", hex::encode(self.to_bytes()))
    }
}

impl FromStr for PublicKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s)?;
        Self::from_slice(&bytes[..])
    }
}

impl Mul<&PrivateKey> for &PublicKey {
    type Output = Result<PublicKey, Error>;

    fn mul(self, other: &PrivateKey) -> Result<PublicKey, Error> {
        PublicKey::from_point(self.point() * other.scalar)
    }
}

/// Two private keys representing the view and the spend keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyPair {
    /// The private view key needed to recognize owned outputs.
    pub view: PrivateKey,
    /// The private spend key needed to spend owned outputs.
    pub spend: PrivateKey,
}

impl KeyPair {
    /// Return the view pair corresponding to this key pair.
    pub fn view_pair(&self) -> Result<ViewPair, Error> {
        Ok(ViewPair {
            view: self.view,
            spend: PublicKey::from_private_key(&self.spend)?,
        })
    }
}

/// View pair to scan transactions: the private view key and the public spend key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewPair {
    /// The private view key needed to recognize owned outputs and amounts.
    pub view: PrivateKey,
    /// The public spend key needed to recognize owned outputs.
    pub spend: PublicKey,
}

#[cfg(feature = "serde")]
mod serde_impl {
    use super::*;

    use serde_crate::{de::Error, Deserialize, Deserializer, Serialize, Serializer};

    impl Serialize for PublicKey {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for PublicKey {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            PublicKey::from_str(&s).map_err(D::Error::custom)
        }
    }

    impl Serialize for PrivateKey {
        fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
        where
            S: Serializer,
        {
            serializer.serialize_str(&self.to_string())
        }
    }

    impl<'de> Deserialize<'de> for PrivateKey {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
        where
            D: Deserializer<'de>,
        {
            let s = String::deserialize(deserializer)?;
            PrivateKey::from_str(&s).map_err(D::Error::custom)
        }
    }
}
