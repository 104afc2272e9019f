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

//! RingCT primitives: Pedersen commitments, amount masking and key images.
//!
//! A commitment to `amount` with blinding factor `blind` is the point `amount·H + blind·G`. On
//! the wire commitments use the tag bytes `0x08`/`0x09` instead of the `0x02`/`0x03` public key
//! prefixes, so the two can never be confused. The tag does not carry the parity of `y` directly:
//! `0x08` means `y` is the square root `(x³ + 7)^((p+1)/4)` and `0x09` means it is its negation.
//!

use std::ops::{Add, Sub};

use hex_literal::hex;
use k256::{FieldBytes, FieldElement, ProjectivePoint, Scalar};
use thiserror::Error;

use crate::cryptonote::hash::hash256;
use crate::util::key::{self, PrivateKey, PublicKey};

/// The secp256k1 base point `G`, in compressed form.
pub const G_COMPRESSED: [u8; 33] =
    hex!("0279BE667EF9DCBBAC55A06295CE870B07029BFCDB2DCE28D959F2815B16F81798");

/// The second generator `H` amounts are committed on, in compressed form. Nobody knows its
/// discrete logarithm with respect to `G`.
pub const H_COMPRESSED: [u8; 33] =
    hex!("0250929b74c1a04954b78b4b6035e97a5e078a5a0f28ec96d547bfee9ace803ac0");

/// Commitment tag for `y = (x³ + 7)^((p+1)/4)`.
pub const COMMITMENT_TAG_ROOT: u8 = 0x08;
/// Commitment tag for `y = -(x³ + 7)^((p+1)/4)`.
pub const COMMITMENT_TAG_NEGATED: u8 = 0x09;

/// RingCT related errors.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Invalid commitment encoding, or a commitment to the identity.
    #[error("Invalid commitment")]
    InvalidCommitment,
    /// Key error.
    #[error("Key error: {0}")]
    Key(#[from] key::Error),
}

/// Return the generator `H`.
pub fn generator_h() -> Result<ProjectivePoint, Error> {
    Ok(PublicKey::from_slice(&H_COMPRESSED)?.point())
}

/// Parity of `(x³ + 7)^((p+1)/4)` for the x-coordinate `x`.
fn root_is_odd(x: &[u8]) -> Result<bool, Error> {
    let x = Option::<FieldElement>::from(FieldElement::from_bytes(FieldBytes::from_slice(x)))
        .ok_or(Error::InvalidCommitment)?;
    let y2 = x.square() * x + FieldElement::from_u64(7);
    let root = Option::<FieldElement>::from(y2.sqrt()).ok_or(Error::InvalidCommitment)?;
    Ok(root.normalize().is_odd().into())
}

/// A Pedersen commitment `amount·H + blind·G`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Commitment {
    point: ProjectivePoint,
}

impl Commitment {
    /// Commit to `amount` with the blinding factor `blind`. A zero blind yields the unblinded
    /// commitment `amount·H`, as used for the public fee.
    pub fn commit(amount: u64, blind: &Scalar) -> Result<Commitment, Error> {
        let h = generator_h()?;
        let value = h * Scalar::from(amount);
        if *blind == Scalar::ZERO {
            return Ok(Commitment { point: value });
        }
        Ok(Commitment {
            point: value + ProjectivePoint::GENERATOR * blind,
        })
    }

    /// Wrap an arbitrary point.
    pub fn from_point(point: ProjectivePoint) -> Commitment {
        Commitment { point }
    }

    /// Return the underlying curve point.
    pub fn point(&self) -> ProjectivePoint {
        self.point
    }

    /// View the commitment as a public key, fail on the identity.
    pub fn as_public_key(&self) -> Result<PublicKey, Error> {
        Ok(PublicKey::from_point(self.point).map_err(|_| Error::InvalidCommitment)?)
    }

    /// Serialize with the `0x02`/`0x03` public key prefix.
    pub fn to_pubkey_bytes(&self) -> Result<[u8; 33], Error> {
        Ok(self.as_public_key()?.to_bytes())
    }

    /// Serialize with the `0x08`/`0x09` commitment tag.
    pub fn to_tagged_bytes(&self) -> Result<[u8; 33], Error> {
        let mut bytes = self.to_pubkey_bytes()?;
        let y_odd = bytes[0] == 0x03;
        bytes[0] = if y_odd == root_is_odd(&bytes[1..])? {
            COMMITMENT_TAG_ROOT
        } else {
            COMMITMENT_TAG_NEGATED
        };
        Ok(bytes)
    }

    /// Deserialize a commitment in either tagged (`0x08`/`0x09`) or public key (`0x02`/`0x03`)
    /// form.
    pub fn from_slice(data: &[u8]) -> Result<Commitment, Error> {
        if data.len() != 33 {
            return Err(Error::InvalidCommitment);
        }
        let mut bytes = [0u8; 33];
        bytes.copy_from_slice(data);
        match data[0] {
            0x02 | 0x03 => {}
            tag @ COMMITMENT_TAG_ROOT | tag @ COMMITMENT_TAG_NEGATED => {
                let root_odd = root_is_odd(&data[1..])?;
                let y_odd = if tag == COMMITMENT_TAG_ROOT {
                    root_odd
                } else {
                    !root_odd
                };
                bytes[0] = if y_odd { 0x03 } else { 0x02 };
            }
            _ => return Err(Error::InvalidCommitment),
        }
        let key = PublicKey::from_slice(&bytes).map_err(|_| Error::InvalidCommitment)?;
        Ok(Commitment { point: key.point() })
    }
}

impl Add for Commitment {
    type Output = Commitment;

    fn add(self, other: Commitment) -> Commitment {
        Commitment::from_point(self.point + other.point)
    }
}

impl Sub for Commitment {
    type Output = Commitment;

    fn sub(self, other: Commitment) -> Commitment {
        Commitment::from_point(self.point - other.point)
    }
}

/// Amount and blinding factor masked for the recipient with the ECDH shared point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EcdhInfo {
    /// Little-endian amount tiled four times, XOR the second shared secret.
    pub encoded_amount: [u8; 32],
    /// Big-endian blinding factor XOR the first shared secret.
    pub encoded_blind: [u8; 32],
}

fn shared_secrets(shared: &PublicKey) -> ([u8; 32], [u8; 32]) {
    let first = hash256(&shared.to_bytes());
    let second = hash256(&first);
    (first, second)
}

/// Mask `amount` and `blind` with secrets derived from the ECDH point.
pub fn encode_values(shared: &PublicKey, amount: u64, blind: &Scalar) -> EcdhInfo {
    let (first, second) = shared_secrets(shared);

    let mut encoded_blind = [0u8; 32];
    encoded_blind.copy_from_slice(&blind.to_bytes());
    for (byte, mask) in encoded_blind.iter_mut().zip(first.iter()) {
        *byte ^= mask;
    }

    let amount = amount.to_le_bytes();
    let mut encoded_amount = [0u8; 32];
    for (i, byte) in encoded_amount.iter_mut().enumerate() {
        *byte = amount[i % 8] ^ second[i];
    }

    EcdhInfo {
        encoded_amount,
        encoded_blind,
    }
}

/// Reverse [`encode_values`], returning the amount and the raw blinding factor bytes.
pub fn decode_values(shared: &PublicKey, info: &EcdhInfo) -> (u64, [u8; 32]) {
    let (first, second) = shared_secrets(shared);

    let mut amount = [0u8; 8];
    for (i, byte) in amount.iter_mut().enumerate() {
        *byte = info.encoded_amount[i] ^ second[i];
    }

    let mut blind = info.encoded_blind;
    for (byte, mask) in blind.iter_mut().zip(first.iter()) {
        *byte ^= mask;
    }

    (u64::from_le_bytes(amount), blind)
}

impl EcdhInfo {
    /// Unmask the amount and blinding factor and check them against the on-chain commitment.
    ///
    /// Returns `None` if the values do not open `commitment`.
    pub fn open_commitment(&self, shared: &PublicKey, commitment: &Commitment) -> Option<Opening> {
        let (amount, blind) = decode_values(shared, self);
        let blinding_factor = PrivateKey::from_slice(&blind).ok()?.scalar;
        let expected = Commitment::commit(amount, &blinding_factor).ok()?;

        if expected == *commitment {
            Some(Opening {
                amount,
                blinding_factor,
                commitment: expected,
            })
        } else {
            None
        }
    }
}

/// The cleartext amount and blinding factor of a commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    /// The amount.
    pub amount: u64,
    /// The blinding factor.
    pub blinding_factor: Scalar,
    /// The commitment they open.
    pub commitment: Commitment,
}

/// A key image `Hp(P)·x`, unique per private key, used to detect double spends.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyImage {
    /// The image point.
    pub image: PublicKey,
}

impl KeyImage {
    /// Serialize the key image in compressed form.
    pub fn to_bytes(&self) -> [u8; 33] {
        self.image.to_bytes()
    }

    /// Deserialize a compressed key image.
    pub fn from_slice(data: &[u8]) -> Result<KeyImage, Error> {
        Ok(KeyImage {
            image: PublicKey::from_slice(data)?,
        })
    }
}

/// Deterministically map a public key to a curve point.
///
/// The candidate is the public key prefix followed by `hash256(pubkey)`, re-hashed until it
/// decodes as a point.
pub fn hash_to_point(pubkey: &PublicKey) -> PublicKey {
    let bytes = pubkey.to_bytes();
    let mut candidate = [0u8; 33];
    candidate[0] = bytes[0];
    candidate[1..].copy_from_slice(&hash256(&bytes));

    loop {
        if let Ok(point) = PublicKey::from_slice(&candidate) {
            return point;
        }
        let next = hash256(&candidate);
        candidate[1..].copy_from_slice(&next);
    }
}

/// Compute the key image of a private key.
pub fn compute_key_image(privkey: &PrivateKey) -> Result<KeyImage, Error> {
    let pubkey = PublicKey::from_private_key(privkey)?;
    let image = (&hash_to_point(&pubkey) * privkey)?;
    Ok(KeyImage { image })
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use k256::{ProjectivePoint, Scalar};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{
        compute_key_image, decode_values, encode_values, generator_h, hash_to_point, Commitment,
        Error, G_COMPRESSED,
    };
    use crate::util::key::{PrivateKey, PublicKey};

    #[test]
    fn generators() {
        let g = PublicKey::from_slice(&G_COMPRESSED).unwrap();
        assert_eq!(g.point(), ProjectivePoint::GENERATOR);
        assert!(generator_h().is_ok());
        assert_ne!(generator_h().unwrap(), ProjectivePoint::GENERATOR);
    }

    #[test]
    fn zero_blind_commits_to_amount_only() {
        let fee = Commitment::commit(40790, &Scalar::ZERO).unwrap();
        assert_eq!(fee.point(), generator_h().unwrap() * Scalar::from(40790u64));
        assert_eq!(
            Commitment::commit(0, &Scalar::ZERO).unwrap().point(),
            ProjectivePoint::IDENTITY
        );
    }

    #[test]
    fn commitments_are_homomorphic() {
        let a = Commitment::commit(300, &Scalar::from(7u64)).unwrap();
        let b = Commitment::commit(200, &Scalar::from(5u64)).unwrap();
        assert_eq!(a + b, Commitment::commit(500, &Scalar::from(12u64)).unwrap());
        assert_eq!(a - b, Commitment::commit(100, &Scalar::from(2u64)).unwrap());
    }

    #[test]
    fn tagged_form_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        for amount in 1..20u64 {
            let blind = PrivateKey::random(&mut rng).scalar;
            let commitment = Commitment::commit(amount * 1_000_003, &blind).unwrap();
            let tagged = commitment.to_tagged_bytes().unwrap();
            assert!(tagged[0] == 0x08 || tagged[0] == 0x09);
            assert_eq!(&tagged[1..], &commitment.to_pubkey_bytes().unwrap()[1..]);
            assert_eq!(Commitment::from_slice(&tagged).unwrap(), commitment);
            assert_eq!(
                Commitment::from_slice(&commitment.to_pubkey_bytes().unwrap()).unwrap(),
                commitment
            );
        }
    }

    #[test]
    fn tagged_form_of_generator() {
        // The canonical square root for G's x-coordinate is G's own (even) y.
        let g = Commitment::from_point(ProjectivePoint::GENERATOR);
        let tagged = g.to_tagged_bytes().unwrap();
        assert_eq!(tagged[0], 0x08);
        assert_eq!(
            (-g.point()),
            Commitment::from_slice(&{
                let mut negated = tagged;
                negated[0] = 0x09;
                negated
            })
            .unwrap()
            .point()
        );
    }

    #[test]
    fn invalid_commitments() {
        assert_eq!(
            Commitment::from_slice(&[0x04; 33]),
            Err(Error::InvalidCommitment)
        );
        assert_eq!(
            Commitment::from_slice(&[0x08; 32]),
            Err(Error::InvalidCommitment)
        );
        assert_eq!(
            Commitment::commit(0, &Scalar::ZERO).unwrap().to_tagged_bytes(),
            Err(Error::InvalidCommitment)
        );
    }

    #[test]
    fn masking_round_trip() {
        let mut rng = StdRng::seed_from_u64(42);
        let shared = PublicKey::from_private_key(&PrivateKey::random(&mut rng)).unwrap();
        for amount in [0u64, 1, 40790, 900_000_000, u64::MAX].iter() {
            let blind = PrivateKey::random(&mut rng).scalar;
            let info = encode_values(&shared, *amount, &blind);
            let (decoded_amount, decoded_blind) = decode_values(&shared, &info);
            assert_eq!(decoded_amount, *amount);
            assert_eq!(PrivateKey::from_slice(&decoded_blind).unwrap().scalar, blind);

            let commitment = Commitment::commit(*amount, &blind).unwrap();
            let opening = info.open_commitment(&shared, &commitment).unwrap();
            assert_eq!(opening.amount, *amount);
            assert_eq!(opening.blinding_factor, blind);
        }
    }

    #[test]
    fn masked_amount_is_tiled() {
        let shared = PublicKey::from_slice(&G_COMPRESSED).unwrap();
        let zero = encode_values(&shared, 0, &Scalar::ZERO);
        let info = encode_values(&shared, 0x0102030405060708, &Scalar::ZERO);
        for i in 0..32 {
            let plain = info.encoded_amount[i] ^ zero.encoded_amount[i];
            assert_eq!(plain, (8 - (i % 8)) as u8);
        }
    }

    #[test]
    fn wrong_shared_point_does_not_open() {
        let mut rng = StdRng::seed_from_u64(3);
        let shared = PublicKey::from_private_key(&PrivateKey::random(&mut rng)).unwrap();
        let other = PublicKey::from_private_key(&PrivateKey::random(&mut rng)).unwrap();
        let blind = PrivateKey::random(&mut rng).scalar;
        let info = encode_values(&shared, 5000, &blind);
        let commitment = Commitment::commit(5000, &blind).unwrap();
        assert!(info.open_commitment(&other, &commitment).is_none());
    }

    #[test]
    fn key_image_is_deterministic() {
        let key = PrivateKey::from_str(
            "b526321e8a138afba32063ac87d21f3deb05cb40a46410f8fe861f5ab95ac606",
        )
        .unwrap();
        let other = PrivateKey::from_str(
            "57cabb831c03159455ef561e7ce7daf841c5921b264f837d970115b9ef24c100",
        )
        .unwrap();
        assert_eq!(
            compute_key_image(&key).unwrap(),
            compute_key_image(&key).unwrap()
        );
        assert_ne!(
            compute_key_image(&key).unwrap(),
            compute_key_image(&other).unwrap()
        );

        let pubkey = PublicKey::from_private_key(&key).unwrap();
        let hp = hash_to_point(&pubkey);
        assert_eq!(hp.to_bytes()[0], pubkey.to_bytes()[0]);
        assert_eq!(
            compute_key_image(&key).unwrap().image,
            (&hp * &key).unwrap()
        );
    }
}
