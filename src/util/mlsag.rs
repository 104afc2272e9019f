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

//! Multilayered linkable spontaneous anonymous group (MLSAG) signatures.
//!
//! A signature covers several rows of public keys sharing one secret column. The signer proves
//! knowledge of the private key at that column in every row, and links each row to its key image,
//! without revealing the column. Challenges are chained with `hash256` over every row's `L` and
//! `R` points followed by the message.
//!

use k256::{NonZeroScalar, ProjectivePoint, Scalar};
use log::debug;
use rand_core::{CryptoRng, RngCore};
use thiserror::Error;

use crate::cryptonote::hash::Hash;
use crate::network::Params;
use crate::util::key::{self, PrivateKey, PublicKey};
use crate::util::ringct::{self, compute_key_image, hash_to_point, KeyImage};

/// MLSAG errors.
#[derive(Error, Debug, PartialEq)]
pub enum Error {
    /// Ring shape is not acceptable.
    #[error("Malformed ring: {0}")]
    MalformedRing(&'static str),
    /// A private key does not match the ring member at the secret index.
    #[error("Private key of row {0} is not the ring member at the secret index")]
    SignerMismatch(usize),
    /// Key error.
    #[error("Key error: {0}")]
    Key(#[from] key::Error),
    /// RingCT error.
    #[error("RingCT error: {0}")]
    RingCt(#[from] ringct::Error),
}

/// An MLSAG signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signature {
    /// One key image per row.
    pub key_images: Vec<KeyImage>,
    /// Challenge at ring position 0.
    pub c: Scalar,
    /// Responses indexed as `s[ring_position][row]`.
    pub s: Vec<Vec<Scalar>>,
}

impl Signature {
    /// Challenge as 32 big-endian bytes.
    pub fn c_bytes(&self) -> [u8; 32] {
        PrivateKey::from_scalar(self.c).to_bytes()
    }

    /// Responses as 32 big-endian bytes each, indexed `[ring_position][row]`.
    pub fn s_bytes(&self) -> Vec<Vec<[u8; 32]>> {
        self.s
            .iter()
            .map(|column| {
                column
                    .iter()
                    .map(|s| PrivateKey::from_scalar(*s).to_bytes())
                    .collect()
            })
            .collect()
    }
}

/// Check the shape of a ring matrix: at least one and fewer than `max_rings` rows, every row of
/// the same length, and that length within `[min_ring_size + 1, max_ring_size + 1]`.
///
/// Returns the common ring size.
pub fn check_ring_validity(rings: &[Vec<PublicKey>], params: &Params) -> Result<usize, Error> {
    if rings.is_empty() {
        return Err(Error::MalformedRing("no ring to sign"));
    }
    if rings.len() >= params.max_rings {
        return Err(Error::MalformedRing("too many rings"));
    }

    let ring_size = rings[0].len();
    if rings.iter().any(|ring| ring.len() != ring_size) {
        return Err(Error::MalformedRing("rings have different sizes"));
    }
    if ring_size < params.min_ring_size + 1 || ring_size > params.max_ring_size + 1 {
        return Err(Error::MalformedRing("ring size out of bounds"));
    }

    Ok(ring_size)
}

fn compress(point: ProjectivePoint) -> Result<[u8; 33], Error> {
    Ok(PublicKey::from_point(point)?.to_bytes())
}

fn challenge(round: &[u8], message: &[u8; 32]) -> Scalar {
    let mut data = round.to_vec();
    data.extend_from_slice(message);
    Hash::hash_to_scalar(data).scalar
}

/// `L = s·G + c·P` and `R = s·Hp(P) + c·I` for every row at one ring position, serialized for
/// the challenge hash.
fn round_commitments(
    rings: &[Vec<PublicKey>],
    key_images: &[KeyImage],
    responses: &[Scalar],
    position: usize,
    c: &Scalar,
) -> Result<Vec<u8>, Error> {
    let mut round = Vec::with_capacity(rings.len() * 66 + 32);
    for (row, ring) in rings.iter().enumerate() {
        let member = &ring[position];
        let l = ProjectivePoint::GENERATOR * responses[row] + member.point() * c;
        let r = hash_to_point(member).point() * responses[row] + key_images[row].image.point() * c;
        round.extend_from_slice(&compress(l)?);
        round.extend_from_slice(&compress(r)?);
    }
    Ok(round)
}

/// Sign `message` over `rings` (one row per spent coin) with one private key per row, all at
/// ring position `index`.
pub fn sign<R>(
    message: &[u8; 32],
    rings: &[Vec<PublicKey>],
    keys: &[PrivateKey],
    index: usize,
    params: &Params,
    rng: &mut R,
) -> Result<Signature, Error>
where
    R: RngCore + CryptoRng,
{
    let ring_size = check_ring_validity(rings, params)?;
    if keys.len() != rings.len() {
        return Err(Error::MalformedRing("signing keys and rings do not match"));
    }
    if index >= ring_size {
        return Err(Error::MalformedRing("secret index out of range"));
    }
    for (row, (ring, key)) in rings.iter().zip(keys).enumerate() {
        if PublicKey::from_private_key(key).ok().as_ref() != Some(&ring[index]) {
            return Err(Error::SignerMismatch(row));
        }
    }

    let key_images = keys
        .iter()
        .map(compute_key_image)
        .collect::<Result<Vec<_>, _>>()?;

    let rows = rings.len();
    // Responses are kept as s[row][position] while signing.
    let mut responses: Vec<Vec<Scalar>> = (0..rows)
        .map(|_| {
            (0..ring_size)
                .map(|_| *NonZeroScalar::random(&mut *rng))
                .collect()
        })
        .collect();
    let alphas: Vec<Scalar> = (0..rows)
        .map(|_| *NonZeroScalar::random(&mut *rng))
        .collect();

    let mut round = Vec::with_capacity(rows * 66 + 32);
    for (ring, alpha) in rings.iter().zip(&alphas) {
        let l = ProjectivePoint::GENERATOR * alpha;
        let r = hash_to_point(&ring[index]).point() * alpha;
        round.extend_from_slice(&compress(l)?);
        round.extend_from_slice(&compress(r)?);
    }

    let mut challenges = vec![Scalar::ZERO; ring_size];
    let mut position = (index + 1) % ring_size;
    challenges[position] = challenge(&round, message);

    while position != index {
        let column: Vec<Scalar> = responses.iter().map(|row| row[position]).collect();
        let round = round_commitments(rings, &key_images, &column, position, &challenges[position])?;
        position = (position + 1) % ring_size;
        challenges[position] = challenge(&round, message);
    }

    for (row, (alpha, key)) in alphas.iter().zip(keys).enumerate() {
        responses[row][index] = *alpha - challenges[index] * key.scalar;
    }

    debug!("MLSAG signed: {} rows, ring size {}", rows, ring_size);

    Ok(Signature {
        key_images,
        c: challenges[0],
        s: (0..ring_size)
            .map(|position| responses.iter().map(|row| row[position]).collect())
            .collect(),
    })
}

/// Verify an MLSAG signature by recomputing the challenge chain from `c` and checking it closes.
pub fn verify(
    message: &[u8; 32],
    rings: &[Vec<PublicKey>],
    signature: &Signature,
    params: &Params,
) -> Result<bool, Error> {
    let ring_size = check_ring_validity(rings, params)?;
    if signature.key_images.len() != rings.len()
        || signature.s.len() != ring_size
        || signature.s.iter().any(|column| column.len() != rings.len())
    {
        return Err(Error::MalformedRing("signature does not match the rings"));
    }

    let mut c = signature.c;
    for (position, column) in signature.s.iter().enumerate() {
        let round = match round_commitments(rings, &signature.key_images, column, position, &c) {
            Ok(round) => round,
            // An identity round commitment never comes out of an honest signature.
            Err(Error::Key(key::Error::InvalidPoint)) => return Ok(false),
            Err(e) => return Err(e),
        };
        c = challenge(&round, message);
    }

    Ok(c == signature.c)
}
