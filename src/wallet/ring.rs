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

//! Decoy rings and the balance ring.
//!
//! Each spent coin gets a ring of `ring_size` members: the coin itself at the secret index and
//! decoys drawn from the decoy pool everywhere else. One extra ring proves that inputs and
//! outputs balance. At every position `j` its member is
//!
//! ```text
//! sum_i(P_i[j] + C_i[j]) - (sum(C_out) + fee·H)
//! ```
//!
//! At the secret index this is `x·G` where `x` is the sum of the spent private keys plus the
//! input blinds minus the output blinds, so the signer knows its private key only if the
//! commitments balance.
//!

use std::collections::HashSet;

use k256::{ProjectivePoint, Scalar};
use rand::seq::index::sample;
use rand_core::{CryptoRng, RngCore};

use crate::blockdata::transaction::OutPoint;
use crate::util::key::{PrivateKey, PublicKey};
use crate::util::ringct::Commitment;
use crate::wallet::Error;

/// A ring member candidate: an output, its one-time key and its commitment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decoy {
    /// Output reference.
    pub outpoint: OutPoint,
    /// One-time public key of the output.
    pub public_key: PublicKey,
    /// Commitment of the output.
    pub commitment: Commitment,
}

/// A coin being spent, with everything needed to sign for it.
#[derive(Debug, Clone, Copy)]
pub struct SpendableInput {
    /// Output reference.
    pub outpoint: OutPoint,
    /// Clear amount.
    pub amount: u64,
    /// Blinding factor of the output commitment.
    pub blind: Scalar,
    /// One-time private key of the output.
    pub private_key: PrivateKey,
}

impl SpendableInput {
    /// The coin as a ring member.
    pub fn as_ring_member(&self) -> Result<Decoy, Error> {
        Ok(Decoy {
            outpoint: self.outpoint,
            public_key: PublicKey::from_private_key(&self.private_key)?,
            commitment: Commitment::commit(self.amount, &self.blind)?,
        })
    }
}

/// The ring of one input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InputRing {
    /// Members in ring order.
    pub members: Vec<Decoy>,
}

impl InputRing {
    /// Public keys of the members, in ring order.
    pub fn public_keys(&self) -> Vec<PublicKey> {
        self.members.iter().map(|m| m.public_key).collect()
    }
}

/// Draw `ring_size - 1` distinct decoys for every input.
///
/// The real coins are never used as decoys and no output appears in two rings.
pub fn choose_decoys<R>(
    inputs: &[SpendableInput],
    pool: &[Decoy],
    ring_size: usize,
    rng: &mut R,
) -> Result<Vec<Vec<Decoy>>, Error>
where
    R: RngCore + CryptoRng,
{
    let mut seen: HashSet<OutPoint> = inputs.iter().map(|input| input.outpoint).collect();
    let available: Vec<&Decoy> = pool
        .iter()
        .filter(|decoy| seen.insert(decoy.outpoint))
        .collect();

    let per_input = ring_size.saturating_sub(1);
    let needed = per_input * inputs.len();
    if available.len() < needed {
        return Err(Error::InsufficientDecoys {
            needed,
            available: available.len(),
        });
    }

    let picked: Vec<Decoy> = sample(rng, available.len(), needed)
        .into_iter()
        .map(|i| *available[i])
        .collect();

    Ok(picked
        .chunks(per_input.max(1))
        .take(inputs.len())
        .map(|chunk| chunk.to_vec())
        .collect())
}

/// Place every real coin at `secret_index` among its decoys.
pub fn assemble_rings(
    inputs: &[SpendableInput],
    decoys: Vec<Vec<Decoy>>,
    secret_index: usize,
) -> Result<Vec<InputRing>, Error> {
    if decoys.len() != inputs.len() {
        return Err(Error::MalformedRing("one decoy set per input is required"));
    }

    inputs
        .iter()
        .zip(decoys)
        .map(|(input, mut members)| {
            if secret_index > members.len() {
                return Err(Error::MalformedRing("secret index out of range"));
            }
            members.insert(secret_index, input.as_ring_member()?);
            Ok(InputRing { members })
        })
        .collect()
}

/// Private key of the balance ring: the spent private keys plus the input blinds, minus the
/// output blinds.
pub fn balance_private_key(inputs: &[SpendableInput], output_blinds: &[Scalar]) -> PrivateKey {
    let inputs_sum = inputs
        .iter()
        .fold(Scalar::ZERO, |acc, input| acc + input.private_key.scalar + input.blind);
    let outputs_sum = output_blinds.iter().fold(Scalar::ZERO, |acc, blind| acc + blind);
    PrivateKey::from_scalar(inputs_sum - outputs_sum)
}

/// Member of the balance ring at every position, computed from the input rings, the output
/// commitments and the fee.
pub fn balance_ring(
    rings: &[InputRing],
    output_commitments: &[Commitment],
    fee: u64,
) -> Result<Vec<PublicKey>, Error> {
    let ring_size = rings.first().map_or(0, |ring| ring.members.len());
    if rings.iter().any(|ring| ring.members.len() != ring_size) {
        return Err(Error::MalformedRing("rings have different sizes"));
    }

    let spent = output_commitments
        .iter()
        .fold(Commitment::commit(fee, &Scalar::ZERO)?, |acc, c| acc + *c);

    (0..ring_size)
        .map(|position| {
            let total = rings.iter().fold(ProjectivePoint::IDENTITY, |acc, ring| {
                let member = &ring.members[position];
                acc + member.public_key.point() + member.commitment.point()
            });
            Ok(PublicKey::from_point(total - spent.point())?)
        })
        .collect()
}
