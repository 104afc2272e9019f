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

//! One-time keys.
//!
//! Every output pays to a fresh one-time public key only the recipient can link to their
//! address. With the recipient keys `(view, spend)` and a random transaction key `r`, the sender
//! computes the shared point `view·r` and the one-time key `spend·G + hash256(view·r)·G`. The
//! recipient finds the same shared point as `r·G·view` and recovers the one-time private key
//! `hash256(r·G·view) + spend`.
//!

use crate::cryptonote::hash::Hash;
use crate::util::key::{Error, KeyPair, PrivateKey, PublicKey, ViewPair};

/// Derive the scalar `hash256(shared)` reduced modulo the curve order.
pub fn derivation_scalar(shared: &PublicKey) -> PrivateKey {
    Hash::hash_to_scalar(shared.to_bytes())
}

/// Sender side one-time key derivation for one output.
#[derive(Debug, Clone)]
pub struct KeyGenerator {
    /// Recipient public spend key.
    pub spend: PublicKey,
    /// Recipient public view key.
    pub view: PublicKey,
    /// Random transaction private key.
    pub random: PrivateKey,
}

impl KeyGenerator {
    /// Construct a key generator for the recipient keys and a transaction private key.
    pub fn from_random(view: PublicKey, spend: PublicKey, random: PrivateKey) -> KeyGenerator {
        KeyGenerator {
            spend,
            view,
            random,
        }
    }

    /// The transaction public key `r·G` published in the output.
    pub fn tx_pubkey(&self) -> Result<PublicKey, Error> {
        PublicKey::from_private_key(&self.random)
    }

    /// The ECDH shared point `view·r`.
    pub fn shared_point(&self) -> Result<PublicKey, Error> {
        &self.view * &self.random
    }

    /// The one-time destination public key.
    pub fn one_time_key(&self) -> Result<PublicKey, Error> {
        let tweak = derivation_scalar(&self.shared_point()?);
        PublicKey::from_point(
            self.spend.point() + PublicKey::from_private_key(&tweak)?.point(),
        )
    }
}

/// Receiver side recovery of the one-time private key of an output.
#[derive(Debug, Clone)]
pub struct KeyRecoverer<'a> {
    /// Private key pair of the recipient.
    pub keys: &'a KeyPair,
    /// Transaction public key of the output.
    pub tx_pubkey: PublicKey,
}

impl<'a> KeyRecoverer<'a> {
    /// Construct a key recoverer for the output published with `tx_pubkey`.
    pub fn new(keys: &'a KeyPair, tx_pubkey: PublicKey) -> KeyRecoverer<'a> {
        KeyRecoverer { keys, tx_pubkey }
    }

    /// The ECDH shared point `tx_pubkey·view`.
    pub fn shared_point(&self) -> Result<PublicKey, Error> {
        &self.tx_pubkey * &self.keys.view
    }

    /// Recover the one-time private key spending the output.
    pub fn recover(&self) -> Result<PrivateKey, Error> {
        Ok(derivation_scalar(&self.shared_point()?) + self.keys.spend)
    }
}

/// Check whether outputs pay to a view pair, without access to the private spend key.
#[derive(Debug, Clone)]
pub struct KeyChecker<'a> {
    /// View pair of the recipient.
    pub keys: &'a ViewPair,
}

impl<'a> KeyChecker<'a> {
    /// Construct a key checker for a view pair.
    pub fn new(keys: &'a ViewPair) -> KeyChecker<'a> {
        KeyChecker { keys }
    }

    /// Return the shared point if `one_time_key` was derived for this view pair from
    /// `tx_pubkey`.
    pub fn check(&self, one_time_key: &PublicKey, tx_pubkey: &PublicKey) -> Option<PublicKey> {
        let shared = (tx_pubkey * &self.keys.view).ok()?;
        let tweak = PublicKey::from_private_key(&derivation_scalar(&shared)).ok()?;
        let expected = PublicKey::from_point(self.keys.spend.point() + tweak.point()).ok()?;

        if expected == *one_time_key {
            Some(shared)
        } else {
            None
        }
    }
}
